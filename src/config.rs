//! Configuration loading from TOML.
//!
//! Reads `config.toml` (or the path in `WAGERSIM_CONFIG`) and deserializes
//! into strongly-typed structs. Every section has defaults, so a missing
//! file or a partial file still yields a playable configuration.

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::engine::{OutcomeModel, MAX_BALANCE};
use crate::simulation::SimulationConfig;
use crate::types::{GameVariant, WagerError};

/// Default config file path.
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Top-level application configuration.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub session: SessionConfig,
    /// Full outcome model overriding the variant preset.
    pub model: Option<OutcomeModel>,
    pub animation: AnimationConfig,
    pub dashboard: DashboardConfig,
    pub simulation: SimulationConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SessionConfig {
    pub initial_balance: Decimal,
    pub currency: String,
    pub variant: GameVariant,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            initial_balance: dec!(1000),
            currency: "元".to_string(),
            variant: GameVariant::SlotForced,
        }
    }
}

/// Cosmetic reel-spin reveal in the terminal front-end.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AnimationConfig {
    pub spin_frames: u32,
    pub frame_delay_ms: u64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            spin_frames: 20,
            frame_delay_ms: 100,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DashboardConfig {
    pub enabled: bool,
    pub port: u16,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            port: 8080,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path}"))?;
        Self::from_toml(&contents).with_context(|| format!("Failed to parse config file: {path}"))
    }

    /// Load from `path` if it exists, defaults otherwise.
    pub fn load_or_default(path: &str) -> Result<Self> {
        if !Path::new(path).exists() {
            info!(path, "No config file found, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// The outcome model for this session: the explicit `[model]` table
    /// if present, else the variant preset.
    pub fn outcome_model(&self) -> OutcomeModel {
        self.model
            .clone()
            .unwrap_or_else(|| OutcomeModel::for_variant(self.session.variant))
    }

    pub fn validate(&self) -> Result<(), WagerError> {
        if self.session.initial_balance < Decimal::ZERO {
            return Err(WagerError::NegativeBalance(self.session.initial_balance));
        }
        if self.session.initial_balance > MAX_BALANCE {
            return Err(WagerError::BalanceTooLarge(self.session.initial_balance));
        }
        self.outcome_model().validate()?;
        if self.simulation.stake <= Decimal::ZERO {
            return Err(WagerError::Config(format!(
                "simulation.stake must be positive, got {}",
                self.simulation.stake
            )));
        }
        Ok(())
    }

    /// Resolve the config path from `WAGERSIM_CONFIG`, falling back to
    /// [`DEFAULT_CONFIG_FILE`].
    pub fn resolve_path() -> String {
        std::env::var("WAGERSIM_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string())
    }
}
