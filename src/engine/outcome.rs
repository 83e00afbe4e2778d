//! Outcome model: how a round is sampled and what a win pays.
//!
//! Three sampling policies cover the supported games:
//! - `Binary`: one unit draw, win iff `r < win_probability`.
//! - `Reels`: `reel_count` independent uniform symbols, win iff all equal.
//! - `ProbabilityFirst`: a unit draw decides a forced win (all reels set
//!   to one uniformly chosen symbol); otherwise reels are drawn as in
//!   `Reels`, and an accidental all-equal draw still counts as a win.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::rng::RandomSource;
use crate::types::{GameVariant, Symbol, WagerError};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SamplingPolicy {
    Binary,
    Reels,
    ProbabilityFirst,
}

impl SamplingPolicy {
    pub fn uses_reels(&self) -> bool {
        !matches!(self, SamplingPolicy::Binary)
    }
}

/// Probability and payout configuration for a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeModel {
    pub policy: SamplingPolicy,
    /// Ignored by the `Reels` policy.
    pub win_probability: f64,
    /// Winnings per unit staked.
    pub payout_multiplier: Decimal,
    #[serde(default = "Symbol::default_set")]
    pub reel_symbols: Vec<Symbol>,
    #[serde(default = "default_reel_count")]
    pub reel_count: usize,
    /// Debit the stake before sampling (slot games) instead of only on a loss.
    #[serde(default = "default_upfront")]
    pub stake_committed_upfront: bool,
}

fn default_reel_count() -> usize {
    3
}

fn default_upfront() -> bool {
    true
}

impl Default for OutcomeModel {
    fn default() -> Self {
        Self::slot()
    }
}

impl OutcomeModel {
    /// Simple bet: 45% win chance, pays 0.9x, stake settled after the draw.
    pub fn coin_flip() -> Self {
        Self {
            policy: SamplingPolicy::Binary,
            win_probability: 0.45,
            payout_multiplier: dec!(0.9),
            reel_symbols: Vec::new(),
            reel_count: 1,
            stake_committed_upfront: false,
        }
    }

    /// Three-reel slot that wins only on natural collision (1 in 49).
    pub fn slot() -> Self {
        Self {
            policy: SamplingPolicy::Reels,
            win_probability: 0.3,
            payout_multiplier: dec!(5),
            reel_symbols: Symbol::default_set(),
            reel_count: 3,
            stake_committed_upfront: true,
        }
    }

    /// Three-reel slot with a 10% forced-win check before the reels spin.
    pub fn slot_forced() -> Self {
        Self {
            policy: SamplingPolicy::ProbabilityFirst,
            win_probability: 0.1,
            payout_multiplier: dec!(5),
            reel_symbols: Symbol::default_set(),
            reel_count: 3,
            stake_committed_upfront: true,
        }
    }

    pub fn for_variant(variant: GameVariant) -> Self {
        match variant {
            GameVariant::CoinFlip => Self::coin_flip(),
            GameVariant::Slot => Self::slot(),
            GameVariant::SlotForced => Self::slot_forced(),
        }
    }

    /// Check the model is internally consistent.
    pub fn validate(&self) -> Result<(), WagerError> {
        if !self.win_probability.is_finite() || !(0.0..=1.0).contains(&self.win_probability) {
            return Err(WagerError::InvalidModel(format!(
                "win_probability must be within [0, 1], got {}",
                self.win_probability
            )));
        }
        if self.payout_multiplier < Decimal::ZERO {
            return Err(WagerError::InvalidModel(format!(
                "payout_multiplier must be non-negative, got {}",
                self.payout_multiplier
            )));
        }
        if self.reel_count == 0 {
            return Err(WagerError::InvalidModel(
                "reel_count must be at least 1".into(),
            ));
        }
        if self.policy.uses_reels() && self.reel_symbols.is_empty() {
            return Err(WagerError::InvalidModel(
                "reel policies need a non-empty symbol set".into(),
            ));
        }
        Ok(())
    }

    /// Probability that all reels land on the same symbol by chance.
    pub fn collision_probability(&self) -> f64 {
        let k = self.reel_symbols.len();
        if k == 0 {
            return 0.0;
        }
        let exponent = self.reel_count.saturating_sub(1) as i32;
        (1.0 / k as f64).powi(exponent)
    }

    /// Analytic per-round win probability under this model.
    ///
    /// For `ProbabilityFirst` this is `p + (1 - p) * collision`, slightly
    /// above the configured `win_probability`.
    pub fn effective_win_rate(&self) -> f64 {
        match self.policy {
            SamplingPolicy::Binary => self.win_probability,
            SamplingPolicy::Reels => self.collision_probability(),
            SamplingPolicy::ProbabilityFirst => {
                let p = self.win_probability;
                p + (1.0 - p) * self.collision_probability()
            }
        }
    }

    /// Draw one round's outcome.
    pub fn sample<R: RandomSource + ?Sized>(&self, rng: &mut R) -> SampledOutcome {
        let outcome = match self.policy {
            SamplingPolicy::Binary => {
                let r = rng.next_unit();
                SampledOutcome {
                    won: r < self.win_probability,
                    symbols: None,
                }
            }
            SamplingPolicy::Reels => SampledOutcome::from_symbols(self.spin_reels(rng)),
            SamplingPolicy::ProbabilityFirst => {
                let r = rng.next_unit();
                let symbols = if r < self.win_probability {
                    let idx = rng.next_index(self.reel_symbols.len());
                    vec![self.reel_symbols[idx].clone(); self.reel_count]
                } else {
                    self.spin_reels(rng)
                };
                SampledOutcome::from_symbols(symbols)
            }
        };

        debug!(
            policy = ?self.policy,
            won = outcome.won,
            symbols = ?outcome.symbols,
            "Outcome sampled"
        );
        outcome
    }

    fn spin_reels<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Vec<Symbol> {
        (0..self.reel_count)
            .map(|_| self.reel_symbols[rng.next_index(self.reel_symbols.len())].clone())
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Sampled outcome
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct SampledOutcome {
    pub won: bool,
    pub symbols: Option<Vec<Symbol>>,
}

impl SampledOutcome {
    fn from_symbols(symbols: Vec<Symbol>) -> Self {
        Self {
            won: all_identical(&symbols),
            symbols: Some(symbols),
        }
    }
}

fn all_identical(symbols: &[Symbol]) -> bool {
    symbols.windows(2).all(|pair| pair[0] == pair[1])
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
