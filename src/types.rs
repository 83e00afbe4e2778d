//! Shared types for the wager engine.
//!
//! These types form the data model used across all modules: the engine
//! produces them, the simulation harness aggregates them, and the
//! terminal front-end and dashboard render them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Symbols
// ---------------------------------------------------------------------------

/// A single reel symbol.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(pub String);

impl Symbol {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The seven-symbol reel used by every slot preset.
    pub fn default_set() -> Vec<Symbol> {
        ["🍒", "🍋", "🍊", "🍇", "🔔", "⭐", "🥑"]
            .into_iter()
            .map(Symbol::from)
            .collect()
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Symbol(s.to_string())
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Game variant
// ---------------------------------------------------------------------------

/// Which preset game a session plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameVariant {
    /// Binary outcome, stake settled after the draw.
    CoinFlip,
    /// Three reels, win on natural symbol collision.
    Slot,
    /// Three reels, win pre-selected by a probability check.
    SlotForced,
}

impl GameVariant {
    pub const ALL: &'static [GameVariant] = &[
        GameVariant::CoinFlip,
        GameVariant::Slot,
        GameVariant::SlotForced,
    ];
}

impl fmt::Display for GameVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameVariant::CoinFlip => write!(f, "coin-flip"),
            GameVariant::Slot => write!(f, "slot"),
            GameVariant::SlotForced => write!(f, "slot-forced"),
        }
    }
}

/// Parse a variant name (case-insensitive, `-` and `_` interchangeable).
impl std::str::FromStr for GameVariant {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "coin_flip" | "coinflip" | "coin" | "simple" => Ok(GameVariant::CoinFlip),
            "slot" | "slots" => Ok(GameVariant::Slot),
            "slot_forced" | "forced" | "pro" => Ok(GameVariant::SlotForced),
            _ => Err(anyhow::anyhow!("Unknown game variant: {s}")),
        }
    }
}

// ---------------------------------------------------------------------------
// Session state
// ---------------------------------------------------------------------------

/// Session lifecycle. `Exhausted` and `WithdrawnByChoice` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    Active,
    Exhausted,
    WithdrawnByChoice,
}

impl SessionState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, SessionState::Active)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::Active => write!(f, "🟢 ACTIVE"),
            SessionState::Exhausted => write!(f, "🔴 EXHAUSTED"),
            SessionState::WithdrawnByChoice => write!(f, "🟡 WITHDRAWN"),
        }
    }
}

// ---------------------------------------------------------------------------
// Wager result
// ---------------------------------------------------------------------------

/// Why a wager was not accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RejectionReason {
    /// Stake text is not a finite number.
    InvalidInput,
    NonPositiveStake,
    InsufficientBalance,
    /// A win would lift the balance past the session limit.
    PayoutLimitExceeded,
    /// The session already reached a terminal state.
    SessionTerminated,
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectionReason::InvalidInput => write!(f, "stake is not a valid number"),
            RejectionReason::NonPositiveStake => write!(f, "stake must be positive"),
            RejectionReason::InsufficientBalance => write!(f, "stake exceeds balance"),
            RejectionReason::PayoutLimitExceeded => write!(f, "payout would exceed the balance limit"),
            RejectionReason::SessionTerminated => write!(f, "session has ended"),
        }
    }
}

/// Outcome of a single `resolve_wager` call, passed by value to the caller.
///
/// A rejected result only carries `rejection_reason` and `is_exhausted`;
/// all other optional fields are `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WagerResult {
    pub accepted: bool,
    pub rejection_reason: Option<RejectionReason>,
    /// Final reel symbols; `None` for the binary model.
    pub symbols: Option<Vec<Symbol>>,
    pub won: Option<bool>,
    /// `+stake * payout_multiplier` on a win, `-stake` on a loss.
    pub delta: Option<Decimal>,
    pub new_balance: Option<Decimal>,
    pub is_exhausted: bool,
    pub stake: Option<Decimal>,
    pub balance_before: Option<Decimal>,
}

impl WagerResult {
    pub fn rejected(reason: RejectionReason, is_exhausted: bool) -> Self {
        Self {
            accepted: false,
            rejection_reason: Some(reason),
            symbols: None,
            won: None,
            delta: None,
            new_balance: None,
            is_exhausted,
            stake: None,
            balance_before: None,
        }
    }

    /// Net balance movement of the round. Differs from `delta` on a win
    /// when the stake was committed upfront.
    pub fn net_change(&self) -> Option<Decimal> {
        match (self.new_balance, self.balance_before) {
            (Some(after), Some(before)) => Some(after - before),
            _ => None,
        }
    }

    pub fn is_win(&self) -> bool {
        self.won == Some(true)
    }
}

impl fmt::Display for WagerResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.accepted {
            let reason = self
                .rejection_reason
                .map(|r| r.to_string())
                .unwrap_or_else(|| "unknown".to_string());
            return write!(f, "rejected: {reason}");
        }

        if let Some(symbols) = &self.symbols {
            let reels: Vec<&str> = symbols.iter().map(Symbol::as_str).collect();
            write!(f, "[{}] ", reels.join(" "))?;
        }

        let delta = self.delta.unwrap_or(Decimal::ZERO);
        let balance = self.new_balance.unwrap_or(Decimal::ZERO);
        if self.is_win() {
            write!(f, "WIN +{:.2} | balance {:.2}", delta, balance)
        } else {
            write!(f, "LOSS {:.2} | balance {:.2}", delta, balance)
        }
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Construction and configuration errors. Wager rejections are not
/// errors; they travel in [`WagerResult::rejection_reason`].
#[derive(Debug, thiserror::Error)]
pub enum WagerError {
    #[error("Invalid outcome model: {0}")]
    InvalidModel(String),

    #[error("Initial balance must be non-negative, got {0:.2}")]
    NegativeBalance(Decimal),

    #[error("Initial balance {0} exceeds the session limit")]
    BalanceTooLarge(Decimal),

    #[error("Configuration error: {0}")]
    Config(String),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
