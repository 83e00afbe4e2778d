//! Terminal rendering helpers.
//!
//! Pure functions turning engine output into display text. The binary
//! owns all I/O and timing; nothing here touches the engine's state.

use rust_decimal::prelude::*;

use crate::engine::{OutcomeModel, RandomSource};
use crate::types::{RejectionReason, SessionState, Symbol, WagerResult};

const SPARK_BARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Shown when the game ends, whatever the reason.
pub const TIP: &str = "💡 Ten bets, nine losses. Value your life, stay away from gambling!";

pub fn balance_line(balance: Decimal, currency: &str) -> String {
    format!("💰 Balance: {:.2} {currency}", balance)
}

pub fn render_symbols(symbols: &[Symbol]) -> String {
    symbols
        .iter()
        .map(Symbol::as_str)
        .collect::<Vec<_>>()
        .join("  ")
}

/// One-line summary of a wager result.
pub fn render_result(result: &WagerResult, currency: &str) -> String {
    if !result.accepted {
        return match result.rejection_reason {
            Some(RejectionReason::InvalidInput) => "⚠️  Please enter a valid number!".to_string(),
            Some(RejectionReason::NonPositiveStake) | Some(RejectionReason::InsufficientBalance) => {
                "⚠️  Invalid stake amount!".to_string()
            }
            Some(RejectionReason::PayoutLimitExceeded) => {
                "⚠️  Table limit reached, lower your stake!".to_string()
            }
            Some(RejectionReason::SessionTerminated) | None => "⚠️  The game is over.".to_string(),
        };
    }

    let delta = result.delta.unwrap_or(Decimal::ZERO);
    if result.is_win() {
        format!("🎉 WIN +{:.2} {currency}", delta)
    } else {
        format!("💸 LOSS -{:.2} {currency}", delta.abs())
    }
}

/// Closing message for a terminal session state.
pub fn farewell(state: SessionState, balance: Decimal, currency: &str) -> String {
    match state {
        SessionState::Exhausted => format!("😭 You have lost all your funds!\n\n{TIP}"),
        SessionState::WithdrawnByChoice => format!(
            "🚪 You walked away with {:.2} {currency}... and the boss took it all anyway.\n\n{TIP}",
            balance
        ),
        SessionState::Active => balance_line(balance, currency),
    }
}

/// Render the most recent `width` history points as a sparkline scaled
/// between their minimum and maximum.
pub fn sparkline(history: &[Decimal], width: usize) -> String {
    if history.is_empty() || width == 0 {
        return String::new();
    }
    let start = history.len().saturating_sub(width);
    let window = &history[start..];

    let min = window.iter().copied().min().unwrap_or(Decimal::ZERO);
    let max = window.iter().copied().max().unwrap_or(Decimal::ZERO);
    let range = max - min;
    let top = (SPARK_BARS.len() - 1) as f64;

    window
        .iter()
        .map(|v| {
            if range.is_zero() {
                return SPARK_BARS[SPARK_BARS.len() / 2];
            }
            let level = ((*v - min) / range).to_f64().unwrap_or(0.0);
            SPARK_BARS[(level * top).round() as usize]
        })
        .collect()
}

/// Cosmetic frames shown while the reels "spin". Drawn from a separate
/// random source so the engine's draws are unaffected.
pub fn spin_frames<R: RandomSource + ?Sized>(
    model: &OutcomeModel,
    frames: u32,
    rng: &mut R,
) -> Vec<Vec<Symbol>> {
    if !model.policy.uses_reels() || model.reel_symbols.is_empty() {
        return Vec::new();
    }
    (0..frames)
        .map(|_| {
            (0..model.reel_count)
                .map(|_| model.reel_symbols[rng.next_index(model.reel_symbols.len())].clone())
                .collect()
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
