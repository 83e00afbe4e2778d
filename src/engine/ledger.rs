//! Session ledger: running statistics over accepted wagers.
//!
//! Tracks round counts, turnover, peak balance and drawdown so the
//! front-end and dashboard can report on a session without replaying
//! its history.

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::WagerResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionLedger {
    pub rounds: u64,
    pub wins: u64,
    pub losses: u64,
    pub total_staked: Decimal,
    /// Sum of winnings credited (gross of the stake).
    pub total_paid_out: Decimal,
    pub peak_balance: Decimal,
    /// Largest fractional fall from a running peak (0.0 = never below peak).
    pub max_drawdown: f64,
}

impl SessionLedger {
    pub fn new(initial_balance: Decimal) -> Self {
        Self {
            rounds: 0,
            wins: 0,
            losses: 0,
            total_staked: Decimal::ZERO,
            total_paid_out: Decimal::ZERO,
            peak_balance: initial_balance,
            max_drawdown: 0.0,
        }
    }

    /// Fold one result into the ledger. Rejected results are ignored.
    pub fn record(&mut self, result: &WagerResult) {
        if !result.accepted {
            return;
        }

        self.rounds += 1;
        self.total_staked = self
            .total_staked
            .saturating_add(result.stake.unwrap_or(Decimal::ZERO));

        if result.is_win() {
            self.wins += 1;
            self.total_paid_out = self
                .total_paid_out
                .saturating_add(result.delta.unwrap_or(Decimal::ZERO));
        } else {
            self.losses += 1;
        }

        if let Some(balance) = result.new_balance {
            self.observe_balance(balance);
        }
    }

    /// Update peak and drawdown for a balance seen mid-round or after it.
    pub fn observe_balance(&mut self, balance: Decimal) {
        if balance > self.peak_balance {
            self.peak_balance = balance;
        }
        let dd = self.drawdown_at(balance);
        if dd > self.max_drawdown {
            self.max_drawdown = dd;
        }
    }

    /// Fractional drawdown of `balance` from the current peak.
    pub fn drawdown_at(&self, balance: Decimal) -> f64 {
        if self.peak_balance <= Decimal::ZERO {
            return 0.0;
        }
        (Decimal::ONE - balance / self.peak_balance)
            .to_f64()
            .unwrap_or(0.0)
            .max(0.0)
    }

    /// Observed win rate as a fraction. 0.0 before the first round.
    pub fn win_rate(&self) -> f64 {
        if self.rounds == 0 {
            0.0
        } else {
            self.wins as f64 / self.rounds as f64
        }
    }

    /// Paid out minus staked.
    pub fn net_result(&self) -> Decimal {
        self.total_paid_out - self.total_staked
    }
}

impl fmt::Display for SessionLedger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rounds={} (W{}/L{}) | win_rate={:.1}% | staked={:.2} | paid={:.2} | peak={:.2} | max_dd={:.1}%",
            self.rounds,
            self.wins,
            self.losses,
            self.win_rate() * 100.0,
            self.total_staked,
            self.total_paid_out,
            self.peak_balance,
            self.max_drawdown * 100.0,
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
