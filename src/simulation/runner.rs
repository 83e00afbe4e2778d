//! Monte Carlo session runner.
//!
//! Plays many independent sessions with a fixed-stake strategy and
//! reports ruin rate, final balances and the observed win rate against
//! the model's analytic one.

use rust_decimal::prelude::*;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

use crate::engine::{OutcomeModel, StdRandom, WagerEngine};
use crate::types::{SessionState, WagerError};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub sessions: u32,
    pub initial_balance: Decimal,
    /// Stake per round; clamped to the remaining balance.
    pub stake: Decimal,
    pub max_rounds: u64,
    /// Session `i` draws from `StdRng` seeded with `seed + i`.
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            sessions: 1_000,
            initial_balance: dec!(1000),
            stake: dec!(100),
            max_rounds: 500,
            seed: 42,
        }
    }
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub sessions: u32,
    /// Sessions that ended exhausted.
    pub ruined: u32,
    /// Sessions that reached `max_rounds` and withdrew.
    pub survived: u32,
    pub mean_final_balance: Decimal,
    pub best_final_balance: Decimal,
    pub total_rounds: u64,
    pub total_wins: u64,
    pub observed_win_rate: f64,
    pub expected_win_rate: f64,
    pub mean_rounds: f64,
    pub max_drawdown_pct: f64,
}

impl SimulationReport {
    pub fn ruin_rate(&self) -> f64 {
        if self.sessions == 0 {
            0.0
        } else {
            self.ruined as f64 / self.sessions as f64
        }
    }
}

impl fmt::Display for SimulationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "sessions={} | ruined={} ({:.1}%) | mean_final={:.2} | best={:.2} | rounds={} (mean {:.1}) | win_rate={:.2}% (expected {:.2}%) | max_dd={:.1}%",
            self.sessions,
            self.ruined,
            self.ruin_rate() * 100.0,
            self.mean_final_balance,
            self.best_final_balance,
            self.total_rounds,
            self.mean_rounds,
            self.observed_win_rate * 100.0,
            self.expected_win_rate * 100.0,
            self.max_drawdown_pct,
        )
    }
}

// ---------------------------------------------------------------------------
// Simulator
// ---------------------------------------------------------------------------

pub struct Simulator {
    model: OutcomeModel,
}

impl Simulator {
    pub fn new(model: OutcomeModel) -> Self {
        Self { model }
    }

    /// Run every session to exhaustion or `max_rounds`.
    pub fn run(&self, config: &SimulationConfig) -> Result<SimulationReport, WagerError> {
        if config.stake <= Decimal::ZERO {
            return Err(WagerError::Config(format!(
                "simulation stake must be positive, got {}",
                config.stake
            )));
        }

        let mut ruined = 0u32;
        let mut survived = 0u32;
        let mut balance_sum = Decimal::ZERO;
        let mut best = Decimal::ZERO;
        let mut total_rounds = 0u64;
        let mut total_wins = 0u64;
        let mut max_dd = 0.0_f64;

        for i in 0..config.sessions {
            let rng = StdRandom::seeded(config.seed.wrapping_add(i as u64));
            let mut engine = WagerEngine::new(config.initial_balance, self.model.clone(), rng)?;

            while engine.is_active() && engine.ledger().rounds < config.max_rounds {
                let stake = config.stake.min(engine.balance());
                let result = engine.resolve_wager(stake);
                if !result.accepted {
                    debug!(session = i, reason = ?result.rejection_reason, "Simulated session refused a stake");
                    break;
                }
            }

            let final_balance = if engine.is_active() {
                engine.withdraw()
            } else {
                engine.balance()
            };

            match engine.state() {
                SessionState::Exhausted => ruined += 1,
                _ => survived += 1,
            }

            let ledger = engine.ledger();
            total_rounds += ledger.rounds;
            total_wins += ledger.wins;
            if ledger.max_drawdown > max_dd {
                max_dd = ledger.max_drawdown;
            }
            balance_sum += final_balance;
            if final_balance > best {
                best = final_balance;
            }

            debug!(
                session = i,
                rounds = ledger.rounds,
                final_balance = %final_balance,
                state = ?engine.state(),
                "Simulated session finished"
            );
        }

        let mean_final_balance = if config.sessions > 0 {
            balance_sum / Decimal::from(config.sessions)
        } else {
            Decimal::ZERO
        };

        let report = SimulationReport {
            sessions: config.sessions,
            ruined,
            survived,
            mean_final_balance,
            best_final_balance: best,
            total_rounds,
            total_wins,
            observed_win_rate: if total_rounds > 0 {
                total_wins as f64 / total_rounds as f64
            } else {
                0.0
            },
            expected_win_rate: self.model.effective_win_rate(),
            mean_rounds: if config.sessions > 0 {
                total_rounds as f64 / config.sessions as f64
            } else {
                0.0
            },
            max_drawdown_pct: max_dd * 100.0,
        };

        info!(
            sessions = report.sessions,
            ruined = report.ruined,
            mean_final = %report.mean_final_balance.round_dp(2),
            observed = report.observed_win_rate,
            expected = report.expected_win_rate,
            "Simulation complete"
        );

        Ok(report)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
