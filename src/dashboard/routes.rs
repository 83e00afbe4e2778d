//! Dashboard API route handlers.
//!
//! All endpoints return JSON. State is shared via `Arc<DashboardState>`
//! and written by the front-end after every accepted wager.

use axum::{extract::State, http::StatusCode, Json};
use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::engine::{RandomSource, SessionLedger, WagerEngine};
use crate::presentation::render_symbols;
use crate::types::{SessionState, WagerResult};

/// Round log entries kept in memory.
const MAX_ROUND_LOG: usize = 100;

// ---------------------------------------------------------------------------
// Shared state
// ---------------------------------------------------------------------------

/// Read-only copy of the engine's observable state.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub state: SessionState,
    pub balance: Decimal,
    pub initial_balance: Decimal,
    pub ledger: SessionLedger,
}

impl SessionSnapshot {
    pub fn from_engine<R: RandomSource>(engine: &WagerEngine<R>) -> Self {
        Self {
            state: engine.state(),
            balance: engine.balance(),
            initial_balance: engine.initial_balance(),
            ledger: engine.ledger().clone(),
        }
    }
}

/// Shared state accessible by all route handlers.
pub struct DashboardState {
    pub currency: String,
    pub session: RwLock<SessionSnapshot>,
    pub balance_history: RwLock<Vec<Decimal>>,
    pub recent_rounds: RwLock<Vec<RoundLogEntry>>,
}

impl DashboardState {
    pub fn new<R: RandomSource>(engine: &WagerEngine<R>, currency: &str) -> Self {
        Self {
            currency: currency.to_string(),
            session: RwLock::new(SessionSnapshot::from_engine(engine)),
            balance_history: RwLock::new(engine.history().to_vec()),
            recent_rounds: RwLock::new(Vec::new()),
        }
    }

    /// Copy the engine's state in after a round (or a withdrawal).
    pub async fn sync<R: RandomSource>(&self, engine: &WagerEngine<R>, result: Option<&WagerResult>) {
        *self.session.write().await = SessionSnapshot::from_engine(engine);
        *self.balance_history.write().await = engine.history().to_vec();

        if let Some(result) = result.filter(|r| r.accepted) {
            let mut rounds = self.recent_rounds.write().await;
            rounds.push(RoundLogEntry::new(engine.ledger().rounds, result));
            if rounds.len() > MAX_ROUND_LOG {
                let excess = rounds.len() - MAX_ROUND_LOG;
                rounds.drain(..excess);
            }
        }
    }
}

pub type AppState = Arc<DashboardState>;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub state: String,
    pub active: bool,
    pub currency: String,
    pub balance: Decimal,
    pub initial_balance: Decimal,
    pub net: Decimal,
    pub rounds: u64,
    pub wins: u64,
    pub losses: u64,
    pub win_rate: f64,
    pub peak_balance: Decimal,
    pub max_drawdown_pct: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct BalancePoint {
    pub index: usize,
    pub balance: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct RoundLogEntry {
    pub round: u64,
    pub timestamp: String,
    pub stake: Decimal,
    pub won: bool,
    pub symbols: Option<String>,
    pub delta: Decimal,
    pub balance_after: Decimal,
}

impl RoundLogEntry {
    fn new(round: u64, result: &WagerResult) -> Self {
        Self {
            round,
            timestamp: chrono::Utc::now().to_rfc3339(),
            stake: result.stake.unwrap_or(Decimal::ZERO),
            won: result.is_win(),
            symbols: result.symbols.as_deref().map(render_symbols),
            delta: result.delta.unwrap_or(Decimal::ZERO),
            balance_after: result.new_balance.unwrap_or(Decimal::ZERO),
        }
    }
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

/// GET /api/status
pub async fn get_status(State(state): State<AppState>) -> Json<StatusResponse> {
    let session = state.session.read().await;
    let ledger = &session.ledger;

    Json(StatusResponse {
        state: format!("{}", session.state),
        active: session.state == SessionState::Active,
        currency: state.currency.clone(),
        balance: session.balance,
        initial_balance: session.initial_balance,
        net: session.balance - session.initial_balance,
        rounds: ledger.rounds,
        wins: ledger.wins,
        losses: ledger.losses,
        win_rate: ledger.win_rate(),
        peak_balance: ledger.peak_balance,
        max_drawdown_pct: ledger.max_drawdown * 100.0,
    })
}

/// GET /api/balance-history
pub async fn get_balance_history(State(state): State<AppState>) -> Json<Vec<BalancePoint>> {
    let history = state.balance_history.read().await;
    Json(
        history
            .iter()
            .enumerate()
            .map(|(index, balance)| BalancePoint {
                index,
                balance: *balance,
            })
            .collect(),
    )
}

/// GET /api/rounds
pub async fn get_rounds(State(state): State<AppState>) -> Json<Vec<RoundLogEntry>> {
    let rounds = state.recent_rounds.read().await;
    Json(rounds.clone())
}

/// GET /health
pub async fn health() -> StatusCode {
    StatusCode::OK
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
