//! WagerEngine: balance, history and the per-round state transition.
//!
//! One engine per session. Every call to [`WagerEngine::resolve_wager`]
//! either rejects the stake without touching any state, or runs one full
//! round: optional upfront debit, outcome draw, settlement, history append
//! and exhaustion check.

use rust_decimal::prelude::*;
use tracing::{debug, info, warn};

use super::ledger::SessionLedger;
use super::outcome::OutcomeModel;
use super::rng::{RandomSource, StdRandom};
use crate::types::{RejectionReason, SessionState, WagerError, WagerResult};

/// Largest balance a session may hold. Wagers whose payout would push the
/// balance past it are refused, so settlement arithmetic never overflows.
pub const MAX_BALANCE: Decimal = rust_decimal_macros::dec!(1000000000000000000);

pub struct WagerEngine<R: RandomSource = StdRandom> {
    balance: Decimal,
    initial_balance: Decimal,
    /// Balance snapshots, oldest first. Starts with the initial balance.
    history: Vec<Decimal>,
    model: OutcomeModel,
    state: SessionState,
    ledger: SessionLedger,
    rng: R,
}

impl<R: RandomSource> WagerEngine<R> {
    /// Create a session. A zero initial balance starts already exhausted.
    pub fn new(initial_balance: Decimal, model: OutcomeModel, rng: R) -> Result<Self, WagerError> {
        if initial_balance < Decimal::ZERO {
            return Err(WagerError::NegativeBalance(initial_balance));
        }
        if initial_balance > MAX_BALANCE {
            return Err(WagerError::BalanceTooLarge(initial_balance));
        }
        model.validate()?;

        let state = if initial_balance <= Decimal::ZERO {
            SessionState::Exhausted
        } else {
            SessionState::Active
        };

        info!(
            initial_balance = %initial_balance,
            policy = ?model.policy,
            win_probability = model.win_probability,
            payout_multiplier = %model.payout_multiplier,
            upfront = model.stake_committed_upfront,
            "Session opened"
        );

        Ok(Self {
            balance: initial_balance,
            initial_balance,
            history: vec![initial_balance],
            model,
            state,
            ledger: SessionLedger::new(initial_balance),
            rng,
        })
    }

    // -- Accessors --------------------------------------------------------

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn initial_balance(&self) -> Decimal {
        self.initial_balance
    }

    pub fn history(&self) -> &[Decimal] {
        &self.history
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_exhausted(&self) -> bool {
        self.balance <= Decimal::ZERO
    }

    pub fn is_active(&self) -> bool {
        self.state == SessionState::Active
    }

    pub fn model(&self) -> &OutcomeModel {
        &self.model
    }

    pub fn ledger(&self) -> &SessionLedger {
        &self.ledger
    }

    // -- Operations -------------------------------------------------------

    /// Validate and resolve one wager.
    ///
    /// Rejections (`SessionTerminated`, `NonPositiveStake`,
    /// `InsufficientBalance`, `PayoutLimitExceeded`, checked in that order)
    /// leave balance and history untouched.
    pub fn resolve_wager(&mut self, stake: Decimal) -> WagerResult {
        let win_amount = match self.validate_stake(stake) {
            Ok(win_amount) => win_amount,
            Err(rejection) => return rejection,
        };

        let balance_before = self.balance;
        let upfront = self.model.stake_committed_upfront;

        if upfront {
            self.balance -= stake;
            self.history.push(self.balance);
            self.ledger.observe_balance(self.balance);
        }

        let outcome = self.model.sample(&mut self.rng);

        // Bounded by MAX_BALANCE in validate_stake.
        let delta = if outcome.won {
            self.balance += win_amount;
            win_amount
        } else {
            if !upfront {
                self.balance -= stake;
            }
            -stake
        };

        self.history.push(self.balance);

        let is_exhausted = self.is_exhausted();
        if is_exhausted {
            self.state = SessionState::Exhausted;
        }

        let result = WagerResult {
            accepted: true,
            rejection_reason: None,
            symbols: outcome.symbols,
            won: Some(outcome.won),
            delta: Some(delta),
            new_balance: Some(self.balance),
            is_exhausted,
            stake: Some(stake),
            balance_before: Some(balance_before),
        };
        self.ledger.record(&result);

        info!(
            round = self.ledger.rounds,
            stake = %stake,
            won = outcome.won,
            delta = %delta,
            balance = %self.balance,
            "Wager resolved"
        );
        if is_exhausted {
            warn!(rounds = self.ledger.rounds, "Balance exhausted, session over");
        }

        result
    }

    /// Parse stake text and resolve it. See [`parse_stake`] for how text
    /// maps to a rejection.
    pub fn resolve_wager_input(&mut self, input: &str) -> WagerResult {
        if self.state.is_terminal() {
            return self.reject_terminated();
        }
        match parse_stake(input) {
            Ok(stake) => self.resolve_wager(stake),
            Err(reason) => self.reject(reason, input),
        }
    }

    /// Resolve a float stake. NaN and infinities are `InvalidInput`;
    /// finite values with no decimal form are rejected like their text.
    pub fn resolve_wager_f64(&mut self, stake: f64) -> WagerResult {
        if self.state.is_terminal() {
            return self.reject_terminated();
        }
        if !stake.is_finite() {
            return self.reject(RejectionReason::InvalidInput, &stake.to_string());
        }
        match Decimal::from_f64(stake) {
            Some(amount) if amount.is_zero() && stake > 0.0 => {
                self.reject(unrepresentable_stake(stake), &stake.to_string())
            }
            Some(amount) => self.resolve_wager(amount),
            None => self.reject(unrepresentable_stake(stake), &stake.to_string()),
        }
    }

    /// Leave the table with the current balance.
    ///
    /// Moves an active session to `WithdrawnByChoice`. On an already
    /// ended session the state is kept and the balance is returned again.
    pub fn withdraw(&mut self) -> Decimal {
        if self.state == SessionState::Active {
            self.state = SessionState::WithdrawnByChoice;
            info!(
                balance = %self.balance,
                net = %(self.balance - self.initial_balance),
                rounds = self.ledger.rounds,
                "Player withdrew"
            );
        } else {
            warn!(state = ?self.state, "Withdraw called on an ended session");
        }
        self.balance
    }

    // -- Validation -------------------------------------------------------

    /// Returns the amount a win would credit, or the rejection.
    fn validate_stake(&self, stake: Decimal) -> Result<Decimal, WagerResult> {
        if self.state.is_terminal() {
            return Err(self.reject_terminated());
        }
        if stake <= Decimal::ZERO {
            return Err(self.reject(RejectionReason::NonPositiveStake, &stake.to_string()));
        }
        if stake > self.balance {
            return Err(self.reject(RejectionReason::InsufficientBalance, &stake.to_string()));
        }
        self.win_amount(stake)
            .ok_or_else(|| self.reject(RejectionReason::PayoutLimitExceeded, &stake.to_string()))
    }

    /// Winnings for `stake`, if crediting them keeps the balance within
    /// [`MAX_BALANCE`].
    fn win_amount(&self, stake: Decimal) -> Option<Decimal> {
        let base = if self.model.stake_committed_upfront {
            self.balance - stake
        } else {
            self.balance
        };
        let win = stake.checked_mul(self.model.payout_multiplier)?;
        let settled = base.checked_add(win)?;
        (settled <= MAX_BALANCE).then_some(win)
    }

    fn reject(&self, reason: RejectionReason, input: &str) -> WagerResult {
        debug!(?reason, input, balance = %self.balance, "Wager rejected");
        WagerResult::rejected(reason, self.is_exhausted())
    }

    fn reject_terminated(&self) -> WagerResult {
        warn!(state = ?self.state, "Wager attempted after session ended");
        WagerResult::rejected(RejectionReason::SessionTerminated, self.is_exhausted())
    }
}

/// Parse stake text as a decimal amount, in plain or scientific notation.
///
/// Text that is not a finite number (empty, `inf`, `nan`, garbage) is
/// `InvalidInput`. A finite number with no decimal form is rejected by
/// magnitude: too large and positive is `InsufficientBalance`, negative
/// is `NonPositiveStake`, and a positive value below the smallest decimal
/// unit is `InvalidInput`.
pub fn parse_stake(input: &str) -> Result<Decimal, RejectionReason> {
    let text = input.trim();
    let amount = text
        .parse::<Decimal>()
        .ok()
        .or_else(|| Decimal::from_scientific(text).ok());
    let value = text.parse::<f64>().ok().filter(|v| v.is_finite());

    match (amount, value) {
        // Digits past the 28th decimal place round away.
        (Some(amount), Some(value)) if amount.is_zero() && value > 0.0 => {
            Err(unrepresentable_stake(value))
        }
        (Some(amount), _) => Ok(amount),
        (None, Some(value)) => Err(unrepresentable_stake(value)),
        (None, None) => Err(RejectionReason::InvalidInput),
    }
}

/// Rejection for a finite number that has no `Decimal` form.
fn unrepresentable_stake(value: f64) -> RejectionReason {
    if value <= 0.0 {
        RejectionReason::NonPositiveStake
    } else if value < 1.0 {
        RejectionReason::InvalidInput
    } else {
        RejectionReason::InsufficientBalance
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::rng::{MockRandomSource, ScriptedRandom};
    use crate::types::Symbol;
    use rust_decimal_macros::dec;

    fn forced_unit(value: f64) -> MockRandomSource {
        let mut rng = MockRandomSource::new();
        rng.expect_next_unit().return_const(value);
        rng.expect_next_index().returning(|_| 0);
        rng
    }

    fn coin_engine(rng: ScriptedRandom) -> WagerEngine<ScriptedRandom> {
        WagerEngine::new(dec!(1000), OutcomeModel::coin_flip(), rng).unwrap()
    }

    // -- Construction --

    #[test]
    fn test_new_engine() {
        let engine = coin_engine(ScriptedRandom::default());
        assert_eq!(engine.balance(), dec!(1000));
        assert_eq!(engine.initial_balance(), dec!(1000));
        assert_eq!(engine.history(), &[dec!(1000)]);
        assert_eq!(engine.state(), SessionState::Active);
        assert!(!engine.is_exhausted());
    }

    #[test]
    fn test_new_rejects_negative_balance() {
        let result = WagerEngine::new(dec!(-1), OutcomeModel::slot(), ScriptedRandom::default());
        assert!(matches!(result, Err(WagerError::NegativeBalance(_))));
    }

    #[test]
    fn test_new_rejects_invalid_model() {
        let mut model = OutcomeModel::slot();
        model.reel_count = 0;
        let result = WagerEngine::new(dec!(100), model, ScriptedRandom::default());
        assert!(matches!(result, Err(WagerError::InvalidModel(_))));
    }

    #[test]
    fn test_zero_balance_starts_exhausted() {
        let mut engine =
            WagerEngine::new(Decimal::ZERO, OutcomeModel::slot(), ScriptedRandom::default()).unwrap();
        assert_eq!(engine.state(), SessionState::Exhausted);
        let r = engine.resolve_wager(dec!(1));
        assert_eq!(r.rejection_reason, Some(RejectionReason::SessionTerminated));
        assert!(r.is_exhausted);
    }

    // -- Validation --

    #[test]
    fn test_non_positive_stake_rejected() {
        let mut engine = coin_engine(ScriptedRandom::default());
        for stake in [dec!(0), dec!(-1), dec!(-0.01)] {
            let r = engine.resolve_wager(stake);
            assert!(!r.accepted);
            assert_eq!(r.rejection_reason, Some(RejectionReason::NonPositiveStake));
            assert!(r.new_balance.is_none());
        }
        assert_eq!(engine.balance(), dec!(1000));
        assert_eq!(engine.history().len(), 1);
    }

    #[test]
    fn test_stake_above_balance_rejected() {
        let mut engine = coin_engine(ScriptedRandom::default());
        let r = engine.resolve_wager(dec!(1000.01));
        assert_eq!(r.rejection_reason, Some(RejectionReason::InsufficientBalance));
        assert_eq!(engine.balance(), dec!(1000));
        assert_eq!(engine.history(), &[dec!(1000)]);
    }

    #[test]
    fn test_invalid_input_rejected() {
        let mut engine = coin_engine(ScriptedRandom::default());
        for text in ["", "abc", "12abc", "inf", "NaN", "1,000"] {
            let r = engine.resolve_wager_input(text);
            assert_eq!(r.rejection_reason, Some(RejectionReason::InvalidInput), "input {text:?}");
        }
        assert_eq!(engine.balance(), dec!(1000));
        assert_eq!(engine.history().len(), 1);
    }

    #[test]
    fn test_non_numeric_float_rejected() {
        let mut engine = coin_engine(ScriptedRandom::default());
        assert_eq!(
            engine.resolve_wager_f64(f64::NAN).rejection_reason,
            Some(RejectionReason::InvalidInput)
        );
        assert_eq!(
            engine.resolve_wager_f64(f64::INFINITY).rejection_reason,
            Some(RejectionReason::InvalidInput)
        );
        assert_eq!(
            engine.resolve_wager_f64(-5.0).rejection_reason,
            Some(RejectionReason::NonPositiveStake)
        );
    }

    #[test]
    fn test_repeated_rejection_is_idempotent() {
        let mut engine = coin_engine(ScriptedRandom::default());
        let first = engine.resolve_wager_input("lots");
        let second = engine.resolve_wager_input("lots");
        assert_eq!(first, second);
        assert_eq!(engine.balance(), dec!(1000));
        assert_eq!(engine.history(), &[dec!(1000)]);
    }

    #[test]
    fn test_parse_stake() {
        assert_eq!(parse_stake(" 100 "), Ok(dec!(100)));
        assert_eq!(parse_stake("12.5"), Ok(dec!(12.5)));
        assert_eq!(parse_stake("1e2"), Ok(dec!(100)));
        assert_eq!(parse_stake("-3"), Ok(dec!(-3)));
        assert_eq!(parse_stake("ten"), Err(RejectionReason::InvalidInput));
        assert_eq!(parse_stake("   "), Err(RejectionReason::InvalidInput));
        assert_eq!(parse_stake("inf"), Err(RejectionReason::InvalidInput));
    }

    #[test]
    fn test_parse_stake_out_of_decimal_range() {
        assert_eq!(parse_stake("1e40"), Err(RejectionReason::InsufficientBalance));
        assert_eq!(
            parse_stake("100000000000000000000000000000000"),
            Err(RejectionReason::InsufficientBalance)
        );
        assert_eq!(parse_stake("-1e40"), Err(RejectionReason::NonPositiveStake));
        assert_eq!(parse_stake("1e-40"), Err(RejectionReason::InvalidInput));
    }

    #[test]
    fn test_huge_numeric_input_exceeds_balance() {
        let mut engine = coin_engine(ScriptedRandom::default());
        for text in ["1e40", "100000000000000000000000000000000"] {
            let r = engine.resolve_wager_input(text);
            assert_eq!(r.rejection_reason, Some(RejectionReason::InsufficientBalance), "input {text:?}");
        }
        assert_eq!(
            engine.resolve_wager_f64(1e30).rejection_reason,
            Some(RejectionReason::InsufficientBalance)
        );
        assert_eq!(
            engine.resolve_wager_f64(-1e30).rejection_reason,
            Some(RejectionReason::NonPositiveStake)
        );
        assert_eq!(engine.balance(), dec!(1000));
        assert_eq!(engine.history().len(), 1);
    }

    #[test]
    fn test_tiny_positive_stake_is_not_non_positive() {
        let mut engine = coin_engine(ScriptedRandom::default());
        let r = engine.resolve_wager_f64(1e-30);
        assert_eq!(r.rejection_reason, Some(RejectionReason::InvalidInput));
        let r = engine.resolve_wager_input("1e-40");
        assert_eq!(r.rejection_reason, Some(RejectionReason::InvalidInput));
        assert_eq!(
            engine.resolve_wager_f64(0.0).rejection_reason,
            Some(RejectionReason::NonPositiveStake)
        );
        assert_eq!(engine.ledger().rounds, 0);
    }

    // -- Balance limit --

    #[test]
    fn test_new_rejects_balance_above_limit() {
        let result = WagerEngine::new(MAX_BALANCE + dec!(1), OutcomeModel::slot(), ScriptedRandom::default());
        assert!(matches!(result, Err(WagerError::BalanceTooLarge(_))));
        assert!(WagerEngine::new(MAX_BALANCE, OutcomeModel::slot(), ScriptedRandom::default()).is_ok());
    }

    #[test]
    fn test_payout_past_limit_is_refused_without_panicking() {
        let mut engine =
            WagerEngine::new(MAX_BALANCE, OutcomeModel::slot(), ScriptedRandom::indices(vec![1])).unwrap();
        let r = engine.resolve_wager(MAX_BALANCE / dec!(2));
        assert!(!r.accepted);
        assert_eq!(r.rejection_reason, Some(RejectionReason::PayoutLimitExceeded));
        assert_eq!(engine.balance(), MAX_BALANCE);
        assert_eq!(engine.history(), &[MAX_BALANCE]);
        assert!(engine.is_active());
    }

    #[test]
    fn test_huge_multiplier_cannot_overflow() {
        let mut model = OutcomeModel::slot();
        model.payout_multiplier = Decimal::MAX;
        let mut engine = WagerEngine::new(dec!(1000), model, ScriptedRandom::indices(vec![1])).unwrap();
        let r = engine.resolve_wager(dec!(1000));
        assert_eq!(r.rejection_reason, Some(RejectionReason::PayoutLimitExceeded));
        assert_eq!(engine.balance(), dec!(1000));
    }

    #[test]
    fn test_win_up_to_limit_is_credited() {
        // Upfront: (limit - 100) - 20 + 20 * 5 = limit - 20
        let mut engine = WagerEngine::new(
            MAX_BALANCE - dec!(100),
            OutcomeModel::slot(),
            ScriptedRandom::indices(vec![1]),
        )
        .unwrap();
        let r = engine.resolve_wager(dec!(20));
        assert!(r.accepted);
        assert_eq!(r.new_balance, Some(MAX_BALANCE - dec!(20)));

        let r = engine.resolve_wager(dec!(100));
        assert_eq!(r.rejection_reason, Some(RejectionReason::PayoutLimitExceeded));
    }

    // -- Binary model, pay-after --

    #[test]
    fn test_coin_flip_forced_win() {
        let mut engine = WagerEngine::new(dec!(1000), OutcomeModel::coin_flip(), forced_unit(0.0)).unwrap();
        let r = engine.resolve_wager(dec!(100));
        assert!(r.accepted);
        assert_eq!(r.won, Some(true));
        assert_eq!(r.delta, Some(dec!(90)));
        assert_eq!(r.new_balance, Some(dec!(1090)));
        assert!(r.symbols.is_none());
        assert!(!r.is_exhausted);
        assert_eq!(engine.history(), &[dec!(1000), dec!(1090)]);
    }

    #[test]
    fn test_coin_flip_forced_loss() {
        let mut engine = WagerEngine::new(dec!(1000), OutcomeModel::coin_flip(), forced_unit(0.99)).unwrap();
        let r = engine.resolve_wager(dec!(100));
        assert_eq!(r.won, Some(false));
        assert_eq!(r.delta, Some(dec!(-100)));
        assert_eq!(r.new_balance, Some(dec!(900)));
        assert_eq!(r.net_change(), r.delta);
        assert_eq!(engine.history(), &[dec!(1000), dec!(900)]);
    }

    #[test]
    fn test_pay_after_history_grows_by_one_per_round() {
        let mut engine = coin_engine(ScriptedRandom::units(vec![0.1, 0.9, 0.3]));
        for _ in 0..3 {
            assert!(engine.resolve_wager(dec!(10)).accepted);
        }
        assert_eq!(engine.history().len(), 4);
        assert_eq!(*engine.history().last().unwrap(), engine.balance());
    }

    #[test]
    fn test_all_in_loss_exhausts() {
        let mut engine = coin_engine(ScriptedRandom::units(vec![0.99]));
        let r = engine.resolve_wager(dec!(1000));
        assert_eq!(r.new_balance, Some(Decimal::ZERO));
        assert!(r.is_exhausted);
        assert_eq!(engine.state(), SessionState::Exhausted);

        let after = engine.resolve_wager(dec!(1));
        assert_eq!(after.rejection_reason, Some(RejectionReason::SessionTerminated));
        assert!(after.is_exhausted);
        assert_eq!(engine.history().len(), 2);
    }

    // -- Reel models, stake upfront --

    #[test]
    fn test_forced_reel_win() {
        let mut model = OutcomeModel::slot_forced();
        model.win_probability = 0.3;
        let mut rng = MockRandomSource::new();
        rng.expect_next_unit().times(1).return_const(0.1);
        rng.expect_next_index().times(1).return_const(2usize);

        let mut engine = WagerEngine::new(dec!(1000), model, rng).unwrap();
        let r = engine.resolve_wager(dec!(50));

        let symbols = r.symbols.clone().unwrap();
        assert_eq!(symbols.len(), 3);
        assert!(symbols.iter().all(|s| *s == Symbol::from("🍊")));
        assert_eq!(r.delta, Some(dec!(250)));
        assert_eq!(r.new_balance, Some(dec!(1000) - dec!(50) + dec!(250)));
        assert_eq!(r.net_change(), Some(dec!(200)));
        assert_eq!(engine.history(), &[dec!(1000), dec!(950), dec!(1200)]);
    }

    #[test]
    fn test_reel_loss_debits_once() {
        let mut engine =
            WagerEngine::new(dec!(1000), OutcomeModel::slot(), ScriptedRandom::indices(vec![0, 1, 2])).unwrap();
        let r = engine.resolve_wager(dec!(50));
        assert_eq!(r.won, Some(false));
        assert_eq!(r.delta, Some(dec!(-50)));
        assert_eq!(r.new_balance, Some(dec!(950)));
        assert_eq!(engine.history(), &[dec!(1000), dec!(950), dec!(950)]);
    }

    #[test]
    fn test_upfront_history_grows_by_two_per_round() {
        let mut engine =
            WagerEngine::new(dec!(1000), OutcomeModel::slot(), ScriptedRandom::indices(vec![0, 1, 2, 3]))
                .unwrap();
        for _ in 0..5 {
            assert!(engine.resolve_wager(dec!(10)).accepted);
        }
        assert_eq!(engine.history().len(), 1 + 2 * 5);
        assert_eq!(*engine.history().last().unwrap(), engine.balance());
    }

    #[test]
    fn test_upfront_win_with_zero_multiplier_can_exhaust() {
        let mut model = OutcomeModel::slot();
        model.payout_multiplier = Decimal::ZERO;
        let mut engine = WagerEngine::new(dec!(10), model, ScriptedRandom::indices(vec![1])).unwrap();
        let r = engine.resolve_wager(dec!(10));
        assert_eq!(r.won, Some(true));
        assert!(r.is_exhausted);
        assert_eq!(engine.state(), SessionState::Exhausted);
    }

    // -- Withdraw --

    #[test]
    fn test_withdraw_returns_balance_and_terminates() {
        let mut engine = coin_engine(ScriptedRandom::units(vec![0.99]));
        engine.resolve_wager(dec!(250));
        assert_eq!(engine.withdraw(), dec!(750));
        assert_eq!(engine.state(), SessionState::WithdrawnByChoice);

        let r = engine.resolve_wager(dec!(10));
        assert_eq!(r.rejection_reason, Some(RejectionReason::SessionTerminated));
        assert!(!r.is_exhausted);
        let r = engine.resolve_wager_input("10");
        assert_eq!(r.rejection_reason, Some(RejectionReason::SessionTerminated));
        assert_eq!(engine.balance(), dec!(750));
    }

    #[test]
    fn test_withdraw_after_exhaustion_keeps_state() {
        let mut engine = coin_engine(ScriptedRandom::units(vec![0.99]));
        engine.resolve_wager(dec!(1000));
        assert_eq!(engine.withdraw(), Decimal::ZERO);
        assert_eq!(engine.state(), SessionState::Exhausted);
    }

    // -- Properties --

    #[test]
    fn test_accepted_wager_balance_identity() {
        let mut engine = WagerEngine::new(dec!(1000), OutcomeModel::coin_flip(), StdRandom::seeded(11)).unwrap();
        while engine.is_active() && engine.ledger().rounds < 500 {
            let before = engine.balance();
            let stake = (before / dec!(4)).max(dec!(0.01)).min(before);
            let r = engine.resolve_wager(stake);
            assert!(r.accepted);
            let delta = r.delta.unwrap();
            assert_eq!(r.new_balance.unwrap(), before + delta);
            assert!(delta == stake * dec!(0.9) || delta == -stake);
            assert_eq!(r.is_exhausted, r.new_balance.unwrap() <= Decimal::ZERO);
            assert!(engine.balance() >= Decimal::ZERO);
            assert_eq!(*engine.history().last().unwrap(), engine.balance());
        }
    }

    #[test]
    fn test_ledger_follows_rounds() {
        let mut engine = coin_engine(ScriptedRandom::units(vec![0.1, 0.9]));
        engine.resolve_wager(dec!(100));
        engine.resolve_wager(dec!(100));
        engine.resolve_wager_input("oops");
        let ledger = engine.ledger();
        assert_eq!(ledger.rounds, 2);
        assert_eq!(ledger.wins, 1);
        assert_eq!(ledger.losses, 1);
        assert_eq!(ledger.total_staked, dec!(200));
        assert_eq!(ledger.peak_balance, dec!(1090));
    }
}
