//! Core engine: outcome sampling, settlement and session bookkeeping.

pub mod rng;
pub mod outcome;
pub mod ledger;
pub mod wager;

pub use ledger::SessionLedger;
pub use outcome::{OutcomeModel, SampledOutcome, SamplingPolicy};
pub use rng::{RandomSource, ScriptedRandom, StdRandom};
pub use wager::{parse_stake, WagerEngine, MAX_BALANCE};
