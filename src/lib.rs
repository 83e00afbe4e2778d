//! wagersim: single-player wagering simulation.
//!
//! Library crate exposing the wager engine and its surroundings for use
//! by integration tests and the terminal binary.

pub mod config;
pub mod types;
pub mod engine;
pub mod simulation;
pub mod presentation;
pub mod dashboard;
