//! Simulation harness for estimating session outcomes under a model.

pub mod runner;

pub use runner::{SimulationConfig, SimulationReport, Simulator};
