//! Adaptive mutation-operator selection for coverage-guided fuzzers.
//!
//! A small (1+λ)-style evolutionary strategy learns, per intensity bucket,
//! which mutation operators tend to discover new execution paths, and biases
//! operator selection toward them. The embedding fuzzer drives the loop:
//! [`OperatorEvolution::select_operator`] picks an operator, the fuzzer runs
//! one execution, then reports the number of new paths through
//! [`OperatorEvolution::notify_feedback`].

pub mod config;
pub mod engine;
pub mod error;

pub use config::{AppConfig, ConfigManager, EvolutionConfig, GeneMode};
pub use engine::{GeneVector, OperatorEvolution};
pub use error::{OpevoError, Result};
