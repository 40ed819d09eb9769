//! Compute module - The genetic search engine.

mod error;
pub mod evolution;

pub use error::*;
pub use evolution::{EvolutionEngine, FitnessEvaluator, PointRng};
