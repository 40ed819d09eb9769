//! Errors raised by engine operations on misused inputs.

use crate::schema::ConfigError;

/// Precondition violations detected by the engine.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Individuals have different point counts ({left} vs {right})")]
    MismatchedPointCount { left: usize, right: usize },
    #[error("Selection pool is empty")]
    EmptyPool,
    #[error("Population is empty")]
    EmptyPopulation,
    #[error("Cannot recombine an individual without points")]
    EmptyIndividual,
    #[error("Pool references individual {index} but the population has {len}")]
    UnknownMember { index: usize, len: usize },
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}
