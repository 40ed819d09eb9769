//! Schema module - Configuration, solution and progress types.

mod config;
mod individual;
mod progress;

pub use config::*;
pub use individual::*;
pub use progress::*;
