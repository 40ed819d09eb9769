//! Point Spread - Genetic search for well-spaced 2D point sets.
//!
//! Places a fixed number of points in the plane so that they are as far
//! apart as possible while avoiding near-overlaps. The search is a genetic
//! algorithm with diversity-constrained tournament selection, clustering of
//! similar individuals, single-point crossover, local mutation and elitism.
//!
//! # Architecture
//!
//! The crate is split into two main modules:
//!
//! - `schema`: Configuration, solution and progress types
//! - `compute`: The search engine (fitness, selection, variation, clustering)
//!
//! # Example
//!
//! ```rust,no_run
//! use point_spread::{EvolutionConfig, EvolutionEngine};
//!
//! let config = EvolutionConfig {
//!     population_size: 20,
//!     num_points: 40,
//!     max_generations: 10,
//!     random_seed: Some(7),
//!     ..Default::default()
//! };
//!
//! let mut engine = EvolutionEngine::new(config)?;
//! let result = engine.run()?;
//!
//! for point in &result.best.points {
//!     println!("{}", point);
//! }
//! println!("Fitness: {:.3}", result.best.fitness);
//! # Ok::<(), point_spread::EngineError>(())
//! ```

pub mod compute;
pub mod schema;

// Re-export commonly used types
pub use compute::{EngineError, EvolutionEngine, FitnessEvaluator, PointRng};
pub use schema::{EvolutionConfig, EvolutionResult, Individual, Point};
