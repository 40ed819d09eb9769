//! Genetic search over fixed-size 2D point sets.
//!
//! # Overview
//!
//! - **Fitness** (`fitness`): pairwise spacing score with an overlap penalty
//! - **Diversity** (`diversity`): positional distance between individuals
//! - **Variation** (`rng`): seeded initialization, crossover and mutation
//! - **Selection** (`selection`): diversity-constrained tournaments
//! - **Clustering** (`cluster`): greedy grouping of similar individuals
//! - **Search** (`search`): elitism, breeding and the generation loop
//!
//! # Example
//!
//! ```rust,no_run
//! use point_spread::compute::evolution::EvolutionEngine;
//! use point_spread::schema::EvolutionConfig;
//!
//! let config = EvolutionConfig {
//!     random_seed: Some(42),
//!     ..Default::default()
//! };
//!
//! let mut engine = EvolutionEngine::new(config)?;
//! let result = engine.run_with_callback(|progress| {
//!     println!("Generation {}: best fitness = {:.3}",
//!         progress.generation, progress.generation_best);
//! })?;
//!
//! println!("Best fitness: {:.3}", result.best.fitness);
//! # Ok::<(), point_spread::compute::EngineError>(())
//! ```

mod cluster;
mod diversity;
mod fitness;
mod rng;
mod search;
mod selection;

pub use cluster::clusterize_population;
pub use diversity::{distance_between, population_diversity};
pub use fitness::FitnessEvaluator;
pub use rng::PointRng;
pub use search::{
    BreedingParams, EvolutionEngine, Offspring, best_solution, initialize_population,
    select_next_generation_with_clustering, stopping_condition,
};
pub use selection::{
    Tournament, TournamentParams, draw_tournament, tournament_selection_with_diversity,
};
