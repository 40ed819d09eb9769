//! Configuration types for the point-spread genetic search.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Top-level configuration for a genetic search run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionConfig {
    /// Number of individuals in every generation.
    #[serde(default = "default_population_size")]
    pub population_size: usize,
    /// Number of points carried by each individual.
    #[serde(default = "default_num_points")]
    pub num_points: usize,
    /// Generations to run after the initial population.
    #[serde(default = "default_max_generations")]
    pub max_generations: usize,
    /// Individuals copied verbatim into the next generation.
    #[serde(default = "default_elite_count")]
    pub elite_count: usize,
    /// Which end of the fitness ranking elitism preserves.
    #[serde(default)]
    pub elitism: ElitismPolicy,
    /// Threshold used both for tournament diversity and clustering.
    #[serde(default = "default_diversity_threshold")]
    pub diversity_threshold: f64,
    /// Entrants per tournament.
    #[serde(default = "default_tournament_size")]
    pub tournament_size: usize,
    /// Sampling attempts before a tournament is filled without the diversity check.
    #[serde(default = "default_max_diversity_attempts")]
    pub max_diversity_attempts: usize,
    /// Per-point mutation probability (0.0-1.0).
    #[serde(default = "default_mutation_rate")]
    pub mutation_rate: f64,
    /// Width of the uniform perturbation window applied to each coordinate.
    #[serde(default = "default_mutation_step")]
    pub mutation_step: f64,
    /// Fitness function constants.
    #[serde(default)]
    pub fitness: FitnessConfig,
    /// Range initial coordinates are drawn from.
    #[serde(default)]
    pub bounds: CoordinateBounds,
    /// Random seed for reproducibility.
    #[serde(default)]
    pub random_seed: Option<u64>,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: default_population_size(),
            num_points: default_num_points(),
            max_generations: default_max_generations(),
            elite_count: default_elite_count(),
            elitism: ElitismPolicy::default(),
            diversity_threshold: default_diversity_threshold(),
            tournament_size: default_tournament_size(),
            max_diversity_attempts: default_max_diversity_attempts(),
            mutation_rate: default_mutation_rate(),
            mutation_step: default_mutation_step(),
            fitness: FitnessConfig::default(),
            bounds: CoordinateBounds::default(),
            random_seed: None,
        }
    }
}

fn default_population_size() -> usize {
    20
}
fn default_num_points() -> usize {
    40
}
fn default_max_generations() -> usize {
    10
}
fn default_elite_count() -> usize {
    3
}
fn default_diversity_threshold() -> f64 {
    10.0
}
fn default_tournament_size() -> usize {
    5
}
fn default_max_diversity_attempts() -> usize {
    100
}
fn default_mutation_rate() -> f64 {
    0.15
}
fn default_mutation_step() -> f64 {
    4.0
}

/// Which individuals elitism carries over unchanged.
///
/// `LowestFitness` is the historical rule: the `elite_count` individuals with
/// the smallest fitness survive, even though every other stage of the search
/// maximizes fitness. `HighestFitness` keeps the best ones instead.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum ElitismPolicy {
    #[default]
    LowestFitness,
    HighestFitness,
}

/// Constants of the pairwise spacing fitness.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitnessConfig {
    /// Pairs closer than this are treated as overlapping.
    #[serde(default = "default_minimum_distance")]
    pub minimum_distance: f64,
    /// Contribution of an overlapping pair (instead of its distance).
    #[serde(default = "default_overlap_penalty")]
    pub overlap_penalty: f64,
}

impl Default for FitnessConfig {
    fn default() -> Self {
        Self {
            minimum_distance: default_minimum_distance(),
            overlap_penalty: default_overlap_penalty(),
        }
    }
}

fn default_minimum_distance() -> f64 {
    5.0
}
fn default_overlap_penalty() -> f64 {
    -2000.0
}

/// Half-open coordinate range `[min, max)` used for both axes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CoordinateBounds {
    pub min: f64,
    pub max: f64,
}

impl Default for CoordinateBounds {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 100.0,
        }
    }
}

impl CoordinateBounds {
    /// Check that the range is non-empty and narrow enough to sample from.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let Self { min, max } = *self;
        if !min.is_finite() || !max.is_finite() || min >= max {
            return Err(ConfigError::InvalidBounds { min, max });
        }
        if !(max - min).is_finite() {
            return Err(ConfigError::BoundsTooWide { min, max });
        }
        Ok(())
    }
}

impl EvolutionConfig {
    /// Parse a configuration from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size == 0 {
            return Err(ConfigError::EmptyPopulation);
        }
        if self.num_points == 0 {
            return Err(ConfigError::NoPoints);
        }
        if self.max_generations == 0 {
            return Err(ConfigError::NoGenerations);
        }
        if self.elite_count > self.population_size {
            return Err(ConfigError::TooManyElites {
                elites: self.elite_count,
                population: self.population_size,
            });
        }
        if self.tournament_size == 0 {
            return Err(ConfigError::InvalidTournamentSize);
        }
        if self.max_diversity_attempts == 0 {
            return Err(ConfigError::InvalidAttempts);
        }
        if !self.diversity_threshold.is_finite() || self.diversity_threshold < 0.0 {
            return Err(ConfigError::InvalidThreshold(self.diversity_threshold));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(ConfigError::InvalidMutationRate(self.mutation_rate));
        }
        if !self.mutation_step.is_finite() || self.mutation_step <= 0.0 {
            return Err(ConfigError::InvalidMutationStep(self.mutation_step));
        }
        if !self.fitness.minimum_distance.is_finite()
            || !self.fitness.overlap_penalty.is_finite()
        {
            return Err(ConfigError::InvalidFitness);
        }
        self.bounds.validate()
    }
}

/// Configuration validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Population size must be non-zero")]
    EmptyPopulation,
    #[error("Point count must be non-zero")]
    NoPoints,
    #[error("Maximum generations must be non-zero")]
    NoGenerations,
    #[error("Elite count {elites} exceeds population size {population}")]
    TooManyElites { elites: usize, population: usize },
    #[error("Tournament size must be non-zero")]
    InvalidTournamentSize,
    #[error("Diversity sampling attempts must be non-zero")]
    InvalidAttempts,
    #[error("Diversity threshold must be finite and non-negative, got {0}")]
    InvalidThreshold(f64),
    #[error("Mutation rate must lie in [0, 1], got {0}")]
    InvalidMutationRate(f64),
    #[error("Mutation step must be finite and positive, got {0}")]
    InvalidMutationStep(f64),
    #[error("Fitness constants must be finite")]
    InvalidFitness,
    #[error("Coordinate bounds must satisfy min < max, got [{min}, {max})")]
    InvalidBounds { min: f64, max: f64 },
    #[error("Coordinate range [{min}, {max}) is too wide to sample")]
    BoundsTooWide { min: f64, max: f64 },
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}
