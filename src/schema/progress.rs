//! Progress and result types reported by a search run.

use serde::{Deserialize, Serialize};

use super::Point;

/// Progress update emitted after each evaluated generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationProgress {
    /// Generation number; 0 is the initial population.
    pub generation: usize,
    /// Total generations planned.
    pub total_generations: usize,
    /// Best fitness within this generation. May regress.
    pub generation_best: f64,
    /// Best fitness seen so far. Never regresses.
    pub best_so_far: f64,
    /// Average fitness of the current population.
    pub avg_fitness: f64,
    /// Clusters found in the population that bred this generation.
    pub cluster_count: usize,
    /// Mean pairwise diversity distance of the current population.
    pub diversity: f64,
}

/// Per-generation statistics for plotting.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EvolutionHistory {
    pub best_fitness: Vec<f64>,
    pub best_so_far: Vec<f64>,
    pub avg_fitness: Vec<f64>,
    pub cluster_count: Vec<usize>,
    pub diversity: Vec<f64>,
}

impl EvolutionHistory {
    pub fn record(&mut self, progress: &GenerationProgress) {
        self.best_fitness.push(progress.generation_best);
        self.best_so_far.push(progress.best_so_far);
        self.avg_fitness.push(progress.avg_fitness);
        self.cluster_count.push(progress.cluster_count);
        self.diversity.push(progress.diversity);
    }

    pub fn len(&self) -> usize {
        self.best_fitness.len()
    }

    pub fn is_empty(&self) -> bool {
        self.best_fitness.is_empty()
    }
}

/// Snapshot of a solution for rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolutionSnapshot {
    pub points: Vec<Point>,
    pub fitness: f64,
    /// Point pairs closer than the minimum distance.
    pub overlaps: usize,
    /// Generation the solution was found in.
    pub generation: usize,
}

/// Final result of a search run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionResult {
    pub best: SolutionSnapshot,
    pub history: EvolutionHistory,
    pub stats: EvolutionStats,
}

/// Statistics from a search run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionStats {
    /// Generations run after the initial population.
    pub generations: usize,
    /// Total individual evaluations performed.
    pub total_evaluations: u64,
    pub best_fitness: f64,
    pub elapsed_seconds: f64,
    /// Seed the run was started from.
    pub random_seed: u64,
}
