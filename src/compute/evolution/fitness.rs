//! Pairwise spacing fitness.
//!
//! Every unordered point pair contributes its distance, except pairs closer
//! than the minimum distance, which contribute a flat penalty instead. The
//! resulting landscape is discontinuous at the overlap boundary.

use rayon::prelude::*;

use crate::schema::{FitnessConfig, Individual, Point};

/// Scores individuals by how well their points are spread out.
#[derive(Debug, Clone, Default)]
pub struct FitnessEvaluator {
    config: FitnessConfig,
}

impl FitnessEvaluator {
    /// Create a new fitness evaluator.
    pub fn new(config: FitnessConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FitnessConfig {
        &self.config
    }

    /// Fitness of a point sequence. O(n^2) in the number of points.
    pub fn score(&self, points: &[Point]) -> f64 {
        let mut fitness = 0.0;
        for (i, a) in points.iter().enumerate() {
            for b in &points[i + 1..] {
                let distance = a.distance_to(b);
                if distance < self.config.minimum_distance {
                    fitness += self.config.overlap_penalty;
                } else {
                    fitness += distance;
                }
            }
        }
        fitness
    }

    /// Score an individual and store the result in its fitness field.
    pub fn evaluate(&self, individual: &mut Individual) -> f64 {
        individual.fitness = self.score(&individual.points);
        individual.fitness
    }

    /// Evaluate all individuals in parallel.
    pub fn evaluate_population(&self, population: &mut [Individual]) {
        population.par_iter_mut().for_each(|individual| {
            self.evaluate(individual);
        });
    }

    /// Evaluate all individuals on the calling thread.
    pub fn evaluate_population_sequential(&self, population: &mut [Individual]) {
        for individual in population {
            self.evaluate(individual);
        }
    }

    /// Number of point pairs closer than the minimum distance.
    pub fn overlap_count(&self, points: &[Point]) -> usize {
        points
            .iter()
            .enumerate()
            .map(|(i, a)| {
                points[i + 1..]
                    .iter()
                    .filter(|b| a.distance_to(b) < self.config.minimum_distance)
                    .count()
            })
            .sum()
    }
}
