//! Random generation and variation operators for point sets.
//!
//! Every randomized step of the search draws from a [`PointRng`], so a run
//! started from the same seed replays exactly.

use rand::distributions::Open01;
use rand::prelude::*;

use crate::compute::EngineError;
use crate::schema::{CoordinateBounds, Individual, Point};

/// Random number generator wrapper for point-set operations.
pub struct PointRng {
    rng: StdRng,
}

impl PointRng {
    /// Create from seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create with random seed.
    pub fn random() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Unevaluated individual with `num_points` uniform points inside `bounds`.
    ///
    /// Bounds that are empty, non-finite or too wide to sample from are
    /// rejected before anything is drawn.
    pub fn random_individual(
        &mut self,
        num_points: usize,
        bounds: CoordinateBounds,
    ) -> Result<Individual, EngineError> {
        bounds.validate()?;
        let points: Vec<Point> = (0..num_points).map(|_| self.random_point(bounds)).collect();
        Ok(Individual::new(points))
    }

    // Caller has validated `bounds`.
    fn random_point(&mut self, bounds: CoordinateBounds) -> Point {
        Point::new(
            self.rng.gen_range(bounds.min..bounds.max),
            self.rng.gen_range(bounds.min..bounds.max),
        )
    }

    /// Uniform index in `0..len`. `len` must be non-zero.
    pub fn index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }

    /// Single-point crossover.
    ///
    /// The child takes `parent1`'s points before a uniform cut index and
    /// `parent2`'s points from the cut onwards, so every child point sits at
    /// the same index it had in the parent it came from.
    pub fn crossover(
        &mut self,
        parent1: &Individual,
        parent2: &Individual,
    ) -> Result<Individual, EngineError> {
        if parent1.len() != parent2.len() {
            return Err(EngineError::MismatchedPointCount {
                left: parent1.len(),
                right: parent2.len(),
            });
        }
        if parent1.is_empty() {
            return Err(EngineError::EmptyIndividual);
        }

        let cut = self.index(parent1.len());
        let mut points = Vec::with_capacity(parent1.len());
        points.extend_from_slice(&parent1.points[..cut]);
        points.extend_from_slice(&parent2.points[cut..]);

        Ok(Individual::new(points))
    }

    /// Perturb each point with probability `rate`.
    ///
    /// A selected point moves on both axes by independent uniform offsets
    /// strictly inside `(-step / 2, step / 2)`. Fitness is left stale.
    pub fn mutate(&mut self, individual: &mut Individual, rate: f64, step: f64) {
        for point in &mut individual.points {
            if self.rng.r#gen::<f64>() < rate {
                point.x += self.offset(step);
                point.y += self.offset(step);
            }
        }
    }

    fn offset(&mut self, step: f64) -> f64 {
        let unit: f64 = self.rng.sample(Open01);
        unit * step - step / 2.0
    }
}
