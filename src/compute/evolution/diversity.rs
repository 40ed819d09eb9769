//! Structural distance between individuals.

use crate::compute::EngineError;
use crate::schema::Individual;

/// Mean distance between same-index points of two individuals.
///
/// Positional, not permutation invariant: crossover keeps points at their
/// index, so index `i` in one individual is comparable to index `i` in the
/// other. Symmetric and non-negative. Two empty individuals are at distance 0.
pub fn distance_between(a: &Individual, b: &Individual) -> Result<f64, EngineError> {
    if a.len() != b.len() {
        return Err(EngineError::MismatchedPointCount {
            left: a.len(),
            right: b.len(),
        });
    }
    if a.is_empty() {
        return Ok(0.0);
    }

    let total: f64 = a
        .points
        .iter()
        .zip(&b.points)
        .map(|(p, q)| p.distance_to(q))
        .sum();
    Ok(total / a.len() as f64)
}

/// Mean pairwise distance over a population; 0 with fewer than two members.
pub fn population_diversity(population: &[Individual]) -> Result<f64, EngineError> {
    if population.len() < 2 {
        return Ok(0.0);
    }

    let mut total = 0.0;
    let mut count = 0usize;
    for (i, a) in population.iter().enumerate() {
        for b in &population[i + 1..] {
            total += distance_between(a, b)?;
            count += 1;
        }
    }
    Ok(total / count as f64)
}
