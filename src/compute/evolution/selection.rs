//! Diversity-constrained tournament selection.

use crate::compute::EngineError;
use crate::schema::Individual;

use super::diversity::distance_between;
use super::rng::PointRng;

/// Tournament parameters.
#[derive(Debug, Clone, Copy)]
pub struct TournamentParams {
    /// Entrants per tournament.
    pub size: usize,
    /// Entrants admitted during the diverse phase must be farther than this
    /// from every entrant already admitted.
    pub diversity_threshold: f64,
    /// Draws allowed in the diverse phase.
    pub max_attempts: usize,
}

impl Default for TournamentParams {
    fn default() -> Self {
        Self {
            size: 5,
            diversity_threshold: 0.0,
            max_attempts: 100,
        }
    }
}

/// Entrants of one tournament.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tournament {
    /// Indices into the population, in draw order.
    pub entrants: Vec<usize>,
    /// Draws spent in the diverse phase.
    pub attempts: usize,
    /// Trailing entrants admitted without the diversity check.
    pub filled: usize,
}

/// Draw the entrants of a diversity-filtered random tournament.
///
/// `pool` lists indices into `population`. Candidates are drawn uniformly from
/// the pool and admitted only if they are farther than the threshold from
/// every entrant so far. After `max_attempts` draws any free slots are filled
/// with uniform draws that skip the diversity check, so a small or homogeneous
/// pool still yields a full tournament. A size of zero draws one entrant.
pub fn draw_tournament(
    rng: &mut PointRng,
    population: &[Individual],
    pool: &[usize],
    params: &TournamentParams,
) -> Result<Tournament, EngineError> {
    if pool.is_empty() {
        return Err(EngineError::EmptyPool);
    }
    if let Some(&index) = pool.iter().find(|&&i| i >= population.len()) {
        return Err(EngineError::UnknownMember {
            index,
            len: population.len(),
        });
    }

    let size = params.size.max(1);
    let mut entrants: Vec<usize> = Vec::with_capacity(size);
    let mut attempts = 0;

    while entrants.len() < size && attempts < params.max_attempts {
        let candidate = pool[rng.index(pool.len())];
        attempts += 1;

        let mut diverse = true;
        for &entrant in &entrants {
            let distance = distance_between(&population[entrant], &population[candidate])?;
            if distance <= params.diversity_threshold {
                diverse = false;
                break;
            }
        }
        if diverse {
            entrants.push(candidate);
        }
    }

    let filled = size - entrants.len();
    if filled > 0 {
        log::trace!(
            "tournament filled {} of {} slots without diversity check",
            filled,
            size
        );
    }
    while entrants.len() < size {
        entrants.push(pool[rng.index(pool.len())]);
    }

    Ok(Tournament {
        entrants,
        attempts,
        filled,
    })
}

/// Pick the fittest entrant of a [`draw_tournament`] draw.
///
/// The returned value is one of the indices in `pool`. Ties keep the earliest
/// entrant.
pub fn tournament_selection_with_diversity(
    rng: &mut PointRng,
    population: &[Individual],
    pool: &[usize],
    params: &TournamentParams,
) -> Result<usize, EngineError> {
    let tournament = draw_tournament(rng, population, pool, params)?;
    let (&first, rest) = tournament
        .entrants
        .split_first()
        .ok_or(EngineError::EmptyPool)?;

    let mut best = first;
    for &entrant in rest {
        if population[entrant].fitness > population[best].fitness {
            best = entrant;
        }
    }
    Ok(best)
}
