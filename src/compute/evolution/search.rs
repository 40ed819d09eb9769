//! Generation management and the search driver loop.

use std::cmp::Ordering;
use std::time::Instant;

use crate::compute::EngineError;
use crate::schema::{
    CoordinateBounds, ElitismPolicy, EvolutionConfig, EvolutionHistory, EvolutionResult,
    EvolutionStats, GenerationProgress, Individual, Population, SolutionSnapshot,
};

use super::cluster::clusterize_population;
use super::diversity::population_diversity;
use super::fitness::FitnessEvaluator;
use super::rng::PointRng;
use super::selection::{TournamentParams, tournament_selection_with_diversity};

/// Create `population_size` unevaluated individuals of `num_points` uniform
/// points each.
///
/// `bounds` is checked up front, so unsampleable bounds are an error even for
/// an empty population.
pub fn initialize_population(
    rng: &mut PointRng,
    population_size: usize,
    num_points: usize,
    bounds: CoordinateBounds,
) -> Result<Population, EngineError> {
    bounds.validate()?;
    (0..population_size)
        .map(|_| rng.random_individual(num_points, bounds))
        .collect()
}

/// True once `generation` has reached `max_generations`.
pub fn stopping_condition(generation: usize, max_generations: usize) -> bool {
    generation >= max_generations
}

/// The fittest individual. Ties keep the earliest.
pub fn best_solution(population: &[Individual]) -> Result<&Individual, EngineError> {
    let (mut best, rest) = population
        .split_first()
        .ok_or(EngineError::EmptyPopulation)?;
    for ind in rest {
        if ind.fitness > best.fitness {
            best = ind;
        }
    }
    Ok(best)
}

/// Breeding parameters for one generation turnover.
#[derive(Debug, Clone, Copy)]
pub struct BreedingParams {
    pub population_size: usize,
    pub elite_count: usize,
    pub elitism: ElitismPolicy,
    pub tournament: TournamentParams,
    pub mutation_rate: f64,
    pub mutation_step: f64,
}

impl BreedingParams {
    /// Breeding parameters of a configuration. The diversity threshold serves
    /// as both the tournament and the clustering threshold.
    pub fn from_config(config: &EvolutionConfig) -> Self {
        Self {
            population_size: config.population_size,
            elite_count: config.elite_count,
            elitism: config.elitism,
            tournament: TournamentParams {
                size: config.tournament_size,
                diversity_threshold: config.diversity_threshold,
                max_attempts: config.max_diversity_attempts,
            },
            mutation_rate: config.mutation_rate,
            mutation_step: config.mutation_step,
        }
    }
}

/// Next population and the clustering it was bred from.
#[derive(Debug, Clone)]
pub struct Offspring {
    pub population: Population,
    pub cluster_count: usize,
}

/// Build the next generation.
///
/// Elites are copied first, chosen by `params.elitism`. The current
/// population is then clustered, and each remaining slot is filled by a child
/// of two tournament winners from one uniformly chosen cluster, crossed over
/// and mutated. Children are unevaluated; elites keep their fitness.
pub fn select_next_generation_with_clustering(
    rng: &mut PointRng,
    population: &[Individual],
    params: &BreedingParams,
) -> Result<Offspring, EngineError> {
    if population.is_empty() {
        return Err(EngineError::EmptyPopulation);
    }

    let mut next = Vec::with_capacity(params.population_size);

    let mut ranking: Vec<&Individual> = population.iter().collect();
    let by_fitness = |a: &&Individual, b: &&Individual| a.fitness.total_cmp(&b.fitness);
    match params.elitism {
        ElitismPolicy::LowestFitness => ranking.sort_by(by_fitness),
        ElitismPolicy::HighestFitness => ranking.sort_by(|a, b| by_fitness(b, a)),
    }
    let elites = params.elite_count.min(params.population_size);
    next.extend(ranking.into_iter().take(elites).cloned());

    let clusters = clusterize_population(population, params.tournament.diversity_threshold)?;

    while next.len() < params.population_size {
        let pool = &clusters[rng.index(clusters.len())].members;
        let tournament = &params.tournament;

        let parent1 = tournament_selection_with_diversity(rng, population, pool, tournament)?;
        let parent2 = tournament_selection_with_diversity(rng, population, pool, tournament)?;

        let mut child = rng.crossover(&population[parent1], &population[parent2])?;
        rng.mutate(&mut child, params.mutation_rate, params.mutation_step);
        next.push(child);
    }

    Ok(Offspring {
        population: next,
        cluster_count: clusters.len(),
    })
}

/// Runs the genetic search from a configuration.
pub struct EvolutionEngine {
    config: EvolutionConfig,
    params: BreedingParams,
    seed: u64,
    rng: PointRng,
    evaluator: FitnessEvaluator,
    population: Population,
    best: Option<(Individual, usize)>,
    history: EvolutionHistory,
    generation: usize,
    cluster_count: usize,
    evaluations: u64,
}

impl EvolutionEngine {
    /// Create a new engine from a validated configuration.
    pub fn new(config: EvolutionConfig) -> Result<Self, EngineError> {
        config.validate()?;

        let seed = config.random_seed.unwrap_or_else(rand::random);
        let evaluator = FitnessEvaluator::new(config.fitness.clone());
        let params = BreedingParams::from_config(&config);

        Ok(Self {
            config,
            params,
            seed,
            rng: PointRng::new(seed),
            evaluator,
            population: Vec::new(),
            best: None,
            history: EvolutionHistory::default(),
            generation: 0,
            cluster_count: 0,
            evaluations: 0,
        })
    }

    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    /// Seed the run was started from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn population(&self) -> &[Individual] {
        &self.population
    }

    pub fn history(&self) -> &EvolutionHistory {
        &self.history
    }

    /// Best individual seen so far and the generation it was found in.
    pub fn best(&self) -> Option<(&Individual, usize)> {
        self.best.as_ref().map(|(ind, found)| (ind, *found))
    }

    /// Fitness evaluations since the last [`initialize`](Self::initialize).
    pub fn evaluations(&self) -> u64 {
        self.evaluations
    }

    /// Reset to a fresh, evaluated initial population.
    pub fn initialize(&mut self) -> Result<GenerationProgress, EngineError> {
        self.generation = 0;
        self.cluster_count = 0;
        self.evaluations = 0;
        self.best = None;
        self.history = EvolutionHistory::default();
        self.rng = PointRng::new(self.seed);
        self.population = initialize_population(
            &mut self.rng,
            self.config.population_size,
            self.config.num_points,
            self.config.bounds,
        )?;
        self.evaluate_population();
        self.record_generation()
    }

    fn evaluate_population(&mut self) {
        self.evaluator.evaluate_population(&mut self.population);
        self.evaluations += self.population.len() as u64;
    }

    /// Breed, evaluate and record one generation.
    pub fn step_generation(&mut self) -> Result<GenerationProgress, EngineError> {
        let offspring =
            select_next_generation_with_clustering(&mut self.rng, &self.population, &self.params)?;
        self.population = offspring.population;
        self.cluster_count = offspring.cluster_count;
        self.generation += 1;

        self.evaluate_population();
        self.record_generation()
    }

    /// Update best-so-far and history from the current population.
    fn record_generation(&mut self) -> Result<GenerationProgress, EngineError> {
        let generation_best = best_solution(&self.population)?;
        let improved = match &self.best {
            Some((best, _)) => generation_best.fitness > best.fitness,
            None => true,
        };
        if improved {
            self.best = Some((generation_best.clone(), self.generation));
        }

        let progress = self.progress();
        log::debug!(
            "generation {}/{}: best {:.3}, best so far {:.3}, avg {:.3}, {} clusters",
            progress.generation,
            progress.total_generations,
            progress.generation_best,
            progress.best_so_far,
            progress.avg_fitness,
            progress.cluster_count
        );
        self.history.record(&progress);
        Ok(progress)
    }

    /// Get current progress.
    pub fn progress(&self) -> GenerationProgress {
        let avg_fitness = if self.population.is_empty() {
            0.0
        } else {
            self.population.iter().map(|ind| ind.fitness).sum::<f64>()
                / self.population.len() as f64
        };

        let generation_best = self
            .population
            .iter()
            .map(|ind| ind.fitness)
            .max_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal))
            .unwrap_or(f64::NEG_INFINITY);

        let best_so_far = self
            .best
            .as_ref()
            .map_or(f64::NEG_INFINITY, |(ind, _)| ind.fitness);

        GenerationProgress {
            generation: self.generation,
            total_generations: self.config.max_generations,
            generation_best,
            best_so_far,
            avg_fitness,
            cluster_count: self.cluster_count,
            diversity: population_diversity(&self.population).unwrap_or(0.0),
        }
    }

    /// Run the search with a progress callback, invoked for the initial
    /// population and after every generation.
    pub fn run_with_callback<F>(&mut self, callback: F) -> Result<EvolutionResult, EngineError>
    where
        F: Fn(&GenerationProgress),
    {
        let start_time = Instant::now();

        log::info!(
            "starting search: {} individuals x {} points, {} generations, seed {}",
            self.config.population_size,
            self.config.num_points,
            self.config.max_generations,
            self.seed
        );

        callback(&self.initialize()?);

        while !stopping_condition(self.generation, self.config.max_generations) {
            callback(&self.step_generation()?);
        }

        let (best, found_in) = self.best.clone().ok_or(EngineError::EmptyPopulation)?;
        let elapsed = start_time.elapsed().as_secs_f64();

        log::info!(
            "search finished after {} generations: best fitness {:.3} (generation {})",
            self.generation,
            best.fitness,
            found_in
        );

        Ok(EvolutionResult {
            best: SolutionSnapshot {
                overlaps: self.evaluator.overlap_count(&best.points),
                fitness: best.fitness,
                points: best.points,
                generation: found_in,
            },
            history: self.history.clone(),
            stats: EvolutionStats {
                generations: self.generation,
                total_evaluations: self.evaluations,
                best_fitness: best.fitness,
                elapsed_seconds: elapsed,
                random_seed: self.seed,
            },
        })
    }

    /// Run the search (blocking).
    pub fn run(&mut self) -> Result<EvolutionResult, EngineError> {
        self.run_with_callback(|_| {})
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ConfigError, Point};

    fn diagonal(count: usize) -> Vec<Individual> {
        let evaluator = FitnessEvaluator::default();
        (0..count)
            .map(|i| {
                let mut ind = Individual::new([Point::new(i as f64, i as f64)]);
                evaluator.evaluate(&mut ind);
                ind
            })
            .collect()
    }

    fn small_config() -> EvolutionConfig {
        EvolutionConfig {
            population_size: 10,
            num_points: 8,
            max_generations: 4,
            random_seed: Some(42),
            ..Default::default()
        }
    }

    #[test]
    fn test_initialize_population() {
        let mut rng = PointRng::new(42);
        let bounds = CoordinateBounds::default();
        let population = initialize_population(&mut rng, 10, 5, bounds).unwrap();

        assert_eq!(population.len(), 10);
        for ind in &population {
            assert_eq!(ind.len(), 5);
            assert_eq!(ind.fitness, 0.0);
            assert!(
                ind.points
                    .iter()
                    .all(|p| (0.0..100.0).contains(&p.x) && (0.0..100.0).contains(&p.y))
            );
        }
    }

    #[test]
    fn test_initialize_population_rejects_unsampleable_bounds() {
        let mut rng = PointRng::new(42);
        let nan = CoordinateBounds {
            min: 0.0,
            max: f64::NAN,
        };
        let overflowing = CoordinateBounds {
            min: -1e308,
            max: 1e308,
        };

        for bounds in [nan, overflowing] {
            assert!(matches!(
                initialize_population(&mut rng, 4, 3, bounds),
                Err(EngineError::InvalidConfig(_))
            ));
            assert!(initialize_population(&mut rng, 0, 3, bounds).is_err());
        }
    }

    #[test]
    fn test_stopping_condition() {
        assert!(stopping_condition(10, 10));
        assert!(stopping_condition(11, 10));
        assert!(!stopping_condition(5, 10));
    }

    #[test]
    fn test_best_solution() {
        let population: Vec<Individual> = (0..10)
            .map(|i| {
                let mut ind = Individual::new([Point::new(i as f64, i as f64)]);
                ind.fitness = i as f64 * 10.0;
                ind
            })
            .collect();

        let best = best_solution(&population).unwrap();
        assert!((best.fitness - 90.0).abs() < 0.01);
    }

    #[test]
    fn test_best_solution_empty() {
        assert!(matches!(
            best_solution(&[]),
            Err(EngineError::EmptyPopulation)
        ));
    }

    #[test]
    fn test_next_generation_size() {
        let population = diagonal(10);
        let params = BreedingParams {
            elite_count: 3,
            population_size: 10,
            ..BreedingParams::from_config(&EvolutionConfig {
                diversity_threshold: 1.0,
                ..Default::default()
            })
        };

        let mut rng = PointRng::new(42);
        let offspring =
            select_next_generation_with_clustering(&mut rng, &population, &params).unwrap();
        assert_eq!(offspring.population.len(), 10);
        // Single-point diagonal individuals are all farther apart than 1.
        assert_eq!(offspring.cluster_count, 10);
    }

    #[test]
    fn test_lowest_fitness_elites_preserved() {
        let mut population: Vec<Individual> = (0..6)
            .map(|i| Individual::new([Point::new(i as f64 * 10.0, 0.0)]))
            .collect();
        for (ind, fitness) in population.iter_mut().zip([5.0, -3.0, 8.0, 1.0, -7.0, 2.0]) {
            ind.fitness = fitness;
        }
        let params = BreedingParams {
            elite_count: 2,
            population_size: 6,
            ..BreedingParams::from_config(&EvolutionConfig::default())
        };

        let mut rng = PointRng::new(3);
        let offspring =
            select_next_generation_with_clustering(&mut rng, &population, &params).unwrap();
        assert_eq!(offspring.population[0], population[4]);
        assert_eq!(offspring.population[1], population[1]);
    }

    #[test]
    fn test_highest_fitness_elites_preserved() {
        let mut population: Vec<Individual> = (0..6)
            .map(|i| Individual::new([Point::new(i as f64 * 10.0, 0.0)]))
            .collect();
        for (ind, fitness) in population.iter_mut().zip([5.0, -3.0, 8.0, 1.0, -7.0, 2.0]) {
            ind.fitness = fitness;
        }
        let params = BreedingParams {
            elite_count: 2,
            population_size: 6,
            elitism: ElitismPolicy::HighestFitness,
            ..BreedingParams::from_config(&EvolutionConfig::default())
        };

        let mut rng = PointRng::new(3);
        let offspring =
            select_next_generation_with_clustering(&mut rng, &population, &params).unwrap();
        assert_eq!(offspring.population[0], population[2]);
        assert_eq!(offspring.population[1], population[0]);
    }

    #[test]
    fn test_elite_count_beyond_population_is_clamped() {
        let population = diagonal(4);
        let params = BreedingParams {
            elite_count: 10,
            population_size: 4,
            ..BreedingParams::from_config(&EvolutionConfig::default())
        };

        let mut rng = PointRng::new(1);
        let offspring =
            select_next_generation_with_clustering(&mut rng, &population, &params).unwrap();
        assert_eq!(offspring.population.len(), 4);
    }

    #[test]
    fn test_next_generation_rejects_empty_population() {
        let params = BreedingParams::from_config(&EvolutionConfig::default());
        let mut rng = PointRng::new(1);
        assert!(matches!(
            select_next_generation_with_clustering(&mut rng, &[], &params),
            Err(EngineError::EmptyPopulation)
        ));
    }

    #[test]
    fn test_engine_rejects_invalid_config() {
        let config = EvolutionConfig {
            population_size: 0,
            ..Default::default()
        };
        assert!(matches!(
            EvolutionEngine::new(config),
            Err(EngineError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_engine_rejects_overflowing_bounds() {
        let config = EvolutionConfig {
            bounds: CoordinateBounds {
                min: -1e308,
                max: 1e308,
            },
            ..small_config()
        };
        assert!(matches!(
            EvolutionEngine::new(config),
            Err(EngineError::InvalidConfig(ConfigError::BoundsTooWide { .. }))
        ));
    }

    #[test]
    fn test_engine_initialize() {
        let mut engine = EvolutionEngine::new(small_config()).unwrap();
        engine.initialize().unwrap();

        assert_eq!(engine.population().len(), 10);
        assert_eq!(engine.generation(), 0);
        assert_eq!(engine.history().len(), 1);
        assert!(engine.best().is_some());
    }

    #[test]
    fn test_reinitialize_resets_evaluations() {
        let mut engine = EvolutionEngine::new(small_config()).unwrap();
        engine.initialize().unwrap();
        engine.step_generation().unwrap();
        assert_eq!(engine.evaluations(), 20);

        engine.initialize().unwrap();
        assert_eq!(engine.evaluations(), 10);
        assert_eq!(engine.history().len(), 1);
    }

    #[test]
    fn test_step_returns_recorded_progress() {
        let mut engine = EvolutionEngine::new(small_config()).unwrap();
        let initial = engine.initialize().unwrap();
        assert_eq!(initial.generation, 0);

        let step = engine.step_generation().unwrap();
        let history = engine.history();
        assert_eq!(step.generation, 1);
        assert_eq!(history.len(), 2);
        assert_eq!(history.best_fitness.last(), Some(&step.generation_best));
        assert_eq!(history.avg_fitness.last(), Some(&step.avg_fitness));
        assert_eq!(history.diversity.last(), Some(&step.diversity));
        assert_eq!(history.cluster_count.last(), Some(&step.cluster_count));
    }

    #[test]
    fn test_engine_run() {
        let mut engine = EvolutionEngine::new(small_config()).unwrap();
        let result = engine.run().unwrap();

        assert_eq!(result.stats.generations, 4);
        assert_eq!(result.stats.total_evaluations, 50);
        assert_eq!(result.history.len(), 5);
        assert_eq!(result.best.points.len(), 8);
        assert_eq!(result.stats.random_seed, 42);
        assert_eq!(
            result.stats.best_fitness,
            result
                .history
                .best_so_far
                .last()
                .copied()
                .unwrap_or(f64::NAN)
        );
    }

    #[test]
    fn test_engine_reproducible_with_seed() {
        let first = EvolutionEngine::new(small_config()).unwrap().run().unwrap();
        let second = EvolutionEngine::new(small_config()).unwrap().run().unwrap();

        assert_eq!(first.best.points, second.best.points);
        assert_eq!(first.history.best_fitness, second.history.best_fitness);
    }

    #[test]
    fn test_callback_sees_every_generation() {
        use std::cell::RefCell;

        let seen = RefCell::new(Vec::new());
        let mut engine = EvolutionEngine::new(small_config()).unwrap();
        engine
            .run_with_callback(|progress| seen.borrow_mut().push(progress.generation))
            .unwrap();

        assert_eq!(seen.into_inner(), vec![0, 1, 2, 3, 4]);
    }
}
