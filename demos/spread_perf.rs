//! Quick search performance test

use point_spread::{EvolutionConfig, EvolutionEngine, schema::ElitismPolicy};
use std::time::Instant;

fn main() {
    println!("=== Search Performance Test ===\n");

    // Test different point counts
    for num_points in [20, 40, 80] {
        println!("Points: {}", num_points);

        let config = EvolutionConfig {
            population_size: 20,
            num_points,
            max_generations: 10,
            random_seed: Some(42),
            ..Default::default()
        };

        let start = Instant::now();
        let mut engine = match EvolutionEngine::new(config) {
            Ok(engine) => engine,
            Err(e) => {
                eprintln!("  Invalid config: {}", e);
                continue;
            }
        };
        let result = match engine.run() {
            Ok(result) => result,
            Err(e) => {
                eprintln!("  Search failed: {}", e);
                continue;
            }
        };
        let elapsed = start.elapsed();

        let total_evals = result.stats.total_evaluations;
        println!("  Generations:    {}", result.stats.generations);
        println!("  Evaluations:    {}", total_evals);
        println!("  Elapsed:        {:.3}s", elapsed.as_secs_f64());
        println!(
            "  Evals/sec:      {:.1}",
            total_evals as f64 / elapsed.as_secs_f64()
        );
        println!("  Best fitness:   {:.3}", result.stats.best_fitness);
        println!("  Overlaps:       {}", result.best.overlaps);
        println!();
    }

    println!("=== Elitism Comparison (40 points, 50 generations) ===\n");

    for elitism in [ElitismPolicy::LowestFitness, ElitismPolicy::HighestFitness] {
        let config = EvolutionConfig {
            max_generations: 50,
            elitism,
            random_seed: Some(42),
            ..Default::default()
        };

        let result = EvolutionEngine::new(config).and_then(|mut engine| engine.run());
        match result {
            Ok(result) => println!(
                "{:?}: best {:.3} found in generation {}",
                elitism, result.best.fitness, result.best.generation
            ),
            Err(e) => eprintln!("{:?}: {}", elitism, e),
        }
    }
}
