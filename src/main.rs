//! Point Spread CLI - Run a genetic point-spacing search from JSON configuration.

#[cfg(feature = "dhat-heap")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

use std::fs;
use std::path::PathBuf;

use point_spread::{EvolutionConfig, EvolutionEngine};

fn print_usage(program: &str) {
    eprintln!("Usage: {} [config.json] [--output result.json]", program);
    eprintln!();
    eprintln!("Run a genetic search for well-spaced 2D points.");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  config.json  Path to search configuration (default: built-in defaults)");
    eprintln!("  --output     Write the final result as JSON to this path");
    eprintln!("  --example    Print the default configuration and exit");
}

fn print_example_config() {
    match serde_json::to_string_pretty(&EvolutionConfig::default()) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing config: {}", e);
            std::process::exit(1);
        }
    }
}

fn main() {
    #[cfg(feature = "dhat-heap")]
    let _profiler = dhat::Profiler::new_heap();

    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("point-spread");

    let mut config_path: Option<PathBuf> = None;
    let mut output_path: Option<PathBuf> = None;

    let mut rest = args.iter().skip(1);
    while let Some(arg) = rest.next() {
        match arg.as_str() {
            "--example" => {
                print_example_config();
                return;
            }
            "--help" | "-h" => {
                print_usage(program);
                return;
            }
            "--output" | "-o" => match rest.next() {
                Some(path) => output_path = Some(PathBuf::from(path)),
                None => {
                    print_usage(program);
                    std::process::exit(1);
                }
            },
            path if config_path.is_none() => config_path = Some(PathBuf::from(path)),
            _ => {
                print_usage(program);
                std::process::exit(1);
            }
        }
    }

    let config = match &config_path {
        Some(path) => EvolutionConfig::from_json_file(path).unwrap_or_else(|e| {
            eprintln!("Error loading config {}: {}", path.display(), e);
            std::process::exit(1);
        }),
        None => EvolutionConfig::default(),
    };

    println!("Point Spread Search");
    println!("===================");
    println!("Population: {}", config.population_size);
    println!("Points: {}", config.num_points);
    println!("Generations: {}", config.max_generations);
    println!("Elites: {} ({:?})", config.elite_count, config.elitism);
    println!("Diversity threshold: {}", config.diversity_threshold);
    println!();

    let mut engine = EvolutionEngine::new(config).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    let result = engine
        .run_with_callback(|progress| {
            println!(
                "  Generation {}: best fitness = {:.3} (best so far {:.3}, {} clusters)",
                progress.generation,
                progress.generation_best,
                progress.best_so_far,
                progress.cluster_count
            );
        })
        .unwrap_or_else(|e| {
            eprintln!("Error during search: {}", e);
            std::process::exit(1);
        });

    println!();
    println!("Final result:");
    println!(
        "  Best fitness: {:.3} (generation {}, {} overlapping pairs)",
        result.best.fitness, result.best.generation, result.best.overlaps
    );
    println!("  Seed: {}", result.stats.random_seed);
    println!(
        "  Time: {:.3}s ({} evaluations)",
        result.stats.elapsed_seconds, result.stats.total_evaluations
    );
    println!("  Points:");
    for point in &result.best.points {
        println!("    {}", point);
    }

    if let Some(path) = output_path {
        let json = serde_json::to_string_pretty(&result).unwrap_or_else(|e| {
            eprintln!("Error serializing result: {}", e);
            std::process::exit(1);
        });
        if let Err(e) = fs::write(&path, json) {
            eprintln!("Error writing {}: {}", path.display(), e);
            std::process::exit(1);
        }
        println!();
        println!("Result written to {}", path.display());
    }
}
