//! Urban Plan CLI - Run the allocation optimizer from JSON inputs.

use std::fs;
use std::path::PathBuf;

use urban_plan::{
    optim::EvolutionEngine,
    schema::{OptimizerConfig, Zone, ZoneCatalog},
};

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 && args[1] == "--example" {
        print_example_inputs();
        return;
    }

    if args.len() < 3 {
        eprintln!("Usage: {} <config.json> <zones.json>", args[0]);
        eprintln!();
        eprintln!("Search for housing allocations across a zone catalog.");
        eprintln!();
        eprintln!("Arguments:");
        eprintln!("  config.json  Optimizer configuration");
        eprintln!("  zones.json   Zone catalog with per-objective scores");
        eprintln!();
        eprintln!("Example inputs are generated with the --example flag.");
        std::process::exit(1);
    }

    let config_path = PathBuf::from(&args[1]);
    let zones_path = PathBuf::from(&args[2]);

    let config_str = fs::read_to_string(&config_path).unwrap_or_else(|e| {
        eprintln!("Error reading config file: {}", e);
        std::process::exit(1);
    });
    let config: OptimizerConfig = serde_json::from_str(&config_str).unwrap_or_else(|e| {
        eprintln!("Error parsing config: {}", e);
        std::process::exit(1);
    });

    let zones_str = fs::read_to_string(&zones_path).unwrap_or_else(|e| {
        eprintln!("Error reading zone catalog: {}", e);
        std::process::exit(1);
    });
    let catalog: ZoneCatalog = serde_json::from_str(&zones_str).unwrap_or_else(|e| {
        eprintln!("Error parsing zone catalog: {}", e);
        std::process::exit(1);
    });

    println!("Urban Plan Optimizer");
    println!("====================");
    println!(
        "Zones: {} ({} objectives)",
        catalog.len(),
        catalog.objective_count()
    );
    println!("Required dwellings: {}", config.required_dwellings);
    println!(
        "Population: {}, generations: {}",
        config.population_size, config.generations
    );
    println!(
        "Crossover: {}, mutation: {} (per element: {})",
        config.crossover_probability,
        config.mutation_probability,
        config.element_mutation_probability
    );
    println!();

    let mut engine = EvolutionEngine::new(&catalog, &config).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    println!("Running optimizer...");
    let result = engine
        .run_with_callback(|report| {
            if report.generation > 0 {
                println!(
                    "  Generation {}/{}: best={:.4}, mean={:.4}, accepted={}{}",
                    report.generation,
                    config.generations,
                    report.best_aggregate,
                    report.mean_aggregate,
                    report.accepted_offspring,
                    if report.exhausted { " (exhausted)" } else { "" }
                );
            }
        })
        .unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        });

    println!();
    println!("Best plan per objective:");
    for (m, name) in catalog.objective_names.iter().enumerate() {
        if let Some(entry) = result.mopo.best(m) {
            println!(
                "  {}: {:.4} (aggregate {:.4}, {} dwellings)",
                name,
                entry.score,
                entry.candidate.aggregate,
                entry.candidate.plan.total_dwellings()
            );
        }
    }
    if let Some(entry) = result.mopo.aggregate_sequence().last() {
        println!(
            "  aggregate: {:.4} ({} dwellings)",
            entry.score,
            entry.candidate.plan.total_dwellings()
        );
    }

    println!();
    println!("Archive: {} entries across all sequences", result.mopo.total_entries());
    println!(
        "Pareto fronts: {} objective pairs, {} distinct front plans",
        result.pareto.pairs().len(),
        result.pareto.distinct_front_plans()
    );
    println!();
    println!(
        "Evaluations: {} ({} invalid, {} degenerate discarded)",
        result.stats.evaluations,
        result.stats.invalid_discarded,
        result.stats.degenerate_discarded
    );
    if result.stats.exhausted_generations > 0 {
        println!(
            "Exhausted generations: {}",
            result.stats.exhausted_generations
        );
    }
    println!("Time: {:.2}s", result.stats.elapsed_seconds);
}

fn print_example_inputs() {
    let config = OptimizerConfig {
        objective_weights: vec![0.5, 0.5],
        random_seed: Some(42),
        ..Default::default()
    };
    let catalog = ZoneCatalog {
        objective_names: vec!["flood".into(), "distance".into()],
        zones: vec![
            Zone {
                area_ha: 12.0,
                existing_density: 5.0,
                scores: vec![0.2, 0.8],
            },
            Zone {
                area_ha: 30.0,
                existing_density: 0.0,
                scores: vec![0.6, 0.1],
            },
            Zone {
                area_ha: 8.5,
                existing_density: 20.0,
                scores: vec![0.4, 0.4],
            },
        ],
    };

    println!("Example configuration (config.json):");
    println!("{}", serde_json::to_string_pretty(&config).unwrap());
    println!();
    println!("Example zone catalog (zones.json):");
    println!("{}", serde_json::to_string_pretty(&catalog).unwrap());
}
