//! Quick optimizer performance test on a synthetic catalog

use std::time::Instant;

use urban_plan::{
    optim::EvolutionEngine,
    schema::{OptimizerConfig, Zone, ZoneCatalog},
};

fn main() {
    println!("=== Optimizer Performance Test ===\n");

    let catalog = ZoneCatalog {
        objective_names: vec![
            "tsunami".into(),
            "coastal_flood".into(),
            "river_flood".into(),
            "liquefaction".into(),
            "distance".into(),
            "restriction".into(),
        ],
        zones: (0..400)
            .map(|i| Zone {
                area_ha: 4.0 + (i % 25) as f64 * 3.0,
                existing_density: (i % 6) as f64 * 6.0,
                scores: (0..6)
                    .map(|m| 0.05 + ((i * 11 + m * 17) % 100) as f64 / 100.0)
                    .collect(),
            })
            .collect(),
    };

    // Test different population sizes
    for population in [10, 25, 50] {
        println!("Population: {}", population);

        let config = OptimizerConfig {
            population_size: population,
            generations: 10,
            required_dwellings: 30_000,
            random_seed: Some(42),
            ..Default::default()
        };

        let start = Instant::now();
        let mut engine = EvolutionEngine::new(&catalog, &config).unwrap();
        let result = engine.run().unwrap();
        let elapsed = start.elapsed();

        let evals_per_sec = result.stats.evaluations as f64 / elapsed.as_secs_f64();
        let best = result
            .mopo
            .aggregate_sequence()
            .last()
            .map(|e| e.score)
            .unwrap_or(f64::NAN);

        println!("  Generations:    {}", result.stats.generations);
        println!("  Evaluations:    {}", result.stats.evaluations);
        println!("  Elapsed:        {:.2}s", elapsed.as_secs_f64());
        println!("  Evals/sec:      {:.1}", evals_per_sec);
        println!("  Best aggregate: {:.4}", best);
        println!(
            "  Front plans:    {} distinct across {} pairs",
            result.pareto.distinct_front_plans(),
            result.pareto.pairs().len()
        );
        println!();
    }
}
