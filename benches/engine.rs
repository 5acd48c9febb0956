//! Benchmarks for the allocation optimizer.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use urban_plan::{
    optim::{front, EvolutionEngine},
    schema::{OptimizerConfig, Zone, ZoneCatalog},
};

fn synthetic_catalog(zones: usize, objectives: usize) -> ZoneCatalog {
    ZoneCatalog {
        objective_names: (0..objectives).map(|m| format!("objective_{}", m)).collect(),
        zones: (0..zones)
            .map(|i| Zone {
                area_ha: 5.0 + (i % 20) as f64 * 2.5,
                existing_density: (i % 7) as f64 * 4.0,
                scores: (0..objectives)
                    .map(|m| 0.05 + ((i * 13 + m * 7) % 100) as f64 / 100.0)
                    .collect(),
            })
            .collect(),
    }
}

fn bench_front_extraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("front_extraction");

    for count in [100, 500, 2000, 8000] {
        let points: Vec<[f64; 2]> = (0..count)
            .map(|i| {
                let x = ((i * 37) % 1000) as f64 / 10.0;
                let y = ((i * 61 + 17) % 1000) as f64 / 10.0;
                [x, y]
            })
            .collect();

        group.bench_with_input(
            BenchmarkId::from_parameter(count),
            &points,
            |b, points| {
                b.iter(|| front(black_box(points)));
            },
        );
    }

    group.finish();
}

fn bench_full_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_run");
    group.sample_size(10);

    for zones in [50, 200, 800] {
        let catalog = synthetic_catalog(zones, 6);
        let config = OptimizerConfig {
            population_size: 10,
            generations: 10,
            required_dwellings: 20_000,
            random_seed: Some(42),
            ..Default::default()
        };

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_zones", zones)),
            &zones,
            |b, _| {
                b.iter(|| {
                    let mut engine = EvolutionEngine::new(&catalog, &config).unwrap();
                    black_box(engine.run().unwrap());
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_front_extraction, bench_full_run);
criterion_main!(benches);
