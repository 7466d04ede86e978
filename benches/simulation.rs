//! Performance benchmarks for lifegrid

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use lifegrid::{Config, Life, RulesetKey};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn benchmark_engine_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine_step");

    for (rows, columns) in [(30, 50), (100, 100), (200, 200)] {
        let mut config = Config::default();
        config.grid.rows = rows;
        config.grid.columns = columns;

        let mut life = Life::new_with_seed(&config, 42).unwrap();
        life.randomize();

        // Warm up
        life.run(10);

        group.bench_with_input(
            BenchmarkId::new("grid", format!("{}x{}", rows, columns)),
            &(rows, columns),
            |b, _| {
                b.iter(|| {
                    life.step();
                });
            },
        );
    }

    group.finish();
}

fn benchmark_grid_step_per_ruleset(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid_step_100x100");

    let grid = lifegrid::Grid::new(100, 100)
        .unwrap()
        .randomized(&mut ChaCha8Rng::seed_from_u64(42), 0.3);

    for key in RulesetKey::ALL {
        let rules = key.rules();
        group.bench_function(key.key(), |b| {
            b.iter(|| black_box(grid.step(rules)));
        });
    }

    group.finish();
}

fn benchmark_randomize(c: &mut Criterion) {
    let mut config = Config::default();
    config.grid.rows = 100;
    config.grid.columns = 100;
    let mut life = Life::new_with_seed(&config, 42).unwrap();

    c.bench_function("randomize_100x100", |b| {
        b.iter(|| {
            life.randomize();
        });
    });
}

criterion_group!(
    benches,
    benchmark_engine_step,
    benchmark_grid_step_per_ruleset,
    benchmark_randomize,
);

criterion_main!(benches);
