// Grid scoring against the all-pairs scorer
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use domscore::{brute_force_scores, compute_scores, Dataset, EngineConfig, Row};
use rand::prelude::*;

fn random_dataset(size: usize, dimensions: usize, seed: u64) -> Dataset {
    let mut rng = StdRng::seed_from_u64(seed);
    let rows = (0..size).map(|i| {
        let attrs: Vec<i64> = (0..dimensions).map(|_| rng.random_range(0..1000)).collect();
        Row::new(i as i64, format!("n{}", i), attrs)
    });
    Dataset::from_rows(dimensions, rows).unwrap()
}

fn benchmark_grid_vs_brute_force(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid_vs_brute_force");
    group.sample_size(10);

    for size in [1_000, 5_000].iter() {
        let dataset = random_dataset(*size, 3, 1);
        let config = EngineConfig::uniform(3, 25);

        group.bench_with_input(BenchmarkId::new("grid", size), &dataset, |b, dataset| {
            b.iter(|| black_box(compute_scores(dataset, &config).unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("brute_force", size), &dataset, |b, dataset| {
            b.iter(|| black_box(brute_force_scores(dataset.points())));
        });
    }

    group.finish();
}

fn benchmark_grid_resolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid_resolution");
    group.sample_size(10);
    let dataset = random_dataset(10_000, 2, 2);

    for cells in [5, 25, 100].iter() {
        let config = EngineConfig::uniform(2, *cells);
        group.bench_with_input(BenchmarkId::from_parameter(cells), &config, |b, config| {
            b.iter(|| black_box(compute_scores(&dataset, config).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_grid_vs_brute_force, benchmark_grid_resolution);
criterion_main!(benches);
