// Larger synthetic workloads: scoring modes, parallelism, dimensionality
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use domscore::{
    compute_scores, Dataset, DatasetReader, DelimitedReader, Distribution, EngineConfig,
    ScoringMode, SyntheticGenerator,
};

fn synthetic(distribution: Distribution, size: usize, dimensions: usize) -> Dataset {
    let generator = SyntheticGenerator::new(distribution, size, dimensions, 42).unwrap();
    let mut buf = Vec::new();
    generator.write_to(&mut buf).unwrap();
    DelimitedReader::synthetic(dimensions)
        .unwrap()
        .read_from(&mut buf.as_slice())
        .unwrap()
}

fn benchmark_modes(c: &mut Criterion) {
    let mut group = c.benchmark_group("scoring_mode");
    group.sample_size(10);
    let dataset = synthetic(Distribution::Correlated, 50_000, 3);

    for mode in [ScoringMode::Exact, ScoringMode::Approximate] {
        let config = EngineConfig::uniform(3, 25).with_mode(mode);
        group.bench_with_input(BenchmarkId::from_parameter(mode.as_str()), &config, |b, config| {
            b.iter(|| black_box(compute_scores(&dataset, config).unwrap()));
        });
    }

    group.finish();
}

fn benchmark_parallel(c: &mut Criterion) {
    let mut group = c.benchmark_group("parallel");
    group.sample_size(10);
    let dataset = synthetic(Distribution::Uniform, 50_000, 3);

    for parallel in [false, true] {
        let config = EngineConfig::uniform(3, 25).with_parallel(parallel);
        group.bench_with_input(BenchmarkId::from_parameter(parallel), &config, |b, config| {
            b.iter(|| black_box(compute_scores(&dataset, config).unwrap()));
        });
    }

    group.finish();
}

fn benchmark_dimensions(c: &mut Criterion) {
    let mut group = c.benchmark_group("dimensions");
    group.sample_size(10);

    for dimensions in [2, 3, 4].iter() {
        let dataset = synthetic(Distribution::Uniform, 20_000, *dimensions);
        let config = EngineConfig::uniform(*dimensions, 10);
        group.bench_with_input(BenchmarkId::from_parameter(dimensions), &dataset, |b, dataset| {
            b.iter(|| black_box(compute_scores(dataset, &config).unwrap()));
        });
    }

    group.finish();
}

fn benchmark_ingestion(c: &mut Criterion) {
    let generator = SyntheticGenerator::new(Distribution::Uniform, 50_000, 4, 7).unwrap();
    let mut buf = Vec::new();
    generator.write_to(&mut buf).unwrap();
    let reader = DelimitedReader::synthetic(4).unwrap();

    c.bench_function("ingest_50k", |b| {
        b.iter(|| black_box(reader.read_from(&mut buf.as_slice()).unwrap()));
    });
}

criterion_group!(
    intensive_benches,
    benchmark_modes,
    benchmark_parallel,
    benchmark_dimensions,
    benchmark_ingestion
);
criterion_main!(intensive_benches);
