use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use heightfield_core::{
    BasisType, GridSpec, HeightSampler, NoiseConfig, NoiseGenerator, PermutationTable, Seed,
    flatten2, normalize2,
};
use std::hint::black_box;

const SIZE: usize = 257;
const SEED: i64 = 2025;

const ALL: [BasisType; 6] = [
    BasisType::Gradient,
    BasisType::Simplex,
    BasisType::Cellular,
    BasisType::DomainWarp,
    BasisType::Ridged,
    BasisType::Billow,
];

fn bench_permutation_table(c: &mut Criterion) {
    c.bench_function("PermutationTable::new", |b| {
        b.iter(|| PermutationTable::new(black_box(Seed(2025))))
    });
}

fn bench_single_sample(c: &mut Criterion) {
    let sampler = HeightSampler::new();
    let mut group = c.benchmark_group("single basis sample");
    for kind in ALL {
        let field = sampler.prepare(&NoiseConfig::new(kind, SEED));
        group.bench_with_input(BenchmarkId::from_parameter(format!("{kind:?}")), &field, |b, f| {
            b.iter(|| f.basis().get2(black_box(13.7), black_box(-42.1)))
        });
    }
    group.finish();
}

fn bench_fractal_sample(c: &mut Criterion) {
    let sampler = HeightSampler::new();
    let mut group = c.benchmark_group("fractal sample (4 octaves)");
    for kind in ALL {
        let field = sampler.prepare(&NoiseConfig::new(kind, SEED));
        group.bench_with_input(BenchmarkId::from_parameter(format!("{kind:?}")), &field, |b, f| {
            b.iter(|| f.sample(black_box(13.7), black_box(-42.1)))
        });
    }
    group.finish();
}

// Includes the cache lookup and guard pass on every call
fn bench_sampler_cold_config(c: &mut Criterion) {
    let sampler = HeightSampler::new();
    let cfg = NoiseConfig::new(BasisType::Gradient, SEED);
    c.bench_function("HeightSampler::sample with config", |b| {
        b.iter(|| sampler.sample(black_box(13.7), black_box(-42.1), &cfg))
    });
}

fn bench_rasterize(c: &mut Criterion) {
    let sampler = HeightSampler::new();
    let grid = GridSpec::new(SIZE, SIZE, 1.0);
    let mut group = c.benchmark_group("rasterize + normalize + flatten");
    group.sample_size(20);
    for kind in [BasisType::Gradient, BasisType::Simplex, BasisType::DomainWarp] {
        let cfg = NoiseConfig::new(kind, SEED);
        group.bench_with_input(BenchmarkId::from_parameter(format!("{kind:?}")), &cfg, |b, cfg| {
            b.iter(|| {
                let mut map = sampler.rasterize(&grid, cfg);
                normalize2(&mut map);
                flatten2(&map)
            })
        });
    }
    group.finish();
}

criterion_group!(
    noise_benchmarks,
    bench_permutation_table,
    bench_single_sample,
    bench_fractal_sample,
    bench_sampler_cold_config,
    bench_rasterize
);
criterion_main!(noise_benchmarks);
