//! Criterion benchmarks for variate_rng.
//!
//! Covers bounded integer draws, the two Gaussian methods, both binomial
//! regimes and the three index samplers across the sizes where the automatic
//! selection switches between them.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::SeedableRng;
use variate_rng::sampling::{sample_insertion_into, sample_pool_into, sample_reservoir_into};
use variate_rng::source::{Pcg64, Xoshiro256PlusPlus};
use variate_rng::EnhancedRng;

/// Benchmark ranged integer draws for power-of-two and awkward widths.
fn bench_bounded_ints(c: &mut Criterion) {
    let mut group = c.benchmark_group("bounded_ints");
    let mut rng: EnhancedRng<Xoshiro256PlusPlus> = EnhancedRng::from_seed(1);

    for bound in [16, 1_000, 1 << 30, i32::MAX] {
        group.bench_with_input(BenchmarkId::new("next_int", bound), &bound, |b, &bound| {
            b.iter(|| rng.next_int(black_box(bound)).unwrap());
        });
    }

    group.bench_function("next_int_in_full_range", |b| {
        b.iter(|| rng.next_int_in(black_box(i32::MIN), black_box(i32::MAX)).unwrap());
    });

    group.finish();
}

/// Benchmark Gaussian generation by method.
fn bench_gaussian(c: &mut Criterion) {
    let mut group = c.benchmark_group("gaussian");
    let mut rng: EnhancedRng<Xoshiro256PlusPlus> = EnhancedRng::from_seed(2);

    group.bench_function("ziggurat", |b| b.iter(|| rng.next_gaussian_ziggurat()));
    group.bench_function("polar", |b| b.iter(|| rng.next_gaussian_polar()));

    let mut buffer = vec![0.0; 1024];
    group.bench_function("fill_1024", |b| {
        b.iter(|| {
            rng.fill_gaussian(&mut buffer);
            black_box(buffer[0])
        })
    });

    group.finish();
}

/// Benchmark binomial draws in the inversion and BTPE regimes.
fn bench_binomial(c: &mut Criterion) {
    let mut group = c.benchmark_group("binomial");
    let mut rng: EnhancedRng<Pcg64> = EnhancedRng::from_seed(3);

    for (n, p) in [(20_u64, 0.2), (1_000, 0.3), (1_000_000, 0.3)] {
        let label = format!("{}x{}", n, p);
        group.bench_with_input(BenchmarkId::new("cached", &label), &(n, p), |b, &(n, p)| {
            b.iter(|| rng.next_binomial(black_box(n), black_box(p)).unwrap());
        });
    }

    group.finish();
}

/// Benchmark the three samplers and the automatic selection.
fn bench_sampling(c: &mut Criterion) {
    let mut group = c.benchmark_group("sampling");
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(4);

    for (n, k) in [(10_000, 10), (10_000, 100), (10_000, 2_000)] {
        let label = format!("{}of{}", k, n);
        let mut dest = vec![0_usize; k];

        group.bench_with_input(BenchmarkId::new("insertion", &label), &(n, k), |b, &(n, k)| {
            b.iter(|| sample_insertion_into(&mut rng, n, k, &mut dest).unwrap().len());
        });
        group.bench_with_input(BenchmarkId::new("pool", &label), &(n, k), |b, &(n, k)| {
            b.iter(|| sample_pool_into(&mut rng, n, k, &mut dest).unwrap().len());
        });
        group.bench_with_input(BenchmarkId::new("reservoir", &label), &(n, k), |b, &(n, k)| {
            b.iter(|| sample_reservoir_into(&mut rng, n, k, &mut dest).unwrap().len());
        });
    }

    let mut wrapper: EnhancedRng = EnhancedRng::from_seed(5);
    group.bench_function("sample_p_10000", |b| {
        b.iter(|| wrapper.sample_p(black_box(10_000), black_box(0.01)).unwrap().len());
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_bounded_ints,
    bench_gaussian,
    bench_binomial,
    bench_sampling
);
criterion_main!(benches);
