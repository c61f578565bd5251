//! Criterion benchmarks for the three representations.
//!
//! Problem sizes are synthetic; the numbers measure loop and operator
//! overhead rather than solution quality.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use evosearch::ga::{GaConfig, GaRunner, PermutationEncoding, RealBits, SubsetBits};
use evosearch::problems::{maximize, Cities, SubsetSum};
use evosearch::random::create_rng;
use rand::Rng;

// ===========================================================================
// Instances
// ===========================================================================

fn ring_cities(n: usize) -> Cities {
    let mut rng = create_rng(7);
    let points = (0..n)
        .map(|i| {
            let angle = i as f64 / n as f64 * std::f64::consts::TAU;
            let jitter: f64 = rng.random_range(0.9..1.1);
            [angle.cos() * jitter, angle.sin() * jitter]
        })
        .collect();
    Cities::new(points)
}

fn random_subset(n: usize) -> SubsetSum {
    let mut rng = create_rng(11);
    let weights: Vec<u64> = (0..n).map(|_| rng.random_range(1..10_000)).collect();
    let target = weights.iter().step_by(3).sum();
    SubsetSum::new(weights, target)
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_real_bits(c: &mut Criterion) {
    let mut group = c.benchmark_group("ga_real_bits");
    group.sample_size(10);

    for (precision, pop, gen) in [(15usize, 100usize, 20usize), (31, 200, 20), (52, 500, 10)] {
        let rep = RealBits::new(-9.6, 9.1, precision).unwrap();
        let config = GaConfig::default()
            .with_population_size(pop)
            .with_generations(gen)
            .with_elite_size(10)
            .with_mutation_rate(0.01)
            .with_seed(42);
        group.bench_with_input(
            BenchmarkId::new(format!("p{}_n{}_g{}", precision, pop, gen), precision),
            &(rep, config),
            |b, (r, c)| {
                b.iter(|| {
                    let fitness = maximize(|x: &f64| (3.0 * x - 15.0).cos() * x);
                    let result = GaRunner::run(black_box(r), fitness, black_box(c));
                    black_box(result)
                })
            },
        );
    }
    group.finish();
}

fn bench_permutation(c: &mut Criterion) {
    let mut group = c.benchmark_group("ga_tsp");
    group.sample_size(10);

    for &n in &[10, 30, 60] {
        let cities = ring_cities(n);
        let rep = PermutationEncoding::new(n).unwrap();
        let config = GaConfig::default()
            .with_population_size(100)
            .with_generations(50)
            .with_seed(42);
        group.bench_with_input(
            BenchmarkId::from_parameter(n),
            &(cities, rep, config),
            |b, (cities, r, c)| {
                b.iter(|| {
                    let result = GaRunner::run(
                        black_box(r),
                        |tour: &Vec<usize>| cities.tour_length(tour),
                        black_box(c),
                    );
                    black_box(result)
                })
            },
        );
    }
    group.finish();
}

fn bench_subset(c: &mut Criterion) {
    let mut group = c.benchmark_group("ga_subset_sum");
    group.sample_size(10);

    for &n in &[20, 50, 100] {
        let problem = random_subset(n);
        let rep = SubsetBits::new(n).unwrap();
        let config = GaConfig::default()
            .with_population_size(100)
            .with_generations(50)
            .with_seed(42);
        group.bench_with_input(
            BenchmarkId::from_parameter(n),
            &(problem, rep, config),
            |b, (p, r, c)| {
                b.iter(|| {
                    let result =
                        GaRunner::run(black_box(r), |bits: &Vec<bool>| p.fitness(bits), black_box(c));
                    black_box(result)
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_real_bits, bench_permutation, bench_subset);
criterion_main!(benches);
