//! Benchmarks for the TSP-ILS algorithm.

#[cfg(feature = "bench")]
extern crate criterion;

#[cfg(feature = "bench")]
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;
use tsp_ils::config::Config;
use tsp_ils::local_search::{LocalSearch, NeighborList, TwoOpt};
use tsp_ils::problem::{Node, Problem};
use tsp_ils::tour::Tour;
use tsp_ils::IlsAlgorithm;

/// Create a benchmark problem of specified size.
fn create_benchmark_problem(size: usize) -> Problem {
    // Nodes in a grid arrangement
    let grid_size = (size as f64).sqrt().ceil() as usize;
    let nodes = (0..size)
        .map(|i| {
            let row = i / grid_size;
            let col = i % grid_size;
            // Slight skew so distances are not all tied
            Node::new(i, col as f64 * 10.0 + row as f64 * 0.01, row as f64 * 10.0)
        })
        .collect();

    Problem::new(format!("BenchProblem_{}", size), nodes)
}

#[cfg(feature = "bench")]
fn benchmark_neighbor_list(c: &mut Criterion) {
    let mut group = c.benchmark_group("neighbor_list");

    for size in [100, 200, 400].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            let problem = create_benchmark_problem(size);
            let tour: Vec<usize> = (0..size).collect();

            b.iter(|| NeighborList::build(&tour, 25, &problem));
        });
    }

    group.finish();
}

#[cfg(feature = "bench")]
fn benchmark_local_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("two_opt");

    for size in [100, 200, 400].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            let problem = create_benchmark_problem(size);
            let mut rng = ChaCha8Rng::seed_from_u64(1);
            let tour = Tour::random(&problem, &mut rng);
            let mut two_opt = TwoOpt::new(25);

            b.iter(|| two_opt.optimize(&tour, &problem, None));
        });
    }

    group.finish();
}

#[cfg(feature = "bench")]
fn benchmark_short_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("ils_100_iterations");
    group.measurement_time(Duration::from_secs(20));

    for size in [100, 200].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            let problem = create_benchmark_problem(size);
            let config = Config::new()
                .with_time_limit(Duration::from_secs(10))
                .with_max_iterations(100);

            b.iter(|| {
                IlsAlgorithm::new(&problem, config.clone())
                    .expect("valid benchmark config")
                    .run()
            });
        });
    }

    group.finish();
}

#[cfg(feature = "bench")]
criterion_group!(
    benches,
    benchmark_neighbor_list,
    benchmark_local_search,
    benchmark_short_run
);

#[cfg(feature = "bench")]
criterion_main!(benches);
