//! Criterion benchmarks for the instrumented sorts.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::Rng;
use visual_sorting::Algorithm;

/// Generate random test data of given size, with plenty of duplicates
fn generate_random_data(size: usize) -> Vec<u32> {
    let mut rng = rand::thread_rng();
    (0..size).map(|_| rng.gen_range(0..1000)).collect()
}

/// Benchmark sorting plus log recording for each algorithm
fn bench_sorts(c: &mut Criterion) {
    for algorithm in Algorithm::ALL {
        let mut group = c.benchmark_group(algorithm.name());

        // Insertion sort is quadratic; keep its sizes small.
        let max_exp = if algorithm == Algorithm::InsertionSort { 12 } else { 16 };

        for size_exp in (8..=max_exp).step_by(2) {
            let size = 1usize << size_exp;
            group.throughput(Throughput::Elements(size as u64));

            group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
                b.iter_batched(
                    || generate_random_data(size),
                    |data| algorithm.sort(black_box(&data)),
                    criterion::BatchSize::LargeInput,
                )
            });
        }

        group.finish();
    }
}

/// Benchmark replaying a recorded log against the original input
fn bench_replay(c: &mut Criterion) {
    let mut group = c.benchmark_group("Replay");
    let size = 1usize << 14;
    let data = generate_random_data(size);

    for algorithm in [Algorithm::QuickSort, Algorithm::HeapSort, Algorithm::MergeSort] {
        let result = algorithm.sort(&data);
        group.throughput(Throughput::Elements(result.steps() as u64));

        group.bench_function(algorithm.id(), |b| {
            b.iter_batched(
                || data.clone(),
                |mut replayed| {
                    result.operations().replay(black_box(&mut replayed)).unwrap();
                    replayed
                },
                criterion::BatchSize::LargeInput,
            )
        });
    }

    group.finish();
}

criterion_group!(benches, bench_sorts, bench_replay);
criterion_main!(benches);
