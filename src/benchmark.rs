//! Benchmark runner for the sorting algorithms
//!
//! Outputs JSON results. An optional first argument is a JSON `SortConfig`,
//! e.g. `benchmark '{"order": "descending", "run_length": 16}'`.

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use serde::Serialize;
use sort_search::{
    BubbleSort, Comparator, Identity, InsertionSort, MergeSort, QuickSort, SelectionSort,
    SortConfig, Sorter, Strategy, TimSort,
};
use std::error::Error;
use std::time::{Duration, Instant};

#[derive(Serialize)]
struct BenchmarkResult {
    name: String,
    stable: bool,
    ops_per_second: f64,
    avg_ns: f64,
    correct: bool,
}

#[derive(Serialize)]
struct FullResults {
    config: SortConfig,
    array_size: usize,
    results: Vec<BenchmarkResult>,
    correctness: bool,
}

const WARMUP_ITERATIONS: usize = 3;
const BENCH_ITERATIONS: usize = 20;
const ARRAY_SIZE: usize = 2000;

fn generate_random_data(seed: u64, size: usize) -> Vec<i64> {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    (0..size).map(|_| rng.gen_range(-10_000..10_000)).collect()
}

/// Checks order under `cmp` and that the output is a permutation of the input.
fn verify_sort<S: Sorter>(
    sorter: &S,
    cmp: &Comparator<Identity>,
    seeds: &[u64],
) -> Result<bool, Box<dyn Error>> {
    for &seed in seeds {
        let input = generate_random_data(seed, ARRAY_SIZE);
        let mut data = input.clone();
        sorter.sort_by(&mut data, cmp)?;

        if !sort_search::validate::is_sorted_by(&data, cmp)? {
            return Ok(false);
        }
        let mut a = input;
        let mut b = data;
        a.sort_unstable();
        b.sort_unstable();
        if a != b {
            return Ok(false);
        }
    }

    // Edge cases
    let mut empty: Vec<i64> = vec![];
    sorter.sort_by(&mut empty, cmp)?;

    let mut two = vec![5i64, 3i64];
    sorter.sort_by(&mut two, cmp)?;
    let expected = if cmp.order().is_reverse() { vec![5, 3] } else { vec![3, 5] };
    Ok(two == expected)
}

fn benchmark_sorter<S: Sorter>(
    sorter: &S,
    cmp: &Comparator<Identity>,
    seeds: &[u64],
) -> Result<BenchmarkResult, Box<dyn Error>> {
    let correct = verify_sort(sorter, cmp, seeds)?;
    log::info!("{}: correct={}", sorter.name(), correct);

    if !correct {
        return Ok(BenchmarkResult {
            name: sorter.name().to_string(),
            stable: sorter.is_stable(),
            ops_per_second: 0.0,
            avg_ns: f64::INFINITY,
            correct: false,
        });
    }

    // Warmup
    for &seed in seeds.iter().take(WARMUP_ITERATIONS) {
        let mut data = generate_random_data(seed, ARRAY_SIZE);
        sorter.sort_by(&mut data, cmp)?;
    }

    // Benchmark
    let mut total_time = Duration::ZERO;
    let mut iterations = 0u32;

    for &seed in seeds.iter().cycle().take(BENCH_ITERATIONS) {
        let mut data = generate_random_data(seed, ARRAY_SIZE);

        let start = Instant::now();
        sorter.sort_by(&mut data, cmp)?;
        total_time += start.elapsed();
        iterations += 1;
    }

    let avg_ns = total_time.as_nanos() as f64 / iterations as f64;
    let ops_per_second = 1_000_000_000.0 / avg_ns;

    Ok(BenchmarkResult {
        name: sorter.name().to_string(),
        stable: sorter.is_stable(),
        ops_per_second,
        avg_ns,
        correct,
    })
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(json) => SortConfig::from_json(&json)?,
        None => SortConfig::default(),
    };
    let cmp = config.comparator();

    // Generate seeds for reproducible benchmarks
    let seeds: Vec<u64> = (0..10).map(|i| 12345 + i * 7).collect();

    let mut results = vec![
        benchmark_sorter(&BubbleSort, &cmp, &seeds)?,
        benchmark_sorter(&InsertionSort, &cmp, &seeds)?,
        benchmark_sorter(&SelectionSort, &cmp, &seeds)?,
        benchmark_sorter(&MergeSort::from_config(&config), &cmp, &seeds)?,
        benchmark_sorter(&QuickSort::from_config(&config), &cmp, &seeds)?,
        benchmark_sorter(&TimSort::from_config(&config)?, &cmp, &seeds)?,
    ];
    if config.strategy == Strategy::Recursive {
        results.push(benchmark_sorter(&MergeSort::iterative(), &cmp, &seeds)?);
        results.push(benchmark_sorter(&QuickSort::iterative(), &cmp, &seeds)?);
    }

    let correctness = results.iter().all(|r| r.correct);
    let full_results = FullResults {
        config,
        array_size: ARRAY_SIZE,
        results,
        correctness,
    };

    println!("{}", serde_json::to_string(&full_results)?);
    Ok(())
}
