//! Visual Sorting driver
//!
//! Generates a random array, sorts it with each instrumented algorithm and
//! verifies that every operation log replays to the sorted output.
//!
//! Run with: cargo run --release -- [SIZE] [OPTIONS]
//!
//! Usage:
//!   visual-sorting                      10 values in 1..=9, every algorithm
//!   visual-sorting 20 -a heap --show-steps
//!   visual-sorting --benchmark --report steps.lino
//!   visual-sorting --stress 10000

use std::path::PathBuf;
use std::process;
use std::time::Instant;

use clap::Parser;
use log::{info, LevelFilter};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use visual_sorting::lino_report::{StepReport, StepResult};
use visual_sorting::stress::{self, StressConfig};
use visual_sorting::{verify, Algorithm};

/// Array size the visualizer animates by default
const DEFAULT_ARRAY_SIZE: usize = 10;

/// Steps printed by --show-steps for arrays too large to display
const MAX_PRINTED_STEPS: usize = 200;

#[derive(Parser)]
#[command(name = "visual-sorting")]
#[command(about = "Sort random data and record a replayable log of exchanges")]
struct Args {
    /// Number of elements to sort
    #[arg(default_value_t = DEFAULT_ARRAY_SIZE)]
    size: usize,

    /// Algorithm to run (quick, heap, insertion, merge); all when omitted
    #[arg(short, long)]
    algorithm: Option<Algorithm>,

    /// Random seed; a fresh one is drawn when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Values are drawn from 1..=MAX_VALUE
    #[arg(long, default_value_t = 9)]
    max_value: u32,

    /// Print every recorded operation
    #[arg(long)]
    show_steps: bool,

    /// Measure steps and time across sizes 2^6..2^14
    #[arg(long)]
    benchmark: bool,

    /// Save the benchmark as a Links Notation report
    #[arg(long, requires = "benchmark")]
    report: Option<PathBuf>,

    /// Run this many random trials in parallel and verify every result
    #[arg(long)]
    stress: Option<usize>,
}

impl Args {
    fn algorithms(&self) -> Vec<Algorithm> {
        match self.algorithm {
            Some(algorithm) => vec![algorithm],
            None => Algorithm::ALL.to_vec(),
        }
    }
}

fn main() {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Warn)
        .parse_default_env()
        .init();

    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(|| rand::thread_rng().gen());
    info!("using seed {}", seed);

    println!("Visual Sorting");
    println!("==============\n");

    let mut rng = StdRng::seed_from_u64(seed);
    let data: Vec<u32> = (0..args.size)
        .map(|_| rng.gen_range(1..=args.max_value.max(1)))
        .collect();

    println!("Array size: {} elements (seed {})", args.size, seed);
    if args.size <= 50 {
        println!("Input: {:?}", data);
    }

    let mut all_verified = true;

    for algorithm in args.algorithms() {
        println!("\n--- {} ---", algorithm);

        let start = Instant::now();
        let result = algorithm.sort(&data);
        let duration = start.elapsed();

        println!(
            "{} steps in {:.3} ms",
            result.steps(),
            duration.as_secs_f64() * 1000.0
        );

        match verify(&data, &result) {
            Ok(()) => println!("Replay verified: OK"),
            Err(e) => {
                all_verified = false;
                println!("ERROR: {}", e);
            }
        }

        if args.show_steps {
            let limit = if args.size > 50 {
                MAX_PRINTED_STEPS
            } else {
                usize::MAX
            };
            if result.steps() > limit {
                println!("(showing first {} steps)", limit);
            }
            let steps: Vec<String> = result
                .operations()
                .iter()
                .take(limit)
                .map(|op| op.to_string())
                .collect();
            println!("Steps: {}", steps.join(" "));
        }

        if args.size <= 50 {
            println!("Sorted: {:?}", result.sorted());
        }
    }

    if args.benchmark {
        let report = run_benchmark(&args, seed);
        info!("benchmark: {}", report.summary());
        if let Some(ref path) = args.report {
            match report.save_lino(path) {
                Ok(()) => println!("\nReport written to: {}", path.display()),
                Err(e) => {
                    eprintln!("Error writing report: {}", e);
                    process::exit(1);
                }
            }
        }
    }

    if let Some(trials) = args.stress {
        if !run_stress(trials, seed) {
            all_verified = false;
        }
    }

    if !all_verified {
        process::exit(1);
    }
}

/// Run every selected algorithm across multiple array sizes
fn run_benchmark(args: &Args, seed: u64) -> StepReport {
    println!("\n\n====================================");
    println!("Running step benchmark...");
    println!("====================================\n");

    let sizes: Vec<usize> = vec![
        1 << 6,  // 64
        1 << 8,  // 256
        1 << 10, // 1K
        1 << 12, // 4K
        1 << 14, // 16K
    ];
    let algorithms = args.algorithms();

    let mut report = StepReport::new(&format!(
        "random values in 1..={} (seed {})",
        args.max_value, seed
    ));
    let mut rng = StdRng::seed_from_u64(seed);

    print!("{:>8}", "Size");
    for algorithm in &algorithms {
        print!(" | {:>22}", algorithm.name());
    }
    println!();

    for &size in &sizes {
        let data: Vec<u32> = (0..size)
            .map(|_| rng.gen_range(1..=args.max_value.max(1)))
            .collect();

        print!("{:>8}", size);
        for &algorithm in &algorithms {
            let start = Instant::now();
            let result = algorithm.sort(&data);
            let time_ms = start.elapsed().as_secs_f64() * 1000.0;
            let verified = verify(&data, &result).is_ok();

            print!(
                " | {:>10} {:>8.3}ms{}",
                result.steps(),
                time_ms,
                if verified { " " } else { "!" }
            );

            report.add_result(StepResult {
                algorithm,
                array_size: size,
                steps: result.steps(),
                time_ms,
                verified,
            });
        }
        println!();
    }

    println!("\nEach cell: recorded steps, sort time ('!' marks a failed verification)");
    report
}

/// Run the parallel stress check; returns whether every trial passed
fn run_stress(trials: usize, seed: u64) -> bool {
    println!("\n--- Stress check ({} trials) ---", trials);

    let config = StressConfig {
        trials,
        seed,
        ..StressConfig::default()
    };

    let start = Instant::now();
    let summary = stress::run_trials(&config);
    let duration = start.elapsed();

    for algorithm in Algorithm::ALL {
        println!(
            "{:>16}: {} total steps",
            algorithm.name(),
            summary.steps_for(algorithm)
        );
    }
    println!(
        "{} trials in {:.3} ms",
        summary.trials,
        duration.as_secs_f64() * 1000.0
    );

    if summary.passed() {
        println!("Stress check verified: OK");
        true
    } else {
        for failure in &summary.failures {
            println!(
                "ERROR: {} on seed {} with input {:?}: {}",
                failure.algorithm, failure.seed, failure.input, failure.error
            );
        }
        false
    }
}
