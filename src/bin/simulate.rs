//! simulate: finite-population peeling trials vs. the asymptotic prediction.
//!
//! Runs seeded Monte Carlo histories of the transaction/codeword process,
//! peels each one with a real decoder, and prints the empirical decoded
//! fractions next to the density-evolution fixed point.

use std::time::Instant;

use ripple::simulation::simulate;
use ripple::{DensityEvolution, Params};

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let mut max_lookback = 0usize;
    let mut filter_probability = 0.0f64;
    let mut arrival_ratio = 0.0f64;
    let mut epochs = 10_000usize;
    let mut trials = 10usize;
    let mut seed = 42u64;
    let mut max_iterations = 1_000_000usize;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-t" => {
                i += 1;
                max_lookback = args[i].parse().expect("Invalid -t value");
            }
            "-f" => {
                i += 1;
                filter_probability = args[i].parse().expect("Invalid -f value");
            }
            "-l" => {
                i += 1;
                arrival_ratio = args[i].parse().expect("Invalid -l value");
            }
            "--epochs" => {
                i += 1;
                epochs = args[i].parse().expect("Invalid --epochs value");
            }
            "--trials" => {
                i += 1;
                trials = args[i].parse().expect("Invalid --trials value");
            }
            "--seed" => {
                i += 1;
                seed = args[i].parse().expect("Invalid --seed value");
            }
            "--max-iters" => {
                i += 1;
                max_iterations = args[i].parse().expect("Invalid --max-iters value");
            }
            "--help" | "-h" => {
                print_usage();
                return;
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let params = match Params::new(arrival_ratio, filter_probability, max_lookback) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    let num_threads = std::env::var("RAYON_NUM_THREADS")
        .or_else(|_| std::env::var("OMP_NUM_THREADS"))
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8);
    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()
        .unwrap();

    println!("=== simulate ===");
    println!(
        "l={}, f={}, t={}, {} trials x {} epochs, seed {}",
        arrival_ratio, filter_probability, max_lookback, trials, epochs, seed
    );

    let mut evolution = DensityEvolution::new(params);
    let prediction = match evolution.run(max_iterations) {
        Ok(fp) => fp,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    let t0 = Instant::now();
    let result = simulate(&params, epochs, trials, seed);
    let elapsed = t0.elapsed().as_secs_f64();

    for (idx, trial) in result.trials.iter().enumerate() {
        println!(
            "  trial {:2}: cw {:.6} tx {:.6} ({} tx, {} cw)",
            idx,
            trial.decoded_codeword_fraction,
            trial.decoded_transaction_fraction,
            trial.transactions,
            trial.codewords
        );
    }

    println!(
        "empirical  cw {:.6} tx {:.6} ({:.1}s)",
        result.mean_codeword_fraction, result.mean_transaction_fraction, elapsed
    );
    println!(
        "asymptotic cw {:.6} tx {:.6} ({} iters)",
        prediction.decodable_codewords, prediction.decoded_transactions, prediction.iterations
    );
}

fn print_usage() {
    println!(
        "simulate: finite-population peeling vs. the asymptotic recurrence.

USAGE:
    simulate -t <INT> -f <FLOAT> -l <FLOAT> [OPTIONS]

OPTIONS:
    -t <INT>            Max lookback timeslots (MaxT)
    -f <FLOAT>          Filter probability, within [0, 1]
    -l <FLOAT>          Arrival ratio (transactions per codeword), > 0
    --epochs <INT>      Timeslots per trial [default: 10000]
    --trials <INT>      Independent trials [default: 10]
    --seed <INT>        Base RNG seed [default: 42]
    --max-iters <INT>   Recurrence iteration cap [default: 1000000]
    -h, --help          Print this help

EXAMPLE:
    simulate -t 100 -f 0.02 -l 0.8 --trials 20"
    );
}
