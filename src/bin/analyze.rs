//! analyze: run the density-evolution recurrence for one parameter set.
//!
//! Prints one line per peeling round and a final summary with the asymptotic
//! fraction of decodable codewords and recovered transactions.

use ripple::{DensityEvolution, Params};

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let mut max_lookback = 0usize;
    let mut filter_probability = 0.0f64;
    let mut arrival_ratio = 0.0f64;
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

    let mut evolution = DensityEvolution::new(params);
    let mut iter = 0usize;
    while evolution.advance() {
        println!(
            "[iter {}] cw {}, tx {}",
            iter,
            evolution.decodable_codewords(),
            evolution.decoded_transactions()
        );
        iter += 1;
        if iter >= max_iterations {
            eprintln!("did not converge within {} iterations", max_iterations);
            std::process::exit(1);
        }
    }
    println!(
        "[final] decodable cw {} tx {}",
        evolution.decodable_codewords(),
        evolution.decoded_transactions()
    );
}

fn print_usage() {
    println!(
        "analyze: asymptotic decodable fraction under codeword peeling.

USAGE:
    analyze -t <INT> -f <FLOAT> -l <FLOAT> [--max-iters <INT>]

OPTIONS:
    -t <INT>            Max lookback timeslots (MaxT)
    -f <FLOAT>          Filter probability, within [0, 1]
    -l <FLOAT>          Arrival ratio (transactions per codeword), > 0
    --max-iters <INT>   Iteration cap [default: 1000000]
    -h, --help          Print this help

EXAMPLE:
    analyze -t 100 -f 0.02 -l 0.8"
    );
}
