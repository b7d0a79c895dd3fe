//! sweep: evaluate the recurrence across a filter-probability grid.
//!
//! Writes one JSON file of sweep records per run and prints a per-point
//! summary table.

use std::fs;
use std::time::Instant;

use ripple::sweep::{resolve_grid, run_sweep};

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let mut arrival_ratio = 0.8f64;
    let mut max_lookback = 100usize;
    let mut grid_name = "coarse".to_string();
    let mut filters_csv: Option<String> = None;
    let mut output_dir = "outputs/sweep".to_string();
    let mut max_iterations = 1_000_000usize;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--arrival" => {
                i += 1;
                arrival_ratio = args[i].parse().expect("Invalid --arrival value");
            }
            "--lookback" => {
                i += 1;
                max_lookback = args[i].parse().expect("Invalid --lookback value");
            }
            "--grid" => {
                i += 1;
                grid_name = args[i].clone();
            }
            "--filters" => {
                i += 1;
                filters_csv = Some(args[i].clone());
            }
            "--output" => {
                i += 1;
                output_dir = args[i].clone();
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

    let num_threads = std::env::var("RAYON_NUM_THREADS")
        .or_else(|_| std::env::var("OMP_NUM_THREADS"))
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8);
    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()
        .unwrap();

    let filters = if let Some(csv) = filters_csv {
        csv.split(',')
            .map(|s| s.trim().parse::<f64>().expect("Invalid filter value"))
            .collect()
    } else {
        resolve_grid(&grid_name).unwrap_or_else(|| {
            eprintln!("Unknown grid '{}'", grid_name);
            std::process::exit(1);
        })
    };

    println!("=== sweep ===");
    println!(
        "l={}, t={}, {} filter points, {} threads",
        arrival_ratio,
        max_lookback,
        filters.len(),
        num_threads
    );

    let t0 = Instant::now();
    let records = match run_sweep(arrival_ratio, max_lookback, &filters, max_iterations) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    for record in &records {
        println!(
            "  f={:<6} cw={:.6} tx={:.6} ({} iters)",
            record.filter_probability,
            record.decodable_codewords,
            record.decoded_transactions,
            record.iterations
        );
    }

    fs::create_dir_all(&output_dir).expect("Failed to create output directory");
    let out_path = format!("{}/sweep_l{}_t{}.json", output_dir, arrival_ratio, max_lookback);
    let json = serde_json::to_string_pretty(&records).expect("Failed to serialize records");
    fs::write(&out_path, json).expect("Failed to write output file");

    println!(
        "Wrote {} ({} points) in {:.1}s",
        out_path,
        records.len(),
        t0.elapsed().as_secs_f64()
    );
}

fn print_usage() {
    println!(
        "sweep: fixed-point outputs across a filter-probability grid.

USAGE:
    sweep [OPTIONS]

OPTIONS:
    --arrival <FLOAT>   Arrival ratio l [default: 0.8]
    --lookback <INT>    Max lookback timeslots [default: 100]
    --grid <NAME>       Named grid: dense, coarse, sparse [default: coarse]
    --filters <LIST>    Comma-separated filter probabilities (overrides --grid)
    --output <DIR>      Output directory [default: outputs/sweep]
    --max-iters <INT>   Per-point iteration cap [default: 1000000]
    -h, --help          Print this help

EXAMPLES:
    sweep --arrival 0.8 --lookback 200 --grid dense
    sweep --filters 0.01,0.02,0.05"
    );
}
