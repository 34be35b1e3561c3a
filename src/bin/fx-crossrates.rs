//! fx-crossrates CLI - runs the cross-rate benchmark
//!
//! Generates a random set of USD-quoted rates, computes every cross rate in
//! parallel and prints timings plus a sample of the derived rates.
//!
//! ## Example Usage
//!
//! ```bash
//! # Default run: 2001 base rates, ~4 million pairs
//! fx-crossrates
//!
//! # Reproducible smaller run on 4 workers, JSON output
//! fx-crossrates --count 500 --seed 42 --threads 4 --json
//!
//! # Give up on the pair phase after 2 seconds
//! fx-crossrates --deadline-ms 2000
//! ```

use clap::Parser;
use colored::Colorize;
use fx_crossrates::benchmark::{run_benchmark, BenchmarkConfig, BenchmarkReport};
use fx_crossrates::error::Result as FxResult;
use fx_crossrates::generator::GeneratorConfig;
use fx_crossrates::processor::ProcessorConfig;
use indicatif::{ProgressBar, ProgressStyle};
use std::process;
use std::time::Duration;

/// fx-crossrates: concurrent FX cross-rate benchmark
#[derive(Parser)]
#[command(name = "fx-crossrates")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Concurrent all-pairs FX cross-rate benchmark", long_about = None)]
struct Cli {
    /// Number of base rates to generate
    #[arg(short = 'n', long, default_value_t = 2001)]
    count: usize,

    /// Seed for a reproducible dataset
    #[arg(short, long)]
    seed: Option<u64>,

    /// Worker threads for the pair phase (default: one per core)
    #[arg(short, long)]
    threads: Option<usize>,

    /// Number of derived rates to print
    #[arg(long = "sample", default_value_t = 10)]
    sample_size: usize,

    /// Abort the pair phase after this many milliseconds
    #[arg(long)]
    deadline_ms: Option<u64>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn benchmark_config(&self) -> BenchmarkConfig {
        BenchmarkConfig {
            generator: GeneratorConfig {
                count: self.count,
                seed: self.seed,
                ..GeneratorConfig::default()
            },
            processor: ProcessorConfig {
                threads: self.threads,
                deadline: self.deadline_ms.map(Duration::from_millis),
                ..ProcessorConfig::default()
            },
            sample_size: self.sample_size,
        }
    }
}

fn run(cli: &Cli) -> FxResult<BenchmarkReport> {
    let config = cli.benchmark_config();

    if cli.verbose {
        println!(
            "{} v{}",
            "fx-crossrates".cyan().bold(),
            env!("CARGO_PKG_VERSION")
        );
        println!(
            "{} {} base rates, {} pairs",
            "Dataset:".bold(),
            config.generator.count,
            config.generator.count.saturating_mul(config.generator.count)
        );
    }

    let spinner = if cli.json {
        ProgressBar::hidden()
    } else {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg} [{elapsed}]")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.set_message("Computing cross rates...");
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner
    };

    let report = run_benchmark(&config);
    spinner.finish_and_clear();
    report
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let report = match run(&cli) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            process::exit(1);
        }
    };

    if cli.json {
        match report.to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("{} {}", "Error:".red().bold(), e);
                process::exit(1);
            }
        }
    } else {
        print!("{}", report);
    }
}
