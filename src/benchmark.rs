//! Benchmark driver: generate, process, report

use crate::cancel::CancellationToken;
use crate::error::Result;
use crate::generator::{GeneratorConfig, RateGenerator};
use crate::processor::{PairProcessor, ProcessorConfig};
use crate::rate::Rate;
use serde::Serialize;
use std::fmt;
use std::time::Instant;

/// Benchmark configuration
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkConfig {
    pub generator: GeneratorConfig,
    pub processor: ProcessorConfig,
    /// Number of derived rates to include in the report
    pub sample_size: usize,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            generator: GeneratorConfig::default(),
            processor: ProcessorConfig::default(),
            sample_size: 10,
        }
    }
}

/// Timings and a sample of one benchmark run
#[derive(Debug, Clone, Serialize)]
pub struct BenchmarkReport {
    /// Number of generated base rates
    pub generated: usize,
    pub generation_ms: u64,
    pub processing_ms: u64,
    /// Derived rates actually stored, after collisions collapsed
    pub unique_pairs: usize,
    pub sample: Vec<Rate>,
}

impl BenchmarkReport {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for BenchmarkReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Fetched rates: {} rates", self.generated)?;
        writeln!(f, "Fetching rates took {} milliseconds.", self.generation_ms)?;
        writeln!(
            f,
            "Processing rates took {} milliseconds to process {} unique pairs.",
            self.processing_ms, self.unique_pairs
        )?;
        for rate in &self.sample {
            writeln!(f, "{}", rate)?;
        }
        Ok(())
    }
}

/// Run one benchmark without external cancellation
pub fn run_benchmark(config: &BenchmarkConfig) -> Result<BenchmarkReport> {
    run_benchmark_with_cancel(config, &CancellationToken::new())
}

/// Generate the base rates, compute all pairs and time both phases
pub fn run_benchmark_with_cancel(
    config: &BenchmarkConfig,
    token: &CancellationToken,
) -> Result<BenchmarkReport> {
    let generator = RateGenerator::new(config.generator.clone())?;
    let processor = PairProcessor::new(config.processor.clone())?;

    let fetch_start = Instant::now();
    let base_rates = generator.fetch_rates()?;
    let generation_ms = fetch_start.elapsed().as_millis() as u64;
    log::info!("Generated {} base rates in {} ms", base_rates.len(), generation_ms);

    let process_start = Instant::now();
    let all_rates = processor.calculate_pairs_with_cancel(&base_rates, token)?;
    let processing_ms = process_start.elapsed().as_millis() as u64;

    let sample = all_rates
        .all_exchange_rates()
        .into_iter()
        .take(config.sample_size)
        .collect();

    Ok(BenchmarkReport {
        generated: base_rates.len(),
        generation_ms,
        processing_ms,
        unique_pairs: all_rates.len(),
        sample,
    })
}
