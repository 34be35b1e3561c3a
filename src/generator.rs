//! Random base-rate generator
//!
//! Produces the synthetic dataset the benchmark runs on: `count` rates quoted
//! against one base currency, each with a distinct random 3-letter target.

use crate::collection::RateCollection;
use crate::currency::CurrencyCode;
use crate::decimal::{round_half_up, RATE_SCALE};
use crate::error::{FxError, Result};
use crate::rate::Rate;
use bigdecimal::BigDecimal;
use hashbrown::HashSet;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::str::FromStr;

/// Number of distinct 3-letter codes
pub const MAX_DISTINCT_CODES: usize = 26 * 26 * 26;

/// Generator configuration
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    /// Number of base rates to produce
    pub count: usize,
    /// Currency every rate is quoted against
    pub base_currency: CurrencyCode,
    /// Lower bound of the rate range (inclusive)
    pub min_rate: f64,
    /// Upper bound of the rate range (exclusive)
    pub max_rate: f64,
    /// Seed for a reproducible dataset; `None` seeds from the OS
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            count: 2001,
            base_currency: CurrencyCode::USD,
            min_rate: 0.05,
            max_rate: 100_000.0,
            seed: None,
        }
    }
}

/// Generates random base-rate collections
#[derive(Debug, Clone)]
pub struct RateGenerator {
    config: GeneratorConfig,
}

impl RateGenerator {
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        if config.count > MAX_DISTINCT_CODES {
            return Err(FxError::Config(format!(
                "Cannot generate {} distinct currency codes, at most {} exist",
                config.count, MAX_DISTINCT_CODES
            )));
        }
        if !(config.min_rate > 0.0 && config.min_rate < config.max_rate && config.max_rate.is_finite()) {
            return Err(FxError::Config(format!(
                "Invalid rate range [{}, {})",
                config.min_rate, config.max_rate
            )));
        }

        Ok(Self { config })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Produce a fresh collection of `count` random rates
    pub fn fetch_rates(&self) -> Result<RateCollection> {
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let collection = RateCollection::with_capacity(self.config.count);
        let mut seen: HashSet<CurrencyCode> = HashSet::with_capacity(self.config.count);

        while seen.len() < self.config.count {
            let target = random_code(&mut rng);
            if !seen.insert(target) {
                continue;
            }

            let value = self.random_rate(&mut rng)?;
            collection.add_exchange_rate(Rate::new(self.config.base_currency, target, value)?);
        }

        log::debug!(
            "Generated {} {} base rates",
            collection.len(),
            self.config.base_currency
        );
        Ok(collection)
    }

    fn random_rate(&self, rng: &mut StdRng) -> Result<BigDecimal> {
        let raw = rng.gen_range(self.config.min_rate..self.config.max_rate);
        // shortest round-trip form of the f64, then fixed scale
        let value = BigDecimal::from_str(&raw.to_string())
            .map_err(|e| FxError::Validation(format!("Invalid generated rate {}: {}", raw, e)))?;
        round_half_up(&value, RATE_SCALE)
    }
}

impl Default for RateGenerator {
    fn default() -> Self {
        Self {
            config: GeneratorConfig::default(),
        }
    }
}

fn random_code(rng: &mut StdRng) -> CurrencyCode {
    let mut letters = [0u8; 3];
    for letter in letters.iter_mut() {
        *letter = b'A' + rng.gen_range(0..26u8);
    }
    CurrencyCode::from_letters(letters)
}
