//! All-pairs cross-rate computation
//!
//! Given N rates sharing a quote base, every ordered pair `(i, j)` (self-pairs
//! included) yields the cross rate `target_i / target_j = rate_i / rate_j`.
//! The N² units are independent and run on a rayon pool; the only shared
//! write is the output collection's insert-if-absent.
//!
//! Two inputs with the same target currency produce colliding output keys.
//! The output keeps whichever unit inserted first and silently drops the
//! others, so the result can hold fewer than N² rates.
//!
//! # Example
//! ```
//! use fx_crossrates::{PairProcessor, Rate, RateCollection};
//!
//! let base = RateCollection::new();
//! base.add_exchange_rate(Rate::parse("USD", "EUR", "2").unwrap());
//! base.add_exchange_rate(Rate::parse("USD", "GBP", "4").unwrap());
//!
//! let pairs = PairProcessor::default().calculate_pairs(&base).unwrap();
//! assert_eq!(pairs.len(), 4);
//!
//! let eur_gbp = pairs.get_exchange_rate_by_code("EUR", "GBP").unwrap().unwrap();
//! assert_eq!(eur_gbp.rate().to_string(), "0.5000000000");
//! ```

use crate::cancel::CancellationToken;
use crate::collection::RateCollection;
use crate::decimal::{divide_half_up, RATE_SCALE};
use crate::error::{FxError, Result};
use crate::rate::Rate;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::time::{Duration, Instant};

/// Pair processor configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessorConfig {
    /// Fractional digits of every derived rate
    pub scale: i64,
    /// Dedicated worker count; `None` runs on rayon's global pool
    pub threads: Option<usize>,
    /// Abort units not yet started once this much time has passed
    pub deadline: Option<Duration>,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            scale: RATE_SCALE,
            threads: None,
            deadline: None,
        }
    }
}

/// Computes every cross rate between the targets of a rate collection
#[derive(Debug)]
pub struct PairProcessor {
    config: ProcessorConfig,
    pool: Option<ThreadPool>,
}

impl PairProcessor {
    /// Create a processor, building a dedicated pool if `config.threads` is set
    pub fn new(config: ProcessorConfig) -> Result<Self> {
        if config.scale < 0 {
            return Err(FxError::Config(format!(
                "Rate scale must not be negative, got: {}",
                config.scale
            )));
        }

        let pool = match config.threads {
            Some(0) => {
                return Err(FxError::Config(
                    "Worker thread count must be at least 1".to_string(),
                ))
            }
            Some(threads) => {
                log::debug!("Building pair worker pool with {} threads", threads);
                let pool = ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .thread_name(|i| format!("fx-pair-{}", i))
                    .build()
                    .map_err(|e| FxError::ThreadPool(e.to_string()))?;
                Some(pool)
            }
            None => None,
        };

        Ok(Self { config, pool })
    }

    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    /// Number of workers the units are spread over
    pub fn worker_count(&self) -> usize {
        match &self.pool {
            Some(pool) => pool.current_num_threads(),
            None => rayon::current_num_threads(),
        }
    }

    /// Compute all N² cross rates of `base_rates` into a new collection
    ///
    /// Blocks until every unit has finished. Fails with the first unit error,
    /// in which case no collection is returned.
    pub fn calculate_pairs(&self, base_rates: &RateCollection) -> Result<RateCollection> {
        self.calculate_pairs_with_cancel(base_rates, &CancellationToken::new())
    }

    /// Like [`calculate_pairs`](Self::calculate_pairs), aborting pending units once `token` is cancelled
    pub fn calculate_pairs_with_cancel(
        &self,
        base_rates: &RateCollection,
        token: &CancellationToken,
    ) -> Result<RateCollection> {
        let rates = base_rates.all_exchange_rates();
        let output = RateCollection::with_capacity(rates.len().saturating_mul(rates.len()));
        self.calculate_pairs_into(&rates, &output, token)?;
        Ok(output)
    }

    /// Compute all cross rates of `rates` into a caller-owned collection
    ///
    /// `output` only ever grows while this runs. On error it may hold some of
    /// the derived rates and must be discarded.
    pub fn calculate_pairs_into(
        &self,
        rates: &[Rate],
        output: &RateCollection,
        token: &CancellationToken,
    ) -> Result<()> {
        let n = rates.len();
        let units = n.checked_mul(n).ok_or_else(|| {
            FxError::Config(format!("Too many base rates for pairing: {}", n))
        })?;
        let token = match self.config.deadline {
            Some(deadline) => token.child_with_timeout(deadline),
            None => token.clone(),
        };

        log::info!(
            "Calculating {} cross rates from {} base rates on {} workers",
            units,
            n,
            self.worker_count()
        );
        let start = Instant::now();

        let scale = self.config.scale;
        let run = || {
            (0..units).into_par_iter().try_for_each(|unit| {
                if token.is_cancelled() {
                    return Err(FxError::Cancelled(format!(
                        "cross rate computation stopped before unit {} of {}",
                        unit, units
                    )));
                }

                let (from, to) = (&rates[unit / n], &rates[unit % n]);
                let derived = cross_rate(from, to, scale).map_err(|e| FxError::TaskFailed {
                    base: from.target_currency().to_string(),
                    target: to.target_currency().to_string(),
                    source: Box::new(e),
                })?;
                output.add_exchange_rate(derived);
                Ok(())
            })
        };

        let result = match &self.pool {
            Some(pool) => pool.install(run),
            None => run(),
        };

        match &result {
            Ok(()) => log::info!(
                "Calculated {} cross rates ({} unique pairs) in {:?}",
                units,
                output.len(),
                start.elapsed()
            ),
            Err(e) => log::warn!("Cross rate computation failed after {:?}: {}", start.elapsed(), e),
        }
        result
    }
}

impl Default for PairProcessor {
    fn default() -> Self {
        Self {
            config: ProcessorConfig::default(),
            pool: None,
        }
    }
}

/// Cross rate `from.target / to.target`, stamped now
///
/// With both rates quoted against the same base, `from.rate / to.rate` is the
/// price of one unit of `from.target` in `to.target`.
pub fn cross_rate(from: &Rate, to: &Rate, scale: i64) -> Result<Rate> {
    let value = divide_half_up(from.rate(), to.rate(), scale)?;
    Rate::new(from.target_currency(), to.target_currency(), value)
}
