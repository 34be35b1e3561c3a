//! # fx_crossrates
//!
//! Concurrent all-pairs FX cross-rate computation.
//!
//! A set of rates quoted against one base currency is expanded into every
//! cross rate between the quoted currencies (`target_i / target_j`), computed
//! in parallel into a shared first-write-wins collection. The crate doubles as
//! a load benchmark: [`benchmark::run_benchmark`] generates a random dataset,
//! processes it and times both phases.
//!
//! ## Example
//!
//! ```rust
//! use fx_crossrates::prelude::*;
//!
//! let generator = RateGenerator::new(GeneratorConfig {
//!     count: 50,
//!     seed: Some(7),
//!     ..GeneratorConfig::default()
//! })?;
//! let base_rates = generator.fetch_rates()?;
//!
//! let all_rates = PairProcessor::default().calculate_pairs(&base_rates)?;
//! assert_eq!(all_rates.len(), 50 * 50);
//! # Ok::<(), FxError>(())
//! ```

pub mod benchmark;
pub mod cancel;
pub mod collection;
pub mod currency;
pub mod decimal;
pub mod error;
pub mod generator;
pub mod processor;
pub mod rate;
pub mod store;

pub use collection::RateCollection;
pub use processor::PairProcessor;
pub use rate::Rate;

pub mod prelude {
    //! Commonly used types and traits
    pub use crate::benchmark::{run_benchmark, BenchmarkConfig, BenchmarkReport};
    pub use crate::cancel::CancellationToken;
    pub use crate::collection::RateCollection;
    pub use crate::currency::{CurrencyCode, CurrencyPair};
    pub use crate::decimal::RATE_SCALE;
    pub use crate::error::{FxError, Result};
    pub use crate::generator::{GeneratorConfig, RateGenerator};
    pub use crate::processor::{PairProcessor, ProcessorConfig};
    pub use crate::rate::Rate;
}
