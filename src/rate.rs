//! Exchange rate value type

use crate::currency::{CurrencyCode, CurrencyPair};
use crate::error::{FxError, Result};
use bigdecimal::BigDecimal;
use chrono::Utc;
use num_traits::Zero;
use serde::Serialize;
use std::fmt;

/// Milliseconds since the Unix epoch
pub type TimestampMillis = i64;

/// Immutable quote: 1 unit of `base_currency` buys `rate` units of `target_currency`
///
/// The constructor enforces the invariants, so a `Rate` always carries two
/// valid codes and a strictly positive rate. There are no setters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Rate {
    base_currency: CurrencyCode,
    target_currency: CurrencyCode,
    rate: BigDecimal,
    timestamp: TimestampMillis,
}

impl Rate {
    /// Create a rate stamped with the current time
    pub fn new(base_currency: CurrencyCode, target_currency: CurrencyCode, rate: BigDecimal) -> Result<Self> {
        Self::with_timestamp(base_currency, target_currency, rate, now_millis())
    }

    /// Create a rate with an explicit timestamp
    pub fn with_timestamp(
        base_currency: CurrencyCode,
        target_currency: CurrencyCode,
        rate: BigDecimal,
        timestamp: TimestampMillis,
    ) -> Result<Self> {
        if rate <= BigDecimal::zero() {
            return Err(FxError::Validation(format!(
                "Exchange rate {}/{} must be positive, got: {}",
                base_currency, target_currency, rate
            )));
        }

        Ok(Self {
            base_currency,
            target_currency,
            rate,
            timestamp,
        })
    }

    /// Parse codes and rate from strings, e.g. `Rate::parse("USD", "EUR", "0.92")`
    pub fn parse(base_currency: &str, target_currency: &str, rate: &str) -> Result<Self> {
        let rate: BigDecimal = rate
            .parse()
            .map_err(|e| FxError::Validation(format!("Invalid rate {:?}: {}", rate, e)))?;
        Self::new(
            CurrencyCode::new(base_currency)?,
            CurrencyCode::new(target_currency)?,
            rate,
        )
    }

    pub fn base_currency(&self) -> CurrencyCode {
        self.base_currency
    }

    pub fn target_currency(&self) -> CurrencyCode {
        self.target_currency
    }

    pub fn rate(&self) -> &BigDecimal {
        &self.rate
    }

    pub fn timestamp(&self) -> TimestampMillis {
        self.timestamp
    }

    /// Key this rate is stored under
    pub fn pair(&self) -> CurrencyPair {
        CurrencyPair::new(self.base_currency, self.target_currency)
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ExchangeRate{{baseCurrency='{}', targetCurrency='{}', rate={}, timestamp={}}}",
            self.base_currency, self.target_currency, self.rate, self.timestamp
        )
    }
}

/// Current wall-clock time in milliseconds
pub fn now_millis() -> TimestampMillis {
    Utc::now().timestamp_millis()
}
