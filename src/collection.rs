//! Concurrent collection of exchange rates keyed by currency pair

use crate::currency::{CurrencyCode, CurrencyPair};
use crate::error::Result;
use crate::rate::Rate;
use crate::store::InsertOnceMap;

/// Rates keyed by `(base, target)`, first write wins
///
/// All methods take `&self`; the collection can be shared between threads
/// (e.g. behind an `Arc` or a scoped borrow) and written concurrently.
///
/// # Example
/// ```
/// use fx_crossrates::{Rate, RateCollection};
///
/// let rates = RateCollection::new();
/// rates.add_exchange_rate(Rate::parse("USD", "EUR", "0.92").unwrap());
/// rates.add_exchange_rate(Rate::parse("USD", "EUR", "0.95").unwrap());
///
/// assert_eq!(rates.len(), 1);
/// let eur = rates.get_exchange_rate_by_code("USD", "EUR").unwrap().unwrap();
/// assert_eq!(eur.rate().to_string(), "0.92");
/// ```
#[derive(Debug, Default)]
pub struct RateCollection {
    rates: InsertOnceMap<CurrencyPair, Rate>,
}

impl RateCollection {
    /// Create an empty collection
    pub fn new() -> Self {
        Self {
            rates: InsertOnceMap::new(),
        }
    }

    /// Create an empty collection sized for `capacity` rates
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            rates: InsertOnceMap::with_capacity(capacity),
        }
    }

    /// Build a collection from rates; earlier rates win over later ones with the same pair
    pub fn from_rates<I>(rates: I) -> Self
    where
        I: IntoIterator<Item = Rate>,
    {
        let collection = Self::new();
        for rate in rates {
            collection.add_exchange_rate(rate);
        }
        collection
    }

    /// Store `rate` unless its pair is already present
    pub fn add_exchange_rate(&self, rate: Rate) {
        self.insert_if_absent(rate);
    }

    /// Store `rate` unless its pair is already present, reporting whether it was stored
    pub fn insert_if_absent(&self, rate: Rate) -> bool {
        self.rates.insert_if_absent(rate.pair(), rate)
    }

    /// Look up the rate stored for exactly `base`/`target`
    pub fn get_exchange_rate(&self, base: CurrencyCode, target: CurrencyCode) -> Option<Rate> {
        self.rates.get(&CurrencyPair::new(base, target))
    }

    /// Look up by string codes, validating them first
    pub fn get_exchange_rate_by_code(&self, base: &str, target: &str) -> Result<Option<Rate>> {
        let base = CurrencyCode::new(base)?;
        let target = CurrencyCode::new(target)?;
        Ok(self.get_exchange_rate(base, target))
    }

    pub fn contains_pair(&self, pair: &CurrencyPair) -> bool {
        self.rates.contains_key(pair)
    }

    /// Point-in-time snapshot of every stored rate, in map iteration order
    pub fn all_exchange_rates(&self) -> Vec<Rate> {
        self.rates.values()
    }

    /// Number of stored rates
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl FromIterator<Rate> for RateCollection {
    fn from_iter<I: IntoIterator<Item = Rate>>(iter: I) -> Self {
        Self::from_rates(iter)
    }
}
