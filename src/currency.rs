//! Currency codes and currency pairs

use crate::error::{FxError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Three-letter currency code (ISO 4217 style, uppercase ASCII)
///
/// Codes are not checked against the ISO list: any three ASCII letters are
/// accepted, which is what the synthetic generator relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyCode([u8; 3]);

impl CurrencyCode {
    /// US Dollar, the base of every generated quote
    pub const USD: CurrencyCode = CurrencyCode(*b"USD");

    /// Parse and validate a currency code
    ///
    /// Lowercase letters are normalised to uppercase.
    pub fn new(code: &str) -> Result<Self> {
        let len = code.chars().count();
        if len != 3 {
            return Err(FxError::Validation(format!(
                "Currency code must be exactly 3 letters, got {:?} ({} characters)",
                code, len
            )));
        }
        if !code.bytes().all(|b| b.is_ascii_alphabetic()) {
            return Err(FxError::Validation(format!(
                "Currency code must contain ASCII letters only, got {:?}",
                code
            )));
        }

        let mut bytes = [0u8; 3];
        for (slot, b) in bytes.iter_mut().zip(code.bytes()) {
            *slot = b.to_ascii_uppercase();
        }
        Ok(CurrencyCode(bytes))
    }

    /// Build a code from three uppercase ASCII letters
    pub(crate) fn from_letters(letters: [u8; 3]) -> Self {
        debug_assert!(letters.iter().all(u8::is_ascii_uppercase));
        CurrencyCode(letters)
    }

    /// Get the code as a string slice
    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.0).unwrap_or_default()
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CurrencyCode {
    type Err = FxError;

    fn from_str(s: &str) -> Result<Self> {
        CurrencyCode::new(s)
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = FxError;

    fn try_from(value: String) -> Result<Self> {
        CurrencyCode::new(&value)
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.as_str().to_string()
    }
}

/// Currency pair, the key under which a rate is stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CurrencyPair {
    pub base: CurrencyCode,
    pub target: CurrencyCode,
}

impl CurrencyPair {
    /// Create new currency pair
    pub fn new(base: CurrencyCode, target: CurrencyCode) -> Self {
        Self { base, target }
    }

    /// Get the inverse pair
    pub fn inverse(&self) -> Self {
        Self {
            base: self.target,
            target: self.base,
        }
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.target)
    }
}
