//! Monetary input parsing and minor-unit conversion.
//!
//! Amounts arrive in major units (rupees) as either a JSON number or a
//! string. They are converted to minor units (paise) by multiplying by 100
//! and rounding half away from zero. The multiplication happens in binary
//! floating point, so `1.005` becomes `100` rather than `101`; the same
//! input always yields the same minor amount.

use serde::Deserialize;
use std::fmt;
use thiserror::Error;

/// Minor units per major unit (paise per rupee).
pub const MINOR_UNITS_PER_MAJOR: u64 = 100;

/// Largest minor amount that survives the f64 round trip exactly (2^53 - 1).
pub const MAX_MINOR_AMOUNT: u64 = 9_007_199_254_740_991;

/// First minor amount past the exact range (2^53), exactly representable.
const MINOR_AMOUNT_LIMIT: f64 = 9_007_199_254_740_992.0;

/// Amount exactly as the client sent it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawAmount {
    Number(f64),
    Text(String),
    /// Anything else: null, booleans, arrays, objects.
    Other(serde_json::Value),
}

impl Default for RawAmount {
    fn default() -> Self {
        RawAmount::Other(serde_json::Value::Null)
    }
}

impl From<f64> for RawAmount {
    fn from(value: f64) -> Self {
        RawAmount::Number(value)
    }
}

impl From<&str> for RawAmount {
    fn from(value: &str) -> Self {
        RawAmount::Text(value.to_string())
    }
}

/// Why an amount was rejected. Never shown to clients.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("amount is not a number")]
    NotANumber,

    #[error("amount is not finite")]
    NotFinite,

    #[error("amount must be greater than zero")]
    NotPositive,

    #[error("amount exceeds the largest supported value")]
    TooLarge,
}

/// A validated, finite, strictly positive amount in major units.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Amount(f64);

impl Amount {
    pub fn parse(raw: &RawAmount) -> Result<Self, AmountError> {
        let value = match raw {
            RawAmount::Number(n) => *n,
            RawAmount::Text(s) => s.trim().parse::<f64>().map_err(|_| AmountError::NotANumber)?,
            RawAmount::Other(_) => return Err(AmountError::NotANumber),
        };
        Self::new(value)
    }

    pub fn new(value: f64) -> Result<Self, AmountError> {
        if !value.is_finite() {
            return Err(AmountError::NotFinite);
        }
        if value <= 0.0 {
            return Err(AmountError::NotPositive);
        }
        if scale(value) >= MINOR_AMOUNT_LIMIT {
            return Err(AmountError::TooLarge);
        }
        Ok(Self(value))
    }

    pub fn major(&self) -> f64 {
        self.0
    }

    pub fn to_minor(&self) -> MinorAmount {
        // Bounded by `new`, so the cast cannot saturate.
        MinorAmount(scale(self.0) as u64)
    }
}

fn scale(major: f64) -> f64 {
    (major * MINOR_UNITS_PER_MAJOR as f64).round()
}

/// Integer amount in the currency's smallest unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MinorAmount(u64);

impl MinorAmount {
    pub fn value(&self) -> u64 {
        self.0
    }

    pub fn to_major(&self) -> f64 {
        self.0 as f64 / MINOR_UNITS_PER_MAJOR as f64
    }
}

impl fmt::Display for MinorAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
