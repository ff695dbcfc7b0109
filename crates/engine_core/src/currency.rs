//! Currency codes for booked trades.
//!
//! # Examples
//!
//! ```
//! use engine_core::currency::Currency;
//!
//! let usd: Currency = "usd".parse().unwrap();
//! assert_eq!(usd, Currency::USD);
//! assert_eq!(usd.code(), "USD");
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::ParseEnumError;

/// ISO 4217 currency codes accepted by the booking engine.
///
/// The engine books single-currency legs; cross-currency conversion is out
/// of scope, so only the code itself is carried.
#[non_exhaustive]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
pub enum Currency {
    /// United States Dollar.
    USD,
    /// Euro.
    EUR,
    /// British Pound Sterling.
    GBP,
    /// Japanese Yen.
    JPY,
    /// Swiss Franc.
    CHF,
}

impl Currency {
    /// Returns the ISO 4217 three-letter code.
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::JPY => "JPY",
            Currency::CHF => "CHF",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Currency {
    type Err = ParseEnumError;

    /// Parses a currency code (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "USD" => Ok(Currency::USD),
            "EUR" => Ok(Currency::EUR),
            "GBP" => Ok(Currency::GBP),
            "JPY" => Ok(Currency::JPY),
            "CHF" => Ok(Currency::CHF),
            _ => Err(ParseEnumError::new("currency", s)),
        }
    }
}
