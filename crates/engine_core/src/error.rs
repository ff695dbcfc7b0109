//! Error types for the domain model layer.

use thiserror::Error;

/// Errors from date construction and parsing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DateError {
    /// Invalid date components (e.g. February 30th).
    #[error("Invalid date: {year}-{month}-{day}")]
    InvalidDate {
        /// Year component.
        year: i32,
        /// Month component (1-12).
        month: u32,
        /// Day component (1-31).
        day: u32,
    },

    /// Failed to parse an ISO 8601 date string.
    #[error("Date parse error: {0}")]
    ParseError(String),

    /// Date arithmetic left the representable range.
    #[error("Date arithmetic overflow: {reason}")]
    Overflow {
        /// Reason for the overflow.
        reason: String,
    },
}

/// Error from parsing a domain enumeration out of text.
///
/// Produced by the `FromStr` implementations of [`crate::TradeStatus`],
/// [`crate::PayReceive`], [`crate::LegKind`], and [`crate::Currency`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unknown {kind}: {value}")]
pub struct ParseEnumError {
    /// The enumeration being parsed (e.g. "trade status").
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

impl ParseEnumError {
    /// Creates a parse error for the named enumeration kind.
    pub fn new(kind: &'static str, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}
