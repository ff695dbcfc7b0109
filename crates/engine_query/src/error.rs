//! Query parsing and translation error types.
//!
//! All of these are client-input errors: the caller sent a malformed or
//! unsupported filter, never a server fault.

use thiserror::Error;

/// Errors from parsing or translating a trade filter.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// The filter text could not be parsed into an AST.
    #[error("Malformed query at position {position}: {message}")]
    Parse {
        /// Character offset of the failure in the input.
        position: usize,
        /// What the parser expected.
        message: String,
    },

    /// A comparison used an operator outside the supported set.
    #[error("Unsupported operator: {operator}")]
    InvalidOperator {
        /// The rejected operator token.
        operator: String,
    },

    /// A field path did not resolve against the trade schema.
    #[error("Invalid field in query: {field}")]
    UnknownField {
        /// The rejected field path.
        field: String,
    },

    /// A comparison value could not be coerced to the field's type.
    #[error("Invalid value '{value}' for field {field}")]
    InvalidValue {
        /// The rejected literal.
        value: String,
        /// The field it was compared against.
        field: String,
    },

    /// The operator cannot apply to the field's type (e.g. a wildcard
    /// match against a numeric field).
    #[error("Operator {operator} cannot be applied to field {field}")]
    TypeMismatch {
        /// The operator token.
        operator: String,
        /// The field path.
        field: String,
    },
}
