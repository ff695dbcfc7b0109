//! The engine's error taxonomy.

use engine_cashflow::ScheduleError;
use engine_core::TradeId;
use engine_query::QueryError;
use thiserror::Error;

use crate::contracts::StoreError;

/// Errors surfaced by lifecycle operations.
///
/// `Forbidden` is deliberately distinct from `NotFound` so callers can
/// tell "doesn't exist" from "exists but you may not touch it". Nothing
/// here is retried automatically; every failure surfaces synchronously.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// One or more business rules failed; all messages are returned
    /// together so the caller can correct the request in one pass.
    #[error("Validation failed: {}", .0.join("; "))]
    ValidationFailed(Vec<String>),

    /// The caller is not authorized for the requested action.
    #[error("{0}")]
    Forbidden(String),

    /// No active version exists for the business id.
    #[error("Trade not found: {0}")]
    NotFound(TradeId),

    /// A required reference lookup (book, counterparty, status) failed to
    /// resolve. A configuration or data problem, surfaced rather than
    /// silently defaulted.
    #[error("Reference data missing: {0}")]
    ReferenceDataMissing(String),

    /// A concurrent amendment won the race; the caller should reload the
    /// trade and retry.
    #[error("Stale amendment for trade {trade_id}: active version is no longer {expected}")]
    StaleAmendment {
        /// The contested trade.
        trade_id: TradeId,
        /// The version the losing amendment was based on.
        expected: u32,
    },

    /// A leg carried an unresolvable payment schedule.
    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    /// A trade filter failed to parse or translate.
    #[error(transparent)]
    Query(#[from] QueryError),
}

impl From<StoreError> for EngineError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::StaleAmendment { trade_id, expected } => {
                EngineError::StaleAmendment { trade_id, expected }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_failed_joins_messages() {
        let err = EngineError::ValidationFailed(vec![
            "Trade date is required".into(),
            "Book not found".into(),
        ]);
        assert_eq!(
            err.to_string(),
            "Validation failed: Trade date is required; Book not found"
        );
    }

    #[test]
    fn test_not_found_display() {
        let err = EngineError::NotFound(TradeId::new(10042));
        assert_eq!(err.to_string(), "Trade not found: 10042");
    }

    #[test]
    fn test_store_error_conversion() {
        let err: EngineError = StoreError::StaleAmendment {
            trade_id: TradeId::new(10000),
            expected: 3,
        }
        .into();
        assert!(matches!(err, EngineError::StaleAmendment { expected: 3, .. }));
    }
}
