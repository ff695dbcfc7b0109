//! Trade date business rules.

use engine_core::{Date, TradeSpec};

/// Maximum allowed backdating of a trade, in days.
const MAX_BACKDATE_DAYS: i64 = 30;

/// Checks the date fields of a booking request.
///
/// Rules:
/// - trade date is required
/// - start and maturity dates are required once legs are supplied
/// - maturity must not precede start, start must not precede trade date
/// - the trade date must not be more than 30 days in the past
pub(crate) fn check(spec: &TradeSpec, today: Date) -> Vec<String> {
    let mut errors = Vec::new();

    if spec.trade_date.is_none() {
        errors.push("Trade date is required".to_string());
    }

    if !spec.legs.is_empty() {
        if spec.start_date.is_none() {
            errors.push("Start date is required".to_string());
        }
        if spec.maturity_date.is_none() {
            errors.push("Maturity date is required".to_string());
        }
    }

    if let (Some(start), Some(maturity)) = (spec.start_date, spec.maturity_date) {
        if maturity < start {
            errors.push("Maturity date cannot be before start date".to_string());
        }
    }

    if let (Some(trade_date), Some(start)) = (spec.trade_date, spec.start_date) {
        if start < trade_date {
            errors.push("Start date cannot be before trade date".to_string());
        }
    }

    if let Some(trade_date) = spec.trade_date {
        if today.days_since(trade_date) > MAX_BACKDATE_DAYS {
            errors.push("Trade date cannot be more than 30 days in the past".to_string());
        }
    }

    errors
}
