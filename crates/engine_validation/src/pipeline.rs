//! The fixed-order validation pipeline.

use engine_core::{Date, TradeSpec};

use crate::entities::EntityLookup;
use crate::result::ValidationResult;
use crate::{dates, entities, legs, settlement};

/// Runs every business-rule check over a booking request.
///
/// Checks run in a fixed order (dates, legs, entity references,
/// settlement text) and all contribute to one result; a date violation
/// does not hide a leg violation. Business-rule failures never panic or
/// return `Err`; only a missing collaborator is a programming error.
#[derive(Clone, Debug, Default)]
pub struct TradeValidator;

impl TradeValidator {
    /// Creates the pipeline.
    pub fn new() -> Self {
        Self
    }

    /// Validates a booking request as of `today`.
    ///
    /// `today` is passed explicitly so the 30-day backdating rule is
    /// deterministic under test; production callers pass [`Date::today`].
    pub fn validate(
        &self,
        spec: &TradeSpec,
        today: Date,
        lookup: &dyn EntityLookup,
    ) -> ValidationResult {
        let errors = [
            dates::check(spec, today),
            legs::check(spec),
            entities::check(spec, lookup),
            settlement::validate_settlement_text(spec.settlement_instructions.as_deref()),
        ]
        .into_iter()
        .flatten()
        .collect();

        ValidationResult::from_errors(errors)
    }
}
