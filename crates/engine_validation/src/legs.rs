//! Leg-pairing business rules.

use engine_core::{LegKind, LegSpec, TradeSpec};
use rust_decimal::Decimal;

/// Upper bound on a plausible fixed rate in percentage points.
const MAX_FIXED_RATE: i64 = 100;

/// Maximum decimal precision accepted on a fixed rate.
const MAX_RATE_SCALE: u32 = 4;

/// Checks the legs of a booking request.
///
/// A trade must carry exactly two legs; the pairing rules (identical
/// maturities, opposite directions) only apply once two legs are present.
pub(crate) fn check(spec: &TradeSpec) -> Vec<String> {
    let mut errors = Vec::new();

    if spec.legs.len() != 2 {
        errors.push("Trade must have exactly 2 legs".to_string());
    }
    if spec.legs.len() < 2 {
        return errors;
    }

    let leg1 = &spec.legs[0];
    let leg2 = &spec.legs[1];

    match (leg1.maturity_date, leg2.maturity_date) {
        (Some(m1), Some(m2)) if m1 != m2 => {
            errors.push("Both legs must have identical maturity dates".to_string());
        }
        (Some(_), Some(_)) => {}
        _ => errors.push("Both legs must have a maturity date defined".to_string()),
    }

    match (leg1.pay_receive, leg2.pay_receive) {
        (Some(p1), Some(p2)) if p1 == p2 => {
            errors.push("Legs must have opposite pay/receive flags".to_string());
        }
        (Some(_), Some(_)) => {}
        _ => errors.push("Both legs must have a pay/receive flag defined".to_string()),
    }

    for leg in &spec.legs {
        errors.extend(check_index(leg));
        errors.extend(check_rate(leg));
    }

    errors
}

/// A floating leg must name the index its rate fixes against.
fn check_index(leg: &LegSpec) -> Vec<String> {
    if leg.kind == Some(LegKind::Floating)
        && leg.index.as_deref().map_or(true, |i| i.trim().is_empty())
    {
        return vec!["Floating leg must specify an index".to_string()];
    }
    vec![]
}

/// Rate plausibility rules per leg kind.
///
/// Fixed legs need a positive rate of bounded size and precision. Floating
/// legs are lax: their rate is usually absent until a fixing is known. A
/// leg with no kind recorded only rejects negative rates.
fn check_rate(leg: &LegSpec) -> Vec<String> {
    match leg.kind {
        Some(LegKind::Fixed) => {
            let Some(rate) = leg.rate else {
                return vec!["Fixed leg must specify a rate".to_string()];
            };
            if rate <= Decimal::ZERO {
                return vec!["Fixed leg rate must be positive".to_string()];
            }
            if rate > Decimal::from(MAX_FIXED_RATE) {
                return vec!["Fixed leg rate must not exceed 100".to_string()];
            }
            if rate.normalize().scale() > MAX_RATE_SCALE {
                return vec![
                    "Fixed leg rate must not have more than 4 decimal places".to_string()
                ];
            }
            vec![]
        }
        Some(LegKind::Floating) => vec![],
        None => match leg.rate {
            Some(rate) if rate < Decimal::ZERO => {
                vec!["Leg rate cannot be negative".to_string()]
            }
            _ => vec![],
        },
    }
}
