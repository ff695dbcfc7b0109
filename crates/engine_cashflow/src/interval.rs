//! Payment interval resolution.

use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::ScheduleError;

/// A payment interval in whole months, resolved from a leg's schedule text.
///
/// Named frequencies and the numeric `<n>M` suffix form are accepted,
/// case-insensitively. A leg with no schedule at all defaults to quarterly;
/// anything present but unrecognisable is rejected.
///
/// # Examples
///
/// ```
/// use engine_cashflow::ScheduleInterval;
///
/// assert_eq!(ScheduleInterval::resolve(Some("Monthly")).unwrap().months(), 1);
/// assert_eq!(ScheduleInterval::resolve(Some("12M")).unwrap().months(), 12);
/// assert_eq!(ScheduleInterval::resolve(None).unwrap().months(), 3);
/// assert!(ScheduleInterval::resolve(Some("fortnightly")).is_err());
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ScheduleInterval(u32);

impl ScheduleInterval {
    /// The default interval applied when a leg carries no schedule.
    pub const QUARTERLY: ScheduleInterval = ScheduleInterval(3);

    /// Resolves schedule text to an interval.
    ///
    /// Accepted forms:
    /// - `monthly` → 1, `quarterly` → 3,
    ///   `semi-annually` / `semiannually` / `half-yearly` → 6,
    ///   `annually` / `yearly` → 12
    /// - `<n>M` / `<n>m` → n months (e.g. `"12M"` → 12)
    /// - `None` or blank → quarterly default
    ///
    /// # Errors
    ///
    /// [`ScheduleError::InvalidScheduleFormat`] for any other text and
    /// [`ScheduleError::ZeroInterval`] for `"0M"`.
    pub fn resolve(schedule: Option<&str>) -> Result<Self, ScheduleError> {
        let text = match schedule {
            Some(s) if !s.trim().is_empty() => s.trim(),
            _ => return Ok(Self::QUARTERLY),
        };

        match text.to_lowercase().as_str() {
            "monthly" => Ok(ScheduleInterval(1)),
            "quarterly" => Ok(ScheduleInterval(3)),
            "semi-annually" | "semiannually" | "half-yearly" => Ok(ScheduleInterval(6)),
            "annually" | "yearly" => Ok(ScheduleInterval(12)),
            lower => {
                let Some(digits) = lower.strip_suffix('m') else {
                    return Err(ScheduleError::InvalidScheduleFormat {
                        input: text.to_string(),
                    });
                };
                let months: u32 =
                    digits
                        .parse()
                        .map_err(|_| ScheduleError::InvalidScheduleFormat {
                            input: text.to_string(),
                        })?;
                if months == 0 {
                    return Err(ScheduleError::ZeroInterval {
                        input: text.to_string(),
                    });
                }
                Ok(ScheduleInterval(months))
            }
        }
    }

    /// Returns the interval length in months.
    #[inline]
    pub fn months(&self) -> u32 {
        self.0
    }

    /// Returns the interval as a fraction of a year, 10 decimal places,
    /// banker's rounding (3 months → 0.25).
    pub fn year_fraction(&self) -> Decimal {
        (Decimal::from(self.0) / Decimal::from(12))
            .round_dp_with_strategy(10, RoundingStrategy::MidpointNearestEven)
    }
}

impl fmt::Display for ScheduleInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}M", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_named() {
        assert_eq!(ScheduleInterval::resolve(Some("monthly")).unwrap().months(), 1);
        assert_eq!(
            ScheduleInterval::resolve(Some("Quarterly")).unwrap().months(),
            3
        );
        assert_eq!(
            ScheduleInterval::resolve(Some("Semi-Annually"))
                .unwrap()
                .months(),
            6
        );
        assert_eq!(
            ScheduleInterval::resolve(Some("semiannually"))
                .unwrap()
                .months(),
            6
        );
        assert_eq!(
            ScheduleInterval::resolve(Some("half-yearly"))
                .unwrap()
                .months(),
            6
        );
        assert_eq!(
            ScheduleInterval::resolve(Some("Annually")).unwrap().months(),
            12
        );
        assert_eq!(ScheduleInterval::resolve(Some("yearly")).unwrap().months(), 12);
    }

    #[test]
    fn test_resolve_numeric_suffix() {
        assert_eq!(ScheduleInterval::resolve(Some("12M")).unwrap().months(), 12);
        assert_eq!(ScheduleInterval::resolve(Some("1m")).unwrap().months(), 1);
        assert_eq!(ScheduleInterval::resolve(Some(" 6M ")).unwrap().months(), 6);
    }

    #[test]
    fn test_resolve_default_when_absent() {
        assert_eq!(ScheduleInterval::resolve(None).unwrap(), ScheduleInterval::QUARTERLY);
        assert_eq!(
            ScheduleInterval::resolve(Some("  ")).unwrap(),
            ScheduleInterval::QUARTERLY
        );
    }

    #[test]
    fn test_resolve_invalid() {
        let err = ScheduleInterval::resolve(Some("fortnightly")).unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidScheduleFormat { .. }));
        assert!(ScheduleInterval::resolve(Some("xxM")).is_err());
        assert!(ScheduleInterval::resolve(Some("12W")).is_err());
    }

    #[test]
    fn test_resolve_zero_interval() {
        let err = ScheduleInterval::resolve(Some("0M")).unwrap_err();
        assert!(matches!(err, ScheduleError::ZeroInterval { .. }));
    }

    #[test]
    fn test_year_fraction() {
        let quarterly = ScheduleInterval::resolve(Some("quarterly")).unwrap();
        assert_eq!(quarterly.year_fraction().to_string(), "0.25");

        let monthly = ScheduleInterval::resolve(Some("monthly")).unwrap();
        assert_eq!(monthly.year_fraction().to_string(), "0.0833333333");
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", ScheduleInterval::QUARTERLY), "3M");
    }
}
