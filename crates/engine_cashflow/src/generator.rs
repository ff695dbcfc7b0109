//! Cashflow generation from legs and date ranges.

use rust_decimal::{Decimal, RoundingStrategy};

use engine_core::{Cashflow, Date, LegKind, TradeLeg};

use crate::error::ScheduleError;
use crate::interval::ScheduleInterval;

/// Policy flags for cashflow generation.
///
/// Both flags default to the historically observed behaviour; they exist
/// so that deployments can opt into the stricter alternatives without a
/// code change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CashflowConfig {
    /// When true, a final stub payment is forced onto the maturity date if
    /// the regular roll leaves a gap before maturity. Default false: the
    /// last generated date may fall short of maturity.
    pub force_final_stub_to_maturity: bool,
    /// When true, a stored rate greater than 1 is read as percentage
    /// points and divided by 100; at most 1 it is read as a decimal
    /// fraction. Default true. Note the known limitation: a genuine rate
    /// above 100% cannot be expressed while this is on.
    pub percentage_rate_heuristic: bool,
}

impl Default for CashflowConfig {
    fn default() -> Self {
        Self {
            force_final_stub_to_maturity: false,
            percentage_rate_heuristic: true,
        }
    }
}

/// Generates the dated payment amounts for one leg of a trade.
///
/// Generation is pure: the same leg and date range always produce the
/// same flows, and nothing is persisted here. Cashflows are write-once;
/// an amendment regenerates flows for the new version instead of editing
/// the old ones.
#[derive(Clone, Debug, Default)]
pub struct CashflowGenerator {
    config: CashflowConfig,
}

impl CashflowGenerator {
    /// Creates a generator with the given policy flags.
    pub fn new(config: CashflowConfig) -> Self {
        Self { config }
    }

    /// Returns the active policy flags.
    pub fn config(&self) -> &CashflowConfig {
        &self.config
    }

    /// Generates all cashflows for `leg` between `start` and `maturity`.
    ///
    /// Payment dates run from `start + interval` in steps of the leg's
    /// schedule interval while they do not exceed `maturity`. Each flow
    /// carries the leg's rate, direction, and payment convention.
    ///
    /// # Errors
    ///
    /// [`ScheduleError::InvalidScheduleFormat`] when the leg carries a
    /// schedule that cannot be resolved. A leg with no schedule defaults
    /// to quarterly.
    pub fn generate(
        &self,
        leg: &TradeLeg,
        start: Date,
        maturity: Date,
    ) -> Result<Vec<Cashflow>, ScheduleError> {
        let interval = ScheduleInterval::resolve(leg.schedule.as_deref())?;
        let dates = self.payment_dates(start, maturity, interval)?;
        let value = self.payment_value(leg, interval);

        Ok(dates
            .into_iter()
            .map(|value_date| Cashflow {
                leg_id: leg.leg_id,
                value_date,
                payment_value: value,
                rate: leg.rate,
                pay_receive: leg.pay_receive,
                payment_bdc: leg.payment_bdc.clone(),
            })
            .collect())
    }

    /// Rolls payment dates forward from `start` until `maturity`.
    fn payment_dates(
        &self,
        start: Date,
        maturity: Date,
        interval: ScheduleInterval,
    ) -> Result<Vec<Date>, ScheduleError> {
        let mut dates = Vec::new();
        let mut current = start.add_months(interval.months())?;

        while current <= maturity {
            dates.push(current);
            current = current.add_months(interval.months())?;
        }

        if self.config.force_final_stub_to_maturity
            && dates.last().copied().unwrap_or(start) < maturity
        {
            dates.push(maturity);
        }

        Ok(dates)
    }

    /// Computes the per-period payment amount for the leg.
    ///
    /// Fixed legs pay `notional x rate x months/12`. Floating legs pay
    /// zero unless a concrete non-zero rate was supplied at generation
    /// time, since real floating payments depend on market fixings not
    /// modelled here. Legs with no kind recorded pay zero.
    fn payment_value(&self, leg: &TradeLeg, interval: ScheduleInterval) -> Decimal {
        let zero = Decimal::new(0, 2);

        let rate = match (leg.kind, leg.rate) {
            (Some(LegKind::Fixed), Some(rate)) => rate,
            (Some(LegKind::Floating), Some(rate)) if !rate.is_zero() => rate,
            _ => return zero,
        };

        // Guard against the historical 100x miscalculation: rates arrive
        // both as percentage points (3.5) and as fractions (0.035).
        let rate_decimal = if self.config.percentage_rate_heuristic && rate > Decimal::ONE {
            rate / Decimal::from(100)
        } else {
            rate
        };

        (leg.notional * rate_decimal * interval.year_fraction())
            .round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine_core::{LegId, LegSpec, PayReceive};
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn fixed_leg(notional: u64, rate: &str, schedule: &str) -> TradeLeg {
        TradeLeg::from_spec(
            LegId::new(1),
            &LegSpec {
                schedule: Some(schedule.into()),
                pay_receive: Some(PayReceive::Pay),
                payment_bdc: Some("MODIFIED_FOLLOWING".into()),
                ..LegSpec::fixed(Decimal::from(notional), rate.parse().unwrap())
            },
        )
    }

    #[test]
    fn test_fixed_quarterly_single_period() {
        // 10,000,000 at 3.5 quarterly over a 3-month-and-a-day window:
        // exactly one flow on 2025-04-01 worth 87,500.00.
        let generator = CashflowGenerator::default();
        let leg = fixed_leg(10_000_000, "3.5", "Quarterly");
        let flows = generator
            .generate(&leg, date(2025, 1, 1), date(2025, 4, 2))
            .unwrap();

        assert_eq!(flows.len(), 1);
        assert_eq!(flows[0].value_date, date(2025, 4, 1));
        assert_eq!(flows[0].payment_value.to_string(), "87500.00");
        assert_eq!(flows[0].pay_receive, Some(PayReceive::Pay));
        assert_eq!(flows[0].payment_bdc.as_deref(), Some("MODIFIED_FOLLOWING"));
    }

    #[test]
    fn test_monthly_full_year() {
        let generator = CashflowGenerator::default();
        let leg = fixed_leg(1_000_000, "2.0", "Monthly");
        let flows = generator
            .generate(&leg, date(2025, 1, 1), date(2026, 1, 1))
            .unwrap();

        assert_eq!(flows.len(), 12);
        assert_eq!(flows[0].value_date, date(2025, 2, 1));
        assert_eq!(flows[11].value_date, date(2026, 1, 1));
    }

    #[test]
    fn test_fraction_rate_matches_percentage_rate() {
        // 0.035 and 3.5 describe the same rate under the heuristic.
        let generator = CashflowGenerator::default();
        let as_percent = fixed_leg(10_000_000, "3.5", "Quarterly");
        let as_fraction = fixed_leg(10_000_000, "0.035", "Quarterly");

        let a = generator
            .generate(&as_percent, date(2025, 1, 1), date(2025, 4, 2))
            .unwrap();
        let b = generator
            .generate(&as_fraction, date(2025, 1, 1), date(2025, 4, 2))
            .unwrap();

        assert_eq!(a[0].payment_value, b[0].payment_value);
    }

    #[test]
    fn test_heuristic_disabled_takes_rate_verbatim() {
        let generator = CashflowGenerator::new(CashflowConfig {
            percentage_rate_heuristic: false,
            ..CashflowConfig::default()
        });
        let leg = fixed_leg(10_000_000, "3.5", "Quarterly");
        let flows = generator
            .generate(&leg, date(2025, 1, 1), date(2025, 4, 2))
            .unwrap();

        // 10,000,000 x 3.5 x 0.25 -- the raw rate, no division by 100.
        assert_eq!(flows[0].payment_value.to_string(), "8750000.00");
    }

    #[test]
    fn test_floating_without_rate_pays_zero() {
        let generator = CashflowGenerator::default();
        let leg = TradeLeg::from_spec(
            LegId::new(2),
            &LegSpec {
                schedule: Some("Quarterly".into()),
                ..LegSpec::floating(Decimal::from(10_000_000), "SONIA")
            },
        );
        let flows = generator
            .generate(&leg, date(2025, 1, 1), date(2026, 1, 1))
            .unwrap();

        assert_eq!(flows.len(), 4);
        assert!(flows.iter().all(|f| f.payment_value.is_zero()));
    }

    #[test]
    fn test_floating_with_fixing_computes_like_fixed() {
        let generator = CashflowGenerator::default();
        let mut spec = LegSpec::floating(Decimal::from(10_000_000), "SONIA");
        spec.schedule = Some("Quarterly".into());
        spec.rate = Some("3.5".parse().unwrap());
        let leg = TradeLeg::from_spec(LegId::new(2), &spec);

        let flows = generator
            .generate(&leg, date(2025, 1, 1), date(2025, 4, 2))
            .unwrap();
        assert_eq!(flows[0].payment_value.to_string(), "87500.00");
    }

    #[test]
    fn test_unknown_leg_kind_pays_zero() {
        let generator = CashflowGenerator::default();
        let leg = TradeLeg::from_spec(
            LegId::new(3),
            &LegSpec {
                notional: Decimal::from(1_000_000),
                rate: Some("3.5".parse().unwrap()),
                schedule: Some("Quarterly".into()),
                ..Default::default()
            },
        );
        let flows = generator
            .generate(&leg, date(2025, 1, 1), date(2026, 1, 1))
            .unwrap();
        assert!(flows.iter().all(|f| f.payment_value.is_zero()));
    }

    #[test]
    fn test_missing_schedule_defaults_to_quarterly() {
        let generator = CashflowGenerator::default();
        let leg = TradeLeg::from_spec(
            LegId::new(1),
            &LegSpec::fixed(Decimal::from(1_000_000), "2.5".parse().unwrap()),
        );
        let flows = generator
            .generate(&leg, date(2025, 1, 1), date(2026, 1, 1))
            .unwrap();
        assert_eq!(flows.len(), 4);
    }

    #[test]
    fn test_invalid_schedule_is_hard_failure() {
        let generator = CashflowGenerator::default();
        let leg = fixed_leg(1_000_000, "2.5", "fortnightly");
        let err = generator
            .generate(&leg, date(2025, 1, 1), date(2026, 1, 1))
            .unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidScheduleFormat { .. }));
    }

    #[test]
    fn test_no_stub_gap_by_default() {
        // Quarterly over 4.5 months: one regular flow, maturity not hit.
        let generator = CashflowGenerator::default();
        let leg = fixed_leg(1_000_000, "2.5", "Quarterly");
        let flows = generator
            .generate(&leg, date(2025, 1, 1), date(2025, 5, 15))
            .unwrap();

        assert_eq!(flows.len(), 1);
        assert_eq!(flows[0].value_date, date(2025, 4, 1));
    }

    #[test]
    fn test_forced_stub_lands_on_maturity() {
        let generator = CashflowGenerator::new(CashflowConfig {
            force_final_stub_to_maturity: true,
            ..CashflowConfig::default()
        });
        let leg = fixed_leg(1_000_000, "2.5", "Quarterly");
        let flows = generator
            .generate(&leg, date(2025, 1, 1), date(2025, 5, 15))
            .unwrap();

        assert_eq!(flows.len(), 2);
        assert_eq!(flows[1].value_date, date(2025, 5, 15));
    }

    #[test]
    fn test_range_shorter_than_interval_yields_nothing() {
        let generator = CashflowGenerator::default();
        let leg = fixed_leg(1_000_000, "2.5", "Annually");
        let flows = generator
            .generate(&leg, date(2025, 1, 1), date(2025, 6, 1))
            .unwrap();
        assert!(flows.is_empty());
    }

    #[test]
    fn test_banker_rounding_on_half_cent() {
        // 1,000 x 0.005 x 0.25 = 1.25 exactly; and
        // 1,000 x 0.0045 x 0.25 = 1.125 -> rounds to the even cent, 1.12.
        let generator = CashflowGenerator::default();
        let leg = fixed_leg(1_000, "0.0045", "Quarterly");
        let flows = generator
            .generate(&leg, date(2025, 1, 1), date(2025, 4, 2))
            .unwrap();
        assert_eq!(flows[0].payment_value.to_string(), "1.12");
    }

    proptest! {
        #[test]
        fn prop_monthly_flow_count_matches_month_span(months in 1u32..=48) {
            let generator = CashflowGenerator::default();
            let leg = fixed_leg(1_000_000, "2.0", "Monthly");
            let start = date(2024, 1, 15);
            let maturity = start.add_months(months).unwrap();

            let flows = generator.generate(&leg, start, maturity).unwrap();
            prop_assert_eq!(flows.len(), months as usize);
        }

        #[test]
        fn prop_dates_strictly_increase_and_stay_in_range(
            interval_months in 1u32..=12,
            span_months in 1u32..=60,
        ) {
            let generator = CashflowGenerator::default();
            let leg = TradeLeg::from_spec(
                LegId::new(1),
                &LegSpec {
                    schedule: Some(format!("{}M", interval_months)),
                    ..LegSpec::fixed(Decimal::from(1_000_000), "2.0".parse().unwrap())
                },
            );
            let start = date(2024, 1, 15);
            let maturity = start.add_months(span_months).unwrap();

            let flows = generator.generate(&leg, start, maturity).unwrap();
            for pair in flows.windows(2) {
                prop_assert!(pair[0].value_date < pair[1].value_date);
            }
            for flow in &flows {
                prop_assert!(flow.value_date > start);
                prop_assert!(flow.value_date <= maturity);
            }
        }
    }
}
