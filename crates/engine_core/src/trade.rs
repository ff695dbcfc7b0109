//! The trade aggregate: booking requests, persisted versions, legs, and
//! generated cashflows.
//!
//! A [`TradeSpec`] is what a caller submits; a [`Trade`] is a persisted
//! version row. The set of rows sharing one `TradeId` forms a version
//! chain in which only the highest version may be active.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use crate::currency::Currency;
use crate::ids::{LegId, TradeId, UserLogin};
use crate::reference::{AppUser, Book, Counterparty, EntityRef};
use crate::status::{LegKind, PayReceive, TradeStatus};
use crate::time::Date;

/// One side of a booking request.
///
/// Fields are optional where the validation pipeline, not the type system,
/// decides whether their absence is an error (a floating leg without an
/// index is invalid; a missing schedule merely defaults to quarterly).
#[derive(Clone, Debug, Default, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LegSpec {
    /// Principal amount the interest payments are computed on.
    pub notional: Decimal,
    /// Fixed rate or floating spread/fixing, if supplied.
    pub rate: Option<Decimal>,
    /// FIXED or FLOATING.
    pub kind: Option<LegKind>,
    /// Direction of the leg's payments.
    pub pay_receive: Option<PayReceive>,
    /// Settlement currency of the leg.
    pub currency: Option<Currency>,
    /// Payment frequency text ("Quarterly", "12M", ...).
    pub schedule: Option<String>,
    /// Floating-rate index name; required for floating legs.
    pub index: Option<String>,
    /// Leg-level maturity; both legs must agree.
    pub maturity_date: Option<Date>,
    /// Payment business-day convention reference name.
    pub payment_bdc: Option<String>,
    /// Fixing business-day convention reference name.
    pub fixing_bdc: Option<String>,
}

impl LegSpec {
    /// Convenience constructor for a fixed leg.
    pub fn fixed(notional: Decimal, rate: Decimal) -> Self {
        Self {
            notional,
            rate: Some(rate),
            kind: Some(LegKind::Fixed),
            ..Default::default()
        }
    }

    /// Convenience constructor for a floating leg fixed against `index`.
    pub fn floating(notional: Decimal, index: impl Into<String>) -> Self {
        Self {
            notional,
            kind: Some(LegKind::Floating),
            index: Some(index.into()),
            ..Default::default()
        }
    }
}

/// A booking request, as submitted by the calling layer.
///
/// References to books, counterparties, and users arrive as id-or-name
/// [`EntityRef`]s and are resolved against the reference-data source
/// during validation and persistence.
#[derive(Clone, Debug, Default, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TradeSpec {
    /// Business id; assigned sequentially when absent.
    pub trade_id: Option<TradeId>,
    /// Date the trade was agreed.
    pub trade_date: Option<Date>,
    /// Accrual start date.
    pub start_date: Option<Date>,
    /// Final maturity date.
    pub maturity_date: Option<Date>,
    /// Execution timestamp date, when captured separately.
    pub execution_date: Option<Date>,
    /// Unique transaction identifier for regulatory reporting.
    pub uti_code: Option<String>,
    /// Owning book.
    pub book: EntityRef,
    /// Counterparty.
    pub counterparty: EntityRef,
    /// Owning trader.
    pub trader: EntityRef,
    /// User who keyed the trade, when different from the trader.
    pub inputter: EntityRef,
    /// Optional free-text settlement instructions.
    pub settlement_instructions: Option<String>,
    /// The trade's legs; a valid trade carries exactly two.
    pub legs: Vec<LegSpec>,
}

/// A persisted leg of a trade version.
#[derive(Clone, Debug, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct TradeLeg {
    /// Identifier of this leg row.
    pub leg_id: LegId,
    /// Principal amount.
    pub notional: Decimal,
    /// Stored rate (percentage points or decimal fraction).
    pub rate: Option<Decimal>,
    /// FIXED or FLOATING.
    pub kind: Option<LegKind>,
    /// Direction of the leg's payments.
    pub pay_receive: Option<PayReceive>,
    /// Settlement currency.
    pub currency: Option<Currency>,
    /// Payment frequency text.
    pub schedule: Option<String>,
    /// Floating-rate index name.
    pub index: Option<String>,
    /// Payment business-day convention reference name.
    pub payment_bdc: Option<String>,
    /// Fixing business-day convention reference name.
    pub fixing_bdc: Option<String>,
}

impl TradeLeg {
    /// Builds a persisted leg from a request leg.
    pub fn from_spec(leg_id: LegId, spec: &LegSpec) -> Self {
        Self {
            leg_id,
            notional: spec.notional,
            rate: spec.rate,
            kind: spec.kind,
            pay_receive: spec.pay_receive,
            currency: spec.currency,
            schedule: spec.schedule.clone(),
            index: spec.index.clone(),
            payment_bdc: spec.payment_bdc.clone(),
            fixing_bdc: spec.fixing_bdc.clone(),
        }
    }
}

/// One version row of a booked trade.
///
/// # Invariants
///
/// - At most one row per `trade_id` has `active == true`.
/// - The active row carries the highest `version` of its chain.
/// - Amendment deactivates the current row and inserts `version + 1`;
///   terminate and cancel mutate status on the same version.
#[derive(Clone, Debug, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Trade {
    /// Business id, shared by every version of this trade.
    pub trade_id: TradeId,
    /// Version counter, starting at 1.
    pub version: u32,
    /// Whether this row is the current version.
    pub active: bool,
    /// Lifecycle status of this version.
    pub status: TradeStatus,
    /// Date the trade was agreed.
    pub trade_date: Date,
    /// Accrual start date.
    pub start_date: Option<Date>,
    /// Final maturity date.
    pub maturity_date: Option<Date>,
    /// Execution date, when captured.
    pub execution_date: Option<Date>,
    /// Unique transaction identifier.
    pub uti_code: Option<String>,
    /// Owning book.
    pub book: Book,
    /// Counterparty.
    pub counterparty: Counterparty,
    /// Owning trader; historical rows may be ownerless.
    pub trader: Option<AppUser>,
    /// User who keyed the trade.
    pub inputter: Option<AppUser>,
    /// The trade's legs.
    pub legs: Vec<TradeLeg>,
    /// When this version row was created.
    pub created_at: NaiveDateTime,
    /// Last lifecycle touch (status change or amendment).
    pub last_touched: NaiveDateTime,
    /// When an amendment superseded this row, if ever.
    pub deactivated_at: Option<NaiveDateTime>,
}

impl Trade {
    /// Returns the owning trader's login, if an owner is recorded.
    pub fn owner_login(&self) -> Option<&UserLogin> {
        self.trader.as_ref().map(|u| &u.login_id)
    }

    /// Case-insensitive ownership check against a caller login.
    pub fn is_owned_by(&self, login: &str) -> bool {
        self.owner_login().is_some_and(|owner| owner.matches(login))
    }
}

/// A single dated payment derived from a leg.
///
/// Cashflows are write-once artifacts of generation: an amendment
/// regenerates flows for the new version rather than mutating these.
#[derive(Clone, Debug, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Cashflow {
    /// The leg this flow was generated from.
    pub leg_id: LegId,
    /// Payment date.
    pub value_date: Date,
    /// Payment amount, 2 decimal places, banker's rounding.
    pub payment_value: Decimal,
    /// Rate the amount was computed with, copied from the leg.
    pub rate: Option<Decimal>,
    /// Direction, copied from the leg.
    pub pay_receive: Option<PayReceive>,
    /// Payment business-day convention, copied from the leg.
    pub payment_bdc: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_trade(trader: Option<AppUser>) -> Trade {
        let now = chrono::NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        Trade {
            trade_id: TradeId::new(10000),
            version: 1,
            active: true,
            status: TradeStatus::New,
            trade_date: Date::from_ymd(2025, 1, 1).unwrap(),
            start_date: Some(Date::from_ymd(2025, 1, 1).unwrap()),
            maturity_date: Some(Date::from_ymd(2026, 1, 1).unwrap()),
            execution_date: None,
            uti_code: None,
            book: Book {
                id: 1,
                name: "RATES-1".into(),
                active: true,
            },
            counterparty: Counterparty {
                id: 1,
                name: "BigBank".into(),
                active: true,
            },
            trader,
            inputter: None,
            legs: vec![],
            created_at: now,
            last_touched: now,
            deactivated_at: None,
        }
    }

    #[test]
    fn test_leg_spec_fixed() {
        let leg = LegSpec::fixed(Decimal::from(1_000_000), "3.5".parse().unwrap());
        assert_eq!(leg.kind, Some(LegKind::Fixed));
        assert_eq!(leg.rate, Some("3.5".parse().unwrap()));
        assert!(leg.index.is_none());
    }

    #[test]
    fn test_leg_spec_floating() {
        let leg = LegSpec::floating(Decimal::from(1_000_000), "SONIA");
        assert_eq!(leg.kind, Some(LegKind::Floating));
        assert_eq!(leg.index.as_deref(), Some("SONIA"));
        assert!(leg.rate.is_none());
    }

    #[test]
    fn test_trade_leg_from_spec() {
        let spec = LegSpec {
            schedule: Some("Quarterly".into()),
            pay_receive: Some(PayReceive::Pay),
            ..LegSpec::fixed(Decimal::from(500), Decimal::ONE)
        };
        let leg = TradeLeg::from_spec(LegId::new(1), &spec);
        assert_eq!(leg.leg_id, LegId::new(1));
        assert_eq!(leg.schedule.as_deref(), Some("Quarterly"));
        assert_eq!(leg.pay_receive, Some(PayReceive::Pay));
    }

    #[test]
    fn test_ownership_with_owner() {
        let trade = sample_trade(Some(AppUser {
            id: 9,
            login_id: UserLogin::new("jsmith"),
            first_name: "Jane".into(),
            active: true,
        }));
        assert!(trade.is_owned_by("jsmith"));
        assert!(trade.is_owned_by("JSMITH"));
        assert!(!trade.is_owned_by("jdoe"));
    }

    #[test]
    fn test_ownership_without_owner() {
        let trade = sample_trade(None);
        assert!(trade.owner_login().is_none());
        assert!(!trade.is_owned_by("anyone"));
    }
}
