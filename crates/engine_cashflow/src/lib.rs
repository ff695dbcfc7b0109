//! Cashflow schedule generation.
//!
//! This module provides:
//! - [`ScheduleInterval`]: a payment interval in whole months, resolved
//!   from the free-text schedule carried on a leg
//! - [`CashflowGenerator`]: turns a leg and a date range into a sequence
//!   of dated payment amounts
//! - [`CashflowConfig`]: policy flags for stub handling and the
//!   percentage-rate heuristic
//! - [`ScheduleError`]: failures from schedule resolution
//!
//! # Examples
//!
//! ```
//! use engine_cashflow::{CashflowConfig, CashflowGenerator};
//! use engine_core::{Date, LegId, LegSpec, TradeLeg};
//! use rust_decimal::Decimal;
//!
//! let leg = TradeLeg::from_spec(
//!     LegId::new(1),
//!     &LegSpec {
//!         schedule: Some("Quarterly".into()),
//!         ..LegSpec::fixed(Decimal::from(10_000_000), "3.5".parse().unwrap())
//!     },
//! );
//!
//! let generator = CashflowGenerator::new(CashflowConfig::default());
//! let flows = generator
//!     .generate(
//!         &leg,
//!         Date::from_ymd(2025, 1, 1).unwrap(),
//!         Date::from_ymd(2026, 1, 1).unwrap(),
//!     )
//!     .unwrap();
//!
//! assert_eq!(flows.len(), 4);
//! assert_eq!(flows[0].payment_value.to_string(), "87500.00");
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

mod error;
mod generator;
mod interval;

pub use error::ScheduleError;
pub use generator::{CashflowConfig, CashflowGenerator};
pub use interval::ScheduleInterval;
