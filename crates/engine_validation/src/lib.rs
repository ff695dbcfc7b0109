//! Business-rule validation for booking requests.
//!
//! This module provides:
//! - [`ValidationResult`]: accumulated outcome of one validation run
//! - [`TradeValidator`]: the fixed-order pipeline of independent checks
//! - [`EntityLookup`]: the seam through which reference data is resolved
//!
//! The pipeline never short-circuits between check groups: every violation
//! surfaces in one pass so the caller can fix them all at once. Each check
//! group returns its own error list and the pipeline folds the lists
//! together; no shared mutable accumulator is threaded through.
//!
//! # Examples
//!
//! ```
//! use engine_core::{Date, TradeSpec};
//! use engine_validation::{EntityLookup, TradeValidator};
//! # use engine_core::{AppUser, Book, Counterparty, EntityRef};
//! # struct NoRefs;
//! # impl EntityLookup for NoRefs {
//! #     fn book(&self, _: &EntityRef) -> Option<Book> { None }
//! #     fn counterparty(&self, _: &EntityRef) -> Option<Counterparty> { None }
//! #     fn user(&self, _: &EntityRef) -> Option<AppUser> { None }
//! # }
//!
//! let validator = TradeValidator::new();
//! let result = validator.validate(
//!     &TradeSpec::default(),
//!     Date::from_ymd(2025, 1, 1).unwrap(),
//!     &NoRefs,
//! );
//!
//! assert!(!result.valid());
//! assert!(result.errors().iter().any(|e| e.contains("Trade date is required")));
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

mod dates;
mod entities;
mod legs;
mod pipeline;
mod result;
mod settlement;

pub use entities::EntityLookup;
pub use pipeline::TradeValidator;
pub use result::ValidationResult;
pub use settlement::validate_settlement_text;
