//! Textual trade filters: parsing and predicate translation.
//!
//! This module provides:
//! - [`FilterExpression`]: the boolean filter AST (`And` / `Or` /
//!   `Comparison`)
//! - [`parse_query`]: an RSQL-subset parser producing the AST
//! - [`translate`]: the recursive translator turning the AST into a
//!   [`TradePredicate`]
//! - [`QueryError`]: parse and translation failures, all client errors
//!
//! The operator of a comparison is carried as its raw token; validation
//! against the supported set happens at translation, so an AST built
//! elsewhere with an unsupported operator fails with
//! [`QueryError::InvalidOperator`] rather than silently matching nothing.
//!
//! # Examples
//!
//! ```
//! use engine_query::{parse_query, translate};
//!
//! let ast = parse_query("counterparty.name==BigBank;version=ge=2").unwrap();
//! let predicate = translate(&ast).unwrap();
//! // predicate.test(&trade) evaluates the filter against a trade
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

mod ast;
mod error;
mod parser;
mod schema;
mod translate;

pub use ast::{Comparison, FilterExpression};
pub use error::QueryError;
pub use parser::parse_query;
pub use translate::{translate, TradePredicate};
