//! Trade lifecycle orchestration.
//!
//! This module provides:
//! - [`TradeLifecycleManager`]: create / amend / terminate / cancel /
//!   delete, plus ownership-scoped lookups
//! - [`contracts`]: the narrow persistence traits the manager consumes
//!   ([`TradeStore`], [`ReferenceDataSource`], [`PrivilegeSource`],
//!   [`SettlementInstructionStore`])
//! - [`EngineError`]: the error taxonomy surfaced to callers
//! - [`EngineConfig`]: policy flags loaded from TOML
//!
//! Every lifecycle operation validates and authorizes before mutating
//! state, then triggers cashflow generation. All operations are
//! synchronous; the only cross-request concern, two concurrent amendments
//! of one trade, is handled by committing the deactivate-old/insert-new
//! pair through a single store call with an optimistic version check.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod config;
pub mod contracts;
mod error;
mod manager;

pub use config::EngineConfig;
pub use contracts::{
    PrivilegeSource, ReferenceDataSource, SettlementInstructionStore, StoreError, TradeStore,
};
pub use error::EngineError;
pub use manager::TradeLifecycleManager;
