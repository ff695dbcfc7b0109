//! Authorization decisions for trade lifecycle actions.
//!
//! This module provides:
//! - [`Action`] and [`Role`]: the vocabulary of the decision
//! - [`AuthorizationContext`]: caller identity, roles, and privileges,
//!   built per call and threaded explicitly through every lifecycle
//!   operation (no ambient security context)
//! - [`AuthorizationEngine`]: the pure decision function
//! - [`AuthzConfig`]: the ownerless-trade fallback flag
//!
//! Decisions compose two layers: a static role-to-action matrix with a
//! default-deny fallthrough, and explicit `TRADE_<ACTION>` privileges that
//! override the matrix. Per-trade view/edit checks add an ownership gate
//! on top.
//!
//! # Examples
//!
//! ```
//! use engine_authz::{Action, AuthorizationContext, AuthorizationEngine, Role};
//!
//! let engine = AuthorizationEngine::default();
//! let sales = AuthorizationContext::new("pjones").with_role(Role::Sales);
//!
//! assert!(engine.decide_action(&sales, Action::Create).is_permitted());
//! assert!(!engine.decide_action(&sales, Action::Terminate).is_permitted());
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

mod context;
mod decision;
mod matrix;

pub use context::AuthorizationContext;
pub use decision::{AuthorizationEngine, AuthzConfig, Decision};
pub use matrix::{permitted_actions, Action, Role};
