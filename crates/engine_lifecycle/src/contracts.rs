//! Persistence contracts consumed by the lifecycle manager.
//!
//! The engine never talks to a database; it consumes these narrow traits
//! and emits domain results for the surrounding layers to persist and
//! serialise. `infra_store` provides the in-memory reference
//! implementation used by tests and the CLI.

use engine_core::{Cashflow, Currency, LegId, Trade, TradeId, TradeStatus, UserLogin};
use engine_validation::EntityLookup;
use thiserror::Error;

/// Failures from the trade store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// An amendment was based on a version that is no longer the active
    /// one; the deactivate/insert pair was not applied.
    #[error("Stale amendment for trade {trade_id}: active version is no longer {expected}")]
    StaleAmendment {
        /// The contested trade.
        trade_id: TradeId,
        /// The version the amendment expected to supersede.
        expected: u32,
    },
}

/// Versioned trade and cashflow persistence.
pub trait TradeStore {
    /// Returns the single active version for a business id, if any.
    fn find_active_by_business_id(&self, trade_id: TradeId) -> Option<Trade>;

    /// Returns all versions for any of the given business ids.
    fn find_by_business_ids(&self, ids: &[TradeId]) -> Vec<Trade>;

    /// Returns every active trade.
    fn all_active(&self) -> Vec<Trade>;

    /// Returns the number of distinct booked trades, used for sequential
    /// id assignment.
    fn trade_count(&self) -> u64;

    /// Allocates the next leg row id.
    fn next_leg_id(&mut self) -> LegId;

    /// Persists a trade row (insert or same-version update).
    fn save_trade(&mut self, trade: Trade) -> Trade;

    /// Atomically deactivates the current active row and inserts its
    /// successor.
    ///
    /// Implementations must verify that the active version still equals
    /// `deactivated.version` before applying either write, and must apply
    /// both or neither: no reader may ever observe zero or two active
    /// versions of one trade.
    fn commit_amendment(
        &mut self,
        deactivated: Trade,
        amended: Trade,
    ) -> Result<Trade, StoreError>;

    /// Persists a generated cashflow.
    fn save_cashflow(&mut self, flow: Cashflow) -> Cashflow;

    /// Returns the cashflows generated for a leg.
    fn cashflows_for_leg(&self, leg_id: LegId) -> Vec<Cashflow>;
}

/// Reference-data resolution.
///
/// Extends the validation pipeline's [`EntityLookup`] seam with the
/// remaining lookups the lifecycle needs. Implementations resolve by id
/// first, then by name/login.
pub trait ReferenceDataSource: EntityLookup {
    /// Resolves a currency code.
    fn currency(&self, code: &str) -> Option<Currency>;

    /// Resolves a floating-rate index by name.
    fn index(&self, name: &str) -> Option<String>;

    /// Resolves a schedule descriptor by name.
    fn schedule(&self, name: &str) -> Option<String>;

    /// Resolves a business-day convention by name.
    fn business_day_convention(&self, name: &str) -> Option<String>;

    /// Resolves a trade status by name. The store must know NEW, AMENDED,
    /// TERMINATED, and CANCELLED; a miss is a configuration problem.
    fn status(&self, name: &str) -> Option<TradeStatus>;
}

/// Explicit per-user privilege facts.
pub trait PrivilegeSource {
    /// Returns the privilege names granted to a login.
    fn find_user_privileges(&self, login: &UserLogin) -> Vec<String>;
}

/// Free-text settlement instructions, keyed by entity type + id + field
/// name in the underlying store.
pub trait SettlementInstructionStore {
    /// Creates or updates the settlement text for a trade.
    fn upsert_settlement_instructions(&mut self, trade_id: TradeId, text: &str);

    /// Returns the current settlement text for a trade, if any.
    fn find_settlement_instructions(&self, trade_id: TradeId) -> Option<String>;
}

