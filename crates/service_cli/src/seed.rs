//! Demo reference data for CLI runs.
//!
//! The CLI works against the in-memory store, so every invocation starts
//! from this seeded book of reference data.

use infra_store::InMemoryStore;

/// Builds the store every CLI command runs against.
pub fn demo_store() -> InMemoryStore {
    InMemoryStore::new()
        .with_book("RATES-1")
        .with_book("RATES-2")
        .with_counterparty("BigBank")
        .with_counterparty("Countermark Capital")
        .with_user("jsmith", "Jane")
        .with_user("jdoe", "John")
        .with_user("pjones", "Paula")
        .with_privilege("pjones", "TRADE_VIEW_ALL")
}
