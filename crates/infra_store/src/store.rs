//! The in-memory store.

use std::collections::HashMap;
use std::str::FromStr;

use engine_core::{
    AppUser, Book, Cashflow, Counterparty, Currency, EntityRef, LegId, Trade, TradeId,
    TradeStatus, UserLogin,
};
use engine_lifecycle::{
    PrivilegeSource, ReferenceDataSource, SettlementInstructionStore, StoreError, TradeStore,
};
use engine_validation::EntityLookup;

/// One row of the keyed free-text store (entity type + id + field name).
#[derive(Clone, Debug)]
struct AdditionalInfoRow {
    text: String,
    version: u32,
    created_at: chrono::NaiveDateTime,
    modified_at: chrono::NaiveDateTime,
}

/// Entity type under which settlement text is filed.
const TRADE_ENTITY: &str = "TRADE";

/// Field name under which settlement text is filed.
const SETTLEMENT_FIELD: &str = "SETTLEMENT_INSTRUCTIONS";

/// In-memory reference implementation of every persistence contract.
///
/// Seed reference data with the `with_*` builder methods, then hand the
/// store to a `TradeLifecycleManager`.
///
/// # Examples
///
/// ```
/// use infra_store::InMemoryStore;
///
/// let store = InMemoryStore::new()
///     .with_book("RATES-1")
///     .with_counterparty("BigBank")
///     .with_user("jsmith", "Jane");
/// ```
#[derive(Clone, Debug, Default)]
pub struct InMemoryStore {
    trades: Vec<Trade>,
    cashflows: Vec<Cashflow>,
    books: Vec<Book>,
    counterparties: Vec<Counterparty>,
    users: Vec<AppUser>,
    privileges: HashMap<String, Vec<String>>,
    additional_info: HashMap<(String, u64, String), AdditionalInfoRow>,
    schedules: Vec<String>,
    indices: Vec<String>,
    conventions: Vec<String>,
    statuses: Vec<TradeStatus>,
    next_leg: u64,
}

impl InMemoryStore {
    /// Creates a store seeded with the standard statuses, schedules,
    /// indices, and business-day conventions.
    pub fn new() -> Self {
        Self {
            statuses: vec![
                TradeStatus::New,
                TradeStatus::Amended,
                TradeStatus::Terminated,
                TradeStatus::Cancelled,
            ],
            schedules: ["Monthly", "Quarterly", "Semi-Annually", "Annually"]
                .map(String::from)
                .to_vec(),
            indices: ["LIBOR", "EURIBOR", "SONIA", "SOFR"].map(String::from).to_vec(),
            conventions: ["FOLLOWING", "MODIFIED_FOLLOWING", "PRECEDING"]
                .map(String::from)
                .to_vec(),
            ..Default::default()
        }
    }

    /// Seeds an active book; ids are assigned sequentially.
    pub fn with_book(mut self, name: &str) -> Self {
        let id = self.books.len() as i64 + 1;
        self.books.push(Book {
            id,
            name: name.to_string(),
            active: true,
        });
        self
    }

    /// Seeds an inactive book.
    pub fn with_inactive_book(mut self, name: &str) -> Self {
        self = self.with_book(name);
        if let Some(book) = self.books.last_mut() {
            book.active = false;
        }
        self
    }

    /// Seeds an active counterparty.
    pub fn with_counterparty(mut self, name: &str) -> Self {
        let id = self.counterparties.len() as i64 + 1;
        self.counterparties.push(Counterparty {
            id,
            name: name.to_string(),
            active: true,
        });
        self
    }

    /// Seeds an active user.
    pub fn with_user(mut self, login: &str, first_name: &str) -> Self {
        let id = self.users.len() as i64 + 1;
        self.users.push(AppUser {
            id,
            login_id: UserLogin::new(login),
            first_name: first_name.to_string(),
            active: true,
        });
        self
    }

    /// Grants an explicit privilege to a login.
    pub fn with_privilege(mut self, login: &str, privilege: &str) -> Self {
        self.privileges
            .entry(login.to_lowercase())
            .or_default()
            .push(privilege.to_uppercase());
        self
    }

    /// Removes a status from the registry (for exercising
    /// reference-data-missing paths).
    pub fn without_status(mut self, status: TradeStatus) -> Self {
        self.statuses.retain(|s| *s != status);
        self
    }

    /// Returns the stored version counter of a trade's settlement text.
    pub fn settlement_version(&self, trade_id: TradeId) -> Option<u32> {
        self.additional_info
            .get(&settlement_key(trade_id))
            .map(|row| row.version)
    }

    /// Returns when a trade's settlement text was created and last
    /// modified.
    pub fn settlement_timestamps(
        &self,
        trade_id: TradeId,
    ) -> Option<(chrono::NaiveDateTime, chrono::NaiveDateTime)> {
        self.additional_info
            .get(&settlement_key(trade_id))
            .map(|row| (row.created_at, row.modified_at))
    }

    /// Returns every stored trade row, all versions included.
    pub fn all_rows(&self) -> &[Trade] {
        &self.trades
    }

    fn now() -> chrono::NaiveDateTime {
        chrono::Local::now().naive_local()
    }
}

fn settlement_key(trade_id: TradeId) -> (String, u64, String) {
    (
        TRADE_ENTITY.to_string(),
        trade_id.value(),
        SETTLEMENT_FIELD.to_string(),
    )
}

impl EntityLookup for InMemoryStore {
    fn book(&self, key: &EntityRef) -> Option<Book> {
        if let Some(id) = key.id {
            if let Some(book) = self.books.iter().find(|b| b.id == id) {
                return Some(book.clone());
            }
        }
        let name = key.name.as_deref()?;
        self.books.iter().find(|b| b.name == name).cloned()
    }

    fn counterparty(&self, key: &EntityRef) -> Option<Counterparty> {
        if let Some(id) = key.id {
            if let Some(cp) = self.counterparties.iter().find(|c| c.id == id) {
                return Some(cp.clone());
            }
        }
        let name = key.name.as_deref()?;
        self.counterparties.iter().find(|c| c.name == name).cloned()
    }

    fn user(&self, key: &EntityRef) -> Option<AppUser> {
        if let Some(id) = key.id {
            if let Some(user) = self.users.iter().find(|u| u.id == id) {
                return Some(user.clone());
            }
        }
        let name = key.name.as_deref()?;
        // Login first; first name as the legacy fallback.
        self.users
            .iter()
            .find(|u| u.login_id.matches(name))
            .or_else(|| self.users.iter().find(|u| u.first_name == name))
            .cloned()
    }
}

impl ReferenceDataSource for InMemoryStore {
    fn currency(&self, code: &str) -> Option<Currency> {
        Currency::from_str(code).ok()
    }

    fn index(&self, name: &str) -> Option<String> {
        self.indices
            .iter()
            .find(|i| i.eq_ignore_ascii_case(name))
            .cloned()
    }

    fn schedule(&self, name: &str) -> Option<String> {
        self.schedules
            .iter()
            .find(|s| s.eq_ignore_ascii_case(name))
            .cloned()
    }

    fn business_day_convention(&self, name: &str) -> Option<String> {
        self.conventions
            .iter()
            .find(|c| c.eq_ignore_ascii_case(name))
            .cloned()
    }

    fn status(&self, name: &str) -> Option<TradeStatus> {
        let status = TradeStatus::from_str(name).ok()?;
        self.statuses.contains(&status).then_some(status)
    }
}

impl PrivilegeSource for InMemoryStore {
    fn find_user_privileges(&self, login: &UserLogin) -> Vec<String> {
        self.privileges
            .get(&login.as_str().to_lowercase())
            .cloned()
            .unwrap_or_default()
    }
}

impl TradeStore for InMemoryStore {
    fn find_active_by_business_id(&self, trade_id: TradeId) -> Option<Trade> {
        self.trades
            .iter()
            .find(|t| t.trade_id == trade_id && t.active)
            .cloned()
    }

    fn find_by_business_ids(&self, ids: &[TradeId]) -> Vec<Trade> {
        self.trades
            .iter()
            .filter(|t| ids.contains(&t.trade_id))
            .cloned()
            .collect()
    }

    fn all_active(&self) -> Vec<Trade> {
        self.trades.iter().filter(|t| t.active).cloned().collect()
    }

    fn trade_count(&self) -> u64 {
        let mut ids: Vec<TradeId> = self.trades.iter().map(|t| t.trade_id).collect();
        ids.sort();
        ids.dedup();
        ids.len() as u64
    }

    fn next_leg_id(&mut self) -> LegId {
        self.next_leg += 1;
        LegId::new(self.next_leg)
    }

    fn save_trade(&mut self, trade: Trade) -> Trade {
        if let Some(row) = self
            .trades
            .iter_mut()
            .find(|t| t.trade_id == trade.trade_id && t.version == trade.version)
        {
            *row = trade.clone();
        } else {
            self.trades.push(trade.clone());
        }
        trade
    }

    fn commit_amendment(
        &mut self,
        deactivated: Trade,
        amended: Trade,
    ) -> Result<Trade, StoreError> {
        let trade_id = deactivated.trade_id;
        let expected = deactivated.version;

        // Optimistic check before either write: the row being superseded
        // must still be the active one.
        let current_active = self
            .trades
            .iter()
            .find(|t| t.trade_id == trade_id && t.active)
            .map(|t| t.version);
        if current_active != Some(expected) {
            return Err(StoreError::StaleAmendment { trade_id, expected });
        }

        self.save_trade(deactivated);
        Ok(self.save_trade(amended))
    }

    fn save_cashflow(&mut self, flow: Cashflow) -> Cashflow {
        self.cashflows.push(flow.clone());
        flow
    }

    fn cashflows_for_leg(&self, leg_id: LegId) -> Vec<Cashflow> {
        self.cashflows
            .iter()
            .filter(|f| f.leg_id == leg_id)
            .cloned()
            .collect()
    }
}

impl SettlementInstructionStore for InMemoryStore {
    fn upsert_settlement_instructions(&mut self, trade_id: TradeId, text: &str) {
        let now = Self::now();
        self.additional_info
            .entry(settlement_key(trade_id))
            .and_modify(|row| {
                row.text = text.to_string();
                row.version += 1;
                row.modified_at = now;
            })
            .or_insert(AdditionalInfoRow {
                text: text.to_string(),
                version: 1,
                created_at: now,
                modified_at: now,
            });
    }

    fn find_settlement_instructions(&self, trade_id: TradeId) -> Option<String> {
        self.additional_info
            .get(&settlement_key(trade_id))
            .map(|row| row.text.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine_core::{LegSpec, TradeLeg};
    use rust_decimal::Decimal;

    fn sample_trade(trade_id: u64, version: u32, active: bool) -> Trade {
        let now = InMemoryStore::now();
        Trade {
            trade_id: TradeId::new(trade_id),
            version,
            active,
            status: if version == 1 {
                TradeStatus::New
            } else {
                TradeStatus::Amended
            },
            trade_date: engine_core::Date::from_ymd(2025, 1, 1).unwrap(),
            start_date: None,
            maturity_date: None,
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
            trader: None,
            inputter: None,
            legs: vec![],
            created_at: now,
            last_touched: now,
            deactivated_at: None,
        }
    }

    #[test]
    fn test_lookup_prefers_id_over_name() {
        let store = InMemoryStore::new().with_book("Alpha").with_book("Beta");
        let key = EntityRef {
            id: Some(2),
            name: Some("Alpha".into()),
        };
        assert_eq!(store.book(&key).unwrap().name, "Beta");
    }

    #[test]
    fn test_user_lookup_login_then_first_name() {
        let store = InMemoryStore::new()
            .with_user("jsmith", "Jane")
            .with_user("jdoe", "John");
        // Case-insensitive login match.
        let by_login = store.user(&EntityRef::by_name("JSMITH")).unwrap();
        assert_eq!(by_login.first_name, "Jane");
        // Legacy first-name fallback.
        let by_first = store.user(&EntityRef::by_name("John")).unwrap();
        assert_eq!(by_first.login_id.as_str(), "jdoe");
    }

    #[test]
    fn test_status_registry() {
        let store = InMemoryStore::new();
        assert_eq!(store.status("NEW"), Some(TradeStatus::New));
        assert_eq!(store.status("cancelled"), Some(TradeStatus::Cancelled));
        assert_eq!(store.status("LIVE"), None);

        let gutted = InMemoryStore::new().without_status(TradeStatus::Amended);
        assert_eq!(gutted.status("AMENDED"), None);
    }

    #[test]
    fn test_reference_registries_case_insensitive() {
        let store = InMemoryStore::new();
        assert_eq!(store.schedule("quarterly").as_deref(), Some("Quarterly"));
        assert_eq!(store.index("sonia").as_deref(), Some("SONIA"));
        assert_eq!(
            store.business_day_convention("modified_following").as_deref(),
            Some("MODIFIED_FOLLOWING")
        );
        assert_eq!(store.currency("usd"), Some(Currency::USD));
        assert_eq!(store.schedule("Fortnightly"), None);
    }

    #[test]
    fn test_active_version_lookup() {
        let mut store = InMemoryStore::new();
        store.save_trade(sample_trade(10000, 1, false));
        store.save_trade(sample_trade(10000, 2, true));
        store.save_trade(sample_trade(10001, 1, true));

        let active = store.find_active_by_business_id(TradeId::new(10000)).unwrap();
        assert_eq!(active.version, 2);
        assert_eq!(store.trade_count(), 2);
        assert_eq!(store.all_active().len(), 2);
    }

    #[test]
    fn test_save_trade_replaces_same_version() {
        let mut store = InMemoryStore::new();
        store.save_trade(sample_trade(10000, 1, true));
        let mut updated = sample_trade(10000, 1, true);
        updated.status = TradeStatus::Terminated;
        store.save_trade(updated);

        assert_eq!(store.all_rows().len(), 1);
        assert_eq!(
            store
                .find_active_by_business_id(TradeId::new(10000))
                .unwrap()
                .status,
            TradeStatus::Terminated
        );
    }

    #[test]
    fn test_commit_amendment_swaps_active_row() {
        let mut store = InMemoryStore::new();
        store.save_trade(sample_trade(10000, 1, true));

        let mut deactivated = sample_trade(10000, 1, false);
        deactivated.deactivated_at = Some(InMemoryStore::now());
        let amended = sample_trade(10000, 2, true);

        store.commit_amendment(deactivated, amended).unwrap();

        let actives: Vec<_> = store.all_rows().iter().filter(|t| t.active).collect();
        assert_eq!(actives.len(), 1);
        assert_eq!(actives[0].version, 2);
        assert_eq!(store.all_rows().len(), 2);
    }

    #[test]
    fn test_commit_amendment_rejects_stale_expected_version() {
        let mut store = InMemoryStore::new();
        store.save_trade(sample_trade(10000, 1, false));
        store.save_trade(sample_trade(10000, 2, true));

        // An amendment still based on version 1 must be rejected whole.
        let err = store
            .commit_amendment(sample_trade(10000, 1, false), sample_trade(10000, 2, true))
            .unwrap_err();
        assert_eq!(
            err,
            StoreError::StaleAmendment {
                trade_id: TradeId::new(10000),
                expected: 1
            }
        );
        // Nothing was applied: still exactly one active row at version 2.
        let actives: Vec<_> = store.all_rows().iter().filter(|t| t.active).collect();
        assert_eq!(actives.len(), 1);
        assert_eq!(actives[0].version, 2);
    }

    #[test]
    fn test_settlement_upsert_versions() {
        let mut store = InMemoryStore::new();
        let id = TradeId::new(10000);
        assert_eq!(store.find_settlement_instructions(id), None);

        store.upsert_settlement_instructions(id, "Pay agent: Citi London");
        assert_eq!(store.settlement_version(id), Some(1));

        store.upsert_settlement_instructions(id, "Pay agent: HSBC Paris");
        assert_eq!(store.settlement_version(id), Some(2));
        assert_eq!(
            store.find_settlement_instructions(id).as_deref(),
            Some("Pay agent: HSBC Paris")
        );

        let (created, modified) = store.settlement_timestamps(id).unwrap();
        assert!(modified >= created);
    }

    #[test]
    fn test_privileges_case_insensitive_login() {
        let store = InMemoryStore::new().with_privilege("JSmith", "trade_cancel");
        let privileges = store.find_user_privileges(&UserLogin::new("jsmith"));
        assert_eq!(privileges, ["TRADE_CANCEL"]);
    }

    #[test]
    fn test_leg_ids_are_unique() {
        let mut store = InMemoryStore::new();
        let a = store.next_leg_id();
        let b = store.next_leg_id();
        assert_ne!(a, b);
    }

    #[test]
    fn test_cashflows_filed_by_leg() {
        let mut store = InMemoryStore::new();
        let leg = TradeLeg::from_spec(
            LegId::new(1),
            &LegSpec::fixed(Decimal::from(100), Decimal::ONE),
        );
        store.save_cashflow(Cashflow {
            leg_id: leg.leg_id,
            value_date: engine_core::Date::from_ymd(2025, 4, 1).unwrap(),
            payment_value: Decimal::new(2500, 2),
            rate: leg.rate,
            pay_receive: None,
            payment_bdc: None,
        });

        assert_eq!(store.cashflows_for_leg(LegId::new(1)).len(), 1);
        assert!(store.cashflows_for_leg(LegId::new(2)).is_empty());
    }

}
