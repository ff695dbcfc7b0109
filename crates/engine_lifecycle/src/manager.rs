//! The trade lifecycle state machine.

use chrono::NaiveDateTime;
use tracing::{debug, info};

use engine_authz::{Action, AuthorizationContext, AuthorizationEngine, Decision};
use engine_cashflow::CashflowGenerator;
use engine_core::{Cashflow, Date, Trade, TradeId, TradeLeg, TradeSpec, TradeStatus};
use engine_validation::{TradeValidator, ValidationResult};

use crate::config::EngineConfig;
use crate::contracts::{
    PrivilegeSource, ReferenceDataSource, SettlementInstructionStore, TradeStore,
};
use crate::error::EngineError;

/// First business id handed out when a request carries none.
const FIRST_TRADE_ID: u64 = 10_000;

/// Orchestrates create, amend, terminate, and cancel over the persistence
/// contracts, enforcing validation and authorization before any mutation
/// and regenerating cashflows whenever legs change.
///
/// States: NEW (initial), AMENDED (re-enterable), TERMINATED and
/// CANCELLED (terminal). Amendment produces a new version row; terminate
/// and cancel are same-version status changes.
pub struct TradeLifecycleManager<S> {
    store: S,
    validator: TradeValidator,
    authz: AuthorizationEngine,
    generator: CashflowGenerator,
}

impl<S> TradeLifecycleManager<S>
where
    S: TradeStore + ReferenceDataSource + PrivilegeSource + SettlementInstructionStore,
{
    /// Creates a manager over the given store with the given policy flags.
    pub fn new(store: S, config: EngineConfig) -> Self {
        Self {
            store,
            validator: TradeValidator::new(),
            authz: AuthorizationEngine::new(config.authz),
            generator: CashflowGenerator::new(config.cashflow),
        }
    }

    /// Read access to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Books a new trade.
    ///
    /// Assigns the next sequential business id when the request carries
    /// none, validates the request, authorizes CREATE, persists version 1
    /// (active, NEW), stores settlement text when supplied, and generates
    /// cashflows for both legs.
    pub fn create(
        &mut self,
        mut spec: TradeSpec,
        ctx: &AuthorizationContext,
    ) -> Result<Trade, EngineError> {
        let ctx = self.effective_context(ctx);

        let trade_id = match spec.trade_id {
            Some(id) => id,
            None => {
                let id = TradeId::new(FIRST_TRADE_ID + self.store.trade_count());
                info!(trade_id = %id, "Generated trade id");
                spec.trade_id = Some(id);
                id
            }
        };
        info!(%trade_id, "Creating new trade");

        self.check_valid(&spec)?;
        self.authorize(self.authz.decide_action(&ctx, Action::Create))?;

        let status = self.resolve_status(TradeStatus::New)?;
        let (book, counterparty) = self.resolve_parties(&spec)?;
        let trader = self.resolve_user(&spec.trader);
        let inputter = self.resolve_user(&spec.inputter);

        let legs = self.build_legs(&spec);
        // Generated before anything is persisted: a bad schedule must not
        // leave a trade without its flows.
        let flows = self.generate_for_legs(&legs, spec.start_date, spec.maturity_date)?;

        let now = Self::now();
        let trade = Trade {
            trade_id,
            version: 1,
            active: true,
            status,
            trade_date: self.required_trade_date(&spec)?,
            start_date: spec.start_date,
            maturity_date: spec.maturity_date,
            execution_date: spec.execution_date,
            uti_code: spec.uti_code.clone(),
            book,
            counterparty,
            trader,
            inputter,
            legs,
            created_at: now,
            last_touched: now,
            deactivated_at: None,
        };

        let saved = self.store.save_trade(trade);
        if let Some(text) = settlement_text(&spec) {
            self.store
                .upsert_settlement_instructions(saved.trade_id, text);
        }
        for flow in flows {
            self.store.save_cashflow(flow);
        }

        info!(trade_id = %saved.trade_id, "Successfully created trade");
        Ok(saved)
    }

    /// Amends the active version of a trade.
    ///
    /// Within one atomic store commit: the current active row is
    /// deactivated and a successor row inserted with `version + 1`,
    /// status AMENDED, freshly resolved reference data, and regenerated
    /// cashflows. Settlement text, when supplied, is upserted against the
    /// business id. A concurrent amendment that wins the race surfaces as
    /// [`EngineError::StaleAmendment`].
    pub fn amend(
        &mut self,
        trade_id: TradeId,
        spec: TradeSpec,
        ctx: &AuthorizationContext,
    ) -> Result<Trade, EngineError> {
        info!(%trade_id, "Amending trade");
        let ctx = self.effective_context(ctx);

        let existing = self
            .store
            .find_active_by_business_id(trade_id)
            .ok_or(EngineError::NotFound(trade_id))?;

        self.authorize(self.authz.decide_action(&ctx, Action::Amend))?;
        self.authorize(self.authz.decide_edit(&ctx, &existing))?;
        self.check_not_terminal(&existing, "amended")?;

        let mut spec = spec;
        spec.trade_id = Some(trade_id);
        self.check_valid(&spec)?;

        let status = self.resolve_status(TradeStatus::Amended)?;
        let (book, counterparty) = self.resolve_parties(&spec)?;
        let trader = self.resolve_user(&spec.trader);
        let inputter = self.resolve_user(&spec.inputter);

        let legs = self.build_legs(&spec);
        let flows = self.generate_for_legs(&legs, spec.start_date, spec.maturity_date)?;

        let now = Self::now();
        let mut deactivated = existing.clone();
        deactivated.active = false;
        deactivated.deactivated_at = Some(now);

        let amended = Trade {
            trade_id,
            version: existing.version + 1,
            active: true,
            status,
            trade_date: self.required_trade_date(&spec)?,
            start_date: spec.start_date,
            maturity_date: spec.maturity_date,
            execution_date: spec.execution_date,
            uti_code: spec.uti_code.clone(),
            book,
            counterparty,
            trader,
            inputter,
            legs,
            created_at: now,
            last_touched: now,
            deactivated_at: None,
        };

        let saved = self.store.commit_amendment(deactivated, amended)?;
        if let Some(text) = settlement_text(&spec) {
            self.store
                .upsert_settlement_instructions(saved.trade_id, text);
        }
        for flow in flows {
            self.store.save_cashflow(flow);
        }

        info!(trade_id = %saved.trade_id, version = saved.version, "Successfully amended trade");
        Ok(saved)
    }

    /// Terminates the active version of a trade (same-version status
    /// change, no new row).
    pub fn terminate(
        &mut self,
        trade_id: TradeId,
        ctx: &AuthorizationContext,
    ) -> Result<Trade, EngineError> {
        info!(%trade_id, "Terminating trade");
        self.transition(trade_id, ctx, Action::Terminate, TradeStatus::Terminated)
    }

    /// Cancels the active version of a trade (same-version status change,
    /// no new row).
    pub fn cancel(
        &mut self,
        trade_id: TradeId,
        ctx: &AuthorizationContext,
    ) -> Result<Trade, EngineError> {
        info!(%trade_id, "Cancelling trade");
        self.transition(trade_id, ctx, Action::Cancel, TradeStatus::Cancelled)
    }

    /// Deletes a trade: an alias for [`Self::cancel`], looked up by
    /// business id, never by internal row id.
    pub fn delete(
        &mut self,
        trade_id: TradeId,
        ctx: &AuthorizationContext,
    ) -> Result<Trade, EngineError> {
        info!(%trade_id, "Deleting (cancelling) trade");
        self.cancel(trade_id, ctx)
    }

    /// Returns the active version of a trade, enforcing the per-trade
    /// view gate: a trade that exists but is invisible to the caller
    /// yields `Forbidden`, not `NotFound`.
    pub fn find_trade(
        &self,
        trade_id: TradeId,
        ctx: &AuthorizationContext,
    ) -> Result<Trade, EngineError> {
        debug!(%trade_id, "Retrieving trade by business id");
        let ctx = self.effective_context(ctx);
        let trade = self
            .store
            .find_active_by_business_id(trade_id)
            .ok_or(EngineError::NotFound(trade_id))?;
        self.authorize(self.authz.decide_view(&ctx, &trade))?;
        Ok(trade)
    }

    /// Returns all versions for the given business ids.
    pub fn find_trades(&self, ids: &[TradeId]) -> Vec<Trade> {
        self.store.find_by_business_ids(ids)
    }

    /// Returns the active trades visible to the caller: elevated callers
    /// see everything, a plain trader sees only their own.
    pub fn list_trades(&self, ctx: &AuthorizationContext) -> Vec<Trade> {
        debug!(caller = %ctx.login, "Listing trades");
        let ctx = self.effective_context(ctx);
        self.store
            .all_active()
            .into_iter()
            .filter(|trade| self.authz.decide_view(&ctx, trade).is_permitted())
            .collect()
    }

    /// Validates a booking request without booking it.
    pub fn validate(&self, spec: &TradeSpec) -> ValidationResult {
        self.validator.validate(spec, Date::today(), &self.store)
    }

    /// Generates cashflows for one leg over a date range without
    /// persisting them.
    pub fn generate_cashflows(
        &self,
        leg: &TradeLeg,
        start: Date,
        maturity: Date,
    ) -> Result<Vec<Cashflow>, EngineError> {
        Ok(self.generator.generate(leg, start, maturity)?)
    }

    /// Same-version status transition shared by terminate and cancel.
    fn transition(
        &mut self,
        trade_id: TradeId,
        ctx: &AuthorizationContext,
        action: Action,
        target: TradeStatus,
    ) -> Result<Trade, EngineError> {
        let ctx = self.effective_context(ctx);
        let existing = self
            .store
            .find_active_by_business_id(trade_id)
            .ok_or(EngineError::NotFound(trade_id))?;

        self.authorize(self.authz.decide_action(&ctx, action))?;
        self.authorize(self.authz.decide_edit(&ctx, &existing))?;
        self.check_not_terminal(&existing, "transitioned")?;

        let status = self.resolve_status(target)?;
        let mut trade = existing;
        trade.status = status;
        trade.last_touched = Self::now();
        Ok(self.store.save_trade(trade))
    }

    /// Merges store-resolved privileges into the caller-supplied context
    /// at the moment of the action.
    fn effective_context(&self, ctx: &AuthorizationContext) -> AuthorizationContext {
        ctx.clone()
            .with_privileges(self.store.find_user_privileges(&ctx.login))
    }

    fn authorize(&self, decision: Decision) -> Result<(), EngineError> {
        decision.into_result().map_err(EngineError::Forbidden)
    }

    fn check_valid(&self, spec: &TradeSpec) -> Result<(), EngineError> {
        let result = self.validator.validate(spec, Date::today(), &self.store);
        if result.valid() {
            Ok(())
        } else {
            Err(EngineError::ValidationFailed(result.into_errors()))
        }
    }

    fn check_not_terminal(&self, trade: &Trade, verb: &str) -> Result<(), EngineError> {
        if trade.status.is_terminal() {
            return Err(EngineError::ValidationFailed(vec![format!(
                "Trade {} is {} and cannot be {}",
                trade.trade_id, trade.status, verb
            )]));
        }
        Ok(())
    }

    /// Statuses must resolve through the store; a missing one is a data
    /// problem, not a default.
    fn resolve_status(&self, status: TradeStatus) -> Result<TradeStatus, EngineError> {
        self.store.status(status.name()).ok_or_else(|| {
            EngineError::ReferenceDataMissing(format!("{} status not found", status.name()))
        })
    }

    fn resolve_parties(
        &self,
        spec: &TradeSpec,
    ) -> Result<(engine_core::Book, engine_core::Counterparty), EngineError> {
        let book = self.store.book(&spec.book).ok_or_else(|| {
            EngineError::ReferenceDataMissing("Book not found or not set".to_string())
        })?;
        let counterparty = self.store.counterparty(&spec.counterparty).ok_or_else(|| {
            EngineError::ReferenceDataMissing("Counterparty not found or not set".to_string())
        })?;
        Ok((book, counterparty))
    }

    fn resolve_user(&self, key: &engine_core::EntityRef) -> Option<engine_core::AppUser> {
        if key.is_empty() {
            None
        } else {
            self.store.user(key)
        }
    }

    /// Builds persisted legs, canonicalising the reference names the
    /// store knows. Unknown schedule text is kept as supplied; the
    /// generator accepts the numeric `<n>M` form and rejects the rest.
    fn build_legs(&mut self, spec: &TradeSpec) -> Vec<TradeLeg> {
        spec.legs
            .iter()
            .map(|leg_spec| {
                let leg_id = self.store.next_leg_id();
                let mut leg = TradeLeg::from_spec(leg_id, leg_spec);
                if let Some(name) = leg.schedule.take() {
                    leg.schedule = Some(self.store.schedule(&name).unwrap_or(name));
                }
                if let Some(name) = leg.index.take() {
                    leg.index = Some(self.store.index(&name).unwrap_or(name));
                }
                if let Some(name) = leg.payment_bdc.take() {
                    leg.payment_bdc =
                        Some(self.store.business_day_convention(&name).unwrap_or(name));
                }
                if let Some(name) = leg.fixing_bdc.take() {
                    leg.fixing_bdc =
                        Some(self.store.business_day_convention(&name).unwrap_or(name));
                }
                leg
            })
            .collect()
    }

    fn generate_for_legs(
        &self,
        legs: &[TradeLeg],
        start: Option<Date>,
        maturity: Option<Date>,
    ) -> Result<Vec<Cashflow>, EngineError> {
        let (Some(start), Some(maturity)) = (start, maturity) else {
            return Ok(vec![]);
        };
        let mut flows = Vec::new();
        for leg in legs {
            debug!(leg_id = %leg.leg_id, %start, %maturity, "Generating cashflows for leg");
            let generated = self.generator.generate(leg, start, maturity)?;
            debug!(leg_id = %leg.leg_id, count = generated.len(), "Generated cashflows");
            flows.extend(generated);
        }
        Ok(flows)
    }

    fn required_trade_date(&self, spec: &TradeSpec) -> Result<Date, EngineError> {
        spec.trade_date
            .ok_or_else(|| EngineError::ValidationFailed(vec!["Trade date is required".to_string()]))
    }

    fn now() -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }
}

/// Non-blank settlement text, trimmed.
fn settlement_text(spec: &TradeSpec) -> Option<&str> {
    spec.settlement_instructions
        .as_deref()
        .map(str::trim)
        .filter(|text| !text.is_empty())
}
