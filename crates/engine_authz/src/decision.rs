//! The authorization decision function.

use engine_core::Trade;

use crate::context::AuthorizationContext;
use crate::matrix::{permitted_actions, Action, Role};

/// Privilege granting read access to trades the caller does not own.
const VIEW_ALL_PRIVILEGE: &str = "TRADE_VIEW_ALL";

/// Privilege granting write access to trades the caller does not own.
const EDIT_ALL_PRIVILEGE: &str = "TRADE_EDIT_ALL";

/// Policy flags for authorization decisions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AuthzConfig {
    /// When true, a trade with no recorded owner may be edited or
    /// cancelled by any caller holding the TRADER role. Default true,
    /// matching historical behaviour for fixture-era trades booked
    /// without an owner.
    pub ownerless_trade_trader_fallback: bool,
}

impl Default for AuthzConfig {
    fn default() -> Self {
        Self {
            ownerless_trade_trader_fallback: true,
        }
    }
}

/// Outcome of an authorization check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Decision {
    /// The caller may proceed.
    Permit,
    /// The caller may not proceed; the message names why.
    Deny(String),
}

impl Decision {
    /// Returns whether the decision permits the action.
    pub fn is_permitted(&self) -> bool {
        matches!(self, Decision::Permit)
    }

    /// Converts a denial into `Err(message)`, a permit into `Ok(())`.
    pub fn into_result(self) -> Result<(), String> {
        match self {
            Decision::Permit => Ok(()),
            Decision::Deny(reason) => Err(reason),
        }
    }
}

/// Pure, side-effect-free authorization decisions.
///
/// Evaluated per call from caller-supplied facts only; the engine never
/// reaches into persistence itself.
#[derive(Clone, Debug, Default)]
pub struct AuthorizationEngine {
    config: AuthzConfig,
}

impl AuthorizationEngine {
    /// Creates an engine with the given policy flags.
    pub fn new(config: AuthzConfig) -> Self {
        Self { config }
    }

    /// Decides whether the caller may perform `action` at all.
    ///
    /// An explicit `TRADE_<ACTION>` privilege permits the action
    /// regardless of role; otherwise any held role whose matrix row
    /// contains the action permits it; otherwise deny, naming the
    /// caller's role and the rejected action.
    pub fn decide_action(&self, ctx: &AuthorizationContext, action: Action) -> Decision {
        if ctx.has_privilege(&action.privilege_name()) {
            return Decision::Permit;
        }

        if ctx
            .roles
            .iter()
            .any(|role| permitted_actions(*role).contains(&action))
        {
            return Decision::Permit;
        }

        let reason = match ctx.roles.iter().next() {
            Some(role) => format!("{} cannot {} trades", role, action),
            None => format!("No role permits {}", action),
        };
        Decision::Deny(reason)
    }

    /// Decides whether the caller may read this specific trade.
    ///
    /// The owner is always permitted. Elevated callers (SALES, SUPERUSER,
    /// MIDDLE_OFFICE, SUPPORT, or the TRADE_VIEW_ALL privilege) see all
    /// trades.
    pub fn decide_view(&self, ctx: &AuthorizationContext, trade: &Trade) -> Decision {
        let elevated = ctx.has_role(Role::Sales)
            || ctx.has_role(Role::Superuser)
            || ctx.has_role(Role::MiddleOffice)
            || ctx.has_role(Role::Support)
            || ctx.has_privilege(VIEW_ALL_PRIVILEGE);

        self.decide_ownership(ctx, trade, elevated, "view")
    }

    /// Decides whether the caller may mutate this specific trade
    /// (amend, terminate, or cancel).
    ///
    /// The owner is always permitted. Elevated callers (SALES, SUPERUSER,
    /// or the TRADE_EDIT_ALL privilege) may act on any trade.
    pub fn decide_edit(&self, ctx: &AuthorizationContext, trade: &Trade) -> Decision {
        let elevated = ctx.has_role(Role::Sales)
            || ctx.has_role(Role::Superuser)
            || ctx.has_privilege(EDIT_ALL_PRIVILEGE);

        self.decide_ownership(ctx, trade, elevated, "edit")
    }

    fn decide_ownership(
        &self,
        ctx: &AuthorizationContext,
        trade: &Trade,
        elevated: bool,
        verb: &str,
    ) -> Decision {
        if elevated {
            return Decision::Permit;
        }

        match trade.owner_login() {
            Some(owner) if owner.matches(ctx.login.as_str()) => Decision::Permit,
            // Ownerless rows predate owner capture; the fallback keeps
            // them editable by the trading desk.
            None if self.config.ownerless_trade_trader_fallback
                && ctx.has_role(Role::Trader) =>
            {
                Decision::Permit
            }
            _ => Decision::Deny(format!(
                "Insufficient privileges to {} trade {}",
                verb, trade.trade_id
            )),
        }
    }
}
