//! Per-call authorization context.

use std::collections::BTreeSet;

use engine_core::UserLogin;

use crate::matrix::Role;

/// The facts an authorization decision is made from: who is calling, the
/// roles they hold, and any explicit privileges granted to them.
///
/// Built fresh at the moment of each lifecycle action and passed
/// explicitly; the engine never consults an ambient security context.
///
/// # Examples
///
/// ```
/// use engine_authz::{AuthorizationContext, Role};
///
/// let ctx = AuthorizationContext::new("jsmith")
///     .with_role(Role::Trader)
///     .with_privilege("TRADE_VIEW_ALL");
///
/// assert!(ctx.has_role(Role::Trader));
/// assert!(ctx.has_privilege("TRADE_VIEW_ALL"));
/// assert!(!ctx.has_privilege("TRADE_EDIT_ALL"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct AuthorizationContext {
    /// Login of the authenticated caller.
    pub login: UserLogin,
    /// Roles held by the caller.
    pub roles: BTreeSet<Role>,
    /// Explicit privilege names granted to the caller.
    pub privileges: BTreeSet<String>,
}

impl AuthorizationContext {
    /// Creates a context for the given caller with no roles or privileges.
    pub fn new(login: impl Into<UserLogin>) -> Self {
        Self {
            login: login.into(),
            roles: BTreeSet::new(),
            privileges: BTreeSet::new(),
        }
    }

    /// Adds a role.
    pub fn with_role(mut self, role: Role) -> Self {
        self.roles.insert(role);
        self
    }

    /// Adds an explicit privilege (stored upper-cased).
    pub fn with_privilege(mut self, privilege: impl Into<String>) -> Self {
        self.privileges.insert(privilege.into().to_uppercase());
        self
    }

    /// Merges privileges resolved from the privilege store at action time.
    pub fn with_privileges<I, S>(mut self, privileges: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for p in privileges {
            self.privileges.insert(p.into().to_uppercase());
        }
        self
    }

    /// Returns whether the caller holds the role.
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// Returns whether the caller holds the privilege (case-insensitive).
    pub fn has_privilege(&self, privilege: &str) -> bool {
        self.privileges.contains(&privilege.to_uppercase())
    }
}

impl From<&str> for AuthorizationContext {
    fn from(login: &str) -> Self {
        Self::new(login)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_context() {
        let ctx = AuthorizationContext::new("jsmith");
        assert_eq!(ctx.login.as_str(), "jsmith");
        assert!(ctx.roles.is_empty());
        assert!(ctx.privileges.is_empty());
    }

    #[test]
    fn test_roles_and_privileges() {
        let ctx = AuthorizationContext::new("jsmith")
            .with_role(Role::Sales)
            .with_privilege("trade_cancel");
        assert!(ctx.has_role(Role::Sales));
        assert!(!ctx.has_role(Role::Trader));
        // Privileges are matched case-insensitively.
        assert!(ctx.has_privilege("TRADE_CANCEL"));
        assert!(ctx.has_privilege("trade_cancel"));
    }

    #[test]
    fn test_merge_resolved_privileges() {
        let ctx = AuthorizationContext::new("jsmith")
            .with_privilege("TRADE_VIEW")
            .with_privileges(vec!["TRADE_CREATE", "trade_amend"]);
        assert!(ctx.has_privilege("TRADE_VIEW"));
        assert!(ctx.has_privilege("TRADE_CREATE"));
        assert!(ctx.has_privilege("TRADE_AMEND"));
    }
}
