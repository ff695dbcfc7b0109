//! The role-to-action permission matrix.

use std::fmt;
use std::str::FromStr;

use engine_core::ParseEnumError;

/// A lifecycle action a caller may request on a trade.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
pub enum Action {
    /// Book a new trade.
    Create,
    /// Amend the active version of a trade.
    Amend,
    /// Terminate a trade before maturity.
    Terminate,
    /// Cancel a trade as if never booked.
    Cancel,
    /// Read a trade.
    View,
}

impl Action {
    /// Returns the canonical upper-case action name.
    pub fn name(&self) -> &'static str {
        match self {
            Action::Create => "CREATE",
            Action::Amend => "AMEND",
            Action::Terminate => "TERMINATE",
            Action::Cancel => "CANCEL",
            Action::View => "VIEW",
        }
    }

    /// Returns the explicit privilege name that grants this action
    /// regardless of role (`TRADE_CREATE`, `TRADE_CANCEL`, ...).
    pub fn privilege_name(&self) -> String {
        format!("TRADE_{}", self.name())
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A caller role, as assigned by the surrounding user administration.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
pub enum Role {
    /// Front-office trader; full lifecycle control over own trades.
    Trader,
    /// Sales; may book and amend on behalf of any trader.
    Sales,
    /// Middle office; amends and views.
    MiddleOffice,
    /// Support; read-only.
    Support,
    /// Administrative superuser; bypasses ownership but holds no
    /// lifecycle actions beyond explicit privileges.
    Superuser,
}

impl Role {
    /// Returns the canonical upper-case role name.
    pub fn name(&self) -> &'static str {
        match self {
            Role::Trader => "TRADER",
            Role::Sales => "SALES",
            Role::MiddleOffice => "MIDDLE_OFFICE",
            Role::Support => "SUPPORT",
            Role::Superuser => "SUPERUSER",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Role {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "TRADER" => Ok(Role::Trader),
            "SALES" => Ok(Role::Sales),
            "MIDDLE_OFFICE" => Ok(Role::MiddleOffice),
            "SUPPORT" => Ok(Role::Support),
            "SUPERUSER" => Ok(Role::Superuser),
            _ => Err(ParseEnumError::new("role", s)),
        }
    }
}

/// Returns the actions a role may perform without an explicit privilege.
///
/// Roles outside the matrix (currently [`Role::Superuser`]) fall through
/// to an empty set: default deny.
///
/// # Examples
///
/// ```
/// use engine_authz::{permitted_actions, Action, Role};
///
/// assert!(permitted_actions(Role::Trader).contains(&Action::Cancel));
/// assert!(!permitted_actions(Role::Sales).contains(&Action::Cancel));
/// assert!(permitted_actions(Role::Superuser).is_empty());
/// ```
pub fn permitted_actions(role: Role) -> &'static [Action] {
    match role {
        Role::Trader => &[
            Action::Create,
            Action::Amend,
            Action::Terminate,
            Action::Cancel,
            Action::View,
        ],
        Role::Sales => &[Action::Create, Action::Amend],
        Role::MiddleOffice => &[Action::Amend, Action::View],
        Role::Support => &[Action::View],
        Role::Superuser => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trader_has_full_lifecycle() {
        let actions = permitted_actions(Role::Trader);
        for action in [
            Action::Create,
            Action::Amend,
            Action::Terminate,
            Action::Cancel,
            Action::View,
        ] {
            assert!(actions.contains(&action));
        }
    }

    #[test]
    fn test_sales_create_amend_only() {
        let actions = permitted_actions(Role::Sales);
        assert!(actions.contains(&Action::Create));
        assert!(actions.contains(&Action::Amend));
        assert!(!actions.contains(&Action::Terminate));
        assert!(!actions.contains(&Action::Cancel));
        assert!(!actions.contains(&Action::View));
    }

    #[test]
    fn test_middle_office_amend_view() {
        let actions = permitted_actions(Role::MiddleOffice);
        assert_eq!(actions, [Action::Amend, Action::View]);
    }

    #[test]
    fn test_support_view_only() {
        assert_eq!(permitted_actions(Role::Support), [Action::View]);
    }

    #[test]
    fn test_privilege_names() {
        assert_eq!(Action::Create.privilege_name(), "TRADE_CREATE");
        assert_eq!(Action::Terminate.privilege_name(), "TRADE_TERMINATE");
    }

    #[test]
    fn test_role_parse() {
        assert_eq!("trader".parse::<Role>().unwrap(), Role::Trader);
        assert_eq!("MIDDLE_OFFICE".parse::<Role>().unwrap(), Role::MiddleOffice);
        assert!("AUDITOR".parse::<Role>().is_err());
    }
}
