//! Identifier newtypes for trades, legs, and users.
//!
//! Business identifiers are kept distinct from raw integers and strings so
//! that a trade id cannot be confused with a row id or a leg id at a call
//! site.

use std::fmt;

/// Business identifier of a trade, stable across amendment versions.
///
/// All versions of the same economic trade share one `TradeId`; the
/// version chain is distinguished by the `version` counter on each row.
///
/// # Examples
///
/// ```
/// use engine_core::ids::TradeId;
///
/// let id = TradeId::new(10001);
/// assert_eq!(id.value(), 10001);
/// assert_eq!(format!("{}", id), "10001");
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct TradeId(u64);

impl TradeId {
    /// Creates a trade id from its numeric value.
    #[inline]
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the numeric value.
    #[inline]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TradeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TradeId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Identifier of a single trade leg within a booked trade.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct LegId(u64);

impl LegId {
    /// Creates a leg id from its numeric value.
    #[inline]
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the numeric value.
    #[inline]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for LegId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Login identifier of an application user.
///
/// Comparison is case-insensitive, matching how owners are matched against
/// the authenticated caller.
///
/// # Examples
///
/// ```
/// use engine_core::ids::UserLogin;
///
/// let owner = UserLogin::new("jsmith");
/// assert!(owner.matches("JSmith"));
/// assert!(!owner.matches("jdoe"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct UserLogin(String);

impl UserLogin {
    /// Creates a login from any string-like value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the login as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive equality against another login string.
    pub fn matches(&self, other: &str) -> bool {
        self.0.eq_ignore_ascii_case(other)
    }
}

impl fmt::Display for UserLogin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for UserLogin {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trade_id_value_and_display() {
        let id = TradeId::new(10000);
        assert_eq!(id.value(), 10000);
        assert_eq!(format!("{}", id), "10000");
    }

    #[test]
    fn test_trade_id_ordering() {
        assert!(TradeId::new(10000) < TradeId::new(10001));
    }

    #[test]
    fn test_leg_id() {
        let id = LegId::new(7);
        assert_eq!(id.value(), 7);
        assert_eq!(format!("{}", id), "7");
    }

    #[test]
    fn test_user_login_matches_case_insensitive() {
        let login = UserLogin::new("jsmith");
        assert!(login.matches("jsmith"));
        assert!(login.matches("JSMITH"));
        assert!(!login.matches("other"));
    }

    #[test]
    fn test_user_login_from_str() {
        let login: UserLogin = "jdoe".into();
        assert_eq!(login.as_str(), "jdoe");
    }
}
