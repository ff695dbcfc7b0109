//! Reference-data entities resolved through the persistence layer.
//!
//! Books, counterparties, and users are owned by the surrounding system;
//! the engine only consumes them through narrow resolve contracts and
//! checks their active flags during validation.

use crate::ids::UserLogin;

/// How a caller points at a reference entity: by numeric id, by display
/// name, or both.
///
/// Resolution prefers the id and falls back to the name/login, mirroring
/// how booking requests arrive with either field populated.
///
/// # Examples
///
/// ```
/// use engine_core::reference::EntityRef;
///
/// let by_id = EntityRef::by_id(42);
/// assert_eq!(by_id.id, Some(42));
///
/// let by_name = EntityRef::by_name("FX Desk");
/// assert!(by_name.id.is_none());
/// assert_eq!(by_name.name.as_deref(), Some("FX Desk"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct EntityRef {
    /// Numeric id, when the caller knows it.
    pub id: Option<i64>,
    /// Display name or login, when the caller supplies one.
    pub name: Option<String>,
}

impl EntityRef {
    /// Reference by numeric id only.
    pub fn by_id(id: i64) -> Self {
        Self {
            id: Some(id),
            name: None,
        }
    }

    /// Reference by name/login only.
    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: Some(name.into()),
        }
    }

    /// Returns whether neither id nor name was supplied.
    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.name.is_none()
    }
}

/// A trading book.
#[derive(Clone, Debug, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Book {
    /// Numeric id.
    pub id: i64,
    /// Book name, unique within the system.
    pub name: String,
    /// Inactive books must not receive new trades.
    pub active: bool,
}

/// A counterparty to a trade.
#[derive(Clone, Debug, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Counterparty {
    /// Numeric id.
    pub id: i64,
    /// Legal name, unique within the system.
    pub name: String,
    /// Inactive counterparties must not receive new trades.
    pub active: bool,
}

/// An application user (trader, sales, middle office, support).
#[derive(Clone, Debug, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct AppUser {
    /// Numeric id.
    pub id: i64,
    /// Login identifier, matched case-insensitively against callers.
    pub login_id: UserLogin,
    /// First name, used as a legacy name-lookup fallback.
    pub first_name: String,
    /// Inactive users must not own new trades.
    pub active: bool,
}
