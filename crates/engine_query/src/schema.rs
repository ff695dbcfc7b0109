//! The queryable trade schema.
//!
//! Field paths mirror the entity graph the search endpoint has always
//! exposed (`counterparty.name`, `tradeStatus.tradeStatus`, ...), so
//! existing saved filters keep working. A path outside this set fails
//! translation with an unknown-field error.

use std::cmp::Ordering;

use engine_core::{Date, Trade};

use crate::error::QueryError;

/// The type a schema field carries, used to coerce comparison literals.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum FieldKind {
    Text,
    Int,
    Date,
}

/// A single value read from a trade; `None` from the accessor means the
/// field is unset on that row and matches nothing.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum FieldValue {
    Text(String),
    Int(i64),
    Date(Date),
}

impl FieldValue {
    /// Equality; case-insensitive when the field is textual.
    pub(crate) fn matches(&self, other: &FieldValue) -> bool {
        match (self, other) {
            (FieldValue::Text(a), FieldValue::Text(b)) => a.eq_ignore_ascii_case(b),
            (a, b) => a == b,
        }
    }

    /// Ordered comparison within the same kind; text compares as strings.
    pub(crate) fn compare(&self, other: &FieldValue) -> Option<Ordering> {
        match (self, other) {
            (FieldValue::Text(a), FieldValue::Text(b)) => Some(a.cmp(b)),
            (FieldValue::Int(a), FieldValue::Int(b)) => Some(a.cmp(b)),
            (FieldValue::Date(a), FieldValue::Date(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

/// Reads one field out of a trade.
pub(crate) type FieldAccessor = fn(&Trade) -> Option<FieldValue>;

/// Resolves a dotted field path against the trade schema.
pub(crate) fn resolve_field(field: &str) -> Result<(FieldKind, FieldAccessor), QueryError> {
    let resolved: (FieldKind, FieldAccessor) = match field {
        "tradeId" => (FieldKind::Int, |t| {
            Some(FieldValue::Int(t.trade_id.value() as i64))
        }),
        "version" => (FieldKind::Int, |t| Some(FieldValue::Int(t.version as i64))),
        "tradeDate" => (FieldKind::Date, |t| Some(FieldValue::Date(t.trade_date))),
        "startDate" => (FieldKind::Date, |t| t.start_date.map(FieldValue::Date)),
        "maturityDate" => (FieldKind::Date, |t| t.maturity_date.map(FieldValue::Date)),
        "utiCode" => (FieldKind::Text, |t| {
            t.uti_code.clone().map(FieldValue::Text)
        }),
        "tradeStatus.tradeStatus" => (FieldKind::Text, |t| {
            Some(FieldValue::Text(t.status.name().to_string()))
        }),
        "counterparty.name" => (FieldKind::Text, |t| {
            Some(FieldValue::Text(t.counterparty.name.clone()))
        }),
        "book.bookName" => (FieldKind::Text, |t| {
            Some(FieldValue::Text(t.book.name.clone()))
        }),
        "traderUser.loginId" => (FieldKind::Text, |t| {
            t.owner_login()
                .map(|login| FieldValue::Text(login.as_str().to_string()))
        }),
        _ => {
            return Err(QueryError::UnknownField {
                field: field.to_string(),
            })
        }
    };
    Ok(resolved)
}

/// Coerces a comparison literal to the field's kind.
pub(crate) fn coerce(kind: FieldKind, field: &str, value: &str) -> Result<FieldValue, QueryError> {
    let invalid = || QueryError::InvalidValue {
        value: value.to_string(),
        field: field.to_string(),
    };
    match kind {
        FieldKind::Text => Ok(FieldValue::Text(value.to_string())),
        FieldKind::Int => value
            .parse::<i64>()
            .map(FieldValue::Int)
            .map_err(|_| invalid()),
        FieldKind::Date => Date::parse(value).map(FieldValue::Date).map_err(|_| invalid()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_paths_resolve() {
        for path in [
            "tradeId",
            "version",
            "tradeDate",
            "startDate",
            "maturityDate",
            "utiCode",
            "tradeStatus.tradeStatus",
            "counterparty.name",
            "book.bookName",
            "traderUser.loginId",
        ] {
            assert!(resolve_field(path).is_ok(), "{} should resolve", path);
        }
    }

    #[test]
    fn test_unknown_path_rejected() {
        let err = resolve_field("counterparty.swiftCode").unwrap_err();
        assert_eq!(
            err,
            QueryError::UnknownField {
                field: "counterparty.swiftCode".into()
            }
        );
    }

    #[test]
    fn test_coerce_int() {
        assert_eq!(
            coerce(FieldKind::Int, "version", "3").unwrap(),
            FieldValue::Int(3)
        );
        assert!(coerce(FieldKind::Int, "version", "three").is_err());
    }

    #[test]
    fn test_coerce_date() {
        assert_eq!(
            coerce(FieldKind::Date, "tradeDate", "2025-01-01").unwrap(),
            FieldValue::Date(Date::from_ymd(2025, 1, 1).unwrap())
        );
        assert!(coerce(FieldKind::Date, "tradeDate", "20250101").is_err());
    }

    #[test]
    fn test_text_matching_is_case_insensitive() {
        let a = FieldValue::Text("BigBank".into());
        let b = FieldValue::Text("BIGBANK".into());
        assert!(a.matches(&b));
    }

    #[test]
    fn test_compare_same_kind() {
        assert_eq!(
            FieldValue::Int(1).compare(&FieldValue::Int(2)),
            Some(Ordering::Less)
        );
        assert_eq!(
            FieldValue::Int(1).compare(&FieldValue::Text("x".into())),
            None
        );
    }
}
