//! AST-to-predicate translation.

use std::cmp::Ordering;

use engine_core::Trade;

use crate::ast::{Comparison, FilterExpression};
use crate::error::QueryError;
use crate::schema::{coerce, resolve_field, FieldAccessor, FieldKind, FieldValue};

/// Operators the translator supports.
const SUPPORTED_OPERATORS: [&str; 9] = [
    "==", "!=", "=gt=", "=lt=", "=ge=", "=le=", "=in=", "=out=", "=like=",
];

/// A compiled filter over trades.
///
/// Built once from a [`FilterExpression`] and applied to any number of
/// trades. Combining predicates mirrors the AST: `And`/`Or` nodes fold
/// their children's predicates together.
pub struct TradePredicate {
    test: Box<dyn Fn(&Trade) -> bool + Send + Sync>,
}

impl std::fmt::Debug for TradePredicate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TradePredicate").finish_non_exhaustive()
    }
}

impl TradePredicate {
    /// The no-op predicate: matches every trade. Empty `And`/`Or` nodes
    /// collapse to this.
    pub fn match_all() -> Self {
        Self {
            test: Box::new(|_| true),
        }
    }

    /// Evaluates the predicate against a trade.
    pub fn test(&self, trade: &Trade) -> bool {
        (self.test)(trade)
    }

    fn from_fn(f: impl Fn(&Trade) -> bool + Send + Sync + 'static) -> Self {
        Self { test: Box::new(f) }
    }

    fn all(children: Vec<TradePredicate>) -> Self {
        if children.is_empty() {
            return Self::match_all();
        }
        Self::from_fn(move |trade| children.iter().all(|p| p.test(trade)))
    }

    fn any(children: Vec<TradePredicate>) -> Self {
        if children.is_empty() {
            return Self::match_all();
        }
        Self::from_fn(move |trade| children.iter().any(|p| p.test(trade)))
    }
}

/// Translates a filter AST into a [`TradePredicate`].
///
/// Field paths are resolved and literals coerced up front, so a filter
/// over an unknown field or with an unsupported operator fails here, not
/// silently at evaluation time.
///
/// # Errors
///
/// - [`QueryError::InvalidOperator`] for operator tokens outside the
///   supported set
/// - [`QueryError::UnknownField`] for unresolvable field paths
/// - [`QueryError::InvalidValue`] when a literal cannot be coerced to the
///   field's type
/// - [`QueryError::TypeMismatch`] for `=like=` on non-text fields
///
/// # Examples
///
/// ```
/// use engine_query::{parse_query, translate, QueryError};
///
/// let ast = parse_query("counterparty.name=xyz=ABC").unwrap();
/// assert!(matches!(
///     translate(&ast),
///     Err(QueryError::InvalidOperator { .. })
/// ));
/// ```
pub fn translate(expr: &FilterExpression) -> Result<TradePredicate, QueryError> {
    match expr {
        FilterExpression::And(children) => {
            let translated = children.iter().map(translate).collect::<Result<_, _>>()?;
            Ok(TradePredicate::all(translated))
        }
        FilterExpression::Or(children) => {
            let translated = children.iter().map(translate).collect::<Result<_, _>>()?;
            Ok(TradePredicate::any(translated))
        }
        FilterExpression::Comparison(cmp) => translate_comparison(cmp),
    }
}

fn translate_comparison(cmp: &Comparison) -> Result<TradePredicate, QueryError> {
    if !SUPPORTED_OPERATORS.contains(&cmp.operator.as_str()) {
        return Err(QueryError::InvalidOperator {
            operator: cmp.operator.clone(),
        });
    }

    let (kind, accessor) = resolve_field(&cmp.field)?;

    match cmp.operator.as_str() {
        "==" => {
            let target = coerce_first(kind, cmp)?;
            Ok(value_predicate(accessor, move |v| v.matches(&target)))
        }
        "!=" => {
            let target = coerce_first(kind, cmp)?;
            Ok(value_predicate(accessor, move |v| !v.matches(&target)))
        }
        "=gt=" => ordered_predicate(kind, accessor, cmp, |o| o == Ordering::Greater),
        "=lt=" => ordered_predicate(kind, accessor, cmp, |o| o == Ordering::Less),
        "=ge=" => ordered_predicate(kind, accessor, cmp, |o| o != Ordering::Less),
        "=le=" => ordered_predicate(kind, accessor, cmp, |o| o != Ordering::Greater),
        "=in=" => {
            let targets = coerce_all(kind, cmp)?;
            Ok(value_predicate(accessor, move |v| {
                targets.iter().any(|t| v.matches(t))
            }))
        }
        "=out=" => {
            let targets = coerce_all(kind, cmp)?;
            Ok(value_predicate(accessor, move |v| {
                !targets.iter().any(|t| v.matches(t))
            }))
        }
        "=like=" => {
            if kind != FieldKind::Text {
                return Err(QueryError::TypeMismatch {
                    operator: cmp.operator.clone(),
                    field: cmp.field.clone(),
                });
            }
            let pattern = first_value(cmp)?.to_lowercase();
            Ok(value_predicate(accessor, move |v| match v {
                FieldValue::Text(text) => wildcard_match(&text.to_lowercase(), &pattern),
                _ => false,
            }))
        }
        _ => unreachable!("operator validated against the supported set"),
    }
}

/// Builds a predicate over the field's value; rows where the field is
/// unset match nothing.
fn value_predicate(
    accessor: FieldAccessor,
    test: impl Fn(FieldValue) -> bool + Send + Sync + 'static,
) -> TradePredicate {
    TradePredicate::from_fn(move |trade| accessor(trade).map(&test).unwrap_or(false))
}

fn ordered_predicate(
    kind: FieldKind,
    accessor: FieldAccessor,
    cmp: &Comparison,
    accept: impl Fn(Ordering) -> bool + Send + Sync + 'static,
) -> Result<TradePredicate, QueryError> {
    let target = coerce_first(kind, cmp)?;
    Ok(value_predicate(accessor, move |v| {
        v.compare(&target).map(&accept).unwrap_or(false)
    }))
}

fn first_value(cmp: &Comparison) -> Result<&str, QueryError> {
    cmp.values
        .first()
        .map(String::as_str)
        .ok_or_else(|| QueryError::InvalidValue {
            value: String::new(),
            field: cmp.field.clone(),
        })
}

fn coerce_first(kind: FieldKind, cmp: &Comparison) -> Result<FieldValue, QueryError> {
    coerce(kind, &cmp.field, first_value(cmp)?)
}

fn coerce_all(kind: FieldKind, cmp: &Comparison) -> Result<Vec<FieldValue>, QueryError> {
    cmp.values
        .iter()
        .map(|v| coerce(kind, &cmp.field, v))
        .collect()
}

/// `*`-wildcard matching, both sides already lower-cased.
fn wildcard_match(text: &str, pattern: &str) -> bool {
    let segments: Vec<&str> = pattern.split('*').collect();
    if segments.len() == 1 {
        return text == pattern;
    }

    let mut remainder = text;
    for (i, segment) in segments.iter().enumerate() {
        if segment.is_empty() {
            continue;
        }
        if i == 0 {
            match remainder.strip_prefix(segment) {
                Some(rest) => remainder = rest,
                None => return false,
            }
        } else if i == segments.len() - 1 {
            return remainder.ends_with(segment);
        } else {
            match remainder.find(segment) {
                Some(at) => remainder = &remainder[at + segment.len()..],
                None => return false,
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_query;
    use engine_core::{
        AppUser, Book, Counterparty, Date, TradeId, TradeStatus, UserLogin,
    };

    fn sample_trade() -> Trade {
        let now = chrono::NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        Trade {
            trade_id: TradeId::new(10000),
            version: 2,
            active: true,
            status: TradeStatus::Amended,
            trade_date: Date::from_ymd(2025, 1, 1).unwrap(),
            start_date: Some(Date::from_ymd(2025, 1, 2).unwrap()),
            maturity_date: Some(Date::from_ymd(2026, 1, 2).unwrap()),
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
            trader: Some(AppUser {
                id: 1,
                login_id: UserLogin::new("jsmith"),
                first_name: "Jane".into(),
                active: true,
            }),
            inputter: None,
            legs: vec![],
            created_at: now,
            last_touched: now,
            deactivated_at: None,
        }
    }

    fn matches(query: &str, trade: &Trade) -> bool {
        translate(&parse_query(query).unwrap()).unwrap().test(trade)
    }

    #[test]
    fn test_case_insensitive_equality() {
        let trade = sample_trade();
        assert!(matches("counterparty.name==BIGBANK", &trade));
        assert!(matches("counterparty.name==bigbank", &trade));
        assert!(!matches("counterparty.name==OtherBank", &trade));
    }

    #[test]
    fn test_and_combination() {
        let trade = sample_trade();
        assert!(matches(
            "counterparty.name==BigBank;tradeStatus.tradeStatus==AMENDED",
            &trade
        ));
        assert!(!matches(
            "counterparty.name==BigBank;tradeStatus.tradeStatus==NEW",
            &trade
        ));
    }

    #[test]
    fn test_or_combination() {
        let trade = sample_trade();
        assert!(matches(
            "tradeStatus.tradeStatus==NEW,tradeStatus.tradeStatus==AMENDED",
            &trade
        ));
    }

    #[test]
    fn test_not_equal() {
        let trade = sample_trade();
        assert!(matches("counterparty.name!=OtherBank", &trade));
        assert!(!matches("counterparty.name!=bigbank", &trade));
    }

    #[test]
    fn test_ordered_numeric() {
        let trade = sample_trade();
        assert!(matches("version=gt=1", &trade));
        assert!(matches("version=ge=2", &trade));
        assert!(matches("version=le=2", &trade));
        assert!(!matches("version=lt=2", &trade));
        assert!(matches("tradeId=ge=10000", &trade));
    }

    #[test]
    fn test_ordered_dates() {
        let trade = sample_trade();
        assert!(matches("tradeDate=ge=2025-01-01", &trade));
        assert!(matches("maturityDate=lt=2027-01-01", &trade));
        assert!(!matches("maturityDate=lt=2025-01-01", &trade));
    }

    #[test]
    fn test_in_and_out() {
        let trade = sample_trade();
        assert!(matches("tradeStatus.tradeStatus=in=(NEW,AMENDED)", &trade));
        assert!(!matches("tradeStatus.tradeStatus=in=(NEW,CANCELLED)", &trade));
        assert!(matches("tradeStatus.tradeStatus=out=(TERMINATED,CANCELLED)", &trade));
        assert!(!matches("tradeStatus.tradeStatus=out=(AMENDED)", &trade));
    }

    #[test]
    fn test_like_wildcards() {
        let trade = sample_trade();
        assert!(matches("counterparty.name=like=Big*", &trade));
        assert!(matches("counterparty.name=like=*bank", &trade));
        assert!(matches("counterparty.name=like=*igba*", &trade));
        assert!(matches("counterparty.name=like=BigBank", &trade));
        assert!(!matches("counterparty.name=like=Small*", &trade));
    }

    #[test]
    fn test_like_on_numeric_field_rejected() {
        let ast = parse_query("version=like=2*").unwrap();
        assert!(matches!(
            translate(&ast),
            Err(QueryError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_unset_field_matches_nothing() {
        let trade = sample_trade(); // utiCode is None
        assert!(!matches("utiCode==ABC", &trade));
        assert!(!matches("utiCode!=ABC", &trade));
    }

    #[test]
    fn test_unsupported_operator_fails_translation() {
        let ast = parse_query("counterparty.name=xyz=ABC").unwrap();
        let err = translate(&ast).unwrap_err();
        assert_eq!(
            err,
            QueryError::InvalidOperator {
                operator: "=xyz=".into()
            }
        );
    }

    #[test]
    fn test_unknown_field_fails_translation() {
        let ast = parse_query("counterparty.swiftCode==ABC").unwrap();
        assert!(matches!(
            translate(&ast),
            Err(QueryError::UnknownField { .. })
        ));
    }

    #[test]
    fn test_invalid_literal_fails_translation() {
        let ast = parse_query("version==two").unwrap();
        assert!(matches!(
            translate(&ast),
            Err(QueryError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_empty_and_collapses_to_match_all() {
        let predicate = translate(&FilterExpression::And(vec![])).unwrap();
        assert!(predicate.test(&sample_trade()));
        let predicate = translate(&FilterExpression::Or(vec![])).unwrap();
        assert!(predicate.test(&sample_trade()));
    }

    #[test]
    fn test_ownership_field() {
        let trade = sample_trade();
        assert!(matches("traderUser.loginId==JSMITH", &trade));
    }
}
