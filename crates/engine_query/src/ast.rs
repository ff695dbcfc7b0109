//! The filter AST.

/// A single field comparison.
///
/// The operator is kept as its raw token (`"=="`, `"=gt="`, ...); it is
/// validated against the supported set at translation time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Comparison {
    /// Dotted field path, e.g. `counterparty.name`.
    pub field: String,
    /// Raw operator token.
    pub operator: String,
    /// Literal arguments; one for scalar operators, several for
    /// `=in=`/`=out=`.
    pub values: Vec<String>,
}

/// An immutable boolean filter over trades.
///
/// Produced by [`crate::parse_query`] and consumed once by
/// [`crate::translate`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FilterExpression {
    /// Every child must match.
    And(Vec<FilterExpression>),
    /// At least one child must match.
    Or(Vec<FilterExpression>),
    /// A leaf comparison.
    Comparison(Comparison),
}

impl FilterExpression {
    /// Convenience constructor for a leaf comparison.
    pub fn comparison(
        field: impl Into<String>,
        operator: impl Into<String>,
        values: Vec<String>,
    ) -> Self {
        FilterExpression::Comparison(Comparison {
            field: field.into(),
            operator: operator.into(),
            values,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comparison_constructor() {
        let expr = FilterExpression::comparison("tradeId", "==", vec!["10000".into()]);
        match expr {
            FilterExpression::Comparison(c) => {
                assert_eq!(c.field, "tradeId");
                assert_eq!(c.operator, "==");
                assert_eq!(c.values, ["10000"]);
            }
            _ => panic!("expected comparison"),
        }
    }
}
