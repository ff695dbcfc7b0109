//! RSQL-subset parser.
//!
//! Grammar (subset of RSQL/FIQL as used by the trade search endpoint):
//!
//! ```text
//! query      := or
//! or         := and ( ',' and )*
//! and        := factor ( ';' factor )*
//! factor     := '(' or ')' | comparison
//! comparison := selector operator arguments
//! selector   := [A-Za-z0-9_.]+
//! operator   := '==' | '!=' | '=' [a-z]+ '='
//! arguments  := '(' value ( ',' value )* ')' | value
//! value      := quoted string | run of characters up to ; , ( ) whitespace or end
//! ```
//!
//! Operator tokens are not validated here; an unknown `=xyz=` parses fine
//! and is rejected by the translator, keeping "malformed query" distinct
//! from "unsupported operator".

use crate::ast::{Comparison, FilterExpression};
use crate::error::QueryError;

/// Parses filter text into a [`FilterExpression`].
///
/// # Examples
///
/// ```
/// use engine_query::{parse_query, FilterExpression};
///
/// let ast = parse_query("counterparty.name==BigBank;tradeStatus.tradeStatus==LIVE").unwrap();
/// assert!(matches!(ast, FilterExpression::And(children) if children.len() == 2));
///
/// assert!(parse_query("counterparty.name==").is_err());
/// ```
pub fn parse_query(input: &str) -> Result<FilterExpression, QueryError> {
    let mut parser = Parser::new(input);
    let expr = parser.parse_or()?;
    parser.skip_ws();
    if !parser.at_end() {
        return Err(parser.error("unexpected trailing input"));
    }
    Ok(expr)
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
}

impl Parser {
    fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            pos: 0,
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek();
        if c.is_some() {
            self.pos += 1;
        }
        c
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(|c| c.is_whitespace()) {
            self.pos += 1;
        }
    }

    fn error(&self, message: &str) -> QueryError {
        QueryError::Parse {
            position: self.pos,
            message: message.to_string(),
        }
    }

    fn parse_or(&mut self) -> Result<FilterExpression, QueryError> {
        let mut children = vec![self.parse_and()?];
        loop {
            self.skip_ws();
            if self.peek() == Some(',') {
                self.pos += 1;
                children.push(self.parse_and()?);
            } else {
                break;
            }
        }
        Ok(if children.len() == 1 {
            children.pop().expect("one child")
        } else {
            FilterExpression::Or(children)
        })
    }

    fn parse_and(&mut self) -> Result<FilterExpression, QueryError> {
        let mut children = vec![self.parse_factor()?];
        loop {
            self.skip_ws();
            if self.peek() == Some(';') {
                self.pos += 1;
                children.push(self.parse_factor()?);
            } else {
                break;
            }
        }
        Ok(if children.len() == 1 {
            children.pop().expect("one child")
        } else {
            FilterExpression::And(children)
        })
    }

    fn parse_factor(&mut self) -> Result<FilterExpression, QueryError> {
        self.skip_ws();
        if self.peek() == Some('(') {
            self.pos += 1;
            let inner = self.parse_or()?;
            self.skip_ws();
            if self.bump() != Some(')') {
                return Err(self.error("expected ')'"));
            }
            return Ok(inner);
        }
        self.parse_comparison()
    }

    fn parse_comparison(&mut self) -> Result<FilterExpression, QueryError> {
        let field = self.parse_selector()?;
        let operator = self.parse_operator()?;
        let values = self.parse_arguments()?;
        Ok(FilterExpression::Comparison(Comparison {
            field,
            operator,
            values,
        }))
    }

    fn parse_selector(&mut self) -> Result<String, QueryError> {
        self.skip_ws();
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
        {
            self.pos += 1;
        }
        if self.pos == start {
            return Err(self.error("expected a field selector"));
        }
        Ok(self.chars[start..self.pos].iter().collect())
    }

    fn parse_operator(&mut self) -> Result<String, QueryError> {
        match self.peek() {
            Some('=') if self.chars.get(self.pos + 1) == Some(&'=') => {
                self.pos += 2;
                Ok("==".to_string())
            }
            Some('!') if self.chars.get(self.pos + 1) == Some(&'=') => {
                self.pos += 2;
                Ok("!=".to_string())
            }
            Some('=') => {
                // FIQL form: '=' word '='
                let start = self.pos;
                self.pos += 1;
                while self.peek().is_some_and(|c| c.is_ascii_alphabetic()) {
                    self.pos += 1;
                }
                if self.bump() != Some('=') {
                    self.pos = start;
                    return Err(self.error("expected an operator"));
                }
                Ok(self.chars[start..self.pos].iter().collect())
            }
            _ => Err(self.error("expected an operator")),
        }
    }

    fn parse_arguments(&mut self) -> Result<Vec<String>, QueryError> {
        self.skip_ws();
        if self.peek() == Some('(') {
            self.pos += 1;
            let mut values = vec![self.parse_value()?];
            loop {
                self.skip_ws();
                match self.bump() {
                    Some(',') => values.push(self.parse_value()?),
                    Some(')') => return Ok(values),
                    _ => return Err(self.error("expected ',' or ')' in value list")),
                }
            }
        }
        Ok(vec![self.parse_value()?])
    }

    fn parse_value(&mut self) -> Result<String, QueryError> {
        self.skip_ws();
        match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                self.pos += 1;
                let start = self.pos;
                while self.peek().is_some_and(|c| c != quote) {
                    self.pos += 1;
                }
                if self.bump() != Some(quote) {
                    return Err(self.error("unterminated quoted value"));
                }
                Ok(self.chars[start..self.pos - 1].iter().collect())
            }
            _ => {
                let start = self.pos;
                while self
                    .peek()
                    .is_some_and(|c| !matches!(c, ';' | ',' | '(' | ')') && !c.is_whitespace())
                {
                    self.pos += 1;
                }
                let value: String = self.chars[start..self.pos].iter().collect();
                if value.is_empty() {
                    return Err(self.error("expected a value"));
                }
                Ok(value)
            }
        }
    }
}
