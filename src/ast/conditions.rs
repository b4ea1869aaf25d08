use serde::{Deserialize, Serialize};

use crate::ast::{Expression, Operator, Value};

/// A boolean condition.
///
/// Which sides are present decides the rendering: neither renders the
/// operator alone, left only is postfix (`x IS NULL`), right only is prefix
/// (`NOT (...)`), both is infix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    #[serde(default)]
    pub left: Option<Expression>,
    pub op: Operator,
    #[serde(default)]
    pub right: Option<Expression>,
}

impl Condition {
    pub fn new(left: Option<Expression>, op: Operator, right: Option<Expression>) -> Self {
        Self { left, op, right }
    }

    /// `left op right`
    pub fn binary(left: impl Into<Expression>, op: Operator, right: impl Into<Expression>) -> Self {
        Self::new(Some(left.into()), op, Some(right.into()))
    }

    /// `column op ?` with the value bound.
    pub fn compare(column: &str, op: Operator, value: impl Into<Value>) -> Self {
        Self::binary(Expression::column(column), op, Expression::Value(value.into()))
    }

    pub fn eq(column: &str, value: impl Into<Value>) -> Self {
        Self::compare(column, Operator::Eq, value)
    }

    /// `column IN (?, ?, ...)`, one placeholder per list element.
    pub fn in_list(column: &str, values: impl Into<Value>) -> Self {
        Self::compare(column, Operator::In, values)
    }

    /// `left op`
    pub fn postfix(left: impl Into<Expression>, op: Operator) -> Self {
        Self::new(Some(left.into()), op, None)
    }

    /// `op (right)`
    pub fn prefix(op: Operator, right: impl Into<Expression>) -> Self {
        Self::new(None, op, Some(right.into()))
    }

    pub fn is_null(column: &str) -> Self {
        Self::postfix(Expression::column(column), Operator::IsNull)
    }
}

/// An ordered condition sequence.
///
/// Items are conditions, boolean connectors (`Expression::Operator`) and
/// the parenthesis markers from [`Expression::open_parentheses`] and
/// [`Expression::close_parentheses`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Conditions {
    #[serde(default)]
    pub items: Vec<Expression>,
}

impl Conditions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn push(mut self, item: impl Into<Expression>) -> Self {
        self.items.push(item.into());
        self
    }

    pub fn and(self) -> Self {
        self.push(Operator::And)
    }

    pub fn or(self) -> Self {
        self.push(Operator::Or)
    }

    pub fn open(self) -> Self {
        self.push(Expression::open_parentheses())
    }

    pub fn close(self) -> Self {
        self.push(Expression::close_parentheses())
    }

    /// Whether every close marker has a matching open marker before it and
    /// every open marker is closed.
    pub fn is_balanced(&self) -> bool {
        let mut depth: usize = 0;
        for item in &self.items {
            if item.is_open_parentheses() {
                depth += 1;
            } else if item.is_close_parentheses() {
                match depth.checked_sub(1) {
                    Some(d) => depth = d,
                    None => return false,
                }
            }
        }
        depth == 0
    }
}

impl<C: Into<Expression>> FromIterator<C> for Conditions {
    fn from_iter<I: IntoIterator<Item = C>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balance() {
        let ok = Conditions::new()
            .push(Condition::eq("a", 1))
            .and()
            .open()
            .push(Condition::eq("b", 2))
            .or()
            .push(Condition::eq("c", 3))
            .close();
        assert!(ok.is_balanced());

        assert!(!Conditions::new().open().is_balanced());
        assert!(!Conditions::new().close().open().is_balanced());
        assert!(Conditions::new().is_balanced());
    }
}
