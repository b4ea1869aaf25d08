use serde::{Deserialize, Serialize};

use crate::ast::{AggregateFunc, Conditions, Expression, JoinKind, SortOrder};

/// A table reference with an optional alias.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    #[serde(default)]
    pub alias: Option<String>,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: None,
        }
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }
}

/// A column reference, qualified (`t.c`) or not.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Column(pub String);

impl Column {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A projected expression with an optional output alias.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub expr: Expression,
    #[serde(default)]
    pub alias: Option<String>,
}

impl Field {
    pub fn new(expr: impl Into<Expression>) -> Self {
        Self {
            expr: expr.into(),
            alias: None,
        }
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }
}

/// `FUNC(expr)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aggregate {
    pub func: AggregateFunc,
    pub expr: Expression,
}

impl Aggregate {
    pub fn new(func: AggregateFunc, expr: impl Into<Expression>) -> Self {
        Self {
            func,
            expr: expr.into(),
        }
    }
}

/// Projection list. Empty renders `*`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Select {
    #[serde(default)]
    pub fields: Vec<Field>,
}

impl Select {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }
}

/// Source tables followed by joins.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FromClause {
    #[serde(default)]
    pub tables: Vec<Table>,
    #[serde(default)]
    pub joins: Vec<Join>,
}

impl FromClause {
    pub fn table(table: Table) -> Self {
        Self {
            tables: vec![table],
            joins: Vec::new(),
        }
    }

    pub fn join(mut self, join: Join) -> Self {
        self.joins.push(join);
        self
    }
}

/// `<kind> JOIN <table> [ON <conditions>]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Join {
    #[serde(default)]
    pub kind: JoinKind,
    pub table: Table,
    #[serde(default)]
    pub conditions: Conditions,
}

impl Join {
    pub fn new(kind: JoinKind, table: Table, conditions: Conditions) -> Self {
        Self {
            kind,
            table,
            conditions,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Where {
    #[serde(default)]
    pub conditions: Conditions,
}

impl Where {
    pub fn new(conditions: Conditions) -> Self {
        Self { conditions }
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GroupBy {
    #[serde(default)]
    pub fields: Vec<Expression>,
}

impl GroupBy {
    pub fn new(fields: Vec<Expression>) -> Self {
        Self { fields }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Only rendered when the query also groups.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Having {
    #[serde(default)]
    pub conditions: Conditions,
}

impl Having {
    pub fn new(conditions: Conditions) -> Self {
        Self { conditions }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderField {
    pub expr: Expression,
    #[serde(default)]
    pub direction: SortOrder,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OrderBy {
    #[serde(default)]
    pub fields: Vec<OrderField>,
}

impl OrderBy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn asc(self, expr: impl Into<Expression>) -> Self {
        self.by(expr, SortOrder::Asc)
    }

    pub fn desc(self, expr: impl Into<Expression>) -> Self {
        self.by(expr, SortOrder::Desc)
    }

    pub fn by(mut self, expr: impl Into<Expression>, direction: SortOrder) -> Self {
        self.fields.push(OrderField {
            expr: expr.into(),
            direction,
        });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
