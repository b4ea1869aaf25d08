use serde::{Deserialize, Serialize};

use crate::ast::{
    Aggregate, Column, Condition, Conditions, Delete, Field, FromClause, GroupBy, Having, Insert,
    Join, Operator, OrderBy, Parameter, Procedure, Query, Select, Table, Text, Update, Value,
    Where,
};

/// Kind tag of an expression node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    Query,
    Insert,
    Update,
    Delete,
    Text,
    Procedure,
    Table,
    Column,
    Value,
    Parameter,
    Output,
    Condition,
    Conditions,
    Aggregate,
    Select,
    From,
    Join,
    Where,
    GroupBy,
    Having,
    OrderBy,
    Field,
    Null,
    Sql,
    Operator,
    Zero,
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}

/// A node of the statement tree.
///
/// The set of node kinds is closed; compilers match on it exhaustively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    Query(Box<Query>),
    Insert(Box<Insert>),
    Update(Box<Update>),
    Delete(Box<Delete>),
    /// Raw SQL with `{name}` placeholders
    Text(Text),
    /// Stored procedure call
    Procedure(Procedure),
    Table(Table),
    Column(Column),
    /// Literal, bound as an argument unless NULL
    Value(Value),
    Parameter(Parameter),
    /// Reference to an output variable of a procedure call
    Output(String),
    Condition(Box<Condition>),
    Conditions(Conditions),
    Aggregate(Box<Aggregate>),
    Select(Select),
    From(FromClause),
    Join(Join),
    Where(Where),
    GroupBy(GroupBy),
    Having(Having),
    OrderBy(OrderBy),
    Field(Box<Field>),
    /// The NULL keyword
    Null,
    /// Raw SQL emitted verbatim
    Sql(String),
    Operator(Operator),
    /// The empty expression; renders nothing
    Zero,
}

impl Expression {
    /// What kind of node this is.
    pub fn kind(&self) -> NodeKind {
        match self {
            Expression::Query(_) => NodeKind::Query,
            Expression::Insert(_) => NodeKind::Insert,
            Expression::Update(_) => NodeKind::Update,
            Expression::Delete(_) => NodeKind::Delete,
            Expression::Text(_) => NodeKind::Text,
            Expression::Procedure(_) => NodeKind::Procedure,
            Expression::Table(_) => NodeKind::Table,
            Expression::Column(_) => NodeKind::Column,
            Expression::Value(_) => NodeKind::Value,
            Expression::Parameter(_) => NodeKind::Parameter,
            Expression::Output(_) => NodeKind::Output,
            Expression::Condition(_) => NodeKind::Condition,
            Expression::Conditions(_) => NodeKind::Conditions,
            Expression::Aggregate(_) => NodeKind::Aggregate,
            Expression::Select(_) => NodeKind::Select,
            Expression::From(_) => NodeKind::From,
            Expression::Join(_) => NodeKind::Join,
            Expression::Where(_) => NodeKind::Where,
            Expression::GroupBy(_) => NodeKind::GroupBy,
            Expression::Having(_) => NodeKind::Having,
            Expression::OrderBy(_) => NodeKind::OrderBy,
            Expression::Field(_) => NodeKind::Field,
            Expression::Null => NodeKind::Null,
            Expression::Sql(_) => NodeKind::Sql,
            Expression::Operator(_) => NodeKind::Operator,
            Expression::Zero => NodeKind::Zero,
        }
    }

    /// Shorthand for a column reference.
    pub fn column(name: impl Into<String>) -> Self {
        Expression::Column(Column::new(name))
    }

    /// Shorthand for a bound literal.
    pub fn value(v: impl Into<Value>) -> Self {
        Expression::Value(v.into())
    }

    /// Shorthand for raw SQL.
    pub fn sql(raw: impl Into<String>) -> Self {
        Expression::Sql(raw.into())
    }

    /// Opening marker of a condition group.
    pub fn open_parentheses() -> Self {
        Expression::Sql("(".to_string())
    }

    /// Closing marker of a condition group.
    pub fn close_parentheses() -> Self {
        Expression::Sql(")".to_string())
    }

    pub fn is_open_parentheses(&self) -> bool {
        matches!(self, Expression::Sql(s) if s == "(")
    }

    pub fn is_close_parentheses(&self) -> bool {
        matches!(self, Expression::Sql(s) if s == ")")
    }
}

impl From<Query> for Expression {
    fn from(q: Query) -> Self {
        Expression::Query(Box::new(q))
    }
}

impl From<Insert> for Expression {
    fn from(i: Insert) -> Self {
        Expression::Insert(Box::new(i))
    }
}

impl From<Update> for Expression {
    fn from(u: Update) -> Self {
        Expression::Update(Box::new(u))
    }
}

impl From<Delete> for Expression {
    fn from(d: Delete) -> Self {
        Expression::Delete(Box::new(d))
    }
}

impl From<Text> for Expression {
    fn from(t: Text) -> Self {
        Expression::Text(t)
    }
}

impl From<Procedure> for Expression {
    fn from(p: Procedure) -> Self {
        Expression::Procedure(p)
    }
}

impl From<Condition> for Expression {
    fn from(c: Condition) -> Self {
        Expression::Condition(Box::new(c))
    }
}

impl From<Aggregate> for Expression {
    fn from(a: Aggregate) -> Self {
        Expression::Aggregate(Box::new(a))
    }
}

impl From<Table> for Expression {
    fn from(t: Table) -> Self {
        Expression::Table(t)
    }
}

impl From<Column> for Expression {
    fn from(c: Column) -> Self {
        Expression::Column(c)
    }
}

impl From<Value> for Expression {
    fn from(v: Value) -> Self {
        Expression::Value(v)
    }
}

impl From<Operator> for Expression {
    fn from(op: Operator) -> Self {
        Expression::Operator(op)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_matches_variant() {
        assert_eq!(Expression::column("id").kind(), NodeKind::Column);
        assert_eq!(Expression::value(1).kind(), NodeKind::Value);
        assert_eq!(Expression::Operator(Operator::And).kind(), NodeKind::Operator);
        assert_eq!(Expression::Zero.kind(), NodeKind::Zero);
        assert_eq!(Expression::from(Query::new()).kind(), NodeKind::Query);
    }

    #[test]
    fn test_parentheses_markers() {
        assert!(Expression::open_parentheses().is_open_parentheses());
        assert!(Expression::close_parentheses().is_close_parentheses());
        assert!(!Expression::sql("(x)").is_open_parentheses());
    }
}
