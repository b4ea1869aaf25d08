use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::ast::{
    Column, Expression, FromClause, GroupBy, Having, OrderBy, ParameterDirection, Select, Table,
    Value, Where,
};

/// A SELECT statement.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Query {
    #[serde(default)]
    pub distinct: bool,
    #[serde(default)]
    pub select: Option<Select>,
    #[serde(default)]
    pub from: Option<FromClause>,
    #[serde(default, rename = "where")]
    pub where_clause: Option<Where>,
    #[serde(default)]
    pub group_by: Option<GroupBy>,
    #[serde(default)]
    pub having: Option<Having>,
    #[serde(default)]
    pub order_by: Option<OrderBy>,
    /// Rows to skip
    #[serde(default)]
    pub offset: u64,
    /// Rows to return, 0 for no limit
    #[serde(default)]
    pub count: u64,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// `SELECT * FROM table`
    pub fn from_table(table: Table) -> Self {
        Self {
            from: Some(FromClause::table(table)),
            ..Self::default()
        }
    }
}

/// A `column = value` pair of an INSERT or UPDATE.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Set {
    pub column: Column,
    pub value: Expression,
}

impl Set {
    pub fn new(column: impl Into<String>, value: impl Into<Expression>) -> Self {
        Self {
            column: Column::new(column),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Insert {
    pub table: Table,
    #[serde(default)]
    pub sets: Vec<Set>,
}

impl Insert {
    pub fn new(table: Table) -> Self {
        Self {
            table,
            sets: Vec::new(),
        }
    }

    pub fn set(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.sets.push(Set::new(column, Expression::Value(value.into())));
        self
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Update {
    pub table: Table,
    #[serde(default)]
    pub sets: Vec<Set>,
    #[serde(default, rename = "where")]
    pub where_clause: Option<Where>,
    #[serde(default)]
    pub order_by: Option<OrderBy>,
    #[serde(default)]
    pub count: u64,
}

impl Update {
    pub fn new(table: Table) -> Self {
        Self {
            table,
            ..Self::default()
        }
    }

    pub fn set(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.sets.push(Set::new(column, Expression::Value(value.into())));
        self
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Delete {
    pub table: Table,
    #[serde(default, rename = "where")]
    pub where_clause: Option<Where>,
    #[serde(default)]
    pub order_by: Option<OrderBy>,
    #[serde(default)]
    pub count: u64,
}

impl Delete {
    pub fn new(table: Table) -> Self {
        Self {
            table,
            ..Self::default()
        }
    }
}

/// A named, directed value used by templates and procedure calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(default)]
    pub direction: ParameterDirection,
    #[serde(default)]
    pub value: Value,
}

impl Parameter {
    pub fn new(name: impl Into<String>, direction: ParameterDirection, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            direction,
            value: value.into(),
        }
    }

    pub fn input(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(name, ParameterDirection::In, value)
    }

    pub fn output(name: impl Into<String>) -> Self {
        Self::new(name, ParameterDirection::Out, Value::Null)
    }
}

/// Raw SQL with `{name}` placeholders resolved against `parameters`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Text {
    pub sql: String,
    #[serde(default)]
    pub parameters: HashMap<String, Parameter>,
}

impl Text {
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            parameters: HashMap::new(),
        }
    }

    /// Declare an input parameter.
    pub fn param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        let name = name.into();
        self.parameters
            .insert(name.clone(), Parameter::input(name, value));
        self
    }

    pub fn find_parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters.get(name)
    }
}

/// A stored procedure call.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Procedure {
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
}

impl Procedure {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
        }
    }

    pub fn param(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Parameters with direction `Return`.
    pub fn return_parameters(&self) -> impl Iterator<Item = &Parameter> {
        self.parameters
            .iter()
            .filter(|p| p.direction == ParameterDirection::Return)
    }
}
