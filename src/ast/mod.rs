pub mod clauses;
pub mod conditions;
pub mod expr;
pub mod operators;
pub mod statements;
pub mod values;

pub use self::clauses::{
    Aggregate, Column, Field, FromClause, GroupBy, Having, Join, OrderBy, OrderField, Select,
    Table, Where,
};
pub use self::conditions::{Condition, Conditions};
pub use self::expr::{Expression, NodeKind};
pub use self::operators::{AggregateFunc, JoinKind, Operator, ParameterDirection, SortOrder};
pub use self::statements::{Delete, Insert, Parameter, Procedure, Query, Set, Text, Update};
pub use self::values::Value;
