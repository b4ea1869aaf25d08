//! # sqlweave
//!
//! Compile SQL statement trees into parameterized SQL for a target dialect.
//!
//! ## Quick Example
//!
//! ```
//! use sqlweave::prelude::*;
//!
//! let query = Query {
//!     where_clause: Some(Where::new(Conditions::new().push(Condition::eq("active", true)))),
//!     count: 10,
//!     ..Query::from_table(Table::new("users"))
//! };
//!
//! let compiled = sqlweave::compile("postgres", &query.into()).unwrap();
//! assert_eq!(compiled.sql, "SELECT *\nFROM users\nWHERE\nactive = $1\nLIMIT 10;");
//! assert_eq!(compiled.args, vec![Value::Bool(true)]);
//! ```
//!
//! ## Dialects
//!
//! | Key        | Placeholder | Limit                   | Procedures          |
//! |------------|-------------|-------------------------|---------------------|
//! | `ansi`     | `?`         | `LIMIT offset,count`    | session variables   |
//! | `mysql`    | `?`         | `LIMIT offset,count`    | session variables   |
//! | `postgres` | `$n`        | `LIMIT count OFFSET n`  | native `CALL`       |
//!
//! Custom dialects implement [`dialect::Dialect`] and are registered on a
//! [`registry::RegistryBuilder`].

pub mod ast;
pub mod compiler;
pub mod config;
pub mod dialect;
pub mod error;
pub mod registry;
pub mod writer;

pub mod prelude {
    pub use crate::ast::*;
    pub use crate::compiler::{CompiledQuery, Compiler, SqlCompiler};
    pub use crate::config::Config;
    pub use crate::dialect::{CanonicalType, Dialect};
    pub use crate::error::*;
    pub use crate::registry::{Registry, RegistryBuilder};
    pub use crate::writer::Layout;
}

/// Compile an expression with one of the built-in dialects.
///
/// # Example
///
/// ```
/// use sqlweave::ast::Text;
///
/// let text = Text::new("select * from t where c > {p}").param("p", 1);
/// let compiled = sqlweave::compile("ansi", &text.into()).unwrap();
/// assert_eq!(compiled.sql, "select * from t where c > ?");
/// ```
pub fn compile(
    dialect: &str,
    expr: &ast::Expression,
) -> error::Result<compiler::CompiledQuery> {
    registry::Registry::builtin().compile(dialect, expr)
}
