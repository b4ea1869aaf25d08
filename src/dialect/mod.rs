//! SQL dialect descriptors.
//!
//! A dialect is pure policy: how placeholders look, how identifiers are
//! quoted, how rows are limited, how procedures are called and how native
//! type names map onto [`CanonicalType`]. The compilers consult it and never
//! branch on a dialect's name.

pub mod ansi;
pub mod mysql;
pub mod postgres;
pub mod types;

pub use ansi::AnsiDialect;
pub use mysql::MysqlDialect;
pub use postgres::PostgresDialect;
pub use types::{CanonicalType, ansi_type};

use crate::compiler::CompiledQuery;

/// How a bound value is written into the SQL text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderMode {
    /// The same token for every value, e.g. `?`.
    Positional,
    /// Token followed by a parameter name, e.g. `@name`.
    Named,
    /// Token followed by a 1-based index, e.g. `$1`.
    Indexed,
}

/// How a query's `offset`/`count` are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitStyle {
    /// `LIMIT offset,count`
    OffsetComma,
    /// `LIMIT count OFFSET offset`
    LimitOffset,
    /// No LIMIT clause; wrap the query in a `ROW_NUMBER()` window.
    RowNumber,
}

/// How a stored procedure call and its output parameters are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcedureStyle {
    /// Output parameters travel through `@session` variables which a trailing
    /// `SELECT` reads back.
    SessionVariables,
    /// The backend returns output parameters itself; a plain `CALL` with
    /// `NULL` in output positions.
    NativeCall,
}

/// Trait for dialect-specific SQL policy.
pub trait Dialect: Send + Sync + std::fmt::Debug {
    /// Registry key of the dialect.
    fn name(&self) -> &'static str;

    /// Named parameters, like `@name`.
    fn supports_named_parameter(&self) -> bool {
        false
    }

    /// Indexed parameters, like `$1`.
    fn supports_indexed_parameter(&self) -> bool {
        false
    }

    /// Base placeholder token, like `?`, `$` or `@`.
    fn placeholder(&self) -> &'static str {
        "?"
    }

    /// Quote an identifier, doubling any embedded quote character.
    fn quote(&self, ident: &str) -> String {
        format!("\"{}\"", ident.replace('"', "\"\""))
    }

    /// Convert a native type name to a canonical type.
    fn native_type(&self, native: &str) -> CanonicalType {
        ansi_type(native)
    }

    fn limit_style(&self) -> LimitStyle {
        LimitStyle::OffsetComma
    }

    fn procedure_style(&self) -> ProcedureStyle {
        ProcedureStyle::SessionVariables
    }

    fn statement_terminator(&self) -> &'static str {
        ";"
    }

    /// Query describing the table or view `name`.
    fn table_query(&self, _name: &str) -> Option<CompiledQuery> {
        None
    }

    /// Query listing the columns of table `name`.
    fn columns_query(&self, _name: &str) -> Option<CompiledQuery> {
        None
    }

    /// Query describing the procedure or function `name`.
    fn function_query(&self, _name: &str) -> Option<CompiledQuery> {
        None
    }

    /// Query listing the parameters of procedure `name`.
    fn parameters_query(&self, _name: &str) -> Option<CompiledQuery> {
        None
    }

    /// Placeholder mode, named taking priority over indexed.
    fn placeholder_mode(&self) -> PlaceholderMode {
        if self.supports_named_parameter() {
            PlaceholderMode::Named
        } else if self.supports_indexed_parameter() {
            PlaceholderMode::Indexed
        } else {
            PlaceholderMode::Positional
        }
    }
}
