//! Expression compilers.
//!
//! [`SqlCompiler`] dispatches on the top-level node kind:
//!
//! | Node                                  | Compiler                    |
//! |---------------------------------------|-----------------------------|
//! | `Query`, `Insert`, `Update`, `Delete` | [`statement`]               |
//! | `Text`                                | [`template`]                |
//! | `Procedure`                           | [`procedure`]               |
//!
//! Every other kind is rejected with `UnsupportedExpression`.

pub mod procedure;
pub mod statement;
pub mod template;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::ast::{Expression, Value};
use crate::dialect::{Dialect, PlaceholderMode};
use crate::error::{Error, Position, Result};
use crate::writer::Layout;

pub use procedure::compile_procedure;
pub use statement::StatementCompiler;
pub use template::compile_text;

/// SQL text plus the arguments bound to its placeholders, in order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CompiledQuery {
    pub sql: String,
    pub args: Vec<Value>,
}

impl CompiledQuery {
    pub fn new(sql: impl Into<String>, args: Vec<Value>) -> Self {
        Self {
            sql: sql.into(),
            args,
        }
    }
}

/// Hands out placeholder tokens for one compilation.
#[derive(Debug)]
pub(crate) struct Placeholders {
    mode: PlaceholderMode,
    token: &'static str,
    index: usize,
}

impl Placeholders {
    pub(crate) fn new(dialect: &dyn Dialect) -> Self {
        Self {
            mode: dialect.placeholder_mode(),
            token: dialect.placeholder(),
            index: 0,
        }
    }

    /// The next placeholder. `name` is only used in named mode; unnamed
    /// values there are called `p1`, `p2`, ...
    pub(crate) fn next(&mut self, name: Option<&str>) -> String {
        match self.mode {
            PlaceholderMode::Positional => self.token.to_string(),
            PlaceholderMode::Named => {
                self.index += 1;
                match name {
                    Some(name) => format!("{}{}", self.token, name),
                    None => format!("{}p{}", self.token, self.index),
                }
            }
            PlaceholderMode::Indexed => {
                self.index += 1;
                format!("{}{}", self.token, self.index)
            }
        }
    }
}

/// Compiles an expression tree to SQL for one backend.
pub trait Compiler: Send + Sync + std::fmt::Debug {
    fn compile(&self, expr: &Expression) -> Result<CompiledQuery>;
}

/// The compiler shared by all built-in dialects; all variation comes from
/// its [`Dialect`].
#[derive(Debug, Clone)]
pub struct SqlCompiler {
    dialect: Arc<dyn Dialect>,
    layout: Layout,
}

impl SqlCompiler {
    pub fn new(dialect: Arc<dyn Dialect>) -> Self {
        Self {
            dialect,
            layout: Layout::default(),
        }
    }

    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }
}

impl Compiler for SqlCompiler {
    fn compile(&self, expr: &Expression) -> Result<CompiledQuery> {
        let dialect = self.dialect.as_ref();
        let compiled = match expr {
            Expression::Zero => return Err(Error::invalid("compile expression is empty")),
            Expression::Text(text) => compile_text(dialect, text)?,
            Expression::Procedure(procedure) => compile_procedure(dialect, procedure, self.layout)?,
            Expression::Query(_)
            | Expression::Insert(_)
            | Expression::Update(_)
            | Expression::Delete(_) => StatementCompiler::new(dialect, self.layout).compile(expr)?,
            other => return Err(Error::unsupported(other.kind(), Position::TopLevel)),
        };

        tracing::debug!(
            dialect = dialect.name(),
            kind = %expr.kind(),
            args = compiled.args.len(),
            "compiled expression"
        );
        Ok(compiled)
    }
}

#[cfg(test)]
mod placeholder_tests {
    use super::*;
    use crate::dialect::{AnsiDialect, PostgresDialect};

    #[derive(Debug)]
    struct AtNamed;

    impl Dialect for AtNamed {
        fn name(&self) -> &'static str {
            "at"
        }

        fn supports_named_parameter(&self) -> bool {
            true
        }

        fn placeholder(&self) -> &'static str {
            "@"
        }
    }

    #[test]
    fn test_positional_repeats_token() {
        let mut p = Placeholders::new(&AnsiDialect);
        assert_eq!(p.next(None), "?");
        assert_eq!(p.next(Some("id")), "?");
    }

    #[test]
    fn test_indexed_counts_from_one() {
        let mut p = Placeholders::new(&PostgresDialect);
        assert_eq!(p.next(None), "$1");
        assert_eq!(p.next(Some("id")), "$2");
    }

    #[test]
    fn test_named_uses_name_or_synthesizes() {
        let mut p = Placeholders::new(&AtNamed);
        assert_eq!(p.next(Some("id")), "@id");
        assert_eq!(p.next(None), "@p2");
    }
}
