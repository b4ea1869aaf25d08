//! Compiler test modules.
//!
//! Tests are organized by category:
//! - `statement`: SELECT, INSERT, UPDATE, DELETE rendering
//! - `template`: `{name}` substitution
//! - `procedure`: session-variable and native procedure calls
//! - `dialects`: placeholder modes, quoting and limiting per dialect

mod dialects;
mod procedure;
mod template;

use std::sync::Arc;

use crate::ast::Expression;
use crate::compiler::{CompiledQuery, Compiler, SqlCompiler};
use crate::dialect::{Dialect, LimitStyle};
use crate::error::Result;
use crate::writer::Layout;

/// `@name` placeholders.
#[derive(Debug)]
pub(super) struct NamedDialect;

impl Dialect for NamedDialect {
    fn name(&self) -> &'static str {
        "named"
    }

    fn supports_named_parameter(&self) -> bool {
        true
    }

    fn placeholder(&self) -> &'static str {
        "@"
    }
}

/// A backend without LIMIT.
#[derive(Debug)]
pub(super) struct WindowedDialect;

impl Dialect for WindowedDialect {
    fn name(&self) -> &'static str {
        "windowed"
    }

    fn limit_style(&self) -> LimitStyle {
        LimitStyle::RowNumber
    }
}

pub(super) fn compile_in(
    dialect: impl Dialect + 'static,
    layout: Layout,
    expr: impl Into<Expression>,
) -> Result<CompiledQuery> {
    SqlCompiler::new(Arc::new(dialect))
        .with_layout(layout)
        .compile(&expr.into())
}

/// Single-line output, which keeps expectations readable.
pub(super) fn compact(dialect: impl Dialect + 'static, expr: impl Into<Expression>) -> CompiledQuery {
    compile_in(dialect, Layout::Compact, expr).unwrap()
}

pub(super) fn pretty(dialect: impl Dialect + 'static, expr: impl Into<Expression>) -> CompiledQuery {
    compile_in(dialect, Layout::Pretty, expr).unwrap()
}
