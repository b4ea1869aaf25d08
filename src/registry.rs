//! Dialect and compiler lookup by key.
//!
//! Registration happens once, on a [`RegistryBuilder`]; the built
//! [`Registry`] is immutable and can be shared between threads.

use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};

use crate::ast::Expression;
use crate::compiler::{CompiledQuery, Compiler, SqlCompiler};
use crate::dialect::{AnsiDialect, Dialect, MysqlDialect, PostgresDialect};
use crate::error::{Error, Result};
use crate::writer::Layout;

#[derive(Debug, Default)]
pub struct RegistryBuilder {
    dialects: BTreeMap<String, Arc<dyn Dialect>>,
    compilers: BTreeMap<String, Arc<dyn Compiler>>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A builder with `ansi`, `mysql` and `postgres` already registered.
    pub fn with_builtins(layout: Layout) -> Self {
        let mut builder = Self::new();
        let builtins: [Arc<dyn Dialect>; 3] = [
            Arc::new(AnsiDialect),
            Arc::new(MysqlDialect),
            Arc::new(PostgresDialect),
        ];
        for dialect in builtins {
            let key = dialect.name();
            let compiler = SqlCompiler::new(dialect.clone()).with_layout(layout);
            builder.dialects.insert(key.to_string(), dialect);
            builder
                .compilers
                .insert(key.to_string(), Arc::new(compiler));
        }
        builder
    }

    pub fn register_dialect(&mut self, key: &str, dialect: Arc<dyn Dialect>) -> Result<&mut Self> {
        insert(&mut self.dialects, "dialect", key, dialect)?;
        Ok(self)
    }

    pub fn register_compiler(
        &mut self,
        key: &str,
        compiler: Arc<dyn Compiler>,
    ) -> Result<&mut Self> {
        insert(&mut self.compilers, "compiler", key, compiler)?;
        Ok(self)
    }

    pub fn build(self) -> Registry {
        Registry {
            dialects: self.dialects,
            compilers: self.compilers,
        }
    }
}

fn insert<T: ?Sized>(
    map: &mut BTreeMap<String, Arc<T>>,
    what: &'static str,
    key: &str,
    value: Arc<T>,
) -> Result<()> {
    let key = key.trim();
    if key.is_empty() {
        return Err(Error::Configuration(format!("{} key is empty", what)));
    }
    if map.contains_key(key) {
        return Err(Error::Configuration(format!(
            "{} '{}' is already registered",
            what, key
        )));
    }
    tracing::trace!(what, key, "registered");
    map.insert(key.to_string(), value);
    Ok(())
}

/// Immutable key to dialect/compiler map.
#[derive(Debug)]
pub struct Registry {
    dialects: BTreeMap<String, Arc<dyn Dialect>>,
    compilers: BTreeMap<String, Arc<dyn Compiler>>,
}

impl Registry {
    /// Shared registry of the built-in dialects in the default layout.
    pub fn builtin() -> &'static Registry {
        static BUILTIN: OnceLock<Registry> = OnceLock::new();
        BUILTIN.get_or_init(|| RegistryBuilder::with_builtins(Layout::default()).build())
    }

    pub fn dialect(&self, key: &str) -> Result<&Arc<dyn Dialect>> {
        self.dialects
            .get(key)
            .ok_or_else(|| Error::not_found("dialect", key))
    }

    pub fn compiler(&self, key: &str) -> Result<&Arc<dyn Compiler>> {
        self.compilers
            .get(key)
            .ok_or_else(|| Error::not_found("compiler", key))
    }

    /// Compile `expr` with the compiler registered under `key`.
    pub fn compile(&self, key: &str, expr: &Expression) -> Result<CompiledQuery> {
        self.compiler(key)?.compile(expr)
    }

    /// Registered compiler keys, sorted.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.compilers.keys().map(String::as_str)
    }
}
