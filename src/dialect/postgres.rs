use crate::ast::Value;
use crate::compiler::CompiledQuery;
use crate::dialect::{CanonicalType, Dialect, LimitStyle, ProcedureStyle, ansi_type};

/// PostgreSQL: indexed `$n` placeholders, `LIMIT n OFFSET m` and native
/// procedure calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresDialect;

impl PostgresDialect {
    fn lookup(sql: &str, name: &str) -> Option<CompiledQuery> {
        Some(CompiledQuery::new(sql, vec![Value::from(name)]))
    }
}

impl Dialect for PostgresDialect {
    fn name(&self) -> &'static str {
        "postgres"
    }

    fn supports_indexed_parameter(&self) -> bool {
        true
    }

    fn placeholder(&self) -> &'static str {
        "$"
    }

    fn native_type(&self, native: &str) -> CanonicalType {
        match native.trim().to_lowercase().as_str() {
            "int2" | "int4" | "int8" | "serial" | "smallserial" | "bigserial" => CanonicalType::Int,
            "float4" | "float8" | "double precision" => CanonicalType::Float,
            "character varying" | "citext" | "bpchar" | "name" => CanonicalType::String,
            "timestamp" | "timestamptz" | "timestamp without time zone"
            | "timestamp with time zone" => CanonicalType::DateTime,
            "bytea" => CanonicalType::Bytes,
            "uuid" => CanonicalType::Guid,
            _ => ansi_type(native),
        }
    }

    fn limit_style(&self) -> LimitStyle {
        LimitStyle::LimitOffset
    }

    fn procedure_style(&self) -> ProcedureStyle {
        ProcedureStyle::NativeCall
    }

    fn table_query(&self, name: &str) -> Option<CompiledQuery> {
        Self::lookup(
            "SELECT table_catalog AS catalog, table_schema AS schema, table_name AS name, \
             table_type AS type FROM information_schema.tables \
             WHERE table_name = $1 AND table_schema = current_schema();",
            name,
        )
    }

    fn columns_query(&self, name: &str) -> Option<CompiledQuery> {
        Self::lookup(
            "SELECT column_name AS name, ordinal_position AS position, \
             is_nullable = 'YES' AS nullable, data_type AS datatype, \
             COALESCE(character_maximum_length, 0) AS length, \
             COALESCE(numeric_precision, 0) AS precision, COALESCE(numeric_scale, 0) AS scale, \
             COALESCE(column_default LIKE 'nextval(%', FALSE) AS autoincrement \
             FROM information_schema.columns \
             WHERE table_name = $1 AND table_schema = current_schema() ORDER BY ordinal_position;",
            name,
        )
    }

    fn function_query(&self, name: &str) -> Option<CompiledQuery> {
        Self::lookup(
            "SELECT routine_catalog AS catalog, routine_schema AS schema, routine_name AS name \
             FROM information_schema.routines \
             WHERE routine_name = $1 AND routine_schema = current_schema();",
            name,
        )
    }

    fn parameters_query(&self, name: &str) -> Option<CompiledQuery> {
        Self::lookup(
            "SELECT p.parameter_name AS name, p.ordinal_position AS position, \
             p.parameter_mode AS dirmode, p.data_type AS datatype, \
             COALESCE(p.character_maximum_length, 0) AS length, \
             COALESCE(p.numeric_precision, 0) AS precision, COALESCE(p.numeric_scale, 0) AS scale \
             FROM information_schema.parameters p \
             JOIN information_schema.routines r ON r.specific_name = p.specific_name \
             WHERE r.routine_name = $1 AND r.routine_schema = current_schema() \
             ORDER BY p.ordinal_position;",
            name,
        )
    }
}
