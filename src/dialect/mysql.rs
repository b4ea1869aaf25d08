use crate::ast::Value;
use crate::compiler::CompiledQuery;
use crate::dialect::Dialect;

/// MySQL: ANSI placeholders with backtick quoting and
/// `information_schema` lookups scoped to `DATABASE()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MysqlDialect;

impl MysqlDialect {
    fn lookup(sql: &str, name: &str) -> Option<CompiledQuery> {
        Some(CompiledQuery::new(sql, vec![Value::from(name)]))
    }
}

impl Dialect for MysqlDialect {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn quote(&self, ident: &str) -> String {
        format!("`{}`", ident.replace('`', "``"))
    }

    fn table_query(&self, name: &str) -> Option<CompiledQuery> {
        Self::lookup(
            "SELECT TABLE_CATALOG AS `catalog`, TABLE_SCHEMA AS `schema`, TABLE_NAME AS `name`, \
             TABLE_TYPE AS `type` FROM information_schema.`TABLES` \
             WHERE TABLE_NAME = ? AND TABLE_SCHEMA = DATABASE();",
            name,
        )
    }

    fn columns_query(&self, name: &str) -> Option<CompiledQuery> {
        Self::lookup(
            "SELECT COLUMN_NAME AS `name`, ORDINAL_POSITION AS `position`, \
             CASE IS_NULLABLE WHEN 'YES' THEN TRUE ELSE FALSE END AS `nullable`, \
             DATA_TYPE AS `datatype`, IFNULL(CHARACTER_MAXIMUM_LENGTH, 0) AS `length`, \
             IFNULL(NUMERIC_PRECISION, 0) AS `precision`, IFNULL(NUMERIC_SCALE, 0) AS `scale`, \
             CASE WHEN EXTRA LIKE '%auto_increment%' THEN TRUE ELSE FALSE END AS `autoincrement`, \
             CASE WHEN EXTRA LIKE '%auto_increment%' THEN TRUE ELSE FALSE END AS `readonly`, \
             CASE WHEN COLUMN_KEY = 'PRI' THEN TRUE ELSE FALSE END AS `primarykey` \
             FROM information_schema.COLUMNS \
             WHERE TABLE_NAME = ? AND TABLE_SCHEMA = DATABASE() ORDER BY ORDINAL_POSITION;",
            name,
        )
    }

    fn function_query(&self, name: &str) -> Option<CompiledQuery> {
        Self::lookup(
            "SELECT ROUTINE_CATALOG AS `catalog`, ROUTINE_SCHEMA AS `schema`, ROUTINE_NAME AS `name` \
             FROM information_schema.ROUTINES \
             WHERE ROUTINE_NAME = ? AND ROUTINE_SCHEMA = DATABASE();",
            name,
        )
    }

    fn parameters_query(&self, name: &str) -> Option<CompiledQuery> {
        Self::lookup(
            "SELECT PARAMETER_NAME AS `name`, ORDINAL_POSITION AS `position`, \
             PARAMETER_MODE AS `dirmode`, DATA_TYPE AS `datatype`, \
             IFNULL(CHARACTER_MAXIMUM_LENGTH, 0) AS `length`, \
             IFNULL(NUMERIC_PRECISION, 0) AS `precision`, IFNULL(NUMERIC_SCALE, 0) AS `scale` \
             FROM information_schema.PARAMETERS \
             WHERE SPECIFIC_NAME = ? AND SPECIFIC_SCHEMA = DATABASE() ORDER BY ORDINAL_POSITION;",
            name,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::{CanonicalType, PlaceholderMode};

    #[test]
    fn test_backtick_quoting() {
        assert_eq!(MysqlDialect.quote("order"), "`order`");
        assert_eq!(MysqlDialect.quote("we`ird"), "`we``ird`");
    }

    #[test]
    fn test_inherits_ansi_placeholders() {
        assert_eq!(MysqlDialect.placeholder(), "?");
        assert_eq!(MysqlDialect.placeholder_mode(), PlaceholderMode::Positional);
        assert_eq!(MysqlDialect.native_type("mediumint"), CanonicalType::Int);
    }

    #[test]
    fn test_schema_queries_bind_the_name() {
        let q = MysqlDialect.table_query("users").unwrap();
        assert!(q.sql.contains("information_schema.`TABLES`"));
        assert!(q.sql.contains("TABLE_NAME = ?"));
        assert_eq!(q.args, vec![Value::from("users")]);

        let q = MysqlDialect.parameters_query("add_user").unwrap();
        assert!(q.sql.contains("SPECIFIC_NAME = ?"));
        assert_eq!(q.args, vec![Value::from("add_user")]);

        assert!(MysqlDialect.columns_query("users").is_some());
        assert!(MysqlDialect.function_query("add_user").is_some());
    }
}
