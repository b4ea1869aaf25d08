use crate::dialect::Dialect;

/// ANSI SQL: positional `?` placeholders and the trait defaults throughout.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnsiDialect;

impl Dialect for AnsiDialect {
    fn name(&self) -> &'static str {
        "ansi"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::{CanonicalType, LimitStyle, ProcedureStyle};

    #[test]
    fn test_ansi_policy() {
        let d = AnsiDialect;
        assert!(!d.supports_named_parameter());
        assert!(!d.supports_indexed_parameter());
        assert_eq!(d.placeholder(), "?");
        assert_eq!(d.limit_style(), LimitStyle::OffsetComma);
        assert_eq!(d.procedure_style(), ProcedureStyle::SessionVariables);
        assert_eq!(d.native_type("NVARCHAR"), CanonicalType::String);
        assert!(d.table_query("users").is_none());
        assert!(d.parameters_query("sp").is_none());
    }
}
