use serde::{Deserialize, Serialize};

/// Backend-independent column type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CanonicalType {
    String,
    Boolean,
    Int,
    Numeric,
    Float,
    Date,
    DateTime,
    Bytes,
    Guid,
    /// Anything not recognized
    Variant,
}

impl std::fmt::Display for CanonicalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}

/// Map a native type name reported by a backend to its canonical type.
///
/// Case-insensitive; unknown names are `Variant`. `timestamp` is the SQL
/// Server row version here, so it maps to `Bytes`.
pub fn ansi_type(native: &str) -> CanonicalType {
    match native.trim().to_lowercase().as_str() {
        "xml" | "tinytext" | "mediumtext" | "longtext" | "ntext" | "text" | "sysname"
        | "sql_variant" | "note" | "memo" | "clob" => CanonicalType::String,
        "char" | "character" | "nchar" | "varchar" | "nvarchar" | "string" | "longvarchar"
        | "longchar" | "varyingcharacter" | "nativecharacter" | "nativevaryingcharacter" | "" => {
            CanonicalType::String
        }
        "bit" | "bool" | "boolean" | "yesno" | "logical" => CanonicalType::Boolean,
        "tinyint unsigned" | "uint16" | "smallint unsigned" | "uint32" | "integer unsigned"
        | "uint64" | "bigint unsigned" => CanonicalType::Int,
        "tinyint" | "smallint" | "int" | "mediumint" | "bigint" | "int16" | "int32" | "int64"
        | "integer" | "long" | "identity" | "counter" | "autoincrement" | "year" => {
            CanonicalType::Int
        }
        "decimal" | "newdecimal" | "numeric" | "currency" | "money" | "smallmoney" => {
            CanonicalType::Numeric
        }
        "float" | "real" | "double" => CanonicalType::Float,
        "date" | "smalldate" => CanonicalType::Date,
        "time" | "datetime" | "datetime2" | "smalldatetime" => CanonicalType::DateTime,
        "image" | "timestamp" | "varbinary" | "binary" | "blob" | "tinyblob" | "mediumblob"
        | "longblob" | "oleobject" | "general" => CanonicalType::Bytes,
        "uniqueidentifier" | "guid" => CanonicalType::Guid,
        _ => CanonicalType::Variant,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive() {
        assert_eq!(ansi_type("VARCHAR"), CanonicalType::String);
        assert_eq!(ansi_type("BigInt Unsigned"), CanonicalType::Int);
        assert_eq!(ansi_type("DateTime2"), CanonicalType::DateTime);
    }

    #[test]
    fn test_families() {
        assert_eq!(ansi_type("bit"), CanonicalType::Boolean);
        assert_eq!(ansi_type("money"), CanonicalType::Numeric);
        assert_eq!(ansi_type("double"), CanonicalType::Float);
        assert_eq!(ansi_type("date"), CanonicalType::Date);
        assert_eq!(ansi_type("longblob"), CanonicalType::Bytes);
        assert_eq!(ansi_type("timestamp"), CanonicalType::Bytes);
        assert_eq!(ansi_type("uniqueidentifier"), CanonicalType::Guid);
    }

    #[test]
    fn test_unknown_is_variant() {
        assert_eq!(ansi_type("geometry"), CanonicalType::Variant);
        assert_eq!(ansi_type("jsonb"), CanonicalType::Variant);
    }
}
