//! Error types for sqlweave.

use thiserror::Error;

use crate::ast::NodeKind;

/// Where in the tree an unsupported node was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// Handed directly to a compiler.
    TopLevel,
    /// Reached while walking a statement.
    Nested,
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Position::TopLevel => write!(f, "at top level"),
            Position::Nested => write!(f, "inside a statement"),
        }
    }
}

/// The main error type for sqlweave operations.
#[derive(Debug, Error)]
pub enum Error {
    /// An expression, table or procedure was missing or empty.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A node kind was reached where it cannot be rendered.
    #[error("Unsupported expression `{kind}` {position}")]
    UnsupportedExpression { kind: NodeKind, position: Position },

    /// A template or procedure referenced an undeclared parameter.
    #[error("Unknown parameter: '{0}'")]
    UnknownParameter(String),

    /// A template opened a brace it never closed.
    #[error("Malformed template at offset {offset}: {message}")]
    MalformedTemplate { offset: usize, message: String },

    /// No dialect or compiler is registered under the key.
    #[error("No {what} registered for '{key}'")]
    NotFound { what: &'static str, key: String },

    /// A registration was rejected while building the registry.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The configuration file could not be parsed.
    #[error("Config error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create an invalid argument error.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Create an unsupported expression error.
    pub fn unsupported(kind: NodeKind, position: Position) -> Self {
        Self::UnsupportedExpression { kind, position }
    }

    /// Create a malformed template error at the given byte offset.
    pub fn malformed(offset: usize, message: impl Into<String>) -> Self {
        Self::MalformedTemplate {
            offset,
            message: message.into(),
        }
    }

    /// Create a lookup failure for a registry key.
    pub fn not_found(what: &'static str, key: impl Into<String>) -> Self {
        Self::NotFound {
            what,
            key: key.into(),
        }
    }
}

/// Result type alias for sqlweave operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::unsupported(NodeKind::Parameter, Position::Nested);
        assert_eq!(
            err.to_string(),
            "Unsupported expression `Parameter` inside a statement"
        );

        let err = Error::malformed(12, "unterminated placeholder");
        assert_eq!(
            err.to_string(),
            "Malformed template at offset 12: unterminated placeholder"
        );

        let err = Error::not_found("dialect", "oracle");
        assert_eq!(err.to_string(), "No dialect registered for 'oracle'");
    }
}
