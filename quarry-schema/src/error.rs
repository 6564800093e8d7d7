//! Error types for schema parsing and validation.

// These warnings are false positives - the fields are used by derive macros
#![allow(unused_assignments)]

use miette::Diagnostic;
use thiserror::Error;

/// Result type for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors that can occur during schema parsing and validation.
#[derive(Error, Debug, Diagnostic)]
pub enum SchemaError {
    /// Error reading a file.
    #[error("failed to read file: {path}")]
    #[diagnostic(code(quarry::schema::io_error))]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Syntax error in the schema file.
    #[error("syntax error in schema: {message}")]
    #[diagnostic(code(quarry::schema::syntax_error))]
    SyntaxError {
        #[source_code]
        src: String,
        #[label("error here")]
        span: miette::SourceSpan,
        message: String,
    },

    /// Invalid field definition.
    #[error("invalid field `{model}.{field}`: {message}")]
    #[diagnostic(code(quarry::schema::invalid_field))]
    InvalidField {
        model: String,
        field: String,
        message: String,
    },

    /// Duplicate definition.
    #[error("duplicate {kind} `{name}`")]
    #[diagnostic(code(quarry::schema::duplicate))]
    Duplicate { kind: String, name: String },

    /// Unknown model reference.
    #[error("unknown type `{type_name}` in `{model}.{field}`")]
    #[diagnostic(
        code(quarry::schema::unknown_type),
        help("declare a model named `{type_name}` or use a scalar type")
    )]
    UnknownType {
        model: String,
        field: String,
        type_name: String,
    },

    /// Configuration error.
    #[error("configuration error: {message}")]
    #[diagnostic(code(quarry::schema::config_error))]
    ConfigError { message: String },

    /// TOML parsing error.
    #[error("failed to parse TOML")]
    #[diagnostic(code(quarry::schema::toml_error))]
    TomlError {
        #[source]
        source: toml::de::Error,
    },

    /// Validation error with multiple issues.
    #[error("schema validation failed with {count} error(s)")]
    #[diagnostic(code(quarry::schema::validation_failed))]
    ValidationFailed {
        count: usize,
        #[related]
        errors: Vec<SchemaError>,
    },
}

impl SchemaError {
    /// Create a syntax error with source location.
    pub fn syntax(
        src: impl Into<String>,
        offset: usize,
        len: usize,
        message: impl Into<String>,
    ) -> Self {
        Self::SyntaxError {
            src: src.into(),
            span: (offset, len).into(),
            message: message.into(),
        }
    }

    /// Create an invalid field error.
    pub fn invalid_field(
        model: impl Into<String>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidField {
            model: model.into(),
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a duplicate definition error.
    pub fn duplicate(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Duplicate {
            kind: kind.into(),
            name: name.into(),
        }
    }

    /// Create an unknown type error.
    pub fn unknown_type(
        model: impl Into<String>,
        field: impl Into<String>,
        type_name: impl Into<String>,
    ) -> Self {
        Self::UnknownType {
            model: model.into(),
            field: field.into(),
            type_name: type_name.into(),
        }
    }
}

#[cfg(test)]
#[allow(unused_assignments)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_error() {
        let err = SchemaError::syntax("model Person {", 13, 1, "expected `}`");

        match err {
            SchemaError::SyntaxError { src, span, message } => {
                assert_eq!(src, "model Person {");
                assert_eq!(span.offset(), 13);
                assert_eq!(span.len(), 1);
                assert_eq!(message, "expected `}`");
            }
            _ => panic!("expected SyntaxError"),
        }
    }

    #[test]
    fn test_unknown_type_display() {
        let err = SchemaError::unknown_type("Project", "Followers", "Persn");
        assert_eq!(
            err.to_string(),
            "unknown type `Persn` in `Project.Followers`"
        );
    }

    #[test]
    fn test_duplicate_display() {
        let err = SchemaError::duplicate("model", "Person");
        assert_eq!(err.to_string(), "duplicate model `Person`");
    }

    #[test]
    fn test_diagnostic_code() {
        let err = SchemaError::invalid_field("Person", "Name", "bad");
        let code = err.code().map(|c| c.to_string());
        assert_eq!(code.as_deref(), Some("quarry::schema::invalid_field"));
    }
}
