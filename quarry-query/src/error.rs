//! Error types for building, resolving and serializing filters.
//!
//! Every error carries an [`ErrorCode`] for programmatic handling plus
//! context about what failed (filter kind, model, field) and suggestions.
//!
//! # Error Codes
//!
//! Error codes follow a pattern: Q{category}{number}
//! - 1xxx: Field resolution errors
//! - 2xxx: Descriptor validation errors
//! - 3xxx: Wire document errors
//! - 4xxx: Configuration errors
//!
//! ```rust
//! use quarry_query::{QueryError, ErrorCode};
//!
//! let err = QueryError::missing_field("term", "value");
//! assert_eq!(err.code, ErrorCode::MissingRequiredField);
//! assert_eq!(err.code.code(), "Q2001");
//! assert!(err.to_string().contains("term"));
//! ```

use std::fmt;
use thiserror::Error;

/// Result type for filter operations.
pub type QueryResult<T> = Result<T, QueryError>;

/// Error codes for programmatic error handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Resolution errors (1xxx)
    /// Field expression is not a pure member/index chain (Q1001).
    UnsupportedExpression = 1001,
    /// Member is not declared on the schema model (Q1002).
    UnknownField = 1002,
    /// Model is not present in the schema (Q1003).
    UnknownModel = 1003,

    // Validation errors (2xxx)
    /// Required descriptor attribute absent at serialization (Q2001).
    MissingRequiredField = 2001,
    /// Range without bounds or with incompatible bound types (Q2002).
    InvalidRange = 2002,
    /// Number with no JSON form, such as NaN or infinity (Q2003).
    InvalidValue = 2003,
    /// Field path equal to a key the variant object already uses (Q2004).
    ReservedKey = 2004,

    // Wire document errors (3xxx)
    /// Wire document does not describe a filter (Q3001).
    InvalidFilter = 3001,
    /// JSON text could not be read (Q3002).
    DeserializationError = 3002,
    /// Document could not be written as JSON text (Q3003).
    SerializationError = 3003,

    // Configuration errors (4xxx)
    /// Invalid configuration (Q4001).
    InvalidConfiguration = 4001,
}

impl ErrorCode {
    /// Get the error code string (e.g., "Q1001").
    pub fn code(&self) -> String {
        format!("Q{}", *self as u16)
    }

    /// Get a short description of the error code.
    pub fn description(&self) -> &'static str {
        match self {
            Self::UnsupportedExpression => "Unsupported field expression",
            Self::UnknownField => "Unknown field",
            Self::UnknownModel => "Unknown model",
            Self::MissingRequiredField => "Required filter attribute missing",
            Self::InvalidRange => "Invalid range",
            Self::InvalidValue => "Invalid value",
            Self::ReservedKey => "Field collides with a reserved key",
            Self::InvalidFilter => "Invalid filter document",
            Self::DeserializationError => "Deserialization error",
            Self::SerializationError => "Serialization error",
            Self::InvalidConfiguration => "Invalid configuration",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Suggestion for fixing an error.
#[derive(Debug, Clone)]
pub struct Suggestion {
    /// The suggestion text.
    pub text: String,
    /// Optional code example.
    pub code: Option<String>,
}

impl Suggestion {
    /// Create a new suggestion.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            code: None,
        }
    }

    /// Add a code example.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }
}

/// Additional context for an error.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// The filter kind being processed (`term`, `geo_distance`, ...).
    pub filter: Option<String>,
    /// The schema model in scope.
    pub model: Option<String>,
    /// The field or expression involved.
    pub field: Option<String>,
    /// Suggestions for fixing the error.
    pub suggestions: Vec<Suggestion>,
    /// Help text.
    pub help: Option<String>,
}

/// Errors that can occur while building, resolving or serializing filters.
#[derive(Error, Debug)]
pub struct QueryError {
    /// The error code.
    pub code: ErrorCode,
    /// The error message.
    pub message: String,
    /// Additional context.
    pub context: ErrorContext,
    /// The source error (if any).
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.code(), self.message)
    }
}

impl QueryError {
    /// Create a new error with the given code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: ErrorContext::default(),
            source: None,
        }
    }

    /// Set the filter kind.
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.context.filter = Some(filter.into());
        self
    }

    /// Set the model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.context.model = Some(model.into());
        self
    }

    /// Set the field.
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.context.field = Some(field.into());
        self
    }

    /// Add a suggestion for fixing the error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.context.suggestions.push(Suggestion::new(suggestion));
        self
    }

    /// Add a code suggestion.
    pub fn with_code_suggestion(mut self, text: impl Into<String>, code: impl Into<String>) -> Self {
        self.context.suggestions.push(Suggestion::new(text).with_code(code));
        self
    }

    /// Add help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.context.help = Some(help.into());
        self
    }

    /// Set the source error.
    pub fn with_source<E: std::error::Error + Send + Sync + 'static>(mut self, source: E) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    // ============== Constructor Functions ==============

    /// A field expression contains something other than member and index access.
    pub fn unsupported_expression(expr: impl Into<String>, reason: impl Into<String>) -> Self {
        let expr = expr.into();
        Self::new(
            ErrorCode::UnsupportedExpression,
            format!("Unsupported field expression `{}`: {}", expr, reason.into()),
        )
        .with_field(&expr)
        .with_code_suggestion(
            "Use a plain member chain, indexing list members to reach their elements",
            "field!(followers[0].first_name)",
        )
    }

    /// A member is not declared on the model in scope.
    pub fn unknown_field(model: impl Into<String>, field: impl Into<String>) -> Self {
        let model = model.into();
        let field = field.into();
        Self::new(
            ErrorCode::UnknownField,
            format!("Model {} has no field named {}", model, field),
        )
        .with_model(&model)
        .with_field(&field)
        .with_suggestion("Use the field name as declared in the schema, or its snake_case form")
    }

    /// A model is not present in the schema.
    pub fn unknown_model(model: impl Into<String>) -> Self {
        let model = model.into();
        Self::new(
            ErrorCode::UnknownModel,
            format!("Model {} is not declared in the schema", model),
        )
        .with_model(&model)
    }

    /// A required filter attribute was never set.
    pub fn missing_field(filter: impl Into<String>, attribute: impl Into<String>) -> Self {
        let filter = filter.into();
        let attribute = attribute.into();
        Self::new(
            ErrorCode::MissingRequiredField,
            format!("The {} filter requires `{}` to be set", filter, attribute),
        )
        .with_filter(&filter)
        .with_field(&attribute)
    }

    /// A range filter has no bounds or bounds of the wrong type.
    pub fn invalid_range(filter: impl Into<String>, message: impl Into<String>) -> Self {
        let filter = filter.into();
        Self::new(
            ErrorCode::InvalidRange,
            format!("Invalid {} filter: {}", filter, message.into()),
        )
        .with_filter(&filter)
    }

    /// A number has no JSON form (NaN or infinite).
    pub fn invalid_value(filter: impl Into<String>, attribute: impl Into<String>, value: f64) -> Self {
        let filter = filter.into();
        let attribute = attribute.into();
        Self::new(
            ErrorCode::InvalidValue,
            format!("The {} filter cannot write `{}` = {}: only finite numbers are allowed", filter, attribute, value),
        )
        .with_filter(&filter)
        .with_field(&attribute)
    }

    /// A resolved field path equals a key the variant object already uses.
    pub fn reserved_key(filter: impl Into<String>, path: impl Into<String>) -> Self {
        let filter = filter.into();
        let path = path.into();
        Self::new(
            ErrorCode::ReservedKey,
            format!("Field `{}` collides with a reserved key of the {} filter", path, filter),
        )
        .with_filter(&filter)
        .with_field(&path)
        .with_help("Rename the field with @map in the schema, or address it with a different path")
    }

    /// A wire document could not be read back into a filter.
    pub fn invalid_filter(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidFilter, message.into())
    }

    /// JSON text could not be read.
    pub fn deserialization(err: serde_json::Error) -> Self {
        Self::new(
            ErrorCode::DeserializationError,
            format!("Failed to read filter document: {}", err),
        )
        .with_source(err)
    }

    /// A document could not be written as JSON text.
    pub fn serialization(err: serde_json::Error) -> Self {
        Self::new(
            ErrorCode::SerializationError,
            format!("Failed to write filter document: {}", err),
        )
        .with_source(err)
    }

    /// Invalid configuration.
    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidConfiguration, message.into())
    }

    // ============== Error Checks ==============

    /// Check if this error came from field path resolution.
    pub fn is_resolution_error(&self) -> bool {
        matches!(
            self.code,
            ErrorCode::UnsupportedExpression | ErrorCode::UnknownField | ErrorCode::UnknownModel
        )
    }

    /// Check if this error came from descriptor validation.
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self.code,
            ErrorCode::MissingRequiredField
                | ErrorCode::InvalidRange
                | ErrorCode::InvalidValue
                | ErrorCode::ReservedKey
        )
    }

    /// Display the full error with all context and suggestions.
    pub fn display_full(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("Error [{}]: {}\n", self.code.code(), self.message));

        if let Some(ref filter) = self.context.filter {
            output.push_str(&format!("  → Filter: {}\n", filter));
        }
        if let Some(ref model) = self.context.model {
            output.push_str(&format!("  → Model: {}\n", model));
        }
        if let Some(ref field) = self.context.field {
            output.push_str(&format!("  → Field: {}\n", field));
        }

        if !self.context.suggestions.is_empty() {
            output.push_str("\nSuggestions:\n");
            for (i, suggestion) in self.context.suggestions.iter().enumerate() {
                output.push_str(&format!("  {}. {}\n", i + 1, suggestion.text));
                if let Some(ref code) = suggestion.code {
                    output.push_str(&format!("     ```\n     {}\n     ```\n", code.replace('\n', "\n     ")));
                }
            }
        }

        if let Some(ref help) = self.context.help {
            output.push_str(&format!("\nHelp: {}\n", help));
        }

        output
    }
}

impl From<quarry_schema::SchemaError> for QueryError {
    fn from(err: quarry_schema::SchemaError) -> Self {
        QueryError::invalid_configuration(err.to_string()).with_source(err)
    }
}
