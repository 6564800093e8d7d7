//! Type definitions for the Quarry schema AST.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// A span in the source code for error reporting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    /// Start offset in bytes.
    pub start: usize,
    /// End offset in bytes.
    pub end: usize,
}

impl Span {
    /// Create a new span.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Get the length of the span.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if the span is empty.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl From<(usize, usize)> for Span {
    fn from((start, end): (usize, usize)) -> Self {
        Self { start, end }
    }
}

/// An identifier with source location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ident {
    /// The identifier name.
    pub name: SmolStr,
    /// Source location.
    pub span: Span,
}

impl Ident {
    /// Create a new identifier.
    pub fn new(name: impl Into<SmolStr>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }

    /// Create an identifier that did not come from source text.
    pub fn synthetic(name: impl Into<SmolStr>) -> Self {
        Self::new(name, Span::default())
    }

    /// Get the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Display for Ident {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Scalar types a document field can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScalarType {
    /// Text.
    String,
    /// 32-bit integer.
    Int,
    /// 64-bit integer.
    Long,
    /// Single precision float.
    Float,
    /// Double precision float.
    Double,
    /// Boolean.
    Boolean,
    /// Date or date-time.
    Date,
    /// A latitude/longitude pair.
    GeoPoint,
    /// An arbitrary geo shape.
    GeoShape,
    /// Untyped object.
    Object,
}

impl ScalarType {
    /// Parse a scalar type from its schema spelling.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "String" => Some(Self::String),
            "Int" => Some(Self::Int),
            "Long" | "BigInt" => Some(Self::Long),
            "Float" => Some(Self::Float),
            "Double" => Some(Self::Double),
            "Boolean" | "Bool" => Some(Self::Boolean),
            "Date" | "DateTime" => Some(Self::Date),
            "GeoPoint" => Some(Self::GeoPoint),
            "GeoShape" => Some(Self::GeoShape),
            "Object" | "Json" => Some(Self::Object),
            _ => None,
        }
    }

    /// Get the type name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "String",
            Self::Int => "Int",
            Self::Long => "Long",
            Self::Float => "Float",
            Self::Double => "Double",
            Self::Boolean => "Boolean",
            Self::Date => "Date",
            Self::GeoPoint => "GeoPoint",
            Self::GeoShape => "GeoShape",
            Self::Object => "Object",
        }
    }

    /// Check if values of this type are numbers.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Int | Self::Long | Self::Float | Self::Double)
    }
}

impl std::fmt::Display for ScalarType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A field type in the schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldType {
    /// A scalar type.
    Scalar(ScalarType),
    /// A reference to another model (an embedded object).
    Model(SmolStr),
}

impl FieldType {
    /// Check if this is a scalar type.
    pub fn is_scalar(&self) -> bool {
        matches!(self, Self::Scalar(_))
    }

    /// The referenced model name, if this is an object field.
    pub fn model_name(&self) -> Option<&str> {
        match self {
            Self::Model(name) => Some(name.as_str()),
            Self::Scalar(_) => None,
        }
    }

    /// Get the type name as a string.
    pub fn type_name(&self) -> &str {
        match self {
            Self::Scalar(s) => s.as_str(),
            Self::Model(name) => name.as_str(),
        }
    }

    /// Resolve a type name: scalars first, anything else is a model reference.
    pub fn from_name(name: &str) -> Self {
        ScalarType::from_str(name)
            .map(Self::Scalar)
            .unwrap_or_else(|| Self::Model(name.into()))
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.type_name())
    }
}

/// Modifier for field types.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeModifier {
    /// Required field (no modifier).
    #[default]
    Required,
    /// Optional field (`?` suffix).
    Optional,
    /// List field (`[]` suffix).
    List,
    /// Optional list field (`[]?` suffix).
    OptionalList,
}

impl TypeModifier {
    /// Check if the field is optional.
    pub fn is_optional(&self) -> bool {
        matches!(self, Self::Optional | Self::OptionalList)
    }

    /// Check if the field is a list.
    pub fn is_list(&self) -> bool {
        matches!(self, Self::List | Self::OptionalList)
    }
}

/// A documentation comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Documentation {
    /// The documentation text (without `///` prefix).
    pub text: String,
    /// Source location.
    pub span: Span,
}

impl Documentation {
    /// Create new documentation.
    pub fn new(text: impl Into<String>, span: Span) -> Self {
        Self {
            text: text.into(),
            span,
        }
    }
}
