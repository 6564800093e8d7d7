//! Attribute definitions for the Quarry schema AST.

use serde::{Deserialize, Serialize};

use super::{Ident, Span};

/// An attribute attached to a field (`@name`) or a model (`@@name`).
///
/// Quarry attributes take at most one string argument, e.g. `@map("emailAddress")`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    /// Attribute name without the `@` prefix.
    pub name: Ident,
    /// The string argument, if any.
    pub value: Option<String>,
    /// Source location.
    pub span: Span,
}

impl Attribute {
    /// Create a new attribute.
    pub fn new(name: Ident, value: Option<String>, span: Span) -> Self {
        Self { name, value, span }
    }

    /// Create an attribute with no argument.
    pub fn simple(name: Ident, span: Span) -> Self {
        Self::new(name, None, span)
    }

    /// Create a `map` attribute not tied to source text.
    pub fn map(value: impl Into<String>) -> Self {
        Self::new(Ident::synthetic("map"), Some(value.into()), Span::default())
    }

    /// Get the attribute name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Check if this attribute has the given name.
    pub fn is(&self, name: &str) -> bool {
        self.name() == name
    }

    /// Get the string argument.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

impl std::fmt::Display for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.value {
            Some(v) => write!(f, "@{}(\"{}\")", self.name, v),
            None => write!(f, "@{}", self.name),
        }
    }
}
