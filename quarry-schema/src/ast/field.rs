//! Field definitions for the Quarry schema AST.

use serde::{Deserialize, Serialize};

use super::{Attribute, Documentation, FieldType, Ident, ScalarType, Span, TypeModifier};

/// A field in a model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// Field name as declared.
    pub name: Ident,
    /// Field type.
    pub field_type: FieldType,
    /// Type modifier (optional, list, etc.).
    pub modifier: TypeModifier,
    /// Raw attributes as parsed.
    pub attributes: Vec<Attribute>,
    /// Documentation comment.
    pub documentation: Option<Documentation>,
    /// Source location.
    pub span: Span,
}

impl Field {
    /// Create a new field.
    pub fn new(
        name: Ident,
        field_type: FieldType,
        modifier: TypeModifier,
        attributes: Vec<Attribute>,
        span: Span,
    ) -> Self {
        Self {
            name,
            field_type,
            modifier,
            attributes,
            documentation: None,
            span,
        }
    }

    /// Create a required scalar field.
    pub fn scalar(name: &str, scalar: ScalarType) -> Self {
        Self::new(
            Ident::synthetic(name),
            FieldType::Scalar(scalar),
            TypeModifier::Required,
            vec![],
            Span::default(),
        )
    }

    /// Create a field holding an embedded model.
    pub fn object(name: &str, model: &str) -> Self {
        Self::new(
            Ident::synthetic(name),
            FieldType::Model(model.into()),
            TypeModifier::Required,
            vec![],
            Span::default(),
        )
    }

    /// Turn this field into a list of its type.
    pub fn list(mut self) -> Self {
        self.modifier = if self.modifier.is_optional() {
            TypeModifier::OptionalList
        } else {
            TypeModifier::List
        };
        self
    }

    /// Mark this field optional.
    pub fn optional(mut self) -> Self {
        self.modifier = if self.modifier.is_list() {
            TypeModifier::OptionalList
        } else {
            TypeModifier::Optional
        };
        self
    }

    /// Override the wire name of this field (`@map`).
    pub fn mapped(mut self, wire_name: impl Into<String>) -> Self {
        self.attributes.retain(|a| !a.is("map"));
        self.attributes.push(Attribute::map(wire_name));
        self
    }

    /// Get the field name as a string.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Check if the field is optional.
    pub fn is_optional(&self) -> bool {
        self.modifier.is_optional()
    }

    /// Check if the field is a list.
    pub fn is_list(&self) -> bool {
        self.modifier.is_list()
    }

    /// Check if this field has a specific attribute.
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.iter().any(|a| a.is(name))
    }

    /// Get an attribute by name.
    pub fn get_attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.is(name))
    }

    /// The explicit wire name from `@map`, if any.
    pub fn wire_name(&self) -> Option<&str> {
        self.get_attribute("map").and_then(|a| a.value())
    }

    /// Set documentation.
    pub fn with_documentation(mut self, doc: Documentation) -> Self {
        self.documentation = Some(doc);
        self
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)?;

        match self.modifier {
            TypeModifier::Required => write!(f, " {}", self.field_type)?,
            TypeModifier::Optional => write!(f, " {}?", self.field_type)?,
            TypeModifier::List => write!(f, " {}[]", self.field_type)?,
            TypeModifier::OptionalList => write!(f, " {}[]?", self.field_type)?,
        }

        for attr in &self.attributes {
            write!(f, " {}", attr)?;
        }

        Ok(())
    }
}
