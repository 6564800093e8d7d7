//! Model definitions for the Quarry schema AST.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use super::{Attribute, Documentation, Field, Ident, Span};

/// A model definition (maps to a document type in the search index).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    /// Model name.
    pub name: Ident,
    /// Model fields, in declaration order.
    pub fields: IndexMap<SmolStr, Field>,
    /// Model-level attributes (prefixed with `@@`).
    pub attributes: Vec<Attribute>,
    /// Documentation comment.
    pub documentation: Option<Documentation>,
    /// Source location.
    pub span: Span,
}

impl Model {
    /// Create a new model.
    pub fn new(name: Ident, span: Span) -> Self {
        Self {
            name,
            fields: IndexMap::new(),
            attributes: vec![],
            documentation: None,
            span,
        }
    }

    /// Create a model that did not come from source text.
    pub fn named(name: &str) -> Self {
        Self::new(Ident::synthetic(name), Span::default())
    }

    /// Add a field, builder style.
    pub fn field(mut self, field: Field) -> Self {
        self.add_field(field);
        self
    }

    /// Override the document type name (`@@map`).
    pub fn mapped(mut self, type_name: impl Into<String>) -> Self {
        self.attributes.retain(|a| !a.is("map"));
        self.attributes.push(Attribute::map(type_name));
        self
    }

    /// Get the model name as a string.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Add a field to the model.
    pub fn add_field(&mut self, field: Field) {
        self.fields.insert(field.name.name.clone(), field);
    }

    /// Get a field by its declared name.
    pub fn get_field(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    /// Fields that embed other models.
    pub fn object_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.values().filter(|f| !f.field_type.is_scalar())
    }

    /// Check if this model has a specific model-level attribute.
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.iter().any(|a| a.is(name))
    }

    /// Get a model-level attribute by name.
    pub fn get_attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.is(name))
    }

    /// The document type name: `@@map` if present, else the lowercased model name.
    pub fn type_name(&self) -> String {
        self.get_attribute("map")
            .and_then(|a| a.value())
            .map(String::from)
            .unwrap_or_else(|| self.name().to_lowercase())
    }

    /// Set documentation.
    pub fn with_documentation(mut self, doc: Documentation) -> Self {
        self.documentation = Some(doc);
        self
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "model {} {{", self.name)?;
        for field in self.fields.values() {
            writeln!(f, "  {}", field)?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::ScalarType;

    fn person() -> Model {
        Model::named("Person")
            .field(Field::scalar("FirstName", ScalarType::String))
            .field(Field::object("Followers", "Person").list())
    }

    #[test]
    fn test_get_field() {
        let model = person();
        assert!(model.get_field("FirstName").is_some());
        assert!(model.get_field("firstName").is_none());
        assert_eq!(model.fields.len(), 2);
    }

    #[test]
    fn test_field_order_preserved() {
        let model = person();
        let names: Vec<_> = model.fields.keys().map(|k| k.as_str()).collect();
        assert_eq!(names, vec!["FirstName", "Followers"]);
    }

    #[test]
    fn test_object_fields() {
        let model = person();
        let names: Vec<_> = model.object_fields().map(|f| f.name()).collect();
        assert_eq!(names, vec!["Followers"]);
    }

    #[test]
    fn test_type_name_default_and_mapped() {
        assert_eq!(person().type_name(), "person");
        let model = Model::named("ElasticsearchProject").mapped("elasticsearchprojects");
        assert_eq!(model.type_name(), "elasticsearchprojects");
    }

    #[test]
    fn test_display() {
        let rendered = person().to_string();
        assert!(rendered.starts_with("model Person {"));
        assert!(rendered.contains("  Followers Person[]"));
    }
}
