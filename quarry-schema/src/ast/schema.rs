//! Top-level schema definition.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use super::Model;

/// A complete Quarry schema: the set of document models filters are built against.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// All models in the schema.
    pub models: IndexMap<SmolStr, Model>,
}

impl Schema {
    /// Create a new empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a model, builder style.
    pub fn with_model(mut self, model: Model) -> Self {
        self.add_model(model);
        self
    }

    /// Add a model to the schema.
    pub fn add_model(&mut self, model: Model) {
        self.models.insert(model.name.name.clone(), model);
    }

    /// Get a model by name.
    pub fn get_model(&self, name: &str) -> Option<&Model> {
        self.models.get(name)
    }

    /// Get a model by its document type name (`@@map` or lowercased name).
    pub fn get_model_by_type(&self, type_name: &str) -> Option<&Model> {
        self.models.values().find(|m| m.type_name() == type_name)
    }

    /// Check if a model exists.
    pub fn model_exists(&self, name: &str) -> bool {
        self.models.contains_key(name)
    }

    /// Get all model names.
    pub fn model_names(&self) -> impl Iterator<Item = &str> {
        self.models.keys().map(|s| s.as_str())
    }

    /// Merge another schema into this one.
    pub fn merge(&mut self, other: Schema) {
        self.models.extend(other.models);
    }
}
