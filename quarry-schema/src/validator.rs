//! Schema validation and semantic analysis.
//!
//! Checks that every object field refers to a declared model and that
//! `@map` overrides are usable as wire names.

use crate::ast::*;
use crate::error::{SchemaError, SchemaResult};
use crate::parser::parse_schema;

/// Schema validator for semantic analysis.
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<SchemaError>,
}

impl Validator {
    /// Create a new validator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate a schema and return it, or every problem found.
    pub fn validate(&mut self, schema: Schema) -> SchemaResult<Schema> {
        self.errors.clear();

        for model in schema.models.values() {
            self.validate_model(model, &schema);
        }

        if self.errors.is_empty() {
            Ok(schema)
        } else {
            Err(SchemaError::ValidationFailed {
                count: self.errors.len(),
                errors: std::mem::take(&mut self.errors),
            })
        }
    }

    fn validate_model(&mut self, model: &Model, schema: &Schema) {
        for field in model.fields.values() {
            if let Some(target) = field.field_type.model_name() {
                if !schema.model_exists(target) {
                    self.errors
                        .push(SchemaError::unknown_type(model.name(), field.name(), target));
                }
            }

            if let Some(wire) = field.wire_name() {
                if wire.is_empty() || wire.contains('.') {
                    self.errors.push(SchemaError::invalid_field(
                        model.name(),
                        field.name(),
                        "@map name must be non-empty and must not contain '.'",
                    ));
                }
            }
        }
    }
}

/// Parse and validate a schema in one step.
pub fn validate_schema(input: &str) -> SchemaResult<Schema> {
    let schema = parse_schema(input)?;
    Validator::new().validate(schema)
}
