//! # quarry-schema
//!
//! Document schema model for the Quarry filter builder.
//!
//! This crate provides:
//! - AST types describing document models, their fields and list/optional modifiers
//! - A parser for `.quarry` schema files
//! - Validation of model references
//! - Configuration parsing for `quarry.toml`
//! - The [`Document`] trait binding Rust types to schema models
//!
//! ## Example
//!
//! ```rust
//! use quarry_schema::{validate_schema, FieldNaming};
//!
//! let schema = validate_schema(r#"
//!     model ElasticsearchProject {
//!         Name      String
//!         Followers Person[]
//!     }
//!     model Person {
//!         FirstName String
//!     }
//! "#).unwrap();
//!
//! let project = schema.get_model("ElasticsearchProject").unwrap();
//! assert!(project.get_field("Followers").unwrap().is_list());
//! assert_eq!(FieldNaming::CamelCase.apply("FirstName"), "firstName");
//! ```

pub mod ast;
pub mod config;
pub mod document;
pub mod error;
pub mod naming;
pub mod parser;
pub mod validator;

pub use ast::*;
pub use config::QuarryConfig;
pub use document::Document;
pub use error::{SchemaError, SchemaResult};
pub use naming::FieldNaming;
pub use parser::{parse_schema, parse_schema_file};
pub use validator::{Validator, validate_schema};
