//! # Quarry
//!
//! Typed, schema-checked filter documents for search engines.
//!
//! Quarry provides:
//! - A schema language describing the documents stored in an index
//! - Filter builders whose field references are checked against that schema
//! - Serialization to the engine's JSON filter language, and parsing back
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use quarry::prelude::*;
//!
//! struct Project;
//!
//! impl Document for Project {
//!     const MODEL: &'static str = "ElasticsearchProject";
//! }
//!
//! let schema = parse_schema(r#"
//!     model ElasticsearchProject {
//!         Name      String
//!         Followers Person[]
//!     }
//!     model Person {
//!         FirstName String
//!     }
//! "#).unwrap();
//!
//! let f = FilterBuilder::<Project>::new();
//! let filter = f
//!     .nested(|n, q| {
//!         n.path(field!(followers[0]))
//!             .query(q.term(field!(followers[0].first_name), "martijn"))
//!     })
//!     .cache(true);
//!
//! let serializer = Serializer::new(Arc::new(schema));
//! let json = serializer.serialize::<Project>(&filter).unwrap();
//!
//! assert_eq!(json["nested"]["path"], "followers");
//! assert_eq!(json["nested"]["query"]["term"]["followers.firstName"], "martijn");
//! assert_eq!(json["nested"]["_cache"], true);
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// Schema parsing, AST types and configuration.
pub mod schema {
    pub use quarry_schema::*;
}

/// Filter descriptors, builders, serialization and parsing.
pub mod query {
    pub use quarry_query::*;
}

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::schema::{Document, FieldNaming, QuarryConfig, Schema, parse_schema, parse_schema_file, validate_schema};
    pub use quarry_query::prelude::*;
}

// Re-export key types at the crate root
pub use quarry_query::{Filter, FilterBuilder, FilterParser, QueryError, Serializer, field};
pub use schema::{Document, Schema, SchemaError};
