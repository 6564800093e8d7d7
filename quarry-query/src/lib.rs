//! # quarry-query
//!
//! Typed filter descriptors for a search engine's JSON query language.
//!
//! This crate provides:
//! - A descriptor for every filter variant, with caching metadata
//! - A typed builder whose field references are checked against a schema model
//! - Deferred field expressions resolved to wire paths at serialization
//! - A serializer producing the engine's JSON filter documents
//! - A parser reading those documents back into descriptors
//!
//! ## Building filters
//!
//! Builders are parameterized by a [`Document`](quarry_schema::Document)
//! whose model is declared in the schema:
//!
//! ```rust
//! use std::sync::Arc;
//! use quarry_query::{FilterBuilder, Serializer, field};
//! use quarry_schema::{Document, validate_schema};
//!
//! struct Person;
//!
//! impl Document for Person {
//!     const MODEL: &'static str = "Person";
//! }
//!
//! let schema = validate_schema(r#"
//!     model Person {
//!         FirstName String
//!         Age       Int
//!     }
//! "#).unwrap();
//!
//! let f = FilterBuilder::<Person>::new();
//! let filter = f.bool(|b| {
//!     b.must([f.term(field!(first_name), "martijn")])
//!         .must_not([f.range(|r| r.on_field(field!(age)).lower_than(18))])
//! });
//!
//! let json = Serializer::new(Arc::new(schema)).serialize::<Person>(&filter).unwrap();
//! assert_eq!(json["bool"]["must"][0]["term"]["firstName"], "martijn");
//! assert_eq!(json["bool"]["must_not"][0]["range"]["age"]["include_upper"], false);
//! ```
//!
//! ## Verbatim paths
//!
//! A string field is emitted as written:
//!
//! ```rust
//! use quarry_query::{Serializer, filter::{Filter, ExistsFilter}};
//!
//! let filter = Filter::from(ExistsFilter::new("raw.path")).name("has-raw");
//! let json = Serializer::default().serialize_untyped(&filter).unwrap();
//! assert_eq!(json.to_string(), r#"{"exists":{"field":"raw.path","_name":"has-raw"}}"#);
//! ```

pub mod builder;
pub mod error;
pub mod filter;
pub mod format;
pub mod logging;
pub mod options;
pub mod parse;
pub mod path;
pub mod query;
pub mod resolver;
pub mod serialize;
pub mod value;

pub use builder::{FilterBuilder, QueryBuilder};
pub use error::{ErrorCode, ErrorContext, QueryError, QueryResult, Suggestion};
pub use filter::{CacheMeta, Filter, FilterKind};
pub use parse::FilterParser;
pub use path::{FieldExpr, FieldRef, Segment};
pub use query::Query;
pub use resolver::{CacheStats, Resolver};
pub use serialize::Serializer;
pub use value::FilterValue;

// Re-export logging utilities
pub use logging::{
    get_log_format, get_log_level, init as init_logging, init_debug, init_from_config as init_logging_from_config,
    init_with_level, is_debug_enabled,
};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::builder::{FilterBuilder, QueryBuilder};
    pub use crate::error::{QueryError, QueryResult};
    pub use crate::field;
    pub use crate::filter::{Filter, FilterKind};
    pub use crate::options::*;
    pub use crate::parse::FilterParser;
    pub use crate::path::{FieldExpr, FieldRef};
    pub use crate::query::Query;
    pub use crate::serialize::Serializer;
    pub use crate::value::FilterValue;
}
