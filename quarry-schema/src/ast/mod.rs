//! Abstract Syntax Tree (AST) types for Quarry schemas.
//!
//! This module contains all the types that describe the document models
//! filters are built against.

mod attribute;
mod field;
mod model;
mod schema;
mod types;

pub use attribute::*;
pub use field::*;
pub use model::*;
pub use schema::*;
pub use types::*;
