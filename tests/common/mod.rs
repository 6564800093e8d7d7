//! Shared schema and document types for the integration tests.

#![allow(dead_code)]

use quarry::schema::{Document, Schema, validate_schema};
use quarry::Serializer;
use std::sync::Arc;

/// Projects with followers, plus the people who follow them.
pub const PROJECT_SCHEMA: &str = r#"
/// A project indexed for search.
model ElasticsearchProject {
    Id         Int
    Name       String
    Country    String?
    LOC        Long
    Origin     GeoPoint
    MyGeoShape GeoShape?
    StartedOn  Date
    Followers  Person[]
}

model Person {
    FirstName    String
    LastName     String
    Email        String?  @map("emailAddress")
    PlaceOfBirth GeoPoint?
}
"#;

pub struct Project;

impl Document for Project {
    const MODEL: &'static str = "ElasticsearchProject";
}

pub struct Person;

impl Document for Person {
    const MODEL: &'static str = "Person";
}

pub fn schema() -> Schema {
    validate_schema(PROJECT_SCHEMA).expect("project schema is valid")
}

pub fn serializer() -> Serializer {
    Serializer::new(Arc::new(schema()))
}
