//! Pest grammar parser for Quarry schema files.

use pest_derive::Parser;

/// The Quarry schema parser.
#[derive(Parser)]
#[grammar = "parser/quarry.pest"]
pub struct QuarryParser;
