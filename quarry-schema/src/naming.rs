//! Field naming conventions applied when schema member names become wire names.

use convert_case::{Case, Casing};
use serde::{Deserialize, Serialize};

/// How declared member names are turned into wire field names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldNaming {
    /// `FirstName` / `first_name` become `firstName`, `LOC` becomes `loc`.
    #[default]
    CamelCase,
    /// `FirstName` becomes `first_name`.
    SnakeCase,
    /// Names are used exactly as declared.
    Verbatim,
}

impl FieldNaming {
    /// Apply this convention to one member name.
    pub fn apply(&self, name: &str) -> String {
        match self {
            Self::CamelCase => name.to_case(Case::Camel),
            Self::SnakeCase => name.to_case(Case::Snake),
            Self::Verbatim => name.to_string(),
        }
    }

    /// Get the convention name as used in `quarry.toml`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CamelCase => "camel_case",
            Self::SnakeCase => "snake_case",
            Self::Verbatim => "verbatim",
        }
    }
}

impl std::fmt::Display for FieldNaming {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case() {
        let naming = FieldNaming::CamelCase;
        assert_eq!(naming.apply("Name"), "name");
        assert_eq!(naming.apply("LOC"), "loc");
        assert_eq!(naming.apply("FirstName"), "firstName");
        assert_eq!(naming.apply("first_name"), "firstName");
        assert_eq!(naming.apply("followers"), "followers");
    }

    #[test]
    fn test_snake_case() {
        assert_eq!(FieldNaming::SnakeCase.apply("FirstName"), "first_name");
        assert_eq!(FieldNaming::SnakeCase.apply("Name"), "name");
    }

    #[test]
    fn test_verbatim() {
        assert_eq!(FieldNaming::Verbatim.apply("FirstName"), "FirstName");
    }
}
