//! Composite filters: boolean combinators and filters wrapping sub-queries.
//!
//! Children are owned by value. Passing `&Filter` clones it, so one
//! descriptor can be placed at several positions in a tree.

use super::{Filter, collect};
use crate::options::NestedScore;
use crate::path::FieldRef;
use crate::query::Query;

/// Must / must-not / should composition.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoolFilter {
    /// Children that must match.
    pub must: Vec<Filter>,
    /// Children that must not match.
    pub must_not: Vec<Filter>,
    /// Children that should match.
    pub should: Vec<Filter>,
}

impl BoolFilter {
    /// Append `must` children.
    pub fn must<I, F>(mut self, filters: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: Into<Filter>,
    {
        self.must.extend(collect(filters));
        self
    }

    /// Append `must_not` children.
    pub fn must_not<I, F>(mut self, filters: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: Into<Filter>,
    {
        self.must_not.extend(collect(filters));
        self
    }

    /// Append `should` children.
    pub fn should<I, F>(mut self, filters: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: Into<Filter>,
    {
        self.should.extend(collect(filters));
        self
    }
}

/// Matches when every child matches.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AndFilter {
    /// Children, in order.
    pub filters: Vec<Filter>,
}

impl AndFilter {
    /// Create an `and` over `filters`.
    pub fn new<I, F>(filters: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: Into<Filter>,
    {
        Self {
            filters: collect(filters),
        }
    }
}

/// Matches when any child matches.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrFilter {
    /// Children, in order.
    pub filters: Vec<Filter>,
}

impl OrFilter {
    /// Create an `or` over `filters`.
    pub fn new<I, F>(filters: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: Into<Filter>,
    {
        Self {
            filters: collect(filters),
        }
    }
}

/// Matches when the child does not.
#[derive(Debug, Clone, PartialEq)]
pub struct NotFilter {
    /// The negated child.
    pub filter: Box<Filter>,
}

impl NotFilter {
    /// Negate `filter`.
    pub fn new(filter: impl Into<Filter>) -> Self {
        Self {
            filter: Box::new(filter.into()),
        }
    }
}

/// Documents with nested objects matching a query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NestedFilter {
    /// Path of the nested list.
    pub path: Option<FieldRef>,
    /// Facet scope name.
    pub scope: Option<String>,
    /// How nested hits are scored.
    pub score_mode: Option<NestedScore>,
    /// Query run against the nested objects.
    pub query: Option<Box<Query>>,
}

impl NestedFilter {
    /// Set the nested path.
    pub fn path(mut self, path: impl Into<FieldRef>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Set the scope.
    pub fn scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    /// Set the score mode.
    pub fn score(mut self, score_mode: NestedScore) -> Self {
        self.score_mode = Some(score_mode);
        self
    }

    /// Set the query.
    pub fn query(mut self, query: Query) -> Self {
        self.query = Some(Box::new(query));
        self
    }
}

/// Parent documents whose children match a query.
///
/// The query's fields resolve against the child model.
#[derive(Debug, Clone, PartialEq)]
pub struct HasChildFilter {
    /// Child model name.
    pub child_type: String,
    /// Facet scope name.
    pub scope: Option<String>,
    /// Query run against the children.
    pub query: Option<Box<Query>>,
}

impl HasChildFilter {
    /// Create a filter over children of `child_type`.
    pub fn new(child_type: impl Into<String>) -> Self {
        Self {
            child_type: child_type.into(),
            scope: None,
            query: None,
        }
    }

    /// Set the scope.
    pub fn scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    /// Set the query.
    pub fn query(mut self, query: Query) -> Self {
        self.query = Some(Box::new(query));
        self
    }
}

/// Child documents whose parent matches a query.
///
/// The query's fields resolve against the parent model.
#[derive(Debug, Clone, PartialEq)]
pub struct HasParentFilter {
    /// Parent model name.
    pub parent_type: String,
    /// Facet scope name.
    pub scope: Option<String>,
    /// Query run against the parents.
    pub query: Option<Box<Query>>,
}

impl HasParentFilter {
    /// Create a filter over parents of `parent_type`.
    pub fn new(parent_type: impl Into<String>) -> Self {
        Self {
            parent_type: parent_type.into(),
            scope: None,
            query: None,
        }
    }

    /// Set the scope.
    pub fn scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    /// Set the query.
    pub fn query(mut self, query: Query) -> Self {
        self.query = Some(Box::new(query));
        self
    }
}

/// A query used as a filter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryFilter {
    /// The wrapped query.
    pub query: Option<Box<Query>>,
}

impl QueryFilter {
    /// Wrap `query`.
    pub fn new(query: Query) -> Self {
        Self {
            query: Some(Box::new(query)),
        }
    }
}
