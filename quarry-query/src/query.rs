//! Sub-queries wrapped by query, nested and parent/child filters.
//!
//! Only the query shapes those filters need are modelled. Queries resolve
//! their fields the same way filters do.

use crate::options::MatchOperator;
use crate::path::FieldRef;
use crate::value::FilterValue;

/// A query clause.
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    /// Every document.
    MatchAll {
        /// Score boost.
        boost: Option<f64>,
    },
    /// Exact term.
    Term {
        /// Field to match.
        field: FieldRef,
        /// Term to match.
        value: FilterValue,
        /// Score boost.
        boost: Option<f64>,
    },
    /// Any of a set of terms.
    Terms {
        /// Field to match.
        field: FieldRef,
        /// Candidate terms.
        values: Vec<FilterValue>,
    },
    /// Analyzed full-text match.
    Match {
        /// Field to match.
        field: FieldRef,
        /// Query text.
        query: String,
        /// How analyzed terms combine.
        operator: Option<MatchOperator>,
    },
    /// Term prefix.
    Prefix {
        /// Field to match.
        field: FieldRef,
        /// Required prefix.
        value: String,
    },
    /// Lucene query syntax.
    QueryString {
        /// Query text.
        query: String,
        /// Field used when the text names none.
        default_field: Option<FieldRef>,
    },
    /// Boolean composition.
    Bool {
        /// Clauses that must match.
        must: Vec<Query>,
        /// Clauses that must not match.
        must_not: Vec<Query>,
        /// Clauses that should match.
        should: Vec<Query>,
    },
}

impl Query {
    /// Match every document.
    pub fn match_all() -> Self {
        Self::MatchAll { boost: None }
    }

    /// Exact term query.
    pub fn term(field: impl Into<FieldRef>, value: impl Into<FilterValue>) -> Self {
        Self::Term {
            field: field.into(),
            value: value.into(),
            boost: None,
        }
    }

    /// Terms query.
    pub fn terms<I, V>(field: impl Into<FieldRef>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<FilterValue>,
    {
        Self::Terms {
            field: field.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Full-text match query.
    pub fn matches(field: impl Into<FieldRef>, query: impl Into<String>) -> Self {
        Self::Match {
            field: field.into(),
            query: query.into(),
            operator: None,
        }
    }

    /// Prefix query.
    pub fn prefix(field: impl Into<FieldRef>, value: impl Into<String>) -> Self {
        Self::Prefix {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Query-string query.
    pub fn query_string(query: impl Into<String>) -> Self {
        Self::QueryString {
            query: query.into(),
            default_field: None,
        }
    }

    /// Empty boolean query.
    pub fn bool() -> Self {
        Self::Bool {
            must: Vec::new(),
            must_not: Vec::new(),
            should: Vec::new(),
        }
    }

    /// Set the boost on `match_all` and `term` queries.
    ///
    /// Other variants carry no boost and are returned unchanged.
    pub fn boost(mut self, value: f64) -> Self {
        if let Self::MatchAll { boost } | Self::Term { boost, .. } = &mut self {
            *boost = Some(value);
        }
        self
    }

    /// Set the operator of a `match` query.
    pub fn operator(mut self, value: MatchOperator) -> Self {
        if let Self::Match { operator, .. } = &mut self {
            *operator = Some(value);
        }
        self
    }

    /// Set the default field of a `query_string` query.
    pub fn default_field(mut self, field: impl Into<FieldRef>) -> Self {
        if let Self::QueryString { default_field, .. } = &mut self {
            *default_field = Some(field.into());
        }
        self
    }

    /// Append `must` clauses to a `bool` query.
    pub fn must(mut self, clauses: impl IntoIterator<Item = Query>) -> Self {
        if let Self::Bool { must, .. } = &mut self {
            must.extend(clauses);
        }
        self
    }

    /// Append `must_not` clauses to a `bool` query.
    pub fn must_not(mut self, clauses: impl IntoIterator<Item = Query>) -> Self {
        if let Self::Bool { must_not, .. } = &mut self {
            must_not.extend(clauses);
        }
        self
    }

    /// Append `should` clauses to a `bool` query.
    pub fn should(mut self, clauses: impl IntoIterator<Item = Query>) -> Self {
        if let Self::Bool { should, .. } = &mut self {
            should.extend(clauses);
        }
        self
    }

    /// The query's wire key.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::MatchAll { .. } => "match_all",
            Self::Term { .. } => "term",
            Self::Terms { .. } => "terms",
            Self::Match { .. } => "match",
            Self::Prefix { .. } => "prefix",
            Self::QueryString { .. } => "query_string",
            Self::Bool { .. } => "bool",
        }
    }
}
