//! Typed filter and query factories.
//!
//! [`FilterBuilder<T>`] has one factory per filter variant. Fields are given
//! as [`field!`](crate::field) expressions, resolved later against `T`'s
//! schema model, or as verbatim path strings.
//!
//! # Example
//!
//! ```rust
//! use quarry_query::{field, FilterBuilder};
//! use quarry_query::options::{GeoOptimizeBBox, GeoUnit, NestedScore};
//! use quarry_schema::Document;
//!
//! struct Project;
//! impl Document for Project {
//!     const MODEL: &'static str = "ElasticsearchProject";
//! }
//!
//! let f = FilterBuilder::<Project>::new();
//!
//! let near = f.geo_distance(field!(origin), |d| d
//!     .distance(1.0, GeoUnit::Kilometers)
//!     .location(2.0, 4.0)
//!     .optimize(GeoOptimizeBBox::Indexed));
//!
//! let followed = f.nested(|n, q| n
//!     .path(field!(followers[0]))
//!     .score(NestedScore::Max)
//!     .query(q.term(field!(followers[0].first_name), "elasticsearch.pm")));
//!
//! let both = f.and([near, followed]).name("near-and-followed");
//! assert_eq!(both.kind_name(), "and");
//! ```

use quarry_schema::Document;
use std::fmt;
use std::marker::PhantomData;

use crate::filter::*;
use crate::options::{GeoExecution, TermsExecution};
use crate::path::FieldRef;
use crate::query::Query;
use crate::value::FilterValue;

// ==============================================================================
// Filter factories
// ==============================================================================

/// Filter factories over documents of `T`.
pub struct FilterBuilder<T: Document> {
    _model: PhantomData<fn() -> T>,
}

impl<T: Document> FilterBuilder<T> {
    /// Create a builder.
    pub fn new() -> Self {
        Self { _model: PhantomData }
    }

    /// Exact term match.
    pub fn term(&self, field: impl Into<FieldRef>, value: impl Into<FilterValue>) -> Filter {
        TermFilter::new(field, value).into()
    }

    /// Match any of `terms`.
    pub fn terms<I, V>(&self, field: impl Into<FieldRef>, terms: I) -> Filter
    where
        I: IntoIterator<Item = V>,
        V: Into<FilterValue>,
    {
        TermsFilter::new(field, terms).into()
    }

    /// Match any of `terms` with an explicit execution mode.
    pub fn terms_with_execution<I, V>(&self, field: impl Into<FieldRef>, terms: I, execution: TermsExecution) -> Filter
    where
        I: IntoIterator<Item = V>,
        V: Into<FilterValue>,
    {
        TermsFilter::new(field, terms).execution(execution).into()
    }

    /// Boolean composition.
    pub fn bool(&self, configure: impl FnOnce(BoolFilter) -> BoolFilter) -> Filter {
        configure(BoolFilter::default()).into()
    }

    /// Lexical or numeric range.
    pub fn range(&self, configure: impl FnOnce(RangeFilter) -> RangeFilter) -> Filter {
        configure(RangeFilter::default()).into()
    }

    /// Numeric range.
    pub fn numeric_range(&self, configure: impl FnOnce(NumericRangeFilter) -> NumericRangeFilter) -> Filter {
        configure(NumericRangeFilter::default()).into()
    }

    /// Points inside the box spanned by two `(lat, lon)` corners.
    pub fn geo_bounding_box(
        &self,
        field: impl Into<FieldRef>,
        top_left: (f64, f64),
        bottom_right: (f64, f64),
        execution: impl Into<Option<GeoExecution>>,
    ) -> Filter {
        GeoBoundingBoxFilter {
            field: Some(field.into()),
            top_left: Some(top_left),
            bottom_right: Some(bottom_right),
            execution: execution.into(),
        }
        .into()
    }

    /// Points within a distance.
    pub fn geo_distance(
        &self,
        field: impl Into<FieldRef>,
        configure: impl FnOnce(GeoDistanceFilter) -> GeoDistanceFilter,
    ) -> Filter {
        configure(GeoDistanceFilter::default().on_field(field)).into()
    }

    /// Points within a distance band.
    pub fn geo_distance_range(
        &self,
        field: impl Into<FieldRef>,
        configure: impl FnOnce(GeoDistanceRangeFilter) -> GeoDistanceRangeFilter,
    ) -> Filter {
        configure(GeoDistanceRangeFilter::default().on_field(field)).into()
    }

    /// Points inside a polygon of `(lat, lon)` vertices.
    pub fn geo_polygon(&self, field: impl Into<FieldRef>, points: impl IntoIterator<Item = (f64, f64)>) -> Filter {
        GeoPolygonFilter::new(field, points).into()
    }

    /// Shape relation.
    pub fn geo_shape(&self, field: impl Into<FieldRef>, configure: impl FnOnce(GeoShapeFilter) -> GeoShapeFilter) -> Filter {
        configure(GeoShapeFilter::default().on_field(field)).into()
    }

    /// Documents whose `C` children match a query built over `C`.
    pub fn has_child<C: Document>(
        &self,
        configure: impl FnOnce(HasChildFilter, QueryBuilder<C>) -> HasChildFilter,
    ) -> Filter {
        configure(HasChildFilter::new(C::MODEL), QueryBuilder::new()).into()
    }

    /// Documents whose `P` parent matches a query built over `P`.
    pub fn has_parent<P: Document>(
        &self,
        configure: impl FnOnce(HasParentFilter, QueryBuilder<P>) -> HasParentFilter,
    ) -> Filter {
        configure(HasParentFilter::new(P::MODEL), QueryBuilder::new()).into()
    }

    /// Documents by type and id.
    pub fn ids<S, V>(&self, types: impl IntoIterator<Item = S>, values: impl IntoIterator<Item = V>) -> Filter
    where
        S: Into<String>,
        V: Into<String>,
    {
        IdsFilter::new(types, values).into()
    }

    /// Cap on documents examined per shard.
    pub fn limit(&self, value: u64) -> Filter {
        LimitFilter::new(value).into()
    }

    /// Every document.
    pub fn match_all(&self) -> Filter {
        MatchAllFilter.into()
    }

    /// Documents without a value for `field`.
    pub fn missing(&self, field: impl Into<FieldRef>) -> Filter {
        MissingFilter::new(field).into()
    }

    /// Documents with nested objects matching a query.
    pub fn nested(&self, configure: impl FnOnce(NestedFilter, QueryBuilder<T>) -> NestedFilter) -> Filter {
        configure(NestedFilter::default(), QueryBuilder::new()).into()
    }

    /// Negation of the filter the closure returns.
    pub fn not(&self, select: impl FnOnce(&Self) -> Filter) -> Filter {
        NotFilter::new(select(self)).into()
    }

    /// Any of `filters`.
    pub fn or<I, F>(&self, filters: I) -> Filter
    where
        I: IntoIterator<Item = F>,
        F: Into<Filter>,
    {
        OrFilter::new(filters).into()
    }

    /// All of `filters`.
    pub fn and<I, F>(&self, filters: I) -> Filter
    where
        I: IntoIterator<Item = F>,
        F: Into<Filter>,
    {
        AndFilter::new(filters).into()
    }

    /// Terms starting with `prefix`.
    pub fn prefix(&self, field: impl Into<FieldRef>, prefix: impl Into<String>) -> Filter {
        PrefixFilter::new(field, prefix).into()
    }

    /// A query used as a filter.
    pub fn query(&self, build: impl FnOnce(QueryBuilder<T>) -> Query) -> Filter {
        QueryFilter::new(build(QueryBuilder::new())).into()
    }

    /// Terms matching a regular expression.
    pub fn regexp(&self, configure: impl FnOnce(RegexpFilter) -> RegexpFilter) -> Filter {
        configure(RegexpFilter::default()).into()
    }

    /// Script predicate.
    pub fn script(&self, configure: impl FnOnce(ScriptFilter) -> ScriptFilter) -> Filter {
        configure(ScriptFilter::default()).into()
    }

    /// Documents of one type.
    pub fn type_filter(&self, value: impl Into<String>) -> Filter {
        TypeFilter::new(value).into()
    }

    /// Documents with a value for `field`.
    pub fn exists(&self, field: impl Into<FieldRef>) -> Filter {
        ExistsFilter::new(field).into()
    }
}

impl<T: Document> Default for FilterBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Document> Clone for FilterBuilder<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Document> Copy for FilterBuilder<T> {}

impl<T: Document> fmt::Debug for FilterBuilder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterBuilder").field("model", &T::MODEL).finish()
    }
}

// ==============================================================================
// Query factories
// ==============================================================================

/// Query factories over documents of `T`.
pub struct QueryBuilder<T: Document> {
    _model: PhantomData<fn() -> T>,
}

impl<T: Document> QueryBuilder<T> {
    /// Create a builder.
    pub fn new() -> Self {
        Self { _model: PhantomData }
    }

    /// Every document.
    pub fn match_all(&self) -> Query {
        Query::match_all()
    }

    /// Exact term.
    pub fn term(&self, field: impl Into<FieldRef>, value: impl Into<FilterValue>) -> Query {
        Query::term(field, value)
    }

    /// Any of `values`.
    pub fn terms<I, V>(&self, field: impl Into<FieldRef>, values: I) -> Query
    where
        I: IntoIterator<Item = V>,
        V: Into<FilterValue>,
    {
        Query::terms(field, values)
    }

    /// Analyzed full-text match.
    pub fn matches(&self, field: impl Into<FieldRef>, text: impl Into<String>) -> Query {
        Query::matches(field, text)
    }

    /// Term prefix.
    pub fn prefix(&self, field: impl Into<FieldRef>, value: impl Into<String>) -> Query {
        Query::prefix(field, value)
    }

    /// Lucene query syntax.
    pub fn query_string(&self, text: impl Into<String>) -> Query {
        Query::query_string(text)
    }

    /// Boolean composition.
    pub fn bool(&self) -> Query {
        Query::bool()
    }
}

impl<T: Document> Default for QueryBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Document> Clone for QueryBuilder<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Document> Copy for QueryBuilder<T> {}

impl<T: Document> fmt::Debug for QueryBuilder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryBuilder").field("model", &T::MODEL).finish()
    }
}
