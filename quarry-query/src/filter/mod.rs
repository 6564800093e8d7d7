//! Filter descriptors.
//!
//! A [`Filter`] pairs one [`FilterKind`] with the caching metadata every
//! variant accepts. Variant structs hold only their own configuration and
//! double as the configurators handed to builder closures.
//!
//! ```rust
//! use quarry_query::filter::{Filter, TermFilter};
//!
//! let filter = Filter::from(TermFilter::new("name", "elasticsearch"))
//!     .name("by-name")
//!     .cache(true);
//!
//! assert_eq!(filter.kind_name(), "term");
//! assert_eq!(filter.meta.name.as_deref(), Some("by-name"));
//! assert_eq!(filter.meta.cache, Some(true));
//! ```

mod compound;
mod geo;
mod range;
mod term;

pub use compound::{AndFilter, BoolFilter, HasChildFilter, HasParentFilter, NestedFilter, NotFilter, OrFilter, QueryFilter};
pub use geo::{GeoBoundingBoxFilter, GeoDistanceFilter, GeoDistanceRangeFilter, GeoPolygonFilter, GeoShapeFilter};
pub use range::{NumericRangeFilter, RangeBounds, RangeFilter};
pub use term::{
    ExistsFilter, IdsFilter, LimitFilter, MatchAllFilter, MissingFilter, PrefixFilter, RegexpFilter, ScriptFilter,
    TermFilter, TermsFilter, TypeFilter,
};

/// Caching metadata accepted by every filter.
///
/// Serialized as the reserved `_name`, `_cache` and `_cache_key` keys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CacheMeta {
    /// Filter name reported back in matched results.
    pub name: Option<String>,
    /// Whether the engine should cache the filter's result.
    pub cache: Option<bool>,
    /// Explicit cache key.
    pub cache_key: Option<String>,
}

impl CacheMeta {
    /// Check if no metadata is set.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.cache.is_none() && self.cache_key.is_none()
    }
}

/// A filter descriptor: one variant plus caching metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    /// The variant and its configuration.
    pub kind: FilterKind,
    /// Caching metadata.
    pub meta: CacheMeta,
}

impl Filter {
    /// Wrap a variant with empty metadata.
    pub fn new(kind: FilterKind) -> Self {
        Self {
            kind,
            meta: CacheMeta::default(),
        }
    }

    /// Set the filter name (`_name`).
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.meta.name = Some(name.into());
        self
    }

    /// Set whether the result is cached (`_cache`).
    pub fn cache(mut self, cache: bool) -> Self {
        self.meta.cache = Some(cache);
        self
    }

    /// Set the cache key (`_cache_key`).
    pub fn cache_key(mut self, key: impl Into<String>) -> Self {
        self.meta.cache_key = Some(key.into());
        self
    }

    /// The variant's wire key.
    pub fn kind_name(&self) -> &'static str {
        self.kind.name()
    }
}

impl From<&Filter> for Filter {
    fn from(filter: &Filter) -> Self {
        filter.clone()
    }
}

macro_rules! filter_kinds {
    ($( $(#[$doc:meta])* $variant:ident($ty:ty) => $wire:literal ),+ $(,)?) => {
        /// Every filter variant.
        #[derive(Debug, Clone, PartialEq)]
        pub enum FilterKind {
            $( $(#[$doc])* $variant($ty) ),+
        }

        impl FilterKind {
            /// The variant's wire key.
            pub fn name(&self) -> &'static str {
                match self {
                    $( Self::$variant(_) => $wire ),+
                }
            }
        }

        $(
            impl From<$ty> for FilterKind {
                fn from(filter: $ty) -> Self {
                    Self::$variant(filter)
                }
            }

            impl From<$ty> for Filter {
                fn from(filter: $ty) -> Self {
                    Filter::new(FilterKind::$variant(filter))
                }
            }
        )+
    };
}

filter_kinds! {
    /// Exact term match.
    Term(TermFilter) => "term",
    /// Match any of a set of terms.
    Terms(TermsFilter) => "terms",
    /// Must / must-not / should composition.
    Bool(BoolFilter) => "bool",
    /// All children match.
    And(AndFilter) => "and",
    /// Any child matches.
    Or(OrFilter) => "or",
    /// Child does not match.
    Not(NotFilter) => "not",
    /// Field has a value.
    Exists(ExistsFilter) => "exists",
    /// Field has no value.
    Missing(MissingFilter) => "missing",
    /// Lexical or numeric range.
    Range(RangeFilter) => "range",
    /// Numeric-only range.
    NumericRange(NumericRangeFilter) => "numeric_range",
    /// Point inside a box.
    GeoBoundingBox(GeoBoundingBoxFilter) => "geo_bounding_box",
    /// Point within a distance.
    GeoDistance(GeoDistanceFilter) => "geo_distance",
    /// Point within a distance band.
    GeoDistanceRange(GeoDistanceRangeFilter) => "geo_distance_range",
    /// Point inside a polygon.
    GeoPolygon(GeoPolygonFilter) => "geo_polygon",
    /// Shape relation.
    GeoShape(GeoShapeFilter) => "geo_shape",
    /// Parent documents whose children match.
    HasChild(HasChildFilter) => "has_child",
    /// Child documents whose parent matches.
    HasParent(HasParentFilter) => "has_parent",
    /// Documents by id.
    Ids(IdsFilter) => "ids",
    /// Cap on documents examined per shard.
    Limit(LimitFilter) => "limit",
    /// Every document.
    MatchAll(MatchAllFilter) => "match_all",
    /// Nested objects matching a query.
    Nested(NestedFilter) => "nested",
    /// Term prefix.
    Prefix(PrefixFilter) => "prefix",
    /// Wrapped query.
    Query(QueryFilter) => "query",
    /// Regular expression over terms.
    Regexp(RegexpFilter) => "regexp",
    /// Script predicate.
    Script(ScriptFilter) => "script",
    /// Document type.
    Type(TypeFilter) => "type",
}

/// Collect filters from anything iterable over filter-like values.
pub(crate) fn collect<I, F>(filters: I) -> Vec<Filter>
where
    I: IntoIterator<Item = F>,
    F: Into<Filter>,
{
    filters.into_iter().map(Into::into).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meta_setters_in_any_order() {
        let a = Filter::from(MatchAllFilter).cache(true).name("n").cache_key("k");
        let b = Filter::from(MatchAllFilter).cache_key("k").cache(true).name("n");
        assert_eq!(a, b);
        assert!(!a.meta.is_empty());
    }

    #[test]
    fn test_meta_overwrites() {
        let f = Filter::from(MatchAllFilter).cache(true).cache(false);
        assert_eq!(f.meta.cache, Some(false));
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(Filter::from(TermFilter::new("a", "b")).kind_name(), "term");
        assert_eq!(Filter::from(NumericRangeFilter::default()).kind_name(), "numeric_range");
        assert_eq!(Filter::from(TypeFilter::new("t")).kind_name(), "type");
    }

    #[test]
    fn test_reference_converts_by_clone() {
        let original = Filter::from(TermFilter::new("w", "x")).name("reused");
        let copy: Filter = (&original).into();
        assert_eq!(copy, original);
    }
}
