//! Field path resolution.
//!
//! Turns a [`FieldExpr`] into the dot-joined wire path the engine indexes,
//! walking the schema model in scope so list elements and nested objects are
//! followed. Index and any-element markers contribute no path segment.
//!
//! ```rust
//! use quarry_query::{field, Resolver};
//! use quarry_schema::Schema;
//!
//! let resolver = Resolver::new();
//! let path = resolver.resolve(&field!(followers[0].first_name), &Schema::new(), None).unwrap();
//! assert_eq!(path, "followers.firstName");
//! ```

use parking_lot::RwLock;
use quarry_schema::{Field, FieldNaming, FieldType, Model, Schema};
use smol_str::SmolStr;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, trace};

use crate::error::{QueryError, QueryResult};
use crate::path::{FieldExpr, Segment};

/// Statistics for the resolved path cache.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of cache hits.
    pub hits: u64,
    /// Number of cache misses.
    pub misses: u64,
    /// Number of paths dropped to stay within capacity.
    pub evictions: u64,
    /// Number of paths currently cached.
    pub entries: usize,
}

impl CacheStats {
    /// Get the cache hit rate.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Default number of memoized paths.
pub const DEFAULT_CACHE_CAPACITY: usize = 1024;

type CacheKey = (SmolStr, String);

/// A memoized path and how often it was served.
#[derive(Debug)]
struct CachedPath {
    path: String,
    hits: AtomicU64,
}

/// Resolves field expressions to wire paths, memoizing the results.
///
/// The cache holds at most `capacity` paths. When it is full, the least
/// used quarter is evicted before a new path is stored.
#[derive(Debug)]
pub struct Resolver {
    naming: FieldNaming,
    capacity: usize,
    cache: Option<RwLock<HashMap<CacheKey, CachedPath>>>,
    stats: RwLock<CacheStats>,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Where the walk currently stands.
enum Cursor<'s> {
    Model(&'s Model),
    List(&'s Field),
    Scalar(&'s Field),
    Untyped,
}

impl Resolver {
    /// Create a resolver with camelCase naming and caching enabled.
    pub fn new() -> Self {
        Self::with_naming(FieldNaming::default())
    }

    /// Create a resolver with the given naming convention.
    pub fn with_naming(naming: FieldNaming) -> Self {
        Self {
            naming,
            capacity: DEFAULT_CACHE_CAPACITY,
            cache: Some(RwLock::new(HashMap::new())),
            stats: RwLock::default(),
        }
    }

    /// Bound the path cache to `capacity` entries (at least one).
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity.max(1);
        self
    }

    /// Disable the path cache.
    pub fn without_cache(mut self) -> Self {
        self.cache = None;
        self
    }

    /// The naming convention in use.
    pub fn naming(&self) -> FieldNaming {
        self.naming
    }

    /// Maximum number of memoized paths.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Resolve `expr` in the context of `model`.
    ///
    /// Without a model only naming conversion and marker elision apply.
    pub fn resolve(&self, expr: &FieldExpr, schema: &Schema, model: Option<&Model>) -> QueryResult<String> {
        let Some(cache) = &self.cache else {
            return self.walk(expr, schema, model);
        };

        let scope = model.map(|m| m.name.name.clone()).unwrap_or_default();
        let key = (scope, expr.to_string());

        if let Some(entry) = cache.read().get(&key) {
            entry.hits.fetch_add(1, Ordering::Relaxed);
            self.stats.write().hits += 1;
            trace!(expr = %key.1, path = %entry.path, "resolved path cache hit");
            return Ok(entry.path.clone());
        }

        let path = self.walk(expr, schema, model)?;
        trace!(expr = %key.1, model = %key.0, path = %path, "resolved field path");

        let mut cache = cache.write();
        let mut stats = self.stats.write();
        if cache.len() >= self.capacity && !cache.contains_key(&key) {
            let evicted = evict_least_used(&mut cache);
            stats.evictions += evicted as u64;
            debug!(evicted, capacity = self.capacity, "path cache evicted entries");
        }
        cache.insert(
            key,
            CachedPath {
                path: path.clone(),
                hits: AtomicU64::new(0),
            },
        );
        stats.misses += 1;
        Ok(path)
    }

    /// Get cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.read().clone();
        stats.entries = self.cache.as_ref().map_or(0, |c| c.read().len());
        stats
    }

    /// Clear cached paths and reset statistics.
    pub fn clear_cache(&self) {
        if let Some(cache) = &self.cache {
            cache.write().clear();
        }
        *self.stats.write() = CacheStats::default();
    }

    fn walk(&self, expr: &FieldExpr, schema: &Schema, model: Option<&Model>) -> QueryResult<String> {
        if expr.is_empty() {
            return Err(QueryError::unsupported_expression("", "expression selects no member"));
        }

        let text = expr.to_string();
        let mut cursor = model.map_or(Cursor::Untyped, Cursor::Model);
        let mut parts: Vec<String> = Vec::with_capacity(expr.segments().len());

        for segment in expr.segments() {
            cursor = match (segment, cursor) {
                (Segment::Call(name), _) => {
                    return Err(QueryError::unsupported_expression(
                        &text,
                        format!("`{}()` is a method call, not member access", name),
                    ));
                }
                (Segment::Member(name), Cursor::Untyped) => {
                    parts.push(self.naming.apply(name));
                    Cursor::Untyped
                }
                (Segment::Index(_) | Segment::AnyElement, Cursor::Untyped) => Cursor::Untyped,
                (Segment::Member(name), Cursor::Model(current)) => {
                    let field = find_field(current, name)
                        .ok_or_else(|| QueryError::unknown_field(current.name(), name.as_str()))?;
                    parts.push(self.wire_name(field));
                    if field.is_list() {
                        Cursor::List(field)
                    } else {
                        step_into(schema, field)?
                    }
                }
                (Segment::Index(_) | Segment::AnyElement, Cursor::List(field)) => step_into(schema, field)?,
                (Segment::Member(name), Cursor::List(field)) => {
                    return Err(QueryError::unsupported_expression(
                        &text,
                        format!("`{}` is a list; index it before accessing `{}`", field.name(), name),
                    ));
                }
                (Segment::Member(name), Cursor::Scalar(field)) => {
                    return Err(QueryError::unsupported_expression(
                        &text,
                        format!("`{}` is a scalar and has no member `{}`", field.name(), name),
                    ));
                }
                (Segment::Index(_) | Segment::AnyElement, Cursor::Model(current)) => {
                    return Err(QueryError::unsupported_expression(
                        &text,
                        format!("`{}` is not a list and cannot be indexed", current.name()),
                    ));
                }
                (Segment::Index(_) | Segment::AnyElement, Cursor::Scalar(field)) => {
                    return Err(QueryError::unsupported_expression(
                        &text,
                        format!("`{}` is not a list and cannot be indexed", field.name()),
                    ));
                }
            };
        }

        Ok(parts.join("."))
    }

    fn wire_name(&self, field: &Field) -> String {
        match field.wire_name() {
            Some(mapped) => mapped.to_string(),
            None => self.naming.apply(field.name()),
        }
    }
}

/// Drop the least served quarter of the cache (at least one entry).
fn evict_least_used(cache: &mut HashMap<CacheKey, CachedPath>) -> usize {
    let to_evict = (cache.len() / 4).max(1);
    let mut entries: Vec<_> = cache
        .iter()
        .map(|(key, entry)| (key.clone(), entry.hits.load(Ordering::Relaxed)))
        .collect();
    entries.sort_by_key(|(_, hits)| *hits);

    for (key, _) in entries.iter().take(to_evict) {
        cache.remove(key);
    }
    to_evict.min(entries.len())
}

/// Find a declared field by exact name, then by snake_case-normalized name
/// so `first_name` finds `FirstName`.
fn find_field<'m>(model: &'m Model, name: &str) -> Option<&'m Field> {
    model.get_field(name).or_else(|| {
        let wanted = FieldNaming::SnakeCase.apply(name);
        model
            .fields
            .values()
            .find(|f| FieldNaming::SnakeCase.apply(f.name()) == wanted)
    })
}

/// Move from a field to what its (element) type exposes.
fn step_into<'s>(schema: &'s Schema, field: &'s Field) -> QueryResult<Cursor<'s>> {
    match &field.field_type {
        FieldType::Model(target) => schema
            .get_model(target)
            .map(Cursor::Model)
            .ok_or_else(|| QueryError::unknown_model(target.as_str())),
        FieldType::Scalar(_) => Ok(Cursor::Scalar(field)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::field;
    use quarry_schema::ScalarType;

    fn schema() -> Schema {
        Schema::new()
            .with_model(
                Model::named("ElasticsearchProject")
                    .field(Field::scalar("Name", ScalarType::String))
                    .field(Field::scalar("LOC", ScalarType::Int))
                    .field(Field::scalar("Tags", ScalarType::String).list())
                    .field(Field::object("Followers", "Person").list())
                    .field(Field::object("Owner", "Person")),
            )
            .with_model(
                Model::named("Person")
                    .field(Field::scalar("FirstName", ScalarType::String))
                    .field(Field::scalar("Email", ScalarType::String).optional().mapped("emailAddress")),
            )
    }

    fn resolve(expr: FieldExpr) -> QueryResult<String> {
        let schema = schema();
        let model = schema.get_model("ElasticsearchProject");
        Resolver::new().resolve(&expr, &schema, model)
    }

    #[test]
    fn test_member_naming() {
        assert_eq!(resolve(field!(Name)).unwrap(), "name");
        assert_eq!(resolve(field!(LOC)).unwrap(), "loc");
        assert_eq!(resolve(field!(name)).unwrap(), "name");
    }

    #[test]
    fn test_list_element_path() {
        assert_eq!(resolve(field!(followers[0].first_name)).unwrap(), "followers.firstName");
        assert_eq!(resolve(field!(Followers[*].FirstName)).unwrap(), "followers.firstName");
        assert_eq!(resolve(field!(followers[0])).unwrap(), "followers");
        assert_eq!(resolve(field!(tags[3])).unwrap(), "tags");
    }

    #[test]
    fn test_mapped_field() {
        assert_eq!(resolve(field!(owner.email)).unwrap(), "owner.emailAddress");
    }

    #[test]
    fn test_unknown_member() {
        let err = resolve(field!(owner.nickname)).unwrap_err();
        assert_eq!(err.code, ErrorCode::UnknownField);
        assert_eq!(err.context.model.as_deref(), Some("Person"));
    }

    #[test]
    fn test_shape_errors() {
        for expr in [
            field!(name[0]),
            field!(followers.first_name),
            field!(name.length),
            field!(owner[0]),
            field!(name.to_lowercase()),
        ] {
            let err = resolve(expr.clone()).unwrap_err();
            assert_eq!(err.code, ErrorCode::UnsupportedExpression, "{}", expr);
        }
    }

    #[test]
    fn test_untyped_resolution() {
        let resolver = Resolver::new();
        let schema = Schema::new();
        let path = resolver
            .resolve(&field!(Followers[0].FirstName), &schema, None)
            .unwrap();
        assert_eq!(path, "followers.firstName");

        let err = resolver.resolve(&field!(name.trim()), &schema, None).unwrap_err();
        assert_eq!(err.code, ErrorCode::UnsupportedExpression);
    }

    #[test]
    fn test_cache_stats() {
        let schema = schema();
        let model = schema.get_model("ElasticsearchProject");
        let resolver = Resolver::new();

        resolver.resolve(&field!(name), &schema, model).unwrap();
        resolver.resolve(&field!(name), &schema, model).unwrap();
        resolver.resolve(&field!(name), &schema, None).unwrap();

        let stats = resolver.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 2);
        assert_eq!(stats.entries, 2);

        resolver.clear_cache();
        assert_eq!(resolver.stats(), CacheStats::default());
    }

    #[test]
    fn test_cache_stays_within_capacity() {
        let resolver = Resolver::new().with_capacity(8);
        let schema = Schema::new();

        let hot = FieldExpr::parse("hot").unwrap();
        resolver.resolve(&hot, &schema, None).unwrap();
        resolver.resolve(&hot, &schema, None).unwrap();

        for i in 0..100 {
            let expr = FieldExpr::parse(&format!("field{}", i)).unwrap();
            resolver.resolve(&expr, &schema, None).unwrap();
            assert!(resolver.stats().entries <= 8);
        }

        let stats = resolver.stats();
        assert_eq!(stats.misses, 101);
        assert!(stats.evictions >= 93);
        assert_eq!(stats.entries as u64 + stats.evictions, 101);

        resolver.resolve(&hot, &schema, None).unwrap();
        assert_eq!(resolver.stats().hits, 2);
    }

    #[test]
    fn test_zero_capacity_keeps_one_entry() {
        let resolver = Resolver::new().with_capacity(0);
        assert_eq!(resolver.capacity(), 1);
        resolver.resolve(&field!(a), &Schema::new(), None).unwrap();
        resolver.resolve(&field!(b), &Schema::new(), None).unwrap();
        let stats = resolver.stats();
        assert_eq!(stats.entries, 1);
        assert_eq!(stats.evictions, 1);
    }

    #[test]
    fn test_errors_are_not_cached() {
        let schema = schema();
        let model = schema.get_model("ElasticsearchProject");
        let resolver = Resolver::new();
        assert!(resolver.resolve(&field!(missing), &schema, model).is_err());
        assert_eq!(resolver.stats().entries, 0);
    }

    #[test]
    fn test_without_cache() {
        let resolver = Resolver::with_naming(FieldNaming::SnakeCase).without_cache();
        let path = resolver
            .resolve(&field!(Followers[0].FirstName), &Schema::new(), None)
            .unwrap();
        assert_eq!(path, "followers.first_name");
        assert_eq!(resolver.stats().entries, 0);
    }
}
