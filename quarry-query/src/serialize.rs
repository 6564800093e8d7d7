//! Filter serialization.
//!
//! Walks a filter tree and emits the engine's JSON filter document.
//! Field expressions are resolved here, against the schema model in scope:
//! the document model at the root, and the target model inside `has_child`
//! and `has_parent`.
//!
//! ```rust
//! use std::sync::Arc;
//! use quarry_query::{field, FilterBuilder, Serializer};
//! use quarry_schema::{Document, validate_schema};
//!
//! struct Project;
//! impl Document for Project {
//!     const MODEL: &'static str = "Project";
//! }
//!
//! let schema = validate_schema("model Project { Name String }").unwrap();
//! let serializer = Serializer::new(Arc::new(schema));
//!
//! let filter = FilterBuilder::<Project>::new().term(field!(name), "quarry").cache(true);
//! let json = serializer.to_json_string::<Project>(&filter).unwrap();
//! assert_eq!(json, r#"{"term":{"name":"quarry","_cache":true}}"#);
//! ```

use quarry_schema::{Document, FieldNaming, Model, QuarryConfig, Schema};
use serde_json::{Map, Number, Value};
use std::sync::Arc;
use tracing::debug;

use crate::error::{QueryError, QueryResult};
use crate::filter::*;
use crate::format::{format_distance, format_point};
use crate::path::FieldRef;
use crate::query::Query;
use crate::resolver::Resolver;
use crate::value::FilterValue;

/// Serializes filters to wire documents.
#[derive(Debug)]
pub struct Serializer {
    schema: Arc<Schema>,
    resolver: Resolver,
}

impl Default for Serializer {
    fn default() -> Self {
        Self::new(Arc::new(Schema::new()))
    }
}

/// Schema context for one level of the tree.
#[derive(Clone, Copy)]
struct Scope<'s> {
    model: Option<&'s Model>,
    typed: bool,
}

impl<'s> Scope<'s> {
    fn untyped() -> Self {
        Self {
            model: None,
            typed: false,
        }
    }

    fn typed(model: &'s Model) -> Self {
        Self {
            model: Some(model),
            typed: true,
        }
    }
}

impl Serializer {
    /// Create a serializer over `schema` with default naming and caching.
    pub fn new(schema: Arc<Schema>) -> Self {
        Self {
            schema,
            resolver: Resolver::new(),
        }
    }

    /// Create a serializer configured from `quarry.toml`.
    pub fn from_config(schema: Arc<Schema>, config: &QuarryConfig) -> Self {
        let mut resolver =
            Resolver::with_naming(config.serializer.field_naming).with_capacity(config.serializer.path_cache_capacity);
        if !config.serializer.path_cache {
            resolver = resolver.without_cache();
        }
        Self { schema, resolver }
    }

    /// Use a different naming convention.
    pub fn with_naming(mut self, naming: FieldNaming) -> Self {
        self.resolver = Resolver::with_naming(naming);
        self
    }

    /// Use a preconfigured resolver.
    pub fn with_resolver(mut self, resolver: Resolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// The schema in use.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// The resolver in use.
    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// Serialize a filter over documents of `T`.
    pub fn serialize<T: Document>(&self, filter: &Filter) -> QueryResult<Value> {
        self.serialize_in(filter, T::MODEL)
    }

    /// Serialize a filter over documents of the named model.
    pub fn serialize_in(&self, filter: &Filter, model: &str) -> QueryResult<Value> {
        let model = self
            .schema
            .get_model(model)
            .ok_or_else(|| QueryError::unknown_model(model))?;
        debug!(model = model.name(), kind = filter.kind_name(), "serializing filter");
        self.filter(filter, Scope::typed(model))
    }

    /// Serialize a filter without a schema model.
    ///
    /// Expressions are only renamed; `has_child` / `has_parent` types are
    /// lowercased model names.
    pub fn serialize_untyped(&self, filter: &Filter) -> QueryResult<Value> {
        debug!(kind = filter.kind_name(), "serializing untyped filter");
        self.filter(filter, Scope::untyped())
    }

    /// Serialize a query over documents of `T`.
    pub fn serialize_query<T: Document>(&self, query: &Query) -> QueryResult<Value> {
        let model = self
            .schema
            .get_model(T::MODEL)
            .ok_or_else(|| QueryError::unknown_model(T::MODEL))?;
        self.query(query, Scope::typed(model))
    }

    /// Serialize a filter over documents of `T` to JSON text.
    pub fn to_json_string<T: Document>(&self, filter: &Filter) -> QueryResult<String> {
        let json = serde_json::to_string(&self.serialize::<T>(filter)?).map_err(QueryError::serialization)?;
        crate::quarry_debug!(bytes = json.len(), "filter document written");
        Ok(json)
    }

    /// Serialize a filter over documents of `T` to indented JSON text.
    pub fn to_json_string_pretty<T: Document>(&self, filter: &Filter) -> QueryResult<String> {
        serde_json::to_string_pretty(&self.serialize::<T>(filter)?).map_err(QueryError::serialization)
    }

    // ============================================================================
    // Filters
    // ============================================================================

    fn filter(&self, filter: &Filter, scope: Scope<'_>) -> QueryResult<Value> {
        let kind = filter.kind_name();

        let body = match &filter.kind {
            FilterKind::Term(f) => {
                let field = self.keyed(&f.field, kind, scope, &[])?;
                let value = required(f.value.as_ref(), kind, "value")?;
                Body::new().put(field, json_value(value, kind, "value")?)
            }
            FilterKind::Terms(f) => {
                let field = self.keyed(&f.field, kind, scope, &["execution"])?;
                let terms = f
                    .terms
                    .iter()
                    .map(|t| json_value(t, kind, "terms"))
                    .collect::<QueryResult<Vec<_>>>()?;
                Body::new()
                    .put(field, terms)
                    .put_opt("execution", f.execution.map(|e| e.as_str()))
            }
            FilterKind::Bool(f) => Body::new()
                .put_list("must", self.filters(&f.must, scope)?)
                .put_list("must_not", self.filters(&f.must_not, scope)?)
                .put_list("should", self.filters(&f.should, scope)?),
            FilterKind::And(f) => Body::new().put("filters", self.filters(&f.filters, scope)?),
            FilterKind::Or(f) => Body::new().put("filters", self.filters(&f.filters, scope)?),
            FilterKind::Not(f) => Body::new().put("filter", self.filter(&f.filter, scope)?),
            FilterKind::Exists(f) => Body::new().put("field", self.field(&f.field, kind, scope)?),
            FilterKind::Missing(f) => Body::new()
                .put("field", self.field(&f.field, kind, scope)?)
                .put_opt("existence", f.existence)
                .put_opt("null_value", f.null_value),
            FilterKind::Range(f) => {
                let field = self.keyed(&f.field, kind, scope, &[])?;
                check_bounds(&f.bounds, kind, FilterValue::is_range_bound, "bounds must be strings or numbers")?;
                Body::new().put(field, range_bounds(&f.bounds, kind)?)
            }
            FilterKind::NumericRange(f) => {
                let field = self.keyed(&f.field, kind, scope, &[])?;
                check_bounds(&f.bounds, kind, FilterValue::is_numeric, "bounds must be numbers")?;
                Body::new().put(field, range_bounds(&f.bounds, kind)?)
            }
            FilterKind::GeoBoundingBox(f) => {
                let field = self.keyed(&f.field, kind, scope, &["type"])?;
                let (tl_lat, tl_lon) = required(f.top_left, kind, "top_left")?;
                let (br_lat, br_lon) = required(f.bottom_right, kind, "bottom_right")?;
                let corners = Body::new()
                    .put("top_left", point(tl_lat, tl_lon, kind, "top_left")?)
                    .put("bottom_right", point(br_lat, br_lon, kind, "bottom_right")?);
                Body::new()
                    .put(field, corners.into_value())
                    .put_opt("type", f.execution.map(|e| e.as_str()))
            }
            FilterKind::GeoDistance(f) => {
                let field = self.keyed(&f.field, kind, scope, &["distance", "distance_type", "optimize_bbox"])?;
                let (lat, lon) = required(f.location, kind, "location")?;
                let (distance, unit) = required(f.distance, kind, "distance")?;
                let distance = format_distance(distance, unit)
                    .ok_or_else(|| QueryError::invalid_range(kind, "distance must be a finite number"))?;
                Body::new()
                    .put(field, point(lat, lon, kind, "location")?)
                    .put("distance", distance)
                    .put_opt("distance_type", f.distance_type.map(|d| d.as_str()))
                    .put_opt("optimize_bbox", f.optimize_bbox.map(|o| o.as_str()))
            }
            FilterKind::GeoDistanceRange(f) => {
                let field = self.keyed(&f.field, kind, scope, GEO_DISTANCE_RANGE_KEYS)?;
                let (lat, lon) = required(f.location, kind, "location")?;
                if f.from.is_none() && f.to.is_none() {
                    return Err(QueryError::invalid_range(kind, "at least one of from/to must be set"));
                }
                let bound = |value: Option<f64>| {
                    value
                        .map(|v| {
                            Number::from_f64(v)
                                .map(Value::Number)
                                .ok_or_else(|| QueryError::invalid_range(kind, "from/to must be finite numbers"))
                        })
                        .transpose()
                };
                Body::new()
                    .put(field, point(lat, lon, kind, "location")?)
                    .put_opt("from", bound(f.from)?)
                    .put_opt("to", bound(f.to)?)
                    .put("include_lower", f.include_lower)
                    .put("include_upper", f.include_upper)
                    .put_opt("unit", f.unit.map(|u| u.as_str()))
                    .put_opt("distance_type", f.distance_type.map(|d| d.as_str()))
                    .put_opt("optimize_bbox", f.optimize_bbox.map(|o| o.as_str()))
            }
            FilterKind::GeoPolygon(f) => {
                let field = self.keyed(&f.field, kind, scope, &[])?;
                if f.points.is_empty() {
                    return Err(QueryError::missing_field(kind, "points"));
                }
                let points = f
                    .points
                    .iter()
                    .map(|&(lat, lon)| point(lat, lon, kind, "points").map(Value::String))
                    .collect::<QueryResult<Vec<_>>>()?;
                Body::new().put(field, Body::new().put("points", points).into_value())
            }
            FilterKind::GeoShape(f) => {
                let field = self.keyed(&f.field, kind, scope, &[])?;
                let shape_type = required(f.shape_type.as_deref(), kind, "shape_type")?;
                let coordinates = f
                    .coordinates
                    .iter()
                    .map(|position| {
                        position
                            .iter()
                            .map(|&c| number(c, kind, "coordinates"))
                            .collect::<QueryResult<Vec<_>>>()
                            .map(Value::Array)
                    })
                    .collect::<QueryResult<Vec<_>>>()?;
                let shape = Body::new().put("type", shape_type).put("coordinates", coordinates);
                let inner = Body::new()
                    .put("shape", shape.into_value())
                    .put_opt("relation", f.relation.map(|r| r.as_str()));
                Body::new().put(field, inner.into_value())
            }
            FilterKind::HasChild(f) => {
                let query = required(f.query.as_deref(), kind, "query")?;
                let (type_name, child) = self.related(&f.child_type, scope)?;
                Body::new()
                    .put("type", type_name)
                    .put_opt("_scope", f.scope.as_deref())
                    .put("query", self.query(query, child)?)
            }
            FilterKind::HasParent(f) => {
                let query = required(f.query.as_deref(), kind, "query")?;
                let (type_name, parent) = self.related(&f.parent_type, scope)?;
                Body::new()
                    .put("parent_type", type_name)
                    .put_opt("_scope", f.scope.as_deref())
                    .put("query", self.query(query, parent)?)
            }
            FilterKind::Ids(f) => {
                if f.values.is_empty() {
                    return Err(QueryError::missing_field(kind, "values"));
                }
                let body = if f.types.is_empty() {
                    Body::new()
                } else {
                    Body::new().put("type", f.types.clone())
                };
                body.put("values", f.values.clone())
            }
            FilterKind::Limit(f) => Body::new().put("value", f.value),
            FilterKind::MatchAll(_) => Body::new(),
            FilterKind::Nested(f) => {
                let path = self.field(&f.path, kind, scope)?;
                let query = required(f.query.as_deref(), kind, "query")?;
                Body::new()
                    .put("path", path)
                    .put_opt("score_mode", f.score_mode.map(|s| s.as_str()))
                    .put_opt("_scope", f.scope.as_deref())
                    .put("query", self.query(query, scope)?)
            }
            FilterKind::Prefix(f) => {
                let field = self.keyed(&f.field, kind, scope, &[])?;
                let prefix = required(f.prefix.as_deref(), kind, "prefix")?;
                Body::new().put(field, prefix)
            }
            FilterKind::Regexp(f) => {
                let field = self.keyed(&f.field, kind, scope, &[])?;
                let value = required(f.value.as_deref(), kind, "value")?;
                let inner = Body::new().put("value", value).put_opt("flags", f.flags.as_deref());
                Body::new().put(field, inner.into_value())
            }
            FilterKind::Script(f) => {
                let script = required(f.script.as_deref(), kind, "script")?;
                let body = Body::new().put("script", script);
                let body = if f.params.is_empty() {
                    body
                } else {
                    let mut params = Map::with_capacity(f.params.len());
                    for (name, value) in &f.params {
                        params.insert(name.clone(), json_value(value, kind, name)?);
                    }
                    body.put("params", params)
                };
                body.put_opt("lang", f.lang.map(|l| l.as_str()))
            }
            FilterKind::Type(f) => Body::new().put("value", required(f.value.as_deref(), kind, "value")?),
            FilterKind::Query(f) => {
                let query = self.query(required(f.query.as_deref(), kind, "query")?, scope)?;
                if filter.meta.is_empty() {
                    return Ok(single(kind, query));
                }
                let body = append_meta(Body::new().put("query", query), &filter.meta);
                return Ok(single("fquery", body.into_value()));
            }
        };

        Ok(single(kind, append_meta(body, &filter.meta).into_value()))
    }

    fn filters(&self, filters: &[Filter], scope: Scope<'_>) -> QueryResult<Vec<Value>> {
        filters.iter().map(|f| self.filter(f, scope)).collect()
    }

    fn field(&self, field: &Option<FieldRef>, kind: &'static str, scope: Scope<'_>) -> QueryResult<String> {
        match field {
            None => Err(QueryError::missing_field(kind, "field")),
            Some(field) => self.resolve(field, kind, scope),
        }
    }

    /// Resolve a field that becomes a key of the variant object itself.
    fn keyed(
        &self,
        field: &Option<FieldRef>,
        kind: &'static str,
        scope: Scope<'_>,
        reserved: &[&str],
    ) -> QueryResult<String> {
        let path = self.field(field, kind, scope)?;
        if META_KEYS.contains(&path.as_str()) || reserved.contains(&path.as_str()) {
            return Err(QueryError::reserved_key(kind, path));
        }
        Ok(path)
    }

    fn resolve(&self, field: &FieldRef, kind: &'static str, scope: Scope<'_>) -> QueryResult<String> {
        match field {
            FieldRef::Path(path) => Ok(path.clone()),
            FieldRef::Expr(expr) => self
                .resolver
                .resolve(expr, &self.schema, scope.model)
                .map_err(|e| e.with_filter(kind)),
        }
    }

    /// Wire type name and scope for a `has_child` / `has_parent` target.
    ///
    /// The target is a model name, or a document type name as read back
    /// from a wire document.
    fn related(&self, model: &str, scope: Scope<'_>) -> QueryResult<(String, Scope<'_>)> {
        if !scope.typed {
            return Ok((model.to_lowercase(), Scope::untyped()));
        }
        let target = self
            .schema
            .get_model(model)
            .or_else(|| self.schema.get_model_by_type(model))
            .ok_or_else(|| QueryError::unknown_model(model))?;
        Ok((target.type_name(), Scope::typed(target)))
    }

    // ============================================================================
    // Queries
    // ============================================================================

    fn query(&self, query: &Query, scope: Scope<'_>) -> QueryResult<Value> {
        let kind = query.kind_name();
        let body = match query {
            Query::MatchAll { boost } => {
                Body::new().put_opt("boost", boost.map(|b| number(b, kind, "boost")).transpose()?)
            }
            Query::Term { field, value, boost } => {
                let field = self.resolve(field, kind, scope)?;
                let value = json_value(value, kind, "value")?;
                match boost {
                    None => Body::new().put(field, value),
                    Some(boost) => {
                        let inner = Body::new().put("value", value).put("boost", number(*boost, kind, "boost")?);
                        Body::new().put(field, inner.into_value())
                    }
                }
            }
            Query::Terms { field, values } => {
                let field = self.resolve(field, kind, scope)?;
                let values = values
                    .iter()
                    .map(|v| json_value(v, kind, "values"))
                    .collect::<QueryResult<Vec<_>>>()?;
                Body::new().put(field, values)
            }
            Query::Match { field, query, operator } => {
                let field = self.resolve(field, kind, scope)?;
                match operator {
                    None => Body::new().put(field, query.as_str()),
                    Some(op) => {
                        let inner = Body::new().put("query", query.as_str()).put("operator", op.as_str());
                        Body::new().put(field, inner.into_value())
                    }
                }
            }
            Query::Prefix { field, value } => {
                let field = self.resolve(field, kind, scope)?;
                Body::new().put(field, value.as_str())
            }
            Query::QueryString { query, default_field } => {
                let default_field = match default_field {
                    Some(f) => Some(self.resolve(f, kind, scope)?),
                    None => None,
                };
                Body::new().put("query", query.as_str()).put_opt("default_field", default_field)
            }
            Query::Bool { must, must_not, should } => Body::new()
                .put_list("must", self.queries(must, scope)?)
                .put_list("must_not", self.queries(must_not, scope)?)
                .put_list("should", self.queries(should, scope)?),
        };
        Ok(single(kind, body.into_value()))
    }

    fn queries(&self, queries: &[Query], scope: Scope<'_>) -> QueryResult<Vec<Value>> {
        queries.iter().map(|q| self.query(q, scope)).collect()
    }
}

// ============================================================================
// Document helpers
// ============================================================================

/// An ordered JSON object under construction.
struct Body(Map<String, Value>);

impl Body {
    fn new() -> Self {
        Self(Map::new())
    }

    fn put(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    fn put_opt<V: Into<Value>>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.put(key, value),
            None => self,
        }
    }

    /// Insert a non-empty sequence; empty sequences are omitted.
    fn put_list(self, key: &str, values: Vec<Value>) -> Self {
        if values.is_empty() {
            self
        } else {
            self.put(key, values)
        }
    }

    fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

fn single(key: &str, value: Value) -> Value {
    let mut map = Map::with_capacity(1);
    map.insert(key.to_string(), value);
    Value::Object(map)
}

/// Metadata keys shared by every variant object.
const META_KEYS: [&str; 3] = ["_name", "_cache", "_cache_key"];

/// Keys a `geo_distance_range` object uses besides its field.
const GEO_DISTANCE_RANGE_KEYS: &[&str] = &[
    "from",
    "to",
    "include_lower",
    "include_upper",
    "unit",
    "distance_type",
    "optimize_bbox",
];

fn append_meta(body: Body, meta: &CacheMeta) -> Body {
    body.put_opt("_name", meta.name.as_deref())
        .put_opt("_cache", meta.cache)
        .put_opt("_cache_key", meta.cache_key.as_deref())
}

fn required<T>(value: Option<T>, kind: &'static str, attribute: &str) -> QueryResult<T> {
    value.ok_or_else(|| QueryError::missing_field(kind, attribute))
}

fn number(value: f64, kind: &'static str, attribute: &str) -> QueryResult<Value> {
    Number::from_f64(value)
        .map(Value::Number)
        .ok_or_else(|| QueryError::invalid_value(kind, attribute, value))
}

fn point(lat: f64, lon: f64, kind: &'static str, attribute: &str) -> QueryResult<String> {
    format_point(lat, lon).ok_or_else(|| {
        let bad = if lat.is_finite() { lon } else { lat };
        QueryError::invalid_value(kind, attribute, bad)
    })
}

fn json_value(value: &FilterValue, kind: &'static str, attribute: &str) -> QueryResult<Value> {
    value
        .to_json()
        .ok_or_else(|| QueryError::invalid_value(kind, attribute, value.non_finite().unwrap_or(f64::NAN)))
}

fn check_bounds(
    bounds: &RangeBounds,
    kind: &'static str,
    accepts: fn(&FilterValue) -> bool,
    message: &str,
) -> QueryResult<()> {
    if bounds.is_unbounded() {
        return Err(QueryError::invalid_range(kind, "at least one of from/to must be set"));
    }
    let set = || [&bounds.from, &bounds.to].into_iter().flatten();
    if !set().all(accepts) {
        return Err(QueryError::invalid_range(kind, message));
    }
    if set().any(|b| b.non_finite().is_some()) {
        return Err(QueryError::invalid_range(kind, "bounds must be finite numbers"));
    }
    Ok(())
}

fn range_bounds(bounds: &RangeBounds, kind: &'static str) -> QueryResult<Value> {
    let bound = |value: &Option<FilterValue>, attribute: &str| {
        value.as_ref().map(|v| json_value(v, kind, attribute)).transpose()
    };
    Ok(Body::new()
        .put_opt("from", bound(&bounds.from, "from")?)
        .put_opt("to", bound(&bounds.to, "to")?)
        .put("include_lower", bounds.include_lower)
        .put("include_upper", bounds.include_upper)
        .into_value())
}
