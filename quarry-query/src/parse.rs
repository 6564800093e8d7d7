//! Reading wire filter documents back into descriptors.
//!
//! The inverse of [`Serializer`](crate::Serializer): every variant, its
//! caching metadata and its sub-queries are restored. Fields come back as
//! verbatim [`FieldRef::Path`] values. A few equivalent spellings the engine
//! accepts are read too (`gt`/`lte` range bounds, bare `and` / `or` arrays,
//! `[lon, lat]` and `{"lat", "lon"}` points).
//!
//! ```rust
//! use quarry_query::FilterParser;
//! use quarry_query::filter::FilterKind;
//!
//! let filter = FilterParser::parse_str(
//!     r#"{"term": {"name": "myterm", "_name": "cacheName", "_cache": true}}"#,
//! ).unwrap();
//!
//! assert_eq!(filter.meta.name.as_deref(), Some("cacheName"));
//! assert!(matches!(filter.kind, FilterKind::Term(_)));
//! ```

use serde_json::{Map, Value};

use crate::error::{QueryError, QueryResult};
use crate::filter::*;
use crate::format::{parse_distance, parse_point};
use crate::options::GeoUnit;
use crate::path::FieldRef;
use crate::query::Query;
use crate::value::FilterValue;

/// Parses wire filter documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct FilterParser;

impl FilterParser {
    /// Parse JSON text.
    pub fn parse_str(text: &str) -> QueryResult<Filter> {
        let value: Value = serde_json::from_str(text).map_err(QueryError::deserialization)?;
        Self::parse(&value)
    }

    /// Parse a filter document.
    pub fn parse(value: &Value) -> QueryResult<Filter> {
        let (key, body) = single_entry(value, "filter")?;
        parse_filter(key, body)
    }

    /// Parse a query document.
    pub fn parse_query(value: &Value) -> QueryResult<Query> {
        let (key, body) = single_entry(value, "query")?;
        parse_query(key, body)
    }
}

fn invalid(kind: &str, message: impl AsRef<str>) -> QueryError {
    QueryError::invalid_filter(format!("invalid `{}` document: {}", kind, message.as_ref())).with_filter(kind)
}

fn single_entry<'v>(value: &'v Value, what: &str) -> QueryResult<(&'v str, &'v Value)> {
    let Value::Object(map) = value else {
        return Err(QueryError::invalid_filter(format!("a {} must be a JSON object", what)));
    };
    let mut entries = map.iter();
    match (entries.next(), entries.next()) {
        (Some((key, body)), None) => Ok((key.as_str(), body)),
        (None, _) => Err(QueryError::invalid_filter(format!("empty {} object", what))),
        (Some(_), Some((extra, _))) => Err(QueryError::invalid_filter(format!(
            "a {} object has exactly one key, found extra key `{}`",
            what, extra
        ))),
    }
}

// ============================================================================
// Object reader
// ============================================================================

/// The remaining keys of one variant object.
struct Fields {
    kind: &'static str,
    map: Map<String, Value>,
}

impl Fields {
    fn new(kind: &'static str, value: &Value) -> QueryResult<Self> {
        match value {
            Value::Object(map) => Ok(Self {
                kind,
                map: map.clone(),
            }),
            _ => Err(invalid(kind, "expected an object")),
        }
    }

    fn take(&mut self, key: &str) -> Option<Value> {
        self.map.remove(key)
    }

    fn required(&mut self, key: &str) -> QueryResult<Value> {
        self.take(key).ok_or_else(|| invalid(self.kind, format!("missing `{}`", key)))
    }

    fn string(&mut self, key: &str) -> QueryResult<Option<String>> {
        match self.take(key) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s)),
            Some(_) => Err(invalid(self.kind, format!("`{}` must be a string", key))),
        }
    }

    /// Read a string that may be spelled `key` or `alias`, but not both.
    fn either(&mut self, key: &str, alias: &str) -> QueryResult<Option<String>> {
        match (self.string(key)?, self.string(alias)?) {
            (Some(_), Some(_)) => Err(invalid(
                self.kind,
                format!("`{}` and `{}` are the same attribute; give only one", key, alias),
            )),
            (value, None) | (None, value) => Ok(value),
        }
    }

    fn boolean(&mut self, key: &str) -> QueryResult<Option<bool>> {
        match self.take(key) {
            None => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(b)),
            Some(_) => Err(invalid(self.kind, format!("`{}` must be a boolean", key))),
        }
    }

    fn number(&mut self, key: &str) -> QueryResult<Option<f64>> {
        match self.take(key) {
            None => Ok(None),
            Some(value) => value
                .as_f64()
                .map(Some)
                .ok_or_else(|| invalid(self.kind, format!("`{}` must be a number", key))),
        }
    }

    fn option<T: std::str::FromStr<Err = QueryError>>(&mut self, key: &str) -> QueryResult<Option<T>> {
        let kind = self.kind;
        self.string(key)?
            .map(|s| s.parse::<T>().map_err(|e| e.with_filter(kind)))
            .transpose()
    }

    fn meta(&mut self) -> QueryResult<CacheMeta> {
        Ok(CacheMeta {
            name: self.string("_name")?,
            cache: self.boolean("_cache")?,
            cache_key: self.string("_cache_key")?,
        })
    }

    /// Take the single remaining key, which names the field.
    fn field_entry(&mut self) -> QueryResult<(FieldRef, Value)> {
        let mut keys = self.map.keys();
        let key = match (keys.next(), keys.next()) {
            (Some(key), None) => key.clone(),
            (None, _) => return Err(invalid(self.kind, "missing field entry")),
            (Some(a), Some(b)) => return Err(invalid(self.kind, format!("unexpected keys `{}` and `{}`", a, b))),
        };
        let value = self.required(&key)?;
        Ok((FieldRef::Path(key), value))
    }

    fn finish(self) -> QueryResult<()> {
        match self.map.keys().next() {
            None => Ok(()),
            Some(key) => Err(invalid(self.kind, format!("unexpected key `{}`", key))),
        }
    }
}

fn point(kind: &str, value: &Value) -> QueryResult<(f64, f64)> {
    let parsed = match value {
        Value::String(s) => parse_point(s),
        Value::Array(items) => match items.as_slice() {
            [lon, lat] => lat.as_f64().zip(lon.as_f64()),
            _ => None,
        },
        Value::Object(map) => map
            .get("lat")
            .and_then(Value::as_f64)
            .zip(map.get("lon").and_then(Value::as_f64)),
        _ => None,
    };
    parsed.ok_or_else(|| invalid(kind, format!("`{}` is not a geo point", value)))
}

fn filters(kind: &'static str, value: Value) -> QueryResult<Vec<Filter>> {
    match value {
        Value::Array(items) => items.iter().map(FilterParser::parse).collect(),
        Value::Object(_) => Ok(vec![FilterParser::parse(&value)?]),
        _ => Err(invalid(kind, "expected a filter or a list of filters")),
    }
}

fn strings(kind: &'static str, key: &str, value: Value) -> QueryResult<Vec<String>> {
    let items = match value {
        Value::Array(items) => items,
        single => vec![single],
    };
    items
        .into_iter()
        .map(|item| match item {
            Value::String(s) => Ok(s),
            Value::Number(n) => Ok(n.to_string()),
            _ => Err(invalid(kind, format!("`{}` must hold strings", key))),
        })
        .collect()
}

fn boxed_query(kind: &'static str, value: Value) -> QueryResult<Box<Query>> {
    FilterParser::parse_query(&value)
        .map(Box::new)
        .map_err(|e| e.with_filter(kind))
}

// ============================================================================
// Filters
// ============================================================================

fn parse_filter(key: &str, body: &Value) -> QueryResult<Filter> {
    match key {
        "term" => {
            let mut fields = Fields::new("term", body)?;
            let meta = fields.meta()?;
            let (field, value) = fields.field_entry()?;
            Ok(with_meta(
                TermFilter {
                    field: Some(field),
                    value: Some(FilterValue::from_json(&value)),
                },
                meta,
            ))
        }
        "terms" => {
            let mut fields = Fields::new("terms", body)?;
            let meta = fields.meta()?;
            let execution = fields.option("execution")?;
            let (field, value) = fields.field_entry()?;
            let Value::Array(items) = value else {
                return Err(invalid("terms", "terms must be a list"));
            };
            Ok(with_meta(
                TermsFilter {
                    field: Some(field),
                    terms: items.iter().map(FilterValue::from_json).collect(),
                    execution,
                },
                meta,
            ))
        }
        "bool" => {
            let mut fields = Fields::new("bool", body)?;
            let meta = fields.meta()?;
            let mut filter = BoolFilter::default();
            if let Some(v) = fields.take("must") {
                filter.must = filters("bool", v)?;
            }
            if let Some(v) = fields.take("must_not") {
                filter.must_not = filters("bool", v)?;
            }
            if let Some(v) = fields.take("should") {
                filter.should = filters("bool", v)?;
            }
            fields.finish()?;
            Ok(with_meta(filter, meta))
        }
        "and" | "or" => {
            let kind = if key == "and" { "and" } else { "or" };
            let (children, meta) = match body {
                Value::Array(_) => (filters(kind, body.clone())?, CacheMeta::default()),
                _ => {
                    let mut fields = Fields::new(kind, body)?;
                    let meta = fields.meta()?;
                    let children = filters(kind, fields.required("filters")?)?;
                    fields.finish()?;
                    (children, meta)
                }
            };
            Ok(if kind == "and" {
                with_meta(AndFilter { filters: children }, meta)
            } else {
                with_meta(OrFilter { filters: children }, meta)
            })
        }
        "not" => {
            let mut fields = Fields::new("not", body)?;
            let meta = fields.meta()?;
            let child = FilterParser::parse(&fields.required("filter")?)?;
            fields.finish()?;
            Ok(with_meta(NotFilter::new(child), meta))
        }
        "exists" => {
            let mut fields = Fields::new("exists", body)?;
            let meta = fields.meta()?;
            let field = fields.string("field")?.map(FieldRef::Path);
            fields.finish()?;
            Ok(with_meta(ExistsFilter { field }, meta))
        }
        "missing" => {
            let mut fields = Fields::new("missing", body)?;
            let meta = fields.meta()?;
            let filter = MissingFilter {
                field: fields.string("field")?.map(FieldRef::Path),
                existence: fields.boolean("existence")?,
                null_value: fields.boolean("null_value")?,
            };
            fields.finish()?;
            Ok(with_meta(filter, meta))
        }
        "range" => {
            let (field, bounds, meta) = parse_range("range", body)?;
            Ok(with_meta(RangeFilter { field: Some(field), bounds }, meta))
        }
        "numeric_range" => {
            let (field, bounds, meta) = parse_range("numeric_range", body)?;
            Ok(with_meta(NumericRangeFilter { field: Some(field), bounds }, meta))
        }
        "geo_bounding_box" => {
            let kind = "geo_bounding_box";
            let mut fields = Fields::new(kind, body)?;
            let meta = fields.meta()?;
            let execution = fields.option("type")?;
            let (field, corners) = fields.field_entry()?;
            let mut corners = Fields::new(kind, &corners)?;
            let top_left = point(kind, &corners.required("top_left")?)?;
            let bottom_right = point(kind, &corners.required("bottom_right")?)?;
            corners.finish()?;
            Ok(with_meta(
                GeoBoundingBoxFilter {
                    field: Some(field),
                    top_left: Some(top_left),
                    bottom_right: Some(bottom_right),
                    execution,
                },
                meta,
            ))
        }
        "geo_distance" => {
            let kind = "geo_distance";
            let mut fields = Fields::new(kind, body)?;
            let meta = fields.meta()?;
            let distance = match fields.required("distance")? {
                Value::String(s) => {
                    parse_distance(&s).ok_or_else(|| invalid(kind, format!("`{}` is not a distance", s)))?
                }
                Value::Number(n) => (n.as_f64().unwrap_or_default(), GeoUnit::Kilometers),
                _ => return Err(invalid(kind, "`distance` must be a string or number")),
            };
            let distance_type = fields.option("distance_type")?;
            let optimize_bbox = fields.option("optimize_bbox")?;
            let (field, location) = fields.field_entry()?;
            Ok(with_meta(
                GeoDistanceFilter {
                    field: Some(field),
                    location: Some(point(kind, &location)?),
                    distance: Some(distance),
                    distance_type,
                    optimize_bbox,
                },
                meta,
            ))
        }
        "geo_distance_range" => {
            let kind = "geo_distance_range";
            let mut fields = Fields::new(kind, body)?;
            let meta = fields.meta()?;
            let mut filter = GeoDistanceRangeFilter::default();
            let mut unit_from_bounds = None;
            for (key, slot) in [("from", &mut filter.from), ("to", &mut filter.to)] {
                *slot = match fields.take(key) {
                    None => None,
                    Some(Value::Number(n)) => n.as_f64(),
                    Some(Value::String(s)) => {
                        let (value, unit) =
                            parse_distance(&s).ok_or_else(|| invalid(kind, format!("`{}` is not a distance", s)))?;
                        if unit_from_bounds.is_some_and(|u| u != unit) {
                            return Err(invalid(kind, "`from` and `to` use different units"));
                        }
                        unit_from_bounds = Some(unit);
                        Some(value)
                    }
                    Some(_) => return Err(invalid(kind, format!("`{}` must be a number or distance", key))),
                };
            }
            filter.include_lower = fields.boolean("include_lower")?.unwrap_or(true);
            filter.include_upper = fields.boolean("include_upper")?.unwrap_or(true);
            filter.unit = match (fields.option::<GeoUnit>("unit")?, unit_from_bounds) {
                (Some(unit), Some(bound)) if unit != bound => {
                    return Err(invalid(kind, format!("`unit` {} contradicts the bounds' unit {}", unit, bound)));
                }
                (unit, bound) => unit.or(bound),
            };
            filter.distance_type = fields.option("distance_type")?;
            filter.optimize_bbox = fields.option("optimize_bbox")?;
            let (field, location) = fields.field_entry()?;
            filter.field = Some(field);
            filter.location = Some(point(kind, &location)?);
            Ok(with_meta(filter, meta))
        }
        "geo_polygon" => {
            let kind = "geo_polygon";
            let mut fields = Fields::new(kind, body)?;
            let meta = fields.meta()?;
            let (field, inner) = fields.field_entry()?;
            let mut inner = Fields::new(kind, &inner)?;
            let Value::Array(items) = inner.required("points")? else {
                return Err(invalid(kind, "`points` must be a list"));
            };
            inner.finish()?;
            let points = items.iter().map(|p| point(kind, p)).collect::<QueryResult<Vec<_>>>()?;
            Ok(with_meta(
                GeoPolygonFilter {
                    field: Some(field),
                    points,
                },
                meta,
            ))
        }
        "geo_shape" => {
            let kind = "geo_shape";
            let mut fields = Fields::new(kind, body)?;
            let meta = fields.meta()?;
            let (field, inner) = fields.field_entry()?;
            let mut inner = Fields::new(kind, &inner)?;
            let mut shape = Fields::new(kind, &inner.required("shape")?)?;
            let relation = inner.option("relation")?;
            inner.finish()?;
            let shape_type = shape.string("type")?;
            let coordinates = match shape.take("coordinates") {
                None => Vec::new(),
                Some(value) => parse_coordinates(kind, &value)?,
            };
            shape.finish()?;
            Ok(with_meta(
                GeoShapeFilter {
                    field: Some(field),
                    shape_type,
                    coordinates,
                    relation,
                },
                meta,
            ))
        }
        "has_child" => {
            let kind = "has_child";
            let mut fields = Fields::new(kind, body)?;
            let meta = fields.meta()?;
            let child_type = fields
                .either("type", "child_type")?
                .ok_or_else(|| invalid(kind, "missing `type`"))?;
            let filter = HasChildFilter {
                child_type,
                scope: fields.string("_scope")?,
                query: Some(boxed_query(kind, fields.required("query")?)?),
            };
            fields.finish()?;
            Ok(with_meta(filter, meta))
        }
        "has_parent" => {
            let kind = "has_parent";
            let mut fields = Fields::new(kind, body)?;
            let meta = fields.meta()?;
            let parent_type = fields
                .either("parent_type", "type")?
                .ok_or_else(|| invalid(kind, "missing `parent_type`"))?;
            let filter = HasParentFilter {
                parent_type,
                scope: fields.string("_scope")?,
                query: Some(boxed_query(kind, fields.required("query")?)?),
            };
            fields.finish()?;
            Ok(with_meta(filter, meta))
        }
        "ids" => {
            let mut fields = Fields::new("ids", body)?;
            let meta = fields.meta()?;
            let types = match fields.take("type") {
                None => Vec::new(),
                Some(v) => strings("ids", "type", v)?,
            };
            let values = strings("ids", "values", fields.required("values")?)?;
            fields.finish()?;
            Ok(with_meta(IdsFilter { types, values }, meta))
        }
        "limit" => {
            let mut fields = Fields::new("limit", body)?;
            let meta = fields.meta()?;
            let value = fields
                .required("value")?
                .as_u64()
                .ok_or_else(|| invalid("limit", "`value` must be a non-negative integer"))?;
            fields.finish()?;
            Ok(with_meta(LimitFilter { value }, meta))
        }
        "match_all" => {
            let mut fields = Fields::new("match_all", body)?;
            let meta = fields.meta()?;
            fields.finish()?;
            Ok(with_meta(MatchAllFilter, meta))
        }
        "nested" => {
            let kind = "nested";
            let mut fields = Fields::new(kind, body)?;
            let meta = fields.meta()?;
            let filter = NestedFilter {
                path: fields.string("path")?.map(FieldRef::Path),
                score_mode: fields.option("score_mode")?,
                scope: fields.string("_scope")?,
                query: Some(boxed_query(kind, fields.required("query")?)?),
            };
            fields.finish()?;
            Ok(with_meta(filter, meta))
        }
        "prefix" => {
            let mut fields = Fields::new("prefix", body)?;
            let meta = fields.meta()?;
            let (field, value) = fields.field_entry()?;
            let Value::String(prefix) = value else {
                return Err(invalid("prefix", "prefix must be a string"));
            };
            Ok(with_meta(PrefixFilter::new(field, prefix), meta))
        }
        "query" => Ok(Filter::from(QueryFilter::new(FilterParser::parse_query(body)?))),
        "fquery" => {
            let mut fields = Fields::new("query", body)?;
            let meta = fields.meta()?;
            let query = boxed_query("query", fields.required("query")?)?;
            fields.finish()?;
            Ok(with_meta(QueryFilter { query: Some(query) }, meta))
        }
        "regexp" => {
            let kind = "regexp";
            let mut fields = Fields::new(kind, body)?;
            let meta = fields.meta()?;
            let (field, inner) = fields.field_entry()?;
            let filter = match inner {
                Value::String(value) => RegexpFilter::default().on_field(field).value(value),
                other => {
                    let mut inner = Fields::new(kind, &other)?;
                    let filter = RegexpFilter {
                        field: Some(field),
                        value: inner.string("value")?,
                        flags: inner.string("flags")?,
                    };
                    inner.finish()?;
                    filter
                }
            };
            Ok(with_meta(filter, meta))
        }
        "script" => {
            let kind = "script";
            let mut fields = Fields::new(kind, body)?;
            let meta = fields.meta()?;
            let script = fields.string("script")?;
            let params = match fields.take("params") {
                None => Vec::new(),
                Some(Value::Object(map)) => map
                    .iter()
                    .map(|(k, v)| (k.clone(), FilterValue::from_json(v)))
                    .collect(),
                Some(_) => return Err(invalid(kind, "`params` must be an object")),
            };
            let lang = fields.option("lang")?;
            fields.finish()?;
            Ok(with_meta(ScriptFilter { script, params, lang }, meta))
        }
        "type" => {
            let mut fields = Fields::new("type", body)?;
            let meta = fields.meta()?;
            let value = fields.string("value")?;
            fields.finish()?;
            Ok(with_meta(TypeFilter { value }, meta))
        }
        other => Err(QueryError::invalid_filter(format!("unknown filter `{}`", other))),
    }
}

fn with_meta(kind: impl Into<Filter>, meta: CacheMeta) -> Filter {
    let mut filter = kind.into();
    filter.meta = meta;
    filter
}

fn parse_range(kind: &'static str, body: &Value) -> QueryResult<(FieldRef, RangeBounds, CacheMeta)> {
    let mut fields = Fields::new(kind, body)?;
    let meta = fields.meta()?;
    let (field, inner) = fields.field_entry()?;
    let mut inner = Fields::new(kind, &inner)?;

    let mut bounds = RangeBounds::default();
    if let Some(v) = inner.take("from") {
        bounds.from = Some(FilterValue::from_json(&v));
    }
    if let Some(v) = inner.take("to") {
        bounds.to = Some(FilterValue::from_json(&v));
    }
    if let Some(b) = inner.boolean("include_lower")? {
        bounds.include_lower = b;
    }
    if let Some(b) = inner.boolean("include_upper")? {
        bounds.include_upper = b;
    }
    for (key, inclusive) in [("gt", false), ("gte", true)] {
        if let Some(v) = inner.take(key) {
            bounds.from = Some(FilterValue::from_json(&v));
            bounds.include_lower = inclusive;
        }
    }
    for (key, inclusive) in [("lt", false), ("lte", true)] {
        if let Some(v) = inner.take(key) {
            bounds.to = Some(FilterValue::from_json(&v));
            bounds.include_upper = inclusive;
        }
    }
    inner.finish()?;
    Ok((field, bounds, meta))
}

fn parse_coordinates(kind: &str, value: &Value) -> QueryResult<Vec<Vec<f64>>> {
    let Value::Array(positions) = value else {
        return Err(invalid(kind, "`coordinates` must be a list"));
    };
    positions
        .iter()
        .map(|position| match position {
            Value::Array(numbers) => numbers
                .iter()
                .map(|n| n.as_f64().ok_or_else(|| invalid(kind, "coordinates must be numbers")))
                .collect(),
            _ => Err(invalid(kind, "each coordinate must be a list of numbers")),
        })
        .collect()
}

// ============================================================================
// Queries
// ============================================================================

fn parse_query(key: &str, body: &Value) -> QueryResult<Query> {
    match key {
        "match_all" => {
            let mut fields = Fields::new("match_all", body)?;
            let boost = fields.number("boost")?;
            fields.finish()?;
            Ok(Query::MatchAll { boost })
        }
        "term" => {
            let mut fields = Fields::new("term", body)?;
            let (field, value) = fields.field_entry()?;
            match value {
                Value::Object(_) => {
                    let mut inner = Fields::new("term", &value)?;
                    let term = FilterValue::from_json(&inner.required("value")?);
                    let boost = inner.number("boost")?;
                    inner.finish()?;
                    Ok(Query::Term {
                        field,
                        value: term,
                        boost,
                    })
                }
                scalar => Ok(Query::term(field, FilterValue::from_json(&scalar))),
            }
        }
        "terms" => {
            let mut fields = Fields::new("terms", body)?;
            let (field, value) = fields.field_entry()?;
            let Value::Array(items) = value else {
                return Err(invalid("terms", "terms must be a list"));
            };
            Ok(Query::terms(field, items.iter().map(FilterValue::from_json)))
        }
        "match" => {
            let mut fields = Fields::new("match", body)?;
            let (field, value) = fields.field_entry()?;
            match value {
                Value::String(text) => Ok(Query::matches(field, text)),
                other => {
                    let mut inner = Fields::new("match", &other)?;
                    let text = inner
                        .string("query")?
                        .ok_or_else(|| invalid("match", "missing `query`"))?;
                    let operator = inner.option("operator")?;
                    inner.finish()?;
                    Ok(Query::Match {
                        field,
                        query: text,
                        operator,
                    })
                }
            }
        }
        "prefix" => {
            let mut fields = Fields::new("prefix", body)?;
            let (field, value) = fields.field_entry()?;
            match value {
                Value::String(prefix) => Ok(Query::prefix(field, prefix)),
                other => {
                    let mut inner = Fields::new("prefix", &other)?;
                    let prefix = inner
                        .either("value", "prefix")?
                        .ok_or_else(|| invalid("prefix", "missing `value`"))?;
                    inner.finish()?;
                    Ok(Query::prefix(field, prefix))
                }
            }
        }
        "query_string" => {
            let mut fields = Fields::new("query_string", body)?;
            let text = fields
                .string("query")?
                .ok_or_else(|| invalid("query_string", "missing `query`"))?;
            let default_field = fields.string("default_field")?.map(FieldRef::Path);
            fields.finish()?;
            Ok(Query::QueryString {
                query: text,
                default_field,
            })
        }
        "bool" => {
            let mut fields = Fields::new("bool", body)?;
            let mut clauses = |key: &str| -> QueryResult<Vec<Query>> {
                match fields.take(key) {
                    None => Ok(Vec::new()),
                    Some(Value::Array(items)) => items.iter().map(FilterParser::parse_query).collect(),
                    Some(single) => Ok(vec![FilterParser::parse_query(&single)?]),
                }
            };
            let must = clauses("must")?;
            let must_not = clauses("must_not")?;
            let should = clauses("should")?;
            fields.finish()?;
            Ok(Query::Bool { must, must_not, should })
        }
        other => Err(QueryError::invalid_filter(format!("unknown query `{}`", other))),
    }
}
