//! Integration tests serializing filters and parsing the documents back.
//!
//! Every variant is built with caching metadata, serialized, parsed and
//! re-serialized both with and without the schema; the parsed descriptor
//! must carry the same configuration.

mod common;

use common::{Person, Project, serializer};
use pretty_assertions::assert_eq;
use quarry::query::filter::{CacheMeta, Filter, FilterKind};
use quarry::query::options::*;
use quarry::query::{FieldRef, FilterBuilder, FilterParser, FilterValue, Query};
use quarry::field;

fn round_trip(filter: &Filter) -> Filter {
    let s = serializer();
    let json = s.serialize::<Project>(filter).expect("filter serializes");
    let parsed = FilterParser::parse(&json).expect("document parses");
    assert_eq!(s.serialize_untyped(&parsed).expect("parsed filter serializes"), json);
    assert_eq!(s.serialize::<Project>(&parsed).expect("parsed filter serializes against the schema"), json);
    assert_eq!(
        s.to_json_string::<Project>(filter).unwrap(),
        serde_json::to_string(&s.serialize_untyped(&parsed).unwrap()).unwrap()
    );
    parsed
}

fn cached(filter: Filter) -> Filter {
    filter.name("cacheName").cache_key("cacheKey").cache(true)
}

fn assert_cached(filter: &Filter) {
    assert_eq!(
        filter.meta,
        CacheMeta {
            name: Some("cacheName".into()),
            cache: Some(true),
            cache_key: Some("cacheKey".into()),
        }
    );
}

fn path(p: &str) -> Option<FieldRef> {
    Some(FieldRef::Path(p.to_string()))
}

#[test]
fn test_term() {
    let f = FilterBuilder::<Project>::new();
    let parsed = round_trip(&cached(f.term(field!(name), "elasticsearch.pm")));
    assert_cached(&parsed);
    let FilterKind::Term(term) = parsed.kind else { panic!("expected term") };
    assert_eq!(term.field, path("name"));
    assert_eq!(term.value, Some(FilterValue::String("elasticsearch.pm".into())));
}

#[test]
fn test_terms() {
    let f = FilterBuilder::<Project>::new();
    let parsed = round_trip(&cached(f.terms_with_execution(
        field!(name),
        ["elasticsearch.pm"],
        TermsExecution::Bool,
    )));
    assert_cached(&parsed);
    let FilterKind::Terms(terms) = parsed.kind else { panic!("expected terms") };
    assert_eq!(terms.execution, Some(TermsExecution::Bool));
    assert_eq!(terms.terms, vec![FilterValue::String("elasticsearch.pm".into())]);
}

#[test]
fn test_bool() {
    let f = FilterBuilder::<Project>::new();
    let filter = f.bool(|b| {
        b.must([f.term(field!(name), "w"), f.term(field!(name), "x")])
            .must_not([f.term(field!(name), "y")])
            .should([f.term(field!(name), "z")])
    });
    let parsed = round_trip(&cached(filter));
    assert_cached(&parsed);
    let FilterKind::Bool(b) = parsed.kind else { panic!("expected bool") };
    assert_eq!(b.must.len(), 2);
    assert_eq!(b.must_not.len(), 1);
    assert_eq!(b.should.len(), 1);
    let FilterKind::Term(first) = &b.must[0].kind else { panic!("expected term") };
    assert_eq!(first.value, Some(FilterValue::String("w".into())));
}

#[test]
fn test_and_or_not() {
    let f = FilterBuilder::<Project>::new();
    let a = f.term(field!(name), "a");
    let b = f.term(field!(name), "b");

    let parsed = round_trip(&cached(f.and([&a, &b])));
    assert_cached(&parsed);
    assert!(matches!(&parsed.kind, FilterKind::And(and) if and.filters.len() == 2));

    let parsed = round_trip(&cached(f.or([&b, &a])));
    assert_cached(&parsed);
    assert!(matches!(&parsed.kind, FilterKind::Or(or) if or.filters.len() == 2));

    let parsed = round_trip(&cached(f.not(|_| a.clone())));
    assert_cached(&parsed);
    assert!(matches!(parsed.kind, FilterKind::Not(_)));
}

#[test]
fn test_exists_and_missing() {
    let f = FilterBuilder::<Project>::new();
    let parsed = round_trip(&cached(f.exists(field!(name))));
    assert_cached(&parsed);
    let FilterKind::Exists(exists) = parsed.kind else { panic!("expected exists") };
    assert_eq!(exists.field, path("name"));

    let parsed = round_trip(&cached(f.missing(field!(name))));
    assert_cached(&parsed);
    assert!(matches!(parsed.kind, FilterKind::Missing(_)));
}

#[test]
fn test_range() {
    let f = FilterBuilder::<Project>::new();
    let parsed = round_trip(&cached(f.range(|r| r.on_field(field!(loc)).from("10").to("20").from_exclusive())));
    assert_cached(&parsed);
    let FilterKind::Range(range) = parsed.kind else { panic!("expected range") };
    assert_eq!(range.field, path("loc"));
    assert_eq!(range.bounds.from, Some(FilterValue::String("10".into())));
    assert_eq!(range.bounds.to, Some(FilterValue::String("20".into())));
    assert!(!range.bounds.include_lower);
    assert!(range.bounds.include_upper);
}

#[test]
fn test_numeric_range() {
    let f = FilterBuilder::<Project>::new();
    let parsed = round_trip(&cached(f.numeric_range(|r| r.on_field(field!(loc)).from(10).to(20))));
    assert_cached(&parsed);
    let FilterKind::NumericRange(range) = parsed.kind else { panic!("expected numeric_range") };
    assert_eq!(range.bounds.from, Some(FilterValue::Int(10)));
    assert!(range.bounds.include_lower && range.bounds.include_upper);
}

#[test]
fn test_geo_bounding_box() {
    let f = FilterBuilder::<Project>::new();
    let parsed = round_trip(&cached(f.geo_bounding_box(
        field!(origin),
        (0.1, 0.2),
        (0.3, 0.4),
        GeoExecution::Memory,
    )));
    assert_cached(&parsed);
    let FilterKind::GeoBoundingBox(bbox) = parsed.kind else { panic!("expected geo_bounding_box") };
    assert_eq!(bbox.top_left, Some((0.1, 0.2)));
    assert_eq!(bbox.bottom_right, Some((0.3, 0.4)));
    assert_eq!(bbox.execution, Some(GeoExecution::Memory));
}

#[test]
fn test_geo_distance() {
    let f = FilterBuilder::<Project>::new();
    let filter = f.geo_distance(field!(origin), |d| {
        d.distance(1.0, GeoUnit::Kilometers)
            .location(2.0, 4.0)
            .optimize(GeoOptimizeBBox::Indexed)
    });
    let parsed = round_trip(&cached(filter));
    assert_cached(&parsed);
    let FilterKind::GeoDistance(distance) = parsed.kind else { panic!("expected geo_distance") };
    assert_eq!(distance.distance, Some((1.0, GeoUnit::Kilometers)));
    assert_eq!(distance.location, Some((2.0, 4.0)));
    assert_eq!(distance.optimize_bbox, Some(GeoOptimizeBBox::Indexed));
}

#[test]
fn test_geo_distance_range() {
    let f = FilterBuilder::<Project>::new();
    let filter = f.geo_distance_range(field!(origin), |d| {
        d.location(40.0, -70.0)
            .distance(0.0, 400.0, GeoUnit::Kilometers)
            .optimize(GeoOptimizeBBox::Memory)
    });
    let parsed = round_trip(&cached(filter));
    assert_cached(&parsed);
    let FilterKind::GeoDistanceRange(range) = parsed.kind else { panic!("expected geo_distance_range") };
    assert_eq!(range.from, Some(0.0));
    assert_eq!(range.to, Some(400.0));
    assert_eq!(range.unit, Some(GeoUnit::Kilometers));
    assert_eq!(range.optimize_bbox, Some(GeoOptimizeBBox::Memory));
}

#[test]
fn test_geo_polygon() {
    let f = FilterBuilder::<Project>::new();
    let parsed = round_trip(&cached(f.geo_polygon(field!(origin), [(30.0, -80.0), (20.0, -90.0)])));
    assert_cached(&parsed);
    let FilterKind::GeoPolygon(polygon) = parsed.kind else { panic!("expected geo_polygon") };
    assert_eq!(polygon.points, vec![(30.0, -80.0), (20.0, -90.0)]);
}

#[test]
fn test_geo_shape() {
    let f = FilterBuilder::<Project>::new();
    let filter = f.geo_shape(field!(my_geo_shape), |s| {
        s.shape_type("envelope").coordinates([[13.0, 53.0], [14.0, 52.0]])
    });
    let parsed = round_trip(&cached(filter));
    assert_cached(&parsed);
    let FilterKind::GeoShape(shape) = parsed.kind else { panic!("expected geo_shape") };
    assert_eq!(shape.shape_type.as_deref(), Some("envelope"));
    assert_eq!(shape.coordinates, vec![vec![13.0, 53.0], vec![14.0, 52.0]]);
}

#[test]
fn test_has_child() {
    let f = FilterBuilder::<Project>::new();
    let filter = f.has_child::<Person>(|c, q| c.scope("my_scope").query(q.term(field!(first_name), "value")));
    let parsed = round_trip(&cached(filter));
    assert_cached(&parsed);
    let FilterKind::HasChild(child) = parsed.kind else { panic!("expected has_child") };
    assert_eq!(child.child_type, "person");
    assert_eq!(child.scope.as_deref(), Some("my_scope"));
    assert_eq!(child.query.as_deref(), Some(&Query::term("firstName", "value")));
}

#[test]
fn test_has_parent() {
    let f = FilterBuilder::<Project>::new();
    let filter = f.has_parent::<Project>(|p, q| p.scope("my_scope").query(q.term(field!(country), "value")));
    let parsed = round_trip(&cached(filter));
    assert_cached(&parsed);
    let FilterKind::HasParent(parent) = parsed.kind else { panic!("expected has_parent") };
    assert_eq!(parent.parent_type, "elasticsearchproject");
    assert_eq!(parent.query.as_deref(), Some(&Query::term("country", "value")));
}

#[test]
fn test_ids() {
    let f = FilterBuilder::<Project>::new();
    let parsed = round_trip(&cached(f.ids(["my_type", "my_other_type"], ["1", "4", "100"])));
    assert_cached(&parsed);
    let FilterKind::Ids(ids) = parsed.kind else { panic!("expected ids") };
    assert_eq!(ids.types, vec!["my_type", "my_other_type"]);
    assert_eq!(ids.values, vec!["1", "4", "100"]);
}

#[test]
fn test_limit_match_all_type() {
    let f = FilterBuilder::<Project>::new();

    let parsed = round_trip(&cached(f.limit(100)));
    assert_cached(&parsed);
    assert!(matches!(parsed.kind, FilterKind::Limit(l) if l.value == 100));

    let parsed = round_trip(&cached(f.match_all()));
    assert_cached(&parsed);
    assert!(matches!(parsed.kind, FilterKind::MatchAll(_)));

    let parsed = round_trip(&cached(f.type_filter("my-type")));
    assert_cached(&parsed);
    assert!(matches!(parsed.kind, FilterKind::Type(t) if t.value.as_deref() == Some("my-type")));
}

#[test]
fn test_nested() {
    let f = FilterBuilder::<Project>::new();
    let filter = f.nested(|n, q| {
        n.path(field!(followers[0]))
            .score(NestedScore::Max)
            .query(q.term(field!(followers[0].first_name), "elasticsearch.pm"))
    });
    let parsed = round_trip(&cached(filter));
    assert_cached(&parsed);
    let FilterKind::Nested(nested) = parsed.kind else { panic!("expected nested") };
    assert_eq!(nested.path, path("followers"));
    assert_eq!(nested.score_mode, Some(NestedScore::Max));
}

#[test]
fn test_prefix_and_regexp() {
    let f = FilterBuilder::<Project>::new();
    let parsed = round_trip(&cached(f.prefix(field!(name), "elast")));
    assert_cached(&parsed);
    assert!(matches!(parsed.kind, FilterKind::Prefix(p) if p.prefix.as_deref() == Some("elast")));

    let filter = f.regexp(|r| r.on_field(field!(name)).value("ab?c").flags("INTERSECTION|COMPLEMENT|EMPTY"));
    let parsed = round_trip(&cached(filter));
    assert_cached(&parsed);
    let FilterKind::Regexp(regexp) = parsed.kind else { panic!("expected regexp") };
    assert_eq!(regexp.value.as_deref(), Some("ab?c"));
    assert_eq!(regexp.flags.as_deref(), Some("INTERSECTION|COMPLEMENT|EMPTY"));
}

#[test]
fn test_query() {
    let f = FilterBuilder::<Project>::new();
    let parsed = round_trip(&cached(f.query(|q| q.term(field!(name), "elasticsearch.pm"))));
    assert_cached(&parsed);
    let FilterKind::Query(query) = parsed.kind else { panic!("expected query") };
    assert_eq!(query.query.as_deref(), Some(&Query::term("name", "elasticsearch.pm")));

    let bare = round_trip(&f.query(|q| q.match_all()));
    assert!(bare.meta.is_empty());
}

#[test]
fn test_script() {
    let f = FilterBuilder::<Project>::new();
    let filter = f.script(|s| {
        s.script("doc['num1'].value > param1")
            .param("param1", 12)
            .lang(ScriptLang::Mvel)
    });
    let parsed = round_trip(&cached(filter));
    assert_cached(&parsed);
    let FilterKind::Script(script) = parsed.kind else { panic!("expected script") };
    assert_eq!(script.params, vec![("param1".to_string(), FilterValue::Int(12))]);
    assert_eq!(script.lang, Some(ScriptLang::Mvel));
}

#[test]
fn test_metadata_order_does_not_matter() {
    let f = FilterBuilder::<Project>::new();
    let a = f.term(field!(name), "x").cache(false).name("n").cache_key("k");
    let b = f.term(field!(name), "x").cache_key("k").name("n").cache(false);
    assert_eq!(round_trip(&a), round_trip(&b));
}

#[test]
fn test_has_child_with_renamed_type() {
    let schema = quarry::schema::parse_schema(
        r#"
        model ElasticsearchProject {
            Name      String
            Followers Person[]
        }

        model Person @@map("people") {
            FirstName String
        }
        "#,
    )
    .unwrap();
    let s = quarry::Serializer::new(std::sync::Arc::new(schema));

    let f = FilterBuilder::<Project>::new();
    let filter = f.has_child::<Person>(|c, q| c.query(q.term(field!(first_name), "value")));
    let json = s.serialize::<Project>(&filter).unwrap();
    assert_eq!(json["has_child"]["type"], "people");

    let parsed = FilterParser::parse(&json).unwrap();
    assert_eq!(s.serialize::<Project>(&parsed).unwrap(), json);
}
