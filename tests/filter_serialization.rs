//! Integration tests for filter serialization.
//!
//! These tests check the exact documents produced for each filter variant,
//! including key order, field path resolution and caching metadata.

mod common;

use common::{Person, Project, serializer};
use pretty_assertions::assert_eq;
use quarry::query::filter::{Filter, MissingFilter};
use quarry::query::options::*;
use quarry::query::{ErrorCode, FilterBuilder, Query};
use quarry::field;
use serde_json::json;

fn to_json(filter: &Filter) -> String {
    serializer()
        .to_json_string::<Project>(filter)
        .expect("filter serializes")
}

// ============================================================================
// Field paths
// ============================================================================

#[test]
fn test_member_names_follow_camel_case() {
    let f = FilterBuilder::<Project>::new();
    assert_eq!(to_json(&f.term(field!(name), "x")), r#"{"term":{"name":"x"}}"#);
    assert_eq!(to_json(&f.term(field!(loc), 1)), r#"{"term":{"loc":1}}"#);
    assert_eq!(to_json(&f.exists(field!(my_geo_shape))), r#"{"exists":{"field":"myGeoShape"}}"#);
}

#[test]
fn test_declared_spelling_resolves_too() {
    let f = FilterBuilder::<Project>::new();
    assert_eq!(to_json(&f.term(field!(LOC), 1)), r#"{"term":{"loc":1}}"#);
    assert_eq!(to_json(&f.term(field!(Name), "x")), r#"{"term":{"name":"x"}}"#);
}

#[test]
fn test_indexed_list_member_path() {
    let f = FilterBuilder::<Project>::new();
    assert_eq!(
        to_json(&f.term(field!(followers[0].first_name), "martijn")),
        r#"{"term":{"followers.firstName":"martijn"}}"#
    );
    assert_eq!(
        to_json(&f.exists(field!(followers[*].last_name))),
        r#"{"exists":{"field":"followers.lastName"}}"#
    );
}

#[test]
fn test_mapped_field_uses_declared_wire_name() {
    let f = FilterBuilder::<Project>::new();
    assert_eq!(
        to_json(&f.missing(field!(followers[0].email))),
        r#"{"missing":{"field":"followers.emailAddress"}}"#
    );
}

#[test]
fn test_verbatim_paths_are_not_renamed() {
    let f = FilterBuilder::<Project>::new();
    assert_eq!(to_json(&f.prefix("Raw.Path", "abc")), r#"{"prefix":{"Raw.Path":"abc"}}"#);
}

#[test]
fn test_unsupported_expressions() {
    let f = FilterBuilder::<Project>::new();
    let s = serializer();

    let err = s.serialize::<Project>(&f.term(field!(name.len()), 1)).unwrap_err();
    assert_eq!(err.code, ErrorCode::UnsupportedExpression);
    assert_eq!(err.context.filter.as_deref(), Some("term"));

    let err = s.serialize::<Project>(&f.term(field!(followers.first_name), 1)).unwrap_err();
    assert_eq!(err.code, ErrorCode::UnsupportedExpression);

    let err = s.serialize::<Project>(&f.term(field!(name[0]), 1)).unwrap_err();
    assert_eq!(err.code, ErrorCode::UnsupportedExpression);

    let err = s.serialize::<Project>(&f.term(field!(name.first), 1)).unwrap_err();
    assert_eq!(err.code, ErrorCode::UnsupportedExpression);
}

#[test]
fn test_unknown_field_and_model() {
    struct Unknown;
    impl quarry::Document for Unknown {
        const MODEL: &'static str = "Unknown";
    }

    let f = FilterBuilder::<Project>::new();
    let err = serializer().serialize::<Project>(&f.term(field!(stars), 1)).unwrap_err();
    assert_eq!(err.code, ErrorCode::UnknownField);
    assert_eq!(err.context.field.as_deref(), Some("stars"));

    let err = serializer().serialize::<Unknown>(&f.match_all()).unwrap_err();
    assert_eq!(err.code, ErrorCode::UnknownModel);
}

// ============================================================================
// Metadata
// ============================================================================

#[test]
fn test_metadata_is_appended_last() {
    let f = FilterBuilder::<Project>::new();
    let filter = f
        .term(field!(name), "myterm")
        .cache_key("cacheKey")
        .cache(true)
        .name("cacheName");
    assert_eq!(
        to_json(&filter),
        r#"{"term":{"name":"myterm","_name":"cacheName","_cache":true,"_cache_key":"cacheKey"}}"#
    );
}

#[test]
fn test_query_filter_with_metadata_uses_fquery() {
    let f = FilterBuilder::<Project>::new();
    let plain = f.query(|q| q.term(field!(name), "elasticsearch.pm"));
    assert_eq!(to_json(&plain), r#"{"query":{"term":{"name":"elasticsearch.pm"}}}"#);

    let named = plain.clone().name("cacheName").cache(false);
    assert_eq!(
        to_json(&named),
        r#"{"fquery":{"query":{"term":{"name":"elasticsearch.pm"}},"_name":"cacheName","_cache":false}}"#
    );
}

// ============================================================================
// Term level
// ============================================================================

#[test]
fn test_term_level_variants() {
    let f = FilterBuilder::<Project>::new();

    assert_eq!(
        to_json(&f.terms_with_execution(field!(name), ["elasticsearch.pm"], TermsExecution::Bool)),
        r#"{"terms":{"name":["elasticsearch.pm"],"execution":"bool"}}"#
    );
    assert_eq!(to_json(&f.terms(field!(id), [1, 2])), r#"{"terms":{"id":[1,2]}}"#);
    assert_eq!(
        to_json(&f.ids(["my_type", "my_other_type"], ["1", "4", "100"])),
        r#"{"ids":{"type":["my_type","my_other_type"],"values":["1","4","100"]}}"#
    );
    assert_eq!(to_json(&f.ids(Vec::<String>::new(), ["1"])), r#"{"ids":{"values":["1"]}}"#);
    assert_eq!(to_json(&f.limit(100)), r#"{"limit":{"value":100}}"#);
    assert_eq!(to_json(&f.match_all()), r#"{"match_all":{}}"#);
    assert_eq!(to_json(&f.type_filter("my-type")), r#"{"type":{"value":"my-type"}}"#);
    assert_eq!(
        to_json(&f.regexp(|r| r.on_field(field!(name)).value("ab?c").flags("INTERSECTION|COMPLEMENT|EMPTY"))),
        r#"{"regexp":{"name":{"value":"ab?c","flags":"INTERSECTION|COMPLEMENT|EMPTY"}}}"#
    );
    assert_eq!(
        to_json(&Filter::from(MissingFilter::new(field!(country)).existence(true).null_value(true))),
        r#"{"missing":{"field":"country","existence":true,"null_value":true}}"#
    );
}

#[test]
fn test_script() {
    let f = FilterBuilder::<Project>::new();
    let filter = f.script(|s| {
        s.script("doc['num1'].value > param1")
            .param("param1", 12)
            .lang(ScriptLang::Mvel)
    });
    assert_eq!(
        to_json(&filter),
        r#"{"script":{"script":"doc['num1'].value > param1","params":{"param1":12},"lang":"mvel"}}"#
    );

    let bare = f.script(|s| s.script("true"));
    assert_eq!(to_json(&bare), r#"{"script":{"script":"true"}}"#);
}

// ============================================================================
// Ranges
// ============================================================================

#[test]
fn test_range_inclusivity() {
    let f = FilterBuilder::<Project>::new();

    let filter = f.range(|r| r.on_field(field!(loc)).from("10").to("20").from_exclusive());
    assert_eq!(
        to_json(&filter),
        r#"{"range":{"loc":{"from":"10","to":"20","include_lower":false,"include_upper":true}}}"#
    );

    let open = f.range(|r| r.on_field(field!(started_on)).greater_or_equals("2012-01-01"));
    assert_eq!(
        to_json(&open),
        r#"{"range":{"startedOn":{"from":"2012-01-01","include_lower":true,"include_upper":true}}}"#
    );
}

#[test]
fn test_numeric_range() {
    let f = FilterBuilder::<Project>::new();
    let filter = f.numeric_range(|r| r.on_field(field!(loc)).lower_than(100));
    assert_eq!(
        to_json(&filter),
        r#"{"numeric_range":{"loc":{"to":100,"include_lower":true,"include_upper":false}}}"#
    );

    let err = serializer()
        .serialize::<Project>(&f.numeric_range(|r| r.on_field(field!(loc)).from("10")))
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidRange);

    let err = serializer()
        .serialize::<Project>(&f.range(|r| r.on_field(field!(loc))))
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidRange);
}

// ============================================================================
// Geo
// ============================================================================

#[test]
fn test_geo_bounding_box() {
    let f = FilterBuilder::<Project>::new();
    let filter = f.geo_bounding_box(field!(origin), (0.1, 0.2), (0.3, 0.4), GeoExecution::Memory);
    assert_eq!(
        to_json(&filter),
        r#"{"geo_bounding_box":{"origin":{"top_left":"0.1, 0.2","bottom_right":"0.3, 0.4"},"type":"memory"}}"#
    );

    let untyped = f.geo_bounding_box(field!(origin), (1.0, 2.0), (3.0, 4.0), None);
    assert_eq!(
        to_json(&untyped),
        r#"{"geo_bounding_box":{"origin":{"top_left":"1.0, 2.0","bottom_right":"3.0, 4.0"}}}"#
    );
}

#[test]
fn test_geo_distance() {
    let f = FilterBuilder::<Project>::new();
    let filter = f.geo_distance(field!(origin), |d| {
        d.distance(1.0, GeoUnit::Kilometers)
            .location(2.0, 4.0)
            .optimize(GeoOptimizeBBox::Indexed)
    });
    assert_eq!(
        to_json(&filter),
        r#"{"geo_distance":{"origin":"2.0, 4.0","distance":"1.0km","optimize_bbox":"indexed"}}"#
    );
}

#[test]
fn test_geo_distance_range() {
    let f = FilterBuilder::<Project>::new();
    let filter = f.geo_distance_range(field!(origin), |d| {
        d.location(40.0, -70.0)
            .distance(10.0, 20.5, GeoUnit::Kilometers)
            .to_exclusive()
            .distance_type(DistanceType::Arc)
    });
    assert_eq!(
        to_json(&filter),
        concat!(
            r#"{"geo_distance_range":{"origin":"40.0, -70.0","from":10.0,"to":20.5,"#,
            r#""include_lower":true,"include_upper":false,"unit":"km","distance_type":"arc"}}"#
        )
    );
}

#[test]
fn test_geo_polygon_and_shape() {
    let f = FilterBuilder::<Project>::new();
    let polygon = f.geo_polygon(field!(origin), [(30.0, -80.0), (20.0, -90.0)]);
    assert_eq!(
        to_json(&polygon),
        r#"{"geo_polygon":{"origin":{"points":["30.0, -80.0","20.0, -90.0"]}}}"#
    );

    let shape = f.geo_shape(field!(my_geo_shape), |s| {
        s.shape_type("envelope")
            .coordinates([[13.0, 53.0], [14.0, 52.0]])
            .relation(GeoShapeRelation::Within)
    });
    assert_eq!(
        to_json(&shape),
        r#"{"geo_shape":{"myGeoShape":{"shape":{"type":"envelope","coordinates":[[13.0,53.0],[14.0,52.0]]},"relation":"within"}}}"#
    );
}

// ============================================================================
// Composites
// ============================================================================

#[test]
fn test_bool_preserves_clause_order() {
    let f = FilterBuilder::<Project>::new();
    let filter = f.bool(|b| {
        b.must([f.term(field!(name), "w"), f.term(field!(name), "x")])
            .must_not([f.term(field!(country), "y")])
            .should([f.term(field!(loc), 1)])
    });
    assert_eq!(
        to_json(&filter),
        concat!(
            r#"{"bool":{"must":[{"term":{"name":"w"}},{"term":{"name":"x"}}],"#,
            r#""must_not":[{"term":{"country":"y"}}],"should":[{"term":{"loc":1}}]}}"#
        )
    );

    let only_should = f.bool(|b| b.should([f.match_all()]));
    assert_eq!(to_json(&only_should), r#"{"bool":{"should":[{"match_all":{}}]}}"#);
}

#[test]
fn test_reused_filter_serializes_independently() {
    let f = FilterBuilder::<Project>::new();
    let shared = f.term(field!(name), "shared").name("n");
    let filter = f.and([&shared, &shared, &f.not(|_| shared.clone())]);

    let json = serializer().serialize::<Project>(&filter).unwrap();
    assert_eq!(json["and"]["filters"][0], json["and"]["filters"][1]);
    assert_eq!(json["and"]["filters"][2]["not"]["filter"], json["and"]["filters"][0]);

    assert_eq!(to_json(&filter), to_json(&filter));
}

#[test]
fn test_and_or_not() {
    let f = FilterBuilder::<Project>::new();
    let filter = f.or([f.and([f.exists(field!(name))]), f.not(|f| f.missing(field!(country)))]);
    assert_eq!(
        serializer().serialize::<Project>(&filter).unwrap(),
        json!({"or": {"filters": [
            {"and": {"filters": [{"exists": {"field": "name"}}]}},
            {"not": {"filter": {"missing": {"field": "country"}}}}
        ]}})
    );
}

// ============================================================================
// Scoped sub-queries
// ============================================================================

#[test]
fn test_nested() {
    let f = FilterBuilder::<Project>::new();
    let filter = f.nested(|n, q| {
        n.path(field!(followers[0]))
            .score(NestedScore::Max)
            .scope("my_scope")
            .query(q.term(field!(followers[0].first_name), "elasticsearch.pm"))
    });
    assert_eq!(
        to_json(&filter),
        concat!(
            r#"{"nested":{"path":"followers","score_mode":"max","_scope":"my_scope","#,
            r#""query":{"term":{"followers.firstName":"elasticsearch.pm"}}}}"#
        )
    );
}

#[test]
fn test_has_child_resolves_against_child_model() {
    let f = FilterBuilder::<Project>::new();
    let filter = f.has_child::<Person>(|c, q| c.scope("my_scope").query(q.term(field!(first_name), "value")));
    assert_eq!(
        to_json(&filter),
        r#"{"has_child":{"type":"person","_scope":"my_scope","query":{"term":{"firstName":"value"}}}}"#
    );

    let wrong_scope = f.has_child::<Person>(|c, q| c.query(q.term(field!(country), "value")));
    let err = serializer().serialize::<Project>(&wrong_scope).unwrap_err();
    assert_eq!(err.code, ErrorCode::UnknownField);
}

#[test]
fn test_has_parent_resolves_against_parent_model() {
    let f = FilterBuilder::<Person>::new();
    let filter = f.has_parent::<Project>(|p, q| p.query(q.term(field!(country), "value")));
    let json = serializer().to_json_string::<Person>(&filter).unwrap();
    assert_eq!(
        json,
        r#"{"has_parent":{"parent_type":"elasticsearchproject","query":{"term":{"country":"value"}}}}"#
    );
}

#[test]
fn test_untyped_serialization() {
    let f = FilterBuilder::<Project>::new();
    let filter = f.has_child::<Person>(|c, q| c.query(q.matches(field!(FirstName), "martijn")));
    let json = serializer().serialize_untyped(&filter).unwrap();
    assert_eq!(
        json,
        json!({"has_child": {"type": "person", "query": {"match": {"firstName": "martijn"}}}})
    );
}

#[test]
fn test_query_shapes() {
    let f = FilterBuilder::<Project>::new();
    let filter = f.query(|q| {
        q.bool()
            .must([q.term(field!(name), "a").boost(2.0), q.prefix(field!(country), "n")])
            .should([Query::query_string("quarry").default_field(field!(name))])
    });
    assert_eq!(
        serializer().serialize::<Project>(&filter).unwrap(),
        json!({"query": {"bool": {
            "must": [
                {"term": {"name": {"value": "a", "boost": 2.0}}},
                {"prefix": {"country": "n"}}
            ],
            "should": [{"query_string": {"query": "quarry", "default_field": "name"}}]
        }}})
    );
}
