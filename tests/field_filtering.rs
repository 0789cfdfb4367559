//! End-to-end field filtering scenarios: declarative reductions, Meta-backed
//! definitions, nested selection, and request-driven query-parameter
//! filtering, all the way through to rendered output.

use field_selection::{
    FieldDescriptor, FieldSelectionError, Meta, QueryRequest, SerializerDef,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn minor_serializer() -> SerializerDef {
    SerializerDef::new("MinorTestSerializer")
        .with_field("field_1", FieldDescriptor::terminal())
        .with_field("field_2", FieldDescriptor::terminal())
}

fn major_serializer() -> SerializerDef {
    SerializerDef::new("MajorTestSerializer")
        .with_field("major_field", FieldDescriptor::terminal())
        .with_field("minor_fields", FieldDescriptor::nested_many(minor_serializer()))
}

fn model_serializer() -> SerializerDef {
    SerializerDef::new("ModelTestSerializer")
        .with_field("model_field_1", FieldDescriptor::terminal())
        .with_field("model_field_2", FieldDescriptor::terminal())
        .with_field("minor_fields", FieldDescriptor::nested_many(minor_serializer()))
        .with_meta(Meta::new(
            "TestModelClass",
            ["model_field_1", "model_field_2", "minor_fields"],
        ))
}

fn minor_rows() -> Vec<Value> {
    vec![
        json!({"field_1": "a1", "field_2": "a2"}),
        json!({"field_1": "b1", "field_2": "b2"}),
    ]
}

#[test]
fn minor_serializer_include_and_exclude() {
    let rows = minor_rows();

    let full = minor_serializer().bind().serialize_many(&rows);
    assert_eq!(full.as_array().unwrap().len(), 2);
    assert_eq!(full[0], json!({"field_1": "a1", "field_2": "a2"}));

    let included = minor_serializer().include_fields(["field_1"]).unwrap();
    let out = included.bind().serialize_many(&rows);
    assert_eq!(out, json!([{"field_1": "a1"}, {"field_1": "b1"}]));

    let excluded = minor_serializer().exclude_fields(["field_1"]).unwrap();
    let out = excluded.bind().serialize_many(&rows);
    assert_eq!(out, json!([{"field_2": "a2"}, {"field_2": "b2"}]));
}

#[test]
fn major_serializer_keeps_nested_output_intact() {
    let row = json!({"major_field": "m", "minor_fields": minor_rows()});

    let included = major_serializer().include_fields(["minor_fields"]).unwrap();
    let out = included.bind().serialize(&row);
    assert_eq!(out, json!({"minor_fields": minor_rows()}));

    let excluded = major_serializer().exclude_fields(["major_field"]).unwrap();
    let out = excluded.bind().serialize(&row);
    assert_eq!(out, json!({"minor_fields": minor_rows()}));
}

#[test]
fn nested_selector_narrows_the_inner_serializer() {
    let row = json!({"major_field": "m", "minor_fields": minor_rows()});

    let reduced = major_serializer()
        .include_fields(["major_field", "minor_fields{field_2}"])
        .unwrap();
    let out = reduced.bind().serialize(&row);
    assert_eq!(
        out,
        json!({
            "major_field": "m",
            "minor_fields": [{"field_2": "a2"}, {"field_2": "b2"}]
        })
    );
}

#[test]
fn model_serializer_with_meta() {
    let row = json!({
        "model_field_1": "v1",
        "model_field_2": "v2",
        "minor_fields": minor_rows()
    });

    let excluded = model_serializer().exclude_fields(["model_field_1"]).unwrap();
    let out = excluded.bind().serialize(&row);
    assert_eq!(
        out,
        json!({"model_field_2": "v2", "minor_fields": minor_rows()})
    );

    let included = model_serializer().include_fields(["model_field_1"]).unwrap();
    let out = included.bind().serialize(&row);
    assert_eq!(out, json!({"model_field_1": "v1"}));
}

#[test]
fn unknown_field_errors_name_the_base_serializer() {
    let err = minor_serializer().include_fields(["wrong_field"]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "wrong_field do not exist in meta or declared fields of MinorTestSerializer"
    );

    let err = model_serializer().exclude_fields(["wrong_field"]).unwrap_err();
    assert!(matches!(err, FieldSelectionError::UnknownFields { .. }));
}

#[test]
fn all_fields_sentinel_is_rejected() {
    let sentinel_backed = SerializerDef::new("ModelTestSerializer")
        .with_field("model_field_1", FieldDescriptor::terminal())
        .with_meta(Meta::all("TestModelClass"));

    let err = sentinel_backed.include_fields(["model_field_1"]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "meta fields sentinel '__all__' is not supported by field filtering"
    );
}

#[test]
fn query_params_filter_get_responses() {
    let def = SerializerDef::new("Sample")
        .with_field("f1", FieldDescriptor::terminal())
        .with_field("f2", FieldDescriptor::terminal())
        .with_field("f3", FieldDescriptor::terminal());
    let row = json!({"f1": 1, "f2": 2, "f3": 3});

    // include and exclude together: pop min({f3}, {f2}) = {f2}.
    let request = QueryRequest::get([("include_fields", "f1,f2"), ("exclude_fields", "f2")]);
    let out = def.bind_with_request(&request).serialize(&row);
    assert_eq!(out, json!({"f1": 1, "f3": 3}));

    // exclude only.
    let request = QueryRequest::get([("exclude_fields", "f3")]);
    let out = def.bind_with_request(&request).serialize(&row);
    assert_eq!(out, json!({"f1": 1, "f2": 2}));

    // non-GET requests are untouched.
    let request = QueryRequest::new("POST", [("exclude_fields", "f3")]);
    let out = def.bind_with_request(&request).serialize(&row);
    assert_eq!(out, json!({"f1": 1, "f2": 2, "f3": 3}));
}

#[test]
fn reductions_do_not_alias_the_base_definition() {
    let base = model_serializer();
    let reduced_a = base.include_fields(["model_field_1"]).unwrap();
    let reduced_b = base.exclude_fields(["model_field_2"]).unwrap();

    assert_eq!(base.fields().len(), 3);
    assert_eq!(reduced_a.fields().len(), 1);
    assert_eq!(reduced_b.fields().len(), 2);

    // Repeated reduction off the same base still sees the full field set.
    let reduced_c = base.include_fields(["model_field_2"]).unwrap();
    assert_eq!(reduced_c.fields().len(), 1);
}
