use std::fs;

use oat_core::error::ParseError;
use oat_core::parse;
use oat_core::parse::operation::{Operation, PathItemOrRef};
use oat_core::parse::parameter::ParameterOrRef;

const PETSTORE: &str = include_str!("fixtures/petstore.yaml");

#[test]
fn parse_petstore_yaml() {
    let spec = parse::from_yaml(PETSTORE).expect("should parse petstore");
    assert_eq!(spec.openapi, "3.0.3");
    assert_eq!(spec.info.as_ref().map(|i| i.title.as_str()), Some("Petstore"));
    assert_eq!(spec.servers.len(), 2);
    assert_eq!(spec.paths.len(), 3);

    let pets: PathItemOrRef =
        serde_json::from_value(spec.paths["/pets"].clone()).expect("should parse /pets");
    let pets = match pets {
        PathItemOrRef::PathItem(item) => item,
        PathItemOrRef::Ref { .. } => panic!("expected inline path item"),
    };
    let get: Operation =
        serde_json::from_value(pets.get.clone().expect("should have GET")).unwrap();
    assert_eq!(get.operation_id.as_deref(), Some("listPets"));
    assert!(matches!(&get.parameters[0], ParameterOrRef::Ref { ref_path } if ref_path == "#/components/parameters/Limit"));

    let stats: PathItemOrRef = serde_json::from_value(spec.paths["/stats"].clone()).unwrap();
    assert!(matches!(stats, PathItemOrRef::Ref { .. }));
}

#[test]
fn malformed_operation_does_not_fail_the_document() {
    let yaml = r#"
openapi: 3.0.0
paths:
  /a:
    post:
      operationId: postA
      parameters:
        - name: id
"#;
    let spec = parse::from_yaml(yaml).expect("structure below paths is checked per operation");
    assert_eq!(spec.paths.len(), 1);
}

#[test]
fn malformed_parameter_reports_the_missing_field() {
    let err = serde_json::from_value::<ParameterOrRef>(serde_json::json!({ "name": "id" }))
        .unwrap_err();
    assert!(err.to_string().contains("missing field `in`"), "{err}");
}

#[test]
fn components_are_kept_raw() {
    let spec = parse::from_yaml(PETSTORE).unwrap();
    let kinds: Vec<&str> = spec.components.keys().map(String::as_str).collect();
    assert_eq!(
        kinds,
        ["parameters", "requestBodies", "schemas", "pathItems"]
    );
    assert!(spec.components["schemas"].get("NewPet").is_some());
}

#[test]
fn parse_json() {
    let json = r#"{
        "openapi": "3.0.1",
        "paths": {
            "/ping": { "get": { "operationId": "ping", "summary": "Ping" } }
        }
    }"#;
    let spec = parse::from_json(json).unwrap();
    assert!(spec.info.is_none());
    assert!(spec.servers.is_empty());
    assert_eq!(spec.paths.len(), 1);
}

#[test]
fn parse_invalid_version() {
    let yaml = r#"
openapi: "3.1.0"
info:
  title: Test
  version: "1.0"
paths: {}
"#;
    let result = parse::from_yaml(yaml);
    assert!(matches!(result, Err(ParseError::UnsupportedVersion(v)) if v == "3.1.0"));
}

#[test]
fn parse_missing_version() {
    let result = parse::from_json(r#"{ "paths": {} }"#);
    assert!(matches!(result, Err(ParseError::UnsupportedVersion(_))));
}

#[test]
fn parse_swagger_2() {
    let result = parse::from_json(r#"{ "swagger": "2.0", "paths": {} }"#);
    assert!(matches!(result, Err(ParseError::UnsupportedVersion(_))));
}

#[test]
fn parse_wrong_field_types() {
    let result = parse::from_json(r#"{ "openapi": "3.0.0", "servers": "https://x" }"#);
    assert!(matches!(result, Err(ParseError::SpecParsing(_))));
}

#[test]
fn from_path_dispatches_on_extension() {
    let dir = tempfile::tempdir().unwrap();

    let yml = dir.path().join("petstore.yml");
    fs::write(&yml, PETSTORE).unwrap();
    assert_eq!(parse::from_path(&yml).unwrap().paths.len(), 3);

    let json = dir.path().join("ping.json");
    fs::write(&json, r#"{ "openapi": "3.0.0" }"#).unwrap();
    assert!(parse::from_path(&json).unwrap().paths.is_empty());

    let txt = dir.path().join("spec.txt");
    fs::write(&txt, PETSTORE).unwrap();
    assert!(matches!(
        parse::from_path(&txt),
        Err(ParseError::UnsupportedExtension(_))
    ));
}

#[test]
fn from_path_reports_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.yaml");
    assert!(matches!(
        parse::from_path(&missing),
        Err(ParseError::Io { .. })
    ));
}
