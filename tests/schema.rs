//! Schema parsing tests: document extraction, ordering, filtering and
//! override precedence.
mod common;
use common::*;
use kumiki::prelude::*;

use ahash::AHashMap;

fn parse_plain() -> (ServiceInfo, Vec<ParameterDescriptor>) {
    SchemaModel::parse(&event_document(), "/query", "get", &AHashMap::new())
        .expect("Failed to parse event document")
}

#[test]
fn parses_service_info() {
    let (service, _) = parse_plain();
    assert_eq!(service.title, "Event Web Service");
    assert_eq!(service.host, "service.example.org");
    assert_eq!(service.base_path, "/fdsnws/event/1");
    assert_eq!(service.summary, "Find events");
    assert_eq!(
        service.action(),
        "http://service.example.org/fdsnws/event/1/query"
    );
}

#[test]
fn keeps_declared_order_and_drops_non_query_parameters() {
    let (_, descriptors) = parse_plain();
    let names: Vec<&str> = descriptors.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names.first(), Some(&"starttime"));
    assert_eq!(names.last(), Some(&"format"));
    // `nodata` is declared with `in: body` and must not appear.
    assert!(!names.contains(&"nodata"));
    assert_eq!(names.len(), 14);
}

#[test]
fn interprets_declared_types() {
    let (_, descriptors) = parse_plain();
    let kind = |name: &str| {
        descriptors
            .iter()
            .find(|d| d.name == name)
            .map(|d| d.kind.clone())
            .unwrap()
    };
    assert_eq!(kind("starttime"), ValueKind::Date { with_time: true });
    assert_eq!(kind("minmag"), ValueKind::Number);
    assert_eq!(kind("includearrivals"), ValueKind::Flag);
    assert_eq!(kind("eventid"), ValueKind::Text);
    assert_eq!(
        kind("format"),
        ValueKind::Choice(vec!["xml".to_string(), "text".to_string()])
    );
}

#[test]
fn derives_labels_and_sizes() {
    let (_, descriptors) = parse_plain();
    let eventid = descriptors.iter().find(|d| d.name == "eventid").unwrap();
    assert_eq!(eventid.label, "Eventid");
    assert_eq!(eventid.input_size, 20);

    let starttime = descriptors.iter().find(|d| d.name == "starttime").unwrap();
    assert!(starttime.required);
    assert_eq!(starttime.input_size, 18);
    assert_eq!(
        starttime.default_value.as_deref(),
        Some("2024-01-01T00:00:00")
    );
}

#[test]
fn optional_choice_parameters_get_a_checkbox_by_default() {
    let (_, descriptors) = parse_plain();
    let format = descriptors.iter().find(|d| d.name == "format").unwrap();
    assert!(format.checkbox);
    // A required field never gets one unless forced.
    let starttime = descriptors.iter().find(|d| d.name == "starttime").unwrap();
    assert!(!starttime.checkbox);
    // Plain optional text fields have no checkbox by default.
    let eventid = descriptors.iter().find(|d| d.name == "eventid").unwrap();
    assert!(!eventid.checkbox);
}

#[test]
fn overrides_take_precedence_over_schema_values() {
    let mut overrides = AHashMap::new();
    overrides.insert(
        "starttime".to_string(),
        ParameterOverrides::new()
            .label("Start Time")
            .input_size(30)
            .description("When to start"),
    );
    overrides.insert(
        "eventid".to_string(),
        ParameterOverrides::new().checkbox(true),
    );
    overrides.insert(
        "format".to_string(),
        ParameterOverrides::new().enum_label("xml", "XML (QuakeML)"),
    );

    let (_, descriptors) = SchemaModel::parse(&event_document(), "/query", "get", &overrides)
        .expect("Failed to parse with overrides");

    let starttime = descriptors.iter().find(|d| d.name == "starttime").unwrap();
    assert_eq!(starttime.label, "Start Time");
    assert_eq!(starttime.input_size, 30);
    assert_eq!(starttime.description.as_deref(), Some("When to start"));

    let eventid = descriptors.iter().find(|d| d.name == "eventid").unwrap();
    assert!(eventid.checkbox);

    let format = descriptors.iter().find(|d| d.name == "format").unwrap();
    assert_eq!(format.enum_label("xml"), "XML (QuakeML)");
    assert_eq!(format.enum_label("text"), "text");
}

#[test]
fn missing_path_is_an_error() {
    let result = SchemaModel::parse(&event_document(), "/nope", "get", &AHashMap::new());
    assert!(matches!(result, Err(SchemaError::PathNotFound(path)) if path == "/nope"));
}

#[test]
fn missing_method_is_an_error() {
    let result = SchemaModel::parse(&event_document(), "/query", "post", &AHashMap::new());
    assert!(matches!(
        result,
        Err(SchemaError::MethodNotFound { method, .. }) if method == "post"
    ));
}

#[test]
fn malformed_json_is_an_error() {
    let result = SchemaModel::parse("{not json", "/query", "get", &AHashMap::new());
    assert!(matches!(result, Err(SchemaError::Document(_))));
}
