//! End-to-end scenarios exercising the full parse-render-settle flow on
//! the event service form.
mod common;
use common::*;
use kumiki::prelude::*;

/// Scenario A: the required start time carries its default from the
/// first settle; the optional, checkbox-gated event id joins the query
/// only once the box is checked and a value is typed.
#[test]
fn checkbox_gated_field_joins_the_query_when_opted_in() {
    let mut form = event_form();

    let names: Vec<&str> = form.query_pairs().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["starttime"]);
    let eventid = form.engine().lookup("eventid").unwrap();
    assert!(!form.engine().graph().is_active(eventid));

    form.set_checked("eventid-check", true).unwrap();
    form.set_value("eventid", "usb0001").unwrap();
    form.settle();

    assert_eq!(form.query_pairs(), &[
        QueryPair {
            name: "starttime".to_string(),
            value: "2024-01-01T00:00:00".to_string(),
        },
        QueryPair {
            name: "eventid".to_string(),
            value: "usb0001".to_string(),
        },
    ]);
    assert_eq!(
        form.url(),
        "http://service.example.org/fdsnws/event/1/query?starttime=2024-01-01T00:00:00&eventid=usb0001"
    );

    // Unchecking the box drops the field even though the input still
    // holds the old text.
    form.set_checked("eventid-check", false).unwrap();
    form.settle();
    assert!(
        !form
            .query_pairs()
            .iter()
            .any(|pair| pair.name == "eventid")
    );
    assert_eq!(form.engine().graph().node(eventid).value, "usb0001");
}

/// Scenario B: switching the location choice from Box to Radius drops
/// all four box fields from the query in one settle cycle and activates
/// the (still empty) radius fields.
#[test]
fn switching_option_groups_swaps_the_active_subset() {
    let mut form = event_form();

    form.select_option("_location_type", "Lat/Lon Box");
    form.settle();
    for name in ["minlat", "maxlat", "minlon", "maxlon"] {
        form.set_value(name, "10").unwrap();
    }
    form.settle();

    let names: Vec<&str> = form.query_pairs().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec![
        "starttime",
        "minlat",
        "maxlat",
        "minlon",
        "maxlon"
    ]);

    form.select_option("_location_type", "Lat/Lon Radius");
    let settlement = form.settle();

    let names: Vec<&str> = form.query_pairs().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["starttime"]);

    let engine = form.engine();
    for name in ["minlat", "maxlat", "minlon", "maxlon"] {
        let id = engine.lookup(name).unwrap();
        assert!(!engine.graph().is_active(id));
        // Deactivated, not cleared.
        assert_eq!(engine.graph().node(id).value, "10");
        assert!(settlement.changed.contains(&id));
    }
    for name in ["lat", "lon", "maxradius"] {
        let id = engine.lookup(name).unwrap();
        assert!(engine.graph().is_active(id));
        assert!(engine.graph().node(id).value.is_empty());
    }

    // Filling the radius fields brings them in, in declared order.
    form.set_value("lat", "35").unwrap();
    form.set_value("lon", "-120").unwrap();
    form.set_value("maxradius", "5").unwrap();
    form.settle();
    let names: Vec<&str> = form.query_pairs().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["starttime", "lat", "lon", "maxradius"]);
}

/// The original event form's cross-field rule: choosing an event id
/// disables the whole query-oriented side of the form.
#[test]
fn event_id_choice_disables_query_rows() {
    let mut form = event_form();

    for row in [
        "starttime-row",
        "endtime-row",
        "minmag-row",
        "maxmag-row",
    ] {
        form.depends_on_not(row, "eventid-check").unwrap();
    }
    for position in 0..3 {
        form.depends_on_not(&format!("_location_type-{position}"), "eventid-check")
            .unwrap();
    }
    form.settle();

    // Nothing gated yet: the box is unchecked.
    assert!(
        form.query_pairs()
            .iter()
            .any(|pair| pair.name == "starttime")
    );

    form.select_option("_location_type", "Lat/Lon Box");
    form.settle();
    form.set_value("minlat", "10").unwrap();
    form.settle();
    assert!(form.query_pairs().iter().any(|pair| pair.name == "minlat"));

    form.set_checked("eventid-check", true).unwrap();
    form.set_value("eventid", "usb0001").unwrap();
    form.settle();

    // Only the event id remains; the date row and the radio-gated
    // location fields all dropped out in the same cycle.
    let names: Vec<&str> = form.query_pairs().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["eventid"]);

    let engine = form.engine();
    let starttime = engine.lookup("starttime").unwrap();
    assert!(!engine.graph().is_active(starttime));
    let minlat = engine.lookup("minlat").unwrap();
    assert!(!engine.graph().is_active(minlat));
}

#[test]
fn usage_lists_every_parameter_with_its_help_text() {
    let form = event_form();
    let usage = form.usage_text();
    assert!(usage.contains("Start Time: Limit to events on or after this time"));
    assert_eq!(usage.lines().count(), form.descriptors().len());
}

/// Two forms on the same schema are fully independent.
#[test]
fn forms_are_independently_lifetimed() {
    let mut first = event_form();
    let mut second = event_form();

    first.set_checked("eventid-check", true).unwrap();
    first.set_value("eventid", "usb0001").unwrap();
    first.settle();
    second.set_value("minmag", "3.5").unwrap();
    second.settle();

    assert!(first.query_pairs().iter().any(|p| p.name == "eventid"));
    assert!(!second.query_pairs().iter().any(|p| p.name == "eventid"));
    // minmag has no layout gate in the first form either, but only the
    // second one was edited.
    assert!(!first.query_pairs().iter().any(|p| p.name == "minmag"));
}

/// Fetch failures surface as the same terminal error as parse failures.
#[test]
fn fetch_failures_short_circuit_the_pipeline() {
    let result = Form::run(
        || Err(FetchError("connection refused".to_string())),
        FormOptions::new(),
    );
    match result {
        Err(error @ BuildError::Fetch(_)) => {
            assert_eq!(
                Form::error_banner(&error),
                "Failure: Failed to fetch schema document: connection refused"
            );
        }
        Err(other) => panic!("Expected a fetch error, got {other:?}"),
        Ok(_) => panic!("Expected a fetch error, got a form"),
    }
}

#[test]
fn schema_failures_surface_through_the_same_path() {
    let result = Form::run(
        || Ok(event_document()),
        FormOptions::new().path("/missing"),
    );
    assert!(matches!(
        result,
        Err(BuildError::Schema(SchemaError::PathNotFound(_)))
    ));
}
