//! Common test utilities for building schema documents and forms.
use kumiki::prelude::*;
use serde_json::json;

/// A trimmed event-service document: a required start time, a handful of
/// optional filters, the two coordinate entry styles and a format enum.
#[allow(dead_code)]
pub fn event_document() -> String {
    json!({
        "info": {
            "title": "Event Web Service",
            "description": "Query event catalogs"
        },
        "host": "service.example.org",
        "basePath": "/fdsnws/event/1",
        "paths": {
            "/query": {
                "get": {
                    "summary": "Find events",
                    "description": "Returns matching events",
                    "parameters": [
                        {
                            "name": "starttime",
                            "in": "query",
                            "type": "string",
                            "format": "date-time",
                            "required": true,
                            "default": "2024-01-01T00:00:00",
                            "description": "Limit to events on or after this time"
                        },
                        {
                            "name": "endtime",
                            "in": "query",
                            "type": "string",
                            "format": "date-time"
                        },
                        { "name": "minmag", "in": "query", "type": "number" },
                        { "name": "maxmag", "in": "query", "type": "number" },
                        { "name": "minlat", "in": "query", "type": "number" },
                        { "name": "maxlat", "in": "query", "type": "number" },
                        { "name": "minlon", "in": "query", "type": "number" },
                        { "name": "maxlon", "in": "query", "type": "number" },
                        { "name": "lat", "in": "query", "type": "number" },
                        { "name": "lon", "in": "query", "type": "number" },
                        { "name": "maxradius", "in": "query", "type": "number" },
                        { "name": "eventid", "in": "query", "type": "string" },
                        {
                            "name": "includearrivals",
                            "in": "query",
                            "type": "boolean"
                        },
                        {
                            "name": "format",
                            "in": "query",
                            "type": "string",
                            "enum": ["xml", "text"],
                            "default": "xml"
                        },
                        {
                            "name": "nodata",
                            "in": "body",
                            "type": "string"
                        }
                    ]
                }
            }
        }
    })
    .to_string()
}

/// The location fieldset: an exclusive choice between no constraint, a
/// lat/lon box, and a center/radius circle.
#[allow(dead_code)]
pub fn location_layout() -> LayoutItem {
    LayoutItem::fieldset("Location", vec![LayoutItem::option_group(
        "_location_type",
        vec![
            OptionChoice::new("All", vec![]),
            OptionChoice::new("Lat/Lon Box", vec![LayoutItem::coordinate_box(&[
                "maxlat", "minlat", "maxlon", "minlon",
            ])]),
            OptionChoice::new("Lat/Lon Radius", vec![LayoutItem::coordinate_radius(&[
                "lat",
                "lon",
                "maxradius",
            ])]),
        ],
    )])
}

/// The full two-column event layout used by the end-to-end scenarios.
#[allow(dead_code)]
pub fn event_layout() -> Vec<LayoutItem> {
    vec![LayoutItem::Columns(vec![
        vec![
            LayoutItem::field("starttime"),
            LayoutItem::field("endtime"),
            LayoutItem::field("minmag"),
            LayoutItem::field("maxmag"),
            LayoutItem::field("includearrivals"),
            LayoutItem::field("format"),
            LayoutItem::fieldset("Advanced search", vec![LayoutItem::field("eventid")]),
        ],
        vec![location_layout()],
    ])]
}

/// Options matching the original event form configuration.
#[allow(dead_code)]
pub fn event_options() -> FormOptions {
    FormOptions::new()
        .parameter("starttime", ParameterOverrides::new().label("Start Time"))
        .parameter("endtime", ParameterOverrides::new().label("End Time"))
        .parameter("minmag", ParameterOverrides::new().label("Min Magnitude"))
        .parameter("maxmag", ParameterOverrides::new().label("Max Magnitude"))
        .parameter(
            "eventid",
            ParameterOverrides::new().label("Event ID").checkbox(true),
        )
        .parameter(
            "format",
            ParameterOverrides::new()
                .enum_label("xml", "XML (QuakeML)")
                .enum_label("text", "Text (CSV)"),
        )
        .layout(event_layout())
}

/// Builds the fully wired event form.
#[allow(dead_code)]
pub fn event_form() -> Form {
    Form::from_document(&event_document(), event_options()).expect("Failed to build event form")
}
