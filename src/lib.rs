//! # Kumiki - Schema-Driven Query Form Engine
//!
//! **Kumiki** generates interactive query-building forms from a service's
//! interface description (a Swagger-style JSON document) and keeps a live
//! graph of inter-field enabled/disabled dependencies consistent while
//! the user edits the form. The continuously recomputed result is a
//! canonical query URL containing exactly the fields that are currently
//! active.
//!
//! ## Core Workflow
//!
//! 1.  **Fetch the document**: retrieving the schema JSON is the host's
//!     job (HTTP, file or cache, kumiki does not care). Hand the text to
//!     the form builder.
//! 2.  **Parse**: `SchemaModel` extracts one operation's query
//!     parameters into an ordered descriptor list, merging any
//!     caller-supplied presentation overrides.
//! 3.  **Render**: the layout (explicit, or the flat declared order)
//!     builds a view tree and registers every field and structural
//!     dependency into the `DependencyEngine`.
//! 4.  **Interact**: edits are announced to the engine and resolved in
//!     breadth-first settle cycles; after each cycle the query pairs and
//!     URL are refreshed exactly once.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use kumiki::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let document = std::fs::read_to_string("service.json")
//!         .map_err(|e| FetchError(e.to_string()))?;
//!
//!     let options = FormOptions::new()
//!         .path("/query")
//!         .parameter("starttime", ParameterOverrides::new().label("Start Time"))
//!         .parameter(
//!             "eventid",
//!             ParameterOverrides::new().label("Event ID").checkbox(true),
//!         );
//!
//!     let mut form = Form::from_document(&document, options)?;
//!
//!     // The checkbox gates the field: until it is checked, the stored
//!     // value stays out of the query.
//!     form.set_checked("eventid-check", true)?;
//!     form.set_value("eventid", "usb0001")?;
//!     form.settle();
//!
//!     println!("{}", form.render_text());
//!     println!("{}", form.url());
//!     Ok(())
//! }
//! ```

pub mod engine;
pub mod error;
pub mod form;
pub mod layout;
pub mod prelude;
pub mod query;
pub mod schema;
