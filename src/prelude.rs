//! Prelude module for convenient imports
//!
//! Re-exports the most commonly used types from the kumiki crate.
//! Import this module to get access to the core functionality without
//! having to import each type individually.
//!
//! # Example
//!
//! ```rust,no_run
//! use kumiki::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let document = std::fs::read_to_string("service.json")
//!     .map_err(|e| FetchError(e.to_string()))?;
//! let mut form = Form::from_document(&document, FormOptions::new())?;
//! form.set_value("starttime", "2024-01-01T00:00:00")?;
//! form.settle();
//! println!("{}", form.url());
//! # Ok(())
//! # }
//! ```

// Form construction and control
pub use crate::form::{Form, FormOptions};

// Layout composition
pub use crate::layout::{LayoutItem, OptionChoice, RenderNode, TextPreview, Widget};

// Schema model
pub use crate::schema::{
    ParameterDescriptor, ParameterOverrides, SchemaModel, ServiceInfo, ValueKind,
};

// Dependency engine
pub use crate::engine::{
    Condition, DependencyEngine, FieldGraph, FieldKind, FieldNode, NodeId, Settlement,
};

// Query serialization
pub use crate::query::{QueryPair, QuerySerializer};

// Error types
pub use crate::error::{BuildError, FetchError, RenderError, SchemaError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, BuildError>;
