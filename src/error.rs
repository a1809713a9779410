use thiserror::Error;

/// Errors that can occur while parsing the service schema document.
#[derive(Error, Debug, Clone)]
pub enum SchemaError {
    #[error("Failed to parse schema JSON: {0}")]
    Document(String),

    #[error("Invalid service path given: '{0}'")]
    PathNotFound(String),

    #[error("Method '{method}' is not defined for '{path}'")]
    MethodNotFound { path: String, method: String },

    #[error("Parameter '{name}' is malformed: {message}")]
    InvalidParameter { name: String, message: String },
}

/// Errors that can occur while rendering a layout and registering the
/// field graph. These indicate a programming error in the layout
/// configuration, not a runtime condition.
#[derive(Error, Debug, Clone)]
pub enum RenderError {
    #[error("Could not render unknown item '{0}'")]
    UnknownItem(String),

    #[error("Field id '{0}' is already registered in this form")]
    DuplicateField(String),
}

/// Failure reported by the host's schema fetch step. The fetch itself is
/// an external collaborator; this type lets its outcome flow through the
/// same pipeline as every other build failure.
#[derive(Error, Debug, Clone)]
#[error("Failed to fetch schema document: {0}")]
pub struct FetchError(pub String);

/// Terminal failure of the load-parse-render sequence. Every variant is
/// surfaced as a single user-visible error; the form is left unrendered.
#[derive(Error, Debug, Clone)]
pub enum BuildError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Render(#[from] RenderError),
}
