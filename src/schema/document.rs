use crate::error::SchemaError;
use ahash::AHashMap;
use serde::Deserialize;

/// Raw serde mirror of the service description document. Only the subset
/// the builder consumes is modeled; unknown keys are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct SchemaDocument {
    #[serde(default)]
    pub info: DocumentInfo,
    #[serde(default)]
    pub host: String,
    #[serde(default, alias = "basePath")]
    pub base_path: String,
    #[serde(default)]
    pub paths: AHashMap<String, AHashMap<String, OperationObject>>,
}

/// Service-level title and description.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DocumentInfo {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// One operation (path + method) in the document.
#[derive(Debug, Clone, Deserialize)]
pub struct OperationObject {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub parameters: Vec<RawParameter>,
}

/// A parameter entry exactly as declared in the document.
#[derive(Debug, Clone, Deserialize)]
pub struct RawParameter {
    pub name: String,
    #[serde(rename = "in")]
    pub location: String,
    #[serde(default, rename = "type")]
    pub value_type: Option<String>,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default, rename = "enum")]
    pub allowed_values: Option<Vec<String>>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub default: Option<serde_json::Value>,
    #[serde(default)]
    pub description: Option<String>,
}

impl SchemaDocument {
    /// Deserializes a document from its JSON text.
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        serde_json::from_str(json).map_err(|e| SchemaError::Document(e.to_string()))
    }
}
