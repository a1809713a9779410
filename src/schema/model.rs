use super::document::{RawParameter, SchemaDocument};
use super::overrides::ParameterOverrides;
use crate::error::SchemaError;
use ahash::AHashMap;

/// Service-level description extracted from the document.
#[derive(Debug, Clone)]
pub struct ServiceInfo {
    pub title: String,
    pub description: String,
    pub host: String,
    pub base_path: String,
    pub path: String,
    pub summary: String,
    pub operation_description: String,
}

impl ServiceInfo {
    /// The URL the form submits to.
    pub fn action(&self) -> String {
        format!("http://{}{}{}", self.host, self.base_path, self.path)
    }
}

/// The widget-level interpretation of a parameter's declared type.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueKind {
    Text,
    Number,
    /// A boolean parameter, rendered as a single checkbox.
    Flag,
    /// A closed set of allowed values, rendered as a select control.
    Choice(Vec<String>),
    /// A date (or date-time) input with its own inner wrapper element.
    Date { with_time: bool },
}

/// A parsed, override-merged query parameter. Immutable once parsed;
/// owned by the form for the duration of one session.
#[derive(Debug, Clone)]
pub struct ParameterDescriptor {
    pub name: String,
    pub label: String,
    pub kind: ValueKind,
    pub required: bool,
    pub default_value: Option<String>,
    pub description: Option<String>,
    pub input_size: u16,
    /// Whether the field gets an enabling checkbox in front of it.
    pub checkbox: bool,
    pub enum_labels: AHashMap<String, String>,
}

impl ParameterDescriptor {
    /// Display label for one raw enum value, falling back to the value.
    pub fn enum_label<'a>(&'a self, value: &'a str) -> &'a str {
        self.enum_labels
            .get(value)
            .map(String::as_str)
            .unwrap_or(value)
    }
}

/// Parses the raw schema document into the canonical parameter model.
/// Pure data transformation, no rendering.
pub struct SchemaModel;

impl SchemaModel {
    /// Extracts the service info and the ordered query parameters of one
    /// operation. Parameters whose location is not `query` are dropped;
    /// document-declared ordering is preserved.
    pub fn parse(
        document_json: &str,
        path: &str,
        method: &str,
        overrides: &AHashMap<String, ParameterOverrides>,
    ) -> Result<(ServiceInfo, Vec<ParameterDescriptor>), SchemaError> {
        let document = SchemaDocument::from_json(document_json)?;

        let operations = document
            .paths
            .get(path)
            .ok_or_else(|| SchemaError::PathNotFound(path.to_string()))?;
        let operation =
            operations
                .get(method)
                .ok_or_else(|| SchemaError::MethodNotFound {
                    path: path.to_string(),
                    method: method.to_string(),
                })?;

        let service = ServiceInfo {
            title: document.info.title.clone(),
            description: document.info.description.clone(),
            host: document.host.clone(),
            base_path: document.base_path.clone(),
            path: path.to_string(),
            summary: operation.summary.clone(),
            operation_description: operation.description.clone(),
        };

        let mut descriptors = Vec::new();
        for raw in &operation.parameters {
            if raw.location != "query" {
                continue;
            }
            descriptors.push(Self::build_descriptor(raw, overrides.get(&raw.name))?);
        }

        Ok((service, descriptors))
    }

    /// Merges one raw parameter with its overrides. Precedence is
    /// override > schema-declared value > built-in default.
    fn build_descriptor(
        raw: &RawParameter,
        overrides: Option<&ParameterOverrides>,
    ) -> Result<ParameterDescriptor, SchemaError> {
        if raw.name.is_empty() {
            return Err(SchemaError::InvalidParameter {
                name: String::new(),
                message: "parameter has no name".to_string(),
            });
        }

        let kind = Self::value_kind(raw);

        let checkbox = match overrides.and_then(|o| o.checkbox) {
            Some(show) => show,
            // Optional choice parameters get an enabling checkbox so the
            // select's always-present value stays out of the query until
            // the user opts in.
            None => matches!(kind, ValueKind::Choice(_)) && !raw.required,
        };

        let label = overrides
            .and_then(|o| o.label.clone())
            .unwrap_or_else(|| Self::derive_label(&raw.name));

        let input_size = overrides.and_then(|o| o.input_size).unwrap_or(match kind {
            ValueKind::Date { .. } => 18,
            _ => 20,
        });

        let description = overrides
            .and_then(|o| o.description.clone())
            .or_else(|| raw.description.clone());

        Ok(ParameterDescriptor {
            name: raw.name.clone(),
            label,
            kind,
            required: raw.required,
            default_value: raw.default.as_ref().map(Self::default_text),
            description,
            input_size,
            checkbox,
            enum_labels: overrides
                .map(|o| o.enum_labels.clone())
                .unwrap_or_default(),
        })
    }

    fn value_kind(raw: &RawParameter) -> ValueKind {
        if let Some(values) = &raw.allowed_values {
            return ValueKind::Choice(values.clone());
        }
        match raw.value_type.as_deref() {
            Some("boolean") => ValueKind::Flag,
            Some("number") | Some("integer") => ValueKind::Number,
            Some("string") => match raw.format.as_deref() {
                Some("date") => ValueKind::Date { with_time: false },
                Some("date-time") => ValueKind::Date { with_time: true },
                _ => ValueKind::Text,
            },
            _ => ValueKind::Text,
        }
    }

    /// Default label: the parameter name with its first letter upcased.
    fn derive_label(name: &str) -> String {
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    fn default_text(value: &serde_json::Value) -> String {
        match value {
            serde_json::Value::String(text) => text.clone(),
            other => other.to_string(),
        }
    }
}
