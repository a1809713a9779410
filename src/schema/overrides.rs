use ahash::AHashMap;

/// Caller-supplied presentation overrides for a single parameter, keyed
/// by parameter name in the form options. Anything left unset falls back
/// to the schema-declared value, then to the built-in default.
#[derive(Debug, Clone, Default)]
pub struct ParameterOverrides {
    pub label: Option<String>,
    pub enum_labels: AHashMap<String, String>,
    pub checkbox: Option<bool>,
    pub input_size: Option<u16>,
    pub description: Option<String>,
}

impl ParameterOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Display text for the field's label.
    pub fn label(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }

    /// Display text for one raw enum value.
    pub fn enum_label(mut self, value: &str, label: &str) -> Self {
        self.enum_labels
            .insert(value.to_string(), label.to_string());
        self
    }

    /// Force the enabling checkbox on or off, overriding the default rule
    /// (optional choice parameters get one automatically).
    pub fn checkbox(mut self, show: bool) -> Self {
        self.checkbox = Some(show);
        self
    }

    /// Width hint for text inputs.
    pub fn input_size(mut self, size: u16) -> Self {
        self.input_size = Some(size);
        self
    }

    /// Replacement help text.
    pub fn description(mut self, text: &str) -> Self {
        self.description = Some(text.to_string());
        self
    }
}
