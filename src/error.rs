//! Error types for manifest sanitization

/// Unified error type for the manifest sanitizer.
///
/// Every failure aborts the whole run; there is no recovery or partial
/// application. Because the manifest is only written after all steps
/// succeed in memory, any of these errors leaves the on-disk file
/// untouched.
#[derive(Debug, thiserror::Error)]
pub enum SanitizeError {
    #[error("Manifest not found: {path}{}", .hint.as_ref().map(|h| format!("\n Hint: {}", h)).unwrap_or_default())]
    NotFound { path: String, hint: Option<String> },

    #[error("Failed to parse {path} as JSON: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Missing field '{field}' at {location}{}", .hint.as_ref().map(|h| format!("\n Hint: {}", h)).unwrap_or_default())]
    MissingField {
        field: String,
        location: String,
        hint: Option<String>,
    },

    #[error("Malformed field '{field}': expected {expected}, found {actual}")]
    Malformed {
        field: String,
        expected: String,
        actual: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SanitizeError {
    /// Attach an actionable hint to the error
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        let hint_val = Some(hint.into());
        match self {
            SanitizeError::NotFound { ref mut hint, .. } => *hint = hint_val,
            SanitizeError::MissingField { ref mut hint, .. } => *hint = hint_val,
            _ => (),
        }
        self
    }

    pub(crate) fn missing(field: impl Into<String>, location: impl Into<String>) -> Self {
        SanitizeError::MissingField {
            field: field.into(),
            location: location.into(),
            hint: None,
        }
    }

    pub(crate) fn malformed(
        field: impl Into<String>,
        expected: impl Into<String>,
        actual: &serde_json::Value,
    ) -> Self {
        SanitizeError::Malformed {
            field: field.into(),
            expected: expected.into(),
            actual: json_type_name(actual).to_string(),
        }
    }
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
