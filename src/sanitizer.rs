//! Manifest sanitizer: the ordered in-place transformation pipeline
//!
//! Loads `manifest.json`, strips the fields a public web-store listing
//! must not carry, and rewrites the file pretty-printed. All mutation
//! happens on an in-memory [`serde_json::Value`]; the file is only
//! overwritten after every step has succeeded, so a failing run never
//! leaves a partially-edited manifest behind.

use crate::error::SanitizeError;
use serde::Serialize;
use serde_json::{ser::PrettyFormatter, Serializer, Value};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default manifest filename, resolved against the working directory.
pub const DEFAULT_MANIFEST: &str = "manifest.json";

/// Permission entries with this suffix are internal-only and must not
/// appear in a public store listing.
const PRIVATE_SUFFIX: &str = "Private";

/// Per-component fields removed from every `input_components` entry.
const COMPONENT_FIELDS: [&str; 2] = ["input_view", "indicator"];

/// Manifest sanitizer with a fixed transformation pipeline.
///
/// The two historical variants of the preparation script differed only
/// in whether `update_url` was stripped; that difference is a single
/// option here rather than a duplicated pipeline.
pub struct Sanitizer {
    path: PathBuf,
    strip_update_url: bool,
}

impl Sanitizer {
    pub fn new() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_MANIFEST),
            strip_update_url: false,
        }
    }

    /// Set the manifest path (defaults to `manifest.json`)
    pub fn with_path(mut self, path: impl AsRef<Path>) -> Self {
        self.path = path.as_ref().to_path_buf();
        self
    }

    /// Also strip the top-level `update_url` field (strict removal)
    pub fn with_strip_update_url(mut self, enable: bool) -> Self {
        self.strip_update_url = enable;
        self
    }

    /// Run the full pipeline: load, transform in memory, overwrite the file.
    ///
    /// Returns without writing if any step fails, leaving the on-disk
    /// manifest exactly as it was.
    pub fn sanitize_file(&self) -> Result<(), SanitizeError> {
        let mut manifest = self.load()?;
        self.apply(&mut manifest)?;
        self.save(&manifest)?;
        Ok(())
    }

    fn load(&self) -> Result<Value, SanitizeError> {
        debug!(path = %self.path.display(), "loading manifest");
        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                SanitizeError::NotFound {
                    path: self.path.display().to_string(),
                    hint: None,
                }
                .with_hint("Run from the extension root, next to manifest.json")
            } else {
                SanitizeError::Io(e)
            }
        })?;
        serde_json::from_str(&content).map_err(|e| SanitizeError::Parse {
            path: self.path.display().to_string(),
            source: e,
        })
    }

    /// Apply the ordered field-removal and filter steps to an in-memory
    /// manifest. Exposed separately so the transformation can be tested
    /// without touching the filesystem.
    pub fn apply(&self, manifest: &mut Value) -> Result<(), SanitizeError> {
        let root = match manifest {
            Value::Object(map) => map,
            other => return Err(SanitizeError::malformed("manifest", "object", other)),
        };

        // 1. Strict removal of per-component UI fields
        let components = root
            .get_mut("input_components")
            .ok_or_else(|| SanitizeError::missing("input_components", "manifest root"))?;
        let components = match components {
            Value::Array(arr) => arr,
            other => return Err(SanitizeError::malformed("input_components", "array", other)),
        };
        for (idx, component) in components.iter_mut().enumerate() {
            let location = format!("input_components[{idx}]");
            let component = match component {
                Value::Object(map) => map,
                other => {
                    return Err(SanitizeError::malformed("input_components", "object entry", other))
                }
            };
            for field in COMPONENT_FIELDS {
                component
                    .remove(field)
                    .ok_or_else(|| SanitizeError::missing(field, location.clone()))?;
            }
        }
        debug!(components = components.len(), "stripped input_view/indicator");

        // 2. Drop Private-suffixed permissions, preserving order
        let permissions = root
            .get_mut("permissions")
            .ok_or_else(|| SanitizeError::missing("permissions", "manifest root"))?;
        let entries = match permissions {
            Value::Array(arr) => arr,
            other => return Err(SanitizeError::malformed("permissions", "array", other)),
        };
        let mut retained = Vec::with_capacity(entries.len());
        for entry in entries.iter() {
            let perm = entry
                .as_str()
                .ok_or_else(|| SanitizeError::malformed("permissions", "string entry", entry))?;
            if !perm.ends_with(PRIVATE_SUFFIX) {
                retained.push(entry.clone());
            }
        }
        debug!(
            kept = retained.len(),
            dropped = entries.len() - retained.len(),
            "filtered private permissions"
        );
        *entries = retained;

        // 3. Strict removal of top-level fields
        root.remove("key")
            .ok_or_else(|| SanitizeError::missing("key", "manifest root"))?;
        if self.strip_update_url {
            root.remove("update_url").ok_or_else(|| {
                SanitizeError::missing("update_url", "manifest root")
                    .with_hint("Omit --strip-update-url if this manifest has no update_url")
            })?;
        }

        Ok(())
    }

    fn save(&self, manifest: &Value) -> Result<(), SanitizeError> {
        // 4-space indentation, matching the store-submission convention
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut ser = Serializer::with_formatter(&mut buf, formatter);
        manifest
            .serialize(&mut ser)
            .map_err(|e| SanitizeError::Io(e.into()))?;
        std::fs::write(&self.path, buf)?;
        debug!(path = %self.path.display(), "manifest rewritten");
        Ok(())
    }
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "name": "Sample IME",
            "input_components": [
                {"input_view": "view.html", "indicator": "US", "id": "x"}
            ],
            "permissions": ["fooPrivate", "bar"],
            "key": "abc"
        })
    }

    #[test]
    fn strips_component_fields_and_key() {
        let mut manifest = sample();
        Sanitizer::new().apply(&mut manifest).unwrap();
        assert_eq!(
            manifest,
            json!({
                "name": "Sample IME",
                "input_components": [{"id": "x"}],
                "permissions": ["bar"]
            })
        );
    }

    #[test]
    fn preserves_permission_order() {
        let mut manifest = sample();
        manifest["permissions"] = json!(["a", "inputMethodPrivate", "b", "c"]);
        Sanitizer::new().apply(&mut manifest).unwrap();
        assert_eq!(manifest["permissions"], json!(["a", "b", "c"]));
    }

    #[test]
    fn empty_permissions_is_not_an_error() {
        let mut manifest = sample();
        manifest["permissions"] = json!([]);
        Sanitizer::new().apply(&mut manifest).unwrap();
        assert_eq!(manifest["permissions"], json!([]));
    }

    #[test]
    fn strips_update_url_when_enabled() {
        let mut manifest = sample();
        manifest["update_url"] = json!("https://example.com");
        Sanitizer::new()
            .with_strip_update_url(true)
            .apply(&mut manifest)
            .unwrap();
        assert!(manifest.get("update_url").is_none());
    }

    #[test]
    fn keeps_update_url_by_default() {
        let mut manifest = sample();
        manifest["update_url"] = json!("https://example.com");
        Sanitizer::new().apply(&mut manifest).unwrap();
        assert_eq!(manifest["update_url"], json!("https://example.com"));
    }

    #[test]
    fn missing_input_view_is_an_error() {
        let mut manifest = sample();
        manifest["input_components"] = json!([{"indicator": "US", "id": "x"}]);
        let err = Sanitizer::new().apply(&mut manifest).unwrap_err();
        match err {
            SanitizeError::MissingField { field, location, .. } => {
                assert_eq!(field, "input_view");
                assert_eq!(location, "input_components[0]");
            }
            other => panic!("Expected MissingField, got: {other:?}"),
        }
    }

    #[test]
    fn missing_key_is_an_error() {
        let mut manifest = sample();
        manifest.as_object_mut().unwrap().remove("key");
        let err = Sanitizer::new().apply(&mut manifest).unwrap_err();
        assert!(matches!(err, SanitizeError::MissingField { ref field, .. } if field == "key"));
    }

    #[test]
    fn missing_update_url_is_an_error_when_enabled() {
        let mut manifest = sample();
        let err = Sanitizer::new()
            .with_strip_update_url(true)
            .apply(&mut manifest)
            .unwrap_err();
        assert!(
            matches!(err, SanitizeError::MissingField { ref field, .. } if field == "update_url")
        );
    }

    #[test]
    fn non_string_permission_is_an_error() {
        let mut manifest = sample();
        manifest["permissions"] = json!(["ok", 42]);
        let err = Sanitizer::new().apply(&mut manifest).unwrap_err();
        assert!(matches!(err, SanitizeError::Malformed { .. }));
    }

    #[test]
    fn unrelated_fields_pass_through() {
        let mut manifest = sample();
        manifest["version"] = json!("1.2.3");
        manifest["icons"] = json!({"128": "icon.png"});
        Sanitizer::new().apply(&mut manifest).unwrap();
        assert_eq!(manifest["version"], json!("1.2.3"));
        assert_eq!(manifest["icons"], json!({"128": "icon.png"}));
    }
}
