//! # webstore-prep
//!
//! Prepares a browser-extension `manifest.json` for submission to a
//! public extension store by stripping fields that must not appear in a
//! published listing:
//!
//! - the embedded signing `key`
//! - `Private`-suffixed permission entries
//! - `input_view` and `indicator` on every input-method component
//! - optionally the `update_url` override
//!
//! The manifest is rewritten in place as 4-space-indented JSON. The
//! transformation is all-or-nothing: it runs on an in-memory copy and
//! overwrites the file only once every step has succeeded, so a failed
//! run never leaves a partially-edited manifest on disk.
//!
//! Re-running on already-sanitized output fails with
//! [`SanitizeError::MissingField`], since the strictly-removed fields no
//! longer exist. This is deliberate: a second pass means the release
//! flow double-processed the manifest, which should be loud.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use webstore_prep::Sanitizer;
//!
//! fn main() -> webstore_prep::Result<()> {
//!     Sanitizer::new()
//!         .with_strip_update_url(true)
//!         .sanitize_file()
//! }
//! ```

pub mod error;
pub mod sanitizer;

pub use error::SanitizeError;
pub use sanitizer::{Sanitizer, DEFAULT_MANIFEST};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, SanitizeError>;
