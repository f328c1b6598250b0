//! doc::factory
//!
//! Document adapter selection.
//!
//! Picks the adapter for a file by extension. JSON sidecar outlines are the
//! one built-in format; additional adapters register here as they appear.

use std::path::Path;

use super::json::JsonDocument;
use super::traits::{Document, DocumentError};

/// Open a document with the adapter matching its extension.
///
/// # Errors
///
/// Returns `DocumentError::UnsupportedFormat` when no adapter claims the
/// extension, or the adapter's own error when opening fails.
pub fn open_document(path: &Path) -> Result<Box<dyn Document>, DocumentError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("json") => Ok(Box::new(JsonDocument::open(path)?)),
        _ => Err(DocumentError::UnsupportedFormat(
            path.display().to_string(),
        )),
    }
}
