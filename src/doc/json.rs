//! doc::json
//!
//! JSON document adapter.
//!
//! The reference implementation of [`Document`]: a sidecar format holding
//! a page count and a nested outline, enough to drive the shell end to end
//! without a real document library. A binary-format adapter (PDF and
//! friends) plugs in at the same trait.
//!
//! # Format
//!
//! ```json
//! {
//!   "page_count": 12,
//!   "outline": [
//!     { "title": "Intro", "page": 3,
//!       "children": [ { "title": "Scope", "page": 4 } ] }
//!   ]
//! }
//! ```
//!
//! `page` is the 1-based actual page; entries without one are structural
//! groups.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::traits::{flatten, rebuild, Document, DocumentError, OutlineEntry, OutlineItem};
use crate::core::export::Destination;

/// A document backed by a JSON outline file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonDocument {
    page_count: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    outline: Vec<OutlineItem>,
}

impl JsonDocument {
    /// Open a JSON document from disk.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::OpenFailed` if the file cannot be read or
    /// does not parse.
    pub fn open(path: &Path) -> Result<Self, DocumentError> {
        let content = fs::read_to_string(path)
            .map_err(|e| DocumentError::OpenFailed(format!("{}: {}", path.display(), e)))?;
        serde_json::from_str(&content)
            .map_err(|e| DocumentError::OpenFailed(format!("{}: {}", path.display(), e)))
    }

    /// Create a new document with the given page count and no outline.
    pub fn new(page_count: usize) -> Self {
        Self {
            page_count,
            outline: Vec::new(),
        }
    }
}

impl Document for JsonDocument {
    fn page_count(&self) -> usize {
        self.page_count
    }

    fn outline(&self) -> Vec<OutlineEntry> {
        flatten(&self.outline)
    }

    fn apply(&mut self, destinations: &[Destination]) -> Result<(), DocumentError> {
        self.outline = rebuild(destinations)?;
        Ok(())
    }

    fn write_to(&self, path: &Path) -> Result<(), DocumentError> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| DocumentError::WriteFailed(e.to_string()))?;
        fs::write(path, content)
            .map_err(|e| DocumentError::WriteFailed(format!("{}: {}", path.display(), e)))
    }
}
