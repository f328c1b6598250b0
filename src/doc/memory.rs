//! doc::memory
//!
//! In-memory document for deterministic testing.
//!
//! Holds a page count and a nested outline and implements [`Document`]
//! without touching the filesystem; `write_to` is a no-op. Engine and
//! session tests use it to observe exactly what a save applied.

use std::path::Path;

use super::traits::{flatten, rebuild, Document, DocumentError, OutlineEntry, OutlineItem};
use crate::core::export::Destination;

/// In-memory document for testing.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    page_count: usize,
    outline: Vec<OutlineItem>,
}

impl MemoryDocument {
    /// Create a document with the given page count and no outline.
    pub fn new(page_count: usize) -> Self {
        Self {
            page_count,
            outline: Vec::new(),
        }
    }

    /// Create a document with an existing outline.
    pub fn with_outline(page_count: usize, outline: Vec<OutlineItem>) -> Self {
        Self {
            page_count,
            outline,
        }
    }

    /// The current nested outline.
    pub fn items(&self) -> &[OutlineItem] {
        &self.outline
    }
}

impl Document for MemoryDocument {
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

    fn write_to(&self, _path: &Path) -> Result<(), DocumentError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::path::TreePath;
    use crate::core::types::Title;

    #[test]
    fn starts_empty() {
        let doc = MemoryDocument::new(10);
        assert_eq!(doc.page_count(), 10);
        assert!(doc.outline().is_empty());
    }

    #[test]
    fn apply_replaces_outline() {
        let mut doc = MemoryDocument::with_outline(
            10,
            vec![OutlineItem {
                title: "Old".into(),
                page: Some(1),
                children: vec![],
            }],
        );

        doc.apply(&[Destination {
            path: TreePath::parse("1").unwrap(),
            title: Title::new("New").unwrap(),
            page_index: 4,
        }])
        .unwrap();

        let entries = doc.outline();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "New");
        assert_eq!(entries[0].page, Some(5));
    }
}
