//! doc::traits
//!
//! Document trait definition: the boundary to the document library that
//! owns the file format.
//!
//! # Design
//!
//! The engine never touches document internals. On open, a document
//! supplies its existing outline as flat [`OutlineEntry`] records in
//! document order; on save, it accepts the export validator's ordered
//! [`Destination`] list and materializes real destinations from it. The
//! trait is synchronous: the engine is single-threaded request/response
//! and performs no background work.
//!
//! Adapters convert between the flat boundary forms and their own nested
//! storage via [`OutlineItem`], [`flatten`], and [`rebuild`].

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::core::export::Destination;
use crate::core::path::TreePath;

/// Errors from document operations.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The document could not be opened or parsed.
    #[error("cannot open document: {0}")]
    OpenFailed(String),

    /// The document could not be written.
    #[error("cannot write document: {0}")]
    WriteFailed(String),

    /// No adapter understands this file.
    #[error("unsupported document format: {0}")]
    UnsupportedFormat(String),

    /// The instruction list does not describe a well-formed tree.
    #[error("malformed destination list: {0}")]
    MalformedOutline(String),
}

/// One existing outline entry, as supplied by a document on open.
///
/// Entries arrive in document order, each naming the path of its parent
/// (the root path for top-level entries), so a consumer can rebuild the
/// tree by appending under the named parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineEntry {
    /// The entry's title; may be empty in malformed documents.
    pub title: String,
    /// 1-based actual page the entry points at, if it has a destination.
    pub page: Option<u32>,
    /// Path of the parent entry; root for top-level entries.
    pub parent: TreePath,
}

/// An open document.
pub trait Document: std::fmt::Debug {
    /// Total number of pages, used for export bounds checking.
    fn page_count(&self) -> usize;

    /// The document's current outline in document order.
    fn outline(&self) -> Vec<OutlineEntry>;

    /// Replace the document's outline with the given destinations.
    ///
    /// The list comes from the export validator and is already
    /// bounds-checked; it arrives in document order with every parent
    /// before its children.
    fn apply(&mut self, destinations: &[Destination]) -> Result<(), DocumentError>;

    /// Write the document to disk.
    fn write_to(&self, path: &Path) -> Result<(), DocumentError>;
}

/// A nested outline entry, the storage form shared by adapters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineItem {
    pub title: String,
    /// 1-based actual page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<OutlineItem>,
}

/// Flatten nested items into document-order entries with parent paths.
pub fn flatten(items: &[OutlineItem]) -> Vec<OutlineEntry> {
    fn visit(items: &[OutlineItem], parent: &TreePath, out: &mut Vec<OutlineEntry>) {
        for (i, item) in items.iter().enumerate() {
            out.push(OutlineEntry {
                title: item.title.clone(),
                page: item.page,
                parent: parent.clone(),
            });
            visit(&item.children, &parent.child(i + 1), out);
        }
    }

    let mut out = Vec::new();
    visit(items, &TreePath::root(), &mut out);
    out
}

/// Rebuild nested items from an ordered destination list.
///
/// # Errors
///
/// Returns `DocumentError::MalformedOutline` if a destination's path does
/// not extend the tree built so far (missing parent or non-contiguous
/// position).
pub fn rebuild(destinations: &[Destination]) -> Result<Vec<OutlineItem>, DocumentError> {
    let mut roots: Vec<OutlineItem> = Vec::new();
    for dest in destinations {
        let parent = dest
            .path
            .parent()
            .ok_or_else(|| DocumentError::MalformedOutline("root path in list".into()))?;
        let mut list = &mut roots;
        for &segment in parent.segments() {
            list = match list.get_mut(segment - 1) {
                Some(item) => &mut item.children,
                None => {
                    return Err(DocumentError::MalformedOutline(format!(
                        "no parent for {}",
                        dest.path
                    )))
                }
            };
        }
        let position = dest
            .path
            .position()
            .ok_or_else(|| DocumentError::MalformedOutline("root path in list".into()))?;
        if position != list.len() + 1 {
            return Err(DocumentError::MalformedOutline(format!(
                "destination {} arrives out of order",
                dest.path
            )));
        }
        list.push(OutlineItem {
            title: dest.title.as_str().to_string(),
            page: Some(dest.page_index as u32 + 1),
            children: Vec::new(),
        });
    }
    Ok(roots)
}
