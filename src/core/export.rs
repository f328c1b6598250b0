//! core::export
//!
//! Export validation: turns the in-memory outline into the flat destination
//! list the document-writing collaborator materializes on save.
//!
//! # Design
//!
//! The builder walks the tree in document order (pre-order, children in
//! list order) and resolves every node to a 0-based page index:
//!
//! - Leaves resolve to `logical + offset - 1`.
//! - Groups carry no page of their own but are anchored to their first
//!   descendant leaf in document order (at any depth), so writers that
//!   ignore page-less entries still show the group. A group with no leaf
//!   descendants anchors to page index 0.
//!
//! Every computed index, anchors included, is bounds-checked against the
//! document's page count. Any violation fails the whole export with the
//! offending node's path; no partial instruction list is ever returned,
//! so no partial write can occur. The builder performs no I/O itself.

use thiserror::Error;

use super::node::{OutlineNode, OutlineTree};
use super::path::TreePath;
use super::types::{LogicalPage, PageOffset, Title};

/// Errors from export validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExportError {
    /// A destination resolved outside the document.
    #[error(
        "destination for node {path} resolves to page index {page_index}, \
         but the document has {page_count} pages"
    )]
    PageOutOfRange {
        path: TreePath,
        page_index: i64,
        page_count: usize,
    },
}

/// One materialized outline destination: where a node points in the saved
/// document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    /// The node's position in the tree at export time.
    pub path: TreePath,
    /// The node's title.
    pub title: Title,
    /// 0-based page index in the document.
    pub page_index: usize,
}

/// Build the ordered destination list for a save.
///
/// # Errors
///
/// Returns `ExportError::PageOutOfRange` naming the first node (in document
/// order) whose computed index is negative or beyond `page_count`; no
/// destinations are returned in that case.
pub fn build_destinations(
    tree: &OutlineTree,
    offset: PageOffset,
    page_count: usize,
) -> Result<Vec<Destination>, ExportError> {
    let mut destinations = Vec::with_capacity(tree.node_count());
    for (path, node) in tree.walk() {
        let page_index = match anchor_page(node) {
            Some(logical) => offset.page_index(logical),
            None => 0,
        };
        if page_index < 0 || page_index as usize >= page_count {
            return Err(ExportError::PageOutOfRange {
                path,
                page_index,
                page_count,
            });
        }
        destinations.push(Destination {
            path,
            title: node.title().clone(),
            page_index: page_index as usize,
        });
    }
    Ok(destinations)
}

/// The logical page a node's destination anchors to: its own page for
/// leaves, the first descendant leaf's page in document order for groups.
fn anchor_page(node: &OutlineNode) -> Option<LogicalPage> {
    if let Some(page) = node.page() {
        return Some(page);
    }
    node.children().iter().find_map(anchor_page)
}
