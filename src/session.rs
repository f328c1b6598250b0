//! session
//!
//! An open-document editing session: one document, one outline tree, one
//! offset.
//!
//! # Responsibilities
//!
//! - Import the document's existing outline on open, converting actual
//!   pages to logical pages with the offset loaded from the store
//! - Expose every mutation operation over raw reference tokens, stitching
//!   together input validation, token resolution, and the tree engine
//! - Run the export validator on save and hand the instruction list to the
//!   document adapter; nothing is written when validation fails
//! - Persist offset changes through the [`OffsetStore`] immediately
//! - Answer `dirty()` by comparing the current tree+offset fingerprint
//!   against the baseline taken at open/save time
//!
//! The session performs no interactive prompting and emits no user-facing
//! text; all failures are structured [`SessionError`] values for the front
//! end to render.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::edit::EditError;
use crate::core::export::{build_destinations, ExportError};
use crate::core::fingerprint::TreeFingerprint;
use crate::core::node::{OutlineNode, OutlineTree};
use crate::core::path::TreePath;
use crate::core::resolve::{id_of, resolve_token, ResolveError};
use crate::core::types::{LogicalPage, NodeId, PageOffset, Title, TypeError};
use crate::doc::{factory, Document, DocumentError};
use crate::store::{document_key, OffsetStore, StoreError};

/// Errors from session operations.
///
/// Composes the layer errors: validation, resolution, mutation, export,
/// document I/O, and offset persistence.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Invalid(#[from] TypeError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Edit(#[from] EditError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("internal error: {0}")]
    Internal(String),
}

/// One open document and its editable outline state.
pub struct Session {
    document: Box<dyn Document>,
    path: PathBuf,
    tree: OutlineTree,
    offset: PageOffset,
    store: Box<dyn OffsetStore>,
    baseline: TreeFingerprint,
}

impl Session {
    /// Open the document at `path` with the adapter matching its format.
    ///
    /// The stored offset is loaded before import so existing destinations
    /// can be converted from actual to logical pages.
    pub fn open(path: &Path, store: Box<dyn OffsetStore>) -> Result<Self, SessionError> {
        let document = factory::open_document(path)?;
        Self::with_document(document, path, store)
    }

    /// Open a session over an already-constructed document.
    ///
    /// Used by tests and by callers that bring their own adapter.
    pub fn with_document(
        document: Box<dyn Document>,
        path: &Path,
        store: Box<dyn OffsetStore>,
    ) -> Result<Self, SessionError> {
        let key = document_key(path);
        let offset = store.load(&key)?.unwrap_or_default();
        let tree = import_tree(document.as_ref(), offset)?;
        let baseline = TreeFingerprint::compute(&tree, offset);
        Ok(Self {
            document,
            path: path.to_path_buf(),
            tree,
            offset,
            store,
            baseline,
        })
    }

    /// The document's path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The current outline tree.
    pub fn tree(&self) -> &OutlineTree {
        &self.tree
    }

    /// The current per-document offset.
    pub fn offset(&self) -> PageOffset {
        self.offset
    }

    /// The underlying document.
    pub fn document(&self) -> &dyn Document {
        self.document.as_ref()
    }

    /// Whether the tree or offset changed since open or the last save.
    pub fn dirty(&self) -> bool {
        TreeFingerprint::compute(&self.tree, self.offset) != self.baseline
    }

    /// Resolve a reference token against the current tree.
    pub fn resolve(&self, token: &str) -> Result<TreePath, SessionError> {
        Ok(resolve_token(&self.tree, token)?)
    }

    /// Add a leaf bookmark. `parent` defaults to the root, `index` to
    /// append. Returns the new node's session id.
    pub fn add(
        &mut self,
        title: &str,
        page: u32,
        parent: Option<&str>,
        index: Option<usize>,
    ) -> Result<NodeId, SessionError> {
        let title = Title::new(title)?;
        let page = LogicalPage::new(page)?;
        let dest = self.resolve_or_root(parent)?;
        let path = self.tree.add(&dest, index, title, page)?;
        self.id_at(&path)
    }

    /// Add a page-less group. `parent` defaults to the root, `index` to
    /// append. Returns the new node's session id.
    pub fn add_group(
        &mut self,
        title: &str,
        parent: Option<&str>,
        index: Option<usize>,
    ) -> Result<NodeId, SessionError> {
        let title = Title::new(title)?;
        let dest = self.resolve_or_root(parent)?;
        let path = self.tree.add_group(&dest, index, title)?;
        self.id_at(&path)
    }

    /// Rename a node in place.
    pub fn rename(&mut self, target: &str, new_title: &str) -> Result<(), SessionError> {
        let title = Title::new(new_title)?;
        let path = self.resolve(target)?;
        Ok(self.tree.rename(&path, title)?)
    }

    /// Remove a node and its entire subtree.
    pub fn remove(&mut self, target: &str) -> Result<(), SessionError> {
        let path = self.resolve(target)?;
        self.tree.remove(&path)?;
        Ok(())
    }

    /// Clear the whole outline. Front ends must confirm first; see
    /// [`crate::core::edit::REMOVE_ALL_REQUIRES_CONFIRMATION`].
    pub fn remove_all(&mut self) {
        self.tree.remove_all();
    }

    /// Set a node's logical page, converting a group into a leaf.
    pub fn set_page(&mut self, target: &str, page: u32) -> Result<(), SessionError> {
        let page = LogicalPage::new(page)?;
        let path = self.resolve(target)?;
        Ok(self.tree.set_page(&path, page)?)
    }

    /// Clear a node's logical page, converting a leaf into a group.
    pub fn clear_page(&mut self, target: &str) -> Result<(), SessionError> {
        let path = self.resolve(target)?;
        Ok(self.tree.clear_page(&path)?)
    }

    /// Move a node under a new parent (root when `dest` is `None`).
    /// Returns the node's new path.
    pub fn move_node(
        &mut self,
        target: &str,
        dest: Option<&str>,
        index: Option<usize>,
    ) -> Result<TreePath, SessionError> {
        let target = self.resolve(target)?;
        let dest = self.resolve_or_root(dest)?;
        Ok(self.tree.move_node(&target, &dest, index)?)
    }

    /// Set the per-document offset and persist it immediately.
    pub fn set_offset(&mut self, offset: i64) -> Result<(), SessionError> {
        self.offset = PageOffset::new(offset);
        self.persist_offset()
    }

    /// Reset the offset to zero and persist it.
    pub fn clear_offset(&mut self) -> Result<(), SessionError> {
        self.set_offset(0)
    }

    /// Validate the outline and write the document in place.
    ///
    /// Returns the number of destinations written. When validation fails
    /// nothing is applied and nothing is written.
    pub fn save(&mut self) -> Result<usize, SessionError> {
        let path = self.path.clone();
        self.save_to(&path)
    }

    /// Validate the outline and write the document to a new path, which
    /// becomes the session's document path. The offset is persisted under
    /// the new path's key.
    pub fn save_as(&mut self, path: &Path) -> Result<usize, SessionError> {
        let written = self.save_to(path)?;
        self.path = path.to_path_buf();
        self.persist_offset()?;
        Ok(written)
    }

    fn save_to(&mut self, path: &Path) -> Result<usize, SessionError> {
        let destinations =
            build_destinations(&self.tree, self.offset, self.document.page_count())?;
        self.document.apply(&destinations)?;
        self.document.write_to(path)?;
        self.baseline = TreeFingerprint::compute(&self.tree, self.offset);
        Ok(destinations.len())
    }

    fn persist_offset(&self) -> Result<(), SessionError> {
        let key = document_key(&self.path);
        Ok(self.store.save(&key, self.offset)?)
    }

    fn resolve_or_root(&self, token: Option<&str>) -> Result<TreePath, SessionError> {
        match token {
            Some(token) => self.resolve(token),
            None => Ok(TreePath::root()),
        }
    }

    fn id_at(&self, path: &TreePath) -> Result<NodeId, SessionError> {
        id_of(&self.tree, path)
            .ok_or_else(|| SessionError::Internal("inserted node must resolve to an id".into()))
    }
}

/// Build the initial tree from a document's outline entries.
///
/// Actual pages convert to logical pages with the loaded offset. A
/// conversion that would fall below 1 keeps the raw actual page instead;
/// entries without a usable title import as "Untitled".
fn import_tree(document: &dyn Document, offset: PageOffset) -> Result<OutlineTree, SessionError> {
    let mut tree = OutlineTree::new();
    for entry in document.outline() {
        let title = Title::new(entry.title.as_str()).or_else(|_| Title::new("Untitled"))?;
        let node = match import_page(entry.page, offset) {
            Some(page) => OutlineNode::leaf(title, page),
            None => OutlineNode::group(title),
        };
        let index = tree
            .children_of(&entry.parent)
            .map(<[_]>::len)
            .ok_or_else(|| {
                DocumentError::MalformedOutline(format!(
                    "outline entry under missing parent {}",
                    entry.parent
                ))
            })?;
        tree.insert_child(&entry.parent, index, node).map_err(|e| {
            SessionError::Document(DocumentError::MalformedOutline(e.to_string()))
        })?;
    }
    Ok(tree)
}

fn import_page(actual: Option<u32>, offset: PageOffset) -> Option<LogicalPage> {
    let actual = actual.filter(|&p| p > 0)?;
    let logical = offset.logical(i64::from(actual));
    if (1..=i64::from(u32::MAX)).contains(&logical) {
        LogicalPage::new(logical as u32).ok()
    } else {
        LogicalPage::new(actual).ok()
    }
}
