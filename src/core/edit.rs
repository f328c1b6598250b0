//! core::edit
//!
//! The mutation engine: every structural and attribute edit the front end
//! can request, expressed over resolved [`TreePath`] locations.
//!
//! # Integrity contract
//!
//! Every operation is atomic: all validation happens before any mutation,
//! so a failed call leaves the tree exactly as it was. `move_node` is the
//! one multi-step algorithm at risk of partial application; it computes the
//! index delta up front and only then performs its single detach+insert
//! pair, so no intermediate state is ever observable.
//!
//! Operations take already-validated types ([`Title`], [`LogicalPage`]) and
//! already-resolved paths; token resolution and input validation live in
//! [`crate::core::resolve`] and [`crate::core::types`], and are stitched
//! together by [`crate::session`].

use thiserror::Error;

use super::node::{OutlineNode, OutlineTree, TreeError};
use super::path::TreePath;
use super::types::{LogicalPage, Title};

/// `remove_all` clears the whole outline in one step. The engine never
/// prompts; front ends must obtain an explicit confirmation signal before
/// calling it. This flag is the machine-readable form of that contract.
pub const REMOVE_ALL_REQUIRES_CONFIRMATION: bool = true;

/// Errors from mutation operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditError {
    /// The root container may be a destination, never a mutation target.
    #[error("the root cannot be the target of this operation")]
    RootTarget,

    /// The move destination is the moved node or inside its subtree.
    #[error("cannot move a node into itself or its own subtree")]
    InvalidMove,

    /// An index or path fell outside the tree.
    #[error(transparent)]
    Index(#[from] TreeError),
}

impl OutlineTree {
    /// Insert a new leaf under `dest` (`None` index appends).
    ///
    /// Returns the new node's path.
    pub fn add(
        &mut self,
        dest: &TreePath,
        index: Option<usize>,
        title: Title,
        page: LogicalPage,
    ) -> Result<TreePath, EditError> {
        self.insert_new(dest, index, OutlineNode::leaf(title, page))
    }

    /// Insert a new page-less group under `dest` (`None` index appends).
    ///
    /// Returns the new node's path.
    pub fn add_group(
        &mut self,
        dest: &TreePath,
        index: Option<usize>,
        title: Title,
    ) -> Result<TreePath, EditError> {
        self.insert_new(dest, index, OutlineNode::group(title))
    }

    fn insert_new(
        &mut self,
        dest: &TreePath,
        index: Option<usize>,
        node: OutlineNode,
    ) -> Result<TreePath, EditError> {
        let len = self
            .children_of(dest)
            .map(<[_]>::len)
            .ok_or_else(|| TreeError::UnknownParent(dest.clone()))?;
        let at = index.unwrap_or(len);
        self.insert_child(dest, at, node)?;
        Ok(dest.child(at + 1))
    }

    /// Replace a node's title in place.
    pub fn rename(&mut self, target: &TreePath, title: Title) -> Result<(), EditError> {
        if target.is_root() {
            return Err(EditError::RootTarget);
        }
        let node = self
            .node_mut(target)
            .ok_or_else(|| TreeError::UnknownParent(target.clone()))?;
        node.set_title(title);
        Ok(())
    }

    /// Detach a node and its entire subtree. Irreversible within the
    /// session.
    pub fn remove(&mut self, target: &TreePath) -> Result<OutlineNode, EditError> {
        if target.is_root() {
            return Err(EditError::RootTarget);
        }
        let parent = target.parent().expect("non-root path has a parent");
        let index = target.position().expect("non-root path has a position") - 1;
        Ok(self.detach_child(&parent, index)?)
    }

    /// Clear the entire outline in one step.
    ///
    /// Callers must honor [`REMOVE_ALL_REQUIRES_CONFIRMATION`].
    pub fn remove_all(&mut self) {
        self.clear();
    }

    /// Set a node's logical page, converting a group into a leaf in place.
    /// Children, if any, are preserved.
    pub fn set_page(&mut self, target: &TreePath, page: LogicalPage) -> Result<(), EditError> {
        if target.is_root() {
            return Err(EditError::RootTarget);
        }
        let node = self
            .node_mut(target)
            .ok_or_else(|| TreeError::UnknownParent(target.clone()))?;
        node.set_page(Some(page));
        Ok(())
    }

    /// Clear a node's logical page, converting a leaf into a group.
    /// Children, if any, are preserved.
    pub fn clear_page(&mut self, target: &TreePath) -> Result<(), EditError> {
        if target.is_root() {
            return Err(EditError::RootTarget);
        }
        let node = self
            .node_mut(target)
            .ok_or_else(|| TreeError::UnknownParent(target.clone()))?;
        node.set_page(None);
        Ok(())
    }

    /// Move a node (with its subtree) under a new parent.
    ///
    /// `None` index appends. When the destination is the list the node is
    /// detached from and the requested index is past its old position, the
    /// index is decremented to compensate for the removed slot, preserving
    /// the caller's intended final position. A same-list move to the node's
    /// current position is a no-op.
    ///
    /// Returns the node's new path.
    ///
    /// # Errors
    ///
    /// - `EditError::RootTarget` when `target` is the root
    /// - `EditError::InvalidMove` when `dest` is `target` or inside its
    ///   subtree
    /// - `TreeError::UnknownParent` when either path does not resolve
    /// - `TreeError::IndexOutOfRange` when the adjusted index does not fit
    ///   the destination list; the tree is untouched in every error case
    pub fn move_node(
        &mut self,
        target: &TreePath,
        dest: &TreePath,
        index: Option<usize>,
    ) -> Result<TreePath, EditError> {
        if target.is_root() {
            return Err(EditError::RootTarget);
        }
        if dest.starts_with(target) {
            return Err(EditError::InvalidMove);
        }
        if self.node(target).is_none() {
            return Err(TreeError::UnknownParent(target.clone()).into());
        }
        let dest_len = self
            .children_of(dest)
            .map(<[_]>::len)
            .ok_or_else(|| TreeError::UnknownParent(dest.clone()))?;

        let src_parent = target.parent().expect("non-root path has a parent");
        let src_index = target.position().expect("non-root path has a position") - 1;
        let same_list = *dest == src_parent;

        let mut insert_at = index.unwrap_or(dest_len);
        if same_list && insert_at > src_index {
            insert_at -= 1;
        }
        let max = if same_list { dest_len - 1 } else { dest_len };
        if insert_at > max {
            return Err(TreeError::IndexOutOfRange {
                index: insert_at,
                len: max,
            }
            .into());
        }
        if same_list && insert_at == src_index {
            return Ok(target.clone());
        }

        // All checks passed; the detach+insert pair below cannot fail.
        let node = self.detach_child(&src_parent, src_index)?;

        // Detaching shifted later siblings in the source list; re-base the
        // destination path if it runs through one of them.
        let level = src_parent.depth();
        let dest = if !same_list
            && dest.depth() > level
            && dest.starts_with(&src_parent)
            && dest.segments()[level] > src_index + 1
        {
            let mut segments = dest.segments().to_vec();
            segments[level] -= 1;
            TreePath::from_segments(segments).expect("adjusted segments stay positive")
        } else {
            dest.clone()
        };

        self.insert_child(&dest, insert_at, node)?;
        Ok(dest.child(insert_at + 1))
    }
}
