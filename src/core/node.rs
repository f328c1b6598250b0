//! core::node
//!
//! Outline node and tree model.
//!
//! # Architecture
//!
//! The outline is an ordered, rooted tree:
//! - Nodes own their children exclusively (`Vec<OutlineNode>`)
//! - The root is an implicit container holding the top-level list; it is
//!   never itself addressable as a node
//! - A node with a logical page is a leaf (a navigable bookmark); a node
//!   without one is a group (a purely structural container)
//!
//! # Invariants
//!
//! - Parent/child relations form a simple rooted forest. Exclusive
//!   ownership makes cycles and double-parenting unrepresentable.
//! - Children lists preserve insertion/move order with no gaps.
//! - Leaf-ness is fully determined by the page attribute.
//!
//! The only structural mutations are [`OutlineTree::insert_child`] and
//! [`OutlineTree::detach_child`], reserved for the mutation engine in
//! [`crate::core::edit`]. Every structural edit invalidates previously
//! derived ids; ids are re-derived from pre-order position on demand.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::path::TreePath;
use super::types::{LogicalPage, Title};

/// Errors from structural tree primitives.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TreeError {
    /// An insertion or detach index is outside the children list.
    #[error("index {index} out of range (list has {len} entries)")]
    IndexOutOfRange { index: usize, len: usize },

    /// The parent path does not address a node in the current tree.
    #[error("no node at path {0}")]
    UnknownParent(TreePath),
}

/// A single outline entry: a leaf bookmark or a structural group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineNode {
    title: Title,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    page: Option<LogicalPage>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    children: Vec<OutlineNode>,
}

impl OutlineNode {
    /// Create a leaf node with a logical page.
    pub fn leaf(title: Title, page: LogicalPage) -> Self {
        Self {
            title,
            page: Some(page),
            children: Vec::new(),
        }
    }

    /// Create a page-less group node.
    pub fn group(title: Title) -> Self {
        Self {
            title,
            page: None,
            children: Vec::new(),
        }
    }

    /// The node's title.
    pub fn title(&self) -> &Title {
        &self.title
    }

    /// The node's logical page, if it is a leaf.
    pub fn page(&self) -> Option<LogicalPage> {
        self.page
    }

    /// Whether this node is a leaf (has a page).
    pub fn is_leaf(&self) -> bool {
        self.page.is_some()
    }

    /// Whether this node is a group (no page).
    pub fn is_group(&self) -> bool {
        self.page.is_none()
    }

    /// The node's children, in order.
    pub fn children(&self) -> &[OutlineNode] {
        &self.children
    }

    pub(crate) fn set_title(&mut self, title: Title) {
        self.title = title;
    }

    pub(crate) fn set_page(&mut self, page: Option<LogicalPage>) {
        self.page = page;
    }

    pub(crate) fn children_mut(&mut self) -> &mut Vec<OutlineNode> {
        &mut self.children
    }

    /// Total nodes in this subtree, including this node.
    pub fn subtree_size(&self) -> usize {
        1 + self.children.iter().map(OutlineNode::subtree_size).sum::<usize>()
    }
}

/// The outline tree: the implicit root's ordered children and everything
/// reachable from them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OutlineTree {
    roots: Vec<OutlineNode>,
}

impl OutlineTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tree from an existing top-level list.
    pub fn from_roots(roots: Vec<OutlineNode>) -> Self {
        Self { roots }
    }

    /// The top-level nodes, in order.
    pub fn roots(&self) -> &[OutlineNode] {
        &self.roots
    }

    /// Whether the tree has no nodes at all.
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Total number of nodes in the tree.
    pub fn node_count(&self) -> usize {
        self.roots.iter().map(OutlineNode::subtree_size).sum()
    }

    /// Look up the node at a path. Returns `None` for the root path or any
    /// path that runs out of range.
    pub fn node(&self, path: &TreePath) -> Option<&OutlineNode> {
        let mut segments = path.segments().iter();
        let first = *segments.next()?;
        let mut current = self.roots.get(first - 1)?;
        for &segment in segments {
            current = current.children.get(segment - 1)?;
        }
        Some(current)
    }

    pub(crate) fn node_mut(&mut self, path: &TreePath) -> Option<&mut OutlineNode> {
        let mut segments = path.segments().iter();
        let first = *segments.next()?;
        let mut current = self.roots.get_mut(first - 1)?;
        for &segment in segments {
            current = current.children.get_mut(segment - 1)?;
        }
        Some(current)
    }

    /// The children list owned by the node at `parent`, or the top-level
    /// list when `parent` is the root. `None` if the path does not resolve.
    pub fn children_of(&self, parent: &TreePath) -> Option<&[OutlineNode]> {
        if parent.is_root() {
            return Some(&self.roots);
        }
        self.node(parent).map(OutlineNode::children)
    }

    fn children_of_mut(&mut self, parent: &TreePath) -> Option<&mut Vec<OutlineNode>> {
        if parent.is_root() {
            return Some(&mut self.roots);
        }
        self.node_mut(parent).map(OutlineNode::children_mut)
    }

    /// Structural primitive: insert `node` at `parent.children[index]`.
    ///
    /// Reserved for the mutation engine. Invalidates all previously derived
    /// ids.
    ///
    /// # Errors
    ///
    /// `TreeError::UnknownParent` if `parent` does not resolve;
    /// `TreeError::IndexOutOfRange` if `index > len`.
    pub fn insert_child(
        &mut self,
        parent: &TreePath,
        index: usize,
        node: OutlineNode,
    ) -> Result<(), TreeError> {
        let list = self
            .children_of_mut(parent)
            .ok_or_else(|| TreeError::UnknownParent(parent.clone()))?;
        if index > list.len() {
            return Err(TreeError::IndexOutOfRange {
                index,
                len: list.len(),
            });
        }
        list.insert(index, node);
        Ok(())
    }

    /// Structural primitive: detach and return `parent.children[index]`
    /// with its entire subtree.
    ///
    /// Reserved for the mutation engine. Invalidates all previously derived
    /// ids.
    ///
    /// # Errors
    ///
    /// `TreeError::UnknownParent` if `parent` does not resolve;
    /// `TreeError::IndexOutOfRange` if `index >= len`.
    pub fn detach_child(
        &mut self,
        parent: &TreePath,
        index: usize,
    ) -> Result<OutlineNode, TreeError> {
        let list = self
            .children_of_mut(parent)
            .ok_or_else(|| TreeError::UnknownParent(parent.clone()))?;
        if index >= list.len() {
            return Err(TreeError::IndexOutOfRange {
                index,
                len: list.len(),
            });
        }
        Ok(list.remove(index))
    }

    pub(crate) fn clear(&mut self) {
        self.roots.clear();
    }

    /// Visit every node in document order (pre-order, children in list
    /// order), paired with its freshly computed path.
    pub fn walk(&self) -> Vec<(TreePath, &OutlineNode)> {
        fn visit<'a>(
            nodes: &'a [OutlineNode],
            prefix: &TreePath,
            out: &mut Vec<(TreePath, &'a OutlineNode)>,
        ) {
            for (i, node) in nodes.iter().enumerate() {
                let path = prefix.child(i + 1);
                out.push((path.clone(), node));
                visit(&node.children, &path, out);
            }
        }

        let mut out = Vec::with_capacity(self.node_count());
        visit(&self.roots, &TreePath::root(), &mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn title(text: &str) -> Title {
        Title::new(text).unwrap()
    }

    fn page(n: u32) -> LogicalPage {
        LogicalPage::new(n).unwrap()
    }

    /// Intro(1) { Methods(4), Data } Appendix(9)
    fn sample_tree() -> OutlineTree {
        let mut intro = OutlineNode::leaf(title("Intro"), page(1));
        intro
            .children_mut()
            .push(OutlineNode::leaf(title("Methods"), page(4)));
        intro.children_mut().push(OutlineNode::group(title("Data")));
        let appendix = OutlineNode::leaf(title("Appendix"), page(9));
        OutlineTree::from_roots(vec![intro, appendix])
    }

    #[test]
    fn leaf_and_group_classification() {
        let leaf = OutlineNode::leaf(title("A"), page(1));
        assert!(leaf.is_leaf());
        assert!(!leaf.is_group());

        let group = OutlineNode::group(title("B"));
        assert!(group.is_group());
        assert!(group.page().is_none());
    }

    #[test]
    fn node_count_counts_subtrees() {
        assert_eq!(sample_tree().node_count(), 4);
        assert_eq!(OutlineTree::new().node_count(), 0);
    }

    #[test]
    fn node_lookup_by_path() {
        let tree = sample_tree();
        let methods = tree.node(&TreePath::parse("1>1").unwrap()).unwrap();
        assert_eq!(methods.title().as_str(), "Methods");

        let appendix = tree.node(&TreePath::parse("2").unwrap()).unwrap();
        assert_eq!(appendix.title().as_str(), "Appendix");
    }

    #[test]
    fn node_lookup_out_of_range_is_none() {
        let tree = sample_tree();
        assert!(tree.node(&TreePath::parse("3").unwrap()).is_none());
        assert!(tree.node(&TreePath::parse("1>5").unwrap()).is_none());
        assert!(tree.node(&TreePath::parse("2>1").unwrap()).is_none());
    }

    #[test]
    fn root_is_not_a_node() {
        let tree = sample_tree();
        assert!(tree.node(&TreePath::root()).is_none());
        // ...but its children list is reachable
        assert_eq!(tree.children_of(&TreePath::root()).unwrap().len(), 2);
    }

    #[test]
    fn insert_child_at_index() {
        let mut tree = sample_tree();
        let node = OutlineNode::leaf(title("Preface"), page(1));
        tree.insert_child(&TreePath::root(), 0, node).unwrap();

        assert_eq!(tree.roots().len(), 3);
        assert_eq!(tree.roots()[0].title().as_str(), "Preface");
        assert_eq!(tree.roots()[1].title().as_str(), "Intro");
    }

    #[test]
    fn insert_child_append_position() {
        let mut tree = sample_tree();
        let parent = TreePath::parse("1").unwrap();
        let len = tree.children_of(&parent).unwrap().len();
        tree.insert_child(&parent, len, OutlineNode::group(title("Tail")))
            .unwrap();
        let children = tree.children_of(&parent).unwrap();
        assert_eq!(children.last().unwrap().title().as_str(), "Tail");
    }

    #[test]
    fn insert_child_index_out_of_range() {
        let mut tree = sample_tree();
        let err = tree
            .insert_child(&TreePath::root(), 3, OutlineNode::group(title("X")))
            .unwrap_err();
        assert_eq!(err, TreeError::IndexOutOfRange { index: 3, len: 2 });
        // tree unchanged
        assert_eq!(tree.node_count(), 4);
    }

    #[test]
    fn insert_child_unknown_parent() {
        let mut tree = sample_tree();
        let missing = TreePath::parse("9").unwrap();
        let err = tree
            .insert_child(&missing, 0, OutlineNode::group(title("X")))
            .unwrap_err();
        assert!(matches!(err, TreeError::UnknownParent(_)));
    }

    #[test]
    fn detach_child_returns_subtree() {
        let mut tree = sample_tree();
        let detached = tree.detach_child(&TreePath::root(), 0).unwrap();
        assert_eq!(detached.title().as_str(), "Intro");
        assert_eq!(detached.subtree_size(), 3);
        assert_eq!(tree.roots().len(), 1);
        assert_eq!(tree.roots()[0].title().as_str(), "Appendix");
    }

    #[test]
    fn detach_child_index_out_of_range() {
        let mut tree = sample_tree();
        let err = tree.detach_child(&TreePath::root(), 2).unwrap_err();
        assert_eq!(err, TreeError::IndexOutOfRange { index: 2, len: 2 });
        assert_eq!(tree.node_count(), 4);
    }

    #[test]
    fn walk_is_preorder_document_order() {
        let tree = sample_tree();
        let titles: Vec<_> = tree
            .walk()
            .into_iter()
            .map(|(path, node)| (path.to_string(), node.title().as_str().to_string()))
            .collect();
        assert_eq!(
            titles,
            vec![
                ("1".to_string(), "Intro".to_string()),
                ("1>1".to_string(), "Methods".to_string()),
                ("1>2".to_string(), "Data".to_string()),
                ("2".to_string(), "Appendix".to_string()),
            ]
        );
    }

    #[test]
    fn serde_shape_omits_empty_fields() {
        let tree = sample_tree();
        let json = serde_json::to_value(&tree).unwrap();
        // groups carry no "page", childless nodes no "children"
        assert_eq!(json[0]["children"][1]["title"], "Data");
        assert!(json[0]["children"][1].get("page").is_none());
        assert!(json[1].get("children").is_none());

        let back: OutlineTree = serde_json::from_value(json).unwrap();
        assert_eq!(back, tree);
    }
}
