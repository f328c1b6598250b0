//! core::resolve
//!
//! Dual-scheme node addressing: session ids and positional paths.
//!
//! # Resolution rules
//!
//! - `n<digits>` is an id: the node at that 1-based pre-order ordinal.
//! - `0`, `root`, and `/` are root aliases. The root resolves, but only as
//!   an insertion or move destination; mutation operations reject it.
//! - Everything else parses as a path (`1>3>2`). A bare positive integer is
//!   always the first segment of a path, never an id: the fixed `n` prefix
//!   makes the two schemes syntactically disjoint, so resolution is a single
//!   deterministic parse step with no runtime guessing.
//!
//! Ids and paths are both derived from current tree order at resolution
//! time. After any structural edit, re-resolve; nothing here is cached.
//!
//! # Examples
//!
//! ```
//! use spine::core::node::{OutlineNode, OutlineTree};
//! use spine::core::resolve::{resolve, RefToken};
//! use spine::core::types::{LogicalPage, Title};
//!
//! let tree = OutlineTree::from_roots(vec![OutlineNode::leaf(
//!     Title::new("Intro").unwrap(),
//!     LogicalPage::new(1).unwrap(),
//! )]);
//!
//! // Bare integer: a path
//! let path = resolve(&tree, &RefToken::parse("1").unwrap()).unwrap();
//! assert_eq!(path.to_string(), "1");
//!
//! // Id: same node via its pre-order ordinal
//! let by_id = resolve(&tree, &RefToken::parse("n1").unwrap()).unwrap();
//! assert_eq!(by_id, path);
//! ```

use thiserror::Error;

use super::node::OutlineTree;
use super::path::TreePath;
use super::types::NodeId;

/// Errors from reference resolution.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    /// An id token that does not name a node in the current tree.
    #[error("no node with id {0}")]
    NodeNotFound(NodeId),

    /// A path segment that falls outside its level's children list.
    #[error("path segment {segment} at level {level} is out of range ({available} siblings at that level)")]
    PathNotFound {
        level: usize,
        segment: usize,
        available: usize,
    },

    /// A token that is neither an id, a path, nor a root alias.
    #[error("invalid reference '{token}': expected an id like n3, a path like 1>3>2, or root")]
    BadToken { token: String },
}

/// A parsed node reference, before resolution against a tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefToken {
    /// The implicit root container (`0`, `root`, or `/`).
    Root,
    /// A session id (`n<k>`).
    Id(NodeId),
    /// A positional path (`1>3>2`).
    Path(TreePath),
}

impl RefToken {
    /// Parse a reference token.
    ///
    /// # Errors
    ///
    /// Returns `ResolveError::BadToken` if the token fits none of the three
    /// syntactic forms.
    pub fn parse(token: &str) -> Result<Self, ResolveError> {
        let trimmed = token.trim();
        if matches!(trimmed, "0" | "root" | "/") {
            return Ok(RefToken::Root);
        }
        if let Some(rest) = trimmed.strip_prefix('n') {
            if !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit()) {
                return NodeId::parse(trimmed).map(RefToken::Id).map_err(|_| {
                    ResolveError::BadToken {
                        token: token.to_string(),
                    }
                });
            }
        }
        TreePath::parse(trimmed)
            .map(RefToken::Path)
            .map_err(|_| ResolveError::BadToken {
                token: token.to_string(),
            })
    }
}

impl std::fmt::Display for RefToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RefToken::Root => write!(f, "/"),
            RefToken::Id(id) => write!(f, "{id}"),
            RefToken::Path(path) => write!(f, "{path}"),
        }
    }
}

/// Resolve a parsed token against the current tree.
///
/// Returns the node's freshly computed path; the root alias resolves to the
/// root path. The caller decides whether the root is acceptable in its
/// position (it is valid only as a destination).
///
/// # Errors
///
/// `ResolveError::NodeNotFound` for an id not present in the tree;
/// `ResolveError::PathNotFound` for a path segment outside its level,
/// naming the level and the number of siblings available there.
pub fn resolve(tree: &OutlineTree, token: &RefToken) -> Result<TreePath, ResolveError> {
    match token {
        RefToken::Root => Ok(TreePath::root()),
        RefToken::Id(id) => {
            let ordinal = id.ordinal() as usize;
            let nodes = tree.walk();
            nodes
                .get(ordinal - 1)
                .map(|(path, _)| path.clone())
                .ok_or(ResolveError::NodeNotFound(*id))
        }
        RefToken::Path(path) => {
            let mut prefix = TreePath::root();
            for (level, &segment) in path.segments().iter().enumerate() {
                let available = tree
                    .children_of(&prefix)
                    .map(<[_]>::len)
                    .unwrap_or_default();
                if segment > available {
                    return Err(ResolveError::PathNotFound {
                        level: level + 1,
                        segment,
                        available,
                    });
                }
                prefix = prefix.child(segment);
            }
            Ok(prefix)
        }
    }
}

/// Parse and resolve a raw token in one step.
pub fn resolve_token(tree: &OutlineTree, token: &str) -> Result<TreePath, ResolveError> {
    resolve(tree, &RefToken::parse(token)?)
}

/// The current session id of the node at `path`, derived from its 1-based
/// pre-order ordinal. `None` if the path does not address a node.
pub fn id_of(tree: &OutlineTree, path: &TreePath) -> Option<NodeId> {
    tree.walk()
        .iter()
        .position(|(p, _)| p == path)
        .and_then(|i| NodeId::from_ordinal(i as u32 + 1).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::node::OutlineNode;
    use crate::core::types::{LogicalPage, Title};

    fn title(text: &str) -> Title {
        Title::new(text).unwrap()
    }

    fn page(n: u32) -> LogicalPage {
        LogicalPage::new(n).unwrap()
    }

    /// Intro(1) { Methods(4), Data { Tables(5) } } Appendix(9)
    fn sample_tree() -> OutlineTree {
        let mut data = OutlineNode::group(title("Data"));
        data.children_mut()
            .push(OutlineNode::leaf(title("Tables"), page(5)));
        let mut intro = OutlineNode::leaf(title("Intro"), page(1));
        intro
            .children_mut()
            .push(OutlineNode::leaf(title("Methods"), page(4)));
        intro.children_mut().push(data);
        OutlineTree::from_roots(vec![intro, OutlineNode::leaf(title("Appendix"), page(9))])
    }

    mod token_parsing {
        use super::*;

        #[test]
        fn root_aliases() {
            assert_eq!(RefToken::parse("0").unwrap(), RefToken::Root);
            assert_eq!(RefToken::parse("root").unwrap(), RefToken::Root);
            assert_eq!(RefToken::parse("/").unwrap(), RefToken::Root);
        }

        #[test]
        fn id_tokens() {
            assert_eq!(
                RefToken::parse("n3").unwrap(),
                RefToken::Id(NodeId::parse("n3").unwrap())
            );
        }

        #[test]
        fn bare_integer_is_a_path_never_an_id() {
            let token = RefToken::parse("3").unwrap();
            assert_eq!(
                token,
                RefToken::Path(TreePath::parse("3").unwrap()),
                "bare integers must parse as single-segment paths"
            );
        }

        #[test]
        fn multi_segment_path() {
            assert_eq!(
                RefToken::parse("1>3>2").unwrap(),
                RefToken::Path(TreePath::parse("1>3>2").unwrap())
            );
        }

        #[test]
        fn bad_tokens_rejected() {
            for bad in ["", "  ", "n0", "nope", "x>1", "1>-2", "n1>2"] {
                assert!(
                    matches!(RefToken::parse(bad), Err(ResolveError::BadToken { .. })),
                    "expected BadToken for '{bad}'"
                );
            }
        }
    }

    mod resolution {
        use super::*;

        #[test]
        fn path_resolves_to_itself_when_in_range() {
            let tree = sample_tree();
            let path = resolve_token(&tree, "1>2>1").unwrap();
            assert_eq!(path.to_string(), "1>2>1");
            assert_eq!(tree.node(&path).unwrap().title().as_str(), "Tables");
        }

        #[test]
        fn ids_follow_preorder() {
            let tree = sample_tree();
            // Pre-order: n1 Intro, n2 Methods, n3 Data, n4 Tables, n5 Appendix
            for (token, expected) in [
                ("n1", "Intro"),
                ("n2", "Methods"),
                ("n3", "Data"),
                ("n4", "Tables"),
                ("n5", "Appendix"),
            ] {
                let path = resolve_token(&tree, token).unwrap();
                assert_eq!(tree.node(&path).unwrap().title().as_str(), expected);
            }
        }

        #[test]
        fn unknown_id_is_node_not_found() {
            let tree = sample_tree();
            assert_eq!(
                resolve_token(&tree, "n6").unwrap_err(),
                ResolveError::NodeNotFound(NodeId::parse("n6").unwrap())
            );
        }

        #[test]
        fn out_of_range_segment_names_level_and_range() {
            let tree = sample_tree();
            let err = resolve_token(&tree, "1>5").unwrap_err();
            assert_eq!(
                err,
                ResolveError::PathNotFound {
                    level: 2,
                    segment: 5,
                    available: 2,
                }
            );
            let msg = err.to_string();
            assert!(msg.contains("level 2"));
            assert!(msg.contains("2 siblings"));
        }

        #[test]
        fn descending_into_a_childless_leaf_fails() {
            let tree = sample_tree();
            let err = resolve_token(&tree, "2>1").unwrap_err();
            assert_eq!(
                err,
                ResolveError::PathNotFound {
                    level: 2,
                    segment: 1,
                    available: 0,
                }
            );
        }

        #[test]
        fn root_alias_resolves_to_root_path() {
            let tree = sample_tree();
            for alias in ["0", "root", "/"] {
                assert!(resolve_token(&tree, alias).unwrap().is_root());
            }
        }

        #[test]
        fn empty_tree_resolves_nothing_but_root() {
            let tree = OutlineTree::new();
            assert!(resolve_token(&tree, "root").unwrap().is_root());
            assert!(resolve_token(&tree, "1").is_err());
            assert!(resolve_token(&tree, "n1").is_err());
        }
    }

    mod id_derivation {
        use super::*;

        #[test]
        fn id_of_matches_resolution() {
            let tree = sample_tree();
            for (path, _) in tree.walk() {
                let id = id_of(&tree, &path).unwrap();
                let resolved = resolve_token(&tree, &id.to_string()).unwrap();
                assert_eq!(resolved, path);
            }
        }

        #[test]
        fn id_of_root_is_none() {
            let tree = sample_tree();
            assert!(id_of(&tree, &TreePath::root()).is_none());
        }

        #[test]
        fn id_of_missing_path_is_none() {
            let tree = sample_tree();
            assert!(id_of(&tree, &TreePath::parse("9").unwrap()).is_none());
        }
    }
}
