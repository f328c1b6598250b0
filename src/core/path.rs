//! core::path
//!
//! Positional tree paths.
//!
//! A path addresses a node by its position among siblings at each level:
//! `1>3>2` is the second child of the third child of the first top-level
//! node. Segments are 1-based. Paths are a derived view: they are computed
//! from current sibling order at resolution time and never cached across
//! mutations.
//!
//! The empty path is the implicit root container. It cannot be written in
//! path syntax (the resolver's root aliases are the only way to name it) and
//! is only valid as an insertion or move destination.
//!
//! # Examples
//!
//! ```
//! use spine::core::path::TreePath;
//!
//! let path = TreePath::parse("1>3>2").unwrap();
//! assert_eq!(path.depth(), 3);
//! assert_eq!(path.to_string(), "1>3>2");
//!
//! let parent = path.parent().unwrap();
//! assert_eq!(parent.to_string(), "1>3");
//! assert!(path.starts_with(&parent));
//!
//! assert!(TreePath::parse("").is_err());
//! assert!(TreePath::parse("1>0").is_err());
//! ```

use thiserror::Error;

/// Errors from path parsing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PathError {
    #[error("path must look like 1>3>2 with positive integers, got '{0}'")]
    Malformed(String),
}

/// A positional address: 1-based sibling indices, one per tree level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TreePath(Vec<usize>);

impl TreePath {
    /// The implicit root container (empty path).
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Build a path from 1-based segments.
    ///
    /// # Errors
    ///
    /// Returns `PathError::Malformed` if any segment is zero.
    pub fn from_segments(segments: Vec<usize>) -> Result<Self, PathError> {
        if segments.contains(&0) {
            return Err(PathError::Malformed("0".into()));
        }
        Ok(Self(segments))
    }

    /// Parse a path string like `1>3>2`.
    ///
    /// Segment whitespace is tolerated (`1 > 3` parses). At least one
    /// segment is required; the root is not expressible in path syntax.
    ///
    /// # Errors
    ///
    /// Returns `PathError::Malformed` on empty input or any segment that is
    /// not a positive integer.
    pub fn parse(text: &str) -> Result<Self, PathError> {
        let malformed = || PathError::Malformed(text.to_string());
        if text.trim().is_empty() {
            return Err(malformed());
        }
        let mut segments = Vec::new();
        for part in text.split('>') {
            let part = part.trim();
            if part.is_empty() || !part.chars().all(|c| c.is_ascii_digit()) {
                return Err(malformed());
            }
            let segment: usize = part.parse().map_err(|_| malformed())?;
            if segment == 0 {
                return Err(malformed());
            }
            segments.push(segment);
        }
        Ok(Self(segments))
    }

    /// Whether this is the implicit root.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// The 1-based segments, outermost level first.
    pub fn segments(&self) -> &[usize] {
        &self.0
    }

    /// Number of levels below the root.
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// The path of this node's parent, or `None` for the root.
    pub fn parent(&self) -> Option<Self> {
        if self.is_root() {
            return None;
        }
        Some(Self(self.0[..self.0.len() - 1].to_vec()))
    }

    /// The 1-based position among siblings, or `None` for the root.
    pub fn position(&self) -> Option<usize> {
        self.0.last().copied()
    }

    /// Extend this path by one level with a 1-based child index.
    pub fn child(&self, index: usize) -> Self {
        debug_assert!(index > 0);
        let mut segments = self.0.clone();
        segments.push(index);
        Self(segments)
    }

    /// Whether `prefix` addresses this node or one of its ancestors.
    ///
    /// `a.starts_with(&b)` is the subtree-containment test: true exactly
    /// when `a` lies inside the subtree rooted at `b` (or is `b` itself).
    pub fn starts_with(&self, prefix: &TreePath) -> bool {
        self.0.len() >= prefix.0.len() && self.0[..prefix.0.len()] == prefix.0[..]
    }
}

impl std::fmt::Display for TreePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_root() {
            return write!(f, "/");
        }
        let mut first = true;
        for segment in &self.0 {
            if !first {
                write!(f, ">")?;
            }
            write!(f, "{segment}")?;
            first = false;
        }
        Ok(())
    }
}
