//! core::fingerprint
//!
//! Content hash over the session's editable state, used for unsaved-change
//! detection.
//!
//! The session fingerprints the tree and offset after open and after each
//! successful save; `dirty` is simply "current fingerprint differs from the
//! baseline". Unlike a hand-maintained dirty flag, the hash cannot drift
//! out of sync with the actual state, and an edit that is later reverted
//! by hand (or a no-op move) reads as clean.

use sha2::{Digest, Sha256};

use super::node::OutlineTree;
use super::types::PageOffset;

/// A stable hash over the outline tree and offset.
///
/// # Example
///
/// ```
/// use spine::core::fingerprint::TreeFingerprint;
/// use spine::core::node::OutlineTree;
/// use spine::core::types::PageOffset;
///
/// let tree = OutlineTree::new();
/// let a = TreeFingerprint::compute(&tree, PageOffset::zero());
/// let b = TreeFingerprint::compute(&tree, PageOffset::zero());
/// assert_eq!(a, b);
///
/// let shifted = TreeFingerprint::compute(&tree, PageOffset::new(2));
/// assert_ne!(a, shifted);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TreeFingerprint(String);

impl TreeFingerprint {
    /// Compute the fingerprint of a tree plus its offset.
    pub fn compute(tree: &OutlineTree, offset: PageOffset) -> Self {
        let json = serde_json::to_vec(tree).expect("outline tree serializes to JSON");
        let mut hasher = Sha256::new();
        hasher.update(&json);
        hasher.update(b"\0");
        hasher.update(offset.get().to_le_bytes());
        Self(hex::encode(hasher.finalize()))
    }

    /// Get the fingerprint as a hex string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TreeFingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
