//! store
//!
//! Per-document offset persistence.
//!
//! # Responsibilities
//!
//! - Map stable document identifiers (absolute file paths) to stored
//!   [`PageOffset`](crate::core::types::PageOffset) values
//! - Survive across sessions in a flat TOML file
//!
//! The session loads a document's offset before importing its outline and
//! writes the store back whenever the offset changes or the document is
//! saved under a new path.

mod file_store;
mod traits;

pub use file_store::FileOffsetStore;
pub use traits::{OffsetStore, StoreError};

use std::path::Path;

/// Derive the store key for a document: its absolute path.
///
/// Relative paths are resolved against the current directory; the path
/// does not need to exist.
pub fn document_key(path: &Path) -> String {
    std::path::absolute(path)
        .unwrap_or_else(|_| path.to_path_buf())
        .to_string_lossy()
        .into_owned()
}
