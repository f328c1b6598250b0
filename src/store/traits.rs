//! store::traits
//!
//! Offset storage trait definition.
//!
//! # Design
//!
//! The `OffsetStore` trait is a plain key-value interface from a stable
//! document identifier (the absolute file path) to that document's page
//! offset. Missing keys read as "no stored offset"; callers fall back to
//! zero. No schema versioning is required.
//!
//! # Example
//!
//! ```ignore
//! use spine::store::{OffsetStore, StoreError};
//! use spine::core::types::PageOffset;
//!
//! fn offset_for(store: &dyn OffsetStore, key: &str) -> Result<PageOffset, StoreError> {
//!     Ok(store.load(key)?.unwrap_or_default())
//! }
//! ```

use thiserror::Error;

use crate::core::types::PageOffset;

/// Errors from offset storage operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Failed to read from the store.
    #[error("failed to read offset store: {0}")]
    ReadError(String),

    /// Failed to write to the store.
    #[error("failed to write offset store: {0}")]
    WriteError(String),
}

/// Trait for offset storage providers.
///
/// Keys are stable document identifiers (absolute file paths), stored
/// as-is without interpretation.
pub trait OffsetStore: Send + Sync {
    /// Load the stored offset for a document.
    ///
    /// Returns `Ok(None)` when no offset has been stored for the key.
    fn load(&self, key: &str) -> Result<Option<PageOffset>, StoreError>;

    /// Store the offset for a document, replacing any previous value.
    fn save(&self, key: &str, offset: PageOffset) -> Result<(), StoreError>;

    /// Drop the stored offset for a document. Removing a missing key is
    /// not an error.
    fn forget(&self, key: &str) -> Result<(), StoreError>;
}
