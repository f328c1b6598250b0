//! doc
//!
//! Document collaborator abstraction.
//!
//! The engine edits an in-memory outline tree; documents own the file
//! format. This module defines the seam between them:
//!
//! - [`Document`] - the trait a document adapter implements
//! - [`JsonDocument`] - the built-in JSON sidecar adapter
//! - [`MemoryDocument`] - in-memory implementation for tests
//! - [`factory::open_document`] - adapter selection by extension

pub mod factory;
mod json;
mod memory;
mod traits;

pub use json::JsonDocument;
pub use memory::MemoryDocument;
pub use traits::{flatten, rebuild, Document, DocumentError, OutlineEntry, OutlineItem};
