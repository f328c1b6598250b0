//! core
//!
//! The outline tree engine: data model, addressing, mutation, and export
//! validation.
//!
//! # Modules
//!
//! - [`types`] - Strong types: Title, LogicalPage, PageOffset, NodeId
//! - [`path`] - Positional tree paths (`1>3>2`)
//! - [`node`] - Outline node/tree model and structural primitives
//! - [`resolve`] - Dual-scheme addressing: ids and paths
//! - [`edit`] - Mutation operations with transactional guarantees
//! - [`export`] - Save-time validation and destination building
//! - [`fingerprint`] - Content hash for unsaved-change detection
//!
//! # Design Principles
//!
//! - Strong typing prevents invalid states at compile time
//! - Paths and ids are derived from current tree order, never cached
//! - A failed operation leaves the tree exactly as it was

pub mod edit;
pub mod export;
pub mod fingerprint;
pub mod node;
pub mod path;
pub mod resolve;
pub mod types;
