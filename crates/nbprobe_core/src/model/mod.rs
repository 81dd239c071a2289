//! Notebook document model.
//!
//! # Responsibility
//! - Define the canonical nbformat 4.4 document and cell structures.
//! - Keep one typed shape shared by every write strategy.
//!
//! # Invariants
//! - Every document produced by this crate deserializes back into
//!   `Notebook` without loss of required fields.
//! - A document has no identity beyond the path it is written to.

pub mod notebook;
