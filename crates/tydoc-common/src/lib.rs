//! Common types and utilities for the tydoc documentation extractor.
//!
//! This crate provides foundational types used across all tydoc crates:
//! - String interning (`Atom`, `Interner`)
//! - Comment range extraction and JSDoc text cleanup

// String interning for identifier deduplication
pub mod interner;
pub use interner::{Atom, Interner};

// Comment parsing utilities
pub mod comments;
pub use comments::CommentRange;
