//! TypeScript scanner/tokenizer for the tydoc documentation extractor.
//!
//! This crate provides the lexical analysis phase:
//! - `SyntaxKind` - Token and node kinds
//! - `ScannerState` - Tokenizer state machine with save/restore lookahead

pub mod scanner;
pub mod syntax_kind;

pub use scanner::{ScannerSnapshot, ScannerState};
pub use syntax_kind::SyntaxKind;
