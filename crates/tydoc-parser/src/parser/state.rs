//! Parser state - token management, diagnostics, and lookahead.

use tracing::trace;
use tydoc_scanner::{ScannerState, SyntaxKind};

use super::NodeIndex;
use super::node::IdentifierData;
use super::node_arena::NodeArena;

/// A parse-time diagnostic with a source position.
#[derive(Clone, Debug)]
pub struct ParseDiagnostic {
    pub start: u32,
    pub length: u32,
    pub message: String,
}

/// Recursive-descent parser over one source file.
pub struct ParserState {
    pub(crate) scanner: ScannerState,
    pub(crate) arena: NodeArena,
    pub(crate) current_token: SyntaxKind,
    pub(crate) file_name: String,
    pub(crate) parse_diagnostics: Vec<ParseDiagnostic>,
}

impl ParserState {
    pub fn new(file_name: String, source: String) -> ParserState {
        ParserState {
            scanner: ScannerState::new(source),
            arena: NodeArena::new(),
            current_token: SyntaxKind::Unknown,
            file_name,
            parse_diagnostics: Vec::new(),
        }
    }

    /// Diagnostics collected so far (empty for a clean parse).
    pub fn get_diagnostics(&self) -> &[ParseDiagnostic] {
        &self.parse_diagnostics
    }

    pub fn get_arena(&self) -> &NodeArena {
        &self.arena
    }

    /// Take ownership of the AST, consuming the parser.
    pub fn into_arena(mut self) -> NodeArena {
        self.arena.set_interner(self.scanner.interner().clone());
        self.arena
    }

    // =========================================================================
    // Token management
    // =========================================================================

    pub(crate) fn next_token(&mut self) -> SyntaxKind {
        self.current_token = self.scanner.scan();
        self.current_token
    }

    #[inline]
    pub(crate) fn is_token(&self, kind: SyntaxKind) -> bool {
        self.current_token == kind
    }

    pub(crate) fn token_pos(&self) -> u32 {
        self.scanner.token_pos()
    }

    pub(crate) fn token_end(&self) -> u32 {
        self.scanner.token_end()
    }

    /// Consume the expected token, or record a diagnostic and stay put.
    pub(crate) fn parse_expected(&mut self, kind: SyntaxKind) -> bool {
        if self.is_token(kind) {
            self.next_token();
            true
        } else {
            let shown = match kind.keyword_text() {
                Some(text) => text.to_string(),
                None => format!("{kind:?}"),
            };
            self.error_at_current(&format!("'{shown}' expected"));
            false
        }
    }

    /// Consume the token if present.
    pub(crate) fn parse_optional(&mut self, kind: SyntaxKind) -> bool {
        if self.is_token(kind) {
            self.next_token();
            true
        } else {
            false
        }
    }

    pub(crate) fn error_at_current(&mut self, message: &str) {
        let start = self.token_pos();
        let length = self.token_end().saturating_sub(start).max(1);
        trace!(file = %self.file_name, start, text = message, "parse diagnostic");
        self.parse_diagnostics.push(ParseDiagnostic {
            start,
            length,
            message: message.to_string(),
        });
    }

    /// Identifiers plus keywords usable as names (`type`, `from`, `get`...).
    pub(crate) fn is_identifier_or_keyword(&self) -> bool {
        self.is_token(SyntaxKind::Identifier) || self.current_token.is_keyword()
    }

    /// Run `f` against the upcoming tokens without consuming them.
    pub(crate) fn look_ahead<T>(&mut self, f: impl FnOnce(&mut ParserState) -> T) -> T {
        let snapshot = self.scanner.save_state();
        let current = self.current_token;
        let result = f(self);
        self.scanner.restore_state(snapshot);
        self.current_token = current;
        result
    }

    // =========================================================================
    // Shared leaf parsers
    // =========================================================================

    /// Parse an identifier (keywords allowed when `allow_keywords`).
    /// On a mismatch, records a diagnostic and synthesizes an empty
    /// identifier so callers always get a node to hang structure on.
    pub(crate) fn parse_identifier_name(&mut self, allow_keywords: bool) -> NodeIndex {
        let matches = if allow_keywords {
            self.is_identifier_or_keyword()
        } else {
            self.is_token(SyntaxKind::Identifier)
        };
        if matches {
            let pos = self.token_pos();
            let end = self.token_end();
            let atom = self.scanner.token_atom();
            let escaped_text = self.scanner.token_value_ref().to_string();
            let index = self.arena.add_identifier(pos, end, IdentifierData { atom, escaped_text });
            self.next_token();
            index
        } else {
            self.error_at_current("Identifier expected");
            let pos = self.token_pos();
            self.arena.add_identifier(
                pos,
                pos,
                IdentifierData {
                    atom: tydoc_common::interner::Atom::NONE,
                    escaped_text: String::new(),
                },
            )
        }
    }

    pub(crate) fn parse_identifier(&mut self) -> NodeIndex {
        self.parse_identifier_name(false)
    }

    /// Placeholder node for error recovery.
    pub(crate) fn error_node(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.arena.add_token(SyntaxKind::Unknown, pos, pos)
    }
}
