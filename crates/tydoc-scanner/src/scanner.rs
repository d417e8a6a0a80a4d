//! Tokenizer state machine.
//!
//! The scanner owns the source text and the string interner, and records
//! comment ranges as it encounters them so documentation lookup never has to
//! rescan the file. Lookahead works through `save_state`/`restore_state`
//! snapshots; comment collection is guarded by a high-water mark so a
//! restored scan does not record the same comment twice.

use std::sync::Arc;

use tydoc_common::comments::CommentRange;
use tydoc_common::interner::{Atom, Interner};

use crate::syntax_kind::SyntaxKind;

/// Restorable scanner position for lookahead.
#[derive(Clone, Debug)]
pub struct ScannerSnapshot {
    pos: usize,
    token: SyntaxKind,
    token_start: usize,
    token_value: String,
}

/// Tokenizer over one source file.
pub struct ScannerState {
    source: Arc<str>,
    pos: usize,
    token: SyntaxKind,
    token_start: usize,
    token_value: String,
    interner: Interner,
    comments: Vec<CommentRange>,
    comment_high_water: usize,
}

impl ScannerState {
    pub fn new(source: String) -> ScannerState {
        ScannerState {
            source: Arc::from(source),
            pos: 0,
            token: SyntaxKind::Unknown,
            token_start: 0,
            token_value: String::new(),
            interner: Interner::new(),
            comments: Vec::new(),
            comment_high_water: 0,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn token(&self) -> SyntaxKind {
        self.token
    }

    /// Start offset of the current token (after leading trivia).
    pub fn token_pos(&self) -> u32 {
        self.token_start as u32
    }

    /// End offset of the current token.
    pub fn token_end(&self) -> u32 {
        self.pos as u32
    }

    /// Text value of the current token (identifier text, unquoted string
    /// value, or raw numeric text).
    pub fn token_value_ref(&self) -> &str {
        &self.token_value
    }

    /// Intern the current token value.
    pub fn token_atom(&mut self) -> Atom {
        // Split borrow: the interner cannot take &self.token_value directly.
        let value = std::mem::take(&mut self.token_value);
        let atom = self.interner.intern(&value);
        self.token_value = value;
        atom
    }

    pub fn source_text(&self) -> &str {
        &self.source
    }

    pub fn source_text_arc(&self) -> Arc<str> {
        Arc::clone(&self.source)
    }

    pub fn interner(&self) -> &Interner {
        &self.interner
    }

    /// Comment ranges collected so far, sorted by position.
    pub fn comments(&self) -> &[CommentRange] {
        &self.comments
    }

    pub fn take_comments(&mut self) -> Vec<CommentRange> {
        std::mem::take(&mut self.comments)
    }

    // =========================================================================
    // Lookahead
    // =========================================================================

    pub fn save_state(&self) -> ScannerSnapshot {
        ScannerSnapshot {
            pos: self.pos,
            token: self.token,
            token_start: self.token_start,
            token_value: self.token_value.clone(),
        }
    }

    pub fn restore_state(&mut self, snapshot: ScannerSnapshot) {
        self.pos = snapshot.pos;
        self.token = snapshot.token;
        self.token_start = snapshot.token_start;
        self.token_value = snapshot.token_value;
    }

    // =========================================================================
    // Scanning
    // =========================================================================

    /// Skip a `#!` line at the very start of the file.
    pub fn scan_shebang_trivia(&mut self) {
        if self.pos == 0 && self.source.as_bytes().starts_with(b"#!") {
            while self.pos < self.source.len() && self.byte(self.pos) != b'\n' {
                self.pos += 1;
            }
        }
    }

    /// Advance to the next token and return its kind.
    pub fn scan(&mut self) -> SyntaxKind {
        self.token_value.clear();
        self.skip_trivia();
        self.token_start = self.pos;

        let Some(ch) = self.peek_byte() else {
            self.token = SyntaxKind::EndOfFileToken;
            return self.token;
        };

        self.token = match ch {
            b'{' => self.single(SyntaxKind::OpenBraceToken),
            b'}' => self.single(SyntaxKind::CloseBraceToken),
            b'(' => self.single(SyntaxKind::OpenParenToken),
            b')' => self.single(SyntaxKind::CloseParenToken),
            b'[' => self.single(SyntaxKind::OpenBracketToken),
            b']' => self.single(SyntaxKind::CloseBracketToken),
            b';' => self.single(SyntaxKind::SemicolonToken),
            b',' => self.single(SyntaxKind::CommaToken),
            b'<' => self.single(SyntaxKind::LessThanToken),
            b'>' => self.single(SyntaxKind::GreaterThanToken),
            b'?' => self.single(SyntaxKind::QuestionToken),
            b':' => self.single(SyntaxKind::ColonToken),
            b'@' => self.single(SyntaxKind::AtToken),
            b'&' => self.single(SyntaxKind::AmpersandToken),
            b'|' => self.single(SyntaxKind::BarToken),
            b'!' => self.single(SyntaxKind::ExclamationToken),
            b'+' => self.single(SyntaxKind::PlusToken),
            b'-' => self.single(SyntaxKind::MinusToken),
            b'*' => self.single(SyntaxKind::AsteriskToken),
            b'/' => self.single(SyntaxKind::SlashToken),
            b'=' => {
                self.pos += 1;
                if self.peek_byte() == Some(b'>') {
                    self.pos += 1;
                    SyntaxKind::EqualsGreaterThanToken
                } else {
                    SyntaxKind::EqualsToken
                }
            }
            b'.' => {
                if self.source[self.pos..].starts_with("...") {
                    self.pos += 3;
                    SyntaxKind::DotDotDotToken
                } else {
                    self.single(SyntaxKind::DotToken)
                }
            }
            b'\'' | b'"' => self.scan_string(ch),
            b'`' => self.scan_template(),
            b'0'..=b'9' => self.scan_number(),
            b'#' => {
                self.pos += 1;
                if self.peek_byte().is_some_and(is_identifier_start) {
                    self.scan_identifier_tail();
                    SyntaxKind::PrivateIdentifier
                } else {
                    SyntaxKind::Unknown
                }
            }
            c if is_identifier_start(c) => {
                self.scan_identifier_tail();
                SyntaxKind::from_keyword(&self.token_value).unwrap_or(SyntaxKind::Identifier)
            }
            _ => {
                // Skip a whole UTF-8 scalar, not just one byte.
                let ch = self.source[self.pos..].chars().next().unwrap_or('\0');
                self.pos += ch.len_utf8().max(1);
                SyntaxKind::Unknown
            }
        };
        self.token
    }

    fn single(&mut self, kind: SyntaxKind) -> SyntaxKind {
        self.pos += 1;
        kind
    }

    fn byte(&self, at: usize) -> u8 {
        self.source.as_bytes()[at]
    }

    fn peek_byte(&self) -> Option<u8> {
        self.source.as_bytes().get(self.pos).copied()
    }

    fn skip_trivia(&mut self) {
        let len = self.source.len();
        while self.pos < len {
            match self.byte(self.pos) {
                b' ' | b'\t' | b'\r' | b'\n' => self.pos += 1,
                b'/' if self.pos + 1 < len && self.byte(self.pos + 1) == b'/' => {
                    let start = self.pos;
                    while self.pos < len && !matches!(self.byte(self.pos), b'\n' | b'\r') {
                        self.pos += 1;
                    }
                    self.record_comment(start, self.pos, false);
                }
                b'/' if self.pos + 1 < len && self.byte(self.pos + 1) == b'*' => {
                    let start = self.pos;
                    self.pos += 2;
                    let mut terminated = false;
                    while self.pos + 1 < len {
                        if self.byte(self.pos) == b'*' && self.byte(self.pos + 1) == b'/' {
                            self.pos += 2;
                            terminated = true;
                            break;
                        }
                        self.pos += 1;
                    }
                    if !terminated {
                        // Unterminated block comment runs to end of file.
                        self.pos = len;
                    }
                    self.record_comment(start, self.pos, true);
                }
                _ => break,
            }
        }
    }

    fn record_comment(&mut self, start: usize, end: usize, is_multi_line: bool) {
        // Lookahead may rescan trivia; only record past the high-water mark.
        if start >= self.comment_high_water {
            self.comments
                .push(CommentRange::new(start as u32, end as u32, is_multi_line));
            self.comment_high_water = end;
        }
    }

    fn scan_string(&mut self, quote: u8) -> SyntaxKind {
        let bytes = self.source.as_bytes();
        let len = bytes.len();
        self.pos += 1;
        let value_start = self.pos;
        while self.pos < len && bytes[self.pos] != quote {
            if bytes[self.pos] == b'\\' && self.pos + 1 < len {
                self.pos += 1;
            }
            self.pos += 1;
        }
        self.token_value = unescape(&self.source[value_start..self.pos]);
        if self.pos < len {
            self.pos += 1; // closing quote
        }
        SyntaxKind::StringLiteral
    }

    fn scan_template(&mut self) -> SyntaxKind {
        let bytes = self.source.as_bytes();
        let len = bytes.len();
        self.pos += 1;
        let value_start = self.pos;
        while self.pos < len && bytes[self.pos] != b'`' {
            if bytes[self.pos] == b'\\' && self.pos + 1 < len {
                self.pos += 1;
            }
            self.pos += 1;
        }
        self.token_value = self.source[value_start..self.pos].to_string();
        if self.pos < len {
            self.pos += 1;
        }
        SyntaxKind::NoSubstitutionTemplateLiteral
    }

    fn scan_number(&mut self) -> SyntaxKind {
        let bytes = self.source.as_bytes();
        let len = bytes.len();
        let start = self.pos;
        if bytes[self.pos] == b'0'
            && self.pos + 1 < len
            && matches!(bytes[self.pos + 1], b'x' | b'X' | b'b' | b'B' | b'o' | b'O')
        {
            self.pos += 2;
            while self.pos < len && (bytes[self.pos].is_ascii_alphanumeric() || bytes[self.pos] == b'_')
            {
                self.pos += 1;
            }
        } else {
            while self.pos < len
                && (bytes[self.pos].is_ascii_digit() || bytes[self.pos] == b'_' || bytes[self.pos] == b'.')
            {
                // A second dot belongs to a member access or spread, not the number.
                if bytes[self.pos] == b'.' && self.source[start..self.pos].contains('.') {
                    break;
                }
                self.pos += 1;
            }
            if self.pos < len && matches!(bytes[self.pos], b'e' | b'E') {
                self.pos += 1;
                if self.pos < len && matches!(bytes[self.pos], b'+' | b'-') {
                    self.pos += 1;
                }
                while self.pos < len && bytes[self.pos].is_ascii_digit() {
                    self.pos += 1;
                }
            }
        }
        self.token_value = self.source[start..self.pos].to_string();
        SyntaxKind::NumericLiteral
    }

    fn scan_identifier_tail(&mut self) {
        let bytes = self.source.as_bytes();
        let len = bytes.len();
        let start = self.pos;
        while self.pos < len && is_identifier_part(bytes[self.pos]) {
            self.pos += 1;
        }
        self.token_value = self.source[start..self.pos].to_string();
    }
}

fn is_identifier_start(ch: u8) -> bool {
    ch.is_ascii_alphabetic() || ch == b'_' || ch == b'$'
}

fn is_identifier_part(ch: u8) -> bool {
    ch.is_ascii_alphanumeric() || ch == b'_' || ch == b'$'
}

fn unescape(raw: &str) -> String {
    if !raw.contains('\\') {
        return raw.to_string();
    }
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            match chars.next() {
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some('r') => out.push('\r'),
                Some(other) => out.push(other),
                None => {}
            }
        } else {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_tokens(source: &str) -> Vec<SyntaxKind> {
        let mut scanner = ScannerState::new(source.to_string());
        let mut tokens = Vec::new();
        loop {
            let kind = scanner.scan();
            if kind == SyntaxKind::EndOfFileToken {
                break;
            }
            tokens.push(kind);
        }
        tokens
    }

    #[test]
    fn scans_declaration_tokens() {
        use SyntaxKind::*;
        assert_eq!(
            all_tokens("type T = keyof X;"),
            vec![
                TypeKeyword,
                Identifier,
                EqualsToken,
                KeyOfKeyword,
                Identifier,
                SemicolonToken
            ]
        );
    }

    #[test]
    fn scans_arrow_and_spread_compounds() {
        use SyntaxKind::*;
        assert_eq!(
            all_tokens("(...args) => void"),
            vec![
                OpenParenToken,
                DotDotDotToken,
                Identifier,
                CloseParenToken,
                EqualsGreaterThanToken,
                VoidKeyword
            ]
        );
    }

    #[test]
    fn string_value_is_unquoted() {
        let mut scanner = ScannerState::new("\"./point\"".to_string());
        assert_eq!(scanner.scan(), SyntaxKind::StringLiteral);
        assert_eq!(scanner.token_value_ref(), "./point");
    }

    #[test]
    fn numeric_value_keeps_raw_text() {
        let mut scanner = ScannerState::new("3".to_string());
        assert_eq!(scanner.scan(), SyntaxKind::NumericLiteral);
        assert_eq!(scanner.token_value_ref(), "3");
    }

    #[test]
    fn comments_are_recorded_once_despite_lookahead() {
        let mut scanner = ScannerState::new("/** docs */ interface P {}".to_string());
        scanner.scan();
        let snapshot = scanner.save_state();
        scanner.scan();
        scanner.restore_state(snapshot);
        scanner.scan();
        assert_eq!(scanner.comments().len(), 1);
        assert_eq!(scanner.comments()[0].pos, 0);
        assert!(scanner.comments()[0].is_multi_line);
    }

    #[test]
    fn mixed_comment_styles_record_their_ranges() {
        let source = "// line\n/* block */ const";
        let mut scanner = ScannerState::new(source.to_string());
        assert_eq!(scanner.scan(), SyntaxKind::ConstKeyword);
        let comments = scanner.comments();
        assert_eq!(comments.len(), 2);
        assert_eq!((comments[0].pos, comments[0].end), (0, 7));
        assert!(!comments[0].is_multi_line);
        assert_eq!(comments[1].pos as usize, source.find("/*").unwrap());
        assert!(comments[1].is_multi_line);
    }

    #[test]
    fn block_comment_closing_at_eof_keeps_following_token() {
        let mut scanner = ScannerState::new("/**/x".to_string());
        assert_eq!(scanner.scan(), SyntaxKind::Identifier);
        assert_eq!(scanner.token_value_ref(), "x");
        assert_eq!(scanner.comments()[0].end, 4);
    }

    #[test]
    fn unterminated_block_comment_runs_to_end_of_file() {
        let mut scanner = ScannerState::new("/* open".to_string());
        assert_eq!(scanner.scan(), SyntaxKind::EndOfFileToken);
        assert_eq!(scanner.comments()[0].end, 7);
    }

    #[test]
    fn token_positions_exclude_leading_trivia() {
        let source = "  /* c */  enum E {}";
        let mut scanner = ScannerState::new(source.to_string());
        assert_eq!(scanner.scan(), SyntaxKind::EnumKeyword);
        assert_eq!(scanner.token_pos() as usize, source.find("enum").unwrap());
    }

    #[test]
    fn greater_than_is_never_merged() {
        use SyntaxKind::*;
        // Nested generics close with two separate `>` tokens.
        assert_eq!(
            all_tokens("A<B<C>>"),
            vec![
                Identifier,
                LessThanToken,
                Identifier,
                LessThanToken,
                Identifier,
                GreaterThanToken,
                GreaterThanToken
            ]
        );
    }
}
