//! Comment ranges and JSDoc text cleanup.
//!
//! Comments are not part of the AST; the scanner records their positions as
//! it tokenizes and the doc-comment lookup service associates them with
//! nodes afterwards.

use serde::{Deserialize, Serialize};

/// A range representing a comment in the source text.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CommentRange {
    /// Start position (byte offset)
    pub pos: u32,
    /// End position (byte offset)
    pub end: u32,
    /// Whether this is a multi-line comment
    pub is_multi_line: bool,
}

impl CommentRange {
    pub fn new(pos: u32, end: u32, is_multi_line: bool) -> Self {
        CommentRange {
            pos,
            end,
            is_multi_line,
        }
    }

    /// Get the comment text from source.
    pub fn get_text<'a>(&self, source: &'a str) -> &'a str {
        let start = self.pos as usize;
        let end = self.end as usize;
        if end <= source.len() && start < end {
            &source[start..end]
        } else {
            ""
        }
    }
}

/// Check if a comment is a JSDoc comment (`/** ... */` but not `/*** ... */`).
pub fn is_jsdoc_comment(comment: &CommentRange, source: &str) -> bool {
    let text = comment.get_text(source);
    text.starts_with("/**") && !text.starts_with("/***")
}

/// Extract the content of a JSDoc comment (without the delimiters).
///
/// Strips the `/**` and `*/` fences and the leading `*` from each
/// continuation line, then trims the whole block.
pub fn get_jsdoc_content(comment: &CommentRange, source: &str) -> String {
    let text = comment.get_text(source);
    if text.starts_with("/**") && text.ends_with("*/") && text.len() >= 5 {
        let inner = &text[3..text.len() - 2];
        inner
            .lines()
            .map(|line| {
                let trimmed = line.trim_start();
                if let Some(rest) = trimmed.strip_prefix('*') {
                    rest.trim_start()
                } else {
                    trimmed
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
            .trim()
            .to_string()
    } else {
        text.to_string()
    }
}

/// Find the leading comment directly attached to the node starting at `pos`.
///
/// Uses pre-computed comment ranges (cached during scanning) instead of
/// rescanning the source. A comment counts as attached when at most two
/// newlines separate it from the node start, matching the usual
/// `/** comment */\nfunction` layout.
pub fn get_leading_comment<'a>(
    comments: &'a [CommentRange],
    pos: u32,
    source: &str,
) -> Option<&'a CommentRange> {
    if comments.is_empty() {
        return None;
    }

    // Comments are sorted by start position; find the last one ending at or
    // before `pos`.
    let idx = comments.partition_point(|c| c.end <= pos);
    if idx == 0 {
        return None;
    }
    let comment = &comments[idx - 1];

    let text_between = &source[comment.end as usize..pos as usize];
    if !text_between.chars().all(char::is_whitespace) {
        return None;
    }
    let newline_count = text_between.bytes().filter(|b| *b == b'\n').count();
    if newline_count > 2 {
        return None;
    }
    Some(comment)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range_of(source: &str, needle: &str) -> CommentRange {
        let pos = source.find(needle).unwrap() as u32;
        CommentRange::new(
            pos,
            pos + needle.len() as u32,
            needle.starts_with("/*"),
        )
    }

    #[test]
    fn jsdoc_content_strips_fences_and_stars() {
        let source = "/** Some values representing basic mathematical operations. */";
        let comment = CommentRange::new(0, source.len() as u32, true);
        assert_eq!(
            get_jsdoc_content(&comment, source),
            "Some values representing basic mathematical operations."
        );
    }

    #[test]
    fn jsdoc_content_handles_multi_line_bodies() {
        let source = "/**\n * first line\n * second line\n */";
        let comment = CommentRange::new(0, source.len() as u32, true);
        assert_eq!(get_jsdoc_content(&comment, source), "first line\nsecond line");
    }

    #[test]
    fn triple_star_comments_are_not_jsdoc() {
        let source = "/*** not docs */";
        let comment = CommentRange::new(0, source.len() as u32, true);
        assert!(!is_jsdoc_comment(&comment, source));
    }

    #[test]
    fn leading_comment_requires_adjacency() {
        let source = "/** docs */\n\n\n\nenum Operator {}";
        let comment = range_of(source, "/** docs */");
        let pos = source.find("enum").unwrap() as u32;
        // Four newlines between comment and declaration: not attached.
        assert!(get_leading_comment(&[comment], pos, source).is_none());
    }

    #[test]
    fn leading_comment_finds_attached_comment() {
        let source = "/** docs */\nenum Operator {}";
        let comment = range_of(source, "/** docs */");
        let pos = source.find("enum").unwrap() as u32;
        let found = get_leading_comment(std::slice::from_ref(&comment), pos, source);
        assert_eq!(found, Some(&comment));
    }

    #[test]
    fn leading_comment_ignores_comment_followed_by_code() {
        let source = "/** docs */ const x = 1;\nenum Operator {}";
        let comment = range_of(source, "/** docs */");
        let pos = source.find("enum").unwrap() as u32;
        assert!(get_leading_comment(&[comment], pos, source).is_none());
    }
}
