//! Doc-comment lookup service.

use std::sync::Arc;

use tydoc_common::comments::{
    CommentRange, get_jsdoc_content, get_leading_comment, is_jsdoc_comment,
};

/// Resolves the documentation text for a declaration from the comment
/// ranges cached during scanning. Only `/** */` comments count; everything
/// else yields the empty string.
#[derive(Debug)]
pub struct DocComments {
    comments: Vec<CommentRange>,
    source: Arc<str>,
}

impl DocComments {
    pub fn new(comments: Vec<CommentRange>, source: Arc<str>) -> DocComments {
        DocComments { comments, source }
    }

    /// Documentation for the declaration starting at `pos`, `""` when none
    /// is attached.
    pub fn documentation_for(&self, pos: u32) -> String {
        match get_leading_comment(&self.comments, pos, &self.source) {
            Some(comment) if is_jsdoc_comment(comment, &self.source) => {
                get_jsdoc_content(comment, &self.source)
            }
            _ => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(source: &str) -> DocComments {
        // Collect comment ranges the way the scanner would.
        let mut comments = Vec::new();
        let mut search = 0usize;
        while let Some(start) = source[search..].find("/*") {
            let start = search + start;
            let end = source[start..].find("*/").map(|e| start + e + 2).unwrap();
            comments.push(CommentRange::new(start as u32, end as u32, true));
            search = end;
        }
        DocComments::new(comments, Arc::from(source))
    }

    #[test]
    fn attached_jsdoc_is_returned() {
        let source = "/** Comment for ADD */\nADD,";
        let docs = service(source);
        let pos = source.find("ADD,").unwrap() as u32;
        assert_eq!(docs.documentation_for(pos), "Comment for ADD");
    }

    #[test]
    fn plain_block_comment_is_not_documentation() {
        let source = "/* not docs */\nenum E {}";
        let docs = service(source);
        let pos = source.find("enum").unwrap() as u32;
        assert_eq!(docs.documentation_for(pos), "");
    }

    #[test]
    fn missing_comment_defaults_to_empty() {
        let source = "enum E {}";
        let docs = service(source);
        assert_eq!(docs.documentation_for(0), "");
    }
}
