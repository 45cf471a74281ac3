//! Token-class highlighting
//!
//! Walks the token stream once; the result is sorted by position and
//! non-overlapping because tokens are.

use rowan::{NodeOrToken, TextRange};

use crate::parser::syntax_kind::{SyntaxKind, SyntaxNode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightKind {
    Keyword,
    String,
    Comment,
    DocComment,
    Number,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightRange {
    pub range: TextRange,
    pub kind: HighlightKind,
}

pub fn syntax_highlighting(root: &SyntaxNode) -> Vec<HighlightRange> {
    let mut out = Vec::new();
    for element in root.descendants_with_tokens() {
        let NodeOrToken::Token(token) = element else {
            continue;
        };
        if let Some(kind) = classify(token.kind()) {
            out.push(HighlightRange {
                range: token.text_range(),
                kind,
            });
        }
    }
    out
}

fn classify(kind: SyntaxKind) -> Option<HighlightKind> {
    match kind {
        SyntaxKind::DOC_COMMENT => Some(HighlightKind::DocComment),
        SyntaxKind::LINE_COMMENT | SyntaxKind::BLOCK_COMMENT => Some(HighlightKind::Comment),
        SyntaxKind::STRING => Some(HighlightKind::String),
        SyntaxKind::INTEGER | SyntaxKind::FLOAT => Some(HighlightKind::Number),
        kind if kind.is_keyword() => Some(HighlightKind::Keyword),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ast::AstNode;
    use crate::parser::parse;

    fn highlights(source: &str) -> Vec<(HighlightKind, String)> {
        let parse = parse(source);
        syntax_highlighting(parse.tree().syntax())
            .into_iter()
            .map(|h| {
                let text = source[usize::from(h.range.start())..usize::from(h.range.end())]
                    .to_string();
                (h.kind, text)
            })
            .collect()
    }

    #[test]
    fn classifies_token_classes() {
        let result = highlights("<?php /** doc */ function f() { return 'x' . 1.5; } // end");
        assert_eq!(
            result,
            vec![
                (HighlightKind::DocComment, "/** doc */".to_string()),
                (HighlightKind::Keyword, "function".to_string()),
                (HighlightKind::Keyword, "return".to_string()),
                (HighlightKind::String, "'x'".to_string()),
                (HighlightKind::Number, "1.5".to_string()),
                (HighlightKind::Comment, "// end".to_string()),
            ]
        );
    }

    #[test]
    fn results_are_sorted_and_disjoint() {
        let parse = parse("<?php if (true) { echo 1; } else { echo 2; }");
        let result = syntax_highlighting(parse.tree().syntax());
        for pair in result.windows(2) {
            assert!(pair[0].range.end() <= pair[1].range.start());
        }
    }

    #[test]
    fn html_is_not_highlighted() {
        assert!(highlights("<b>bold</b>").is_empty());
    }
}
