//! File-level measures computed from the syntax tree
//!
//! One walk over the tree collects everything; line-based measures go
//! through the [`LineIndex`] so multi-line tokens are attributed to every
//! line they touch.

pub mod complexity;

use rowan::NodeOrToken;
use rustc_hash::FxHashSet;

use crate::base::LineIndex;
use crate::parser::syntax_kind::{SyntaxKind, SyntaxNode};

/// Aggregated measures for one file
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FileMeasures {
    /// Physical lines, including blank and HTML-only lines
    pub lines: u32,
    /// Lines carrying at least one PHP code token
    pub lines_of_code: u32,
    /// Lines touched by a comment or doc comment
    pub comment_lines: u32,
    pub classes: u32,
    /// Function declarations, methods, and closures
    pub functions: u32,
    pub statements: u32,
    pub complexity: u32,
    /// Lines where an executable statement starts, ascending, 0-indexed.
    /// Consumers that persist per-line data read this directly.
    pub executable_lines: Vec<u32>,
}

pub fn measure(root: &SyntaxNode, line_index: &LineIndex) -> FileMeasures {
    let mut code_lines: FxHashSet<u32> = FxHashSet::default();
    let mut comment_lines: FxHashSet<u32> = FxHashSet::default();
    let mut executable_lines: FxHashSet<u32> = FxHashSet::default();
    let mut classes = 0;
    let mut functions = 0;
    let mut statements = 0;

    for element in root.descendants_with_tokens() {
        match element {
            NodeOrToken::Token(token) => {
                let kind = token.kind();
                if kind.is_comment() {
                    comment_lines.extend(line_index.lines_in(token.text_range()));
                } else if kind != SyntaxKind::WHITESPACE && kind != SyntaxKind::INLINE_HTML {
                    code_lines.extend(line_index.lines_in(token.text_range()));
                }
            }
            NodeOrToken::Node(node) => {
                let kind = node.kind();
                match kind {
                    SyntaxKind::CLASS_DECL => classes += 1,
                    SyntaxKind::FUNCTION_DECL
                    | SyntaxKind::METHOD_DECL
                    | SyntaxKind::CLOSURE_EXPR => functions += 1,
                    _ => {}
                }
                if kind.is_statement() && kind != SyntaxKind::BLOCK_STMT {
                    statements += 1;
                }
                if is_executable(kind) {
                    executable_lines.insert(line_index.line_of(node.text_range().start()));
                }
            }
        }
    }

    let mut executable_lines: Vec<u32> = executable_lines.into_iter().collect();
    executable_lines.sort_unstable();

    FileMeasures {
        lines: line_index.line_count(),
        lines_of_code: code_lines.len() as u32,
        comment_lines: comment_lines.len() as u32,
        classes,
        functions,
        statements,
        complexity: complexity::of(root),
        executable_lines,
    }
}

fn is_executable(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::EXPR_STMT
            | SyntaxKind::ECHO_STMT
            | SyntaxKind::IF_STMT
            | SyntaxKind::WHILE_STMT
            | SyntaxKind::DO_STMT
            | SyntaxKind::FOR_STMT
            | SyntaxKind::FOREACH_STMT
            | SyntaxKind::SWITCH_STMT
            | SyntaxKind::BREAK_STMT
            | SyntaxKind::CONTINUE_STMT
            | SyntaxKind::RETURN_STMT
            | SyntaxKind::THROW_STMT
            | SyntaxKind::GLOBAL_STMT
            | SyntaxKind::STATIC_STMT
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ast::AstNode;
    use crate::parser::parse;

    fn measures_for(source: &str) -> FileMeasures {
        let parse = parse(source);
        let index = LineIndex::new(source);
        measure(parse.tree().syntax(), &index)
    }

    #[test]
    fn empty_file_is_all_zero_but_one_line() {
        let measures = measures_for("");
        assert_eq!(
            measures,
            FileMeasures {
                lines: 1,
                ..FileMeasures::default()
            }
        );
    }

    #[test]
    fn html_only_lines_are_not_code() {
        let measures = measures_for("<ul>\n<li>item</li>\n</ul>\n");
        assert_eq!(measures.lines, 4);
        assert_eq!(measures.lines_of_code, 0);
        assert_eq!(measures.statements, 0);
    }

    #[test]
    fn counts_classes_functions_and_statements() {
        let source = "<?php
class Greeter {
    function hello($name) {
        echo $name;
        return 1;
    }
}
function top() {}
$g = new Greeter();
";
        let measures = measures_for(source);
        assert_eq!(measures.classes, 1);
        assert_eq!(measures.functions, 2);
        assert_eq!(measures.statements, 3);
        assert_eq!(measures.complexity, 2);
    }

    #[test]
    fn comment_lines_cover_every_line_of_a_block_comment() {
        let source = "<?php\n/* one\n   two */\n$x = 1; // trailing\n";
        let measures = measures_for(source);
        assert_eq!(measures.comment_lines, 3);
        // the open tag line and the assignment line
        assert_eq!(measures.lines_of_code, 2);
    }

    #[test]
    fn executable_lines_name_each_line_once_in_order() {
        let source = "<?php\n$a = 1;\n$b = 2; $c = 3;\nfunction f() {}\n";
        let measures = measures_for(source);
        // two statements share line 2; the declaration line is not executable
        assert_eq!(measures.executable_lines, vec![1, 2]);
    }

    #[test]
    fn doc_comments_count_as_comment_lines() {
        let source = "<?php\n/** summary */\nfunction f() {}\n";
        let measures = measures_for(source);
        assert_eq!(measures.comment_lines, 1);
    }
}
