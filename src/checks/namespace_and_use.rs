//! Namespace and use declaration layout
//!
//! `use` declarations belong after the `namespace` declaration; both the
//! namespace line and the last `use` of a block are followed by a blank
//! line before anything else.

use crate::base::LineIndex;
use crate::parser::syntax_kind::{SyntaxKind, SyntaxNode};

use super::{Check, CheckContext, Issue};

pub struct NamespaceAndUseStatement;

impl Check for NamespaceAndUseStatement {
    fn key(&self) -> &'static str {
        "namespace-and-use-statement"
    }

    fn analyze(&mut self, ctx: &CheckContext<'_>) -> Vec<Issue> {
        let mut issues = Vec::new();
        let children: Vec<SyntaxNode> = ctx.root.children().collect();
        let namespace_at = children
            .iter()
            .position(|node| node.kind() == SyntaxKind::NAMESPACE_STMT);

        if let Some(namespace_at) = namespace_at {
            for stmt in &children[..namespace_at] {
                if stmt.kind() == SyntaxKind::USE_STMT {
                    issues.push(
                        Issue::new(
                            self.key(),
                            "Move this \"use\" declaration after the \"namespace\" declaration.",
                        )
                        .at_range(stmt.text_range(), ctx.line_index),
                    );
                }
            }
            let namespace = &children[namespace_at];
            if let Some(next) = children.get(namespace_at + 1) {
                if !blank_line_between(ctx.line_index, namespace, next) {
                    issues.push(
                        Issue::new(
                            self.key(),
                            "Add a blank line after this \"namespace\" declaration.",
                        )
                        .at_range(namespace.text_range(), ctx.line_index),
                    );
                }
            }
        }

        // each contiguous run of use declarations after the namespace
        let mut i = namespace_at.map(|at| at + 1).unwrap_or(0);
        while i < children.len() {
            if children[i].kind() != SyntaxKind::USE_STMT {
                i += 1;
                continue;
            }
            let mut last = i;
            while children.get(last + 1).map(SyntaxNode::kind) == Some(SyntaxKind::USE_STMT) {
                last += 1;
            }
            if let Some(next) = children.get(last + 1) {
                if !blank_line_between(ctx.line_index, &children[last], next) {
                    issues.push(
                        Issue::new(
                            self.key(),
                            "Add a blank line after this \"use\" declaration.",
                        )
                        .at_range(children[last].text_range(), ctx.line_index),
                    );
                }
            }
            i = last + 1;
        }
        issues
    }
}

fn blank_line_between(index: &LineIndex, first: &SyntaxNode, second: &SyntaxNode) -> bool {
    index.line_of(second.text_range().start()) > index.line_of(first.text_range().end()) + 1
}

#[cfg(test)]
mod tests {
    use super::super::test_support::run_check;
    use super::NamespaceAndUseStatement;

    #[test]
    fn well_laid_out_header_passes() {
        let issues = run_check(
            &mut NamespaceAndUseStatement,
            "<?php\nnamespace App;\n\nuse Foo\\Bar;\nuse Foo\\Baz;\n\nclass C {}\n",
        );
        assert!(issues.is_empty());
    }

    #[test]
    fn use_before_namespace_is_flagged() {
        let issues = run_check(
            &mut NamespaceAndUseStatement,
            "<?php\nuse Foo\\Bar;\nnamespace App;\n",
        );
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("Move this \"use\""));
        assert_eq!(issues[0].line, Some(1));
    }

    #[test]
    fn namespace_needs_a_blank_line_before_the_next_statement() {
        let issues = run_check(
            &mut NamespaceAndUseStatement,
            "<?php\nnamespace App;\nclass C {}\n",
        );
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("\"namespace\""));
    }

    #[test]
    fn use_block_needs_a_blank_line_before_the_next_statement() {
        let issues = run_check(
            &mut NamespaceAndUseStatement,
            "<?php\nnamespace App;\n\nuse Foo\\Bar;\nclass C {}\n",
        );
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("\"use\""));
        assert_eq!(issues[0].line, Some(3));
    }

    #[test]
    fn trailing_use_block_needs_no_blank_line() {
        let issues = run_check(
            &mut NamespaceAndUseStatement,
            "<?php\nnamespace App;\n\nuse Foo\\Bar;\n",
        );
        assert!(issues.is_empty());
    }

    #[test]
    fn files_without_a_namespace_are_left_alone() {
        let issues = run_check(&mut NamespaceAndUseStatement, "<?php\n$x = 1;\n");
        assert!(issues.is_empty());
    }
}
