//! Flags functions whose cyclomatic complexity exceeds a threshold

use crate::metrics::complexity;
use crate::parser::ast::{AstNode, FunctionDecl, MethodDecl};
use crate::parser::syntax_kind::{SyntaxKind, SyntaxNode};
use rowan::TextRange;

use super::{Check, CheckContext, Issue};

pub struct FunctionComplexity {
    pub maximum: u32,
}

impl Default for FunctionComplexity {
    fn default() -> Self {
        Self { maximum: 20 }
    }
}

impl Check for FunctionComplexity {
    fn key(&self) -> &'static str {
        "function-complexity"
    }

    fn analyze(&mut self, ctx: &CheckContext<'_>) -> Vec<Issue> {
        let mut issues = Vec::new();
        for node in ctx.root.descendants() {
            if !matches!(
                node.kind(),
                SyntaxKind::FUNCTION_DECL | SyntaxKind::METHOD_DECL | SyntaxKind::CLOSURE_EXPR
            ) {
                continue;
            }
            let complexity = complexity::of(&node);
            if complexity > self.maximum {
                let message = format!(
                    "The cyclomatic complexity of this function is {complexity} which is \
                     greater than {} authorized.",
                    self.maximum
                );
                issues.push(
                    Issue::new(self.key(), message)
                        .at_range(anchor(&node), ctx.line_index)
                        .with_cost(f64::from(complexity - self.maximum)),
                );
            }
        }
        issues
    }
}

/// The function name when there is one, the `function` keyword for closures
fn anchor(node: &SyntaxNode) -> TextRange {
    let name = match node.kind() {
        SyntaxKind::FUNCTION_DECL => FunctionDecl::cast(node.clone()).and_then(|f| f.name()),
        SyntaxKind::METHOD_DECL => MethodDecl::cast(node.clone()).and_then(|m| m.name()),
        _ => None,
    };
    match name {
        Some(token) => token.text_range(),
        None => node
            .children_with_tokens()
            .filter_map(|element| element.into_token())
            .find(|token| token.kind() == SyntaxKind::FUNCTION_KW)
            .map(|token| token.text_range())
            .unwrap_or_else(|| node.text_range()),
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::run_check;
    use super::FunctionComplexity;

    #[test]
    fn simple_functions_pass() {
        let mut check = FunctionComplexity::default();
        let issues = run_check(&mut check, "<?php function f($a) { return $a + 1; }");
        assert!(issues.is_empty());
    }

    #[test]
    fn complex_functions_are_flagged_with_cost() {
        // complexity 3: function + if + &&
        let mut check = FunctionComplexity { maximum: 2 };
        let issues = run_check(
            &mut check,
            "<?php function busy($a, $b) { if ($a && $b) { return 1; } return 0; }",
        );
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].check_key, "function-complexity");
        assert_eq!(issues[0].cost, Some(1.0));
        assert_eq!(issues[0].line, Some(0));
    }

    #[test]
    fn methods_and_closures_are_measured_too() {
        let mut check = FunctionComplexity { maximum: 1 };
        let issues = run_check(
            &mut check,
            "<?php class C { function m($a) { if ($a) { return 1; } return 0; } }",
        );
        assert_eq!(issues.len(), 1);
    }
}
