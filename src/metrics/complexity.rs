//! Cyclomatic complexity, shared by the file measures and the
//! function-complexity check

use rowan::NodeOrToken;

use crate::parser::syntax_kind::{SyntaxKind, SyntaxNode};

/// Complexity of a subtree: one per function boundary plus one per branch
/// point (conditionals, loops, case labels, catch clauses, short-circuit
/// operators). Computed over the whole subtree, nested closures included.
pub fn of(node: &SyntaxNode) -> u32 {
    let mut total = 0;
    for element in node.descendants_with_tokens() {
        total += match element {
            NodeOrToken::Node(node) => node_weight(node.kind()),
            NodeOrToken::Token(token) => token_weight(token.kind()),
        };
    }
    total
}

fn node_weight(kind: SyntaxKind) -> u32 {
    match kind {
        SyntaxKind::FUNCTION_DECL
        | SyntaxKind::METHOD_DECL
        | SyntaxKind::CLOSURE_EXPR
        | SyntaxKind::IF_STMT
        | SyntaxKind::ELSEIF_CLAUSE
        | SyntaxKind::TERNARY_EXPR
        | SyntaxKind::WHILE_STMT
        | SyntaxKind::DO_STMT
        | SyntaxKind::FOR_STMT
        | SyntaxKind::FOREACH_STMT
        | SyntaxKind::CASE_CLAUSE
        | SyntaxKind::CATCH_CLAUSE => 1,
        _ => 0,
    }
}

fn token_weight(kind: SyntaxKind) -> u32 {
    match kind {
        SyntaxKind::AMP_AMP
        | SyntaxKind::PIPE_PIPE
        | SyntaxKind::AND_KW
        | SyntaxKind::OR_KW
        | SyntaxKind::XOR_KW => 1,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::AstNode;
    use crate::parser::parse;

    fn complexity_of(source: &str) -> u32 {
        super::of(parse(source).tree().syntax())
    }

    #[test]
    fn straight_line_code_has_zero_complexity() {
        assert_eq!(complexity_of("<?php $a = 1; echo $a;"), 0);
    }

    #[test]
    fn each_function_counts_one() {
        assert_eq!(complexity_of("<?php function f() {} function g() {}"), 2);
    }

    #[test]
    fn branches_and_operators_add_up() {
        // function(1) + if(1) + elseif(1) + &&(1) + ternary(1)
        let source = "<?php
            function decide($a, $b) {
                if ($a && $b) {
                    return 1;
                } elseif ($a) {
                    return $b ? 2 : 3;
                }
                return 0;
            }";
        assert_eq!(complexity_of(source), 5);
    }

    #[test]
    fn loops_cases_and_catches_count() {
        let source = "<?php
            foreach ($xs as $x) {}
            while (true) { break; }
            switch ($y) { case 1: break; default: break; }
            try { f(); } catch (E $e) {}";
        assert_eq!(complexity_of(source), 4);
    }
}
