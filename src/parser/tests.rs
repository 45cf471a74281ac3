use super::ast::{AstNode, CompilationUnit, FunctionDecl};
use super::{SyntaxKind, SyntaxNode, parse};

fn parse_ok(input: &str) -> SyntaxNode {
    let result = parse(input);
    assert!(
        result.ok(),
        "parse failed: {:?}\ntree: {:#?}",
        result.errors,
        result.syntax()
    );
    result.syntax()
}

/// Walk the tree checking that each node's range contains its children and
/// sibling ranges never overlap
fn assert_spans_nest(node: &SyntaxNode) {
    let mut cursor = node.text_range().start();
    for child in node.children_with_tokens() {
        let range = child.text_range();
        assert!(
            node.text_range().contains_range(range),
            "child {range:?} escapes parent {:?}",
            node.text_range()
        );
        assert!(range.start() >= cursor, "sibling ranges overlap at {range:?}");
        cursor = range.end();
        if let Some(child_node) = child.into_node() {
            assert_spans_nest(&child_node);
        }
    }
}

#[test]
fn empty_file_parses_to_empty_unit() {
    let root = parse_ok("");
    assert_eq!(root.kind(), SyntaxKind::COMPILATION_UNIT);
    assert_eq!(root.children().count(), 0);
}

#[test]
fn parse_is_lossless() {
    let inputs = [
        "",
        "plain html, no php at all",
        "<?php\n$x = 1;\n",
        "<?php function f($a, $b = 2) { return $a + $b; }",
        "<?php // comment\nclass C extends B { public $p; function m() {} }",
        "<?php if ($a) { echo 1; } elseif ($b) {} else {}\n?>\ntrailing",
        "<?php $broken = ;;; @#! ",
        "<?= $title ?>",
    ];
    for input in inputs {
        let result = parse(input);
        assert_eq!(
            result.syntax().text().to_string(),
            input,
            "lost bytes for {input:?}"
        );
    }
}

#[test]
fn spans_nest_and_do_not_overlap() {
    let root = parse_ok(
        "<?php\nfunction fib($n) {\n    if ($n < 2) { return $n; }\n    return fib($n - 1) + fib($n - 2);\n}\n",
    );
    assert_spans_nest(&root);
    assert_eq!(
        root.text_range().len(),
        rowan::TextSize::of(root.text().to_string().as_str())
    );
}

#[test]
fn parse_is_deterministic() {
    let input = "<?php class A { function m($x) { while ($x--) { echo $x; } } }";
    let first = parse(input);
    let second = parse(input);
    assert_eq!(format!("{:#?}", first.syntax()), format!("{:#?}", second.syntax()));
}

#[test]
fn statements_are_structured() {
    let root = parse_ok("<?php $a = 1; echo $a; if ($a) {} foreach ($xs as $k => $v) {}");
    let kinds: Vec<_> = root.children().map(|n| n.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            SyntaxKind::EXPR_STMT,
            SyntaxKind::ECHO_STMT,
            SyntaxKind::IF_STMT,
            SyntaxKind::FOREACH_STMT,
        ]
    );
}

#[test]
fn function_decl_exposes_name_and_params() {
    let root = parse_ok("<?php function greet($who, $greeting = 'hi') {}");
    let unit = CompilationUnit::cast(root).unwrap();
    let func = unit
        .items()
        .find_map(FunctionDecl::cast)
        .expect("function declaration");
    assert_eq!(func.name().unwrap().text(), "greet");
    let params: Vec<_> = func
        .params()
        .unwrap()
        .params()
        .filter_map(|p| p.var())
        .map(|v| v.text().to_string())
        .collect();
    assert_eq!(params, vec!["$who", "$greeting"]);
}

#[test]
fn operator_precedence_shapes_the_tree() {
    let root = parse_ok("<?php $r = 1 + 2 * 3;");
    // The multiplication nests inside the addition
    let assign = root
        .descendants()
        .find(|n| n.kind() == SyntaxKind::ASSIGN_EXPR)
        .unwrap();
    let add = assign
        .children()
        .find(|n| n.kind() == SyntaxKind::BINARY_EXPR)
        .unwrap();
    let inner = add
        .children()
        .filter(|n| n.kind() == SyntaxKind::BINARY_EXPR)
        .count();
    assert_eq!(inner, 1);
}

#[test]
fn syntax_errors_carry_position() {
    let result = parse("<?php $x = ;");
    assert!(!result.ok());
    let error = &result.errors[0];
    assert!(u32::from(error.range.start()) >= 11);
    assert!(error.message.contains("expected expression"));
}

#[test]
fn missing_semicolon_is_reported_but_recovers() {
    let result = parse("<?php $a = 1 $b = 2;");
    assert!(!result.ok());
    // Both statements still end up in the tree
    let statements = result
        .syntax()
        .children()
        .filter(|n| n.kind() == SyntaxKind::EXPR_STMT)
        .count();
    assert_eq!(statements, 2);
}

#[test]
fn close_tag_ends_statement_without_semicolon() {
    let result = parse("<?php echo 1 ?>");
    assert!(result.ok(), "{:?}", result.errors);
}

#[test]
fn class_members_are_parsed() {
    let root = parse_ok(
        "<?php class C { const K = 1; public $p = 2; private static function m() {} }",
    );
    let body = root
        .descendants()
        .find(|n| n.kind() == SyntaxKind::CLASS_BODY)
        .unwrap();
    let kinds: Vec<_> = body.children().map(|n| n.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            SyntaxKind::CLASS_CONST_DECL,
            SyntaxKind::PROPERTY_DECL,
            SyntaxKind::METHOD_DECL,
        ]
    );
}

#[test]
fn closures_are_expressions() {
    let root = parse_ok("<?php $f = function ($x) use ($y) { return $x + $y; };");
    assert!(
        root.descendants()
            .any(|n| n.kind() == SyntaxKind::CLOSURE_EXPR)
    );
}
