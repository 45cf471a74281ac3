//! Parser contract tests over a corpus of realistic inputs

use php_analysis::parser::{parse, syntax_kind::SyntaxNode};
use rstest::rstest;

/// Every byte of the input must be owned by exactly one token
#[rstest]
#[case::empty("")]
#[case::html_only("<h1>static page</h1>\n")]
#[case::hello("<?php echo 'hello';")]
#[case::short_echo("before <?= $x ?> after")]
#[case::mixed_modes("<p><?php if ($a) { ?><b>yes</b><?php } ?></p>")]
#[case::class_decl("<?php class A extends B implements C { public $p = 1; function m() {} }")]
#[case::closures("<?php $f = function ($a) use ($b) { return $a + $b; };")]
#[case::control_flow("<?php foreach ($xs as $k => $v) { switch ($v) { case 1: break; } }")]
#[case::unterminated_string("<?php $s = 'oops")]
#[case::missing_semicolon("<?php $a = 1 $b = 2;")]
#[case::stray_tokens("<?php function { ) class ;")]
#[case::unclosed_block("<?php if ($a) { while ($b) {")]
fn every_parse_is_lossless(#[case] source: &str) {
    let parse = parse(source);
    assert_eq!(parse.syntax().text().to_string(), source);
}

#[rstest]
#[case::missing_semicolon("<?php $a = 1 $b = 2;", 2)]
// the unparsable prefix still becomes a (broken) statement of its own
#[case::valid_after_error("<?php = ; $ok = 1; echo $ok;", 3)]
fn recovery_still_parses_later_statements(#[case] source: &str, #[case] expected_stmts: usize) {
    let parse = parse(source);
    assert!(!parse.ok());
    let statements = parse
        .syntax()
        .children()
        .filter(|node| node.kind().is_statement())
        .count();
    assert_eq!(statements, expected_stmts);
}

#[rstest]
#[case::simple("<?php $a = $b + $c * 2;")]
#[case::nested("<?php f(g($x), [1, 2 => $y]);")]
#[case::classes("<?php class A { function m() { return $this->p; } }")]
fn sibling_spans_never_overlap(#[case] source: &str) {
    fn check(node: &SyntaxNode) {
        let mut previous_end = node.text_range().start();
        for child in node.children_with_tokens() {
            let range = child.text_range();
            assert!(range.start() >= previous_end, "overlapping spans under {:?}", node.kind());
            previous_end = range.end();
        }
        assert!(previous_end <= node.text_range().end());
        for child in node.children() {
            check(&child);
        }
    }
    check(&parse(source).syntax());
}
