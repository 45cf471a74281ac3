//! End-to-end runs through the full pipeline: bytes in, analysis out

use std::path::{Path, PathBuf};

use php_analysis::checks::{Check, CheckContext, EvalUse, LineLength, UndeclaredVariable};
use php_analysis::{AnalyzeError, Analyzer, FileMeasures, Issue, SymbolKind};

fn analyze(source: &str) -> php_analysis::FileAnalysis {
    Analyzer::new(encoding_rs::UTF_8)
        .analyze_bytes(Path::new("test.php"), source.as_bytes())
        .expect("analysis should succeed")
}

#[test]
fn empty_file_yields_empty_analysis() {
    let analysis = analyze("");
    assert_eq!(
        analysis.measures,
        FileMeasures {
            lines: 1,
            ..FileMeasures::default()
        }
    );
    assert!(analysis.issues.is_empty());
    assert!(analysis.failures.is_empty());
    assert!(analysis.syntax_highlighting.is_empty());
    assert!(analysis.symbol_highlighting.is_empty());
}

#[test]
fn recursive_function_resolves_and_is_measured() {
    let analysis = analyze(
        "<?php
function countdown($n) {
    if ($n > 0) {
        countdown($n - 1);
    }
}
",
    );
    // function + if
    assert_eq!(analysis.measures.complexity, 2);
    assert_eq!(analysis.measures.functions, 1);
    // the recursive call is annotated alongside the declaration
    let function_annotations = analysis
        .symbol_highlighting
        .iter()
        .filter(|annotation| annotation.kind == SymbolKind::Function)
        .count();
    assert_eq!(function_annotations, 2);
    assert!(analysis.issues.is_empty());
}

#[test]
fn symbol_highlighting_is_offset_sorted() {
    // the hoisted function symbol must not drag its annotations ahead of $a
    let analysis = analyze("<?php $a = 1; function f() {} f(); echo $a;");
    assert!(!analysis.symbol_highlighting.is_empty());
    for pair in analysis.symbol_highlighting.windows(2) {
        assert!(pair[0].range.end() <= pair[1].range.start());
    }
}

#[test]
fn two_checks_can_report_on_the_same_line() {
    let checks = || -> Vec<Box<dyn Check>> {
        vec![Box::new(LineLength::with_maximum(20)), Box::new(EvalUse)]
    };
    let analyzer = Analyzer::with_checks(encoding_rs::UTF_8, checks);
    let source = "<?php\n$r = eval($code_from_far_away_input);\n";
    let analysis = analyzer
        .analyze_bytes(Path::new("test.php"), source.as_bytes())
        .unwrap();
    let on_line_1: Vec<_> = analysis
        .issues
        .iter()
        .filter(|issue| issue.line == Some(1))
        .map(|issue| issue.check_key)
        .collect();
    assert_eq!(on_line_1, vec!["line-length", "eval-use"]);
}

#[test]
fn unresolved_references_feed_only_the_checks_that_care() {
    let checks = || -> Vec<Box<dyn Check>> {
        vec![Box::new(UndeclaredVariable), Box::new(EvalUse)]
    };
    let analyzer = Analyzer::with_checks(encoding_rs::UTF_8, checks);
    let source = "<?php echo $never_assigned;\n";
    let analysis = analyzer
        .analyze_bytes(Path::new("test.php"), source.as_bytes())
        .unwrap();
    assert_eq!(analysis.issues.len(), 1);
    assert_eq!(analysis.issues[0].check_key, "undeclared-variable");
    // the unresolved reference is not a symbol, so it is not highlighted
    assert!(analysis.symbol_highlighting.is_empty());
}

struct Panicking;

impl Check for Panicking {
    fn key(&self) -> &'static str {
        "panicking"
    }

    fn analyze(&mut self, _ctx: &CheckContext<'_>) -> Vec<Issue> {
        panic!("misbehaving rule");
    }
}

#[test]
fn a_panicking_check_is_isolated_per_file() {
    let checks = || -> Vec<Box<dyn Check>> {
        vec![Box::new(Panicking), Box::new(UndeclaredVariable)]
    };
    let analyzer = Analyzer::with_checks(encoding_rs::UTF_8, checks);
    let inputs = vec![
        (PathBuf::from("a.php"), b"<?php echo $a;".to_vec()),
        (PathBuf::from("b.php"), b"<?php echo $b;".to_vec()),
    ];
    let results = analyzer.analyze_all(&inputs);
    assert_eq!(results.len(), 2);
    for result in results {
        let analysis = result.unwrap();
        assert_eq!(analysis.failures.len(), 1);
        assert_eq!(analysis.failures[0].check_key, "panicking");
        // the surviving check still reported
        assert_eq!(analysis.issues.len(), 1);
        assert_eq!(analysis.issues[0].check_key, "undeclared-variable");
    }
}

#[test]
fn undecodable_bytes_fail_with_an_encoding_error() {
    let analyzer = Analyzer::new(encoding_rs::UTF_8);
    let result = analyzer.analyze_bytes(Path::new("bad.php"), &[0x3c, 0xff, 0xfe, 0x00]);
    assert!(matches!(result, Err(AnalyzeError::Encoding { .. })));
}

#[test]
fn files_with_syntax_errors_are_skipped_with_a_position() {
    let analyzer = Analyzer::new(encoding_rs::UTF_8);
    let result = analyzer.analyze_bytes(Path::new("broken.php"), b"<?php function () {");
    match result {
        Err(AnalyzeError::Syntax { line, column, .. }) => {
            assert!(line >= 1);
            assert!(column >= 1);
        }
        other => panic!("expected a syntax error, got {:?}", other.map(|a| a.path)),
    }
}

#[test]
fn batch_results_come_back_in_input_order() {
    let analyzer = Analyzer::new(encoding_rs::UTF_8);
    let inputs: Vec<(PathBuf, Vec<u8>)> = (0..8)
        .map(|i| {
            (
                PathBuf::from(format!("file{i}.php")),
                format!("<?php $v{i} = {i};").into_bytes(),
            )
        })
        .collect();
    let results = analyzer.analyze_all(&inputs);
    assert_eq!(results.len(), inputs.len());
    for (i, result) in results.into_iter().enumerate() {
        let analysis = result.unwrap();
        assert_eq!(analysis.path, PathBuf::from(format!("file{i}.php")));
    }
}

#[test]
fn latin1_sources_decode_under_the_declared_charset() {
    let analyzer = Analyzer::new(encoding_rs::WINDOWS_1252);
    // "caf\xe9" is 'café' in windows-1252
    let source = b"<?php $name = 'caf\xe9';";
    let analysis = analyzer
        .analyze_bytes(Path::new("latin.php"), source)
        .unwrap();
    assert!(analysis.issues.is_empty());
    assert_eq!(analysis.measures.statements, 1);
}
