//! Pluggable per-file checks
//!
//! A check inspects one analyzed file through [`CheckContext`] and returns
//! the issues it found. Checks are registered with the
//! [`engine::CheckEngine`], which runs them in order and isolates failures.

pub mod engine;

mod eval_use;
mod function_complexity;
mod line_length;
mod namespace_and_use;
mod undeclared_variable;
mod unused_local_variable;

pub use engine::{CheckEngine, CheckFailure, CheckOutcome};
pub use eval_use::EvalUse;
pub use function_complexity::FunctionComplexity;
pub use line_length::LineLength;
pub use namespace_and_use::NamespaceAndUseStatement;
pub use undeclared_variable::UndeclaredVariable;
pub use unused_local_variable::UnusedLocalVariable;

use std::path::Path;

use encoding_rs::Encoding;
use rowan::TextRange;

use crate::base::LineIndex;
use crate::parser::syntax_kind::SyntaxNode;
use crate::semantic::SymbolTable;

/// Everything a check may look at for one file
pub struct CheckContext<'a> {
    pub path: &'a Path,
    /// Decoded source text
    pub source: &'a str,
    pub root: &'a SyntaxNode,
    pub line_index: &'a LineIndex,
    pub symbols: &'a SymbolTable,
}

/// One rule, run once per file.
///
/// `init` is called once before the first file. Checks that care about the
/// on-disk encoding opt in via `wants_charset` and receive it before `init`.
pub trait Check {
    fn key(&self) -> &'static str;

    fn init(&mut self) {}

    fn wants_charset(&self) -> bool {
        false
    }

    fn set_charset(&mut self, _charset: &'static Encoding) {}

    fn analyze(&mut self, ctx: &CheckContext<'_>) -> Vec<Issue>;
}

/// An extra location attached to an issue
#[derive(Debug, Clone, PartialEq)]
pub struct SecondaryLocation {
    pub range: TextRange,
    pub message: String,
}

/// A finding reported by a check.
///
/// File-level issues carry neither range nor line; line-level issues carry a
/// line; precise issues carry a range and the line it starts on.
#[derive(Debug, Clone, PartialEq)]
pub struct Issue {
    pub check_key: &'static str,
    pub message: String,
    pub range: Option<TextRange>,
    /// 0-indexed line the issue starts on
    pub line: Option<u32>,
    pub secondary: Vec<SecondaryLocation>,
    /// Remediation effort for issues whose fix scales with a measure
    pub cost: Option<f64>,
}

impl Issue {
    pub fn new(check_key: &'static str, message: impl Into<String>) -> Self {
        Self {
            check_key,
            message: message.into(),
            range: None,
            line: None,
            secondary: Vec::new(),
            cost: None,
        }
    }

    pub fn at_range(mut self, range: TextRange, line_index: &LineIndex) -> Self {
        self.line = Some(line_index.line_of(range.start()));
        self.range = Some(range);
        self
    }

    pub fn at_line(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }

    pub fn with_secondary(mut self, range: TextRange, message: impl Into<String>) -> Self {
        self.secondary.push(SecondaryLocation {
            range,
            message: message.into(),
        });
        self
    }

    pub fn with_cost(mut self, cost: f64) -> Self {
        self.cost = Some(cost);
        self
    }
}

/// The checks enabled by default, in the order they run
pub fn default_checks() -> Vec<Box<dyn Check>> {
    vec![
        Box::new(LineLength::default()),
        Box::new(FunctionComplexity::default()),
        Box::new(UndeclaredVariable),
        Box::new(UnusedLocalVariable),
        Box::new(EvalUse),
        Box::new(NamespaceAndUseStatement),
    ]
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::path::Path;

    use crate::base::LineIndex;
    use crate::parser::ast::AstNode;
    use crate::parser::parse;
    use crate::semantic::build;

    use super::{Check, CheckContext, Issue};

    /// Parse `source` and run a single check over it
    pub(crate) fn run_check(check: &mut dyn Check, source: &str) -> Vec<Issue> {
        let parse = parse(source);
        let tree = parse.tree();
        let line_index = LineIndex::new(source);
        let symbols = build(&tree);
        check.init();
        check.analyze(&CheckContext {
            path: Path::new("test.php"),
            source,
            root: tree.syntax(),
            line_index: &line_index,
            symbols: &symbols,
        })
    }
}
