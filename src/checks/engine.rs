//! Runs registered checks over a file, isolating failures
//!
//! A panicking check is reported and skipped; the remaining checks still
//! run, so one broken rule cannot take down the analysis of a file.

use std::panic::{AssertUnwindSafe, catch_unwind};

use encoding_rs::Encoding;
use tracing::{debug, warn};

use super::{Check, CheckContext, Issue};

/// A check that panicked while analyzing a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckFailure {
    pub check_key: &'static str,
    pub message: String,
}

/// Issues from every surviving check, in registration order, plus the
/// failures of the ones that did not survive
#[derive(Debug, Default)]
pub struct CheckOutcome {
    pub issues: Vec<Issue>,
    pub failures: Vec<CheckFailure>,
}

pub struct CheckEngine {
    checks: Vec<Box<dyn Check>>,
}

impl CheckEngine {
    pub fn new(checks: Vec<Box<dyn Check>>) -> Self {
        Self { checks }
    }

    pub fn with_default_checks() -> Self {
        Self::new(super::default_checks())
    }

    pub fn register(&mut self, check: Box<dyn Check>) {
        self.checks.push(check);
    }

    /// Distribute the charset and initialize every check. Called once,
    /// before the first file.
    pub fn prepare(&mut self, charset: &'static Encoding) {
        for check in &mut self.checks {
            if check.wants_charset() {
                check.set_charset(charset);
            }
            check.init();
        }
        debug!(checks = self.checks.len(), "check engine ready");
    }

    pub fn run(&mut self, ctx: &CheckContext<'_>) -> CheckOutcome {
        let mut outcome = CheckOutcome::default();
        for check in &mut self.checks {
            let key = check.key();
            match catch_unwind(AssertUnwindSafe(|| check.analyze(ctx))) {
                Ok(issues) => outcome.issues.extend(issues),
                Err(payload) => {
                    let message = panic_message(payload.as_ref());
                    warn!(check = key, path = %ctx.path.display(), message, "check panicked");
                    outcome.failures.push(CheckFailure {
                        check_key: key,
                        message,
                    });
                }
            }
        }
        outcome
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use crate::base::LineIndex;
    use crate::parser::ast::AstNode;
    use crate::parser::parse;
    use crate::semantic::build;

    use super::super::{Check, CheckContext, Issue};
    use super::CheckEngine;

    struct AlwaysIssue(&'static str);

    impl Check for AlwaysIssue {
        fn key(&self) -> &'static str {
            self.0
        }

        fn analyze(&mut self, _ctx: &CheckContext<'_>) -> Vec<Issue> {
            vec![Issue::new(self.0, "found")]
        }
    }

    struct Panicking;

    impl Check for Panicking {
        fn key(&self) -> &'static str {
            "panicking"
        }

        fn analyze(&mut self, _ctx: &CheckContext<'_>) -> Vec<Issue> {
            panic!("boom");
        }
    }

    #[test]
    fn a_panicking_check_does_not_stop_the_others() {
        let source = "<?php $x = 1;";
        let parse = parse(source);
        let tree = parse.tree();
        let line_index = LineIndex::new(source);
        let symbols = build(&tree);
        let ctx = CheckContext {
            path: Path::new("test.php"),
            source,
            root: tree.syntax(),
            line_index: &line_index,
            symbols: &symbols,
        };

        let mut engine = CheckEngine::new(vec![
            Box::new(AlwaysIssue("first")),
            Box::new(Panicking),
            Box::new(AlwaysIssue("last")),
        ]);
        engine.prepare(encoding_rs::UTF_8);
        let outcome = engine.run(&ctx);

        let keys: Vec<_> = outcome.issues.iter().map(|issue| issue.check_key).collect();
        assert_eq!(keys, vec!["first", "last"]);
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].check_key, "panicking");
        assert_eq!(outcome.failures[0].message, "boom");
    }
}
