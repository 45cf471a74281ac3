//! Flags calls to `eval`

use crate::parser::ast::{AstNode, CallExpr};

use super::{Check, CheckContext, Issue};

pub struct EvalUse;

impl Check for EvalUse {
    fn key(&self) -> &'static str {
        "eval-use"
    }

    fn analyze(&mut self, ctx: &CheckContext<'_>) -> Vec<Issue> {
        ctx.root
            .descendants()
            .filter_map(CallExpr::cast)
            .filter(|call| {
                call.callee_name()
                    .is_some_and(|name| name.eq_ignore_ascii_case("eval"))
            })
            .map(|call| {
                Issue::new(self.key(), "Make sure that this use of 'eval' is safe.")
                    .at_range(call.syntax().text_range(), ctx.line_index)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::run_check;
    use super::EvalUse;

    #[test]
    fn ordinary_calls_pass() {
        assert!(run_check(&mut EvalUse, "<?php strlen('a');").is_empty());
    }

    #[test]
    fn eval_calls_are_flagged_case_insensitively() {
        let issues = run_check(&mut EvalUse, "<?php eval($code); EVAL($more);");
        assert_eq!(issues.len(), 2);
    }

    #[test]
    fn method_named_eval_is_not_the_construct() {
        assert!(run_check(&mut EvalUse, "<?php $o->eval();").is_empty());
    }
}
