//! Flags variables used without a visible declaration
//!
//! Consumes the unresolved references recorded by the symbol table; names
//! without the `$` sigil (functions, classes) may legitimately live in other
//! files and are ignored.

use super::{Check, CheckContext, Issue};

pub struct UndeclaredVariable;

impl Check for UndeclaredVariable {
    fn key(&self) -> &'static str {
        "undeclared-variable"
    }

    fn analyze(&mut self, ctx: &CheckContext<'_>) -> Vec<Issue> {
        ctx.symbols
            .unresolved()
            .iter()
            .filter(|reference| reference.name.starts_with('$'))
            .map(|reference| {
                let message = format!(
                    "Variable '{}' is used but is never declared in this scope.",
                    reference.name
                );
                Issue::new(self.key(), message).at_range(reference.range, ctx.line_index)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::run_check;
    use super::UndeclaredVariable;

    #[test]
    fn declared_variables_pass() {
        let issues = run_check(&mut UndeclaredVariable, "<?php $x = 1; echo $x;");
        assert!(issues.is_empty());
    }

    #[test]
    fn reads_without_declaration_are_flagged() {
        let issues = run_check(&mut UndeclaredVariable, "<?php echo $missing;");
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("$missing"));
    }

    #[test]
    fn unknown_function_names_are_not_this_checks_business() {
        let issues = run_check(&mut UndeclaredVariable, "<?php some_library_call();");
        assert!(issues.is_empty());
    }

    #[test]
    fn locals_of_other_functions_are_not_visible() {
        let issues = run_check(
            &mut UndeclaredVariable,
            "<?php function a() { $x = 1; return $x; } function b() { return $x; }",
        );
        assert_eq!(issues.len(), 1);
    }
}
