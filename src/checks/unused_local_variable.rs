//! Flags local variables that are written but never read

use crate::semantic::{ScopeId, ScopeKind, SymbolKind, SymbolTable};

use super::{Check, CheckContext, Issue};

pub struct UnusedLocalVariable;

impl Check for UnusedLocalVariable {
    fn key(&self) -> &'static str {
        "unused-local-variable"
    }

    fn analyze(&mut self, ctx: &CheckContext<'_>) -> Vec<Issue> {
        let mut issues = Vec::new();
        for (_, symbol) in ctx.symbols.symbols() {
            if symbol.kind != SymbolKind::Variable || symbol.decl.is_empty() {
                continue;
            }
            if !is_local(ctx.symbols, symbol.scope) {
                continue;
            }
            if symbol.reads().next().is_none() {
                let message = format!("Remove this unused '{}' local variable.", symbol.name);
                issues.push(Issue::new(self.key(), message).at_range(symbol.decl, ctx.line_index));
            }
        }
        issues
    }
}

/// A variable is local when some scope on its chain is a function body
fn is_local(table: &SymbolTable, scope: ScopeId) -> bool {
    let mut next = Some(scope);
    while let Some(id) = next {
        let scope = table.scope(id);
        if scope.kind == ScopeKind::Function {
            return true;
        }
        next = scope.parent;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::super::test_support::run_check;
    use super::UnusedLocalVariable;

    #[test]
    fn read_variables_pass() {
        let issues = run_check(
            &mut UnusedLocalVariable,
            "<?php function f() { $x = 1; return $x; }",
        );
        assert!(issues.is_empty());
    }

    #[test]
    fn write_only_locals_are_flagged() {
        let issues = run_check(
            &mut UnusedLocalVariable,
            "<?php function f() { $unused = 1; return 2; }",
        );
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("$unused"));
    }

    #[test]
    fn globals_are_out_of_scope() {
        let issues = run_check(&mut UnusedLocalVariable, "<?php $maybe_used_elsewhere = 1;");
        assert!(issues.is_empty());
    }

    #[test]
    fn unused_parameters_are_not_flagged() {
        let issues = run_check(
            &mut UnusedLocalVariable,
            "<?php function f($ignored) { return 1; }",
        );
        assert!(issues.is_empty());
    }

    #[test]
    fn rewritten_but_never_read_still_counts_as_unused() {
        let issues = run_check(
            &mut UnusedLocalVariable,
            "<?php function f() { $x = 1; $x = 2; return 3; }",
        );
        assert_eq!(issues.len(), 1);
    }
}
