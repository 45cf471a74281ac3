//! Symbol highlighting: declarations plus every bound reference
//!
//! Unresolved references never appear here; only names the symbol table
//! actually bound are linkable in a UI.

use rowan::TextRange;

use crate::semantic::{SymbolId, SymbolKind, SymbolTable};

/// One highlighted name, classified by the symbol it binds to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymbolAnnotation {
    pub range: TextRange,
    pub kind: SymbolKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolOccurrences {
    pub symbol: SymbolId,
    pub kind: SymbolKind,
    pub declaration: TextRange,
    /// Usage ranges in source order
    pub references: Vec<TextRange>,
}

/// The flat annotation sequence for a file: every declaration and usage of
/// every bound symbol, sorted by start offset, non-overlapping. Synthetic
/// declarations (superglobals, `$this`) contribute their usages only.
pub fn symbol_annotations(table: &SymbolTable) -> Vec<SymbolAnnotation> {
    let mut annotations = Vec::new();
    for (_, symbol) in table.symbols() {
        if !symbol.decl.is_empty() {
            annotations.push(SymbolAnnotation {
                range: symbol.decl,
                kind: symbol.kind,
            });
        }
        for usage in &symbol.usages {
            annotations.push(SymbolAnnotation {
                range: usage.range,
                kind: symbol.kind,
            });
        }
    }
    annotations.sort_by_key(|annotation| (annotation.range.start(), annotation.range.end()));
    // a closure `use` capture reads the outer symbol and declares the inner
    // one at the same token
    annotations.dedup_by_key(|annotation| annotation.range);
    annotations
}

/// One entry per declared symbol, grouped, in declaration offset order.
/// Symbols without a source declaration (superglobals, `$this`) are skipped.
pub fn symbol_occurrences(table: &SymbolTable) -> Vec<SymbolOccurrences> {
    let mut occurrences: Vec<_> = table
        .symbols()
        .filter(|(_, symbol)| !symbol.decl.is_empty())
        .map(|(id, symbol)| SymbolOccurrences {
            symbol: id,
            kind: symbol.kind,
            declaration: symbol.decl,
            references: symbol.usages.iter().map(|usage| usage.range).collect(),
        })
        .collect();
    occurrences.sort_by_key(|occurrence| occurrence.declaration.start());
    occurrences
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use crate::semantic::build;

    fn occurrences_for(source: &str) -> Vec<SymbolOccurrences> {
        let parse = parse(source);
        symbol_occurrences(&build(&parse.tree()))
    }

    fn annotations_for(source: &str) -> Vec<SymbolAnnotation> {
        let parse = parse(source);
        symbol_annotations(&build(&parse.tree()))
    }

    #[test]
    fn declaration_and_references_are_linked() {
        let source = "<?php $x = 1; echo $x + $x;";
        let result = occurrences_for(source);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].kind, SymbolKind::Variable);
        assert_eq!(result[0].references.len(), 2);
    }

    #[test]
    fn unresolved_references_are_excluded() {
        assert!(occurrences_for("<?php echo $nowhere;").is_empty());
        assert!(annotations_for("<?php echo $nowhere;").is_empty());
    }

    #[test]
    fn function_references_point_at_the_declaration() {
        let source = "<?php function f() {} f(); f();";
        let result = occurrences_for(source);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].kind, SymbolKind::Function);
        assert_eq!(result[0].references.len(), 2);
    }

    #[test]
    fn annotations_are_sorted_and_disjoint() {
        // the hoisted function is declared before $a in the symbol arena but
        // sits later in the text
        let annotations = annotations_for("<?php $a = 1; function f() {} f(); echo $a;");
        assert_eq!(annotations.len(), 4);
        for pair in annotations.windows(2) {
            assert!(pair[0].range.end() <= pair[1].range.start());
        }
    }

    #[test]
    fn closure_capture_is_annotated_once() {
        let annotations =
            annotations_for("<?php $n = 1; $f = function () use ($n) { return $n; };");
        let captures: Vec<_> = annotations
            .iter()
            .filter(|annotation| annotation.kind == SymbolKind::Variable)
            .collect();
        for pair in captures.windows(2) {
            assert!(pair[0].range.end() <= pair[1].range.start());
        }
    }

    #[test]
    fn occurrences_come_in_declaration_offset_order() {
        let result = occurrences_for("<?php $a = 1; function f() {} f(); echo $a;");
        let starts: Vec<_> = result
            .iter()
            .map(|occurrence| occurrence.declaration.start())
            .collect();
        let mut sorted = starts.clone();
        sorted.sort();
        assert_eq!(starts, sorted);
    }
}
