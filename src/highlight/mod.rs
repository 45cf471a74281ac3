//! Source highlighting derived from the syntax tree and the symbol table

pub mod symbols;
pub mod syntax;

pub use symbols::{SymbolAnnotation, SymbolOccurrences, symbol_annotations, symbol_occurrences};
pub use syntax::{HighlightKind, HighlightRange, syntax_highlighting};
