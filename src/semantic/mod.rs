//! Semantic model: scopes, symbols, and reference binding
//!
//! The [`SymbolTable`] for one file is produced by a single top-down walk of
//! the syntax tree ([`symbol_table::build`]) and is read-only afterwards.
//! Scopes form an arena with index-based parent links; symbols live in a
//! second arena in declaration order, which keeps the build deterministic.

pub mod symbol_table;

pub use symbol_table::{
    Scope, ScopeId, ScopeKind, Symbol, SymbolId, SymbolKind, SymbolTable, UnresolvedReference,
    Usage, UsageKind, build,
};
