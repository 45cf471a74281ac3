//! Per-file symbol table: scope arena, symbol arena, reference bindings

mod builder;
mod scope;
mod symbol;
mod table;

pub use builder::build;
pub use scope::{Scope, ScopeId, ScopeKind};
pub use symbol::{Symbol, SymbolId, SymbolKind, Usage, UsageKind};
pub use table::{SymbolTable, UnresolvedReference};
