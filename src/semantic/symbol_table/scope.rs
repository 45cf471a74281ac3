//! Lexical scopes, stored in an arena owned by the symbol table

use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use super::symbol::SymbolId;

/// Index of a scope in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(pub u32);

impl ScopeId {
    /// The file-wide global scope, always present at index 0
    pub const GLOBAL: ScopeId = ScopeId(0);

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// What kind of region a scope covers.
///
/// Function scopes are resolution boundaries for variables: a function body
/// does not see the locals of its enclosing scope (PHP semantics), except
/// through an explicit `global` statement or a closure `use` clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    Global,
    Class,
    Function,
    Block,
}

/// A lexical scope: a name → symbol map plus an index-based parent link.
///
/// The parent link is a weak back-reference into the arena, never ownership,
/// so the scope graph stays cycle-free.
#[derive(Debug)]
pub struct Scope {
    pub kind: ScopeKind,
    pub parent: Option<ScopeId>,
    /// Maps lookup keys to symbols. Variables are keyed verbatim (with the
    /// `$` sigil); functions, classes and methods are keyed lowercase since
    /// PHP resolves those names case-insensitively.
    pub(super) symbols: FxHashMap<SmolStr, SymbolId>,
    pub(super) children: Vec<ScopeId>,
}

impl Scope {
    pub(super) fn new(kind: ScopeKind, parent: Option<ScopeId>) -> Self {
        Self {
            kind,
            parent,
            symbols: FxHashMap::default(),
            children: Vec::new(),
        }
    }

    /// Symbols declared directly in this scope
    pub fn symbol_ids(&self) -> impl Iterator<Item = SymbolId> + '_ {
        self.symbols.values().copied()
    }

    pub fn child_ids(&self) -> &[ScopeId] {
        &self.children
    }
}
