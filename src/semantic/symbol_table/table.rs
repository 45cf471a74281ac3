//! The symbol table: arenas, lookups, and reference bindings

use rowan::TextRange;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use tracing::trace;

use super::scope::{Scope, ScopeId, ScopeKind};
use super::symbol::{Symbol, SymbolId, SymbolKind, Usage, UsageKind};

/// A reference that did not resolve to any declaration.
///
/// Not an error: PHP permits forward and dynamic resolution, so unresolved
/// references are recorded and left for the checks that care.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedReference {
    pub name: SmolStr,
    pub range: TextRange,
}

/// All scopes and symbols for one file.
///
/// Built once per file by [`super::build`] and read-only afterwards; the
/// per-file context drops it wholesale before the next file.
pub struct SymbolTable {
    pub(super) scopes: Vec<Scope>,
    pub(super) arena: Vec<Symbol>,
    pub(super) current: ScopeId,
    /// Reference range → symbol, covering declarations and usages
    bindings: FxHashMap<(u32, u32), SymbolId>,
    unresolved: Vec<UnresolvedReference>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self {
            scopes: vec![Scope::new(ScopeKind::Global, None)],
            arena: Vec::new(),
            current: ScopeId::GLOBAL,
            bindings: FxHashMap::default(),
            unresolved: Vec::new(),
        }
    }

    // =========================================================================
    // Scope management (builder-side)
    // =========================================================================

    pub(super) fn enter_scope(&mut self, kind: ScopeKind) -> ScopeId {
        let parent = self.current;
        let id = ScopeId(self.scopes.len() as u32);
        self.scopes.push(Scope::new(kind, Some(parent)));
        self.scopes[parent.index()].children.push(id);
        self.current = id;
        id
    }

    pub(super) fn exit_scope(&mut self) {
        if let Some(parent) = self.scopes[self.current.index()].parent {
            self.current = parent;
        }
    }

    pub(super) fn current_scope(&self) -> ScopeId {
        self.current
    }

    // =========================================================================
    // Declarations and usages (builder-side)
    // =========================================================================

    /// Declare `name` in `scope`. First declaration wins: redeclaring an
    /// existing name records a write usage on the existing symbol instead.
    pub(super) fn declare_in(
        &mut self,
        scope: ScopeId,
        name: &str,
        kind: SymbolKind,
        decl: TextRange,
    ) -> SymbolId {
        let key = scope_key(kind, name);
        if let Some(&existing) = self.scopes[scope.index()].symbols.get(&key) {
            trace!(name, ?scope, "redeclaration binds to existing symbol");
            self.record_usage(existing, decl, UsageKind::Write);
            return existing;
        }
        let id = SymbolId::new(self.arena.len());
        self.arena.push(Symbol {
            name: SmolStr::new(name),
            kind,
            scope,
            decl,
            usages: Vec::new(),
        });
        self.scopes[scope.index()].symbols.insert(key, id);
        self.bindings.insert(range_key(decl), id);
        trace!(name, ?scope, ?kind, "declared symbol");
        id
    }

    /// Declare in the current scope
    pub(super) fn declare(&mut self, name: &str, kind: SymbolKind, decl: TextRange) -> SymbolId {
        self.declare_in(self.current, name, kind, decl)
    }

    /// Make `name` resolve to an existing symbol from the current scope on,
    /// as `global $x` does for the global symbol
    pub(super) fn alias_into_current(&mut self, name: &str, id: SymbolId) {
        let key = scope_key(self.arena[id.index()].kind, name);
        self.scopes[self.current.index()].symbols.entry(key).or_insert(id);
    }

    pub(super) fn record_usage(&mut self, id: SymbolId, range: TextRange, kind: UsageKind) {
        self.arena[id.index()].usages.push(Usage { range, kind });
        self.bindings.insert(range_key(range), id);
    }

    pub(super) fn record_unresolved(&mut self, name: &str, range: TextRange) {
        self.unresolved.push(UnresolvedReference {
            name: SmolStr::new(name),
            range,
        });
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    /// Resolve a `$variable` name starting at `scope`.
    ///
    /// Walks block scopes outwards but stops at the first function scope:
    /// a function body does not see enclosing locals.
    pub fn lookup_variable_from(&self, scope: ScopeId, name: &str) -> Option<SymbolId> {
        let key = scope_key(SymbolKind::Variable, name);
        let mut next = Some(scope);
        while let Some(id) = next {
            let scope = &self.scopes[id.index()];
            if let Some(&symbol) = scope.symbols.get(&key) {
                return Some(symbol);
            }
            if scope.kind == ScopeKind::Function {
                return None;
            }
            next = scope.parent;
        }
        None
    }

    /// Resolve a function/class/constant name starting at `scope`, walking
    /// the full chain. Function and class names match case-insensitively.
    pub fn lookup_name_from(&self, scope: ScopeId, name: &str) -> Option<SymbolId> {
        let key = scope_key(SymbolKind::Function, name);
        let raw = SmolStr::new(name);
        let mut next = Some(scope);
        while let Some(id) = next {
            let scope = &self.scopes[id.index()];
            if let Some(&symbol) = scope.symbols.get(&key) {
                return Some(symbol);
            }
            // Constants are case-sensitive and keyed verbatim
            if let Some(&symbol) = scope.symbols.get(&raw) {
                return Some(symbol);
            }
            next = scope.parent;
        }
        None
    }

    /// The symbol a reference or declaration range is bound to
    pub fn resolve(&self, range: TextRange) -> Option<SymbolId> {
        self.bindings.get(&range_key(range)).copied()
    }

    // =========================================================================
    // Enumeration
    // =========================================================================

    pub fn symbol(&self, id: SymbolId) -> &Symbol {
        &self.arena[id.index()]
    }

    pub fn symbols(&self) -> impl Iterator<Item = (SymbolId, &Symbol)> {
        self.arena
            .iter()
            .enumerate()
            .map(|(index, symbol)| (SymbolId::new(index), symbol))
    }

    pub fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.index()]
    }

    pub fn scopes(&self) -> impl Iterator<Item = (ScopeId, &Scope)> {
        self.scopes
            .iter()
            .enumerate()
            .map(|(index, scope)| (ScopeId(index as u32), scope))
    }

    pub fn unresolved(&self) -> &[UnresolvedReference] {
        &self.unresolved
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

fn range_key(range: TextRange) -> (u32, u32) {
    (range.start().into(), range.end().into())
}

/// Lookup key for a name: variables keep the `$` sigil verbatim, functions,
/// classes and methods fold to lowercase (PHP matches them case-insensitively)
fn scope_key(kind: SymbolKind, name: &str) -> SmolStr {
    match kind {
        SymbolKind::Variable
        | SymbolKind::Parameter
        | SymbolKind::Constant
        | SymbolKind::Property => SmolStr::new(name),
        _ => SmolStr::new(name.to_ascii_lowercase()),
    }
}
