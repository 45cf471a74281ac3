//! Declared names and their usage sites

use rowan::TextRange;
use smol_str::SmolStr;

use super::scope::ScopeId;

/// Unique identifier for a symbol in the arena.
/// Uses u32 for compact storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SymbolId(pub u32);

impl SymbolId {
    pub fn new(index: usize) -> Self {
        Self(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// The kind of declared entity a symbol stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Variable,
    Parameter,
    Function,
    Class,
    Constant,
    Property,
    Method,
}

impl SymbolKind {
    /// Variables and parameters resolve through the `$`-keyed, function
    /// bounded lookup; everything else through the full scope chain
    pub fn is_variable_like(self) -> bool {
        matches!(self, Self::Variable | Self::Parameter)
    }
}

/// Whether a usage reads or writes the symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageKind {
    Read,
    Write,
}

/// One usage site of a symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Usage {
    pub range: TextRange,
    pub kind: UsageKind,
}

/// A declared name: its kind, declaring scope, declaration site, and every
/// bound usage in source order. Read-only once the builder finishes.
#[derive(Debug, Clone)]
pub struct Symbol {
    pub name: SmolStr,
    pub kind: SymbolKind,
    pub scope: ScopeId,
    /// Range of the declaring identifier token
    pub decl: TextRange,
    pub usages: Vec<Usage>,
}

impl Symbol {
    pub fn reads(&self) -> impl Iterator<Item = &Usage> {
        self.usages.iter().filter(|u| u.kind == UsageKind::Read)
    }

    pub fn writes(&self) -> impl Iterator<Item = &Usage> {
        self.usages.iter().filter(|u| u.kind == UsageKind::Write)
    }
}
