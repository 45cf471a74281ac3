//! # php-analysis
//!
//! Core library for PHP parsing, AST, symbol resolution, and pluggable
//! analysis checks.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! analyzer  → per-file pipeline (decode, parse, resolve, fan out)
//!   ↓
//! checks    → pluggable checks and the check engine
//! metrics   → structural counts and cyclomatic complexity
//! highlight → syntax and symbol highlighting
//!   ↓
//! semantic  → scopes, symbols, reference binding
//!   ↓
//! parser    → Logos lexer, recursive-descent parser, typed AST layer
//!   ↓
//! base      → primitives (LineIndex, LineCol)
//! ```
//!
//! Per file, control flow is: raw bytes → decode under the declared charset
//! → [`parser::parse`] → [`semantic::SymbolTable`] → fan-out to the check
//! engine, metrics visitor, and highlighting visitors, each reading the same
//! immutable tree. One [`analyzer::FileContext`] is built per file and
//! dropped afterwards; nothing is shared across files.

// ============================================================================
// MODULES (dependency order: base → parser → semantic → passes → analyzer)
// ============================================================================

/// Foundation types: LineIndex, LineCol
pub mod base;

/// Parser: Logos lexer, recursive-descent parser, typed AST
pub mod parser;

/// Semantic model: scopes, symbols, reference binding
pub mod semantic;

/// Pluggable checks and the check engine
pub mod checks;

/// File measures: line counts, statements, cyclomatic complexity
pub mod metrics;

/// Syntax and symbol highlighting
pub mod highlight;

/// Per-file analysis pipeline
pub mod analyzer;

// Re-export commonly needed items
pub use analyzer::{AnalyzeError, Analyzer, FileAnalysis, FileContext};
pub use base::{LineCol, LineIndex};
pub use checks::{Check, CheckContext, Issue};
pub use metrics::FileMeasures;
pub use parser::{Parse, SyntaxKind, SyntaxNode, TextRange, TextSize};
pub use semantic::{SymbolKind, SymbolTable};
