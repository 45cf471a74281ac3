//! Rowan-based lossless parser for PHP
//!
//! This module provides a lossless parser using:
//! - **logos** for fast lexing
//! - **rowan** for the CST (Concrete Syntax Tree)
//!
//! This is the rust-analyzer approach: we build a lossless CST that preserves
//! all whitespace, comments, and inline HTML, then expose a typed AST layer
//! on top.
//!
//! ## Architecture
//!
//! ```text
//! Source Text
//!     ↓
//! Lexer (logos, HTML/PHP mode tracking) → Tokens with SyntaxKind
//!     ↓
//! Parser → GreenNode tree (immutable, cheap to clone)
//!     ↓
//! SyntaxNode (rowan) → CST with parent pointers
//!     ↓
//! AST layer → Typed wrappers over SyntaxNode
//! ```
//!
//! Every byte of the input is owned by exactly one token in the tree, so the
//! original file can be re-derived from the spans alone. Syntax errors are
//! collected, not thrown; the tree is always produced.

#[allow(clippy::module_inception)]
mod parser;

pub mod ast;
pub mod errors;
mod grammar;
pub mod keywords;
mod lexer;
pub mod syntax_kind;

pub use errors::{ErrorCode, SyntaxError};
pub use lexer::{Lexer, Token, tokenize};
pub use parser::{Parse, kind_to_name, parse};
pub use syntax_kind::{PhpLanguage, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};

/// Re-export rowan types for convenience
pub use rowan::{GreenNode, TextRange, TextSize};

#[cfg(test)]
mod tests;
