//! Typed AST layer over the rowan CST
//!
//! Zero-cost wrappers: each type is a newtype over [`SyntaxNode`] that only
//! casts when the kind matches. Accessors walk the children on demand, so
//! the tree itself stays the single immutable source of truth.

mod expressions;
mod statements;

pub use expressions::*;
pub use statements::*;

use super::syntax_kind::{SyntaxKind, SyntaxNode, SyntaxToken};

/// A typed view over a [`SyntaxNode`] of a known kind
pub trait AstNode {
    fn can_cast(kind: SyntaxKind) -> bool
    where
        Self: Sized;

    fn cast(syntax: SyntaxNode) -> Option<Self>
    where
        Self: Sized;

    fn syntax(&self) -> &SyntaxNode;

    /// Source text of this node, trivia included
    fn text(&self) -> String
    where
        Self: Sized,
    {
        self.syntax().text().to_string()
    }
}

macro_rules! ast_node {
    ($(#[$attr:meta])* $name:ident, $kind:ident) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name {
            syntax: $crate::parser::syntax_kind::SyntaxNode,
        }

        impl $crate::parser::ast::AstNode for $name {
            fn can_cast(kind: $crate::parser::syntax_kind::SyntaxKind) -> bool {
                kind == $crate::parser::syntax_kind::SyntaxKind::$kind
            }

            fn cast(syntax: $crate::parser::syntax_kind::SyntaxNode) -> Option<Self> {
                Self::can_cast(syntax.kind()).then(|| Self { syntax })
            }

            fn syntax(&self) -> &$crate::parser::syntax_kind::SyntaxNode {
                &self.syntax
            }
        }
    };
}
pub(crate) use ast_node;

/// Child lookup helpers shared by the typed accessors
pub(crate) mod support {
    use super::{AstNode, SyntaxKind, SyntaxNode, SyntaxToken};

    pub(crate) fn child<N: AstNode>(parent: &SyntaxNode) -> Option<N> {
        parent.children().find_map(N::cast)
    }

    pub(crate) fn children<N: AstNode>(parent: &SyntaxNode) -> impl Iterator<Item = N> {
        parent.children().filter_map(N::cast)
    }

    pub(crate) fn token(parent: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxToken> {
        tokens(parent, kind).next()
    }

    pub(crate) fn tokens(
        parent: &SyntaxNode,
        kind: SyntaxKind,
    ) -> impl Iterator<Item = SyntaxToken> {
        parent
            .children_with_tokens()
            .filter_map(|element| element.into_token())
            .filter(move |token| token.kind() == kind)
    }
}

ast_node!(
    /// Root of every parse; spans the entire file
    CompilationUnit,
    COMPILATION_UNIT
);

impl CompilationUnit {
    /// Top-level nodes in source order (statements and declarations)
    pub fn items(&self) -> impl Iterator<Item = SyntaxNode> {
        self.syntax.children()
    }
}

/// First non-trivia token child of a node, e.g. the operator of a binary
/// expression
pub(crate) fn first_token(node: &SyntaxNode) -> Option<SyntaxToken> {
    node.children_with_tokens()
        .filter_map(|element| element.into_token())
        .find(|token| !token.kind().is_trivia())
}
