//! Typed wrappers for expression nodes

use super::statements::{BlockStmt, ParamList};
use super::{AstNode, ast_node, first_token, support};
use crate::parser::syntax_kind::{SyntaxKind, SyntaxNode, SyntaxToken};
use smol_str::SmolStr;

ast_node!(ParenExpr, PAREN_EXPR);
ast_node!(AssignExpr, ASSIGN_EXPR);
ast_node!(TernaryExpr, TERNARY_EXPR);
ast_node!(BinaryExpr, BINARY_EXPR);
ast_node!(UnaryExpr, UNARY_EXPR);
ast_node!(PrefixExpr, PREFIX_EXPR);
ast_node!(PostfixExpr, POSTFIX_EXPR);
ast_node!(CallExpr, CALL_EXPR);
ast_node!(ArgList, ARG_LIST);
ast_node!(NewExpr, NEW_EXPR);
ast_node!(MemberAccessExpr, MEMBER_ACCESS_EXPR);
ast_node!(StaticAccessExpr, STATIC_ACCESS_EXPR);
ast_node!(SubscriptExpr, SUBSCRIPT_EXPR);
ast_node!(ArrayExpr, ARRAY_EXPR);
ast_node!(ArrayElem, ARRAY_ELEM);
ast_node!(ClosureExpr, CLOSURE_EXPR);
ast_node!(ClosureUseClause, CLOSURE_USE_CLAUSE);
ast_node!(VarExpr, VAR_EXPR);
ast_node!(NameRef, NAME_REF);
ast_node!(Literal, LITERAL);

impl AssignExpr {
    /// Left-hand side of the assignment
    pub fn target(&self) -> Option<SyntaxNode> {
        self.syntax().children().next()
    }

    /// Right-hand side (may be missing in broken code)
    pub fn value(&self) -> Option<SyntaxNode> {
        self.syntax().children().nth(1)
    }

    /// The assignment operator token (`=`, `+=`, `.=`, ...)
    pub fn op(&self) -> Option<SyntaxToken> {
        self.syntax()
            .children_with_tokens()
            .filter_map(|element| element.into_token())
            .find(|token| !token.kind().is_trivia() && token.kind() != SyntaxKind::AMP)
    }
}

impl BinaryExpr {
    pub fn lhs(&self) -> Option<SyntaxNode> {
        self.syntax().children().next()
    }

    pub fn rhs(&self) -> Option<SyntaxNode> {
        self.syntax().children().nth(1)
    }

    /// The operator token between the operands
    pub fn op(&self) -> Option<SyntaxToken> {
        first_token(self.syntax())
    }
}

impl UnaryExpr {
    pub fn op(&self) -> Option<SyntaxToken> {
        first_token(self.syntax())
    }

    pub fn operand(&self) -> Option<SyntaxNode> {
        self.syntax().children().next()
    }
}

impl CallExpr {
    /// The called expression: a NameRef for free calls, a member/static
    /// access for method calls
    pub fn callee(&self) -> Option<SyntaxNode> {
        self.syntax().children().next()
    }

    pub fn args(&self) -> Option<ArgList> {
        support::child(self.syntax())
    }

    /// Name of the called function when the callee is a plain name
    pub fn callee_name(&self) -> Option<SmolStr> {
        NameRef::cast(self.callee()?).map(|name| name.name())
    }
}

impl ArgList {
    pub fn args(&self) -> impl Iterator<Item = SyntaxNode> {
        self.syntax().children()
    }
}

impl ClosureExpr {
    pub fn params(&self) -> Option<ParamList> {
        support::child(self.syntax())
    }

    pub fn use_clause(&self) -> Option<ClosureUseClause> {
        support::child(self.syntax())
    }

    pub fn body(&self) -> Option<BlockStmt> {
        support::child(self.syntax())
    }
}

impl ClosureUseClause {
    /// The captured `$name` tokens
    pub fn vars(&self) -> impl Iterator<Item = SyntaxToken> {
        support::tokens(self.syntax(), SyntaxKind::VARIABLE)
    }
}

impl VarExpr {
    pub fn token(&self) -> Option<SyntaxToken> {
        support::token(self.syntax(), SyntaxKind::VARIABLE)
    }

    /// Variable name including the `$` sigil
    pub fn name(&self) -> Option<SmolStr> {
        self.token().map(|token| SmolStr::new(token.text()))
    }
}

impl NameRef {
    /// The referenced name without trivia, e.g. `Foo\Bar` or `strlen`
    pub fn name(&self) -> SmolStr {
        let mut out = String::new();
        for element in self.syntax().children_with_tokens() {
            if let Some(token) = element.into_token() {
                if !token.kind().is_trivia() {
                    out.push_str(token.text());
                }
            }
        }
        SmolStr::new(out)
    }

    /// The last identifier segment, used for scope lookups
    pub fn unqualified_name(&self) -> SmolStr {
        let name = self.name();
        match name.rsplit_once('\\') {
            Some((_, tail)) => SmolStr::new(tail),
            None => name,
        }
    }
}

impl Literal {
    pub fn token(&self) -> Option<SyntaxToken> {
        first_token(self.syntax())
    }
}

impl MemberAccessExpr {
    pub fn receiver(&self) -> Option<SyntaxNode> {
        self.syntax().children().next()
    }

    /// The member name token after `->`
    pub fn member(&self) -> Option<SyntaxToken> {
        support::token(self.syntax(), SyntaxKind::IDENT)
    }
}

impl StaticAccessExpr {
    pub fn class(&self) -> Option<SyntaxNode> {
        self.syntax().children().next()
    }

    pub fn member(&self) -> Option<SyntaxToken> {
        self.syntax()
            .children_with_tokens()
            .filter_map(|element| element.into_token())
            .find(|token| {
                matches!(token.kind(), SyntaxKind::IDENT | SyntaxKind::VARIABLE)
            })
    }
}
