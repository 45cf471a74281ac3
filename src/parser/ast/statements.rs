//! Typed wrappers for statement and declaration nodes

use super::expressions::NameRef;
use super::{AstNode, ast_node, support};
use crate::parser::syntax_kind::{SyntaxKind, SyntaxNode, SyntaxToken};

ast_node!(BlockStmt, BLOCK_STMT);
ast_node!(ExprStmt, EXPR_STMT);
ast_node!(EchoStmt, ECHO_STMT);
ast_node!(IfStmt, IF_STMT);
ast_node!(ElseifClause, ELSEIF_CLAUSE);
ast_node!(ElseClause, ELSE_CLAUSE);
ast_node!(WhileStmt, WHILE_STMT);
ast_node!(DoStmt, DO_STMT);
ast_node!(ForStmt, FOR_STMT);
ast_node!(ForeachStmt, FOREACH_STMT);
ast_node!(SwitchStmt, SWITCH_STMT);
ast_node!(CaseClause, CASE_CLAUSE);
ast_node!(DefaultClause, DEFAULT_CLAUSE);
ast_node!(ReturnStmt, RETURN_STMT);
ast_node!(ThrowStmt, THROW_STMT);
ast_node!(TryStmt, TRY_STMT);
ast_node!(CatchClause, CATCH_CLAUSE);
ast_node!(FinallyClause, FINALLY_CLAUSE);
ast_node!(GlobalStmt, GLOBAL_STMT);
ast_node!(StaticStmt, STATIC_STMT);
ast_node!(ConstStmt, CONST_STMT);
ast_node!(ConstElem, CONST_ELEM);
ast_node!(NamespaceStmt, NAMESPACE_STMT);
ast_node!(UseStmt, USE_STMT);

ast_node!(FunctionDecl, FUNCTION_DECL);
ast_node!(ParamList, PARAM_LIST);
ast_node!(Param, PARAM);
ast_node!(ClassDecl, CLASS_DECL);
ast_node!(ClassBody, CLASS_BODY);
ast_node!(PropertyDecl, PROPERTY_DECL);
ast_node!(ClassConstDecl, CLASS_CONST_DECL);
ast_node!(MethodDecl, METHOD_DECL);

impl BlockStmt {
    pub fn statements(&self) -> impl Iterator<Item = SyntaxNode> {
        self.syntax().children()
    }
}

impl ExprStmt {
    pub fn expr(&self) -> Option<SyntaxNode> {
        self.syntax().children().next()
    }
}

impl GlobalStmt {
    /// The `$name` tokens bound to the global scope
    pub fn vars(&self) -> impl Iterator<Item = SyntaxToken> {
        support::tokens(self.syntax(), SyntaxKind::VARIABLE)
    }
}

impl StaticStmt {
    pub fn vars(&self) -> impl Iterator<Item = SyntaxToken> {
        support::tokens(self.syntax(), SyntaxKind::VARIABLE)
    }
}

impl CatchClause {
    pub fn exception_types(&self) -> impl Iterator<Item = NameRef> {
        support::children(self.syntax())
    }

    /// The caught `$e` variable
    pub fn var(&self) -> Option<SyntaxToken> {
        support::token(self.syntax(), SyntaxKind::VARIABLE)
    }

    pub fn body(&self) -> Option<BlockStmt> {
        support::child(self.syntax())
    }
}

impl ConstElem {
    pub fn name(&self) -> Option<SyntaxToken> {
        support::token(self.syntax(), SyntaxKind::IDENT)
    }
}

impl ConstStmt {
    pub fn elems(&self) -> impl Iterator<Item = ConstElem> {
        support::children(self.syntax())
    }
}

impl FunctionDecl {
    pub fn name(&self) -> Option<SyntaxToken> {
        support::token(self.syntax(), SyntaxKind::IDENT)
    }

    pub fn params(&self) -> Option<ParamList> {
        support::child(self.syntax())
    }

    pub fn body(&self) -> Option<BlockStmt> {
        support::child(self.syntax())
    }
}

impl MethodDecl {
    pub fn name(&self) -> Option<SyntaxToken> {
        support::token(self.syntax(), SyntaxKind::IDENT)
    }

    pub fn params(&self) -> Option<ParamList> {
        support::child(self.syntax())
    }

    /// `None` for abstract and interface methods
    pub fn body(&self) -> Option<BlockStmt> {
        support::child(self.syntax())
    }

    pub fn is_static(&self) -> bool {
        support::token(self.syntax(), SyntaxKind::STATIC_KW).is_some()
    }
}

impl ParamList {
    pub fn params(&self) -> impl Iterator<Item = Param> {
        support::children(self.syntax())
    }
}

impl Param {
    /// The `$name` token of the parameter
    pub fn var(&self) -> Option<SyntaxToken> {
        support::token(self.syntax(), SyntaxKind::VARIABLE)
    }
}

impl ClassDecl {
    pub fn name(&self) -> Option<SyntaxToken> {
        support::token(self.syntax(), SyntaxKind::IDENT)
    }

    pub fn body(&self) -> Option<ClassBody> {
        support::child(self.syntax())
    }

    /// Parent class and interface references
    pub fn heritage(&self) -> impl Iterator<Item = NameRef> {
        support::children(self.syntax())
    }
}

impl ClassBody {
    pub fn members(&self) -> impl Iterator<Item = SyntaxNode> {
        self.syntax().children()
    }
}

impl PropertyDecl {
    pub fn vars(&self) -> impl Iterator<Item = SyntaxToken> {
        support::tokens(self.syntax(), SyntaxKind::VARIABLE)
    }
}

impl ClassConstDecl {
    pub fn elems(&self) -> impl Iterator<Item = ConstElem> {
        support::children(self.syntax())
    }
}
