//! Builds the symbol table in a single walk of the syntax tree

use rowan::TextRange;
use tracing::debug;

use crate::parser::ast::{
    AssignExpr, AstNode, BlockStmt, CatchClause, ClassConstDecl, ClassDecl, ClosureExpr,
    CompilationUnit, ConstStmt, ForeachStmt, FunctionDecl, GlobalStmt, MethodDecl, NameRef, Param,
    ParamList, PropertyDecl, StaticStmt, VarExpr,
};
use crate::parser::syntax_kind::{SyntaxKind, SyntaxNode};

use super::scope::{ScopeId, ScopeKind};
use super::symbol::{SymbolId, SymbolKind, UsageKind};
use super::table::SymbolTable;

/// Variables PHP injects into every scope
const SUPERGLOBALS: &[&str] = &[
    "$GLOBALS", "$_SERVER", "$_GET", "$_POST", "$_FILES", "$_COOKIE", "$_SESSION", "$_REQUEST",
    "$_ENV",
];

/// Names that look like references but never resolve to a declaration
fn is_builtin_name(name: &str) -> bool {
    ["self", "parent", "static", "list", "array"]
        .iter()
        .any(|builtin| name.eq_ignore_ascii_case(builtin))
}

fn is_superglobal(name: &str) -> bool {
    SUPERGLOBALS.contains(&name)
}

/// Build the symbol table for one file.
///
/// The walk declares names, binds references, and records what it cannot
/// resolve. Unresolved references are data, not errors.
pub fn build(unit: &CompilationUnit) -> SymbolTable {
    let mut builder = Builder {
        table: SymbolTable::new(),
    };
    for name in SUPERGLOBALS {
        builder
            .table
            .declare(name, SymbolKind::Variable, TextRange::empty(0.into()));
    }
    builder.hoist(unit.syntax());
    for child in unit.syntax().children() {
        builder.visit(&child);
    }
    debug!(
        symbols = builder.table.symbols().count(),
        unresolved = builder.table.unresolved().len(),
        "symbol table built"
    );
    builder.table
}

struct Builder {
    table: SymbolTable,
}

impl Builder {
    /// Pre-declare function and class names reachable from `node` without
    /// crossing into another body, so calls before the declaration resolve
    fn hoist(&mut self, node: &SyntaxNode) {
        for child in node.children() {
            match child.kind() {
                SyntaxKind::FUNCTION_DECL => {
                    if let Some(name) = FunctionDecl::cast(child).and_then(|decl| decl.name()) {
                        self.table
                            .declare(name.text(), SymbolKind::Function, name.text_range());
                    }
                }
                SyntaxKind::CLASS_DECL => {
                    if let Some(name) = ClassDecl::cast(child).and_then(|decl| decl.name()) {
                        self.table
                            .declare(name.text(), SymbolKind::Class, name.text_range());
                    }
                }
                SyntaxKind::METHOD_DECL | SyntaxKind::CLOSURE_EXPR => {}
                _ => self.hoist(&child),
            }
        }
    }

    fn visit(&mut self, node: &SyntaxNode) {
        match node.kind() {
            SyntaxKind::FUNCTION_DECL => {
                if let Some(decl) = FunctionDecl::cast(node.clone()) {
                    // name already hoisted
                    self.visit_callable(decl.params(), decl.body(), false);
                }
            }
            SyntaxKind::CLASS_DECL => {
                if let Some(decl) = ClassDecl::cast(node.clone()) {
                    self.visit_class(&decl);
                }
            }
            SyntaxKind::CLOSURE_EXPR => {
                if let Some(closure) = ClosureExpr::cast(node.clone()) {
                    self.visit_closure(&closure);
                }
            }
            SyntaxKind::BLOCK_STMT => {
                self.table.enter_scope(ScopeKind::Block);
                self.visit_children(node);
                self.table.exit_scope();
            }
            SyntaxKind::GLOBAL_STMT => {
                if let Some(stmt) = GlobalStmt::cast(node.clone()) {
                    self.visit_global(&stmt);
                }
            }
            SyntaxKind::STATIC_STMT => {
                if let Some(stmt) = StaticStmt::cast(node.clone()) {
                    for var in stmt.vars() {
                        self.table
                            .declare(var.text(), SymbolKind::Variable, var.text_range());
                    }
                }
                self.visit_children(node);
            }
            SyntaxKind::CONST_STMT => {
                if let Some(stmt) = ConstStmt::cast(node.clone()) {
                    for elem in stmt.elems() {
                        if let Some(name) = elem.name() {
                            self.table.declare(
                                name.text(),
                                SymbolKind::Constant,
                                name.text_range(),
                            );
                        }
                    }
                }
                self.visit_children(node);
            }
            SyntaxKind::ASSIGN_EXPR => {
                if let Some(assign) = AssignExpr::cast(node.clone()) {
                    self.visit_assign(&assign);
                }
            }
            SyntaxKind::FOREACH_STMT => {
                if let Some(stmt) = ForeachStmt::cast(node.clone()) {
                    self.visit_foreach(&stmt);
                }
            }
            SyntaxKind::CATCH_CLAUSE => {
                if let Some(clause) = CatchClause::cast(node.clone()) {
                    self.visit_catch(&clause);
                }
            }
            SyntaxKind::VAR_EXPR => {
                if let Some(var) = VarExpr::cast(node.clone()) {
                    self.visit_var_read(&var);
                }
            }
            SyntaxKind::NAME_REF => {
                if let Some(name_ref) = NameRef::cast(node.clone()) {
                    self.visit_name_ref(&name_ref);
                }
            }
            // imports and namespace names refer outside the file
            SyntaxKind::USE_STMT | SyntaxKind::NAMESPACE_STMT => {}
            _ => self.visit_children(node),
        }
    }

    fn visit_children(&mut self, node: &SyntaxNode) {
        for child in node.children() {
            self.visit(&child);
        }
    }

    /// Function or method body: new function scope, parameters, hoisting,
    /// then the statements. The body block itself does not open an extra
    /// block scope, so parameters and top-level locals share the scope.
    fn visit_callable(
        &mut self,
        params: Option<ParamList>,
        body: Option<BlockStmt>,
        declare_this: bool,
    ) {
        self.table.enter_scope(ScopeKind::Function);
        if declare_this {
            self.table
                .declare("$this", SymbolKind::Variable, TextRange::empty(0.into()));
        }
        if let Some(params) = params {
            for param in params.params() {
                self.visit_param(&param);
            }
        }
        if let Some(body) = body {
            self.hoist(body.syntax());
            self.visit_children(body.syntax());
        }
        self.table.exit_scope();
    }

    fn visit_param(&mut self, param: &Param) {
        if let Some(var) = param.var() {
            self.table
                .declare(var.text(), SymbolKind::Parameter, var.text_range());
        }
        // type hint and default value
        self.visit_children(param.syntax());
    }

    fn visit_class(&mut self, decl: &ClassDecl) {
        for parent in decl.heritage() {
            self.visit_name_ref(&parent);
        }
        self.table.enter_scope(ScopeKind::Class);
        let Some(body) = decl.body() else {
            self.table.exit_scope();
            return;
        };
        // declare all members first so order inside the class does not matter
        for member in body.members() {
            match member.kind() {
                SyntaxKind::METHOD_DECL => {
                    if let Some(name) =
                        MethodDecl::cast(member).and_then(|method| method.name())
                    {
                        self.table
                            .declare(name.text(), SymbolKind::Method, name.text_range());
                    }
                }
                SyntaxKind::PROPERTY_DECL => {
                    if let Some(property) = PropertyDecl::cast(member) {
                        for var in property.vars() {
                            self.table.declare(
                                var.text(),
                                SymbolKind::Property,
                                var.text_range(),
                            );
                        }
                    }
                }
                SyntaxKind::CLASS_CONST_DECL => {
                    if let Some(consts) = ClassConstDecl::cast(member) {
                        for elem in consts.elems() {
                            if let Some(name) = elem.name() {
                                self.table.declare(
                                    name.text(),
                                    SymbolKind::Constant,
                                    name.text_range(),
                                );
                            }
                        }
                    }
                }
                _ => {}
            }
        }
        for member in body.members() {
            match member.kind() {
                SyntaxKind::METHOD_DECL => {
                    if let Some(method) = MethodDecl::cast(member) {
                        self.visit_callable(method.params(), method.body(), !method.is_static());
                    }
                }
                SyntaxKind::PROPERTY_DECL | SyntaxKind::CLASS_CONST_DECL => {
                    // default values and constant initializers
                    self.visit_children(&member);
                }
                _ => {}
            }
        }
        self.table.exit_scope();
    }

    /// Closures capture nothing implicitly; each `use ($x)` reads the outer
    /// `$x` and declares a fresh variable inside the closure
    fn visit_closure(&mut self, closure: &ClosureExpr) {
        let outer = self.table.current_scope();
        self.table.enter_scope(ScopeKind::Function);
        if let Some(use_clause) = closure.use_clause() {
            for var in use_clause.vars() {
                let name = var.text();
                match self.table.lookup_variable_from(outer, name) {
                    Some(id) => self.table.record_usage(id, var.text_range(), UsageKind::Read),
                    None => self.table.record_unresolved(name, var.text_range()),
                }
                self.table
                    .declare(name, SymbolKind::Variable, var.text_range());
            }
        }
        if let Some(params) = closure.params() {
            for param in params.params() {
                self.visit_param(&param);
            }
        }
        if let Some(body) = closure.body() {
            self.hoist(body.syntax());
            self.visit_children(body.syntax());
        }
        self.table.exit_scope();
    }

    fn visit_global(&mut self, stmt: &GlobalStmt) {
        for var in stmt.vars() {
            let name = var.text();
            let id = match self.table.lookup_variable_from(ScopeId::GLOBAL, name) {
                Some(id) => {
                    self.table
                        .record_usage(id, var.text_range(), UsageKind::Write);
                    id
                }
                None => self.table.declare_in(
                    ScopeId::GLOBAL,
                    name,
                    SymbolKind::Variable,
                    var.text_range(),
                ),
            };
            self.table.alias_into_current(name, id);
        }
    }

    /// Right-hand side first, so `$x = $x + 1` reads the old binding before
    /// the write is recorded
    fn visit_assign(&mut self, assign: &AssignExpr) {
        if let Some(value) = assign.value() {
            self.visit(&value);
        }
        let Some(target) = assign.target() else {
            return;
        };
        match VarExpr::cast(target.clone()) {
            Some(var) => {
                let plain = assign
                    .op()
                    .is_some_and(|op| op.kind() == SyntaxKind::EQ);
                self.visit_var_write(&var, plain);
            }
            // `$a[0] = x` and `$o->p = x` read the base variable
            None => self.visit(&target),
        }
    }

    fn visit_foreach(&mut self, stmt: &ForeachStmt) {
        let node = stmt.syntax();
        let targets = foreach_span(node);
        for child in node.children() {
            let range = child.text_range();
            let is_target = targets
                .is_some_and(|(start, end)| range.start() >= start && range.end() <= end);
            if is_target {
                match VarExpr::cast(child.clone()) {
                    Some(var) => self.visit_var_write(&var, true),
                    None => self.visit(&child),
                }
            } else {
                self.visit(&child);
            }
        }
    }

    fn visit_catch(&mut self, clause: &CatchClause) {
        for ty in clause.exception_types() {
            self.visit_name_ref(&ty);
        }
        if let Some(var) = clause.var() {
            self.table
                .declare(var.text(), SymbolKind::Variable, var.text_range());
        }
        if let Some(body) = clause.body() {
            self.visit(body.syntax());
        }
    }

    /// A write target: binds an existing variable or declares a new one.
    /// Compound assignment to an unknown variable is a read of something
    /// that does not exist, so it is recorded as unresolved instead.
    fn visit_var_write(&mut self, var: &VarExpr, declares: bool) {
        let Some(token) = var.token() else {
            return;
        };
        let name = token.text();
        match self.resolve_variable(name) {
            Some(id) => self
                .table
                .record_usage(id, token.text_range(), UsageKind::Write),
            None if declares => {
                self.table
                    .declare(name, SymbolKind::Variable, token.text_range());
            }
            None => self.table.record_unresolved(name, token.text_range()),
        }
    }

    fn visit_var_read(&mut self, var: &VarExpr) {
        let Some(token) = var.token() else {
            return;
        };
        let name = token.text();
        match self.resolve_variable(name) {
            Some(id) => self
                .table
                .record_usage(id, token.text_range(), UsageKind::Read),
            None => self.table.record_unresolved(name, token.text_range()),
        }
    }

    fn visit_name_ref(&mut self, name_ref: &NameRef) {
        let name = name_ref.name();
        if name.is_empty() || is_builtin_name(&name) {
            return;
        }
        let range = name_ref.syntax().text_range();
        let scope = self.table.current_scope();
        match self
            .table
            .lookup_name_from(scope, name_ref.unqualified_name().as_str())
        {
            Some(id) => self.table.record_usage(id, range, UsageKind::Read),
            None => self.table.record_unresolved(&name, range),
        }
    }

    /// Scope-chain lookup, falling back to the global scope for superglobals
    /// which are visible inside every function
    fn resolve_variable(&self, name: &str) -> Option<SymbolId> {
        let current = self.table.current_scope();
        self.table.lookup_variable_from(current, name).or_else(|| {
            if is_superglobal(name) {
                self.table.lookup_variable_from(ScopeId::GLOBAL, name)
            } else {
                None
            }
        })
    }
}

fn foreach_span(node: &SyntaxNode) -> Option<(rowan::TextSize, rowan::TextSize)> {
    let mut start = None;
    let mut end = None;
    for element in node.children_with_tokens() {
        if let Some(token) = element.into_token() {
            match token.kind() {
                SyntaxKind::AS_KW => start = Some(token.text_range().end()),
                SyntaxKind::R_PAREN if end.is_none() && start.is_some() => {
                    end = Some(token.text_range().start());
                }
                _ => {}
            }
        }
    }
    Some((start?, end?))
}
