//! Statement-level grammar rules

use super::declarations::{class_decl, function_decl};
use super::expressions::expr;
use super::{STATEMENT_RECOVERY, bump_script_tag};
use crate::parser::errors::ErrorCode;
use crate::parser::parser::Parser;
use crate::parser::syntax_kind::SyntaxKind;

/// Statement = Block | If | While | Do | For | Foreach | Switch | Break
///           | Continue | Return | Throw | Try | Global | StaticVar | Echo
///           | Const | Namespace | Use | FunctionDecl | ClassDecl
///           | Empty | ExprStmt
pub(crate) fn statement(p: &mut Parser) {
    match p.peek() {
        SyntaxKind::L_BRACE => block_stmt(p),
        SyntaxKind::IF_KW => if_stmt(p),
        SyntaxKind::WHILE_KW => while_stmt(p),
        SyntaxKind::DO_KW => do_stmt(p),
        SyntaxKind::FOR_KW => for_stmt(p),
        SyntaxKind::FOREACH_KW => foreach_stmt(p),
        SyntaxKind::SWITCH_KW => switch_stmt(p),
        SyntaxKind::BREAK_KW => jump_stmt(p, SyntaxKind::BREAK_STMT),
        SyntaxKind::CONTINUE_KW => jump_stmt(p, SyntaxKind::CONTINUE_STMT),
        SyntaxKind::RETURN_KW => return_stmt(p),
        SyntaxKind::THROW_KW => throw_stmt(p),
        SyntaxKind::TRY_KW => try_stmt(p),
        SyntaxKind::GLOBAL_KW => global_stmt(p),
        SyntaxKind::ECHO_KW | SyntaxKind::OPEN_TAG_ECHO => echo_stmt(p),
        SyntaxKind::CONST_KW => const_stmt(p),
        SyntaxKind::NAMESPACE_KW => namespace_stmt(p),
        SyntaxKind::USE_KW => use_stmt(p),
        SyntaxKind::SEMICOLON => {
            p.start_node(SyntaxKind::EMPTY_STMT);
            p.bump();
            p.finish_node();
        }
        SyntaxKind::STATIC_KW if p.nth(1) == SyntaxKind::VARIABLE => static_stmt(p),
        SyntaxKind::FUNCTION_KW if at_function_decl(p) => function_decl(p),
        SyntaxKind::ABSTRACT_KW
        | SyntaxKind::FINAL_KW
        | SyntaxKind::CLASS_KW
        | SyntaxKind::INTERFACE_KW
        | SyntaxKind::TRAIT_KW => class_decl(p),
        _ => expr_stmt(p),
    }
}

/// `function` starts a declaration only when a name follows; otherwise it
/// is a closure expression
fn at_function_decl(p: &mut Parser) -> bool {
    match p.nth(1) {
        SyntaxKind::IDENT => true,
        SyntaxKind::AMP => p.nth(2) == SyntaxKind::IDENT,
        _ => false,
    }
}

/// Consume `;`, tolerating its omission before `?>` or end of input
fn eat_terminator(p: &mut Parser) {
    if !p.eat(SyntaxKind::SEMICOLON)
        && !p.at(SyntaxKind::CLOSE_TAG)
        && !p.at_eof()
    {
        p.error("expected ';'", ErrorCode::E0201);
    }
}

/// Statement list inside `{ ... }` or a switch clause, handling interleaved
/// inline HTML
fn statement_list(p: &mut Parser, terminators: &[SyntaxKind]) {
    loop {
        if bump_script_tag(p) {
            continue;
        }
        if p.at_eof() || p.at_any(terminators) {
            break;
        }
        let before = p.position();
        statement(p);
        if p.position() == before && !p.at_eof() {
            p.error("unexpected token", ErrorCode::E0901);
            p.bump();
        }
    }
}

/// Block = '{' Statement* '}'
pub(crate) fn block_stmt(p: &mut Parser) {
    p.start_node(SyntaxKind::BLOCK_STMT);
    p.expect(SyntaxKind::L_BRACE, ErrorCode::E0202);
    statement_list(p, &[SyntaxKind::R_BRACE]);
    p.expect(SyntaxKind::R_BRACE, ErrorCode::E0202);
    p.finish_node();
}

/// Condition = '(' Expr ')'
fn condition(p: &mut Parser) {
    p.expect(SyntaxKind::L_PAREN, ErrorCode::E0203);
    expr(p);
    p.expect(SyntaxKind::R_PAREN, ErrorCode::E0203);
}

/// If = 'if' Condition Statement ElseifClause* ElseClause?
fn if_stmt(p: &mut Parser) {
    p.start_node(SyntaxKind::IF_STMT);
    p.bump(); // if
    condition(p);
    statement(p);
    while p.at(SyntaxKind::ELSEIF_KW) {
        p.start_node(SyntaxKind::ELSEIF_CLAUSE);
        p.bump();
        condition(p);
        statement(p);
        p.finish_node();
    }
    if p.at(SyntaxKind::ELSE_KW) {
        p.start_node(SyntaxKind::ELSE_CLAUSE);
        p.bump();
        statement(p);
        p.finish_node();
    }
    p.finish_node();
}

/// While = 'while' Condition Statement
fn while_stmt(p: &mut Parser) {
    p.start_node(SyntaxKind::WHILE_STMT);
    p.bump(); // while
    condition(p);
    statement(p);
    p.finish_node();
}

/// Do = 'do' Statement 'while' Condition ';'
fn do_stmt(p: &mut Parser) {
    p.start_node(SyntaxKind::DO_STMT);
    p.bump(); // do
    statement(p);
    p.expect(SyntaxKind::WHILE_KW, ErrorCode::E0901);
    condition(p);
    eat_terminator(p);
    p.finish_node();
}

/// For = 'for' '(' ExprList? ';' ExprList? ';' ExprList? ')' Statement
fn for_stmt(p: &mut Parser) {
    p.start_node(SyntaxKind::FOR_STMT);
    p.bump(); // for
    p.expect(SyntaxKind::L_PAREN, ErrorCode::E0203);
    for _ in 0..2 {
        if !p.at(SyntaxKind::SEMICOLON) {
            expr_list(p);
        }
        p.expect(SyntaxKind::SEMICOLON, ErrorCode::E0201);
    }
    if !p.at(SyntaxKind::R_PAREN) {
        expr_list(p);
    }
    p.expect(SyntaxKind::R_PAREN, ErrorCode::E0203);
    statement(p);
    p.finish_node();
}

/// Foreach = 'foreach' '(' Expr 'as' ForeachTarget ('=>' ForeachTarget)? ')' Statement
fn foreach_stmt(p: &mut Parser) {
    p.start_node(SyntaxKind::FOREACH_STMT);
    p.bump(); // foreach
    p.expect(SyntaxKind::L_PAREN, ErrorCode::E0203);
    expr(p);
    p.expect(SyntaxKind::AS_KW, ErrorCode::E0901);
    foreach_target(p);
    if p.eat(SyntaxKind::FAT_ARROW) {
        foreach_target(p);
    }
    p.expect(SyntaxKind::R_PAREN, ErrorCode::E0203);
    statement(p);
    p.finish_node();
}

/// ForeachTarget = '&'? Expr
fn foreach_target(p: &mut Parser) {
    p.eat(SyntaxKind::AMP);
    expr(p);
}

/// Switch = 'switch' Condition '{' (CaseClause | DefaultClause)* '}'
fn switch_stmt(p: &mut Parser) {
    p.start_node(SyntaxKind::SWITCH_STMT);
    p.bump(); // switch
    condition(p);
    p.expect(SyntaxKind::L_BRACE, ErrorCode::E0202);
    loop {
        match p.peek() {
            SyntaxKind::CASE_KW => {
                p.start_node(SyntaxKind::CASE_CLAUSE);
                p.bump();
                expr(p);
                if !p.eat(SyntaxKind::COLON) {
                    p.eat(SyntaxKind::SEMICOLON);
                }
                statement_list(
                    p,
                    &[SyntaxKind::CASE_KW, SyntaxKind::DEFAULT_KW, SyntaxKind::R_BRACE],
                );
                p.finish_node();
            }
            SyntaxKind::DEFAULT_KW => {
                p.start_node(SyntaxKind::DEFAULT_CLAUSE);
                p.bump();
                if !p.eat(SyntaxKind::COLON) {
                    p.eat(SyntaxKind::SEMICOLON);
                }
                statement_list(
                    p,
                    &[SyntaxKind::CASE_KW, SyntaxKind::DEFAULT_KW, SyntaxKind::R_BRACE],
                );
                p.finish_node();
            }
            SyntaxKind::R_BRACE => break,
            _ => {
                if p.at_eof() {
                    break;
                }
                p.error_recover(
                    "expected 'case', 'default' or '}'",
                    ErrorCode::E0901,
                    &[SyntaxKind::CASE_KW, SyntaxKind::DEFAULT_KW, SyntaxKind::R_BRACE],
                );
                if !p.at_any(&[SyntaxKind::CASE_KW, SyntaxKind::DEFAULT_KW, SyntaxKind::R_BRACE]) {
                    break;
                }
            }
        }
    }
    p.expect(SyntaxKind::R_BRACE, ErrorCode::E0202);
    p.finish_node();
}

/// Break/Continue = kw Expr? ';'
fn jump_stmt(p: &mut Parser, kind: SyntaxKind) {
    p.start_node(kind);
    p.bump();
    if !p.at(SyntaxKind::SEMICOLON) && !p.at(SyntaxKind::CLOSE_TAG) && !p.at_eof() {
        expr(p);
    }
    eat_terminator(p);
    p.finish_node();
}

/// Return = 'return' Expr? ';'
fn return_stmt(p: &mut Parser) {
    p.start_node(SyntaxKind::RETURN_STMT);
    p.bump();
    if !p.at(SyntaxKind::SEMICOLON) && !p.at(SyntaxKind::CLOSE_TAG) && !p.at_eof() {
        expr(p);
    }
    eat_terminator(p);
    p.finish_node();
}

/// Throw = 'throw' Expr ';'
fn throw_stmt(p: &mut Parser) {
    p.start_node(SyntaxKind::THROW_STMT);
    p.bump();
    expr(p);
    eat_terminator(p);
    p.finish_node();
}

/// Try = 'try' Block CatchClause* FinallyClause?
fn try_stmt(p: &mut Parser) {
    p.start_node(SyntaxKind::TRY_STMT);
    p.bump();
    block_stmt(p);
    while p.at(SyntaxKind::CATCH_KW) {
        p.start_node(SyntaxKind::CATCH_CLAUSE);
        p.bump();
        p.expect(SyntaxKind::L_PAREN, ErrorCode::E0203);
        super::expressions::name_ref(p);
        // `catch (A | B $e)` union syntax
        while p.eat(SyntaxKind::PIPE) {
            super::expressions::name_ref(p);
        }
        p.expect(SyntaxKind::VARIABLE, ErrorCode::E0301);
        p.expect(SyntaxKind::R_PAREN, ErrorCode::E0203);
        block_stmt(p);
        p.finish_node();
    }
    if p.at(SyntaxKind::FINALLY_KW) {
        p.start_node(SyntaxKind::FINALLY_CLAUSE);
        p.bump();
        block_stmt(p);
        p.finish_node();
    }
    p.finish_node();
}

/// Global = 'global' Variable (',' Variable)* ';'
fn global_stmt(p: &mut Parser) {
    p.start_node(SyntaxKind::GLOBAL_STMT);
    p.bump();
    loop {
        p.expect(SyntaxKind::VARIABLE, ErrorCode::E0301);
        if !p.eat(SyntaxKind::COMMA) {
            break;
        }
    }
    eat_terminator(p);
    p.finish_node();
}

/// StaticVar = 'static' Variable ('=' Expr)? (',' ...)* ';'
fn static_stmt(p: &mut Parser) {
    p.start_node(SyntaxKind::STATIC_STMT);
    p.bump();
    loop {
        p.expect(SyntaxKind::VARIABLE, ErrorCode::E0301);
        if p.eat(SyntaxKind::EQ) {
            expr(p);
        }
        if !p.eat(SyntaxKind::COMMA) {
            break;
        }
    }
    eat_terminator(p);
    p.finish_node();
}

/// Echo = ('echo' | '<?=') ExprList ';'?
fn echo_stmt(p: &mut Parser) {
    p.start_node(SyntaxKind::ECHO_STMT);
    p.bump(); // echo or <?=
    expr_list(p);
    eat_terminator(p);
    p.finish_node();
}

/// Const = 'const' ConstElem (',' ConstElem)* ';'
fn const_stmt(p: &mut Parser) {
    p.start_node(SyntaxKind::CONST_STMT);
    p.bump();
    loop {
        const_elem(p);
        if !p.eat(SyntaxKind::COMMA) {
            break;
        }
    }
    eat_terminator(p);
    p.finish_node();
}

/// ConstElem = Ident '=' Expr
pub(crate) fn const_elem(p: &mut Parser) {
    p.start_node(SyntaxKind::CONST_ELEM);
    p.expect(SyntaxKind::IDENT, ErrorCode::E0301);
    p.expect(SyntaxKind::EQ, ErrorCode::E0401);
    expr(p);
    p.finish_node();
}

/// Namespace = 'namespace' QualifiedName? (';' | Block)
fn namespace_stmt(p: &mut Parser) {
    p.start_node(SyntaxKind::NAMESPACE_STMT);
    p.bump();
    if p.at(SyntaxKind::IDENT) || p.at(SyntaxKind::BACKSLASH) {
        super::expressions::name_ref(p);
    }
    if p.at(SyntaxKind::L_BRACE) {
        block_stmt(p);
    } else {
        eat_terminator(p);
    }
    p.finish_node();
}

/// Use = 'use' QualifiedName ('as' Ident)? (',' ...)* ';'
fn use_stmt(p: &mut Parser) {
    p.start_node(SyntaxKind::USE_STMT);
    p.bump();
    loop {
        super::expressions::name_ref(p);
        if p.eat(SyntaxKind::AS_KW) {
            p.expect(SyntaxKind::IDENT, ErrorCode::E0301);
        }
        if !p.eat(SyntaxKind::COMMA) {
            break;
        }
    }
    eat_terminator(p);
    p.finish_node();
}

/// ExprList = Expr (',' Expr)*
fn expr_list(p: &mut Parser) {
    loop {
        expr(p);
        if !p.eat(SyntaxKind::COMMA) {
            break;
        }
    }
}

/// ExprStmt = Expr ';'
fn expr_stmt(p: &mut Parser) {
    p.start_node(SyntaxKind::EXPR_STMT);
    let before = p.position();
    expr(p);
    if p.position() == before {
        // expr() could not even start; resynchronize
        p.error_recover("expected statement", ErrorCode::E0901, STATEMENT_RECOVERY);
        p.eat(SyntaxKind::SEMICOLON);
    } else {
        eat_terminator(p);
    }
    p.finish_node();
}
