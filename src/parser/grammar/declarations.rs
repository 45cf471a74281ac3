//! Declaration grammar rules: functions, classes, and class members

use super::expressions::{expr, name_ref};
use super::statements::{block_stmt, const_elem};
use crate::parser::errors::ErrorCode;
use crate::parser::parser::Parser;
use crate::parser::syntax_kind::SyntaxKind;

const MEMBER_MODIFIERS: &[SyntaxKind] = &[
    SyntaxKind::PUBLIC_KW,
    SyntaxKind::PRIVATE_KW,
    SyntaxKind::PROTECTED_KW,
    SyntaxKind::STATIC_KW,
    SyntaxKind::ABSTRACT_KW,
    SyntaxKind::FINAL_KW,
    SyntaxKind::VAR_KW,
];

const MEMBER_RECOVERY: &[SyntaxKind] = &[
    SyntaxKind::R_BRACE,
    SyntaxKind::FUNCTION_KW,
    SyntaxKind::CONST_KW,
    SyntaxKind::PUBLIC_KW,
    SyntaxKind::PRIVATE_KW,
    SyntaxKind::PROTECTED_KW,
    SyntaxKind::VAR_KW,
];

/// FunctionDecl = 'function' '&'? Ident ParamList Block
pub(crate) fn function_decl(p: &mut Parser) {
    p.start_node(SyntaxKind::FUNCTION_DECL);
    p.bump(); // function
    p.eat(SyntaxKind::AMP);
    p.expect(SyntaxKind::IDENT, ErrorCode::E0301);
    param_list(p);
    block_stmt(p);
    p.finish_node();
}

/// ParamList = '(' (Param (',' Param)*)? ')'
pub(crate) fn param_list(p: &mut Parser) {
    p.start_node(SyntaxKind::PARAM_LIST);
    if !p.expect(SyntaxKind::L_PAREN, ErrorCode::E0303) {
        p.finish_node();
        return;
    }
    if !p.at(SyntaxKind::R_PAREN) && !p.at_eof() {
        loop {
            param(p);
            if !p.eat(SyntaxKind::COMMA) {
                break;
            }
        }
    }
    p.expect(SyntaxKind::R_PAREN, ErrorCode::E0203);
    p.finish_node();
}

/// Param = TypeHint? '&'? Variable ('=' Expr)?
fn param(p: &mut Parser) {
    p.start_node(SyntaxKind::PARAM);
    if p.at_any(&[SyntaxKind::IDENT, SyntaxKind::BACKSLASH, SyntaxKind::ARRAY_KW]) {
        name_ref(p);
    }
    p.eat(SyntaxKind::AMP);
    p.expect(SyntaxKind::VARIABLE, ErrorCode::E0301);
    if p.eat(SyntaxKind::EQ) {
        expr(p);
    }
    p.finish_node();
}

/// ClassDecl = ('abstract' | 'final')* ('class' | 'interface' | 'trait')
///             Ident ExtendsClause? ImplementsClause? ClassBody
pub(crate) fn class_decl(p: &mut Parser) {
    p.start_node(SyntaxKind::CLASS_DECL);
    while p.at_any(&[SyntaxKind::ABSTRACT_KW, SyntaxKind::FINAL_KW]) {
        p.bump();
    }
    if !p.eat(SyntaxKind::CLASS_KW)
        && !p.eat(SyntaxKind::INTERFACE_KW)
        && !p.eat(SyntaxKind::TRAIT_KW)
    {
        p.error("expected 'class', 'interface' or 'trait'", ErrorCode::E0901);
    }
    p.expect(SyntaxKind::IDENT, ErrorCode::E0301);
    if p.eat(SyntaxKind::EXTENDS_KW) {
        loop {
            name_ref(p);
            if !p.eat(SyntaxKind::COMMA) {
                break;
            }
        }
    }
    if p.eat(SyntaxKind::IMPLEMENTS_KW) {
        loop {
            name_ref(p);
            if !p.eat(SyntaxKind::COMMA) {
                break;
            }
        }
    }
    class_body(p);
    p.finish_node();
}

/// ClassBody = '{' ClassMember* '}'
fn class_body(p: &mut Parser) {
    p.start_node(SyntaxKind::CLASS_BODY);
    p.expect(SyntaxKind::L_BRACE, ErrorCode::E0202);
    while !p.at(SyntaxKind::R_BRACE) && !p.at_eof() {
        let before = p.position();
        class_member(p);
        if p.position() == before {
            p.error("unexpected token in class body", ErrorCode::E0302);
            p.bump();
        }
    }
    p.expect(SyntaxKind::R_BRACE, ErrorCode::E0202);
    p.finish_node();
}

/// ClassMember = Modifier* (MethodDecl | PropertyDecl | ClassConstDecl | TraitUse)
fn class_member(p: &mut Parser) {
    // Peek past modifiers to pick the member production
    let mut n = 0;
    while MEMBER_MODIFIERS.contains(&p.nth(n)) {
        n += 1;
    }
    match p.nth(n) {
        SyntaxKind::FUNCTION_KW => method_decl(p),
        SyntaxKind::VARIABLE => property_decl(p),
        SyntaxKind::CONST_KW => class_const_decl(p),
        SyntaxKind::USE_KW if n == 0 => trait_use(p),
        _ => {
            p.error_recover(
                "expected class member",
                ErrorCode::E0302,
                MEMBER_RECOVERY,
            );
        }
    }
}

fn modifiers(p: &mut Parser) {
    while p.at_any(MEMBER_MODIFIERS) {
        p.bump();
    }
}

/// MethodDecl = Modifier* 'function' '&'? Ident ParamList (Block | ';')
fn method_decl(p: &mut Parser) {
    p.start_node(SyntaxKind::METHOD_DECL);
    modifiers(p);
    p.expect(SyntaxKind::FUNCTION_KW, ErrorCode::E0901);
    p.eat(SyntaxKind::AMP);
    p.expect(SyntaxKind::IDENT, ErrorCode::E0301);
    param_list(p);
    // Abstract and interface methods have no body
    if !p.eat(SyntaxKind::SEMICOLON) {
        block_stmt(p);
    }
    p.finish_node();
}

/// PropertyDecl = Modifier* Variable ('=' Expr)? (',' ...)* ';'
fn property_decl(p: &mut Parser) {
    p.start_node(SyntaxKind::PROPERTY_DECL);
    modifiers(p);
    loop {
        p.expect(SyntaxKind::VARIABLE, ErrorCode::E0301);
        if p.eat(SyntaxKind::EQ) {
            expr(p);
        }
        if !p.eat(SyntaxKind::COMMA) {
            break;
        }
    }
    p.expect(SyntaxKind::SEMICOLON, ErrorCode::E0201);
    p.finish_node();
}

/// ClassConstDecl = Modifier* 'const' ConstElem (',' ConstElem)* ';'
fn class_const_decl(p: &mut Parser) {
    p.start_node(SyntaxKind::CLASS_CONST_DECL);
    modifiers(p);
    p.expect(SyntaxKind::CONST_KW, ErrorCode::E0901);
    loop {
        const_elem(p);
        if !p.eat(SyntaxKind::COMMA) {
            break;
        }
    }
    p.expect(SyntaxKind::SEMICOLON, ErrorCode::E0201);
    p.finish_node();
}

/// TraitUse = 'use' NameRef (',' NameRef)* ';'
fn trait_use(p: &mut Parser) {
    p.start_node(SyntaxKind::USE_STMT);
    p.bump(); // use
    loop {
        name_ref(p);
        if !p.eat(SyntaxKind::COMMA) {
            break;
        }
    }
    p.expect(SyntaxKind::SEMICOLON, ErrorCode::E0201);
    p.finish_node();
}
