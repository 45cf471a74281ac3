//! Expression grammar: precedence climbing over the PHP operator ladder
//!
//! Lowest to highest: `or`/`xor`/`and` keywords, assignment, ternary, `??`,
//! `||`, `&&`, `|`, `^`, `&`, equality, relational/`instanceof`, shift,
//! additive (including `.` concatenation), multiplicative, unary, `**`,
//! postfix (calls, member access, subscripts).

use super::declarations::param_list;
use super::statements::block_stmt;
use crate::parser::errors::ErrorCode;
use crate::parser::parser::Parser;
use crate::parser::syntax_kind::SyntaxKind;

const ASSIGN_OPS: &[SyntaxKind] = &[
    SyntaxKind::EQ,
    SyntaxKind::PLUS_EQ,
    SyntaxKind::MINUS_EQ,
    SyntaxKind::STAR_EQ,
    SyntaxKind::SLASH_EQ,
    SyntaxKind::DOT_EQ,
    SyntaxKind::PERCENT_EQ,
    SyntaxKind::AMP_EQ,
    SyntaxKind::PIPE_EQ,
    SyntaxKind::CARET_EQ,
    SyntaxKind::SHL_EQ,
    SyntaxKind::SHR_EQ,
    SyntaxKind::STAR_STAR_EQ,
    SyntaxKind::QUESTION_QUESTION_EQ,
];

const EQUALITY_OPS: &[SyntaxKind] = &[
    SyntaxKind::EQ_EQ,
    SyntaxKind::BANG_EQ,
    SyntaxKind::EQ_EQ_EQ,
    SyntaxKind::BANG_EQ_EQ,
];

const RELATIONAL_OPS: &[SyntaxKind] = &[
    SyntaxKind::LT,
    SyntaxKind::GT,
    SyntaxKind::LT_EQ,
    SyntaxKind::GT_EQ,
    SyntaxKind::SPACESHIP,
    SyntaxKind::INSTANCEOF_KW,
];

const ADDITIVE_OPS: &[SyntaxKind] = &[SyntaxKind::PLUS, SyntaxKind::MINUS, SyntaxKind::DOT];

const MULTIPLICATIVE_OPS: &[SyntaxKind] =
    &[SyntaxKind::STAR, SyntaxKind::SLASH, SyntaxKind::PERCENT];

const PREFIX_OPS: &[SyntaxKind] = &[
    SyntaxKind::BANG,
    SyntaxKind::MINUS,
    SyntaxKind::PLUS,
    SyntaxKind::TILDE,
    SyntaxKind::AT,
];

/// Expr = the full ladder, entered at the `or`/`xor`/`and` keyword level
pub(crate) fn expr(p: &mut Parser) {
    binary_left(
        p,
        assignment,
        &[SyntaxKind::OR_KW, SyntaxKind::XOR_KW, SyntaxKind::AND_KW],
    );
}

/// Left-associative binary level: `next (op next)*`
fn binary_left(p: &mut Parser, next: fn(&mut Parser), ops: &[SyntaxKind]) {
    let checkpoint = p.checkpoint();
    next(p);
    while p.at_any(ops) {
        p.start_node_at(checkpoint, SyntaxKind::BINARY_EXPR);
        p.bump();
        next(p);
        p.finish_node();
    }
}

/// Assignment = Ternary (assign-op Assignment)?   (right-associative)
fn assignment(p: &mut Parser) {
    let checkpoint = p.checkpoint();
    ternary(p);
    if p.at_any(ASSIGN_OPS) {
        p.start_node_at(checkpoint, SyntaxKind::ASSIGN_EXPR);
        let by_ref = p.at(SyntaxKind::EQ);
        p.bump();
        // `= &$other` reference assignment
        if by_ref {
            p.eat(SyntaxKind::AMP);
        }
        assignment(p);
        p.finish_node();
    }
}

/// Ternary = Coalesce ('?' Expr? ':' Ternary)?
fn ternary(p: &mut Parser) {
    let checkpoint = p.checkpoint();
    coalesce(p);
    if p.at(SyntaxKind::QUESTION) {
        p.start_node_at(checkpoint, SyntaxKind::TERNARY_EXPR);
        p.bump();
        // `?:` short form omits the middle operand
        if !p.at(SyntaxKind::COLON) {
            expr(p);
        }
        p.expect(SyntaxKind::COLON, ErrorCode::E0402);
        ternary(p);
        p.finish_node();
    }
}

/// Coalesce = LogicalOr ('??' Coalesce)?   (right-associative)
fn coalesce(p: &mut Parser) {
    let checkpoint = p.checkpoint();
    logical_or(p);
    if p.at(SyntaxKind::QUESTION_QUESTION) {
        p.start_node_at(checkpoint, SyntaxKind::BINARY_EXPR);
        p.bump();
        coalesce(p);
        p.finish_node();
    }
}

fn logical_or(p: &mut Parser) {
    binary_left(p, logical_and, &[SyntaxKind::PIPE_PIPE]);
}

fn logical_and(p: &mut Parser) {
    binary_left(p, bit_or, &[SyntaxKind::AMP_AMP]);
}

fn bit_or(p: &mut Parser) {
    binary_left(p, bit_xor, &[SyntaxKind::PIPE]);
}

fn bit_xor(p: &mut Parser) {
    binary_left(p, bit_and, &[SyntaxKind::CARET]);
}

fn bit_and(p: &mut Parser) {
    binary_left(p, equality, &[SyntaxKind::AMP]);
}

fn equality(p: &mut Parser) {
    binary_left(p, relational, EQUALITY_OPS);
}

fn relational(p: &mut Parser) {
    binary_left(p, shift, RELATIONAL_OPS);
}

fn shift(p: &mut Parser) {
    binary_left(p, additive, &[SyntaxKind::SHL, SyntaxKind::SHR]);
}

fn additive(p: &mut Parser) {
    binary_left(p, multiplicative, ADDITIVE_OPS);
}

fn multiplicative(p: &mut Parser) {
    binary_left(p, unary, MULTIPLICATIVE_OPS);
}

/// Unary = prefix-op Unary | Postfix ('**' Unary)?
fn unary(p: &mut Parser) {
    match p.peek() {
        kind if PREFIX_OPS.contains(&kind) => {
            p.start_node(SyntaxKind::UNARY_EXPR);
            p.bump();
            unary(p);
            p.finish_node();
        }
        SyntaxKind::PLUS_PLUS | SyntaxKind::MINUS_MINUS => {
            p.start_node(SyntaxKind::PREFIX_EXPR);
            p.bump();
            unary(p);
            p.finish_node();
        }
        SyntaxKind::PRINT_KW => {
            p.start_node(SyntaxKind::UNARY_EXPR);
            p.bump();
            expr(p);
            p.finish_node();
        }
        _ => {
            let checkpoint = p.checkpoint();
            postfix(p);
            // `**` binds tighter than unary minus and is right-associative
            if p.at(SyntaxKind::STAR_STAR) {
                p.start_node_at(checkpoint, SyntaxKind::BINARY_EXPR);
                p.bump();
                unary(p);
                p.finish_node();
            }
        }
    }
}

/// Postfix = Primary ( '(' Args ')' | '->' member | '::' member
///                   | '[' Expr? ']' | '++' | '--' )*
fn postfix(p: &mut Parser) {
    let checkpoint = p.checkpoint();
    primary(p);
    loop {
        match p.peek() {
            SyntaxKind::L_PAREN => {
                p.start_node_at(checkpoint, SyntaxKind::CALL_EXPR);
                arg_list(p);
                p.finish_node();
            }
            SyntaxKind::ARROW => {
                p.start_node_at(checkpoint, SyntaxKind::MEMBER_ACCESS_EXPR);
                p.bump();
                if !p.eat(SyntaxKind::IDENT) && !p.eat(SyntaxKind::VARIABLE) {
                    p.error("expected member name", ErrorCode::E0301);
                }
                p.finish_node();
            }
            SyntaxKind::COLON_COLON => {
                p.start_node_at(checkpoint, SyntaxKind::STATIC_ACCESS_EXPR);
                p.bump();
                if !p.eat(SyntaxKind::IDENT)
                    && !p.eat(SyntaxKind::VARIABLE)
                    && !p.eat(SyntaxKind::CLASS_KW)
                {
                    p.error("expected member name", ErrorCode::E0301);
                }
                p.finish_node();
            }
            SyntaxKind::L_BRACKET => {
                p.start_node_at(checkpoint, SyntaxKind::SUBSCRIPT_EXPR);
                p.bump();
                if !p.at(SyntaxKind::R_BRACKET) {
                    expr(p);
                }
                p.expect(SyntaxKind::R_BRACKET, ErrorCode::E0204);
                p.finish_node();
            }
            SyntaxKind::PLUS_PLUS | SyntaxKind::MINUS_MINUS => {
                p.start_node_at(checkpoint, SyntaxKind::POSTFIX_EXPR);
                p.bump();
                p.finish_node();
            }
            _ => break,
        }
    }
}

/// ArgList = '(' ('&'? Expr (',' '&'? Expr)*)? ')'
fn arg_list(p: &mut Parser) {
    p.start_node(SyntaxKind::ARG_LIST);
    p.expect(SyntaxKind::L_PAREN, ErrorCode::E0203);
    if !p.at(SyntaxKind::R_PAREN) && !p.at_eof() {
        loop {
            p.eat(SyntaxKind::AMP);
            expr(p);
            if !p.eat(SyntaxKind::COMMA) {
                break;
            }
        }
    }
    p.expect(SyntaxKind::R_PAREN, ErrorCode::E0203);
    p.finish_node();
}

/// Primary = Variable | NameRef | Literal | '(' Expr ')' | ArrayLiteral
///         | New | Closure
fn primary(p: &mut Parser) {
    match p.peek() {
        SyntaxKind::VARIABLE => {
            p.start_node(SyntaxKind::VAR_EXPR);
            p.bump();
            p.finish_node();
        }
        SyntaxKind::IDENT | SyntaxKind::BACKSLASH | SyntaxKind::STATIC_KW | SyntaxKind::LIST_KW => {
            name_ref(p);
        }
        SyntaxKind::INTEGER
        | SyntaxKind::FLOAT
        | SyntaxKind::STRING
        | SyntaxKind::TRUE_KW
        | SyntaxKind::FALSE_KW
        | SyntaxKind::NULL_KW => {
            p.start_node(SyntaxKind::LITERAL);
            p.bump();
            p.finish_node();
        }
        SyntaxKind::L_PAREN => {
            p.start_node(SyntaxKind::PAREN_EXPR);
            p.bump();
            expr(p);
            p.expect(SyntaxKind::R_PAREN, ErrorCode::E0203);
            p.finish_node();
        }
        SyntaxKind::L_BRACKET => array_literal(p, SyntaxKind::L_BRACKET),
        SyntaxKind::ARRAY_KW => {
            if p.nth(1) == SyntaxKind::L_PAREN {
                array_literal(p, SyntaxKind::L_PAREN);
            } else {
                name_ref(p);
            }
        }
        SyntaxKind::NEW_KW => new_expr(p),
        SyntaxKind::FUNCTION_KW => closure_expr(p),
        _ => {
            p.error("expected expression", ErrorCode::E0402);
        }
    }
}

/// NameRef = '\'? Ident ('\' Ident)*  (also bare `static`, `array`, `list`)
pub(crate) fn name_ref(p: &mut Parser) {
    p.start_node(SyntaxKind::NAME_REF);
    p.eat(SyntaxKind::BACKSLASH);
    if !p.eat(SyntaxKind::IDENT)
        && !p.eat(SyntaxKind::STATIC_KW)
        && !p.eat(SyntaxKind::ARRAY_KW)
        && !p.eat(SyntaxKind::LIST_KW)
    {
        p.error("expected identifier", ErrorCode::E0301);
    }
    while p.at(SyntaxKind::BACKSLASH) && p.nth(1) == SyntaxKind::IDENT {
        p.bump();
        p.bump();
    }
    p.finish_node();
}

/// ArrayLiteral = 'array' '(' Elems? ')' | '[' Elems? ']'
fn array_literal(p: &mut Parser, open: SyntaxKind) {
    p.start_node(SyntaxKind::ARRAY_EXPR);
    let close = if open == SyntaxKind::L_BRACKET {
        p.bump(); // [
        SyntaxKind::R_BRACKET
    } else {
        p.bump(); // array
        p.expect(SyntaxKind::L_PAREN, ErrorCode::E0203);
        SyntaxKind::R_PAREN
    };
    while !p.at(close) && !p.at_eof() {
        p.start_node(SyntaxKind::ARRAY_ELEM);
        p.eat(SyntaxKind::AMP);
        expr(p);
        if p.eat(SyntaxKind::FAT_ARROW) {
            p.eat(SyntaxKind::AMP);
            expr(p);
        }
        p.finish_node();
        if !p.eat(SyntaxKind::COMMA) {
            break;
        }
    }
    p.expect(close, if close == SyntaxKind::R_BRACKET {
        ErrorCode::E0204
    } else {
        ErrorCode::E0203
    });
    p.finish_node();
}

/// New = 'new' (NameRef | Variable) ArgList?
fn new_expr(p: &mut Parser) {
    p.start_node(SyntaxKind::NEW_EXPR);
    p.bump(); // new
    if p.at(SyntaxKind::VARIABLE) {
        p.start_node(SyntaxKind::VAR_EXPR);
        p.bump();
        p.finish_node();
    } else {
        name_ref(p);
    }
    if p.at(SyntaxKind::L_PAREN) {
        arg_list(p);
    }
    p.finish_node();
}

/// Closure = 'function' '&'? ParamList UseClause? Block
fn closure_expr(p: &mut Parser) {
    p.start_node(SyntaxKind::CLOSURE_EXPR);
    p.bump(); // function
    p.eat(SyntaxKind::AMP);
    param_list(p);
    if p.at(SyntaxKind::USE_KW) {
        p.start_node(SyntaxKind::CLOSURE_USE_CLAUSE);
        p.bump();
        p.expect(SyntaxKind::L_PAREN, ErrorCode::E0203);
        loop {
            p.eat(SyntaxKind::AMP);
            p.expect(SyntaxKind::VARIABLE, ErrorCode::E0301);
            if !p.eat(SyntaxKind::COMMA) {
                break;
            }
        }
        p.expect(SyntaxKind::R_PAREN, ErrorCode::E0203);
        p.finish_node();
    }
    block_stmt(p);
    p.finish_node();
}
