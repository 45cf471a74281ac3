//! Grammar rules for the recursive descent parser
//!
//! Free functions over [`Parser`], split by concern:
//! - [`statements`] - statement-level productions
//! - [`declarations`] - functions, classes, and their members
//! - [`expressions`] - the operator-precedence expression grammar

mod declarations;
mod expressions;
mod statements;

pub(crate) use expressions::expr;
pub(crate) use statements::statement;

use super::errors::ErrorCode;
use super::parser::Parser;
use super::syntax_kind::SyntaxKind;

/// Tokens that typically signal the end of a statement
/// Used for error recovery to skip to the next valid position
pub(crate) const STATEMENT_RECOVERY: &[SyntaxKind] = &[
    SyntaxKind::SEMICOLON,
    SyntaxKind::R_BRACE,
    SyntaxKind::CLOSE_TAG,
    SyntaxKind::IF_KW,
    SyntaxKind::WHILE_KW,
    SyntaxKind::FOR_KW,
    SyntaxKind::FOREACH_KW,
    SyntaxKind::SWITCH_KW,
    SyntaxKind::RETURN_KW,
    SyntaxKind::ECHO_KW,
    SyntaxKind::TRY_KW,
    SyntaxKind::FUNCTION_KW,
    SyntaxKind::CLASS_KW,
];

/// CompilationUnit = (InlineHtml | OpenTag | CloseTag | Statement)*
pub(crate) fn compilation_unit(p: &mut Parser) {
    p.start_root();

    loop {
        if bump_script_tag(p) {
            continue;
        }
        if p.at_eof() {
            break;
        }
        let before = p.position();
        statements::statement(p);
        // Safety: if we didn't make progress, force-skip a token
        if p.position() == before && !p.at_eof() {
            p.error("unexpected token", ErrorCode::E0901);
            p.bump();
        }
    }

    // Trailing trivia belongs to the root
    p.eat_trivia();
    p.finish_node();
}

/// Consume inline HTML and script tags, which may appear wherever a
/// statement can. Returns true if anything was consumed.
pub(crate) fn bump_script_tag(p: &mut Parser) -> bool {
    match p.peek() {
        SyntaxKind::INLINE_HTML | SyntaxKind::OPEN_TAG | SyntaxKind::CLOSE_TAG => {
            p.bump();
            true
        }
        _ => false,
    }
}
