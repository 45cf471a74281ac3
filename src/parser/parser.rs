//! Recursive descent parser for PHP
//!
//! Builds a rowan GreenNode tree from tokens.
//! Supports error recovery and produces a lossless CST: every byte of the
//! input, trivia included, is owned by exactly one token in the tree.

use rowan::{Checkpoint, GreenNode, GreenNodeBuilder, TextRange, TextSize};

use super::errors::{ErrorCode, SyntaxError};
use super::grammar;
use super::lexer::{Lexer, Token};
use super::syntax_kind::SyntaxKind;

/// Parse result containing the green tree and any errors
#[derive(Debug, Clone)]
pub struct Parse {
    pub green: GreenNode,
    pub errors: Vec<SyntaxError>,
}

impl Parse {
    /// Get the root syntax node
    pub fn syntax(&self) -> super::SyntaxNode {
        super::SyntaxNode::new_root(self.green.clone())
    }

    /// Get the typed root of the tree
    pub fn tree(&self) -> super::ast::CompilationUnit {
        use super::ast::AstNode;
        super::ast::CompilationUnit::cast(self.syntax())
            .unwrap_or_else(|| unreachable!("the parser always produces a COMPILATION_UNIT root"))
    }

    /// Check if parsing succeeded without errors
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Parse PHP source code into a lossless CST
pub fn parse(input: &str) -> Parse {
    let tokens: Vec<_> = Lexer::new(input).collect();
    let mut parser = Parser::new(&tokens);
    grammar::compilation_unit(&mut parser);
    parser.finish()
}

/// The parser state
pub(crate) struct Parser<'a> {
    tokens: &'a [Token<'a>],
    pos: usize,
    builder: GreenNodeBuilder<'static>,
    errors: Vec<SyntaxError>,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token<'a>]) -> Self {
        Self {
            tokens,
            pos: 0,
            builder: GreenNodeBuilder::new(),
            errors: Vec::new(),
        }
    }

    fn finish(self) -> Parse {
        Parse {
            green: self.builder.finish(),
            errors: self.errors,
        }
    }

    // =========================================================================
    // Token inspection (trivia-transparent)
    // =========================================================================

    /// The next non-trivia token, if any
    fn peek_token(&self) -> Option<&Token<'a>> {
        self.tokens[self.pos..]
            .iter()
            .find(|t| !t.kind.is_trivia())
    }

    /// Kind of the next non-trivia token, ERROR at end of input
    pub(crate) fn peek(&self) -> SyntaxKind {
        self.peek_token().map(|t| t.kind).unwrap_or(SyntaxKind::ERROR)
    }

    /// Kind of the n-th non-trivia token ahead (0 = current)
    pub(crate) fn nth(&self, n: usize) -> SyntaxKind {
        self.tokens[self.pos..]
            .iter()
            .filter(|t| !t.kind.is_trivia())
            .nth(n)
            .map(|t| t.kind)
            .unwrap_or(SyntaxKind::ERROR)
    }

    /// Raw token cursor, used by grammar loops as a progress guard
    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    pub(crate) fn at(&self, kind: SyntaxKind) -> bool {
        self.peek() == kind
    }

    pub(crate) fn at_any(&self, kinds: &[SyntaxKind]) -> bool {
        kinds.contains(&self.peek())
    }

    /// True once only trivia (or nothing) remains
    pub(crate) fn at_eof(&self) -> bool {
        self.peek_token().is_none()
    }

    // =========================================================================
    // Token consumption
    // =========================================================================

    /// Attach pending trivia to the current node
    pub(crate) fn eat_trivia(&mut self) {
        while let Some(token) = self.tokens.get(self.pos) {
            if !token.kind.is_trivia() {
                break;
            }
            self.builder.token(token.kind.into(), token.text);
            self.pos += 1;
        }
    }

    /// Consume the next non-trivia token (plus the trivia before it)
    pub(crate) fn bump(&mut self) {
        self.eat_trivia();
        if let Some(token) = self.tokens.get(self.pos) {
            self.builder.token(token.kind.into(), token.text);
            self.pos += 1;
        }
    }

    pub(crate) fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    pub(crate) fn expect(&mut self, kind: SyntaxKind, code: ErrorCode) -> bool {
        if self.eat(kind) {
            true
        } else {
            self.error(format!("expected {}", kind_to_name(kind)), code);
            false
        }
    }

    // =========================================================================
    // Error handling
    // =========================================================================

    pub(crate) fn error(&mut self, message: impl Into<String>, code: ErrorCode) {
        let range = self
            .peek_token()
            .map(|t| TextRange::at(t.offset, TextSize::of(t.text)))
            .unwrap_or_else(|| {
                let end = self
                    .tokens
                    .last()
                    .map(|t| t.offset + TextSize::of(t.text))
                    .unwrap_or_else(|| TextSize::new(0));
                TextRange::empty(end)
            });
        self.errors.push(SyntaxError::new(message, range, code));
    }

    /// Report an error and skip tokens until a recovery point, wrapping the
    /// skipped tokens in an ERROR node
    pub(crate) fn error_recover(
        &mut self,
        message: impl Into<String>,
        code: ErrorCode,
        recovery: &[SyntaxKind],
    ) {
        self.error(message, code);
        self.eat_trivia();
        self.builder.start_node(SyntaxKind::ERROR.into());
        while !self.at_eof() && !self.at_any(recovery) {
            self.bump();
        }
        self.builder.finish_node();
    }

    // =========================================================================
    // Node building helpers
    // =========================================================================

    /// Start a node, leaving leading trivia attached to the parent
    pub(crate) fn start_node(&mut self, kind: SyntaxKind) {
        self.eat_trivia();
        self.builder.start_node(kind.into());
    }

    /// Start the root node; unlike [`Self::start_node`] this must come first
    /// so the root spans any leading trivia too
    pub(crate) fn start_root(&mut self) {
        self.builder.start_node(SyntaxKind::COMPILATION_UNIT.into());
    }

    pub(crate) fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    /// Checkpoint for later node wrapping (binary expressions, call chains)
    pub(crate) fn checkpoint(&mut self) -> Checkpoint {
        self.eat_trivia();
        self.builder.checkpoint()
    }

    pub(crate) fn start_node_at(&mut self, checkpoint: Checkpoint, kind: SyntaxKind) {
        self.builder.start_node_at(checkpoint, kind.into());
    }
}

/// Human-readable name for a syntax kind, used in error messages
pub fn kind_to_name(kind: SyntaxKind) -> &'static str {
    match kind {
        SyntaxKind::IDENT => "identifier",
        SyntaxKind::VARIABLE => "variable",
        SyntaxKind::INTEGER => "integer literal",
        SyntaxKind::STRING => "string literal",
        SyntaxKind::L_BRACE => "'{'",
        SyntaxKind::R_BRACE => "'}'",
        SyntaxKind::L_BRACKET => "'['",
        SyntaxKind::R_BRACKET => "']'",
        SyntaxKind::L_PAREN => "'('",
        SyntaxKind::R_PAREN => "')'",
        SyntaxKind::SEMICOLON => "';'",
        SyntaxKind::COLON => "':'",
        SyntaxKind::COMMA => "','",
        SyntaxKind::EQ => "'='",
        SyntaxKind::FAT_ARROW => "'=>'",
        SyntaxKind::AS_KW => "'as'",
        SyntaxKind::WHILE_KW => "'while'",
        SyntaxKind::FUNCTION_KW => "'function'",
        SyntaxKind::CLASS_KW => "'class'",
        _ => {
            if kind.is_keyword() {
                "keyword"
            } else {
                "token"
            }
        }
    }
}
