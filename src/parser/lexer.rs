//! Logos-based lexer for PHP
//!
//! PHP source alternates between raw HTML and code delimited by `<?php`
//! (or `<?=`) and `?>`. The lexer tracks that mode itself and runs the
//! logos-generated tokenizer only over the code segments, so every byte of
//! the input ends up in exactly one token.

use super::keywords::keyword_kind;
use super::syntax_kind::SyntaxKind;
use logos::Logos;
use rowan::TextSize;

/// A token with its kind, text, and position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
    pub offset: TextSize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Html,
    Php,
}

/// Lexer wrapping the logos-generated tokenizer with HTML/PHP mode tracking
pub struct Lexer<'a> {
    src: &'a str,
    pos: usize,
    mode: Mode,
    /// Segment base offset and the logos lexer over `src[base..]`
    inner: Option<(usize, logos::Lexer<'a, LogosToken>)>,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            src,
            pos: 0,
            mode: Mode::Html,
            inner: None,
        }
    }

    fn next_html(&mut self) -> Option<Token<'a>> {
        if self.pos >= self.src.len() {
            return None;
        }
        let rest = &self.src[self.pos..];
        match find_open_tag(rest) {
            Some((0, len, kind)) => {
                let token = Token {
                    kind,
                    text: &rest[..len],
                    offset: TextSize::new(self.pos as u32),
                };
                let base = self.pos + len;
                self.inner = Some((base, LogosToken::lexer(&self.src[base..])));
                self.mode = Mode::Php;
                self.pos = base;
                Some(token)
            }
            tag => {
                let end = tag.map(|(start, _, _)| start).unwrap_or(rest.len());
                let token = Token {
                    kind: SyntaxKind::INLINE_HTML,
                    text: &rest[..end],
                    offset: TextSize::new(self.pos as u32),
                };
                self.pos += end;
                Some(token)
            }
        }
    }

    fn next_php(&mut self) -> Option<Token<'a>> {
        let (base, lexer) = self.inner.as_mut()?;
        let logos_token = match lexer.next() {
            Some(t) => t,
            None => {
                self.pos = self.src.len();
                self.inner = None;
                self.mode = Mode::Html;
                return None;
            }
        };
        let span = lexer.span();
        let text = &self.src[*base + span.start..*base + span.end];
        let offset = TextSize::new((*base + span.start) as u32);
        self.pos = *base + span.end;

        let kind = match logos_token {
            Ok(LogosToken::Ident) => keyword_kind(text).unwrap_or(SyntaxKind::IDENT),
            Ok(t) => t.into(),
            Err(()) => SyntaxKind::ERROR,
        };
        if kind == SyntaxKind::CLOSE_TAG {
            self.inner = None;
            self.mode = Mode::Html;
        }
        Some(Token { kind, text, offset })
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.mode {
            Mode::Html => self.next_html(),
            Mode::Php => self.next_php(),
        }
    }
}

/// Tokenize an entire string into a Vec
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}

/// Find the next open tag in `rest`: `(byte index, tag length, kind)`.
///
/// Open tags are case-insensitive (`<?PHP` opens a script too). `<?php`
/// only opens a script when a non-label byte (or end of input) follows, so
/// `<?phpinfo` stays HTML.
fn find_open_tag(rest: &str) -> Option<(usize, usize, SyntaxKind)> {
    let bytes = rest.as_bytes();
    let mut i = 0;
    while i + 1 < bytes.len() {
        if bytes[i] == b'<' && bytes[i + 1] == b'?' {
            let after = &bytes[i + 2..];
            if after.len() >= 3
                && after[..3].eq_ignore_ascii_case(b"php")
                && !after.get(3).copied().is_some_and(is_label_byte)
            {
                return Some((i, 5, SyntaxKind::OPEN_TAG));
            }
            if after.first() == Some(&b'=') {
                return Some((i, 3, SyntaxKind::OPEN_TAG_ECHO));
            }
        }
        i += 1;
    }
    None
}

fn is_label_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}

/// A `//` or `#` comment runs to the end of the line, but a close tag
/// terminates it early
fn lex_line_comment(lexer: &mut logos::Lexer<LogosToken>) {
    let bytes = lexer.remainder().as_bytes();
    let mut len = 0;
    while len < bytes.len() {
        if bytes[len] == b'\n' {
            break;
        }
        if bytes[len] == b'?' && bytes.get(len + 1) == Some(&b'>') {
            break;
        }
        len += 1;
    }
    lexer.bump(len);
}

/// Logos token enum - maps to SyntaxKind
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
pub enum LogosToken {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    #[regex(r"[ \t\r\n]+")]
    Whitespace,

    #[token("//", lex_line_comment)]
    #[token("#", lex_line_comment)]
    LineComment,

    #[regex(r"/\*\*[^*]*\*+([^/*][^*]*\*+)*/", priority = 3)]
    DocComment,

    #[regex(r"/\*[^*]*\*+([^/*][^*]*\*+)*/", priority = 2)]
    BlockComment,

    // =========================================================================
    // LITERALS
    // =========================================================================
    #[regex(r"\$[a-zA-Z_][a-zA-Z0-9_]*")]
    Variable,

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,

    #[regex(r"0[xX][0-9a-fA-F]+|0[bB][01]+|[0-9]+")]
    Integer,

    #[regex(r"[0-9]+\.[0-9]*([eE][+-]?[0-9]+)?")]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?")]
    #[regex(r"[0-9]+[eE][+-]?[0-9]+")]
    Float,

    #[regex(r#""([^"\\]|\\.)*""#)]
    #[regex(r"'([^'\\]|\\.)*'")]
    String,

    // =========================================================================
    // TAGS
    // =========================================================================
    #[token("?>")]
    CloseTag,

    // =========================================================================
    // MULTI-CHARACTER PUNCTUATION (longest match wins)
    // =========================================================================
    #[token("<=>")]
    Spaceship,

    #[token("===")]
    EqEqEq,

    #[token("!==")]
    BangEqEq,

    #[token("**=")]
    StarStarEq,

    #[token("<<=")]
    ShlEq,

    #[token(">>=")]
    ShrEq,

    #[token("??=")]
    QuestionQuestionEq,

    #[token("==")]
    EqEq,

    #[token("!=")]
    #[token("<>")]
    BangEq,

    #[token("<=")]
    LtEq,

    #[token(">=")]
    GtEq,

    #[token("<<")]
    Shl,

    #[token(">>")]
    Shr,

    #[token("&&")]
    AmpAmp,

    #[token("||")]
    PipePipe,

    #[token("??")]
    QuestionQuestion,

    #[token("++")]
    PlusPlus,

    #[token("--")]
    MinusMinus,

    #[token("**")]
    StarStar,

    #[token("->")]
    Arrow,

    #[token("=>")]
    FatArrow,

    #[token("::")]
    ColonColon,

    #[token("+=")]
    PlusEq,

    #[token("-=")]
    MinusEq,

    #[token("*=")]
    StarEq,

    #[token("/=")]
    SlashEq,

    #[token(".=")]
    DotEq,

    #[token("%=")]
    PercentEq,

    #[token("&=")]
    AmpEq,

    #[token("|=")]
    PipeEq,

    #[token("^=")]
    CaretEq,

    // =========================================================================
    // SINGLE-CHARACTER PUNCTUATION
    // =========================================================================
    #[token("{")]
    LBrace,

    #[token("}")]
    RBrace,

    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token(";")]
    Semicolon,

    #[token(":")]
    Colon,

    #[token(",")]
    Comma,

    #[token(".")]
    Dot,

    #[token("?")]
    Question,

    #[token("!")]
    Bang,

    #[token("=")]
    Eq,

    #[token("<")]
    Lt,

    #[token(">")]
    Gt,

    #[token("+")]
    Plus,

    #[token("-")]
    Minus,

    #[token("*")]
    Star,

    #[token("/")]
    Slash,

    #[token("%")]
    Percent,

    #[token("^")]
    Caret,

    #[token("&")]
    Amp,

    #[token("|")]
    Pipe,

    #[token("~")]
    Tilde,

    #[token("@")]
    At,

    #[token("\\")]
    Backslash,

    #[token("$")]
    Dollar,
}

impl From<LogosToken> for SyntaxKind {
    fn from(token: LogosToken) -> Self {
        match token {
            LogosToken::Whitespace => SyntaxKind::WHITESPACE,
            LogosToken::LineComment => SyntaxKind::LINE_COMMENT,
            LogosToken::DocComment => SyntaxKind::DOC_COMMENT,
            LogosToken::BlockComment => SyntaxKind::BLOCK_COMMENT,
            LogosToken::Variable => SyntaxKind::VARIABLE,
            LogosToken::Ident => SyntaxKind::IDENT,
            LogosToken::Integer => SyntaxKind::INTEGER,
            LogosToken::Float => SyntaxKind::FLOAT,
            LogosToken::String => SyntaxKind::STRING,
            LogosToken::CloseTag => SyntaxKind::CLOSE_TAG,
            LogosToken::Spaceship => SyntaxKind::SPACESHIP,
            LogosToken::EqEqEq => SyntaxKind::EQ_EQ_EQ,
            LogosToken::BangEqEq => SyntaxKind::BANG_EQ_EQ,
            LogosToken::StarStarEq => SyntaxKind::STAR_STAR_EQ,
            LogosToken::ShlEq => SyntaxKind::SHL_EQ,
            LogosToken::ShrEq => SyntaxKind::SHR_EQ,
            LogosToken::QuestionQuestionEq => SyntaxKind::QUESTION_QUESTION_EQ,
            LogosToken::EqEq => SyntaxKind::EQ_EQ,
            LogosToken::BangEq => SyntaxKind::BANG_EQ,
            LogosToken::LtEq => SyntaxKind::LT_EQ,
            LogosToken::GtEq => SyntaxKind::GT_EQ,
            LogosToken::Shl => SyntaxKind::SHL,
            LogosToken::Shr => SyntaxKind::SHR,
            LogosToken::AmpAmp => SyntaxKind::AMP_AMP,
            LogosToken::PipePipe => SyntaxKind::PIPE_PIPE,
            LogosToken::QuestionQuestion => SyntaxKind::QUESTION_QUESTION,
            LogosToken::PlusPlus => SyntaxKind::PLUS_PLUS,
            LogosToken::MinusMinus => SyntaxKind::MINUS_MINUS,
            LogosToken::StarStar => SyntaxKind::STAR_STAR,
            LogosToken::Arrow => SyntaxKind::ARROW,
            LogosToken::FatArrow => SyntaxKind::FAT_ARROW,
            LogosToken::ColonColon => SyntaxKind::COLON_COLON,
            LogosToken::PlusEq => SyntaxKind::PLUS_EQ,
            LogosToken::MinusEq => SyntaxKind::MINUS_EQ,
            LogosToken::StarEq => SyntaxKind::STAR_EQ,
            LogosToken::SlashEq => SyntaxKind::SLASH_EQ,
            LogosToken::DotEq => SyntaxKind::DOT_EQ,
            LogosToken::PercentEq => SyntaxKind::PERCENT_EQ,
            LogosToken::AmpEq => SyntaxKind::AMP_EQ,
            LogosToken::PipeEq => SyntaxKind::PIPE_EQ,
            LogosToken::CaretEq => SyntaxKind::CARET_EQ,
            LogosToken::LBrace => SyntaxKind::L_BRACE,
            LogosToken::RBrace => SyntaxKind::R_BRACE,
            LogosToken::LBracket => SyntaxKind::L_BRACKET,
            LogosToken::RBracket => SyntaxKind::R_BRACKET,
            LogosToken::LParen => SyntaxKind::L_PAREN,
            LogosToken::RParen => SyntaxKind::R_PAREN,
            LogosToken::Semicolon => SyntaxKind::SEMICOLON,
            LogosToken::Colon => SyntaxKind::COLON,
            LogosToken::Comma => SyntaxKind::COMMA,
            LogosToken::Dot => SyntaxKind::DOT,
            LogosToken::Question => SyntaxKind::QUESTION,
            LogosToken::Bang => SyntaxKind::BANG,
            LogosToken::Eq => SyntaxKind::EQ,
            LogosToken::Lt => SyntaxKind::LT,
            LogosToken::Gt => SyntaxKind::GT,
            LogosToken::Plus => SyntaxKind::PLUS,
            LogosToken::Minus => SyntaxKind::MINUS,
            LogosToken::Star => SyntaxKind::STAR,
            LogosToken::Slash => SyntaxKind::SLASH,
            LogosToken::Percent => SyntaxKind::PERCENT,
            LogosToken::Caret => SyntaxKind::CARET,
            LogosToken::Amp => SyntaxKind::AMP,
            LogosToken::Pipe => SyntaxKind::PIPE,
            LogosToken::Tilde => SyntaxKind::TILDE,
            LogosToken::At => SyntaxKind::AT,
            LogosToken::Backslash => SyntaxKind::BACKSLASH,
            LogosToken::Dollar => SyntaxKind::DOLLAR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<SyntaxKind> {
        tokenize(input).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn lexes_script_with_tags() {
        assert_eq!(
            kinds("<?php $x = 1; ?>"),
            vec![
                SyntaxKind::OPEN_TAG,
                SyntaxKind::WHITESPACE,
                SyntaxKind::VARIABLE,
                SyntaxKind::WHITESPACE,
                SyntaxKind::EQ,
                SyntaxKind::WHITESPACE,
                SyntaxKind::INTEGER,
                SyntaxKind::SEMICOLON,
                SyntaxKind::WHITESPACE,
                SyntaxKind::CLOSE_TAG,
            ]
        );
    }

    #[test]
    fn html_around_script_becomes_inline_html() {
        let tokens = tokenize("<h1>Hi</h1><?php echo 1; ?><p>Bye</p>");
        assert_eq!(tokens[0].kind, SyntaxKind::INLINE_HTML);
        assert_eq!(tokens[0].text, "<h1>Hi</h1>");
        assert_eq!(tokens.last().map(|t| t.kind), Some(SyntaxKind::INLINE_HTML));
        assert_eq!(tokens.last().map(|t| t.text), Some("<p>Bye</p>"));
    }

    #[test]
    fn every_byte_is_covered() {
        let input = "a<?php /* c */ $x=$y.\"s\";?>b<?= 1 ?>";
        let rebuilt: String = tokenize(input).iter().map(|t| t.text).collect();
        assert_eq!(rebuilt, input);
    }

    #[test]
    fn keywords_are_case_insensitive() {
        let tokens = tokenize("<?php FUNCTION f() {}");
        assert!(tokens.iter().any(|t| t.kind == SyntaxKind::FUNCTION_KW));
    }

    #[test]
    fn comments_and_doc_comments_are_distinguished() {
        assert!(kinds("<?php /** doc */").contains(&SyntaxKind::DOC_COMMENT));
        assert!(kinds("<?php /* plain */").contains(&SyntaxKind::BLOCK_COMMENT));
        assert!(kinds("<?php # note").contains(&SyntaxKind::LINE_COMMENT));
    }

    #[test]
    fn open_tag_echo_is_lexed() {
        let tokens = tokenize("<?= $x ?>");
        assert_eq!(tokens[0].kind, SyntaxKind::OPEN_TAG_ECHO);
    }

    #[test]
    fn open_tag_requires_a_delimiter() {
        let tokens = tokenize("<?phpinfo()");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, SyntaxKind::INLINE_HTML);
        assert_eq!(tokens[0].text, "<?phpinfo()");
    }

    #[test]
    fn open_tag_at_end_of_input_still_opens() {
        assert_eq!(kinds("<?php"), vec![SyntaxKind::OPEN_TAG]);
    }

    #[test]
    fn line_comments_stop_at_a_close_tag() {
        let tokens = tokenize("<?php // note ?>after");
        let comment = tokens
            .iter()
            .find(|t| t.kind == SyntaxKind::LINE_COMMENT)
            .unwrap();
        assert_eq!(comment.text, "// note ");
        assert!(tokens.iter().any(|t| t.kind == SyntaxKind::CLOSE_TAG));
        assert_eq!(tokens.last().map(|t| t.text), Some("after"));
    }

    #[test]
    fn hash_comments_stop_at_a_close_tag() {
        let tokens = tokenize("<?php # x?>y");
        let comment = tokens
            .iter()
            .find(|t| t.kind == SyntaxKind::LINE_COMMENT)
            .unwrap();
        assert_eq!(comment.text, "# x");
        assert_eq!(tokens.last().map(|t| t.kind), Some(SyntaxKind::INLINE_HTML));
    }
}
