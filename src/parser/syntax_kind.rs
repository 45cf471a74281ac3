//! Syntax kinds for the Rowan-based CST
//!
//! This enum defines all possible node and token kinds in the syntax tree.
//! It covers the PHP grammar subset understood by the parser.

/// All syntax kinds (tokens and nodes) in the PHP tree
///
/// Tokens are leaf nodes (identifiers, keywords, punctuation).
/// Nodes are composite (statements, declarations, expressions).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // =========================================================================
    // TRIVIA (whitespace and comments - preserved but not semantically meaningful)
    // =========================================================================
    WHITESPACE = 0,
    LINE_COMMENT,   // // ... and # ...
    BLOCK_COMMENT,  // /* ... */
    DOC_COMMENT,    // /** ... */

    // =========================================================================
    // SCRIPT TAGS AND RAW TEXT
    // =========================================================================
    INLINE_HTML,    // text outside <?php ... ?>
    OPEN_TAG,       // <?php
    OPEN_TAG_ECHO,  // <?=
    CLOSE_TAG,      // ?>

    // =========================================================================
    // LITERALS
    // =========================================================================
    VARIABLE,       // $name
    IDENT,          // identifier
    INTEGER,        // 42, 0x2a, 0b1010
    FLOAT,          // 3.14, 1e10
    STRING,         // 'hello' or "hello"

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    L_BRACE,            // {
    R_BRACE,            // }
    L_BRACKET,          // [
    R_BRACKET,          // ]
    L_PAREN,            // (
    R_PAREN,            // )
    SEMICOLON,          // ;
    COLON,              // :
    COLON_COLON,        // ::
    COMMA,              // ,
    DOT,                // .
    DOT_EQ,             // .=
    ARROW,              // ->
    FAT_ARROW,          // =>
    QUESTION,           // ?
    QUESTION_QUESTION,  // ??
    QUESTION_QUESTION_EQ, // ??=
    BANG,               // !
    BANG_EQ,            // != and <>
    BANG_EQ_EQ,         // !==
    EQ,                 // =
    EQ_EQ,              // ==
    EQ_EQ_EQ,           // ===
    LT,                 // <
    GT,                 // >
    LT_EQ,              // <=
    GT_EQ,              // >=
    SPACESHIP,          // <=>
    SHL,                // <<
    SHR,                // >>
    SHL_EQ,             // <<=
    SHR_EQ,             // >>=
    PLUS,               // +
    PLUS_PLUS,          // ++
    PLUS_EQ,            // +=
    MINUS,              // -
    MINUS_MINUS,        // --
    MINUS_EQ,           // -=
    STAR,               // *
    STAR_STAR,          // **
    STAR_EQ,            // *=
    STAR_STAR_EQ,       // **=
    SLASH,              // /
    SLASH_EQ,           // /=
    PERCENT,            // %
    PERCENT_EQ,         // %=
    CARET,              // ^
    CARET_EQ,           // ^=
    AMP,                // &
    AMP_AMP,            // &&
    AMP_EQ,             // &=
    PIPE,               // |
    PIPE_PIPE,          // ||
    PIPE_EQ,            // |=
    TILDE,              // ~
    AT,                 // @
    BACKSLASH,          // \ (namespace separator)
    DOLLAR,             // $ (stray, e.g. variable-variables)

    // =========================================================================
    // KEYWORDS (case-insensitive in PHP; the lexer normalizes)
    // =========================================================================
    ABSTRACT_KW,
    AND_KW,
    ARRAY_KW,
    AS_KW,
    BREAK_KW,
    CASE_KW,
    CATCH_KW,
    CLASS_KW,
    CONST_KW,
    CONTINUE_KW,
    DEFAULT_KW,
    DO_KW,
    ECHO_KW,
    ELSE_KW,
    ELSEIF_KW,
    EXTENDS_KW,
    FALSE_KW,
    FINAL_KW,
    FINALLY_KW,
    FOR_KW,
    FOREACH_KW,
    FUNCTION_KW,
    GLOBAL_KW,
    IF_KW,
    IMPLEMENTS_KW,
    INSTANCEOF_KW,
    INTERFACE_KW,
    LIST_KW,
    NAMESPACE_KW,
    NEW_KW,
    NULL_KW,
    OR_KW,
    PRINT_KW,
    PRIVATE_KW,
    PROTECTED_KW,
    PUBLIC_KW,
    RETURN_KW,
    STATIC_KW,
    SWITCH_KW,
    THROW_KW,
    TRAIT_KW,
    TRUE_KW,
    TRY_KW,
    USE_KW,
    VAR_KW,
    WHILE_KW,
    XOR_KW,

    // =========================================================================
    // NODES
    // =========================================================================
    COMPILATION_UNIT,   // root, spans the whole file

    // Statements
    EXPR_STMT,
    ECHO_STMT,
    BLOCK_STMT,
    IF_STMT,
    ELSEIF_CLAUSE,
    ELSE_CLAUSE,
    WHILE_STMT,
    DO_STMT,
    FOR_STMT,
    FOREACH_STMT,
    SWITCH_STMT,
    CASE_CLAUSE,
    DEFAULT_CLAUSE,
    BREAK_STMT,
    CONTINUE_STMT,
    RETURN_STMT,
    THROW_STMT,
    TRY_STMT,
    CATCH_CLAUSE,
    FINALLY_CLAUSE,
    GLOBAL_STMT,
    STATIC_STMT,
    CONST_STMT,
    CONST_ELEM,
    NAMESPACE_STMT,
    USE_STMT,
    EMPTY_STMT,

    // Declarations
    FUNCTION_DECL,
    PARAM_LIST,
    PARAM,
    CLASS_DECL,
    CLASS_BODY,
    PROPERTY_DECL,
    CLASS_CONST_DECL,
    METHOD_DECL,

    // Expressions
    PAREN_EXPR,
    ASSIGN_EXPR,
    TERNARY_EXPR,
    BINARY_EXPR,
    UNARY_EXPR,
    PREFIX_EXPR,
    POSTFIX_EXPR,
    CALL_EXPR,
    ARG_LIST,
    NEW_EXPR,
    MEMBER_ACCESS_EXPR,
    STATIC_ACCESS_EXPR,
    SUBSCRIPT_EXPR,
    ARRAY_EXPR,
    ARRAY_ELEM,
    CLOSURE_EXPR,
    CLOSURE_USE_CLAUSE,
    VAR_EXPR,
    NAME_REF,
    LITERAL,

    // Special
    ERROR,

    #[doc(hidden)]
    __LAST,
}

impl SyntaxKind {
    /// Check if this is a trivia token (whitespace or comment)
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            Self::WHITESPACE | Self::LINE_COMMENT | Self::BLOCK_COMMENT | Self::DOC_COMMENT
        )
    }

    /// Check if this is a comment token
    pub fn is_comment(self) -> bool {
        matches!(
            self,
            Self::LINE_COMMENT | Self::BLOCK_COMMENT | Self::DOC_COMMENT
        )
    }

    /// Check if this is a keyword
    pub fn is_keyword(self) -> bool {
        (self as u16) >= (Self::ABSTRACT_KW as u16) && (self as u16) <= (Self::XOR_KW as u16)
    }

    /// Check if this is a punctuation token
    pub fn is_punct(self) -> bool {
        (self as u16) >= (Self::L_BRACE as u16) && (self as u16) <= (Self::DOLLAR as u16)
    }

    /// Check if this is a literal token
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            Self::INTEGER | Self::FLOAT | Self::STRING
        )
    }

    /// Check if this kind is a statement node
    pub fn is_statement(self) -> bool {
        matches!(
            self,
            Self::EXPR_STMT
                | Self::ECHO_STMT
                | Self::BLOCK_STMT
                | Self::IF_STMT
                | Self::WHILE_STMT
                | Self::DO_STMT
                | Self::FOR_STMT
                | Self::FOREACH_STMT
                | Self::SWITCH_STMT
                | Self::BREAK_STMT
                | Self::CONTINUE_STMT
                | Self::RETURN_STMT
                | Self::THROW_STMT
                | Self::TRY_STMT
                | Self::GLOBAL_STMT
                | Self::STATIC_STMT
                | Self::CONST_STMT
                | Self::NAMESPACE_STMT
                | Self::USE_STMT
                | Self::EMPTY_STMT
        )
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

impl From<rowan::SyntaxKind> for SyntaxKind {
    fn from(raw: rowan::SyntaxKind) -> Self {
        assert!(raw.0 < SyntaxKind::__LAST as u16);
        // Safety: we control all syntax kinds and check bounds above
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }
}

/// Language definition for Rowan
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PhpLanguage {}

impl rowan::Language for PhpLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        raw.into()
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type aliases for convenience
pub type SyntaxNode = rowan::SyntaxNode<PhpLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<PhpLanguage>;
pub type SyntaxElement = rowan::SyntaxElement<PhpLanguage>;
pub type SyntaxNodeChildren = rowan::SyntaxNodeChildren<PhpLanguage>;
