//! PHP keyword table.
//!
//! PHP keywords are case-insensitive; the lexer lexes a generic identifier
//! and promotes it here so `Function`, `FUNCTION` and `function` all lex to
//! [`SyntaxKind::FUNCTION_KW`].

use super::syntax_kind::SyntaxKind;

/// All reserved words recognized by the parser, lowercase.
pub const KEYWORDS: &[(&str, SyntaxKind)] = &[
    ("abstract", SyntaxKind::ABSTRACT_KW),
    ("and", SyntaxKind::AND_KW),
    ("array", SyntaxKind::ARRAY_KW),
    ("as", SyntaxKind::AS_KW),
    ("break", SyntaxKind::BREAK_KW),
    ("case", SyntaxKind::CASE_KW),
    ("catch", SyntaxKind::CATCH_KW),
    ("class", SyntaxKind::CLASS_KW),
    ("const", SyntaxKind::CONST_KW),
    ("continue", SyntaxKind::CONTINUE_KW),
    ("default", SyntaxKind::DEFAULT_KW),
    ("do", SyntaxKind::DO_KW),
    ("echo", SyntaxKind::ECHO_KW),
    ("else", SyntaxKind::ELSE_KW),
    ("elseif", SyntaxKind::ELSEIF_KW),
    ("extends", SyntaxKind::EXTENDS_KW),
    ("false", SyntaxKind::FALSE_KW),
    ("final", SyntaxKind::FINAL_KW),
    ("finally", SyntaxKind::FINALLY_KW),
    ("for", SyntaxKind::FOR_KW),
    ("foreach", SyntaxKind::FOREACH_KW),
    ("function", SyntaxKind::FUNCTION_KW),
    ("global", SyntaxKind::GLOBAL_KW),
    ("if", SyntaxKind::IF_KW),
    ("implements", SyntaxKind::IMPLEMENTS_KW),
    ("instanceof", SyntaxKind::INSTANCEOF_KW),
    ("interface", SyntaxKind::INTERFACE_KW),
    ("list", SyntaxKind::LIST_KW),
    ("namespace", SyntaxKind::NAMESPACE_KW),
    ("new", SyntaxKind::NEW_KW),
    ("null", SyntaxKind::NULL_KW),
    ("or", SyntaxKind::OR_KW),
    ("print", SyntaxKind::PRINT_KW),
    ("private", SyntaxKind::PRIVATE_KW),
    ("protected", SyntaxKind::PROTECTED_KW),
    ("public", SyntaxKind::PUBLIC_KW),
    ("return", SyntaxKind::RETURN_KW),
    ("static", SyntaxKind::STATIC_KW),
    ("switch", SyntaxKind::SWITCH_KW),
    ("throw", SyntaxKind::THROW_KW),
    ("trait", SyntaxKind::TRAIT_KW),
    ("true", SyntaxKind::TRUE_KW),
    ("try", SyntaxKind::TRY_KW),
    ("use", SyntaxKind::USE_KW),
    ("var", SyntaxKind::VAR_KW),
    ("while", SyntaxKind::WHILE_KW),
    ("xor", SyntaxKind::XOR_KW),
];

/// Look up the keyword kind for an identifier, case-insensitively.
pub fn keyword_kind(ident: &str) -> Option<SyntaxKind> {
    // Keywords are short; the ASCII lowercase copy stays on the stack
    let mut buf = [0u8; 16];
    if ident.len() > buf.len() || !ident.is_ascii() {
        return None;
    }
    let lower = &mut buf[..ident.len()];
    lower.copy_from_slice(ident.as_bytes());
    lower.make_ascii_lowercase();
    let lower = std::str::from_utf8(lower).ok()?;
    KEYWORDS
        .binary_search_by_key(&lower, |&(word, _)| word)
        .ok()
        .map(|i| KEYWORDS[i].1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_sorted_for_binary_search() {
        let mut sorted = KEYWORDS.to_vec();
        sorted.sort_by_key(|&(word, _)| word);
        assert_eq!(sorted, KEYWORDS);
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(keyword_kind("function"), Some(SyntaxKind::FUNCTION_KW));
        assert_eq!(keyword_kind("FUNCTION"), Some(SyntaxKind::FUNCTION_KW));
        assert_eq!(keyword_kind("Echo"), Some(SyntaxKind::ECHO_KW));
        assert_eq!(keyword_kind("my_function"), None);
    }
}
