use rowan::{TextRange, TextSize};

use super::{ErrorCode, SyntaxError};
use crate::base::LineIndex;

#[test]
fn display_includes_message_and_code() {
    let error = SyntaxError::new(
        "expected ';'",
        TextRange::new(TextSize::new(4), TextSize::new(5)),
        ErrorCode::E0201,
    );
    let rendered = error.to_string();
    assert!(rendered.contains("expected ';'"));
    assert!(rendered.contains("E0201"));
}

#[test]
fn display_with_index_renders_one_indexed_position() {
    let index = LineIndex::new("<?php\n$x =\n");
    let error = SyntaxError::at_offset("expected expression", TextSize::new(10), ErrorCode::E0402);
    let rendered = error.display_with(&index);
    assert!(rendered.starts_with("2:5:"), "got: {rendered}");
}

#[test]
fn every_code_has_a_description() {
    for code in [
        ErrorCode::E0101,
        ErrorCode::E0201,
        ErrorCode::E0301,
        ErrorCode::E0401,
        ErrorCode::E0901,
    ] {
        assert!(!code.description().is_empty());
    }
}
