//! Syntax error type carrying the offending range, an expected-construct
//! message, and a categorized error code.

use rowan::{TextRange, TextSize};
use std::fmt;

use super::codes::ErrorCode;
use crate::base::LineIndex;

/// A syntax error with location and categorization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    /// Human-readable error message (what was expected)
    pub message: String,
    /// Source location
    pub range: TextRange,
    /// Categorized error code
    pub code: ErrorCode,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, range: TextRange, code: ErrorCode) -> Self {
        Self {
            message: message.into(),
            range,
            code,
        }
    }

    /// Create an error at a specific offset with zero-width range
    pub fn at_offset(message: impl Into<String>, offset: TextSize, code: ErrorCode) -> Self {
        Self::new(message, TextRange::empty(offset), code)
    }

    /// Render the error with a 1-indexed `line:col` prefix.
    pub fn display_with(&self, index: &LineIndex) -> String {
        let pos = index.line_col(self.range.start());
        format!(
            "{}:{}: {} [{}]",
            pos.line + 1,
            pos.col + 1,
            self.message,
            self.code
        )
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at {}..{} [{}]",
            self.message,
            u32::from(self.range.start()),
            u32::from(self.range.end()),
            self.code
        )
    }
}
