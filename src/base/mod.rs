//! Foundation types for the analyzer.
//!
//! This module provides the source offset index used by every pass that
//! reports a human-readable location:
//! - [`LineIndex`] - byte offset → line/column conversion
//! - [`LineCol`] - a 0-indexed line/column pair
//!
//! This module has NO dependencies on other php-analysis modules.

mod line_index;

pub use line_index::{LineCol, LineIndex};

// Re-export text-size types for convenience
pub use text_size::{TextRange, TextSize};
