//! Byte-offset to line/column conversion.
//!
//! Built once per file from the decoded source text and shared read-only by
//! every pass that reports a location (issues, measures, highlighting).

use text_size::{TextRange, TextSize};

/// A position in source code (0-indexed line and byte column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LineCol {
    pub line: u32,
    pub col: u32,
}

/// Maps byte offsets in the decoded source to lines and columns.
///
/// Lines are split on `\n`; a trailing `\r` belongs to the line text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    /// Byte offset at which each line starts. `starts[0]` is always 0.
    starts: Vec<TextSize>,
    len: TextSize,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut starts = vec![TextSize::new(0)];
        for (i, b) in text.bytes().enumerate() {
            if b == b'\n' {
                starts.push(TextSize::new(i as u32 + 1));
            }
        }
        Self {
            starts,
            len: TextSize::of(text),
        }
    }

    /// Number of lines in the file. An empty file has one (empty) line.
    pub fn line_count(&self) -> u32 {
        self.starts.len() as u32
    }

    /// Convert a byte offset to a line/column pair.
    ///
    /// Offsets past the end of the file clamp to the last position.
    pub fn line_col(&self, offset: TextSize) -> LineCol {
        let offset = offset.min(self.len);
        let line = self
            .starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);
        LineCol {
            line: line as u32,
            col: u32::from(offset) - u32::from(self.starts[line]),
        }
    }

    /// The 0-indexed line containing a byte offset.
    pub fn line_of(&self, offset: TextSize) -> u32 {
        self.line_col(offset).line
    }

    /// Byte range of a 0-indexed line, excluding its `\n` terminator.
    ///
    /// Returns `None` for out-of-bounds lines.
    pub fn line_range(&self, line: u32) -> Option<TextRange> {
        let start = *self.starts.get(line as usize)?;
        let end = match self.starts.get(line as usize + 1) {
            // Strip the trailing '\n' from the line itself
            Some(&next) => next - TextSize::new(1),
            None => self.len,
        };
        Some(TextRange::new(start, end))
    }

    /// All 0-indexed lines a range touches, inclusive on both ends.
    pub fn lines_in(&self, range: TextRange) -> std::ops::RangeInclusive<u32> {
        let first = self.line_of(range.start());
        // end() is exclusive; an empty range still sits on one line
        let last_offset = if range.is_empty() {
            range.start()
        } else {
            range.end() - TextSize::new(1)
        };
        first..=self.line_of(last_offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_has_one_line() {
        let index = LineIndex::new("");
        assert_eq!(index.line_count(), 1);
        assert_eq!(
            index.line_col(TextSize::new(0)),
            LineCol { line: 0, col: 0 }
        );
    }

    #[test]
    fn offsets_map_to_lines_and_columns() {
        let index = LineIndex::new("ab\ncd\n\nef");
        assert_eq!(
            index.line_col(TextSize::new(0)),
            LineCol { line: 0, col: 0 }
        );
        assert_eq!(
            index.line_col(TextSize::new(1)),
            LineCol { line: 0, col: 1 }
        );
        assert_eq!(
            index.line_col(TextSize::new(3)),
            LineCol { line: 1, col: 0 }
        );
        assert_eq!(
            index.line_col(TextSize::new(6)),
            LineCol { line: 2, col: 0 }
        );
        assert_eq!(
            index.line_col(TextSize::new(8)),
            LineCol { line: 3, col: 1 }
        );
    }

    #[test]
    fn line_ranges_exclude_newline() {
        let index = LineIndex::new("ab\ncd");
        assert_eq!(
            index.line_range(0),
            Some(TextRange::new(TextSize::new(0), TextSize::new(2)))
        );
        assert_eq!(
            index.line_range(1),
            Some(TextRange::new(TextSize::new(3), TextSize::new(5)))
        );
        assert_eq!(index.line_range(2), None);
    }

    #[test]
    fn lines_in_spans_multiple_lines() {
        let index = LineIndex::new("ab\ncd\nef");
        let range = TextRange::new(TextSize::new(1), TextSize::new(7));
        assert_eq!(index.lines_in(range), 0..=2);
        let empty = TextRange::empty(TextSize::new(4));
        assert_eq!(index.lines_in(empty), 1..=1);
    }
}
