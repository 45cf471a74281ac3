//! Flags lines longer than a configured maximum
//!
//! Length is measured in the file's own encoding: for UTF-8 sources that is
//! the character count, for legacy encodings the encoded byte count, which
//! matches what editors configured for that charset show.

use encoding_rs::Encoding;

use super::{Check, CheckContext, Issue};

pub struct LineLength {
    pub maximum: usize,
    charset: Option<&'static Encoding>,
}

impl Default for LineLength {
    fn default() -> Self {
        Self {
            maximum: 120,
            charset: None,
        }
    }
}

impl LineLength {
    pub fn with_maximum(maximum: usize) -> Self {
        Self {
            maximum,
            charset: None,
        }
    }

    fn measured_len(&self, text: &str) -> usize {
        match self.charset {
            Some(charset) if charset != encoding_rs::UTF_8 => {
                let (encoded, _, _) = charset.encode(text);
                encoded.len()
            }
            _ => text.chars().count(),
        }
    }
}

impl Check for LineLength {
    fn key(&self) -> &'static str {
        "line-length"
    }

    fn wants_charset(&self) -> bool {
        true
    }

    fn set_charset(&mut self, charset: &'static Encoding) {
        self.charset = Some(charset);
    }

    fn analyze(&mut self, ctx: &CheckContext<'_>) -> Vec<Issue> {
        let mut issues = Vec::new();
        for line in 0..ctx.line_index.line_count() {
            let Some(range) = ctx.line_index.line_range(line) else {
                continue;
            };
            let text = &ctx.source[usize::from(range.start())..usize::from(range.end())];
            let length = self.measured_len(text.trim_end_matches('\r'));
            if length > self.maximum {
                let message = format!(
                    "Split this {length} characters long line (which is greater than {} \
                     authorized).",
                    self.maximum
                );
                issues.push(Issue::new(self.key(), message).at_range(range, ctx.line_index));
            }
        }
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::run_check;
    use super::LineLength;

    #[test]
    fn short_lines_pass() {
        let mut check = LineLength::default();
        assert!(run_check(&mut check, "<?php $x = 1;\n").is_empty());
    }

    #[test]
    fn long_lines_are_reported_per_line() {
        let mut check = LineLength {
            maximum: 10,
            charset: None,
        };
        let issues = run_check(&mut check, "<?php\n$aaaaaaaaaa = 1;\n$b = 2;\n$cccccccccc = 3;\n");
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].line, Some(1));
        assert_eq!(issues[1].line, Some(3));
    }

    #[test]
    fn length_is_characters_not_bytes_for_utf8() {
        let mut check = LineLength {
            maximum: 12,
            charset: Some(encoding_rs::UTF_8),
        };
        // 10 characters of code but more bytes
        assert!(run_check(&mut check, "<?php\n$x = 'héhé';\n").is_empty());
    }
}
