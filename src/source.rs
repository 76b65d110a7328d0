//! Source positions
//!
//! Tokens only carry byte offsets. Line and column numbers are computed on
//! demand through a [`LineIndex`], which is only consulted when a diagnostic
//! has to be built, so the hot lexing path never tracks newlines.

use serde::Serialize;
use std::fmt;

/// Half-open byte range `start..end` into the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl From<std::ops::Range<usize>> for Span {
    fn from(range: std::ops::Range<usize>) -> Self {
        Span::new(range.start, range.end)
    }
}

/// Resolved position for error reporting. `line` and `column` are 1-based;
/// `column` counts characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SourceLocation {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(offset: usize, line: usize, column: usize) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Byte offsets of every line start in a source text.
#[derive(Debug, Clone)]
pub struct LineIndex<'src> {
    source: &'src str,
    line_starts: Vec<usize>,
}

impl<'src> LineIndex<'src> {
    pub fn new(source: &'src str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            source
                .bytes()
                .enumerate()
                .filter(|&(_, b)| b == b'\n')
                .map(|(i, _)| i + 1),
        );
        Self {
            source,
            line_starts,
        }
    }

    /// Resolve a byte offset. Offsets past the end clamp to end-of-input.
    pub fn location(&self, offset: usize) -> SourceLocation {
        let offset = offset.min(self.source.len());
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        let line_start = self.line_starts[line];
        let column = self
            .source
            .get(line_start..offset)
            .map(|prefix| prefix.chars().count())
            .unwrap_or(offset - line_start);
        SourceLocation::new(offset, line + 1, column + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_line() {
        let index = LineIndex::new("abc");
        assert_eq!(index.location(0), SourceLocation::new(0, 1, 1));
        assert_eq!(index.location(2), SourceLocation::new(2, 1, 3));
    }

    #[test]
    fn test_after_newlines() {
        let index = LineIndex::new("ab\ncd\n\nx");
        assert_eq!(index.location(3), SourceLocation::new(3, 2, 1));
        assert_eq!(index.location(4), SourceLocation::new(4, 2, 2));
        assert_eq!(index.location(7), SourceLocation::new(7, 4, 1));
    }

    #[test]
    fn test_end_of_input_clamps() {
        let index = LineIndex::new("ab\n");
        assert_eq!(index.location(3), SourceLocation::new(3, 2, 1));
        assert_eq!(index.location(99), SourceLocation::new(3, 2, 1));
    }

    #[test]
    fn test_columns_count_characters() {
        let index = LineIndex::new("é x");
        // 'é' is two bytes but one column
        assert_eq!(index.location(3).column, 3);
    }
}
