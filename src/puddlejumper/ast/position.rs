//! Source location utilities for converting byte offsets to line/column positions

use super::span::{Position, Span};
use std::ops::Range;

/// Provides fast conversion from byte offsets to line/column positions
pub struct SourceLocation<'a> {
    source: &'a str,
    /// Byte offsets where each line starts
    line_starts: Vec<usize>,
}

impl<'a> SourceLocation<'a> {
    pub fn new(source: &'a str) -> Self {
        let mut line_starts = vec![0];

        for (byte_pos, ch) in source.char_indices() {
            if ch == '\n' {
                line_starts.push(byte_pos + 1);
            }
        }

        Self {
            source,
            line_starts,
        }
    }

    /// Convert a byte offset to a 1-based line/column position.
    ///
    /// Offsets past the end of the source clamp to the end.
    pub fn byte_to_position(&self, byte_offset: usize) -> Position {
        let offset = byte_offset.min(self.source.len());
        let line = self
            .line_starts
            .binary_search(&offset)
            .unwrap_or_else(|i| i - 1);
        let line_start = self.line_starts[line];
        let column = self
            .source
            .get(line_start..offset)
            .map(|prefix| prefix.chars().count())
            .unwrap_or(offset - line_start);

        Position::new(line + 1, column + 1, offset)
    }

    pub fn range_to_span(&self, range: &Range<usize>) -> Span {
        Span::new(
            self.byte_to_position(range.start),
            self.byte_to_position(range.end),
        )
    }

    /// Position just past the last character of the source
    pub fn end(&self) -> Position {
        self.byte_to_position(self.source.len())
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_to_position_single_line() {
        let loc = SourceLocation::new("Hello");
        assert_eq!(loc.byte_to_position(0), Position::new(1, 1, 0));
        assert_eq!(loc.byte_to_position(4), Position::new(1, 5, 4));
    }

    #[test]
    fn test_byte_to_position_multiline() {
        let loc = SourceLocation::new("Hello\nworld\ntest");

        assert_eq!(loc.byte_to_position(5), Position::new(1, 6, 5));
        assert_eq!(loc.byte_to_position(6), Position::new(2, 1, 6));
        assert_eq!(loc.byte_to_position(12), Position::new(3, 1, 12));
        assert_eq!(loc.byte_to_position(15), Position::new(3, 4, 15));
    }

    #[test]
    fn test_columns_count_characters() {
        let loc = SourceLocation::new("x\nwörld");
        // 'ö' is two bytes wide
        assert_eq!(loc.byte_to_position(5), Position::new(2, 3, 5));
        assert_eq!(loc.byte_to_position(6), Position::new(2, 4, 6));
    }

    #[test]
    fn test_offsets_past_end_clamp() {
        let loc = SourceLocation::new("ab\n");
        assert_eq!(loc.byte_to_position(99), Position::new(2, 1, 3));
        assert_eq!(loc.end(), Position::new(2, 1, 3));
        assert_eq!(loc.line_count(), 2);
    }

    #[test]
    fn test_range_to_span() {
        let loc = SourceLocation::new("Hello\nWorld\nTest");
        let span = loc.range_to_span(&(6..12));

        assert_eq!(span.start, Position::new(2, 1, 6));
        assert_eq!(span.end, Position::new(3, 1, 12));
        assert!(span.contains(Position::new(2, 3, 8)));
        assert!(!span.contains(Position::new(1, 1, 0)));
    }
}
