// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Source location tracking.

/// A point in the source text.
///
/// `line` is 1-based and `column` is 0-based, matching ESTree `loc`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Position {
    pub offset: usize,
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(offset: usize, line: u32, column: u32) -> Self {
        Self { offset, line, column }
    }
}

/// A span in the source code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Zero-width span at `pos`.
    pub fn empty(pos: Position) -> Self {
        Self { start: pos, end: pos }
    }

    /// The smallest span covering both `self` and `other`.
    pub fn to(self, other: Span) -> Span {
        let start = if other.start.offset < self.start.offset { other.start } else { self.start };
        let end = if other.end.offset > self.end.offset { other.end } else { self.end };
        Span { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.offset.saturating_sub(self.start.offset)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Precomputed line-start offsets for O(log n) byte-offset → line:col lookup.
#[derive(Debug, Clone)]
pub struct LineMap {
    /// Byte offset of the start of each line. line_starts[0] is always 0.
    line_starts: Vec<u32>,
}

impl LineMap {
    /// Build a line map by scanning source for line terminators. O(n).
    ///
    /// `\r\n` counts as one terminator; lone `\r`, U+2028 and U+2029 count
    /// as well, as ECMAScript line terminators.
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0u32];
        let bytes = source.as_bytes();
        for (i, ch) in source.char_indices() {
            let next = i + ch.len_utf8();
            match ch {
                '\n' => line_starts.push(next as u32),
                '\r' if bytes.get(next) != Some(&b'\n') => line_starts.push(next as u32),
                '\u{2028}' | '\u{2029}' => line_starts.push(next as u32),
                _ => {}
            }
        }
        LineMap { line_starts }
    }

    /// Convert byte offset to (line, col), both 1-based. O(log n).
    pub fn offset_to_line_col(&self, offset: usize) -> (u32, u32) {
        let offset = offset as u32;
        let line_idx = match self.line_starts.binary_search(&offset) {
            Ok(i) => i,
            Err(i) => i.saturating_sub(1),
        };
        let line = (line_idx + 1) as u32;
        let col = offset - self.line_starts[line_idx] + 1;
        (line, col)
    }

    /// ESTree position for a byte offset (1-based line, 0-based column).
    pub fn position(&self, offset: usize) -> Position {
        let (line, col) = self.offset_to_line_col(offset);
        Position::new(offset, line, col - 1)
    }

    /// Span covering the byte range `start..end`.
    pub fn span(&self, start: usize, end: usize) -> Span {
        Span::new(self.position(start), self.position(end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_source() {
        let lm = LineMap::new("");
        assert_eq!(lm.offset_to_line_col(0), (1, 1));
        assert_eq!(lm.position(0), Position::new(0, 1, 0));
    }

    #[test]
    fn lines_and_columns() {
        let lm = LineMap::new("abc\ndef\nghi");
        assert_eq!(lm.offset_to_line_col(2), (1, 3));
        assert_eq!(lm.offset_to_line_col(4), (2, 1));
        assert_eq!(lm.offset_to_line_col(10), (3, 3));
    }

    #[test]
    fn separators_u2028_and_u2029_end_lines() {
        let lm = LineMap::new("a\u{2028}b\u{2029}c");
        assert_eq!(lm.position(4).line, 2);
        assert_eq!(lm.position(8), Position::new(8, 3, 0));
    }

    #[test]
    fn estree_positions_use_zero_based_columns() {
        let lm = LineMap::new("let a;\nlet b;");
        assert_eq!(lm.position(0), Position::new(0, 1, 0));
        assert_eq!(lm.position(11), Position::new(11, 2, 4));
    }

    #[test]
    fn crlf_is_one_terminator() {
        let lm = LineMap::new("a\r\nb\rc");
        assert_eq!(lm.position(3).line, 2);
        assert_eq!(lm.position(5).line, 3);
    }

    #[test]
    fn span_to_covers_both() {
        let lm = LineMap::new("a + b");
        let left = lm.span(0, 1);
        let right = lm.span(4, 5);
        let whole = left.to(right);
        assert_eq!(whole.start.offset, 0);
        assert_eq!(whole.end.offset, 5);
        assert_eq!(right.to(left), whole);
        assert_eq!(whole.len(), 5);
    }
}
