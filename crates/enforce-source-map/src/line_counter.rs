//! Byte offset to line/column conversion

use crate::types::Location;

/// Converts byte offsets into 1-based line/column [`Location`]s.
///
/// Line starts are collected once at construction, so each lookup is a
/// binary search. Offsets at or past the end of the source resolve to the
/// position just past the last character, which for a trailing newline is
/// the first column of the following line.
#[derive(Debug, Clone)]
pub struct LineCounter {
    /// Byte offset of the start of each line. Always contains 0.
    line_starts: Vec<usize>,
}

impl LineCounter {
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        for (i, b) in source.bytes().enumerate() {
            if b == b'\n' {
                line_starts.push(i + 1);
            }
        }
        Self { line_starts }
    }

    /// Convert a byte offset to a line/column location.
    pub fn location(&self, offset: usize) -> Location {
        let line = self.line_starts.partition_point(|&start| start <= offset);
        let line_start = self.line_starts[line - 1];
        Location {
            line,
            column: offset - line_start + 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_line() {
        let lc = LineCounter::new("hello");
        assert_eq!(lc.location(0), Location::new(1, 1));
        assert_eq!(lc.location(3), Location::new(1, 4));
        assert_eq!(lc.location(5), Location::new(1, 6));
    }

    #[test]
    fn test_multiline() {
        let lc = LineCounter::new("hello\nworld\ntest");
        assert_eq!(lc.location(0), Location::new(1, 1));
        assert_eq!(lc.location(5), Location::new(1, 6));
        assert_eq!(lc.location(6), Location::new(2, 1));
        assert_eq!(lc.location(9), Location::new(2, 4));
        assert_eq!(lc.location(12), Location::new(3, 1));
    }

    #[test]
    fn test_offset_after_trailing_newline() {
        let source = "a: 1\nb: 2\n";
        let lc = LineCounter::new(source);
        // End-of-document offset lands on the line after the last newline.
        assert_eq!(lc.location(source.len()), Location::new(3, 1));
    }

    #[test]
    fn test_empty_source() {
        let lc = LineCounter::new("");
        assert_eq!(lc.location(0), Location::new(1, 1));
    }
}
