//! Source buffer with a precomputed line table.
//!
//! [`SourceText`] wraps the source string being parsed and answers
//! offset-to-line queries in O(log n). It backs the caret diagnostics and
//! the parser's line-break detection between tokens.

use std::sync::Arc;

use super::Position;

/// A source buffer with precomputed line start offsets.
///
/// # Examples
///
/// ```
/// use juno_util::span::SourceText;
///
/// let text = SourceText::new("var x = 1\nvar y = 2");
/// assert_eq!(text.line_count(), 2);
/// assert_eq!(text.line_at(1), Some("var y = 2"));
/// ```
#[derive(Clone)]
pub struct SourceText {
    /// The source content.
    content: Arc<str>,
    /// Byte offset of the first character of each line.
    line_starts: Arc<[usize]>,
}

impl SourceText {
    /// Create a new source text, computing the line table.
    pub fn new(content: impl Into<Arc<str>>) -> Self {
        let content = content.into();
        let line_starts = Self::compute_line_starts(&content);
        Self {
            content,
            line_starts,
        }
    }

    /// Compute line start offsets from content.
    fn compute_line_starts(content: &str) -> Arc<[usize]> {
        let mut line_starts = vec![0];
        for (i, b) in content.bytes().enumerate() {
            if b == b'\n' {
                line_starts.push(i + 1);
            }
        }
        line_starts.into()
    }

    /// Get the source content.
    #[inline]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Get the total number of lines.
    #[inline]
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Get the byte offset where a line starts (0-indexed line number).
    ///
    /// Returns `None` if the line number is out of bounds.
    #[inline]
    pub fn line_start(&self, line: usize) -> Option<usize> {
        self.line_starts.get(line).copied()
    }

    /// Get a specific source line (0-indexed), without its terminator.
    ///
    /// # Examples
    ///
    /// ```
    /// use juno_util::span::SourceText;
    ///
    /// let text = SourceText::new("one\ntwo\nthree");
    /// assert_eq!(text.line_at(0), Some("one"));
    /// assert_eq!(text.line_at(2), Some("three"));
    /// assert_eq!(text.line_at(3), None);
    /// ```
    pub fn line_at(&self, line: usize) -> Option<&str> {
        let start = self.line_start(line)?;
        let end = self
            .line_start(line + 1)
            .unwrap_or(self.content.len());
        let text = &self.content[start..end];
        Some(text.trim_end_matches(['\n', '\r']))
    }

    /// Find the line (0-indexed) containing a byte offset.
    pub fn line_of_offset(&self, offset: usize) -> usize {
        match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(insert_point) => insert_point - 1,
        }
    }

    /// Convert a byte offset to a full [`Position`].
    ///
    /// The column is measured in characters from the start of the line.
    ///
    /// # Examples
    ///
    /// ```
    /// use juno_util::span::SourceText;
    ///
    /// let text = SourceText::new("ab\ncd");
    /// let pos = text.offset_to_position(4);
    /// assert_eq!(pos.line, 1);
    /// assert_eq!(pos.column, 1);
    /// ```
    pub fn offset_to_position(&self, offset: usize) -> Position {
        let line = self.line_of_offset(offset);
        let line_start = self.line_starts[line];
        let column = self.content[line_start..offset].chars().count();
        Position::new(line as u32, column as u32, offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_source() {
        let text = SourceText::new("");
        assert_eq!(text.line_count(), 1);
        assert_eq!(text.line_at(0), Some(""));
    }

    #[test]
    fn test_single_line() {
        let text = SourceText::new("var x = 1");
        assert_eq!(text.line_count(), 1);
        assert_eq!(text.line_at(0), Some("var x = 1"));
        assert_eq!(text.line_at(1), None);
    }

    #[test]
    fn test_line_starts() {
        let text = SourceText::new("one\ntwo\nthree");
        assert_eq!(text.line_start(0), Some(0));
        assert_eq!(text.line_start(1), Some(4));
        assert_eq!(text.line_start(2), Some(8));
        assert_eq!(text.line_start(3), None);
    }

    #[test]
    fn test_line_of_offset() {
        let text = SourceText::new("one\ntwo\nthree");
        assert_eq!(text.line_of_offset(0), 0);
        assert_eq!(text.line_of_offset(3), 0);
        assert_eq!(text.line_of_offset(4), 1);
        assert_eq!(text.line_of_offset(8), 2);
        assert_eq!(text.line_of_offset(12), 2);
    }

    #[test]
    fn test_offset_to_position() {
        let text = SourceText::new("ab\ncd\nef");
        let pos = text.offset_to_position(0);
        assert_eq!((pos.line, pos.column), (0, 0));
        let pos = text.offset_to_position(4);
        assert_eq!((pos.line, pos.column), (1, 1));
        let pos = text.offset_to_position(7);
        assert_eq!((pos.line, pos.column), (2, 1));
    }

    #[test]
    fn test_crlf_trimmed() {
        let text = SourceText::new("one\r\ntwo");
        assert_eq!(text.line_at(0), Some("one"));
        assert_eq!(text.line_at(1), Some("two"));
    }

    #[test]
    fn test_trailing_newline() {
        let text = SourceText::new("one\n");
        assert_eq!(text.line_count(), 2);
        assert_eq!(text.line_at(1), Some(""));
    }
}
