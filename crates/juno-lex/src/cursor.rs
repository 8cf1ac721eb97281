//! Character cursor for traversing source code.
//!
//! This module provides the `Cursor` struct which maintains position state
//! while iterating through source code characters. It handles UTF-8
//! encoding correctly and tracks line/column information (0-indexed) for
//! token spans.

use juno_util::span::Position;

/// A cursor for traversing source code character by character.
///
/// The cursor maintains the current byte position in the source string and
/// provides methods for advancing, peeking ahead, and checking conditions.
///
/// # Example
///
/// ```
/// use juno_lex::Cursor;
///
/// let mut cursor = Cursor::new("let x = 42;");
/// assert_eq!(cursor.current_char(), 'l');
/// cursor.advance();
/// assert_eq!(cursor.current_char(), 'e');
/// ```
pub struct Cursor<'a> {
    /// The source text being traversed.
    source: &'a str,

    /// Current byte position in the source.
    position: usize,

    /// Current line number (0-indexed).
    line: u32,

    /// Current column number (0-indexed, in characters).
    column: u32,
}

impl<'a> Cursor<'a> {
    /// Creates a new cursor at the start of the given source text.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            position: 0,
            line: 0,
            column: 0,
        }
    }

    /// Returns the current character, or `'\0'` at the end of the source.
    #[inline]
    pub fn current_char(&self) -> char {
        self.peek_char(0)
    }

    /// Returns the character at the given byte offset from the current
    /// position, or `'\0'` past the end.
    ///
    /// # Example
    ///
    /// ```
    /// use juno_lex::Cursor;
    ///
    /// let cursor = Cursor::new("abc");
    /// assert_eq!(cursor.peek_char(1), 'b');
    /// assert_eq!(cursor.peek_char(9), '\0');
    /// ```
    #[inline]
    pub fn peek_char(&self, offset: usize) -> char {
        let pos = self.position + offset;
        if pos >= self.source.len() {
            return '\0';
        }

        // Fast path for ASCII (most common case)
        let b = self.source.as_bytes()[pos];
        if b < 128 {
            return b as char;
        }

        self.source[pos..].chars().next().unwrap_or('\0')
    }

    /// Advances the cursor to the next character, updating line and column
    /// tracking. Does nothing at the end of the source.
    #[inline]
    pub fn advance(&mut self) {
        if self.position >= self.source.len() {
            return;
        }

        // Fast path for ASCII
        let b = self.source.as_bytes()[self.position];
        if b < 128 {
            self.position += 1;
            if b == b'\n' {
                self.line += 1;
                self.column = 0;
            } else {
                self.column += 1;
            }
            return;
        }

        if let Some(c) = self.source[self.position..].chars().next() {
            self.position += c.len_utf8();
            if c == '\n' {
                self.line += 1;
                self.column = 0;
            } else {
                self.column += 1;
            }
        }
    }

    /// Advances the cursor by the given number of characters.
    pub fn advance_n(&mut self, count: usize) {
        for _ in 0..count {
            if self.is_at_end() {
                break;
            }
            self.advance();
        }
    }

    /// Returns true if the cursor is at the end of the source.
    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.position >= self.source.len()
    }

    /// Matches and consumes the expected character if present.
    ///
    /// # Example
    ///
    /// ```
    /// use juno_lex::Cursor;
    ///
    /// let mut cursor = Cursor::new("=>");
    /// assert!(cursor.match_char('='));
    /// assert!(!cursor.match_char('='));
    /// assert_eq!(cursor.current_char(), '>');
    /// ```
    pub fn match_char(&mut self, expected: char) -> bool {
        if self.current_char() == expected {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Skips the whitespace characters the language recognizes: space,
    /// tab, carriage return and line feed.
    pub fn skip_whitespace(&mut self) {
        while matches!(self.current_char(), ' ' | '\t' | '\r' | '\n') && !self.is_at_end() {
            self.advance();
        }
    }

    /// Returns the current byte position in the source.
    #[inline]
    pub fn offset(&self) -> usize {
        self.position
    }

    /// Returns the current cursor location as a [`Position`].
    #[inline]
    pub fn pos(&self) -> Position {
        Position::new(self.line, self.column, self.position)
    }

    /// Returns a slice of the source from the given start byte offset to
    /// the current position.
    ///
    /// # Example
    ///
    /// ```
    /// use juno_lex::Cursor;
    ///
    /// let mut cursor = Cursor::new("let x");
    /// let start = cursor.offset();
    /// cursor.advance_n(3);
    /// assert_eq!(cursor.slice_from(start), "let");
    /// ```
    pub fn slice_from(&self, start: usize) -> &'a str {
        &self.source[start..self.position]
    }

    /// Returns the source text from the current position to the end.
    pub fn remaining(&self) -> &'a str {
        &self.source[self.position..]
    }

    /// Returns the full source text.
    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Creates a snapshot of the current cursor state.
    pub fn snapshot(&self) -> CursorSnapshot {
        CursorSnapshot {
            position: self.position,
            line: self.line,
            column: self.column,
        }
    }

    /// Restores the cursor to a previously saved snapshot.
    pub fn restore(&mut self, snapshot: CursorSnapshot) {
        self.position = snapshot.position;
        self.line = snapshot.line;
        self.column = snapshot.column;
    }
}

/// A snapshot of cursor state that can be restored later.
///
/// The lexer takes one of these at each token start; the token's span
/// start is derived from it.
#[derive(Clone, Copy, Debug)]
pub struct CursorSnapshot {
    /// Byte position in source.
    pub position: usize,
    /// Line number (0-indexed).
    pub line: u32,
    /// Column number (0-indexed).
    pub column: u32,
}

impl CursorSnapshot {
    /// The snapshot as a [`Position`].
    #[inline]
    pub fn pos(&self) -> Position {
        Position::new(self.line, self.column, self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_cursor() {
        let cursor = Cursor::new("let x = 42;");
        assert_eq!(cursor.current_char(), 'l');
        assert_eq!(cursor.offset(), 0);
        assert_eq!(cursor.pos().line, 0);
        assert_eq!(cursor.pos().column, 0);
    }

    #[test]
    fn test_advance() {
        let mut cursor = Cursor::new("abc");
        cursor.advance();
        assert_eq!(cursor.current_char(), 'b');
        cursor.advance();
        cursor.advance();
        assert_eq!(cursor.current_char(), '\0');
        assert!(cursor.is_at_end());
    }

    #[test]
    fn test_advance_utf8() {
        let mut cursor = Cursor::new("αβγ");
        assert_eq!(cursor.current_char(), 'α');
        cursor.advance();
        assert_eq!(cursor.current_char(), 'β');
        assert_eq!(cursor.pos().column, 1);
    }

    #[test]
    fn test_peek_char() {
        let cursor = Cursor::new("abc");
        assert_eq!(cursor.peek_char(0), 'a');
        assert_eq!(cursor.peek_char(2), 'c');
        assert_eq!(cursor.peek_char(3), '\0');
        assert_eq!(cursor.peek_char(100), '\0');
    }

    #[test]
    fn test_match_char() {
        let mut cursor = Cursor::new("=>");
        assert!(cursor.match_char('='));
        assert!(!cursor.match_char('='));
        assert!(cursor.match_char('>'));
    }

    #[test]
    fn test_skip_whitespace() {
        let mut cursor = Cursor::new("  \t\r\n  let");
        cursor.skip_whitespace();
        assert_eq!(cursor.current_char(), 'l');
        assert_eq!(cursor.pos().line, 1);
    }

    #[test]
    fn test_line_column_zero_indexed() {
        let mut cursor = Cursor::new("ab\ncd");
        cursor.advance_n(3);
        assert_eq!(cursor.pos().line, 1);
        assert_eq!(cursor.pos().column, 0);
        cursor.advance();
        assert_eq!(cursor.pos().column, 1);
    }

    #[test]
    fn test_slice_from_and_remaining() {
        let mut cursor = Cursor::new("let x = 42;");
        let start = cursor.offset();
        cursor.advance_n(3);
        assert_eq!(cursor.slice_from(start), "let");
        assert_eq!(cursor.remaining(), " x = 42;");
    }

    #[test]
    fn test_snapshot_restore() {
        let mut cursor = Cursor::new("let x = 42;");
        let snapshot = cursor.snapshot();
        cursor.advance_n(6);
        cursor.restore(snapshot);
        assert_eq!(cursor.offset(), 0);
        assert_eq!(cursor.current_char(), 'l');
    }

    #[test]
    fn test_empty_source() {
        let mut cursor = Cursor::new("");
        assert!(cursor.is_at_end());
        assert_eq!(cursor.current_char(), '\0');
        cursor.advance();
        assert!(cursor.is_at_end());
    }
}
