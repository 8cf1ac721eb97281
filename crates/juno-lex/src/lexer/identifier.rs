//! Identifier and keyword lexing.

use crate::token::{keyword_from_ident, Token};
use crate::Lexer;
use juno_util::Symbol;

/// Returns true for characters that can start an identifier:
/// ASCII letters, `_` and `$`.
#[inline]
pub(crate) fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '$'
}

/// Returns true for identifier continuation characters:
/// ASCII letters, digits, `_` and `$`.
#[inline]
pub(crate) fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

impl<'a> Lexer<'a> {
    /// Lexes an identifier or keyword.
    ///
    /// Consumes the maximal run of identifier characters and only then
    /// checks for a reserved word. Maximal munch is what enforces the
    /// keyword boundary rule: a keyword followed by an identifier
    /// continuation character is a plain identifier.
    pub(crate) fn lex_identifier(&mut self) -> Token {
        let start = self.cursor.offset();

        while is_ident_continue(self.cursor.current_char()) {
            self.cursor.advance();
        }

        let text = self.cursor.slice_from(start);
        keyword_from_ident(text).unwrap_or_else(|| Token::Ident(Symbol::intern(text)))
    }
}
