//! Number literal lexing.
//!
//! Juno numbers are runs of decimal digits producing non-negative base-10
//! integers. Floating-point, hex, octal and scientific forms are not part
//! of the language.

use crate::error::LexError;
use crate::token::Token;
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Lexes a number literal: `[0-9]+`.
    ///
    /// Fails if the digit run does not fit in a `u64`.
    pub(crate) fn lex_number(&mut self) -> Result<Token, LexError> {
        let start = self.cursor.offset();

        while self.cursor.current_char().is_ascii_digit() {
            self.cursor.advance();
        }

        let text = self.cursor.slice_from(start);
        text.parse::<u64>()
            .map(Token::Number)
            .map_err(|_| self.fail_at_token_start())
    }
}
