//! String and template literal lexing.
//!
//! String values are the raw character sequence between the delimiters;
//! escape sequences are carried through undecoded. A backslash only
//! shields the following character from terminating the literal.

use crate::error::LexError;
use crate::token::Token;
use crate::Lexer;
use juno_util::Symbol;

impl<'a> Lexer<'a> {
    /// Lexes a single-line string literal delimited by `'` or `"`.
    ///
    /// A raw line feed inside the literal is a match failure, as is
    /// running to end-of-input without the closing quote.
    pub(crate) fn lex_string(&mut self, quote: char) -> Result<Token, LexError> {
        self.cursor.advance(); // opening quote
        let content_start = self.cursor.offset();

        loop {
            if self.cursor.is_at_end() {
                return Err(self.fail_at_token_start());
            }

            let c = self.cursor.current_char();

            if c == quote {
                let value = self.cursor.slice_from(content_start);
                self.cursor.advance(); // closing quote
                return Ok(Token::Str(Symbol::intern(value)));
            }

            if c == '\n' {
                return Err(self.fail_at_token_start());
            }

            if c == '\\' {
                self.cursor.advance();
                if self.cursor.is_at_end() {
                    return Err(self.fail_at_token_start());
                }
            }
            self.cursor.advance();
        }
    }

    /// Lexes a template literal delimited by backticks.
    ///
    /// Unlike plain strings, line feeds are permitted inside. The value is
    /// the raw contents; no interpolation is parsed.
    pub(crate) fn lex_template(&mut self) -> Result<Token, LexError> {
        self.cursor.advance(); // opening backtick
        let content_start = self.cursor.offset();

        loop {
            if self.cursor.is_at_end() {
                return Err(self.fail_at_token_start());
            }

            let c = self.cursor.current_char();

            if c == '`' {
                let value = self.cursor.slice_from(content_start);
                self.cursor.advance();
                return Ok(Token::TemplateStr(Symbol::intern(value)));
            }

            if c == '\\' {
                self.cursor.advance();
                if self.cursor.is_at_end() {
                    return Err(self.fail_at_token_start());
                }
            }
            self.cursor.advance();
        }
    }
}
