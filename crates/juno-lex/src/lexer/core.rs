//! Core lexer implementation.
//!
//! This module contains the main Lexer struct and its dispatch loop.

use juno_util::span::Position;

use crate::cursor::{Cursor, CursorSnapshot};
use crate::error::LexError;
use crate::lexer::identifier::is_ident_start;
use crate::token::Token;

/// Lexer for the Juno scripting language.
///
/// Transforms source text into a stream of tokens. Stateless beyond the
/// cursor and the snapshot of the current token's start; the driving loop
/// ([`crate::tokenize`]) attaches spans.
pub struct Lexer<'a> {
    /// Character cursor for source traversal.
    pub(crate) cursor: Cursor<'a>,

    /// Snapshot taken at the start of the current token.
    token_start: CursorSnapshot,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given source code.
    pub fn new(source: &'a str) -> Self {
        let cursor = Cursor::new(source);
        let token_start = cursor.snapshot();
        Self {
            cursor,
            token_start,
        }
    }

    /// Returns the next token from the input.
    ///
    /// Skips whitespace (space, tab, carriage return, line feed), records
    /// the token start, then dispatches on the first character. Returns
    /// [`Token::Eof`] at the end of input, and fails with [`LexError`]
    /// when no rule accepts the current character.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.cursor.skip_whitespace();

        self.token_start = self.cursor.snapshot();

        if self.cursor.is_at_end() {
            return Ok(Token::Eof);
        }

        match self.cursor.current_char() {
            '{' => {
                self.cursor.advance();
                Ok(Token::LBrace)
            }
            '}' => {
                self.cursor.advance();
                Ok(Token::RBrace)
            }
            '(' => {
                self.cursor.advance();
                Ok(Token::LParen)
            }
            ')' => {
                self.cursor.advance();
                Ok(Token::RParen)
            }
            '[' => {
                self.cursor.advance();
                Ok(Token::LBracket)
            }
            ']' => {
                self.cursor.advance();
                Ok(Token::RBracket)
            }
            ',' => {
                self.cursor.advance();
                Ok(Token::Comma)
            }
            ';' => {
                self.cursor.advance();
                Ok(Token::Semicolon)
            }
            ':' => {
                self.cursor.advance();
                Ok(Token::Colon)
            }
            '~' => {
                self.cursor.advance();
                Ok(Token::Tilde)
            }
            '+' => Ok(self.lex_plus()),
            '-' => Ok(self.lex_minus()),
            '*' => Ok(self.lex_star()),
            '/' => Ok(self.lex_slash()),
            '%' => Ok(self.lex_percent()),
            '=' => Ok(self.lex_equals()),
            '!' => Ok(self.lex_bang()),
            '<' => Ok(self.lex_less()),
            '>' => Ok(self.lex_greater()),
            '&' => Ok(self.lex_ampersand()),
            '|' => Ok(self.lex_pipe()),
            '^' => Ok(self.lex_caret()),
            '?' => Ok(self.lex_question()),
            '.' => Ok(self.lex_dot()),
            '\'' => self.lex_string('\''),
            '"' => self.lex_string('"'),
            '`' => self.lex_template(),
            c if is_ident_start(c) => Ok(self.lex_identifier()),
            c if c.is_ascii_digit() => self.lex_number(),
            _ => Err(self.fail_here()),
        }
    }

    /// Start position of the most recent token.
    pub fn token_start(&self) -> Position {
        self.token_start.pos()
    }

    /// Current cursor position (the exclusive end of the last token).
    pub fn position(&self) -> Position {
        self.cursor.pos()
    }

    /// Build a [`LexError`] at the current cursor position.
    pub(crate) fn fail_here(&self) -> LexError {
        LexError::new(self.cursor.pos(), self.cursor.remaining())
    }

    /// Build a [`LexError`] at the start of the current token.
    ///
    /// Used when a rule started matching but the input cannot complete it
    /// (e.g. an unterminated string literal): the failure is attributed to
    /// the position where the match began.
    pub(crate) fn fail_at_token_start(&self) -> LexError {
        let start = self.token_start.pos();
        LexError::new(start, &self.cursor.source()[start.offset..])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use juno_util::Symbol;

    fn lex_all(source: &str) -> Result<Vec<Token>, LexError> {
        let mut lexer = Lexer::new(source);
        let mut out = Vec::new();
        loop {
            let token = lexer.next_token()?;
            if token == Token::Eof {
                break;
            }
            out.push(token);
        }
        Ok(out)
    }

    #[test]
    fn test_simple_statement() {
        let tokens = lex_all("var x = 42;").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Var,
                Token::Ident(Symbol::intern("x")),
                Token::Eq,
                Token::Number(42),
                Token::Semicolon,
            ]
        );
    }

    #[test]
    fn test_punctuation() {
        let tokens = lex_all("{ } ( ) [ ] , ; : ~").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::LBrace,
                Token::RBrace,
                Token::LParen,
                Token::RParen,
                Token::LBracket,
                Token::RBracket,
                Token::Comma,
                Token::Semicolon,
                Token::Colon,
                Token::Tilde,
            ]
        );
    }

    #[test]
    fn test_unknown_character_fails() {
        let err = lex_all("a § b").unwrap_err();
        assert_eq!(err.position.offset, 2);
        assert!(err.prefix.starts_with('§'));
    }

    #[test]
    fn test_error_prefix_is_remaining_input() {
        let err = lex_all("ab£c").unwrap_err();
        assert_eq!(err.prefix, "£c");
    }

    #[test]
    fn test_whitespace_is_not_tokenized() {
        let tokens = lex_all(" \t a \r\n b ").unwrap();
        assert_eq!(tokens.len(), 2);
    }
}
