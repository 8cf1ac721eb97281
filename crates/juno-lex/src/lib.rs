//! juno-lex - Lexical Analyzer for the Juno scripting language.
//!
//! The lexer transforms a UTF-8 source string into an ordered sequence of
//! tokens with source locations, terminated by a single [`Token::Eof`].
//!
//! # Design
//!
//! Tokenization is direct-coded: [`Lexer::next_token`] skips whitespace,
//! snapshots the token start, and dispatches on the first character to a
//! specialized `lex_*` function. Multi-character operator families
//! (`+ - * / % < > = ! | ^ & ? .`) are matched greedily, longest form
//! first, so `>>>=` wins over `>>>`, `>>=`, `>>`, `>=` and `>`. Keywords
//! are resolved after maximal-munch identifier scanning, which is what
//! enforces the keyword boundary rule: `instanceofx` is one identifier,
//! never `instanceof` followed by `x`.
//!
//! Token kinds carry their infix precedence and associativity (see
//! [`Token::precedence`]); the parser's precedence climbing consumes them
//! directly.
//!
//! # Errors
//!
//! Lexing is run-to-completion or run-to-failure: when no rule accepts the
//! remaining input, [`tokenize`] fails with a [`LexError`] carrying the
//! failure position and the unmatched prefix. There is no recovery.
//!
//! # Example
//!
//! ```
//! use juno_lex::{tokenize, Token};
//!
//! let tokens = tokenize("var x = 42").unwrap();
//! assert!(matches!(tokens[0].token, Token::Var));
//! assert!(matches!(tokens.last().unwrap().token, Token::Eof));
//! ```

mod cursor;
mod edge_cases;
mod error;
mod lexer;
mod token;

pub use cursor::{Cursor, CursorSnapshot};
pub use error::LexError;
pub use lexer::Lexer;
pub use token::{keyword_from_ident, Token, TokenWithSpan};

use juno_util::span::Span;

/// Tokenize an entire source string.
///
/// Returns the token vector, always terminated by an [`Token::Eof`] token
/// whose empty span sits at the final cursor position. Fails with the
/// first [`LexError`] encountered.
///
/// # Example
///
/// ```
/// use juno_lex::tokenize;
///
/// let tokens = tokenize("1 + 2").unwrap();
/// assert_eq!(tokens.len(), 4); // 1, +, 2, eof
/// ```
pub fn tokenize(source: &str) -> Result<Vec<TokenWithSpan>, LexError> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();

    loop {
        let token = lexer.next_token()?;
        let span = Span::new(lexer.token_start(), lexer.position());
        let is_eof = matches!(token, Token::Eof);
        tokens.push(TokenWithSpan::new(token, span));
        if is_eof {
            break;
        }
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_ends_with_eof() {
        let tokens = tokenize("var x").unwrap();
        assert!(matches!(tokens.last().unwrap().token, Token::Eof));
    }

    #[test]
    fn test_tokenize_empty_source() {
        let tokens = tokenize("").unwrap();
        assert_eq!(tokens.len(), 1);
        assert!(matches!(tokens[0].token, Token::Eof));
        assert!(tokens[0].span.is_empty());
    }

    #[test]
    fn test_tokenize_whitespace_only() {
        let tokens = tokenize("  \t \r\n  ").unwrap();
        assert_eq!(tokens.len(), 1);
        assert!(matches!(tokens[0].token, Token::Eof));
    }

    #[test]
    fn test_span_end_is_exclusive() {
        let tokens = tokenize("var x = 42").unwrap();
        for window in tokens.windows(2) {
            assert!(window[0].span.start.offset <= window[0].span.end.offset);
            assert!(window[0].span.end.offset <= window[1].span.start.offset);
        }
        // "var" covers bytes 0..3
        assert_eq!(tokens[0].span.start.offset, 0);
        assert_eq!(tokens[0].span.end.offset, 3);
    }

    #[test]
    fn test_eof_span_at_end() {
        let tokens = tokenize("ab").unwrap();
        let eof = tokens.last().unwrap();
        assert!(eof.span.is_empty());
        assert_eq!(eof.span.start.offset, 2);
    }

    #[test]
    fn test_line_and_column_tracking() {
        let tokens = tokenize("a\n  b").unwrap();
        assert_eq!(tokens[0].span.start.line, 0);
        assert_eq!(tokens[0].span.start.column, 0);
        assert_eq!(tokens[1].span.start.line, 1);
        assert_eq!(tokens[1].span.start.column, 2);
    }

    #[test]
    fn test_unmatched_input_fails() {
        let err = tokenize("ab£c").unwrap_err();
        assert!(err.prefix.starts_with("£c"));
        assert_eq!(err.position.offset, 2);
    }
}
