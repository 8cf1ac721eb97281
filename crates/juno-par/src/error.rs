//! Parser error types.
//!
//! All parse failures are fatal at the point of first detection: parsing
//! halts and no partial tree is returned. [`SyntaxError`] carries the
//! exact user-facing message; [`ParseError`] is the union the entry
//! points return (a lexer failure or a parser failure).

use juno_lex::LexError;
use thiserror::Error;

/// A syntax error raised by the parser.
///
/// Messages name the unexpected token's textual value and, where
/// applicable, the expected kind(s).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    /// An unexpected token with no particular expectation.
    #[error("Unexpected token {0}")]
    UnexpectedToken(String),

    /// An unexpected token where a specific kind was required.
    #[error("Unexpected token {found}, expected {expected}")]
    Expected {
        /// The offending token's textual value.
        found: String,
        /// The expected kind name(s).
        expected: String,
    },

    /// A peek past the end of the token stream.
    #[error("Unexpected EOF")]
    UnexpectedEof,

    /// A function statement without a name.
    #[error("Function statements require a function name")]
    MissingFunctionName,

    /// A `try` with neither handler nor finalizer.
    #[error("Missing catch or finally after try")]
    MissingCatchOrFinally,

    /// A rest element in non-final position in a destructuring pattern.
    #[error("A rest element must be last in a destructuring pattern")]
    RestNotLastInPattern,

    /// A rest element in non-final position in a parameter list.
    #[error("A rest element must be last in a parameter list")]
    RestNotLastInParams,

    /// A rest element directly followed by a comma.
    #[error("A rest element cannot have a trailing comma")]
    RestTrailingComma,

    /// A nested assignment inside a pattern using an operator other
    /// than `=`.
    #[error("Invalid assignment pattern operator {0}, expected =")]
    InvalidAssignmentPatternOperator(String),

    /// An expression kind that cannot be reinterpreted as a pattern.
    #[error("Invalid pattern {0}")]
    InvalidPattern(String),

    /// A token used where a keyword-as-identifier was required.
    #[error("Token {0} is not a keyword")]
    NotAKeyword(String),
}

/// Error returned by the [`crate::parse`] and [`crate::parse_expression`]
/// entry points.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// The lexer rejected the input.
    #[error(transparent)]
    Lex(#[from] LexError),

    /// The parser rejected the token stream.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_catalogue() {
        assert_eq!(
            SyntaxError::UnexpectedToken("abc".into()).to_string(),
            "Unexpected token abc"
        );
        assert_eq!(
            SyntaxError::Expected {
                found: ")".into(),
                expected: "{".into(),
            }
            .to_string(),
            "Unexpected token ), expected {"
        );
        assert_eq!(SyntaxError::UnexpectedEof.to_string(), "Unexpected EOF");
        assert_eq!(
            SyntaxError::MissingFunctionName.to_string(),
            "Function statements require a function name"
        );
        assert_eq!(
            SyntaxError::MissingCatchOrFinally.to_string(),
            "Missing catch or finally after try"
        );
        assert_eq!(
            SyntaxError::RestNotLastInPattern.to_string(),
            "A rest element must be last in a destructuring pattern"
        );
        assert_eq!(
            SyntaxError::RestNotLastInParams.to_string(),
            "A rest element must be last in a parameter list"
        );
        assert_eq!(
            SyntaxError::RestTrailingComma.to_string(),
            "A rest element cannot have a trailing comma"
        );
        assert_eq!(
            SyntaxError::InvalidAssignmentPatternOperator("+=".into()).to_string(),
            "Invalid assignment pattern operator +=, expected ="
        );
        assert_eq!(
            SyntaxError::InvalidPattern("CallExpression".into()).to_string(),
            "Invalid pattern CallExpression"
        );
        assert_eq!(
            SyntaxError::NotAKeyword("5".into()).to_string(),
            "Token 5 is not a keyword"
        );
    }

    #[test]
    fn test_parse_error_wraps_both_kinds() {
        let syntax: ParseError = SyntaxError::UnexpectedEof.into();
        assert_eq!(syntax.to_string(), "Unexpected EOF");

        let lex: ParseError = juno_lex::tokenize("£").unwrap_err().into();
        assert!(lex.to_string().contains('£'));
    }
}
