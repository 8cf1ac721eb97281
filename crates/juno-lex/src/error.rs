//! Lexer error type.

use juno_util::span::Position;
use thiserror::Error;

/// Error produced when no lexer rule accepts the remaining input.
///
/// Lexing halts at the first failure; there is no recovery. The error
/// carries the position of the failure and the unmatched prefix of the
/// remaining input (truncated for display) for diagnostics.
///
/// # Example
///
/// ```
/// use juno_lex::tokenize;
///
/// let err = tokenize("ab£c").unwrap_err();
/// assert!(err.prefix.starts_with('£'));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no token matched at {}:{} near {prefix:?}", .position.line, .position.column)]
pub struct LexError {
    /// Position at which no rule matched.
    pub position: Position,
    /// The unmatched prefix of the remaining input.
    pub prefix: String,
}

impl LexError {
    /// Longest prefix kept for diagnostics, in characters.
    const MAX_PREFIX_CHARS: usize = 24;

    /// Create a lex error at the given position, capturing a truncated
    /// prefix of the remaining input.
    pub fn new(position: Position, remaining: &str) -> Self {
        Self {
            position,
            prefix: remaining.chars().take(Self::MAX_PREFIX_CHARS).collect(),
        }
    }
}
