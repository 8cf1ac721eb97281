//! Operator and punctuation lexing.
//!
//! Each operator family is matched greedily, longest form first. The
//! cascaded `match_char` checks implement longest-match: every branch
//! keeps extending the operator while the next character still belongs to
//! a longer form of the same family.

use crate::token::Token;
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Lexes the `+` family.
    ///
    /// Handles: `++`, `+=`, `+`
    pub(crate) fn lex_plus(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('+') {
            Token::PlusPlus
        } else if self.cursor.match_char('=') {
            Token::PlusEq
        } else {
            Token::Plus
        }
    }

    /// Lexes the `-` family.
    ///
    /// Handles: `--`, `-=`, `-`
    pub(crate) fn lex_minus(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('-') {
            Token::MinusMinus
        } else if self.cursor.match_char('=') {
            Token::MinusEq
        } else {
            Token::Minus
        }
    }

    /// Lexes the `*` family.
    ///
    /// Handles: `**=`, `**`, `*=`, `*`
    pub(crate) fn lex_star(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('*') {
            if self.cursor.match_char('=') {
                Token::StarStarEq
            } else {
                Token::StarStar
            }
        } else if self.cursor.match_char('=') {
            Token::StarEq
        } else {
            Token::Star
        }
    }

    /// Lexes the `/` family.
    ///
    /// Handles: `/=`, `/`
    pub(crate) fn lex_slash(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            Token::SlashEq
        } else {
            Token::Slash
        }
    }

    /// Lexes the `%` family.
    ///
    /// Handles: `%=`, `%`
    pub(crate) fn lex_percent(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            Token::PercentEq
        } else {
            Token::Percent
        }
    }

    /// Lexes the `=` family.
    ///
    /// Handles: `===`, `==`, `=>`, `=`
    pub(crate) fn lex_equals(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            if self.cursor.match_char('=') {
                Token::EqEqEq
            } else {
                Token::EqEq
            }
        } else if self.cursor.match_char('>') {
            Token::FatArrow
        } else {
            Token::Eq
        }
    }

    /// Lexes the `!` family.
    ///
    /// Handles: `!==`, `!=`, `!`
    pub(crate) fn lex_bang(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            if self.cursor.match_char('=') {
                Token::NotEqEq
            } else {
                Token::NotEq
            }
        } else {
            Token::Bang
        }
    }

    /// Lexes the `<` family.
    ///
    /// Handles: `<<=`, `<<`, `<=`, `<`
    pub(crate) fn lex_less(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('<') {
            if self.cursor.match_char('=') {
                Token::ShlEq
            } else {
                Token::Shl
            }
        } else if self.cursor.match_char('=') {
            Token::LtEq
        } else {
            Token::Lt
        }
    }

    /// Lexes the `>` family, the deepest one.
    ///
    /// Handles: `>>>=`, `>>>`, `>>=`, `>>`, `>=`, `>`
    pub(crate) fn lex_greater(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('>') {
            if self.cursor.match_char('>') {
                if self.cursor.match_char('=') {
                    Token::UshrEq
                } else {
                    Token::Ushr
                }
            } else if self.cursor.match_char('=') {
                Token::ShrEq
            } else {
                Token::Shr
            }
        } else if self.cursor.match_char('=') {
            Token::GtEq
        } else {
            Token::Gt
        }
    }

    /// Lexes the `&` family.
    ///
    /// Handles: `&&=`, `&&`, `&=`, `&`
    pub(crate) fn lex_ampersand(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('&') {
            if self.cursor.match_char('=') {
                Token::AndAndEq
            } else {
                Token::AndAnd
            }
        } else if self.cursor.match_char('=') {
            Token::AmpEq
        } else {
            Token::Amp
        }
    }

    /// Lexes the `|` family.
    ///
    /// Handles: `||=`, `||`, `|=`, `|`
    pub(crate) fn lex_pipe(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('|') {
            if self.cursor.match_char('=') {
                Token::OrOrEq
            } else {
                Token::OrOr
            }
        } else if self.cursor.match_char('=') {
            Token::PipeEq
        } else {
            Token::Pipe
        }
    }

    /// Lexes the `^` family.
    ///
    /// Handles: `^=`, `^`
    pub(crate) fn lex_caret(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            Token::CaretEq
        } else {
            Token::Caret
        }
    }

    /// Lexes the `?` family.
    ///
    /// Handles: `??=`, `??`, `?`
    pub(crate) fn lex_question(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('?') {
            if self.cursor.match_char('=') {
                Token::CoalesceEq
            } else {
                Token::Coalesce
            }
        } else {
            Token::Question
        }
    }

    /// Lexes the `.` family.
    ///
    /// Handles: `...`, `.`. Two adjacent dots are two `.` tokens, since
    /// the language has no `..` form.
    pub(crate) fn lex_dot(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.current_char() == '.' && self.cursor.peek_char(1) == '.' {
            self.cursor.advance();
            self.cursor.advance();
            Token::Ellipsis
        } else {
            Token::Dot
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex_op(source: &str) -> Token {
        let mut lexer = Lexer::new(source);
        lexer.next_token().unwrap()
    }

    fn lex_two(source: &str) -> (Token, Token) {
        let mut lexer = Lexer::new(source);
        (lexer.next_token().unwrap(), lexer.next_token().unwrap())
    }

    // =========================================================================
    // GREEDY LONGEST-MATCH WITHIN FAMILIES
    // =========================================================================

    #[test]
    fn test_greater_family_longest_match() {
        assert_eq!(lex_op(">>>="), Token::UshrEq);
        assert_eq!(lex_op(">>>"), Token::Ushr);
        assert_eq!(lex_op(">>="), Token::ShrEq);
        assert_eq!(lex_op(">>"), Token::Shr);
        assert_eq!(lex_op(">="), Token::GtEq);
        assert_eq!(lex_op(">"), Token::Gt);
    }

    #[test]
    fn test_less_family() {
        assert_eq!(lex_op("<<="), Token::ShlEq);
        assert_eq!(lex_op("<<"), Token::Shl);
        assert_eq!(lex_op("<="), Token::LtEq);
        assert_eq!(lex_op("<"), Token::Lt);
    }

    #[test]
    fn test_equals_family() {
        assert_eq!(lex_op("==="), Token::EqEqEq);
        assert_eq!(lex_op("=="), Token::EqEq);
        assert_eq!(lex_op("=>"), Token::FatArrow);
        assert_eq!(lex_op("="), Token::Eq);
    }

    #[test]
    fn test_bang_family() {
        assert_eq!(lex_op("!=="), Token::NotEqEq);
        assert_eq!(lex_op("!="), Token::NotEq);
        assert_eq!(lex_op("!"), Token::Bang);
    }

    #[test]
    fn test_plus_minus_families() {
        assert_eq!(lex_op("++"), Token::PlusPlus);
        assert_eq!(lex_op("+="), Token::PlusEq);
        assert_eq!(lex_op("+"), Token::Plus);
        assert_eq!(lex_op("--"), Token::MinusMinus);
        assert_eq!(lex_op("-="), Token::MinusEq);
        assert_eq!(lex_op("-"), Token::Minus);
    }

    #[test]
    fn test_star_family() {
        assert_eq!(lex_op("**="), Token::StarStarEq);
        assert_eq!(lex_op("**"), Token::StarStar);
        assert_eq!(lex_op("*="), Token::StarEq);
        assert_eq!(lex_op("*"), Token::Star);
    }

    #[test]
    fn test_slash_percent_caret() {
        assert_eq!(lex_op("/="), Token::SlashEq);
        assert_eq!(lex_op("/"), Token::Slash);
        assert_eq!(lex_op("%="), Token::PercentEq);
        assert_eq!(lex_op("%"), Token::Percent);
        assert_eq!(lex_op("^="), Token::CaretEq);
        assert_eq!(lex_op("^"), Token::Caret);
    }

    #[test]
    fn test_ampersand_pipe_families() {
        assert_eq!(lex_op("&&="), Token::AndAndEq);
        assert_eq!(lex_op("&&"), Token::AndAnd);
        assert_eq!(lex_op("&="), Token::AmpEq);
        assert_eq!(lex_op("&"), Token::Amp);
        assert_eq!(lex_op("||="), Token::OrOrEq);
        assert_eq!(lex_op("||"), Token::OrOr);
        assert_eq!(lex_op("|="), Token::PipeEq);
        assert_eq!(lex_op("|"), Token::Pipe);
    }

    #[test]
    fn test_question_family() {
        assert_eq!(lex_op("??="), Token::CoalesceEq);
        assert_eq!(lex_op("??"), Token::Coalesce);
        assert_eq!(lex_op("?"), Token::Question);
    }

    #[test]
    fn test_dot_family() {
        assert_eq!(lex_op("..."), Token::Ellipsis);
        assert_eq!(lex_op("."), Token::Dot);
        assert_eq!(lex_two(".."), (Token::Dot, Token::Dot));
    }

    // =========================================================================
    // FAMILY BOUNDARIES
    // =========================================================================

    #[test]
    fn test_longest_match_stops_at_family_end() {
        // ">>> =" is `>>>` then `=`, not `>>>=`.
        assert_eq!(lex_two(">>> ="), (Token::Ushr, Token::Eq));
        // ">>>>": `>>>` then `>`.
        assert_eq!(lex_two(">>>>"), (Token::Ushr, Token::Gt));
    }

    #[test]
    fn test_adjacent_operators() {
        assert_eq!(lex_two("+-"), (Token::Plus, Token::Minus));
        assert_eq!(lex_two("==="), (Token::EqEqEq, Token::Eof));
    }
}
