//! juno-par - Parser for the Juno scripting language.
//!
//! A predictive recursive-descent parser over the token vector produced by
//! `juno-lex`, with operator-precedence climbing for binary and logical
//! chains and a post-hoc expression-to-pattern rewriter for the places
//! where the grammar is ambiguous between expressions and destructuring
//! patterns (function parameters, variable declarators, assignment
//! left-hand sides, arrow parameter lists).
//!
//! # Entry points
//!
//! - [`parse`] - parse a whole program.
//! - [`parse_expression`] - parse a single expression.
//!
//! Both run to completion or fail with the first error; no partial tree
//! is returned on failure.
//!
//! # Example
//!
//! ```
//! use juno_par::{parse, ParseOptions, Stmt};
//!
//! let program = parse("var x = 1;", ParseOptions::default()).unwrap();
//! assert_eq!(program.body.len(), 1);
//! assert!(matches!(program.body[0], Stmt::VarDecl(_)));
//! ```
//!
//! # Diagnostics
//!
//! The parser keeps a [`Handler`] as a side channel. Errors with a source
//! location are mirrored there as a two-line source pointer (the line
//! text, then a `^` caret row); unbalanced node-start entries at the end
//! of a parse become warnings, never errors. With
//! [`ParseOptions::emit_logs`] set, progress and diagnostics also go to
//! the `log` facade.

pub mod ast;

mod edge_cases;
mod error;
mod expr;
mod object;
mod pattern;
mod stmt;

pub use ast::*;
pub use error::{ParseError, SyntaxError};

use juno_lex::{Token, TokenWithSpan};
use juno_util::diagnostic::{Handler, SourceSnippet};
use juno_util::span::{Position, SourceText, Span};

/// Parser configuration.
#[derive(Clone, Copy, Debug, Default)]
pub struct ParseOptions {
    /// Write human-readable progress and diagnostic lines to the `log`
    /// facade. Default: false.
    pub emit_logs: bool,
    /// Skip location tracking entirely: no spans on nodes, no node-start
    /// stack. Default: false.
    pub omit_locations: bool,
}

/// Parse a complete program.
///
/// # Example
///
/// ```
/// use juno_par::{parse, ParseOptions};
///
/// let program = parse("", ParseOptions::default()).unwrap();
/// assert!(program.body.is_empty());
/// ```
pub fn parse(source: &str, options: ParseOptions) -> Result<Program, ParseError> {
    let tokens = juno_lex::tokenize(source)?;
    let handler = Handler::new();
    let mut parser = Parser::new(source, tokens, &handler, options);
    Ok(parser.parse_program()?)
}

/// Parse a single expression. The whole input must be consumed.
///
/// # Example
///
/// ```
/// use juno_par::{parse_expression, Expr, ParseOptions};
///
/// let expr = parse_expression("1 + 2 * 3", ParseOptions::default()).unwrap();
/// assert!(matches!(expr, Expr::Binary(_)));
/// ```
pub fn parse_expression(source: &str, options: ParseOptions) -> Result<Expr, ParseError> {
    let tokens = juno_lex::tokenize(source)?;
    let handler = Handler::new();
    let mut parser = Parser::new(source, tokens, &handler, options);
    Ok(parser.parse_expression()?)
}

/// Recursive descent parser.
///
/// State: the immutable token vector, a cursor index, the node-start
/// stack used to attach spans, the diagnostic handler and the options.
pub struct Parser<'a> {
    /// Token stream, terminated by `eof`.
    tokens: Vec<TokenWithSpan>,
    /// Current position in the token stream.
    pos: usize,
    /// The source buffer, for line-break detection and caret snippets.
    source: SourceText,
    /// Start positions of nodes under construction.
    node_starts: Vec<Position>,
    /// Diagnostic side channel.
    handler: &'a Handler,
    /// Configuration.
    options: ParseOptions,
}

impl<'a> Parser<'a> {
    /// Create a parser over a pre-lexed token vector.
    pub fn new(
        source: &str,
        tokens: Vec<TokenWithSpan>,
        handler: &'a Handler,
        options: ParseOptions,
    ) -> Self {
        Self {
            tokens,
            pos: 0,
            source: SourceText::new(source),
            node_starts: Vec::new(),
            handler,
            options,
        }
    }

    /// Parse a complete program: statements until `eof`.
    pub fn parse_program(&mut self) -> Result<Program, SyntaxError> {
        if self.options.emit_logs {
            log::debug!("parsing program ({} tokens)", self.tokens.len());
        }

        self.start_node();
        let mut body = Vec::new();
        while !self.check(&Token::Eof) {
            body.push(self.parse_statement()?);
        }
        self.expect(Token::Eof)?;
        let meta = self.finish_node();

        self.warn_unbalanced_starts();

        if self.options.emit_logs {
            log::debug!("parsed program with {} top-level statements", body.len());
        }

        Ok(Program { body, meta })
    }

    /// Parse a single expression spanning the whole input.
    pub fn parse_expression(&mut self) -> Result<Expr, SyntaxError> {
        let expr = self.parse_expr(expr::ExprFlags::all())?;
        self.expect(Token::Eof)?;
        self.warn_unbalanced_starts();
        Ok(expr)
    }

    /// The diagnostic handler this parser reports into.
    pub fn handler(&self) -> &Handler {
        self.handler
    }

    // =========================================================================
    // TOKEN-LEVEL PRIMITIVES
    // =========================================================================

    /// Look at the token at `cursor + offset`. Out-of-range peeks fail
    /// with `Unexpected EOF`.
    pub(crate) fn peek(&self, offset: usize) -> Result<&TokenWithSpan, SyntaxError> {
        self.tokens
            .get(self.pos + offset)
            .ok_or(SyntaxError::UnexpectedEof)
    }

    /// The current token.
    pub(crate) fn current(&self) -> Result<&TokenWithSpan, SyntaxError> {
        self.peek(0)
    }

    /// Return the current token and move the cursor forward.
    pub(crate) fn advance(&mut self) -> TokenWithSpan {
        let index = self.pos.min(self.tokens.len() - 1);
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        self.tokens[index]
    }

    /// Kind-level predicate on the current token.
    pub(crate) fn check(&self, expected: &Token) -> bool {
        self.check_at(expected, 0)
    }

    /// Kind-level predicate on the token at `cursor + offset`.
    pub(crate) fn check_at(&self, expected: &Token, offset: usize) -> bool {
        match self.peek(offset) {
            Ok(tws) => same_kind(&tws.token, expected),
            Err(_) => false,
        }
    }

    /// Consume the current token if it has the expected kind.
    pub(crate) fn match_token(&mut self, expected: &Token) -> bool {
        if self.check(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume the next token, failing if its kind differs.
    pub(crate) fn expect(&mut self, expected: Token) -> Result<TokenWithSpan, SyntaxError> {
        if self.check(&expected) {
            Ok(self.advance())
        } else {
            Err(self.expected_error(expected.name()))
        }
    }

    /// The most recently consumed token.
    pub(crate) fn prev(&self) -> &TokenWithSpan {
        &self.tokens[self.pos.saturating_sub(1)]
    }

    // =========================================================================
    // AUTOMATIC-BREAK DISCIPLINE
    // =========================================================================

    /// True when the gap between the previous token's end and the current
    /// token's start contains a line terminator.
    pub(crate) fn line_break_before(&self) -> bool {
        if self.pos == 0 {
            return false;
        }
        let prev_end = self.prev().span.end.offset;
        let cur_start = match self.current() {
            Ok(tws) => tws.span.start.offset,
            Err(_) => return false,
        };
        self.source.content()[prev_end..cur_start]
            .bytes()
            .any(|b| b == b'\n' || b == b'\r')
    }

    /// True when the current position terminates a statement without
    /// consuming anything: `}`, end of input, or an intervening line
    /// break.
    pub(crate) fn at_break(&self) -> bool {
        self.check(&Token::Semicolon)
            || self.check(&Token::RBrace)
            || self.check(&Token::Eof)
            || self.line_break_before()
    }

    /// Statement terminator: consume `;` if present, otherwise accept
    /// `}`, end of input, or a line break between tokens. Anything else
    /// is a syntax error naming the offending token.
    pub(crate) fn expect_break(&mut self) -> Result<(), SyntaxError> {
        if self.match_token(&Token::Semicolon) {
            return Ok(());
        }
        if self.check(&Token::RBrace) || self.check(&Token::Eof) || self.line_break_before() {
            return Ok(());
        }
        Err(self.unexpected_current())
    }

    // =========================================================================
    // LOCATION TRACKING
    // =========================================================================

    /// Push the current token's start position as the start of the node
    /// under construction. A no-op with `omit_locations`.
    pub(crate) fn start_node(&mut self) {
        if self.options.omit_locations {
            return;
        }
        let index = self.pos.min(self.tokens.len() - 1);
        self.node_starts.push(self.tokens[index].span.start);
    }

    /// Push an existing node's start position, used when a finished node
    /// becomes the first child of a wider one (binary operands, postfix
    /// targets, sequence heads).
    pub(crate) fn start_node_at(&mut self, meta: &NodeMeta) {
        if self.options.omit_locations {
            return;
        }
        match meta.span {
            Some(span) => self.node_starts.push(span.start),
            None => self.start_node(),
        }
    }

    /// Pop the innermost start and produce the node's metadata, ending at
    /// the previous token's span end.
    pub(crate) fn finish_node(&mut self) -> NodeMeta {
        if self.options.omit_locations {
            return NodeMeta::default();
        }
        let start = match self.node_starts.pop() {
            Some(start) => start,
            None => self.prev().span.start,
        };
        let end = if self.pos == 0 {
            start
        } else {
            self.prev().span.end
        };
        NodeMeta {
            span: Some(Span::new(start, end)),
            trailing_comma: false,
        }
    }

    /// Turn any node starts left on the stack into warnings. Leftovers
    /// indicate an internal imbalance, not invalid input.
    fn warn_unbalanced_starts(&mut self) {
        if self.options.omit_locations {
            return;
        }
        for start in self.node_starts.drain(..) {
            self.handler
                .build_warning(
                    Span::empty_at(start),
                    format!("unbalanced node start at {}:{}", start.line, start.column),
                )
                .emit(self.handler);
        }
    }

    // =========================================================================
    // ERROR CONSTRUCTION
    // =========================================================================

    /// Build an `Unexpected token X` error at the current token and
    /// mirror it to the diagnostic side channel.
    pub(crate) fn unexpected_current(&self) -> SyntaxError {
        match self.current() {
            Ok(tws) => {
                let err = SyntaxError::UnexpectedToken(tws.token.to_string());
                self.report(&err, Some(tws.span));
                err
            }
            Err(err) => err,
        }
    }

    /// Build an `Unexpected token X, expected Y` error at the current
    /// token.
    pub(crate) fn expected_error(&self, expected: &str) -> SyntaxError {
        match self.current() {
            Ok(tws) => {
                let err = SyntaxError::Expected {
                    found: tws.token.to_string(),
                    expected: expected.to_string(),
                };
                self.report(&err, Some(tws.span));
                err
            }
            Err(err) => err,
        }
    }

    /// Attach a source-pointer diagnostic for an error that carries a
    /// location, and raise it. Used for structural errors discovered away
    /// from the current token (rest-element placement, pattern rewrites).
    pub(crate) fn reject(&self, err: SyntaxError, span: Option<Span>) -> SyntaxError {
        self.report(&err, span);
        err
    }

    /// Write the two-line source pointer (line text, caret row) to the
    /// handler; with `emit_logs`, echo it to the log.
    fn report(&self, err: &SyntaxError, span: Option<Span>) {
        let Some(span) = span else {
            return;
        };

        let line_text = self
            .source
            .line_at(span.start.line as usize)
            .unwrap_or("")
            .to_string();
        let snippet = SourceSnippet::at(line_text, span.start, span.len().max(1));

        if self.options.emit_logs {
            log::error!("{}\n{}", err, snippet.format());
        }

        self.handler
            .build_error(span, err.to_string())
            .snippet(snippet)
            .emit(self.handler);
    }
}

/// Kind-level token equality: payloads are ignored.
fn same_kind(a: &Token, b: &Token) -> bool {
    std::mem::discriminant(a) == std::mem::discriminant(b)
}
