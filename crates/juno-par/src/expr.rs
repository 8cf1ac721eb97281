//! Expression parsing.
//!
//! Three layers, mirroring the grammar's shape:
//!
//! 1. **Primary** ([`Parser::parse_expr_inner`]) - literals, identifiers,
//!    prefix operators, parenthesised expressions, literals-with-bodies
//!    (functions, arrays, objects, do-expressions).
//! 2. **Suffix** ([`Parser::parse_expr_post`]) - assignment, postfix
//!    `++`/`--`, member access, calls, conditionals, arrows, and the
//!    entry into precedence climbing for binary/logical chains.
//! 3. **Precedence climbing** ([`Parser::climb`]) - standard climbing
//!    over the token precedence table; right-hand sides recurse at
//!    strictly higher minimum precedence, or equal precedence for
//!    right-associative operators (`**`, assignments).
//!
//! Four flags restrict what a given context may contain: `grouped`
//! (operator chains and their suffixes), `sequence` (comma expressions),
//! `assignment`, and `call` (forbidden for `new` callees). All default to
//! allowed.

use crate::ast::*;
use crate::error::SyntaxError;
use crate::Parser;
use juno_lex::Token;

/// Context restrictions threaded through expression parsing.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ExprFlags {
    /// Allow binary/logical chains, conditionals and arrows.
    pub grouped: bool,
    /// Allow comma sequences.
    pub sequence: bool,
    /// Allow assignment operators.
    pub assignment: bool,
    /// Allow call suffixes.
    pub call: bool,
}

impl ExprFlags {
    /// Everything allowed (the default context).
    pub fn all() -> Self {
        Self {
            grouped: true,
            sequence: true,
            assignment: true,
            call: true,
        }
    }

    /// Forbid comma sequences.
    pub fn no_sequence(self) -> Self {
        Self {
            sequence: false,
            ..self
        }
    }

    /// Forbid assignment operators.
    pub fn no_assignment(self) -> Self {
        Self {
            assignment: false,
            ..self
        }
    }

    /// The context for unary operands and climbing right-hand sides: a
    /// plain expression with suffixes but no further operator chains.
    fn operand() -> Self {
        Self {
            grouped: false,
            sequence: false,
            assignment: false,
            call: true,
        }
    }
}

/// Binding strength of a climbing operator, `None` for anything that the
/// climbing layer does not consume (assignments, `,`, `?` and friends).
fn climbing_prec(token: &Token) -> Option<u8> {
    if BinOp::from_token(token).is_some() || LogicalOp::from_token(token).is_some() {
        Some(token.precedence())
    } else {
        None
    }
}

impl<'a> Parser<'a> {
    /// Parse an expression, with a comma-sequence tail when the context
    /// permits one. Inner sequence elements forbid further sequencing.
    pub(crate) fn parse_expr(&mut self, flags: ExprFlags) -> Result<Expr, SyntaxError> {
        let first = self.parse_expr_post(flags)?;

        if flags.sequence && self.check(&Token::Comma) {
            self.start_node_at(first.meta());
            let mut expressions = vec![first];
            while self.match_token(&Token::Comma) {
                expressions.push(self.parse_expr_post(flags.no_sequence())?);
            }
            return Ok(Expr::Sequence(SequenceExpr {
                expressions,
                meta: self.finish_node(),
            }));
        }

        Ok(first)
    }

    /// Parse a primary expression and its suffixes.
    pub(crate) fn parse_expr_post(&mut self, flags: ExprFlags) -> Result<Expr, SyntaxError> {
        let mut expr = self.parse_expr_inner(flags)?;

        loop {
            let token = self.current()?.token;

            if flags.assignment && token.is_assignment_op() {
                let Some(op) = AssignOp::from_token(&token) else {
                    return Err(self.unexpected_current());
                };
                self.start_node_at(expr.meta());
                self.advance();
                let left = self.assignment_target(expr)?;
                // right-associative: the right side parses the full
                // assignment tail
                let right = self.parse_expr_post(flags)?;
                expr = Expr::Assignment(AssignmentExpr {
                    op,
                    left,
                    right: Box::new(right),
                    meta: self.finish_node(),
                });
                continue;
            }

            if let Some(op) = UpdateOp::from_token(&token) {
                self.start_node_at(expr.meta());
                self.advance();
                expr = Expr::Update(UpdateExpr {
                    op,
                    argument: Box::new(expr),
                    prefix: false,
                    meta: self.finish_node(),
                });
                // fall through: operator chains may still follow
                continue;
            }

            match token {
                Token::LBracket => {
                    self.start_node_at(expr.meta());
                    self.advance();
                    let property = self.parse_expr(ExprFlags::all())?;
                    self.expect(Token::RBracket)?;
                    expr = Expr::Member(MemberExpr {
                        object: Box::new(expr),
                        property: Box::new(property),
                        computed: true,
                        meta: self.finish_node(),
                    });
                }
                Token::Dot => {
                    self.start_node_at(expr.meta());
                    self.advance();
                    let property = self.parse_expr_inner(ExprFlags::operand())?;
                    expr = Expr::Member(MemberExpr {
                        object: Box::new(expr),
                        property: Box::new(property),
                        computed: false,
                        meta: self.finish_node(),
                    });
                }
                Token::LParen if flags.call => {
                    self.start_node_at(expr.meta());
                    let arguments = self.parse_arguments()?;
                    expr = Expr::Call(CallExpr {
                        callee: Box::new(expr),
                        arguments,
                        meta: self.finish_node(),
                    });
                }
                Token::Question if flags.grouped => {
                    self.start_node_at(expr.meta());
                    self.advance();
                    let consequent = self.parse_expr_post(flags.no_sequence())?;
                    self.expect(Token::Colon)?;
                    let alternate = self.parse_expr_post(flags.no_sequence())?;
                    expr = Expr::Conditional(ConditionalExpr {
                        test: Box::new(expr),
                        consequent: Box::new(consequent),
                        alternate: Box::new(alternate),
                        meta: self.finish_node(),
                    });
                }
                Token::FatArrow if flags.grouped => {
                    self.start_node_at(expr.meta());
                    expr = self.arrow_tail(expr, false)?;
                }
                _ if flags.grouped && climbing_prec(&token).is_some() => {
                    expr = self.climb(expr, 0)?;
                }
                _ => break,
            }
        }

        Ok(expr)
    }

    /// Precedence climbing over binary and logical operators.
    ///
    /// Consumes operators whose precedence is at least `min_prec`. After
    /// each operand, stronger operators (or equal-strength
    /// right-associative ones) climb recursively into the right-hand
    /// side.
    fn climb(&mut self, mut left: Expr, min_prec: u8) -> Result<Expr, SyntaxError> {
        loop {
            let token = self.current()?.token;
            let Some(prec) = climbing_prec(&token) else {
                break;
            };
            if prec < min_prec {
                break;
            }

            self.start_node_at(left.meta());
            let op_token = self.advance().token;

            let mut right = self.parse_expr_post(ExprFlags::operand())?;
            loop {
                let next = match self.current() {
                    Ok(tws) => tws.token,
                    Err(_) => break,
                };
                match climbing_prec(&next) {
                    Some(next_prec)
                        if next_prec > prec
                            || (next_prec == prec && next.is_right_associative()) =>
                    {
                        let min = if next_prec > prec { prec + 1 } else { prec };
                        right = self.climb(right, min)?;
                    }
                    _ => break,
                }
            }

            left = if let Some(op) = LogicalOp::from_token(&op_token) {
                Expr::Logical(LogicalExpr {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                    meta: self.finish_node(),
                })
            } else if let Some(op) = BinOp::from_token(&op_token) {
                Expr::Binary(BinaryExpr {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                    meta: self.finish_node(),
                })
            } else {
                // climbing_prec admitted it, so one of the maps covers it
                return Err(SyntaxError::UnexpectedToken(op_token.to_string()));
            };
        }
        Ok(left)
    }

    /// Parse a primary expression: prefix operators and atoms.
    pub(crate) fn parse_expr_inner(&mut self, flags: ExprFlags) -> Result<Expr, SyntaxError> {
        let token = self.current()?.token;

        if let Some(op) = UnaryOp::from_token(&token) {
            self.start_node();
            self.advance();
            let argument = self.parse_expr_post(ExprFlags::operand())?;
            return Ok(Expr::Unary(UnaryExpr {
                op,
                argument: Box::new(argument),
                meta: self.finish_node(),
            }));
        }

        if let Some(op) = UpdateOp::from_token(&token) {
            self.start_node();
            self.advance();
            let argument = self.parse_expr_post(ExprFlags::operand())?;
            return Ok(Expr::Update(UpdateExpr {
                op,
                argument: Box::new(argument),
                prefix: true,
                meta: self.finish_node(),
            }));
        }

        match token {
            Token::Ident(_) => Ok(Expr::Ident(self.parse_ident()?)),
            Token::Number(value) => {
                self.start_node();
                self.advance();
                Ok(Expr::Number(NumberLit {
                    value,
                    meta: self.finish_node(),
                }))
            }
            Token::Str(value) => {
                self.start_node();
                self.advance();
                Ok(Expr::Str(StrLit {
                    value,
                    meta: self.finish_node(),
                }))
            }
            Token::TemplateStr(value) => {
                self.start_node();
                self.advance();
                Ok(Expr::Template(TemplateLit {
                    value,
                    meta: self.finish_node(),
                }))
            }
            Token::True | Token::False => {
                self.start_node();
                let value = matches!(self.advance().token, Token::True);
                Ok(Expr::Bool(BoolLit {
                    value,
                    meta: self.finish_node(),
                }))
            }
            Token::Null => {
                self.start_node();
                self.advance();
                Ok(Expr::Null(NullLit {
                    meta: self.finish_node(),
                }))
            }
            Token::This => {
                self.start_node();
                self.advance();
                Ok(Expr::This(ThisExpr {
                    meta: self.finish_node(),
                }))
            }
            Token::Super => {
                self.start_node();
                self.advance();
                Ok(Expr::Super(SuperExpr {
                    meta: self.finish_node(),
                }))
            }
            Token::New => {
                self.start_node();
                self.advance();
                // the callee cannot itself be a call
                let callee = self.parse_expr_post(ExprFlags {
                    call: false,
                    ..ExprFlags::operand()
                })?;
                let arguments = if self.check(&Token::LParen) {
                    self.parse_arguments()?
                } else {
                    Vec::new()
                };
                Ok(Expr::New(NewExpr {
                    callee: Box::new(callee),
                    arguments,
                    meta: self.finish_node(),
                }))
            }
            Token::LParen => {
                self.start_node();
                self.parse_paren(false)
            }
            Token::Function => self.parse_function_expression(false),
            Token::LBracket => self.parse_array_expression(),
            Token::LBrace => self.parse_object_expression(),
            Token::Yield => {
                self.start_node();
                self.advance();
                let delegate = self.match_token(&Token::Star);
                let argument = if self.yield_has_argument() {
                    Some(Box::new(self.parse_expr_post(flags.no_sequence())?))
                } else {
                    None
                };
                Ok(Expr::Yield(YieldExpr {
                    argument,
                    delegate,
                    meta: self.finish_node(),
                }))
            }
            Token::Await => {
                self.start_node();
                self.advance();
                let argument = self.parse_expr_post(ExprFlags::operand())?;
                Ok(Expr::Await(AwaitExpr {
                    argument: Box::new(argument),
                    meta: self.finish_node(),
                }))
            }
            Token::Async => {
                if self.check_at(&Token::LParen, 1) {
                    self.start_node();
                    self.advance(); // `async`
                    self.parse_paren(true)
                } else if self.check_at(&Token::Do, 1) {
                    self.start_node();
                    self.advance(); // `async`
                    self.parse_do_expression(true)
                } else {
                    self.parse_function_expression(true)
                }
            }
            Token::Do => {
                self.start_node();
                self.parse_do_expression(false)
            }
            _ => Err(self.unexpected_current()),
        }
    }

    /// An identifier as an [`Ident`] node.
    pub(crate) fn parse_ident(&mut self) -> Result<Ident, SyntaxError> {
        let token = self.current()?.token;
        match token {
            Token::Ident(name) => {
                self.start_node();
                self.advance();
                Ok(Ident {
                    name,
                    meta: self.finish_node(),
                })
            }
            _ => Err(self.expected_error("identifier")),
        }
    }

    /// True when a value follows `yield`: anything but a list/statement
    /// closer or a line break.
    fn yield_has_argument(&self) -> bool {
        if self.line_break_before() {
            return false;
        }
        match self.current() {
            Ok(tws) => !matches!(
                tws.token,
                Token::Semicolon
                    | Token::RParen
                    | Token::RBracket
                    | Token::RBrace
                    | Token::Comma
                    | Token::Colon
                    | Token::Eof
            ),
            Err(_) => false,
        }
    }

    /// Parenthesised expression, sequence, or arrow parameter list. The
    /// caller has pushed the node start (at `(`, or at `async` for async
    /// arrows); this function consumes exactly that one start.
    fn parse_paren(&mut self, is_async: bool) -> Result<Expr, SyntaxError> {
        self.expect(Token::LParen)?;

        // `()` is only valid as an empty arrow parameter list
        if self.match_token(&Token::RParen) {
            if !self.check(&Token::FatArrow) {
                return Err(self.expected_error("=>"));
            }
            self.advance();
            let body = self.parse_expr_post(ExprFlags::all().no_sequence())?;
            return Ok(Expr::Arrow(ArrowFunctionExpr {
                params: Vec::new(),
                body: Box::new(body),
                is_async,
                meta: self.finish_node(),
            }));
        }

        let mut elements = Vec::new();
        let mut has_spread = false;
        loop {
            if self.check(&Token::Ellipsis) {
                has_spread = true;
                self.start_node();
                self.advance();
                let argument = self.parse_expr_post(ExprFlags::all().no_sequence().no_assignment())?;
                elements.push(Expr::Spread(SpreadElement {
                    argument: Box::new(argument),
                    meta: self.finish_node(),
                }));
            } else {
                elements.push(self.parse_expr_post(ExprFlags::all().no_sequence())?);
            }
            if !self.match_token(&Token::Comma) {
                break;
            }
            if self.check(&Token::RParen) {
                if let Some(last) = elements.last_mut() {
                    last.meta_mut().trailing_comma = true;
                }
                break;
            }
        }
        self.expect(Token::RParen)?;

        if self.check(&Token::FatArrow) || is_async {
            let source = if elements.len() == 1 {
                elements.remove(0)
            } else {
                Expr::Sequence(SequenceExpr {
                    expressions: elements,
                    meta: NodeMeta::default(),
                })
            };
            return self.arrow_tail(source, is_async);
        }

        // a spread element is only meaningful in an arrow parameter list
        if has_spread {
            let span = elements
                .iter()
                .find(|e| matches!(e, Expr::Spread(_)))
                .and_then(|e| e.meta().span);
            return Err(self.reject(SyntaxError::UnexpectedToken("...".into()), span));
        }

        if elements.len() == 1 {
            // plain grouping: widen the node to include the parentheses
            let mut expr = elements.remove(0);
            let meta = self.finish_node();
            expr.meta_mut().span = meta.span;
            Ok(expr)
        } else {
            Ok(Expr::Sequence(SequenceExpr {
                expressions: elements,
                meta: self.finish_node(),
            }))
        }
    }

    /// Arrow conversion: `=>` after a parameter source expression. A
    /// sequence splits into one pattern per element, anything else is a
    /// single pattern. The caller has pushed the arrow's node start.
    fn arrow_tail(&mut self, params_source: Expr, is_async: bool) -> Result<Expr, SyntaxError> {
        self.expect(Token::FatArrow)?;

        let params = match params_source {
            Expr::Sequence(seq) => self.params_from_exprs(seq.expressions)?,
            single => self.params_from_exprs(vec![single])?,
        };

        let body = self.parse_expr_post(ExprFlags::all().no_sequence())?;

        Ok(Expr::Arrow(ArrowFunctionExpr {
            params,
            body: Box::new(body),
            is_async,
            meta: self.finish_node(),
        }))
    }

    /// Call/new argument list: comma-separated, spread permitted, the
    /// trailing comma recorded on the last argument.
    pub(crate) fn parse_arguments(&mut self) -> Result<Vec<Expr>, SyntaxError> {
        self.expect(Token::LParen)?;

        let mut arguments = Vec::new();
        if !self.check(&Token::RParen) {
            loop {
                if self.check(&Token::Ellipsis) {
                    self.start_node();
                    self.advance();
                    let argument = self.parse_expr_post(ExprFlags::all().no_sequence())?;
                    arguments.push(Expr::Spread(SpreadElement {
                        argument: Box::new(argument),
                        meta: self.finish_node(),
                    }));
                } else {
                    arguments.push(self.parse_expr_post(ExprFlags::all().no_sequence())?);
                }
                if !self.match_token(&Token::Comma) {
                    break;
                }
                if self.check(&Token::RParen) {
                    if let Some(last) = arguments.last_mut() {
                        last.meta_mut().trailing_comma = true;
                    }
                    break;
                }
            }
        }
        self.expect(Token::RParen)?;

        Ok(arguments)
    }

    /// Function expression (named or anonymous). The cursor sits at
    /// `async` or `function`.
    pub(crate) fn parse_function_expression(
        &mut self,
        is_async: bool,
    ) -> Result<Expr, SyntaxError> {
        self.start_node();
        if is_async {
            self.advance(); // `async`
        }
        self.expect(Token::Function)?;
        let generator = self.match_token(&Token::Star);

        let id = if matches!(self.current()?.token, Token::Ident(_)) {
            Some(self.parse_ident()?)
        } else {
            None
        };

        let params = self.parse_function_params()?;
        let body = self.parse_block()?;

        Ok(Expr::Function(FunctionExpr {
            id,
            params,
            body,
            generator,
            is_async,
            meta: self.finish_node(),
        }))
    }

    /// Parenthesised parameter list. Parameters are parsed as
    /// expressions (defaults become assignments, rest becomes spread)
    /// and rewritten to patterns afterwards.
    pub(crate) fn parse_function_params(&mut self) -> Result<Vec<Pat>, SyntaxError> {
        self.expect(Token::LParen)?;

        let mut raw = Vec::new();
        if !self.check(&Token::RParen) {
            loop {
                if self.check(&Token::Ellipsis) {
                    self.start_node();
                    self.advance();
                    let argument =
                        self.parse_expr_post(ExprFlags::all().no_sequence().no_assignment())?;
                    raw.push(Expr::Spread(SpreadElement {
                        argument: Box::new(argument),
                        meta: self.finish_node(),
                    }));
                } else {
                    raw.push(self.parse_expr(ExprFlags::all().no_sequence())?);
                }
                if !self.match_token(&Token::Comma) {
                    break;
                }
                if self.check(&Token::RParen) {
                    if let Some(last) = raw.last_mut() {
                        last.meta_mut().trailing_comma = true;
                    }
                    break;
                }
            }
        }
        self.expect(Token::RParen)?;

        self.params_from_exprs(raw)
    }

    /// Array literal, with holes and spread elements.
    fn parse_array_expression(&mut self) -> Result<Expr, SyntaxError> {
        self.start_node();
        self.expect(Token::LBracket)?;

        let mut elements: Vec<Option<Expr>> = Vec::new();
        while !self.check(&Token::RBracket) {
            if self.check(&Token::Comma) {
                // a hole
                self.advance();
                elements.push(None);
                continue;
            }

            let element = if self.check(&Token::Ellipsis) {
                self.start_node();
                self.advance();
                let argument = self.parse_expr_post(ExprFlags::all().no_sequence())?;
                Expr::Spread(SpreadElement {
                    argument: Box::new(argument),
                    meta: self.finish_node(),
                })
            } else {
                self.parse_expr_post(ExprFlags::all().no_sequence())?
            };
            elements.push(Some(element));

            if !self.match_token(&Token::Comma) {
                break;
            }
            if self.check(&Token::RBracket) {
                if let Some(Some(last)) = elements.last_mut() {
                    last.meta_mut().trailing_comma = true;
                }
                break;
            }
        }
        self.expect(Token::RBracket)?;

        Ok(Expr::Array(ArrayExpr {
            elements,
            meta: self.finish_node(),
        }))
    }

    /// Do-expression body; the caller pushed the node start (covering a
    /// preceding `async` for the async form).
    fn parse_do_expression(&mut self, is_async: bool) -> Result<Expr, SyntaxError> {
        self.expect(Token::Do)?;
        let body = self.parse_block()?;
        Ok(Expr::Do(DoExpr {
            body,
            is_async,
            meta: self.finish_node(),
        }))
    }
}
