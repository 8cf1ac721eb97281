//! Statement parsing.
//!
//! Predictive dispatch on the first token of each statement. Statement
//! termination follows the automatic-break discipline: a `;` is consumed
//! when present, and otherwise a `}`, the end of input, or a line break
//! between the previous and the current token ends the statement.

use crate::ast::*;
use crate::error::SyntaxError;
use crate::expr::ExprFlags;
use crate::Parser;
use juno_lex::Token;

impl<'a> Parser<'a> {
    /// Parse a single statement.
    pub(crate) fn parse_statement(&mut self) -> Result<Stmt, SyntaxError> {
        if self.options.emit_logs {
            if let Ok(tws) = self.current() {
                log::trace!("statement dispatch on `{}`", tws.token);
            }
        }

        let token = self.current()?.token;
        match token {
            Token::LBrace => Ok(Stmt::Block(self.parse_block()?)),
            Token::Var | Token::Let | Token::Const => {
                Ok(Stmt::VarDecl(self.parse_variable_declaration()?))
            }
            Token::Function => self.parse_function_declaration(false),
            Token::Async if self.check_at(&Token::Function, 1) => {
                self.parse_function_declaration(true)
            }
            Token::If => self.parse_if_statement(),
            Token::Switch => self.parse_switch_statement(),
            Token::For => self.parse_for_statement(),
            Token::While => self.parse_while_statement(),
            Token::Do => self.parse_do_while_statement(),
            Token::Try => self.parse_try_statement(),
            Token::With => self.parse_with_statement(),
            Token::Debugger => self.parse_debugger_statement(),
            Token::Break => self.parse_break_statement(),
            Token::Continue => self.parse_continue_statement(),
            Token::Return => self.parse_return_statement(),
            Token::Semicolon => {
                self.start_node();
                self.advance();
                Ok(Stmt::Empty(EmptyStmt {
                    meta: self.finish_node(),
                }))
            }
            Token::Ident(_) if self.check_at(&Token::Colon, 1) => self.parse_labeled_statement(),
            _ => self.parse_expression_statement(),
        }
    }

    /// Parse a `{ ... }` block.
    pub(crate) fn parse_block(&mut self) -> Result<BlockStmt, SyntaxError> {
        self.start_node();
        self.expect(Token::LBrace)?;

        let mut body = Vec::new();
        while !self.check(&Token::RBrace) && !self.check(&Token::Eof) {
            body.push(self.parse_statement()?);
        }
        self.expect(Token::RBrace)?;

        Ok(BlockStmt {
            body,
            meta: self.finish_node(),
        })
    }

    /// Parse a `var`/`let`/`const` declaration, including its statement
    /// break. `for` init clauses call this directly: the declaration's
    /// own break consumption takes care of the first `;`.
    pub(crate) fn parse_variable_declaration(&mut self) -> Result<VarDecl, SyntaxError> {
        self.start_node();

        let kind = match self.current()?.token {
            Token::Var => VarKind::Var,
            Token::Let => VarKind::Let,
            Token::Const => VarKind::Const,
            _ => return Err(self.expected_error("var")),
        };
        self.advance();

        let mut declarations = Vec::new();
        loop {
            declarations.push(self.parse_variable_declarator()?);
            if !self.match_token(&Token::Comma) {
                break;
            }
        }
        self.expect_break()?;

        Ok(VarDecl {
            kind,
            declarations,
            meta: self.finish_node(),
        })
    }

    /// One `id` or `id = init` declarator. The id is parsed as an
    /// expression and rewritten to a binding pattern.
    fn parse_variable_declarator(&mut self) -> Result<VarDeclarator, SyntaxError> {
        self.start_node();

        let id_expr = self.parse_expr(ExprFlags::all().no_sequence().no_assignment())?;
        let id = self.expr_to_pattern(id_expr)?;

        let init = if self.match_token(&Token::Eq) {
            Some(self.parse_expr(ExprFlags::all().no_sequence())?)
        } else {
            None
        };

        Ok(VarDeclarator {
            id,
            init,
            meta: self.finish_node(),
        })
    }

    /// Parse a function declaration. The name is mandatory here, unlike
    /// in function expressions.
    fn parse_function_declaration(&mut self, is_async: bool) -> Result<Stmt, SyntaxError> {
        self.start_node();
        if is_async {
            self.advance(); // `async`
        }
        self.expect(Token::Function)?;
        let generator = self.match_token(&Token::Star);

        if !matches!(self.current()?.token, Token::Ident(_)) {
            let span = self.current().ok().map(|tws| tws.span);
            return Err(self.reject(SyntaxError::MissingFunctionName, span));
        }
        let id = self.parse_ident()?;

        let params = self.parse_function_params()?;
        let body = self.parse_block()?;

        Ok(Stmt::FunctionDecl(FunctionDecl {
            id,
            params,
            body,
            generator,
            is_async,
            meta: self.finish_node(),
        }))
    }

    fn parse_if_statement(&mut self) -> Result<Stmt, SyntaxError> {
        self.start_node();
        self.expect(Token::If)?;
        self.expect(Token::LParen)?;
        let test = self.parse_expr(ExprFlags::all())?;
        self.expect(Token::RParen)?;

        let consequent = Box::new(self.parse_statement()?);
        let alternate = if self.match_token(&Token::Else) {
            Some(Box::new(self.parse_statement()?))
        } else {
            None
        };

        Ok(Stmt::If(IfStmt {
            test: Box::new(test),
            consequent,
            alternate,
            meta: self.finish_node(),
        }))
    }

    fn parse_switch_statement(&mut self) -> Result<Stmt, SyntaxError> {
        self.start_node();
        self.expect(Token::Switch)?;
        self.expect(Token::LParen)?;
        let discriminant = self.parse_expr(ExprFlags::all())?;
        self.expect(Token::RParen)?;
        self.expect(Token::LBrace)?;

        let mut cases = Vec::new();
        while !self.check(&Token::RBrace) && !self.check(&Token::Eof) {
            cases.push(self.parse_switch_case()?);
        }
        self.expect(Token::RBrace)?;

        Ok(Stmt::Switch(SwitchStmt {
            discriminant: Box::new(discriminant),
            cases,
            meta: self.finish_node(),
        }))
    }

    /// One `case expr:` or `default:` clause; its statements run until
    /// the next `case`, `default` or `}`.
    fn parse_switch_case(&mut self) -> Result<SwitchCase, SyntaxError> {
        self.start_node();

        let test = if self.match_token(&Token::Case) {
            Some(self.parse_expr(ExprFlags::all())?)
        } else if self.match_token(&Token::Default) {
            None
        } else {
            return Err(self.expected_error("case"));
        };
        self.expect(Token::Colon)?;

        let mut consequent = Vec::new();
        while !self.check(&Token::Case)
            && !self.check(&Token::Default)
            && !self.check(&Token::RBrace)
            && !self.check(&Token::Eof)
        {
            consequent.push(self.parse_statement()?);
        }

        Ok(SwitchCase {
            test,
            consequent,
            meta: self.finish_node(),
        })
    }

    fn parse_for_statement(&mut self) -> Result<Stmt, SyntaxError> {
        self.start_node();
        self.expect(Token::For)?;
        self.expect(Token::LParen)?;

        let init = if self.match_token(&Token::Semicolon) {
            None
        } else if matches!(
            self.current()?.token,
            Token::Var | Token::Let | Token::Const
        ) {
            // the declaration consumes its own `;`
            Some(ForInit::VarDecl(self.parse_variable_declaration()?))
        } else {
            let init = self.parse_expr(ExprFlags::all())?;
            self.expect(Token::Semicolon)?;
            Some(ForInit::Expr(Box::new(init)))
        };

        let test = if self.check(&Token::Semicolon) {
            None
        } else {
            Some(Box::new(self.parse_expr(ExprFlags::all())?))
        };
        self.expect(Token::Semicolon)?;

        let update = if self.check(&Token::RParen) {
            None
        } else {
            Some(Box::new(self.parse_expr(ExprFlags::all())?))
        };
        self.expect(Token::RParen)?;

        let body = Box::new(self.parse_statement()?);

        Ok(Stmt::For(ForStmt {
            init,
            test,
            update,
            body,
            meta: self.finish_node(),
        }))
    }

    fn parse_while_statement(&mut self) -> Result<Stmt, SyntaxError> {
        self.start_node();
        self.expect(Token::While)?;
        self.expect(Token::LParen)?;
        let test = self.parse_expr(ExprFlags::all())?;
        self.expect(Token::RParen)?;
        let body = Box::new(self.parse_statement()?);

        Ok(Stmt::While(WhileStmt {
            test: Box::new(test),
            body,
            meta: self.finish_node(),
        }))
    }

    fn parse_do_while_statement(&mut self) -> Result<Stmt, SyntaxError> {
        self.start_node();
        self.expect(Token::Do)?;
        let body = Box::new(self.parse_statement()?);
        self.expect(Token::While)?;
        self.expect(Token::LParen)?;
        let test = self.parse_expr(ExprFlags::all())?;
        self.expect(Token::RParen)?;
        self.expect_break()?;

        Ok(Stmt::DoWhile(DoWhileStmt {
            body,
            test: Box::new(test),
            meta: self.finish_node(),
        }))
    }

    fn parse_try_statement(&mut self) -> Result<Stmt, SyntaxError> {
        self.start_node();
        let try_token = self.expect(Token::Try)?;
        let block = self.parse_block()?;

        let handler = if self.check(&Token::Catch) {
            Some(self.parse_catch_clause()?)
        } else {
            None
        };
        let finalizer = if self.match_token(&Token::Finally) {
            Some(self.parse_block()?)
        } else {
            None
        };

        if handler.is_none() && finalizer.is_none() {
            return Err(self.reject(SyntaxError::MissingCatchOrFinally, Some(try_token.span)));
        }

        Ok(Stmt::Try(TryStmt {
            block,
            handler,
            finalizer,
            meta: self.finish_node(),
        }))
    }

    /// `catch` with an optional parenthesised binding.
    fn parse_catch_clause(&mut self) -> Result<CatchClause, SyntaxError> {
        self.start_node();
        self.expect(Token::Catch)?;

        let param = if self.match_token(&Token::LParen) {
            let param_expr = self.parse_expr(ExprFlags::all().no_sequence().no_assignment())?;
            let param = self.expr_to_pattern(param_expr)?;
            self.expect(Token::RParen)?;
            Some(param)
        } else {
            None
        };

        let body = self.parse_block()?;

        Ok(CatchClause {
            param,
            body,
            meta: self.finish_node(),
        })
    }

    fn parse_with_statement(&mut self) -> Result<Stmt, SyntaxError> {
        self.start_node();
        self.expect(Token::With)?;
        self.expect(Token::LParen)?;
        let object = self.parse_expr(ExprFlags::all())?;
        self.expect(Token::RParen)?;
        let body = Box::new(self.parse_statement()?);

        Ok(Stmt::With(WithStmt {
            object: Box::new(object),
            body,
            meta: self.finish_node(),
        }))
    }

    fn parse_debugger_statement(&mut self) -> Result<Stmt, SyntaxError> {
        self.start_node();
        self.expect(Token::Debugger)?;
        self.expect_break()?;

        Ok(Stmt::Debugger(DebuggerStmt {
            meta: self.finish_node(),
        }))
    }

    fn parse_labeled_statement(&mut self) -> Result<Stmt, SyntaxError> {
        self.start_node();
        let label = self.parse_ident()?;
        self.expect(Token::Colon)?;
        let body = Box::new(self.parse_statement()?);

        Ok(Stmt::Labeled(LabeledStmt {
            label,
            body,
            meta: self.finish_node(),
        }))
    }

    /// `return` with a break directly after it has a null argument.
    fn parse_return_statement(&mut self) -> Result<Stmt, SyntaxError> {
        self.start_node();
        self.expect(Token::Return)?;

        let argument = if self.at_break() {
            None
        } else {
            Some(Box::new(self.parse_expr(ExprFlags::all())?))
        };
        self.expect_break()?;

        Ok(Stmt::Return(ReturnStmt {
            argument,
            meta: self.finish_node(),
        }))
    }

    fn parse_break_statement(&mut self) -> Result<Stmt, SyntaxError> {
        self.start_node();
        self.expect(Token::Break)?;

        let label = if matches!(self.current()?.token, Token::Ident(_)) && !self.line_break_before()
        {
            Some(self.parse_ident()?)
        } else {
            None
        };
        self.expect_break()?;

        Ok(Stmt::Break(BreakStmt {
            label,
            meta: self.finish_node(),
        }))
    }

    fn parse_continue_statement(&mut self) -> Result<Stmt, SyntaxError> {
        self.start_node();
        self.expect(Token::Continue)?;

        let label = if matches!(self.current()?.token, Token::Ident(_)) && !self.line_break_before()
        {
            Some(self.parse_ident()?)
        } else {
            None
        };
        self.expect_break()?;

        Ok(Stmt::Continue(ContinueStmt {
            label,
            meta: self.finish_node(),
        }))
    }

    fn parse_expression_statement(&mut self) -> Result<Stmt, SyntaxError> {
        self.start_node();
        let expression = self.parse_expr(ExprFlags::all())?;
        self.expect_break()?;

        Ok(Stmt::Expr(ExprStmt {
            expression: Box::new(expression),
            meta: self.finish_node(),
        }))
    }
}
