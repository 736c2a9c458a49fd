//! Statement and expression productions.
//!
//! Productions return `None` after reporting a diagnostic; statement-level
//! callers then resynchronize. Precedence, lowest first: equality, `+`,
//! prefix (`typeof`, `!`, `new`), postfix (`.`, `[]`, calls).

use super::ast::{
    BinaryOp, DeclKind, Expr, ExprKind, Program, PropName, Stmt, StmtKind, UnaryOp,
};
use super::core::Parser;
use super::lexer::{TokenKind, unescape};
use crate::Span;
use crate::diagnostics::DiagnosticKind;

impl Parser<'_> {
    pub(super) fn parse_program(&mut self) -> Program {
        let mut stmts = Vec::new();
        while !self.should_stop() {
            let start_pos = self.pos;
            match self.parse_stmt() {
                Some(stmt) => stmts.push(stmt),
                None if self.has_fatal_error() => break,
                None => self.synchronize(start_pos),
            }
        }
        Program { stmts }
    }

    fn parse_stmt(&mut self) -> Option<Stmt> {
        if !self.enter() {
            return None;
        }
        let stmt = self.parse_stmt_inner();
        self.exit();
        stmt
    }

    fn parse_stmt_inner(&mut self) -> Option<Stmt> {
        let start = self.current_start();
        let Some(current) = self.current() else {
            self.error_at_current(DiagnosticKind::ExpectedExpression);
            return None;
        };
        let kind = match current {
            TokenKind::KwVar | TokenKind::KwLet | TokenKind::KwConst => self.parse_declaration()?,
            TokenKind::KwIf => self.parse_if()?,
            TokenKind::KwFor => self.parse_for_of()?,
            TokenKind::BraceOpen => self.parse_block()?,
            TokenKind::Semicolon => {
                self.bump();
                StmtKind::Empty
            }
            TokenKind::Garbage => {
                self.report_garbage();
                return None;
            }
            _ => self.parse_expr_or_assign()?,
        };
        Some(Stmt {
            kind,
            span: self.span_from(start),
        })
    }

    fn parse_decl_kind(&mut self) -> Option<DeclKind> {
        let kind = match self.current()? {
            TokenKind::KwVar => DeclKind::Var,
            TokenKind::KwLet => DeclKind::Let,
            TokenKind::KwConst => DeclKind::Const,
            _ => return None,
        };
        self.bump();
        Some(kind)
    }

    fn parse_binding_name(&mut self) -> Option<String> {
        if self.currently_is(TokenKind::Ident) {
            return Some(self.bump().span.text(self.source).to_owned());
        }
        self.error_at_current(DiagnosticKind::ExpectedName);
        None
    }

    fn parse_declaration(&mut self) -> Option<StmtKind> {
        let kind = self.parse_decl_kind()?;
        let name = self.parse_binding_name()?;
        self.expect(TokenKind::Assign)?;
        let init = self.parse_expr()?;
        self.eat(TokenKind::Semicolon);
        Some(StmtKind::Declare { kind, name, init })
    }

    fn parse_if(&mut self) -> Option<StmtKind> {
        self.bump();
        let open = self.expect(TokenKind::ParenOpen)?.span;
        let cond = self.parse_expr()?;
        self.expect_closing(TokenKind::ParenClose, open)?;

        if let Some(value) = cond.as_bool_literal() {
            self.diagnostics
                .report(DiagnosticKind::ConstantCondition, cond.span)
                .message(format!("always `{value}`"))
                .emit();
        }

        let then = Box::new(self.parse_stmt()?);
        let otherwise = if self.eat(TokenKind::KwElse) {
            Some(Box::new(self.parse_stmt()?))
        } else {
            None
        };
        Some(StmtKind::If {
            cond,
            then,
            otherwise,
        })
    }

    fn parse_for_of(&mut self) -> Option<StmtKind> {
        self.bump();
        let open = self.expect(TokenKind::ParenOpen)?.span;
        let Some(kind) = self.parse_decl_kind() else {
            self.error_expected("`var`, `let`, or `const`");
            return None;
        };
        let name = self.parse_binding_name()?;
        self.expect(TokenKind::KwOf)?;
        let iterable = self.parse_expr()?;
        self.expect_closing(TokenKind::ParenClose, open)?;
        let body = Box::new(self.parse_stmt()?);
        Some(StmtKind::ForOf {
            kind,
            name,
            iterable,
            body,
        })
    }

    fn parse_block(&mut self) -> Option<StmtKind> {
        let open = self.bump().span;
        let mut stmts = Vec::new();
        while !self.should_stop() && !self.currently_is(TokenKind::BraceClose) {
            let start_pos = self.pos;
            match self.parse_stmt() {
                Some(stmt) => stmts.push(stmt),
                None if self.has_fatal_error() => return None,
                None => self.synchronize(start_pos),
            }
        }
        self.expect_closing(TokenKind::BraceClose, open)?;
        Some(StmtKind::Block(stmts))
    }

    fn parse_expr_or_assign(&mut self) -> Option<StmtKind> {
        let expr = self.parse_expr()?;
        if self.currently_is(TokenKind::Assign) {
            let eq_span = self.bump().span;
            if !expr.is_assignable() {
                self.diagnostics
                    .report(DiagnosticKind::InvalidAssignmentTarget, expr.span.cover(eq_span))
                    .emit();
                return None;
            }
            let value = self.parse_expr()?;
            self.eat(TokenKind::Semicolon);
            return Some(StmtKind::Assign {
                target: expr,
                value,
            });
        }
        self.end_expr_stmt()?;
        Some(StmtKind::Expr(expr))
    }

    /// An expression statement ends at `;`, `}`, end of input, or a line
    /// break before the next token.
    fn end_expr_stmt(&mut self) -> Option<()> {
        if self.eat(TokenKind::Semicolon)
            || self.eof()
            || self.currently_is(TokenKind::BraceClose)
            || self.source[self.last_end..self.current_start()].contains('\n')
        {
            return Some(());
        }
        self.error_at_current(DiagnosticKind::UnexpectedToken);
        None
    }

    pub(super) fn parse_expr(&mut self) -> Option<Expr> {
        if !self.enter() {
            return None;
        }
        let expr = self.parse_equality();
        self.exit();
        expr
    }

    fn parse_equality(&mut self) -> Option<Expr> {
        self.folding(|p| {
            let mut lhs = p.parse_additive()?;
            loop {
                let op = match p.current() {
                    Some(TokenKind::StrictEq) => BinaryOp::StrictEq,
                    Some(TokenKind::StrictNotEq) => BinaryOp::StrictNotEq,
                    Some(TokenKind::LooseEq) => BinaryOp::LooseEq,
                    Some(TokenKind::LooseNotEq) => BinaryOp::LooseNotEq,
                    _ => return Some(lhs),
                };
                if !p.enter() {
                    return None;
                }
                p.bump();
                let rhs = p.parse_additive()?;
                lhs = binary(op, lhs, rhs);
            }
        })
    }

    fn parse_additive(&mut self) -> Option<Expr> {
        self.folding(|p| {
            let mut lhs = p.parse_unary()?;
            while p.currently_is(TokenKind::Plus) {
                if !p.enter() {
                    return None;
                }
                p.bump();
                let rhs = p.parse_unary()?;
                lhs = binary(BinaryOp::Add, lhs, rhs);
            }
            Some(lhs)
        })
    }

    fn parse_unary(&mut self) -> Option<Expr> {
        if !self.enter() {
            return None;
        }
        let expr = self.parse_unary_inner();
        self.exit();
        expr
    }

    fn parse_unary_inner(&mut self) -> Option<Expr> {
        let start = self.current_start();
        let op = match self.current() {
            Some(TokenKind::KwTypeof) => UnaryOp::Typeof,
            Some(TokenKind::Bang) => UnaryOp::Not,
            Some(TokenKind::KwNew) => return self.parse_new(),
            _ => return self.parse_postfix(),
        };
        self.bump();
        let operand = Box::new(self.parse_unary()?);
        Some(Expr::new(
            ExprKind::Unary { op, operand },
            self.span_from(start),
        ))
    }

    /// `new callee(args)`: the callee is a member chain without calls, and
    /// the argument list is optional.
    fn parse_new(&mut self) -> Option<Expr> {
        let start = self.bump().span.start as usize;
        let primary = self.parse_primary()?;
        let callee = Box::new(self.parse_member_chain(primary, false)?);
        let args = if self.currently_is(TokenKind::ParenOpen) {
            self.parse_args()?
        } else {
            Vec::new()
        };
        let expr = Expr::new(ExprKind::New { callee, args }, self.span_from(start));
        self.parse_member_chain(expr, true)
    }

    fn parse_postfix(&mut self) -> Option<Expr> {
        let primary = self.parse_primary()?;
        self.parse_member_chain(primary, true)
    }

    fn parse_member_chain(&mut self, expr: Expr, allow_calls: bool) -> Option<Expr> {
        self.folding(|p| p.fold_member_chain(expr, allow_calls))
    }

    fn fold_member_chain(&mut self, mut expr: Expr, allow_calls: bool) -> Option<Expr> {
        let start = expr.span.start as usize;
        loop {
            let extends = match self.current() {
                Some(TokenKind::Dot | TokenKind::BracketOpen) => true,
                Some(TokenKind::ParenOpen) => allow_calls,
                _ => false,
            };
            if extends && !self.enter() {
                return None;
            }
            match self.current() {
                Some(TokenKind::Dot) => {
                    self.bump();
                    let property = self.parse_property_name()?;
                    expr = Expr::new(
                        ExprKind::Member {
                            object: Box::new(expr),
                            property,
                        },
                        self.span_from(start),
                    );
                }
                Some(TokenKind::BracketOpen) => {
                    let open = self.bump().span;
                    let index = Box::new(self.parse_expr()?);
                    self.expect_closing(TokenKind::BracketClose, open)?;
                    expr = Expr::new(
                        ExprKind::Index {
                            object: Box::new(expr),
                            index,
                        },
                        self.span_from(start),
                    );
                }
                Some(TokenKind::ParenOpen) if allow_calls => {
                    let args = self.parse_args()?;
                    expr = Expr::new(
                        ExprKind::Call {
                            callee: Box::new(expr),
                            args,
                        },
                        self.span_from(start),
                    );
                }
                _ => return Some(expr),
            }
        }
    }

    /// Name after `.`; keywords are allowed (`Identifier.for`).
    fn parse_property_name(&mut self) -> Option<String> {
        match self.current() {
            Some(kind) if kind == TokenKind::Ident || kind.is_keyword() => {
                Some(self.bump().span.text(self.source).to_owned())
            }
            _ => {
                self.error_at_current(DiagnosticKind::ExpectedName);
                None
            }
        }
    }

    fn parse_args(&mut self) -> Option<Vec<Expr>> {
        let open = self.bump().span;
        let mut args = Vec::new();
        while !self.should_stop() && !self.currently_is(TokenKind::ParenClose) {
            args.push(self.parse_expr()?);
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect_closing(TokenKind::ParenClose, open)?;
        Some(args)
    }

    fn parse_primary(&mut self) -> Option<Expr> {
        let Some(kind) = self.current() else {
            self.error_at_current(DiagnosticKind::ExpectedExpression);
            return None;
        };
        let span = self.current_span();
        let text = self.current_text();
        let expr_kind = match kind {
            TokenKind::Number => match text.parse::<f64>() {
                Ok(n) => ExprKind::Number(n),
                Err(_) => {
                    self.error_at_current(DiagnosticKind::UnexpectedToken);
                    return None;
                }
            },
            TokenKind::Str => ExprKind::Str(unescape(text)),
            TokenKind::KwTrue => ExprKind::Bool(true),
            TokenKind::KwFalse => ExprKind::Bool(false),
            TokenKind::KwUndefined => ExprKind::Undefined,
            TokenKind::KwNull => ExprKind::Null,
            TokenKind::Ident => ExprKind::Name(text.to_owned()),
            TokenKind::ParenOpen => return self.parse_paren(),
            TokenKind::BracketOpen => return self.parse_array(),
            TokenKind::BraceOpen => return self.parse_object(),
            _ => {
                self.error_at_current(DiagnosticKind::ExpectedExpression);
                return None;
            }
        };
        self.bump();
        Some(Expr::new(expr_kind, span))
    }

    fn parse_paren(&mut self) -> Option<Expr> {
        let open = self.bump().span;
        let mut inner = self.parse_expr()?;
        self.expect_closing(TokenKind::ParenClose, open)?;
        // Widen to include the parens so watches show the source as written.
        inner.span = self.span_from(open.start as usize);
        Some(inner)
    }

    fn parse_array(&mut self) -> Option<Expr> {
        let open = self.bump().span;
        let mut elements = Vec::new();
        while !self.should_stop() && !self.currently_is(TokenKind::BracketClose) {
            elements.push(self.parse_expr()?);
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect_closing(TokenKind::BracketClose, open)?;
        Some(Expr::new(
            ExprKind::Array(elements),
            self.span_from(open.start as usize),
        ))
    }

    fn parse_object(&mut self) -> Option<Expr> {
        let open = self.bump().span;
        let mut props = Vec::new();
        while !self.should_stop() && !self.currently_is(TokenKind::BraceClose) {
            let name = self.parse_prop_name()?;
            self.expect(TokenKind::Colon)?;
            let value = self.parse_expr()?;
            props.push((name, value));
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect_closing(TokenKind::BraceClose, open)?;
        Some(Expr::new(
            ExprKind::Object(props),
            self.span_from(open.start as usize),
        ))
    }

    fn parse_prop_name(&mut self) -> Option<PropName> {
        match self.current() {
            Some(TokenKind::BracketOpen) => {
                let open = self.bump().span;
                let key = self.parse_expr()?;
                self.expect_closing(TokenKind::BracketClose, open)?;
                Some(PropName::Computed(key))
            }
            Some(TokenKind::Str) => {
                let text = self.bump().span.text(self.source);
                Some(PropName::Named(unescape(text)))
            }
            Some(kind) if kind == TokenKind::Ident || kind == TokenKind::Number || kind.is_keyword() => {
                Some(PropName::Named(self.bump().span.text(self.source).to_owned()))
            }
            _ => {
                self.error_at_current(DiagnosticKind::ExpectedName);
                None
            }
        }
    }
}

fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Expr {
    let span: Span = lhs.span.cover(rhs.span);
    Expr::new(
        ExprKind::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        },
        span,
    )
}
