//! Parser state and low-level token operations.

use super::ast::Program;
use super::lexer::{Token, TokenKind};
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::{Error, Span};

/// Default nesting limit for statements and expressions.
pub const DEFAULT_RECURSION_LIMIT: u32 = 256;

#[derive(Debug)]
pub struct ParseResult {
    pub program: Program,
    pub diagnostics: Diagnostics,
}

/// Recursive-descent parser over a trivia-free token stream.
pub struct Parser<'src> {
    pub(super) source: &'src str,
    pub(super) tokens: Vec<Token>,
    pub(super) pos: usize,
    pub(super) diagnostics: Diagnostics,
    pub(super) depth: u32,
    /// End offset of the last consumed token, for closing spans.
    pub(super) last_end: usize,
    recursion_limit: u32,
    fatal_error: Option<Error>,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str, tokens: Vec<Token>) -> Self {
        Self {
            source,
            tokens,
            pos: 0,
            diagnostics: Diagnostics::new(),
            depth: 0,
            last_end: 0,
            recursion_limit: DEFAULT_RECURSION_LIMIT,
            fatal_error: None,
        }
    }

    pub fn with_recursion_limit(mut self, limit: u32) -> Self {
        self.recursion_limit = limit;
        self
    }

    pub fn parse(mut self) -> Result<ParseResult, Error> {
        let program = self.parse_program();
        if let Some(err) = self.fatal_error {
            return Err(err);
        }
        Ok(ParseResult {
            program,
            diagnostics: self.diagnostics,
        })
    }

    pub(super) fn has_fatal_error(&self) -> bool {
        self.fatal_error.is_some()
    }

    pub(super) fn current(&self) -> Option<TokenKind> {
        self.tokens.get(self.pos).map(|t| t.kind)
    }

    pub(super) fn nth(&self, lookahead: usize) -> Option<TokenKind> {
        self.tokens.get(self.pos + lookahead).map(|t| t.kind)
    }

    pub(super) fn current_span(&self) -> Span {
        self.tokens
            .get(self.pos)
            .map_or_else(|| Span::empty(self.source.len()), |t| t.span)
    }

    /// Start offset of the current token (or end of input).
    pub(super) fn current_start(&self) -> usize {
        self.current_span().start as usize
    }

    pub(super) fn current_text(&self) -> &'src str {
        self.current_span().text(self.source)
    }

    pub(super) fn eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    pub(super) fn should_stop(&self) -> bool {
        self.eof() || self.has_fatal_error()
    }

    pub(super) fn currently_is(&self, kind: TokenKind) -> bool {
        self.current() == Some(kind)
    }

    pub(super) fn bump(&mut self) -> Token {
        let token = self.tokens[self.pos];
        self.pos += 1;
        self.last_end = token.span.end as usize;
        token
    }

    pub(super) fn eat(&mut self, kind: TokenKind) -> bool {
        if self.currently_is(kind) {
            self.bump();
            return true;
        }
        false
    }

    /// Consume `kind` or report what was expected.
    pub(super) fn expect(&mut self, kind: TokenKind) -> Option<Token> {
        if self.currently_is(kind) {
            return Some(self.bump());
        }
        self.error_expected(kind.describe());
        None
    }

    /// Consume a closing delimiter, reporting the unclosed opener otherwise.
    pub(super) fn expect_closing(&mut self, kind: TokenKind, open: Span) -> Option<Token> {
        if self.currently_is(kind) {
            return Some(self.bump());
        }
        let diag = match kind {
            TokenKind::ParenClose => DiagnosticKind::UnclosedParen,
            TokenKind::BracketClose => DiagnosticKind::UnclosedBracket,
            _ => DiagnosticKind::UnclosedBrace,
        };
        self.diagnostics.report(diag, open).emit();
        None
    }

    pub(super) fn error_expected(&mut self, what: &str) {
        let found = self.describe_current();
        let span = self.current_span();
        self.diagnostics
            .report(DiagnosticKind::ExpectedToken, span)
            .message(format!("{what}, found {found}"))
            .emit();
    }

    pub(super) fn error_at_current(&mut self, kind: DiagnosticKind) {
        if self.currently_is(TokenKind::Garbage) {
            self.report_garbage();
            return;
        }
        let found = self.describe_current();
        let span = self.current_span();
        self.diagnostics
            .report(kind, span)
            .message(format!("found {found}"))
            .emit();
    }

    pub(super) fn report_garbage(&mut self) {
        let span = self.current_span();
        let text = self.current_text();
        self.diagnostics
            .report(DiagnosticKind::UnrecognizedInput, span)
            .message(format!("`{text}`"))
            .emit();
    }

    fn describe_current(&self) -> String {
        match self.current() {
            None => "end of input".to_owned(),
            Some(kind @ (TokenKind::Ident | TokenKind::Number | TokenKind::Str)) => {
                format!("{} `{}`", kind.describe(), self.current_text())
            }
            Some(kind) if kind.is_keyword() => format!("keyword `{}`", self.current_text()),
            Some(kind) => kind.describe().to_owned(),
        }
    }

    /// Enter a nested production. Returns false (and records a fatal error)
    /// once the recursion limit is reached.
    pub(super) fn enter(&mut self) -> bool {
        if self.depth >= self.recursion_limit {
            if self.fatal_error.is_none() {
                self.fatal_error = Some(Error::RecursionLimitExceeded);
            }
            return false;
        }
        self.depth += 1;
        true
    }

    pub(super) fn exit(&mut self) {
        self.depth -= 1;
    }

    /// Run a left-folding production. Each operand folded into the left-hand
    /// side is charged with [`Parser::enter`]; the depth is restored after.
    pub(super) fn folding<R>(&mut self, f: impl FnOnce(&mut Self) -> Option<R>) -> Option<R> {
        let depth = self.depth;
        let result = f(self);
        self.depth = depth;
        result
    }

    /// Skip to the next statement boundary after an error.
    ///
    /// Stops after `;`, or before `}` or a statement keyword. Always consumes
    /// at least one token so the caller makes progress.
    pub(super) fn synchronize(&mut self, start_pos: usize) {
        if self.pos == start_pos && !self.eof() {
            self.bump();
        }
        while let Some(kind) = self.current() {
            match kind {
                TokenKind::Semicolon => {
                    self.bump();
                    return;
                }
                TokenKind::BraceClose
                | TokenKind::KwVar
                | TokenKind::KwLet
                | TokenKind::KwConst
                | TokenKind::KwIf
                | TokenKind::KwFor => return,
                _ => {
                    self.bump();
                }
            }
        }
    }

    pub(super) fn span_from(&self, start: usize) -> Span {
        Span::new(start, self.last_end.max(start))
    }
}
