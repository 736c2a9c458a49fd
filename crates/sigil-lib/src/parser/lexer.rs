//! Lexer for watch scripts.
//!
//! Produces span-based tokens without storing text. Trivia (whitespace and
//! comments) is dropped here; the parser never sees it.
//!
//! Consecutive unrecognized characters are coalesced into a single `Garbage`
//! token so malformed input yields one diagnostic per run, not per character.

use logos::Logos;

use crate::Span;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    #[token("(")]
    ParenOpen,

    #[token(")")]
    ParenClose,

    #[token("[")]
    BracketOpen,

    #[token("]")]
    BracketClose,

    #[token("{")]
    BraceOpen,

    #[token("}")]
    BraceClose,

    #[token(".")]
    Dot,

    #[token(",")]
    Comma,

    #[token(";")]
    Semicolon,

    #[token(":")]
    Colon,

    /// `===`. Defined alongside `==` and `=`; logos picks the longest match.
    #[token("===")]
    StrictEq,

    #[token("!==")]
    StrictNotEq,

    #[token("==")]
    LooseEq,

    #[token("!=")]
    LooseNotEq,

    #[token("=")]
    Assign,

    #[token("+")]
    Plus,

    #[token("!")]
    Bang,

    #[token("var")]
    KwVar,

    #[token("let")]
    KwLet,

    #[token("const")]
    KwConst,

    #[token("new")]
    KwNew,

    #[token("typeof")]
    KwTypeof,

    #[token("if")]
    KwIf,

    #[token("else")]
    KwElse,

    #[token("for")]
    KwFor,

    #[token("of")]
    KwOf,

    #[token("true")]
    KwTrue,

    #[token("false")]
    KwFalse,

    #[token("undefined")]
    KwUndefined,

    #[token("null")]
    KwNull,

    /// Defined after keywords so they take precedence on exact matches.
    #[regex(r"[a-zA-Z_$][a-zA-Z0-9_$]*")]
    Ident,

    #[regex(r"[0-9]+(?:\.[0-9]+)?")]
    Number,

    /// Quotes included; the parser unescapes.
    #[regex(r#""(?:[^"\\]|\\.)*""#)]
    #[regex(r"'(?:[^'\\]|\\.)*'")]
    Str,

    #[regex(r"[ \t\r\n\f]+")]
    Whitespace,

    #[regex(r"//[^\n]*", allow_greedy = true)]
    LineComment,

    #[regex(r"/\*(?:[^*]|\*[^/])*\*/")]
    BlockComment,

    /// Coalesced unrecognized characters
    Garbage,
}

impl TokenKind {
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            TokenKind::Whitespace | TokenKind::LineComment | TokenKind::BlockComment
        )
    }

    /// Keywords double as property names after `.` (`Identifier.for`).
    pub fn is_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::KwVar
                | TokenKind::KwLet
                | TokenKind::KwConst
                | TokenKind::KwNew
                | TokenKind::KwTypeof
                | TokenKind::KwIf
                | TokenKind::KwElse
                | TokenKind::KwFor
                | TokenKind::KwOf
                | TokenKind::KwTrue
                | TokenKind::KwFalse
                | TokenKind::KwUndefined
                | TokenKind::KwNull
        )
    }

    /// Human-readable name for diagnostics.
    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::ParenOpen => "`(`",
            TokenKind::ParenClose => "`)`",
            TokenKind::BracketOpen => "`[`",
            TokenKind::BracketClose => "`]`",
            TokenKind::BraceOpen => "`{`",
            TokenKind::BraceClose => "`}`",
            TokenKind::Dot => "`.`",
            TokenKind::Comma => "`,`",
            TokenKind::Semicolon => "`;`",
            TokenKind::Colon => "`:`",
            TokenKind::StrictEq => "`===`",
            TokenKind::StrictNotEq => "`!==`",
            TokenKind::LooseEq => "`==`",
            TokenKind::LooseNotEq => "`!=`",
            TokenKind::Assign => "`=`",
            TokenKind::Plus => "`+`",
            TokenKind::Bang => "`!`",
            TokenKind::Ident => "identifier",
            TokenKind::Number => "number",
            TokenKind::Str => "string",
            TokenKind::Whitespace | TokenKind::LineComment | TokenKind::BlockComment => "trivia",
            TokenKind::Garbage => "unrecognized input",
            _ => "keyword",
        }
    }
}

/// Zero-copy token: kind + span, text retrieved via [`Span::text`] when needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// Tokenizes source, dropping trivia and coalescing lexer errors.
pub fn lex(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(source);
    let mut error_start: Option<usize> = None;

    loop {
        match lexer.next() {
            Some(Ok(kind)) => {
                if let Some(start) = error_start.take() {
                    let end = lexer.span().start;
                    tokens.push(Token::new(TokenKind::Garbage, Span::new(start, end)));
                }
                if !kind.is_trivia() {
                    tokens.push(Token::new(kind, lexer.span().into()));
                }
            }
            Some(Err(())) => {
                if error_start.is_none() {
                    error_start = Some(lexer.span().start);
                }
            }
            None => {
                if let Some(start) = error_start.take() {
                    tokens.push(Token::new(TokenKind::Garbage, Span::new(start, source.len())));
                }
                break;
            }
        }
    }

    tokens
}

/// Decode a `Str` token's text (quotes included) into its value.
///
/// Unknown escapes keep the escaped character, as `\q` reads `q`.
pub fn unescape(quoted: &str) -> String {
    let inner = &quoted[1..quoted.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('0') => out.push('\0'),
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}
