//! Parser for watch scripts.
//!
//! Tokens come from a logos lexer with trivia already dropped. A
//! recursive-descent pass builds the typed tree in [`ast`] directly.
//!
//! # Recovery
//!
//! The parser always produces a program. A failed statement reports a
//! diagnostic and the parser skips to the next statement boundary (`;`, `}`,
//! or a statement keyword). Exceeding the recursion limit is the only fatal
//! error and is returned as `Err`.

pub mod ast;
pub mod dump;
pub mod lexer;

mod core;
mod grammar;


pub use ast::{
    BinaryOp, DeclKind, Expr, ExprKind, Program, PropName, Stmt, StmtKind, UnaryOp,
};
pub use core::{DEFAULT_RECURSION_LIMIT, ParseResult, Parser};
pub use dump::dump_program;

use lexer::lex;

/// Main entry point. Returns Err only when nesting exceeds the default limit.
pub fn parse(source: &str) -> Result<ParseResult, crate::Error> {
    crate::span::ensure_addressable(source.len())?;
    Parser::new(source, lex(source)).parse()
}
