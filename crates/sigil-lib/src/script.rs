//! A parsed watch script, ready to evaluate.

use sigil_core::{Realm, Tracer};

use crate::diagnostics::Diagnostics;
use crate::engine::{Evaluation, FuelLimits, Interpreter};
use crate::parser::lexer::lex;
use crate::parser::{ParseResult, Parser, Program, dump_program};
use crate::span::ensure_addressable;
use crate::{Error, Result};

/// Source text plus its syntax tree and parse diagnostics.
///
/// Parsing never fails on syntax errors; check [`is_valid`](Self::is_valid)
/// or [`diagnostics`](Self::diagnostics). Evaluation refuses invalid scripts.
#[derive(Debug, Clone)]
pub struct Script<'src> {
    source: &'src str,
    program: Program,
    diagnostics: Diagnostics,
    limits: FuelLimits,
}

impl<'src> Script<'src> {
    pub fn parse(source: &'src str) -> Result<Self> {
        Self::parse_with(source, FuelLimits::default())
    }

    /// Parse with explicit limits. The recursion limit applies to both the
    /// parser and the evaluator.
    pub fn parse_with(source: &'src str, limits: FuelLimits) -> Result<Self> {
        ensure_addressable(source.len())?;
        let ParseResult {
            program,
            diagnostics,
        } = Parser::new(source, lex(source))
            .with_recursion_limit(limits.recursion_limit)
            .parse()?;
        Ok(Self {
            source,
            program,
            diagnostics,
            limits,
        })
    }

    pub fn source(&self) -> &'src str {
        self.source
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn limits(&self) -> FuelLimits {
        self.limits
    }

    /// No parse errors. Warnings do not count.
    pub fn is_valid(&self) -> bool {
        !self.diagnostics.has_errors()
    }

    pub fn dump_ast(&self) -> String {
        dump_program(&self.program)
    }

    /// Evaluate against a fresh realm.
    pub fn evaluate(&self) -> Result<Evaluation> {
        self.evaluate_in(&mut Realm::new())
    }

    /// Evaluate against a caller-owned realm, whose registry outlives the run.
    pub fn evaluate_in<T: Tracer>(&self, realm: &mut Realm<T>) -> Result<Evaluation> {
        if !self.is_valid() {
            return Err(Error::ParseError(self.diagnostics.clone()));
        }
        let mut interpreter = Interpreter::new(realm, self.source).with_limits(self.limits);
        Ok(interpreter.run(&self.program))
    }
}

impl<'src> TryFrom<&'src str> for Script<'src> {
    type Error = Error;

    fn try_from(source: &'src str) -> Result<Self> {
        Self::parse(source)
    }
}
