//! The watch log produced by evaluation.

use serde::Serialize;
use serde::ser::SerializeStruct;

use super::error::RuntimeError;
use crate::Span;
use crate::diagnostics::{DiagnosticKind, Diagnostics};

/// One evaluated expression statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Watch {
    /// Source text of the expression.
    pub expression: String,
    /// Inspected value.
    pub value: String,
    /// `typeof` of the value.
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(skip)]
    pub span: Span,
}

/// Outcome of running a script: the watches recorded before evaluation
/// finished or stopped.
#[derive(Debug, Clone, Default)]
pub struct Evaluation {
    pub watches: Vec<Watch>,
    pub error: Option<RuntimeError>,
    /// Innermost expression (or statement) that raised `error`.
    pub error_span: Option<Span>,
}

impl Evaluation {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// The runtime error as a diagnostic, for rendering against the source.
    pub fn diagnostics(&self) -> Diagnostics {
        let mut diagnostics = Diagnostics::new();
        if let Some(err) = &self.error {
            let span = self.error_span.unwrap_or_default();
            diagnostics
                .report(DiagnosticKind::RuntimeError, span)
                .message(format!("{}: {err}", err.class()))
                .emit();
        }
        diagnostics
    }

    /// Watch log as aligned text, one line per watch, error last.
    pub fn render(&self) -> String {
        let width = self
            .watches
            .iter()
            .map(|w| w.expression.chars().count())
            .max()
            .unwrap_or(0);
        let mut lines: Vec<String> = self
            .watches
            .iter()
            .map(|w| {
                format!(
                    "{:<width$}  {}  ({})",
                    w.expression, w.value, w.type_name
                )
            })
            .collect();
        if let Some(err) = &self.error {
            lines.push(format!("{}: {err}", err.class()));
        }
        lines.join("\n")
    }
}

impl Serialize for Evaluation {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("Evaluation", 2)?;
        state.serialize_field("watches", &self.watches)?;
        state.serialize_field("error", &self.error.as_ref().map(ErrorView))?;
        state.end()
    }
}

struct ErrorView<'a>(&'a RuntimeError);

impl Serialize for ErrorView<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("Error", 2)?;
        state.serialize_field("class", self.0.class())?;
        state.serialize_field("message", &self.0.to_string())?;
        state.end()
    }
}
