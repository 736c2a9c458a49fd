mod message;
mod printer;

#[cfg(test)]
mod tests;

pub use message::{DiagnosticKind, DiagnosticMessage, Severity};
pub use printer::DiagnosticsPrinter;

use crate::Span;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    messages: Vec<DiagnosticMessage>,
}

#[must_use = "diagnostic not emitted, call .emit()"]
pub struct DiagnosticBuilder<'a> {
    diagnostics: &'a mut Diagnostics,
    message: DiagnosticMessage,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
        }
    }

    /// Create a diagnostic with the given kind and span.
    ///
    /// Uses the kind's default message. Call `.message()` on the builder to add detail.
    pub fn report(&mut self, kind: DiagnosticKind, span: Span) -> DiagnosticBuilder<'_> {
        DiagnosticBuilder {
            diagnostics: self,
            message: DiagnosticMessage::new(kind, span, kind.fallback_message()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn has_errors(&self) -> bool {
        self.messages.iter().any(|d| d.is_error())
    }

    pub fn has_warnings(&self) -> bool {
        self.messages.iter().any(|d| d.is_warning())
    }

    pub fn error_count(&self) -> usize {
        self.messages.iter().filter(|d| d.is_error()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.messages.iter().filter(|d| d.is_warning()).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DiagnosticMessage> {
        self.messages.iter()
    }

    pub fn extend(&mut self, other: Diagnostics) {
        for message in other.messages {
            self.push(message);
        }
    }

    /// Render plainly, one diagnostic per line, without source snippets.
    pub fn render_plain(&self) -> String {
        self.printer().render()
    }

    /// Render with source snippets.
    pub fn render(&self, source: &str) -> String {
        self.printer().source(source).render()
    }

    pub fn render_colored(&self, source: &str, colored: bool) -> String {
        self.printer().source(source).colored(colored).render()
    }

    /// Insert, keeping one diagnostic per start offset (higher priority wins)
    /// and the list sorted by position.
    fn push(&mut self, message: DiagnosticMessage) {
        if let Some(existing) = self
            .messages
            .iter_mut()
            .find(|m| m.span.start == message.span.start)
        {
            if message.kind < existing.kind {
                *existing = message;
            }
            return;
        }
        let at = self
            .messages
            .partition_point(|m| m.span.start <= message.span.start);
        self.messages.insert(at, message);
    }
}

impl<'a> DiagnosticBuilder<'a> {
    /// Append detail to the kind's base message.
    pub fn message(mut self, detail: impl AsRef<str>) -> Self {
        self.message.message = self.message.kind.message(Some(detail.as_ref()));
        self
    }

    pub fn hint(mut self, hint: impl Into<String>) -> Self {
        self.message.hints.push(hint.into());
        self
    }

    pub fn emit(self) {
        self.diagnostics.push(self.message);
    }
}
