use crate::Span;

/// Diagnostic kinds ordered by priority (highest priority first).
///
/// At most one diagnostic is kept per start offset; on a tie the kind that
/// sorts first wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    // Cascade into everything after them
    UnclosedParen,
    UnclosedBracket,
    UnclosedBrace,

    // User omitted something required
    ExpectedExpression,
    ExpectedName,
    ExpectedToken,

    // User wrote something that doesn't belong
    UnrecognizedInput,
    UnexpectedToken,
    InvalidAssignmentTarget,

    // Evaluation stopped here
    RuntimeError,

    // Valid, but probably not what was meant
    ConstantCondition,
}

impl DiagnosticKind {
    pub fn default_severity(&self) -> Severity {
        match self {
            Self::ConstantCondition => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// Default hint for this kind, automatically included in diagnostics.
    pub fn default_hint(&self) -> Option<&'static str> {
        match self {
            Self::InvalidAssignmentTarget => Some("only names, `a.b`, and `a[b]` can be assigned"),
            Self::ConstantCondition => Some("the branch is never taken; flip the literal to run it"),
            _ => None,
        }
    }

    /// Base message for this kind, used when no custom message is provided.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::UnclosedParen => "missing closing `)`",
            Self::UnclosedBracket => "missing closing `]`",
            Self::UnclosedBrace => "missing closing `}`",

            Self::ExpectedExpression => "expected an expression",
            Self::ExpectedName => "expected a name",
            Self::ExpectedToken => "expected token",

            Self::UnrecognizedInput => "unrecognized input",
            Self::UnexpectedToken => "unexpected token",
            Self::InvalidAssignmentTarget => "invalid assignment target",

            Self::RuntimeError => "evaluation failed",

            Self::ConstantCondition => "condition is constant",
        }
    }

    /// Render the final message: fallback alone, or fallback plus detail.
    pub fn message(&self, detail: Option<&str>) -> String {
        match (self, detail) {
            (_, None) => self.fallback_message().to_string(),
            (Self::RuntimeError, Some(detail)) => detail.to_string(),
            (_, Some(detail)) => format!("{}: {detail}", self.fallback_message()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub(crate) kind: DiagnosticKind,
    pub(crate) span: Span,
    pub(crate) message: String,
    pub(crate) hints: Vec<String>,
}

impl DiagnosticMessage {
    pub(crate) fn new(kind: DiagnosticKind, span: Span, message: impl Into<String>) -> Self {
        Self {
            kind,
            span,
            message: message.into(),
            hints: kind.default_hint().map(str::to_owned).into_iter().collect(),
        }
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn severity(&self) -> Severity {
        self.kind.default_severity()
    }

    pub fn is_error(&self) -> bool {
        self.severity() == Severity::Error
    }

    pub fn is_warning(&self) -> bool {
        self.severity() == Severity::Warning
    }
}

impl std::fmt::Display for DiagnosticMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} at {}..{}: {}",
            self.severity(),
            self.span.start,
            self.span.end,
            self.message
        )?;
        for hint in &self.hints {
            write!(f, " (hint: {})", hint)?;
        }
        Ok(())
    }
}
