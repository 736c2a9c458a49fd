//! Errors that stop script evaluation.

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RuntimeError {
    /// Construction of the factory or an implicit identifier conversion.
    #[error(transparent)]
    Identifier(#[from] sigil_core::Error),

    /// Read or assignment of a name with no binding in scope.
    #[error("{name} is not defined")]
    Reference { name: String },

    /// `let`/`const` name declared twice in one block.
    #[error("Identifier '{name}' has already been declared")]
    Redeclared { name: String },

    /// Execution fuel exhausted (too many evaluation steps).
    #[error("runtime execution limit exceeded")]
    ExecFuelExhausted,

    /// Recursion fuel exhausted (expression nested too deeply).
    #[error("runtime recursion limit exceeded")]
    RecursionLimitExceeded,
}

impl RuntimeError {
    pub(crate) fn type_mismatch(message: impl Into<String>) -> Self {
        Self::Identifier(sigil_core::Error::type_mismatch(message))
    }

    /// Short name of the error class, as shown in the watch log.
    pub fn class(&self) -> &'static str {
        match self {
            Self::Identifier(sigil_core::Error::InvalidConstruction) => "InvalidConstructionError",
            Self::Identifier(sigil_core::Error::TypeMismatch { .. }) => "TypeMismatchError",
            Self::Reference { .. } => "ReferenceError",
            Self::Redeclared { .. } => "SyntaxError",
            Self::ExecFuelExhausted | Self::RecursionLimitExceeded => "RangeError",
        }
    }
}
