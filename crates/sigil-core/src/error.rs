//! Errors raised by identifier operations.

/// The two error kinds of the identifier model.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The factory was invoked as a construction expression (`new Identifier()`).
    #[error("Identifier is not a constructor")]
    InvalidConstruction,

    /// An identifier reached a position that requires implicit conversion.
    #[error("{message}")]
    TypeMismatch { message: String },
}

impl Error {
    pub fn type_mismatch(message: impl Into<String>) -> Self {
        Self::TypeMismatch {
            message: message.into(),
        }
    }
}

/// Result type for identifier operations.
pub type Result<T> = std::result::Result<T, Error>;
