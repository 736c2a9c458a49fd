//! Sigil: watch scripts for exploring identifiers and the global registry.
//!
//! # Example
//!
//! ```
//! use sigil_lib::Script;
//!
//! let source = r#"
//!     var a = Identifier.for("app");
//!     a === Identifier.for("app");
//! "#;
//!
//! let script = Script::try_from(source).expect("nesting too deep");
//! let evaluation = script.evaluate().expect("script has errors");
//! for watch in &evaluation.watches {
//!     println!("{}: {} ({})", watch.expression, watch.value, watch.type_name);
//! }
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod diagnostics;
pub mod engine;
pub mod parser;
pub mod script;
pub mod span;


pub use diagnostics::{DiagnosticKind, Diagnostics, DiagnosticsPrinter, Severity};
pub use engine::{Evaluation, FuelLimits, Interpreter, RuntimeError, Value, Watch};
pub use script::Script;
pub use span::Span;

/// Errors that stop a script before evaluation begins.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// Recursion fuel exhausted (input nested too deeply).
    #[error("recursion limit exceeded")]
    RecursionLimitExceeded,

    /// Source longer than [`span::MAX_SOURCE_LEN`] bytes.
    #[error("script source too large ({len} bytes)")]
    SourceTooLarge { len: usize },

    #[error("script parsing failed with {} errors", .0.error_count())]
    ParseError(Diagnostics),
}

/// Result type for script operations.
pub type Result<T> = std::result::Result<T, Error>;
