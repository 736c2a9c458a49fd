//! Watch-script evaluation.

pub mod error;
pub mod heap;
pub mod interpreter;
pub mod value;
pub mod watch;

#[cfg(test)]
mod interpreter_tests;

pub use error::RuntimeError;
pub use heap::{Heap, HeapObject, ObjectKind};
pub use interpreter::{DEFAULT_EXEC_FUEL, DEFAULT_RECURSION_FUEL, FuelLimits, Interpreter};
pub use value::{Builtin, ObjectId, Value};
pub use watch::{Evaluation, Watch};
