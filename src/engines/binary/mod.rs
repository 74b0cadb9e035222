pub mod engine;

pub use engine::{BinaryHarnessEngine, RUNTIME_ERROR_CODES, classify_exit};
