pub mod engine;
pub mod scanner;

pub use engine::{StreamingReportEngine, classify_report};
