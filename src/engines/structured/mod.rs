pub mod engine;
pub mod report;

pub use engine::StructuredReportEngine;
pub use report::{MutationRecord, classify_records, mutant_identity, parse_report, status_verdict};
