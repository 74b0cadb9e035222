use std::path::PathBuf;

use serde::Serialize;

use crate::types::{AppError, AppResult, Hash};

/// Killed/total for one target within a row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetCell {
    pub name: String,
    pub killed: usize,
    pub total: usize,
    pub measured: bool,
}

/// One line of the results table, one per test-suite file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExperimentRow {
    pub suite: PathBuf,
    pub events: usize,
    pub fingerprint: Hash,
    pub cells: Vec<TargetCell>,
    pub killed: usize,
    pub total: usize,
    /// Rounded to 2 decimals, `None` when no target could be measured
    pub percent: Option<f64>,
}

impl ExperimentRow {
    /// Sum the per-target cells into a row.
    ///
    /// A zero total is a configuration problem when some target was measured
    /// and produced no mutants. When every target failed instead, the row is
    /// kept as not measured so the remaining suites still run.
    pub fn build(
        suite: PathBuf,
        events: usize,
        fingerprint: Hash,
        cells: Vec<TargetCell>,
    ) -> AppResult<Self> {
        let killed: usize = cells.iter().map(|c| c.killed).sum();
        let total: usize = cells.iter().map(|c| c.total).sum();
        let percent = if total > 0 {
            Some(round2(100.0 * killed as f64 / total as f64))
        } else if cells.iter().all(|c| !c.measured) {
            None
        } else {
            return Err(AppError::Configuration(format!(
                "targets yielded zero mutants for {} ({} target(s) configured)",
                suite.display(),
                cells.len()
            )));
        };
        Ok(Self {
            suite,
            events,
            fingerprint,
            cells,
            killed,
            total,
            percent,
        })
    }

    pub fn is_measured(&self) -> bool {
        self.percent.is_some()
    }
}

/// Round to two decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Number of non-blank lines, the suite's "Events" metric
pub fn count_events(text: &str) -> usize {
    text.lines().filter(|line| !line.trim().is_empty()).count()
}
