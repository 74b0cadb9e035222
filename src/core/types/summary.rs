use serde::Serialize;

use crate::types::verdict::{Verdict, killed_count, render_sequence};

/// A non-killed mutant together with a human-readable description
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SurvivorNote {
    pub identity: String,
    pub description: String,
}

/// Engine-specific facts retained alongside the canonical verdicts.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "engine", rename_all = "snake_case")]
pub enum EngineDetail {
    /// One exit code per mutant invocation, in invocation order.
    Binary { exit_codes: Vec<Option<i64>> },
    /// The verbatim character run scanned from the report, and the engine's own
    /// score line.
    Streaming {
        raw_sequence: String,
        reported_percent: u32,
        reported_killed: usize,
    },
    /// Stable identities for every record, parallel to the verdicts.
    Structured { identities: Vec<String> },
    /// Nothing could be measured for this target.
    Unmeasured,
}

/// Per-target verdicts for one test-suite file.
///
/// Constructed only through [`VerdictSummary::from_verdicts`] or
/// [`VerdictSummary::not_measured`], which keeps `killed` and `total` in step
/// with the verdict sequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerdictSummary {
    verdicts: Vec<Verdict>,
    killed: usize,
    total: usize,
    measured: bool,
    diagnostics: Vec<String>,
    survivors: Vec<SurvivorNote>,
    detail: EngineDetail,
}

impl VerdictSummary {
    pub fn from_verdicts(verdicts: Vec<Verdict>, detail: EngineDetail) -> Self {
        let killed = killed_count(&verdicts);
        let total = verdicts.len();
        Self {
            verdicts,
            killed,
            total,
            measured: true,
            diagnostics: Vec::new(),
            survivors: Vec::new(),
            detail,
        }
    }

    /// Zero/zero summary for a target whose output could not be trusted.
    /// Callers must read this as "not measured", never as "all survived".
    pub fn not_measured(diagnostic: impl Into<String>) -> Self {
        Self {
            verdicts: Vec::new(),
            killed: 0,
            total: 0,
            measured: false,
            diagnostics: vec![diagnostic.into()],
            survivors: Vec::new(),
            detail: EngineDetail::Unmeasured,
        }
    }

    pub fn with_diagnostics(mut self, diagnostics: Vec<String>) -> Self {
        self.diagnostics.extend(diagnostics);
        self
    }

    pub fn with_survivors(mut self, survivors: Vec<SurvivorNote>) -> Self {
        self.survivors = survivors;
        self
    }

    /// Concatenate per-mutant summaries in order, keeping the first detail kind.
    pub fn concat(parts: Vec<VerdictSummary>, detail: EngineDetail) -> Self {
        let mut verdicts = Vec::new();
        let mut diagnostics = Vec::new();
        let mut survivors = Vec::new();
        for part in parts {
            verdicts.extend(part.verdicts);
            diagnostics.extend(part.diagnostics);
            survivors.extend(part.survivors);
        }
        Self::from_verdicts(verdicts, detail)
            .with_diagnostics(diagnostics)
            .with_survivors(survivors)
    }

    pub fn verdicts(&self) -> &[Verdict] {
        &self.verdicts
    }

    pub fn killed(&self) -> usize {
        self.killed
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_measured(&self) -> bool {
        self.measured
    }

    pub fn diagnostics(&self) -> &[String] {
        &self.diagnostics
    }

    pub fn survivors(&self) -> &[SurvivorNote] {
        &self.survivors
    }

    pub fn detail(&self) -> &EngineDetail {
        &self.detail
    }

    /// Canonical symbol string for the verdict sequence
    pub fn result_string(&self) -> String {
        render_sequence(&self.verdicts)
    }
}
