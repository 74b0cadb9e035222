//! Structured (XML) mutation report: one `<mutation>` record per mutant.
//!
//! ```xml
//! <mutations>
//!   <mutation detected='true' status='KILLED' numberOfTestsRun='3'>
//!     <sourceFile>Scanette.java</sourceFile>
//!     <mutatedClass>fr.ufc.l3info.oprog.Scanette</mutatedClass>
//!     <mutatedMethod>scanner</mutatedMethod>
//!     <lineNumber>42</lineNumber>
//!     <mutator>...NegateConditionalsMutator</mutator>
//!     <description>negated conditional</description>
//!   </mutation>
//! </mutations>
//! ```

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::types::{EngineDetail, SurvivorNote, TargetError, Verdict, VerdictSummary};

#[derive(Debug, Deserialize)]
struct MutationsDoc {
    #[serde(rename = "mutation", default)]
    mutations: Vec<MutationRecord>,
}

/// One record of the report. Elements not listed here are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MutationRecord {
    #[serde(rename = "@status")]
    pub status: String,
    #[serde(rename = "mutatedClass")]
    pub mutated_class: String,
    #[serde(rename = "lineNumber")]
    pub line_number: u32,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "mutatedMethod", default)]
    pub mutated_method: Option<String>,
    #[serde(default)]
    pub mutator: Option<String>,
}

/// Parse the report, keeping records in document order.
pub fn parse_report(xml: &str) -> Result<Vec<MutationRecord>, TargetError> {
    let doc: MutationsDoc = quick_xml::de::from_str(xml)
        .map_err(|e| TargetError::MalformedReport(format!("invalid XML report: {e}")))?;
    Ok(doc.mutations)
}

/// Status label lookup. Labels outside the table are kept as `Unparseable`.
pub fn status_verdict(label: &str) -> Verdict {
    match label {
        "KILLED" => Verdict::Killed,
        "SURVIVED" => Verdict::Survived,
        "NO_COVERAGE" => Verdict::NoCoverage,
        "TIMED_OUT" => Verdict::TimedOut,
        "MEMORY_ERROR" => Verdict::MemoryError,
        "RUN_ERROR" => Verdict::RuntimeError,
        _ => Verdict::Unparseable,
    }
}

/// `<class>:<line, 4 digits>:<position, 3 digits>`
pub fn mutant_identity(class: &str, line: u32, position: usize) -> String {
    format!("{class}:{line:04}:{position:03}")
}

/// Turn report records into verdicts and stable identities.
///
/// The position part of an identity counts earlier records on the same
/// class and line in document order, so the same report always yields the
/// same identities.
pub fn classify_records(records: &[MutationRecord]) -> VerdictSummary {
    let mut seen: BTreeMap<(&str, u32), usize> = BTreeMap::new();
    let mut verdicts = Vec::with_capacity(records.len());
    let mut identities = Vec::with_capacity(records.len());
    let mut survivors = Vec::new();

    for record in records {
        let position = seen
            .entry((record.mutated_class.as_str(), record.line_number))
            .or_insert(0);
        let identity = mutant_identity(&record.mutated_class, record.line_number, *position);
        *position += 1;

        let verdict = status_verdict(&record.status);
        if !verdict.counts_as_killed() {
            survivors.push(SurvivorNote {
                identity: identity.clone(),
                description: record.description.clone(),
            });
        }
        verdicts.push(verdict);
        identities.push(identity);
    }

    let unknown: Vec<String> = records
        .iter()
        .filter(|r| status_verdict(&r.status) == Verdict::Unparseable)
        .map(|r| format!("unknown mutation status `{}`", r.status))
        .collect();

    VerdictSummary::from_verdicts(verdicts, EngineDetail::Structured { identities })
        .with_survivors(survivors)
        .with_diagnostics(unknown)
}
