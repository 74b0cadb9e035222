use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Mutation-testing tool family a target is evaluated with.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum EngineKind {
    /// Pre-built mutant artifacts judged by the harness exit code
    Binary,
    /// Whole-target run producing a free-text streaming report
    Streaming,
    /// Whole-target run producing a structured per-mutant report
    Structured,
}

/// One unit under mutation, resolved from configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MutationTarget {
    /// Column label in the results table
    pub name: String,
    /// Fully-qualified class name (package prefix + class)
    pub class_name: String,
    pub engine: EngineKind,
    /// Mutant artifacts, binary harness only. Order is invocation order.
    pub mutants: Vec<PathBuf>,
}

impl MutationTarget {
    /// Number of mutants known before running, if the engine has a fixed list
    pub fn expected_mutants(&self) -> Option<usize> {
        match self.engine {
            EngineKind::Binary => Some(self.mutants.len()),
            EngineKind::Streaming | EngineKind::Structured => None,
        }
    }

    /// Label used in progress lines and artifact names
    pub fn display(&self) -> String {
        format!("{}-{}", self.engine, self.name)
    }
}

/// Expand a mutant artifact pattern such as `scanette-mu{}.jar` for 1..=count.
pub fn expand_mutant_pattern(pattern: &str, count: usize) -> Vec<PathBuf> {
    (1..=count)
        .map(|n| PathBuf::from(pattern.replace("{}", &n.to_string())))
        .collect()
}
