use std::io;
use std::path::Path;

use crate::types::config::ExperimentConfig;
use crate::types::{EngineKind, Invocation, MutationTarget, RawExecutionArtifact, VerdictSummary};

/// Everything an engine needs to know about the suite currently being measured
pub struct EngineContext<'a> {
    pub config: &'a ExperimentConfig,
    /// Absolute path of the test-suite file
    pub suite: &'a Path,
    /// Per-suite directory receiving raw artifacts
    pub output_dir: &'a Path,
}

/// Core trait that mutation-testing engine families must provide
pub trait MutationEngine: Send + Sync {
    /// Engine name used in progress lines (e.g., "Jumble")
    fn name(&self) -> &'static str;

    fn kind(&self) -> EngineKind;

    /// Whether the harness reads the suite from the shared staged input file
    fn requires_staged_input(&self) -> bool {
        false
    }

    /// Remove state left by an earlier run that must not be mistaken for new output
    fn prepare(&self, _target: &MutationTarget, _ctx: &EngineContext) -> io::Result<()> {
        Ok(())
    }

    /// External calls needed to measure `target`, in execution order
    fn plan(&self, target: &MutationTarget, ctx: &EngineContext) -> Vec<Invocation>;

    /// Turn the artifacts of a completed plan into verdicts. Never fails:
    /// anything untrustworthy becomes `Unparseable` or a not-measured summary.
    fn classify(
        &self,
        target: &MutationTarget,
        ctx: &EngineContext,
        artifacts: &[RawExecutionArtifact],
    ) -> VerdictSummary;
}
