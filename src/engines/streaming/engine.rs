use log::warn;

use crate::engine::{EngineContext, MutationEngine};
use crate::types::config::StreamingEngineConfig;
use crate::types::{
    CommandSpec, EngineDetail, EngineKind, Invocation, MutationTarget, OutputPaths,
    RawExecutionArtifact, TargetError, VerdictSummary, join_classpath,
};

use super::scanner::scan;

/// Classify the full text of one streaming report.
///
/// A report whose result count does not match its announcement, or that
/// lacks its score line, yields a not-measured summary carrying the reason.
/// When the report's own score
/// disagrees with the scanned sequence, the sequence wins and the engine's
/// figure is kept in the detail.
pub fn classify_report(text: &str) -> VerdictSummary {
    let report = match scan(text) {
        Ok(report) => report,
        Err(e) => return VerdictSummary::not_measured(e.to_string()),
    };

    let summary = VerdictSummary::from_verdicts(
        report.verdicts(),
        EngineDetail::Streaming {
            raw_sequence: report.raw_sequence.clone(),
            reported_percent: report.reported_percent,
            reported_killed: report.reported_killed(),
        },
    );

    let reported = report.reported_killed();
    if reported != summary.killed() {
        warn!(
            "Score line says {}% of {} (~{} killed) but the result sequence has {} killed; using {}",
            report.reported_percent,
            report.total,
            reported,
            summary.killed(),
            summary.killed()
        );
    }

    summary.with_diagnostics(report.diagnostics)
}

/// Runs the mutation tool once over a whole class and reads its streaming
/// text report from stdout.
pub struct StreamingReportEngine {
    settings: StreamingEngineConfig,
}

impl StreamingReportEngine {
    pub fn new(settings: StreamingEngineConfig) -> Self {
        Self { settings }
    }
}

impl MutationEngine for StreamingReportEngine {
    fn name(&self) -> &'static str {
        "Jumble"
    }

    fn kind(&self) -> EngineKind {
        EngineKind::Streaming
    }

    fn requires_staged_input(&self) -> bool {
        true
    }

    fn plan(&self, target: &MutationTarget, ctx: &EngineContext) -> Vec<Invocation> {
        let command = CommandSpec::new(&ctx.config.program)
            .arg("-cp")
            .arg(join_classpath(&ctx.config.classpath))
            .arg(self.settings.entry_point())
            .arg(&target.class_name)
            .arg(ctx.config.qualify(&self.settings.test_class));
        vec![Invocation {
            label: target.name.clone(),
            command,
            outputs: OutputPaths::for_label(ctx.output_dir, &target.name),
        }]
    }

    fn classify(
        &self,
        target: &MutationTarget,
        _ctx: &EngineContext,
        artifacts: &[RawExecutionArtifact],
    ) -> VerdictSummary {
        let Some(artifact) = artifacts.first() else {
            return VerdictSummary::not_measured(format!("{}: no report captured", target.name));
        };
        if !artifact.success() {
            let snippet = artifact.stderr.lines().next().unwrap_or("").trim();
            warn!(
                "{}: {} exited with {:?}; ignoring report in {} (stderr: {})",
                target.name,
                self.name(),
                artifact.exit_code,
                artifact.outputs.stdout.display(),
                snippet
            );
            return VerdictSummary::not_measured(
                TargetError::UnexpectedExitStatus(artifact.exit_code).to_string(),
            );
        }

        let summary = classify_report(&artifact.stdout);
        if !summary.is_measured() {
            warn!(
                "{}: could not read results from {}: {}",
                target.name,
                artifact.outputs.stdout.display(),
                summary.diagnostics().join("; ")
            );
        }
        summary
    }
}
