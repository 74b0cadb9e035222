use log::warn;

use crate::engine::{EngineContext, MutationEngine};
use crate::types::config::BinaryEngineConfig;
use crate::types::{
    CommandSpec, EngineDetail, EngineKind, Invocation, MutationTarget, OutputPaths,
    RawExecutionArtifact, TargetError, Verdict, VerdictSummary, join_classpath,
};

/// Representations of a harness exiting with -1: signed 8-bit, unsigned
/// 8-bit and unsigned 32-bit wraparound, depending on the OS.
pub const RUNTIME_ERROR_CODES: [i64; 3] = [-1, 255, 4_294_967_295];

/// Map one harness exit code to a verdict. Unknown codes are data, not faults.
pub fn classify_exit(code: Option<i64>) -> Verdict {
    match code {
        Some(0) => Verdict::Survived,
        Some(1) => Verdict::Killed,
        Some(c) if RUNTIME_ERROR_CODES.contains(&c) => Verdict::RuntimeError,
        _ => Verdict::Unparseable,
    }
}

/// Replays the suite once per pre-built mutant artifact; the harness exit
/// code says whether any trace failed.
pub struct BinaryHarnessEngine {
    settings: BinaryEngineConfig,
}

impl BinaryHarnessEngine {
    pub fn new(settings: BinaryEngineConfig) -> Self {
        Self { settings }
    }

    fn classify_artifact(
        &self,
        target: &MutationTarget,
        artifact: &RawExecutionArtifact,
    ) -> (Verdict, Option<String>) {
        let verdict = classify_exit(artifact.exit_code);
        if verdict != Verdict::Unparseable {
            return (verdict, None);
        }
        let snippet = artifact.stderr.lines().next().unwrap_or("").trim();
        warn!(
            "{}: harness for {} returned {:?}, not 0, 1 or -1. Check the runtime and classpath. stderr: {}",
            target.name, artifact.label, artifact.exit_code, snippet
        );
        let message = format!(
            "{}: {}",
            artifact.label,
            TargetError::UnexpectedExitStatus(artifact.exit_code)
        );
        (verdict, Some(message))
    }
}

impl MutationEngine for BinaryHarnessEngine {
    fn name(&self) -> &'static str {
        "Hand"
    }

    fn kind(&self) -> EngineKind {
        EngineKind::Binary
    }

    fn plan(&self, target: &MutationTarget, ctx: &EngineContext) -> Vec<Invocation> {
        target
            .mutants
            .iter()
            .map(|mutant| {
                let label = mutant
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| mutant.to_string_lossy().into_owned());
                let classpath = join_classpath(
                    std::iter::once(mutant.to_string_lossy().into_owned())
                        .chain(ctx.config.classpath.iter().cloned()),
                );
                Invocation {
                    outputs: OutputPaths::for_label(ctx.output_dir, &label),
                    label,
                    command: CommandSpec::new(&ctx.config.program)
                        .arg("-cp")
                        .arg(classpath)
                        .arg(&self.settings.entry_point)
                        .arg(ctx.suite),
                }
            })
            .collect()
    }

    fn classify(
        &self,
        target: &MutationTarget,
        _ctx: &EngineContext,
        artifacts: &[RawExecutionArtifact],
    ) -> VerdictSummary {
        let mut verdicts = Vec::with_capacity(artifacts.len());
        let mut diagnostics = Vec::new();
        for artifact in artifacts {
            let (verdict, note) = self.classify_artifact(target, artifact);
            verdicts.push(verdict);
            diagnostics.extend(note);
        }
        let exit_codes = artifacts.iter().map(|a| a.exit_code).collect();
        VerdictSummary::from_verdicts(verdicts, EngineDetail::Binary { exit_codes })
            .with_diagnostics(diagnostics)
    }
}
