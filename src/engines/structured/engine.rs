use std::fs;
use std::io;
use std::path::PathBuf;

use log::{debug, warn};

use crate::engine::{EngineContext, MutationEngine};
use crate::types::config::StructuredEngineConfig;
use crate::types::{
    CommandSpec, EngineKind, Invocation, MutationTarget, OutputPaths, RawExecutionArtifact,
    TargetError, VerdictSummary, join_classpath,
};

use super::report::{classify_records, parse_report};

/// Runs a mutation-coverage tool over a whole class and reads the XML report
/// it leaves in a per-target report directory.
pub struct StructuredReportEngine {
    settings: StructuredEngineConfig,
}

impl StructuredReportEngine {
    pub fn new(settings: StructuredEngineConfig) -> Self {
        Self { settings }
    }

    pub fn report_dir(&self, target: &MutationTarget, ctx: &EngineContext) -> PathBuf {
        ctx.output_dir.join(format!("pit-{}", target.name))
    }

    pub fn report_path(&self, target: &MutationTarget, ctx: &EngineContext) -> PathBuf {
        self.report_dir(target, ctx)
            .join(self.settings.report_file())
    }
}

impl MutationEngine for StructuredReportEngine {
    fn name(&self) -> &'static str {
        "Pit"
    }

    fn kind(&self) -> EngineKind {
        EngineKind::Structured
    }

    fn requires_staged_input(&self) -> bool {
        true
    }

    fn prepare(&self, target: &MutationTarget, ctx: &EngineContext) -> io::Result<()> {
        let stale = self.report_path(target, ctx);
        match fs::remove_file(&stale) {
            Ok(()) => {
                debug!("Removed stale report {}", stale.display());
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }

    fn plan(&self, target: &MutationTarget, ctx: &EngineContext) -> Vec<Invocation> {
        let report_dir = self.report_dir(target, ctx);
        let command = CommandSpec::new(&ctx.config.program)
            .arg("-cp")
            .arg(join_classpath(&ctx.config.classpath))
            .arg(self.settings.entry_point())
            .arg("--reportDir")
            .arg(report_dir)
            .arg("--targetClasses")
            .arg(&target.class_name)
            .arg("--targetTests")
            .arg(ctx.config.qualify(&self.settings.test_class))
            .arg("--sourceDirs")
            .arg(self.settings.source_dirs().join(","))
            .args(["--outputFormats", "XML"])
            .arg("--timestampedReports=false")
            .arg("--fullMutationMatrix=false");
        let label = format!("pit-{}", target.name);
        vec![Invocation {
            outputs: OutputPaths::for_label(ctx.output_dir, &label),
            label,
            command,
        }]
    }

    fn classify(
        &self,
        target: &MutationTarget,
        ctx: &EngineContext,
        artifacts: &[RawExecutionArtifact],
    ) -> VerdictSummary {
        let Some(artifact) = artifacts.first() else {
            return VerdictSummary::not_measured(format!("{}: tool was not run", target.name));
        };
        if !artifact.success() {
            warn!(
                "{}: {} exited with {:?}; see {}",
                target.name,
                self.name(),
                artifact.exit_code,
                artifact.outputs.stderr.display()
            );
            return VerdictSummary::not_measured(
                TargetError::UnexpectedExitStatus(artifact.exit_code).to_string(),
            );
        }

        let path = self.report_path(target, ctx);
        let xml = match fs::read_to_string(&path) {
            Ok(xml) => xml,
            Err(e) => {
                let err = TargetError::MalformedReport(format!(
                    "cannot read {}: {e}",
                    path.display()
                ));
                warn!("{}: {err}", target.name);
                return VerdictSummary::not_measured(err.to_string());
            }
        };
        match parse_report(&xml) {
            Ok(records) => classify_records(&records),
            Err(err) => {
                warn!("{}: {} in {}", target.name, err, path.display());
                VerdictSummary::not_measured(err.to_string())
            }
        }
    }
}
