use std::fs;
use std::io::Write;
use std::path::Path;
use std::time::Instant;

use log::{debug, error, info};
use tempfile::NamedTempFile;

use crate::core::executor::execute;
use crate::core::registry::EngineRegistry;
use crate::engine::EngineContext;
use crate::types::config::ExperimentConfig;
use crate::types::{MutationTarget, TargetError, VerdictSummary};

/// Measures one target against one test-suite file.
///
/// Every failure below this point is contained here: callers always get a
/// summary back, possibly a not-measured one.
pub struct TargetRunner<'a> {
    config: &'a ExperimentConfig,
    registry: &'a EngineRegistry,
}

impl<'a> TargetRunner<'a> {
    pub fn new(config: &'a ExperimentConfig, registry: &'a EngineRegistry) -> Self {
        Self { config, registry }
    }

    /// Run `target` and print its progress line.
    pub async fn run(
        &self,
        target: &MutationTarget,
        suite: &Path,
        output_dir: &Path,
    ) -> VerdictSummary {
        let start = Instant::now();
        let engine_name = self
            .registry
            .get(target.engine)
            .map_or("?", |engine| engine.name());

        let summary = match self.try_run(target, suite, output_dir).await {
            Ok(summary) => summary,
            Err(e) => {
                error!(
                    "{}-{}: skipped for {}: {}",
                    engine_name,
                    target.name,
                    suite.display(),
                    e
                );
                VerdictSummary::not_measured(e.to_string())
            }
        };

        let secs = start.elapsed().as_secs_f64();
        if summary.is_measured() {
            info!(
                "{}-{}: score={}/{} [{:.1}s] {}",
                engine_name,
                target.name,
                summary.killed(),
                summary.total(),
                secs,
                summary.result_string()
            );
        } else {
            info!(
                "{}-{}: not measured [{:.1}s] {}",
                engine_name,
                target.name,
                secs,
                summary.diagnostics().join("; ")
            );
        }
        summary
    }

    pub async fn try_run(
        &self,
        target: &MutationTarget,
        suite: &Path,
        output_dir: &Path,
    ) -> Result<VerdictSummary, TargetError> {
        let engine = self
            .registry
            .get(target.engine)
            .ok_or_else(|| TargetError::EngineUnavailable(target.engine.to_string()))?;
        let ctx = EngineContext {
            config: self.config,
            suite,
            output_dir,
        };

        if engine.requires_staged_input() {
            stage_suite(suite, &self.config.staged_input_path())?;
        }
        fs::create_dir_all(output_dir)
            .and_then(|()| engine.prepare(target, &ctx))
            .map_err(|source| TargetError::Prepare {
                dir: output_dir.to_path_buf(),
                source,
            })?;

        let plan = engine.plan(target, &ctx);
        debug!("{}: {} invocation(s) planned", target.display(), plan.len());
        let mut artifacts = Vec::with_capacity(plan.len());
        for invocation in &plan {
            artifacts.push(execute(invocation, self.config.workdir.as_deref()).await?);
        }

        Ok(engine.classify(target, &ctx, &artifacts))
    }
}

/// Copy `suite` over `dest` atomically: the content is written to a sibling
/// temporary file which is then renamed into place, so `dest` is either the
/// old file or the complete new one.
pub fn stage_suite(suite: &Path, dest: &Path) -> Result<(), TargetError> {
    let staging_err = |source: std::io::Error| TargetError::Staging {
        from: suite.to_path_buf(),
        to: dest.to_path_buf(),
        source,
    };
    let parent = match dest.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let contents = fs::read(suite).map_err(staging_err)?;
    let mut tmp = NamedTempFile::new_in(parent).map_err(staging_err)?;
    tmp.write_all(&contents).map_err(staging_err)?;
    tmp.as_file().sync_all().map_err(staging_err)?;
    tmp.persist(dest).map_err(|e| staging_err(e.error))?;
    debug!("Staged {} into {}", suite.display(), dest.display());
    Ok(())
}
