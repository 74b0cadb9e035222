use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Utc;
use log::{debug, error, info, warn};

use crate::core::registry::EngineRegistry;
use crate::core::runner::TargetRunner;
use crate::core::store::{ResultStore, SuiteReport, TargetReport, write_suite_summary};
use crate::types::config::ExperimentConfig;
use crate::types::{AppError, AppResult, ExperimentRow, Hash, TargetCell, VerdictSummary, count_events};

/// Directory receiving the raw artifacts of one suite: the suite path with
/// its extension removed, or `<name>.out` when it has none.
pub fn output_directory(suite: &Path) -> PathBuf {
    if suite.extension().is_some() {
        suite.with_extension("")
    } else {
        let mut name = suite.as_os_str().to_os_string();
        name.push(".out");
        PathBuf::from(name)
    }
}

/// Row plus the per-target summaries it was summed from
#[derive(Debug, Clone)]
pub struct SuiteOutcome {
    pub row: ExperimentRow,
    pub summaries: Vec<VerdictSummary>,
}

impl SuiteOutcome {
    /// Number of targets that could not be measured for this suite
    pub fn unmeasured(&self) -> usize {
        self.summaries.iter().filter(|s| !s.is_measured()).count()
    }
}

/// Runs every enabled target over each test-suite file, in order.
pub struct Aggregator<'a> {
    config: &'a ExperimentConfig,
    registry: &'a EngineRegistry,
    running: Arc<AtomicBool>,
}

impl<'a> Aggregator<'a> {
    pub fn new(
        config: &'a ExperimentConfig,
        registry: &'a EngineRegistry,
        running: Arc<AtomicBool>,
    ) -> Self {
        Self {
            config,
            registry,
            running,
        }
    }

    /// Measure one suite against every target and build its row.
    pub async fn run_suite(&self, suite: &Path) -> AppResult<SuiteOutcome> {
        let contents = fs::read(suite).map_err(|e| {
            AppError::Configuration(format!("cannot read test suite {}: {e}", suite.display()))
        })?;
        let events = count_events(&String::from_utf8_lossy(&contents));
        let fingerprint = Hash::digest(&contents);
        let absolute = std::path::absolute(suite)?;
        let output_dir = output_directory(&absolute);
        fs::create_dir_all(&output_dir)?;
        info!(
            "Testing {} -- full output is in {}/*",
            suite.display(),
            output_dir.display()
        );
        debug!("{}: {} events, sha256 {}", suite.display(), events, fingerprint.short());

        let started_at = Utc::now();
        let runner = TargetRunner::new(self.config, self.registry);
        let mut cells = Vec::with_capacity(self.config.targets.len());
        let mut summaries = Vec::with_capacity(self.config.targets.len());
        for target in &self.config.targets {
            let summary = runner.run(target, &absolute, &output_dir).await;
            cells.push(TargetCell {
                name: target.name.clone(),
                killed: summary.killed(),
                total: summary.total(),
                measured: summary.is_measured(),
            });
            summaries.push(summary);
        }

        let row = ExperimentRow::build(suite.to_path_buf(), events, fingerprint, cells)?;
        match row.percent {
            Some(percent) => info!(
                "{}: {}/{} killed ({:.2}%)",
                suite.display(),
                row.killed,
                row.total,
                percent
            ),
            None => error!(
                "{}: no target could be measured, row kept as not measured",
                suite.display()
            ),
        }

        let report = SuiteReport {
            row: &row,
            targets: self
                .config
                .targets
                .iter()
                .zip(&summaries)
                .map(|(target, summary)| TargetReport {
                    target: &target.name,
                    engine: self
                        .registry
                        .get(target.engine)
                        .map_or("?", |engine| engine.name()),
                    summary,
                })
                .collect(),
            started_at,
            finished_at: Utc::now(),
        };
        if let Err(e) = write_suite_summary(&output_dir, &report) {
            warn!("Could not write summary for {}: {e}", suite.display());
        }

        Ok(SuiteOutcome { row, summaries })
    }

    /// Measure each suite in order, appending its row to `store` as soon as
    /// it is complete. Stops between suites once the running flag is cleared.
    pub async fn run_all(
        &self,
        suites: &[PathBuf],
        store: &ResultStore,
    ) -> AppResult<Vec<ExperimentRow>> {
        let mut rows = Vec::with_capacity(suites.len());
        for suite in suites {
            if !self.running.load(Ordering::SeqCst) {
                warn!(
                    "Run interrupted, {} of {} suite(s) measured",
                    rows.len(),
                    suites.len()
                );
                break;
            }
            let outcome = self.run_suite(suite).await?;
            let unmeasured = outcome.unmeasured();
            if unmeasured > 0 && outcome.row.is_measured() {
                warn!(
                    "{}: {} of {} target(s) not measured",
                    suite.display(),
                    unmeasured,
                    outcome.summaries.len()
                );
            }
            store.append(&outcome.row)?;
            rows.push(outcome.row);
        }
        Ok(rows)
    }
}
