use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use log::{debug, info, warn};

use crate::core::aggregator::Aggregator;
use crate::core::cli::RunArgs;
use crate::core::registry::EngineRegistry;
use crate::core::store::{ResultStore, trigger_graph};
use crate::types::config::ExperimentConfig;
use crate::types::{AppError, AppResult, ExperimentRow};

/// Expand suite arguments in order. Arguments containing glob characters are
/// expanded and sorted; anything else is taken literally.
pub fn expand_suites(patterns: &[String]) -> AppResult<Vec<PathBuf>> {
    let mut suites = Vec::new();
    for pattern in patterns {
        if !pattern.contains(['*', '?', '[']) {
            suites.push(PathBuf::from(pattern));
            continue;
        }
        let paths = glob::glob(pattern)
            .map_err(|e| AppError::Configuration(format!("bad pattern `{pattern}`: {e}")))?;
        let mut matched: Vec<PathBuf> = paths.filter_map(Result::ok).collect();
        if matched.is_empty() {
            return Err(AppError::Configuration(format!(
                "no test-suite file matches `{pattern}`"
            )));
        }
        matched.sort();
        suites.extend(matched);
    }
    Ok(suites)
}

pub async fn execute_run(
    args: RunArgs,
    config: &ExperimentConfig,
    running: Arc<AtomicBool>,
) -> AppResult<Vec<ExperimentRow>> {
    let suites = expand_suites(&args.suites)?;
    let registry = EngineRegistry::from_config(config);
    info!(
        "Measuring {} suite(s) against {} target(s) with {}",
        suites.len(),
        config.targets.len(),
        registry.all_engines().join(", ")
    );
    if registry.any_requires_staging() {
        debug!("Suites are staged into {}", config.staged_input_path().display());
    }

    let store = ResultStore::create(&config.output, &config.targets)?;
    let aggregator = Aggregator::new(config, &registry, running);
    let rows = aggregator.run_all(&suites, &store).await?;

    info!(
        "Wrote {} row(s) to {}",
        rows.len(),
        store.path().display()
    );
    if rows.iter().any(|row| row.cells.iter().any(|c| !c.measured)) {
        warn!("Some targets were not measured; see the diagnostics above");
    }

    if let Some(graph_cmd) = &config.graph_cmd {
        if !rows.is_empty() {
            trigger_graph(graph_cmd, store.path()).await;
        }
    }

    Ok(rows)
}
