use console::style;
use log::info;
use serde::Serialize;

use crate::types::config::Config;
use crate::types::{AppResult, MutationTarget};

#[derive(Serialize)]
struct JsonTargets<'a> {
    targets: &'a [MutationTarget],
}

pub async fn execute(cfg: &Config, format: String) -> AppResult<()> {
    let resolved = cfg.resolve()?;

    if format == "json" {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonTargets {
                targets: &resolved.targets
            })?
        );
        return Ok(());
    }

    for target in &resolved.targets {
        info!("Target: {} ({})", style(&target.name).bold(), target.engine);
        info!("  class: {}", target.class_name);
        if let Some(expected) = target.expected_mutants() {
            let missing = target.mutants.iter().filter(|m| !m.exists()).count();
            let status = if missing == 0 {
                style("all present".to_string()).green()
            } else {
                style(format!("{missing} missing")).red()
            };
            info!("  mutants: {} ({})", expected, status);
        }
    }

    Ok(())
}
