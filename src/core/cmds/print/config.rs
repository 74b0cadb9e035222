use log::info;

use crate::types::AppResult;
use crate::types::config::Config;

pub async fn execute(cfg: &Config, format: String) -> AppResult<()> {
    let effective_config = cfg.to_effective();

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&effective_config)?);
        return Ok(());
    }

    info!("Effective Configuration:");
    info!("");
    info!("Global:");
    info!("  package: {}", effective_config.package());

    let log = effective_config.log();
    info!("");
    info!("Log:");
    info!("  level: {}", log.level());
    match log.color() {
        Some(true) => info!("  color: on"),
        Some(false) => info!("  color: off"),
        None => info!("  color: auto"),
    }

    let run = effective_config.run();
    info!("");
    info!("Run:");
    info!("  output: {}", run.output().display());
    info!("  staged_input: {}", run.staged_input());
    match &run.workdir {
        Some(dir) => info!("  workdir: {}", dir),
        None => info!("  workdir: (current directory)"),
    }
    match &run.engines {
        Some(engines) => info!(
            "  engines: [{}]",
            engines
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        ),
        None => info!("  engines: all enabled"),
    }

    let runtime = effective_config.runtime();
    info!("");
    info!("Runtime:");
    info!("  program: {}", runtime.program());
    if runtime.classpath().is_empty() {
        info!("  classpath: []");
    } else {
        info!("  classpath:");
        for entry in runtime.classpath() {
            info!("    - {}", entry);
        }
    }

    let engines = effective_config.engines();
    info!("");
    info!("Engines:");
    if let Some(binary) = &engines.binary {
        info!("  binary: {}", binary.entry_point);
    }
    if let Some(streaming) = &engines.streaming {
        info!(
            "  streaming: {} (tests: {})",
            streaming.entry_point(),
            streaming.test_class
        );
    }
    if let Some(structured) = &engines.structured {
        info!(
            "  structured: {} (tests: {}, report: {})",
            structured.entry_point(),
            structured.test_class,
            structured.report_file()
        );
    }

    if let Some(graph_cmd) = effective_config.report.as_ref().and_then(|r| r.graph_cmd.as_ref()) {
        info!("");
        info!("Report:");
        info!("  graph_cmd: {}", graph_cmd.join(" "));
    }

    info!("");
    info!("Targets: {}", effective_config.targets().len());

    Ok(())
}
