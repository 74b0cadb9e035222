use std::fs;

use console::style;
use log::info;

use crate::core::cli::ClassifyArgs;
use crate::engines::binary::classify_exit;
use crate::engines::streaming::classify_report;
use crate::engines::structured::{classify_records, parse_report};
use crate::types::{AppError, AppResult, EngineDetail, VerdictSummary};

pub async fn execute_classify(args: ClassifyArgs) -> AppResult<()> {
    let (summary, format) = match args {
        ClassifyArgs::Binary(args) => {
            let verdicts = args.codes.iter().map(|&c| classify_exit(Some(c))).collect();
            let exit_codes = args.codes.iter().map(|&c| Some(c)).collect();
            (
                VerdictSummary::from_verdicts(verdicts, EngineDetail::Binary { exit_codes }),
                args.format,
            )
        }
        ClassifyArgs::Streaming(args) => {
            let text = read_report(&args.file)?;
            (classify_report(&text), args.format)
        }
        ClassifyArgs::Structured(args) => {
            let xml = read_report(&args.file)?;
            let records =
                parse_report(&xml).map_err(|e| AppError::Custom(format!("{}: {e}", args.file)))?;
            (classify_records(&records), args.format)
        }
    };

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    if summary.is_measured() {
        info!(
            "score={}/{} {}",
            summary.killed(),
            summary.total(),
            summary.result_string()
        );
    } else {
        info!("{}", style("not measured").red());
    }
    for diagnostic in summary.diagnostics() {
        info!("  {}", style(diagnostic).yellow());
    }
    for survivor in summary.survivors() {
        info!("  {} {}", style(&survivor.identity).bold(), survivor.description);
    }
    Ok(())
}

fn read_report(path: &str) -> AppResult<String> {
    let bytes = fs::read(path)
        .map_err(|e| AppError::Configuration(format!("cannot read report {path}: {e}")))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
