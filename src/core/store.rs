use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde::Serialize;
use tokio::process::Command;

use crate::types::{AppError, AppResult, ExperimentRow, MutationTarget, VerdictSummary};

pub const SUMMARY_FILENAME: &str = "summary.json";

/// Written in place of a figure that could not be measured
pub const NOT_MEASURED: &str = "NA";

/// Append-only results table, one CSV row per test-suite file.
///
/// Opening the store truncates the file and writes the header. Each row is
/// flushed as soon as it is appended, so an interrupted run keeps every row
/// completed before the interruption.
pub struct ResultStore {
    path: PathBuf,
    columns: usize,
}

impl ResultStore {
    pub fn create(path: &Path, targets: &[MutationTarget]) -> AppResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let mut file = File::create(path)?;
        let header = header_fields(targets);
        writeln!(file, "{}", csv_line(&header))?;
        file.flush()?;
        debug!("Results table {} opened", path.display());
        Ok(Self {
            path: path.to_path_buf(),
            columns: header.len(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, row: &ExperimentRow) -> AppResult<()> {
        let fields = row_fields(row);
        if fields.len() != self.columns {
            return Err(AppError::Custom(format!(
                "row for {} has {} columns, table has {}",
                row.suite.display(),
                fields.len(),
                self.columns
            )));
        }
        let mut file = OpenOptions::new().append(true).open(&self.path)?;
        writeln!(file, "{}", csv_line(&fields))?;
        file.flush()?;
        Ok(())
    }
}

pub fn header_fields(targets: &[MutationTarget]) -> Vec<String> {
    let mut fields = vec!["Suite".to_string(), "Events".to_string()];
    fields.extend(targets.iter().map(|t| t.name.clone()));
    fields.extend(["TotalKilled", "TotalMutants", "Percent"].map(String::from));
    fields
}

pub fn row_fields(row: &ExperimentRow) -> Vec<String> {
    let mut fields = vec![row.suite.display().to_string(), row.events.to_string()];
    fields.extend(row.cells.iter().map(|c| {
        if c.measured {
            c.killed.to_string()
        } else {
            NOT_MEASURED.to_string()
        }
    }));
    fields.push(row.killed.to_string());
    fields.push(row.total.to_string());
    fields.push(row.percent.map_or_else(|| NOT_MEASURED.to_string(), |p| format!("{p:.2}")));
    fields
}

fn csv_line(fields: &[String]) -> String {
    fields
        .iter()
        .map(|f| csv_field(f))
        .collect::<Vec<_>>()
        .join(",")
}

fn csv_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Per-target entry of a suite summary
#[derive(Debug, Serialize)]
pub struct TargetReport<'a> {
    pub target: &'a str,
    pub engine: &'a str,
    #[serde(flatten)]
    pub summary: &'a VerdictSummary,
}

/// Everything measured for one suite, written next to its raw artifacts
#[derive(Debug, Serialize)]
pub struct SuiteReport<'a> {
    pub row: &'a ExperimentRow,
    pub targets: Vec<TargetReport<'a>>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

pub fn write_suite_summary(output_dir: &Path, report: &SuiteReport) -> AppResult<PathBuf> {
    fs::create_dir_all(output_dir)?;
    let path = output_dir.join(SUMMARY_FILENAME);
    let json = serde_json::to_string_pretty(report)?;
    fs::write(&path, json)?;
    Ok(path)
}

/// Run the configured graphing command with the results table as its last
/// argument. Failures are reported but never fail the run.
pub async fn trigger_graph(graph_cmd: &[String], results: &Path) {
    let Some((program, args)) = graph_cmd.split_first() else {
        return;
    };
    info!("Graphing {} with {}", results.display(), program);
    match Command::new(program).args(args).arg(results).status().await {
        Ok(status) if status.success() => {}
        Ok(status) => warn!("Graph command exited with {:?}", status.code()),
        Err(e) => warn!("Could not run graph command `{program}`: {e}"),
    }
}
