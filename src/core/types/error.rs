use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Configuration(String),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Config file error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("{0}")]
    Custom(String),
}

pub type AppResult<T> = Result<T, AppError>;

/// Failures of the process executor
#[derive(Debug, Error)]
pub enum ExecError {
    #[error("failed to spawn `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("IO error while capturing output: {0}")]
    Io(#[from] io::Error),
}

/// Per-target failures. These never escape the target runner; they are
/// turned into a not-measured summary carrying the message.
#[derive(Debug, Error)]
pub enum TargetError {
    #[error("spawn failure: {0}")]
    SpawnFailure(#[from] ExecError),
    #[error("could not stage {} into {}: {source}", from.display(), to.display())]
    Staging {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not clear previous output in {}: {source}", dir.display())]
    Prepare {
        dir: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("unexpected exit status {0:?}")]
    UnexpectedExitStatus(Option<i64>),
    #[error("malformed report: {0}")]
    MalformedReport(String),
    #[error("engine `{0}` is not enabled in this run")]
    EngineUnavailable(String),
}
