use std::ffi::OsString;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// Path separator for Java-style classpaths on this platform
pub const CLASSPATH_SEP: &str = if cfg!(windows) { ";" } else { ":" };

/// Program plus argument vector. Never passed through a shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: OsString,
    pub args: Vec<OsString>,
}

impl CommandSpec {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Human-readable rendering for logs only
    pub fn display(&self) -> String {
        std::iter::once(&self.program)
            .chain(self.args.iter())
            .map(|s| s.to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Join classpath entries with the platform separator.
pub fn join_classpath<I, P>(entries: I) -> String
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    entries
        .into_iter()
        .map(|p| p.as_ref().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join(CLASSPATH_SEP)
}

/// Where an invocation's stdout and stderr are persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputPaths {
    pub stdout: PathBuf,
    pub stderr: PathBuf,
}

impl OutputPaths {
    /// `result_<label>.txt` / `errorFile_<label>.txt` inside `dir`
    pub fn for_label(dir: &Path, label: &str) -> Self {
        Self {
            stdout: dir.join(format!("result_{label}.txt")),
            stderr: dir.join(format!("errorFile_{label}.txt")),
        }
    }
}

/// One planned external call for a target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Mutant artifact name, or target name for whole-target runs
    pub label: String,
    pub command: CommandSpec,
    pub outputs: OutputPaths,
}

/// Captured result of one external invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawExecutionArtifact {
    pub label: String,
    pub stdout: String,
    pub stderr: String,
    /// `None` when the process ended without an exit code (e.g. by signal)
    pub exit_code: Option<i64>,
    pub outputs: OutputPaths,
}

impl RawExecutionArtifact {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}
