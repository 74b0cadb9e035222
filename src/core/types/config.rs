use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::types::target::expand_mutant_pattern;
use crate::types::{AppError, AppResult, EngineKind, MutationTarget};

pub const CONFIG_FILENAME: &str = "mutscore.toml";

pub const DEFAULT_STREAMING_ENTRY_POINT: &str = "com.reeltwo.jumble.Jumble";
pub const DEFAULT_STRUCTURED_ENTRY_POINT: &str =
    "org.pitest.mutationtest.commandline.MutationCoverageReport";
pub const DEFAULT_STRUCTURED_REPORT: &str = "mutations.xml";

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct LogConfig {
    pub level: Option<String>,
    pub color: Option<bool>, // None = auto-detect (semantic)
}

impl LogConfig {
    pub fn level(&self) -> &str {
        self.level.as_deref().unwrap_or("info")
    }

    pub fn color(&self) -> Option<bool> {
        self.color
    }

    pub fn to_effective(&self) -> Self {
        Self {
            level: Some(self.level().to_string()),
            color: self.color,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct RunConfig {
    /// Results table path; always written with a `.csv` extension
    pub output: Option<String>,
    /// File name the harness reads the current suite from
    pub staged_input: Option<String>,
    /// Directory child processes run in (None = current directory)
    pub workdir: Option<String>,
    pub engines: Option<Vec<EngineKind>>, // None = all enabled (semantic)
}

impl RunConfig {
    pub fn output(&self) -> PathBuf {
        PathBuf::from(self.output.as_deref().unwrap_or("results.csv")).with_extension("csv")
    }

    pub fn staged_input(&self) -> &str {
        self.staged_input.as_deref().unwrap_or("tests.csv")
    }

    pub fn is_engine_enabled(&self, kind: EngineKind) -> bool {
        match &self.engines {
            Some(list) => list.contains(&kind),
            None => true,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct RuntimeConfig {
    pub program: Option<String>,
    /// Supporting library locations appended to every classpath
    pub classpath: Option<Vec<String>>,
}

impl RuntimeConfig {
    pub fn program(&self) -> &str {
        self.program.as_deref().unwrap_or("java")
    }

    pub fn classpath(&self) -> &[String] {
        self.classpath.as_deref().unwrap_or(&[])
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct BinaryEngineConfig {
    /// Main class of the trace-replaying harness
    pub entry_point: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct StreamingEngineConfig {
    pub entry_point: Option<String>,
    pub test_class: String,
}

impl StreamingEngineConfig {
    pub fn entry_point(&self) -> &str {
        self.entry_point
            .as_deref()
            .unwrap_or(DEFAULT_STREAMING_ENTRY_POINT)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct StructuredEngineConfig {
    pub entry_point: Option<String>,
    pub test_class: String,
    pub source_dirs: Option<Vec<String>>,
    pub report_file: Option<String>,
}

impl StructuredEngineConfig {
    pub fn entry_point(&self) -> &str {
        self.entry_point
            .as_deref()
            .unwrap_or(DEFAULT_STRUCTURED_ENTRY_POINT)
    }

    pub fn source_dirs(&self) -> &[String] {
        self.source_dirs.as_deref().unwrap_or(&[])
    }

    pub fn report_file(&self) -> &str {
        self.report_file
            .as_deref()
            .unwrap_or(DEFAULT_STRUCTURED_REPORT)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct EnginesConfig {
    pub binary: Option<BinaryEngineConfig>,
    pub streaming: Option<StreamingEngineConfig>,
    pub structured: Option<StructuredEngineConfig>,
}

impl EnginesConfig {
    pub fn is_configured(&self, kind: EngineKind) -> bool {
        match kind {
            EngineKind::Binary => self.binary.is_some(),
            EngineKind::Streaming => self.streaming.is_some(),
            EngineKind::Structured => self.structured.is_some(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ReportConfig {
    /// Graphing command; the results path is appended as the last argument
    pub graph_cmd: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TargetConfig {
    pub name: String,
    pub engine: EngineKind,
    /// Class to mutate; defaults to `name`. Qualified with `package` unless it
    /// already contains a dot.
    pub class: Option<String>,
    pub package: Option<String>,
    pub mutants: Option<Vec<String>>,
    pub mutant_pattern: Option<String>,
    pub mutant_count: Option<usize>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Default package prefix for target and test classes
    pub package: Option<String>,

    pub log: Option<LogConfig>,
    pub run: Option<RunConfig>,
    pub runtime: Option<RuntimeConfig>,
    pub engines: Option<EnginesConfig>,
    pub report: Option<ReportConfig>,
    pub targets: Option<Vec<TargetConfig>>,
}

impl Config {
    pub fn package(&self) -> &str {
        self.package.as_deref().unwrap_or("")
    }

    pub fn log(&self) -> LogConfig {
        self.log.clone().unwrap_or_default()
    }

    pub fn run(&self) -> RunConfig {
        self.run.clone().unwrap_or_default()
    }

    pub fn runtime(&self) -> RuntimeConfig {
        self.runtime.clone().unwrap_or_default()
    }

    pub fn engines(&self) -> EnginesConfig {
        self.engines.clone().unwrap_or_default()
    }

    pub fn targets(&self) -> &[TargetConfig] {
        self.targets.as_deref().unwrap_or(&[])
    }

    pub fn to_effective(&self) -> Self {
        let run = self.run();
        Self {
            package: Some(self.package().to_string()),
            log: Some(self.log().to_effective()),
            run: Some(RunConfig {
                output: Some(run.output().to_string_lossy().to_string()),
                staged_input: Some(run.staged_input().to_string()),
                workdir: run.workdir.clone(),
                engines: run.engines.clone(),
            }),
            runtime: Some(RuntimeConfig {
                program: Some(self.runtime().program().to_string()),
                classpath: Some(self.runtime().classpath().to_vec()),
            }),
            engines: Some(self.engines()),
            report: self.report.clone(),
            targets: Some(self.targets().to_vec()),
        }
    }

    /// Load the nearest config file (or `explicit`), then apply CLI overrides.
    pub fn load(explicit: Option<&Path>, overrides: &CliOverrides) -> AppResult<Self> {
        let mut cfg = match explicit {
            Some(path) => read_config_file(path)?,
            None => match find_nearest_config_file() {
                Some(path) => {
                    debug!("Using config file {}", path.display());
                    read_config_file(&path)?
                }
                None => Config::default(),
            },
        };
        apply_cli_overrides(&mut cfg, overrides)?;
        Ok(cfg)
    }

    /// Check the configuration and produce the immutable value a run is built from.
    pub fn resolve(&self) -> AppResult<ExperimentConfig> {
        let run = self.run();
        let engines = self.engines();
        let mut seen = HashSet::new();
        let mut targets = Vec::new();

        if self.targets().is_empty() {
            return Err(AppError::Configuration(
                "no [[targets]] configured".to_string(),
            ));
        }

        for tc in self.targets() {
            if !seen.insert(tc.name.clone()) {
                return Err(AppError::Configuration(format!(
                    "duplicate target name `{}`",
                    tc.name
                )));
            }
            if !run.is_engine_enabled(tc.engine) {
                debug!("Skipping target {} ({} engine disabled)", tc.name, tc.engine);
                continue;
            }
            if !engines.is_configured(tc.engine) {
                return Err(AppError::Configuration(format!(
                    "target `{}` uses the {} engine but [engines.{}] is missing",
                    tc.name, tc.engine, tc.engine
                )));
            }
            targets.push(self.resolve_target(tc)?);
        }

        if targets.is_empty() {
            return Err(AppError::Configuration(
                "every configured target uses a disabled engine".to_string(),
            ));
        }

        Ok(ExperimentConfig {
            program: self.runtime().program().to_string(),
            classpath: self.runtime().classpath().to_vec(),
            output: run.output(),
            workdir: run.workdir.as_ref().map(PathBuf::from),
            staged_input: run.staged_input().to_string(),
            package: self.package().to_string(),
            engines,
            targets,
            graph_cmd: self.report.as_ref().and_then(|r| r.graph_cmd.clone()),
        })
    }

    fn resolve_target(&self, tc: &TargetConfig) -> AppResult<MutationTarget> {
        let package = tc.package.as_deref().unwrap_or(self.package());
        let class_name = qualify(package, tc.class.as_deref().unwrap_or(&tc.name));

        let mutants = match tc.engine {
            EngineKind::Binary => {
                let mut mutants: Vec<PathBuf> = tc
                    .mutants
                    .iter()
                    .flatten()
                    .map(PathBuf::from)
                    .collect();
                if let Some(pattern) = &tc.mutant_pattern {
                    mutants.extend(expand_mutant_pattern(pattern, tc.mutant_count.unwrap_or(0)));
                }
                if mutants.is_empty() {
                    return Err(AppError::Configuration(format!(
                        "binary target `{}` has zero mutants configured",
                        tc.name
                    )));
                }
                mutants
            }
            EngineKind::Streaming | EngineKind::Structured => Vec::new(),
        };

        Ok(MutationTarget {
            name: tc.name.clone(),
            class_name,
            engine: tc.engine,
            mutants,
        })
    }
}

/// Validated, immutable settings for one experiment run. Built once and
/// passed by reference into the aggregator, runner and engines.
#[derive(Debug, Clone)]
pub struct ExperimentConfig {
    pub program: String,
    pub classpath: Vec<String>,
    pub output: PathBuf,
    pub workdir: Option<PathBuf>,
    pub staged_input: String,
    pub package: String,
    pub engines: EnginesConfig,
    /// Enabled targets in configuration order
    pub targets: Vec<MutationTarget>,
    pub graph_cmd: Option<Vec<String>>,
}

impl ExperimentConfig {
    /// Where the suite under test is staged for harnesses that read a fixed file
    pub fn staged_input_path(&self) -> PathBuf {
        match &self.workdir {
            Some(dir) => dir.join(&self.staged_input),
            None => PathBuf::from(&self.staged_input),
        }
    }

    pub fn qualify(&self, name: &str) -> String {
        qualify(&self.package, name)
    }
}

/// Prefix `name` with `package` unless it is already qualified.
pub fn qualify(package: &str, name: &str) -> String {
    if name.contains('.') || package.is_empty() {
        name.to_string()
    } else if package.ends_with('.') {
        format!("{package}{name}")
    } else {
        format!("{package}.{name}")
    }
}

#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub log_level: Option<String>,
    pub log_color: Option<String>, // "on" | "off"
    pub output: Option<String>,
    pub engines: Option<String>, // csv
}

fn read_config_file(path: &Path) -> AppResult<Config> {
    let contents = fs::read_to_string(path).map_err(|e| {
        AppError::Configuration(format!("cannot read {}: {e}", path.display()))
    })?;
    Ok(toml::from_str::<Config>(&contents)?)
}

fn apply_cli_overrides(cfg: &mut Config, overrides: &CliOverrides) -> AppResult<()> {
    // Log overrides
    let mut log = cfg.log.clone().unwrap_or_default();
    if let Some(level) = &overrides.log_level {
        if !level.trim().is_empty() {
            log.level = Some(level.trim().to_string());
        }
    }
    if let Some(color_str) = &overrides.log_color {
        match color_str.to_lowercase().as_str() {
            "on" => log.color = Some(true),
            "off" => log.color = Some(false),
            _ => {}
        }
    }
    if overrides.log_level.is_some() || overrides.log_color.is_some() {
        cfg.log = Some(log);
    }

    // Run overrides
    let mut run = cfg.run.clone().unwrap_or_default();
    if let Some(output) = &overrides.output {
        run.output = Some(output.clone());
    }
    if let Some(engines_csv) = &overrides.engines {
        let mut kinds = Vec::new();
        for name in parse_csv(engines_csv) {
            let kind = name.parse::<EngineKind>().map_err(|_| {
                AppError::Configuration(format!("unknown engine `{name}` in --engines"))
            })?;
            kinds.push(kind);
        }
        if !kinds.is_empty() {
            run.engines = Some(kinds);
        }
    }
    if overrides.output.is_some() || overrides.engines.is_some() {
        cfg.run = Some(run);
    }
    Ok(())
}

fn parse_csv(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn find_nearest_config_file() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    for dir in cwd.ancestors() {
        let candidate = dir.join(CONFIG_FILENAME);
        if candidate.exists() {
            return Some(candidate);
        }
    }
    // Fall back to the per-user config directory
    let user = dirs_next::config_dir()?.join("mutscore").join(CONFIG_FILENAME);
    user.exists().then_some(user)
}

pub fn colors_enabled(log: &LogConfig) -> bool {
    match log.color() {
        Some(force) => force,
        None => console::colors_enabled(),
    }
}
