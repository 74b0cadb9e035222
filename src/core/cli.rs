use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// All relative paths will be interpreted relative to this directory.
    /// All child processes will be run in this directory unless [run].workdir is set.
    #[arg(long, global = true)]
    pub cwd: Option<String>,

    /// Config file to use instead of the nearest mutscore.toml
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Logging level (overrides config). One of: trace, debug, info, warn, error
    #[arg(long = "log.level", global = true)]
    pub log_level: Option<String>,

    /// Logging color control: "on" to force colors, "off" to disable; omit for auto
    #[arg(long = "log.color", global = true)]
    pub log_color: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write an example mutscore.toml into the current directory
    Init,

    /// Measure the mutation score of one or more test-suite files
    Run(RunArgs),

    /// Classify saved engine output without running anything
    Classify {
        #[command(subcommand)]
        command: ClassifyArgs,
    },

    /// Print the effective configuration or the resolved targets
    Print {
        #[command(subcommand)]
        command: PrintArgs,
    },
}

/// Arguments for the run command
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Test-suite file(s), one results row each, in the order given.
    /// Glob patterns are expanded (sorted) when the shell did not.
    #[arg(value_name = "SUITE", required = true)]
    pub suites: Vec<String>,

    /// Results table path; a .csv extension is always used.
    /// Replaces config [run].output if provided.
    #[arg(long)]
    pub out: Option<String>,

    /// Comma-separated engines to enable (binary, streaming, structured).
    /// Targets of other engines are skipped.
    /// Replaces config [run].engines if provided.
    #[arg(long)]
    pub engines: Option<String>,
}

/// Arguments for the classify subcommands
#[derive(Subcommand, Debug)]
pub enum ClassifyArgs {
    /// Classify harness exit codes, one per mutant in order
    Binary(ClassifyBinaryArgs),

    /// Classify a saved streaming text report
    Streaming(ClassifyFileArgs),

    /// Classify a saved structured XML report
    Structured(ClassifyFileArgs),
}

#[derive(Parser, Debug)]
pub struct ClassifyBinaryArgs {
    /// Exit codes (e.g. 0 1 1 255)
    #[arg(value_name = "CODE", required = true, allow_negative_numbers = true)]
    pub codes: Vec<i64>,

    /// Output format: "table" (default) or "json"
    #[arg(long, default_value = "table")]
    pub format: String,
}

#[derive(Parser, Debug)]
pub struct ClassifyFileArgs {
    /// Report file to read
    #[arg(value_name = "FILE")]
    pub file: String,

    /// Output format: "table" (default) or "json"
    #[arg(long, default_value = "table")]
    pub format: String,
}

/// Arguments for the print command
#[derive(Subcommand, Debug)]
pub enum PrintArgs {
    /// Print the effective configuration
    Config(PrintConfigArgs),

    /// List the resolved targets in results-column order
    Targets(PrintTargetsArgs),
}

/// Arguments for the print config subcommand
#[derive(Parser, Debug)]
pub struct PrintConfigArgs {
    /// Output format: "table" (default) or "json"
    #[arg(long, default_value = "table")]
    pub format: String,
}

/// Arguments for the print targets subcommand
#[derive(Parser, Debug)]
pub struct PrintTargetsArgs {
    /// Output format: "table" (default) or "json"
    #[arg(long, default_value = "table")]
    pub format: String,
}
