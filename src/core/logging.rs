use std::str::FromStr;

use console::style;
use log::{Level, LevelFilter};

use crate::types::config::{LogConfig, colors_enabled};

/// Parse a level name, falling back to `Info` for anything unrecognised.
pub fn parse_level(level: &str) -> LevelFilter {
    LevelFilter::from_str(level.trim()).unwrap_or(LevelFilter::Info)
}

fn prefix(level: Level) -> Option<String> {
    match level {
        Level::Info => None,
        Level::Error => Some(style("error").red().bold().to_string()),
        Level::Warn => Some(style("warn").yellow().bold().to_string()),
        Level::Debug => Some(style("debug").blue().to_string()),
        Level::Trace => Some(style("trace").dim().to_string()),
    }
}

/// Install the global logger. Info lines are printed bare so progress output
/// reads as plain text; other levels carry a styled prefix. Everything goes
/// to stderr except info, which goes to stdout.
pub fn init_logging(log: &LogConfig) {
    console::set_colors_enabled(colors_enabled(log));
    console::set_colors_enabled_stderr(colors_enabled(log));

    let level = parse_level(log.level());
    let result = fern::Dispatch::new()
        .level(level)
        // Keep dependency chatter out of the progress output
        .level_for("tokio", LevelFilter::Warn)
        .chain(
            fern::Dispatch::new()
                .filter(|meta| meta.level() == Level::Info)
                .format(|out, message, _record| out.finish(format_args!("{message}")))
                .chain(std::io::stdout()),
        )
        .chain(
            fern::Dispatch::new()
                .filter(|meta| meta.level() != Level::Info)
                .format(|out, message, record| match prefix(record.level()) {
                    Some(prefix) => out.finish(format_args!("{prefix}: {message}")),
                    None => out.finish(format_args!("{message}")),
                })
                .chain(std::io::stderr()),
        )
        .apply();

    if result.is_err() {
        // A logger is already installed (e.g. a second call in tests)
        log::debug!("Logger already initialized");
    }
}
