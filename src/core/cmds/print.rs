use crate::types::AppResult;
use crate::types::config::Config;

pub mod config;
pub mod targets;

pub enum PrintCommand {
    Config(String),
    Targets(String),
}

pub async fn execute_print(command: PrintCommand, cfg: &Config) -> AppResult<()> {
    match command {
        PrintCommand::Config(format) => config::execute(cfg, format).await,
        PrintCommand::Targets(format) => targets::execute(cfg, format).await,
    }
}
