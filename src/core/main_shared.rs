use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use clap::Parser;
use log::{debug, warn};

use crate::core::cli::{Args, Commands, PrintArgs};
use crate::core::cmds;
use crate::core::logging::init_logging;
use crate::types::config::{CliOverrides, Config};
use crate::types::{AppError, AppResult};

/// Exit code used when a run stops early because of Ctrl-C
pub const EXIT_INTERRUPTED: i32 = 2;

pub async fn run_main() -> AppResult<()> {
    let args = Args::parse();

    // Handle global arguments
    if let Some(cwd_arg) = args.cwd.as_ref() {
        let cwd = PathBuf::from(cwd_arg).canonicalize()?;
        env::set_current_dir(&cwd)?;
    }

    // Build CLI overrides for config precedence
    let mut cli_overrides = CliOverrides {
        log_level: args.log_level.clone(),
        log_color: args.log_color.clone(),
        ..Default::default()
    };
    if let Commands::Run(run_args) = &args.command {
        cli_overrides.output = run_args.out.clone();
        cli_overrides.engines = run_args.engines.clone();
    }

    let config_path = args.config.as_ref().map(PathBuf::from);
    let cfg = Config::load(config_path.as_deref(), &cli_overrides)?;

    // Initialize logging after config so level/color are applied
    init_logging(&cfg.log());
    debug!("Current working directory: {}", env::current_dir()?.display());

    // Setup running flag to handle signals from ctrl-c
    let running = Arc::new(AtomicBool::new(true));
    let running_ctrlc = Arc::clone(&running);
    ctrlc::set_handler(move || {
        warn!("Received Ctrl-C, finishing the current suite..");
        running_ctrlc.store(false, Ordering::SeqCst);
    })
    .map_err(|e| AppError::Custom(format!("Error creating a Ctrl-C handler: {e}")))?;

    // Dispatch to appropriate command
    let exit_code = match args.command {
        Commands::Init => {
            cmds::execute_init().await?;
            0
        }
        Commands::Run(run_args) => {
            let experiment = cfg.resolve()?;
            cmds::execute_run(run_args, &experiment, Arc::clone(&running)).await?;
            if running.load(Ordering::SeqCst) {
                0
            } else {
                EXIT_INTERRUPTED
            }
        }
        Commands::Classify { command } => {
            cmds::execute_classify(command).await?;
            0
        }
        Commands::Print {
            command: print_args,
        } => {
            let command = match print_args {
                PrintArgs::Config(args) => cmds::print::PrintCommand::Config(args.format),
                PrintArgs::Targets(args) => cmds::print::PrintCommand::Targets(args.format),
            };
            cmds::execute_print(command, &cfg).await?;
            0
        }
    };

    // Exit with appropriate code
    if exit_code != 0 {
        std::process::exit(exit_code);
    }

    Ok(())
}
