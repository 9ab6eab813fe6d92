//! Application startup: logging, configuration, command dispatch

use crate::app::cli::{Args, Command, FileConfig, Settings};
use crate::app::{demo, stress, AppError, AppResult};
use crate::core::error_handling::log_error_with_context;
use crate::core::logging::{init_logging, reconfigure_logging};
use crate::core::version;
use clap::Parser;

/// Run the binary and return its exit code
pub fn startup() -> i32 {
    let args = Args::parse();

    if let Err(e) = init_logging(
        args.log_level.as_deref(),
        args.log_format.as_deref(),
        args.log_file.as_deref(),
        args.use_color(),
    )
    .map_err(|e| AppError::Logging {
        message: e.to_string(),
    }) {
        // No logger to report through
        eprintln!("Error: {}", e);
        return 1;
    }

    log::info!("{}", version::banner());

    match run(&args) {
        Ok(output) => {
            println!("{}", output);
            0
        }
        Err(e) => {
            log_error_with_context(&e, &format!("{} failed", args.command().name()));
            1
        }
    }
}

/// Load configuration and run the selected command, returning its printable output
pub fn run(args: &Args) -> AppResult<String> {
    let file = FileConfig::discover(args.config_file.as_deref())?;

    // The file's level only applies when none was given on the command line
    if args.log_level.is_none() {
        if let Some(level) = file.logging.level.as_deref() {
            if let Err(e) = reconfigure_logging(level) {
                log::warn!("Ignoring configured log level '{}': {}", level, e);
            }
        }
    }

    let settings = Settings::resolve(args, &file)?;
    log::debug!("Resolved settings: {:?}", settings);

    match args.command() {
        Command::Demo => Ok(demo::run_demo(&settings.queue)?.join("\n")),
        Command::Stress(_) => Ok(stress::run_stress(&settings.queue, &settings.stress)?.to_string()),
    }
}
