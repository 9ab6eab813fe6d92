//! Core CLI arguments structure
//!
//! Global options come first, then an optional command. Values given here
//! override the configuration file, which overrides built-in defaults.

use super::validation::{validate_positive_int, validate_positive_millis};
use crate::core::logging::LOG_FORMATS;
use clap::{Parser, Subcommand};
use std::io::IsTerminal;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "handoff")]
#[command(about = "Blocking FIFO hand-off queue: walk-through and stress runs")]
#[command(version)]
pub struct Args {
    /// Configuration file path
    #[arg(short = 'c', long = "config-file", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Log level
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = ["trace", "debug", "info", "warn", "error", "off"])]
    pub log_level: Option<String>,

    /// Log output format
    #[arg(short = 'o', long = "log-format", value_name = "FORMAT", value_parser = LOG_FORMATS)]
    pub log_format: Option<String>,

    /// Also write the log to this file
    #[arg(short = 'f', long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Force coloured log output
    #[arg(long = "color", conflicts_with = "no_color")]
    pub color: bool,

    /// Disable coloured log output
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Wait slice for unbounded removal, in milliseconds
    #[arg(short = 'w', long = "wait-ms", value_name = "MS", value_parser = validate_positive_millis)]
    pub wait_ms: Option<u64>,

    /// Queue name used in log output
    #[arg(short = 'q', long = "queue-name", value_name = "NAME")]
    pub queue_name: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Walk through the basic queue operations step by step
    Demo,
    /// Run producers and consumers concurrently and verify exactly-once delivery
    Stress(StressArgs),
}

#[derive(clap::Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct StressArgs {
    /// Number of producer threads
    #[arg(short = 'p', long = "producers", value_name = "COUNT", value_parser = validate_positive_int)]
    pub producers: Option<usize>,

    /// Items appended by each producer
    #[arg(short = 'n', long = "items", value_name = "COUNT", value_parser = validate_positive_int)]
    pub items_per_producer: Option<usize>,

    /// Number of consumer threads
    #[arg(short = 'k', long = "consumers", value_name = "COUNT", value_parser = validate_positive_int)]
    pub consumers: Option<usize>,
}

impl Args {
    /// Command to run; `demo` when none was given
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Demo)
    }

    /// Stress options given on the command line, if the command is `stress`
    pub fn stress_args(&self) -> StressArgs {
        match &self.command {
            Some(Command::Stress(stress)) => stress.clone(),
            _ => StressArgs::default(),
        }
    }

    /// Colour decision: explicit flags win, otherwise colour when stderr is a terminal
    pub fn use_color(&self) -> bool {
        if self.no_color {
            false
        } else if self.color {
            true
        } else {
            std::io::stderr().is_terminal()
        }
    }
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Demo => "demo",
            Command::Stress(_) => "stress",
        }
    }
}
