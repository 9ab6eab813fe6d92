//! CLI module containing argument parsing and configuration loading

pub mod args;
pub mod config;
pub mod validation;

pub use args::{Args, Command, StressArgs};
pub use config::{default_config_path, FileConfig, Settings};
