//! TOML configuration file parsing and loading
//!
//! This module handles loading and parsing of the configuration file,
//! default config file discovery, and merging file values with CLI values.

use super::args::Args;
use crate::app::stress::{
    StressSettings, DEFAULT_CONSUMERS, DEFAULT_ITEMS_PER_PRODUCER, DEFAULT_PRODUCERS,
};
use crate::queue::config::{DEFAULT_QUEUE_NAME, DEFAULT_WAIT};
use crate::queue::{ConfigError, ConfigResult, QueueConfig};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Contents of a configuration file; every key is optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileConfig {
    pub queue: QueueSection,
    pub stress: StressSection,
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct QueueSection {
    pub name: Option<String>,
    pub default_wait_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct StressSection {
    pub producers: Option<usize>,
    pub items_per_producer: Option<usize>,
    pub consumers: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct LoggingSection {
    pub level: Option<String>,
}

/// Default location: `<config dir>/Handoff/handoff.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("Handoff").join("handoff.toml"))
}

impl FileConfig {
    /// Parse configuration text; `path` is only used in error messages
    pub fn parse(contents: &str, path: &Path) -> ConfigResult<Self> {
        toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents, path)
    }

    /// Load the configuration to use for this run
    ///
    /// An explicitly named file must exist. Without one, the default
    /// location is used when present, otherwise all defaults apply.
    pub fn discover(explicit: Option<&Path>) -> ConfigResult<Self> {
        match explicit {
            Some(path) => {
                log::debug!("Loading configuration from {}", path.display());
                Self::load(path)
            }
            None => match default_config_path() {
                Some(path) if path.exists() => {
                    log::debug!("Loading default configuration from {}", path.display());
                    Self::load(&path)
                }
                _ => {
                    log::debug!("No configuration file, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }
}

/// Fully resolved settings for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub queue: QueueConfig,
    pub stress: StressSettings,
}

impl Settings {
    /// Merge CLI values over file values over defaults, then validate
    pub fn resolve(args: &Args, file: &FileConfig) -> ConfigResult<Self> {
        let name = args
            .queue_name
            .clone()
            .or_else(|| file.queue.name.clone())
            .unwrap_or_else(|| DEFAULT_QUEUE_NAME.to_string());
        let wait_ms = args
            .wait_ms
            .or(file.queue.default_wait_ms)
            .unwrap_or(DEFAULT_WAIT.as_millis() as u64);
        let queue = QueueConfig::from_millis(name, wait_ms)?;

        let cli = args.stress_args();
        let stress = StressSettings::new(
            cli.producers
                .or(file.stress.producers)
                .unwrap_or(DEFAULT_PRODUCERS),
            cli.items_per_producer
                .or(file.stress.items_per_producer)
                .unwrap_or(DEFAULT_ITEMS_PER_PRODUCER),
            cli.consumers
                .or(file.stress.consumers)
                .unwrap_or(DEFAULT_CONSUMERS),
        )?;

        Ok(Self { queue, stress })
    }
}
