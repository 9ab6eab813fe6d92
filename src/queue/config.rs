//! Queue configuration
//!
//! A queue carries a name (used as log context) and the default wait slice
//! used by the unbounded [`remove`](crate::queue::BlockingQueue::remove).

use crate::queue::error::{ConfigError, ConfigResult};
use std::time::Duration;

/// Wait slice used when nothing else is configured
pub const DEFAULT_WAIT: Duration = Duration::from_millis(1000);

/// Name given to queues created without an explicit configuration
pub const DEFAULT_QUEUE_NAME: &str = "queue";

/// Settings applied to a [`BlockingQueue`](crate::queue::BlockingQueue) at construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueConfig {
    name: String,
    default_wait: Duration,
}

impl QueueConfig {
    /// Build a validated configuration
    pub fn new(name: impl Into<String>, default_wait: Duration) -> ConfigResult<Self> {
        let config = Self {
            name: name.into(),
            default_wait,
        };
        config.validate()?;
        Ok(config)
    }

    /// Build a configuration from a wait slice given in milliseconds
    pub fn from_millis(name: impl Into<String>, default_wait_ms: u64) -> ConfigResult<Self> {
        Self::new(name, Duration::from_millis(default_wait_ms))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn default_wait(&self) -> Duration {
        self.default_wait
    }

    /// Return a copy with a different name
    pub fn with_name(mut self, name: impl Into<String>) -> ConfigResult<Self> {
        self.name = name.into();
        self.validate()?;
        Ok(self)
    }

    /// Return a copy with a different wait slice
    pub fn with_default_wait(mut self, default_wait: Duration) -> ConfigResult<Self> {
        self.default_wait = default_wait;
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> ConfigResult<()> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::invalid("name", "queue name must not be empty"));
        }
        // A zero slice would turn remove() into a busy spin.
        if self.default_wait.is_zero() {
            return Err(ConfigError::invalid(
                "default-wait-ms",
                "wait slice must be greater than 0",
            ));
        }
        Ok(())
    }
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_QUEUE_NAME.to_string(),
            default_wait: DEFAULT_WAIT,
        }
    }
}
