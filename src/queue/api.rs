//! Public API for the queue system
//!
//! External modules should import from here rather than directly from internal modules.
//! See module documentation for usage examples and architecture details.

// Core queue component
pub use crate::queue::blocking::BlockingQueue;

// Configuration
pub use crate::queue::config::{QueueConfig, DEFAULT_QUEUE_NAME, DEFAULT_WAIT};

// Error handling
pub use crate::queue::error::{ConfigError, ConfigResult};

// Statistics
pub use crate::queue::types::QueueStats;
