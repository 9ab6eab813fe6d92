//! Blocking Queue Component
//!
//! A thread-safe, unbounded FIFO queue for handing items from producer
//! threads to consumer threads.
//!
//! # Overview
//!
//! - **Strict FIFO**: items leave in exactly the order they were added
//! - **Unbounded**: `add` never blocks and never fails
//! - **Three removal disciplines**: unbounded blocking, timed, non-blocking
//! - **Never fails outward**: an empty result is `None`, interruptions are
//!   logged and absorbed
//!
//! # Architecture
//!
//! ```text
//! ┌────────────┐  ┌────────────┐  ┌────────────┐
//! │ Producer A │  │ Producer B │  │ Producer C │
//! └─────┬──────┘  └─────┬──────┘  └─────┬──────┘
//!       │ add           │ add           │ add     (push + notify_one)
//!       ▼               ▼               ▼
//! ┌───────────────────────────────────────────────┐
//! │ BlockingQueue                                 │
//! │   Mutex ─┬─ VecDeque  [ 1 | 2 | 3 | 4 | … ]   │
//! │          └─ counters, interrupt epoch         │
//! │   Condvar (item available)                    │
//! └──────┬───────────────┬───────────────┬────────┘
//!        │ remove        │ remove_timeout│ remove_no_wait
//!        ▼               ▼               ▼
//! ┌────────────┐  ┌────────────┐  ┌────────────┐
//! │ Consumer 1 │  │ Consumer 2 │  │ Consumer 3 │
//! └────────────┘  └────────────┘  └────────────┘
//! ```
//!
//! Which waiting consumer gets woken by an `add` is unspecified; the order
//! in which items are handed out is not.
//!
//! # Example Usage
//!
//! ```rust
//! use handoff::queue::{BlockingQueue, QueueConfig};
//! use std::time::Duration;
//!
//! let config = QueueConfig::from_millis("uploads", 100).unwrap();
//! let queue = BlockingQueue::with_config(config);
//!
//! queue.add("file-1");
//! assert_eq!(queue.size(), 1);
//! assert_eq!(queue.remove_no_wait(), Some("file-1"));
//! assert_eq!(queue.remove_timeout(Duration::from_millis(10)), None);
//! ```

pub mod api;
mod blocking;
pub mod config;
mod error;
mod types;

pub use blocking::BlockingQueue;
pub use config::QueueConfig;
pub use error::{ConfigError, ConfigResult};
pub use types::QueueStats;

#[cfg(test)]
mod tests;
