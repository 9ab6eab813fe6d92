//! Thread-safe unbounded FIFO hand-off queue for producer and consumer threads
//!
//! The queue lives in [`queue`]; [`core`] carries logging and build metadata;
//! [`app`] is the command-line front end used by the `handoff` binary.

pub mod app;
pub mod core;
pub mod queue;
