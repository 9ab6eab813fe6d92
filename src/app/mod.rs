//! Command-line front end: argument parsing, configuration and commands

pub mod cli;
pub mod demo;
mod error;
pub mod startup;
pub mod stress;

pub use error::{AppError, AppResult};
