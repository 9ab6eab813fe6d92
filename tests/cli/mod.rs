//! CLI Integration Test Modules

pub mod argument_parsing;
pub mod commands;
pub mod toml_config;
