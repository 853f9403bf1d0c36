//! CLI tool for inspecting consistent-hash ring placement.
//!
//! Provides commands for:
//! - Resolving which node owns a key
//! - Reporting per-node interval widths and sampled load

pub mod commands;
pub mod config;

pub use commands::Command;
pub use config::CliConfig;
