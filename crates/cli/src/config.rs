//! Top-level CLI configuration and dispatch.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::commands::Command;

/// Inspect consistent-hash ring placement from the command line.
#[derive(Parser)]
#[command(name = "ringctl", about = "Consistent-hash ring inspection tool")]
pub struct CliConfig {
    #[command(subcommand)]
    command: Command,
}

impl CliConfig {
    /// Installs the log subscriber and dispatches the subcommand.
    pub fn run(self) -> Result<()> {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        tracing_subscriber::fmt().with_env_filter(filter).init();
        self.command.execute()
    }
}
