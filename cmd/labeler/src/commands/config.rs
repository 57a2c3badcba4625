//! Configuration management commands.

use clap::{Args, Subcommand};

use super::{get_config, output_result, print_success};
use crate::Cli;

/// Manage CLI configuration.
///
/// Configuration is stored in ~/.casvec/config.yaml
#[derive(Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    command: ConfigSubcommand,
}

#[derive(Subcommand)]
enum ConfigSubcommand {
    /// View the current configuration
    View,
    /// Set a value (db_path, clusters, max_iterations, seed)
    Set {
        /// Key name
        key: String,
        /// New value ("none" clears seed)
        value: String,
    },
}

impl ConfigCommand {
    pub fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        match &self.command {
            ConfigSubcommand::View => {
                let cfg = get_config(cli)?;
                eprintln!("Config file: {}", cfg.path().display());
                output_result(cli, &cfg)
            }
            ConfigSubcommand::Set { key, value } => {
                let mut cfg = get_config(cli)?;
                cfg.set(key, value)?;
                print_success(&format!("Set {} = {}", key, value));
                Ok(())
            }
        }
    }
}
