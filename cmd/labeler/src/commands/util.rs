//! Utility functions for CLI commands.

use casvec_dataset::RedbStore;

use crate::Cli;
use crate::config::{Config, load_config};

/// Gets the global configuration.
pub fn get_config(cli: &Cli) -> anyhow::Result<Config> {
    load_config(cli.config.as_deref())
}

/// Opens the dataset database chosen by `--db` or the config.
pub fn open_store(cli: &Cli, cfg: &Config) -> anyhow::Result<RedbStore> {
    let path = match &cli.db {
        Some(p) => p.into(),
        None => cfg.db_file(),
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    tracing::debug!(path = %path.display(), "opening dataset database");
    Ok(RedbStore::open(&path)?)
}

/// Outputs result as JSON or YAML on stdout.
pub fn output_result<T: serde::Serialize>(cli: &Cli, result: &T) -> anyhow::Result<()> {
    let output = if cli.json {
        serde_json::to_string_pretty(result)? + "\n"
    } else {
        serde_yaml::to_string(result)?
    };
    print!("{}", output);
    Ok(())
}

/// Prints success message.
pub fn print_success(msg: &str) {
    eprintln!("\x1b[32m✓\x1b[0m {}", msg);
}
