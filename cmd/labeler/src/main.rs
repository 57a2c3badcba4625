//! casvec - import vector files into datasets and label them by k-means cluster.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

use commands::{AssignCommand, ConfigCommand, ImportCommand, ListCommand, ShowCommand};

/// casvec - cluster the vectors of a dataset and color them by cluster.
///
/// Datasets live in a local redb database. Configuration is stored in
/// ~/.casvec/config.yaml.
#[derive(Parser)]
#[command(name = "casvec")]
#[command(about = "Vector dataset clustering tool")]
#[command(version)]
pub struct Cli {
    /// Config file (default is ~/.casvec/config.yaml)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Dataset database file (overrides db_path from the config)
    #[arg(long, global = true)]
    pub db: Option<String>,

    /// Output as JSON (default YAML)
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose output
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Import a vector file into a dataset
    Import(ImportCommand),
    /// Cluster a dataset and write categories and colors
    Assign(AssignCommand),
    /// Print a dataset
    Show(ShowCommand),
    /// List the datasets of an owner
    List(ListCommand),
    /// Manage CLI configuration
    Config(ConfigCommand),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over -v.
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match &cli.command {
        Commands::Import(cmd) => cmd.run(&cli),
        Commands::Assign(cmd) => cmd.run(&cli),
        Commands::Show(cmd) => cmd.run(&cli),
        Commands::List(cmd) => cmd.run(&cli),
        Commands::Config(cmd) => cmd.run(&cli),
    }
}
