//! Cluster assignment.

use clap::Args;

use casvec_labeler::{IdentityMode, Labeler, RandomColor};

use super::{get_config, open_store, output_result, print_success};
use crate::Cli;

/// Cluster a dataset and write categories and colors.
///
/// Every vector with data gets its cluster index as category and the
/// cluster's color. Nothing is saved if clustering fails.
#[derive(Args)]
pub struct AssignCommand {
    /// Dataset owner
    #[arg(long)]
    owner: String,

    /// Dataset name
    #[arg(long)]
    name: String,

    /// Number of clusters (default from config)
    #[arg(short = 'k', long)]
    clusters: Option<usize>,

    /// Maximum k-means rounds (default from config)
    #[arg(long)]
    max_iterations: Option<usize>,

    /// Seed for k-means and colors
    #[arg(long)]
    seed: Option<u64>,

    /// Match cluster members by coordinate key instead of position
    #[arg(long)]
    by_key: bool,

    /// Include cluster centers in the report
    #[arg(long)]
    centers: bool,
}

impl AssignCommand {
    pub fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let cfg = get_config(cli)?;
        let store = open_store(cli, &cfg)?;

        let mut assign = cfg.assign_config();
        if let Some(k) = self.clusters {
            assign.clusters = k;
        }
        if let Some(n) = self.max_iterations {
            assign.max_iterations = n;
        }
        if self.seed.is_some() {
            assign.seed = self.seed;
        }
        if self.by_key {
            assign.identity = IdentityMode::DataKey;
        }

        let colors = match assign.seed {
            Some(seed) => RandomColor::with_seed(seed),
            None => RandomColor::new(),
        };

        let mut labeler = Labeler::new(Box::new(store), Box::new(colors), assign);
        let mut report = labeler.update_dataset_vector_categories(&self.owner, &self.name)?;

        if !self.centers {
            for c in &mut report.clusters {
                c.center.clear();
            }
        }
        output_result(cli, &report)?;
        print_success(&format!(
            "Labeled {} vectors of {}/{} into {} clusters",
            report.labeled,
            self.owner,
            self.name,
            report.clusters.len()
        ));
        Ok(())
    }
}
