//! Dataset inspection.

use clap::Args;
use serde::Serialize;

use casvec_dataset::DatasetStore;

use super::{get_config, open_store, output_result};
use crate::Cli;

/// Print a dataset with its vectors.
#[derive(Args)]
pub struct ShowCommand {
    /// Dataset owner
    #[arg(long)]
    owner: String,

    /// Dataset name
    #[arg(long)]
    name: String,
}

impl ShowCommand {
    pub fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let cfg = get_config(cli)?;
        let store = open_store(cli, &cfg)?;

        let dataset = store
            .get_dataset(&self.owner, &self.name)?
            .ok_or_else(|| anyhow::anyhow!("dataset {}/{} not found", self.owner, self.name))?;
        output_result(cli, &dataset)
    }
}

/// List the datasets of an owner.
#[derive(Args)]
pub struct ListCommand {
    /// Dataset owner
    #[arg(long)]
    owner: String,
}

#[derive(Serialize)]
struct DatasetInfo {
    name: String,
    vectors: usize,
    /// Vectors with coordinates.
    with_data: usize,
    labeled: usize,
    #[serde(skip_serializing_if = "String::is_empty")]
    created_time: String,
}

impl ListCommand {
    pub fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let cfg = get_config(cli)?;
        let store = open_store(cli, &cfg)?;

        let infos: Vec<DatasetInfo> = store
            .get_datasets(&self.owner)?
            .into_iter()
            .map(|d| DatasetInfo {
                vectors: d.vectors.len(),
                with_data: d.data_len(),
                labeled: d.vectors.iter().filter(|v| v.is_labeled()).count(),
                name: d.name,
                created_time: d.created_time,
            })
            .collect();
        output_result(cli, &infos)
    }
}
