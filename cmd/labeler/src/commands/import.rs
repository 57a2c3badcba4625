//! Vector file import.

use std::path::PathBuf;

use clap::{Args, ValueEnum};

use casvec_dataset::{
    Dataset, DatasetStore, Vector, VectorFileFormat, load_vector_file, vectors_from_pairs,
};

use super::{get_config, open_store, print_success};
use crate::Cli;

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    /// id,name,"[v1 v2 ...]" rows
    Csv,
    /// Header line, then "name v1 v2 ..." lines
    Space,
}

impl From<Format> for VectorFileFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Csv => VectorFileFormat::Csv,
            Format::Space => VectorFileFormat::Space,
        }
    }
}

/// Import a vector file into a dataset.
///
/// Creates the dataset if needed; an existing dataset has its vectors
/// replaced and its labels cleared.
#[derive(Args)]
pub struct ImportCommand {
    /// Dataset owner
    #[arg(long)]
    owner: String,

    /// Dataset name
    #[arg(long)]
    name: String,

    /// Vector file to read
    #[arg(long)]
    file: PathBuf,

    /// File layout (default: guessed from the extension)
    #[arg(long, value_enum)]
    format: Option<Format>,
}

impl ImportCommand {
    pub fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let cfg = get_config(cli)?;
        let store = open_store(cli, &cfg)?;

        let format = match self.format {
            Some(f) => f.into(),
            None => VectorFileFormat::from_path(&self.file),
        };
        let (names, data) = load_vector_file(&self.file, format)?;
        let vectors = vectors_from_pairs(names, data);
        let count = vectors.len();

        save_vectors(&store, &self.owner, &self.name, vectors)?;
        print_success(&format!(
            "Imported {} vectors into {}/{}",
            count, self.owner, self.name
        ));
        Ok(())
    }
}

/// Replaces the vectors of `owner/name`, creating the dataset if needed.
///
/// Fails when the dataset appears or disappears between the lookup and the
/// write.
fn save_vectors(
    store: &dyn DatasetStore,
    owner: &str,
    name: &str,
    vectors: Vec<Vector>,
) -> anyhow::Result<()> {
    let written = match store.get_dataset(owner, name)? {
        Some(mut dataset) => {
            dataset.vectors = vectors;
            store.update_dataset(&dataset.get_id(), &dataset)?
        }
        None => {
            let mut dataset = Dataset::new(owner, name);
            dataset.vectors = vectors;
            store.add_dataset(&dataset)?
        }
    };
    if !written {
        anyhow::bail!("dataset {owner}/{name} changed during import, nothing written");
    }
    Ok(())
}
