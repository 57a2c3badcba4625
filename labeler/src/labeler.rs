use casvec_dataset::DatasetStore;

use crate::{AssignConfig, AssignReport, ColorProvider, LabelError, assign_categories};

/// Loads a dataset, assigns categories to its vectors and saves it back.
///
/// The dataset is only written when the assignment succeeds, so a failed
/// call leaves the stored dataset as it was.
pub fn update_dataset_vector_categories(
    store: &dyn DatasetStore,
    colors: &mut dyn ColorProvider,
    cfg: &AssignConfig,
    owner: &str,
    name: &str,
) -> Result<AssignReport, LabelError> {
    let mut dataset = store
        .get_dataset(owner, name)?
        .ok_or_else(|| LabelError::DatasetNotFound {
            owner: owner.to_string(),
            name: name.to_string(),
        })?;

    let report = assign_categories(&mut dataset.vectors, colors, cfg)?;

    let id = dataset.get_id();
    if !store.update_dataset(&id, &dataset)? {
        // Deleted between load and save.
        return Err(LabelError::DatasetNotFound {
            owner: owner.to_string(),
            name: name.to_string(),
        });
    }

    tracing::info!(dataset = %id, clusters = report.clusters.len(), "labeler: dataset updated");
    Ok(report)
}

/// Runs dataset updates against an injected store and color provider.
pub struct Labeler {
    store: Box<dyn DatasetStore>,
    colors: Box<dyn ColorProvider>,
    cfg: AssignConfig,
}

impl Labeler {
    pub fn new(
        store: Box<dyn DatasetStore>,
        colors: Box<dyn ColorProvider>,
        cfg: AssignConfig,
    ) -> Self {
        Self { store, colors, cfg }
    }

    pub fn store(&self) -> &dyn DatasetStore {
        self.store.as_ref()
    }

    pub fn config(&self) -> &AssignConfig {
        &self.cfg
    }

    pub fn set_config(&mut self, cfg: AssignConfig) {
        self.cfg = cfg;
    }

    /// See [`update_dataset_vector_categories`].
    pub fn update_dataset_vector_categories(
        &mut self,
        owner: &str,
        name: &str,
    ) -> Result<AssignReport, LabelError> {
        update_dataset_vector_categories(
            self.store.as_ref(),
            self.colors.as_mut(),
            &self.cfg,
            owner,
            name,
        )
    }
}
