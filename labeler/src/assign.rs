use std::collections::HashMap;

use casvec_dataset::{Vector, data_key};
use casvec_kmeans::{Cluster, Config, KMeans, Observation, Partition};
use serde::Serialize;

use crate::{ColorProvider, LabelError};

/// How cluster members are mapped back to their vectors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IdentityMode {
    /// Observations carry the vector's position. Duplicate coordinates are
    /// labeled independently.
    #[default]
    Token,
    /// Members are matched by [`data_key`] of their coordinates. Vectors
    /// sharing a key are rejected before clustering.
    DataKey,
}

/// Controls one assignment pass.
#[derive(Debug, Clone)]
pub struct AssignConfig {
    /// Number of clusters (k).
    /// Default: 100.
    pub clusters: usize,

    /// Upper bound on k-means rounds.
    /// Default: 96.
    pub max_iterations: usize,

    /// Convergence threshold, as a fraction of observations changing
    /// cluster in one round.
    /// Default: 0.01.
    pub delta_threshold: f64,

    /// Seed for k-means. `None` is nondeterministic.
    pub seed: Option<u64>,

    pub identity: IdentityMode,
}

impl Default for AssignConfig {
    fn default() -> Self {
        let km = Config::default();
        Self {
            clusters: 100,
            max_iterations: km.max_iterations,
            delta_threshold: km.delta_threshold,
            seed: None,
            identity: IdentityMode::default(),
        }
    }
}

impl AssignConfig {
    fn validate(&self) -> Result<(), LabelError> {
        if self.clusters == 0 {
            return Err(LabelError::InvalidConfig("clusters must be positive".into()));
        }
        if !self.delta_threshold.is_finite() || self.delta_threshold < 0.0 {
            return Err(LabelError::InvalidConfig(format!(
                "delta_threshold must be a non-negative number, got {}",
                self.delta_threshold
            )));
        }
        Ok(())
    }

    fn kmeans(&self) -> KMeans {
        KMeans::new(Config {
            delta_threshold: self.delta_threshold,
            max_iterations: self.max_iterations,
            seed: self.seed,
        })
    }
}

/// Outcome of one cluster.
#[derive(Debug, Clone, Serialize)]
pub struct ClusterSummary {
    pub category: String,
    pub color: String,
    pub size: usize,
    pub center: Vec<f64>,
}

/// Outcome of [`assign_categories`].
#[derive(Debug, Clone, Serialize)]
pub struct AssignReport {
    pub clusters: Vec<ClusterSummary>,
    /// Vectors that received a category.
    pub labeled: usize,
    /// Vectors left untouched because they carry no data.
    pub skipped: usize,
    pub iterations: usize,
    pub converged: bool,
}

/// Maps observation ids and coordinates back to vector positions.
enum IdentityIndex {
    /// `slots[id]` is the position of the vector behind observation `id`.
    Token(Vec<usize>),
    DataKey(HashMap<String, usize>),
}

impl IdentityIndex {
    fn build(mode: IdentityMode, vectors: &[Vector], slots: Vec<usize>) -> Result<Self, LabelError> {
        match mode {
            IdentityMode::Token => Ok(Self::Token(slots)),
            IdentityMode::DataKey => {
                let mut keys: HashMap<String, usize> = HashMap::with_capacity(slots.len());
                for slot in slots {
                    let key = vectors[slot].data_key();
                    if let Some(&first) = keys.get(&key) {
                        return Err(LabelError::KeyCollision {
                            key,
                            first,
                            second: slot,
                        });
                    }
                    keys.insert(key, slot);
                }
                Ok(Self::DataKey(keys))
            }
        }
    }

    fn resolve(&self, obs: &Observation) -> Result<usize, LabelError> {
        match self {
            Self::Token(slots) => slots.get(obs.id).copied().ok_or_else(|| {
                LabelError::Consistency(format!("unknown observation id {}", obs.id))
            }),
            Self::DataKey(keys) => {
                let key = data_key(&obs.coordinates);
                keys.get(&key)
                    .copied()
                    .ok_or_else(|| LabelError::Consistency(format!("unknown data key {key}")))
            }
        }
    }
}

/// Clusters `vectors` and sets each one's `category` to its cluster index
/// and `color` to the cluster's color.
///
/// Vectors with empty data are skipped and left untouched. Colors are taken
/// from `colors`, one per cluster, in cluster order.
///
/// Nothing is modified unless the whole pass succeeds: every cluster member
/// is mapped back and checked before the first vector is written.
pub fn assign_categories(
    vectors: &mut [Vector],
    colors: &mut dyn ColorProvider,
    cfg: &AssignConfig,
) -> Result<AssignReport, LabelError> {
    cfg.validate()?;

    let slots: Vec<usize> = vectors
        .iter()
        .enumerate()
        .filter(|(_, v)| !v.data.is_empty())
        .map(|(i, _)| i)
        .collect();
    if slots.is_empty() {
        return Err(LabelError::EmptyInput);
    }
    let skipped = vectors.len() - slots.len();

    let observations: Vec<Observation> = slots
        .iter()
        .enumerate()
        .map(|(id, &slot)| Observation::new(id, vectors[slot].data.clone()))
        .collect();
    let index = IdentityIndex::build(cfg.identity, vectors, slots)?;

    let Partition {
        clusters,
        iterations,
        converged,
    } = cfg.kmeans().partition(observations, cfg.clusters)?;

    colors.begin_pass();
    let (summaries, labeled) = label(vectors, clusters, &index, colors)?;

    tracing::info!(
        clusters = summaries.len(),
        labeled,
        skipped,
        iterations,
        converged,
        "labeler: assigned categories"
    );

    Ok(AssignReport {
        clusters: summaries,
        labeled,
        skipped,
        iterations,
        converged,
    })
}

/// Maps every cluster member back to its vector and writes the labels.
///
/// All members are resolved and checked first. On error no vector has been
/// modified.
fn label(
    vectors: &mut [Vector],
    clusters: Vec<Cluster>,
    index: &IdentityIndex,
    colors: &mut dyn ColorProvider,
) -> Result<(Vec<ClusterSummary>, usize), LabelError> {
    let mut assigned: Vec<Option<usize>> = vec![None; vectors.len()];
    let mut summaries = Vec::with_capacity(clusters.len());
    for (i, cluster) in clusters.into_iter().enumerate() {
        for obs in &cluster.observations {
            let slot = index.resolve(obs)?;
            match assigned.get(slot).copied() {
                Some(Some(prev)) => {
                    return Err(LabelError::Consistency(format!(
                        "vector {slot} is a member of clusters {prev} and {i}"
                    )));
                }
                Some(None) => assigned[slot] = Some(i),
                None => {
                    return Err(LabelError::Consistency(format!(
                        "vector {slot} is out of range"
                    )));
                }
            }
        }

        let color = colors.next_color();
        tracing::debug!(
            cluster = i,
            size = cluster.observations.len(),
            color = %color,
            center = ?&cluster.center[..cluster.center.len().min(4)],
            "labeler: cluster"
        );
        summaries.push(ClusterSummary {
            category: i.to_string(),
            color,
            size: cluster.observations.len(),
            center: cluster.center,
        });
    }

    for (slot, vector) in vectors.iter().enumerate() {
        if !vector.data.is_empty() && assigned[slot].is_none() {
            return Err(LabelError::Consistency(format!(
                "vector {slot} is missing from the partition"
            )));
        }
    }

    let mut labeled = 0;
    for (vector, cluster) in vectors.iter_mut().zip(assigned) {
        if let Some(i) = cluster {
            let summary = &summaries[i];
            vector.category = summary.category.clone();
            vector.color = summary.color.clone();
            labeled += 1;
        }
    }
    Ok((summaries, labeled))
}
