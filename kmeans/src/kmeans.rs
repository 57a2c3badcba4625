use std::fmt;

use rand::rngs::StdRng;
use rand::seq::index;
use rand::{Rng, SeedableRng};

use crate::PartitionError;

/// Controls partitioning behavior.
#[derive(Debug, Clone)]
pub struct Config {
    /// Stop once fewer than `delta_threshold * n` observations change
    /// cluster in a round.
    /// Default: 0.01.
    pub delta_threshold: f64,

    /// Upper bound on assignment rounds.
    /// Default: 96.
    pub max_iterations: usize,

    /// Seed for center selection and empty-cluster repair.
    /// `None` draws from the OS entropy source.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            delta_threshold: 0.01,
            max_iterations: 96,
            seed: None,
        }
    }
}

/// A point submitted for partitioning.
///
/// `id` is carried through untouched; the algorithm only reads
/// `coordinates`.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub id: usize,
    pub coordinates: Vec<f64>,
}

impl Observation {
    pub fn new(id: usize, coordinates: Vec<f64>) -> Self {
        Self { id, coordinates }
    }
}

/// A group of observations around a center.
#[derive(Clone)]
pub struct Cluster {
    /// Mean of the member coordinates.
    pub center: Vec<f64>,

    /// Members, in input order.
    pub observations: Vec<Observation>,
}

impl fmt::Debug for Cluster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cluster")
            .field("center_len", &self.center.len())
            .field("size", &self.observations.len())
            .finish()
    }
}

/// Result of one [`KMeans::partition`] run.
#[derive(Debug, Clone)]
pub struct Partition {
    /// Exactly `k` non-empty clusters. Order carries no meaning.
    pub clusters: Vec<Cluster>,

    /// Number of assignment rounds that ran.
    pub iterations: usize,

    /// Whether the run stopped on the delta threshold rather than the
    /// iteration cap.
    pub converged: bool,
}

/// Lloyd k-means with Euclidean distance.
#[derive(Debug, Clone, Default)]
pub struct KMeans {
    cfg: Config,
}

impl KMeans {
    pub fn new(cfg: Config) -> Self {
        Self { cfg }
    }

    /// Partitions `observations` into `k` clusters.
    ///
    /// Fails when the input is empty, `k` is zero, there are fewer than `k`
    /// observations, or the coordinates are ragged, empty or non-finite.
    pub fn partition(
        &self,
        observations: Vec<Observation>,
        k: usize,
    ) -> Result<Partition, PartitionError> {
        let dim = validate(&observations, k)?;
        let n = observations.len();

        let mut rng = match self.cfg.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut centers: Vec<Vec<f64>> = index::sample(&mut rng, n, k)
            .into_iter()
            .map(|i| observations[i].coordinates.clone())
            .collect();

        let max_iterations = self.cfg.max_iterations.max(1);
        let mut labels = vec![usize::MAX; n];
        let mut iterations = 0;
        let mut converged = false;

        while iterations < max_iterations {
            iterations += 1;

            let mut changes = 0usize;
            for (i, obs) in observations.iter().enumerate() {
                let nearest = nearest_center(&obs.coordinates, &centers);
                if labels[i] != nearest {
                    labels[i] = nearest;
                    changes += 1;
                }
            }

            changes += fill_empty_clusters(&mut labels, k, &mut rng);
            centers = recenter(&observations, &labels, k, dim);

            tracing::debug!(iteration = iterations, changes, "kmeans: round complete");

            if changes == 0 || (changes as f64) < (n as f64) * self.cfg.delta_threshold {
                converged = true;
                break;
            }
        }

        let mut clusters: Vec<Cluster> = centers
            .into_iter()
            .map(|center| Cluster {
                center,
                observations: Vec::new(),
            })
            .collect();
        for (obs, label) in observations.into_iter().zip(labels) {
            clusters[label].observations.push(obs);
        }

        Ok(Partition {
            clusters,
            iterations,
            converged,
        })
    }
}

/// Checks the input and returns the shared dimensionality.
fn validate(observations: &[Observation], k: usize) -> Result<usize, PartitionError> {
    if observations.is_empty() {
        return Err(PartitionError::EmptyInput);
    }
    if k == 0 {
        return Err(PartitionError::ZeroClusters);
    }
    if observations.len() < k {
        return Err(PartitionError::TooFewObservations {
            k,
            n: observations.len(),
        });
    }

    let dim = observations[0].coordinates.len();
    for (index, obs) in observations.iter().enumerate() {
        if obs.coordinates.is_empty() {
            return Err(PartitionError::EmptyObservation { index });
        }
        if obs.coordinates.len() != dim {
            return Err(PartitionError::DimensionMismatch {
                index,
                expected: dim,
                got: obs.coordinates.len(),
            });
        }
        if obs.coordinates.iter().any(|c| !c.is_finite()) {
            return Err(PartitionError::NonFinite { index });
        }
    }
    Ok(dim)
}

/// Squared Euclidean distance. Ties in comparisons resolve to the lower
/// index, so the square root is never needed.
pub fn squared_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

fn nearest_center(point: &[f64], centers: &[Vec<f64>]) -> usize {
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (i, c) in centers.iter().enumerate() {
        let d = squared_distance(point, c);
        if d < best_dist {
            best_dist = d;
            best = i;
        }
    }
    best
}

/// Moves a random observation into every empty cluster, taking only from
/// clusters that keep at least one member. Returns the number of moves.
///
/// Requires `labels.len() >= k`; then a donor always exists.
fn fill_empty_clusters(labels: &mut [usize], k: usize, rng: &mut StdRng) -> usize {
    let mut counts = vec![0usize; k];
    for &l in labels.iter() {
        counts[l] += 1;
    }

    let mut moves = 0;
    for target in 0..k {
        if counts[target] > 0 {
            continue;
        }
        let donors: Vec<usize> = (0..labels.len())
            .filter(|&i| counts[labels[i]] > 1)
            .collect();
        if donors.is_empty() {
            break;
        }
        let i = donors[rng.gen_range(0..donors.len())];
        counts[labels[i]] -= 1;
        labels[i] = target;
        counts[target] += 1;
        moves += 1;
    }
    moves
}

fn recenter(observations: &[Observation], labels: &[usize], k: usize, dim: usize) -> Vec<Vec<f64>> {
    let mut sums = vec![vec![0.0f64; dim]; k];
    let mut counts = vec![0usize; k];
    for (obs, &l) in observations.iter().zip(labels) {
        for (s, &c) in sums[l].iter_mut().zip(&obs.coordinates) {
            *s += c;
        }
        counts[l] += 1;
    }
    for (sum, &count) in sums.iter_mut().zip(&counts) {
        if count == 0 {
            continue;
        }
        let n = count as f64;
        for s in sum.iter_mut() {
            *s /= n;
        }
    }
    sums
}
