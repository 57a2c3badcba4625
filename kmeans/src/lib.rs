//! Lloyd-style k-means partitioning.
//!
//! Works on [`Observation`]s: a coordinate sequence plus an opaque `id`
//! token that the algorithm never inspects. The token comes back unchanged
//! in the output [`Cluster`]s, so callers can map members back to their own
//! records by index instead of re-deriving an identity from coordinates.
//!
//! # Usage
//!
//! ```
//! use casvec_kmeans::{Config, KMeans, Observation};
//!
//! let points = vec![
//!     Observation::new(0, vec![0.0, 0.0]),
//!     Observation::new(1, vec![0.1, 0.1]),
//!     Observation::new(2, vec![10.0, 10.0]),
//!     Observation::new(3, vec![10.1, 10.1]),
//! ];
//!
//! let km = KMeans::new(Config { seed: Some(7), ..Config::default() });
//! let partition = km.partition(points, 2).unwrap();
//! assert_eq!(partition.clusters.len(), 2);
//! ```
//!
//! # Behavior
//!
//! Centers are seeded from `k` distinct randomly chosen observations. A
//! cluster that ends an assignment round empty takes a random observation
//! from a cluster with more than one member, so when `n >= k` every output
//! cluster is non-empty, even with duplicate points.

mod error;
mod kmeans;

pub use error::PartitionError;
pub use kmeans::{Cluster, Config, KMeans, Observation, Partition, squared_distance};
