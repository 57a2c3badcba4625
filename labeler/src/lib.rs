//! Clusters the vectors of a dataset and labels each vector with its
//! cluster index (`category`) and a color shared by the cluster.
//!
//! # Usage
//!
//! ```
//! use casvec_dataset::{Dataset, DatasetStore, MemoryStore, Vector};
//! use casvec_labeler::{AssignConfig, Labeler, Palette};
//!
//! let mut ds = Dataset::new("admin", "points");
//! ds.vectors = vec![
//!     Vector::new("a", vec![0.0, 0.0]),
//!     Vector::new("b", vec![0.1, 0.1]),
//!     Vector::new("c", vec![10.0, 10.0]),
//!     Vector::new("d", vec![10.1, 10.1]),
//! ];
//!
//! let mut labeler = Labeler::new(
//!     Box::new(MemoryStore::with_datasets([ds])),
//!     Box::new(Palette::default()),
//!     AssignConfig { clusters: 2, ..AssignConfig::default() },
//! );
//! let report = labeler.update_dataset_vector_categories("admin", "points").unwrap();
//! assert_eq!(report.clusters.len(), 2);
//!
//! let ds = labeler.store().get_dataset("admin", "points").unwrap().unwrap();
//! assert_eq!(ds.vectors[0].category, ds.vectors[1].category);
//! ```
//!
//! # Identity recovery
//!
//! Each vector travels through k-means as an observation tagged with its
//! position, so cluster members map back to vectors without looking at
//! coordinates. [`IdentityMode::DataKey`] instead matches members by their
//! canonical coordinate key and rejects datasets where two vectors share a
//! key.
//!
//! Category numbering follows the partition output order and is not stable
//! across runs.

mod assign;
mod color;
mod error;
mod labeler;

pub use assign::{AssignConfig, AssignReport, ClusterSummary, IdentityMode, assign_categories};
pub use color::{ColorProvider, Palette, RandomColor};
pub use error::{ErrorKind, LabelError};
pub use labeler::{Labeler, update_dataset_vector_categories};
