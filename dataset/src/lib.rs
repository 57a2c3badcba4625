//! Dataset model and persistence.
//!
//! A [`Dataset`] is an ordered list of [`Vector`]s owned by a user. Stores
//! implement [`DatasetStore`]: [`MemoryStore`] for tests and ephemeral use,
//! [`RedbStore`] for an on-disk database.
//!
//! The [`loader`] module turns CSV or space-delimited vector files into
//! name/data pairs.

mod error;
pub mod loader;
mod memory;
mod redb_store;
mod store;
mod types;

pub use error::{DatasetError, DatasetResult};
pub use loader::{VectorFileFormat, load_vector_file, vectors_from_pairs};
pub use memory::MemoryStore;
pub use redb_store::RedbStore;
pub use store::DatasetStore;
pub use types::{Dataset, Vector, data_key, split_id};
