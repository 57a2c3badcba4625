use serde::{Deserialize, Serialize};

use crate::{DatasetError, DatasetResult};

/// A single data point of a dataset.
///
/// `category` and `color` stay empty until the vectors are clustered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    #[serde(default)]
    pub data: Vec<f64>,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub category: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub color: String,
}

impl Vector {
    pub fn new(name: impl Into<String>, data: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            data,
            ..Default::default()
        }
    }

    /// Returns the canonical key of this vector's coordinates.
    /// See [`data_key`].
    pub fn data_key(&self) -> String {
        data_key(&self.data)
    }

    /// Returns true once a category has been assigned.
    pub fn is_labeled(&self) -> bool {
        !self.category.is_empty()
    }
}

/// An ordered collection of vectors owned by a user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub owner: String,

    pub name: String,

    /// RFC 3339 creation timestamp.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub created_time: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub display_name: String,

    #[serde(default)]
    pub vectors: Vec<Vector>,
}

impl Dataset {
    /// Creates an empty dataset stamped with the current time.
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            owner: owner.into(),
            display_name: name.clone(),
            name,
            created_time: chrono::Utc::now().to_rfc3339(),
            vectors: Vec::new(),
        }
    }

    /// Returns the store identifier, `"owner/name"`.
    pub fn get_id(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }

    /// Counts vectors that carry coordinates.
    pub fn data_len(&self) -> usize {
        self.vectors.iter().filter(|v| !v.data.is_empty()).count()
    }
}

/// Splits `"owner/name"` into its parts.
pub fn split_id(id: &str) -> DatasetResult<(&str, &str)> {
    match id.split_once('/') {
        Some((owner, name)) if !owner.is_empty() && !name.is_empty() => Ok((owner, name)),
        _ => Err(DatasetError::InvalidId(id.to_string())),
    }
}

/// Builds the canonical string key of a coordinate sequence.
///
/// Each value is written in its shortest round-trip form, so two sequences
/// share a key exactly when their values compare equal. `-0.0` is written
/// as `0.0`.
pub fn data_key(data: &[f64]) -> String {
    data.iter()
        .map(|&f| {
            let f = if f == 0.0 { 0.0 } else { f };
            format!("{f:?}")
        })
        .collect::<Vec<_>>()
        .join("|")
}
