//! Configuration for the casvec CLI.
//!
//! Stored as YAML in ~/.casvec/config.yaml unless `--config` points
//! elsewhere. Command-line flags override individual values.

use std::path::{Path, PathBuf};

use casvec_labeler::AssignConfig;
use serde::{Deserialize, Serialize};

/// Default base configuration directory name.
pub const DEFAULT_BASE_DIR: &str = ".casvec";
/// Default configuration filename.
pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";
/// Default database filename, under the data directory.
pub const DEFAULT_DB_FILE: &str = "datasets.redb";

/// Keys accepted by `config set`.
pub const KEYS: &[&str] = &["db_path", "clusters", "max_iterations", "seed"];

/// CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Dataset database file. Empty means `<config dir>/data/datasets.redb`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub db_path: String,

    /// Number of clusters per assignment.
    #[serde(default = "default_clusters")]
    pub clusters: usize,

    /// Upper bound on k-means rounds.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,

    /// Fixed k-means seed for reproducible runs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    /// Path to the config file (not serialized).
    #[serde(skip)]
    config_path: PathBuf,
}

fn default_clusters() -> usize {
    AssignConfig::default().clusters
}

fn default_max_iterations() -> usize {
    AssignConfig::default().max_iterations
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: String::new(),
            clusters: default_clusters(),
            max_iterations: default_max_iterations(),
            seed: None,
            config_path: PathBuf::new(),
        }
    }
}

impl Config {
    /// Gets the default config directory.
    pub fn default_config_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(DEFAULT_BASE_DIR))
    }

    /// Gets the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        Self::default_config_dir().map(|dir| dir.join(DEFAULT_CONFIG_FILE))
    }

    /// Returns the config file path.
    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Resolves the database file: `db_path` if set, otherwise next to the
    /// config file.
    pub fn db_file(&self) -> PathBuf {
        if !self.db_path.is_empty() {
            return PathBuf::from(&self.db_path);
        }
        let dir = self.config_path.parent().unwrap_or(Path::new("."));
        dir.join("data").join(DEFAULT_DB_FILE)
    }

    /// Saves the configuration to disk.
    pub fn save(&self) -> anyhow::Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(&self.config_path, content)?;
        Ok(())
    }

    /// Sets a value by key and saves.
    pub fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        match key {
            "db_path" => self.db_path = value.to_string(),
            "clusters" => {
                let k: usize = value.parse()?;
                if k == 0 {
                    anyhow::bail!("clusters must be positive");
                }
                self.clusters = k;
            }
            "max_iterations" => self.max_iterations = value.parse()?,
            "seed" => {
                self.seed = match value {
                    "" | "none" => None,
                    v => Some(v.parse()?),
                }
            }
            _ => anyhow::bail!("unknown key '{}', expected one of {}", key, KEYS.join(", ")),
        }
        self.save()
    }

    /// Builds the assignment settings from this config.
    pub fn assign_config(&self) -> AssignConfig {
        AssignConfig {
            clusters: self.clusters,
            max_iterations: self.max_iterations,
            seed: self.seed,
            ..AssignConfig::default()
        }
    }
}

/// Loads the configuration, creating an empty file if none exists.
pub fn load_config(custom_path: Option<&str>) -> anyhow::Result<Config> {
    let config_path = match custom_path {
        Some(p) => PathBuf::from(p),
        None => Config::default_config_path()
            .ok_or_else(|| anyhow::anyhow!("cannot determine config path"))?,
    };

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut cfg = if config_path.exists() {
        let content = std::fs::read_to_string(&config_path)?;
        serde_yaml::from_str(&content)?
    } else {
        let cfg = Config::default();
        std::fs::write(&config_path, serde_yaml::to_string(&cfg)?)?;
        cfg
    };

    cfg.config_path = config_path;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn load_creates_default() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("casvec/config.yaml");
        let cfg = load_config(path.to_str()).unwrap();

        assert!(path.exists());
        assert_eq!(cfg.clusters, 100);
        assert_eq!(cfg.max_iterations, 96);
        assert_eq!(cfg.seed, None);
        assert_eq!(cfg.db_file(), dir.path().join("casvec/data/datasets.redb"));
    }

    #[test]
    fn set_and_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        let mut cfg = load_config(path.to_str()).unwrap();

        cfg.set("clusters", "8").unwrap();
        cfg.set("seed", "42").unwrap();
        cfg.set("db_path", "/tmp/x.redb").unwrap();

        let cfg = load_config(path.to_str()).unwrap();
        assert_eq!(cfg.clusters, 8);
        assert_eq!(cfg.seed, Some(42));
        assert_eq!(cfg.db_file(), PathBuf::from("/tmp/x.redb"));

        let assign = cfg.assign_config();
        assert_eq!(assign.clusters, 8);
        assert_eq!(assign.seed, Some(42));
    }

    #[test]
    fn set_rejects_bad_values() {
        let dir = tempdir().unwrap();
        let mut cfg = load_config(dir.path().join("c.yaml").to_str()).unwrap();
        assert!(cfg.set("clusters", "0").is_err());
        assert!(cfg.set("clusters", "many").is_err());
        assert!(cfg.set("colour", "red").is_err());

        cfg.set("seed", "7").unwrap();
        cfg.set("seed", "none").unwrap();
        assert_eq!(cfg.seed, None);
    }

    #[test]
    fn partial_yaml_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "clusters: 3\n").unwrap();
        let cfg = load_config(path.to_str()).unwrap();
        assert_eq!(cfg.clusters, 3);
        assert_eq!(cfg.max_iterations, 96);
    }
}
