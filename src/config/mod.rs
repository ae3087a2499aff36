// ABOUTME: Configuration types and parsing for restartctl.yml.
// ABOUTME: Handles YAML parsing, file discovery and cluster resolution.

mod cluster;
mod deserialize;
mod env_value;
mod init;
mod rollout;

pub use cluster::{ClusterConfig, ClusterType, ResolvedCluster};
pub use env_value::EnvValue;
pub use init::init_config;
pub use rollout::RolloutConfig;

use crate::error::{Error, Result};
use deserialize::deserialize_clusters;
use nonempty::NonEmpty;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = "restartctl.yml";
pub const CONFIG_FILENAME_ALT: &str = "restartctl.yaml";
pub const CONFIG_FILENAME_DIR: &str = ".restartctl/config.yml";
pub const CONFIG_FILENAME_HOME: &str = ".restartctl.yaml";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(deserialize_with = "deserialize_clusters")]
    pub clusters: NonEmpty<ClusterConfig>,

    #[serde(default)]
    pub rollout: RolloutConfig,
}

impl Config {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::ConfigNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Find the config file: working directory candidates first, then the
    /// home directory.
    pub fn discover(dir: &Path, home: Option<&Path>) -> Result<Self> {
        let mut candidates: Vec<PathBuf> = vec![
            dir.join(CONFIG_FILENAME),
            dir.join(CONFIG_FILENAME_ALT),
            dir.join(CONFIG_FILENAME_DIR),
        ];
        if let Some(home) = home {
            candidates.push(home.join(CONFIG_FILENAME_HOME));
        }

        for path in &candidates {
            if path.exists() {
                tracing::debug!(path = %path.display(), "using config file");
                return Self::load(path);
            }
        }

        Err(Error::ConfigNotFound(dir.to_path_buf()))
    }

    /// Look up a cluster by name and resolve its credentials.
    pub fn resolve_cluster(&self, name: &str) -> Result<ResolvedCluster> {
        let cluster = self
            .clusters
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| Error::UnknownCluster {
                name: name.to_string(),
                known: self.cluster_names().join(", "),
            })?;
        cluster.resolve()
    }

    pub fn cluster_names(&self) -> Vec<&str> {
        self.clusters.iter().map(|c| c.name.as_str()).collect()
    }

    fn validate(&self) -> Result<()> {
        if self.rollout.poll_interval.is_zero() {
            return Err(Error::InvalidConfig(
                "rollout.poll_interval must be greater than zero".to_string(),
            ));
        }
        if self.rollout.timeout < self.rollout.poll_interval {
            return Err(Error::InvalidConfig(
                "rollout.timeout must not be shorter than rollout.poll_interval".to_string(),
            ));
        }
        Ok(())
    }
}
