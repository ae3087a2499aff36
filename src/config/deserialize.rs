// ABOUTME: Custom serde deserializers for config types.
// ABOUTME: Requires a non-empty cluster list with unique names.

use nonempty::NonEmpty;
use serde::Deserialize;
use std::collections::HashSet;

use super::ClusterConfig;

pub fn deserialize_clusters<'de, D>(deserializer: D) -> Result<NonEmpty<ClusterConfig>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let clusters: Vec<ClusterConfig> = Vec::deserialize(deserializer)?;

    let mut seen = HashSet::new();
    for cluster in &clusters {
        if !seen.insert(cluster.name.as_str()) {
            return Err(serde::de::Error::custom(format!(
                "duplicate cluster name: {}",
                cluster.name
            )));
        }
    }

    NonEmpty::from_vec(clusters)
        .ok_or_else(|| serde::de::Error::custom("at least one cluster is required"))
}
