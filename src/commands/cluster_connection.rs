// ABOUTME: Shared helper for loading config and connecting to a named cluster.
// ABOUTME: Used by every command that talks to the cluster API.

use restartctl::cluster::{KubeCluster, connect};
use restartctl::config::{Config, ResolvedCluster};
use restartctl::error::Result;
use restartctl::output::Output;
use std::env;
use std::path::{Path, PathBuf};

/// Load the config from `explicit` or by discovery.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    match explicit {
        Some(path) => Config::load(path),
        None => {
            let cwd = env::current_dir()?;
            let home = env::var_os("HOME").map(PathBuf::from);
            Config::discover(&cwd, home.as_deref())
        }
    }
}

/// Resolve `cluster_name` and build a client for it.
///
/// This handles the common pattern of:
/// 1. Resolving the cluster's server, token and operator namespace
/// 2. Outputting progress messages
/// 3. Building the client
pub async fn connect_to_cluster(
    config: &Config,
    cluster_name: &str,
    output: &Output,
) -> Result<(ResolvedCluster, KubeCluster)> {
    let resolved = config.resolve_cluster(cluster_name)?;

    output.progress(&format!(
        "  → Connecting to {} ({})...",
        resolved.name, resolved.server_api
    ));
    let cluster = connect(&resolved).await?;

    Ok((resolved, cluster))
}
