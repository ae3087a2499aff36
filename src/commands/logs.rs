// ABOUTME: Logs command implementation.
// ABOUTME: Streams the logs of a pod in the target cluster's operator namespace.

use super::cluster_connection::connect_to_cluster;
use restartctl::cluster::LogOptions;
use restartctl::config::Config;
use restartctl::error::Result;
use restartctl::logs::stream_logs;
use restartctl::output::Output;
use restartctl::types::PodName;

/// Print the logs of `pod`.
pub async fn logs(
    config: Config,
    target_cluster: &str,
    pod: String,
    opts: LogOptions,
    output: Output,
) -> Result<()> {
    let (resolved, cluster) = connect_to_cluster(&config, target_cluster, &output).await?;
    let pod = PodName::new(pod);

    stream_logs(&cluster, &resolved.operator_namespace, &pod, &opts, &output).await?;
    Ok(())
}
