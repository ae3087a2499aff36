// ABOUTME: Restart command implementation.
// ABOUTME: Connects to the target cluster and runs the operator restart sequence.

use super::cluster_connection::connect_to_cluster;
use restartctl::config::Config;
use restartctl::error::{Error, Result};
use restartctl::output::Output;
use restartctl::prompt::TerminalPrompt;
use restartctl::restart::{RolloutWatcher, restart_operator};
use restartctl::types::OperatorType;

/// Restart all deployments of `operator` on `target_cluster`.
pub async fn restart(
    config: Config,
    target_cluster: &str,
    operator: Option<OperatorType>,
    mut output: Output,
) -> Result<()> {
    let (resolved, cluster) = connect_to_cluster(&config, target_cluster, &output).await?;
    let operator = operator.ok_or(Error::MissingOperatorType)?;

    output.start_timer();
    let watcher = RolloutWatcher::from_config(&config.rollout);
    let gate = TerminalPrompt::stdin();

    let report = restart_operator(
        &cluster,
        &gate,
        &watcher,
        &output,
        operator,
        resolved.operator_namespace.clone(),
    )
    .await?;

    let Some(report) = report else {
        output.success("Restart cancelled");
        return Ok(());
    };

    // Emit collected warnings
    for warning in &report.warnings {
        output.warning(&warning.message);
    }

    output.success(&format!(
        "Restarted {} operator in {}: {} pod(s) deleted, {} deployment(s) restarted",
        operator,
        resolved.operator_namespace,
        report.pods_deleted,
        report.restarted.len()
    ));
    Ok(())
}
