// ABOUTME: End-to-end restart sequence for one operator namespace.
// ABOUTME: Confirm, discover, recycle lifecycle-managed pods, then restart owned deployments.

use super::{Confirmation, RestartError, RestartReport, RestartRun, RolloutWatcher};
use crate::cluster::Cluster;
use crate::output::Output;
use crate::prompt::ConfirmationGate;
use crate::types::{Namespace, OperatorType};

/// Restart every deployment of an operator.
///
/// Returns `Ok(None)` when the gate declines; in that case nothing has been
/// read from or written to the cluster.
///
/// # Errors
///
/// The first failing step aborts the run; already applied pod deletions and
/// restarts are not undone.
pub async fn restart_operator<C: Cluster + ?Sized>(
    cluster: &C,
    gate: &dyn ConfirmationGate,
    watcher: &RolloutWatcher,
    output: &Output,
    operator: OperatorType,
    namespace: Namespace,
) -> Result<Option<RestartReport>, RestartError> {
    let run = match RestartRun::new(operator, namespace).confirm(gate, output) {
        Confirmation::Approved(run) => run,
        Confirmation::Declined => return Ok(None),
    };

    output.progress("  → Discovering deployments...");
    let run = run.discover(cluster).await?;
    let deployments = run.deployments();
    output.progress(&format!(
        "  → Found {} lifecycle-managed and {} directly-owned deployment(s)",
        deployments.lifecycle_managed.len(),
        deployments.directly_owned.len()
    ));

    let run = run
        .recycle_lifecycle_managed(cluster, watcher, output)
        .await?;
    let run = run.restart_directly_owned(cluster, watcher, output).await?;

    Ok(Some(run.finish()))
}
