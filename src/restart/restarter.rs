// ABOUTME: Restarts directly-owned deployments with a rollout restart.
// ABOUTME: Does not wait for the rollout; the watcher does that.

use super::RestartError;
use crate::cluster::{ResourceRef, RolloutService};
use crate::types::{DeploymentName, Namespace};

/// Trigger a rollout restart of `deployment`.
///
/// # Errors
///
/// Returns `RestartError::InvalidTarget` if the deployment name can't form a
/// valid resource reference, and the cluster error if the restart is refused.
pub async fn trigger_restart<R: RolloutService + ?Sized>(
    rollout: &R,
    namespace: &Namespace,
    deployment: &DeploymentName,
) -> Result<(), RestartError> {
    let target = ResourceRef::deployment(deployment)?;
    rollout.restart(namespace, &target).await?;
    tracing::info!(%namespace, %target, "triggered rollout restart");
    Ok(())
}
