// ABOUTME: Restarts lifecycle-managed deployments by deleting their pods.
// ABOUTME: Deletion is sequential and stops at the first failure.

use super::{DeploymentDescriptor, RestartError};
use crate::cluster::PodOps;
use crate::diagnostics::{Diagnostics, Warning};

/// Delete every current pod of `deployment` so its controller recreates them.
///
/// Pods are deleted one at a time in listing order. The first failed
/// deletion is returned as-is; pods after it are left untouched and nothing
/// is retried.
///
/// # Returns
///
/// Number of pods deleted. A deployment without pods yields `Ok(0)` and a
/// warning.
///
/// # Errors
///
/// Returns `RestartError::InvalidPodSelector` for an empty selector (which
/// would match every pod in the namespace) and the cluster error of a failed
/// list or delete call.
pub async fn recycle<C: PodOps + ?Sized>(
    cluster: &C,
    deployment: &DeploymentDescriptor,
    diag: &mut Diagnostics,
) -> Result<usize, RestartError> {
    if deployment.pod_selector.is_empty() {
        return Err(RestartError::InvalidPodSelector {
            deployment: deployment.name.clone(),
            reason: "selector is empty and would match every pod in the namespace".to_string(),
        });
    }

    let pods = cluster
        .list_pods(&deployment.namespace, &deployment.pod_selector)
        .await?;

    if pods.is_empty() {
        diag.warn(Warning::no_pods(format!(
            "deployment {} has no pods matching {}",
            deployment.name, deployment.pod_selector
        )));
        return Ok(0);
    }

    for pod in &pods {
        cluster.delete_pod(&pod.namespace, &pod.name).await?;
        tracing::info!(deployment = %deployment.name, pod = %pod.name, "deleted pod");
    }

    Ok(pods.len())
}
