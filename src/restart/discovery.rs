// ABOUTME: Finds the deployments to restart and partitions them by ownership.
// ABOUTME: Both classes must be non-empty for a restart run to proceed.

use nonempty::NonEmpty;

use super::{OwnershipClass, RestartError};
use crate::cluster::{DeploymentOps, DeploymentSummary, LabelSelector};
use crate::diagnostics::{Diagnostics, Warning};
use crate::types::{DeploymentName, Namespace};

/// A deployment selected for restart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentDescriptor {
    pub name: DeploymentName,
    pub namespace: Namespace,
    /// Selector of the deployment's pods. Empty when the deployment has no spec.
    pub pod_selector: LabelSelector,
    pub class: OwnershipClass,
}

/// Deployments in a namespace, split by ownership class.
///
/// Each list keeps the order returned by the API server, which is not
/// guaranteed to be stable between runs.
#[derive(Debug, Clone)]
pub struct DiscoveredDeployments {
    pub lifecycle_managed: NonEmpty<DeploymentDescriptor>,
    pub directly_owned: NonEmpty<DeploymentDescriptor>,
}

/// List and partition the deployments of `namespace`.
///
/// A deployment carrying both ownership labels is treated as
/// lifecycle-managed only, and a warning is recorded.
///
/// # Errors
///
/// Returns `RestartError::EmptyOwnershipSet` if either class is empty
/// (lifecycle-managed is checked first), or the cluster error of a failed
/// listing.
pub async fn discover<C: DeploymentOps + ?Sized>(
    cluster: &C,
    namespace: &Namespace,
    diag: &mut Diagnostics,
) -> Result<DiscoveredDeployments, RestartError> {
    let lifecycle_selector = OwnershipClass::LifecycleManaged.selector();
    let managed = cluster
        .list_deployments(namespace, &lifecycle_selector)
        .await?;
    let owned = cluster
        .list_deployments(namespace, &OwnershipClass::DirectlyOwned.selector())
        .await?;

    let (owned, overlapping): (Vec<_>, Vec<_>) = owned
        .into_iter()
        .partition(|d| !lifecycle_selector.matches(&d.labels));
    for d in &overlapping {
        diag.warn(Warning::overlapping_ownership(format!(
            "deployment {} carries both ownership labels; restarting it as {}",
            d.name,
            OwnershipClass::LifecycleManaged.as_str()
        )));
    }

    let lifecycle_managed = describe(managed, namespace, OwnershipClass::LifecycleManaged)?;
    let directly_owned = describe(owned, namespace, OwnershipClass::DirectlyOwned)?;

    tracing::info!(
        %namespace,
        lifecycle_managed = lifecycle_managed.len(),
        directly_owned = directly_owned.len(),
        "discovered deployments"
    );

    Ok(DiscoveredDeployments {
        lifecycle_managed,
        directly_owned,
    })
}

fn describe(
    summaries: Vec<DeploymentSummary>,
    namespace: &Namespace,
    class: OwnershipClass,
) -> Result<NonEmpty<DeploymentDescriptor>, RestartError> {
    let descriptors = summaries
        .into_iter()
        .map(|d| {
            let pod_selector = match &d.pod_selector {
                Some(spec) => LabelSelector::from_k8s(spec).map_err(|e| {
                    RestartError::InvalidPodSelector {
                        deployment: d.name.clone(),
                        reason: e.to_string(),
                    }
                })?,
                None => LabelSelector::default(),
            };
            Ok(DeploymentDescriptor {
                name: d.name,
                namespace: namespace.clone(),
                pod_selector,
                class,
            })
        })
        .collect::<Result<Vec<_>, RestartError>>()?;

    NonEmpty::from_vec(descriptors).ok_or_else(|| RestartError::EmptyOwnershipSet {
        class,
        namespace: namespace.clone(),
    })
}
