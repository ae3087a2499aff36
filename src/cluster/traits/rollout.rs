// ABOUTME: Rollout restart and rollout status trait for cluster clients.
// ABOUTME: Also evaluates whether a deployment's rollout has converged.

use super::super::{ClusterError, LabelSelector, ResourceRef};
use crate::types::{DeploymentName, Namespace};
use async_trait::async_trait;
use k8s_openapi::api::apps::v1::Deployment;
use kube::ResourceExt;

/// Pod template annotation whose change makes the controller roll out a new
/// replica set without an image change.
pub const RESTARTED_AT_ANNOTATION: &str = "kubectl.kubernetes.io/restartedAt";

/// Condition reason set by the deployment controller when a rollout stalls.
const PROGRESS_DEADLINE_EXCEEDED: &str = "ProgressDeadlineExceeded";

/// Declarative rollout operations.
///
/// Everything the operation needs is passed in; implementations hold no
/// per-call configuration.
#[async_trait]
pub trait RolloutService: Send + Sync {
    /// Trigger a rollout restart of `target`.
    async fn restart(&self, namespace: &Namespace, target: &ResourceRef)
    -> Result<(), ClusterError>;

    /// Current rollout state of every deployment matching `selector`.
    async fn rollout_status(
        &self,
        namespace: &Namespace,
        selector: &LabelSelector,
    ) -> Result<Vec<RolloutStatus>, ClusterError>;
}

/// Rollout state of one deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RolloutStatus {
    pub deployment: DeploymentName,
    pub state: RolloutState,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RolloutState {
    /// All replicas are updated and available.
    Complete,
    /// Still rolling out; the message says what is pending.
    Progressing(String),
    /// The rollout will not converge on its own.
    Failed(String),
}

impl RolloutState {
    /// Evaluate a deployment the way `kubectl rollout status` does.
    pub fn evaluate(deployment: &Deployment) -> Self {
        let name = deployment.name_any();
        let generation = deployment.metadata.generation.unwrap_or(0);
        let Some(status) = deployment.status.as_ref() else {
            return RolloutState::Progressing(
                "waiting for deployment spec update to be observed".to_string(),
            );
        };

        if generation > status.observed_generation.unwrap_or(0) {
            return RolloutState::Progressing(
                "waiting for deployment spec update to be observed".to_string(),
            );
        }

        let stalled = status.conditions.iter().flatten().any(|c| {
            c.type_ == "Progressing" && c.reason.as_deref() == Some(PROGRESS_DEADLINE_EXCEEDED)
        });
        if stalled {
            return RolloutState::Failed(format!(
                "deployment {name} exceeded its progress deadline"
            ));
        }

        let updated = status.updated_replicas.unwrap_or(0);
        if let Some(desired) = deployment.spec.as_ref().and_then(|s| s.replicas)
            && updated < desired
        {
            return RolloutState::Progressing(format!(
                "{updated} out of {desired} new replicas have been updated"
            ));
        }

        let replicas = status.replicas.unwrap_or(0);
        if replicas > updated {
            return RolloutState::Progressing(format!(
                "{} old replicas are pending termination",
                replicas - updated
            ));
        }

        let available = status.available_replicas.unwrap_or(0);
        if available < updated {
            return RolloutState::Progressing(format!(
                "{available} of {updated} updated replicas are available"
            ));
        }

        RolloutState::Complete
    }
}
