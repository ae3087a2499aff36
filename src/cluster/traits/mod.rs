// ABOUTME: Composable capability traits for cluster clients.
// ABOUTME: Defines DeploymentOps, PodOps, RolloutService and the Cluster union.

mod deployment;
mod pod;
mod rollout;

pub use deployment::{DeploymentOps, DeploymentSummary};
pub use pod::{LogLines, LogOptions, PodOps, PodSummary};
pub use rollout::{RESTARTED_AT_ANNOTATION, RolloutService, RolloutState, RolloutStatus};

/// Everything a restart run needs from the cluster.
pub trait Cluster: DeploymentOps + PodOps + RolloutService {}

impl<T: DeploymentOps + PodOps + RolloutService> Cluster for T {}
