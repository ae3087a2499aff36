// ABOUTME: Error types for restart runs.
// ABOUTME: Covers discovery, pod deletion, rollout restart and rollout wait failures.

use std::time::Duration;

use super::OwnershipClass;
use crate::cluster::{ClusterError, ResourceRefError};
use crate::error::ErrorKind;
use crate::types::{DeploymentName, Namespace};

/// Errors that abort a restart run.
///
/// None of these trigger a rollback: mutations applied before the failure
/// stay applied.
#[derive(Debug, thiserror::Error)]
pub enum RestartError {
    /// One of the ownership classes has no deployments.
    #[error("{class} deployments not found in namespace {namespace}")]
    EmptyOwnershipSet {
        class: OwnershipClass,
        namespace: Namespace,
    },

    /// A cluster API call failed.
    #[error(transparent)]
    Cluster(#[from] ClusterError),

    /// The deployment's pod selector can't be used to find its pods.
    #[error("invalid pod selector on deployment {deployment}: {reason}")]
    InvalidPodSelector {
        deployment: DeploymentName,
        reason: String,
    },

    /// The rollout restart target could not be built.
    #[error("invalid restart target: {0}")]
    InvalidTarget(#[from] ResourceRefError),

    /// The rollout status selector matched nothing.
    #[error("no deployments match {selector} in namespace {namespace}")]
    NoRolloutTargets {
        namespace: Namespace,
        selector: String,
    },

    /// Rollout did not converge in time.
    #[error(
        "timed out after {}s waiting for rollout of {selector} in namespace {namespace} (pending: {pending})",
        timeout.as_secs()
    )]
    RolloutTimeout {
        namespace: Namespace,
        selector: String,
        timeout: Duration,
        pending: String,
    },

    /// Rollout reported a failure condition.
    #[error("rollout of deployment {deployment} failed: {reason}")]
    RolloutFailed {
        deployment: DeploymentName,
        reason: String,
    },
}

impl RestartError {
    /// Returns the error kind for programmatic handling.
    pub fn kind(&self) -> ErrorKind {
        match self {
            RestartError::EmptyOwnershipSet { .. } => ErrorKind::EmptyOwnershipSet,
            RestartError::Cluster(e) if e.is_validation() => ErrorKind::Validation,
            RestartError::Cluster(_) => ErrorKind::Client,
            RestartError::InvalidPodSelector { .. } | RestartError::InvalidTarget(_) => {
                ErrorKind::Validation
            }
            RestartError::RolloutTimeout { .. } => ErrorKind::RolloutTimeout,
            RestartError::NoRolloutTargets { .. } | RestartError::RolloutFailed { .. } => {
                ErrorKind::RolloutFailed
            }
        }
    }

    /// The ownership class that was missing, if that is what failed.
    pub fn missing_class(&self) -> Option<OwnershipClass> {
        match self {
            RestartError::EmptyOwnershipSet { class, .. } => Some(*class),
            _ => None,
        }
    }
}
