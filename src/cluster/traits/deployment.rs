// ABOUTME: Deployment listing trait for cluster clients.
// ABOUTME: Returns name, labels and pod selector of matching deployments.

use super::super::{ClusterError, LabelSelector};
use crate::types::{DeploymentName, Namespace};
use async_trait::async_trait;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::LabelSelector as K8sLabelSelector;
use std::collections::BTreeMap;

/// Read access to deployments.
#[async_trait]
pub trait DeploymentOps: Send + Sync {
    /// List deployments in `namespace` whose labels match `selector`.
    async fn list_deployments(
        &self,
        namespace: &Namespace,
        selector: &LabelSelector,
    ) -> Result<Vec<DeploymentSummary>, ClusterError>;
}

/// Summary information about a deployment.
#[derive(Debug, Clone)]
pub struct DeploymentSummary {
    /// Deployment name.
    pub name: DeploymentName,
    /// Labels on the deployment object itself.
    pub labels: BTreeMap<String, String>,
    /// `spec.selector`, absent when the deployment has no spec.
    pub pod_selector: Option<K8sLabelSelector>,
}
