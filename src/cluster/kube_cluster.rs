// ABOUTME: Kubernetes API implementation of the cluster capability traits.
// ABOUTME: Wraps a kube Client; every call is scoped to one namespace.

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use futures::{AsyncBufReadExt, StreamExt, TryStreamExt};
use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::core::v1::Pod;
use kube::api::{Api, DeleteParams, ListParams, LogParams, Patch, PatchParams};
use kube::{Client, ResourceExt};
use serde_json::json;

use super::traits::{
    DeploymentOps, DeploymentSummary, LogLines, LogOptions, PodOps, PodSummary,
    RESTARTED_AT_ANNOTATION, RolloutService, RolloutState, RolloutStatus,
};
use super::{ClusterError, LabelSelector, ResourceRef};
use crate::types::{DeploymentName, Namespace, PodName};

/// Field manager recorded on restart patches.
const FIELD_MANAGER: &str = "restartctl";

/// Cluster client backed by the Kubernetes API.
#[derive(Clone)]
pub struct KubeCluster {
    client: Client,
}

impl KubeCluster {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    fn deployments(&self, namespace: &Namespace) -> Api<Deployment> {
        Api::namespaced(self.client.clone(), namespace.as_str())
    }

    fn pods(&self, namespace: &Namespace) -> Api<Pod> {
        Api::namespaced(self.client.clone(), namespace.as_str())
    }

    async fn list_deployment_objects(
        &self,
        namespace: &Namespace,
        selector: &LabelSelector,
    ) -> Result<Vec<Deployment>, ClusterError> {
        let params = ListParams::default().labels(&selector.to_string());
        tracing::debug!(%namespace, %selector, "listing deployments");
        let list = self
            .deployments(namespace)
            .list(&params)
            .await
            .map_err(|source| ClusterError::List {
                resource: "deployments",
                namespace: namespace.to_string(),
                source,
            })?;
        Ok(list.items)
    }
}

#[async_trait]
impl DeploymentOps for KubeCluster {
    async fn list_deployments(
        &self,
        namespace: &Namespace,
        selector: &LabelSelector,
    ) -> Result<Vec<DeploymentSummary>, ClusterError> {
        let items = self.list_deployment_objects(namespace, selector).await?;
        Ok(items
            .into_iter()
            .map(|d| DeploymentSummary {
                name: DeploymentName::new(d.name_any()),
                labels: d.labels().clone(),
                pod_selector: d.spec.map(|s| s.selector),
            })
            .collect())
    }
}

#[async_trait]
impl PodOps for KubeCluster {
    async fn list_pods(
        &self,
        namespace: &Namespace,
        selector: &LabelSelector,
    ) -> Result<Vec<PodSummary>, ClusterError> {
        let params = ListParams::default().labels(&selector.to_string());
        tracing::debug!(%namespace, %selector, "listing pods");
        let list = self
            .pods(namespace)
            .list(&params)
            .await
            .map_err(|source| ClusterError::List {
                resource: "pods",
                namespace: namespace.to_string(),
                source,
            })?;

        Ok(list
            .items
            .into_iter()
            .map(|p| PodSummary {
                name: PodName::new(p.name_any()),
                namespace: namespace.clone(),
            })
            .collect())
    }

    async fn delete_pod(&self, namespace: &Namespace, name: &PodName) -> Result<(), ClusterError> {
        tracing::debug!(%namespace, pod = %name, "deleting pod");
        self.pods(namespace)
            .delete(name.as_str(), &DeleteParams::default())
            .await
            .map_err(|source| ClusterError::Delete {
                name: name.to_string(),
                namespace: namespace.to_string(),
                source,
            })?;
        Ok(())
    }

    async fn pod_logs(
        &self,
        namespace: &Namespace,
        name: &PodName,
        opts: &LogOptions,
    ) -> Result<LogLines, ClusterError> {
        let params = LogParams {
            container: opts.container.clone(),
            follow: opts.follow,
            timestamps: opts.timestamps,
            tail_lines: opts.tail,
            ..Default::default()
        };

        let reader = self
            .pods(namespace)
            .log_stream(name.as_str(), &params)
            .await
            .map_err(|source| ClusterError::Logs {
                name: name.to_string(),
                source,
            })?;

        Ok(reader.lines().map_err(ClusterError::from).boxed())
    }
}

#[async_trait]
impl RolloutService for KubeCluster {
    async fn restart(
        &self,
        namespace: &Namespace,
        target: &ResourceRef,
    ) -> Result<(), ClusterError> {
        let api = self.deployments(namespace);
        let current = api
            .get(target.name())
            .await
            .map_err(|source| ClusterError::Get {
                target: target.to_string(),
                namespace: namespace.to_string(),
                source,
            })?;

        ensure_not_paused(&current, target)?;

        let restarted_at = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
        let patch = restart_patch(&restarted_at);
        let params = PatchParams {
            field_manager: Some(FIELD_MANAGER.to_string()),
            ..Default::default()
        };

        tracing::debug!(%namespace, %target, %restarted_at, "patching restart annotation");
        api.patch(target.name(), &params, &Patch::Strategic(&patch))
            .await
            .map_err(|source| ClusterError::Patch {
                target: target.to_string(),
                namespace: namespace.to_string(),
                source,
            })?;
        Ok(())
    }

    async fn rollout_status(
        &self,
        namespace: &Namespace,
        selector: &LabelSelector,
    ) -> Result<Vec<RolloutStatus>, ClusterError> {
        let items = self.list_deployment_objects(namespace, selector).await?;
        Ok(items
            .iter()
            .map(|d| RolloutStatus {
                deployment: DeploymentName::new(d.name_any()),
                state: RolloutState::evaluate(d),
            })
            .collect())
    }
}

/// Refuse to restart a paused deployment, as `kubectl rollout restart` does.
fn ensure_not_paused(deployment: &Deployment, target: &ResourceRef) -> Result<(), ClusterError> {
    if deployment.spec.as_ref().and_then(|s| s.paused) == Some(true) {
        return Err(ClusterError::Validation(format!(
            "can't restart paused {target} (run rollout resume first)"
        )));
    }
    Ok(())
}

/// Strategic merge patch stamping the pod template with the restart time.
fn restart_patch(restarted_at: &str) -> serde_json::Value {
    json!({
        "spec": {
            "template": {
                "metadata": {
                    "annotations": { RESTARTED_AT_ANNOTATION: restarted_at }
                }
            }
        }
    })
}
