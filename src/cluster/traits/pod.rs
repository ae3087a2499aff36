// ABOUTME: Pod operations trait for cluster clients.
// ABOUTME: List and delete pods by selector, and stream pod logs.

use super::super::{ClusterError, LabelSelector};
use crate::types::{Namespace, PodName};
use async_trait::async_trait;
use futures::Stream;
use std::pin::Pin;

/// Stream of log lines from a pod.
pub type LogLines = Pin<Box<dyn Stream<Item = Result<String, ClusterError>> + Send>>;

/// Pod operations.
#[async_trait]
pub trait PodOps: Send + Sync {
    /// List pods in `namespace` matching `selector`.
    async fn list_pods(
        &self,
        namespace: &Namespace,
        selector: &LabelSelector,
    ) -> Result<Vec<PodSummary>, ClusterError>;

    /// Delete a single pod.
    async fn delete_pod(&self, namespace: &Namespace, name: &PodName) -> Result<(), ClusterError>;

    /// Stream the logs of a pod.
    async fn pod_logs(
        &self,
        namespace: &Namespace,
        name: &PodName,
        opts: &LogOptions,
    ) -> Result<LogLines, ClusterError>;
}

/// A pod found by selector. Pods are disposable, so only the name is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PodSummary {
    pub name: PodName,
    pub namespace: Namespace,
}

/// Options for log streaming.
#[derive(Debug, Clone, Default)]
pub struct LogOptions {
    /// Container to read from (required for multi-container pods).
    pub container: Option<String>,
    /// Follow log output (like `tail -f`).
    pub follow: bool,
    /// Prefix each line with its timestamp.
    pub timestamps: bool,
    /// Number of lines to show from the end.
    pub tail: Option<i64>,
}

impl LogOptions {
    /// Create options for tailing the last N lines.
    pub fn tail(n: i64) -> Self {
        Self {
            tail: Some(n),
            ..Default::default()
        }
    }
}
