// ABOUTME: Cluster error types for API calls and client construction.
// ABOUTME: API failures keep the kube error as source; connection uses SNAFU context.

use snafu::Snafu;

/// Failure of a single cluster API call.
///
/// Each variant names the verb and the object so that the CLI can print the
/// failure verbatim.
#[derive(Debug, thiserror::Error)]
pub enum ClusterError {
    #[error("failed to list {resource} in namespace {namespace}: {source}")]
    List {
        resource: &'static str,
        namespace: String,
        #[source]
        source: kube::Error,
    },

    #[error("failed to get {target} in namespace {namespace}: {source}")]
    Get {
        target: String,
        namespace: String,
        #[source]
        source: kube::Error,
    },

    #[error("failed to delete pod {name} in namespace {namespace}: {source}")]
    Delete {
        name: String,
        namespace: String,
        #[source]
        source: kube::Error,
    },

    #[error("failed to patch {target} in namespace {namespace}: {source}")]
    Patch {
        target: String,
        namespace: String,
        #[source]
        source: kube::Error,
    },

    #[error("failed to read logs of pod {name}: {source}")]
    Logs {
        name: String,
        #[source]
        source: kube::Error,
    },

    #[error("log stream interrupted: {0}")]
    LogStream(#[from] std::io::Error),

    #[error("invalid request: {0}")]
    Validation(String),
}

impl ClusterError {
    /// Whether the request was rejected before reaching the API server.
    pub fn is_validation(&self) -> bool {
        matches!(self, ClusterError::Validation(_))
    }
}

/// Failure to build a client for a resolved cluster.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ConnectError {
    #[snafu(display("invalid kubeconfig for {server}: {source}"))]
    Kubeconfig {
        server: String,
        source: serde_json::Error,
    },

    #[snafu(display("invalid client configuration for {server}: {source}"))]
    Config {
        server: String,
        source: kube::config::KubeconfigError,
    },

    #[snafu(display("failed to create client for {server}: {source}"))]
    Client { server: String, source: kube::Error },
}
