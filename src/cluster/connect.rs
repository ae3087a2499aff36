// ABOUTME: Builds a Kubernetes client from a resolved cluster config.
// ABOUTME: Uses an in-memory kubeconfig with token authentication.

use kube::Client;
use kube::config::{KubeConfigOptions, Kubeconfig};
use serde_json::json;
use snafu::ResultExt;

use super::KubeCluster;
use super::error::{ClientSnafu, ConfigSnafu, ConnectError, KubeconfigSnafu};
use crate::config::ResolvedCluster;

const CONTEXT_NAME: &str = "restartctl";

/// Create a client for the resolved cluster.
///
/// No request is made here; an unreachable server surfaces on the first call.
pub async fn connect(cluster: &ResolvedCluster) -> Result<KubeCluster, ConnectError> {
    let server = cluster.server_api.clone();
    let kubeconfig: Kubeconfig = serde_json::from_value(json!({
        "apiVersion": "v1",
        "kind": "Config",
        "clusters": [{
            "name": CONTEXT_NAME,
            "cluster": {
                "server": cluster.server_api,
                "insecure-skip-tls-verify": cluster.insecure_skip_tls_verify,
            }
        }],
        "users": [{
            "name": CONTEXT_NAME,
            "user": { "token": cluster.token }
        }],
        "contexts": [{
            "name": CONTEXT_NAME,
            "context": {
                "cluster": CONTEXT_NAME,
                "user": CONTEXT_NAME,
                "namespace": cluster.operator_namespace.as_str(),
            }
        }],
        "current-context": CONTEXT_NAME,
    }))
    .context(KubeconfigSnafu {
        server: server.clone(),
    })?;

    let config = kube::Config::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default())
        .await
        .context(ConfigSnafu {
            server: server.clone(),
        })?;

    tracing::debug!(%server, namespace = %cluster.operator_namespace, "creating cluster client");
    let client = Client::try_from(config).context(ClientSnafu { server })?;
    Ok(KubeCluster::new(client))
}
