// ABOUTME: Per-cluster connection settings and their resolved form.
// ABOUTME: Resolution reads the token and derives the operator namespace.

use serde::Deserialize;
use std::fmt;

use super::EnvValue;
use crate::error::{Error, Result};
use crate::types::Namespace;

/// Which operator runs in a cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClusterType {
    Host,
    Member,
}

impl ClusterType {
    /// Infer the type from a cluster name (`member-1` is a member cluster).
    pub fn from_name(name: &str) -> Self {
        if name.starts_with("member") {
            ClusterType::Member
        } else {
            ClusterType::Host
        }
    }

    /// Namespace the operator is installed into by default.
    pub fn default_operator_namespace(&self) -> &'static str {
        match self {
            ClusterType::Host => "toolchain-host-operator",
            ClusterType::Member => "toolchain-member-operator",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClusterConfig {
    pub name: String,

    pub server_api: String,

    pub token: EnvValue,

    #[serde(default, rename = "type")]
    pub cluster_type: Option<ClusterType>,

    #[serde(default)]
    pub operator_namespace: Option<String>,

    #[serde(default)]
    pub insecure_skip_tls_verify: bool,
}

impl ClusterConfig {
    pub fn cluster_type(&self) -> ClusterType {
        self.cluster_type
            .unwrap_or_else(|| ClusterType::from_name(&self.name))
    }

    /// Resolve the token and operator namespace.
    pub fn resolve(&self) -> Result<ResolvedCluster> {
        if !(self.server_api.starts_with("https://") || self.server_api.starts_with("http://")) {
            return Err(Error::InvalidConfig(format!(
                "cluster '{}': server_api must be an http(s) URL, got '{}'",
                self.name, self.server_api
            )));
        }

        let token = self.token.resolve()?;
        if token.trim().is_empty() {
            return Err(Error::InvalidConfig(format!(
                "cluster '{}': token is empty",
                self.name
            )));
        }

        let namespace = self
            .operator_namespace
            .as_deref()
            .unwrap_or_else(|| self.cluster_type().default_operator_namespace());
        let operator_namespace = Namespace::new(namespace).map_err(|e| {
            Error::InvalidConfig(format!("cluster '{}': operator_namespace: {}", self.name, e))
        })?;

        Ok(ResolvedCluster {
            name: self.name.clone(),
            server_api: self.server_api.clone(),
            token,
            operator_namespace,
            insecure_skip_tls_verify: self.insecure_skip_tls_verify,
        })
    }
}

/// Everything needed to talk to one cluster.
#[derive(Clone)]
pub struct ResolvedCluster {
    pub name: String,
    pub server_api: String,
    pub token: String,
    pub operator_namespace: Namespace,
    pub insecure_skip_tls_verify: bool,
}

impl fmt::Debug for ResolvedCluster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedCluster")
            .field("name", &self.name)
            .field("server_api", &self.server_api)
            .field("token", &"<redacted>")
            .field("operator_namespace", &self.operator_namespace)
            .field("insecure_skip_tls_verify", &self.insecure_skip_tls_verify)
            .finish()
    }
}
