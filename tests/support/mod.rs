// ABOUTME: Test support utilities.
// ABOUTME: Provides an in-memory recording cluster, a scripted gate and an output capture.

// Each test binary only uses some of these helpers, so allow dead_code.
#![allow(dead_code)]

use async_trait::async_trait;
use futures::StreamExt;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::LabelSelector as K8sLabelSelector;
use parking_lot::Mutex;
use restartctl::cluster::{
    ClusterError, DeploymentOps, DeploymentSummary, LabelSelector, LogLines, LogOptions, PodOps,
    PodSummary, ResourceRef, RolloutService, RolloutState, RolloutStatus,
};
use restartctl::output::{Output, OutputMode};
use restartctl::prompt::ConfirmationGate;
use restartctl::restart::{
    LIFECYCLE_OWNER_LABEL, LIFECYCLE_OWNER_VALUE, PROVIDER_LABEL, PROVIDER_VALUE,
};
use restartctl::types::{DeploymentName, Namespace, PodName};
use std::collections::{BTreeMap, VecDeque};
use std::io::{self, Write};
use std::sync::{Arc, Once};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for tests. Safe to call multiple times.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::EnvFilter;
        let filter = EnvFilter::from_default_env()
            .add_directive("restartctl=debug".parse().unwrap());
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init()
            .ok();
    });
}

pub fn namespace() -> Namespace {
    Namespace::new("toolchain-host-operator").unwrap()
}

/// A call made against the fake cluster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ListDeployments(String),
    ListPods(String),
    DeletePod(String),
    Restart(String),
    RolloutStatus(String),
    Logs(String),
}

impl Call {
    pub fn is_mutation(&self) -> bool {
        matches!(self, Call::DeletePod(_) | Call::Restart(_))
    }
}

/// A deployment known to the fake cluster.
#[derive(Debug, Clone)]
pub struct FakeDeployment {
    pub name: String,
    pub labels: BTreeMap<String, String>,
    pub pod_labels: BTreeMap<String, String>,
}

impl FakeDeployment {
    /// Deployment labelled as owned by the lifecycle manager.
    pub fn lifecycle_managed(name: &str) -> Self {
        Self::new(name, &[(LIFECYCLE_OWNER_LABEL, LIFECYCLE_OWNER_VALUE)])
    }

    /// Deployment labelled as owned by the operator itself.
    pub fn directly_owned(name: &str) -> Self {
        Self::new(name, &[(PROVIDER_LABEL, PROVIDER_VALUE)])
    }

    pub fn new(name: &str, labels: &[(&str, &str)]) -> Self {
        Self {
            name: name.to_string(),
            labels: to_map(labels),
            pod_labels: to_map(&[("app", name)]),
        }
    }

    pub fn with_label(mut self, key: &str, value: &str) -> Self {
        self.labels.insert(key.to_string(), value.to_string());
        self
    }

    fn summary(&self) -> DeploymentSummary {
        DeploymentSummary {
            name: DeploymentName::new(self.name.clone()),
            labels: self.labels.clone(),
            pod_selector: Some(K8sLabelSelector {
                match_labels: Some(self.pod_labels.clone()),
                match_expressions: None,
            }),
        }
    }
}

struct FakePod {
    name: String,
    namespace: String,
    labels: BTreeMap<String, String>,
}

#[derive(Default)]
struct State {
    deployments: Vec<FakeDeployment>,
    pods: Vec<FakePod>,
    calls: Vec<Call>,
    deletions: usize,
    fail_delete_at: Option<usize>,
    fail_restart_of: Option<String>,
    fail_list_deployments: bool,
    rollout_script: VecDeque<Vec<(String, RolloutState)>>,
    log_lines: Vec<String>,
}

/// In-memory cluster that records every call.
///
/// Rollout status answers from the script first; once the script is used
/// up, every deployment matching the selector reports `Complete`.
#[derive(Default)]
pub struct FakeCluster {
    state: Mutex<State>,
}

impl FakeCluster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_deployment(self, deployment: FakeDeployment) -> Self {
        self.state.lock().deployments.push(deployment);
        self
    }

    /// Add a pod belonging to `deployment` in the default namespace.
    pub fn with_pod(self, deployment: &str, pod: &str) -> Self {
        self.with_pod_in(deployment, pod, namespace().as_str())
    }

    pub fn with_pod_in(self, deployment: &str, pod: &str, ns: &str) -> Self {
        self.state.lock().pods.push(FakePod {
            name: pod.to_string(),
            namespace: ns.to_string(),
            labels: to_map(&[("app", deployment)]),
        });
        self
    }

    /// Make the `n`-th pod deletion (1-based) fail.
    pub fn fail_delete_at(self, n: usize) -> Self {
        self.state.lock().fail_delete_at = Some(n);
        self
    }

    pub fn fail_restart_of(self, deployment: &str) -> Self {
        self.state.lock().fail_restart_of = Some(deployment.to_string());
        self
    }

    pub fn fail_list_deployments(self) -> Self {
        self.state.lock().fail_list_deployments = true;
        self
    }

    /// Queue one rollout status answer.
    pub fn then_rollout(self, statuses: &[(&str, RolloutState)]) -> Self {
        self.state.lock().rollout_script.push_back(
            statuses
                .iter()
                .map(|(name, state)| (name.to_string(), state.clone()))
                .collect(),
        );
        self
    }

    pub fn with_log_lines(self, lines: &[&str]) -> Self {
        self.state.lock().log_lines = lines.iter().map(|l| l.to_string()).collect();
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().calls.clone()
    }

    pub fn mutations(&self) -> Vec<Call> {
        self.calls().into_iter().filter(Call::is_mutation).collect()
    }

    pub fn deleted_pods(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::DeletePod(name) => Some(name),
                _ => None,
            })
            .collect()
    }

    pub fn restarted(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Restart(target) => Some(target),
                _ => None,
            })
            .collect()
    }

    pub fn status_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::RolloutStatus(_)))
            .count()
    }

    pub fn remaining_pods(&self) -> Vec<String> {
        self.state.lock().pods.iter().map(|p| p.name.clone()).collect()
    }
}

/// An API error as the cluster would return it.
pub fn api_error(code: u16, reason: &str, message: &str) -> kube::Error {
    kube::Error::Api(kube::core::ErrorResponse {
        status: "Failure".to_string(),
        message: message.to_string(),
        reason: reason.to_string(),
        code,
    })
}

#[async_trait]
impl DeploymentOps for FakeCluster {
    async fn list_deployments(
        &self,
        namespace: &Namespace,
        selector: &LabelSelector,
    ) -> Result<Vec<DeploymentSummary>, ClusterError> {
        let mut state = self.state.lock();
        state.calls.push(Call::ListDeployments(selector.to_string()));
        if state.fail_list_deployments {
            return Err(ClusterError::List {
                resource: "deployments",
                namespace: namespace.to_string(),
                source: api_error(403, "Forbidden", "deployments is forbidden"),
            });
        }
        Ok(state
            .deployments
            .iter()
            .filter(|d| selector.matches(&d.labels))
            .map(FakeDeployment::summary)
            .collect())
    }
}

#[async_trait]
impl PodOps for FakeCluster {
    async fn list_pods(
        &self,
        namespace: &Namespace,
        selector: &LabelSelector,
    ) -> Result<Vec<PodSummary>, ClusterError> {
        let mut state = self.state.lock();
        state.calls.push(Call::ListPods(selector.to_string()));
        Ok(state
            .pods
            .iter()
            .filter(|p| p.namespace == namespace.as_str() && selector.matches(&p.labels))
            .map(|p| PodSummary {
                name: PodName::new(p.name.clone()),
                namespace: namespace.clone(),
            })
            .collect())
    }

    async fn delete_pod(&self, namespace: &Namespace, name: &PodName) -> Result<(), ClusterError> {
        let mut state = self.state.lock();
        state.calls.push(Call::DeletePod(name.to_string()));
        state.deletions += 1;
        if state.fail_delete_at == Some(state.deletions) {
            return Err(ClusterError::Delete {
                name: name.to_string(),
                namespace: namespace.to_string(),
                source: api_error(500, "InternalError", "etcd leader changed"),
            });
        }
        state
            .pods
            .retain(|p| !(p.name == name.as_str() && p.namespace == namespace.as_str()));
        Ok(())
    }

    async fn pod_logs(
        &self,
        _namespace: &Namespace,
        name: &PodName,
        _opts: &LogOptions,
    ) -> Result<LogLines, ClusterError> {
        let mut state = self.state.lock();
        state.calls.push(Call::Logs(name.to_string()));
        let lines: Vec<Result<String, ClusterError>> =
            state.log_lines.iter().cloned().map(Ok).collect();
        Ok(futures::stream::iter(lines).boxed())
    }
}

#[async_trait]
impl RolloutService for FakeCluster {
    async fn restart(&self, namespace: &Namespace, target: &ResourceRef) -> Result<(), ClusterError> {
        let mut state = self.state.lock();
        state.calls.push(Call::Restart(target.to_string()));
        if state.fail_restart_of.as_deref() == Some(target.name()) {
            return Err(ClusterError::Patch {
                target: target.to_string(),
                namespace: namespace.to_string(),
                source: api_error(409, "Conflict", "the object has been modified"),
            });
        }
        Ok(())
    }

    async fn rollout_status(
        &self,
        _namespace: &Namespace,
        selector: &LabelSelector,
    ) -> Result<Vec<RolloutStatus>, ClusterError> {
        let mut state = self.state.lock();
        state.calls.push(Call::RolloutStatus(selector.to_string()));
        let statuses = match state.rollout_script.pop_front() {
            Some(scripted) => scripted
                .into_iter()
                .map(|(name, state)| RolloutStatus {
                    deployment: DeploymentName::new(name),
                    state,
                })
                .collect(),
            None => state
                .deployments
                .iter()
                .filter(|d| selector.matches(&d.labels))
                .map(|d| RolloutStatus {
                    deployment: DeploymentName::new(d.name.clone()),
                    state: RolloutState::Complete,
                })
                .collect(),
        };
        Ok(statuses)
    }
}

/// Gate answering from a fixed decision and counting how often it was asked.
pub struct ScriptedGate {
    approve: bool,
    asked: Mutex<Vec<String>>,
}

impl ScriptedGate {
    pub fn approving() -> Self {
        Self {
            approve: true,
            asked: Mutex::new(Vec::new()),
        }
    }

    pub fn declining() -> Self {
        Self {
            approve: false,
            asked: Mutex::new(Vec::new()),
        }
    }

    pub fn asked(&self) -> Vec<String> {
        self.asked.lock().clone()
    }
}

impl ConfirmationGate for ScriptedGate {
    fn confirm(&self, _output: &Output, action: &str) -> bool {
        self.asked.lock().push(action.to_string());
        self.approve
    }
}

/// Write sink whose contents can be read back after the output is done.
#[derive(Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn output(&self, mode: OutputMode) -> Output {
        Output::with_sink(mode, Box::new(self.clone()))
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn to_map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
