// ABOUTME: Ownership classes that decide how a deployment is restarted.
// ABOUTME: Label constants are shared by discovery, the rollout watcher and tests.

use std::fmt;

use crate::cluster::LabelSelector;

/// Label set by the lifecycle manager (OLM) on deployments it owns.
pub const LIFECYCLE_OWNER_LABEL: &str = "olm.owner.kind";
pub const LIFECYCLE_OWNER_VALUE: &str = "ClusterServiceVersion";

/// Label set by the operator on deployments it manages itself.
pub const PROVIDER_LABEL: &str = "provider";
pub const PROVIDER_VALUE: &str = "codeready-toolchain";

/// How a deployment's restart is carried out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OwnershipClass {
    /// Owned by the external lifecycle manager; restarted by deleting its pods.
    LifecycleManaged,
    /// Owned by the operator; restarted through a rollout restart.
    DirectlyOwned,
}

impl OwnershipClass {
    /// The `(key, value)` label identifying this class.
    pub fn label(&self) -> (&'static str, &'static str) {
        match self {
            OwnershipClass::LifecycleManaged => (LIFECYCLE_OWNER_LABEL, LIFECYCLE_OWNER_VALUE),
            OwnershipClass::DirectlyOwned => (PROVIDER_LABEL, PROVIDER_VALUE),
        }
    }

    pub fn selector(&self) -> LabelSelector {
        let (key, value) = self.label();
        LabelSelector::matching(key, value)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OwnershipClass::LifecycleManaged => "lifecycle-managed",
            OwnershipClass::DirectlyOwned => "directly-owned",
        }
    }
}

impl fmt::Display for OwnershipClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (key, value) = self.label();
        write!(f, "{} ({key}={value})", self.as_str())
    }
}

/// Selector the rollout watcher polls after every restart step.
///
/// This is the provider label rather than the restarted deployment's own
/// labels, so one wait observes every provider-labelled deployment.
pub fn rollout_status_selector() -> LabelSelector {
    OwnershipClass::DirectlyOwned.selector()
}
