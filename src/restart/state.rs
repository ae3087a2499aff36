// ABOUTME: Restart run state types for the type state pattern.
// ABOUTME: States carry the data that is only valid from that point on.

use nonempty::NonEmpty;

use super::{DeploymentDescriptor, DiscoveredDeployments};

/// Initial state: cluster resolved, nothing asked or read yet.
/// Available actions: `confirm()`
#[derive(Debug, Clone, Copy, Default)]
pub struct Idle;

/// Confirmed: the operator approved the restart.
/// Available actions: `discover()`
#[derive(Debug, Clone, Copy, Default)]
pub struct Confirmed;

/// Discovered: both ownership classes are known and non-empty.
/// Available actions: `recycle_lifecycle_managed()`
#[derive(Debug, Clone)]
pub struct Discovered {
    pub(crate) deployments: DiscoveredDeployments,
}

/// Recycled: every lifecycle-managed deployment has new pods and rolled out.
/// Available actions: `restart_directly_owned()`
#[derive(Debug, Clone)]
pub struct Recycled {
    pub(crate) directly_owned: NonEmpty<DeploymentDescriptor>,
}

/// Completed: every directly-owned deployment restarted and rolled out.
/// Available actions: `finish()`
#[derive(Debug, Clone, Copy, Default)]
pub struct Completed;
