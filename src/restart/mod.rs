// ABOUTME: Operator restart orchestration using the type state pattern.
// ABOUTME: Exports discovery, pod recycling, rollout restart/wait and the run state machine.

mod discovery;
mod error;
mod orchestrator;
mod ownership;
mod recycler;
mod restarter;
mod run;
mod state;
mod watcher;

pub use discovery::{DeploymentDescriptor, DiscoveredDeployments, discover};
pub use error::RestartError;
pub use orchestrator::restart_operator;
pub use ownership::{
    LIFECYCLE_OWNER_LABEL, LIFECYCLE_OWNER_VALUE, OwnershipClass, PROVIDER_LABEL, PROVIDER_VALUE,
    rollout_status_selector,
};
pub use recycler::recycle;
pub use restarter::trigger_restart;
pub use run::{Confirmation, RestartReport, RestartRun};
pub use state::{Completed, Confirmed, Discovered, Idle, Recycled};
pub use watcher::RolloutWatcher;
