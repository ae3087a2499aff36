// ABOUTME: Cluster access: capability traits, the kube-backed client and request types.
// ABOUTME: Callers depend on the traits so tests can substitute an in-memory cluster.

mod connect;
mod error;
mod kube_cluster;
mod resource;
mod selector;
pub mod traits;

pub use connect::connect;
pub use error::{ClusterError, ConnectError};
pub use kube_cluster::KubeCluster;
pub use resource::{ResourceKind, ResourceRef, ResourceRefError};
pub use selector::{LabelSelector, Requirement, SelectorError};
pub use traits::*;
