// ABOUTME: Type-safe names and validated domain types.
// ABOUTME: Uses phantom types to prevent name confusion at compile time.

mod name;
mod namespace;
mod operator_type;

pub use name::{DeploymentName, Name, PodName};
pub use namespace::{Namespace, NamespaceError};
pub use operator_type::OperatorType;
