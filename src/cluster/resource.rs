// ABOUTME: Validated references to cluster resources ("deployment/<name>").
// ABOUTME: Malformed references are reported as errors instead of aborting.

use std::fmt;

use crate::types::DeploymentName;

/// Kinds of resources a rollout can be triggered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Deployment,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Deployment => "deployment",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResourceRefError {
    #[error("resource name cannot be empty")]
    EmptyName,

    #[error("resource name exceeds maximum length of 253 characters")]
    NameTooLong,

    #[error("invalid resource name '{0}'")]
    InvalidName(String),
}

/// A `<kind>/<name>` reference to a namespaced resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRef {
    kind: ResourceKind,
    name: String,
}

impl ResourceRef {
    /// Reference to a deployment, validating its name.
    pub fn deployment(name: &DeploymentName) -> Result<Self, ResourceRefError> {
        validate_name(name.as_str())?;
        Ok(Self {
            kind: ResourceKind::Deployment,
            name: name.to_string(),
        })
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for ResourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind.as_str(), self.name)
    }
}

/// RFC 1123 subdomain: lowercase alphanumerics, '-' and '.', alphanumeric at both ends.
fn validate_name(name: &str) -> Result<(), ResourceRefError> {
    if name.is_empty() {
        return Err(ResourceRefError::EmptyName);
    }
    if name.len() > 253 {
        return Err(ResourceRefError::NameTooLong);
    }

    let valid_chars = name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '.');
    let alnum = |c: Option<char>| c.is_some_and(|c| c.is_ascii_lowercase() || c.is_ascii_digit());

    if !valid_chars || !alnum(name.chars().next()) || !alnum(name.chars().last()) {
        return Err(ResourceRefError::InvalidName(name.to_string()));
    }
    Ok(())
}
