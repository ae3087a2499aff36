// ABOUTME: Application-wide error types for restartctl.
// ABOUTME: Uses thiserror for ergonomic error handling.

use std::path::PathBuf;
use thiserror::Error;

use crate::cluster::{ClusterError, ConnectError};
use crate::restart::RestartError;
use crate::types::OperatorType;

#[derive(Debug, Error)]
pub enum Error {
    #[error("file already exists: {0}")]
    AlreadyExists(PathBuf),

    #[error("configuration file not found in {0}")]
    ConfigNotFound(PathBuf),

    #[error("unknown cluster '{name}' (configured: {known})")]
    UnknownCluster { name: String, known: String },

    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(
        "please specify one of the following operator names to restart: {}",
        OperatorType::names()
    )]
    MissingOperatorType,

    #[error(transparent)]
    Connect(#[from] ConnectError),

    #[error(transparent)]
    Restart(#[from] RestartError),

    #[error(transparent)]
    Cluster(#[from] ClusterError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Cluster config could not be found or resolved, or no client could be built.
    ConfigResolution,
    /// Invalid command-line usage.
    Usage,
    /// One of the deployment ownership classes is empty.
    EmptyOwnershipSet,
    /// A cluster API call failed.
    Client,
    /// A request was malformed before reaching the cluster.
    Validation,
    /// Rollout did not converge in time.
    RolloutTimeout,
    /// Rollout reported a failure condition.
    RolloutFailed,
    /// Local I/O failure.
    Io,
}

impl Error {
    /// Returns the error kind for programmatic handling.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::ConfigNotFound(_)
            | Error::UnknownCluster { .. }
            | Error::MissingEnvVar(_)
            | Error::InvalidConfig(_)
            | Error::Yaml(_)
            | Error::Connect(_) => ErrorKind::ConfigResolution,
            Error::AlreadyExists(_) | Error::MissingOperatorType => ErrorKind::Usage,
            Error::Restart(e) => e.kind(),
            Error::Cluster(e) if e.is_validation() => ErrorKind::Validation,
            Error::Cluster(_) => ErrorKind::Client,
            Error::Io(_) => ErrorKind::Io,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
