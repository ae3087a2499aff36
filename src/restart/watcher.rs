// ABOUTME: Waits for deployments to finish rolling out.
// ABOUTME: Polls rollout status until every match is complete, fails, or times out.

use std::time::Duration;
use tokio::time::Instant;

use super::RestartError;
use crate::cluster::{LabelSelector, RolloutService, RolloutState};
use crate::config::RolloutConfig;
use crate::types::Namespace;

/// Polls rollout status with a fixed interval and an overall timeout.
#[derive(Debug, Clone, Copy)]
pub struct RolloutWatcher {
    poll_interval: Duration,
    timeout: Duration,
}

impl RolloutWatcher {
    pub fn new(poll_interval: Duration, timeout: Duration) -> Self {
        Self {
            poll_interval,
            timeout,
        }
    }

    pub fn from_config(config: &RolloutConfig) -> Self {
        Self::new(config.poll_interval, config.timeout)
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Block until every deployment matching `selector` has rolled out.
    ///
    /// Unlike `kubectl rollout status`, which reports "No resources found"
    /// and succeeds, a selector matching nothing is an error here.
    ///
    /// # Errors
    ///
    /// - `RestartError::NoRolloutTargets` if nothing matches the selector
    /// - `RestartError::RolloutFailed` as soon as a deployment reports failure
    /// - `RestartError::RolloutTimeout` once the timeout has elapsed
    /// - the cluster error of a failed status call
    pub async fn await_convergence<R: RolloutService + ?Sized>(
        &self,
        rollout: &R,
        namespace: &Namespace,
        selector: &LabelSelector,
    ) -> Result<(), RestartError> {
        let start = Instant::now();

        loop {
            let statuses = rollout.rollout_status(namespace, selector).await?;
            if statuses.is_empty() {
                return Err(RestartError::NoRolloutTargets {
                    namespace: namespace.clone(),
                    selector: selector.to_string(),
                });
            }

            let mut pending = Vec::new();
            for status in &statuses {
                match &status.state {
                    RolloutState::Complete => {}
                    RolloutState::Failed(reason) => {
                        return Err(RestartError::RolloutFailed {
                            deployment: status.deployment.clone(),
                            reason: reason.clone(),
                        });
                    }
                    RolloutState::Progressing(message) => {
                        tracing::debug!(deployment = %status.deployment, "{message}");
                        pending.push(status.deployment.to_string());
                    }
                }
            }

            if pending.is_empty() {
                tracing::info!(%namespace, %selector, "rollout complete");
                return Ok(());
            }

            if start.elapsed() >= self.timeout {
                return Err(RestartError::RolloutTimeout {
                    namespace: namespace.clone(),
                    selector: selector.to_string(),
                    timeout: self.timeout,
                    pending: pending.join(", "),
                });
            }

            tokio::time::sleep(self.poll_interval).await;
        }
    }
}

impl Default for RolloutWatcher {
    fn default() -> Self {
        Self::from_config(&RolloutConfig::default())
    }
}
