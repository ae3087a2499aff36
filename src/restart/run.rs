// ABOUTME: A single restart run, parameterized by its current state.
// ABOUTME: Each transition consumes the run and returns the next state on success.

use super::state::{Completed, Confirmed, Discovered, Idle, Recycled};
use super::{
    DiscoveredDeployments, RestartError, RolloutWatcher, discover, recycle,
    rollout_status_selector, trigger_restart,
};
use crate::cluster::{DeploymentOps, PodOps, RolloutService};
use crate::diagnostics::{Diagnostics, Warning};
use crate::output::Output;
use crate::prompt::ConfirmationGate;
use crate::types::{DeploymentName, Namespace, OperatorType};

/// What a finished run did.
#[derive(Debug, Clone, Default)]
pub struct RestartReport {
    /// Pods deleted across all lifecycle-managed deployments.
    pub pods_deleted: usize,
    /// Lifecycle-managed deployments whose pods were recycled, in order.
    pub recycled: Vec<DeploymentName>,
    /// Directly-owned deployments that got a rollout restart, in order.
    pub restarted: Vec<DeploymentName>,
    /// Number of rollout waits performed.
    pub rollout_waits: usize,
    /// Non-fatal warnings collected during the run.
    pub warnings: Vec<Warning>,
}

/// A restart of one operator's deployments in one namespace.
///
/// The state parameter `S` makes it impossible to recycle pods before the
/// run was confirmed or to restart directly-owned deployments before the
/// lifecycle-managed ones rolled out.
#[derive(Debug)]
pub struct RestartRun<S> {
    operator: OperatorType,
    namespace: Namespace,
    report: RestartReport,
    diagnostics: Diagnostics,
    state: S,
}

/// Outcome of the confirmation gate.
#[derive(Debug)]
pub enum Confirmation {
    Approved(RestartRun<Confirmed>),
    Declined,
}

impl<S> RestartRun<S> {
    pub fn operator(&self) -> OperatorType {
        self.operator
    }

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    fn transition<T>(self, state: T) -> RestartRun<T> {
        RestartRun {
            operator: self.operator,
            namespace: self.namespace,
            report: self.report,
            diagnostics: self.diagnostics,
            state,
        }
    }
}

impl RestartRun<Idle> {
    pub fn new(operator: OperatorType, namespace: Namespace) -> Self {
        RestartRun {
            operator,
            namespace,
            report: RestartReport::default(),
            diagnostics: Diagnostics::default(),
            state: Idle,
        }
    }

    /// Description of the destructive action shown by the confirmation gate.
    pub fn action(&self) -> String {
        format!(
            "restart the '{}' operator in namespace '{}'",
            self.operator, self.namespace
        )
    }

    /// Ask the gate for approval. Nothing is read from the cluster before this.
    #[must_use = "a declined run must not proceed"]
    pub fn confirm(self, gate: &dyn ConfirmationGate, output: &Output) -> Confirmation {
        if gate.confirm(output, &self.action()) {
            Confirmation::Approved(self.transition(Confirmed))
        } else {
            tracing::info!(namespace = %self.namespace, "restart declined");
            Confirmation::Declined
        }
    }
}

impl RestartRun<Confirmed> {
    /// List and partition the namespace's deployments.
    ///
    /// # Errors
    ///
    /// Returns `RestartError::EmptyOwnershipSet` if either class is empty.
    #[must_use = "restart state must be used"]
    pub async fn discover<C: DeploymentOps + ?Sized>(
        mut self,
        cluster: &C,
    ) -> Result<RestartRun<Discovered>, RestartError> {
        let deployments = discover(cluster, &self.namespace, &mut self.diagnostics).await?;
        Ok(self.transition(Discovered { deployments }))
    }
}

impl RestartRun<Discovered> {
    pub fn deployments(&self) -> &DiscoveredDeployments {
        &self.state.deployments
    }

    /// Delete the pods of each lifecycle-managed deployment in turn, waiting
    /// for the rollout after each one.
    ///
    /// # Errors
    ///
    /// Stops at the first failed deletion or rollout wait; later deployments
    /// are not touched.
    #[must_use = "restart state must be used"]
    pub async fn recycle_lifecycle_managed<C: PodOps + RolloutService + ?Sized>(
        mut self,
        cluster: &C,
        watcher: &RolloutWatcher,
        output: &Output,
    ) -> Result<RestartRun<Recycled>, RestartError> {
        let DiscoveredDeployments {
            lifecycle_managed,
            directly_owned,
        } = self.state.deployments.clone();
        let status_selector = rollout_status_selector();

        for deployment in lifecycle_managed.iter() {
            output.progress(&format!("  → Deleting pods of {}...", deployment.name));
            let deleted = recycle(cluster, deployment, &mut self.diagnostics).await?;
            self.report.pods_deleted += deleted;
            self.report.recycled.push(deployment.name.clone());

            output.progress(&format!(
                "  → Waiting for rollout ({} pod(s) deleted)...",
                deleted
            ));
            watcher
                .await_convergence(cluster, &self.namespace, &status_selector)
                .await?;
            self.report.rollout_waits += 1;
        }

        Ok(self.transition(Recycled { directly_owned }))
    }
}

impl RestartRun<Recycled> {
    /// Trigger a rollout restart of each directly-owned deployment in turn,
    /// waiting for the rollout after each one.
    ///
    /// # Errors
    ///
    /// Stops at the first failed restart or rollout wait.
    #[must_use = "restart state must be used"]
    pub async fn restart_directly_owned<R: RolloutService + ?Sized>(
        mut self,
        rollout: &R,
        watcher: &RolloutWatcher,
        output: &Output,
    ) -> Result<RestartRun<Completed>, RestartError> {
        let status_selector = rollout_status_selector();
        let directly_owned = self.state.directly_owned.clone();

        for deployment in directly_owned.iter() {
            output.progress(&format!("  → Restarting {}...", deployment.name));
            trigger_restart(rollout, &self.namespace, &deployment.name).await?;
            self.report.restarted.push(deployment.name.clone());

            output.progress("  → Waiting for rollout...");
            watcher
                .await_convergence(rollout, &self.namespace, &status_selector)
                .await?;
            self.report.rollout_waits += 1;
        }

        Ok(self.transition(Completed))
    }
}

impl RestartRun<Completed> {
    /// Consume the run and return what it did.
    pub fn finish(self) -> RestartReport {
        let mut report = self.report;
        report.warnings = self.diagnostics.warnings().to_vec();
        report
    }
}
