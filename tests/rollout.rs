// ABOUTME: Tests for rollout restart and the rollout watcher.
// ABOUTME: Uses millisecond poll intervals so waits stay short.

mod support;

use restartctl::cluster::RolloutState;
use restartctl::error::ErrorKind;
use restartctl::restart::{RestartError, RolloutWatcher, rollout_status_selector, trigger_restart};
use restartctl::types::DeploymentName;
use std::time::Duration;
use support::{Call, FakeCluster, FakeDeployment, namespace};

fn fast_watcher() -> RolloutWatcher {
    RolloutWatcher::new(Duration::from_millis(1), Duration::from_secs(5))
}

fn progressing() -> RolloutState {
    RolloutState::Progressing("1 of 2 updated replicas are available".to_string())
}

mod restarter {
    use super::*;

    #[tokio::test]
    async fn restarts_the_named_deployment() {
        support::init_tracing();
        let cluster = FakeCluster::new();

        trigger_restart(&cluster, &namespace(), &DeploymentName::new("registration-service"))
            .await
            .unwrap();

        assert_eq!(cluster.restarted(), vec!["deployment/registration-service"]);
    }

    #[tokio::test]
    async fn restart_failure_propagates() {
        let cluster = FakeCluster::new().fail_restart_of("webhook");

        let err = trigger_restart(&cluster, &namespace(), &DeploymentName::new("webhook"))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Client);
        assert!(err.to_string().contains("deployment/webhook"), "{err}");
    }

    #[tokio::test]
    async fn invalid_name_never_reaches_the_cluster() {
        let cluster = FakeCluster::new();

        let err = trigger_restart(&cluster, &namespace(), &DeploymentName::new("Not_Valid"))
            .await
            .unwrap_err();

        assert!(matches!(err, RestartError::InvalidTarget(_)));
        assert!(cluster.calls().is_empty());
    }
}

mod watcher {
    use super::*;

    #[test]
    fn default_timeout_is_ten_minutes() {
        assert_eq!(RolloutWatcher::default().timeout(), Duration::from_secs(600));
    }

    #[tokio::test]
    async fn returns_once_everything_is_complete() {
        let cluster = FakeCluster::new()
            .with_deployment(FakeDeployment::directly_owned("webhook"))
            .with_deployment(FakeDeployment::directly_owned("registration-service"))
            .then_rollout(&[("webhook", progressing()), ("registration-service", RolloutState::Complete)])
            .then_rollout(&[("webhook", progressing()), ("registration-service", RolloutState::Complete)]);

        fast_watcher()
            .await_convergence(&cluster, &namespace(), &rollout_status_selector())
            .await
            .unwrap();

        assert_eq!(cluster.status_calls(), 3);
        assert!(
            cluster
                .calls()
                .iter()
                .all(|c| *c == Call::RolloutStatus("provider=codeready-toolchain".to_string()))
        );
    }

    #[tokio::test]
    async fn failure_condition_aborts_immediately() {
        let cluster = FakeCluster::new().then_rollout(&[(
            "webhook",
            RolloutState::Failed("deployment \"webhook\" exceeded its progress deadline".to_string()),
        )]);

        let err = fast_watcher()
            .await_convergence(&cluster, &namespace(), &rollout_status_selector())
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::RolloutFailed);
        assert!(matches!(err, RestartError::RolloutFailed { ref deployment, .. } if *deployment == "webhook"));
        assert_eq!(cluster.status_calls(), 1);
    }

    #[tokio::test]
    async fn times_out_while_progressing() {
        let cluster = FakeCluster::new().then_rollout(&[("webhook", progressing())]);
        let watcher = RolloutWatcher::new(Duration::from_millis(1), Duration::ZERO);

        let err = watcher
            .await_convergence(&cluster, &namespace(), &rollout_status_selector())
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::RolloutTimeout);
        assert!(err.to_string().contains("pending: webhook"), "{err}");
    }

    #[tokio::test]
    async fn nothing_to_watch_is_an_error() {
        let cluster = FakeCluster::new();

        let err = fast_watcher()
            .await_convergence(&cluster, &namespace(), &rollout_status_selector())
            .await
            .unwrap_err();

        assert!(matches!(err, RestartError::NoRolloutTargets { .. }));
    }
}
