// ABOUTME: Rollout wait configuration.
// ABOUTME: Bounds how long and how often rollout status is polled.

use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct RolloutConfig {
    #[serde(default = "default_timeout", with = "humantime_serde")]
    pub timeout: Duration,

    #[serde(default = "default_poll_interval", with = "humantime_serde")]
    pub poll_interval: Duration,
}

fn default_timeout() -> Duration {
    Duration::from_secs(600)
}

fn default_poll_interval() -> Duration {
    Duration::from_secs(2)
}

impl Default for RolloutConfig {
    fn default() -> Self {
        RolloutConfig {
            timeout: default_timeout(),
            poll_interval: default_poll_interval(),
        }
    }
}
