// ABOUTME: Config scaffolding for new setups.
// ABOUTME: Creates a restartctl.yml template file.

use std::path::Path;

use crate::error::{Error, Result};

use super::CONFIG_FILENAME;

pub fn init_config(dir: &Path, force: bool) -> Result<()> {
    let config_path = dir.join(CONFIG_FILENAME);

    if config_path.exists() && !force {
        return Err(Error::AlreadyExists(config_path));
    }

    std::fs::write(&config_path, TEMPLATE)?;
    Ok(())
}

const TEMPLATE: &str = r#"clusters:
  - name: host
    server_api: https://api.host.example.com:6443
    # Either a literal token or { env: VAR, default: ... }
    token: { env: HOST_TOKEN }
    type: host
    # Defaults to toolchain-host-operator / toolchain-member-operator
    # operator_namespace: toolchain-host-operator
  - name: member-1
    server_api: https://api.member-1.example.com:6443
    token: { env: MEMBER_1_TOKEN }
    type: member

rollout:
  timeout: 10m
  poll_interval: 2s
"#;
