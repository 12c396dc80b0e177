// tests/common/mod.rs

//! Shared test utilities and helpers for integration tests.

#![allow(dead_code)]

use ign2rpm::config::ignition::Config;
use std::path::PathBuf;
use tempfile::TempDir;

/// Timestamp used for deterministic passes
pub const TEST_MTIME: u32 = 1_700_000_000;

/// An Ignition document touching every translated section.
pub const SAMPLE_IGNITION: &str = r##"{
    "ignition": {"version": "3.2.0"},
    "passwd": {
        "users": [
            {"name": "core", "sshAuthorizedKeys": ["ssh-ed25519 AAAAC3Nza core@a", "ssh-rsa AAAAB3Nza core@b"]},
            {"name": "admin", "sshAuthorizedKeys": ["ssh-ed25519 AAAAC3Nza admin"]}
        ]
    },
    "storage": {
        "directories": [
            {"path": "/var/lib/node-agent", "mode": 750, "user": {"name": "agent"}, "group": {"name": "agent"}},
            {"path": "/usr/local/share/node-agent"}
        ],
        "files": [
            {"path": "/etc/hosts", "contents": {"source": "127.0.0.1 localhost"}},
            {"path": "/usr/local/bin/node-agent", "mode": 755, "contents": {"source": "#!/bin/sh\nexec sleep infinity\n"}}
        ],
        "links": [
            {"path": "/usr/local/bin/agent", "target": "/usr/bin/agent-cli"}
        ]
    },
    "systemd": {
        "units": [
            {
                "name": "node-agent.service",
                "enabled": true,
                "contents": "[Unit]\nDescription=Node agent\n\n[Service]\nExecStart=/usr/local/bin/node-agent\n",
                "dropins": [{"name": "10-env.conf", "contents": "[Service]\nEnvironment=LEVEL=debug\n"}]
            }
        ]
    }
}"##;

/// A MachineConfig envelope wrapping a small Ignition document.
pub const SAMPLE_MACHINE_CONFIG: &str = r#"apiVersion: machineconfiguration.openshift.io/v1
kind: MachineConfig
metadata:
  name: 99-worker-motd
  labels:
    machineconfiguration.openshift.io/role: worker
spec:
  config:
    ignition:
      version: 3.2.0
    storage:
      files:
        - path: /etc/motd
          contents:
            source: "data:,hello"
"#;

pub fn sample_config() -> Config {
    serde_json::from_str(SAMPLE_IGNITION).unwrap()
}

/// Write `content` to `name` inside a fresh temp dir.
///
/// Returns (TempDir, path) - keep the TempDir alive to prevent cleanup.
pub fn write_config(name: &str, content: &str) -> (TempDir, PathBuf) {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    (temp_dir, path)
}
