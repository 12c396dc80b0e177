// src/config/machineconfig.rs

//! MachineConfig envelope
//!
//! A cluster-side wrapper that embeds an Ignition document under
//! `spec.config`. It is recognized so that it can be reported accurately,
//! but it is not translated into package entries.

use serde::{Deserialize, Serialize};

/// Kind string that identifies the envelope
pub const MACHINE_CONFIG_KIND: &str = "MachineConfig";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MachineConfig {
    #[serde(default)]
    pub api_version: String,

    #[serde(default)]
    pub kind: String,

    #[serde(default)]
    pub metadata: ObjectMeta,

    #[serde(default)]
    pub spec: MachineConfigSpec,
}

impl MachineConfig {
    /// Whether the decoded object actually is a MachineConfig
    pub fn is_machine_config(&self) -> bool {
        self.kind == MACHINE_CONFIG_KIND
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectMeta {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MachineConfigSpec {
    /// Embedded Ignition document, kept opaque
    #[serde(default)]
    pub config: serde_json::Value,

    #[serde(default)]
    pub kernel_arguments: Vec<String>,

    #[serde(default)]
    pub extensions: Vec<String>,

    #[serde(default, rename = "osImageURL")]
    pub os_image_url: String,
}
