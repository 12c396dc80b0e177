// src/config/mod.rs

//! Config sensing and loading
//!
//! Raw bytes are probed against each supported dialect in turn:
//! - Ignition v3 documents (JSON, non-empty `ignition.version`)
//! - MachineConfig envelopes (YAML or JSON, `kind: MachineConfig`)
//!
//! Anything else is reported as unsupported. The result is a closed enum so
//! that adding a dialect forces every dispatch site to handle it.

pub mod ignition;
pub mod machineconfig;

pub use ignition::Config;
pub use machineconfig::MachineConfig;

use crate::error::{Error, Result};
use tracing::{debug, warn};

/// Ignition major version this tool understands
pub const SUPPORTED_IGNITION_MAJOR: u32 = 3;

/// A config after dialect detection
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedConfig {
    /// Declarative document carrying per-file content
    Ignition(Config),
    /// Cluster envelope; recognized but not translated
    MachineConfig(MachineConfig),
    /// No supported dialect matched
    Unsupported { reason: String },
}

impl DecodedConfig {
    /// Short dialect name for logs
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Ignition(_) => "Ignition",
            Self::MachineConfig(_) => "MachineConfig",
            Self::Unsupported { .. } => "unsupported",
        }
    }
}

/// Detect which dialect `content` is written in and decode it
pub fn sense_config(content: &[u8]) -> DecodedConfig {
    let ignition_err = match serde_json::from_slice::<Config>(content) {
        Ok(config) if !config.ignition.version.is_empty() => {
            debug!("Config is of type Ignition ({})", config.ignition.version);
            if config.ignition.major_version() != Some(SUPPORTED_IGNITION_MAJOR) {
                warn!(
                    "Ignition version {} is not a {}.x spec, translating anyway",
                    config.ignition.version, SUPPORTED_IGNITION_MAJOR
                );
            }
            return DecodedConfig::Ignition(config);
        }
        Ok(_) => "missing ignition.version".to_string(),
        Err(e) => e.to_string(),
    };

    match serde_yaml::from_slice::<MachineConfig>(content) {
        Ok(mc) if mc.is_machine_config() => {
            debug!("Config is of type MachineConfig ({})", mc.metadata.name);
            DecodedConfig::MachineConfig(mc)
        }
        Ok(mc) => DecodedConfig::Unsupported {
            reason: format!(
                "not Ignition ({}) and kind '{}' is not MachineConfig",
                ignition_err, mc.kind
            ),
        },
        Err(e) => DecodedConfig::Unsupported {
            reason: format!("not Ignition ({}) and not MachineConfig ({})", ignition_err, e),
        },
    }
}

/// Decode `content`, failing if no supported dialect matched
pub fn load_config(content: &[u8]) -> Result<DecodedConfig> {
    match sense_config(content) {
        DecodedConfig::Unsupported { reason } => Err(Error::UnrecognizedFormat(reason)),
        decoded => Ok(decoded),
    }
}
