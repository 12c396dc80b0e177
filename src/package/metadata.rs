// src/package/metadata.rs

//! RPM header metadata
//!
//! Built-in defaults can be overridden from a TOML file:
//!
//! ```toml
//! name = "worker-config"
//! version = "4.14"
//! release = "1"
//! vendor = "Example Corp"
//! url = "https://example.com/provisioning"
//! ```
//!
//! Command-line flags are applied on top of the file.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

pub const DEFAULT_VERSION: &str = "1";
pub const DEFAULT_RELEASE: &str = "2";
pub const DEFAULT_LICENSE: &str = "ASL 2.0";
pub const DEFAULT_ARCH: &str = "noarch";
pub const DEFAULT_PACKAGER: &str = "MCO ignition2rpm";
pub const DEFAULT_VENDOR: &str = "RedHat OpenShift";
pub const DEFAULT_DESCRIPTION: &str = "This is a machine-packed RPM packed by 'ignition2rpm'";

/// Fallback package name when the source has no usable file name
pub const FALLBACK_NAME: &str = "ignition-config";

/// Header fields of the generated package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageMetadata {
    pub name: String,
    pub version: String,
    pub release: String,
    pub summary: String,
    pub description: String,
    pub license: String,
    pub arch: String,
    pub packager: String,
    pub vendor: String,
    pub build_host: String,
    pub url: Option<String>,
}

impl PackageMetadata {
    /// Defaults for a package built from `source`
    pub fn for_source(name: &str, source: &str) -> Self {
        Self {
            name: name.to_string(),
            version: DEFAULT_VERSION.to_string(),
            release: DEFAULT_RELEASE.to_string(),
            summary: format!("A package packed from {}", source),
            description: DEFAULT_DESCRIPTION.to_string(),
            license: DEFAULT_LICENSE.to_string(),
            arch: DEFAULT_ARCH.to_string(),
            packager: DEFAULT_PACKAGER.to_string(),
            vendor: DEFAULT_VENDOR.to_string(),
            build_host: local_hostname(),
            url: None,
        }
    }

    /// Apply every field set in `overrides`
    pub fn apply(&mut self, overrides: &MetadataOverrides) {
        let fields = [
            (&mut self.name, &overrides.name),
            (&mut self.version, &overrides.version),
            (&mut self.release, &overrides.release),
            (&mut self.summary, &overrides.summary),
            (&mut self.description, &overrides.description),
            (&mut self.license, &overrides.license),
            (&mut self.arch, &overrides.arch),
            (&mut self.packager, &overrides.packager),
            (&mut self.vendor, &overrides.vendor),
            (&mut self.build_host, &overrides.build_host),
        ];
        for (field, value) in fields {
            if let Some(value) = value {
                *field = value.clone();
            }
        }
        if overrides.url.is_some() {
            self.url = overrides.url.clone();
        }
    }

    /// Reject values the RPM header cannot carry
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("name", &self.name),
            ("version", &self.version),
            ("release", &self.release),
        ] {
            if value.is_empty() {
                return Err(Error::ConfigError(format!("package {} is empty", field)));
            }
            if value.chars().any(char::is_whitespace) {
                return Err(Error::ConfigError(format!(
                    "package {} '{}' contains whitespace",
                    field, value
                )));
            }
        }
        if self.version.contains('-') || self.release.contains('-') {
            return Err(Error::ConfigError(format!(
                "version '{}' and release '{}' must not contain '-'",
                self.version, self.release
            )));
        }
        Ok(())
    }
}

/// Optional metadata overrides, read from TOML or built from CLI flags
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetadataOverrides {
    pub name: Option<String>,
    pub version: Option<String>,
    pub release: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub license: Option<String>,
    pub arch: Option<String>,
    pub packager: Option<String>,
    pub vendor: Option<String>,
    pub build_host: Option<String>,
    pub url: Option<String>,
}

impl MetadataOverrides {
    /// Parse overrides from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| Error::ConfigError(format!("Invalid metadata overrides: {e}")))
    }

    /// Load overrides from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        debug!("Loading metadata overrides from {}", path.display());
        let content = fs::read_to_string(path).map_err(|e| {
            Error::ConfigError(format!("Failed to read {}: {e}", path.display()))
        })?;
        Self::from_toml(&content)
    }
}

fn local_hostname() -> String {
    nix::unistd::gethostname()
        .ok()
        .and_then(|h| h.into_string().ok())
        .unwrap_or_else(|| "localhost".to_string())
}
