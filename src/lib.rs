// src/lib.rs

//! ign2rpm
//!
//! Packs an Ignition config into an RPM that, once installed, lays down the
//! files, directories, links, SSH keys and systemd units the config
//! describes, with owners and modes preserved.
//!
//! # Architecture
//!
//! - `source`: reads config bytes from a local path or an HTTP(S) URL
//! - `config`: senses the dialect (Ignition or MachineConfig) and decodes it
//! - `translate`: maps an Ignition document onto package entries
//! - `package`: entry sinks, including the RPM writer

pub mod config;
mod error;
pub mod package;
pub mod source;
pub mod translate;

pub use config::{load_config, sense_config, DecodedConfig};
pub use error::{Error, Result};
pub use package::{EntryKind, Manifest, PackageEntry, PackageMetadata, PackageSink, RpmSink};
pub use source::{ConfigOrigin, ConfigSource};
pub use translate::{pack_time_now, translate, TranslationSummary};
