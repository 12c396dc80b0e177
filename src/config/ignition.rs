// src/config/ignition.rs

//! Ignition v3 document model
//!
//! Only the sections that end up in a package are modelled: `passwd.users`,
//! `storage.{directories,files,links}` and `systemd.units`. Everything else
//! in the document is ignored during deserialization.

use serde::{Deserialize, Serialize};

/// A decoded Ignition document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ignition: Ignition,

    #[serde(default)]
    pub passwd: Passwd,

    #[serde(default)]
    pub storage: Storage,

    #[serde(default)]
    pub systemd: Systemd,
}

/// The `ignition` metadata section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ignition {
    /// Spec version, e.g. `3.2.0`. Empty means "not an Ignition document".
    #[serde(default)]
    pub version: String,
}

impl Ignition {
    /// Major component of the spec version, if it parses
    pub fn major_version(&self) -> Option<u32> {
        self.version.split('.').next()?.parse().ok()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Passwd {
    #[serde(default)]
    pub users: Vec<PasswdUser>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswdUser {
    pub name: String,

    #[serde(default)]
    pub ssh_authorized_keys: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Storage {
    #[serde(default)]
    pub directories: Vec<Directory>,

    #[serde(default)]
    pub files: Vec<File>,

    #[serde(default)]
    pub links: Vec<Link>,
}

/// Owner or group reference: numeric id, name, or both
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeUser {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Directory {
    pub path: String,

    /// Permission bits as stored in the document (see `resolve_mode`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<i64>,

    #[serde(default)]
    pub user: NodeUser,

    #[serde(default)]
    pub group: NodeUser,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overwrite: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct File {
    pub path: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<i64>,

    #[serde(default)]
    pub user: NodeUser,

    #[serde(default)]
    pub group: NodeUser,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overwrite: Option<bool>,

    #[serde(default)]
    pub contents: Resource,
}

/// Where a file's bytes come from
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compression: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub path: String,

    pub target: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hard: Option<bool>,

    #[serde(default)]
    pub user: NodeUser,

    #[serde(default)]
    pub group: NodeUser,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Systemd {
    #[serde(default)]
    pub units: Vec<Unit>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    pub name: String,

    /// Raw unit file text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contents: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mask: Option<bool>,

    #[serde(default)]
    pub dropins: Vec<Dropin>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dropin {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contents: Option<String>,
}
