// src/translate/mod.rs

//! Ignition to package translation
//!
//! Walks a decoded Ignition document and emits one [`PackageEntry`] per
//! payload item, in a fixed section order:
//!
//! 1. SSH authorized keys of the core user
//! 2. Directories
//! 3. Files
//! 4. Links
//! 5. systemd units
//!
//! Paths under `/usr/local/` are relocated for rpm-ostree hosts. All
//! entries of one pass share the timestamp passed in by the caller.
//!
//! Known gaps, kept on purpose until the packaging requirements for them
//! are settled:
//! - drop-in paths are computed and logged, but drop-in content is not
//!   packaged
//! - entries with the same destination path are not deduplicated
//! - unit `enabled` flags are only logged; nothing enables the units

pub mod defaults;
pub mod paths;

pub use defaults::{resolve_bool, resolve_mode, resolve_string};
pub use paths::relocate_for_rpm_ostree;

use crate::config::ignition::Config;
use crate::error::{Error, Result};
use crate::package::{EntryKind, PackageEntry, PackageSink, PERMISSION_MASK, S_IFDIR, S_IFLNK};
use tracing::{debug, info};

pub const DEFAULT_OWNER: &str = "root";
pub const DEFAULT_GROUP: &str = "root";
pub const DEFAULT_DIR_MODE: u32 = 0o755;
pub const DEFAULT_FILE_MODE: u32 = 0o755;
pub const LINK_MODE: u32 = 0o755;
pub const UNIT_MODE: u32 = 0o644;
pub const AUTHORIZED_KEYS_MODE: u32 = 0o644;

/// What a translation pass produced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TranslationSummary {
    pub authorized_keys: usize,
    pub directories: usize,
    pub files: usize,
    pub links: usize,
    pub units: usize,
    /// Drop-ins that were seen but not packaged
    pub skipped_dropins: usize,
    /// Paths rewritten from `/usr/local/`
    pub relocated: usize,
}

impl TranslationSummary {
    /// Number of entries handed to the sink
    pub fn total_entries(&self) -> usize {
        self.authorized_keys + self.directories + self.files + self.links + self.units
    }
}

/// Seconds since the epoch, for use as the pass timestamp
pub fn pack_time_now() -> u32 {
    u32::try_from(chrono::Utc::now().timestamp()).unwrap_or(u32::MAX)
}

/// Translate `config` into package entries
///
/// Every file must carry a content source. Files without one are all
/// reported together in [`Error::MissingContent`], and in that case nothing
/// is added to `sink`.
pub fn translate<S: PackageSink + ?Sized>(
    sink: &mut S,
    config: &Config,
    mtime: u32,
) -> Result<TranslationSummary> {
    check_file_contents(config)?;

    let mut summary = TranslationSummary::default();
    let mut emit = |entry: PackageEntry| sink.add_entry(entry);

    // The host only supports SSH keys for the core user
    for user in &config.passwd.users {
        if user.name != paths::CORE_USER {
            debug!("Skipping user {}", user.name);
            continue;
        }
        info!("Found the core user, adding authorized_keys");

        let mut keys = String::new();
        for key in &user.ssh_authorized_keys {
            keys.push_str(key);
            keys.push('\n');
        }

        emit(PackageEntry {
            path: paths::authorized_keys_path(),
            content: keys.into_bytes(),
            mode: AUTHORIZED_KEYS_MODE,
            owner: user.name.clone(),
            group: user.name.clone(),
            mtime,
            kind: EntryKind::GenericFile,
        });
        summary.authorized_keys += 1;
    }

    for dir in &config.storage.directories {
        info!(
            "DIR: {} ({:?} {:?}) ({:?} {:?})",
            dir.path, dir.user.id, dir.user.name, dir.group.id, dir.group.name
        );
        let path = relocate_for_rpm_ostree(&dir.path);
        if path != dir.path {
            summary.relocated += 1;
        }

        emit(PackageEntry {
            path,
            content: Vec::new(),
            mode: (resolve_mode(dir.mode, DEFAULT_DIR_MODE) & PERMISSION_MASK) | S_IFDIR,
            owner: resolve_string(dir.user.name.as_deref(), DEFAULT_OWNER),
            group: resolve_string(dir.group.name.as_deref(), DEFAULT_GROUP),
            mtime,
            kind: EntryKind::GenericFile,
        });
        summary.directories += 1;
    }

    for file in &config.storage.files {
        info!("FILE: {}", file.path);
        let Some(source) = file.contents.source.as_deref() else {
            // checked above
            continue;
        };
        let path = relocate_for_rpm_ostree(&file.path);
        if path != file.path {
            summary.relocated += 1;
        }

        emit(PackageEntry {
            path,
            content: source.as_bytes().to_vec(),
            mode: resolve_mode(file.mode, DEFAULT_FILE_MODE) & PERMISSION_MASK,
            owner: resolve_string(file.user.name.as_deref(), DEFAULT_OWNER),
            group: resolve_string(file.group.name.as_deref(), DEFAULT_GROUP),
            mtime,
            kind: EntryKind::GenericFile,
        });
        summary.files += 1;
    }

    // The entry lives at the link's target and points back at the
    // (relocated) link path.
    for link in &config.storage.links {
        info!("LINK: {} {}", link.path, link.target);
        let source = relocate_for_rpm_ostree(&link.path);
        if source != link.path {
            summary.relocated += 1;
        }

        emit(PackageEntry {
            path: link.target.clone(),
            content: source.into_bytes(),
            mode: LINK_MODE | S_IFLNK,
            owner: resolve_string(link.user.name.as_deref(), DEFAULT_OWNER),
            group: resolve_string(link.group.name.as_deref(), DEFAULT_GROUP),
            mtime,
            kind: EntryKind::GenericFile,
        });
        summary.links += 1;
    }

    for unit in &config.systemd.units {
        let unit_file = paths::systemd_unit_path(&unit.name);
        info!(
            "UNIT: {} {} {}",
            unit.name,
            unit_file,
            resolve_bool(unit.enabled, true)
        );

        emit(PackageEntry {
            path: unit_file,
            content: resolve_string(unit.contents.as_deref(), "").into_bytes(),
            mode: UNIT_MODE,
            owner: DEFAULT_OWNER.to_string(),
            group: DEFAULT_GROUP.to_string(),
            mtime,
            kind: EntryKind::GenericFile,
        });
        summary.units += 1;

        // TODO: package drop-in content once the expected install layout is confirmed
        for dropin in &unit.dropins {
            let dropin_file = paths::systemd_dropin_path(&unit.name, &dropin.name);
            info!("\tDROPIN: {} {}", dropin.name, dropin_file);
            summary.skipped_dropins += 1;
        }
    }

    debug!("Translation produced {} entries", summary.total_entries());
    Ok(summary)
}

/// Every file needs a content source before anything is emitted
fn check_file_contents(config: &Config) -> Result<()> {
    let missing: Vec<String> = config
        .storage
        .files
        .iter()
        .filter(|f| f.contents.source.is_none())
        .map(|f| f.path.clone())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(Error::MissingContent { paths: missing })
    }
}
