// src/package/rpm.rs
//! RPM package sink
//!
//! Collects package entries and turns them into an RPM using the `rpm`
//! crate's PackageBuilder. Entry content is staged into a temporary
//! directory and added from there.

use super::{PackageEntry, PackageMetadata, PackageSink, PERMISSION_MASK};
use crate::error::{Error, Result};
use rpm::{FileMode, PackageBuilder};
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::{NamedTempFile, TempDir};
use tracing::{debug, info, warn};

/// Accumulates entries for a single RPM
#[derive(Debug, Clone)]
pub struct RpmSink {
    metadata: PackageMetadata,
    entries: Vec<PackageEntry>,
}

impl RpmSink {
    pub fn new(metadata: PackageMetadata) -> Self {
        Self {
            metadata,
            entries: Vec::new(),
        }
    }

    pub fn metadata(&self) -> &PackageMetadata {
        &self.metadata
    }

    pub fn entries(&self) -> &[PackageEntry] {
        &self.entries
    }

    /// Build the in-memory RPM
    pub fn build(&self) -> Result<rpm::Package> {
        self.metadata.validate()?;
        let meta = &self.metadata;

        let mut builder =
            PackageBuilder::new(&meta.name, &meta.version, &meta.license, &meta.arch, &meta.summary)
                .release(meta.release.as_str())
                .description(meta.description.as_str())
                .packager(meta.packager.as_str())
                .vendor(meta.vendor.as_str())
                .build_host(meta.build_host.as_str())
                .compression(rpm::CompressionType::Gzip);

        if let Some(url) = &meta.url {
            builder = builder.url(url.as_str());
        }

        // Every entry of a pass shares one timestamp; use it as the
        // package's source date so file mtimes match the entries.
        if let Some(mtime) = self.entries.iter().map(|e| e.mtime).max() {
            builder = builder.source_date(mtime);
        }

        let staging = TempDir::new()
            .map_err(|e| Error::IoError(format!("Failed to create staging directory: {e}")))?;

        // The RPM holds one file per path; a later entry replaces an earlier one.
        let mut last_index: HashMap<&str, usize> = HashMap::new();
        for (index, entry) in self.entries.iter().enumerate() {
            last_index.insert(entry.path.as_str(), index);
        }

        for (index, entry) in self.entries.iter().enumerate() {
            if last_index.get(entry.path.as_str()) != Some(&index) {
                warn!("{} is shadowed by a later entry with the same path", entry.path);
                continue;
            }

            let staged = staging.path().join(format!("entry-{index}"));
            fs::write(&staged, &entry.content).map_err(|e| {
                Error::IoError(format!("Failed to stage {}: {e}", entry.path))
            })?;

            let permissions = (entry.mode & PERMISSION_MASK) as u16;
            let options = rpm::FileOptions::new(entry.path.as_str())
                .user(entry.owner.as_str())
                .group(entry.group.as_str());

            let options = if entry.is_dir() {
                options.mode(FileMode::dir(permissions))
            } else if entry.is_symlink() {
                options
                    .mode(FileMode::symbolic_link(permissions))
                    .symlink(entry.content_str())
            } else {
                options.mode(FileMode::regular(permissions))
            };

            debug!("Adding {} ({:o}) to RPM", entry.path, entry.mode);
            builder = builder
                .with_file(&staged, options)
                .map_err(|e| Error::PackageError(format!("Failed to add {}: {e}", entry.path)))?;
        }

        builder
            .build()
            .map_err(|e| Error::PackageError(format!("Failed to build RPM package: {e}")))
    }

    /// Serialize the package to `out`
    pub fn write<W: Write>(&self, out: &mut W) -> Result<()> {
        let package = self.build()?;
        package
            .write(out)
            .map_err(|e| Error::PackageError(format!("Failed to write RPM: {e}")))
    }

    /// Write the package to `output_path`, replacing it only on success
    ///
    /// The package is written to a temporary file next to the destination
    /// and renamed into place, so a failed write never leaves a truncated
    /// package behind. Returns the size of the written package.
    pub fn write_to(&self, output_path: &Path) -> Result<u64> {
        let dir = match output_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut temp = NamedTempFile::new_in(dir).map_err(|e| {
            Error::IoError(format!("Failed to create temp file in {}: {e}", dir.display()))
        })?;

        self.write(temp.as_file_mut())?;
        temp.as_file()
            .sync_all()
            .map_err(|e| Error::IoError(format!("Failed to sync package: {e}")))?;

        temp.persist(output_path).map_err(|e| {
            Error::IoError(format!(
                "Failed to move package to {}: {}",
                output_path.display(),
                e.error
            ))
        })?;

        let size = fs::metadata(output_path)?.len();
        info!("Wrote {} ({} bytes, {} entries)", output_path.display(), size, self.entries.len());
        Ok(size)
    }
}

impl PackageSink for RpmSink {
    fn add_entry(&mut self, entry: PackageEntry) {
        self.entries.push(entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::package::{EntryKind, S_IFDIR, S_IFLNK};
    use tempfile::TempDir;

    fn sink() -> RpmSink {
        RpmSink::new(PackageMetadata::for_source("test-config", "test.ign"))
    }

    fn entry(path: &str, mode: u32, content: &str) -> PackageEntry {
        PackageEntry {
            path: path.to_string(),
            content: content.as_bytes().to_vec(),
            mode,
            owner: "root".to_string(),
            group: "root".to_string(),
            mtime: 1_700_000_000,
            kind: EntryKind::GenericFile,
        }
    }

    #[test]
    fn test_empty_package_builds() {
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("empty.rpm");

        let size = sink().write_to(&output_path).unwrap();
        assert!(output_path.exists());
        assert!(size > 0);
    }

    #[test]
    fn test_write_to_leaves_no_temp_files() {
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("pkg.rpm");

        let mut rpm = sink();
        rpm.add_entry(entry("/etc/motd", 0o644, "hello\n"));
        rpm.write_to(&output_path).unwrap();

        let names: Vec<_> = fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("pkg.rpm")]);
    }

    #[test]
    fn test_invalid_metadata_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("bad.rpm");

        let mut meta = PackageMetadata::for_source("bad name", "bad.ign");
        meta.release = String::new();
        let err = RpmSink::new(meta).write_to(&output_path).unwrap_err();

        assert!(matches!(err, Error::ConfigError(_)));
        assert!(!output_path.exists());
        assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_entries_mapped_into_package() {
        let mut rpm = sink();
        rpm.add_entry(entry("/var/lib/app", 0o750 | S_IFDIR, ""));
        rpm.add_entry(entry("/etc/app.conf", 0o600, "key=value\n"));
        rpm.add_entry(entry("/usr/bin/app", 0o755 | S_IFLNK, "/opt/app/bin/app"));

        let package = rpm.build().unwrap();
        let mut files: Vec<(String, u32)> = package
            .metadata
            .get_file_entries()
            .unwrap()
            .into_iter()
            .map(|e| (e.path.to_string_lossy().to_string(), e.mode.raw_mode() as u32))
            .collect();
        files.sort();
        assert_eq!(
            files,
            vec![
                ("/etc/app.conf".to_string(), 0o100600),
                ("/usr/bin/app".to_string(), 0o120755),
                ("/var/lib/app".to_string(), 0o040750),
            ]
        );
    }

    #[test]
    fn test_later_duplicate_replaces_earlier() {
        let mut rpm = sink();
        rpm.add_entry(entry("/etc/motd", 0o644, "first\n"));
        rpm.add_entry(entry("/etc/motd", 0o600, "second body\n"));

        let package = rpm.build().unwrap();
        let files = package.metadata.get_file_entries().unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].mode.raw_mode() as u32, 0o100600);
        assert_eq!(files[0].size, "second body\n".len());
    }
}
