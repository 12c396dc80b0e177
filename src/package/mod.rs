// src/package/mod.rs

//! Package entries and sinks
//!
//! The translation engine emits [`PackageEntry`] values into anything that
//! implements [`PackageSink`]. Two sinks are provided:
//! - [`Manifest`], an in-memory listing used for dry runs and tests
//! - [`RpmSink`], which turns the entries into an RPM file

pub mod metadata;
pub mod rpm;

pub use metadata::{MetadataOverrides, PackageMetadata};
pub use self::rpm::RpmSink;

/// File type bits as found in `st_mode`
pub const S_IFMT: u32 = 0o170000;
pub const S_IFDIR: u32 = 0o040000;
pub const S_IFLNK: u32 = 0o120000;

/// Permission bits including setuid/setgid/sticky
pub const PERMISSION_MASK: u32 = 0o7777;

/// Kind tag carried by every entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntryKind {
    /// Plain payload entry; the file type lives in the mode bits
    #[default]
    GenericFile,
}

/// One file, directory or symlink in the package payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageEntry {
    /// Absolute install path
    pub path: String,
    /// File content (link target for symlinks, empty for directories)
    pub content: Vec<u8>,
    /// Permission bits plus the directory/symlink type bits
    pub mode: u32,
    pub owner: String,
    pub group: String,
    /// Modification time, seconds since the epoch
    pub mtime: u32,
    pub kind: EntryKind,
}

impl PackageEntry {
    pub fn is_dir(&self) -> bool {
        self.mode & S_IFMT == S_IFDIR
    }

    pub fn is_symlink(&self) -> bool {
        self.mode & S_IFMT == S_IFLNK
    }

    /// Mode without the type bits
    pub fn permissions(&self) -> u32 {
        self.mode & PERMISSION_MASK
    }

    /// Content as text, for symlink targets and listings
    pub fn content_str(&self) -> String {
        String::from_utf8_lossy(&self.content).into_owned()
    }
}

/// Collects entries produced by a translation pass
pub trait PackageSink {
    fn add_entry(&mut self, entry: PackageEntry);
}

impl PackageSink for Vec<PackageEntry> {
    fn add_entry(&mut self, entry: PackageEntry) {
        self.push(entry);
    }
}

/// In-memory package manifest
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    entries: Vec<PackageEntry>,
}

impl Manifest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[PackageEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> Vec<PackageEntry> {
        self.entries
    }

    /// Entries whose install path is `path`, in emission order
    pub fn find(&self, path: &str) -> Vec<&PackageEntry> {
        self.entries.iter().filter(|e| e.path == path).collect()
    }

    /// Human-readable listing, one entry per line
    ///
    /// Format: `<type><mode> <owner> <group> <size> <path>[ -> <target>]`
    pub fn render(&self) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            let type_char = if entry.is_dir() {
                'd'
            } else if entry.is_symlink() {
                'l'
            } else {
                '-'
            };
            out.push_str(&format!(
                "{}{:04o} {} {} {:>8} {}",
                type_char,
                entry.permissions(),
                entry.owner,
                entry.group,
                entry.content.len(),
                entry.path
            ));
            if entry.is_symlink() {
                out.push_str(&format!(" -> {}", entry.content_str()));
            }
            out.push('\n');
        }
        out
    }
}

impl PackageSink for Manifest {
    fn add_entry(&mut self, entry: PackageEntry) {
        self.entries.push(entry);
    }
}
