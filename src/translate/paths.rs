// src/translate/paths.rs

//! Install path conventions
//!
//! rpm-ostree hosts keep `/usr` read-only and expose `/usr/local` as a
//! symlink into `/var/usrlocal`. Payload destined for `/usr/local/` is
//! therefore shipped under `/var/usrlocal/` and reached through that link.

use tracing::info;

/// Prefix that cannot be written on an rpm-ostree host
pub const USR_LOCAL_PREFIX: &str = "/usr/local/";

/// Where rpm-ostree actually keeps `/usr/local`
pub const VAR_USRLOCAL_PREFIX: &str = "/var/usrlocal/";

/// Account whose SSH keys are packaged
pub const CORE_USER: &str = "core";

/// Home of the core user; `/var/home` is what `/home` points at on the host
pub const CORE_USER_SSH_DIR: &str = "/var/home/core/.ssh";

pub const AUTHORIZED_KEYS_FILE: &str = "authorized_keys";

pub const SYSTEMD_UNITS_DIR: &str = "/etc/systemd/system";

/// Rewrite `path` so it installs on an rpm-ostree root
///
/// The first occurrence of `/usr/local/` is replaced with `/var/usrlocal/`.
/// The match is not anchored to the start of the path, so
/// `/a/usr/local/b` becomes `/a/var/usrlocal/b` as well.
pub fn relocate_for_rpm_ostree(path: &str) -> String {
    let replaced = path.replacen(USR_LOCAL_PREFIX, VAR_USRLOCAL_PREFIX, 1);
    if replaced != path {
        info!("REPLACING: {} {}", path, replaced);
    }
    replaced
}

/// `/var/home/core/.ssh/authorized_keys`
pub fn authorized_keys_path() -> String {
    format!("{}/{}", CORE_USER_SSH_DIR, AUTHORIZED_KEYS_FILE)
}

/// `/etc/systemd/system/<unit>`
pub fn systemd_unit_path(unit_name: &str) -> String {
    format!("{}/{}", SYSTEMD_UNITS_DIR, unit_name)
}

/// `/etc/systemd/system/<unit>.d`
pub fn systemd_dropins_dir(unit_name: &str) -> String {
    format!("{}/{}.d", SYSTEMD_UNITS_DIR, unit_name)
}

/// `/etc/systemd/system/<unit>.d/<dropin>`
pub fn systemd_dropin_path(unit_name: &str, dropin_name: &str) -> String {
    format!("{}/{}", systemd_dropins_dir(unit_name), dropin_name)
}
