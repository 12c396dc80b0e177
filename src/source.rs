// src/source.rs

//! Config byte sources
//!
//! A config argument is either a local path or an `http(s)://` URL. The
//! distinction is made purely on the prefix, the same way a user would
//! expect from the command line.

use crate::error::{Error, Result};
use reqwest::blocking::Client;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;
use url::Url;

/// Default timeout for HTTP requests (30 seconds)
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Where the config bytes came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigOrigin {
    Local,
    Remote,
}

/// A parsed config location
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Local(PathBuf),
    Remote(Url),
}

impl ConfigSource {
    /// Sense the source type from its prefix
    pub fn parse(source: &str) -> Result<Self> {
        if source.is_empty() {
            return Err(Error::InvalidSource("no config source given".to_string()));
        }

        if source.starts_with("http://") || source.starts_with("https://") {
            let url = Url::parse(source)
                .map_err(|e| Error::InvalidSource(format!("{}: {}", source, e)))?;
            return Ok(Self::Remote(url));
        }

        let path = Path::new(source);
        let path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()?.join(path)
        };
        Ok(Self::Local(path))
    }

    pub fn origin(&self) -> ConfigOrigin {
        match self {
            Self::Local(_) => ConfigOrigin::Local,
            Self::Remote(_) => ConfigOrigin::Remote,
        }
    }

    /// Last path segment with its final extension removed
    ///
    /// Used as the default package name: `/srv/worker.ign` -> `worker`.
    pub fn package_stem(&self) -> Option<String> {
        let segment = match self {
            Self::Local(path) => path.file_name()?.to_str()?.to_string(),
            Self::Remote(url) => url
                .path_segments()?
                .filter(|s| !s.is_empty())
                .next_back()?
                .to_string(),
        };

        let stem = match segment.rfind('.') {
            Some(0) | None => segment.as_str(),
            Some(idx) => &segment[..idx],
        };

        if stem.is_empty() {
            None
        } else {
            Some(stem.to_string())
        }
    }

    /// Read the full config content
    pub fn fetch(&self) -> Result<Vec<u8>> {
        match self {
            Self::Local(path) => {
                info!("Reading config from {}", path.display());
                fs::read(path).map_err(|e| {
                    Error::IoError(format!("Failed to read {}: {e}", path.display()))
                })
            }
            Self::Remote(url) => fetch_remote(url),
        }
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local(path) => write!(f, "{}", path.display()),
            Self::Remote(url) => write!(f, "{}", url),
        }
    }
}

fn fetch_remote(url: &Url) -> Result<Vec<u8>> {
    info!("Fetching config from {}", url);

    let client = Client::builder()
        .timeout(HTTP_TIMEOUT)
        .build()
        .map_err(|e| Error::InitError(format!("Failed to create HTTP client: {e}")))?;

    let response = client
        .get(url.clone())
        .send()
        .map_err(|e| Error::DownloadError(format!("Failed to fetch {url}: {e}")))?;

    if !response.status().is_success() {
        return Err(Error::DownloadError(format!(
            "HTTP {} from {}",
            response.status(),
            url
        )));
    }

    let bytes = response
        .bytes()
        .map_err(|e| Error::DownloadError(format!("Failed to read response from {url}: {e}")))?;

    Ok(bytes.to_vec())
}
