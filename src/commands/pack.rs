// src/commands/pack.rs
//! Pack a config into an RPM
//!
//! load -> dispatch on dialect -> translate -> write

use anyhow::{Context, Result};
use ign2rpm::package::metadata::FALLBACK_NAME;
use ign2rpm::package::MetadataOverrides;
use ign2rpm::{
    load_config, pack_time_now, translate, ConfigSource, DecodedConfig, Manifest,
    PackageMetadata, PackageSink, RpmSink,
};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Inputs for [`cmd_pack`]
#[derive(Debug, Clone, Default)]
pub struct PackOptions {
    pub config: String,
    pub output: Option<PathBuf>,
    pub metadata_file: Option<PathBuf>,
    pub overrides: MetadataOverrides,
    pub dry_run: bool,
}

/// Build the package described by `opts`
pub fn cmd_pack(opts: &PackOptions) -> Result<()> {
    let source = ConfigSource::parse(&opts.config)?;
    let content = source
        .fetch()
        .with_context(|| format!("Failed to read config from {}", source))?;

    let decoded = load_config(&content).context("Unable to decipher config type")?;
    info!("Config {} is of type {}", source, decoded.kind_name());

    let metadata = resolve_metadata(&source, &opts.config, opts.metadata_file.as_deref(), &opts.overrides)?;
    metadata.validate()?;

    let mtime = pack_time_now();
    let mut manifest = Manifest::new();

    match &decoded {
        DecodedConfig::Ignition(config) => {
            let summary = translate(&mut manifest, config, mtime)
                .context("Failed to translate Ignition config")?;
            info!(
                "Translated {} entries ({} dirs, {} files, {} links, {} units)",
                summary.total_entries(),
                summary.directories,
                summary.files,
                summary.links,
                summary.units
            );
            if summary.skipped_dropins > 0 {
                warn!("{} systemd drop-in(s) were not packaged", summary.skipped_dropins);
            }
        }
        DecodedConfig::MachineConfig(mc) => {
            warn!(
                "MachineConfig {} is not translated, the package will have no payload",
                mc.metadata.name
            );
        }
        DecodedConfig::Unsupported { reason } => {
            anyhow::bail!("Unsupported config: {}", reason);
        }
    }

    if opts.dry_run {
        println!(
            "Package: {}-{}-{}.{}",
            metadata.name, metadata.version, metadata.release, metadata.arch
        );
        print!("{}", manifest.render());
        return Ok(());
    }

    let output = opts
        .output
        .as_deref()
        .context("No output path given")?;

    let mut rpm = RpmSink::new(metadata);
    for entry in manifest.into_entries() {
        rpm.add_entry(entry);
    }

    let size = rpm
        .write_to(output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!("Wrote {} ({} bytes)", output.display(), size);
    Ok(())
}

/// Defaults, then the overrides file, then command-line flags
fn resolve_metadata(
    source: &ConfigSource,
    source_arg: &str,
    metadata_file: Option<&Path>,
    flags: &MetadataOverrides,
) -> Result<PackageMetadata> {
    let name = source
        .package_stem()
        .unwrap_or_else(|| FALLBACK_NAME.to_string());
    let mut metadata = PackageMetadata::for_source(&name, source_arg);

    if let Some(path) = metadata_file {
        let overrides = MetadataOverrides::load(path)?;
        metadata.apply(&overrides);
    }
    metadata.apply(flags);

    Ok(metadata)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const IGNITION: &str = r#"{
        "ignition": {"version": "3.2.0"},
        "storage": {"files": [{"path": "/etc/motd", "contents": {"source": "hi"}}]}
    }"#;

    const MACHINE_CONFIG: &str = "apiVersion: machineconfiguration.openshift.io/v1
kind: MachineConfig
metadata:
  name: 99-worker-motd
spec:
  config:
    ignition:
      version: 3.2.0
    storage:
      files:
        - path: /etc/motd
          contents:
            source: \"data:,hello\"
";

    #[test]
    fn test_pack_writes_rpm() {
        let temp_dir = TempDir::new().unwrap();
        let config = temp_dir.path().join("worker.ign");
        fs::write(&config, IGNITION).unwrap();
        let output = temp_dir.path().join("worker.rpm");

        let opts = PackOptions {
            config: config.to_string_lossy().to_string(),
            output: Some(output.clone()),
            ..Default::default()
        };
        cmd_pack(&opts).unwrap();
        assert!(output.exists());
    }

    #[test]
    fn test_machine_config_packs_no_payload() {
        let temp_dir = TempDir::new().unwrap();
        let config = temp_dir.path().join("99-worker-motd.yaml");
        fs::write(&config, MACHINE_CONFIG).unwrap();
        let output = temp_dir.path().join("99-worker-motd.rpm");

        let opts = PackOptions {
            config: config.to_string_lossy().to_string(),
            output: Some(output.clone()),
            ..Default::default()
        };
        cmd_pack(&opts).unwrap();

        let mut reader = std::io::BufReader::new(fs::File::open(&output).unwrap());
        let package = rpm::Package::parse(&mut reader).unwrap();
        assert_eq!(package.metadata.get_name().unwrap(), "99-worker-motd");

        let files = package.metadata.get_file_entries().unwrap_or_default();
        assert!(files.is_empty());
        assert!(files.iter().all(|f| f.path != std::path::Path::new("/etc/motd")));
    }

    #[test]
    fn test_unrecognized_config_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let config = temp_dir.path().join("bogus.txt");
        fs::write(&config, "not a config").unwrap();
        let output = temp_dir.path().join("bogus.rpm");

        let opts = PackOptions {
            config: config.to_string_lossy().to_string(),
            output: Some(output.clone()),
            ..Default::default()
        };
        assert!(cmd_pack(&opts).is_err());
        assert!(!output.exists());
    }

    #[test]
    fn test_missing_content_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let config = temp_dir.path().join("broken.ign");
        fs::write(
            &config,
            r#"{"ignition": {"version": "3.2.0"}, "storage": {"files": [{"path": "/etc/x"}]}}"#,
        )
        .unwrap();
        let output = temp_dir.path().join("broken.rpm");

        let opts = PackOptions {
            config: config.to_string_lossy().to_string(),
            output: Some(output.clone()),
            ..Default::default()
        };
        let err = cmd_pack(&opts).unwrap_err();
        assert!(format!("{err:#}").contains("/etc/x"));
        assert!(!output.exists());
    }

    #[test]
    fn test_metadata_layering() {
        let temp_dir = TempDir::new().unwrap();
        let overrides = temp_dir.path().join("meta.toml");
        fs::write(&overrides, "name = \"from-file\"\nrelease = \"7\"\n").unwrap();

        let source = ConfigSource::parse("/srv/configs/worker.ign").unwrap();
        let flags = MetadataOverrides {
            name: Some("from-flag".to_string()),
            ..Default::default()
        };

        let metadata =
            resolve_metadata(&source, "/srv/configs/worker.ign", Some(overrides.as_path()), &flags).unwrap();
        assert_eq!(metadata.name, "from-flag");
        assert_eq!(metadata.release, "7");
        assert_eq!(metadata.summary, "A package packed from /srv/configs/worker.ign");

        let metadata =
            resolve_metadata(&source, "/srv/configs/worker.ign", None, &MetadataOverrides::default())
                .unwrap();
        assert_eq!(metadata.name, "worker");
    }
}
