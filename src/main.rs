// src/main.rs

use anyhow::Result;
use clap::Parser;
use ign2rpm::package::MetadataOverrides;
use std::path::PathBuf;

mod cli;
mod commands;

use cli::Cli;
use commands::PackOptions;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let opts = PackOptions {
        config: cli.config,
        output: cli.output.map(PathBuf::from),
        metadata_file: cli.metadata.map(PathBuf::from),
        overrides: MetadataOverrides {
            name: cli.name,
            version: cli.pkg_version,
            release: cli.release,
            ..Default::default()
        },
        dry_run: cli.dry_run,
    };

    commands::cmd_pack(&opts)
}
