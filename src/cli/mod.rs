// src/cli/mod.rs
//! CLI definitions for ign2rpm
//!
//! The actual command implementation lives in the `commands` module.

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "ign2rpm")]
#[command(author = "ign2rpm Contributors")]
#[command(version)]
#[command(about = "Pack an Ignition config into an installable RPM", long_about = None)]
pub struct Cli {
    /// Config file ign/machineconfig to read (path or http(s) URL)
    #[arg(short, long)]
    pub config: String,

    /// RPM target file to write
    #[arg(short, long, required_unless_present = "dry_run")]
    pub output: Option<String>,

    /// TOML file with package metadata overrides
    #[arg(long)]
    pub metadata: Option<String>,

    /// Package name (defaults to the config file name without extension)
    #[arg(long)]
    pub name: Option<String>,

    /// Package version
    #[arg(long = "pkg-version")]
    pub pkg_version: Option<String>,

    /// Package release
    #[arg(long)]
    pub release: Option<String>,

    /// Print the package contents instead of writing the RPM
    #[arg(long)]
    pub dry_run: bool,

    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
