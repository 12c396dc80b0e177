// build.rs

use clap::{Arg, Command};
use clap_mangen::Man;
use std::env;
use std::fs;
use std::path::PathBuf;

fn build_cli() -> Command {
    Command::new("ign2rpm")
        .version(env!("CARGO_PKG_VERSION"))
        .author("ign2rpm Contributors")
        .about("Pack an Ignition config into an installable RPM")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .required(true)
                .value_name("PATH|URL")
                .help("Config file ign/machineconfig to read (path or http(s) URL)"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("RPM target file to write"),
        )
        .arg(
            Arg::new("metadata")
                .long("metadata")
                .value_name("FILE")
                .help("TOML file with package metadata overrides"),
        )
        .arg(Arg::new("name").long("name").help("Package name"))
        .arg(Arg::new("pkg_version").long("pkg-version").help("Package version"))
        .arg(Arg::new("release").long("release").help("Package release"))
        .arg(
            Arg::new("dry_run")
                .long("dry-run")
                .action(clap::ArgAction::SetTrue)
                .help("Print the package contents instead of writing the RPM"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(clap::ArgAction::Count)
                .help("Increase log verbosity"),
        )
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Create man directory - use CARGO_MANIFEST_DIR which is always set by cargo
    let manifest_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(e) => {
            println!("cargo:warning=CARGO_MANIFEST_DIR not set: {}", e);
            return;
        }
    };
    let man_dir = manifest_dir.join("man");

    if let Err(e) = fs::create_dir_all(&man_dir) {
        println!("cargo:warning=Failed to create man directory: {}", e);
        return;
    }

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();

    if let Err(e) = man.render(&mut buffer) {
        println!("cargo:warning=Failed to render man page: {}", e);
        return;
    }

    let man_path = man_dir.join("ign2rpm.1");
    if let Err(e) = fs::write(&man_path, buffer) {
        println!("cargo:warning=Failed to write man page: {}", e);
    }
}
