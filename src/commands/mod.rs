// src/commands/mod.rs
//! Command handlers for the ign2rpm CLI

mod pack;

pub use pack::{cmd_pack, PackOptions};
