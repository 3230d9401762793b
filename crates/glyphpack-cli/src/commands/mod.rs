// this_file: crates/glyphpack-cli/src/commands/mod.rs

//! Subcommand implementations

pub mod encode;
pub mod inspect;
pub mod list;
