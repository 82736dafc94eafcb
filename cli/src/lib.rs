//! Library entry point for indicium-cli.
//!
//! Argument parsing, command execution and logging setup live here so tests can
//! drive commands without spawning the binary.

pub mod args;
pub mod commands;
pub mod logging;

pub use args::{Cli, Command};
pub use commands::{execute, resolve_options, OptionOverrides};
