//! Command-line front end for the elevation toolkit.
//!
//! Argument parsing, configuration and command handlers live here so they
//! can be tested without spawning the binary.

pub mod cli;
pub mod commands;
pub mod config;

pub use cli::{BaseArg, Cli, Command};
pub use commands::run;
pub use config::CliConfig;
