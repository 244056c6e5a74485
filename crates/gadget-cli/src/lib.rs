//! Gadget CLI - terminal client for the gadget catalog.

pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;

pub use cli::{Cli, Command};
pub use commands::{run, CommandError};
pub use config::{Config, ConfigError};
