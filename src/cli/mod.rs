//! CLI module for charbase
//!
//! Provides command-line interface for:
//! - validate: check a character against a guide
//! - plan: show the SQL for a list request
//! - list: run a list request against a characters file
//! - default-guide: print the built-in or configured default guide

mod args;
mod commands;
mod errors;
mod io;

pub use args::{ActorArgs, Cli, Command, QueryArgs};
pub use commands::{default_guide, list, plan, run, run_command, validate};
pub use errors::{CliError, CliErrorCode, CliResult};
