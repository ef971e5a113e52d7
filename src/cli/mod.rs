//! CLI module for the student registry
//!
//! Provides command-line interface for:
//! - init: Create the database and table
//! - start: Serve the HTTP API
//! - list: Print stored students
//! - validate: Check one student from stdin without storing it

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{init, list, run, run_command, start, validate, Config};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{read_request, write_response};
