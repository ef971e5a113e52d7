//! CLI argument definitions using clap
//!
//! Commands:
//! - student-registry init --config <path>
//! - student-registry start --config <path>
//! - student-registry list --config <path> [--search <term>]
//! - student-registry validate

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Student Registry - a small, strict student-records service
#[derive(Parser, Debug)]
#[command(name = "student-registry")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the database and the students table
    Init {
        /// Path to configuration file
        #[arg(long, default_value = "./student-registry.json")]
        config: PathBuf,
    },

    /// Serve the HTTP API
    Start {
        /// Path to configuration file
        #[arg(long, default_value = "./student-registry.json")]
        config: PathBuf,
    },

    /// Print all students as JSON
    List {
        /// Path to configuration file
        #[arg(long, default_value = "./student-registry.json")]
        config: PathBuf,

        /// Only students whose name, ID, email or phone contain this term
        #[arg(long)]
        search: Option<String>,
    },

    /// Sanitize and validate one student read from stdin
    Validate,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_with_search() {
        let cli = Cli::parse_from(["student-registry", "list", "--search", "jane"]);
        match cli.command {
            Command::List { config, search } => {
                assert_eq!(config, PathBuf::from("./student-registry.json"));
                assert_eq!(search.as_deref(), Some("jane"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_start_with_config() {
        let cli = Cli::parse_from(["student-registry", "start", "--config", "/etc/reg.json"]);
        assert!(matches!(cli.command, Command::Start { config } if config == PathBuf::from("/etc/reg.json")));
    }
}
