//! Command-line interface definition for Toolgate
//!
//! This module defines the CLI structure using clap's derive API, providing
//! commands for running validators from the shell and inspecting agent tool
//! presets.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Toolgate - validation and sandboxing layer for tool-augmented AI agents
///
/// Gate tool inputs (SQL queries, file paths, kubectl command lines,
/// Kubernetes names, durations) before they reach a real backend.
#[derive(Parser, Debug, Clone)]
#[command(name = "toolgate")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml", env = "TOOLGATE_CONFIG")]
    pub config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for Toolgate
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run a validator against a value and report accepted/rejected
    Check {
        /// What to validate
        #[command(subcommand)]
        target: CheckTarget,
    },

    /// List the tools registered for the agent presets
    Tools {
        /// Restrict to one agent (code_review, customer_support,
        /// data_analyst, devops)
        #[arg(short, long)]
        agent: Option<String>,

        /// Print full tool definitions as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

/// Validator selection for the check command
#[derive(Subcommand, Debug, Clone)]
pub enum CheckTarget {
    /// Validate a Kubernetes-style resource name
    Name {
        /// The candidate name
        value: String,

        /// Label used in the rejection reason
        #[arg(long, default_value = "name")]
        label: String,
    },

    /// Validate a duration such as 1h, 30m, or 90s
    Duration {
        /// The candidate duration
        value: String,
    },

    /// Validate that a SQL query is read-only
    Sql {
        /// The query text
        query: String,
    },

    /// Validate a relative path against a sandbox base directory
    Path {
        /// The candidate relative path
        path: String,

        /// Sandbox base directory
        #[arg(long, default_value = ".")]
        base: PathBuf,

        /// Required file extension
        #[arg(long, default_value = ".csv")]
        extension: String,
    },

    /// Validate a kubectl command line against the read-only allow-set
    Kubectl {
        /// The full kubectl argument string, e.g. "get pods -n production"
        command: String,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_check_sql() {
        let cli = Cli::try_parse_from(["toolgate", "check", "sql", "SELECT 1"]).unwrap();
        match cli.command {
            Commands::Check {
                target: CheckTarget::Sql { query },
            } => assert_eq!(query, "SELECT 1"),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_check_path_with_options() {
        let cli = Cli::try_parse_from([
            "toolgate", "check", "path", "data.csv", "--base", "/srv/data", "--extension", ".csv",
        ])
        .unwrap();
        match cli.command {
            Commands::Check {
                target:
                    CheckTarget::Path {
                        path,
                        base,
                        extension,
                    },
            } => {
                assert_eq!(path, "data.csv");
                assert_eq!(base, PathBuf::from("/srv/data"));
                assert_eq!(extension, ".csv");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_tools_with_agent() {
        let cli = Cli::try_parse_from(["toolgate", "tools", "--agent", "devops"]).unwrap();
        match cli.command {
            Commands::Tools { agent, json } => {
                assert_eq!(agent.as_deref(), Some("devops"));
                assert!(!json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_verbose_flag() {
        let cli = Cli::try_parse_from(["toolgate", "-v", "check", "duration", "1h"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn test_missing_command_is_error() {
        assert!(Cli::try_parse_from(["toolgate"]).is_err());
    }
}
