//! Validation core for tool inputs
//!
//! Every tool in this crate gates untrusted input through one of these
//! validators before the input is allowed to reach a real backend (a SQL
//! engine, the filesystem, a kubectl subprocess, the GitHub API). The
//! validators are pure, synchronous functions and small capability objects
//! with no shared mutable state; the only one that touches the system at all
//! is [`PathSandbox`], which reads filesystem metadata to resolve symlinks.
//!
//! Validators never panic on malformed-but-well-typed input. A disallowed
//! value produces a [`Rejection`] carrying a human-readable reason suitable
//! for relaying back through a conversational agent. Genuinely exceptional
//! conditions (filesystem errors during canonicalization) surface separately
//! as [`SandboxError::Io`] so callers can tell an unsafe request apart from a
//! safe request that failed to run.

pub mod command;
pub mod duration;
pub mod name;
pub mod sandbox;
pub mod sql;

pub use command::CommandAllowList;
pub use duration::duration;
pub use name::resource_name;
pub use sandbox::{PathSandbox, SandboxError};
pub use sql::sql_read_only;

use thiserror::Error;

/// Why a tool input was refused before reaching a backend
///
/// Each variant's `Display` output is the user-facing reason string. Reasons
/// are stable and deterministic so they can be asserted in tests and relayed
/// verbatim by an agent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// Value is not a valid lowercase alphanumeric-and-hyphens identifier
    #[error("Invalid {label}. Use lowercase alphanumeric characters and hyphens only.")]
    InvalidName {
        /// What the value was supposed to be ("service name", "namespace")
        label: String,
    },

    /// Value is not `<digits><h|m|s>`
    #[error("Invalid duration format. Use a value like 1h, 30m, or 2h.")]
    InvalidDuration,

    /// Query does not start with SELECT or WITH
    #[error("Only SELECT queries are permitted")]
    QueryNotReadOnly,

    /// Query contains a semicolon (stacked-query defense)
    #[error("Semicolons are not permitted in queries")]
    QueryContainsSemicolon,

    /// Path is absolute or contains a parent-directory segment
    #[error("Invalid file path. Only relative paths within the data directory are allowed.")]
    PathNotRelative,

    /// Path does not end with the required extension
    #[error("Only {extension} files are supported.")]
    PathWrongExtension {
        /// The required extension, including the leading dot
        extension: String,
    },

    /// Resolved path escapes the sandbox base directory
    #[error("Access outside of the data directory is not allowed.")]
    PathEscapesBase,

    /// Command line was empty or whitespace-only
    #[error("No command provided")]
    EmptyCommand,

    /// Subcommand is not in the read-only allow-set
    #[error("Only read-only {program} commands are permitted. Allowed: {allowed}")]
    SubcommandNotAllowed {
        /// The gated program ("kubectl")
        program: String,
        /// Comma-separated allowed subcommands, in sorted order
        allowed: String,
    },

    /// Numeric input was empty
    #[error("Empty array")]
    EmptyData,
}
