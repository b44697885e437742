//! Toolgate - validation and sandboxing layer for tool-augmented AI agents
//!
//! This library gates untrusted tool inputs before they reach a real backend.
//! It provides the validation core (resource names, durations, read-only SQL,
//! sandboxed paths, subcommand allow-lists) and the tool implementations that
//! consume it, grouped into per-agent presets a host session runtime can
//! register directly.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `validate`: the validation core - pure predicates and capability objects
//! - `tools`: tool result/executor/registry abstractions and concrete tools
//! - `agents`: per-agent tool presets and system prompts
//! - `config`: configuration management and validation
//! - `error`: error types and result aliases
//! - `cli` / `commands`: command-line interface
//!
//! # Example
//!
//! ```
//! use toolgate::agents::{AgentKind, ToolRegistryBuilder};
//! use toolgate::config::Config;
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = Config::default();
//! config.validate()?;
//!
//! let registry = ToolRegistryBuilder::new(AgentKind::DataAnalyst, config).build()?;
//! assert!(registry.get("run_sql_query").is_some());
//! # Ok(())
//! # }
//! ```

pub mod agents;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod tools;
pub mod validate;

// Re-export commonly used types
pub use agents::{AgentKind, ToolRegistryBuilder};
pub use config::Config;
pub use error::{Result, ToolgateError};
pub use tools::{ToolExecutor, ToolRegistry, ToolResult};
pub use validate::{CommandAllowList, PathSandbox, Rejection, SandboxError};
