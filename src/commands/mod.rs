//! Command handlers for the CLI
//!
//! This module provides the handlers invoked by the CLI entrypoint:
//!
//! - `check` - run one validator against a value and report the outcome
//! - `tools` - list the tools registered for the agent presets
//!
//! The handlers are intentionally small and use the library components:
//! the validators, the agent preset builders, and the tool registry.

use colored::Colorize;
use prettytable::{format, Table};

use crate::agents::{AgentKind, ToolRegistryBuilder};
use crate::cli::CheckTarget;
use crate::config::Config;
use crate::error::Result;
use crate::validate::{self, CommandAllowList, PathSandbox, SandboxError};

/// Outcome of a check command: the reason is `None` when accepted
pub struct CheckOutcome {
    /// Whether the input was accepted
    pub accepted: bool,
    /// The rejection (or execution failure) reason when not accepted
    pub reason: Option<String>,
}

impl CheckOutcome {
    fn accepted() -> Self {
        Self {
            accepted: true,
            reason: None,
        }
    }

    fn rejected(reason: String) -> Self {
        Self {
            accepted: false,
            reason: Some(reason),
        }
    }
}

/// Runs one validator against the given input
///
/// Pure dispatch: no printing, so the outcome is directly testable.
pub fn run_check(target: &CheckTarget) -> CheckOutcome {
    let result: std::result::Result<(), String> = match target {
        CheckTarget::Name { value, label } => {
            validate::resource_name(value, label).map_err(|r| r.to_string())
        }
        CheckTarget::Duration { value } => validate::duration(value).map_err(|r| r.to_string()),
        CheckTarget::Sql { query } => validate::sql_read_only(query).map_err(|r| r.to_string()),
        CheckTarget::Path {
            path,
            base,
            extension,
        } => {
            let sandbox = PathSandbox::new(base.clone(), extension);
            match sandbox.resolve(path) {
                Ok(_) => Ok(()),
                Err(SandboxError::Rejected(rejection)) => Err(rejection.to_string()),
                Err(SandboxError::Io(err)) => Err(format!("IO error: {}", err)),
            }
        }
        CheckTarget::Kubectl { command } => CommandAllowList::kubectl_read_only()
            .validate(command)
            .map(|_| ())
            .map_err(|r| r.to_string()),
    };

    match result {
        Ok(()) => CheckOutcome::accepted(),
        Err(reason) => CheckOutcome::rejected(reason),
    }
}

/// Handles the check command, printing the outcome
///
/// Returns the accepted flag so the entrypoint can derive the exit code.
pub fn handle_check(target: &CheckTarget) -> bool {
    let outcome = run_check(target);
    if outcome.accepted {
        println!("{}", "accepted".green());
    } else {
        println!(
            "{}: {}",
            "rejected".red(),
            outcome.reason.as_deref().unwrap_or("unknown reason")
        );
    }
    outcome.accepted
}

/// Resolves which presets a tools command addresses
fn selected_kinds(agent: Option<&str>) -> Result<Vec<AgentKind>> {
    match agent {
        Some(name) => {
            let kind: AgentKind = name
                .parse()
                .map_err(|err: String| crate::error::ToolgateError::Config(err))?;
            Ok(vec![kind])
        }
        None => Ok(AgentKind::all().to_vec()),
    }
}

/// Handles the tools command
///
/// # Errors
///
/// Returns an error for unknown agent names or serialization failures.
pub fn handle_tools(agent: Option<&str>, json: bool, config: &Config) -> Result<()> {
    let kinds = selected_kinds(agent)?;

    if json {
        let mut listing = Vec::new();
        for kind in &kinds {
            let registry = ToolRegistryBuilder::new(*kind, config.clone()).build()?;
            listing.push(serde_json::json!({
                "agent": kind.name(),
                "tools": registry.all_definitions(),
            }));
        }
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);
    table.add_row(prettytable::row![
        "AGENT".bold(),
        "TOOL".bold(),
        "DESCRIPTION".bold()
    ]);

    for kind in &kinds {
        let registry = ToolRegistryBuilder::new(*kind, config.clone()).build()?;
        for definition in registry.all_definitions() {
            table.add_row(prettytable::row![
                kind.name().cyan(),
                definition["name"].as_str().unwrap_or(""),
                definition["description"].as_str().unwrap_or("")
            ]);
        }
    }

    table.printstd();
    Ok(())
}
