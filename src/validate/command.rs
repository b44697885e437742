//! Subcommand allow-list for gated command-line tools
//!
//! Positive-list validation: only a fixed, closed set of subcommands passes,
//! everything else rejects regardless of arguments. Only the first token is
//! gated; flags and remaining arguments are left to the executing tool.
//! A production hardening gap worth knowing about: flags such as
//! `get --raw=/api/v1/...` can still reach endpoints the subcommand gate was
//! not written to anticipate, so downstream execution should stay read-only
//! at the credential level too.

use std::collections::BTreeSet;

use super::Rejection;

/// A fixed allow-set of permitted subcommands for one program
///
/// The set is kept sorted (`BTreeSet`) so rejection messages enumerate the
/// allowed subcommands in a stable order.
///
/// # Examples
///
/// ```
/// use toolgate::validate::CommandAllowList;
///
/// let allow = CommandAllowList::kubectl_read_only();
/// assert!(allow.validate("get pods -n production").is_ok());
/// assert!(allow.validate("delete pod x").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct CommandAllowList {
    program: String,
    allowed: BTreeSet<String>,
}

impl CommandAllowList {
    /// Creates an allow-list for `program` with the given subcommands
    pub fn new<I, S>(program: &str, allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.to_string(),
            allowed: allowed.into_iter().map(Into::into).collect(),
        }
    }

    /// The read-only kubectl allow-set: describe, get, logs, rollout, top
    pub fn kubectl_read_only() -> Self {
        Self::new("kubectl", ["get", "describe", "logs", "top", "rollout"])
    }

    /// Returns the gated program name
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Returns the allowed subcommands joined with ", " in sorted order
    pub fn allowed_list(&self) -> String {
        self.allowed
            .iter()
            .cloned()
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Validates a raw command line against the allow-set
    ///
    /// Tokenizes on whitespace and gates the first token. On success returns
    /// the tokenized argument list, ready to pass to a subprocess without
    /// shell interpretation.
    ///
    /// # Errors
    ///
    /// Returns [`Rejection::EmptyCommand`] for empty or whitespace-only
    /// input, and [`Rejection::SubcommandNotAllowed`] (enumerating the
    /// allow-set in sorted order) for any other first token outside the set.
    pub fn validate(&self, command: &str) -> Result<Vec<String>, Rejection> {
        let args: Vec<String> = command.split_whitespace().map(String::from).collect();
        let Some(subcommand) = args.first() else {
            return Err(Rejection::EmptyCommand);
        };
        if !self.allowed.contains(subcommand) {
            tracing::warn!(
                "Blocked {} subcommand: {:?}",
                self.program,
                subcommand
            );
            return Err(Rejection::SubcommandNotAllowed {
                program: self.program.clone(),
                allowed: self.allowed_list(),
            });
        }
        Ok(args)
    }
}
