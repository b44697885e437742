//! Kubernetes-style resource name validation
//!
//! Names passed to kubectl flags (`-n`, `-l app=...`) must be lowercase
//! alphanumeric with hyphens, no leading or trailing hyphen. Anything else is
//! rejected before the value is interpolated into a command line.

use std::sync::OnceLock;

use regex::Regex;

use super::Rejection;

static NAME_RE: OnceLock<Regex> = OnceLock::new();

fn name_re() -> &'static Regex {
    NAME_RE.get_or_init(|| {
        Regex::new(r"^[a-z0-9]([a-z0-9-]*[a-z0-9])?$").expect("resource name pattern is valid")
    })
}

/// Validates a Kubernetes-style resource name
///
/// Accepts iff the value matches `^[a-z0-9]([a-z0-9-]*[a-z0-9])?$`: lowercase
/// ASCII letters, digits, and hyphens, at least one character, with no leading
/// or trailing hyphen. Case matters: any uppercase character rejects.
///
/// # Arguments
///
/// * `value` - The candidate name
/// * `label` - What the value names, used in the rejection reason
///   ("service name", "namespace")
///
/// # Errors
///
/// Returns [`Rejection::InvalidName`] carrying the label when the value does
/// not match.
///
/// # Examples
///
/// ```
/// use toolgate::validate::resource_name;
///
/// assert!(resource_name("api-gateway", "service name").is_ok());
/// assert!(resource_name("My_Service", "service name").is_err());
/// ```
pub fn resource_name(value: &str, label: &str) -> Result<(), Rejection> {
    if name_re().is_match(value) {
        Ok(())
    } else {
        tracing::debug!("Rejected {}: {:?}", label, value);
        Err(Rejection::InvalidName {
            label: label.to_string(),
        })
    }
}
