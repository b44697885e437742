//! Duration string validation for kubectl `--since` flags
//!
//! Accepts the simple `<digits><unit>` form kubectl takes for relative time
//! windows. Compound durations ("1h30m") are not a supported format and are
//! rejected rather than partially parsed.

use std::sync::OnceLock;

use regex::Regex;

use super::Rejection;

static DURATION_RE: OnceLock<Regex> = OnceLock::new();

fn duration_re() -> &'static Regex {
    DURATION_RE
        .get_or_init(|| Regex::new(r"^[0-9]+(h|m|s)$").expect("duration pattern is valid"))
}

/// Validates a duration string such as `1h`, `30m`, or `90s`
///
/// Accepts iff the entire value is one or more digits followed by exactly one
/// lowercase unit character from `h`, `m`, `s`. This is a total function:
/// every string maps to accept or reject with no ambiguous cases.
///
/// # Errors
///
/// Returns [`Rejection::InvalidDuration`] for compound forms (`1h30m`),
/// missing or uppercase units (`1H`), non-digit prefixes, and the empty
/// string.
///
/// # Examples
///
/// ```
/// use toolgate::validate::duration;
///
/// assert!(duration("1h").is_ok());
/// assert!(duration("1h30m").is_err());
/// ```
pub fn duration(value: &str) -> Result<(), Rejection> {
    if duration_re().is_match(value) {
        Ok(())
    } else {
        tracing::debug!("Rejected duration: {:?}", value);
        Err(Rejection::InvalidDuration)
    }
}
