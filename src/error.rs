//! Error types for Toolgate
//!
//! This module defines the execution-error category used throughout the
//! crate, using `thiserror` for ergonomic error handling. Validation
//! rejections are a separate taxonomy (`crate::validate::Rejection`) so that
//! callers can distinguish "the request was unsafe" from "the safe request
//! failed to run".

use thiserror::Error;

/// Main error type for Toolgate operations
///
/// This enum encompasses the recoverable execution failures that can occur
/// after a tool input has passed validation: configuration loading,
/// subprocess launch/timeout, HTTP calls, and serialization.
#[derive(Error, Debug)]
pub enum ToolgateError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Tool execution errors
    #[error("Tool execution error: {0}")]
    Tool(String),

    /// Subprocess could not be launched (binary missing, spawn failure)
    #[error("Command launch failed: {0}")]
    CommandLaunch(String),

    /// Subprocess exceeded its execution deadline
    #[error("Command timed out after {seconds} seconds")]
    CommandTimeout {
        /// The configured timeout that was exceeded
        seconds: u64,
    },

    /// External API returned a non-success status
    #[error("{service} API error: {status}")]
    ApiStatus {
        /// Human-readable service name (e.g. "GitHub")
        service: String,
        /// HTTP status code returned by the service
        status: u16,
    },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for Toolgate operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let error = ToolgateError::Config("invalid format".to_string());
        assert_eq!(error.to_string(), "Configuration error: invalid format");
    }

    #[test]
    fn test_tool_error_display() {
        let error = ToolgateError::Tool("registry empty".to_string());
        assert_eq!(error.to_string(), "Tool execution error: registry empty");
    }

    #[test]
    fn test_command_launch_error_display() {
        let error = ToolgateError::CommandLaunch("kubectl not found".to_string());
        assert_eq!(
            error.to_string(),
            "Command launch failed: kubectl not found"
        );
    }

    #[test]
    fn test_command_timeout_error_display() {
        let error = ToolgateError::CommandTimeout { seconds: 30 };
        assert_eq!(error.to_string(), "Command timed out after 30 seconds");
    }

    #[test]
    fn test_api_status_error_display() {
        let error = ToolgateError::ApiStatus {
            service: "GitHub".to_string(),
            status: 404,
        };
        assert_eq!(error.to_string(), "GitHub API error: 404");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error: ToolgateError = io_error.into();
        assert!(matches!(error, ToolgateError::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_error = serde_json::from_str::<serde_json::Value>("{oops}").unwrap_err();
        let error: ToolgateError = json_error.into();
        assert!(matches!(error, ToolgateError::Serialization(_)));
    }

    #[test]
    fn test_yaml_error_conversion() {
        let yaml_error = serde_yaml::from_str::<serde_yaml::Value>("invalid: : yaml").unwrap_err();
        let error: ToolgateError = yaml_error.into();
        assert!(matches!(error, ToolgateError::Yaml(_)));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ToolgateError>();
    }
}
