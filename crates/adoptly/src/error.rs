//! CLI error types with miette diagnostics.
//!
//! Controllers only expose a static failure message; the underlying
//! `CoreError` decides which variant (and exit code) the user sees.

use miette::Diagnostic;
use thiserror::Error;

use adoptly_config::ConfigError;
use adoptly_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Fetch failures ───────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(
        code(adoptly::not_found),
        help("No pet matches '{identifier}'.\nRun: adoptly pets list to see available pets")
    )]
    NotFound { message: String, identifier: String },

    #[error("{message}")]
    #[diagnostic(
        code(adoptly::connection_failed),
        help(
            "Could not reach the pet service at {url}.\n\
             Check the address or pass --api-url.\n\
             Cause: {reason}"
        )
    )]
    ConnectionFailed {
        message: String,
        url: String,
        reason: String,
    },

    #[error("{message}")]
    #[diagnostic(
        code(adoptly::timeout),
        help("The pet service did not answer within {timeout_secs}s. Try again.")
    )]
    Timeout { message: String, timeout_secs: u64 },

    #[error("{message}")]
    #[diagnostic(code(adoptly::load_failed), help("Cause: {cause}"))]
    LoadFailed { message: String, cause: String },

    // ── Input / configuration ────────────────────────────────────────
    #[error("Invalid {field}: {reason}")]
    #[diagnostic(code(adoptly::validation))]
    Validation { field: String, reason: String },

    #[error("Configuration error: {message}")]
    #[diagnostic(
        code(adoptly::config),
        help("Check the config file (adoptly config path) and ADOPTLY_* variables.")
    )]
    Config { message: String },

    #[error("I/O error: {0}")]
    #[diagnostic(code(adoptly::io))]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Build an error from a controller's failure message and its cause.
    pub fn from_failure(message: &str, cause: Option<&CoreError>) -> Self {
        let message = message.to_owned();
        match cause {
            Some(CoreError::NotFound { identifier }) => Self::NotFound {
                message,
                identifier: identifier.clone(),
            },
            Some(CoreError::ConnectionFailed { url, reason }) => Self::ConnectionFailed {
                message,
                url: url.clone(),
                reason: reason.clone(),
            },
            Some(CoreError::Timeout { timeout_secs }) => Self::Timeout {
                message,
                timeout_secs: *timeout_secs,
            },
            Some(other) => Self::LoadFailed {
                message,
                cause: other.to_string(),
            },
            None => Self::LoadFailed {
                message,
                cause: "unknown".into(),
            },
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::Validation { .. } => exit_code::USAGE,
            Self::LoadFailed { .. } | Self::Config { .. } | Self::Io(_) => exit_code::GENERAL,
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            other => Self::Config {
                message: other.to_string(),
            },
        }
    }
}

impl From<adoptly_api::Error> for CliError {
    fn from(err: adoptly_api::Error) -> Self {
        Self::Config {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_cause_maps_to_exit_4() {
        let cause = CoreError::NotFound {
            identifier: "/pets/9".into(),
        };
        let err = CliError::from_failure("Failed to load pet", Some(&cause));
        assert_eq!(err.exit_code(), exit_code::NOT_FOUND);
        assert_eq!(err.to_string(), "Failed to load pet");
    }

    #[test]
    fn connection_cause_maps_to_exit_7() {
        let cause = CoreError::ConnectionFailed {
            url: "http://127.0.0.1:9/pets".into(),
            reason: "refused".into(),
        };
        let err = CliError::from_failure("Failed to load pets", Some(&cause));
        assert_eq!(err.exit_code(), exit_code::CONNECTION);
    }

    #[test]
    fn other_causes_are_general_failures() {
        let cause = CoreError::Decode {
            message: "expected array".into(),
        };
        let err = CliError::from_failure("Failed to load pets", Some(&cause));
        assert_eq!(err.exit_code(), exit_code::GENERAL);
        assert!(matches!(err, CliError::LoadFailed { ref cause, .. } if cause.contains("expected array")));
    }
}
