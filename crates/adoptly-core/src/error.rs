// ── Core error types ──
//
// Diagnostic errors from adoptly-core. Controllers never hand these to the
// UI as a message; they are kept for logging and `last_error()`.
// The `From<adoptly_api::Error>` impl translates transport-layer errors
// into domain-appropriate variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach pet service at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Pet service request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Pet not found: {identifier}")]
    NotFound { identifier: String },

    #[error("Malformed response: {message}")]
    Decode { message: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<adoptly_api::Error> for CoreError {
    fn from(err: adoptly_api::Error) -> Self {
        match err {
            adoptly_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout {
                        timeout_secs: adoptly_api::REQUEST_TIMEOUT.as_secs(),
                    }
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            adoptly_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            adoptly_api::Error::Config(message) => CoreError::Config { message },
            adoptly_api::Error::Timeout { timeout_secs } => CoreError::Timeout { timeout_secs },
            adoptly_api::Error::NotFound { path } => CoreError::NotFound { identifier: path },
            // No pet can live behind an id that cannot be addressed.
            adoptly_api::Error::InvalidId { id } => CoreError::NotFound { identifier: id },
            adoptly_api::Error::Status { status, body } => CoreError::Api {
                message: format!("HTTP {status}: {body}"),
                status: Some(status),
            },
            adoptly_api::Error::Deserialization { message, body: _ } => {
                CoreError::Decode { message }
            }
        }
    }
}
