use thiserror::Error;

/// Top-level error type for the `adoptly-api` crate.
///
/// Covers every failure mode of the pet resource: transport, HTTP status,
/// and body decoding. `adoptly-core` maps these into domain errors.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The pet id cannot be sent as a single path segment.
    #[error("Pet id {id:?} cannot be used in a request path")]
    InvalidId { id: String },

    /// Request timed out.
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// The client could not be configured (bad base URL, TLS backend, etc.)
    #[error("Invalid client configuration: {0}")]
    Config(String),

    // ── HTTP status ─────────────────────────────────────────────────
    /// The server answered 404 for the requested resource.
    #[error("Resource not found: {path}")]
    NotFound { path: String },

    /// Any other non-2xx response. `body` is a truncated preview.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound { .. } => true,
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            _ => false,
        }
    }

    /// Returns `true` if this is a transient error worth retrying.
    ///
    /// Nothing in this crate retries; the flag is for callers.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Timeout { .. } => true,
            Self::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// The HTTP status code behind this error, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::NotFound { .. } => Some(404),
            Self::Status { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
