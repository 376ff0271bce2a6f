// ── Core error types ──
//
// User-facing errors from loradeck-core. Consumers never see HTTP status
// codes or JSON parse failures directly; the `From<loradeck_api::Error>`
// impl translates transport-layer errors into domain-appropriate variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Clone, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach network server: {reason}")]
    ConnectionFailed { reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("{entity} not found: {identifier}")]
    NotFound { entity: String, identifier: String },

    // ── Operation errors ─────────────────────────────────────────────
    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    #[error("Server error: {message}")]
    Server { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Shorthand for a validation failure with a formatted message.
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::ValidationFailed {
            message: message.into(),
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<loradeck_api::Error> for CoreError {
    fn from(err: loradeck_api::Error) -> Self {
        match err {
            loradeck_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            loradeck_api::Error::Transport(ref e) => CoreError::ConnectionFailed {
                reason: e.to_string(),
            },
            loradeck_api::Error::InvalidUrl(e) => CoreError::ConnectionFailed {
                reason: format!("invalid URL: {e}"),
            },
            loradeck_api::Error::Tls(reason) => CoreError::ConnectionFailed {
                reason: format!("TLS: {reason}"),
            },
            loradeck_api::Error::NotFound { resource } => CoreError::NotFound {
                entity: "resource".into(),
                identifier: resource,
            },
            loradeck_api::Error::Api { message, status } => CoreError::Server {
                message: format!("{message} (HTTP {status})"),
            },
            loradeck_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("deserialization error: {message}"))
            }
        }
    }
}
