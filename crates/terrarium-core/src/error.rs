// ── Core error types ──
//
// User-facing errors from terrarium-core. Consumers never see HTTP status
// codes or JSON parse failures directly. The `From<terrarium_api::Error>`
// impl translates transport-layer errors into domain-appropriate variants.
//
// `Clone` because the last failure of a load is kept inside `LoadState`
// and handed to every subscriber.

use thiserror::Error;

use crate::model::ResourceKind;

/// Unified error type for the core crate.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach registry at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Registry request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Module not found: {identifier}")]
    ModuleNotFound { identifier: String },

    #[error("Provider not found: {identifier}")]
    ProviderNotFound { identifier: String },

    #[error("Not found: {resource}")]
    NotFound { resource: String },

    #[error("Malformed {kind} payload: {message}")]
    Decode { kind: String, message: String },

    // ── Operation errors ─────────────────────────────────────────────
    #[error("Operation not supported: {operation} (requires {required})")]
    Unsupported { operation: String, required: String },

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

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Attach the resource kind to a decoding failure so the message says
    /// which list was malformed.
    pub(crate) fn for_kind(self, kind: ResourceKind) -> Self {
        match self {
            Self::Decode { message, .. } => Self::Decode {
                kind: kind.to_string(),
                message,
            },
            other => other,
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<terrarium_api::Error> for CoreError {
    fn from(err: terrarium_api::Error) -> Self {
        let http_status = err.status();
        match err {
            // A timeout without a known limit (caller-supplied client) reads
            // as a failed connection rather than "timed out after 0s".
            terrarium_api::Error::Transport(ref e) if e.is_timeout() || e.is_connect() => {
                CoreError::ConnectionFailed {
                    url: e
                        .url()
                        .map_or_else(|| "<unknown>".into(), ToString::to_string),
                    reason: e.to_string(),
                }
            }
            terrarium_api::Error::Transport(e) => CoreError::Api {
                message: e.to_string(),
                status: http_status,
            },
            terrarium_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            terrarium_api::Error::Timeout { timeout_secs } => CoreError::Timeout { timeout_secs },
            terrarium_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            terrarium_api::Error::NotFound { path } => CoreError::NotFound { resource: path },
            terrarium_api::Error::Http { status, message } => CoreError::Api {
                message,
                status: Some(status),
            },
            terrarium_api::Error::Deserialization { message, body: _ } => CoreError::Decode {
                kind: "response".into(),
                message,
            },
        }
    }
}
