//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use terrarium_config::ConfigError;
use terrarium_core::CoreError;

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
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not reach the registry at {url}")]
    #[diagnostic(
        code(terrarium::connection_failed),
        help(
            "Check that the registry is running and reachable.\n\
             URL: {url}\n\
             Self-signed certificate? Try --insecure (-k) or set ca_cert in your profile."
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Request timed out after {seconds}s")]
    #[diagnostic(
        code(terrarium::timeout),
        help("Increase timeout with --timeout or check registry responsiveness.")
    )]
    Timeout { seconds: u64 },

    // ── Resources ────────────────────────────────────────────────────

    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(terrarium::not_found),
        help("Run: terrarium {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── API ──────────────────────────────────────────────────────────

    #[error("API error (HTTP {status}): {message}")]
    #[diagnostic(code(terrarium::http_error))]
    HttpStatus { status: u16, message: String },

    #[error("API error: {message}")]
    #[diagnostic(code(terrarium::api_error))]
    ApiError { message: String },

    #[error("Registry sent a malformed {kind} response: {message}")]
    #[diagnostic(
        code(terrarium::decode),
        help("The registry may be running an incompatible version. Re-run with -vv for details.")
    )]
    Decode { kind: String, message: String },

    #[error("Operation '{operation}' is not supported")]
    #[diagnostic(code(terrarium::unsupported), help("This command requires {required}."))]
    Unsupported { operation: String, required: String },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(terrarium::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(terrarium::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: terrarium config init --name {name} --url <URL>"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No registry configured")]
    #[diagnostic(
        code(terrarium::no_config),
        help(
            "Pass --url, set TERRARIUM_URL, or create a profile with: terrarium config init\n\
             Expected at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(terrarium::config))]
    Config(Box<ConfigError>),

    #[error("Internal error: {0}")]
    #[diagnostic(code(terrarium::internal))]
    Internal(String),

    // ── IO / Serialization ────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render JSON: {0}")]
    #[diagnostic(code(terrarium::json))]
    Json(#[from] serde_json::Error),

    #[error("Failed to render YAML: {0}")]
    #[diagnostic(code(terrarium::yaml))]
    Yaml(#[from] serde_yaml::Error),
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            other => Self::Config(Box::new(other)),
        }
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::NotFound { .. } | Self::ProfileNotFound { .. } => exit_code::NOT_FOUND,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::Validation { .. } | Self::NoConfig { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed {
                url,
                source: reason.into(),
            },

            CoreError::Timeout { timeout_secs } => CliError::Timeout {
                seconds: timeout_secs,
            },

            CoreError::ModuleNotFound { identifier } => CliError::NotFound {
                resource_type: "module".into(),
                identifier,
                list_command: "modules list".into(),
            },

            CoreError::ProviderNotFound { identifier } => CliError::NotFound {
                resource_type: "provider".into(),
                identifier,
                list_command: "providers list".into(),
            },

            CoreError::NotFound { resource } => CliError::NotFound {
                resource_type: "resource".into(),
                identifier: resource,
                list_command: "--help".into(),
            },

            CoreError::Decode { kind, message } => CliError::Decode { kind, message },

            CoreError::Unsupported {
                operation,
                required,
            } => CliError::Unsupported {
                operation,
                required,
            },

            CoreError::Api {
                message,
                status: Some(status),
            } => CliError::HttpStatus { status, message },

            CoreError::Api {
                message,
                status: None,
            } => CliError::ApiError { message },

            CoreError::Config { message } => CliError::Validation {
                field: "configuration".into(),
                reason: message,
            },

            CoreError::Internal(message) => CliError::Internal(message),
        }
    }
}
