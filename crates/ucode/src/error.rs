//! CLI error types with miette diagnostics.
//!
//! Maps operation failures, dispatcher errors and settings errors into
//! user-facing errors with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use ucode_api::ErrorKind;
use ucode_config::ConfigError;
use ucode_core::{CoreError, Failure};

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const BACKEND: i32 = 3;
    pub const SHAPE: i32 = 4;
    pub const DELIVERY: i32 = 5;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Object operations ────────────────────────────────────────────

    #[error("{message}: {error}")]
    #[diagnostic(code(ucode::operation_failed))]
    OperationFailed {
        message: String,
        error: String,
        #[help]
        description: Option<String>,
        kind: ErrorKind,
    },

    // ── Notifications ────────────────────────────────────────────────

    #[error("Delivery to {recipient} failed: {reason}")]
    #[diagnostic(
        code(ucode::delivery_failed),
        help("Recipients after {recipient} were not attempted.")
    )]
    Delivery { recipient: String, reason: String },

    #[error("No bot token configured")]
    #[diagnostic(
        code(ucode::no_bot_token),
        help("Set bot_token in the settings file or the UCODE_BOT_TOKEN environment variable.")
    )]
    NoBotToken,

    #[error("No recipients configured")]
    #[diagnostic(
        code(ucode::no_recipients),
        help("Set account_ids in the settings file or UCODE_ACCOUNT_IDS (comma-separated).")
    )]
    NoRecipients,

    #[error("Push credentials are not configured")]
    #[diagnostic(
        code(ucode::no_push_credentials),
        help(
            "Point push_credentials_file (or UCODE_PUSH_CREDENTIALS_FILE) at a\n\
             service-account JSON key."
        )
    )]
    NoPushCredentials,

    // ── API ──────────────────────────────────────────────────────────

    #[error("{message}")]
    #[diagnostic(code(ucode::api_error))]
    Api { kind: ErrorKind, message: String },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(ucode::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Settings file already exists at {path}")]
    #[diagnostic(code(ucode::config_exists), help("Pass --force to overwrite it."))]
    ConfigExists { path: String },

    #[error(transparent)]
    #[diagnostic(
        code(ucode::config),
        help("Run: ucode config show to see the effective settings")
    )]
    Config(Box<ConfigError>),

    // ── IO / Serialization ───────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON payload: {0}")]
    #[diagnostic(code(ucode::json), help("Check the JSON contents and try again."))]
    Json(#[from] serde_json::Error),

    #[error("Failed to render YAML: {0}")]
    #[diagnostic(code(ucode::yaml))]
    Yaml(#[from] serde_yaml::Error),
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        Self::Config(Box::new(err))
    }
}

fn kind_exit_code(kind: ErrorKind) -> i32 {
    match kind {
        ErrorKind::Transport => exit_code::CONNECTION,
        ErrorKind::Backend => exit_code::BACKEND,
        ErrorKind::Shape => exit_code::SHAPE,
        ErrorKind::Usage => exit_code::USAGE,
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::OperationFailed { kind, .. } | Self::Api { kind, .. } => kind_exit_code(*kind),
            Self::Delivery { .. } => exit_code::DELIVERY,
            Self::NoBotToken
            | Self::NoRecipients
            | Self::NoPushCredentials
            | Self::Validation { .. }
            | Self::ConfigExists { .. }
            | Self::Config(_) => exit_code::USAGE,
            Self::Io(_) | Self::Json(_) | Self::Yaml(_) => exit_code::GENERAL,
        }
    }
}

// ── Library error mapping ────────────────────────────────────────────

impl From<Failure> for CliError {
    fn from(failure: Failure) -> Self {
        let kind = failure.kind();
        let field = |key: &str| {
            failure
                .response
                .data
                .get(key)
                .and_then(serde_json::Value::as_str)
                .map(str::to_owned)
        };
        Self::OperationFailed {
            message: field("message").unwrap_or_else(|| "Operation failed".into()),
            description: field("description").filter(|d| !d.is_empty()),
            error: failure.error.to_string(),
            kind,
        }
    }
}

impl From<ucode_api::Error> for CliError {
    fn from(err: ucode_api::Error) -> Self {
        Self::Api {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Api(e) => e.into(),
            CoreError::Delivery { recipient, source } => Self::Delivery {
                recipient,
                reason: source.to_string(),
            },
            CoreError::MissingPushCredentials => Self::NoPushCredentials,
            CoreError::InvalidFileName(name) => Self::Validation {
                field: "name".into(),
                reason: format!("{name:?} is not a plain file name"),
            },
            CoreError::Attachment(e) => Self::Io(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_maps_to_kind_exit_code() {
        let failure = Failure::new(
            "Error while deleting object",
            ucode_api::Error::Backend {
                status: 404,
                body: "not found".into(),
                message: "not found".into(),
            },
        );
        let err = CliError::from(failure);
        assert_eq!(err.exit_code(), exit_code::BACKEND);
        assert_eq!(err.to_string(), "Error while deleting object: not found");
    }

    #[test]
    fn delivery_keeps_recipient() {
        let err = CliError::from(CoreError::Delivery {
            recipient: "42".into(),
            source: ucode_api::Error::BotApi {
                status: 403,
                description: "Forbidden".into(),
            },
        });
        assert_eq!(err.exit_code(), exit_code::DELIVERY);
        assert!(err.to_string().contains("42"));
    }

    #[test]
    fn missing_credentials_is_usage() {
        let err = CliError::from(CoreError::MissingPushCredentials);
        assert_eq!(err.exit_code(), exit_code::USAGE);
    }
}
