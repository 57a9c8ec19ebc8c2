// ── Result shaping ──
//
// Every object operation resolves to `Result<Outcome<T>, Failure>`. Both
// sides carry the uniform `Response` record so callers that only forward
// status to their own clients can do so without matching on the error.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::Display;

use ucode_api::{Error, ErrorKind, Object};

/// Status discriminator of a [`Response`].
///
/// Reads and link operations historically leave it unset on success.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Status {
    Done,
    Error,
    #[default]
    #[serde(rename = "")]
    #[strum(serialize = "")]
    Unset,
}

/// Uniform status record returned with every operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default)]
    pub data: Object,
    #[serde(default)]
    pub attributes: Object,
    #[serde(default)]
    pub server: Object,
}

impl Response {
    pub fn with_status(status: Status) -> Self {
        Self {
            status,
            ..Self::default()
        }
    }

    pub fn done() -> Self {
        Self::with_status(Status::Done)
    }

    /// Failure record: `description` holds the raw body when one was read.
    pub fn failed(message: &str, error: &Error) -> Self {
        let mut data = Object::new();
        if let Some(body) = error.body() {
            data.insert("description".into(), Value::String(body.to_owned()));
        }
        data.insert("message".into(), Value::String(message.to_owned()));
        data.insert("error".into(), Value::String(error.to_string()));

        Self {
            status: Status::Error,
            error: Some(error.to_string()),
            data,
            ..Self::default()
        }
    }

    pub fn is_error(&self) -> bool {
        self.status == Status::Error
    }

    /// The `message` diagnostic, if this is a failure record.
    pub fn message(&self) -> Option<&str> {
        self.data.get("message").and_then(Value::as_str)
    }
}

/// Successful operation: typed envelope plus its status record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outcome<T> {
    pub data: T,
    pub response: Response,
}

/// Failed operation: the underlying error and the diagnostics record.
#[derive(Debug, thiserror::Error)]
#[error("{error}")]
pub struct Failure {
    #[source]
    pub error: Error,
    pub response: Response,
}

impl Failure {
    pub fn new(message: &str, error: Error) -> Self {
        Self {
            response: Response::failed(message, &error),
            error,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.error.kind()
    }
}
