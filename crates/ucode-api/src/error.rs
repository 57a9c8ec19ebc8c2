// Error taxonomy for every HTTP surface in this crate.
//
// Variants fall into four kinds (see `ErrorKind`): transport failures,
// backend rejections (status > 300), shape errors (body did not match the
// expected envelope) and usage errors caught before any I/O.

use thiserror::Error;

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// Connection, DNS, TLS or timeout failure.
    Transport,
    /// The remote service answered with a failure status or error payload.
    Backend,
    /// The response body could not be parsed into the expected shape.
    Shape,
    /// Invalid input rejected locally.
    Usage,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Status code above 300. `message` is the raw body, followed by the
    /// body read error when reading also failed.
    #[error("{message}")]
    Backend {
        status: u16,
        body: String,
        message: String,
    },

    #[error("failed to parse response: {message}")]
    Deserialization { message: String, body: String },

    #[error("failed to serialize request payload: {0}")]
    Serialization(#[source] serde_json::Error),

    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("base URL cannot carry path segments: {0}")]
    InvalidBaseUrl(String),

    #[error("unsupported platform type: {0}")]
    UnsupportedPlatform(String),

    #[error("invalid recipient id {id:?}: {source}")]
    InvalidRecipient {
        id: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("telegram bot API error: {description}")]
    BotApi {
        status: u16,
        description: String,
    },

    #[error("push service error (HTTP {status}): {message}")]
    PushApi { status: u16, message: String },

    #[error("invalid credentials: {message}")]
    Credentials { message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Transport(_) | Self::Io(_) => ErrorKind::Transport,
            Self::Backend { .. } | Self::BotApi { .. } | Self::PushApi { .. } => {
                ErrorKind::Backend
            }
            Self::Deserialization { .. } => ErrorKind::Shape,
            Self::Serialization(_)
            | Self::InvalidUrl(_)
            | Self::InvalidBaseUrl(_)
            | Self::UnsupportedPlatform(_)
            | Self::InvalidRecipient { .. }
            | Self::Credentials { .. } => ErrorKind::Usage,
        }
    }

    /// Raw response body carried by backend and shape errors.
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Backend { body, .. } | Self::Deserialization { body, .. } => Some(body),
            _ => None,
        }
    }

    /// HTTP status of a rejected request, when there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Backend { status, .. }
            | Self::BotApi { status, .. }
            | Self::PushApi { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub(crate) fn deserialization(err: &serde_json::Error, body: String) -> Self {
        let preview = &body[..floor_char_boundary(&body, 200)];
        Self::Deserialization {
            message: format!("{err} (body preview: {preview:?})"),
            body,
        }
    }
}

fn floor_char_boundary(s: &str, max: usize) -> usize {
    if s.len() <= max {
        return s.len();
    }
    (0..=max).rev().find(|&i| s.is_char_boundary(i)).unwrap_or(0)
}
