use thiserror::Error;

use ucode_api::ErrorKind;

/// Errors raised by the notification dispatcher and facade setup.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Api(#[from] ucode_api::Error),

    /// A send to one recipient failed; later recipients were not attempted.
    #[error("delivery to {recipient} failed: {source}")]
    Delivery {
        recipient: String,
        #[source]
        source: ucode_api::Error,
    },

    #[error("push credentials are not configured")]
    MissingPushCredentials,

    #[error("invalid attachment name: {0:?}")]
    InvalidFileName(String),

    #[error("failed to stage attachment: {0}")]
    Attachment(#[source] std::io::Error),
}

impl CoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Api(e) | Self::Delivery { source: e, .. } => e.kind(),
            Self::MissingPushCredentials | Self::InvalidFileName(_) => ErrorKind::Usage,
            Self::Attachment(_) => ErrorKind::Transport,
        }
    }
}
