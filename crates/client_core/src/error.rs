use std::path::PathBuf;

use shared::error::ServiceRejection;
use thiserror::Error;

pub type Result<T, E = ClientError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid service url: {0}")]
    Url(#[from] url::ParseError),
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    #[error(transparent)]
    Service(#[from] ServiceRejection),
    /// The service answered with a success status but declined the request in its body.
    #[error("service refused the request: {0}")]
    Refused(String),
    #[error("failed to decode service response: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("failed to read upload file '{}': {source}", path.display())]
    Upload {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ClientError {
    /// True when no usable response was received from the service.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Error detail reported by the service, if the service reported one.
    pub fn service_detail(&self) -> Option<&str> {
        match self {
            Self::Service(rejection) => rejection.detail.as_deref(),
            Self::Refused(reason) => Some(reason.as_str()),
            _ => None,
        }
    }
}
