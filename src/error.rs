use reqwest::{Method, StatusCode};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GraylogError>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors from talking to the Graylog REST API.
#[derive(Debug, Error)]
pub enum GraylogError {
    #[error("error encoding input into json: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("error creating the request: {0}")]
    RequestBuild(#[source] BoxError),

    #[error("error executing the request: {0}")]
    Transport(#[source] reqwest::Error),

    /// The server answered with a status >= 400. The body is not inspected.
    #[error("error calling API: {status} on {method} {url}")]
    Api {
        status: StatusCode,
        method: Method,
        url: String,
    },

    #[error("error decoding body: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("can't generate secure password: {0}")]
    Password(#[source] BoxError),
}

impl GraylogError {
    pub(crate) fn request_build(err: impl Into<BoxError>) -> Self {
        Self::RequestBuild(err.into())
    }

    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }
}
