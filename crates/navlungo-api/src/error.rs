use reqwest::StatusCode;
use thiserror::Error;

use crate::validation::RequestValidationError;

/// Failures raised once a request has left validation.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Http Error {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("Request failed: {0}")]
    Network(#[source] reqwest::Error),
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            TransportError::MalformedResponse(error.to_string())
        } else {
            TransportError::Network(error)
        }
    }
}

#[derive(Error, Debug)]
pub enum ClientError {
    #[error(transparent)]
    Validation(#[from] RequestValidationError),
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("Invalid base url: {0}")]
    InvalidBaseUrl(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Access token cannot be sent as a header value")]
    InvalidToken,
}

impl From<reqwest::Error> for ClientError {
    fn from(error: reqwest::Error) -> Self {
        ClientError::Transport(error.into())
    }
}

impl ClientError {
    /// Status code of a non-2xx response, if that is what failed.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Transport(TransportError::Status { status, .. }) => Some(*status),
            ClientError::Transport(TransportError::Network(error)) => error.status(),
            _ => None,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ClientError::Validation(_))
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self.status(),
            Some(StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
        )
    }
}
