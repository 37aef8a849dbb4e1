//! Guidance error types

use thiserror::Error;

/// Missing or unusable service configuration. Fatal at construction.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("required environment variable {0} is not set")]
    Missing(&'static str),

    #[error("invalid value {value:?} for {var}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },

    #[error("failed to build HTTP client: {0}")]
    HttpClient(String),
}

/// Failure talking to the completion API. Never cached or retried.
#[derive(Debug, Error)]
pub enum RemoteServiceError {
    #[error("completion API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("completion request failed: {0}")]
    Transport(String),

    #[error("malformed completion response: {0}")]
    MalformedResponse(String),
}

/// Error returned by the guidance service
#[derive(Debug, Error)]
pub enum GuidanceError {
    #[error(transparent)]
    Configuration(#[from] ConfigError),

    #[error(transparent)]
    RemoteService(#[from] RemoteServiceError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl GuidanceError {
    /// HTTP status reported by the upstream API, if it answered at all
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            GuidanceError::RemoteService(RemoteServiceError::Status { status, .. }) => {
                Some(*status)
            }
            _ => None,
        }
    }
}

impl From<reqwest::Error> for RemoteServiceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RemoteServiceError::Transport(format!("request timed out: {}", err))
        } else if err.is_decode() {
            RemoteServiceError::MalformedResponse(err.to_string())
        } else {
            RemoteServiceError::Transport(err.to_string())
        }
    }
}
