//! Keep-alive failure taxonomy
//!
//! Four kinds that never overlap. Callers match on them (or on `kind()`) to
//! choose between a network retry and a fresh login.

use std::fmt;

use reqwest::StatusCode;
use serde_json::{Map, Value};

/// Which stage of the keep-alive rejected the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// The request could not be sent or its response not read.
    Transport,
    /// The response carried a non-2xx status.
    HttpStatus,
    /// The body was not a JSON object.
    InvalidResponse,
    /// The service answered with a status other than `SUCCESS`.
    Application,
}

impl FailureKind {
    /// Stable label for logs and metrics.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Transport => "transport",
            Self::HttpStatus => "http_status",
            Self::InvalidResponse => "invalid_response",
            Self::Application => "application",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors from a keep-alive call.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Carries the underlying cause, never response data.
    #[error("keepAlive request failed: {source}")]
    Transport {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("status code error: {status}")]
    Status { status: StatusCode, body: String },

    #[error("invalid response received: {text}")]
    InvalidResponse { text: String },

    /// Carries the full decoded payload, e.g. `{"status":"FAIL","error":"NO_SESSION"}`.
    #[error("API keepAlive error: {}", render(.response))]
    KeepAlive { response: Map<String, Value> },
}

impl Error {
    pub(crate) fn transport(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport {
            source: Box::new(source),
        }
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Transport { .. } => FailureKind::Transport,
            Self::Status { .. } => FailureKind::HttpStatus,
            Self::InvalidResponse { .. } => FailureKind::InvalidResponse,
            Self::KeepAlive { .. } => FailureKind::Application,
        }
    }

    /// Whether the session is dead and only a new login can recover it.
    ///
    /// Application failures (e.g. `NO_SESSION`) and 401/403 responses mean
    /// the token was rejected. Everything else may succeed on a later attempt.
    pub fn requires_login(&self) -> bool {
        match self {
            Self::KeepAlive { .. } => true,
            Self::Status { status, .. } => {
                *status == StatusCode::UNAUTHORIZED || *status == StatusCode::FORBIDDEN
            }
            Self::Transport { .. } | Self::InvalidResponse { .. } => false,
        }
    }

    /// The service's error code for application failures, if it sent one.
    pub fn error_code(&self) -> Option<&str> {
        match self {
            Self::KeepAlive { response } => response.get("error").and_then(Value::as_str),
            _ => None,
        }
    }
}

fn render(response: &Map<String, Value>) -> String {
    serde_json::to_string(response).unwrap_or_default()
}

/// Result alias for keep-alive operations.
pub type Result<T> = std::result::Result<T, Error>;
