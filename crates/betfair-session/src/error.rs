//! Error types for session state operations

/// Errors from building or reading session state.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid header value for {0}")]
    InvalidHeader(String),

    #[error("HTTP client setup failed: {0}")]
    Client(String),
}

/// Result alias for session operations.
pub type Result<T> = std::result::Result<T, Error>;
