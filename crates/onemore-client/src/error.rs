use thiserror::Error;

/// Failures talking to the content server.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid server url: {0}")]
    InvalidUrl(String),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status; `message` is the
    /// `error` field of its JSON body when there was one.
    #[error("server answered {status}: {message}")]
    Status { status: u16, message: String },

    /// Rejected locally before any request was sent.
    #[error("{0}")]
    Invalid(#[from] onemore_core::SubmissionError),
}

/// Failures reading or writing persisted session state.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage file is not valid json: {0}")]
    Json(#[from] serde_json::Error),
}
