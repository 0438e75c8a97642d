use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The server answered with a failure status; `message` is the body the
    /// server sent (always the generic wording, never field-level detail).
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("no active session")]
    NoSession,

    #[error("session cache error: {0}")]
    Cache(String),
}
