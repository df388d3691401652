//! Error types for the embed client

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Non-200 status from one of the read endpoints, carrying the
    /// upstream message when the body had one.
    #[error("Remote API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// 200 response missing a field the post model cannot do without.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failure in the handle store collaborator.
    #[error("Handle store error: {0}")]
    Store(String),
}

impl Error {
    pub fn malformed(msg: impl Into<String>) -> Self {
        Error::MalformedResponse(msg.into())
    }
}
