//! Errors raised while pulling article batches.

/// Everything that can stop a batch pull.
///
/// `Transport`, `Decode` and `MissingDocs` mean the page could not be read
/// at all. `RequestFailed` means the API answered but refused the request.
/// A schema field missing from a record is not an error.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("transport: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("response decode: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("page {page}: response has no docs container")]
    MissingDocs { page: u32 },

    #[error("page {page}: request failed with status {status}")]
    RequestFailed { page: u32, status: String },

    #[error("api key must not be empty")]
    MissingCredential,

    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),
}

impl SourceError {
    /// True when the page never produced a usable envelope.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            SourceError::Transport(_) | SourceError::Decode(_) | SourceError::MissingDocs { .. }
        )
    }
}
