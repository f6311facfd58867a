use thiserror::Error;

/// The primary error type for all fallible operations in this crate.
///
/// Page-level failures never escape a purchases fetch; they are classified for
/// retry and end pagination quietly. This type surfaces only from client
/// construction, filter JSON parsing, and the per-page [`PageOutcome::Failed`]
/// variant.
///
/// [`PageOutcome::Failed`]: crate::purchases::PageOutcome::Failed
#[derive(Debug, Error)]
pub enum OiError {
    /// An error occurred during an HTTP request.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A provided URL could not be parsed.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// The server returned an unexpected or unsuccessful HTTP status code.
    #[error("Unexpected response status: {status} at {url}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The URL that returned the error.
        url: String,
    },

    /// The page body could not be processed.
    #[error("Data format unexpected: {0}")]
    Data(String),

    /// A JSON filter object could not be parsed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl OiError {
    /// Returns the HTTP status code if this is a [`OiError::Status`].
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True for HTTP statuses in the 4xx range.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        self.status().is_some_and(|s| (400..500).contains(&s))
    }
}
