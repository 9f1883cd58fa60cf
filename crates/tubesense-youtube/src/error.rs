use thiserror::Error;

/// Errors returned by the video API client.
///
/// [`YouTubeError::QuotaOrAuth`] is the distinguishable quota/authorization
/// category; every other variant is a generic request failure.
#[derive(Debug, Error)]
pub enum YouTubeError {
    /// HTTP 401, 403 or 429: bad key, exhausted quota, comments disabled, or rate limiting.
    #[error("API quota exceeded or access denied (HTTP {status}): {message}")]
    QuotaOrAuth { status: u16, message: String },

    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error occurred: {0}")]
    Http(#[from] reqwest::Error),

    /// Any other non-2xx response.
    #[error("unexpected HTTP status {status}: {message}")]
    UnexpectedStatus { status: u16, message: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

impl YouTubeError {
    #[must_use]
    pub fn is_quota_or_auth(&self) -> bool {
        matches!(self, YouTubeError::QuotaOrAuth { .. })
    }
}
