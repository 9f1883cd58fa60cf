use thiserror::Error;

/// Failures at the classifier boundary.
///
/// These never reach HTTP callers: [`crate::SentimentAnalyzer::analyze`]
/// absorbs them into a neutral result carrying the message.
#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("inference request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("inference service returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("inference response parse error: {0}")]
    Deserialize(#[from] serde_json::Error),
}
