use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub data_dir: PathBuf,
    pub youtube_api_key: String,
    pub youtube_base_url: String,
    pub youtube_relevance_language: String,
    pub youtube_request_timeout_secs: u64,
    pub sentiment_inference_url: String,
    /// Candidate model identifiers, tried in order at startup.
    pub sentiment_models: Vec<String>,
    pub sentiment_api_token: Option<String>,
    pub sentiment_request_timeout_secs: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("data_dir", &self.data_dir)
            .field("youtube_api_key", &"[redacted]")
            .field("youtube_base_url", &self.youtube_base_url)
            .field(
                "youtube_relevance_language",
                &self.youtube_relevance_language,
            )
            .field(
                "youtube_request_timeout_secs",
                &self.youtube_request_timeout_secs,
            )
            .field("sentiment_inference_url", &self.sentiment_inference_url)
            .field("sentiment_models", &self.sentiment_models)
            .field(
                "sentiment_api_token",
                &self.sentiment_api_token.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "sentiment_request_timeout_secs",
                &self.sentiment_request_timeout_secs,
            )
            .finish()
    }
}
