//! HTTP client for the video platform's Data API (v3).
//!
//! Wraps `reqwest` with API key handling, typed response deserialization and
//! quota bookkeeping. Failures are never retried: quota and authorization
//! problems surface as [`YouTubeError::QuotaOrAuth`], everything else as one
//! of the generic request variants.

use std::time::Duration;

use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use tubesense_core::{Comment, Video};

use crate::error::YouTubeError;
use crate::quota::{QuotaTracker, QuotaUsage, COMMENT_PAGE_COST, SEARCH_COST};
use crate::types::{CommentThreadListResponse, ErrorEnvelope, SearchListResponse, SearchResult};

const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3/";

/// Hard cap on `maxResults` for `commentThreads.list`.
pub const MAX_COMMENT_PAGE_SIZE: usize = 100;

/// Client for the Data API.
///
/// Use [`YouTubeClient::new`] for production or [`YouTubeClient::with_base_url`]
/// to point at a mock server in tests. The quota counter is owned by the
/// client, so share one instance (behind an `Arc`) per process.
pub struct YouTubeClient {
    client: Client,
    api_key: String,
    base_url: Url,
    relevance_language: String,
    quota: QuotaTracker,
}

impl YouTubeClient {
    /// Creates a new client pointed at the production API.
    ///
    /// # Errors
    ///
    /// Returns [`YouTubeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, YouTubeError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`YouTubeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`YouTubeError::UnexpectedStatus`] with
    /// status `0` if `base_url` is not a valid URL.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, YouTubeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("tubesense/0.1 (comment-sentiment)")
            .build()?;

        // Trailing slash so that `Url::join` appends the resource name instead
        // of replacing the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| YouTubeError::UnexpectedStatus {
            status: 0,
            message: format!("invalid base URL '{base_url}': {e}"),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
            relevance_language: "id".to_owned(),
            quota: QuotaTracker::new(),
        })
    }

    /// Sets the `relevanceLanguage` used to rank search results.
    #[must_use]
    pub fn with_relevance_language(mut self, language: &str) -> Self {
        language.clone_into(&mut self.relevance_language);
        self
    }

    /// Searches videos by keyword, ordered by relevance in the configured language.
    ///
    /// Issues exactly one request and charges 100 quota units when it succeeds,
    /// however many results come back. The caller is responsible for rejecting
    /// empty queries.
    ///
    /// # Errors
    ///
    /// - [`YouTubeError::QuotaOrAuth`] on 401/403/429.
    /// - [`YouTubeError::UnexpectedStatus`] on any other non-2xx status.
    /// - [`YouTubeError::Http`] on network failure.
    /// - [`YouTubeError::Deserialize`] if the response shape is unexpected.
    pub async fn search(&self, query: &str, max_results: u32) -> Result<Vec<Video>, YouTubeError> {
        let max_results = max_results.to_string();
        let url = self.build_url(
            "search",
            &[
                ("part", "snippet"),
                ("q", query),
                ("type", "video"),
                ("maxResults", &max_results),
                ("relevanceLanguage", &self.relevance_language),
                ("order", "relevance"),
            ],
        );

        let body: SearchListResponse = self.request_json(&url, "search").await?;
        self.quota.charge(SEARCH_COST);

        let videos: Vec<Video> = body
            .items
            .into_iter()
            .filter_map(SearchResult::into_video)
            .collect();
        tracing::debug!(query, results = videos.len(), "video search complete");
        Ok(videos)
    }

    /// Lists up to `max_results` top-level comments for a video.
    ///
    /// Pages are requested at most 100 comments at a time; the final request
    /// asks for exactly the remainder. Paging stops when the continuation
    /// token disappears or `max_results` is reached. Each page charges one
    /// quota unit.
    ///
    /// **All-or-nothing**: a failure on any page discards comments from
    /// earlier pages and returns the error.
    ///
    /// # Errors
    ///
    /// Same categories as [`Self::search`].
    pub async fn get_comments(
        &self,
        video_id: &str,
        max_results: usize,
    ) -> Result<Vec<Comment>, YouTubeError> {
        let mut comments: Vec<Comment> = Vec::new();
        let mut page_token: Option<String> = None;

        while comments.len() < max_results {
            let page_size = (max_results - comments.len()).min(MAX_COMMENT_PAGE_SIZE);
            let page = self
                .fetch_comment_page(video_id, page_size, page_token.as_deref())
                .await?;

            comments.extend(page.items.into_iter().map(|t| t.into_comment(video_id)));

            match page.next_page_token {
                Some(token) if comments.len() < max_results => page_token = Some(token),
                _ => break,
            }
        }

        comments.truncate(max_results);
        Ok(comments)
    }

    /// Current quota estimate for this process.
    #[must_use]
    pub fn quota_usage(&self) -> QuotaUsage {
        self.quota.usage()
    }

    async fn fetch_comment_page(
        &self,
        video_id: &str,
        page_size: usize,
        page_token: Option<&str>,
    ) -> Result<CommentThreadListResponse, YouTubeError> {
        let page_size = page_size.to_string();
        let mut params = vec![
            ("part", "snippet"),
            ("videoId", video_id),
            ("maxResults", page_size.as_str()),
            ("order", "relevance"),
            ("textFormat", "plainText"),
        ];
        if let Some(token) = page_token {
            params.push(("pageToken", token));
        }

        let url = self.build_url("commentThreads", &params);
        let page: CommentThreadListResponse = self
            .request_json(&url, &format!("commentThreads(videoId={video_id})"))
            .await?;
        self.quota.charge(COMMENT_PAGE_COST);

        tracing::debug!(
            video_id,
            items = page.items.len(),
            has_next = page.next_page_token.is_some(),
            "fetched comment page"
        );
        Ok(page)
    }

    /// Builds the full request URL for `resource` with percent-encoded query parameters.
    fn build_url(&self, resource: &str, params: &[(&str, &str)]) -> Url {
        let mut url = self
            .base_url
            .join(resource)
            .unwrap_or_else(|_| self.base_url.clone());
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
            pairs.append_pair("key", &self.api_key);
        }
        url
    }

    /// Sends a GET request, maps non-2xx statuses to typed errors, and
    /// deserializes the body.
    async fn request_json<T: DeserializeOwned>(
        &self,
        url: &Url,
        context: &str,
    ) -> Result<T, YouTubeError> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = error_message(&body, status);
            tracing::warn!(status = status.as_u16(), context, %message, "video API request failed");
            return Err(classify_status(status, message));
        }

        serde_json::from_str(&body).map_err(|e| YouTubeError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }
}

/// Maps a failed HTTP status to the quota/auth or generic error category.
fn classify_status(status: StatusCode, message: String) -> YouTubeError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS => {
            YouTubeError::QuotaOrAuth {
                status: status.as_u16(),
                message,
            }
        }
        _ => YouTubeError::UnexpectedStatus {
            status: status.as_u16(),
            message,
        },
    }
}

/// Pulls `error.message` out of the platform's error envelope, falling back
/// to the status reason phrase.
fn error_message(body: &str, status: StatusCode) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .map(|e| e.error.message)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_owned()
        })
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
