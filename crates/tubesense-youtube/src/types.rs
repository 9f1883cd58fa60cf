//! Data API response types.
//!
//! Only the fields this crate reads are modelled; everything else in the
//! platform's JSON is ignored.

use serde::Deserialize;
use tubesense_core::{Comment, Video};

// ---------------------------------------------------------------------------
// search.list
// ---------------------------------------------------------------------------

/// Response body of `search.list`.
#[derive(Debug, Deserialize)]
pub struct SearchListResponse {
    #[serde(default)]
    pub items: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
pub struct SearchResult {
    pub id: ResourceId,
    pub snippet: SearchSnippet,
}

/// Search results may point at channels or playlists; only videos carry `videoId`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceId {
    #[serde(default)]
    pub video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchSnippet {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub channel_title: String,
    #[serde(default)]
    pub published_at: String,
}

impl SearchResult {
    /// Converts to a [`Video`], or `None` for non-video results.
    #[must_use]
    pub fn into_video(self) -> Option<Video> {
        let video_id = self.id.video_id?;
        Some(Video {
            video_id,
            title: self.snippet.title,
            description: self.snippet.description,
            channel: self.snippet.channel_title,
            published_at: self.snippet.published_at,
        })
    }
}

// ---------------------------------------------------------------------------
// commentThreads.list
// ---------------------------------------------------------------------------

/// One page of `commentThreads.list`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentThreadListResponse {
    #[serde(default)]
    pub items: Vec<CommentThread>,
    /// Continuation token; absent on the last page.
    #[serde(default)]
    pub next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CommentThread {
    pub snippet: CommentThreadSnippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentThreadSnippet {
    pub top_level_comment: TopLevelComment,
}

#[derive(Debug, Deserialize)]
pub struct TopLevelComment {
    pub snippet: CommentSnippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentSnippet {
    #[serde(default)]
    pub text_display: String,
    #[serde(default)]
    pub author_display_name: String,
    #[serde(default)]
    pub like_count: u64,
    #[serde(default)]
    pub published_at: String,
}

impl CommentThread {
    /// Flattens the thread's top-level comment. Replies are not collected.
    #[must_use]
    pub fn into_comment(self, video_id: &str) -> Comment {
        let snippet = self.snippet.top_level_comment.snippet;
        Comment {
            text: snippet.text_display,
            author: snippet.author_display_name,
            likes: snippet.like_count,
            published_at: snippet.published_at,
            video_id: video_id.to_owned(),
            ..Comment::default()
        }
    }
}

// ---------------------------------------------------------------------------
// Error envelope
// ---------------------------------------------------------------------------

/// `{"error": {"code": 403, "message": "..."}}` returned on failures.
#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_result_without_video_id_is_skipped() {
        let body: SearchListResponse = serde_json::from_value(serde_json::json!({
            "items": [
                {"id": {"kind": "youtube#channel", "channelId": "c1"}, "snippet": {"title": "chan"}},
                {"id": {"kind": "youtube#video", "videoId": "v1"}, "snippet": {
                    "title": "Debat capres",
                    "description": "desc",
                    "channelTitle": "Berita",
                    "publishedAt": "2024-01-05T10:00:00Z"
                }}
            ]
        }))
        .expect("parse");

        let videos: Vec<Video> = body
            .items
            .into_iter()
            .filter_map(SearchResult::into_video)
            .collect();
        assert_eq!(videos.len(), 1);
        assert_eq!(videos[0].video_id, "v1");
        assert_eq!(videos[0].channel, "Berita");
    }

    #[test]
    fn comment_thread_maps_top_level_snippet() {
        let thread: CommentThread = serde_json::from_value(serde_json::json!({
            "snippet": {"topLevelComment": {"snippet": {
                "textDisplay": "Setuju sekali",
                "authorDisplayName": "@warga",
                "likeCount": 12,
                "publishedAt": "2024-01-06T08:00:00Z"
            }}}
        }))
        .expect("parse");

        let comment = thread.into_comment("v1");
        assert_eq!(comment.text, "Setuju sekali");
        assert_eq!(comment.author, "@warga");
        assert_eq!(comment.likes, 12);
        assert_eq!(comment.video_id, "v1");
        assert!(comment.sentiment.is_none());
    }

    #[test]
    fn missing_next_page_token_means_last_page() {
        let page: CommentThreadListResponse =
            serde_json::from_value(serde_json::json!({"items": []})).expect("parse");
        assert!(page.next_page_token.is_none());
    }
}
