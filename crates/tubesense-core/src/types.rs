use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A search hit from the video platform. Never mutated locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    pub video_id: String,
    pub title: String,
    pub description: String,
    pub channel: String,
    pub published_at: String,
}

/// Three-way sentiment scheme every model label is folded into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Negative => "negative",
            SentimentLabel::Neutral => "neutral",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A top-level video comment.
///
/// `sentiment` and `sentiment_score` are filled in by the analyzer. Fields the
/// platform (or an API client) sends that are not modelled here are kept in
/// `extra` so that analysis and export pass them through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub published_at: String,
    #[serde(default)]
    pub video_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<SentimentLabel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment_score: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A comment as an API client or a saved file holds it: any JSON object.
///
/// Handlers that accept comments from outside take this shape rather than
/// [`Comment`] so that records pass through with their own fields and types.
pub type CommentRecord = Map<String, Value>;

/// Label counts and percentages over one batch.
///
/// Percentages are `count / total * 100` rounded to one decimal place each,
/// so they need not add up to exactly `100.0`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub total: usize,
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
    pub positive_pct: f64,
    pub negative_pct: f64,
    pub neutral_pct: f64,
}
