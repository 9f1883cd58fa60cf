//! Comment-batch analysis.

use serde_json::Value;
use tubesense_core::{Comment, CommentRecord, SentimentLabel, Statistics};

use crate::analyzer::SentimentAnalyzer;
use crate::stats::get_statistics;

/// Label every comment in place and aggregate the result.
///
/// Each comment gets `sentiment` and `sentiment_score` from its `text`.
/// Inference failures degrade to neutral inside the analyzer, so this never
/// fails; comments without text are simply neutral.
pub async fn analyze_comments(
    analyzer: &SentimentAnalyzer,
    comments: &mut [Comment],
) -> Statistics {
    let mut labels = Vec::with_capacity(comments.len());
    for comment in comments.iter_mut() {
        let result = analyzer.analyze(&comment.text).await;
        comment.sentiment = Some(result.label);
        comment.sentiment_score = Some(result.score);
        labels.push(result.label);
    }
    summarize(&labels)
}

/// [`analyze_comments`] over loose records.
///
/// A record whose `text` is missing, null or not a string is analysed as
/// blank. Every other field is left exactly as the caller sent it; an
/// existing `sentiment` or `sentiment_score` is overwritten.
pub async fn analyze_records(
    analyzer: &SentimentAnalyzer,
    records: &mut [CommentRecord],
) -> Statistics {
    let mut labels = Vec::with_capacity(records.len());
    for record in records.iter_mut() {
        let text = record.get("text").and_then(Value::as_str).unwrap_or("");
        let result = analyzer.analyze(text).await;
        record.insert("sentiment".to_owned(), Value::from(result.label.as_str()));
        record.insert("sentiment_score".to_owned(), Value::from(result.score));
        labels.push(result.label);
    }
    summarize(&labels)
}

fn summarize(labels: &[SentimentLabel]) -> Statistics {
    let names: Vec<&str> = labels.iter().map(|l| l.as_str()).collect();
    let stats = get_statistics(&names);

    tracing::info!(
        total = stats.total,
        positive = stats.positive,
        negative = stats.negative,
        neutral = stats.neutral,
        "comment batch analysed"
    );
    stats
}
