//! Text to three-way sentiment, with graceful degradation.

use std::sync::Arc;

use serde::Serialize;
use tubesense_core::SentimentLabel;

use crate::classifier::TextClassifier;

/// Only this many characters are sent to the model; longer comments would
/// overflow typical 512-token context windows.
pub const MAX_TEXT_CHARS: usize = 500;

/// Text used to check that a candidate model actually answers.
const PROBE_TEXT: &str = "ok";

/// Case-insensitive substrings that mark a raw model label as positive.
const POSITIVE_MARKERS: &[&str] = &["positive", "positif", "4 stars", "5 stars"];

/// Case-insensitive substrings that mark a raw model label as negative.
const NEGATIVE_MARKERS: &[&str] = &["negative", "negatif", "1 star", "2 stars"];

/// Outcome of analysing one text. `error` is set when the classifier could
/// not be used; the label is then always neutral with score `0.0`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentResult {
    pub label: SentimentLabel,
    pub score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SentimentResult {
    fn neutral() -> Self {
        Self {
            label: SentimentLabel::Neutral,
            score: 0.0,
            error: None,
        }
    }

    fn failed(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::neutral()
        }
    }
}

/// Fold a model-specific label into the three-way scheme.
///
/// Handles binary positive/negative models, 1-5 star rating models and
/// Indonesian-labelled models. Anything unrecognised (including `"3 stars"`)
/// is neutral.
#[must_use]
pub fn normalize_label(raw: &str) -> SentimentLabel {
    let lower = raw.to_lowercase();
    if POSITIVE_MARKERS.iter().any(|m| lower.contains(m)) {
        SentimentLabel::Positive
    } else if NEGATIVE_MARKERS.iter().any(|m| lower.contains(m)) {
        SentimentLabel::Negative
    } else {
        SentimentLabel::Neutral
    }
}

/// Sentiment analyzer over an optional loaded classifier.
///
/// Without a classifier every call returns a neutral result flagged
/// `"Model not loaded"`; analysis never fails outright.
pub struct SentimentAnalyzer {
    classifier: Option<Arc<dyn TextClassifier>>,
}

impl SentimentAnalyzer {
    #[must_use]
    pub fn with_classifier(classifier: Arc<dyn TextClassifier>) -> Self {
        Self {
            classifier: Some(classifier),
        }
    }

    /// An analyzer in degraded mode.
    #[must_use]
    pub fn unloaded() -> Self {
        Self { classifier: None }
    }

    /// Try each candidate in order and keep the first that answers a probe.
    ///
    /// Falls back to [`Self::unloaded`] when none does.
    pub async fn load(candidates: Vec<Arc<dyn TextClassifier>>) -> Self {
        for candidate in candidates {
            match candidate.classify(PROBE_TEXT).await {
                Ok(_) => {
                    tracing::info!(model = candidate.model_id(), "sentiment model loaded");
                    return Self::with_classifier(candidate);
                }
                Err(e) => {
                    tracing::warn!(
                        model = candidate.model_id(),
                        error = %e,
                        "could not load sentiment model, trying next candidate"
                    );
                }
            }
        }

        tracing::error!("no sentiment model could be loaded; every comment will be neutral");
        Self::unloaded()
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.classifier.is_some()
    }

    /// Identifier of the active model, if any.
    #[must_use]
    pub fn model_id(&self) -> Option<&str> {
        self.classifier.as_deref().map(|c| c.model_id())
    }

    /// Analyse one text.
    ///
    /// Blank text short-circuits to neutral without touching the model.
    /// Text is cut to [`MAX_TEXT_CHARS`] characters and the score rounded to
    /// three decimals. Inference failures become a neutral result with the
    /// error message attached.
    pub async fn analyze(&self, text: &str) -> SentimentResult {
        let Some(classifier) = &self.classifier else {
            return SentimentResult::failed("Model not loaded");
        };

        if text.trim().is_empty() {
            return SentimentResult::neutral();
        }

        match classifier.classify(truncate_chars(text, MAX_TEXT_CHARS)).await {
            Ok(output) => match output.top() {
                Some(top) => SentimentResult {
                    label: normalize_label(&top.label),
                    score: round_to(top.score, 3),
                    error: None,
                },
                None => SentimentResult::neutral(),
            },
            Err(e) => {
                tracing::warn!(error = %e, "sentiment inference failed");
                SentimentResult::failed(e.to_string())
            }
        }
    }

    /// Analyse each text independently, preserving order.
    pub async fn analyze_batch<S: AsRef<str>>(&self, texts: &[S]) -> Vec<SentimentResult> {
        let mut results = Vec::with_capacity(texts.len());
        for text in texts {
            results.push(self.analyze(text.as_ref()).await);
        }
        results
    }
}

fn truncate_chars(text: &str, max_chars: usize) -> &str {
    text.char_indices()
        .nth(max_chars)
        .map_or(text, |(idx, _)| &text[..idx])
}

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (value * factor).round() / factor
}
