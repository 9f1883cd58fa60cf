//! Comment sentiment analysis for tubesense.
//!
//! Wraps a pre-trained text-classification model behind [`TextClassifier`],
//! folds whatever label vocabulary the active model uses into the
//! positive/negative/neutral scheme, and aggregates label batches into
//! [`tubesense_core::Statistics`].

pub mod analyzer;
pub mod classifier;
pub mod error;
pub mod inference;
pub mod pipeline;
pub mod stats;

pub use analyzer::{normalize_label, SentimentAnalyzer, SentimentResult};
pub use classifier::{LabelScore, ModelOutput, TextClassifier};
pub use error::ClassifierError;
pub use inference::{http_candidates, HttpClassifier};
pub use pipeline::{analyze_comments, analyze_records};
pub use stats::get_statistics;
