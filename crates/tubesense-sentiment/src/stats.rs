//! Label aggregation.

use tubesense_core::{SentimentLabel, Statistics};

use crate::analyzer::round_to;

/// Count labels and compute rounded percentages.
///
/// Only exact `"positive"`, `"negative"` and `"neutral"` strings are counted
/// per label; anything else still counts toward `total`. Empty input gives
/// all zeros.
#[must_use]
pub fn get_statistics<S: AsRef<str>>(labels: &[S]) -> Statistics {
    let total = labels.len();
    if total == 0 {
        return Statistics::default();
    }

    let count = |wanted: SentimentLabel| {
        labels
            .iter()
            .filter(|l| l.as_ref() == wanted.as_str())
            .count()
    };
    let positive = count(SentimentLabel::Positive);
    let negative = count(SentimentLabel::Negative);
    let neutral = count(SentimentLabel::Neutral);

    Statistics {
        total,
        positive,
        negative,
        neutral,
        positive_pct: percentage(positive, total),
        negative_pct: percentage(negative, total),
        neutral_pct: percentage(neutral, total),
    }
}

#[allow(clippy::cast_precision_loss)]
fn percentage(count: usize, total: usize) -> f64 {
    round_to(count as f64 / total as f64 * 100.0, 1)
}
