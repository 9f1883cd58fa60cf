//! The seam between the analyzer and whatever model produces raw labels.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ClassifierError;

/// One raw label as the model names it, e.g. `"POSITIVE"` or `"4 stars"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelScore {
    pub label: String,
    pub score: f64,
}

/// Raw model output. Models either return their single best label or a
/// score for every label they know.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelOutput {
    SingleLabel(LabelScore),
    RankedLabels(Vec<LabelScore>),
}

impl ModelOutput {
    /// The winning label: the single label, or the highest-scoring ranked
    /// entry (first one wins a tie). `None` for an empty ranking.
    #[must_use]
    pub fn top(&self) -> Option<&LabelScore> {
        match self {
            ModelOutput::SingleLabel(label) => Some(label),
            ModelOutput::RankedLabels(labels) => labels
                .iter()
                .reduce(|best, next| if next.score > best.score { next } else { best }),
        }
    }
}

/// A loaded text-classification model.
#[async_trait]
pub trait TextClassifier: Send + Sync {
    /// Identifier of the model behind this classifier.
    fn model_id(&self) -> &str;

    /// Classify one text.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifierError`] if inference fails for any reason.
    async fn classify(&self, text: &str) -> Result<ModelOutput, ClassifierError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ls(label: &str, score: f64) -> LabelScore {
        LabelScore {
            label: label.to_string(),
            score,
        }
    }

    #[test]
    fn single_label_is_its_own_top() {
        let output = ModelOutput::SingleLabel(ls("NEGATIVE", 0.7));
        assert_eq!(output.top(), Some(&ls("NEGATIVE", 0.7)));
    }

    #[test]
    fn ranked_labels_pick_max_score() {
        let output = ModelOutput::RankedLabels(vec![
            ls("negative", 0.1),
            ls("positive", 0.8),
            ls("neutral", 0.1),
        ]);
        assert_eq!(output.top().map(|l| l.label.as_str()), Some("positive"));
    }

    #[test]
    fn ranked_tie_keeps_first_entry() {
        let output = ModelOutput::RankedLabels(vec![ls("1 star", 0.5), ls("5 stars", 0.5)]);
        assert_eq!(output.top().map(|l| l.label.as_str()), Some("1 star"));
    }

    #[test]
    fn empty_ranking_has_no_top() {
        assert!(ModelOutput::RankedLabels(Vec::new()).top().is_none());
    }
}
