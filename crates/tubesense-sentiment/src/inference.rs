//! HTTP text-classification client (Hugging Face style inference API).

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::classifier::{LabelScore, ModelOutput, TextClassifier};
use crate::error::ClassifierError;

/// Classifier backed by a remote inference endpoint serving one model.
pub struct HttpClassifier {
    client: Client,
    url: String,
    model_id: String,
    api_token: Option<String>,
}

#[derive(Serialize)]
struct ClassifyRequest<'a> {
    inputs: &'a str,
}

/// The three response shapes inference servers use for text classification.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawPrediction {
    /// `[[{label, score}, ...]]`: every label scored.
    Nested(Vec<Vec<LabelScore>>),
    /// `[{label, score}, ...]`: one or more labels, in no guaranteed order.
    Flat(Vec<LabelScore>),
    /// `{label, score}`
    Single(LabelScore),
}

impl From<RawPrediction> for ModelOutput {
    fn from(raw: RawPrediction) -> Self {
        match raw {
            RawPrediction::Nested(rows) => {
                ModelOutput::RankedLabels(rows.into_iter().next().unwrap_or_default())
            }
            RawPrediction::Flat(mut labels) if labels.len() == 1 => {
                ModelOutput::SingleLabel(labels.remove(0))
            }
            RawPrediction::Flat(labels) => ModelOutput::RankedLabels(labels),
            RawPrediction::Single(label) => ModelOutput::SingleLabel(label),
        }
    }
}

impl HttpClassifier {
    /// Create a classifier for `model_id` served under `{inference_url}/models/`.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifierError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(
        inference_url: &str,
        model_id: &str,
        api_token: Option<&str>,
        timeout_secs: u64,
    ) -> Result<Self, ClassifierError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            url: format!(
                "{}/models/{}",
                inference_url.trim_end_matches('/'),
                model_id
            ),
            model_id: model_id.to_owned(),
            api_token: api_token.map(ToOwned::to_owned),
        })
    }
}

#[async_trait]
impl TextClassifier for HttpClassifier {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    async fn classify(&self, text: &str) -> Result<ModelOutput, ClassifierError> {
        let mut request = self
            .client
            .post(&self.url)
            .json(&ClassifyRequest { inputs: text });
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ClassifierError::Status {
                status: status.as_u16(),
                message: body.chars().take(200).collect(),
            });
        }

        let raw: RawPrediction = serde_json::from_str(&body)?;
        Ok(raw.into())
    }
}

/// Build one [`HttpClassifier`] per model identifier, in order.
///
/// Models whose client cannot be constructed are logged and skipped; the
/// result is meant for [`crate::SentimentAnalyzer::load`].
#[must_use]
pub fn http_candidates(
    inference_url: &str,
    models: &[String],
    api_token: Option<&str>,
    timeout_secs: u64,
) -> Vec<Arc<dyn TextClassifier>> {
    models
        .iter()
        .filter_map(|model| {
            match HttpClassifier::new(inference_url, model, api_token, timeout_secs) {
                Ok(classifier) => Some(Arc::new(classifier) as Arc<dyn TextClassifier>),
                Err(e) => {
                    tracing::warn!(model = %model, error = %e, "could not build inference client");
                    None
                }
            }
        })
        .collect()
}
