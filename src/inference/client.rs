use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    config::InferenceConfig,
    error::AppError,
    inference::model::{InferenceParams, TextModel},
};

#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    parameters: &'a InferenceParams,
}

/// One element of the pipeline output array.
#[derive(Debug, Deserialize)]
struct InferenceOutput {
    generated_text: Option<String>,
    summary_text: Option<String>,
}

/// Model served over HTTP with the Hugging Face inference request shape.
pub struct HttpTextModel {
    client: Client,
    model: String,
    url: String,
    api_token: Option<String>,
}

impl HttpTextModel {
    pub fn new(cfg: &InferenceConfig, base_url: &str, model: &str) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()
            .context("build inference http client")?;
        Ok(Self {
            client,
            model: model.to_string(),
            url: format!("{}/models/{}", base_url, model),
            api_token: cfg.api_token.clone(),
        })
    }

    /// Fails unless the server reports the model as present.
    pub async fn check_ready(&self) -> anyhow::Result<()> {
        let mut req = self.client.get(&self.url);
        if let Some(token) = &self.api_token {
            req = req.bearer_auth(token);
        }
        req.send()
            .await
            .with_context(|| format!("reach model server for {}", self.model))?
            .error_for_status()
            .with_context(|| format!("model {} not available", self.model))?;
        Ok(())
    }
}

fn first_text(outputs: Vec<InferenceOutput>) -> Option<String> {
    outputs
        .into_iter()
        .next()
        .and_then(|o| o.generated_text.or(o.summary_text))
}

#[async_trait]
impl TextModel for HttpTextModel {
    fn name(&self) -> &str {
        &self.model
    }

    async fn infer(&self, inputs: &str, params: &InferenceParams) -> Result<String, AppError> {
        debug!(model = %self.model, chars = inputs.len(), "inference request");

        let mut req = self.client.post(&self.url).json(&InferenceRequest {
            inputs,
            parameters: params,
        });
        if let Some(token) = &self.api_token {
            req = req.bearer_auth(token);
        }

        let response = req
            .send()
            .await
            .map_err(|e| AppError::Inference(format!("Failed to call model server: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Inference(format!(
                "Model server error: {} - {}",
                status, body
            )));
        }

        let outputs: Vec<InferenceOutput> = response
            .json()
            .await
            .map_err(|e| AppError::Inference(format!("Failed to parse model output: {e}")))?;

        first_text(outputs)
            .ok_or_else(|| AppError::Inference("Model returned no text".into()))
    }
}
