use async_trait::async_trait;
use serde::Serialize;

use crate::error::AppError;

/// Decoding parameters forwarded to the model server.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InferenceParams {
    pub max_length: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub do_sample: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_return_sequences: Option<u32>,
}

/// A loaded text-to-text model: generation or summarization.
#[async_trait]
pub trait TextModel: Send + Sync {
    fn name(&self) -> &str;

    async fn infer(&self, inputs: &str, params: &InferenceParams) -> Result<String, AppError>;
}
