use std::sync::Arc;

use tracing::{error, info};

use crate::{
    config::InferenceConfig,
    error::AppError,
    inference::{client::HttpTextModel, model::TextModel},
};

/// A model loaded once at startup, or the reason it could not be.
#[derive(Clone)]
pub enum ModelSlot {
    Ready(Arc<dyn TextModel>),
    Unavailable { reason: String },
}

impl ModelSlot {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }

    pub fn get(&self) -> Result<&dyn TextModel, AppError> {
        match self {
            ModelSlot::Ready(model) => Ok(model.as_ref()),
            ModelSlot::Unavailable { .. } => Err(AppError::ModelUnavailable),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, ModelSlot::Ready(_))
    }

    pub fn status(&self) -> &'static str {
        if self.is_ready() {
            "loaded"
        } else {
            "unavailable"
        }
    }

    /// Never fails: any error degrades the slot instead.
    pub async fn load(cfg: &InferenceConfig, model: &str) -> Self {
        let Some(base_url) = cfg.base_url.as_deref() else {
            info!(%model, "INFERENCE_URL not set; model disabled");
            return Self::unavailable("INFERENCE_URL not set");
        };

        let client = match HttpTextModel::new(cfg, base_url, model) {
            Ok(c) => c,
            Err(e) => {
                error!(error = %e, %model, "error loading model");
                return Self::unavailable(e.to_string());
            }
        };

        match client.check_ready().await {
            Ok(()) => {
                info!(%model, "model loaded");
                Self::Ready(Arc::new(client))
            }
            Err(e) => {
                let reason = format!("{e:#}");
                error!(error = %reason, %model, "error loading model");
                Self::unavailable(reason)
            }
        }
    }
}

impl std::fmt::Debug for ModelSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelSlot::Ready(m) => f.debug_tuple("Ready").field(&m.name()).finish(),
            ModelSlot::Unavailable { reason } => f
                .debug_struct("Unavailable")
                .field("reason", reason)
                .finish(),
        }
    }
}
