use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Username already exists")]
    Conflict,

    /// Unknown user and wrong password share this variant and its message.
    #[error("Invalid credentials")]
    Authentication,

    #[error("User not found")]
    NotFound,

    #[error("No tutor assigned yet")]
    NotAssigned,

    #[error("{0}")]
    Validation(String),

    /// Request body missing, malformed or of the wrong shape.
    #[error("{message}")]
    InvalidBody { status: StatusCode, message: String },

    #[error("Model not loaded")]
    ModelUnavailable,

    #[error("{0}")]
    Inference(String),

    #[error("store error: {0}")]
    Store(#[from] sqlx::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
    detail: String,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Conflict | AppError::NotAssigned | AppError::Validation(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::InvalidBody { status, .. } => *status,
            AppError::Authentication => StatusCode::UNAUTHORIZED,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::ModelUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Inference(_) | AppError::Store(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Conflict => "Conflict",
            AppError::Authentication => "Authentication",
            AppError::NotFound => "NotFound",
            AppError::NotAssigned => "NotAssigned",
            AppError::Validation(_) => "Validation",
            AppError::InvalidBody { .. } => "InvalidBody",
            AppError::ModelUnavailable => "ModelUnavailable",
            AppError::Inference(_) => "Inference",
            AppError::Store(_) | AppError::Internal(_) => "Internal",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = match &self {
            AppError::Store(e) => {
                error!(error = %e, "store failure");
                "Internal server error".to_string()
            }
            AppError::Internal(msg) => {
                error!(error = %msg, "internal failure");
                "Internal server error".to_string()
            }
            AppError::Inference(msg) => {
                error!(error = %msg, "inference failure");
                msg.clone()
            }
            other => {
                warn!(kind = other.kind(), %status, "request rejected");
                other.to_string()
            }
        };

        let body = Json(ErrorBody {
            error: self.kind(),
            detail,
        });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_the_taxonomy() {
        assert_eq!(AppError::Conflict.status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::Authentication.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::NotAssigned.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::ModelUnavailable.status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            AppError::Inference("boom".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::Store(sqlx::Error::PoolTimedOut).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn store_errors_do_not_leak_details() {
        let res = AppError::Store(sqlx::Error::PoolTimedOut).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "Internal");
        assert_eq!(body["detail"], "Internal server error");
    }
}
