use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    /// Any failure while serving a request; never carries a partial result.
    #[error("{summary}: {details}")]
    Failed {
        summary: &'static str,
        details: String,
    },
}

impl AppError {
    pub fn failed(summary: &'static str, err: impl std::fmt::Display) -> Self {
        AppError::Failed {
            summary,
            details: err.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": msg }))).into_response()
            }
            AppError::Failed { summary, details } => {
                tracing::error!("{summary}: {details}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "error": summary,
                        "details": details,
                    })),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_failed_maps_to_500_with_details() {
        let response = AppError::failed("Failed to analyze portfolio", "boom").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Failed to analyze portfolio");
        assert_eq!(body["details"], "boom");
    }

    #[tokio::test]
    async fn test_validation_maps_to_400_without_details() {
        let response = AppError::Validation("missing".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "missing");
        assert!(body.get("details").is_none());
    }
}
