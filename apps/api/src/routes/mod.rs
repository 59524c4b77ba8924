pub mod health;

use axum::{
    http::{
        header::{
            ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
            ACCESS_CONTROL_ALLOW_ORIGIN,
        },
        HeaderValue,
    },
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::analysis::handlers;
use crate::state::AppState;

/// OPTIONS pre-flight: answered directly, never reaches analysis.
async fn preflight() -> impl IntoResponse {
    (
        [
            (
                ACCESS_CONTROL_ALLOW_HEADERS,
                "authorization, x-client-info, apikey, content-type",
            ),
            (ACCESS_CONTROL_ALLOW_METHODS, "POST, OPTIONS"),
        ],
        "ok",
    )
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/portfolio/analyze",
            post(handlers::handle_analyze).options(preflight),
        )
        .route(
            "/api/v1/skills/sentiment",
            post(handlers::handle_skill_sentiment).options(preflight),
        )
        .route(
            "/api/v1/portfolio/quality",
            post(handlers::handle_portfolio_quality).options(preflight),
        )
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use axum::{
        body::Body,
        http::{Method, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::analysis::analyzer::PortfolioAnalyzer;
    use crate::analysis::recommendations::RecommendationEngine;
    use crate::llm_client::{GenerationError, TextGenerator};

    struct Offline;

    #[async_trait::async_trait]
    impl TextGenerator for Offline {
        fn model_label(&self) -> &str {
            "offline"
        }

        async fn generate(&self, _prompt: &str) -> Result<String, GenerationError> {
            Err(GenerationError::MissingCredential("HF_TOKEN".to_string()))
        }
    }

    fn app() -> Router {
        let recommender = RecommendationEngine::new(Arc::new(Offline), Duration::from_secs(1));
        build_router(AppState {
            analyzer: PortfolioAnalyzer::new(recommender),
        })
    }

    async fn send(method: Method, uri: &str, body: impl Into<Body>) -> Response {
        app()
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(body.into())
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    async fn body_bytes(response: Response) -> Vec<u8> {
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec()
    }

    async fn body_json(response: Response) -> Value {
        serde_json::from_slice(&body_bytes(response).await).unwrap()
    }

    fn allow_origin(response: &Response) -> Option<&str> {
        response
            .headers()
            .get(ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok())
    }

    #[tokio::test]
    async fn test_preflight_answers_ok_with_wildcard_origin() {
        let response = send(Method::OPTIONS, "/api/v1/portfolio/analyze", Body::empty()).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(allow_origin(&response), Some("*"));
        assert_eq!(body_bytes(response).await, b"ok");
    }

    #[tokio::test]
    async fn test_analyze_success_shape() {
        let body = json!({
            "user_id": "u-1",
            "portfolio_id": "p-1",
            "title": "Led the architecture",
            "description": "We pioneered React and Docker, built with React three times",
            "skills": ["Python"],
            "interests": ["Fintech"]
        });
        let response = send(
            Method::POST,
            "/api/v1/portfolio/analyze",
            body.to_string(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(allow_origin(&response), Some("*"));

        let value = body_json(response).await;
        assert_eq!(value["success"], true);
        assert_eq!(value["user_id"], "u-1");
        assert_eq!(value["portfolio_id"], "p-1");
        assert_eq!(value["nlp_analysis"]["entities"]["FRAMEWORK"], json!(["React"]));
        assert_eq!(value["nlp_analysis"]["entities"]["TOOL"], json!(["Docker"]));
        assert_eq!(value["nlp_analysis"]["proficiency_levels"]["React"], "Expert");
        assert_eq!(value["nlp_analysis"]["proficiency_levels"]["Docker"], "Expert");
        assert_eq!(value["recommendations"].as_array().unwrap().len(), 3);
        assert_eq!(
            value["recommendations"][2]["content"]["title"],
            "Build a Fintech Project"
        );
        assert_eq!(value["metrics"]["recommendation_count"], 3);
    }

    #[tokio::test]
    async fn test_numeric_identifiers_are_echoed() {
        let body = json!({ "user_id": 42, "portfolio_id": 7, "title": "Rust" });
        let response = send(Method::POST, "/api/v1/portfolio/analyze", body.to_string()).await;
        assert_eq!(response.status(), StatusCode::OK);

        let value = body_json(response).await;
        assert_eq!(value["user_id"], 42);
        assert_eq!(value["portfolio_id"], 7);
    }

    #[tokio::test]
    async fn test_empty_object_body_succeeds() {
        let response = send(Method::POST, "/api/v1/portfolio/analyze", "{}").await;
        assert_eq!(response.status(), StatusCode::OK);
        let value = body_json(response).await;
        assert_eq!(value["metrics"]["total_entities"], 0);
        assert_eq!(value["nlp_analysis"]["sentiment"]["label"], "neutral");
    }

    #[tokio::test]
    async fn test_malformed_body_is_500_with_error_shape() {
        let response = send(Method::POST, "/api/v1/portfolio/analyze", "{not json").await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(allow_origin(&response), Some("*"));

        let value = body_json(response).await;
        assert_eq!(value["error"], "Failed to analyze portfolio");
        assert!(value["details"].as_str().is_some_and(|d| !d.is_empty()));
        assert!(value.get("success").is_none());
    }

    #[tokio::test]
    async fn test_wrong_field_type_is_500() {
        let response = send(
            Method::POST,
            "/api/v1/portfolio/analyze",
            r#"{"skills": 42}"#,
        )
        .await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_skill_sentiment_success() {
        let body = json!({
            "portfolioDescription": "Built a robust Rust service",
            "extractedSkills": ["Rust", "Elixir"]
        });
        let response = send(Method::POST, "/api/v1/skills/sentiment", body.to_string()).await;
        assert_eq!(response.status(), StatusCode::OK);

        let value = body_json(response).await;
        assert_eq!(value["success"], true);
        assert_eq!(value["skillAnalysis"].as_array().unwrap().len(), 1);
        assert_eq!(value["skillAnalysis"][0]["sentiment"], "positive");
        assert_eq!(value["metrics"]["totalSkillsAnalyzed"], 2);
    }

    #[tokio::test]
    async fn test_skill_sentiment_missing_fields_is_400() {
        let body = json!({ "portfolioDescription": "Rust", "extractedSkills": [] });
        let response = send(Method::POST, "/api/v1/skills/sentiment", body.to_string()).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(allow_origin(&response), Some("*"));
        let value = body_json(response).await;
        assert_eq!(value["error"], "Missing portfolioDescription or extractedSkills");
    }

    #[tokio::test]
    async fn test_skill_sentiment_without_description_is_400() {
        for body in [
            json!({ "extractedSkills": ["Rust"] }),
            json!({ "portfolioDescription": "", "extractedSkills": ["Rust"] }),
        ] {
            let response = send(Method::POST, "/api/v1/skills/sentiment", body.to_string()).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            let value = body_json(response).await;
            assert_eq!(value["error"], "Missing portfolioDescription or extractedSkills");
        }
    }

    #[tokio::test]
    async fn test_skill_sentiment_malformed_body_is_500() {
        let response = send(Method::POST, "/api/v1/skills/sentiment", "[").await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let value = body_json(response).await;
        assert_eq!(value["error"], "Failed to analyze skill sentiment");
    }

    #[tokio::test]
    async fn test_portfolio_quality_success_shape() {
        let body = json!({
            "description": "Designed a distributed caching pipeline. Reduced latency with a 40% reduction.",
            "skills": ["Rust", "Redis"],
            "projects": [{ "title": "Ingest", "description": "Automated deployment" }]
        });
        let response = send(Method::POST, "/api/v1/portfolio/quality", body.to_string()).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(allow_origin(&response), Some("*"));

        let value = body_json(response).await;
        assert_eq!(value["success"], true);
        assert_eq!(value["qualityScores"]["clarity"], 0.3);
        assert!(value["qualityScores"]["technicalDepth"].is_number());
        assert!(value["rating"].is_string());
        assert!(!value["recommendations"].as_array().unwrap().is_empty());
        assert!(value["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_portfolio_quality_preflight() {
        let response = send(Method::OPTIONS, "/api/v1/portfolio/quality", Body::empty()).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_bytes(response).await, b"ok");
    }

    #[tokio::test]
    async fn test_portfolio_quality_without_description_is_400() {
        for body in [json!({ "skills": ["Rust"] }), json!({ "description": "" })] {
            let response = send(Method::POST, "/api/v1/portfolio/quality", body.to_string()).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            let value = body_json(response).await;
            assert_eq!(value["error"], "Missing portfolio description");
        }
    }

    #[tokio::test]
    async fn test_portfolio_quality_malformed_body_is_500() {
        let response = send(Method::POST, "/api/v1/portfolio/quality", "{").await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let value = body_json(response).await;
        assert_eq!(value["error"], "Failed to analyze portfolio sentiment");
    }

    #[tokio::test]
    async fn test_health_carries_wildcard_origin() {
        let response = send(Method::GET, "/health", Body::empty()).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(allow_origin(&response), Some("*"));
        assert_eq!(body_json(response).await["status"], "ok");
    }
}
