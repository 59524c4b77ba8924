//! Axum route handlers for the Analysis API.
//!
//! Bodies arrive as raw bytes and are decoded here, so undecodable JSON lands in
//! the same `500 {error, details}` shape as every other failure.

use axum::{extract::State, Json};
use bytes::Bytes;
use serde::de::DeserializeOwned;

use crate::analysis::models::{AnalysisRequest, AnalysisResult};
use crate::analysis::quality::{analyze_quality, QualityReport, QualityRequest};
use crate::analysis::skill_sentiment::{
    analyze_skill_sentiment, SkillSentimentReport, SkillSentimentRequest,
};
use crate::errors::AppError;
use crate::state::AppState;

const ANALYZE_FAILURE: &str = "Failed to analyze portfolio";
const SKILL_SENTIMENT_FAILURE: &str = "Failed to analyze skill sentiment";
const QUALITY_FAILURE: &str = "Failed to analyze portfolio sentiment";

fn decode<T: DeserializeOwned>(body: &[u8], summary: &'static str) -> Result<T, AppError> {
    serde_json::from_slice(body).map_err(|e| AppError::failed(summary, e))
}

/// POST /api/v1/portfolio/analyze
///
/// Extracts technologies, proficiency and sentiment from title + description,
/// and attaches up to three recommendations.
pub async fn handle_analyze(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<AnalysisResult>, AppError> {
    let request: AnalysisRequest = decode(&body, ANALYZE_FAILURE)?;
    let result = state.analyzer.analyze(&request).await;
    Ok(Json(result))
}

/// POST /api/v1/skills/sentiment
///
/// Per-skill sentiment and proficiency around each declared skill's first mention.
pub async fn handle_skill_sentiment(body: Bytes) -> Result<Json<SkillSentimentReport>, AppError> {
    let request: SkillSentimentRequest = decode(&body, SKILL_SENTIMENT_FAILURE)?;

    let description = request
        .portfolio_description
        .filter(|d| !d.is_empty());
    let skills = request.extracted_skills.filter(|s| !s.is_empty());
    let (Some(description), Some(skills)) = (description, skills) else {
        return Err(AppError::Validation(
            "Missing portfolioDescription or extractedSkills".to_string(),
        ));
    };

    let report = analyze_skill_sentiment(&description, &skills)
        .map_err(|e| AppError::failed(SKILL_SENTIMENT_FAILURE, e))?;

    Ok(Json(report))
}

/// POST /api/v1/portfolio/quality
pub async fn handle_portfolio_quality(body: Bytes) -> Result<Json<QualityReport>, AppError> {
    let request: QualityRequest = decode(&body, QUALITY_FAILURE)?;

    let Some(description) = request.description.as_deref().filter(|d| !d.is_empty()) else {
        return Err(AppError::Validation(
            "Missing portfolio description".to_string(),
        ));
    };

    Ok(Json(analyze_quality(description, &request)))
}
