//! Portfolio analysis: composes extraction, assessment, scoring and recommendations.
//!
//! Flow: combined text → extract_entities → assess_proficiency → analyze_sentiment →
//!       recommend → assemble result with timestamp and metrics.
//!
//! Holds no per-request state; one `PortfolioAnalyzer` serves every request.

use chrono::Utc;
use tracing::info;

use crate::analysis::entities::extract_entities;
use crate::analysis::models::{AnalysisMetrics, AnalysisRequest, AnalysisResult, NlpAnalysis};
use crate::analysis::proficiency::assess_proficiency;
use crate::analysis::recommendations::RecommendationEngine;
use crate::analysis::sentiment::analyze_sentiment;

/// Identifies the analysis method in every result.
pub const NLP_MODEL: &str = "keyword-nlp-rust";

#[derive(Clone)]
pub struct PortfolioAnalyzer {
    recommender: RecommendationEngine,
}

impl PortfolioAnalyzer {
    pub fn new(recommender: RecommendationEngine) -> Self {
        Self { recommender }
    }

    /// Runs the full pipeline. Infallible: recommendation failures degrade to the fallback set.
    pub async fn analyze(&self, request: &AnalysisRequest) -> AnalysisResult {
        let text = request.combined_text();

        let entities = extract_entities(&text);
        let proficiency_levels = assess_proficiency(&text);
        let sentiment = analyze_sentiment(&text);

        let recommendations = self
            .recommender
            .recommend(
                &request.skills,
                &request.interests,
                &proficiency_levels,
                &sentiment,
            )
            .await;

        let metrics = AnalysisMetrics {
            total_entities: entities.total(),
            proficiency_coverage: proficiency_levels.len(),
            sentiment_score: sentiment.score,
            recommendation_count: recommendations.len(),
        };

        info!(
            "Analyzed portfolio {:?}: {} entities, {} proficiencies, sentiment={}, {} recommendations",
            request.portfolio_id,
            metrics.total_entities,
            metrics.proficiency_coverage,
            sentiment.label.as_str(),
            metrics.recommendation_count
        );

        AnalysisResult {
            success: true,
            user_id: request.user_id.clone(),
            portfolio_id: request.portfolio_id.clone(),
            nlp_analysis: NlpAnalysis {
                entities,
                sentiment,
                proficiency_levels,
                analyzed_at: Utc::now(),
                nlp_model: NLP_MODEL,
            },
            recommendations,
            metrics,
        }
    }
}
