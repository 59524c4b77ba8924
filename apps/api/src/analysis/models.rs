use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::analysis::entities::EntityMap;
use crate::analysis::proficiency::ProficiencyMap;
use crate::analysis::sentiment::SentimentResult;

/// Incoming analysis request. Every field is optional; absent values default to empty.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalysisRequest {
    /// Opaque: any JSON value, echoed back untouched.
    #[serde(default)]
    pub user_id: Option<Value>,
    #[serde(default)]
    pub portfolio_id: Option<Value>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub interests: Vec<String>,
}

impl AnalysisRequest {
    /// Title and description joined by a single space.
    pub fn combined_text(&self) -> String {
        format!(
            "{} {}",
            self.title.as_deref().unwrap_or_default(),
            self.description.as_deref().unwrap_or_default()
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionType {
    Skill,
    Project,
    Course,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationContent {
    pub title: String,
    pub description: String,
    pub reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resources: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub suggestion_type: SuggestionType,
    pub content: RecommendationContent,
    /// 0.0 – 1.0
    pub confidence: f64,
    /// Provenance: remote model label or the rules-based fallback marker.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_model: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NlpAnalysis {
    pub entities: EntityMap,
    pub sentiment: SentimentResult,
    pub proficiency_levels: ProficiencyMap,
    pub analyzed_at: DateTime<Utc>,
    pub nlp_model: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisMetrics {
    pub total_entities: usize,
    pub proficiency_coverage: usize,
    pub sentiment_score: f64,
    pub recommendation_count: usize,
}

/// Full response body of a successful analysis.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    pub success: bool,
    pub user_id: Option<Value>,
    pub portfolio_id: Option<Value>,
    pub nlp_analysis: NlpAnalysis,
    pub recommendations: Vec<Recommendation>,
    pub metrics: AnalysisMetrics,
}
