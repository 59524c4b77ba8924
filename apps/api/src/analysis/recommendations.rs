//! Recommendation generation: remote model first, deterministic rules on any failure.
//!
//! The remote path yields at most 3 entries tagged with the model label. Every
//! failure (no credential, transport, timeout, unparseable reply) is logged and
//! replaced by the rules-based set. Nothing here returns an error to the caller.

use std::sync::Arc;
use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::analysis::models::{Recommendation, RecommendationContent, SuggestionType};
use crate::analysis::prompts::{
    NO_INTERESTS_PLACEHOLDER, NO_PROFICIENCIES_PLACEHOLDER, NO_SKILLS_PLACEHOLDER,
    RECOMMENDATION_PROMPT_TEMPLATE,
};
use crate::analysis::proficiency::ProficiencyMap;
use crate::analysis::sentiment::SentimentResult;
use crate::llm_client::{GenerationError, TextGenerator};

pub const MAX_RECOMMENDATIONS: usize = 3;
pub const FALLBACK_MODEL_LABEL: &str = "Fallback (rules-based)";
const REMOTE_CONFIDENCE: f64 = 0.85;
const SKILL_GAP_CONFIDENCE: f64 = 0.85;
const PROJECT_CONFIDENCE: f64 = 0.80;
const COURSE_CONFIDENCE: f64 = 0.75;
const MAX_SKILL_GAPS: usize = 2;

/// Candidate skills for gap recommendations, in priority order.
const CANDIDATE_SKILLS: &[&str] = &[
    "TypeScript",
    "Docker",
    "Kubernetes",
    "AWS",
    "GraphQL",
    "Machine Learning",
    "React",
    "Next.js",
    "Node.js",
    "Python",
];

const PROJECT_RESOURCES: &[&str] = &[
    "GitHub tutorials",
    "Official documentation",
    "Community forums",
];

/// First `[ { ... } ]` run in free text; lazy so it stops at the first closing `}]`.
static JSON_ARRAY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[\s*\{[\s\S]*?\}\s*\]").expect("JSON array pattern is valid"));

/// One element of the model's JSON reply. Missing fields fall back to placeholders.
#[derive(Debug, Deserialize)]
struct RemoteSuggestion {
    #[serde(rename = "type", default)]
    suggestion_type: Option<SuggestionType>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    reason: Option<String>,
}

impl RemoteSuggestion {
    fn into_recommendation(self, model_label: &str) -> Recommendation {
        Recommendation {
            suggestion_type: self.suggestion_type.unwrap_or(SuggestionType::Skill),
            content: RecommendationContent {
                title: self.title.unwrap_or_else(|| "Recommendation".to_string()),
                description: self
                    .description
                    .unwrap_or_else(|| "No description".to_string()),
                reason: self
                    .reason
                    .unwrap_or_else(|| "Recommended for your growth".to_string()),
                difficulty: None,
                estimated_time: None,
                resources: None,
            },
            confidence: REMOTE_CONFIDENCE,
            ai_model: Some(model_label.to_string()),
        }
    }
}

/// Why the remote path was abandoned.
#[derive(Debug, Error)]
enum RemoteFailure {
    #[error(transparent)]
    Generation(GenerationError),

    #[error("reply contained no JSON array")]
    NoJsonArray,

    #[error("reply JSON was malformed: {0}")]
    Malformed(serde_json::Error),
}

/// Produces up to three recommendations for a portfolio.
///
/// Holds the remote generator behind `Arc<dyn TextGenerator>` so tests can swap it.
#[derive(Clone)]
pub struct RecommendationEngine {
    generator: Arc<dyn TextGenerator>,
    timeout: Duration,
}

impl RecommendationEngine {
    pub fn new(generator: Arc<dyn TextGenerator>, timeout: Duration) -> Self {
        Self { generator, timeout }
    }

    pub async fn recommend(
        &self,
        skills: &[String],
        interests: &[String],
        proficiencies: &ProficiencyMap,
        sentiment: &SentimentResult,
    ) -> Vec<Recommendation> {
        let prompt = build_prompt(skills, interests, proficiencies, sentiment);

        match self.try_remote(&prompt).await {
            Ok(recommendations) => {
                info!(
                    "Generated {} recommendations via {}",
                    recommendations.len(),
                    self.generator.model_label()
                );
                recommendations
            }
            Err(RemoteFailure::Generation(GenerationError::MissingCredential(var))) => {
                info!("No inference credential in '{var}', using rules-based recommendations");
                fallback_recommendations(skills, interests)
            }
            Err(failure) => {
                warn!("Remote recommendations failed, using rules-based fallback: {failure}");
                fallback_recommendations(skills, interests)
            }
        }
    }

    async fn try_remote(&self, prompt: &str) -> Result<Vec<Recommendation>, RemoteFailure> {
        let reply = tokio::time::timeout(self.timeout, self.generator.generate(prompt))
            .await
            .map_err(|_| RemoteFailure::Generation(GenerationError::Timeout(self.timeout)))?
            .map_err(RemoteFailure::Generation)?;

        parse_remote_reply(&reply, self.generator.model_label())
    }
}

fn build_prompt(
    skills: &[String],
    interests: &[String],
    proficiencies: &ProficiencyMap,
    sentiment: &SentimentResult,
) -> String {
    let skills = join_or(skills.iter().map(String::as_str), NO_SKILLS_PLACEHOLDER);
    let interests = join_or(interests.iter().map(String::as_str), NO_INTERESTS_PLACEHOLDER);
    let assessed: Vec<String> = proficiencies
        .iter()
        .map(|(term, level)| format!("{term} ({level:?})"))
        .collect();
    let proficiencies = join_or(
        assessed.iter().map(String::as_str),
        NO_PROFICIENCIES_PLACEHOLDER,
    );

    fill_template(
        RECOMMENDATION_PROMPT_TEMPLATE,
        &[
            ("skills", skills.as_str()),
            ("interests", interests.as_str()),
            ("proficiencies", proficiencies.as_str()),
            ("sentiment", sentiment.label.as_str()),
        ],
    )
}

/// Single left-to-right pass: inserted values are never rescanned for placeholders.
/// Braces that do not enclose a known key are copied through.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let known = after.find('}').and_then(|close| {
            values
                .iter()
                .find(|(key, _)| *key == &after[..close])
                .map(|(_, value)| (close, *value))
        });

        match known {
            Some((close, value)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

fn join_or<'a>(items: impl Iterator<Item = &'a str>, placeholder: &str) -> String {
    let joined = items.collect::<Vec<_>>().join(", ");
    if joined.is_empty() {
        placeholder.to_string()
    } else {
        joined
    }
}

fn parse_remote_reply(
    reply: &str,
    model_label: &str,
) -> Result<Vec<Recommendation>, RemoteFailure> {
    let array = JSON_ARRAY
        .find(reply)
        .ok_or(RemoteFailure::NoJsonArray)?
        .as_str();

    let suggestions: Vec<RemoteSuggestion> =
        serde_json::from_str(array).map_err(RemoteFailure::Malformed)?;

    Ok(suggestions
        .into_iter()
        .take(MAX_RECOMMENDATIONS)
        .map(|s| s.into_recommendation(model_label))
        .collect())
}

/// Deterministic, network-free recommendations: skill gaps, then one interest
/// project, then a fixed course, truncated to three.
pub fn fallback_recommendations(skills: &[String], interests: &[String]) -> Vec<Recommendation> {
    let mut recommendations: Vec<Recommendation> = CANDIDATE_SKILLS
        .iter()
        .filter(|candidate| !skills.iter().any(|s| s == *candidate))
        .take(MAX_SKILL_GAPS)
        .map(|skill| Recommendation {
            suggestion_type: SuggestionType::Skill,
            content: RecommendationContent {
                title: format!("Master {skill}"),
                description: format!("Enhance your portfolio by learning {skill}"),
                reason: "Complements your current tech stack".to_string(),
                difficulty: Some("intermediate".to_string()),
                estimated_time: Some("4-6 weeks".to_string()),
                resources: None,
            },
            confidence: SKILL_GAP_CONFIDENCE,
            ai_model: Some(FALLBACK_MODEL_LABEL.to_string()),
        })
        .collect();

    if let Some(interest) = interests.first() {
        recommendations.push(Recommendation {
            suggestion_type: SuggestionType::Project,
            content: RecommendationContent {
                title: format!("Build a {interest} Project"),
                description: format!("Create a real-world application focused on {interest}"),
                reason: "Aligns with your stated interests".to_string(),
                difficulty: Some("advanced".to_string()),
                estimated_time: Some("8-12 weeks".to_string()),
                resources: Some(PROJECT_RESOURCES.iter().map(|r| r.to_string()).collect()),
            },
            confidence: PROJECT_CONFIDENCE,
            ai_model: None,
        });
    }

    recommendations.push(Recommendation {
        suggestion_type: SuggestionType::Course,
        content: RecommendationContent {
            title: "Advanced Web Development".to_string(),
            description: "Master modern web development with latest frameworks and tools"
                .to_string(),
            reason: "Essential for career growth".to_string(),
            difficulty: Some("intermediate".to_string()),
            estimated_time: Some("6-8 weeks".to_string()),
            resources: None,
        },
        confidence: COURSE_CONFIDENCE,
        ai_model: None,
    });

    recommendations.truncate(MAX_RECOMMENDATIONS);
    recommendations
}
