//! Skill sentiment: per-skill sentiment and proficiency from the text around each mention.
//!
//! Unlike the portfolio-wide passes, matching here is whole-word and local:
//! only a fixed window around a skill's first mention is scored.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::analysis::sentiment::SentimentLabel;
use crate::analysis::vocabulary::ProficiencyLevel;

/// Characters kept on each side of a skill mention.
const CONTEXT_RADIUS: usize = 250;

const POSITIVE_INDICATORS: &[&str] = &[
    "led", "developed", "built", "created", "designed", "architected", "implemented",
    "optimized", "improved", "solved", "achieved", "delivered", "innovative", "efficient",
    "robust", "scalable", "excellent", "amazing",
];

const NEGATIVE_INDICATORS: &[&str] = &[
    "struggled", "failed", "error", "bug", "issue", "problem", "slow", "outdated",
    "deprecated", "difficult", "challenging", "limited",
];

const ADVANCED_KEYWORDS: &[&str] = &[
    "architected",
    "designed",
    "optimized",
    "led",
    "innovative",
    "expert",
    "specialized",
    "mastered",
    "deep experience",
];

const INTERMEDIATE_KEYWORDS: &[&str] = &[
    "developed",
    "built",
    "implemented",
    "worked with",
    "familiar with",
    "experience",
    "proficient",
];

static POSITIVE_RE: Lazy<Regex> = Lazy::new(|| whole_word_alternation(POSITIVE_INDICATORS));
static NEGATIVE_RE: Lazy<Regex> = Lazy::new(|| whole_word_alternation(NEGATIVE_INDICATORS));

fn whole_word_alternation(words: &[&str]) -> Regex {
    Regex::new(&format!(r"(?i)\b(?:{})\b", words.join("|")))
        .expect("indicator words are plain literals")
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillSentimentRequest {
    #[serde(default)]
    pub portfolio_description: Option<String>,
    #[serde(default)]
    pub extracted_skills: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillAnalysis {
    pub skill: String,
    pub sentiment: SentimentLabel,
    pub confidence: f64,
    pub context: String,
    pub proficiency_level: ProficiencyLevel,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SentimentTally {
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillMetrics {
    pub total_skills_analyzed: usize,
    pub expert_count: usize,
    pub advanced_count: usize,
    pub average_confidence: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillSentimentReport {
    pub success: bool,
    pub skill_analysis: Vec<SkillAnalysis>,
    pub overall_sentiment: SentimentTally,
    pub metrics: SkillMetrics,
    pub timestamp: DateTime<Utc>,
}

/// Analyzes every skill that is mentioned in `text`; unmentioned skills are skipped.
pub fn analyze_skill_sentiment(
    text: &str,
    skills: &[String],
) -> Result<SkillSentimentReport, regex::Error> {
    let mut skill_analysis = Vec::new();

    for skill in skills {
        let pattern = Regex::new(&format!(r"(?i)\b{}\b", regex::escape(skill)))?;
        let Some(first) = pattern.find(text) else {
            continue;
        };

        let context = context_window(text, first.start());
        let (sentiment, confidence) = score_context(context);
        let mentions = pattern.find_iter(text).count();
        let proficiency_level = proficiency_for(sentiment, context, mentions);

        skill_analysis.push(SkillAnalysis {
            skill: skill.clone(),
            sentiment,
            confidence,
            context: context.to_string(),
            proficiency_level,
        });
    }

    let mut overall_sentiment = SentimentTally::default();
    for item in &skill_analysis {
        match item.sentiment {
            SentimentLabel::Positive => overall_sentiment.positive += 1,
            SentimentLabel::Neutral => overall_sentiment.neutral += 1,
            SentimentLabel::Negative => overall_sentiment.negative += 1,
        }
    }

    let count_level = |level: ProficiencyLevel| {
        skill_analysis
            .iter()
            .filter(|s| s.proficiency_level == level)
            .count()
    };

    let metrics = SkillMetrics {
        total_skills_analyzed: skills.len(),
        expert_count: count_level(ProficiencyLevel::Expert),
        advanced_count: count_level(ProficiencyLevel::Advanced),
        average_confidence: average_confidence(&skill_analysis),
    };

    Ok(SkillSentimentReport {
        success: true,
        skill_analysis,
        overall_sentiment,
        metrics,
        timestamp: Utc::now(),
    })
}

/// Slice of `text` from `CONTEXT_RADIUS` chars before `at` to `CONTEXT_RADIUS` chars after, trimmed.
fn context_window(text: &str, at: usize) -> &str {
    let start = text[..at]
        .char_indices()
        .rev()
        .nth(CONTEXT_RADIUS - 1)
        .map(|(i, _)| i)
        .unwrap_or(0);
    let end = text[at..]
        .char_indices()
        .nth(CONTEXT_RADIUS)
        .map(|(i, _)| at + i)
        .unwrap_or(text.len());
    text[start..end].trim()
}

fn score_context(context: &str) -> (SentimentLabel, f64) {
    let positive = POSITIVE_RE.find_iter(context).count();
    let negative = NEGATIVE_RE.find_iter(context).count();

    if positive > negative {
        (SentimentLabel::Positive, indicator_confidence(positive))
    } else if negative > positive {
        (SentimentLabel::Negative, indicator_confidence(negative))
    } else {
        (SentimentLabel::Neutral, 0.5)
    }
}

fn indicator_confidence(hits: usize) -> f64 {
    (0.6 + hits as f64 * 0.15).min(0.99)
}

fn proficiency_for(sentiment: SentimentLabel, context: &str, mentions: usize) -> ProficiencyLevel {
    let context_lower = context.to_lowercase();
    let has_advanced = ADVANCED_KEYWORDS.iter().any(|kw| context_lower.contains(kw));
    let has_intermediate = INTERMEDIATE_KEYWORDS
        .iter()
        .any(|kw| context_lower.contains(kw));
    let positive = sentiment == SentimentLabel::Positive;

    if positive && has_advanced && mentions >= 3 {
        ProficiencyLevel::Expert
    } else if positive && (has_advanced || mentions >= 2) {
        ProficiencyLevel::Advanced
    } else if has_intermediate || mentions >= 1 {
        ProficiencyLevel::Intermediate
    } else {
        ProficiencyLevel::Beginner
    }
}

/// Mean confidence rounded to two decimals; 0 when nothing was analyzed.
fn average_confidence(items: &[SkillAnalysis]) -> f64 {
    if items.is_empty() {
        return 0.0;
    }
    let mean = items.iter().map(|s| s.confidence).sum::<f64>() / items.len() as f64;
    (mean * 100.0).round() / 100.0
}
