//! Portfolio quality: clarity, achievement, professionalism and technical depth.
//!
//! Each sub-score is in [0, 1]. `overall` is their weighted sum; every reported
//! score is rounded to two decimals and tips/rating read the rounded values.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

const CLARITY_WEIGHT: f64 = 0.2;
const ACHIEVEMENT_WEIGHT: f64 = 0.3;
const PROFESSIONALISM_WEIGHT: f64 = 0.25;
const TECHNICAL_DEPTH_WEIGHT: f64 = 0.25;

/// Target words per sentence for clarity.
const IDEAL_SENTENCE_WORDS: f64 = 20.0;

const ACHIEVEMENT_KEYWORDS: &[&str] = &[
    "improved", "optimized", "accelerated", "reduced", "increased", "led", "managed",
    "directed", "designed", "architected", "developed", "delivered", "achieved",
    "accomplished", "innovative", "pioneering", "solved", "transformed", "automated",
    "scaled", "enhanced",
];

/// Matched as word prefixes: "collaborat" covers collaborated, collaboration, ...
const PROFESSIONAL_PREFIXES: &[&str] = &[
    "developed",
    "implemented",
    "designed",
    "optimized",
    "deployed",
    "collaborat",
    "stakeholder",
    "requirement",
    "infrastructure",
    "architecture",
];

const UNPROFESSIONAL_PREFIXES: &[&str] = &[
    "lol",
    "haha",
    "awesome dude",
    "cool stuff",
    "just playing",
    "lazy",
];

const TECHNICAL_TERMS: &[&str] = &[
    "algorithm", "complexity", "optimization", "caching", "indexing", "asynchronous",
    "middleware", "deployment", "pipeline", "infrastructure", "scalability", "concurrency",
    "distributed", "microservice", "containerization", "ci/cd", "database", "api",
    "protocol", "encryption", "authentication",
];

static ACHIEVEMENT_RE: Lazy<Regex> = Lazy::new(|| word_alternation(ACHIEVEMENT_KEYWORDS, true));
static PROFESSIONAL_RE: Lazy<Regex> =
    Lazy::new(|| word_alternation(PROFESSIONAL_PREFIXES, false));
static UNPROFESSIONAL_RE: Lazy<Regex> =
    Lazy::new(|| word_alternation(UNPROFESSIONAL_PREFIXES, false));
static TECHNICAL_RE: Lazy<Regex> = Lazy::new(|| word_alternation(TECHNICAL_TERMS, true));

/// Quantified impact: "30% improvement", "3x faster", "saved $200", "impacted 40 users".
static IMPACT_METRIC_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\d+%\s*(?:improvement|increase|decrease|reduction)|\d+x\s*(?:faster|slower|larger|smaller)|saved\s*\$?\d+|impacted\s*\d+\s*(?:users|customers|team members)",
    )
    .expect("impact metric pattern is valid")
});

static SENTENCE_SPLIT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]+").expect("sentence split pattern is valid"));

fn word_alternation(words: &[&str], whole_word: bool) -> Regex {
    let escaped: Vec<String> = words.iter().map(|w| regex::escape(w)).collect();
    let tail = if whole_word { r"\b" } else { "" };
    Regex::new(&format!(r"(?i)\b(?:{}){tail}", escaped.join("|")))
        .expect("keyword lists are escaped literals")
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectSummary {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct QualityRequest {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub projects: Option<Vec<ProjectSummary>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityScores {
    pub overall: f64,
    pub clarity: f64,
    pub achievement: f64,
    pub professionalism: f64,
    pub technical_depth: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum QualityRating {
    Excellent,
    Good,
    Fair,
    #[serde(rename = "Needs Improvement")]
    NeedsImprovement,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityReport {
    pub success: bool,
    pub quality_scores: QualityScores,
    pub recommendations: Vec<String>,
    pub rating: QualityRating,
    pub timestamp: DateTime<Utc>,
}

/// Scores a portfolio description plus its optional project list.
pub fn analyze_quality(description: &str, request: &QualityRequest) -> QualityReport {
    let projects_text = request
        .projects
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(|p| format!("{} {}", p.title, p.description))
        .collect::<Vec<_>>()
        .join(" ");
    let full_text = format!("{description} {projects_text}");

    let clarity = clarity_score(description);
    let achievement = achievement_score(&full_text);
    let professionalism = professionalism_score(&full_text);
    let technical_depth = technical_depth_score(&full_text, &request.skills);

    let overall = clarity * CLARITY_WEIGHT
        + achievement * ACHIEVEMENT_WEIGHT
        + professionalism * PROFESSIONALISM_WEIGHT
        + technical_depth * TECHNICAL_DEPTH_WEIGHT;

    let quality_scores = QualityScores {
        overall: round2(overall),
        clarity: round2(clarity),
        achievement: round2(achievement),
        professionalism: round2(professionalism),
        technical_depth: round2(technical_depth),
    };

    QualityReport {
        success: true,
        recommendations: improvement_tips(&quality_scores),
        rating: rating_for(quality_scores.overall),
        quality_scores,
        timestamp: Utc::now(),
    }
}

/// Needs more than three sentences; then penalizes distance from ~20 words each.
fn clarity_score(description: &str) -> f64 {
    let sentences: Vec<&str> = SENTENCE_SPLIT_RE
        .split(description)
        .filter(|s| !s.trim().is_empty())
        .collect();

    if sentences.len() <= 3 {
        return 0.3;
    }

    // Space-split, untrimmed: a leading space counts as an empty word.
    let words: usize = sentences.iter().map(|s| s.split(' ').count()).sum();
    let average = words as f64 / sentences.len() as f64;

    (1.0 - (average - IDEAL_SENTENCE_WORDS).abs() / 30.0).clamp(0.0, 1.0)
}

fn achievement_score(text: &str) -> f64 {
    let keywords = ACHIEVEMENT_RE.find_iter(text).count();
    let metrics = IMPACT_METRIC_RE.find_iter(text).count();

    let base = (keywords as f64 / 10.0).min(1.0);
    let bonus = (metrics as f64 * 0.05).min(0.2);
    (base + bonus).min(1.0)
}

fn professionalism_score(text: &str) -> f64 {
    let professional = PROFESSIONAL_RE.find_iter(text).count();
    let unprofessional = UNPROFESSIONAL_RE.find_iter(text).count();

    let base = (professional as f64 / 8.0).min(1.0);
    let penalty = 0.3 * unprofessional as f64;
    (base - penalty).clamp(0.0, 1.0)
}

fn technical_depth_score(text: &str, skills: &[String]) -> f64 {
    let terms = TECHNICAL_RE.find_iter(text).count();
    let term_score = (terms as f64 / 10.0).min(1.0);
    let skill_bonus = (skills.len() as f64 / 15.0).min(1.0);
    term_score * 0.7 + skill_bonus * 0.3
}

fn improvement_tips(scores: &QualityScores) -> Vec<String> {
    let mut tips = Vec::new();

    if scores.clarity < 0.6 {
        tips.push("Consider breaking down lengthy paragraphs into shorter, clearer sentences (15-25 words each)");
    }
    if scores.achievement < 0.5 {
        tips.push("Add more quantifiable achievements and impact metrics (e.g., '30% performance improvement')");
    }
    if scores.professionalism < 0.6 {
        tips.push("Use more formal, professional language suitable for technical audiences");
    }
    if scores.technical_depth < 0.5 {
        tips.push("Include more technical terminology and architectural decisions in your description");
    }
    if tips.is_empty() {
        tips.push("Excellent portfolio! Continue showcasing your achievements with metrics and technical depth.");
    }

    tips.into_iter().map(str::to_string).collect()
}

fn rating_for(overall: f64) -> QualityRating {
    if overall >= 0.8 {
        QualityRating::Excellent
    } else if overall >= 0.6 {
        QualityRating::Good
    } else if overall >= 0.4 {
        QualityRating::Fair
    } else {
        QualityRating::NeedsImprovement
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
