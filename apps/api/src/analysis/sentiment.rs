//! Sentiment scoring by presence of fixed positive/negative words.

use serde::Serialize;

use crate::analysis::vocabulary::{NEGATIVE_WORDS, POSITIVE_WORDS};

/// Scores above this are positive; below its negation, negative.
const LABEL_THRESHOLD: f64 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Negative => "negative",
            SentimentLabel::Neutral => "neutral",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentResult {
    /// Always within [-1, 1].
    pub score: f64,
    pub label: SentimentLabel,
    pub positive_count: usize,
    pub negative_count: usize,
}

/// Counts each listed word at most once, regardless of repetition.
pub fn analyze_sentiment(text: &str) -> SentimentResult {
    let text_lower = text.to_lowercase();
    let positive_count = count_present(&text_lower, POSITIVE_WORDS);
    let negative_count = count_present(&text_lower, NEGATIVE_WORDS);

    let total = positive_count + negative_count;
    if total == 0 {
        return SentimentResult {
            score: 0.0,
            label: SentimentLabel::Neutral,
            positive_count,
            negative_count,
        };
    }

    let score = ((positive_count as f64 - negative_count as f64) / total as f64).clamp(-1.0, 1.0);
    let label = if score > LABEL_THRESHOLD {
        SentimentLabel::Positive
    } else if score < -LABEL_THRESHOLD {
        SentimentLabel::Negative
    } else {
        SentimentLabel::Neutral
    };

    SentimentResult {
        score,
        label,
        positive_count,
        negative_count,
    }
}

fn count_present(text_lower: &str, words: &[&str]) -> usize {
    words.iter().filter(|w| text_lower.contains(*w)).count()
}
