//! Proficiency assessment: keyword-driven labels for every recognized technology.
//!
//! Keyword detection is global: a trigger phrase anywhere in the text applies to
//! every recognized term, not only the term it sits next to.

use std::collections::BTreeMap;

use crate::analysis::vocabulary::{all_terms, ProficiencyLevel};

/// Mentions required before a term is forced to Expert.
const EXPERT_MENTION_THRESHOLD: usize = 3;

pub type ProficiencyMap = BTreeMap<&'static str, ProficiencyLevel>;

/// Assigns one proficiency label to each vocabulary term present in `text`.
pub fn assess_proficiency(text: &str) -> ProficiencyMap {
    let text_lower = text.to_lowercase();

    let keyword_level = ProficiencyLevel::PRIORITY
        .into_iter()
        .find(|level| has_any_keyword(&text_lower, *level))
        .unwrap_or(ProficiencyLevel::Intermediate);
    let expert_indicated = has_any_keyword(&text_lower, ProficiencyLevel::Expert);

    all_terms()
        .filter_map(|term| {
            let term_lower = term.to_lowercase();
            if !text_lower.contains(&term_lower) {
                return None;
            }

            let mentions = text_lower.matches(term_lower.as_str()).count();
            let level = if mentions >= EXPERT_MENTION_THRESHOLD && expert_indicated {
                ProficiencyLevel::Expert
            } else {
                keyword_level
            };

            Some((term, level))
        })
        .collect()
}

fn has_any_keyword(text_lower: &str, level: ProficiencyLevel) -> bool {
    level.keywords().iter().any(|kw| text_lower.contains(kw))
}
