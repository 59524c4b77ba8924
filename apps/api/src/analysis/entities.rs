//! Entity extraction: case-insensitive substring scan of the vocabulary tables.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::analysis::vocabulary::Category;

/// Terms found per category. Always holds every category, possibly with an empty list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EntityMap(BTreeMap<Category, Vec<&'static str>>);

impl EntityMap {
    /// Sum of list lengths across categories.
    pub fn total(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
impl EntityMap {
    pub fn get(&self, category: Category) -> &[&'static str] {
        self.0.get(&category).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn categories(&self) -> impl Iterator<Item = &Category> {
        self.0.keys()
    }
}

/// Scans `text` for every vocabulary term, grouped by category in table order.
pub fn extract_entities(text: &str) -> EntityMap {
    let text_lower = text.to_lowercase();

    let map = Category::ALL
        .into_iter()
        .map(|category| {
            let found = category
                .terms()
                .iter()
                .copied()
                .filter(|term| text_lower.contains(&term.to_lowercase()))
                .collect();
            (category, found)
        })
        .collect();

    EntityMap(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_term_found_regardless_of_case() {
        let entities = extract_entities("built with rEaCt and DOCKER");
        assert_eq!(entities.get(Category::Framework), &["React"]);
        assert_eq!(entities.get(Category::Tool), &["Docker"]);
    }

    #[test]
    fn test_empty_text_keeps_every_category() {
        let entities = extract_entities("");
        assert_eq!(entities.categories().count(), Category::ALL.len());
        assert_eq!(entities.total(), 0);
    }

    #[test]
    fn test_substring_matches_are_not_word_bounded() {
        // "JavaScript" contains "Java"; "GitHub" contains "Git".
        let entities = extract_entities("JavaScript on GitHub");
        assert_eq!(entities.get(Category::Language), &["JavaScript", "Java"]);
        assert_eq!(entities.get(Category::Tool), &["Git", "GitHub"]);
    }

    #[test]
    fn test_results_follow_table_order_not_text_order() {
        let entities = extract_entities("Flask first, then Django, then React");
        assert_eq!(
            entities.get(Category::Framework),
            &["React", "Django", "Flask"]
        );
    }

    #[test]
    fn test_serializes_as_category_keyed_object() {
        let value = serde_json::to_value(extract_entities("Redis")).unwrap();
        assert_eq!(value["DATABASE"], serde_json::json!(["Redis"]));
        assert_eq!(value["PLATFORM"], serde_json::json!([]));
        assert_eq!(value.as_object().unwrap().len(), 5);
    }
}
