//! Static vocabulary tables shared by every analysis pass.
//!
//! All tables are `'static` constants: read-only, shared across concurrent
//! requests without synchronization.

use serde::Serialize;

/// Technology category. Declaration order is the scan order and the map order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Framework,
    Language,
    Database,
    Platform,
    Tool,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Framework,
        Category::Language,
        Category::Database,
        Category::Platform,
        Category::Tool,
    ];

    /// Canonical terms recognized for this category, in scan order.
    pub fn terms(self) -> &'static [&'static str] {
        match self {
            Category::Framework => &[
                "React", "Vue", "Angular", "Next.js", "Django", "Express", "Flask", "FastAPI",
            ],
            Category::Language => &[
                "Python",
                "JavaScript",
                "TypeScript",
                "Java",
                "C++",
                "Go",
                "Rust",
                "PHP",
            ],
            Category::Database => &[
                "PostgreSQL",
                "MongoDB",
                "MySQL",
                "Redis",
                "Elasticsearch",
                "Firebase",
            ],
            Category::Platform => &["AWS", "GCP", "Azure", "Vercel", "Heroku", "DigitalOcean"],
            Category::Tool => &["Docker", "Kubernetes", "Git", "Jenkins", "GitLab", "GitHub"],
        }
    }
}

/// Every vocabulary term across all categories, flattened in category order.
pub fn all_terms() -> impl Iterator<Item = &'static str> {
    Category::ALL
        .into_iter()
        .flat_map(|category| category.terms().iter().copied())
}

/// Proficiency label inferred for a recognized technology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ProficiencyLevel {
    Expert,
    Advanced,
    Intermediate,
    Beginner,
}

impl ProficiencyLevel {
    /// Keyword lookup priority: the first level with any hit wins.
    pub const PRIORITY: [ProficiencyLevel; 4] = [
        ProficiencyLevel::Expert,
        ProficiencyLevel::Advanced,
        ProficiencyLevel::Intermediate,
        ProficiencyLevel::Beginner,
    ];

    /// Lowercase trigger phrases for this level.
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            ProficiencyLevel::Expert => &[
                "architected",
                "designed",
                "led",
                "optimized",
                "pioneered",
                "expert in",
            ],
            ProficiencyLevel::Advanced => {
                &["developed", "built", "implemented", "created", "deployed"]
            }
            ProficiencyLevel::Intermediate => {
                &["worked with", "familiar with", "experienced in", "used"]
            }
            ProficiencyLevel::Beginner => &["learning", "started", "basic", "beginner"],
        }
    }
}

pub const POSITIVE_WORDS: &[&str] = &[
    "excellent",
    "amazing",
    "great",
    "awesome",
    "outstanding",
    "innovative",
    "successful",
    "efficient",
    "robust",
    "scalable",
];

pub const NEGATIVE_WORDS: &[&str] = &[
    "failed", "error", "bug", "issue", "problem", "slow", "outdated",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories_are_the_fixed_five() {
        let names: Vec<String> = Category::ALL
            .iter()
            .map(|c| serde_json::to_string(c).unwrap())
            .collect();
        assert_eq!(
            names,
            vec![
                "\"FRAMEWORK\"",
                "\"LANGUAGE\"",
                "\"DATABASE\"",
                "\"PLATFORM\"",
                "\"TOOL\""
            ]
        );
    }

    #[test]
    fn test_all_terms_preserves_category_order() {
        let terms: Vec<&str> = all_terms().collect();
        assert_eq!(terms.first(), Some(&"React"));
        assert_eq!(terms.last(), Some(&"GitHub"));
        assert_eq!(terms.len(), 34);
    }

    #[test]
    fn test_proficiency_keywords_are_lowercase() {
        for level in ProficiencyLevel::PRIORITY {
            for kw in level.keywords() {
                assert_eq!(*kw, kw.to_lowercase());
            }
        }
    }

    #[test]
    fn test_proficiency_level_serializes_as_title_case() {
        let json = serde_json::to_string(&ProficiencyLevel::Expert).unwrap();
        assert_eq!(json, "\"Expert\"");
    }
}
