// Prompt constants for the recommendation call.
// The inference endpoint takes a single raw prompt, so instructions and data share one template.

/// Recommendation prompt template.
/// Replace: {skills}, {interests}, {proficiencies}, {sentiment}
pub const RECOMMENDATION_PROMPT_TEMPLATE: &str = r#"You are an AI career advisor for computer science students. Generate exactly 3 personalized learning recommendations based on:

Student Skills: {skills}
Interests: {interests}
Assessed Technologies: {proficiencies}
Portfolio Sentiment: {sentiment}

Generate recommendations as a JSON array with exactly 3 items. Each must have:
- type: "skill", "project", or "course"
- title: recommendation title
- description: 2-3 sentences
- reason: why this helps

Return ONLY valid JSON array, no markdown:
[{"type": "skill", "title": "...", "description": "...", "reason": "..."}]"#;

pub const NO_SKILLS_PLACEHOLDER: &str = "No specific skills mentioned";
pub const NO_INTERESTS_PLACEHOLDER: &str = "General tech";
pub const NO_PROFICIENCIES_PLACEHOLDER: &str = "None detected";
