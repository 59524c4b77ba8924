// Portfolio analysis: vocabulary scans, proficiency and sentiment scoring, recommendations.
// All remote text generation goes through llm_client; nothing here calls the network directly.

pub mod analyzer;
pub mod entities;
pub mod handlers;
pub mod models;
pub mod proficiency;
pub mod prompts;
pub mod quality;
pub mod recommendations;
pub mod sentiment;
pub mod skill_sentiment;
pub mod vocabulary;
