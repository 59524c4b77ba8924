use crate::analysis::analyzer::PortfolioAnalyzer;

/// Shared application state injected into all route handlers via Axum extractors.
/// Immutable after startup; nothing request-scoped lives here.
#[derive(Clone)]
pub struct AppState {
    /// Cheap to clone: the remote generator sits behind an `Arc`.
    pub analyzer: PortfolioAnalyzer,
}
