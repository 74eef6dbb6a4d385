//! Provider trait for the analysis collaborator

use async_trait::async_trait;

use crate::types::{AgeSummary, GeneratedCode, ResearchAnalysis, SimilarPaper, VisualizationSpec};

/// Errors from the analysis service.
///
/// Each variant is distinguishable by the caller; none of them is ever
/// converted into a silent default.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("Analysis service unavailable: {0}")]
    Unavailable(String),

    #[error("Analysis service rejected the request: {0}")]
    Provider(String),

    #[error("Rate limited by the analysis service")]
    RateLimited,

    #[error("Could not parse analysis response: {0}")]
    Parse(String),
}

/// The external LLM-backed analysis service.
///
/// Implementations live outside this workspace (an HTTP client against a
/// hosted model, a local model runner); tests supply mocks.
#[async_trait]
pub trait AnalysisProvider: Send + Sync {
    /// Analyze raw paper text into a structured analysis record.
    async fn analyze_paper(&self, text: &str) -> Result<ResearchAnalysis, AnalysisError>;

    /// Summarize a paper for a target reading age.
    async fn summarize_for_age(
        &self,
        text: &str,
        target_age: i32,
    ) -> Result<AgeSummary, AnalysisError>;

    /// Generate implementation code for the paper's methodology.
    async fn generate_code(
        &self,
        text: &str,
        language: &str,
        framework: &str,
    ) -> Result<GeneratedCode, AnalysisError>;

    /// Suggest a visualization for the paper's key results.
    async fn suggest_visualization(&self, text: &str) -> Result<VisualizationSpec, AnalysisError>;

    /// Find papers similar to the given text for a search query.
    async fn find_similar_papers(
        &self,
        text: &str,
        query: &str,
    ) -> Result<Vec<SimilarPaper>, AnalysisError>;
}
