//! Typed records produced by the analysis collaborator
//!
//! Field layouts mirror the JSON the analysis service returns. Stores treat
//! these as opaque `serde_json::Value`; this module is for callers that want
//! the structured view.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Technical depth label assigned by the analysis service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TechnicalDepth {
    Basic,
    Intermediate,
    Advanced,
    Expert,
}

/// Bibliographic metadata estimated from the paper text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaperMetadata {
    pub title: String,
    #[serde(default)]
    pub estimated_pages: Option<u32>,
    #[serde(default)]
    pub estimated_citations: Option<u32>,
    #[serde(default)]
    pub publication_year: Option<i32>,
    #[serde(default)]
    pub research_quality: Option<String>,
}

/// Full analysis record for an uploaded paper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchAnalysis {
    /// 0-10 difficulty estimate.
    pub complexity_score: f64,
    pub technical_depth: TechnicalDepth,
    pub domain_primary: String,
    #[serde(default)]
    pub domain_secondary: Vec<String>,
    #[serde(default)]
    pub key_methodologies: Vec<String>,
    #[serde(default)]
    pub estimated_background_required: Option<String>,
    #[serde(default)]
    pub recommended_prerequisites: Vec<String>,
    /// 0-1 self-reported confidence.
    pub analysis_confidence: f64,
    pub paper_metadata: PaperMetadata,
}

/// An age-targeted summary payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgeSummary {
    pub executive_summary: String,
    pub what_is_this_about: String,
    pub why_should_i_care: String,
    #[serde(default)]
    pub real_world_examples: Vec<String>,
    #[serde(default)]
    pub fun_facts: Vec<String>,
    #[serde(default)]
    pub career_connections: Vec<String>,
    #[serde(default)]
    pub discussion_questions: Vec<String>,
    #[serde(default)]
    pub vocabulary_simplified: HashMap<String, String>,
}

/// Generated implementation code for a paper's methodology.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedCode {
    pub main_implementation: String,
    #[serde(default)]
    pub test_suite: Option<String>,
    #[serde(default)]
    pub documentation: Option<String>,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub performance_metrics: HashMap<String, String>,
}

/// Citation-quality metrics attached to a similar-paper suggestion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityMetrics {
    #[serde(default)]
    pub impact_factor: Option<f64>,
    #[serde(default)]
    pub h_index: Option<u32>,
    #[serde(default)]
    pub peer_review_score: Option<f64>,
}

/// A paper the analysis service considers similar to the uploaded one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarPaper {
    pub title: String,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub journal: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub citations: Option<u32>,
    pub similarity_score: f64,
    #[serde(default)]
    pub doi: Option<String>,
    #[serde(default)]
    pub abstract_text: Option<String>,
    #[serde(default)]
    pub key_similarities: Vec<String>,
    #[serde(default)]
    pub quality_metrics: Option<QualityMetrics>,
}

/// A visualization suggested by the analysis service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisualizationSpec {
    pub visualization_type: String,
    pub config: serde_json::Value,
}
