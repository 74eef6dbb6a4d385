//! Scout analysis - the external text-analysis collaborator surface
//!
//! The scout apps never compute paper analysis themselves; an external
//! LLM-backed service does. This crate defines the typed records that
//! service produces and the provider trait the rest of the suite calls.
//!
//! Provider failures are always surfaced to the caller as a distinct
//! [`AnalysisError`] — unlike identity resolution, analysis is never
//! silently degraded to a default.

pub mod provider;
pub mod types;

pub use provider::{AnalysisError, AnalysisProvider};
pub use types::{
    AgeSummary, GeneratedCode, PaperMetadata, QualityMetrics, ResearchAnalysis, SimilarPaper,
    TechnicalDepth, VisualizationSpec,
};
