//! Derived artifacts for a paper: code generations and visualizations

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Generated implementation code for a paper's methodology.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CodeGeneration {
    pub id: String,
    pub paper_id: String,
    pub user_id: Option<String>,
    pub language: String,
    pub framework: String,
    /// Opaque generated-code payload (main implementation, tests, docs).
    pub code_content: Value,
    pub created_at: String,
}

/// Caller-supplied code-generation fields.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CodeGenerationDraft {
    pub language: String,
    pub framework: String,
    pub code_content: Value,
}

/// A saved visualization derived from a paper.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Visualization {
    pub id: String,
    pub paper_id: String,
    pub user_id: Option<String>,
    pub visualization_type: String,
    /// Opaque chart configuration (data, axes, chart type).
    pub config: Value,
    pub created_at: String,
}

/// Caller-supplied visualization fields.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VisualizationDraft {
    pub visualization_type: String,
    pub config: Value,
}
