//! Saved similar-paper search results

use serde::{Deserialize, Serialize};

/// One externally-discovered paper similar to an uploaded one.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimilarPaperRef {
    pub title: String,
    pub similarity_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doi: Option<String>,
}

/// A stored similar-papers search result set for one paper.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimilarPapers {
    pub id: String,
    pub paper_id: String,
    pub user_id: String,
    pub similar_papers: Vec<SimilarPaperRef>,
    pub search_query: String,
    pub created_at: String,
}

/// Caller-supplied similar-papers fields.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimilarPapersDraft {
    pub paper_id: String,
    pub user_id: String,
    pub similar_papers: Vec<SimilarPaperRef>,
    pub search_query: String,
}
