//! Age-targeted summary domain model

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A summary of one paper written for a target reading age.
///
/// The store does not enforce uniqueness per `(paper_id, target_age)`;
/// callers check before creating.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Summary {
    pub id: String,
    pub paper_id: String,
    pub user_id: Option<String>,
    pub target_age: i32,
    /// Opaque summary payload from the analysis collaborator.
    pub content: Value,
    pub created_at: String,
}

/// Caller-supplied summary fields; the store assigns id and timestamp.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SummaryDraft {
    pub paper_id: String,
    pub target_age: i32,
    pub content: Value,
}
