//! Research paper domain model

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An uploaded research paper together with its externally-produced analysis.
///
/// Both storage backends return this shape. `id` is an opaque string:
/// server-assigned in remote mode, `<millis>_<suffix>` in local mode. Ids
/// from the two modes are never interchangeable.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Paper {
    pub id: String,
    pub user_id: Option<String>,
    pub title: String,
    pub content: String,
    pub filename: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_size: Option<i64>,
    /// Opaque analysis record produced by the analysis collaborator.
    pub analysis: Value,
    /// RFC 3339, assigned at persistence time.
    pub created_at: String,
    /// Mirrors `created_at` for local records, which are immutable.
    pub updated_at: String,
}

/// Fields supplied by the caller when saving a paper; the store assigns
/// id, owner and timestamps.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PaperDraft {
    pub title: String,
    pub content: String,
    pub filename: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_size: Option<i64>,
    pub analysis: Value,
}

impl PaperDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            filename: filename.into(),
            file_size: None,
            analysis: Value::Null,
        }
    }

    pub fn with_analysis(mut self, analysis: Value) -> Self {
        self.analysis = analysis;
        self
    }

    pub fn with_file_size(mut self, bytes: i64) -> Self {
        self.file_size = Some(bytes);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_paper_serde_round_trip() {
        let paper = Paper {
            id: "1733000000000_4821".to_string(),
            user_id: Some("guest_1733000000000_17".to_string()),
            title: "Attention Is All You Need".to_string(),
            content: "We propose a new simple network architecture".to_string(),
            filename: "attention.pdf".to_string(),
            file_size: Some(2_097_152),
            analysis: json!({ "complexity_score": 8, "domain_primary": "computer_science" }),
            created_at: "2025-01-15T12:00:00Z".to_string(),
            updated_at: "2025-01-15T12:00:00Z".to_string(),
        };
        let encoded = serde_json::to_string(&paper).unwrap();
        let back: Paper = serde_json::from_str(&encoded).unwrap();
        assert_eq!(back.id, paper.id);
        assert_eq!(back.analysis["complexity_score"], json!(8));
    }

    #[test]
    fn test_draft_builder() {
        let draft = PaperDraft::new("Title", "Body", "paper.pdf")
            .with_analysis(serde_json::json!({"analysis_confidence": 0.9}))
            .with_file_size(1024);
        assert_eq!(draft.file_size, Some(1024));
        assert_eq!(draft.analysis["analysis_confidence"], serde_json::json!(0.9));
    }

    #[test]
    fn test_missing_file_size_is_omitted() {
        let draft = PaperDraft::new("T", "C", "f.pdf");
        let encoded = serde_json::to_string(&draft).unwrap();
        assert!(!encoded.contains("file_size"));
    }
}
