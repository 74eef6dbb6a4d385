//! On-device persistence of papers and their derived artifacts
//!
//! Each logical collection is a JSON array under one storage key:
//! `research_papers` for papers, and `<prefix><paper_id>` for the per-paper
//! sub-resources. Saves prepend the new record and rewrite the whole
//! collection, so listing is newest-first by insertion order.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ids::local_record_id;
use crate::keys;
use crate::storage::{StorageArea, StorageError};
use scout_domain::{CodeGenerationDraft, PaperDraft, SummaryDraft, VisualizationDraft};

/// A paper as persisted on-device. Reshaped to the shared [`scout_domain::Paper`]
/// layout by the unified store before callers see it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LocalPaper {
    pub id: String,
    pub title: String,
    pub content: String,
    pub filename: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_size: Option<i64>,
    pub analysis: Value,
    pub upload_date: String,
}

/// A summary as persisted on-device.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LocalSummary {
    pub id: String,
    pub paper_id: String,
    pub target_age: i32,
    pub content: Value,
    pub created_at: String,
}

/// A code generation as persisted on-device.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LocalCodeGeneration {
    pub id: String,
    pub paper_id: String,
    pub language: String,
    pub framework: String,
    pub code_content: Value,
    pub created_at: String,
}

/// A visualization as persisted on-device.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LocalVisualization {
    pub id: String,
    pub paper_id: String,
    pub visualization_type: String,
    pub config: Value,
    pub created_at: String,
}

/// Store for locally persisted research data.
#[derive(Clone)]
pub struct LocalStore {
    storage: Arc<dyn StorageArea>,
}

impl LocalStore {
    pub fn new(storage: Arc<dyn StorageArea>) -> Self {
        Self { storage }
    }

    fn read_collection<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>, StorageError> {
        match self.storage.get_item(key)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    fn write_collection<T: Serialize>(&self, key: &str, records: &[T]) -> Result<(), StorageError> {
        let raw = serde_json::to_string(records)?;
        self.storage.set_item(key, &raw)
    }

    /// All saved papers, newest first.
    pub fn list_papers(&self) -> Result<Vec<LocalPaper>, StorageError> {
        self.read_collection(keys::PAPERS_KEY)
    }

    pub fn get_paper_by_id(&self, paper_id: &str) -> Result<Option<LocalPaper>, StorageError> {
        Ok(self.list_papers()?.into_iter().find(|p| p.id == paper_id))
    }

    pub fn save_paper(&self, draft: &PaperDraft) -> Result<LocalPaper, StorageError> {
        let mut papers = self.list_papers()?;
        let paper = LocalPaper {
            id: local_record_id(),
            title: draft.title.clone(),
            content: draft.content.clone(),
            filename: draft.filename.clone(),
            file_size: draft.file_size,
            analysis: draft.analysis.clone(),
            upload_date: chrono::Utc::now().to_rfc3339(),
        };
        papers.insert(0, paper.clone());
        self.write_collection(keys::PAPERS_KEY, &papers)?;
        Ok(paper)
    }

    /// Summaries for one paper, newest first.
    pub fn list_summaries(&self, paper_id: &str) -> Result<Vec<LocalSummary>, StorageError> {
        self.read_collection(&format!("{}{}", keys::SUMMARIES_PREFIX, paper_id))
    }

    pub fn save_summary(&self, draft: &SummaryDraft) -> Result<LocalSummary, StorageError> {
        let key = format!("{}{}", keys::SUMMARIES_PREFIX, draft.paper_id);
        let mut summaries: Vec<LocalSummary> = self.read_collection(&key)?;
        let summary = LocalSummary {
            id: local_record_id(),
            paper_id: draft.paper_id.clone(),
            target_age: draft.target_age,
            content: draft.content.clone(),
            created_at: chrono::Utc::now().to_rfc3339(),
        };
        summaries.insert(0, summary.clone());
        self.write_collection(&key, &summaries)?;
        Ok(summary)
    }

    /// Code generations for one paper, newest first.
    pub fn list_code(&self, paper_id: &str) -> Result<Vec<LocalCodeGeneration>, StorageError> {
        self.read_collection(&format!("{}{}", keys::CODE_PREFIX, paper_id))
    }

    pub fn save_code(
        &self,
        paper_id: &str,
        draft: &CodeGenerationDraft,
    ) -> Result<LocalCodeGeneration, StorageError> {
        let key = format!("{}{}", keys::CODE_PREFIX, paper_id);
        let mut generations: Vec<LocalCodeGeneration> = self.read_collection(&key)?;
        let generation = LocalCodeGeneration {
            id: local_record_id(),
            paper_id: paper_id.to_string(),
            language: draft.language.clone(),
            framework: draft.framework.clone(),
            code_content: draft.code_content.clone(),
            created_at: chrono::Utc::now().to_rfc3339(),
        };
        generations.insert(0, generation.clone());
        self.write_collection(&key, &generations)?;
        Ok(generation)
    }

    /// Visualizations for one paper, newest first.
    pub fn list_visualizations(
        &self,
        paper_id: &str,
    ) -> Result<Vec<LocalVisualization>, StorageError> {
        self.read_collection(&format!("{}{}", keys::VISUALIZATIONS_PREFIX, paper_id))
    }

    pub fn save_visualization(
        &self,
        paper_id: &str,
        draft: &VisualizationDraft,
    ) -> Result<LocalVisualization, StorageError> {
        let key = format!("{}{}", keys::VISUALIZATIONS_PREFIX, paper_id);
        let mut visualizations: Vec<LocalVisualization> = self.read_collection(&key)?;
        let visualization = LocalVisualization {
            id: local_record_id(),
            paper_id: paper_id.to_string(),
            visualization_type: draft.visualization_type.clone(),
            config: draft.config.clone(),
            created_at: chrono::Utc::now().to_rfc3339(),
        };
        visualizations.insert(0, visualization.clone());
        self.write_collection(&key, &visualizations)?;
        Ok(visualization)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use serde_json::json;

    fn store() -> LocalStore {
        LocalStore::new(Arc::new(MemoryStorage::new()))
    }

    #[test]
    fn test_save_paper_assigns_id_and_prepends() {
        let store = store();
        let first = store
            .save_paper(&PaperDraft::new("First", "alpha", "a.pdf"))
            .unwrap();
        let second = store
            .save_paper(&PaperDraft::new("Second", "beta", "b.pdf"))
            .unwrap();

        assert_ne!(first.id, second.id);
        assert!(first.id.split('_').all(|part| part.chars().all(|c| c.is_ascii_digit())));

        let papers = store.list_papers().unwrap();
        assert_eq!(papers.len(), 2);
        assert_eq!(papers[0].title, "Second");
        assert_eq!(papers[1].title, "First");
    }

    #[test]
    fn test_saved_paper_round_trips_fields() {
        let store = store();
        let draft = PaperDraft::new("Attention", "full text", "attention.pdf")
            .with_analysis(json!({ "complexity_score": 8 }))
            .with_file_size(4096);
        let saved = store.save_paper(&draft).unwrap();

        let listed = &store.list_papers().unwrap()[0];
        assert_eq!(listed.id, saved.id);
        assert_eq!(listed.title, "Attention");
        assert_eq!(listed.content, "full text");
        assert_eq!(listed.filename, "attention.pdf");
        assert_eq!(listed.file_size, Some(4096));
        assert_eq!(listed.analysis["complexity_score"], json!(8));
        assert!(!listed.upload_date.is_empty());
    }

    #[test]
    fn test_summaries_scoped_per_paper() {
        let store = store();
        store
            .save_summary(&SummaryDraft {
                paper_id: "paper-a".to_string(),
                target_age: 12,
                content: json!({ "executive_summary": "a" }),
            })
            .unwrap();
        store
            .save_summary(&SummaryDraft {
                paper_id: "paper-b".to_string(),
                target_age: 12,
                content: json!({ "executive_summary": "b" }),
            })
            .unwrap();

        assert_eq!(store.list_summaries("paper-a").unwrap().len(), 1);
        assert_eq!(store.list_summaries("paper-b").unwrap().len(), 1);
        assert!(store.list_summaries("paper-c").unwrap().is_empty());
    }

    #[test]
    fn test_code_and_visualizations_round_trip() {
        let store = store();
        let code = store
            .save_code(
                "paper-a",
                &CodeGenerationDraft {
                    language: "python".to_string(),
                    framework: "jax".to_string(),
                    code_content: json!({ "main_implementation": "pass" }),
                },
            )
            .unwrap();
        assert_eq!(code.paper_id, "paper-a");
        assert_eq!(store.list_code("paper-a").unwrap()[0].language, "python");

        let vis = store
            .save_visualization(
                "paper-a",
                &VisualizationDraft {
                    visualization_type: "chart".to_string(),
                    config: json!({ "chart_type": "line" }),
                },
            )
            .unwrap();
        assert_eq!(vis.visualization_type, "chart");
        assert_eq!(
            store.list_visualizations("paper-a").unwrap()[0].config["chart_type"],
            json!("line")
        );
    }

    #[test]
    fn test_get_paper_by_id() {
        let store = store();
        let saved = store
            .save_paper(&PaperDraft::new("Findable", "text", "f.pdf"))
            .unwrap();
        assert!(store.get_paper_by_id(&saved.id).unwrap().is_some());
        assert!(store.get_paper_by_id("1700000000000_1").unwrap().is_none());
    }

    #[test]
    fn test_corrupt_collection_surfaces_error() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set_item(keys::PAPERS_KEY, "not json").unwrap();
        let store = LocalStore::new(storage);
        assert!(matches!(
            store.list_papers(),
            Err(StorageError::Serialization(_))
        ));
    }
}
