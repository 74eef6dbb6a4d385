//! Remote store adapter: CRUD against the hosted backend's tables
//!
//! Thin wrappers over the REST transport, one method per table operation.
//! Writes run through a bounded retry loop for transient network faults;
//! reads of the paper list go through the injected TTL cache.

pub mod rest;
pub mod retry;

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::debug;

use crate::cache::TtlCache;
use crate::config::RemoteConfig;
use rest::{HttpTransport, RestError, RestTransport, SelectQuery};
use retry::{with_retry, RetryPolicy};
use scout_domain::{
    CodeGeneration, CodeGenerationDraft, Notification, NotificationDraft, Paper, PaperDraft,
    SimilarPapers, SimilarPapersDraft, Summary, SummaryDraft, Visualization, VisualizationDraft,
};

/// Backend table names.
pub mod tables {
    pub const PAPERS: &str = "research_papers";
    pub const SUMMARIES: &str = "summaries";
    pub const CODE_GENERATIONS: &str = "code_generations";
    pub const VISUALIZATIONS: &str = "visualizations";
    pub const NOTIFICATIONS: &str = "notifications";
    pub const SIMILAR_PAPERS: &str = "similar_papers";
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, RestError> {
    serde_json::from_value(value).map_err(|e| RestError::Decode {
        message: e.to_string(),
    })
}

fn encode<T: serde::Serialize>(record: &T) -> Result<Value, RestError> {
    serde_json::to_value(record).map_err(|e| RestError::Decode {
        message: e.to_string(),
    })
}

/// CRUD adapter for the hosted backend.
pub struct RemoteStore {
    transport: Arc<dyn RestTransport>,
    cache: TtlCache,
    retry: RetryPolicy,
}

impl RemoteStore {
    pub fn new(transport: Arc<dyn RestTransport>, cache: TtlCache, retry: RetryPolicy) -> Self {
        Self {
            transport,
            cache,
            retry,
        }
    }

    /// Adapter over HTTP with default cache TTL and retry policy.
    pub fn from_config(config: RemoteConfig) -> Result<Self, RestError> {
        Ok(Self::new(
            Arc::new(HttpTransport::new(config)?),
            TtlCache::default(),
            RetryPolicy::default(),
        ))
    }

    async fn insert_with_retry(&self, table: &str, row: Value) -> Result<Value, RestError> {
        with_retry(&self.retry, || {
            let row = row.clone();
            async move { self.transport.insert(table, row).await }
        })
        .await
    }

    /// All papers visible to `user_id`, newest first.
    ///
    /// Served from the TTL cache when a fresh entry exists; writes never
    /// invalidate the cache, so a paper saved moments ago may be missing
    /// from this list until the window expires.
    pub async fn list_papers(&self, user_id: &str) -> Result<Vec<Paper>, RestError> {
        let cache_key = format!("papers_{user_id}");
        if let Some(cached) = self.cache.get(&cache_key) {
            if let Ok(papers) = decode::<Vec<Paper>>(cached) {
                debug!(user_id, "paper list served from cache");
                return Ok(papers);
            }
        }

        let rows = self
            .transport
            .select(tables::PAPERS, &SelectQuery::new().order_desc("created_at"))
            .await?;
        self.cache.insert(&cache_key, Value::Array(rows.clone()));
        decode(Value::Array(rows))
    }

    pub async fn save_paper(
        &self,
        user_id: Option<&str>,
        draft: &PaperDraft,
    ) -> Result<Paper, RestError> {
        let mut row = encode(draft)?;
        row["user_id"] = json!(user_id);
        let inserted = self.insert_with_retry(tables::PAPERS, row).await?;
        decode(inserted)
    }

    /// At most one summary for `(paper_id, target_age)`; `None` when no
    /// summary exists yet.
    pub async fn get_summary(
        &self,
        paper_id: &str,
        target_age: i32,
    ) -> Result<Option<Summary>, RestError> {
        let query = SelectQuery::new()
            .eq("paper_id", paper_id)
            .eq("target_age", target_age)
            .limit(1);
        let mut rows = self.transport.select(tables::SUMMARIES, &query).await?;
        if rows.is_empty() {
            Ok(None)
        } else {
            decode(rows.remove(0)).map(Some)
        }
    }

    pub async fn save_summary(
        &self,
        user_id: Option<&str>,
        draft: &SummaryDraft,
    ) -> Result<Summary, RestError> {
        let mut row = encode(draft)?;
        row["user_id"] = json!(user_id);
        let inserted = self.insert_with_retry(tables::SUMMARIES, row).await?;
        decode(inserted)
    }

    pub async fn save_code_generation(
        &self,
        user_id: &str,
        paper_id: &str,
        draft: &CodeGenerationDraft,
    ) -> Result<CodeGeneration, RestError> {
        let mut row = encode(draft)?;
        row["user_id"] = json!(user_id);
        row["paper_id"] = json!(paper_id);
        let inserted = self.insert_with_retry(tables::CODE_GENERATIONS, row).await?;
        decode(inserted)
    }

    pub async fn save_visualization(
        &self,
        user_id: &str,
        paper_id: &str,
        draft: &VisualizationDraft,
    ) -> Result<Visualization, RestError> {
        let mut row = encode(draft)?;
        row["user_id"] = json!(user_id);
        row["paper_id"] = json!(paper_id);
        let inserted = self.insert_with_retry(tables::VISUALIZATIONS, row).await?;
        decode(inserted)
    }

    /// Most recent notifications, newest first, capped at 50.
    pub async fn list_notifications(&self) -> Result<Vec<Notification>, RestError> {
        let rows = self
            .transport
            .select(
                tables::NOTIFICATIONS,
                &SelectQuery::new().order_desc("created_at").limit(50),
            )
            .await?;
        decode(Value::Array(rows))
    }

    pub async fn save_notification(
        &self,
        draft: &NotificationDraft,
    ) -> Result<Notification, RestError> {
        let row = encode(draft)?;
        let inserted = self.insert_with_retry(tables::NOTIFICATIONS, row).await?;
        decode(inserted)
    }

    pub async fn mark_notification_read(&self, notification_id: &str) -> Result<(), RestError> {
        self.transport
            .update(
                tables::NOTIFICATIONS,
                json!({ "read": true }),
                &SelectQuery::new().eq("id", notification_id),
            )
            .await
    }

    pub async fn save_similar_papers(
        &self,
        draft: &SimilarPapersDraft,
    ) -> Result<SimilarPapers, RestError> {
        let row = encode(draft)?;
        let inserted = self.insert_with_retry(tables::SIMILAR_PAPERS, row).await?;
        decode(inserted)
    }

    pub async fn get_similar_papers(
        &self,
        paper_id: &str,
    ) -> Result<Option<SimilarPapers>, RestError> {
        let query = SelectQuery::new().eq("paper_id", paper_id).limit(1);
        let mut rows = self.transport.select(tables::SIMILAR_PAPERS, &query).await?;
        if rows.is_empty() {
            Ok(None)
        } else {
            decode(rows.remove(0)).map(Some)
        }
    }
}
