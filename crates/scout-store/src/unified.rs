//! Unified data store: one call surface over both storage modes
//!
//! Every operation starts with an availability probe: if the identity
//! resolver reports an authenticated remote account and a remote adapter is
//! configured, the whole operation runs remote; otherwise it runs against
//! the on-device store. The probe is re-evaluated per call, so a session
//! oscillates with connectivity — always preferring remote — but records
//! written locally are never migrated when the mode flips.
//!
//! A remote-mode failure surfaces to the caller; it is never silently
//! rerouted to local storage, which would let data drift between stores.

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::identity::{IdentityProvider, IdentityResolver};
use crate::local::{LocalPaper, LocalStore};
use crate::remote::rest::RestError;
use crate::remote::RemoteStore;
use crate::storage::{StorageArea, StorageError};
use scout_domain::{
    CodeGeneration, CodeGenerationDraft, Paper, PaperDraft, SummaryDraft, Visualization,
    VisualizationDraft,
};

/// Errors surfaced by the unified store. Absence of remote configuration
/// is a routing decision and never appears here.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Remote(#[from] RestError),

    #[error(transparent)]
    Local(#[from] StorageError),
}

/// The storage mode chosen for one operation.
enum Backend<'a> {
    Remote {
        store: &'a RemoteStore,
        user_id: String,
    },
    Local {
        guest_id: String,
    },
}

/// Facade the application calls for all persistence.
pub struct DataStore {
    identity: IdentityResolver,
    local: LocalStore,
    remote: Option<RemoteStore>,
}

impl DataStore {
    pub fn new(
        identity: IdentityResolver,
        local: LocalStore,
        remote: Option<RemoteStore>,
    ) -> Self {
        Self {
            identity,
            local,
            remote,
        }
    }

    /// Store over one shared storage area, with no remote backend: the
    /// fully local configuration.
    pub fn local_only(storage: Arc<dyn StorageArea>) -> Self {
        Self::new(
            IdentityResolver::local_only(storage.clone()),
            LocalStore::new(storage),
            None,
        )
    }

    /// Store with a remote adapter and identity provider, falling back to
    /// the given storage area when unauthenticated.
    pub fn with_remote(
        storage: Arc<dyn StorageArea>,
        provider: Arc<dyn IdentityProvider>,
        remote: RemoteStore,
    ) -> Self {
        Self::new(
            IdentityResolver::new(provider, storage.clone()),
            LocalStore::new(storage),
            Some(remote),
        )
    }

    /// The availability probe: one backend decision per operation.
    async fn resolve_backend(&self) -> Backend<'_> {
        if let Some(remote) = &self.remote {
            if let Some(user_id) = self.identity.remote_user_id().await {
                debug!(%user_id, "operation routed to remote store");
                return Backend::Remote {
                    store: remote,
                    user_id,
                };
            }
        }
        let guest_id = self.identity.guest_user_id();
        debug!(%guest_id, "operation routed to local store");
        Backend::Local { guest_id }
    }

    /// The effective user id: remote account id or persistent guest id.
    pub async fn current_user_id(&self) -> String {
        match self.resolve_backend().await {
            Backend::Remote { user_id, .. } => user_id,
            Backend::Local { guest_id } => guest_id,
        }
    }

    /// All papers, newest first, in the shared layout regardless of mode.
    pub async fn papers(&self) -> Result<Vec<Paper>, StoreError> {
        match self.resolve_backend().await {
            Backend::Remote { store, user_id } => Ok(store.list_papers(&user_id).await?),
            Backend::Local { guest_id } => {
                let papers = self.local.list_papers()?;
                Ok(papers
                    .into_iter()
                    .map(|p| reshape_local_paper(p, &guest_id))
                    .collect())
            }
        }
    }

    pub async fn save_paper(&self, draft: &PaperDraft) -> Result<Paper, StoreError> {
        match self.resolve_backend().await {
            Backend::Remote { store, user_id } => {
                Ok(store.save_paper(Some(&user_id), draft).await?)
            }
            Backend::Local { guest_id } => {
                let saved = self.local.save_paper(draft)?;
                Ok(reshape_local_paper(saved, &guest_id))
            }
        }
    }

    /// The summary content for `(paper_id, target_age)`, or `None` when no
    /// summary exists yet. Only the content payload is exposed; the
    /// wrapping record's metadata stays internal.
    pub async fn summary(
        &self,
        paper_id: &str,
        target_age: i32,
    ) -> Result<Option<Value>, StoreError> {
        match self.resolve_backend().await {
            Backend::Remote { store, .. } => Ok(store
                .get_summary(paper_id, target_age)
                .await?
                .map(|s| s.content)),
            Backend::Local { .. } => Ok(self
                .local
                .list_summaries(paper_id)?
                .into_iter()
                .find(|s| s.target_age == target_age)
                .map(|s| s.content)),
        }
    }

    /// Save a summary and return its content payload.
    ///
    /// Uniqueness per `(paper_id, target_age)` is not enforced; callers
    /// check before creating, and two racing creators both succeed.
    pub async fn save_summary(
        &self,
        paper_id: &str,
        target_age: i32,
        content: Value,
    ) -> Result<Value, StoreError> {
        let draft = SummaryDraft {
            paper_id: paper_id.to_string(),
            target_age,
            content,
        };
        match self.resolve_backend().await {
            Backend::Remote { store, user_id } => {
                Ok(store.save_summary(Some(&user_id), &draft).await?.content)
            }
            Backend::Local { .. } => Ok(self.local.save_summary(&draft)?.content),
        }
    }

    pub async fn save_code_generation(
        &self,
        paper_id: &str,
        draft: &CodeGenerationDraft,
    ) -> Result<CodeGeneration, StoreError> {
        match self.resolve_backend().await {
            Backend::Remote { store, user_id } => {
                Ok(store.save_code_generation(&user_id, paper_id, draft).await?)
            }
            Backend::Local { guest_id } => {
                let saved = self.local.save_code(paper_id, draft)?;
                Ok(CodeGeneration {
                    id: saved.id,
                    paper_id: saved.paper_id,
                    user_id: Some(guest_id),
                    language: saved.language,
                    framework: saved.framework,
                    code_content: saved.code_content,
                    created_at: saved.created_at,
                })
            }
        }
    }

    pub async fn save_visualization(
        &self,
        paper_id: &str,
        draft: &VisualizationDraft,
    ) -> Result<Visualization, StoreError> {
        match self.resolve_backend().await {
            Backend::Remote { store, user_id } => {
                Ok(store.save_visualization(&user_id, paper_id, draft).await?)
            }
            Backend::Local { guest_id } => {
                let saved = self.local.save_visualization(paper_id, draft)?;
                Ok(reshape_local_visualization(saved, &guest_id))
            }
        }
    }

    /// Saved visualizations for a paper, newest first.
    ///
    /// Always served from the local store: the remote listing path is not
    /// implemented, so remote-mode saves are visible here only on the
    /// device that made them. Known gap, tracked in DESIGN.md.
    pub async fn visualizations(&self, paper_id: &str) -> Result<Vec<Visualization>, StoreError> {
        let guest_id = self.identity.guest_user_id();
        let records = self.local.list_visualizations(paper_id)?;
        Ok(records
            .into_iter()
            .map(|v| reshape_local_visualization(v, &guest_id))
            .collect())
    }

    /// Remove the guest session; the next local-mode call creates a fresh
    /// guest identity.
    pub fn sign_out_guest(&self) -> Result<(), StoreError> {
        Ok(self.identity.sign_out_guest()?)
    }
}

/// Reshape an on-device paper into the shared layout: the guest owns it,
/// and `updated_at` mirrors `created_at` because local records are
/// immutable.
fn reshape_local_paper(paper: LocalPaper, guest_id: &str) -> Paper {
    Paper {
        id: paper.id,
        user_id: Some(guest_id.to_string()),
        title: paper.title,
        content: paper.content,
        filename: paper.filename,
        file_size: paper.file_size,
        analysis: paper.analysis,
        created_at: paper.upload_date.clone(),
        updated_at: paper.upload_date,
    }
}

fn reshape_local_visualization(
    visualization: crate::local::LocalVisualization,
    guest_id: &str,
) -> Visualization {
    Visualization {
        id: visualization.id,
        paper_id: visualization.paper_id,
        user_id: Some(guest_id.to_string()),
        visualization_type: visualization.visualization_type,
        config: visualization.config,
        created_at: visualization.created_at,
    }
}
