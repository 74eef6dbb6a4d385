//! Identity resolution: remote account or on-device guest
//!
//! Resolution is total: provider errors are downgraded to "not
//! authenticated" and fall through to the guest path, so callers can use
//! the resolver as a pure availability probe. Whether a transient provider
//! outage should instead surface as a distinct state is an open question
//! recorded in DESIGN.md; the shipped contract is the downgrade.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::ids::guest_session_id;
use crate::keys::GUEST_SESSION_KEY;
use crate::storage::{StorageArea, StorageError};
use scout_domain::GuestSession;

/// Fallback id when even guest-session persistence fails.
const ANONYMOUS_GUEST_ID: &str = "guest";

/// Errors from an external identity provider.
#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("Identity provider error: {0}")]
    Provider(String),
}

/// The external identity collaborator: reports the current authenticated
/// principal, or `None` when nobody is signed in.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn current_user_id(&self) -> Result<Option<String>, IdentityError>;
}

/// Resolves the effective user id for every store operation.
#[derive(Clone)]
pub struct IdentityResolver {
    provider: Option<Arc<dyn IdentityProvider>>,
    storage: Arc<dyn StorageArea>,
}

impl IdentityResolver {
    /// Resolver with no identity provider configured: always guest.
    pub fn local_only(storage: Arc<dyn StorageArea>) -> Self {
        Self {
            provider: None,
            storage,
        }
    }

    pub fn new(provider: Arc<dyn IdentityProvider>, storage: Arc<dyn StorageArea>) -> Self {
        Self {
            provider: Some(provider),
            storage,
        }
    }

    /// The authenticated remote id, or `None` when the provider is absent,
    /// reports nobody, or fails.
    pub async fn remote_user_id(&self) -> Option<String> {
        let provider = self.provider.as_ref()?;
        match provider.current_user_id().await {
            Ok(id) => id,
            Err(e) => {
                warn!(error = %e, "identity provider failed; treating as not authenticated");
                None
            }
        }
    }

    /// The persistent guest id, generated and stored on first use.
    ///
    /// Storage failures degrade to a fixed anonymous id rather than
    /// propagating; this accessor never fails.
    pub fn guest_user_id(&self) -> String {
        match self.load_or_create_guest() {
            Ok(id) => id,
            Err(e) => {
                warn!(error = %e, "guest session unavailable; using anonymous id");
                ANONYMOUS_GUEST_ID.to_string()
            }
        }
    }

    fn load_or_create_guest(&self) -> Result<String, StorageError> {
        if let Some(raw) = self.storage.get_item(GUEST_SESSION_KEY)? {
            if let Ok(session) = serde_json::from_str::<GuestSession>(&raw) {
                return Ok(session.user_id);
            }
            // Unreadable session record: regenerate below.
        }
        let session = GuestSession::new(guest_session_id());
        self.storage
            .set_item(GUEST_SESSION_KEY, &serde_json::to_string(&session)?)?;
        Ok(session.user_id)
    }

    /// The effective user id: remote when available, guest otherwise.
    pub async fn current_user_id(&self) -> String {
        match self.remote_user_id().await {
            Some(id) => id,
            None => self.guest_user_id(),
        }
    }

    /// Remove the guest session. Only meaningful in local mode; the next
    /// local-mode access creates a fresh guest identity.
    pub fn sign_out_guest(&self) -> Result<(), StorageError> {
        self.storage.remove_item(GUEST_SESSION_KEY)
    }
}
