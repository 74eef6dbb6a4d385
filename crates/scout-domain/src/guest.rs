//! On-device guest session

use serde::{Deserialize, Serialize};

/// The persisted pseudo-identity used when no remote account is available.
///
/// Created lazily on first local-mode access, never expires, removed only
/// by an explicit sign-out while in local mode.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GuestSession {
    pub user_id: String,
    pub display_name: String,
    pub created_at: String,
    pub mode: String,
}

impl GuestSession {
    /// Create a guest session around a freshly generated id.
    pub fn new(user_id: String) -> Self {
        Self {
            user_id,
            display_name: "Guest".to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
            mode: "guest".to_string(),
        }
    }
}
