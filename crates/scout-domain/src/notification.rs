//! User notification record

use serde::{Deserialize, Serialize};

/// A per-user notification row from the remote backend.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub message: String,
    pub read: bool,
    pub created_at: String,
}

/// Caller-supplied notification fields.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NotificationDraft {
    pub user_id: String,
    pub title: String,
    pub message: String,
    #[serde(default)]
    pub read: bool,
}
