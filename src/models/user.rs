//! User profile model mirrored into the cloud store.

use serde::{Deserialize, Serialize};

/// Minimal user profile, one live document per user id.
///
/// Writes are full overwrites keyed by `user_id`, so the stored document
/// always reflects the latest sign-in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    /// Opaque, stable auth identity (also the document id)
    pub user_id: String,
    /// Email address
    pub email: String,
    /// Display name
    pub display_name: String,
    /// Avatar URL (absent when the provider has none)
    pub avatar_url: Option<String>,
    /// Last successful sign-in, epoch millis
    pub last_login_millis: i64,
}
