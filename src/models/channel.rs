//! Channel models: catalog lookups and stored summaries.

use serde::{Deserialize, Serialize};

/// Channel metadata as returned by the catalog lookup. Transient.
#[derive(Debug, Clone)]
pub struct ChannelInfo {
    pub channel_id: String,
    pub title: String,
    pub description: String,
    pub subscriber_count: u64,
}

/// Channel summary mirrored into the cloud store.
///
/// The channels collection is append-only; there is no update or delete
/// path. Recent listings order by `created_at_millis` descending.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelSummary {
    pub channel_id: String,
    pub channel_name: String,
    pub description: String,
    pub subscriber_count: u64,
    /// User who looked the channel up ("unknown" for anonymous sessions)
    pub added_by_user_id: String,
    /// When the summary was stored, epoch millis
    pub created_at_millis: i64,
}

impl ChannelSummary {
    /// Stamp a catalog lookup result with its provenance.
    pub fn from_info(info: ChannelInfo, added_by_user_id: String, created_at_millis: i64) -> Self {
        Self {
            channel_id: info.channel_id,
            channel_name: info.title,
            description: info.description,
            subscriber_count: info.subscriber_count,
            added_by_user_id,
            created_at_millis,
        }
    }
}
