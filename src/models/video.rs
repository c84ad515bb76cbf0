//! Video reference model.

/// A playable video reference from the catalog.
///
/// Fetched on demand and handed to the playback layer; never persisted.
#[derive(Debug, Clone)]
pub struct VideoRef {
    /// Canonical 11-character video id
    pub video_id: String,
    pub title: String,
    pub channel_id: String,
    pub channel_title: String,
    /// Publish time as reported by the catalog (ISO-8601 UTC)
    pub published_at: String,
}
