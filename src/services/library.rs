// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! High-level channel flows combining the catalog gateway and the store.

use crate::db::MetadataStore;
use crate::error::AppError;
use crate::extract::{self, Identifier};
use crate::models::{ChannelSummary, VideoRef};
use crate::services::YouTubeClient;
use crate::time_utils;

/// Channel lookup, listing and persistence flows.
pub struct ChannelLibrary {
    youtube: YouTubeClient,
    store: MetadataStore,
    /// Configured substitute for custom channel URL shapes that cannot be
    /// canonicalized without a network lookup.
    fallback_channel_id: Option<String>,
}

impl ChannelLibrary {
    pub fn new(
        youtube: YouTubeClient,
        store: MetadataStore,
        fallback_channel_id: Option<String>,
    ) -> Self {
        Self {
            youtube,
            store,
            fallback_channel_id,
        }
    }

    /// Resolve free-form input to a canonical channel id.
    ///
    /// Custom URL shapes (`/c/`, `/user/`, `/@handle`) resolve only through
    /// the configured fallback; everything else unrecognized is an error.
    pub fn resolve_channel_id(&self, input: &str) -> Result<String, AppError> {
        match extract::extract(input) {
            Identifier::Channel(id) => Ok(id),
            Identifier::Video(_) => Err(AppError::Unrecognized(format!(
                "'{}' names a video, not a channel",
                input.trim()
            ))),
            Identifier::Unrecognized if extract::is_custom_channel_ref(input) => {
                match &self.fallback_channel_id {
                    Some(id) => {
                        tracing::debug!(
                            input,
                            fallback = %id,
                            "Custom channel URL mapped to configured fallback"
                        );
                        Ok(id.clone())
                    }
                    None => Err(AppError::Unrecognized(format!(
                        "'{}' is a custom channel URL; set FALLBACK_CHANNEL_ID or use the canonical UC… id",
                        input.trim()
                    ))),
                }
            }
            Identifier::Unrecognized => Err(AppError::Unrecognized(input.trim().to_string())),
        }
    }

    /// Look up a channel and persist a summary stamped with the session
    /// user and the current time.
    pub async fn add_channel(&self, input: &str) -> Result<ChannelSummary, AppError> {
        let channel_id = self.resolve_channel_id(input)?;
        let info = self.youtube.fetch_channel(&channel_id).await?;

        let added_by = self
            .store
            .session()
            .current_user()
            .map(|user| user.user_id.clone())
            .unwrap_or_else(|| "unknown".to_string());

        let summary = ChannelSummary::from_info(info, added_by, time_utils::epoch_millis());
        self.store.write_channel_summary(&summary).await?;
        Ok(summary)
    }

    /// The channel's most recent uploads, newest first.
    pub async fn recent_videos(&self, input: &str, limit: u32) -> Result<Vec<VideoRef>, AppError> {
        let channel_id = self.resolve_channel_id(input)?;
        Ok(self.youtube.fetch_recent_videos(&channel_id, limit).await?)
    }
}
