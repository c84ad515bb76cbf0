// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! YouTube Data API client for channel metadata and recent uploads.
//!
//! Pure network calls: no caching, no retries. A transport failure is
//! surfaced once; a response that fails to parse is a decode failure so
//! callers can tell the two apart.

use std::time::{Duration, Instant};

use serde::Deserialize;

use crate::error::FetchError;
use crate::models::{ChannelInfo, VideoRef};

const BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Connect/read timeout for catalog requests.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// YouTube Data API client.
#[derive(Clone)]
pub struct YouTubeClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl YouTubeClient {
    /// Create a new client with the given API key credential.
    pub fn new(api_key: String) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .connect_timeout(REQUEST_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            base_url: BASE_URL.to_string(),
            api_key,
        })
    }

    /// Get channel metadata by canonical channel id.
    pub async fn fetch_channel(&self, channel_id: &str) -> Result<ChannelInfo, FetchError> {
        let started = Instant::now();
        let url = format!("{}/channels", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[
                ("part", "snippet,statistics"),
                ("id", channel_id),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let listing: ChannelListResponse = decode(response).await?;

        tracing::debug!(
            channel_id,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Channel info fetch completed"
        );

        listing
            .items
            .into_iter()
            .next()
            .ok_or(FetchError::NotFound)?
            .into_info()
    }

    /// The channel's most recent uploads, newest first, at most `limit`.
    ///
    /// Server-side ordering is trusted; entries without a resolvable video
    /// id are dropped rather than reported as errors.
    pub async fn fetch_recent_videos(
        &self,
        channel_id: &str,
        limit: u32,
    ) -> Result<Vec<VideoRef>, FetchError> {
        let started = Instant::now();
        let url = format!("{}/search", self.base_url);
        let max_results = limit.to_string();

        let response = self
            .http
            .get(&url)
            .query(&[
                ("part", "snippet"),
                ("channelId", channel_id),
                ("type", "video"),
                ("order", "date"),
                ("maxResults", max_results.as_str()),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let listing: SearchListResponse = decode(response).await?;
        let videos = videos_from_listing(listing);

        tracing::debug!(
            channel_id,
            count = videos.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Channel videos fetch completed"
        );
        Ok(videos)
    }
}

/// Check response status and parse the JSON body.
///
/// Non-success statuses and body-read failures are transport errors; a body
/// that does not match the expected shape is a decode error.
async fn decode<T: for<'de> Deserialize<'de>>(response: reqwest::Response) -> Result<T, FetchError> {
    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(FetchError::Transport(format!("HTTP {}: {}", status, body)));
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| FetchError::Transport(e.to_string()))?;
    serde_json::from_slice(&bytes).map_err(|e| FetchError::Decode(e.to_string()))
}

/// Map a search listing to video references, dropping entries without a
/// resolvable video id.
fn videos_from_listing(listing: SearchListResponse) -> Vec<VideoRef> {
    listing
        .items
        .into_iter()
        .filter_map(|item| {
            let video_id = item.id.video_id.filter(|id| !id.is_empty())?;
            let snippet = item.snippet.unwrap_or_default();
            Some(VideoRef {
                video_id,
                title: snippet.title,
                channel_id: snippet.channel_id,
                channel_title: snippet.channel_title,
                published_at: snippet.published_at,
            })
        })
        .collect()
}

// ─── Response Shapes ─────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct ChannelListResponse {
    #[serde(default)]
    items: Vec<ChannelItem>,
}

#[derive(Debug, Deserialize)]
struct ChannelItem {
    id: String,
    snippet: ChannelSnippet,
    statistics: Option<ChannelStatistics>,
}

impl ChannelItem {
    fn into_info(self) -> Result<ChannelInfo, FetchError> {
        // subscriberCount is a decimal string; absent when the channel
        // hides its subscriber total.
        let subscriber_count = match self
            .statistics
            .as_ref()
            .and_then(|s| s.subscriber_count.as_deref())
        {
            Some(raw) => raw
                .parse::<u64>()
                .map_err(|e| FetchError::Decode(format!("subscriberCount: {}", e)))?,
            None => 0,
        };

        Ok(ChannelInfo {
            channel_id: self.id,
            title: self.snippet.title,
            description: self.snippet.description,
            subscriber_count,
        })
    }
}

#[derive(Debug, Deserialize)]
struct ChannelSnippet {
    title: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChannelStatistics {
    subscriber_count: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchListResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: SearchItemId,
    snippet: Option<SearchSnippet>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchItemId {
    #[serde(default)]
    video_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchSnippet {
    #[serde(default)]
    title: String,
    #[serde(default)]
    channel_id: String,
    #[serde(default)]
    channel_title: String,
    #[serde(default)]
    published_at: String,
}
