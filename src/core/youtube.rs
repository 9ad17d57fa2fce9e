//! YouTube Data API v3 client
//!
//! Playlist listings and batched video detail lookups.

use crate::error::{LineupError, Result};
use crate::types::Video;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

const DEFAULT_API_BASE: &str = "https://www.googleapis.com/youtube/v3";

/// The `videos` endpoint accepts at most this many ids per call
const DETAILS_BATCH_SIZE: usize = 50;

/// The `playlistItems` endpoint caps `maxResults` at this
const MAX_PAGE_SIZE: usize = 50;

/// Derive a channel's uploads playlist id from its channel id.
///
/// Channel ids start with "UC", the matching uploads playlist with "UU";
/// the rest of the identifier is shared.
pub fn uploads_playlist_id(channel_id: &str) -> Result<String> {
    if channel_id.chars().count() < 2 {
        return Err(LineupError::InvalidChannelId(channel_id.to_string()));
    }
    let suffix: String = channel_id.chars().skip(2).collect();
    Ok(format!("UU{}", suffix))
}

/// Convert an ISO 8601 duration ("PT1H2M10S") to total seconds.
///
/// Missing components count as zero; anything unparsable is zero.
pub fn parse_duration_secs(duration: &str) -> u64 {
    let re = regex::Regex::new(r"PT(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?")
        .expect("Invalid regex");

    let Some(caps) = re.captures(duration) else {
        return 0;
    };

    let part = |i: usize| {
        caps.get(i)
            .and_then(|m| m.as_str().parse::<u64>().ok())
            .unwrap_or(0)
    };

    part(1) * 3600 + part(2) * 60 + part(3)
}

/// Duration and view count attached to a video during enrichment
#[derive(Debug, Clone, Copy)]
pub struct VideoDetails {
    pub duration_secs: u64,
    pub view_count: Option<u64>,
}

/// Thin client over the two YouTube Data API endpoints the pipeline needs.
///
/// Holds the shared HTTP client and credential; share it by reference across
/// concurrent per-channel tasks.
pub struct YouTubeApi {
    http: reqwest::Client,
    api_key: String,
    api_base_url: String,
}

impl YouTubeApi {
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> Result<Self> {
        Self::with_base_url(api_key, DEFAULT_API_BASE, timeout)
    }

    /// Point the client at a different API host (a proxy or a mock server).
    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            api_key: api_key.into(),
            api_base_url: base_url.into(),
        })
    }

    /// Fail fast when no credential is configured.
    pub fn ensure_key(&self) -> Result<()> {
        if self.api_key.is_empty() {
            return Err(LineupError::MissingApiKey);
        }
        Ok(())
    }

    /// Fetch up to `limit` of the most recent uploads in a playlist.
    ///
    /// Items come back most-recent-first as the API returns them; no
    /// client-side re-sort happens here. Duration and view count stay unset
    /// until enrichment.
    pub async fn fetch_uploads(&self, playlist_id: &str, limit: usize) -> Result<Vec<Video>> {
        self.ensure_key()?;

        let url = format!(
            "{}/playlistItems?part=snippet&playlistId={}&maxResults={}&order=date&key={}",
            self.api_base_url,
            playlist_id,
            limit.min(MAX_PAGE_SIZE),
            self.api_key
        );

        let response = self.http.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(LineupError::Api {
                context: format!("playlist {}", playlist_id),
                status: response.status(),
            });
        }

        let data: PlaylistItemsResponse = response.json().await?;
        Ok(data.items.into_iter().map(map_playlist_item).collect())
    }

    /// Look up duration and view count for a set of video ids.
    ///
    /// Larger inputs run as consecutive batches of at most 50 ids. A failed
    /// batch is logged and contributes nothing; its videos simply stay
    /// unenriched and later batches still run.
    pub async fn fetch_details(
        &self,
        video_ids: &[String],
    ) -> Result<HashMap<String, VideoDetails>> {
        self.ensure_key()?;

        let mut details = HashMap::with_capacity(video_ids.len());
        for batch in video_ids.chunks(DETAILS_BATCH_SIZE) {
            match self.fetch_details_batch(batch).await {
                Ok(items) => details.extend(items),
                Err(e) => {
                    tracing::warn!(batch = batch.len(), error = %e, "video details batch failed");
                }
            }
        }
        Ok(details)
    }

    async fn fetch_details_batch(
        &self,
        video_ids: &[String],
    ) -> Result<Vec<(String, VideoDetails)>> {
        let url = format!(
            "{}/videos?part=contentDetails,statistics&id={}&key={}",
            self.api_base_url,
            video_ids.join(","),
            self.api_key
        );

        let response = self.http.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(LineupError::Api {
                context: format!("details for {} videos", video_ids.len()),
                status: response.status(),
            });
        }

        let data: VideosResponse = response.json().await?;
        Ok(data
            .items
            .into_iter()
            .map(|item| {
                let duration_secs = item
                    .content_details
                    .and_then(|c| c.duration)
                    .map(|d| parse_duration_secs(&d))
                    .unwrap_or(0);
                let view_count = item
                    .statistics
                    .and_then(|s| s.view_count)
                    .and_then(|v| v.parse().ok());
                (item.id, VideoDetails { duration_secs, view_count })
            })
            .collect())
    }
}

fn map_playlist_item(item: PlaylistItem) -> Video {
    Video {
        id: item.id,
        title: item.snippet.title,
        description: item.snippet.description,
        thumbnail: item.snippet.thumbnails.best_url(),
        channel_title: item.snippet.channel_title,
        channel_id: item.snippet.channel_id,
        published_at: item.snippet.published_at,
        video_id: item.snippet.resource_id.video_id,
        duration_secs: None,
        view_count: None,
    }
}

// ============================================
// API response models
// ============================================

#[derive(Debug, Deserialize)]
struct PlaylistItemsResponse {
    #[serde(default)]
    items: Vec<PlaylistItem>,
}

#[derive(Debug, Deserialize)]
struct PlaylistItem {
    id: String,
    snippet: PlaylistItemSnippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaylistItemSnippet {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    thumbnails: Thumbnails,
    #[serde(default)]
    channel_title: String,
    #[serde(default)]
    channel_id: String,
    published_at: DateTime<Utc>,
    resource_id: ResourceId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResourceId {
    video_id: String,
}

#[derive(Debug, Default, Deserialize)]
struct Thumbnails {
    default: Option<Thumbnail>,
    high: Option<Thumbnail>,
}

impl Thumbnails {
    /// The high-resolution variant when present, the default one otherwise
    fn best_url(&self) -> String {
        self.high
            .as_ref()
            .or(self.default.as_ref())
            .map(|t| t.url.clone())
            .unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    url: String,
}

#[derive(Debug, Deserialize)]
struct VideosResponse {
    #[serde(default)]
    items: Vec<VideoResource>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoResource {
    id: String,
    content_details: Option<VideoContentDetails>,
    statistics: Option<VideoStatistics>,
}

#[derive(Debug, Deserialize)]
struct VideoContentDetails {
    duration: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoStatistics {
    view_count: Option<String>,
}
