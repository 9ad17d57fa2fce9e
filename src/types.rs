//! Type definitions for yt-lineup
//!
//! Source of truth for all data structures.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================
// Video Types
// ============================================

/// A video from a channel's uploads playlist.
///
/// Fresh from the playlist listing, `duration_secs` and `view_count` are
/// `None`; enrichment fills them in. `None` means "never fetched", which is
/// not the same as zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Video {
    /// Playlist item id
    pub id: String,
    pub title: String,
    pub description: String,
    /// URL of the best thumbnail variant on offer
    pub thumbnail: String,
    pub channel_title: String,
    pub channel_id: String,
    /// Publish instant as reported by the API
    pub published_at: DateTime<Utc>,
    /// The watchable video id, used for playback URLs and detail lookups
    pub video_id: String,
    /// Total length in seconds, present once enriched
    pub duration_secs: Option<u64>,
    /// View count, present once enriched and only if the API reported one
    pub view_count: Option<u64>,
}

impl Video {
    /// Watch URL for this video
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.video_id)
    }
}

// ============================================
// Channel Types
// ============================================

/// A channel in the lineup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    /// UC-prefixed channel id
    pub id: String,
    /// Display name, also used when the API omits one
    pub name: String,
}

// ============================================
// Config Types
// ============================================

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// YouTube Data API key (empty = take it from $YOUTUBE_API_KEY)
    pub api_key: String,
    /// Uploads fetched per channel (default: 20)
    pub per_channel_limit: usize,
    /// Shortlist size per channel for --popular (default: 3)
    pub popular_count: usize,
    /// Request timeout in seconds (default: 10)
    pub request_timeout_secs: u64,
    /// Editor command (default: "nvim")
    pub editor: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            per_channel_limit: 20,
            popular_count: 3,
            request_timeout_secs: 10,
            editor: "nvim".into(),
        }
    }
}
