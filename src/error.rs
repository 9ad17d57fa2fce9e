//! Error types for yt-lineup

use thiserror::Error;

/// Main error type for yt-lineup
#[derive(Error, Debug)]
pub enum LineupError {
    #[error("Invalid channel id: {0:?}")]
    InvalidChannelId(String),

    #[error("YouTube API key is not set. Add it to config.json or export YOUTUBE_API_KEY.")]
    MissingApiKey,

    #[error("YouTube API error {status} for {context}")]
    Api {
        context: String,
        status: reqwest::StatusCode,
    },

    #[error("File error: {0}")]
    File(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LineupError>;
