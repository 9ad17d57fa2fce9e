//! Core modules: YouTube API client and the feed pipeline

pub mod feed;
pub mod youtube;
