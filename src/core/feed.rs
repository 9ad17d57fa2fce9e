//! Feed assembly and popularity ranking
//!
//! Fans the upload fetch out across the lineup, enriches items with duration
//! and view count, drops Shorts, and produces the two lists the UI renders.

use crate::core::youtube::{self, VideoDetails, YouTubeApi};
use crate::error::Result;
use crate::types::{Channel, Video};
use futures::stream::{self, StreamExt};
use std::collections::HashMap;

/// How many channels are fetched at once
const CHANNEL_CONCURRENCY: usize = 5;

/// Minimum length for a video to count as a regular upload
const MIN_REGULAR_SECS: u64 = 60;

/// Fetch one channel's recent uploads, tagging items with the lineup name
/// when the API response leaves the channel title blank.
async fn fetch_channel_uploads(
    api: &YouTubeApi,
    channel: &Channel,
    limit: usize,
) -> Result<Vec<Video>> {
    let playlist_id = youtube::uploads_playlist_id(&channel.id)?;
    let mut videos = api.fetch_uploads(&playlist_id, limit).await?;
    for video in &mut videos {
        if video.channel_title.is_empty() {
            video.channel_title = channel.name.clone();
        }
    }
    Ok(videos)
}

/// Attach fetched details to their videos; videos without an entry keep
/// `None` in both fields.
fn merge_details(videos: &mut [Video], details: &HashMap<String, VideoDetails>) {
    for video in videos.iter_mut() {
        if let Some(d) = details.get(&video.video_id) {
            video.duration_secs = Some(d.duration_secs);
            video.view_count = d.view_count;
        }
    }
}

/// Drop Shorts: anything titled "shorts", anything under a minute, and
/// anything whose length is unknown. Order is preserved.
pub fn filter_shorts(videos: Vec<Video>) -> Vec<Video> {
    videos
        .into_iter()
        .filter(|v| {
            // Matches anywhere in the title, not just a trailing #Shorts tag
            if v.title.to_lowercase().contains("shorts") {
                return false;
            }
            match v.duration_secs {
                Some(secs) => secs >= MIN_REGULAR_SECS,
                None => false,
            }
        })
        .collect()
}

/// Rank filtered uploads by view count and keep the top `top_n`.
///
/// Videos whose view count never arrived are not ranked; ties keep their
/// incoming order.
fn top_by_views(videos: Vec<Video>, top_n: usize) -> Vec<Video> {
    let mut ranked: Vec<Video> = videos
        .into_iter()
        .filter(|v| v.view_count.is_some())
        .collect();
    ranked.sort_by(|a, b| b.view_count.cmp(&a.view_count));
    ranked.truncate(top_n);
    ranked
}

/// Build the unified feed: recent uploads from every lineup channel,
/// enriched, Shorts removed, newest first.
///
/// A failing channel is logged and contributes nothing; the rest of the
/// lineup still goes through.
pub async fn build_feed(
    api: &YouTubeApi,
    channels: &[Channel],
    per_channel: usize,
) -> Result<Vec<Video>> {
    api.ensure_key()?;

    let fetched: Vec<Vec<Video>> = stream::iter(channels)
        .map(|channel| async move {
            match fetch_channel_uploads(api, channel, per_channel).await {
                Ok(videos) => videos,
                Err(e) => {
                    tracing::warn!(channel = %channel.name, error = %e, "skipping channel");
                    Vec::new()
                }
            }
        })
        .buffered(CHANNEL_CONCURRENCY)
        .collect()
        .await;
    let mut all: Vec<Video> = fetched.into_iter().flatten().collect();

    // One enrichment pass over the whole lineup; batching happens inside
    let video_ids: Vec<String> = all.iter().map(|v| v.video_id.clone()).collect();
    let details = api.fetch_details(&video_ids).await?;
    merge_details(&mut all, &details);

    let mut feed = filter_shorts(all);
    feed.sort_by(|a, b| b.published_at.cmp(&a.published_at));
    Ok(feed)
}

/// One channel's most viewed recent uploads, Shorts excluded.
async fn channel_top_videos(
    api: &YouTubeApi,
    channel: &Channel,
    per_channel: usize,
    top_n: usize,
) -> Result<Vec<Video>> {
    let mut videos = fetch_channel_uploads(api, channel, per_channel).await?;

    let video_ids: Vec<String> = videos.iter().map(|v| v.video_id.clone()).collect();
    let details = api.fetch_details(&video_ids).await?;
    merge_details(&mut videos, &details);

    Ok(top_by_views(filter_shorts(videos), top_n))
}

/// Build the per-channel shortlists: each lineup channel's `top_n` most
/// viewed recent uploads, concatenated in lineup order.
///
/// Channels are never ranked against each other, and a failing channel is
/// logged and skipped just like in [`build_feed`].
pub async fn build_popular(
    api: &YouTubeApi,
    channels: &[Channel],
    per_channel: usize,
    top_n: usize,
) -> Result<Vec<Video>> {
    api.ensure_key()?;

    let shortlists: Vec<Vec<Video>> = stream::iter(channels)
        .map(|channel| async move {
            match channel_top_videos(api, channel, per_channel, top_n).await {
                Ok(videos) => videos,
                Err(e) => {
                    tracing::warn!(channel = %channel.name, error = %e, "skipping channel");
                    Vec::new()
                }
            }
        })
        .buffered(CHANNEL_CONCURRENCY)
        .collect()
        .await;

    Ok(shortlists.into_iter().flatten().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn video(title: &str, duration_secs: Option<u64>, view_count: Option<u64>) -> Video {
        Video {
            id: format!("pl-{}", title),
            title: title.to_string(),
            description: String::new(),
            thumbnail: String::new(),
            channel_title: "Channel".into(),
            channel_id: "UCx".into(),
            published_at: Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap(),
            video_id: format!("v-{}", title),
            duration_secs,
            view_count,
        }
    }

    #[test]
    fn filter_drops_shorts_by_title_even_when_long() {
        let kept = filter_shorts(vec![video("Cool trick #Shorts", Some(120), None)]);
        assert!(kept.is_empty());
    }

    #[test]
    fn filter_drops_under_a_minute() {
        let kept = filter_shorts(vec![video("Quick cut", Some(45), None)]);
        assert!(kept.is_empty());
    }

    #[test]
    fn filter_drops_unknown_duration() {
        let kept = filter_shorts(vec![video("Mystery length", None, None)]);
        assert!(kept.is_empty());
    }

    #[test]
    fn filter_keeps_exactly_sixty_seconds() {
        let kept = filter_shorts(vec![video("One minute exactly", Some(60), None)]);
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn filter_preserves_order() {
        let kept = filter_shorts(vec![
            video("First", Some(100), None),
            video("Skip me #shorts", Some(100), None),
            video("Second", Some(200), None),
        ]);
        let titles: Vec<&str> = kept.iter().map(|v| v.title.as_str()).collect();
        assert_eq!(titles, ["First", "Second"]);
    }

    #[test]
    fn merge_leaves_unlisted_videos_untouched() {
        let mut videos = vec![video("Known", None, None), video("Unknown", None, None)];
        let mut details = HashMap::new();
        details.insert(
            "v-Known".to_string(),
            VideoDetails {
                duration_secs: 90,
                view_count: Some(7),
            },
        );

        merge_details(&mut videos, &details);

        assert_eq!(videos[0].duration_secs, Some(90));
        assert_eq!(videos[0].view_count, Some(7));
        assert_eq!(videos[1].duration_secs, None);
        assert_eq!(videos[1].view_count, None);
    }

    #[test]
    fn merge_keeps_omitted_view_count_absent() {
        let mut videos = vec![video("Counted out", None, None)];
        let mut details = HashMap::new();
        details.insert(
            "v-Counted out".to_string(),
            VideoDetails {
                duration_secs: 300,
                view_count: None,
            },
        );

        merge_details(&mut videos, &details);

        assert_eq!(videos[0].duration_secs, Some(300));
        assert_eq!(videos[0].view_count, None);
    }

    #[test]
    fn top_by_views_ranks_and_truncates() {
        let videos = vec![
            video("a", Some(120), Some(10)),
            video("b", Some(120), Some(50)),
            video("c", Some(120), Some(5)),
            video("d", Some(120), Some(100)),
            video("e", Some(120), Some(20)),
        ];

        let top = top_by_views(videos, 3);
        let counts: Vec<u64> = top.iter().map(|v| v.view_count.unwrap()).collect();
        assert_eq!(counts, [100, 50, 20]);
    }

    #[test]
    fn top_by_views_skips_missing_counts() {
        let videos = vec![
            video("counted", Some(120), Some(1)),
            video("uncounted", Some(120), None),
        ];

        let top = top_by_views(videos, 3);
        let titles: Vec<&str> = top.iter().map(|v| v.title.as_str()).collect();
        assert_eq!(titles, ["counted"]);
    }

    #[test]
    fn top_by_views_fewer_than_requested() {
        let videos = vec![video("only one", Some(120), Some(9))];
        assert_eq!(top_by_views(videos, 3).len(), 1);
    }
}
