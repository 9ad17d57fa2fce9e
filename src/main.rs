//! yt-lineup - your channels' latest uploads in one terminal feed
//!
//! A distraction-free CLI that aggregates the recent uploads of a fixed
//! channel lineup, filters out Shorts, and shows them newest-first or as
//! per-channel most-viewed shortlists.

use std::time::Duration;

use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use yt_lineup::core::feed;
use yt_lineup::core::youtube::{self, YouTubeApi};
use yt_lineup::storage::{channels, config};
use yt_lineup::types::{Channel, Video};
use yt_lineup::utils::paths::ensure_app_dirs;

/// Your channels' latest uploads in one terminal feed. Clean and distraction-free.
#[derive(Parser, Debug)]
#[command(name = "yt-lineup")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Show each channel's most viewed recent uploads instead of the feed
    #[arg(short, long)]
    popular: bool,

    /// Show the feed and the popular shortlists together
    #[arg(short, long)]
    overview: bool,

    /// Only show videos from this channel id
    #[arg(short, long, value_name = "CHANNEL_ID")]
    channel: Option<String>,

    /// Uploads fetched per channel
    #[arg(short, long)]
    limit: Option<usize>,

    /// Print the items as JSON instead of the interactive list
    #[arg(long)]
    json: bool,

    /// Add a channel to the lineup
    #[arg(short, long, num_args = 2, value_names = ["NAME", "CHANNEL_ID"])]
    subscribe: Option<Vec<String>>,

    /// Remove a channel from the lineup by id
    #[arg(short, long, value_name = "CHANNEL_ID")]
    unsubscribe: Option<String>,

    /// List the lineup
    #[arg(long)]
    channels: bool,

    /// Edit the configuration file
    #[arg(short, long)]
    edit: bool,
}

/// Format seconds as "3:45" or "1:23:45"
fn format_duration(total: u64) -> String {
    let (hours, minutes, seconds) = (total / 3600, (total % 3600) / 60, total % 60);
    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{}:{:02}", minutes, seconds)
    }
}

/// Format a video for display in the list
fn format_video_label(video: &Video) -> String {
    let duration = video
        .duration_secs
        .map(format_duration)
        .unwrap_or_else(|| "?".into());
    format!(
        "{} {} {} - {}",
        video.published_at.format("%Y-%m-%d").to_string().dimmed(),
        video.title,
        format!("[{}]", duration).dimmed(),
        video.channel_title.cyan()
    )
}

/// Print a non-interactive section of videos
fn print_section(title: &str, videos: &[Video]) {
    println!("\n{}", title.bold());
    if videos.is_empty() {
        println!("  {}", "No videos to show.".yellow());
        return;
    }
    for video in videos {
        println!("  {}", format_video_label(video));
    }
}

/// Spinner shown while a build is in flight
fn build_spinner(message: &'static str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Ensure app directories exist
    ensure_app_dirs().await?;

    // Handle --edit flag
    if cli.edit {
        let cfg = config::load_config().await?;
        config::edit_config(&cfg.editor).await?;
        return Ok(());
    }

    // Lineup management
    if let Some(pair) = &cli.subscribe {
        let channel = Channel {
            name: pair[0].clone(),
            id: pair[1].clone(),
        };
        // Reject ids the playlist resolver cannot handle
        youtube::uploads_playlist_id(&channel.id)?;
        channels::add_channel(&channel).await?;
        println!("{} Subscribed to {}", "✓".green(), channel.name.cyan());
        return Ok(());
    }
    if let Some(id) = &cli.unsubscribe {
        channels::remove_channel(id).await?;
        println!("{} Unsubscribed {}", "✓".green(), id);
        return Ok(());
    }

    let lineup = channels::load_channels().await?;
    if cli.channels {
        for channel in &lineup {
            println!("{}\t{}", channel.name.cyan(), channel.id);
        }
        return Ok(());
    }

    // Load config and build the API client
    let cfg = config::load_config().await?;
    let api = YouTubeApi::new(
        cfg.api_key.clone(),
        Duration::from_secs(cfg.request_timeout_secs),
    )?;
    let limit = cli.limit.unwrap_or(cfg.per_channel_limit);

    if cli.overview {
        let spinner = build_spinner("Fetching uploads...");
        let (feed_result, popular_result) = tokio::join!(
            feed::build_feed(&api, &lineup, limit),
            feed::build_popular(&api, &lineup, limit, cfg.popular_count),
        );
        spinner.finish_and_clear();

        print_section("Latest uploads", &feed_result?);
        print_section("Popular right now", &popular_result?);
        return Ok(());
    }

    let spinner = build_spinner("Fetching uploads...");
    let result = if cli.popular {
        feed::build_popular(&api, &lineup, limit, cfg.popular_count).await
    } else {
        feed::build_feed(&api, &lineup, limit).await
    };
    spinner.finish_and_clear();
    let mut videos = result?;

    if let Some(channel_id) = &cli.channel {
        videos.retain(|v| &v.channel_id == channel_id);
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&videos)?);
        return Ok(());
    }

    if videos.is_empty() {
        println!("{}", "No videos to show.".yellow());
        return Ok(());
    }

    // Pick a video, get its URL
    let labels: Vec<String> = videos.iter().map(format_video_label).collect();
    let prompt = if cli.popular {
        "Popular uploads"
    } else {
        "Latest uploads"
    };
    let selection = dialoguer::Select::new()
        .with_prompt(prompt)
        .items(&labels)
        .default(0)
        .interact_opt()?;

    if let Some(index) = selection {
        let video = &videos[index];
        println!("{} {}", "Video URL:".green(), video.watch_url());
    }

    Ok(())
}
