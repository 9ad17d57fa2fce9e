//! Channel lineup management
//!
//! The lineup lives in a plain text file, one "name<TAB>channel-id" per
//! line, and is read once at startup. Until the user builds their own, a
//! built-in lineup is used.

use crate::error::Result;
use crate::types::Channel;
use crate::utils::paths::{ensure_dir, get_channels_path, get_config_dir};
use std::path::Path;
use tokio::fs;

/// The out-of-the-box lineup
fn default_lineup() -> Vec<Channel> {
    [
        ("Mark Rober", "UCY1kMZp36IQSyNx_9h4mpCg"),
        ("Ryan Trahan", "UCnmGIkw-KdI0W5siakKPKog"),
        ("Crunchyroll Collection", "UCVi2lI40LetxLBKn-rtWC3A"),
        ("Crunchyroll", "UC6pGDc4bFGD1_36IKv3FnYg"),
        ("The Daily Show", "UCwWhs_6x42TyRM4Wstoq8HA"),
        ("BBC Earth", "UCwmZiChSryoWQCZMIQezgTg"),
    ]
    .into_iter()
    .map(|(name, id)| Channel {
        id: id.into(),
        name: name.into(),
    })
    .collect()
}

/// Parse lineup file contents
fn parse_channels(content: &str) -> Vec<Channel> {
    content
        .lines()
        .filter_map(|line| {
            let parts: Vec<&str> = line.splitn(2, '\t').collect();
            if parts.len() == 2 {
                Some(Channel {
                    name: parts[0].to_string(),
                    id: parts[1].to_string(),
                })
            } else {
                None
            }
        })
        .collect()
}

/// Load the lineup, falling back to the built-in one when no file exists
pub async fn load_channels() -> Result<Vec<Channel>> {
    let path = get_channels_path();

    if !Path::new(&path).exists() {
        return Ok(default_lineup());
    }

    let content = fs::read_to_string(&path).await?;
    Ok(parse_channels(&content))
}

/// Save the lineup to file
pub async fn save_channels(channels: &[Channel]) -> Result<()> {
    ensure_dir(&get_config_dir()).await?;

    let content: String = channels
        .iter()
        .map(|c| format!("{}\t{}", c.name, c.id))
        .collect::<Vec<_>>()
        .join("\n");

    fs::write(get_channels_path(), content).await?;
    Ok(())
}

/// Add a channel (replacing an existing entry with the same id)
pub async fn add_channel(channel: &Channel) -> Result<()> {
    let mut channels = load_channels().await?;

    channels.retain(|c| c.id != channel.id);
    channels.push(channel.clone());

    save_channels(&channels).await
}

/// Remove a channel by id
pub async fn remove_channel(id: &str) -> Result<()> {
    let mut channels = load_channels().await?;
    channels.retain(|c| c.id != id);
    save_channels(&channels).await
}
