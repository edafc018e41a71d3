//! Playlist tools.

use super::{clamp_results, require_playlist_id, PlaylistArgs, PlaylistItemsArgs, ToolContext};
use crate::error::{Result, YtDataError};
use crate::youtube::format::{capitalize, short_date, truncate};
use crate::youtube::{playlist_url, video_url};

pub async fn get_playlist_details(ctx: &ToolContext, args: PlaylistArgs) -> Result<String> {
    let playlist_id = require_playlist_id(&args.playlist_input)?;
    let playlist = ctx.client.playlist(&playlist_id).await?.ok_or_else(|| {
        YtDataError::NotFound(format!(
            "Playlist with ID '{}' not found or is not accessible.",
            playlist_id
        ))
    })?;

    let snippet = playlist.snippet.unwrap_or_default();
    let privacy = playlist
        .status
        .and_then(|s| s.privacy_status)
        .unwrap_or_else(|| "unknown".to_string());
    let video_count = playlist
        .content_details
        .and_then(|c| c.item_count)
        .map(|n| n.to_string())
        .unwrap_or_else(|| "Unknown".to_string());
    let description = snippet
        .description
        .as_deref()
        .filter(|d| !d.is_empty())
        .unwrap_or("No description available");

    Ok(format!(
        "YouTube Playlist Details:\n\n\
         Title: {}\n\
         Channel: {}\n\
         Created: {}\n\
         Video Count: {}\n\n\
         Privacy Status: {}\n\n\
         Description:\n{}\n\n\
         Playlist ID: {}\n\
         Playlist URL: {}\n",
        snippet.title.as_deref().unwrap_or("Unknown"),
        snippet.channel_title.as_deref().unwrap_or("Unknown"),
        short_date(snippet.published_at),
        video_count,
        capitalize(&privacy),
        truncate(description, 500),
        playlist_id,
        playlist_url(&playlist_id),
    ))
}

pub async fn get_playlist_items(ctx: &ToolContext, args: PlaylistItemsArgs) -> Result<String> {
    let playlist_id = require_playlist_id(&args.playlist_input)?;
    let items = ctx
        .client
        .playlist_items(&playlist_id, clamp_results(args.max_results))
        .await?;

    if items.items.is_empty() {
        return Err(YtDataError::NotFound(format!(
            "Playlist with ID '{}' not found, is empty, or is not accessible.",
            playlist_id
        )));
    }

    let total = items.total_results();
    let mut output = format!(
        "YouTube Playlist Items:\n\n\
         Playlist ID: {}\n\
         Total Videos: {}\n\
         Showing: {} videos\n\n\
         Videos:\n",
        playlist_id,
        total,
        items.items.len()
    );

    for (i, item) in items.items.iter().enumerate() {
        let snippet = item.snippet.clone().unwrap_or_default();
        let video_id = snippet
            .resource_id
            .as_ref()
            .and_then(|r| r.video_id.as_deref())
            .unwrap_or("Unknown");
        let channel = snippet
            .video_owner_channel_title
            .as_deref()
            .or(snippet.channel_title.as_deref())
            .unwrap_or("Unknown");

        output.push_str(&format!(
            "\n{}. {}\n   Channel: {}\n   Published: {}\n   Video ID: {}\n   URL: {}\n",
            i + 1,
            snippet.title.as_deref().unwrap_or("Unknown Title"),
            channel,
            short_date(snippet.published_at),
            video_id,
            video_url(video_id),
        ));
    }

    let shown = items.items.len() as u64;
    if total > shown {
        output.push_str(&format!("\n... and {} more videos", total - shown));
    }

    Ok(output)
}
