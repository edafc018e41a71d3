//! Channel tools.

use super::{clamp_results, require_channel, ChannelArgs, ChannelListArgs, ToolContext};
use crate::error::{Result, YtDataError};
use crate::youtube::format::{compact, short_date, thousands, truncate};
use crate::youtube::models::Channel;
use crate::youtube::{channel_url, playlist_url, video_url, ChannelRef, SearchOrder, SearchRequest};

async fn resolve(ctx: &ToolContext, channel: &ChannelRef, parts: &str) -> Result<Channel> {
    ctx.client
        .resolve_channel(channel, parts)
        .await?
        .ok_or_else(|| {
            YtDataError::NotFound(format!(
                "Channel '{}' not found or is not accessible.",
                channel
            ))
        })
}

pub async fn get_channel_details(ctx: &ToolContext, args: ChannelArgs) -> Result<String> {
    let channel_ref = require_channel(&args.channel_input)?;
    let channel = resolve(
        ctx,
        &channel_ref,
        "snippet,statistics,contentDetails,brandingSettings",
    )
    .await?;

    let snippet = channel.snippet.clone().unwrap_or_default();
    let stats = channel.statistics.clone().unwrap_or_default();

    let subscribers = if stats.hidden_subscriber_count {
        "Hidden".to_string()
    } else {
        compact(stats.subscriber_count.unwrap_or(0))
    };
    let handle = snippet
        .custom_url
        .as_deref()
        .map(|h| format!("@{}", h.trim_start_matches('@')))
        .unwrap_or_else(|| "N/A".to_string());
    let description = snippet
        .description
        .as_deref()
        .filter(|d| !d.is_empty())
        .unwrap_or("No description available");

    Ok(format!(
        "YouTube Channel Details:\n\n\
         Name: {}\n\
         Handle: {}\n\
         Created: {}\n\n\
         Statistics:\n\
         - Subscribers: {}\n\
         - Total Videos: {}\n\
         - Total Views: {}\n\n\
         Description:\n{}\n\n\
         Channel ID: {}\n\
         Channel URL: {}\n",
        channel.title(),
        handle,
        short_date(snippet.published_at),
        subscribers,
        thousands(stats.video_count.unwrap_or(0)),
        compact(stats.view_count.unwrap_or(0)),
        truncate(description, 500),
        channel.id,
        channel_url(&channel.id),
    ))
}

pub async fn get_channel_videos(ctx: &ToolContext, args: ChannelListArgs) -> Result<String> {
    let channel_ref = require_channel(&args.channel_input)?;
    let channel = resolve(ctx, &channel_ref, "id,snippet").await?;

    let results = ctx
        .client
        .search(&SearchRequest {
            channel_id: Some(channel.id.clone()),
            order: SearchOrder::Date,
            max_results: clamp_results(args.max_results),
            ..Default::default()
        })
        .await?;

    if results.items.is_empty() {
        return Ok(format!(
            "No videos found for channel '{}' or channel has no public videos.",
            channel.title()
        ));
    }

    let total = results.total_results();
    let mut output = format!(
        "Recent Videos from YouTube Channel:\n\n\
         Channel: {}\n\
         Channel ID: {}\n\
         Showing: {} of {} videos\n\n\
         Recent Videos:\n",
        channel.title(),
        channel.id,
        results.items.len(),
        total
    );

    for (i, result) in results.items.iter().enumerate() {
        let snippet = result.snippet.clone().unwrap_or_default();
        let video_id = result.id.video_id.as_deref().unwrap_or("Unknown");
        let description = match snippet.description.as_deref().filter(|d| !d.is_empty()) {
            Some(d) => truncate(d, 100),
            None => "No description".to_string(),
        };

        output.push_str(&format!(
            "\n{}. {}\n   Published: {}\n   Description: {}\n   Video ID: {}\n   URL: {}\n",
            i + 1,
            snippet.title.as_deref().unwrap_or("Unknown Title"),
            short_date(snippet.published_at),
            description,
            video_id,
            video_url(video_id),
        ));
    }

    let shown = results.items.len() as u64;
    if total > shown {
        output.push_str(&format!("\n... and {} more videos available", total - shown));
    }
    output.push_str(&format!("\nChannel URL: {}", channel_url(&channel.id)));

    Ok(output)
}

pub async fn get_channel_playlists(ctx: &ToolContext, args: ChannelListArgs) -> Result<String> {
    let channel_ref = require_channel(&args.channel_input)?;
    let channel = resolve(ctx, &channel_ref, "id,snippet").await?;

    let playlists = ctx
        .client
        .channel_playlists(&channel.id, clamp_results(args.max_results))
        .await?;

    if playlists.items.is_empty() {
        return Ok(format!(
            "No public playlists found for channel '{}'. The channel may not have created any public playlists yet.",
            channel.title()
        ));
    }

    let total = playlists.total_results();
    let mut output = format!(
        "YouTube Channel Playlists:\n\n\
         Channel: {}\n\
         Channel ID: {}\n\
         Total Playlists: {}\n\
         Showing: {} playlists\n\n\
         Playlists:\n",
        channel.title(),
        channel.id,
        total,
        playlists.items.len()
    );

    for (i, playlist) in playlists.items.iter().enumerate() {
        let snippet = playlist.snippet.clone().unwrap_or_default();
        let video_count = playlist
            .content_details
            .as_ref()
            .and_then(|c| c.item_count)
            .map(|n| n.to_string())
            .unwrap_or_else(|| "Unknown".to_string());
        let description = match snippet.description.as_deref().filter(|d| !d.is_empty()) {
            Some(d) => truncate(d, 150),
            None => "No description".to_string(),
        };

        output.push_str(&format!(
            "\n{}. {}\n   Created: {}\n   Videos: {}\n   Description: {}\n   Playlist ID: {}\n   URL: {}\n",
            i + 1,
            snippet.title.as_deref().unwrap_or("Unknown Title"),
            short_date(snippet.published_at),
            video_count,
            description,
            playlist.id,
            playlist_url(&playlist.id),
        ));
    }

    let shown = playlists.items.len() as u64;
    if total > shown {
        output.push_str(&format!(
            "\n... and {} more playlists available",
            total - shown
        ));
    }
    output.push_str(&format!("\n\nChannel URL: {}", channel_url(&channel.id)));
    output.push_str(
        "\n\nNote: Only public playlists are shown. Private playlists are not accessible via the API.",
    );

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::super::testing::mock_context;
    use super::*;
    use crate::test_support::MockResponse;
    use serde_json::json;

    const CHANNEL_ID: &str = "UC_x5XG1OV2P6uZZ5FSM9Ttw";

    fn channel_json() -> serde_json::Value {
        json!({
            "id": CHANNEL_ID,
            "snippet": {
                "title": "Google for Developers",
                "customUrl": "@googledevelopers",
                "publishedAt": "2007-08-23T00:34:43Z",
                "description": "Developer news."
            },
            "statistics": {"viewCount": "250000000", "subscriberCount": "2410000", "videoCount": "6200", "hiddenSubscriberCount": false}
        })
    }

    #[tokio::test]
    async fn test_channel_details_by_handle() {
        let (mock, ctx) = mock_context(|_| MockResponse::json(json!({"items": [channel_json()]}))).await;
        let text = get_channel_details(
            &ctx,
            ChannelArgs {
                channel_input: "@googledevelopers".to_string(),
            },
        )
        .await
        .unwrap();

        assert_eq!(mock.requests()[0].param("forHandle"), Some("googledevelopers"));
        assert!(text.contains("Name: Google for Developers\nHandle: @googledevelopers\n"));
        assert!(text.contains("- Subscribers: 2.4M\n- Total Videos: 6,200\n- Total Views: 250.0M"));
        assert!(text.contains(&format!("Channel URL: https://www.youtube.com/channel/{}", CHANNEL_ID)));
    }

    #[tokio::test]
    async fn test_hidden_subscribers() {
        let (_mock, ctx) = mock_context(|_| {
            MockResponse::json(json!({"items": [{
                "id": CHANNEL_ID,
                "snippet": {"title": "Quiet"},
                "statistics": {"hiddenSubscriberCount": true, "videoCount": "3"}
            }]}))
        })
        .await;

        let text = get_channel_details(
            &ctx,
            ChannelArgs {
                channel_input: CHANNEL_ID.to_string(),
            },
        )
        .await
        .unwrap();
        assert!(text.contains("- Subscribers: Hidden"));
        assert!(text.contains("Handle: N/A"));
    }

    #[tokio::test]
    async fn test_unknown_channel() {
        let (_mock, ctx) = mock_context(|_| MockResponse::json(json!({"items": []}))).await;
        let err = get_channel_details(
            &ctx,
            ChannelArgs {
                channel_input: "@nobody".to_string(),
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.to_string(), "Channel '@nobody' not found or is not accessible.");
    }

    #[tokio::test]
    async fn test_channel_videos_searches_by_date() {
        let (mock, ctx) = mock_context(|req| match req.endpoint() {
            "channels" => MockResponse::json(json!({"items": [channel_json()]})),
            _ => MockResponse::json(json!({
                "pageInfo": {"totalResults": 6200},
                "items": [{"id": {"videoId": "aaaaaaaaaaa"}, "snippet": {"title": "Latest", "publishedAt": "2024-05-01T00:00:00Z"}}]
            })),
        })
        .await;

        let text = get_channel_videos(
            &ctx,
            ChannelListArgs {
                channel_input: format!("https://www.youtube.com/channel/{}", CHANNEL_ID),
                max_results: 1,
            },
        )
        .await
        .unwrap();

        let search = &mock.requests_to("search")[0];
        assert_eq!(search.param("channelId"), Some(CHANNEL_ID));
        assert_eq!(search.param("order"), Some("date"));
        assert_eq!(search.param("type"), Some("video"));
        assert!(text.contains("Showing: 1 of 6200 videos"));
        assert!(text.contains("1. Latest\n   Published: 2024-05-01\n   Description: No description"));
        assert!(text.contains("... and 6199 more videos available"));
    }

    #[tokio::test]
    async fn test_channel_playlists() {
        let (mock, ctx) = mock_context(|req| match req.endpoint() {
            "channels" => MockResponse::json(json!({"items": [channel_json()]})),
            _ => MockResponse::json(json!({
                "items": [{"id": "PLabc", "snippet": {"title": "Shows"}, "contentDetails": {"itemCount": 7}}]
            })),
        })
        .await;

        let text = get_channel_playlists(
            &ctx,
            ChannelListArgs {
                channel_input: CHANNEL_ID.to_string(),
                max_results: 10,
            },
        )
        .await
        .unwrap();

        assert_eq!(mock.requests_to("playlists")[0].param("channelId"), Some(CHANNEL_ID));
        assert!(text.contains("1. Shows\n   Created: Unknown\n   Videos: 7\n"));
        assert!(text.contains("URL: https://www.youtube.com/playlist?list=PLabc"));
        assert!(text.ends_with("Private playlists are not accessible via the API."));
    }
}
