//! Video-level tools: details, engagement, search, trending and categories.

use super::{
    clamp_results, require_video_id, RegionArgs, SearchArgs, ToolContext, TrendingArgs, VideoArgs,
};
use crate::analysis::{age_in_days, EngagementMetrics};
use crate::error::{Result, YtDataError};
use crate::youtube::format::{
    capitalize, compact, display_duration, short_date, thousands, truncate,
};
use crate::youtube::models::Video;
use crate::youtube::{video_url, SearchOrder, SearchRequest};
use chrono::Utc;
use std::collections::HashMap;
use tracing::warn;

const DESCRIPTION_CHARS: usize = 500;
const LISTING_DESCRIPTION_CHARS: usize = 150;

fn video_not_found(video_id: &str) -> YtDataError {
    YtDataError::NotFound(format!(
        "Video with ID '{}' not found or is not accessible.",
        video_id
    ))
}

pub async fn get_video_details(ctx: &ToolContext, args: VideoArgs) -> Result<String> {
    let video_id = require_video_id(&args.video_input)?;
    let video = ctx
        .client
        .video(&video_id, "snippet,statistics,contentDetails,status")
        .await?
        .ok_or_else(|| video_not_found(&video_id))?;

    let snippet = video.snippet.clone().unwrap_or_default();
    let stats = video.stats();
    let status = video.status.clone().unwrap_or_default();
    let description = snippet
        .description
        .as_deref()
        .filter(|d| !d.is_empty())
        .unwrap_or("No description available");

    Ok(format!(
        "YouTube Video Details:\n\n\
         Title: {}\n\
         Channel: {}\n\
         Published: {}\n\
         Duration: {}\n\n\
         Statistics:\n\
         - Views: {}\n\
         - Likes: {}\n\
         - Comments: {}\n\n\
         Status: {}\n\
         License: {}\n\n\
         Description:\n{}\n\n\
         Video ID: {}\n\
         Video URL: {}\n",
        snippet.title.as_deref().unwrap_or("Unknown"),
        snippet.channel_title.as_deref().unwrap_or("Unknown"),
        short_date(snippet.published_at),
        display_duration(video.duration()),
        thousands(stats.views()),
        thousands(stats.likes()),
        thousands(stats.comments()),
        capitalize(status.privacy_status.as_deref().unwrap_or("unknown")),
        status.license.as_deref().unwrap_or("Unknown"),
        truncate(description, DESCRIPTION_CHARS),
        video_id,
        video_url(&video_id),
    ))
}

pub async fn analyze_video_engagement(ctx: &ToolContext, args: VideoArgs) -> Result<String> {
    let video_id = require_video_id(&args.video_input)?;
    let video = ctx
        .client
        .video(&video_id, "snippet,statistics,contentDetails")
        .await?
        .ok_or_else(|| video_not_found(&video_id))?;

    let snippet = video.snippet.clone().unwrap_or_default();
    let stats = video.stats();
    let metrics = EngagementMetrics::compute(
        stats.views(),
        stats.likes(),
        stats.comments(),
        age_in_days(video.published_at(), Utc::now()),
    );

    let mut output = format!(
        "YouTube Video Engagement Analysis:\n\n\
         Video: {}\n\
         Channel: {}\n\
         Published: {}\n\
         Duration: {}\n\n\
         📊 Core Metrics:\n\
         - Views: {}\n\
         - Likes: {}\n\
         - Comments: {}\n\n\
         🎯 Engagement Rates:\n\
         - Like Rate: {:.2}% ({} likes)\n\
         - Comment Rate: {:.2}% ({} comments)\n\
         - Total Engagement Rate: {:.2}%\n\n\
         📈 Performance Assessment:\n\
         - Overall Engagement: {}\n",
        video.title(),
        snippet.channel_title.as_deref().unwrap_or("Unknown Channel"),
        short_date(snippet.published_at),
        display_duration(video.duration()),
        compact(metrics.views),
        compact(metrics.likes),
        compact(metrics.comments),
        metrics.like_rate,
        thousands(metrics.likes),
        metrics.comment_rate,
        thousands(metrics.comments),
        metrics.engagement_rate,
        metrics.tier().label(),
    );

    if let Some(age) = metrics.age_days {
        let per_day = metrics
            .views_per_day
            .map(|v| compact(v as u64))
            .unwrap_or_else(|| "Unknown".to_string());
        output.push_str(&format!(
            "\n⏰ Time Analysis:\n- Video Age: {} days\n- Average Views/Day: {}\n",
            age, per_day
        ));
    }

    output.push_str("\n\n🔍 Insights:\n");
    for insight in metrics.insights() {
        output.push_str(&format!("- {}\n", insight));
    }

    output.push_str(&format!(
        "\n\nVideo ID: {}\nURL: {}\n\n\
         Note: Engagement benchmarks are based on general industry averages and may vary by niche.",
        video_id,
        video_url(&video_id)
    ));

    Ok(output)
}

pub async fn search_videos(ctx: &ToolContext, args: SearchArgs) -> Result<String> {
    let query = args.query.trim();
    if query.is_empty() {
        return Err(YtDataError::InvalidInput(
            "Search query cannot be empty. Please provide keywords to search for.".to_string(),
        ));
    }

    let order = SearchOrder::parse_lenient(&args.order);
    let results = ctx
        .client
        .search(&SearchRequest {
            query: Some(query.to_string()),
            order,
            max_results: clamp_results(args.max_results),
            safe_search: Some("moderate"),
            ..Default::default()
        })
        .await?;

    if results.items.is_empty() {
        return Ok(format!(
            "No videos found for search query: '{}'. Try different keywords or check spelling.",
            args.query
        ));
    }

    let total = results.total_results();
    let ids: Vec<&str> = results
        .items
        .iter()
        .filter_map(|r| r.id.video_id.as_deref())
        .collect();

    // Durations and view counts are a nicety; the search results stand alone.
    let details: HashMap<String, Video> = if ids.is_empty() {
        HashMap::new()
    } else {
        match ctx.client.videos(&ids, "contentDetails,statistics").await {
            Ok(list) => list.items.into_iter().map(|v| (v.id.clone(), v)).collect(),
            Err(e) => {
                warn!(error = %e, "Could not fetch search result details");
                HashMap::new()
            }
        }
    };

    let mut output = format!(
        "YouTube Video Search Results:\n\n\
         Query: \"{}\"\n\
         Sort Order: {}\n\
         Showing: {} of {} results\n\n\
         Videos:\n",
        args.query,
        capitalize(order.as_str()),
        results.items.len(),
        thousands(total),
    );

    for (i, result) in results.items.iter().enumerate() {
        let snippet = result.snippet.clone().unwrap_or_default();
        let video_id = result.id.video_id.as_deref().unwrap_or("Unknown");
        let detail = details.get(video_id);
        let views = detail.map(|v| v.stats().views()).unwrap_or(0);
        let view_display = if views > 0 {
            format!("{} views", compact(views))
        } else {
            "Views: N/A".to_string()
        };

        output.push_str(&format!(
            "\n{}. {}\n   Channel: {}\n   Published: {}\n   Duration: {}\n   {}\n   Description: {}\n   Video ID: {}\n   URL: {}\n",
            i + 1,
            snippet.title.as_deref().unwrap_or("Unknown Title"),
            snippet.channel_title.as_deref().unwrap_or("Unknown"),
            short_date(snippet.published_at),
            display_duration(detail.and_then(|v| v.duration())),
            view_display,
            listing_description(snippet.description.as_deref()),
            video_id,
            video_url(video_id),
        ));
    }

    let shown = results.items.len() as u64;
    if total > shown {
        output.push_str(&format!(
            "\n... and {} more results available",
            thousands(total - shown)
        ));
    }

    output.push_str(
        "\n\nSearch Tips:\n\
         - Try different keywords for more results\n\
         - Use order='date' for newest videos\n\
         - Use order='viewCount' for most popular videos",
    );

    Ok(output)
}

pub async fn get_trending_videos(ctx: &ToolContext, args: TrendingArgs) -> Result<String> {
    let region = ctx.region(args.region_code);
    let trending = ctx
        .client
        .most_popular(&region, clamp_results(args.max_results))
        .await?;

    if trending.items.is_empty() {
        return Ok(format!("No trending videos found for region: {}", region));
    }

    let mut output = format!(
        "Trending YouTube Videos - {}:\n\nShowing: {} trending videos\n\nVideos:\n",
        region,
        trending.items.len()
    );

    for (i, video) in trending.items.iter().enumerate() {
        let snippet = video.snippet.clone().unwrap_or_default();
        let stats = video.stats();
        output.push_str(&format!(
            "\n{}. {}\n   Channel: {}\n   Published: {}\n   Duration: {}\n   {} views | {} likes\n   Description: {}\n   Video ID: {}\n   URL: {}\n",
            i + 1,
            video.title(),
            snippet.channel_title.as_deref().unwrap_or("Unknown"),
            short_date(snippet.published_at),
            display_duration(video.duration()),
            compact(stats.views()),
            compact(stats.likes()),
            listing_description(snippet.description.as_deref()),
            video.id,
            video_url(&video.id),
        ));
    }

    output.push_str("\n\nNote: Trending videos are updated regularly and vary by region.");
    Ok(output)
}

pub async fn get_video_categories(ctx: &ToolContext, args: RegionArgs) -> Result<String> {
    let region = ctx.region(args.region_code);
    let categories = ctx.client.video_categories(&region).await?;

    if categories.items.is_empty() {
        return Ok(format!("No video categories found for region: {}", region));
    }

    let mut output = format!(
        "YouTube Video Categories - {}:\n\nTotal Categories: {}\n\nCategories:\n",
        region,
        categories.items.len()
    );

    for category in &categories.items {
        let snippet = category.snippet.clone().unwrap_or_default();
        let status = if snippet.assignable.unwrap_or(true) {
            "✅ Assignable"
        } else {
            "❌ Not assignable"
        };
        output.push_str(&format!(
            "\n{}: {} ({})",
            category.id,
            snippet.title.as_deref().unwrap_or("Unknown"),
            status
        ));
    }

    output.push_str(
        "\n\nNote: Assignable categories can be used when uploading videos.\n\
         Non-assignable categories are for YouTube's internal classification.\n",
    );
    Ok(output)
}

fn listing_description(description: Option<&str>) -> String {
    match description.filter(|d| !d.is_empty()) {
        Some(d) => truncate(d, LISTING_DESCRIPTION_CHARS),
        None => "No description".to_string(),
    }
}
