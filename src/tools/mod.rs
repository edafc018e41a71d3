//! The YouTube tools exposed to assistants.
//!
//! Each tool takes typed arguments and renders a plain-text report. The
//! dispatcher turns tool names and JSON arguments into calls, and failures
//! into error text, so every surface (MCP, HTTP, CLI) answers the same way.

mod captions;
mod channels;
mod comments;
mod evaluate;
mod playlists;
mod videos;

use crate::config::Settings;
use crate::error::{Result, YtDataError};
use crate::youtube::{
    parse_channel_ref, parse_playlist_id, parse_video_id, ChannelRef, TranscriptSource,
    WatchPageTranscripts, YoutubeClient, MAX_PAGE_SIZE,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

pub use captions::{get_video_caption_info, get_video_transcript};
pub use channels::{get_channel_details, get_channel_playlists, get_channel_videos};
pub use comments::get_video_comments;
pub use evaluate::evaluate_video_for_knowledge_base;
pub use playlists::{get_playlist_details, get_playlist_items};
pub use videos::{
    analyze_video_engagement, get_trending_videos, get_video_categories, get_video_details,
    search_videos,
};

/// Shared dependencies for tool calls.
pub struct ToolContext {
    pub client: YoutubeClient,
    pub transcripts: Arc<dyn TranscriptSource>,
    pub default_region: String,
    pub default_language: String,
}

impl ToolContext {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let client = YoutubeClient::new(&settings.youtube)?;
        let transcripts = WatchPageTranscripts::new(
            &settings.transcript,
            Duration::from_secs(settings.youtube.timeout_secs.max(1)),
        )?;

        Ok(Self {
            client,
            transcripts: Arc::new(transcripts),
            default_region: settings.youtube.default_region.clone(),
            default_language: settings.transcript.default_language.clone(),
        })
    }

    /// Context with US/English defaults.
    pub fn new(client: YoutubeClient, transcripts: Arc<dyn TranscriptSource>) -> Self {
        Self {
            client,
            transcripts,
            default_region: "US".to_string(),
            default_language: "en".to_string(),
        }
    }

    fn region(&self, requested: Option<String>) -> String {
        requested
            .map(|r| r.trim().to_uppercase())
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| self.default_region.clone())
    }

    fn language(&self, requested: Option<String>) -> String {
        requested
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| self.default_language.clone())
    }
}

/// Every tool the server offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolName {
    GetVideoDetails,
    GetPlaylistDetails,
    GetPlaylistItems,
    GetChannelDetails,
    GetVideoCategories,
    GetChannelVideos,
    SearchVideos,
    GetTrendingVideos,
    GetVideoComments,
    AnalyzeVideoEngagement,
    GetChannelPlaylists,
    GetVideoCaptionInfo,
    EvaluateVideoForKnowledgeBase,
    GetVideoTranscript,
}

impl ToolName {
    pub const ALL: [ToolName; 14] = [
        ToolName::GetVideoDetails,
        ToolName::GetPlaylistDetails,
        ToolName::GetPlaylistItems,
        ToolName::GetChannelDetails,
        ToolName::GetVideoCategories,
        ToolName::GetChannelVideos,
        ToolName::SearchVideos,
        ToolName::GetTrendingVideos,
        ToolName::GetVideoComments,
        ToolName::AnalyzeVideoEngagement,
        ToolName::GetChannelPlaylists,
        ToolName::GetVideoCaptionInfo,
        ToolName::EvaluateVideoForKnowledgeBase,
        ToolName::GetVideoTranscript,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ToolName::GetVideoDetails => "get_video_details",
            ToolName::GetPlaylistDetails => "get_playlist_details",
            ToolName::GetPlaylistItems => "get_playlist_items",
            ToolName::GetChannelDetails => "get_channel_details",
            ToolName::GetVideoCategories => "get_video_categories",
            ToolName::GetChannelVideos => "get_channel_videos",
            ToolName::SearchVideos => "search_videos",
            ToolName::GetTrendingVideos => "get_trending_videos",
            ToolName::GetVideoComments => "get_video_comments",
            ToolName::AnalyzeVideoEngagement => "analyze_video_engagement",
            ToolName::GetChannelPlaylists => "get_channel_playlists",
            ToolName::GetVideoCaptionInfo => "get_video_caption_info",
            ToolName::EvaluateVideoForKnowledgeBase => "evaluate_video_for_knowledge_base",
            ToolName::GetVideoTranscript => "get_video_transcript",
        }
    }

    /// Advisory quota cost of one call, in API units.
    pub fn quota_cost(&self) -> &'static str {
        match self {
            ToolName::GetChannelVideos => "101 units (1 for channel lookup + 100 for search)",
            ToolName::SearchVideos => "101 units (100 for search + 1 for additional details)",
            ToolName::GetVideoComments => {
                "1 unit per 100 top-level comments + 1 unit per deep reply thread requested"
            }
            ToolName::AnalyzeVideoEngagement => "1 unit",
            ToolName::GetVideoCaptionInfo => "50 units (captions API)",
            ToolName::EvaluateVideoForKnowledgeBase => {
                "51 units (1 for video details + 50 for captions)"
            }
            ToolName::GetVideoTranscript => "1 unit (video title; transcript is read from the watch page)",
            _ => "1 unit",
        }
    }

    /// Prefix for reports about failed calls.
    fn failure_prefix(&self) -> &'static str {
        match self {
            ToolName::GetVideoDetails => "Error fetching video details",
            ToolName::GetPlaylistDetails => "Error fetching playlist details",
            ToolName::GetPlaylistItems => "Error fetching playlist items",
            ToolName::GetChannelDetails => "Error fetching channel details",
            ToolName::GetVideoCategories => "Error fetching video categories",
            ToolName::GetChannelVideos => "Error fetching channel videos",
            ToolName::SearchVideos => "Error searching videos",
            ToolName::GetTrendingVideos => "Error fetching trending videos",
            ToolName::GetVideoComments => "Error fetching video comments",
            ToolName::AnalyzeVideoEngagement => "Error analyzing video engagement",
            ToolName::GetChannelPlaylists => "Error fetching channel playlists",
            ToolName::GetVideoCaptionInfo => "Error fetching video caption info",
            ToolName::EvaluateVideoForKnowledgeBase => "Error evaluating video for knowledge base",
            ToolName::GetVideoTranscript => "Error extracting transcript",
        }
    }
}

impl std::fmt::Display for ToolName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ToolName {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        ToolName::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("Unknown tool: {}", s))
    }
}

/// Text produced by a tool call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolResponse {
    pub text: String,
    pub is_error: bool,
}

impl ToolResponse {
    pub fn ok(text: String) -> Self {
        Self { text, is_error: false }
    }

    pub fn error(text: String) -> Self {
        Self { text, is_error: true }
    }
}

// === Arguments ===

fn default_max_results() -> i64 {
    10
}

fn default_order() -> String {
    "relevance".to_string()
}

fn default_max_comments() -> i64 {
    50
}

fn default_deep_replies() -> i64 {
    10
}

#[derive(Debug, Clone, Deserialize)]
pub struct VideoArgs {
    pub video_input: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VideoLanguageArgs {
    pub video_input: String,
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistArgs {
    pub playlist_input: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistItemsArgs {
    pub playlist_input: String,
    #[serde(default = "default_max_results")]
    pub max_results: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChannelArgs {
    pub channel_input: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChannelListArgs {
    pub channel_input: String,
    #[serde(default = "default_max_results")]
    pub max_results: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegionArgs {
    #[serde(default)]
    pub region_code: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrendingArgs {
    #[serde(default)]
    pub region_code: Option<String>,
    #[serde(default = "default_max_results")]
    pub max_results: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchArgs {
    pub query: String,
    #[serde(default = "default_max_results")]
    pub max_results: i64,
    #[serde(default = "default_order")]
    pub order: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommentsArgs {
    pub video_input: String,
    #[serde(default = "default_max_comments")]
    pub max_top_level_comments: i64,
    #[serde(default = "default_order")]
    pub order: String,
    #[serde(default = "default_deep_replies")]
    pub max_deep_replies_count: i64,
}

/// Clamp a requested page size to what the API accepts.
fn clamp_results(requested: i64) -> u32 {
    requested.clamp(1, MAX_PAGE_SIZE as i64) as u32
}

fn require_video_id(input: &str) -> Result<String> {
    parse_video_id(input).ok_or_else(|| {
        YtDataError::InvalidInput(format!(
            "Could not extract video ID from '{}'. Please provide a valid YouTube URL or 11-character video ID.",
            input
        ))
    })
}

fn require_playlist_id(input: &str) -> Result<String> {
    parse_playlist_id(input).ok_or_else(|| {
        YtDataError::InvalidInput(format!(
            "Could not extract playlist ID from '{}'. Please provide a valid YouTube playlist URL or playlist ID.",
            input
        ))
    })
}

fn require_channel(input: &str) -> Result<ChannelRef> {
    parse_channel_ref(input).ok_or_else(|| {
        YtDataError::InvalidInput(format!(
            "Could not extract channel ID from '{}'. Please provide a valid YouTube channel URL, channel ID, or @username.",
            input
        ))
    })
}

fn parse_args<A: DeserializeOwned>(args: Value) -> Result<A> {
    serde_json::from_value(args)
        .map_err(|e| YtDataError::InvalidInput(format!("Invalid arguments: {}", e)))
}

// === Dispatch ===

/// Run a tool by name with JSON arguments.
pub async fn dispatch(ctx: &ToolContext, name: &str, arguments: Option<Value>) -> ToolResponse {
    let tool: ToolName = match name.parse() {
        Ok(t) => t,
        Err(msg) => return ToolResponse::error(msg),
    };

    let args = match arguments {
        Some(Value::Null) | None => Value::Object(Default::default()),
        Some(v) => v,
    };

    let video_id = args
        .get("video_input")
        .and_then(Value::as_str)
        .and_then(parse_video_id);

    info!(tool = %tool, "Calling tool");
    match call(ctx, tool, args).await {
        Ok(text) => ToolResponse::ok(text),
        Err(e) => {
            warn!(tool = %tool, error = %e, "Tool call failed");
            ToolResponse::error(describe_failure(tool, video_id.as_deref(), &e))
        }
    }
}

async fn call(ctx: &ToolContext, tool: ToolName, args: Value) -> Result<String> {
    match tool {
        ToolName::GetVideoDetails => get_video_details(ctx, parse_args(args)?).await,
        ToolName::GetPlaylistDetails => get_playlist_details(ctx, parse_args(args)?).await,
        ToolName::GetPlaylistItems => get_playlist_items(ctx, parse_args(args)?).await,
        ToolName::GetChannelDetails => get_channel_details(ctx, parse_args(args)?).await,
        ToolName::GetVideoCategories => get_video_categories(ctx, parse_args(args)?).await,
        ToolName::GetChannelVideos => get_channel_videos(ctx, parse_args(args)?).await,
        ToolName::SearchVideos => search_videos(ctx, parse_args(args)?).await,
        ToolName::GetTrendingVideos => get_trending_videos(ctx, parse_args(args)?).await,
        ToolName::GetVideoComments => get_video_comments(ctx, parse_args(args)?).await,
        ToolName::AnalyzeVideoEngagement => analyze_video_engagement(ctx, parse_args(args)?).await,
        ToolName::GetChannelPlaylists => get_channel_playlists(ctx, parse_args(args)?).await,
        ToolName::GetVideoCaptionInfo => get_video_caption_info(ctx, parse_args(args)?).await,
        ToolName::EvaluateVideoForKnowledgeBase => {
            evaluate_video_for_knowledge_base(ctx, parse_args(args)?).await
        }
        ToolName::GetVideoTranscript => get_video_transcript(ctx, parse_args(args)?).await,
    }
}

/// Error text for a failed call. `video_id` is the video named in the
/// arguments, when they name one.
fn describe_failure(tool: ToolName, video_id: Option<&str>, err: &YtDataError) -> String {
    match err {
        YtDataError::InvalidInput(msg) | YtDataError::NotFound(msg) | YtDataError::Restricted(msg) => {
            format!("Error: {}", msg)
        }
        YtDataError::MissingApiKey => format!("Error: {}", err),
        e if e.is_quota_exceeded() => {
            "Error: YouTube API quota exceeded. Please try again later.".to_string()
        }
        e => match (tool, video_id) {
            (ToolName::GetVideoTranscript, Some(id)) => {
                format!("{} for video '{}': {}", tool.failure_prefix(), id, e)
            }
            _ => format!("{}: {}", tool.failure_prefix(), e),
        },
    }
}
