//! MCP tool definitions for ytdata.

use super::protocol::Tool;
use crate::tools::ToolName;
use serde_json::{json, Value};

fn video_input() -> Value {
    json!({
        "type": "string",
        "description": "YouTube video URL or 11-character video ID"
    })
}

fn channel_input() -> Value {
    json!({
        "type": "string",
        "description": "YouTube channel URL, channel ID, or @handle"
    })
}

fn playlist_input() -> Value {
    json!({
        "type": "string",
        "description": "YouTube playlist URL or playlist ID"
    })
}

fn max_results(what: &str) -> Value {
    json!({
        "type": "integer",
        "description": format!("Maximum number of {} to return (1-50)", what),
        "default": 10,
        "minimum": 1,
        "maximum": 50
    })
}

fn region_code() -> Value {
    json!({
        "type": "string",
        "description": "Two-letter country code (US, GB, CA, ...)",
        "default": "US"
    })
}

fn language() -> Value {
    json!({
        "type": "string",
        "description": "Preferred language code",
        "default": "en"
    })
}

fn description(tool: ToolName) -> &'static str {
    match tool {
        ToolName::GetVideoDetails => {
            "Get detailed information about a YouTube video: title, channel, publish date, \
             duration, statistics, status, license and description."
        }
        ToolName::GetPlaylistDetails => {
            "Get information about a YouTube playlist: title, channel, creation date, \
             video count, privacy status and description."
        }
        ToolName::GetPlaylistItems => "List the videos in a YouTube playlist.",
        ToolName::GetChannelDetails => {
            "Get detailed information about a YouTube channel: name, handle, subscribers, \
             video count, total views and description."
        }
        ToolName::GetVideoCategories => "List YouTube video categories for a region.",
        ToolName::GetChannelVideos => {
            "Get the most recent videos from a YouTube channel. Costs about 101 quota units."
        }
        ToolName::SearchVideos => {
            "Search YouTube for videos by keywords, with durations and view counts. \
             Costs about 101 quota units."
        }
        ToolName::GetTrendingVideos => "Get trending (most popular) videos for a region.",
        ToolName::GetVideoComments => {
            "Get comments from a YouTube video. Threads include up to 5 replies; \
             full reply lists are fetched for up to max_deep_replies_count threads \
             at 1 extra quota unit each."
        }
        ToolName::AnalyzeVideoEngagement => {
            "Analyze a video's engagement: like, comment and total engagement rates, \
             views per day, and plain-language insights."
        }
        ToolName::GetChannelPlaylists => "List the public playlists of a YouTube channel.",
        ToolName::GetVideoCaptionInfo => {
            "List the caption tracks available for a video. Costs about 50 quota units."
        }
        ToolName::EvaluateVideoForKnowledgeBase => {
            "Score a video's metadata (title, age, views, captions, length) to help decide \
             whether it belongs in a knowledge base. Costs about 51 quota units."
        }
        ToolName::GetVideoTranscript => {
            "Extract the transcript text of a YouTube video, with timestamps."
        }
    }
}

fn input_schema(tool: ToolName) -> Value {
    let (properties, required) = match tool {
        ToolName::GetVideoDetails
        | ToolName::AnalyzeVideoEngagement
        | ToolName::EvaluateVideoForKnowledgeBase => {
            (json!({ "video_input": video_input() }), vec!["video_input"])
        }
        ToolName::GetVideoCaptionInfo | ToolName::GetVideoTranscript => (
            json!({ "video_input": video_input(), "language": language() }),
            vec!["video_input"],
        ),
        ToolName::GetPlaylistDetails => {
            (json!({ "playlist_input": playlist_input() }), vec!["playlist_input"])
        }
        ToolName::GetPlaylistItems => (
            json!({ "playlist_input": playlist_input(), "max_results": max_results("videos") }),
            vec!["playlist_input"],
        ),
        ToolName::GetChannelDetails => {
            (json!({ "channel_input": channel_input() }), vec!["channel_input"])
        }
        ToolName::GetChannelVideos => (
            json!({ "channel_input": channel_input(), "max_results": max_results("videos") }),
            vec!["channel_input"],
        ),
        ToolName::GetChannelPlaylists => (
            json!({ "channel_input": channel_input(), "max_results": max_results("playlists") }),
            vec!["channel_input"],
        ),
        ToolName::GetVideoCategories => (json!({ "region_code": region_code() }), vec![]),
        ToolName::GetTrendingVideos => (
            json!({ "region_code": region_code(), "max_results": max_results("videos") }),
            vec![],
        ),
        ToolName::SearchVideos => (
            json!({
                "query": {
                    "type": "string",
                    "description": "Search keywords"
                },
                "max_results": max_results("results"),
                "order": {
                    "type": "string",
                    "description": "Sort order",
                    "enum": ["relevance", "date", "rating", "viewCount", "title"],
                    "default": "relevance"
                }
            }),
            vec!["query"],
        ),
        ToolName::GetVideoComments => (
            json!({
                "video_input": video_input(),
                "max_top_level_comments": {
                    "type": "integer",
                    "description": "Total number of top-level comments to retrieve",
                    "default": 50,
                    "minimum": 1
                },
                "order": {
                    "type": "string",
                    "description": "Sort order for top-level comments",
                    "enum": ["relevance", "time"],
                    "default": "relevance"
                },
                "max_deep_replies_count": {
                    "type": "integer",
                    "description": "Fetch all replies for up to this many threads; 0 disables",
                    "default": 10,
                    "minimum": 0
                }
            }),
            vec!["video_input"],
        ),
    };

    json!({
        "type": "object",
        "properties": properties,
        "required": required
    })
}

/// Get all available tools.
pub fn get_tools() -> Vec<Tool> {
    ToolName::ALL
        .into_iter()
        .map(|tool| Tool {
            name: tool.as_str().to_string(),
            description: description(tool).to_string(),
            input_schema: input_schema(tool),
        })
        .collect()
}
