//! MCP resources: a single server-information document.

use super::protocol::Resource;
use crate::config::API_KEY_ENV;
use crate::tools::ToolName;

pub const SERVER_INFO_URI: &str = "youtube://server/info";

/// Daily quota granted to a new API project.
const DEFAULT_DAILY_QUOTA: &str = "10,000";

pub fn list_resources() -> Vec<Resource> {
    vec![Resource {
        uri: SERVER_INFO_URI.to_string(),
        name: "Server information".to_string(),
        description: "Available tools, accepted URL formats and quota cost per call".to_string(),
        mime_type: "text/plain".to_string(),
    }]
}

/// Text of the resource at `uri`, if there is one.
pub fn read_resource(uri: &str) -> Option<String> {
    (uri == SERVER_INFO_URI).then(server_info)
}

fn parameters(tool: ToolName) -> &'static str {
    match tool {
        ToolName::GetVideoDetails
        | ToolName::AnalyzeVideoEngagement
        | ToolName::EvaluateVideoForKnowledgeBase => "video_input",
        ToolName::GetVideoCaptionInfo | ToolName::GetVideoTranscript => "video_input, language",
        ToolName::GetPlaylistDetails => "playlist_input",
        ToolName::GetPlaylistItems => "playlist_input, max_results",
        ToolName::GetChannelDetails => "channel_input",
        ToolName::GetChannelVideos | ToolName::GetChannelPlaylists => "channel_input, max_results",
        ToolName::GetVideoCategories => "region_code",
        ToolName::GetTrendingVideos => "region_code, max_results",
        ToolName::SearchVideos => "query, max_results, order",
        ToolName::GetVideoComments => {
            "video_input, max_top_level_comments, order, max_deep_replies_count"
        }
    }
}

fn server_info() -> String {
    let mut text = String::from(
        "YouTube MCP Server\n\n\
         This server provides access to YouTube data via the YouTube Data API v3.\n\n\
         Available Tools:\n",
    );
    for (i, tool) in ToolName::ALL.iter().enumerate() {
        text.push_str(&format!("{}. {}({})\n", i + 1, tool, parameters(*tool)));
    }

    text.push_str(&format!(
        "\nSupported URL formats:\n\
         - Videos: https://www.youtube.com/watch?v=VIDEO_ID or https://youtu.be/VIDEO_ID\n\
         - Playlists: https://www.youtube.com/playlist?list=PLAYLIST_ID\n\
         - Channels: https://www.youtube.com/channel/CHANNEL_ID or https://www.youtube.com/@handle\n\n\
         You can also use video IDs, playlist IDs, and channel IDs directly.\n\n\
         Environment Requirements:\n\
         - {} must be set with a valid YouTube Data API v3 key (or youtube.api_key in the config file)\n\n\
         API Quota Usage (per call):\n",
        API_KEY_ENV
    ));
    for tool in ToolName::ALL {
        text.push_str(&format!("- {}: {}\n", tool, tool.quota_cost()));
    }

    text.push_str(&format!(
        "\nDaily Quota Limit: {} units (default)\n\
         High-usage tools: search_videos (101), get_channel_videos (101), \
         get_video_caption_info (50), evaluate_video_for_knowledge_base (51)\n\n\
         Note: Monitor your quota usage carefully.\n",
        DEFAULT_DAILY_QUOTA
    ));
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_info_lists_every_tool() {
        let text = read_resource(SERVER_INFO_URI).unwrap();
        for tool in ToolName::ALL {
            assert!(text.contains(&format!("- {}: ", tool)), "missing quota for {}", tool);
        }
        assert!(text.contains("1. get_video_details(video_input)\n"));
        assert!(text.contains("- search_videos: 101 units"));
        assert!(text.contains("Daily Quota Limit: 10,000 units"));
        assert!(text.contains("YOUTUBE_API_KEY"));
    }

    #[test]
    fn test_unknown_resource() {
        assert!(read_resource("youtube://nothing").is_none());
        assert_eq!(list_resources().len(), 1);
    }
}
