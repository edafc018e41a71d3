//! YouTube Data API v3 response types.
//!
//! Only the fields the tools display are modelled. Every part is optional
//! because the requested `part` set differs between calls.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

/// Deserialize a count that the API sends either as a string or a number.
fn count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Count {
        Number(u64),
        Text(String),
    }

    match Option::<Count>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Count::Number(n)) => Ok(Some(n)),
        Some(Count::Text(s)) => s.trim().parse().map(Some).map_err(serde::de::Error::custom),
    }
}

/// Generic list envelope returned by every `list` endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    pub next_page_token: Option<String>,
    pub page_info: Option<PageInfo>,
}

impl<T> ListResponse<T> {
    /// Total results reported by the API, falling back to the page size.
    pub fn total_results(&self) -> u64 {
        self.page_info
            .as_ref()
            .and_then(|p| p.total_results)
            .unwrap_or(self.items.len() as u64)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub total_results: Option<u64>,
    pub results_per_page: Option<u64>,
}

// === Videos ===

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub id: String,
    pub snippet: Option<VideoSnippet>,
    pub statistics: Option<VideoStatistics>,
    pub content_details: Option<VideoContentDetails>,
    pub status: Option<VideoStatus>,
}

impl Video {
    pub fn title(&self) -> &str {
        self.snippet
            .as_ref()
            .and_then(|s| s.title.as_deref())
            .unwrap_or("Unknown Title")
    }

    pub fn stats(&self) -> VideoStatistics {
        self.statistics.clone().unwrap_or_default()
    }

    pub fn duration(&self) -> Option<&str> {
        self.content_details
            .as_ref()
            .and_then(|c| c.duration.as_deref())
    }

    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        self.snippet.as_ref().and_then(|s| s.published_at)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSnippet {
    pub published_at: Option<DateTime<Utc>>,
    pub channel_id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub channel_title: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub category_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoStatistics {
    #[serde(default, deserialize_with = "count")]
    pub view_count: Option<u64>,
    #[serde(default, deserialize_with = "count")]
    pub like_count: Option<u64>,
    #[serde(default, deserialize_with = "count")]
    pub comment_count: Option<u64>,
}

impl VideoStatistics {
    pub fn views(&self) -> u64 {
        self.view_count.unwrap_or(0)
    }

    pub fn likes(&self) -> u64 {
        self.like_count.unwrap_or(0)
    }

    pub fn comments(&self) -> u64 {
        self.comment_count.unwrap_or(0)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoContentDetails {
    /// ISO 8601 duration, e.g. `PT4M13S`.
    pub duration: Option<String>,
    pub definition: Option<String>,
    pub caption: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoStatus {
    pub privacy_status: Option<String>,
    pub license: Option<String>,
}

// === Channels ===

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
    pub id: String,
    pub snippet: Option<ChannelSnippet>,
    pub statistics: Option<ChannelStatistics>,
}

impl Channel {
    pub fn title(&self) -> &str {
        self.snippet
            .as_ref()
            .and_then(|s| s.title.as_deref())
            .unwrap_or("Unknown")
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelSnippet {
    pub title: Option<String>,
    pub description: Option<String>,
    pub custom_url: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub country: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelStatistics {
    #[serde(default, deserialize_with = "count")]
    pub view_count: Option<u64>,
    #[serde(default, deserialize_with = "count")]
    pub subscriber_count: Option<u64>,
    #[serde(default)]
    pub hidden_subscriber_count: bool,
    #[serde(default, deserialize_with = "count")]
    pub video_count: Option<u64>,
}

// === Playlists ===

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Playlist {
    pub id: String,
    pub snippet: Option<PlaylistSnippet>,
    pub status: Option<PlaylistStatus>,
    pub content_details: Option<PlaylistContentDetails>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistSnippet {
    pub published_at: Option<DateTime<Utc>>,
    pub channel_id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub channel_title: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistStatus {
    pub privacy_status: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistContentDetails {
    #[serde(default, deserialize_with = "count")]
    pub item_count: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistItem {
    pub id: Option<String>,
    pub snippet: Option<PlaylistItemSnippet>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistItemSnippet {
    pub published_at: Option<DateTime<Utc>>,
    pub title: Option<String>,
    pub channel_title: Option<String>,
    pub video_owner_channel_title: Option<String>,
    pub position: Option<u32>,
    pub resource_id: Option<ResourceId>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceId {
    pub kind: Option<String>,
    pub video_id: Option<String>,
}

// === Search ===

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub id: SearchResultId,
    pub snippet: Option<VideoSnippet>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultId {
    pub kind: Option<String>,
    pub video_id: Option<String>,
    pub channel_id: Option<String>,
    pub playlist_id: Option<String>,
}

// === Categories ===

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoCategory {
    pub id: String,
    pub snippet: Option<VideoCategorySnippet>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoCategorySnippet {
    pub title: Option<String>,
    pub assignable: Option<bool>,
}

// === Comments ===

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentThread {
    pub id: String,
    pub snippet: CommentThreadSnippet,
    pub replies: Option<CommentThreadReplies>,
}

impl CommentThread {
    /// Replies included with the thread (at most 5 unless deep-fetched).
    pub fn reply_list(&self) -> &[Comment] {
        self.replies
            .as_ref()
            .map(|r| r.comments.as_slice())
            .unwrap_or(&[])
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentThreadSnippet {
    pub video_id: Option<String>,
    pub top_level_comment: Comment,
    #[serde(default)]
    pub total_reply_count: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentThreadReplies {
    #[serde(default)]
    pub comments: Vec<Comment>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    #[serde(default)]
    pub snippet: CommentSnippet,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentSnippet {
    pub author_display_name: Option<String>,
    pub text_display: Option<String>,
    #[serde(default, deserialize_with = "count")]
    pub like_count: Option<u64>,
    pub published_at: Option<DateTime<Utc>>,
}

// === Captions ===

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Caption {
    pub id: String,
    #[serde(default)]
    pub snippet: CaptionSnippet,
}

impl Caption {
    /// A track counts as manual when the API reports it as not auto-synced.
    /// A missing flag counts as auto-synced.
    pub fn is_manual(&self) -> bool {
        self.snippet.is_auto_synced == Some(false)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionSnippet {
    pub language: Option<String>,
    pub name: Option<String>,
    pub track_kind: Option<String>,
    pub is_auto_synced: Option<bool>,
}

// === Errors ===

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub code: Option<u16>,
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Vec<ApiErrorDetail>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorDetail {
    pub reason: Option<String>,
    pub message: Option<String>,
    pub domain: Option<String>,
}
