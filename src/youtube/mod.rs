//! YouTube access: Data API client, response types, input parsing,
//! transcript retrieval and display formatting.

mod client;
pub mod format;
mod ids;
pub mod models;
mod transcript;

pub use client::{
    CommentOrder, SearchOrder, SearchRequest, YoutubeClient, MAX_COMMENT_PAGE_SIZE, MAX_PAGE_SIZE,
};
pub use ids::{parse_channel_ref, parse_playlist_id, parse_video_id, ChannelRef};
pub use transcript::{Transcript, TranscriptSegment, TranscriptSource, WatchPageTranscripts};

/// Canonical watch URL for a video.
pub fn video_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={}", video_id)
}

pub fn playlist_url(playlist_id: &str) -> String {
    format!("https://www.youtube.com/playlist?list={}", playlist_id)
}

pub fn channel_url(channel_id: &str) -> String {
    format!("https://www.youtube.com/channel/{}", channel_id)
}
