//! HTTP client for the YouTube Data API v3.

use super::ids::ChannelRef;
use super::models::*;
use crate::config::YoutubeSettings;
use crate::error::{Result, YtDataError};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Largest page size the API accepts for most list endpoints.
pub const MAX_PAGE_SIZE: u32 = 50;

/// Largest page size for comment threads and comments.
pub const MAX_COMMENT_PAGE_SIZE: u32 = 100;

/// Sort order for search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchOrder {
    #[default]
    Relevance,
    Date,
    Rating,
    ViewCount,
    Title,
}

impl SearchOrder {
    /// Parse an order name, falling back to relevance for anything unknown.
    pub fn parse_lenient(s: &str) -> Self {
        match s {
            "date" => SearchOrder::Date,
            "rating" => SearchOrder::Rating,
            "viewCount" => SearchOrder::ViewCount,
            "title" => SearchOrder::Title,
            _ => SearchOrder::Relevance,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SearchOrder::Relevance => "relevance",
            SearchOrder::Date => "date",
            SearchOrder::Rating => "rating",
            SearchOrder::ViewCount => "viewCount",
            SearchOrder::Title => "title",
        }
    }
}

/// Sort order for comment threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommentOrder {
    #[default]
    Relevance,
    Time,
}

impl CommentOrder {
    pub fn parse_lenient(s: &str) -> Self {
        match s {
            "time" => CommentOrder::Time,
            _ => CommentOrder::Relevance,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CommentOrder::Relevance => "relevance",
            CommentOrder::Time => "time",
        }
    }
}

/// Parameters for a `search.list` call restricted to videos.
#[derive(Debug, Clone, Default)]
pub struct SearchRequest {
    pub query: Option<String>,
    pub channel_id: Option<String>,
    pub order: SearchOrder,
    pub max_results: u32,
    pub safe_search: Option<&'static str>,
}

/// YouTube Data API client.
#[derive(Debug, Clone)]
pub struct YoutubeClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl YoutubeClient {
    /// Create a client from settings. A missing key is only reported when a
    /// request is made.
    pub fn new(settings: &YoutubeSettings) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs.max(1)))
            .user_agent(concat!("ytdata/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let api_key = settings
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_string);

        Ok(Self::with_http(http, &settings.api_base_url, api_key))
    }

    /// Create a client around an existing HTTP client.
    pub fn with_http(http: reqwest::Client, base_url: &str, api_key: Option<String>) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// GET `{base_url}/{endpoint}` with the API key appended.
    #[instrument(skip(self, params))]
    pub async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<T> {
        let key = self.api_key.as_deref().ok_or(YtDataError::MissingApiKey)?;
        let url = format!("{}/{}", self.base_url, endpoint);

        debug!(?params, "YouTube API request");

        let response = self
            .http
            .get(&url)
            .query(params)
            .query(&[("key", key)])
            .send()
            .await
            .map_err(|e| YtDataError::Network(e.without_url().to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let body = response.text().await.unwrap_or_default();
        let err = api_error(status, &body);
        warn!("YouTube API call to {} failed: {}", endpoint, err);
        Err(err)
    }

    // === Videos ===

    pub async fn videos(&self, ids: &[&str], parts: &str) -> Result<ListResponse<Video>> {
        self.get(
            "videos",
            &[("part", parts.to_string()), ("id", ids.join(","))],
        )
        .await
    }

    /// Fetch a single video, `None` when the ID matches nothing visible.
    pub async fn video(&self, id: &str, parts: &str) -> Result<Option<Video>> {
        Ok(self.videos(&[id], parts).await?.items.into_iter().next())
    }

    pub async fn most_popular(
        &self,
        region_code: &str,
        max_results: u32,
    ) -> Result<ListResponse<Video>> {
        self.get(
            "videos",
            &[
                ("part", "snippet,statistics,contentDetails".to_string()),
                ("chart", "mostPopular".to_string()),
                ("regionCode", region_code.to_string()),
                ("maxResults", max_results.to_string()),
            ],
        )
        .await
    }

    pub async fn video_categories(&self, region_code: &str) -> Result<ListResponse<VideoCategory>> {
        self.get(
            "videoCategories",
            &[
                ("part", "snippet".to_string()),
                ("regionCode", region_code.to_string()),
            ],
        )
        .await
    }

    // === Playlists ===

    pub async fn playlist(&self, id: &str) -> Result<Option<Playlist>> {
        let list: ListResponse<Playlist> = self
            .get(
                "playlists",
                &[
                    ("part", "snippet,status,contentDetails".to_string()),
                    ("id", id.to_string()),
                ],
            )
            .await?;
        Ok(list.items.into_iter().next())
    }

    pub async fn channel_playlists(
        &self,
        channel_id: &str,
        max_results: u32,
    ) -> Result<ListResponse<Playlist>> {
        self.get(
            "playlists",
            &[
                ("part", "snippet,contentDetails".to_string()),
                ("channelId", channel_id.to_string()),
                ("maxResults", max_results.to_string()),
            ],
        )
        .await
    }

    pub async fn playlist_items(
        &self,
        playlist_id: &str,
        max_results: u32,
    ) -> Result<ListResponse<PlaylistItem>> {
        self.get(
            "playlistItems",
            &[
                ("part", "snippet,contentDetails".to_string()),
                ("playlistId", playlist_id.to_string()),
                ("maxResults", max_results.to_string()),
            ],
        )
        .await
    }

    // === Channels ===

    /// Resolve a channel reference, trying each lookup style that fits.
    ///
    /// Returns `None` when no lookup yields a channel.
    #[instrument(skip(self))]
    pub async fn resolve_channel(&self, channel: &ChannelRef, parts: &str) -> Result<Option<Channel>> {
        let value = channel.value();
        let lookups: &[&str] = match channel {
            ChannelRef::Id(_) => &["id"],
            ChannelRef::Handle(_) => &["forHandle"],
            ChannelRef::Username(_) | ChannelRef::CustomName(_) => &["forUsername", "forHandle"],
            ChannelRef::Ambiguous(_) => &["id", "forUsername", "forHandle"],
        };

        for &lookup in lookups {
            let list: ListResponse<Channel> = self
                .get(
                    "channels",
                    &[("part", parts.to_string()), (lookup, value.to_string())],
                )
                .await?;
            if let Some(found) = list.items.into_iter().next() {
                debug!(lookup, channel_id = %found.id, "Resolved channel");
                return Ok(Some(found));
            }
        }

        Ok(None)
    }

    // === Search ===

    pub async fn search(&self, request: &SearchRequest) -> Result<ListResponse<SearchResult>> {
        let mut params = vec![
            ("part", "id,snippet".to_string()),
            ("type", "video".to_string()),
            ("order", request.order.as_str().to_string()),
            ("maxResults", request.max_results.to_string()),
        ];
        if let Some(q) = &request.query {
            params.push(("q", q.clone()));
        }
        if let Some(channel_id) = &request.channel_id {
            params.push(("channelId", channel_id.clone()));
        }
        if let Some(safe) = request.safe_search {
            params.push(("safeSearch", safe.to_string()));
        }
        self.get("search", &params).await
    }

    // === Comments ===

    pub async fn comment_threads(
        &self,
        video_id: &str,
        order: CommentOrder,
        max_results: u32,
        page_token: Option<&str>,
    ) -> Result<ListResponse<CommentThread>> {
        let mut params = vec![
            ("part", "snippet,replies".to_string()),
            ("videoId", video_id.to_string()),
            ("order", order.as_str().to_string()),
            ("maxResults", max_results.min(MAX_COMMENT_PAGE_SIZE).to_string()),
            ("textFormat", "plainText".to_string()),
        ];
        if let Some(token) = page_token {
            params.push(("pageToken", token.to_string()));
        }
        self.get("commentThreads", &params).await
    }

    /// Fetch every reply to a top-level comment, following pagination.
    pub async fn all_replies(&self, parent_id: &str) -> Result<Vec<Comment>> {
        let mut replies = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut params = vec![
                ("part", "snippet".to_string()),
                ("parentId", parent_id.to_string()),
                ("maxResults", MAX_COMMENT_PAGE_SIZE.to_string()),
                ("textFormat", "plainText".to_string()),
            ];
            if let Some(token) = &page_token {
                params.push(("pageToken", token.clone()));
            }

            let page: ListResponse<Comment> = self.get("comments", &params).await?;
            replies.extend(page.items);

            match page.next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        Ok(replies)
    }

    // === Captions ===

    pub async fn captions(&self, video_id: &str) -> Result<ListResponse<Caption>> {
        self.get(
            "captions",
            &[
                ("part", "snippet".to_string()),
                ("videoId", video_id.to_string()),
            ],
        )
        .await
    }
}

/// Map a failed upstream response onto an error.
fn api_error(status: StatusCode, body: &str) -> YtDataError {
    let parsed = serde_json::from_str::<ApiErrorResponse>(body).ok();
    let reason = parsed
        .as_ref()
        .and_then(|p| p.error.errors.iter().find_map(|e| e.reason.clone()));
    let message = parsed.and_then(|p| p.error.message);

    match status {
        StatusCode::NOT_FOUND => YtDataError::NotFound("YouTube resource not found (404)".to_string()),
        StatusCode::FORBIDDEN => YtDataError::Api {
            status: status.as_u16(),
            reason,
            message: message.unwrap_or_else(|| "API quota exceeded or invalid key".to_string()),
        },
        _ => YtDataError::Api {
            status: status.as_u16(),
            reason,
            message: message.unwrap_or_else(|| body.trim().to_string()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MockResponse, MockYoutube};
    use serde_json::json;

    #[test]
    fn test_api_error_mapping() {
        let body = json!({
            "error": {"code": 403, "message": "Quota gone", "errors": [{"reason": "quotaExceeded"}]}
        })
        .to_string();
        let err = api_error(StatusCode::FORBIDDEN, &body);
        assert!(err.is_quota_exceeded());
        assert_eq!(err.to_string(), "YouTube API error (403): Quota gone");

        let err = api_error(StatusCode::FORBIDDEN, "not json");
        assert_eq!(
            err.to_string(),
            "YouTube API error (403): API quota exceeded or invalid key"
        );

        let err = api_error(StatusCode::NOT_FOUND, "");
        assert!(matches!(err, YtDataError::NotFound(_)));

        let err = api_error(StatusCode::BAD_REQUEST, "bad things");
        assert_eq!(err.to_string(), "YouTube API error (400): bad things");
    }

    #[test]
    fn test_order_parsing() {
        assert_eq!(SearchOrder::parse_lenient("viewCount"), SearchOrder::ViewCount);
        assert_eq!(SearchOrder::parse_lenient("popularity"), SearchOrder::Relevance);
        assert_eq!(CommentOrder::parse_lenient("time").as_str(), "time");
        assert_eq!(CommentOrder::parse_lenient("newest"), CommentOrder::Relevance);
    }

    #[tokio::test]
    async fn test_missing_key_is_reported_at_call_time() {
        let client = YoutubeClient::with_http(reqwest::Client::new(), "http://127.0.0.1:9", None);
        assert!(!client.has_api_key());
        let err = client.video("dQw4w9WgXcQ", "snippet").await.unwrap_err();
        assert!(matches!(err, YtDataError::MissingApiKey));
    }

    #[tokio::test]
    async fn test_request_carries_key_and_params() {
        let mock = MockYoutube::start(|_| {
            MockResponse::json(json!({"items": [{"id": "dQw4w9WgXcQ", "snippet": {"title": "Hi"}}]}))
        })
        .await;

        let video = mock.client().video("dQw4w9WgXcQ", "snippet").await.unwrap().unwrap();
        assert_eq!(video.title(), "Hi");

        let requests = mock.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].path, "/videos");
        assert_eq!(requests[0].param("key"), Some("test-key"));
        assert_eq!(requests[0].param("id"), Some("dQw4w9WgXcQ"));
        assert_eq!(requests[0].param("part"), Some("snippet"));
    }

    #[tokio::test]
    async fn test_upstream_error_is_mapped() {
        let mock = MockYoutube::start(|_| {
            MockResponse::status(
                403,
                json!({"error": {"code": 403, "message": "Comments off", "errors": [{"reason": "commentsDisabled"}]}}),
            )
        })
        .await;

        let err = mock
            .client()
            .comment_threads("dQw4w9WgXcQ", CommentOrder::Relevance, 20, None)
            .await
            .unwrap_err();
        assert!(err.is_comments_disabled());
    }

    #[tokio::test]
    async fn test_resolve_channel_falls_through_lookups() {
        let mock = MockYoutube::start(|req| {
            if req.param("forHandle") == Some("GoogleDevelopers") {
                MockResponse::json(json!({"items": [{"id": "UC_x5XG1OV2P6uZZ5FSM9Ttw", "snippet": {"title": "Google for Developers"}}]}))
            } else {
                MockResponse::json(json!({"items": []}))
            }
        })
        .await;

        let channel = mock
            .client()
            .resolve_channel(&ChannelRef::Ambiguous("GoogleDevelopers".to_string()), "id,snippet")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(channel.id, "UC_x5XG1OV2P6uZZ5FSM9Ttw");

        let lookups: Vec<_> = mock
            .requests()
            .iter()
            .map(|r| {
                ["id", "forUsername", "forHandle"]
                    .into_iter()
                    .find(|k| r.param(k).is_some())
                    .unwrap_or("none")
            })
            .collect();
        assert_eq!(lookups, vec!["id", "forUsername", "forHandle"]);
    }

    #[tokio::test]
    async fn test_all_replies_follows_pages() {
        let mock = MockYoutube::start(|req| match req.param("pageToken") {
            None => MockResponse::json(json!({
                "items": [{"id": "r1", "snippet": {"textDisplay": "one"}}],
                "nextPageToken": "p2"
            })),
            Some(_) => MockResponse::json(json!({
                "items": [{"id": "r2", "snippet": {"textDisplay": "two"}}]
            })),
        })
        .await;

        let replies = mock.client().all_replies("parent").await.unwrap();
        assert_eq!(replies.iter().map(|c| c.id.as_str()).collect::<Vec<_>>(), vec!["r1", "r2"]);
        assert_eq!(mock.requests().len(), 2);
    }
}
