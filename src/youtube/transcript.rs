//! Transcript content retrieval.
//!
//! The Data API only lists caption tracks; downloading them needs OAuth.
//! Transcripts are instead read the way the web player does: the watch page
//! embeds a player response whose `captionTracks` point at timed-text URLs,
//! which serve the track as `json3`.

use crate::config::TranscriptSettings;
use crate::error::{Result, YtDataError};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

/// Marker preceding the caption track array in the watch page.
const CAPTION_TRACKS_MARKER: &str = "\"captionTracks\":";

/// One timed line of a transcript.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptSegment {
    /// Start offset in seconds.
    pub start: f64,
    /// Duration in seconds.
    pub duration: f64,
    pub text: String,
}

/// A fetched transcript.
#[derive(Debug, Clone)]
pub struct Transcript {
    pub language_code: String,
    pub auto_generated: bool,
    pub segments: Vec<TranscriptSegment>,
}

impl Transcript {
    /// All segment text joined by spaces.
    pub fn full_text(&self) -> String {
        self.segments
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn word_count(&self) -> usize {
        self.segments
            .iter()
            .map(|s| s.text.split_whitespace().count())
            .sum()
    }

    /// Start of the last segment, in whole minutes.
    pub fn approx_minutes(&self) -> u64 {
        self.segments
            .last()
            .map(|s| (s.start.max(0.0) / 60.0) as u64)
            .unwrap_or(0)
    }
}

/// Trait for transcript providers.
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    /// Fetch a transcript, preferring `language`, then English, then any track.
    async fn fetch(&self, video_id: &str, language: &str) -> Result<Transcript>;
}

/// Caption track entry from the player response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CaptionTrack {
    base_url: String,
    language_code: String,
    #[serde(default)]
    kind: Option<String>,
}

/// Timed-text document in `json3` format.
#[derive(Debug, Deserialize)]
struct TimedText {
    #[serde(default)]
    events: Vec<TimedTextEvent>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TimedTextEvent {
    #[serde(default)]
    t_start_ms: u64,
    #[serde(default)]
    d_duration_ms: u64,
    #[serde(default)]
    segs: Vec<TimedTextSeg>,
}

#[derive(Debug, Deserialize)]
struct TimedTextSeg {
    #[serde(default)]
    utf8: String,
}

/// Transcript source backed by the public watch page.
pub struct WatchPageTranscripts {
    http: reqwest::Client,
    watch_url: String,
}

impl WatchPageTranscripts {
    pub fn new(settings: &TranscriptSettings, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent("Mozilla/5.0 (X11; Linux x86_64) ytdata")
            .build()?;
        Ok(Self::with_http(http, &settings.watch_url))
    }

    pub fn with_http(http: reqwest::Client, watch_url: &str) -> Self {
        Self {
            http,
            watch_url: watch_url.to_string(),
        }
    }

    async fn caption_tracks(&self, video_id: &str) -> Result<Vec<CaptionTrack>> {
        let response = self
            .http
            .get(&self.watch_url)
            .query(&[("v", video_id), ("hl", "en")])
            .send()
            .await
            .map_err(|e| YtDataError::Network(e.without_url().to_string()))?;

        if !response.status().is_success() {
            return Err(YtDataError::Transcript(format!(
                "watch page returned HTTP {}",
                response.status().as_u16()
            )));
        }

        let html = response.text().await?;
        let tracks = extract_caption_tracks(&html)?;
        debug!("Found {} caption tracks", tracks.len());
        Ok(tracks)
    }
}

#[async_trait]
impl TranscriptSource for WatchPageTranscripts {
    #[instrument(skip(self))]
    async fn fetch(&self, video_id: &str, language: &str) -> Result<Transcript> {
        let tracks = self.caption_tracks(video_id).await?;
        let track = choose_track(&tracks, language)
            .ok_or_else(|| YtDataError::TranscriptsUnavailable(video_id.to_string()))?;

        let separator = if track.base_url.contains('?') { '&' } else { '?' };
        let url = format!("{}{}fmt=json3", track.base_url, separator);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| YtDataError::Network(e.without_url().to_string()))?;
        if !response.status().is_success() {
            return Err(YtDataError::Transcript(format!(
                "timed text returned HTTP {}",
                response.status().as_u16()
            )));
        }

        let body = response.text().await?;
        if body.trim().is_empty() {
            return Err(YtDataError::TranscriptsUnavailable(video_id.to_string()));
        }
        let timed: TimedText = serde_json::from_str(&body)
            .map_err(|e| YtDataError::Transcript(format!("unreadable timed text: {}", e)))?;

        Ok(Transcript {
            language_code: track.language_code.clone(),
            auto_generated: track.kind.as_deref() == Some("asr"),
            segments: segments_from(timed),
        })
    }
}

/// Pull the `captionTracks` array out of the watch page HTML.
fn extract_caption_tracks(html: &str) -> Result<Vec<CaptionTrack>> {
    let Some(start) = html.find(CAPTION_TRACKS_MARKER) else {
        return Ok(Vec::new());
    };
    let rest = &html[start + CAPTION_TRACKS_MARKER.len()..];

    // The array is followed by more player JSON; read exactly one value.
    let mut stream = serde_json::Deserializer::from_str(rest).into_iter::<Vec<CaptionTrack>>();
    match stream.next() {
        Some(Ok(tracks)) => Ok(tracks),
        Some(Err(e)) => Err(YtDataError::Transcript(format!(
            "could not read caption tracks: {}",
            e
        ))),
        None => Ok(Vec::new()),
    }
}

fn choose_track<'a>(tracks: &'a [CaptionTrack], language: &str) -> Option<&'a CaptionTrack> {
    tracks
        .iter()
        .find(|t| t.language_code == language)
        .or_else(|| tracks.iter().find(|t| t.language_code == "en"))
        .or_else(|| tracks.first())
}

fn segments_from(timed: TimedText) -> Vec<TranscriptSegment> {
    timed
        .events
        .into_iter()
        .filter_map(|event| {
            let text: String = event.segs.iter().map(|s| s.utf8.as_str()).collect();
            let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
            if text.is_empty() {
                return None;
            }
            Some(TranscriptSegment {
                start: event.t_start_ms as f64 / 1000.0,
                duration: event.d_duration_ms as f64 / 1000.0,
                text,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MockResponse, MockYoutube};
    use serde_json::json;

    fn track(lang: &str) -> CaptionTrack {
        CaptionTrack {
            base_url: format!("https://example.test/{}", lang),
            language_code: lang.to_string(),
            kind: None,
        }
    }

    #[test]
    fn test_extract_caption_tracks() {
        let html = r#"<script>var ytInitialPlayerResponse = {"captions":{"playerCaptionsTracklistRenderer":{"captionTracks":[{"baseUrl":"https://www.youtube.com/api/timedtext?v=abc&lang=en","name":{"simpleText":"English"},"languageCode":"en","kind":"asr"}],"audioTracks":[]}}};</script>"#;
        let tracks = extract_caption_tracks(html).unwrap();
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].language_code, "en");
        assert_eq!(tracks[0].base_url, "https://www.youtube.com/api/timedtext?v=abc&lang=en");
        assert_eq!(tracks[0].kind.as_deref(), Some("asr"));
    }

    #[test]
    fn test_no_tracks_in_page() {
        assert!(extract_caption_tracks("<html>nothing here</html>").unwrap().is_empty());
    }

    #[test]
    fn test_choose_track_fallbacks() {
        let tracks = vec![track("de"), track("en"), track("fr")];
        assert_eq!(choose_track(&tracks, "fr").unwrap().language_code, "fr");
        assert_eq!(choose_track(&tracks, "ja").unwrap().language_code, "en");

        let tracks = vec![track("de"), track("fr")];
        assert_eq!(choose_track(&tracks, "ja").unwrap().language_code, "de");
        assert!(choose_track(&[], "en").is_none());
    }

    #[test]
    fn test_segments_skip_blank_events() {
        let timed: TimedText = serde_json::from_value(json!({
            "events": [
                {"tStartMs": 0, "dDurationMs": 90000},
                {"tStartMs": 1500, "dDurationMs": 2000, "segs": [{"utf8": "hello"}, {"utf8": " world"}]},
                {"tStartMs": 4000, "segs": [{"utf8": "\n"}]},
                {"tStartMs": 65000, "dDurationMs": 1000, "segs": [{"utf8": "again\nand"}]}
            ]
        }))
        .unwrap();

        let segments = segments_from(timed);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].text, "hello world");
        assert_eq!(segments[0].start, 1.5);
        assert_eq!(segments[1].text, "again and");

        let transcript = Transcript {
            language_code: "en".to_string(),
            auto_generated: false,
            segments,
        };
        assert_eq!(transcript.word_count(), 4);
        assert_eq!(transcript.approx_minutes(), 1);
        assert_eq!(transcript.full_text(), "hello world again and");
    }

    #[tokio::test]
    async fn test_fetch_from_watch_page() {
        let mock = MockYoutube::start(|req| match req.path.as_str() {
            "/watch" => MockResponse::html(format!(
                r#"<script>{{"captionTracks":[{{"baseUrl":"{}/api/timedtext?v=dQw4w9WgXcQ&lang=de","languageCode":"de","kind":"asr"}}]}}</script>"#,
                req.base_url
            )),
            "/api/timedtext" => {
                assert_eq!(req.param("fmt"), Some("json3"));
                MockResponse::json(json!({
                    "events": [{"tStartMs": 0, "dDurationMs": 1000, "segs": [{"utf8": "hallo"}]}]
                }))
            }
            _ => MockResponse::status(404, json!({})),
        })
        .await;

        let source = WatchPageTranscripts::with_http(reqwest::Client::new(), &format!("{}/watch", mock.base_url));
        let transcript = source.fetch("dQw4w9WgXcQ", "en").await.unwrap();
        assert_eq!(transcript.language_code, "de");
        assert!(transcript.auto_generated);
        assert_eq!(transcript.segments[0].text, "hallo");
    }

    #[tokio::test]
    async fn test_fetch_without_tracks() {
        let mock = MockYoutube::start(|_| MockResponse::html("<html></html>".to_string())).await;
        let source = WatchPageTranscripts::with_http(reqwest::Client::new(), &format!("{}/watch", mock.base_url));
        let err = source.fetch("dQw4w9WgXcQ", "en").await.unwrap_err();
        assert!(matches!(err, YtDataError::TranscriptsUnavailable(_)));
    }
}
