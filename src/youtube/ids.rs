//! Parsing of YouTube URLs and bare identifiers.

use regex::Regex;
use std::sync::LazyLock;
use url::Url;

static VIDEO_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_-]{11}$").expect("Invalid regex"));

static CHANNEL_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^UC[a-zA-Z0-9_-]{22}$").expect("Invalid regex"));

static TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_-]+$").expect("Invalid regex"));

static HANDLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9._-]+$").expect("Invalid regex"));

/// How a channel was referred to by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelRef {
    /// A `UC...` channel ID.
    Id(String),
    /// An `@handle`, without the `@`.
    Handle(String),
    /// A legacy `/user/` name.
    Username(String),
    /// A `/c/` custom URL name.
    CustomName(String),
    /// A bare token that could be any of the above.
    Ambiguous(String),
}

impl ChannelRef {
    pub fn value(&self) -> &str {
        match self {
            ChannelRef::Id(v)
            | ChannelRef::Handle(v)
            | ChannelRef::Username(v)
            | ChannelRef::CustomName(v)
            | ChannelRef::Ambiguous(v) => v,
        }
    }
}

impl std::fmt::Display for ChannelRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChannelRef::Handle(v) => write!(f, "@{}", v),
            other => write!(f, "{}", other.value()),
        }
    }
}

fn is_youtube_host(host: &str) -> bool {
    matches!(
        host,
        "youtube.com" | "www.youtube.com" | "m.youtube.com" | "music.youtube.com"
    )
}

fn is_short_host(host: &str) -> bool {
    matches!(host, "youtu.be" | "www.youtu.be")
}

/// Parse a YouTube URL, tolerating a missing scheme.
fn parse_youtube_url(input: &str) -> Option<Url> {
    let url = match Url::parse(input) {
        Ok(url) => url,
        Err(_) => Url::parse(&format!("https://{}", input)).ok()?,
    };
    let host = url.host_str()?;
    if is_youtube_host(host) || is_short_host(host) {
        Some(url)
    } else {
        None
    }
}

fn query_param(url: &Url, name: &str) -> Option<String> {
    url.query_pairs()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.into_owned())
        .filter(|v| !v.is_empty())
}

/// Extract a video ID from a watch/short/embed URL or a bare 11-character ID.
pub fn parse_video_id(input: &str) -> Option<String> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    if VIDEO_ID.is_match(input) {
        return Some(input.to_string());
    }

    let url = parse_youtube_url(input)?;
    let host = url.host_str()?;

    let candidate = if is_short_host(host) {
        url.path_segments()?.next().map(str::to_string)
    } else {
        query_param(&url, "v").or_else(|| {
            let mut segments = url.path_segments()?;
            match segments.next()? {
                "embed" | "shorts" | "live" | "v" => segments.next().map(str::to_string),
                _ => None,
            }
        })
    };

    candidate.filter(|id| VIDEO_ID.is_match(id))
}

/// Extract a playlist ID from a URL's `list` parameter or a bare ID.
pub fn parse_playlist_id(input: &str) -> Option<String> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    if TOKEN.is_match(input) {
        return Some(input.to_string());
    }

    let url = parse_youtube_url(input)?;
    query_param(&url, "list").filter(|id| TOKEN.is_match(id))
}

/// Work out how a channel is being referred to.
pub fn parse_channel_ref(input: &str) -> Option<ChannelRef> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Some(handle) = input.strip_prefix('@') {
        return HANDLE
            .is_match(handle)
            .then(|| ChannelRef::Handle(handle.to_string()));
    }
    if CHANNEL_ID.is_match(input) {
        return Some(ChannelRef::Id(input.to_string()));
    }
    if TOKEN.is_match(input) {
        return Some(ChannelRef::Ambiguous(input.to_string()));
    }

    let url = parse_youtube_url(input)?;
    let mut segments = url.path_segments()?;
    let first = segments.next()?;
    let next = segments.next().filter(|s| !s.is_empty());

    let channel = match first {
        "channel" => ChannelRef::Id(next?.to_string()),
        "c" => ChannelRef::CustomName(next?.to_string()),
        "user" => ChannelRef::Username(next?.to_string()),
        seg if seg.starts_with('@') && seg.len() > 1 => ChannelRef::Handle(seg[1..].to_string()),
        _ => return None,
    };

    HANDLE.is_match(channel.value()).then_some(channel)
}
