//! Error types for ytdata.

use thiserror::Error;

/// Library-level error type for ytdata operations.
#[derive(Error, Debug)]
pub enum YtDataError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(
        "YouTube API key not found. Set the YOUTUBE_API_KEY environment variable \
         or add youtube.api_key to the config file."
    )]
    MissingApiKey,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Restricted(String),

    #[error("YouTube API error ({status}): {message}")]
    Api {
        status: u16,
        reason: Option<String>,
        message: String,
    },

    #[error("Network error connecting to YouTube: {0}")]
    Network(String),

    #[error("No transcripts available for video {0}")]
    TranscriptsUnavailable(String),

    #[error("Transcript error: {0}")]
    Transcript(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl YtDataError {
    /// Upstream error reason (e.g. `quotaExceeded`), when the API supplied one.
    pub fn reason(&self) -> Option<&str> {
        match self {
            YtDataError::Api { reason, .. } => reason.as_deref(),
            _ => None,
        }
    }

    pub fn is_quota_exceeded(&self) -> bool {
        matches!(self.reason(), Some("quotaExceeded" | "dailyLimitExceeded"))
    }

    pub fn is_comments_disabled(&self) -> bool {
        self.reason() == Some("commentsDisabled")
    }

    pub fn is_forbidden(&self) -> bool {
        match self {
            YtDataError::Api { status: 403, reason, .. } => {
                !matches!(reason.as_deref(), Some("quotaExceeded" | "dailyLimitExceeded"))
            }
            _ => false,
        }
    }
}

/// Result type alias for ytdata operations.
pub type Result<T> = std::result::Result<T, YtDataError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn api_error(status: u16, reason: Option<&str>) -> YtDataError {
        YtDataError::Api {
            status,
            reason: reason.map(str::to_string),
            message: "boom".to_string(),
        }
    }

    #[test]
    fn test_reason_helpers() {
        assert!(api_error(403, Some("quotaExceeded")).is_quota_exceeded());
        assert!(!api_error(403, Some("quotaExceeded")).is_forbidden());
        assert!(api_error(403, Some("commentsDisabled")).is_comments_disabled());
        assert!(api_error(403, Some("forbidden")).is_forbidden());
        assert!(!api_error(400, None).is_forbidden());
        assert_eq!(YtDataError::MissingApiKey.reason(), None);
    }

    #[test]
    fn test_api_error_display() {
        assert_eq!(
            api_error(500, None).to_string(),
            "YouTube API error (500): boom"
        );
    }
}
