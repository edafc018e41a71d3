//! Doctor command - verify configuration and API access.

use crate::cli::Output;
use crate::config::{Settings, API_KEY_ENV};
use crate::youtube::YoutubeClient;
use console::style;
use std::path::Path;

/// Check result for a single item.
#[derive(Debug)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum CheckStatus {
    Ok,
    Warning,
    Error,
}

impl CheckResult {
    fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Ok,
            message: message.to_string(),
            hint: None,
        }
    }

    fn warning(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Warning,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn error(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Error,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn print(&self) {
        let icon = match self.status {
            CheckStatus::Ok => style("✓").green(),
            CheckStatus::Warning => style("!").yellow(),
            CheckStatus::Error => style("✗").red(),
        };

        println!("  {} {} - {}", icon, style(&self.name).bold(), self.message);

        if let Some(hint) = &self.hint {
            println!("    {} {}", style("→").dim(), style(hint).dim());
        }
    }
}

/// Run all diagnostic checks.
pub async fn run_doctor(settings: &Settings, config_path: &Path) -> anyhow::Result<()> {
    Output::header("ytdata Doctor");
    println!();
    println!("Checking configuration and YouTube API access...\n");

    let mut checks = Vec::new();

    println!("{}", style("Configuration").bold());
    let config_check = check_config_file(config_path);
    config_check.print();
    checks.push(config_check);

    let key_check = check_api_key(settings.api_key());
    key_check.print();
    checks.push(key_check);

    println!();

    println!("{}", style("YouTube Data API").bold());
    let api_check = if settings.api_key().is_some() {
        let client = YoutubeClient::new(&settings.youtube)?;
        check_api_access(&client, &settings.youtube.default_region).await
    } else {
        CheckResult::warning(
            "API access",
            "skipped",
            "Configure an API key first",
        )
    };
    api_check.print();
    checks.push(api_check);

    println!();

    let errors = checks.iter().filter(|c| c.status == CheckStatus::Error).count();
    let warnings = checks.iter().filter(|c| c.status == CheckStatus::Warning).count();

    if errors > 0 {
        Output::error(&format!(
            "{} error(s) found. Please fix them before using ytdata.",
            errors
        ));
        std::process::exit(1);
    } else if warnings > 0 {
        Output::warning(&format!(
            "All checks passed with {} warning(s).",
            warnings
        ));
    } else {
        Output::success("All checks passed! ytdata is ready to use.");
    }

    Ok(())
}

/// Check that an API key is configured, showing only its ends.
fn check_api_key(key: Option<&str>) -> CheckResult {
    match key {
        Some(key) if key.chars().count() > 12 => {
            let chars: Vec<char> = key.chars().collect();
            let head: String = chars[..4].iter().collect();
            let tail: String = chars[chars.len() - 4..].iter().collect();
            CheckResult::ok(API_KEY_ENV, &format!("configured ({}...{})", head, tail))
        }
        Some(_) => CheckResult::warning(
            API_KEY_ENV,
            "set but looks too short",
            "YouTube Data API keys are usually 39 characters",
        ),
        None => CheckResult::error(
            API_KEY_ENV,
            "not set",
            &format!(
                "Set with: export {}='...' (or youtube.api_key in the config file)",
                API_KEY_ENV
            ),
        ),
    }
}

/// Check if the config file exists.
fn check_config_file(config_path: &Path) -> CheckResult {
    if config_path.exists() {
        CheckResult::ok("Config file", &format!("{}", config_path.display()))
    } else {
        CheckResult::warning(
            "Config file",
            "using defaults",
            "Create with: ytdata config edit",
        )
    }
}

/// Make the cheapest possible API call (1 quota unit).
async fn check_api_access(client: &YoutubeClient, region: &str) -> CheckResult {
    match client.video_categories(region).await {
        Ok(categories) => CheckResult::ok(
            "API access",
            &format!("reachable ({} categories for {})", categories.items.len(), region),
        ),
        Err(e) if e.is_quota_exceeded() => CheckResult::warning(
            "API access",
            "key works but the daily quota is exhausted",
            "Quota resets at midnight Pacific time",
        ),
        Err(e) => CheckResult::error(
            "API access",
            &e.to_string(),
            "Check that the key is valid and the YouTube Data API v3 is enabled for its project",
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MockResponse, MockYoutube};
    use serde_json::json;

    #[test]
    fn test_check_result_ok() {
        let result = CheckResult::ok("test", "passed");
        assert_eq!(result.status, CheckStatus::Ok);
        assert!(result.hint.is_none());
    }

    #[test]
    fn test_api_key_is_masked() {
        let result = check_api_key(Some("AIzaSyExampleExampleExample1234"));
        assert_eq!(result.status, CheckStatus::Ok);
        assert_eq!(result.message, "configured (AIza...1234)");

        assert_eq!(check_api_key(Some("short")).status, CheckStatus::Warning);
        assert_eq!(check_api_key(None).status, CheckStatus::Error);
    }

    #[test]
    fn test_missing_config_file_is_warning() {
        let dir = tempfile::tempdir().unwrap();
        let result = check_config_file(&dir.path().join("config.toml"));
        assert_eq!(result.status, CheckStatus::Warning);
    }

    #[tokio::test]
    async fn test_api_access() {
        let mock = MockYoutube::start(|_| {
            MockResponse::json(json!({"items": [{"id": "1"}, {"id": "2"}]}))
        })
        .await;
        let result = check_api_access(&mock.client(), "US").await;
        assert_eq!(result.status, CheckStatus::Ok);
        assert_eq!(result.message, "reachable (2 categories for US)");
    }

    #[tokio::test]
    async fn test_api_access_quota_and_bad_key() {
        let mock = MockYoutube::start(|_| {
            MockResponse::status(
                403,
                json!({"error": {"code": 403, "message": "quota", "errors": [{"reason": "quotaExceeded"}]}}),
            )
        })
        .await;
        assert_eq!(
            check_api_access(&mock.client(), "US").await.status,
            CheckStatus::Warning
        );

        let mock = MockYoutube::start(|_| {
            MockResponse::status(
                400,
                json!({"error": {"code": 400, "message": "API key not valid", "errors": [{"reason": "badRequest"}]}}),
            )
        })
        .await;
        assert_eq!(
            check_api_access(&mock.client(), "US").await.status,
            CheckStatus::Error
        );
    }
}
