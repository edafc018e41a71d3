//! Call command - run one tool from the shell.

use crate::cli::Output;
use crate::config::Settings;
use crate::tools::{dispatch, ToolContext};
use anyhow::{bail, Context, Result};
use serde_json::{Map, Value};

/// Run a single tool and print its text output.
pub async fn run_call(
    tool: &str,
    pairs: &[String],
    json: Option<&str>,
    settings: Settings,
) -> Result<()> {
    let arguments = build_arguments(pairs, json)?;
    let ctx = ToolContext::from_settings(&settings)?;

    let spinner = Output::spinner(&format!("Calling {}...", tool));
    let response = dispatch(&ctx, tool, Some(arguments)).await;
    spinner.finish_and_clear();

    if response.is_error {
        bail!("{}", response.text);
    }

    println!("{}", response.text);
    Ok(())
}

/// Merge `--json` with `--arg key=value` pairs; pairs win on conflicts.
///
/// Values that parse as JSON keep their type (`max_results=5` is a number),
/// anything else is passed as a string.
fn build_arguments(pairs: &[String], json: Option<&str>) -> Result<Value> {
    let mut arguments = match json {
        Some(raw) => match serde_json::from_str::<Value>(raw).context("--json is not valid JSON")? {
            Value::Object(map) => map,
            _ => bail!("--json must be a JSON object"),
        },
        None => Map::new(),
    };

    for pair in pairs {
        let (key, raw) = pair
            .split_once('=')
            .with_context(|| format!("Argument '{}' is not in key=value form", pair))?;
        let key = key.trim();
        if key.is_empty() {
            bail!("Argument '{}' has an empty key", pair);
        }
        let value = match serde_json::from_str::<Value>(raw) {
            Ok(v @ (Value::Number(_) | Value::Bool(_))) => v,
            _ => Value::String(raw.to_string()),
        };
        arguments.insert(key.to_string(), value);
    }

    Ok(Value::Object(arguments))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn pairs(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_pairs_keep_numbers_and_strings() {
        let args = build_arguments(
            &pairs(&["query=rust async", "max_results=5", "video_input=0123456789a"]),
            None,
        )
        .unwrap();
        assert_eq!(
            args,
            json!({"query": "rust async", "max_results": 5, "video_input": "0123456789a"})
        );
    }

    #[test]
    fn test_value_may_contain_equals() {
        let args = build_arguments(&pairs(&["video_input=https://youtu.be/x?t=10"]), None).unwrap();
        assert_eq!(args["video_input"], "https://youtu.be/x?t=10");
    }

    #[test]
    fn test_pairs_override_json() {
        let args = build_arguments(
            &pairs(&["order=date"]),
            Some(r#"{"query": "tokio", "order": "rating"}"#),
        )
        .unwrap();
        assert_eq!(args, json!({"query": "tokio", "order": "date"}));
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(build_arguments(&pairs(&["novalue"]), None).is_err());
        assert!(build_arguments(&pairs(&["=x"]), None).is_err());
        assert!(build_arguments(&[], Some("[1, 2]")).is_err());
        assert!(build_arguments(&[], Some("{not json")).is_err());
    }
}
