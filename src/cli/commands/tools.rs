//! Tools command - list the tools and their arguments.

use crate::cli::Output;
use crate::mcp::get_tools;
use crate::tools::ToolName;
use anyhow::Result;

/// Print every tool with its quota cost and arguments.
pub fn run_tools() -> Result<()> {
    let tools = get_tools();
    Output::header(&format!("Available tools ({})", tools.len()));
    println!();

    for tool in &tools {
        Output::tool(&tool.name, &tool.description);

        if let Ok(name) = tool.name.parse::<ToolName>() {
            Output::kv("quota", name.quota_cost());
        }

        let required: Vec<&str> = tool.input_schema["required"]
            .as_array()
            .map(|r| r.iter().filter_map(|v| v.as_str()).collect())
            .unwrap_or_default();
        if let Some(properties) = tool.input_schema["properties"].as_object() {
            let args: Vec<String> = properties
                .keys()
                .map(|k| {
                    if required.contains(&k.as_str()) {
                        k.clone()
                    } else {
                        format!("[{}]", k)
                    }
                })
                .collect();
            Output::kv("args", &args.join(" "));
        }
        println!();
    }

    Output::info("Run one with: ytdata call <tool> --arg key=value");
    Ok(())
}
