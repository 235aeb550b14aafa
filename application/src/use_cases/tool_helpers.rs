//! Shared helpers for tool use cases.

use vmscope_domain::{CREDENTIALS_KEY, ToolCall};

const PREVIEW_LEN: usize = 50;

/// Extract a short preview string from tool call arguments for logs.
///
/// Looks for well-known keys (`vm_id`, `plugin_name`, `memory_dump`,
/// `ova_path`, `command`) first, then falls back to the first string value
/// found. The credential pair is never considered.
pub(crate) fn tool_args_preview(call: &ToolCall) -> String {
    let keys = ["vm_id", "plugin_name", "memory_dump", "ova_path", "command"];
    for key in &keys {
        if let Some(serde_json::Value::String(s)) = call.arguments.get(*key) {
            return truncate_preview(s, PREVIEW_LEN);
        }
    }
    // Fallback: first string value
    let mut keys: Vec<&String> = call
        .arguments
        .keys()
        .filter(|key| key.as_str() != CREDENTIALS_KEY)
        .collect();
    keys.sort();
    for key in keys {
        if let Some(s) = call.arguments.get(key).and_then(|v| v.as_str()) {
            return truncate_preview(s, PREVIEW_LEN);
        }
    }
    String::new()
}

fn truncate_preview(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{}…", truncated)
    }
}
