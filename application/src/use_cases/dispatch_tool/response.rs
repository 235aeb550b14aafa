//! Boundary serialization of dispatch outcomes.
//!
//! Everything a call can end in is rendered here, in one place, into the
//! JSON value the caller receives:
//!
//! | Outcome | Body |
//! |---------|------|
//! | listing success | `[{"name", "id"}, ...]` |
//! | info success | `{"<field>": "<value>", ...}` |
//! | action success | `{"message"}` (plus `"output"` for guest commands) |
//! | opaque success | `{"output"}` |
//! | plugin listing | `{"plugins": [{"name", "description"}, ...]}` |
//! | dump listing | `{"dumps": [...]}` |
//! | any failure | `{"error"}` (plus `"output"` when the tool printed any) |

use serde::{Serialize, Serializer};
use serde_json::{Map, Value, json};
use vmscope_domain::{NormalizedResult, ParsedRecord, ToolCall, ToolKind};

/// Outcome tag of every successful call
pub const TAG_SUCCESS: &str = "success";
/// Outcome tag for calls rejected before a process could be launched
pub const TAG_MISSING_PARAMETER: &str = "missing_parameter";
pub const TAG_UNKNOWN_TOOL: &str = "unknown_tool";
pub const TAG_ARTIFACT_STORE_ERROR: &str = "artifact_store_error";

/// The serialized result of one dispatched call.
///
/// `tag` is kept for logging only; callers see `body`.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolResponse {
    tag: String,
    body: Value,
}

impl Serialize for ToolResponse {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.body.serialize(serializer)
    }
}

impl ToolResponse {
    pub fn new(tag: impl Into<String>, body: Value) -> Self {
        Self {
            tag: tag.into(),
            body,
        }
    }

    /// `{"error": message}` under the given outcome tag
    pub fn error(tag: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(tag, json!({ "error": message.into() }))
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn body(&self) -> &Value {
        &self.body
    }

    pub fn into_body(self) -> Value {
        self.body
    }

    /// Decided by the outcome tag, never by the body's keys
    pub fn is_error(&self) -> bool {
        self.tag != TAG_SUCCESS
    }

    /// Error text, if this response is a failure of any tier
    pub fn error_message(&self) -> Option<&str> {
        if !self.is_error() {
            return None;
        }
        self.body.get("error").and_then(Value::as_str)
    }
}

/// Render a normalized result for the tool that produced it.
pub fn render(kind: ToolKind, call: &ToolCall, result: NormalizedResult) -> ToolResponse {
    let tag = result.tag();
    match result {
        NormalizedResult::Success { record, raw_stdout } => {
            ToolResponse::new(tag, render_success(kind, call, record, raw_stdout))
        }
        NormalizedResult::ToolError {
            message,
            raw_stdout,
        } => {
            let mut body = Map::new();
            body.insert("error".to_string(), Value::String(message));
            if let Some(stdout) = raw_stdout {
                body.insert("output".to_string(), Value::String(stdout));
            }
            ToolResponse::new(tag, Value::Object(body))
        }
        NormalizedResult::InfrastructureError(error) => ToolResponse::error(tag, error.message),
    }
}

/// `{"dumps": [...]}` for the directory listing tool
pub fn render_dumps(dumps: Vec<String>) -> ToolResponse {
    ToolResponse::new(TAG_SUCCESS, json!({ "dumps": dumps }))
}

fn render_success(
    kind: ToolKind,
    call: &ToolCall,
    record: ParsedRecord,
    raw_stdout: Option<String>,
) -> Value {
    let arg = |key: &str| call.get_string(key).unwrap_or_default();

    match kind {
        ToolKind::GetAllVms | ToolKind::GetVmInfo => record_value(record),
        ToolKind::StartVm => message(format!(
            "VM {} has been started successfully.",
            arg("vm_id")
        )),
        ToolKind::StopVm => message(format!(
            "VM {} has been stopped successfully.",
            arg("vm_id")
        )),
        ToolKind::ImportVmFromOva => message(format!(
            "VM has been imported from {} successfully.",
            arg("ova_path")
        )),
        ToolKind::ExtractMemoryDumpFromVm => message(format!(
            "Memory dump for VM {} has been saved to {}.",
            arg("vm_id"),
            arg("dump_path")
        )),
        ToolKind::CopyFileToVm => message(format!(
            "File {} has been copied to VM {} at {}.",
            arg("host_path"),
            arg("vm_id"),
            arg("vm_path")
        )),
        ToolKind::ExecuteCommandInVm => {
            let output = raw_stdout.unwrap_or_default();
            json!({
                "message": format!("Command executed in VM {}: {}", arg("vm_id"), arg("command")),
                "output": output.trim(),
            })
        }
        ToolKind::RunPlugin => match record {
            ParsedRecord::Opaque(output) => json!({ "output": output }),
            other => record_value(other),
        },
        ToolKind::ListAllAvailablePlugins => match record {
            ParsedRecord::Map(plugins) => {
                let plugins: Vec<Value> = plugins
                    .into_iter()
                    .map(|(name, description)| json!({ "name": name, "description": description }))
                    .collect();
                json!({ "plugins": plugins })
            }
            other => record_value(other),
        },
        // Rendered through `render_dumps`; no process output to show
        ToolKind::ListMemoryDumps => json!({ "dumps": [] }),
    }
}

fn message(text: String) -> Value {
    json!({ "message": text })
}

fn record_value(record: ParsedRecord) -> Value {
    match record {
        ParsedRecord::List(entries) => Value::Array(
            entries
                .into_iter()
                .map(|entry| json!({ "name": entry.name, "id": entry.id }))
                .collect(),
        ),
        ParsedRecord::Map(fields) => Value::Object(
            fields
                .into_iter()
                .map(|(key, value)| (key, Value::String(value)))
                .collect(),
        ),
        ParsedRecord::Opaque(text) => json!({ "output": text }),
    }
}
