//! Long-running serve mode

pub mod stdio;

use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use vmscope_domain::ToolCall;

pub use stdio::{ServeSummary, StdioServer};

/// One request line read in serve mode
#[derive(Debug, Clone, Deserialize)]
pub struct ServeRequest {
    /// Tool name
    pub tool: String,
    /// Tool parameters, credentials included
    #[serde(default)]
    pub arguments: HashMap<String, Value>,
    /// Opaque correlation value echoed in the response
    #[serde(default)]
    pub id: Option<Value>,
}

impl ServeRequest {
    pub fn to_tool_call(&self) -> ToolCall {
        ToolCall {
            tool_name: self.tool.clone(),
            arguments: self.arguments.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults() {
        let request: ServeRequest = serde_json::from_str(r#"{"tool": "get_all_vms"}"#).unwrap();
        assert_eq!(request.tool, "get_all_vms");
        assert!(request.arguments.is_empty());
        assert!(request.id.is_none());
    }

    #[test]
    fn test_request_carries_credentials() {
        let request: ServeRequest = serde_json::from_str(
            r#"{"tool": "copy_file_to_vm", "arguments": {
                "vm_id": "kali", "host_path": "/a", "vm_path": "/b",
                "credentials": {"username": "u", "password": "p"}
            }}"#,
        )
        .unwrap();
        let call = request.to_tool_call();
        assert_eq!(call.get_string("vm_id").as_deref(), Some("kali"));
        assert_eq!(call.credentials().unwrap().username, "u");
    }

    #[test]
    fn test_request_requires_tool() {
        assert!(serde_json::from_str::<ServeRequest>(r#"{"arguments": {}}"#).is_err());
    }
}
