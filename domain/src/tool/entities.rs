//! Tool domain entities

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// External command-line utility a tool drives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Hypervisor management CLI (`VBoxManage`)
    VirtualBox,
    /// Memory-forensics CLI (Volatility 3)
    Volatility,
}

impl Backend {
    pub fn as_str(&self) -> &str {
        match self {
            Backend::VirtualBox => "virtualbox",
            Backend::Volatility => "volatility",
        }
    }
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Definition of a tool that can be called from the protocol boundary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Unique name of the tool (e.g., "get_vm_info")
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// CLI this tool drives
    pub backend: Backend,
    /// Parameter specifications
    pub parameters: Vec<ToolParameter>,
}

/// Parameter specification for a tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolParameter {
    /// Parameter name
    pub name: String,
    /// Parameter description
    pub description: String,
    /// Whether this parameter is required
    pub required: bool,
    /// Parameter type hint (e.g., "string", "path", "credentials")
    pub param_type: String,
}

impl ToolDefinition {
    pub fn new(name: impl Into<String>, description: impl Into<String>, backend: Backend) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            backend,
            parameters: Vec::new(),
        }
    }

    pub fn with_parameter(mut self, param: ToolParameter) -> Self {
        self.parameters.push(param);
        self
    }

    pub fn required_parameters(&self) -> impl Iterator<Item = &ToolParameter> {
        self.parameters.iter().filter(|p| p.required)
    }
}

impl ToolParameter {
    pub fn new(name: impl Into<String>, description: impl Into<String>, required: bool) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            required,
            param_type: "string".to_string(),
        }
    }

    pub fn with_type(mut self, param_type: impl Into<String>) -> Self {
        self.param_type = param_type.into();
        self
    }
}

/// Registry of the tools exposed at the boundary.
///
/// Keeps registration order so listings are stable.
#[derive(Debug, Clone, Default)]
pub struct ToolSpec {
    tools: Vec<ToolDefinition>,
}

impl ToolSpec {
    pub fn new() -> Self {
        Self { tools: Vec::new() }
    }

    pub fn register(mut self, tool: ToolDefinition) -> Self {
        self.tools.retain(|t| t.name != tool.name);
        self.tools.push(tool);
        self
    }

    pub fn get(&self, name: &str) -> Option<&ToolDefinition> {
        self.tools.iter().find(|t| t.name == name)
    }

    pub fn all(&self) -> impl Iterator<Item = &ToolDefinition> {
        self.tools.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tools.iter().map(|t| t.name.as_str())
    }

    pub fn for_backend(&self, backend: Backend) -> impl Iterator<Item = &ToolDefinition> {
        self.tools.iter().filter(move |t| t.backend == backend)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

/// Guest credentials forwarded as `--username=` / `--password=` flags
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Both members are non-empty
    pub fn is_complete(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Key under which the nested credential pair travels in a call
pub const CREDENTIALS_KEY: &str = "credentials";

/// A call to a tool with its parameter mapping.
///
/// Immutable once received; one value per call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    /// Name of the tool to call
    pub tool_name: String,
    /// Arguments passed to the tool
    #[serde(default)]
    pub arguments: HashMap<String, serde_json::Value>,
}

impl ToolCall {
    pub fn new(tool_name: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            arguments: HashMap::new(),
        }
    }

    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.arguments.insert(key.into(), value.into());
        self
    }

    pub fn with_credentials(self, credentials: Credentials) -> Self {
        self.with_arg(
            CREDENTIALS_KEY,
            serde_json::json!({
                "username": credentials.username,
                "password": credentials.password,
            }),
        )
    }

    /// Get a string argument.
    ///
    /// Numbers and booleans are rendered as text; `null` counts as absent.
    pub fn get_string(&self, key: &str) -> Option<String> {
        match self.arguments.get(key)? {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            serde_json::Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Get a required string argument or return the missing key
    pub fn require_string(&self, key: &str) -> Result<String, crate::BuildError> {
        self.get_string(key)
            .ok_or_else(|| crate::BuildError::missing(key))
    }

    /// Optional string argument, treating an empty string as absent
    pub fn get_non_empty(&self, key: &str) -> Option<String> {
        self.get_string(key).filter(|s| !s.is_empty())
    }

    /// Nested credential pair, if present and complete
    pub fn credentials(&self) -> Option<Credentials> {
        let value = self.arguments.get(CREDENTIALS_KEY)?;
        let credentials: Credentials = serde_json::from_value(value.clone()).ok()?;
        credentials.is_complete().then_some(credentials)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_definition() {
        let tool = ToolDefinition::new("get_vm_info", "Show VM info", Backend::VirtualBox)
            .with_parameter(ToolParameter::new("vm_id", "VM name or UUID", true))
            .with_parameter(ToolParameter::new("verbose", "Unused flag", false));

        assert_eq!(tool.name, "get_vm_info");
        assert_eq!(tool.parameters.len(), 2);
        assert_eq!(tool.required_parameters().count(), 1);
    }

    #[test]
    fn test_tool_spec_keeps_registration_order() {
        let spec = ToolSpec::new()
            .register(ToolDefinition::new("start_vm", "Start", Backend::VirtualBox))
            .register(ToolDefinition::new("run_plugin", "Run", Backend::Volatility))
            .register(ToolDefinition::new("stop_vm", "Stop", Backend::VirtualBox));

        assert_eq!(
            spec.names().collect::<Vec<_>>(),
            vec!["start_vm", "run_plugin", "stop_vm"]
        );
        assert_eq!(spec.for_backend(Backend::VirtualBox).count(), 2);
        assert!(spec.get("unknown").is_none());
    }

    #[test]
    fn test_tool_spec_register_replaces_same_name() {
        let spec = ToolSpec::new()
            .register(ToolDefinition::new("start_vm", "old", Backend::VirtualBox))
            .register(ToolDefinition::new("start_vm", "new", Backend::VirtualBox));

        assert_eq!(spec.len(), 1);
        assert_eq!(spec.get("start_vm").unwrap().description, "new");
    }

    #[test]
    fn test_tool_call_strings() {
        let call = ToolCall::new("get_vm_info")
            .with_arg("vm_id", "box1")
            .with_arg("port", 9000)
            .with_arg("nothing", serde_json::Value::Null)
            .with_arg("empty", "");

        assert_eq!(call.get_string("vm_id").as_deref(), Some("box1"));
        assert_eq!(call.get_string("port").as_deref(), Some("9000"));
        assert!(call.get_string("nothing").is_none());
        assert!(call.get_non_empty("empty").is_none());
        assert_eq!(
            call.require_string("missing").unwrap_err(),
            crate::BuildError::missing("missing")
        );
    }

    #[test]
    fn test_tool_call_credentials() {
        let call = ToolCall::new("copy_file_to_vm")
            .with_credentials(Credentials::new("analyst", "s3cret"));
        assert_eq!(
            call.credentials(),
            Some(Credentials::new("analyst", "s3cret"))
        );

        let partial = ToolCall::new("copy_file_to_vm")
            .with_credentials(Credentials::new("analyst", ""));
        assert!(partial.credentials().is_none());

        let malformed = ToolCall::new("copy_file_to_vm").with_arg("credentials", "analyst");
        assert!(malformed.credentials().is_none());
    }

    #[test]
    fn test_credentials_debug_hides_password() {
        let rendered = format!("{:?}", Credentials::new("analyst", "s3cret"));
        assert!(rendered.contains("analyst"));
        assert!(!rendered.contains("s3cret"));
    }

    #[test]
    fn test_tool_call_deserializes_without_arguments() {
        let call: ToolCall = serde_json::from_str(r#"{"tool_name": "get_all_vms"}"#).unwrap();
        assert_eq!(call.tool_name, "get_all_vms");
        assert!(call.arguments.is_empty());
    }
}
