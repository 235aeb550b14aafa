//! Tool domain value objects: immutable outcome and record types
//!
//! These types form the **output side** of a tool call:
//!
//! ```text
//! ExecutionOutcome ──parse──▶ ParsedRecord ──normalize──▶ NormalizedResult
//! ```
//!
//! None of them outlive a single call.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Category of an infrastructure-tier failure.
///
/// | Kind | Raised by | Process spawned? |
/// |------|-----------|------------------|
/// | `ArtifactNotFound` | pre-flight check | No |
/// | `LaunchFailed` | executor | No |
/// | `Timeout` | executor | Yes (killed) |
/// | `Cancelled` | dispatcher | Yes (killed) |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InfrastructureErrorKind {
    ArtifactNotFound,
    LaunchFailed,
    Timeout,
    Cancelled,
}

impl InfrastructureErrorKind {
    pub fn as_str(&self) -> &str {
        match self {
            InfrastructureErrorKind::ArtifactNotFound => "artifact_not_found",
            InfrastructureErrorKind::LaunchFailed => "launch_failed",
            InfrastructureErrorKind::Timeout => "timeout",
            InfrastructureErrorKind::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for InfrastructureErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Process-level failure: the external tool never produced a usable result.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct InfrastructureError {
    pub kind: InfrastructureErrorKind,
    pub message: String,
}

impl InfrastructureError {
    pub fn new(kind: InfrastructureErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn artifact_not_found(name: &str, dir: &std::path::Path) -> Self {
        Self::new(
            InfrastructureErrorKind::ArtifactNotFound,
            format!("Memory dump '{}' not found in '{}'.", name, dir.display()),
        )
    }

    pub fn launch_failed(binary: &str, os_error: impl std::fmt::Display) -> Self {
        Self::new(
            InfrastructureErrorKind::LaunchFailed,
            format!("Failed to launch {}: {}", binary, os_error),
        )
    }

    pub fn timeout(binary: &str, timeout: std::time::Duration) -> Self {
        Self::new(
            InfrastructureErrorKind::Timeout,
            format!("{} timed out after {} seconds", binary, timeout.as_secs()),
        )
    }

    pub fn cancelled(binary: &str) -> Self {
        Self::new(
            InfrastructureErrorKind::Cancelled,
            format!("{} was cancelled", binary),
        )
    }
}

/// Captured result of a process that ran to completion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessOutput {
    /// Exit code, `None` when the process was terminated by a signal
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn new(exit_code: Option<i32>, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            exit_code,
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Outcome of one external invocation.
///
/// `Err` covers everything where the process could not run to completion;
/// a non-zero exit is still `Ok`.
pub type ExecutionOutcome = Result<ProcessOutput, InfrastructureError>;

/// One entry of a quoted-name listing (`"name" {id}`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListEntry {
    pub name: String,
    pub id: String,
}

impl ListEntry {
    pub fn new(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
        }
    }
}

/// Typed view of captured stdout. The shape is chosen by the tool, never
/// inferred from the text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "shape", content = "data", rename_all = "snake_case")]
pub enum ParsedRecord {
    List(Vec<ListEntry>),
    Map(BTreeMap<String, String>),
    Opaque(String),
}

impl ParsedRecord {
    pub fn shape(&self) -> &'static str {
        match self {
            ParsedRecord::List(_) => "list",
            ParsedRecord::Map(_) => "map",
            ParsedRecord::Opaque(_) => "opaque",
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            ParsedRecord::List(entries) => entries.is_empty(),
            ParsedRecord::Map(fields) => fields.is_empty(),
            ParsedRecord::Opaque(text) => text.is_empty(),
        }
    }
}

/// The single tagged shape every call outcome converges to before it
/// crosses the dispatch boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizedResult {
    Success {
        record: ParsedRecord,
        raw_stdout: Option<String>,
    },
    ToolError {
        message: String,
        raw_stdout: Option<String>,
    },
    InfrastructureError(InfrastructureError),
}

impl NormalizedResult {
    pub fn is_success(&self) -> bool {
        matches!(self, NormalizedResult::Success { .. })
    }

    /// Error text for either failure tier
    pub fn error_message(&self) -> Option<&str> {
        match self {
            NormalizedResult::Success { .. } => None,
            NormalizedResult::ToolError { message, .. } => Some(message),
            NormalizedResult::InfrastructureError(e) => Some(&e.message),
        }
    }

    /// Outcome tag used in logs (`success`, `tool_error`, `infrastructure_error:<kind>`)
    pub fn tag(&self) -> String {
        match self {
            NormalizedResult::Success { .. } => "success".to_string(),
            NormalizedResult::ToolError { .. } => "tool_error".to_string(),
            NormalizedResult::InfrastructureError(e) => format!("infrastructure_error:{}", e.kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use std::time::Duration;

    #[test]
    fn test_artifact_not_found_message() {
        let err = InfrastructureError::artifact_not_found("x.raw", Path::new("/srv/dumps"));
        assert_eq!(err.kind, InfrastructureErrorKind::ArtifactNotFound);
        assert_eq!(err.to_string(), "Memory dump 'x.raw' not found in '/srv/dumps'.");
    }

    #[test]
    fn test_infrastructure_error_displays_message() {
        let err = InfrastructureError::cancelled("vol");
        assert_eq!(err.to_string(), "vol was cancelled");
        assert!(std::error::Error::source(&err).is_none());
    }

    #[test]
    fn test_timeout_message() {
        let err = InfrastructureError::timeout("VBoxManage", Duration::from_secs(30));
        assert_eq!(err.kind, InfrastructureErrorKind::Timeout);
        assert!(err.message.contains("30 seconds"));
    }

    #[test]
    fn test_process_output_success() {
        assert!(ProcessOutput::new(Some(0), "ok", "").success());
        assert!(!ProcessOutput::new(Some(1), "", "").success());
        assert!(!ProcessOutput::new(None, "", "").success());
    }

    #[test]
    fn test_parsed_record_shape() {
        assert_eq!(ParsedRecord::List(vec![]).shape(), "list");
        assert!(ParsedRecord::Map(BTreeMap::new()).is_empty());
        assert!(!ParsedRecord::Opaque("{}".into()).is_empty());
    }

    #[test]
    fn test_normalized_result_tags() {
        let success = NormalizedResult::Success {
            record: ParsedRecord::Opaque(String::new()),
            raw_stdout: None,
        };
        let tool_error = NormalizedResult::ToolError {
            message: "boom".into(),
            raw_stdout: None,
        };
        let infra = NormalizedResult::InfrastructureError(InfrastructureError::new(
            InfrastructureErrorKind::LaunchFailed,
            "no such file",
        ));

        assert_eq!(success.tag(), "success");
        assert_eq!(tool_error.tag(), "tool_error");
        assert_eq!(infra.tag(), "infrastructure_error:launch_failed");
        assert_eq!(tool_error.error_message(), Some("boom"));
        assert_eq!(infra.error_message(), Some("no such file"));
        assert!(success.error_message().is_none());
    }
}
