//! Domain error types

use thiserror::Error;

/// Errors raised while turning a tool call into an argument vector.
///
/// These are caller mistakes: they are surfaced before any process is
/// launched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("Missing required parameter: {name}")]
    MissingParameter { name: String },

    #[error("Tool '{tool}' does not launch an external process")]
    NoCommand { tool: String },
}

impl BuildError {
    pub fn missing(name: impl Into<String>) -> Self {
        BuildError::MissingParameter { name: name.into() }
    }

    /// Name of the absent parameter, if this is a missing-parameter error
    pub fn missing_parameter(&self) -> Option<&str> {
        match self {
            BuildError::MissingParameter { name } => Some(name),
            BuildError::NoCommand { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_parameter_display() {
        let error = BuildError::missing("vm_id");
        assert_eq!(error.to_string(), "Missing required parameter: vm_id");
        assert_eq!(error.missing_parameter(), Some("vm_id"));
    }

    #[test]
    fn test_no_command_has_no_parameter() {
        let error = BuildError::NoCommand {
            tool: "list_memory_dumps".to_string(),
        };
        assert!(error.missing_parameter().is_none());
        assert!(error.to_string().contains("list_memory_dumps"));
    }
}
