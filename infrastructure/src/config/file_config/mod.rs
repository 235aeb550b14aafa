//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into domain and
//! application types at the edge.

mod execution;
mod logging;
mod virtualbox;
mod volatility;

pub use execution::FileExecutionConfig;
pub use logging::FileLoggingConfig;
pub use virtualbox::FileVirtualBoxConfig;
pub use volatility::FileVolatilityConfig;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use vmscope_application::ExecutionParams;
use vmscope_domain::CommandBuilder;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("execution.timeout_secs cannot be 0")]
    InvalidTimeout,

    #[error("{section}.binary cannot be empty")]
    EmptyBinary { section: &'static str },

    #[error("volatility.dumps_dir cannot be empty")]
    EmptyDumpsDir,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Process control settings
    pub execution: FileExecutionConfig,
    /// VirtualBox backend settings
    pub virtualbox: FileVirtualBoxConfig,
    /// Volatility backend settings
    pub volatility: FileVolatilityConfig,
    /// Structured call log settings
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the configuration, stopping at the first problem.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.execution.timeout_secs == 0 {
            return Err(ConfigValidationError::InvalidTimeout);
        }
        if self.virtualbox.binary.trim().is_empty() {
            return Err(ConfigValidationError::EmptyBinary {
                section: "virtualbox",
            });
        }
        if self.volatility.binary.trim().is_empty() {
            return Err(ConfigValidationError::EmptyBinary {
                section: "volatility",
            });
        }
        if self.volatility.dumps_dir.as_os_str().is_empty() {
            return Err(ConfigValidationError::EmptyDumpsDir);
        }
        Ok(())
    }

    /// Builder wired to the configured binaries and dumps directory
    pub fn command_builder(&self) -> CommandBuilder {
        CommandBuilder::new()
            .with_virtualbox_binary(&self.virtualbox.binary)
            .with_volatility_binary(&self.volatility.binary)
            .with_dumps_dir(&self.volatility.dumps_dir)
    }

    pub fn execution_params(&self) -> ExecutionParams {
        self.execution.to_execution_params()
    }

    /// Render as TOML (for `--show-config`)
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::{Path, PathBuf};
    use vmscope_domain::{Backend, ToolCall, ToolKind};

    #[test]
    fn test_default_config_is_valid() {
        let config = FileConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.execution.timeout_secs, 300);
        assert_eq!(config.virtualbox.binary, "VBoxManage");
        assert_eq!(config.volatility.binary, "volatility");
        assert_eq!(config.volatility.dumps_dir, PathBuf::from("dumps"));
        assert!(config.logging.call_log.is_none());
    }

    #[test]
    fn test_full_config_deserialize() {
        let toml_str = r#"
[execution]
timeout_secs = 60

[virtualbox]
binary = "/usr/local/bin/VBoxManage"

[volatility]
binary = "vol"
dumps_dir = "/srv/dumps"

[logging]
call_log = "/var/log/vmscope/calls.jsonl"
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(
            config.logging.call_log,
            Some(PathBuf::from("/var/log/vmscope/calls.jsonl"))
        );

        let builder = config.command_builder();
        assert_eq!(builder.binary(Backend::VirtualBox), "/usr/local/bin/VBoxManage");
        assert_eq!(builder.binary(Backend::Volatility), "vol");
        assert_eq!(builder.dumps_dir(), Path::new("/srv/dumps"));

        let argv = builder
            .build(ToolKind::ListAllAvailablePlugins, &ToolCall::new("list_all_available_plugins"))
            .unwrap();
        assert_eq!(argv.tokens(), ["vol", "--help"]);
    }

    #[test]
    fn test_validate_zero_timeout() {
        let mut config = FileConfig::default();
        config.execution.timeout_secs = 0;
        assert_eq!(config.validate(), Err(ConfigValidationError::InvalidTimeout));
    }

    #[test]
    fn test_validate_empty_binary() {
        let mut config = FileConfig::default();
        config.volatility.binary = "  ".to_string();
        let err = config.validate().unwrap_err();
        assert_eq!(
            err,
            ConfigValidationError::EmptyBinary {
                section: "volatility"
            }
        );
        assert_eq!(err.to_string(), "volatility.binary cannot be empty");
    }

    #[test]
    fn test_validate_empty_dumps_dir() {
        let mut config = FileConfig::default();
        config.volatility.dumps_dir = PathBuf::new();
        assert_eq!(config.validate(), Err(ConfigValidationError::EmptyDumpsDir));
    }

    #[test]
    fn test_to_toml_roundtrips_through_parser() {
        let config = FileConfig::default();
        let rendered = config.to_toml().unwrap();
        assert!(rendered.contains("[execution]"));
        let parsed: FileConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed, config);
    }
}
