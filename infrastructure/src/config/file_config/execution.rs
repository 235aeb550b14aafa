//! Execution configuration from TOML (`[execution]` section)

use serde::{Deserialize, Serialize};
use std::time::Duration;
use vmscope_application::{DEFAULT_TIMEOUT_SECS, ExecutionParams};

/// Raw execution configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileExecutionConfig {
    /// Wall-clock limit for one external invocation, in seconds
    pub timeout_secs: u64,
}

impl Default for FileExecutionConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl FileExecutionConfig {
    pub fn to_execution_params(&self) -> ExecutionParams {
        ExecutionParams::default().with_timeout(Duration::from_secs(self.timeout_secs))
    }
}
