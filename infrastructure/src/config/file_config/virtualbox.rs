//! VirtualBox configuration from TOML (`[virtualbox]` section)

use serde::{Deserialize, Serialize};
use vmscope_domain::DEFAULT_VIRTUALBOX_BINARY;

/// Raw VirtualBox configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileVirtualBoxConfig {
    /// Management CLI, a name looked up on `PATH` or an absolute path
    pub binary: String,
}

impl Default for FileVirtualBoxConfig {
    fn default() -> Self {
        Self {
            binary: DEFAULT_VIRTUALBOX_BINARY.to_string(),
        }
    }
}
