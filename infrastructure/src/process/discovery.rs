//! Backend binary discovery
//!
//! Checks whether the configured external CLIs can be found, so a missing
//! installation is reported up front instead of on the first call.
//!
//! ```text
//! $ vmscope tools
//! Backends:
//!   ✓ virtualbox  VBoxManage  /usr/bin/VBoxManage
//!   ✗ volatility  volatility  (not found on PATH)
//! ```

use std::path::PathBuf;
use vmscope_domain::{Backend, CommandBuilder};

/// Lookup result for one backend binary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryStatus {
    pub backend: Backend,
    /// Configured binary name or path
    pub binary: String,
    /// Resolved location, `None` when not found
    pub resolved: Option<PathBuf>,
}

impl BinaryStatus {
    pub fn is_available(&self) -> bool {
        self.resolved.is_some()
    }
}

/// Resolve every backend binary the builder would launch
pub fn discover_binaries(builder: &CommandBuilder) -> Vec<BinaryStatus> {
    [Backend::VirtualBox, Backend::Volatility]
        .into_iter()
        .map(|backend| {
            let binary = builder.binary(backend).to_string();
            let resolved = which::which(&binary).ok();
            BinaryStatus {
                backend,
                binary,
                resolved,
            }
        })
        .collect()
}
