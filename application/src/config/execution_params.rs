//! Execution parameters: per-call process control.
//!
//! [`ExecutionParams`] groups the static parameters the dispatcher hands to
//! the process executor on every call. These are application-layer
//! concerns, not domain policy.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default wall-clock limit for one external invocation.
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Process control parameters shared by every call of one dispatcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionParams {
    /// Wall-clock limit after which the child is killed.
    pub timeout: Duration,
}

impl Default for ExecutionParams {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ExecutionParams {
    // ==================== Builder Methods ====================

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_timeout_secs(self, seconds: u64) -> Self {
        self.with_timeout(Duration::from_secs(seconds))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let params = ExecutionParams::default();
        assert_eq!(params.timeout, Duration::from_secs(300));
    }

    #[test]
    fn test_builder() {
        let params = ExecutionParams::default().with_timeout_secs(5);
        assert_eq!(params.timeout, Duration::from_secs(5));
    }
}
