//! Process executor port
//!
//! Defines the interface for running one external tool invocation.

use async_trait::async_trait;
use std::time::Duration;
use vmscope_domain::{ArgumentVector, ExecutionOutcome};

/// Port for launching external processes
///
/// Implementations (adapters) live in the infrastructure layer. An
/// implementation must:
///
/// - launch `argv.program()` with `argv.args()` directly, never via a shell
/// - capture stdout and stderr into independent buffers
/// - kill the child when `timeout` elapses or the returned future is dropped
/// - report a non-zero exit as `Ok`, never as an error
#[async_trait]
pub trait ProcessExecutorPort: Send + Sync {
    /// Run `argv` to completion or until `timeout` elapses.
    async fn execute(&self, argv: &ArgumentVector, timeout: Duration) -> ExecutionOutcome;
}
