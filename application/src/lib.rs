//! Application layer for vmscope
//!
//! This crate contains the tool dispatch use case, port definitions, and
//! application configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{DEFAULT_TIMEOUT_SECS, ExecutionParams};
pub use ports::{
    artifact_store::{ArtifactStoreError, ArtifactStorePort},
    call_logger::{CallEvent, CallLogger, NoCallLogger},
    process_executor::ProcessExecutorPort,
};
pub use use_cases::dispatch_tool::{
    DispatchToolUseCase,
    response::{ToolResponse, render, render_dumps},
};
