//! Domain layer for vmscope
//!
//! This crate contains the pure core of the tool layer: the tool catalogue,
//! argument vector construction, stdout parsing and result normalization.
//! It has no dependencies on process execution, filesystem access or
//! presentation concerns.
//!
//! # Core Concepts
//!
//! ## Tool call pipeline
//!
//! ```text
//! ToolCall ──build──▶ ArgumentVector ──(executor)──▶ ExecutionOutcome
//!                                                          │
//!                    NormalizedResult ◀──normalize── parse ┘
//! ```
//!
//! ## Backends
//!
//! - **VirtualBox**: VM lifecycle and guest control through `VBoxManage`
//! - **Volatility**: memory forensics plugins run against dump files

pub mod command;
pub mod core;
pub mod output;
pub mod tool;

// Re-export commonly used types
pub use command::{
    argv::ArgumentVector,
    builder::{
        CommandBuilder, DEFAULT_DUMPS_DIR, DEFAULT_VIRTUALBOX_BINARY, DEFAULT_VOLATILITY_BINARY,
    },
};
pub use core::error::BuildError;
pub use output::{
    normalizer::normalize,
    parser::{OutputFormat, parse},
};
pub use tool::{
    catalog::{ToolKind, default_tool_spec},
    entities::{Backend, CREDENTIALS_KEY, Credentials, ToolCall, ToolDefinition, ToolParameter, ToolSpec},
    value_objects::{
        ExecutionOutcome, InfrastructureError, InfrastructureErrorKind, ListEntry,
        NormalizedResult, ParsedRecord, ProcessOutput,
    },
};
