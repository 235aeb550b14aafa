//! Tool domain module
//!
//! A **tool** is one named, parameterized operation that drives an external
//! CLI (VirtualBox's `VBoxManage` or Volatility 3). This module holds the
//! catalogue of tools and the value types a call passes through:
//!
//! ```text
//! ┌──────────────┐    ┌──────────────┐    ┌──────────────────┐
//! │ ToolSpec     │───▶│ ToolCall     │───▶│ NormalizedResult │
//! │ (catalogue)  │    │ (parameters) │    │ (tagged outcome) │
//! └──────────────┘    └──────────────┘    └──────────────────┘
//! ```
//!
//! # Key Types
//!
//! - [`ToolKind`]: the fixed enumerated set of tools and their contracts
//! - [`ToolSpec`] / [`ToolDefinition`]: listing-friendly schema of each tool
//! - [`ToolCall`]: the immutable parameter mapping of one call
//! - [`ExecutionOutcome`](value_objects::ExecutionOutcome): what the process produced
//! - [`ParsedRecord`]: typed view of stdout
//! - [`NormalizedResult`]: the only value handed back to the dispatcher

pub mod catalog;
pub mod entities;
pub mod value_objects;

pub use catalog::{ToolKind, default_tool_spec};
pub use entities::{Backend, Credentials, ToolCall, ToolDefinition, ToolParameter, ToolSpec};
pub use value_objects::{
    ExecutionOutcome, InfrastructureError, InfrastructureErrorKind, ListEntry, NormalizedResult,
    ParsedRecord, ProcessOutput,
};
