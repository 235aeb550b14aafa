//! Presentation layer for vmscope
//!
//! This crate contains CLI definitions, output formatters,
//! and the newline-delimited JSON serve loop.

pub mod cli;
pub mod output;
pub mod serve;

// Re-export commonly used types
pub use cli::commands::{CallArgs, CallArgsError, Cli, Command};
pub use output::console::{BackendRow, ConsoleFormatter};
pub use output::formatter::JsonFormatter;
pub use serve::{ServeRequest, ServeSummary, StdioServer};
