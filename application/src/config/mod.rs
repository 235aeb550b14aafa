//! Application-level configuration.
//!
//! - [`ExecutionParams`]: per-call process control (timeout)

pub mod execution_params;

pub use execution_params::{DEFAULT_TIMEOUT_SECS, ExecutionParams};
