//! External process adapters
//!
//! - [`TokioProcessExecutor`]: implements [`ProcessExecutorPort`](vmscope_application::ProcessExecutorPort)
//! - [`discover_binaries`]: `PATH` lookup of the configured backend CLIs

mod discovery;
mod executor;

pub use discovery::{BinaryStatus, discover_binaries};
pub use executor::TokioProcessExecutor;
