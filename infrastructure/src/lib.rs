//! Infrastructure layer for vmscope
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod artifacts;
pub mod config;
pub mod logging;
pub mod process;

// Re-export commonly used types
pub use artifacts::LocalArtifactStore;
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileExecutionConfig, FileLoggingConfig,
    FileVirtualBoxConfig, FileVolatilityConfig,
};
pub use logging::JsonlCallLogger;
pub use process::{BinaryStatus, TokioProcessExecutor, discover_binaries};
