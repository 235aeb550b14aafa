//! Configuration file loading for vmscope
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment: `VOLATILITY_MEMORY_DUMPS_PATH`, then `VMSCOPE_*`
//! 2. `--config <path>` specified file
//! 3. Project root: `./vmscope.toml` or `./.vmscope.toml`
//! 4. Global: `$XDG_CONFIG_HOME/vmscope/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileConfig, FileExecutionConfig, FileLoggingConfig,
    FileVirtualBoxConfig, FileVolatilityConfig,
};
pub use loader::ConfigLoader;
