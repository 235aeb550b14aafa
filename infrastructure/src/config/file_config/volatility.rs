//! Volatility configuration from TOML (`[volatility]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use vmscope_domain::{DEFAULT_DUMPS_DIR, DEFAULT_VOLATILITY_BINARY};

/// Raw Volatility configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileVolatilityConfig {
    /// Volatility 3 entry point (`volatility`, `vol`, `vol.py`, ...)
    pub binary: String,
    /// Directory memory dump names are resolved against
    pub dumps_dir: PathBuf,
}

impl Default for FileVolatilityConfig {
    fn default() -> Self {
        Self {
            binary: DEFAULT_VOLATILITY_BINARY.to_string(),
            dumps_dir: PathBuf::from(DEFAULT_DUMPS_DIR),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volatility_deserialize_partial() {
        let toml_str = r#"
[volatility]
dumps_dir = "/srv/dumps"
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.volatility.dumps_dir, PathBuf::from("/srv/dumps"));
        assert_eq!(config.volatility.binary, "volatility");
    }
}
