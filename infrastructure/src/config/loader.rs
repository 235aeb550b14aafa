//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

/// Project-level config file names, checked in order
const PROJECT_CONFIG_FILES: [&str; 2] = ["vmscope.toml", ".vmscope.toml"];

/// Prefix of environment overrides (`VMSCOPE_EXECUTION__TIMEOUT_SECS=30`)
const ENV_PREFIX: &str = "VMSCOPE_";

/// Dumps directory variable honoured for compatibility with existing deployments
const DUMPS_PATH_ENV: &str = "VOLATILITY_MEMORY_DUMPS_PATH";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `VOLATILITY_MEMORY_DUMPS_PATH` (dumps directory only)
    /// 2. `VMSCOPE_*` environment variables, `__` separating sections
    /// 3. Explicit config path (if provided)
    /// 4. Project root: `./vmscope.toml` or `./.vmscope.toml`
    /// 5. Global: `$XDG_CONFIG_HOME/vmscope/config.toml`
    /// 6. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        Self::figment(config_path).extract().map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    fn figment(config_path: Option<&PathBuf>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(&global_path));
        }

        if let Some(project_path) = Self::project_config_path() {
            figment = figment.merge(Toml::file(&project_path));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .merge(
                Env::raw()
                    .only(&[DUMPS_PATH_ENV])
                    .map(|_| "volatility.dumps_dir".into()),
            )
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/vmscope/config.toml if set,
    /// otherwise the platform config directory.
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("vmscope").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        Self::project_config_in(Path::new("."))
    }

    fn project_config_in(dir: &Path) -> Option<PathBuf> {
        PROJECT_CONFIG_FILES
            .iter()
            .map(|filename| dir.join(filename))
            .find(|path| path.exists())
    }

    /// Describe the config file locations being used (for debugging)
    pub fn describe_sources(config_path: Option<&PathBuf>) -> Vec<String> {
        let mut lines = vec!["Configuration sources (in priority order):".to_string()];

        lines.push(format!("  [ENV  ] {}* and {}", ENV_PREFIX, DUMPS_PATH_ENV));

        match config_path {
            Some(path) if path.exists() => lines.push(format!("  [FOUND] Explicit: {}", path.display())),
            Some(path) => lines.push(format!("  [     ] Explicit: {}", path.display())),
            None => {}
        }

        match Self::project_config_path() {
            Some(path) => lines.push(format!("  [FOUND] Project: {}", path.display())),
            None => lines.push("  [     ] Project: ./vmscope.toml or ./.vmscope.toml".to_string()),
        }

        if let Some(path) = Self::global_config_path() {
            let marker = if path.exists() { "FOUND" } else { "     " };
            lines.push(format!("  [{}] Global:  {}", marker, path.display()));
        }

        lines.push("  [     ] Default: built-in defaults".to_string());
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.execution.timeout_secs, 300);
        assert_eq!(config.virtualbox.binary, "VBoxManage");
    }

    #[test]
    fn test_global_config_path_returns_some() {
        // Should return a path (even if file doesn't exist)
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains("vmscope"));
    }

    #[test]
    fn test_explicit_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[virtualbox]\nbinary = \"/opt/vbox/VBoxManage\"").unwrap();

        let config = ConfigLoader::load(Some(&path)).unwrap();
        assert_eq!(config.virtualbox.binary, "/opt/vbox/VBoxManage");
        // Untouched sections keep their defaults
        assert_eq!(config.volatility.binary, "volatility");
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "[execution]\ntimeout_secs = \"soon\"\n").unwrap();

        assert!(ConfigLoader::load(Some(&path)).is_err());
    }

    #[test]
    fn test_project_config_prefers_plain_name() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".vmscope.toml"), "").unwrap();
        assert_eq!(
            ConfigLoader::project_config_in(dir.path()),
            Some(dir.path().join(".vmscope.toml"))
        );

        std::fs::write(dir.path().join("vmscope.toml"), "").unwrap();
        assert_eq!(
            ConfigLoader::project_config_in(dir.path()),
            Some(dir.path().join("vmscope.toml"))
        );
    }

    #[test]
    fn test_describe_sources_mentions_env() {
        let lines = ConfigLoader::describe_sources(None);
        assert!(lines.iter().any(|l| l.contains("VOLATILITY_MEMORY_DUMPS_PATH")));
        assert!(lines.last().unwrap().contains("Default"));
    }
}
