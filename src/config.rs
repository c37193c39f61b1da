//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides; the
//! binary applies command-line overrides on top.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::chart::ColorScale;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub dataset: DatasetConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub dashboard: DashboardConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Dataset location
#[derive(Debug, Clone, Deserialize)]
pub struct DatasetConfig {
    #[serde(default = "default_dataset_path")]
    pub path: String,
}

fn default_dataset_path() -> String {
    "COVID-19_Coronavirus.csv".to_string()
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: default_dataset_path(),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Allowed CORS origins; empty allows any origin
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8050
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
        }
    }
}

impl ApiConfig {
    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Page content and chart settings
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_title")]
    pub title: String,

    /// Continent selected when the page first loads
    #[serde(default = "default_continent")]
    pub default_continent: String,

    /// Countries shown in each ranking chart
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    #[serde(default = "default_map_color_scale")]
    pub map_color_scale: ColorScale,

    /// Footer credit; no footer when unset
    #[serde(default)]
    pub author: Option<String>,
}

fn default_title() -> String {
    "Covid-19 Dashboard Analytics".to_string()
}

fn default_continent() -> String {
    "Europe".to_string()
}

fn default_top_n() -> usize {
    5
}

fn default_map_color_scale() -> ColorScale {
    ColorScale::Fall
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            default_continent: default_continent(),
            top_n: default_top_n(),
            map_color_scale: default_map_color_scale(),
            author: None,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl LoggingConfig {
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Default search locations, in priority order
    pub fn default_paths() -> Vec<PathBuf> {
        [
            dirs::config_dir().map(|p| p.join("covid-dashboard").join("config.toml")),
            Some(PathBuf::from("./config.toml")),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Load from default locations or environment
    pub fn load_default() -> LoadedConfig {
        Self::load_first(&Self::default_paths())
    }

    /// Load the first of `paths` that exists and parses
    ///
    /// Nothing is logged here; the search often runs before the subscriber
    /// is installed, so the caller reports it with `LoadedConfig::log`.
    pub fn load_first(paths: &[PathBuf]) -> LoadedConfig {
        let mut skipped = Vec::new();

        for path in paths.iter().filter(|p| p.exists()) {
            match Self::load_with_env(path) {
                Ok(config) => {
                    return LoadedConfig {
                        config,
                        source: Some(path.clone()),
                        skipped,
                    }
                }
                Err(e) => skipped.push(e),
            }
        }

        LoadedConfig {
            config: Self::from_env(),
            source: None,
            skipped,
        }
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        if let Ok(path) = std::env::var("DASHBOARD_DATA_PATH") {
            self.dataset.path = path;
        }

        if let Ok(host) = std::env::var("DASHBOARD_HOST") {
            self.api.host = host;
        }
        if let Ok(port) = std::env::var("DASHBOARD_PORT") {
            if let Ok(p) = port.parse() {
                self.api.port = p;
            }
        }

        if let Ok(continent) = std::env::var("DASHBOARD_DEFAULT_CONTINENT") {
            self.dashboard.default_continent = continent;
        }

        if let Ok(level) = std::env::var("DASHBOARD_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("DASHBOARD_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Result of a config search
#[derive(Debug)]
pub struct LoadedConfig {
    pub config: Config,
    /// File the config came from; `None` means defaults plus environment
    pub source: Option<PathBuf>,
    /// Candidates that exist but failed to load
    pub skipped: Vec<ConfigError>,
}

impl LoadedConfig {
    /// A config loaded from an explicit path
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        Ok(Self {
            config: Config::load_with_env(path)?,
            source: Some(path.to_path_buf()),
            skipped: Vec::new(),
        })
    }

    /// Report how the config was found
    pub fn log(&self) {
        for error in &self.skipped {
            tracing::warn!("Skipping config: {}", error);
        }
        match &self.source {
            Some(path) => tracing::info!("Loaded config from {:?}", path),
            None => tracing::info!("Using default config with environment overrides"),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Covid-19 Dashboard Configuration
#
# Environment variables override these settings:
# - DASHBOARD_DATA_PATH
# - DASHBOARD_HOST
# - DASHBOARD_PORT
# - DASHBOARD_DEFAULT_CONTINENT
# - DASHBOARD_LOG_LEVEL
# - DASHBOARD_LOG_FORMAT

[dataset]
# CSV with Country, Continent, Total Cases, Total Deaths and
# ISO 3166-1 alpha-3 CODE columns
path = "COVID-19_Coronavirus.csv"

[api]
# Server host
host = "127.0.0.1"

# Server port
port = 8050

# Allowed CORS origins (empty allows any origin)
cors_origins = []

[dashboard]
# Page title
title = "Covid-19 Dashboard Analytics"

# Continent selected when the page loads
default_continent = "Europe"

# Countries shown in each ranking chart
top_n = 5

# Map colour scale: fall, reds
map_color_scale = "fall"

# Optional footer credit
# author = "..."

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.dataset.path, "COVID-19_Coronavirus.csv");
        assert_eq!(config.api.addr(), "127.0.0.1:8050");
        assert_eq!(config.dashboard.default_continent, "Europe");
        assert_eq!(config.dashboard.top_n, 5);
        assert_eq!(config.dashboard.map_color_scale, ColorScale::Fall);
        assert!(config.dashboard.author.is_none());
        assert!(!config.logging.is_json());
    }

    #[test]
    fn test_generated_config_parses_to_defaults() {
        let config = Config::parse(&generate_default_config()).unwrap();
        let defaults = Config::default();

        assert_eq!(config.dataset.path, defaults.dataset.path);
        assert_eq!(config.api.addr(), defaults.api.addr());
        assert_eq!(config.dashboard.title, defaults.dashboard.title);
        assert_eq!(config.dashboard.top_n, defaults.dashboard.top_n);
        assert_eq!(config.logging.level, defaults.logging.level);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[api]\nport = 9000\n\n[dashboard]\ndefault_continent = \"Asia\"\nmap_color_scale = \"reds\"\n\n[logging]\nformat = \"json\""
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.api.port, 9000);
        assert_eq!(config.api.host, "127.0.0.1");
        assert_eq!(config.dashboard.default_continent, "Asia");
        assert_eq!(config.dashboard.map_color_scale, ColorScale::Reds);
        assert_eq!(config.dashboard.top_n, 5);
        assert!(config.logging.is_json());
    }

    #[test]
    fn test_missing_file() {
        let err = Config::load(Path::new("/no/such/config.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_search_skips_broken_file() {
        let dir = tempfile::tempdir().unwrap();
        let broken = dir.path().join("broken.toml");
        let good = dir.path().join("good.toml");
        let absent = dir.path().join("absent.toml");
        std::fs::write(&broken, "[api\nport = ").unwrap();
        std::fs::write(&good, "[api]\nport = 9100\n").unwrap();

        let loaded = Config::load_first(&[absent, broken.clone(), good.clone()]);

        assert_eq!(loaded.source, Some(good));
        assert_eq!(loaded.config.api.port, 9100);
        assert_eq!(loaded.skipped.len(), 1);
        assert!(matches!(
            &loaded.skipped[0],
            ConfigError::Parse { path, .. } if *path == broken
        ));
    }

    #[test]
    fn test_search_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let broken = dir.path().join("config.toml");
        std::fs::write(&broken, "[api\nport = ").unwrap();

        let loaded = Config::load_first(&[broken]);

        assert!(loaded.source.is_none());
        assert_eq!(loaded.skipped.len(), 1);
        assert_eq!(loaded.config.dashboard.top_n, 5);
    }

    #[test]
    fn test_invalid_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[api\nport = ").unwrap();

        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
