use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use url::Url;

use crate::error::ConfigError;

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "CITYCAST_CONFIG";
/// Environment variable overriding `store.path`.
pub const DATABASE_ENV: &str = "CITYCAST_DATABASE";
/// Environment variable overriding `server.bind_addr`.
pub const BIND_ENV: &str = "CITYCAST_BIND";

const DEFAULT_STATS_USERNAME: &str = "forecast";
const DEFAULT_STATS_PASSWORD: &str = "forecast";

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a message summarizing all errors
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub api: ApiConfig,

    /// Credentials guarding the stats page
    #[serde(default)]
    pub stats: StatsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the HTTP server listens on
    pub bind_addr: String,

    /// Directory served under `/assets`
    pub assets_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".to_string(),
            assets_dir: PathBuf::from("assets"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// SQLite file holding cached city coordinates
    pub path: PathBuf,

    /// Abort startup when the store cannot be opened.
    ///
    /// When false the server runs in network-only mode instead.
    pub fail_fast: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        let path = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("citycast")
            .join("cities.db");

        Self {
            path,
            fail_fast: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the geocoding API
    pub geocoding_url: String,

    /// Base URL of the forecast API
    pub forecast_url: String,

    /// Timeout applied to every outbound request
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            geocoding_url: "https://geocoding-api.open-meteo.com/v1".to_string(),
            forecast_url: "https://api.open-meteo.com/v1".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsConfig {
    pub username: String,
    pub password: String,
}

impl StatsConfig {
    /// True while the shipped credential pair is still in use
    pub fn uses_default_credentials(&self) -> bool {
        self.username == DEFAULT_STATS_USERNAME && self.password == DEFAULT_STATS_PASSWORD
    }
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            username: DEFAULT_STATS_USERNAME.to_string(),
            password: DEFAULT_STATS_PASSWORD.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file, creating the default if it doesn't exist.
    ///
    /// Environment overrides are applied after the file is read.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;
        let mut config = Self::load_from(&config_path)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load configuration from an explicit path.
    pub fn load_from(config_path: &Path) -> Result<Self, ConfigError> {
        if !config_path.exists() {
            let config = Self::default();
            config.save_to(config_path)?;
            tracing::info!("Wrote default configuration to {}", config_path.display());
            return Ok(config);
        }

        let contents = std::fs::read_to_string(config_path).map_err(|source| ConfigError::Read {
            path: config_path.to_path_buf(),
            source,
        })?;

        Ok(toml::from_str(&contents)?)
    }

    /// Load configuration and validate it.
    ///
    /// Warnings are logged; errors fail the load.
    pub fn load_validated() -> Result<(Self, ValidationResult), ConfigError> {
        let config = Self::load()?;
        let validation = config.validate();

        if !validation.is_valid() {
            return Err(ConfigError::Invalid(validation.error_summary()));
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok((config, validation))
    }

    /// Apply environment overrides through `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(DATABASE_ENV).filter(|v| !v.is_empty()) {
            tracing::debug!("store.path overridden by {}", DATABASE_ENV);
            self.store.path = PathBuf::from(path);
        }
        if let Some(addr) = lookup(BIND_ENV).filter(|v| !v.is_empty()) {
            tracing::debug!("server.bind_addr overridden by {}", BIND_ENV);
            self.server.bind_addr = addr;
        }
    }

    /// Parsed listen address. Call after `validate`.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.server
            .bind_addr
            .parse()
            .map_err(|e| ConfigError::Invalid(format!("server.bind_addr: {}", e)))
    }

    /// Validate the configuration
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        if let Err(e) = self.server.bind_addr.parse::<SocketAddr>() {
            result.add_error("server.bind_addr", format!("Invalid socket address: {}", e));
        }

        if !self.server.assets_dir.is_dir() {
            result.add_warning(
                "server.assets_dir",
                format!(
                    "Directory does not exist: {}",
                    self.server.assets_dir.display()
                ),
            );
        }

        self.validate_url(&self.api.geocoding_url, "api.geocoding_url", &mut result);
        self.validate_url(&self.api.forecast_url, "api.forecast_url", &mut result);

        if self.api.timeout_secs == 0 {
            result.add_error("api.timeout_secs", "Timeout must be greater than 0");
        }

        if self.store.path.as_os_str().is_empty() {
            result.add_error("store.path", "Store path must not be empty");
        }

        if self.stats.username.is_empty() || self.stats.password.is_empty() {
            result.add_error("stats", "Username and password must not be empty");
        } else if self.stats.uses_default_credentials() {
            result.add_warning("stats", "Stats page uses the default credentials");
        }

        result
    }

    fn validate_url(&self, url_str: &str, field_name: &str, result: &mut ValidationResult) {
        match Url::parse(url_str) {
            Ok(url) => {
                if url.scheme() != "http" && url.scheme() != "https" {
                    result.add_error(
                        field_name,
                        format!("URL must use http or https scheme, got: {}", url.scheme()),
                    );
                }

                if url.host().is_none() {
                    result.add_error(field_name, "URL must have a host");
                }
            }
            Err(e) => {
                result.add_error(field_name, format!("Invalid URL: {}", e));
            }
        }
    }

    /// Save configuration to `config_path`, creating parent directories.
    pub fn save_to(&self, config_path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let contents = toml::to_string_pretty(self)?;

        std::fs::write(config_path, contents).map_err(|source| ConfigError::Write {
            path: config_path.to_path_buf(),
            source,
        })
    }

    /// Path of the configuration file
    fn config_path() -> Result<PathBuf, ConfigError> {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            if !path.is_empty() {
                return Ok(PathBuf::from(path));
            }
        }

        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NoConfigDir)?
            .join("citycast");

        Ok(config_dir.join("config.toml"))
    }
}
