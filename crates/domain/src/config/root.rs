use serde::{Deserialize, Serialize};

use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::lookup::LookupConfig;
use crate::resolver_address::ResolverAddress;

/// Main configuration structure for Ferrous Lookup
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Query behaviour (timeout, port, resolver discovery)
    #[serde(default)]
    pub lookup: LookupConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. ferrous-lookup.toml in current directory
    /// 3. /etc/ferrous-lookup/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if let Some(path) = Self::get_config_path() {
            Self::from_file(&path)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(timeout) = overrides.query_timeout {
            self.lookup.query_timeout = timeout;
        }
        if let Some(port) = overrides.port {
            self.lookup.port = port;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lookup.query_timeout == 0 {
            return Err(ConfigError::Validation(
                "Query timeout cannot be 0".to_string(),
            ));
        }

        if self.lookup.port == 0 {
            return Err(ConfigError::Validation("DNS port cannot be 0".to_string()));
        }

        for entry in &self.lookup.fallback_resolvers {
            entry
                .parse::<ResolverAddress>()
                .map_err(ConfigError::Validation)?;
        }

        Ok(())
    }

    /// Get the path to the configuration file being used
    pub fn get_config_path() -> Option<String> {
        if std::path::Path::new("ferrous-lookup.toml").exists() {
            Some("ferrous-lookup.toml".to_string())
        } else if std::path::Path::new("/etc/ferrous-lookup/config.toml").exists() {
            Some("/etc/ferrous-lookup/config.toml".to_string())
        } else {
            None
        }
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub query_timeout: Option<u64>,
    pub port: Option<u16>,
    pub log_level: Option<String>,
}
