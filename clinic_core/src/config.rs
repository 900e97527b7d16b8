//! Configuration file support for the clinic form.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/clinic-form/config.toml`.

use crate::access::DEFAULT_SECRET_ENV;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub access: AccessConfig,

    #[serde(default)]
    pub export: ExportConfig,
}

/// Access gate configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AccessConfig {
    /// Name of the environment variable holding the shared secret
    #[serde(default = "default_secret_env")]
    pub secret_env: String,
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            secret_env: default_secret_env(),
        }
    }
}

/// CSV export configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
        }
    }
}

// Default value functions
fn default_secret_env() -> String {
    DEFAULT_SECRET_ENV.into()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        match Self::default_config_path() {
            Some(config_path) if config_path.exists() => Self::load_from(&config_path),
            config_path => {
                tracing::debug!(
                    "No config file found at {:?}, using defaults",
                    config_path
                );
                Ok(Self::default())
            }
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path, if a config directory is known
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|base| base.join("clinic-form").join("config.toml"))
    }

    fn validate(&self) -> Result<()> {
        if self.access.secret_env.trim().is_empty() {
            return Err(Error::Config("access.secret_env must not be empty".into()));
        }
        Ok(())
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}
