//! Application configuration.
//!
//! Loaded once at start-up from TOML and passed down by reference. The
//! default location is the platform config directory:
//! - Linux: `~/.config/tabula/config.toml`
//! - macOS: `~/Library/Application Support/dev.tabula.tabula/config.toml`
//! - Windows: `%APPDATA%\tabula\tabula\config\config.toml`

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use tabula_insights::{InsightLimits, ProviderSettings};

const APP_QUALIFIER: &str = "dev";
const APP_ORG: &str = "tabula";
const APP_NAME: &str = "tabula";
const CONFIG_FILENAME: &str = "config.toml";

/// Environment variables checked for the provider key, in priority order.
pub const API_KEY_ENV_VARS: [&str; 2] = ["TABULA_API_KEY", "GOOGLE_GEMINI_API_KEY"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Background enhancement settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnhancementSettings {
    /// Dispatch enhancement after each analysis.
    pub enabled: bool,
    /// Upper bound on enhancements running at once.
    pub max_concurrent: usize,
}

impl Default for EnhancementSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            max_concurrent: 4,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    /// Directory for analysis documents; the platform data dir when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

impl StoreSettings {
    /// Directory to use, falling back to the platform data directory.
    pub fn resolve_dir(&self) -> Option<PathBuf> {
        self.dir.clone().or_else(|| {
            ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
                .map(|dirs| dirs.data_dir().join("analyses"))
        })
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TabulaConfig {
    pub provider: ProviderSettings,
    pub insights: InsightLimits,
    pub enhancement: EnhancementSettings,
    pub store: StoreSettings,
}

impl TabulaConfig {
    /// Default config file location, if the platform has one.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
            .map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
    }

    /// Load configuration and apply environment overrides.
    ///
    /// An explicit `path` must exist. Without one, a missing file at the
    /// default location yields defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                Some(path) => {
                    tracing::debug!(path = %path.display(), "no config file, using defaults");
                    Self::default()
                }
                None => {
                    tracing::warn!("could not determine config path, using defaults");
                    Self::default()
                }
            },
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Override settings from the environment through `lookup`.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let key = API_KEY_ENV_VARS
            .iter()
            .filter_map(|name| lookup(name))
            .find(|value| !value.trim().is_empty());
        if let Some(key) = key {
            self.provider.api_key = Some(key);
        }
    }
}
