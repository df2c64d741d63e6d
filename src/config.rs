//! Configuration file
//!
//! A JSON object; every key is optional:
//!
//! ```json
//! {
//!   "character_page_limit": 20,
//!   "log_level": "info",
//!   "log_json": false,
//!   "default_guide_path": "guides/default.json"
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::guide::{GuideDefaults, GuideError, GuideLoader};

/// File read when no `--config` is given
pub const DEFAULT_CONFIG_FILE: &str = "charbase.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Unreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Invalid config value: {0}")]
    Invalid(String),

    #[error("Default guide unusable: {0}")]
    Guide(#[from] GuideError),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Characters per list page
    #[serde(default = "default_character_page_limit")]
    pub character_page_limit: u64,

    /// Filter directive used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Emit logs as JSON lines
    #[serde(default)]
    pub log_json: bool,

    /// Guide file replacing the built-in default guide
    #[serde(default)]
    pub default_guide_path: Option<PathBuf>,
}

fn default_character_page_limit() -> u64 {
    20
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            character_page_limit: default_character_page_limit(),
            log_level: default_log_level(),
            log_json: false,
            default_guide_path: None,
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Unreadable {
            path: path.display().to_string(),
            source,
        })?;

        Self::parse(&content)
    }

    /// Like [`Config::load`], but a missing file yields the defaults
    pub fn load_or_default(path: &Path) -> ConfigResult<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse and validate configuration JSON
    pub fn parse(content: &str) -> ConfigResult<Self> {
        let config: Config = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> ConfigResult<()> {
        if self.character_page_limit == 0 {
            return Err(ConfigError::Invalid("character_page_limit must be > 0".into()));
        }
        if self.log_level.trim().is_empty() {
            return Err(ConfigError::Invalid("log_level must not be empty".into()));
        }
        Ok(())
    }

    /// Guide and settings for new universes
    pub fn guide_defaults(&self) -> ConfigResult<GuideDefaults> {
        let defaults = GuideDefaults::standard();
        match &self.default_guide_path {
            Some(path) => Ok(defaults.with_guide(GuideLoader::load_file(path)?)),
            None => Ok(defaults),
        }
    }
}
