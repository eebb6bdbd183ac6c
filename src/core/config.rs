//! Configuration management with layered hierarchy

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::core::address::DEFAULT_COUNTRY;

/// emreg configuration with layered hierarchy
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Country pre-filled in new addresses
    pub default_country: Option<String>,

    /// Directory drafts are written to on save-and-quit
    pub draft_dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load() -> Self {
        let mut config = Config::default();

        // 1. Built-in defaults (already in Default impl)

        // 2. Global user config (~/.config/emreg/config.yaml)
        if let Some(global_path) = Self::global_config_path() {
            if let Some(global) = Self::read_file(&global_path) {
                config.merge(global);
            }
        }

        // 3. Environment variables
        config.merge(Self::from_env(|key| std::env::var(key).ok()));

        config
    }

    /// Parse a config file, ignoring missing or malformed files
    pub fn read_file(path: &Path) -> Option<Self> {
        let contents = std::fs::read_to_string(path).ok()?;
        match serde_yml::from_str::<Config>(&contents) {
            Ok(config) => Some(config),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring malformed config");
                None
            }
        }
    }

    /// Build the environment layer from a variable lookup
    pub fn from_env(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            default_country: lookup("EMREG_DEFAULT_COUNTRY"),
            draft_dir: lookup("EMREG_DRAFT_DIR").map(PathBuf::from),
        }
    }

    /// Get the path to the global config file
    fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "emreg")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Merge another config into this one (other takes precedence)
    ///
    /// A blank country never overrides, so new addresses always start
    /// with a non-empty country.
    pub fn merge(&mut self, other: Config) {
        if let Some(country) = other.default_country {
            if !country.trim().is_empty() {
                self.default_country = Some(country);
            }
        }
        if other.draft_dir.is_some() {
            self.draft_dir = other.draft_dir;
        }
    }

    /// Country to pre-fill in new addresses
    pub fn default_country(&self) -> &str {
        self.default_country.as_deref().unwrap_or(DEFAULT_COUNTRY)
    }

    /// Directory for drafts, defaulting to the current directory
    pub fn draft_dir(&self) -> PathBuf {
        self.draft_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}
