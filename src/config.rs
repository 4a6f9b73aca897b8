use crate::error::{Error, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Expand level used when none is configured or the configured one is invalid.
pub const DEFAULT_EXPAND_LEVEL: usize = 2;

/// Accepted range for the default expand level.
pub const EXPAND_LEVEL_RANGE: std::ops::RangeInclusive<i64> = 1..=5;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub outline: OutlineConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutlineConfig {
    /// Entries shallower than this level start expanded (1-5)
    #[serde(default = "default_expand_level")]
    pub default_expand_level: i64,
}

impl Default for OutlineConfig {
    fn default() -> Self {
        Self {
            default_expand_level: default_expand_level(),
        }
    }
}

fn default_expand_level() -> i64 {
    DEFAULT_EXPAND_LEVEL as i64
}

/// Validate a raw expand level, falling back to the default when out of range.
pub fn validate_expand_level(raw: i64) -> usize {
    if EXPAND_LEVEL_RANGE.contains(&raw) {
        raw as usize
    } else {
        warn!(
            "default expand level {} outside {}..={}, using {}",
            raw,
            EXPAND_LEVEL_RANGE.start(),
            EXPAND_LEVEL_RANGE.end(),
            DEFAULT_EXPAND_LEVEL
        );
        DEFAULT_EXPAND_LEVEL
    }
}

impl Config {
    /// Get the platform-specific config file path
    /// - macOS: ~/Library/Application Support/tocmd/config.toml
    /// - Linux: ~/.config/tocmd/config.toml
    /// - Windows: %APPDATA%/tocmd/config.toml
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("tocmd").join("config.toml"))
    }

    /// Load config from the platform path, or return default if missing or invalid
    pub fn load() -> Self {
        Self::config_path()
            .map(|path| Self::load_from(&path))
            .unwrap_or_default()
    }

    /// Load config from a specific file, or return default if missing or invalid
    pub fn load_from(path: &Path) -> Self {
        let Ok(contents) = fs::read_to_string(path) else {
            return Self::default();
        };

        match Self::parse(&contents) {
            Ok(config) => config,
            Err(e) => {
                warn!("ignoring invalid config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Parse config from TOML text
    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Save config to the platform path
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path().ok_or(Error::MissingConfigDir)?;
        self.save_to(&path)
    }

    /// Save config to a specific file, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;

        Ok(())
    }

    /// Validated default expand level
    pub fn expand_level(&self) -> usize {
        validate_expand_level(self.outline.default_expand_level)
    }

    /// Update the default expand level. Rejects values outside 1-5.
    pub fn set_default_expand_level(&mut self, level: i64) -> Result<()> {
        if !EXPAND_LEVEL_RANGE.contains(&level) {
            return Err(Error::InvalidExpandLevel(level));
        }
        self.outline.default_expand_level = level;
        Ok(())
    }
}
