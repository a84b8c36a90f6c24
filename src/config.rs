//! Configuration management for pagelift
//!
//! This module handles loading, parsing, and validation of configuration files.

use crate::constants::{
    CONFIG_GENERATED, DEFAULT_ABSOLUTE_CLASS, DEFAULT_CACHE_EXPIRY_ID, DEFAULT_RELATIVE_CLASS,
    DEFAULT_TABLE_ID, DISPLAY_DATETIME_FORMAT, PAGE_LENGTH_MAX, PAGE_LENGTH_MIN,
};
use crate::widget::TableConfig;
use anyhow::{Context, Result};
use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub selectors: SelectorConfig,
    pub display: DisplayConfig,
    pub table: TableConfig,
    pub logging: LoggingConfig,
}

/// Selector configuration
///
/// Class and id names are stored without their `.`/`#` prefix.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// Class marking elements rewritten to the fixed datetime format
    pub absolute_class: String,
    /// Class marking elements rewritten to a humanized relative duration
    pub relative_class: String,
    /// Id of the element showing when the page's backing cache expires
    pub cache_expiry_id: String,
    /// Id of the releases table handed to the table widget
    pub table_id: String,
}

/// Display configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// strftime pattern for absolute datetimes
    pub datetime_format: String,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    /// Enable logging
    pub enabled: bool,
    /// Log file path; records go to stderr when unset
    pub file: Option<PathBuf>,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            absolute_class: DEFAULT_ABSOLUTE_CLASS.to_string(),
            relative_class: DEFAULT_RELATIVE_CLASS.to_string(),
            cache_expiry_id: DEFAULT_CACHE_EXPIRY_ID.to_string(),
            table_id: DEFAULT_TABLE_ID.to_string(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            datetime_format: DISPLAY_DATETIME_FORMAT.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file or return defaults
    pub fn load() -> Result<Self> {
        let config_path = Self::find_config_file()?;

        if let Some(path) = config_path {
            Self::load_from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Find configuration file in order of precedence
    fn find_config_file() -> Result<Option<PathBuf>> {
        // 1. Check current directory
        let current_dir_config = PathBuf::from("pagelift.toml");
        if current_dir_config.exists() {
            return Ok(Some(current_dir_config));
        }

        // 2. Check XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("pagelift").join("config.toml");
            if xdg_config.exists() {
                return Ok(Some(xdg_config));
            }
        }

        Ok(None)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        // Validate selector names
        Self::validate_name("selectors.absolute_class", &self.selectors.absolute_class)?;
        Self::validate_name("selectors.relative_class", &self.selectors.relative_class)?;
        Self::validate_name("selectors.cache_expiry_id", &self.selectors.cache_expiry_id)?;
        Self::validate_name("selectors.table_id", &self.selectors.table_id)?;

        // The absolute and relative selections must stay disjoint
        if self.selectors.absolute_class == self.selectors.relative_class {
            anyhow::bail!(
                "absolute_class and relative_class cannot both be '{}'",
                self.selectors.absolute_class
            );
        }

        // Validate table settings
        if self.table.page_length < PAGE_LENGTH_MIN || self.table.page_length > PAGE_LENGTH_MAX {
            anyhow::bail!(
                "page_length must be between {} and {} rows, got {}",
                PAGE_LENGTH_MIN,
                PAGE_LENGTH_MAX,
                self.table.page_length
            );
        }

        // Validate the datetime display format
        let has_error = StrftimeItems::new(&self.display.datetime_format)
            .any(|item| matches!(item, Item::Error));
        if has_error {
            anyhow::bail!("Invalid datetime_format '{}'", self.display.datetime_format);
        }

        Ok(())
    }

    /// Check that a configured class or id is a usable selector name
    fn validate_name(key: &str, name: &str) -> Result<()> {
        if name.is_empty() {
            anyhow::bail!("{} cannot be empty", key);
        }
        if name.starts_with(|c: char| c.is_ascii_digit() || c == '-') {
            anyhow::bail!("{} cannot start with a digit or hyphen, got '{}'", key, name);
        }
        if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
            anyhow::bail!(
                "{} may only contain letters, digits, hyphens and underscores, got '{}'",
                key,
                name
            );
        }
        Ok(())
    }

    /// Generate default configuration file
    pub fn generate_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
        let config = Self::default();
        let toml_content = toml::to_string_pretty(&config).context("Failed to serialize default config")?;

        // Add header comment
        let header = format!(
            "# Pagelift Configuration File\n# Generated on {}\n\n",
            chrono::Local::now().format("%Y-%m-%d")
        );

        let full_content = header + &toml_content;

        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }

        std::fs::write(&path, full_content)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        println!("{}: {}", CONFIG_GENERATED, path.as_ref().display());
        Ok(())
    }

    /// Get the XDG config directory path
    pub fn get_xdg_config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
            .map(|dir| dir.join("pagelift"))
    }

    /// Get the default config file path
    pub fn get_default_config_path() -> Result<PathBuf> {
        Ok(Self::get_xdg_config_dir()?.join("config.toml"))
    }
}
