//! Core configuration struct and loading logic.
//!
//! This module provides the main [`Config`] struct which aggregates all
//! configuration options for the dday application.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::env::apply_process_overrides;
use crate::error::Result;
use crate::persistence::{find_config_file, read_config_file, write_config_file};
use crate::sections::{EmbedConfig, ExportConfig, ImagesConfig, WidgetDefaults};

/// The main configuration struct for the dday application.
///
/// These are application settings only. Widget configurations themselves
/// are never stored; they live in the editor session or in embed links.
///
/// # Examples
///
/// ```
/// use dday_config::{Config, ExportConfig};
///
/// // Create a default config
/// let config = Config::default();
/// assert_eq!(config.export.pixel_ratio, 3);
///
/// // Override one section
/// let config = Config {
///     export: ExportConfig {
///         pixel_ratio: 2,
///         ..ExportConfig::default()
///     },
///     ..Config::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Embed link settings.
    #[serde(default)]
    pub embed: EmbedConfig,

    /// PNG export settings.
    #[serde(default)]
    pub export: ExportConfig,

    /// Starting style and theme for new widgets.
    #[serde(default)]
    pub defaults: WidgetDefaults,

    /// Image loading limits.
    #[serde(default)]
    pub images: ImagesConfig,
}

impl Config {
    /// Creates a new default configuration.
    ///
    /// This is equivalent to `Config::default()`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from the default file locations.
    ///
    /// Searches for configuration files in the following order:
    ///
    /// 1. Local: `./dday.json5` or `./dday.json`
    /// 2. User: `~/.config/dday/config.json5` or `~/.config/dday/config.json`
    ///
    /// If no configuration file is found, the defaults are used.
    /// Environment overrides are applied in both cases.
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file is found but cannot be
    /// read or parsed, or if the result fails validation.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use dday_config::Config;
    ///
    /// # async fn example() -> dday_config::Result<()> {
    /// let config = Config::load().await?;
    /// println!("Exporting to {}", config.export.output_path().display());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn load() -> Result<Self> {
        let mut config = match find_config_file() {
            Some(path) => read_config_file(&path).await?,
            None => {
                debug!("No config file found, using defaults");
                Self::default()
            }
        };
        apply_process_overrides(&mut config)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from an explicit path, or searches the default
    /// locations when `path` is `None`.
    ///
    /// An explicit path must exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if the
    /// result fails validation.
    pub async fn resolve(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Self::load().await;
        };
        let mut config: Config = read_config_file(path).await?;
        apply_process_overrides(&mut config)?;
        config.validate()?;
        Ok(config)
    }

    /// Writes the configuration to `path` as pretty JSON.
    ///
    /// An existing file is only replaced when `overwrite` is set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::AlreadyExists`](crate::ConfigError::AlreadyExists)
    /// if the file exists and `overwrite` is not set, or an error if the
    /// file cannot be written.
    pub async fn write_to(&self, path: &Path, overwrite: bool) -> Result<()> {
        write_config_file(path, self, overwrite).await
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any section fails validation.
    pub fn validate(&self) -> Result<()> {
        self.embed.validate()?;
        self.export.validate()?;
        self.images.validate()?;
        Ok(())
    }
}
