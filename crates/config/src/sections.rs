//! Configuration sections.
//!
//! Each section deserializes with per-field defaults, so a config file only
//! needs to mention the values it changes.

use std::path::{Path, PathBuf};
use std::time::Duration;

use dday_protocol::{ThemeColor, WidgetStyle};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{ConfigError, Result};

/// Default base URL for embed links.
pub const DEFAULT_EMBED_BASE_URL: &str = "https://dday.example/embed";

/// Default export file name.
pub const DEFAULT_EXPORT_FILE_NAME: &str = "my-dday-widget.png";

/// Default export scale.
pub const DEFAULT_PIXEL_RATIO: u32 = 3;

/// Smallest allowed export scale.
pub const MIN_PIXEL_RATIO: u32 = 1;

/// Largest allowed export scale.
pub const MAX_PIXEL_RATIO: u32 = 8;

/// Default image request timeout in seconds.
pub const DEFAULT_IMAGE_TIMEOUT_SECS: u64 = 10;

/// Default image size limit (10 MiB).
pub const DEFAULT_IMAGE_MAX_BYTES: u64 = 10 * 1024 * 1024;

/// Where embed links point.
///
/// # Examples
///
/// ```
/// use dday_config::EmbedConfig;
///
/// let embed = EmbedConfig::default();
/// assert_eq!(embed.url().unwrap().as_str(), "https://dday.example/embed");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedConfig {
    /// The page that renders a widget from query parameters.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    DEFAULT_EMBED_BASE_URL.to_string()
}

impl Default for EmbedConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl EmbedConfig {
    /// Parses the base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the base URL is not an
    /// absolute `http` or `https` URL.
    pub fn url(&self) -> Result<Url> {
        let input = self.base_url.trim();
        let url = Url::parse(input).map_err(|e| ConfigError::InvalidBaseUrl {
            url: input.to_string(),
            reason: e.to_string(),
        })?;
        match url.scheme() {
            "http" | "https" if url.host().is_some() => Ok(url),
            scheme => Err(ConfigError::InvalidBaseUrl {
                url: input.to_string(),
                reason: format!("scheme {scheme:?} is not http or https"),
            }),
        }
    }

    /// Validates the section.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] for non-http(s) base URLs.
    pub fn validate(&self) -> Result<()> {
        self.url().map(|_| ())
    }
}

/// PNG export settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory the PNG is written to.
    #[serde(default = "default_directory")]
    pub directory: PathBuf,

    /// File name of the PNG.
    #[serde(default = "default_file_name")]
    pub file_name: String,

    /// Output scale relative to the widget's pixel size.
    #[serde(default = "default_pixel_ratio")]
    pub pixel_ratio: u32,
}

fn default_directory() -> PathBuf {
    PathBuf::from(".")
}

fn default_file_name() -> String {
    DEFAULT_EXPORT_FILE_NAME.to_string()
}

fn default_pixel_ratio() -> u32 {
    DEFAULT_PIXEL_RATIO
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            file_name: default_file_name(),
            pixel_ratio: DEFAULT_PIXEL_RATIO,
        }
    }
}

impl ExportConfig {
    /// Returns the full path of the exported PNG.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::Path;
    /// use dday_config::ExportConfig;
    ///
    /// let export = ExportConfig::default();
    /// assert_eq!(export.output_path(), Path::new("./my-dday-widget.png"));
    /// ```
    #[must_use]
    pub fn output_path(&self) -> PathBuf {
        self.directory.join(&self.file_name)
    }

    /// Returns a copy writing into `directory`.
    #[must_use]
    pub fn in_directory(&self, directory: impl AsRef<Path>) -> Self {
        Self {
            directory: directory.as_ref().to_path_buf(),
            ..self.clone()
        }
    }

    /// Validates the section.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPixelRatio`] if the ratio is outside
    /// 1..=8, and [`ConfigError::InvalidFileName`] if the file name is empty,
    /// contains a path separator or does not end in `.png`.
    pub fn validate(&self) -> Result<()> {
        if !(MIN_PIXEL_RATIO..=MAX_PIXEL_RATIO).contains(&self.pixel_ratio) {
            return Err(ConfigError::InvalidPixelRatio(self.pixel_ratio));
        }
        let name = self.file_name.as_str();
        let stem_ok = name.len() > ".png".len() && !name.contains(['/', '\\']);
        if !stem_ok || !name.to_ascii_lowercase().ends_with(".png") {
            return Err(ConfigError::InvalidFileName(self.file_name.clone()));
        }
        Ok(())
    }
}

/// Starting values for new widgets in the editor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetDefaults {
    #[serde(default)]
    pub style: WidgetStyle,
    #[serde(default)]
    pub theme: ThemeColor,
}

/// Image loading limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImagesConfig {
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Largest accepted image, in bytes.
    #[serde(default = "default_max_bytes")]
    pub max_bytes: u64,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_IMAGE_TIMEOUT_SECS
}

fn default_max_bytes() -> u64 {
    DEFAULT_IMAGE_MAX_BYTES
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_IMAGE_TIMEOUT_SECS,
            max_bytes: DEFAULT_IMAGE_MAX_BYTES,
        }
    }
}

impl ImagesConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validates the section.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidTimeout`] if the timeout is zero.
    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout);
        }
        Ok(())
    }
}
