//! Environment variable overrides.
//!
//! Overrides are applied on top of the file (or default) configuration and
//! before validation.

use std::path::PathBuf;

use tracing::debug;

use crate::config::Config;
use crate::error::{ConfigError, Result};

/// Overrides `embed.base_url`.
pub const ENV_EMBED_BASE_URL: &str = "DDAY_EMBED_BASE_URL";

/// Overrides `export.directory`.
pub const ENV_EXPORT_DIR: &str = "DDAY_EXPORT_DIR";

/// Overrides `export.pixel_ratio`.
pub const ENV_PIXEL_RATIO: &str = "DDAY_PIXEL_RATIO";

/// Applies overrides read through `lookup`.
///
/// Empty values are ignored.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidEnv`] if `DDAY_PIXEL_RATIO` is not a
/// number.
///
/// # Examples
///
/// ```
/// use dday_config::Config;
/// use dday_config::env::apply_overrides;
///
/// let mut config = Config::default();
/// apply_overrides(&mut config, |var| {
///     (var == "DDAY_PIXEL_RATIO").then(|| "2".to_string())
/// })
/// .unwrap();
/// assert_eq!(config.export.pixel_ratio, 2);
/// ```
pub fn apply_overrides(
    config: &mut Config,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<()> {
    let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

    if let Some(url) = get(ENV_EMBED_BASE_URL) {
        debug!(var = ENV_EMBED_BASE_URL, "Applying environment override");
        config.embed.base_url = url.trim().to_string();
    }
    if let Some(dir) = get(ENV_EXPORT_DIR) {
        debug!(var = ENV_EXPORT_DIR, "Applying environment override");
        config.export.directory = PathBuf::from(dir);
    }
    if let Some(ratio) = get(ENV_PIXEL_RATIO) {
        debug!(var = ENV_PIXEL_RATIO, "Applying environment override");
        config.export.pixel_ratio =
            ratio
                .trim()
                .parse()
                .map_err(|e: std::num::ParseIntError| ConfigError::InvalidEnv {
                    var: ENV_PIXEL_RATIO,
                    value: ratio.clone(),
                    reason: e.to_string(),
                })?;
    }
    Ok(())
}

/// Applies overrides from the process environment.
///
/// # Errors
///
/// See [`apply_overrides`].
pub fn apply_process_overrides(config: &mut Config) -> Result<()> {
    apply_overrides(config, |var| std::env::var(var).ok())
}
