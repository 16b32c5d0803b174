//! Locating, reading and writing settings files.
//!
//! Files are read as JSON5, which also accepts plain JSON. `dday init`
//! writes pretty-printed JSON, since `serde_json5` cannot serialize.
//!
//! Lookup order, first hit wins:
//!
//! 1. `./dday.json5`, `./dday.json`
//! 2. `<config dir>/dday/config.json5`, `<config dir>/dday/config.json`
//!
//! An explicit `--config` path skips the lookup.

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::error::{ConfigError, Result};

const LOCAL_FILE_NAMES: [&str; 2] = ["dday.json5", "dday.json"];

const APP_DIR: &str = "dday";

const USER_FILE_NAMES: [&str; 2] = ["config.json5", "config.json"];

/// The file `dday init` writes inside the user config directory.
const INIT_FILE_NAME: &str = "config.json";

/// Looks for a settings file in the working directory, then in the
/// platform config directory.
#[must_use]
pub fn find_config_file() -> Option<PathBuf> {
    find_config_file_in(Path::new("."), dirs::config_dir().as_deref())
}

/// Looks in `local_dir`, then in `<user_config_dir>/dday`.
///
/// # Examples
///
/// ```
/// use dday_config::persistence::find_config_file_in;
///
/// let empty = tempfile::tempdir().unwrap();
/// assert_eq!(find_config_file_in(empty.path(), None), None);
/// ```
#[must_use]
pub fn find_config_file_in(local_dir: &Path, user_config_dir: Option<&Path>) -> Option<PathBuf> {
    let local = LOCAL_FILE_NAMES.iter().map(|name| local_dir.join(name));
    let user = user_config_dir
        .map(|dir| dir.join(APP_DIR))
        .into_iter()
        .flat_map(|dir| USER_FILE_NAMES.iter().map(move |name| dir.join(name)));

    let found = local.chain(user).find(|path| path.is_file());
    if let Some(path) = &found {
        debug!(path = %path.display(), "Found config file");
    }
    found
}

/// Where `dday init` writes when no path is given.
///
/// # Errors
///
/// Returns [`ConfigError::NoHomeDirectory`] if the platform has no config
/// directory.
pub fn init_config_path() -> Result<PathBuf> {
    let dir = dirs::config_dir().ok_or(ConfigError::NoHomeDirectory)?;
    Ok(dir.join(APP_DIR).join(INIT_FILE_NAME))
}

/// Reads and parses a settings file.
///
/// # Errors
///
/// Returns [`ConfigError::ReadFile`] if the file cannot be read and
/// [`ConfigError::ParseJson5`] if it does not parse.
pub async fn read_config_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(serde_json5::from_str(&content)?)
}

/// Writes `value` to `path` as pretty JSON, creating missing parent
/// directories.
///
/// An existing file is only replaced when `overwrite` is set.
///
/// # Errors
///
/// Returns [`ConfigError::AlreadyExists`] if the file exists and
/// `overwrite` is not set, and [`ConfigError::WriteFile`] on I/O failure.
pub async fn write_config_file<T: Serialize>(
    path: &Path,
    value: &T,
    overwrite: bool,
) -> Result<()> {
    let write_error = |source| ConfigError::WriteFile {
        path: path.to_path_buf(),
        source,
    };
    let mut content = serde_json::to_string_pretty(value)?;
    content.push('\n');

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(write_error)?;
    }

    let mut options = tokio::fs::OpenOptions::new();
    options.write(true);
    if overwrite {
        options.create(true).truncate(true);
    } else {
        options.create_new(true);
    }
    let mut file = options.open(path).await.map_err(|source| {
        if source.kind() == std::io::ErrorKind::AlreadyExists {
            ConfigError::AlreadyExists(path.to_path_buf())
        } else {
            write_error(source)
        }
    })?;
    file.write_all(content.as_bytes()).await.map_err(write_error)?;
    file.flush().await.map_err(write_error)?;

    debug!(path = %path.display(), "Wrote config file");
    Ok(())
}
