//! Image references.
//!
//! A widget image is either a network URL, which can travel inside an embed
//! link, or a local reference that only lives as long as the editing session
//! (the bundled placeholder or a file picked from disk). The distinction is a
//! type-level one: link encoding only ever sees [`ImageSource::portable_url`].

use std::fmt;
use std::path::PathBuf;

use url::Url;

use crate::error::{ProtocolError, Result};

/// Where a widget image comes from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ImageSource {
    /// A publicly reachable `http` or `https` URL.
    Network(NetworkImage),
    /// A session-scoped local reference.
    Local(LocalImage),
}

/// A validated, shareable image URL.
///
/// Construction goes through [`NetworkImage::parse`], which only admits
/// absolute `http`/`https` URLs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NetworkImage(Url);

impl NetworkImage {
    /// Parses and validates a shareable image URL.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::InvalidImageUrl`] if the input is not an
    /// absolute URL, and [`ProtocolError::UnshareableImageScheme`] for
    /// schemes other than `http` and `https` (such as `blob:` or `file:`).
    ///
    /// # Examples
    ///
    /// ```
    /// use dday_protocol::NetworkImage;
    ///
    /// assert!(NetworkImage::parse("https://i.imgur.com/cat.png").is_ok());
    /// assert!(NetworkImage::parse("blob:https://example.com/1234").is_err());
    /// assert!(NetworkImage::parse("cat.png").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let url = Url::parse(trimmed).map_err(|e| ProtocolError::InvalidImageUrl {
            input: trimmed.to_string(),
            reason: e.to_string(),
        })?;
        match url.scheme() {
            "http" | "https" if url.host().is_some() => Ok(Self(url)),
            "http" | "https" => Err(ProtocolError::InvalidImageUrl {
                input: trimmed.to_string(),
                reason: "missing host".to_string(),
            }),
            other => Err(ProtocolError::UnshareableImageScheme(other.to_string())),
        }
    }

    /// Returns the underlying URL.
    #[must_use]
    pub fn url(&self) -> &Url {
        &self.0
    }
}

impl fmt::Display for NetworkImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

/// A local, non-shareable image.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LocalImage {
    /// The placeholder artwork shipped with the application.
    Bundled,
    /// A file picked from the local filesystem.
    File(PathBuf),
}

impl ImageSource {
    /// Parses a network image reference.
    ///
    /// # Errors
    ///
    /// See [`NetworkImage::parse`].
    pub fn network(input: &str) -> Result<Self> {
        NetworkImage::parse(input).map(Self::Network)
    }

    /// Creates a local file reference.
    #[must_use]
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::Local(LocalImage::File(path.into()))
    }

    /// Returns the URL that may be placed in a shareable link.
    ///
    /// Local references always return `None`.
    #[must_use]
    pub fn portable_url(&self) -> Option<&Url> {
        match self {
            Self::Network(image) => Some(image.url()),
            Self::Local(_) => None,
        }
    }

    /// Returns `true` for session-scoped references.
    #[must_use]
    pub fn is_local(&self) -> bool {
        matches!(self, Self::Local(_))
    }

    /// Returns a short human-readable description.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Network(image) => image.to_string(),
            Self::Local(LocalImage::Bundled) => "bundled placeholder".to_string(),
            Self::Local(LocalImage::File(path)) => path.display().to_string(),
        }
    }
}
