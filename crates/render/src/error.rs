//! Error types for the dday-render crate.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while painting, rasterizing or decoding images.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The generated or supplied SVG could not be parsed.
    #[error("failed to parse SVG: {0}")]
    Svg(String),

    /// The target pixmap could not be allocated.
    #[error("cannot allocate a {width}x{height} pixmap")]
    Pixmap {
        /// Requested width in pixels.
        width: u32,
        /// Requested height in pixels.
        height: u32,
    },

    /// The rasterized image could not be encoded as PNG.
    #[error("failed to encode PNG: {0}")]
    Encode(String),

    /// A raster image could not be decoded.
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    /// The image bytes are not in a recognised format.
    #[error("unrecognised image format")]
    UnknownFormat,
}

/// Errors that can occur while loading an image asset.
///
/// Asset failures never fail a render: the caller records them as
/// [`crate::asset::AssetState::Failed`] and the painter hides the image.
#[derive(Debug, Error)]
pub enum AssetError {
    /// The HTTP client could not be built or the request failed.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("{url} answered with HTTP {status}")]
    Status {
        /// The requested URL.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// The image is larger than the configured limit.
    #[error("image exceeds the {limit} byte limit")]
    TooLarge {
        /// The configured limit in bytes.
        limit: u64,
    },

    /// A local image file could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Io {
        /// The file that failed to load.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The loaded bytes are not a supported image format.
    #[error("unsupported image format")]
    UnsupportedFormat,
}

/// A specialized Result type for render operations.
pub type Result<T> = std::result::Result<T, RenderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_error_display() {
        let err = RenderError::Pixmap {
            width: 0,
            height: 140,
        };
        assert_eq!(err.to_string(), "cannot allocate a 0x140 pixmap");

        let err = RenderError::Svg("unexpected end of stream".to_string());
        assert!(err.to_string().contains("unexpected end of stream"));
    }

    #[test]
    fn asset_error_display() {
        let err = AssetError::Status {
            url: "https://example.com/a.png".to_string(),
            status: 404,
        };
        assert_eq!(
            err.to_string(),
            "https://example.com/a.png answered with HTTP 404"
        );

        let err = AssetError::Io {
            path: PathBuf::from("/tmp/missing.png"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert!(err.to_string().starts_with("cannot read /tmp/missing.png"));

        let err = AssetError::TooLarge { limit: 1024 };
        assert_eq!(err.to_string(), "image exceeds the 1024 byte limit");
    }
}
