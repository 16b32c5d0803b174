//! Image asset loading.
//!
//! Images are fetched in the background and published as [`ImageAsset`]
//! values tagged with the source they belong to, so a consumer can tell a
//! stale result from the current one.

use std::sync::Arc;
use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use dday_protocol::{ImageSource, LocalImage};
use tracing::{debug, warn};

use crate::error::AssetError;

/// The bundled placeholder shown before the user picks an image.
static PLACEHOLDER_SVG: &[u8] = include_bytes!("../assets/placeholder.svg");

/// Supported image encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    Webp,
    Svg,
}

impl ImageFormat {
    /// Detects the format from the leading bytes.
    ///
    /// # Examples
    ///
    /// ```
    /// use dday_render::asset::ImageFormat;
    ///
    /// assert_eq!(ImageFormat::sniff(b"\x89PNG\r\n\x1a\n...."), Some(ImageFormat::Png));
    /// assert_eq!(ImageFormat::sniff(b"<svg xmlns='...'/>"), Some(ImageFormat::Svg));
    /// assert_eq!(ImageFormat::sniff(b"hello"), None);
    /// ```
    #[must_use]
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(b"\x89PNG\r\n\x1a\n") {
            return Some(Self::Png);
        }
        if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Some(Self::Jpeg);
        }
        if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
            return Some(Self::Gif);
        }
        if bytes.len() >= 12 && &bytes[..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
            return Some(Self::Webp);
        }
        if looks_like_svg(bytes) {
            return Some(Self::Svg);
        }
        None
    }

    /// Returns the MIME type.
    #[must_use]
    pub fn mime(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Gif => "image/gif",
            Self::Webp => "image/webp",
            Self::Svg => "image/svg+xml",
        }
    }
}

fn looks_like_svg(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(1024)];
    let text = String::from_utf8_lossy(head);
    let text = text.trim_start_matches('\u{feff}').trim_start();
    (text.starts_with("<svg") || text.starts_with("<?xml") || text.starts_with("<!--"))
        && text.contains("<svg")
}

/// Encoded image bytes of a known format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedImage {
    format: ImageFormat,
    bytes: Arc<[u8]>,
}

impl LoadedImage {
    /// Wraps encoded bytes, detecting their format.
    ///
    /// # Errors
    ///
    /// Returns [`AssetError::UnsupportedFormat`] if the bytes are not
    /// PNG, JPEG, GIF, WebP or SVG.
    pub fn from_bytes(bytes: impl Into<Arc<[u8]>>) -> Result<Self, AssetError> {
        let bytes = bytes.into();
        let format = ImageFormat::sniff(&bytes).ok_or(AssetError::UnsupportedFormat)?;
        Ok(Self { format, bytes })
    }

    /// The bundled placeholder picture.
    #[must_use]
    pub fn bundled() -> Self {
        Self {
            format: ImageFormat::Svg,
            bytes: Arc::from(PLACEHOLDER_SVG),
        }
    }

    #[must_use]
    pub fn format(&self) -> ImageFormat {
        self.format
    }

    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the image as a `data:` URI.
    #[must_use]
    pub fn data_uri(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.format.mime(),
            STANDARD.encode(&self.bytes)
        )
    }
}

/// Load progress of one image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetState {
    Pending,
    Loaded(LoadedImage),
    /// The load failed; the message is for logs and notifications.
    Failed(String),
}

impl AssetState {
    /// Returns `true` once the load has either succeeded or failed.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    #[must_use]
    pub fn loaded(&self) -> Option<&LoadedImage> {
        match self {
            Self::Loaded(image) => Some(image),
            _ => None,
        }
    }
}

/// An [`AssetState`] tagged with the source it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAsset {
    pub source: ImageSource,
    pub state: AssetState,
}

impl ImageAsset {
    #[must_use]
    pub fn pending(source: ImageSource) -> Self {
        Self {
            source,
            state: AssetState::Pending,
        }
    }

    /// Builds the settled asset for a load result, logging failures.
    #[must_use]
    pub fn settled(source: ImageSource, result: Result<LoadedImage, AssetError>) -> Self {
        let state = match result {
            Ok(image) => AssetState::Loaded(image),
            Err(e) => {
                warn!(source = %source.describe(), error = %e, "Image failed to load");
                AssetState::Failed(e.to_string())
            }
        };
        Self { source, state }
    }

    /// Returns `true` if this asset is the settled state of `source`.
    #[must_use]
    pub fn is_settled_for(&self, source: &ImageSource) -> bool {
        &self.source == source && self.state.is_settled()
    }
}

/// Fetches image bytes from the network or the local file system.
#[derive(Debug, Clone)]
pub struct AssetLoader {
    client: reqwest::Client,
    max_bytes: u64,
}

impl AssetLoader {
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
    /// Default size limit (10 MiB).
    pub const DEFAULT_MAX_BYTES: u64 = 10 * 1024 * 1024;

    /// Creates a loader with the given request timeout and size limit.
    ///
    /// # Errors
    ///
    /// Returns [`AssetError::Request`] if the HTTP client cannot be built.
    pub fn new(timeout: Duration, max_bytes: u64) -> Result<Self, AssetError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("dday/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, max_bytes })
    }

    /// Loads the bytes of an image.
    ///
    /// # Errors
    ///
    /// Returns an [`AssetError`] if the request fails, the server answers
    /// with an error status, the file cannot be read, the image exceeds the
    /// size limit or its format is not supported.
    pub async fn load(&self, source: &ImageSource) -> Result<LoadedImage, AssetError> {
        debug!(source = %source.describe(), "Loading image");
        match source {
            ImageSource::Local(LocalImage::Bundled) => Ok(LoadedImage::bundled()),
            ImageSource::Local(LocalImage::File(path)) => {
                let io_error = |source| AssetError::Io {
                    path: path.clone(),
                    source,
                };
                let metadata = tokio::fs::metadata(path).await.map_err(io_error)?;
                self.check_size(metadata.len())?;
                let bytes = tokio::fs::read(path).await.map_err(io_error)?;
                // The file may have grown since it was stat'ed.
                self.check_size(bytes.len() as u64)?;
                LoadedImage::from_bytes(bytes)
            }
            ImageSource::Network(image) => {
                let url = image.url();
                let mut response = self.client.get(url.clone()).send().await?;
                if !response.status().is_success() {
                    return Err(AssetError::Status {
                        url: url.to_string(),
                        status: response.status().as_u16(),
                    });
                }
                if let Some(len) = response.content_length() {
                    self.check_size(len)?;
                }
                // Chunked replies carry no length, so the limit is enforced
                // while streaming.
                let mut bytes = Vec::new();
                while let Some(chunk) = response.chunk().await? {
                    self.check_size((bytes.len() + chunk.len()) as u64)?;
                    bytes.extend_from_slice(&chunk);
                }
                LoadedImage::from_bytes(bytes)
            }
        }
    }

    fn check_size(&self, len: u64) -> Result<(), AssetError> {
        if len > self.max_bytes {
            return Err(AssetError::TooLarge {
                limit: self.max_bytes,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const PNG_1X1: &[u8] = &[
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
        0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
        0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0xF8,
        0xCF, 0xC0, 0xF0, 0x1F, 0x00, 0x05, 0x00, 0x01, 0xFF, 0x89, 0x99, 0x3D, 0x1D, 0x00, 0x00,
        0x00, 0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
    ];

    /// Serves one chunked HTTP response made of `chunks` and returns its URL.
    async fn serve_chunked(chunks: Vec<Vec<u8>>) -> ImageSource {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = [0u8; 1024];
            let _ = socket.read(&mut request).await;

            let mut response =
                b"HTTP/1.1 200 OK\r\nContent-Type: image/png\r\nTransfer-Encoding: chunked\r\n\r\n"
                    .to_vec();
            for chunk in chunks {
                response.extend_from_slice(format!("{:X}\r\n", chunk.len()).as_bytes());
                response.extend_from_slice(&chunk);
                response.extend_from_slice(b"\r\n");
            }
            response.extend_from_slice(b"0\r\n\r\n");
            let _ = socket.write_all(&response).await;
            let _ = socket.shutdown().await;
        });
        ImageSource::network(&format!("http://{addr}/image.png")).unwrap()
    }

    /// A loader that talks to loopback servers directly, ignoring proxies.
    fn direct_loader(max_bytes: u64) -> AssetLoader {
        let client = reqwest::Client::builder()
            .timeout(AssetLoader::DEFAULT_TIMEOUT)
            .no_proxy()
            .build()
            .unwrap();
        AssetLoader { client, max_bytes }
    }

    fn loader() -> AssetLoader {
        AssetLoader::new(AssetLoader::DEFAULT_TIMEOUT, AssetLoader::DEFAULT_MAX_BYTES).unwrap()
    }

    #[test]
    fn sniff_recognises_supported_formats() {
        assert_eq!(ImageFormat::sniff(PNG_1X1), Some(ImageFormat::Png));
        assert_eq!(
            ImageFormat::sniff(&[0xFF, 0xD8, 0xFF, 0xE0, 0x00]),
            Some(ImageFormat::Jpeg)
        );
        assert_eq!(ImageFormat::sniff(b"GIF89a\x01\x00"), Some(ImageFormat::Gif));
        assert_eq!(
            ImageFormat::sniff(b"RIFF\x24\x00\x00\x00WEBPVP8 "),
            Some(ImageFormat::Webp)
        );
        assert_eq!(
            ImageFormat::sniff(b"<?xml version=\"1.0\"?>\n<svg/>"),
            Some(ImageFormat::Svg)
        );
        assert_eq!(ImageFormat::sniff(b"<html><body/></html>"), None);
        assert_eq!(ImageFormat::sniff(b""), None);
    }

    #[test]
    fn bundled_placeholder_is_svg() {
        let image = LoadedImage::bundled();
        assert_eq!(image.format(), ImageFormat::Svg);
        assert_eq!(ImageFormat::sniff(image.bytes()), Some(ImageFormat::Svg));
        assert!(image.data_uri().starts_with("data:image/svg+xml;base64,PHN2Zy"));
    }

    #[test]
    fn from_bytes_rejects_unknown_formats() {
        assert!(matches!(
            LoadedImage::from_bytes(b"not an image".as_slice()),
            Err(AssetError::UnsupportedFormat)
        ));
    }

    #[test]
    fn settled_state_tracks_source() {
        let source = ImageSource::network("https://example.com/a.png").unwrap();
        let other = ImageSource::network("https://example.com/b.png").unwrap();

        let pending = ImageAsset::pending(source.clone());
        assert!(!pending.is_settled_for(&source));

        let failed = ImageAsset::settled(source.clone(), Err(AssetError::UnsupportedFormat));
        assert!(failed.is_settled_for(&source));
        assert!(!failed.is_settled_for(&other));
        assert_eq!(failed.state.loaded(), None);
    }

    #[tokio::test]
    async fn load_bundled() {
        let image = loader()
            .load(&ImageSource::Local(LocalImage::Bundled))
            .await
            .unwrap();
        assert_eq!(image, LoadedImage::bundled());
    }

    #[tokio::test]
    async fn load_local_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(PNG_1X1).unwrap();

        let image = loader().load(&ImageSource::file(file.path())).await.unwrap();
        assert_eq!(image.format(), ImageFormat::Png);
        assert_eq!(image.bytes(), PNG_1X1);
    }

    #[tokio::test]
    async fn load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = loader()
            .load(&ImageSource::file(dir.path().join("missing.png")))
            .await;
        assert!(matches!(result, Err(AssetError::Io { .. })));
    }

    #[tokio::test]
    async fn load_enforces_size_limit() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(PNG_1X1).unwrap();

        let small = AssetLoader::new(AssetLoader::DEFAULT_TIMEOUT, 16).unwrap();
        let result = small.load(&ImageSource::file(file.path())).await;
        assert!(matches!(result, Err(AssetError::TooLarge { limit: 16 })));
    }

    #[tokio::test]
    async fn load_local_file_checks_size_before_reading() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&vec![0u8; 4096]).unwrap();

        // Not an image: only the size check can produce TooLarge here.
        let small = AssetLoader::new(AssetLoader::DEFAULT_TIMEOUT, 1024).unwrap();
        let result = small.load(&ImageSource::file(file.path())).await;
        assert!(matches!(result, Err(AssetError::TooLarge { limit: 1024 })));
    }

    #[tokio::test]
    async fn load_chunked_network_image() {
        let (head, tail) = PNG_1X1.split_at(20);
        let source = serve_chunked(vec![head.to_vec(), tail.to_vec()]).await;

        let image = direct_loader(AssetLoader::DEFAULT_MAX_BYTES)
            .load(&source)
            .await
            .unwrap();
        assert_eq!(image.format(), ImageFormat::Png);
        assert_eq!(image.bytes(), PNG_1X1);
    }

    #[tokio::test]
    async fn load_chunked_network_image_enforces_size_limit() {
        let mut first = PNG_1X1.to_vec();
        first.resize(32, 0);
        let source = serve_chunked(vec![first, vec![0u8; 32], vec![0u8; 32]]).await;

        let result = direct_loader(48).load(&source).await;
        assert!(matches!(result, Err(AssetError::TooLarge { limit: 48 })));
    }
}
