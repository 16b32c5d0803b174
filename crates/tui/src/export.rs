//! Writing rendered widgets to files.
//!
//! Used by the editor's export action and by the embed viewer's
//! `--output` mode.

use std::path::{Path, PathBuf};

use dday_config::ExportConfig;
use dday_protocol::ImageSource;
use dday_render::raster::rasterize_png;
use dday_render::{AssetLoader, AssetState, ImageAsset, LoadedImage, RenderError, WidgetRender, svg};
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Errors that can occur while writing a rendered widget.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// The output path has an extension we cannot produce.
    #[error("unsupported output format for {0} (expected .png or .svg)")]
    UnsupportedFormat(PathBuf),

    /// Painting or rasterizing failed.
    #[error(transparent)]
    Render(#[from] RenderError),

    /// The file could not be written.
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The blocking rasterizer task panicked or was cancelled.
    #[error("render task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// File formats a widget can be written as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Svg,
}

impl OutputFormat {
    /// Picks the format from a file extension, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::UnsupportedFormat`] for anything but `.png`
    /// and `.svg`.
    pub fn from_path(path: &Path) -> Result<Self, ExportError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("png") => Ok(Self::Png),
            Some("svg") => Ok(Self::Svg),
            _ => Err(ExportError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// Everything an export needs, captured when the export is requested.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportJob {
    pub render: WidgetRender,
    pub settings: ExportConfig,
}

/// Runs an editor export to completion.
///
/// Waits until the image shown by the captured render has settled, paints,
/// rasterizes at the configured pixel ratio and writes the PNG.
///
/// # Errors
///
/// Returns an [`ExportError`] if rasterizing or writing fails. A failed
/// image load is not an error; the frame is left empty.
pub async fn run_export(
    job: ExportJob,
    assets: watch::Receiver<Option<ImageAsset>>,
    loader: AssetLoader,
) -> Result<PathBuf, ExportError> {
    let image = match job.render.image_source() {
        Some(source) => settled_image(source, assets, &loader).await,
        None => None,
    };

    let svg = svg::paint(&job.render, image.as_ref());
    let png = rasterize(svg, job.settings.pixel_ratio).await?;

    let path = job.settings.output_path();
    write_output(&path, &png).await?;
    info!(path = %path.display(), bytes = png.len(), "Exported widget");
    Ok(path)
}

/// Resolves the image for `source` once it has settled.
///
/// Follows the shared asset channel while it tracks `source`. If the
/// channel has moved on to another image, `source` is loaded directly.
/// Returns `None` if the image failed to load.
pub async fn settled_image(
    source: &ImageSource,
    mut assets: watch::Receiver<Option<ImageAsset>>,
    loader: &AssetLoader,
) -> Option<LoadedImage> {
    let tracked = match assets
        .wait_for(|asset| {
            asset
                .as_ref()
                .is_none_or(|a| &a.source != source || a.state.is_settled())
        })
        .await
    {
        Ok(asset) => asset
            .as_ref()
            .filter(|a| &a.source == source)
            .map(|a| a.state.clone()),
        Err(_) => None,
    };

    match tracked {
        Some(AssetState::Loaded(image)) => Some(image),
        Some(_) => None,
        None => {
            debug!(source = %source.describe(), "Asset channel moved on, loading directly");
            loader
                .load(source)
                .await
                .map_err(|e| warn!(source = %source.describe(), error = %e, "Image failed to load"))
                .ok()
        }
    }
}

/// Rasterizes an SVG document on a blocking thread.
///
/// # Errors
///
/// Returns [`ExportError::Render`] if the document cannot be rasterized.
pub async fn rasterize(svg: String, pixel_ratio: u32) -> Result<Vec<u8>, ExportError> {
    let png = tokio::task::spawn_blocking(move || rasterize_png(&svg, pixel_ratio)).await??;
    Ok(png)
}

/// Writes `bytes` to `path`, creating parent directories as needed.
///
/// # Errors
///
/// Returns [`ExportError::Write`] if a directory or the file cannot be
/// written.
pub async fn write_output(path: &Path, bytes: &[u8]) -> Result<(), ExportError> {
    let write_err = |source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(write_err)?;
    }
    tokio::fs::write(path, bytes).await.map_err(write_err)
}
