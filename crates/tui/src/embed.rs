//! Rendering a widget from an embed link.
//!
//! The link is decoded once; everything after that renders the same
//! configuration at whatever wall-clock time it is given.

use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDateTime, TimeZone};
use dday_protocol::{WidgetConfig, WidgetStyle, decode_query_in};
use dday_render::thumbnail::thumbnail;
use dday_render::{AssetLoader, LoadedImage, WidgetRender, render, svg};
use tracing::{debug, info, warn};

use crate::export::{ExportError, OutputFormat, rasterize, write_output};
use crate::layout::PREVIEW_HEIGHT;
use crate::terminal::{TerminalError, finish_inline_terminal, setup_inline_terminal};
use crate::widgets::{FrameContent, THUMBNAIL_SIZE, render_preview};

/// A widget decoded from an embed link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedHost {
    config: WidgetConfig,
}

impl EmbedHost {
    /// Decodes `input`, a full link or a bare query string.
    ///
    /// Decoding never fails: missing or malformed parameters fall back to
    /// their defaults, with the target date defaulting to the date of `now`.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::{FixedOffset, TimeZone};
    /// use dday_protocol::WidgetStyle;
    /// use dday_tui::EmbedHost;
    ///
    /// let tz = FixedOffset::east_opt(0).unwrap();
    /// let now = tz.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap();
    /// let host = EmbedHost::from_link("https://dday.example/embed?style=pixel", &now);
    /// assert_eq!(host.config().style, WidgetStyle::Pixel);
    /// ```
    #[must_use]
    pub fn from_link<Tz: TimeZone>(input: &str, now: &DateTime<Tz>) -> Self {
        let config = decode_query_in(input, now);
        debug!(
            target_date = %config.target_date,
            style = %config.style,
            theme = %config.theme,
            "Decoded embed link"
        );
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    /// Renders the widget at `now`.
    #[must_use]
    pub fn render(&self, now: NaiveDateTime) -> WidgetRender {
        render(&self.config, now)
    }

    /// Loads the configured image, if any.
    ///
    /// A failed load is logged and yields `None`; the frame is then drawn
    /// empty.
    pub async fn load_image(&self, loader: &AssetLoader) -> Option<LoadedImage> {
        let source = self.config.image.as_ref()?;
        match loader.load(source).await {
            Ok(image) => Some(image),
            Err(e) => {
                warn!(source = %source.describe(), error = %e, "Image failed to load");
                None
            }
        }
    }

    /// Paints the widget at `now` as an SVG document.
    #[must_use]
    pub fn paint(&self, now: NaiveDateTime, image: Option<&LoadedImage>) -> String {
        svg::paint(&self.render(now), image)
    }

    /// Writes the widget rendered at `now` to `path`.
    ///
    /// The format follows the extension: `.svg` writes the document,
    /// `.png` rasterizes it at `pixel_ratio`.
    ///
    /// # Errors
    ///
    /// Returns an [`ExportError`] if the extension is not supported or
    /// rendering or writing fails.
    pub async fn write_file(
        &self,
        path: &Path,
        now: NaiveDateTime,
        loader: &AssetLoader,
        pixel_ratio: u32,
    ) -> Result<PathBuf, ExportError> {
        let format = OutputFormat::from_path(path)?;
        let image = self.load_image(loader).await;
        let document = self.paint(now, image.as_ref());

        let bytes = match format {
            OutputFormat::Svg => document.into_bytes(),
            OutputFormat::Png => rasterize(document, pixel_ratio).await?,
        };
        write_output(path, &bytes).await?;
        info!(path = %path.display(), ?format, "Wrote embed render");
        Ok(path.to_path_buf())
    }

    /// Draws the widget at `now` into the terminal below the cursor.
    ///
    /// # Errors
    ///
    /// Returns a [`TerminalError`] if the terminal cannot be drawn to.
    pub fn draw_inline(
        &self,
        now: NaiveDateTime,
        image: Option<&LoadedImage>,
    ) -> Result<(), TerminalError> {
        let widget = self.render(now);
        let thumb = image.and_then(|image| {
            thumbnail(
                image,
                THUMBNAIL_SIZE,
                THUMBNAIL_SIZE,
                widget.style == WidgetStyle::Pixel,
            )
            .map_err(|e| warn!(error = %e, "Image could not be decoded"))
            .ok()
        });
        let content = match (&self.config.image, &thumb) {
            (None, _) => FrameContent::Placeholder,
            (Some(_), Some(thumb)) => FrameContent::Image(thumb),
            (Some(_), None) => FrameContent::Empty,
        };

        let mut terminal = setup_inline_terminal(PREVIEW_HEIGHT)?;
        terminal
            .draw(|frame| {
                let area = frame.area();
                render_preview(&widget, content, area, frame.buffer_mut());
            })
            .map_err(TerminalError::Draw)?;
        finish_inline_terminal(&mut terminal)
    }
}
