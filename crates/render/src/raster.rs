//! PNG rasterization of painted widgets using resvg and tiny-skia.

use std::sync::{Arc, OnceLock};

use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg::{Options, Tree, fontdb};
use tracing::debug;

use crate::error::{RenderError, Result};

/// Default output scale for exports.
pub const DEFAULT_PIXEL_RATIO: u32 = 3;

/// System fonts, loaded once per process.
fn fonts() -> Arc<fontdb::Database> {
    static FONTS: OnceLock<Arc<fontdb::Database>> = OnceLock::new();
    FONTS
        .get_or_init(|| {
            let mut db = fontdb::Database::new();
            db.load_system_fonts();
            debug!(faces = db.len(), "Loaded system fonts");
            Arc::new(db)
        })
        .clone()
}

/// Parses an SVG document with system fonts available for text.
pub(crate) fn parse(svg: &[u8]) -> Result<Tree> {
    let mut options = Options::default();
    options.fontdb = fonts();
    Tree::from_data(svg, &options).map_err(|e| RenderError::Svg(e.to_string()))
}

/// Renders a parsed tree at `scale` times its intrinsic size.
pub(crate) fn render_scaled(tree: &Tree, scale: f32) -> Result<Pixmap> {
    let size = tree.size();
    let width = (size.width() * scale).ceil() as u32;
    let height = (size.height() * scale).ceil() as u32;
    let mut pixmap = Pixmap::new(width, height).ok_or(RenderError::Pixmap { width, height })?;
    resvg::render(tree, Transform::from_scale(scale, scale), &mut pixmap.as_mut());
    Ok(pixmap)
}

/// Renders a parsed tree scaled to cover `width` x `height`, centered.
pub(crate) fn render_cover(tree: &Tree, width: u32, height: u32) -> Result<Pixmap> {
    let mut pixmap = Pixmap::new(width, height).ok_or(RenderError::Pixmap { width, height })?;
    let size = tree.size();
    let scale = (width as f32 / size.width()).max(height as f32 / size.height());
    let dx = (width as f32 - size.width() * scale) / 2.0;
    let dy = (height as f32 - size.height() * scale) / 2.0;
    let transform = Transform::from_scale(scale, scale).post_translate(dx, dy);
    resvg::render(tree, transform, &mut pixmap.as_mut());
    Ok(pixmap)
}

/// Rasterizes an SVG document to PNG bytes.
///
/// The output is `pixel_ratio` times the document's pixel size; a ratio of
/// zero is treated as one.
///
/// # Errors
///
/// Returns [`RenderError::Svg`] if the document cannot be parsed,
/// [`RenderError::Pixmap`] if the target is too large to allocate and
/// [`RenderError::Encode`] if PNG encoding fails.
pub fn rasterize_png(svg: &str, pixel_ratio: u32) -> Result<Vec<u8>> {
    let tree = parse(svg.as_bytes())?;
    let pixmap = render_scaled(&tree, pixel_ratio.max(1) as f32)?;
    debug!(
        width = pixmap.width(),
        height = pixmap.height(),
        "Rasterized widget"
    );
    pixmap
        .encode_png()
        .map_err(|e| RenderError::Encode(e.to_string()))
}
