//! Small color grids for previewing images in a terminal.

use image::imageops::FilterType;

use crate::asset::{ImageFormat, LoadedImage};
use crate::error::Result;
use crate::raster;

/// A straight-alpha RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// A decoded, downsampled image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thumbnail {
    width: u32,
    height: u32,
    pixels: Vec<Pixel>,
}

impl Thumbnail {
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the pixel at `(x, y)`, or `None` outside the grid.
    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> Option<Pixel> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get((y * self.width + x) as usize).copied()
    }
}

/// Decodes an image and scales it to cover `width` x `height`.
///
/// Raster formats are cropped to the target aspect ratio; `pixelated`
/// selects nearest-neighbour sampling instead of a smoothing filter.
///
/// # Errors
///
/// Returns a [`crate::RenderError`] if the image cannot be decoded or the
/// target size is empty.
pub fn thumbnail(
    image: &LoadedImage,
    width: u32,
    height: u32,
    pixelated: bool,
) -> Result<Thumbnail> {
    let pixels = match image.format() {
        ImageFormat::Svg => {
            let tree = raster::parse(image.bytes())?;
            let pixmap = raster::render_cover(&tree, width, height)?;
            pixmap
                .pixels()
                .iter()
                .map(|p| {
                    let c = p.demultiply();
                    Pixel {
                        r: c.red(),
                        g: c.green(),
                        b: c.blue(),
                        a: c.alpha(),
                    }
                })
                .collect()
        }
        _ => {
            if width == 0 || height == 0 {
                return Err(crate::RenderError::Pixmap { width, height });
            }
            let filter = if pixelated {
                FilterType::Nearest
            } else {
                FilterType::Triangle
            };
            let decoded = image::load_from_memory(image.bytes())?;
            decoded
                .resize_to_fill(width, height, filter)
                .to_rgba8()
                .pixels()
                .map(|p| Pixel {
                    r: p[0],
                    g: p[1],
                    b: p[2],
                    a: p[3],
                })
                .collect()
        }
    };

    Ok(Thumbnail {
        width,
        height,
        pixels,
    })
}
