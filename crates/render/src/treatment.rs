//! Per-style visual treatments.
//!
//! Every [`WidgetStyle`] maps to exactly one static [`StyleTreatment`]. The
//! table is total over the enum, so an unknown style can only exist before
//! parsing, where it has already fallen back to the default.

use dday_protocol::{Rgb, WidgetStyle};

const BLACK: Rgb = Rgb::new(0, 0, 0);
const WHITE: Rgb = Rgb::new(255, 255, 255);

/// Font settings for one line of text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Typography {
    /// CSS font family list.
    pub family: &'static str,
    /// Font weight (100-900).
    pub weight: u16,
    /// Font size in pixels.
    pub size: f32,
    /// Letter spacing in pixels (may be negative).
    pub letter_spacing: f32,
}

/// A blurred, offset copy of a shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shadow {
    pub dx: f32,
    pub dy: f32,
    pub blur: f32,
    pub color: Rgb,
    pub opacity: f32,
}

/// A solid stroke inside a shape's edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Border {
    pub width: f32,
    pub color: Rgb,
    pub opacity: f32,
}

/// Color adjustments applied to the avatar image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageFilter {
    pub contrast: f32,
    pub brightness: f32,
    /// Fraction of desaturation, 0.0 to 1.0.
    pub grayscale: f32,
}

/// Overlay drawn on top of the avatar image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOverlay {
    None,
    /// Diagonal white sheen.
    Gloss,
    /// Fine pixel grid.
    PixelGrid,
}

/// Treatment of the rounded background container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainerTreatment {
    pub drop_shadows: &'static [Shadow],
    pub inset_highlights: &'static [Shadow],
    pub border: Option<Border>,
    /// Horizontal scanline overlay, clipped to the container.
    pub scanlines: bool,
    /// Soft highlight blob in the top right corner.
    pub gloss: bool,
}

/// Treatment of the round avatar frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTreatment {
    pub shadow: Option<Shadow>,
    pub inset_highlight: Option<Shadow>,
    pub border: Option<Border>,
    /// Sample the image with nearest-neighbour scaling.
    pub pixelated: bool,
    pub filter: Option<ImageFilter>,
    pub overlay: FrameOverlay,
}

/// Everything that differs between the three widget styles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleTreatment {
    pub style: WidgetStyle,
    pub label: Typography,
    pub caption: Typography,
    /// Vertical gap between the label and the caption.
    pub caption_gap: f32,
    pub text_shadow: Shadow,
    pub container: ContainerTreatment,
    pub frame: FrameTreatment,
}

const TEXT_SHADOW: Shadow = Shadow {
    dx: 0.0,
    dy: 4.0,
    blur: 3.0,
    color: BLACK,
    opacity: 0.15,
};

const SANS_CAPTION: Typography = Typography {
    family: "Inter, Helvetica, Arial, sans-serif",
    weight: 700,
    size: 14.0,
    letter_spacing: 1.4,
};

static FLAT: StyleTreatment = StyleTreatment {
    style: WidgetStyle::Flat,
    label: Typography {
        family: "Outfit, Helvetica, Arial, sans-serif",
        weight: 700,
        size: 60.0,
        letter_spacing: 1.5,
    },
    caption: SANS_CAPTION,
    caption_gap: 8.0,
    text_shadow: TEXT_SHADOW,
    container: ContainerTreatment {
        drop_shadows: &[],
        inset_highlights: &[],
        border: None,
        scanlines: false,
        gloss: false,
    },
    frame: FrameTreatment {
        shadow: Some(Shadow {
            dx: 0.0,
            dy: 4.0,
            blur: 6.0,
            color: BLACK,
            opacity: 0.1,
        }),
        inset_highlight: None,
        border: None,
        pixelated: false,
        filter: None,
        overlay: FrameOverlay::None,
    },
};

static DIMENSIONAL: StyleTreatment = StyleTreatment {
    style: WidgetStyle::Dimensional,
    label: Typography {
        family: "DynaPuff, 'Arial Rounded MT Bold', sans-serif",
        weight: 900,
        size: 60.0,
        letter_spacing: 1.5,
    },
    caption: SANS_CAPTION,
    caption_gap: 8.0,
    text_shadow: TEXT_SHADOW,
    container: ContainerTreatment {
        drop_shadows: &[Shadow {
            dx: 0.0,
            dy: 12.0,
            blur: 17.0,
            color: BLACK,
            opacity: 0.25,
        }],
        inset_highlights: &[
            Shadow {
                dx: 0.0,
                dy: 4.0,
                blur: 15.0,
                color: WHITE,
                opacity: 0.6,
            },
            Shadow {
                dx: 0.0,
                dy: -4.0,
                blur: 10.0,
                color: BLACK,
                opacity: 0.1,
            },
        ],
        border: None,
        scanlines: false,
        gloss: true,
    },
    frame: FrameTreatment {
        shadow: Some(Shadow {
            dx: 0.0,
            dy: 8.0,
            blur: 12.0,
            color: BLACK,
            opacity: 0.3,
        }),
        inset_highlight: Some(Shadow {
            dx: 0.0,
            dy: 4.0,
            blur: 8.0,
            color: WHITE,
            opacity: 0.5,
        }),
        border: None,
        pixelated: false,
        filter: None,
        overlay: FrameOverlay::Gloss,
    },
};

static PIXEL: StyleTreatment = StyleTreatment {
    style: WidgetStyle::Pixel,
    label: Typography {
        family: "'Pixelify Sans', 'Press Start 2P', monospace",
        weight: 700,
        size: 48.0,
        letter_spacing: -1.2,
    },
    caption: Typography {
        family: "'Pixelify Sans', 'Press Start 2P', monospace",
        weight: 700,
        size: 12.0,
        letter_spacing: -0.3,
    },
    caption_gap: 16.0,
    text_shadow: TEXT_SHADOW,
    container: ContainerTreatment {
        drop_shadows: &[Shadow {
            dx: 6.0,
            dy: 6.0,
            blur: 0.0,
            color: BLACK,
            opacity: 0.2,
        }],
        inset_highlights: &[Shadow {
            dx: 2.0,
            dy: 2.0,
            blur: 0.0,
            color: WHITE,
            opacity: 0.2,
        }],
        border: Some(Border {
            width: 4.0,
            color: BLACK,
            opacity: 0.1,
        }),
        scanlines: true,
        gloss: false,
    },
    frame: FrameTreatment {
        shadow: None,
        inset_highlight: None,
        border: Some(Border {
            width: 4.0,
            color: BLACK,
            opacity: 0.1,
        }),
        pixelated: true,
        filter: Some(ImageFilter {
            contrast: 1.25,
            brightness: 1.1,
            grayscale: 0.2,
        }),
        overlay: FrameOverlay::PixelGrid,
    },
};

/// Returns the treatment for a style.
#[must_use]
pub fn for_style(style: WidgetStyle) -> &'static StyleTreatment {
    match style {
        WidgetStyle::Flat => &FLAT,
        WidgetStyle::Dimensional => &DIMENSIONAL,
        WidgetStyle::Pixel => &PIXEL,
    }
}
