//! SVG painter.
//!
//! Turns a [`WidgetRender`] into a standalone SVG document covering the
//! widget region only: the container, the avatar overhang on the left and
//! a margin for shadows. The output is byte-for-byte deterministic for the
//! same inputs.

use dday_protocol::Rgb;

use crate::asset::LoadedImage;
use crate::treatment::{Border, FrameOverlay, ImageFilter, Shadow, Typography};
use crate::widget::{
    AVATAR_OVERHANG, AVATAR_SIZE, Avatar, CONTENT_OFFSET, CORNER_RADIUS, WIDGET_HEIGHT,
    WIDGET_WIDTH, WidgetRender,
};

/// Space around the widget reserved for shadows.
pub const SHADOW_MARGIN: f32 = 40.0;

/// Width of the painted canvas.
pub const CANVAS_WIDTH: f32 = SHADOW_MARGIN + AVATAR_OVERHANG + WIDGET_WIDTH + SHADOW_MARGIN;
/// Height of the painted canvas.
pub const CANVAS_HEIGHT: f32 = SHADOW_MARGIN + WIDGET_HEIGHT + SHADOW_MARGIN;

const CARD_X: f32 = SHADOW_MARGIN + AVATAR_OVERHANG;
const CARD_Y: f32 = SHADOW_MARGIN;
const WHITE: Rgb = Rgb::new(255, 255, 255);

/// Paints a widget as SVG.
///
/// `image` is the decoded picture for [`Avatar::Image`]. Passing `None` for
/// an image avatar (still loading, or failed) leaves the frame empty.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use dday_protocol::{ThemeColor, WidgetConfig, WidgetStyle};
/// use dday_render::{render, svg};
///
/// let day = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
/// let cfg = WidgetConfig::without_image(day, WidgetStyle::Flat, ThemeColor::default());
/// let doc = svg::paint(&render(&cfg, day.and_hms_opt(12, 0, 0).unwrap()), None);
///
/// assert!(doc.starts_with("<svg"));
/// assert!(doc.contains(">D+0</text>"));
/// ```
#[must_use]
pub fn paint(render: &WidgetRender, image: Option<&LoadedImage>) -> String {
    let t = render.treatment;
    let mut defs = String::new();
    let mut body = String::new();

    defs.push_str(&format!(
        r#"<clipPath id="dd-card-clip"><rect x="{}" y="{}" width="{}" height="{}" rx="{}"/></clipPath>"#,
        num(CARD_X),
        num(CARD_Y),
        num(WIDGET_WIDTH),
        num(WIDGET_HEIGHT),
        num(CORNER_RADIUS),
    ));
    let (acx, acy, ar) = avatar_circle();
    defs.push_str(&format!(
        r#"<clipPath id="dd-avatar-clip"><circle cx="{}" cy="{}" r="{}"/></clipPath>"#,
        num(acx),
        num(acy),
        num(ar),
    ));

    paint_container(render, &mut defs, &mut body);
    paint_text(render.label.as_str(), &t.label, label_baseline(render), &mut body);
    paint_text(render.caption.as_str(), &t.caption, caption_baseline(render), &mut body);
    paint_avatar(render, image, &mut defs, &mut body);

    defs.push_str(&drop_shadow_filter("dd-text-shadow", &t.text_shadow));

    format!(
        concat!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" "#,
            r#"width="{w}" height="{h}" viewBox="0 0 {w} {h}"><defs>{defs}</defs>{body}</svg>"#
        ),
        w = num(CANVAS_WIDTH),
        h = num(CANVAS_HEIGHT),
        defs = defs,
        body = body,
    )
}

fn paint_container(render: &WidgetRender, defs: &mut String, body: &mut String) {
    let c = &render.treatment.container;

    for (i, shadow) in c.drop_shadows.iter().enumerate() {
        let id = format!("dd-card-shadow-{i}");
        let filter = blur_filter(&id, shadow.blur, defs);
        body.push_str(&format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}" rx="{}" {}{filter}/>"#,
            num(CARD_X + shadow.dx),
            num(CARD_Y + shadow.dy),
            num(WIDGET_WIDTH),
            num(WIDGET_HEIGHT),
            num(CORNER_RADIUS),
            fill(shadow.color, shadow.opacity),
        ));
    }

    body.push_str(&format!(
        r#"<rect x="{}" y="{}" width="{}" height="{}" rx="{}" fill="{}"/>"#,
        num(CARD_X),
        num(CARD_Y),
        num(WIDGET_WIDTH),
        num(WIDGET_HEIGHT),
        num(CORNER_RADIUS),
        render.theme.to_hex(),
    ));

    for (i, inset) in c.inset_highlights.iter().enumerate() {
        let id = format!("dd-card-inset-{i}");
        let filter = blur_filter(&id, inset.blur, defs);
        body.push_str(&format!(
            r#"<g clip-path="url(#dd-card-clip)"><path fill-rule="evenodd" d="{}" {}{filter}/></g>"#,
            inset_ring(inset, RingShape::Card),
            fill(inset.color, inset.opacity),
        ));
    }

    if c.scanlines {
        defs.push_str(concat!(
            r#"<pattern id="dd-scanlines" width="4" height="4" patternUnits="userSpaceOnUse">"#,
            r##"<rect width="4" height="2" fill="#000000" fill-opacity="0.25"/></pattern>"##
        ));
        body.push_str(&format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="url(#dd-scanlines)" opacity="0.4" clip-path="url(#dd-card-clip)"/>"#,
            num(CARD_X),
            num(CARD_Y),
            num(WIDGET_WIDTH),
            num(WIDGET_HEIGHT),
        ));
    }

    if let Some(border) = &c.border {
        body.push_str(&card_border(border));
    }

    if c.gloss {
        let filter = blur_filter("dd-gloss-blur", 24.0, defs);
        body.push_str(&format!(
            r#"<ellipse cx="{}" cy="{}" rx="40" ry="20" {}{filter}/>"#,
            num(CARD_X + WIDGET_WIDTH - 16.0 - 40.0),
            num(CARD_Y + 8.0 + 20.0),
            fill(WHITE, 0.3),
        ));
    }
}

fn paint_text(text: &str, typo: &Typography, baseline: f32, body: &mut String) {
    let center = CARD_X + CONTENT_OFFSET + (WIDGET_WIDTH - CONTENT_OFFSET) / 2.0;
    body.push_str(&format!(
        concat!(
            r#"<text x="{}" y="{}" text-anchor="middle" font-family="{}" font-weight="{}" "#,
            r##"font-size="{}" letter-spacing="{}" fill="#FFFFFF" filter="url(#dd-text-shadow)">{}</text>"##
        ),
        num(center),
        num(baseline),
        escape(typo.family),
        typo.weight,
        num(typo.size),
        num(typo.letter_spacing),
        escape(text),
    ));
}

fn paint_avatar(
    render: &WidgetRender,
    image: Option<&LoadedImage>,
    defs: &mut String,
    body: &mut String,
) {
    let frame = &render.treatment.frame;
    let (cx, cy, r) = avatar_circle();

    let shadow = match &frame.shadow {
        Some(shadow) => {
            defs.push_str(&drop_shadow_filter("dd-frame-shadow", shadow));
            r#" filter="url(#dd-frame-shadow)""#
        }
        None => "",
    };
    body.push_str(&format!(
        r#"<circle cx="{}" cy="{}" r="{}" fill="{}"{shadow}/>"#,
        num(cx),
        num(cy),
        num(r),
        render.theme.mix(WHITE, 0.2).to_hex(),
    ));

    match (&render.avatar, image) {
        (Avatar::Placeholder, _) => {
            body.push_str(&format!(
                r#"<text x="{}" y="{}" text-anchor="middle" font-family="Inter, Helvetica, Arial, sans-serif" font-size="12" {}>Add Image</text>"#,
                num(cx),
                num(cy + 4.0),
                fill(WHITE, 0.5),
            ));
        }
        (Avatar::Image(_), Some(image)) => {
            let filter = match &frame.filter {
                Some(f) => {
                    defs.push_str(&image_filter("dd-image-filter", f));
                    r#" filter="url(#dd-image-filter)""#
                }
                None => "",
            };
            let rendering = if frame.pixelated {
                "optimizeSpeed"
            } else {
                "optimizeQuality"
            };
            body.push_str(&format!(
                concat!(
                    r#"<g clip-path="url(#dd-avatar-clip)"><image x="{}" y="{}" width="{s}" height="{s}" "#,
                    r#"preserveAspectRatio="xMidYMid slice" image-rendering="{}"{} xlink:href="{}"/></g>"#
                ),
                num(cx - r),
                num(cy - r),
                rendering,
                filter,
                image.data_uri(),
                s = num(AVATAR_SIZE),
            ));

            match frame.overlay {
                FrameOverlay::None => {}
                FrameOverlay::Gloss => {
                    defs.push_str(concat!(
                        r#"<linearGradient id="dd-frame-gloss" x1="0" y1="1" x2="1" y2="0">"#,
                        r##"<stop offset="0" stop-color="#FFFFFF" stop-opacity="0.4"/>"##,
                        r##"<stop offset="1" stop-color="#FFFFFF" stop-opacity="0"/></linearGradient>"##
                    ));
                    body.push_str(&format!(
                        r#"<circle cx="{}" cy="{}" r="{}" fill="url(#dd-frame-gloss)" opacity="0.8"/>"#,
                        num(cx),
                        num(cy),
                        num(r),
                    ));
                }
                FrameOverlay::PixelGrid => {
                    defs.push_str(concat!(
                        r#"<pattern id="dd-pixel-grid" width="4" height="4" patternUnits="userSpaceOnUse">"#,
                        r##"<rect width="4" height="1" fill="#000000" fill-opacity="0.3"/>"##,
                        r##"<rect width="1" height="4" fill="#000000" fill-opacity="0.3"/></pattern>"##
                    ));
                    body.push_str(&format!(
                        r#"<circle cx="{}" cy="{}" r="{}" fill="url(#dd-pixel-grid)" opacity="0.3"/>"#,
                        num(cx),
                        num(cy),
                        num(r),
                    ));
                }
            }
        }
        (Avatar::Image(_), None) => {}
    }

    if let Some(inset) = &frame.inset_highlight {
        let filter = blur_filter("dd-frame-inset", inset.blur, defs);
        body.push_str(&format!(
            r#"<g clip-path="url(#dd-avatar-clip)"><path fill-rule="evenodd" d="{}" {}{filter}/></g>"#,
            inset_ring(inset, RingShape::Avatar),
            fill(inset.color, inset.opacity),
        ));
    }

    if let Some(border) = &frame.border {
        body.push_str(&format!(
            r#"<circle cx="{}" cy="{}" r="{}" fill="none" stroke="{}" stroke-opacity="{}" stroke-width="{}"/>"#,
            num(cx),
            num(cy),
            num(r - border.width / 2.0),
            border.color.to_hex(),
            num(border.opacity),
            num(border.width),
        ));
    }
}

fn avatar_circle() -> (f32, f32, f32) {
    let r = AVATAR_SIZE / 2.0;
    (CARD_X - AVATAR_OVERHANG + r, CARD_Y + WIDGET_HEIGHT / 2.0, r)
}

fn text_block_top(render: &WidgetRender) -> f32 {
    let t = render.treatment;
    let height = t.label.size + t.caption_gap + t.caption.size;
    CARD_Y + (WIDGET_HEIGHT - height) / 2.0
}

fn label_baseline(render: &WidgetRender) -> f32 {
    text_block_top(render) + render.treatment.label.size * 0.8
}

fn caption_baseline(render: &WidgetRender) -> f32 {
    let t = render.treatment;
    text_block_top(render) + t.label.size + t.caption_gap + t.caption.size * 0.8
}

fn card_border(border: &Border) -> String {
    let inset = border.width / 2.0;
    format!(
        r#"<rect x="{}" y="{}" width="{}" height="{}" rx="{}" fill="none" stroke="{}" stroke-opacity="{}" stroke-width="{}"/>"#,
        num(CARD_X + inset),
        num(CARD_Y + inset),
        num(WIDGET_WIDTH - border.width),
        num(WIDGET_HEIGHT - border.width),
        num(CORNER_RADIUS - inset),
        border.color.to_hex(),
        num(border.opacity),
        num(border.width),
    )
}

#[derive(Clone, Copy)]
enum RingShape {
    Card,
    Avatar,
}

/// A shape with a hole: a large outer rectangle minus the (offset) shape.
///
/// Filled with `evenodd` and clipped to the original shape, the blurred ring
/// reads as an inset shadow.
fn inset_ring(shadow: &Shadow, shape: RingShape) -> String {
    let outer = format!(
        "M{} {}H{}V{}H{}Z",
        num(-CANVAS_WIDTH),
        num(-CANVAS_HEIGHT),
        num(2.0 * CANVAS_WIDTH),
        num(2.0 * CANVAS_HEIGHT),
        num(-CANVAS_WIDTH),
    );
    let inner = match shape {
        RingShape::Card => rounded_rect_path(
            CARD_X + shadow.dx,
            CARD_Y + shadow.dy,
            WIDGET_WIDTH,
            WIDGET_HEIGHT,
            CORNER_RADIUS,
        ),
        RingShape::Avatar => {
            let (cx, cy, r) = avatar_circle();
            let (cx, cy) = (cx + shadow.dx, cy + shadow.dy);
            format!(
                "M{} {}A{r} {r} 0 1 0 {} {}A{r} {r} 0 1 0 {} {}Z",
                num(cx - r),
                num(cy),
                num(cx + r),
                num(cy),
                num(cx - r),
                num(cy),
                r = num(r),
            )
        }
    };
    format!("{outer}{inner}")
}

fn rounded_rect_path(x: f32, y: f32, w: f32, h: f32, r: f32) -> String {
    format!(
        "M{} {}H{}A{r} {r} 0 0 1 {} {}V{}A{r} {r} 0 0 1 {} {}H{}A{r} {r} 0 0 1 {} {}V{}A{r} {r} 0 0 1 {} {}Z",
        num(x + r),
        num(y),
        num(x + w - r),
        num(x + w),
        num(y + r),
        num(y + h - r),
        num(x + w - r),
        num(y + h),
        num(x + r),
        num(x),
        num(y + h - r),
        num(y + r),
        num(x + r),
        num(y),
        r = num(r),
    )
}

/// Registers a Gaussian blur filter and returns the attribute referencing
/// it, or an empty string for hard-edged shapes.
fn blur_filter(id: &str, blur: f32, defs: &mut String) -> String {
    if blur <= 0.0 {
        return String::new();
    }
    defs.push_str(&format!(
        r#"<filter id="{id}" filterUnits="userSpaceOnUse" x="0" y="0" width="{}" height="{}"><feGaussianBlur stdDeviation="{}"/></filter>"#,
        num(CANVAS_WIDTH),
        num(CANVAS_HEIGHT),
        num(blur / 2.0),
    ));
    format!(r#" filter="url(#{id})""#)
}

fn drop_shadow_filter(id: &str, shadow: &Shadow) -> String {
    format!(
        concat!(
            r#"<filter id="{}" filterUnits="userSpaceOnUse" x="0" y="0" width="{}" height="{}">"#,
            r#"<feDropShadow dx="{}" dy="{}" stdDeviation="{}" flood-color="{}" flood-opacity="{}"/></filter>"#
        ),
        id,
        num(CANVAS_WIDTH),
        num(CANVAS_HEIGHT),
        num(shadow.dx),
        num(shadow.dy),
        num(shadow.blur / 2.0),
        shadow.color.to_hex(),
        num(shadow.opacity),
    )
}

fn image_filter(id: &str, f: &ImageFilter) -> String {
    let slope = f.contrast * f.brightness;
    let intercept = 0.5 - 0.5 * f.contrast;
    format!(
        concat!(
            r#"<filter id="{}" color-interpolation-filters="sRGB">"#,
            r#"<feColorMatrix type="saturate" values="{}"/>"#,
            r#"<feComponentTransfer><feFuncR type="linear" slope="{s}" intercept="{i}"/>"#,
            r#"<feFuncG type="linear" slope="{s}" intercept="{i}"/>"#,
            r#"<feFuncB type="linear" slope="{s}" intercept="{i}"/></feComponentTransfer></filter>"#
        ),
        id,
        num(1.0 - f.grayscale),
        s = num(slope),
        i = num(intercept),
    )
}

fn fill(color: Rgb, opacity: f32) -> String {
    format!(
        r#"fill="{}" fill-opacity="{}""#,
        color.to_hex(),
        num(opacity)
    )
}

/// Formats a number with at most two decimals and no trailing zeros.
fn num(v: f32) -> String {
    let s = format!("{v:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
    out
}
