//! Terminal preview of a rendered widget.
//!
//! Draws the card in true color: the themed background, the style's border
//! and shadow, the `D±n` label with its caption, and the round image frame
//! overhanging the left edge. Images are drawn with half blocks, two pixel
//! rows per cell.

use dday_protocol::Rgb;
use dday_render::thumbnail::{Pixel, Thumbnail};
use dday_render::WidgetRender;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, BorderType, Borders, Widget},
};

use crate::layout::{
    AVATAR_COLUMNS, AVATAR_OVERHANG, AVATAR_ROWS, CARD_HEIGHT, CARD_WIDTH, PREVIEW_HEIGHT,
    PREVIEW_WIDTH,
};

const WHITE: Rgb = Rgb::new(255, 255, 255);
const BLACK: Rgb = Rgb::new(0, 0, 0);

/// Pixel size of the frame thumbnail.
pub const THUMBNAIL_SIZE: u32 = AVATAR_COLUMNS as u32;

/// What the round frame shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameContent<'a> {
    /// No image configured.
    Placeholder,
    /// The image is still loading.
    Loading,
    /// The image failed to load or decode.
    Empty,
    Image(&'a Thumbnail),
}

/// Converts a widget color to a terminal color.
#[must_use]
pub fn to_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.r, rgb.g, rgb.b)
}

/// Renders the widget preview centered in `area`.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use dday_protocol::WidgetConfig;
/// use dday_render::render;
/// use dday_tui::widgets::{FrameContent, render_preview};
/// use ratatui::{buffer::Buffer, layout::Rect};
///
/// let day = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
/// let widget = render(&WidgetConfig::new(day), day.and_hms_opt(9, 0, 0).unwrap());
///
/// let area = Rect::new(0, 0, 60, 12);
/// let mut buf = Buffer::empty(area);
/// render_preview(&widget, FrameContent::Loading, area, &mut buf);
/// ```
pub fn render_preview(widget: &WidgetRender, frame: FrameContent<'_>, area: Rect, buf: &mut Buffer) {
    let origin = Rect::new(
        area.x + area.width.saturating_sub(PREVIEW_WIDTH) / 2,
        area.y + area.height.saturating_sub(PREVIEW_HEIGHT) / 2,
        PREVIEW_WIDTH,
        PREVIEW_HEIGHT,
    )
    .intersection(area);
    let card = Rect::new(origin.x + AVATAR_OVERHANG, origin.y, CARD_WIDTH, CARD_HEIGHT)
        .intersection(area);
    let treatment = widget.treatment;

    if let Some(shadow) = treatment.container.drop_shadows.first() {
        let shade = widget.theme.mix(shadow.color, (shadow.opacity * 2.5).min(1.0));
        let offset = Rect::new(card.x + 1, card.y + 1, card.width, card.height).intersection(area);
        fill(offset, to_color(shade), buf);
    }
    fill(card, to_color(widget.theme), buf);

    let card_style = Style::default().bg(to_color(widget.theme));
    if let Some(border) = treatment.container.border {
        let edge = widget.theme.mix(border.color, (border.opacity * 4.0).min(1.0));
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Thick)
            .border_style(card_style.fg(to_color(edge)))
            .render(card, buf);
    } else if let Some(highlight) = treatment.container.inset_highlights.first() {
        let edge = widget.theme.mix(highlight.color, highlight.opacity);
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(card_style.fg(to_color(edge)))
            .render(card, buf);
    }

    render_text(widget, card, buf);

    let avatar = Rect::new(origin.x, origin.y + 1, AVATAR_COLUMNS, AVATAR_ROWS).intersection(area);
    render_frame(widget, frame, avatar, buf);
}

fn fill(area: Rect, color: Color, buf: &mut Buffer) {
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_symbol(" ").set_bg(color);
            }
        }
    }
}

/// Spreads label letters apart for typography with wide letter spacing.
fn spaced(text: &str, letter_spacing: f32) -> String {
    if letter_spacing < 1.0 {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len() * 2);
    for (i, ch) in text.chars().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push(ch);
    }
    out
}

fn render_text(widget: &WidgetRender, card: Rect, buf: &mut Buffer) {
    let treatment = widget.treatment;
    let text_x = card.x + AVATAR_COLUMNS - AVATAR_OVERHANG + 2;
    if text_x >= card.right() {
        return;
    }
    let width = (card.right() - text_x).saturating_sub(1) as usize;
    let shadow_fg = to_color(widget.theme.mix(BLACK, 0.35));
    let bg = to_color(widget.theme);

    let mut label_style = Style::default().fg(Color::White).bg(bg);
    if treatment.label.weight >= 700 {
        label_style = label_style.add_modifier(Modifier::BOLD);
    }
    let label_y = card.y + 2;
    if label_y >= card.bottom() {
        return;
    }
    let label = spaced(&widget.label, treatment.label.letter_spacing);
    if treatment.text_shadow.opacity > 0.0 && label_y + 1 < card.bottom() {
        // Offset copy under the label.
        buf.set_stringn(
            text_x + 1,
            label_y + 1,
            "▀".repeat(label.chars().count()),
            width.saturating_sub(1),
            Style::default().fg(shadow_fg).bg(bg),
        );
    }
    buf.set_stringn(text_x, label_y, &label, width, label_style);

    let caption_y = card.y + card.height.saturating_sub(3);
    if caption_y > label_y + 1 {
        buf.set_stringn(
            text_x,
            caption_y,
            &widget.caption,
            width,
            Style::default().fg(Color::White).bg(bg),
        );
    }
}

/// Returns `true` if the pixel center lies inside the frame's circle.
fn in_circle(px: u32, py: u32, diameter: u32) -> bool {
    let r = diameter as f32 / 2.0;
    let dx = px as f32 + 0.5 - r;
    let dy = py as f32 + 0.5 - r;
    dx * dx + dy * dy <= r * r
}

/// Composites a thumbnail pixel over the frame's base color.
fn over(pixel: Pixel, base: Rgb) -> Rgb {
    let image = Rgb::new(pixel.r, pixel.g, pixel.b);
    base.mix(image, f32::from(pixel.a) / 255.0)
}

fn render_frame(widget: &WidgetRender, content: FrameContent<'_>, area: Rect, buf: &mut Buffer) {
    if area.is_empty() {
        return;
    }
    let base = widget.theme.mix(WHITE, 0.2);
    let diameter = u32::from(AVATAR_COLUMNS);
    let color_at = |px: u32, py: u32| -> Option<Rgb> {
        if !in_circle(px, py, diameter) {
            return None;
        }
        match content {
            FrameContent::Image(thumb) => Some(thumb.get(px, py).map_or(base, |p| over(p, base))),
            _ => Some(base),
        }
    };

    for row in 0..area.height {
        for col in 0..area.width {
            let (px, py) = (u32::from(col), u32::from(row) * 2);
            let top = color_at(px, py);
            let bottom = color_at(px, py + 1);
            let Some(cell) = buf.cell_mut((area.x + col, area.y + row)) else {
                continue;
            };
            match (top, bottom) {
                (None, None) => {}
                (Some(top), Some(bottom)) if top == bottom => {
                    cell.set_symbol(" ").set_bg(to_color(top));
                }
                (Some(top), bottom) => {
                    let behind = cell.bg;
                    cell.set_symbol("▀")
                        .set_fg(to_color(top))
                        .set_bg(bottom.map_or(behind, to_color));
                }
                (None, Some(bottom)) => {
                    cell.set_symbol("▄").set_fg(to_color(bottom));
                }
            }
        }
    }

    let hint = match content {
        FrameContent::Placeholder => Some(["Add", "Image"]),
        FrameContent::Loading => Some(["", "..."]),
        FrameContent::Empty | FrameContent::Image(_) => None,
    };
    if let Some(lines) = hint {
        let style = Style::default().fg(Color::DarkGray).bg(to_color(base));
        for (i, line) in lines.iter().enumerate() {
            let x = area.x + (area.width.saturating_sub(line.len() as u16)) / 2;
            let y = area.y + (area.height / 2).saturating_sub(1) + i as u16;
            if y < area.bottom() {
                buf.set_stringn(x, y, line, area.width as usize, style);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use dday_protocol::{WidgetConfig, WidgetStyle};
    use dday_render::render;

    use super::*;
    use crate::test_utils::buffer_to_string;

    fn widget(style: WidgetStyle) -> WidgetRender {
        let target = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let now = NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let mut config = WidgetConfig::new(target);
        config.set_style(style);
        render(&config, now)
    }

    #[test]
    fn preview_shows_label_and_caption() {
        let area = Rect::new(0, 0, 60, 12);
        let mut buf = Buffer::empty(area);
        render_preview(&widget(WidgetStyle::Flat), FrameContent::Empty, area, &mut buf);

        let content = buffer_to_string(&buf);
        assert!(content.contains("D + 5"));
        assert!(content.contains("MON JAN 15"));
    }

    #[test]
    fn pixel_style_keeps_letters_tight_and_draws_border() {
        let area = Rect::new(0, 0, 60, 12);
        let mut buf = Buffer::empty(area);
        render_preview(&widget(WidgetStyle::Pixel), FrameContent::Empty, area, &mut buf);

        let content = buffer_to_string(&buf);
        assert!(content.contains("D+5"));
        assert!(content.contains('┏'));
    }

    #[test]
    fn dimensional_style_draws_rounded_border() {
        let area = Rect::new(0, 0, 60, 12);
        let mut buf = Buffer::empty(area);
        render_preview(&widget(WidgetStyle::Dimensional), FrameContent::Empty, area, &mut buf);

        assert!(buffer_to_string(&buf).contains('╭'));
    }

    #[test]
    fn placeholder_hint_in_frame() {
        let area = Rect::new(0, 0, 60, 12);
        let mut buf = Buffer::empty(area);
        render_preview(&widget(WidgetStyle::Flat), FrameContent::Placeholder, area, &mut buf);

        let content = buffer_to_string(&buf);
        assert!(content.contains("Add"));
        assert!(content.contains("Image"));
    }

    #[test]
    fn card_uses_theme_background() {
        let area = Rect::new(0, 0, PREVIEW_WIDTH, PREVIEW_HEIGHT);
        let mut buf = Buffer::empty(area);
        let widget = widget(WidgetStyle::Flat);
        render_preview(&widget, FrameContent::Empty, area, &mut buf);

        let inside = buf.cell((AVATAR_OVERHANG + CARD_WIDTH - 2, 1)).unwrap();
        assert_eq!(inside.bg, Color::Rgb(0xC4, 0xE4, 0xFF));
    }

    #[test]
    fn circle_mask_is_symmetric() {
        let d = u32::from(AVATAR_COLUMNS);
        assert!(!in_circle(0, 0, d));
        assert!(in_circle(d / 2, d / 2, d));
        for y in 0..d {
            for x in 0..d {
                assert_eq!(in_circle(x, y, d), in_circle(d - 1 - x, y, d));
                assert_eq!(in_circle(x, y, d), in_circle(x, d - 1 - y, d));
            }
        }
    }

    #[test]
    fn transparent_pixels_show_base() {
        let base = Rgb::new(10, 20, 30);
        let clear = Pixel { r: 255, g: 0, b: 0, a: 0 };
        assert_eq!(over(clear, base), base);
        let solid = Pixel { r: 255, g: 0, b: 0, a: 255 };
        assert_eq!(over(solid, base), Rgb::new(255, 0, 0));
    }

    #[test]
    fn tiny_area_does_not_panic() {
        let area = Rect::new(0, 0, 5, 2);
        let mut buf = Buffer::empty(area);
        render_preview(&widget(WidgetStyle::Pixel), FrameContent::Loading, area, &mut buf);
    }

    #[test]
    fn spaced_only_for_wide_spacing() {
        assert_eq!(spaced("D+5", 1.5), "D + 5");
        assert_eq!(spaced("D+5", -1.2), "D+5");
    }
}
