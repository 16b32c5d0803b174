//! The editor form: date, style, theme and image fields.
//!
//! Each field takes three rows: a label, the value and a hint. The focused
//! field is highlighted and shows a block cursor in its text buffer.

use dday_protocol::date::format_manual_date;
use dday_protocol::{Palette, ThemeColor, WidgetStyle};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Widget},
};

use super::preview::to_color;
use crate::input::TextInput;
use crate::layout::FIELD_HEIGHT;
use crate::state::{EditorState, Focus};

/// Renders the form into `area`.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use dday_protocol::WidgetConfig;
/// use dday_tui::state::EditorState;
/// use dday_tui::widgets::render_form;
/// use ratatui::{buffer::Buffer, layout::Rect};
///
/// let day = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
/// let state = EditorState::new(WidgetConfig::new(day));
///
/// let area = Rect::new(0, 0, 34, 14);
/// let mut buf = Buffer::empty(area);
/// render_form(&state, area, &mut buf);
/// ```
pub fn render_form(state: &EditorState, area: Rect, buf: &mut Buffer) {
    let block = Block::default()
        .title(" Widget ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    block.render(area, buf);

    for (i, field) in Focus::ALL.into_iter().enumerate() {
        let y = inner.y + i as u16 * FIELD_HEIGHT;
        if y >= inner.bottom() {
            break;
        }
        let height = FIELD_HEIGHT.min(inner.bottom() - y);
        let field_area = Rect::new(inner.x, y, inner.width, height);
        render_field(state, field, field_area, buf);
    }
}

fn render_field(state: &EditorState, field: Focus, area: Rect, buf: &mut Buffer) {
    let focused = state.focus == field;
    let label_style = if focused {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    let marker = if focused { "> " } else { "  " };
    let rows = [
        Line::from(vec![
            Span::styled(marker, label_style),
            Span::styled(field.label().to_uppercase(), label_style),
        ]),
        value_line(state, field, focused),
        hint_line(state, field, focused),
    ];

    for (row, line) in rows.iter().enumerate() {
        let y = area.y + row as u16;
        if y >= area.bottom() {
            break;
        }
        buf.set_line(area.x, y, line, area.width);
    }
}

fn value_line(state: &EditorState, field: Focus, focused: bool) -> Line<'static> {
    let config = state.config();
    match field {
        Focus::Date => text_line(state.date_input(), focused),
        Focus::Style => style_line(config.style, focused),
        Focus::Theme => {
            let mut line = text_line(state.theme_input(), focused);
            line.spans.push(Span::raw(" "));
            line.spans.push(Span::styled(
                "██",
                Style::default().fg(to_color(config.theme.rgb())),
            ));
            line
        }
        Focus::Image => text_line(state.image_input(), focused),
    }
}

/// Renders a text buffer with a block cursor when focused.
fn text_line(input: &TextInput, focused: bool) -> Line<'static> {
    let value_style = Style::default().fg(Color::White);
    let value = input.value();
    if !focused {
        return Line::from(vec![Span::raw("  "), Span::styled(value.to_string(), value_style)]);
    }

    let (before, rest) = value.split_at(input.cursor());
    let mut chars = rest.chars();
    let at_cursor = chars.next().map_or_else(|| " ".to_string(), String::from);
    let after: String = chars.collect();
    Line::from(vec![
        Span::raw("  "),
        Span::styled(before.to_string(), value_style),
        Span::styled(at_cursor, value_style.add_modifier(Modifier::REVERSED)),
        Span::styled(after, value_style),
    ])
}

fn style_line(current: WidgetStyle, focused: bool) -> Line<'static> {
    let mut spans = vec![Span::raw("  ")];
    for (i, style) in WidgetStyle::ALL.into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" | ", Style::default().fg(Color::DarkGray)));
        }
        let span_style = if style == current {
            let selected = Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD);
            if focused {
                selected.bg(Color::Yellow)
            } else {
                selected
            }
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!(" {} ", style.display_name()), span_style));
    }
    Line::from(spans)
}

fn hint_line(state: &EditorState, field: Focus, focused: bool) -> Line<'static> {
    let hint = Style::default()
        .fg(Color::DarkGray)
        .add_modifier(Modifier::ITALIC);
    let warn = Style::default().fg(Color::Yellow);
    let config = state.config();

    let (text, style) = match field {
        Focus::Date if state.date_input_pending() => (
            format!("keeping {}", format_manual_date(config.target_date)),
            warn,
        ),
        Focus::Date => ("YYYY-MM-DD, Up/Down to step".to_string(), hint),
        Focus::Style => ("Left/Right to switch".to_string(), hint),
        Focus::Theme if state.theme_input_pending() => {
            (format!("keeping {}", config.theme), warn)
        }
        Focus::Theme => (theme_hint(config.theme), hint),
        Focus::Image if config.has_local_image() => {
            ("Local image, not in links".to_string(), warn)
        }
        Focus::Image if focused => ("URL or file path, Enter".to_string(), hint),
        Focus::Image => ("Image URL for embeds".to_string(), hint),
    };
    Line::from(Span::styled(format!("  {text}"), style))
}

fn theme_hint(theme: ThemeColor) -> String {
    match theme.preset() {
        Some(preset) => format!("{} ({}/{})", preset.name(), palette_position(preset), Palette::ALL.len()),
        None => "custom color".to_string(),
    }
}

fn palette_position(preset: Palette) -> usize {
    Palette::ALL
        .iter()
        .position(|p| *p == preset)
        .map_or(0, |i| i + 1)
}
