//! Footer widgets: the keybinding hints and the toast line.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::state::EditorState;
use crate::toast::{Toast, ToastLevel};

/// Renders the single-row status bar with keybinding hints.
///
/// While an export is in flight the hints are prefixed with a notice.
///
/// # Layout
///
/// ```text
/// Exporting…  ^E Export  ^G Link  ^Y Copy  ^O Open  F1 Help  ^C Quit
/// ```
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use dday_protocol::WidgetConfig;
/// use dday_tui::state::EditorState;
/// use dday_tui::widgets::render_status_bar;
/// use ratatui::{buffer::Buffer, layout::Rect};
///
/// let state = EditorState::new(WidgetConfig::new(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()));
/// let area = Rect::new(0, 0, 80, 1);
/// let mut buf = Buffer::empty(area);
/// render_status_bar(&state, area, &mut buf);
/// ```
pub fn render_status_bar(state: &EditorState, area: Rect, buf: &mut Buffer) {
    let key_style = Style::default().fg(Color::Yellow);
    let text_style = Style::default().fg(Color::White);

    let mut spans = Vec::new();
    if state.is_exporting() {
        spans.push(Span::styled(
            "Exporting…  ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));
    }
    for (key, action) in [
        ("^E", "Export"),
        ("^G", "Link"),
        ("^Y", "Copy"),
        ("^O", "Open"),
        ("F1", "Help"),
        ("^C", "Quit"),
    ] {
        spans.push(Span::styled(key, key_style));
        spans.push(Span::styled(format!(" {action}  "), text_style));
    }

    Paragraph::new(Line::from(spans))
        .style(Style::default().bg(Color::Black))
        .render(area, buf);
}

/// Renders the current toast, if any, on a single row.
pub fn render_toast(toast: Option<&Toast>, area: Rect, buf: &mut Buffer) {
    let Some(toast) = toast else {
        return;
    };
    let color = toast_color(toast.level);
    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", toast.level.tag()),
            Style::default()
                .fg(Color::Black)
                .bg(color)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!(" {}", toast.message), Style::default().fg(color)),
    ]);
    Paragraph::new(line).render(area, buf);
}

fn toast_color(level: ToastLevel) -> Color {
    match level {
        ToastLevel::Info => Color::Green,
        ToastLevel::Warning => Color::Yellow,
        ToastLevel::Error => Color::Red,
    }
}
