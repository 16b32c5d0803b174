//! The embed link panel below the editor.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget, Wrap},
};

use crate::state::EditorState;

/// Renders the most recently generated link, or a prompt to generate one.
///
/// The title is marked `(outdated)` once the configuration has changed
/// since the link was generated. Local images that were left out of the
/// link get a warning line.
pub fn render_link_panel(state: &EditorState, area: Rect, buf: &mut Buffer) {
    let outdated = state.link_is_outdated();
    let border_color = if outdated { Color::Yellow } else { Color::Cyan };
    let title = if outdated {
        " Embed link (outdated) "
    } else {
        " Embed link "
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border_color));

    let hint = Style::default()
        .fg(Color::DarkGray)
        .add_modifier(Modifier::ITALIC);

    let lines = match state.link() {
        None => vec![Line::from(Span::styled(
            "Press Ctrl+G to generate a link",
            hint,
        ))],
        Some(link) => {
            let mut lines = vec![Line::from(Span::styled(
                link.url.clone(),
                Style::default()
                    .fg(Color::LightBlue)
                    .add_modifier(Modifier::UNDERLINED),
            ))];
            if link.image_omitted {
                lines.push(Line::from(Span::styled(
                    "Local image left out; use an image URL to share it",
                    Style::default().fg(Color::Yellow),
                )));
            }
            lines
        }
    };

    Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .render(area, buf);
}
