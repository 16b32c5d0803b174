//! Event handling and key mappings.
//!
//! This module provides event polling and conversion from terminal events
//! to editor messages.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use dday_protocol::Message;

/// Default poll timeout for events.
pub const POLL_TIMEOUT: Duration = Duration::from_millis(100);

/// Polls for a terminal event with the default timeout.
///
/// Returns `Some(Event)` if an event is available within the timeout,
/// or `None` if the timeout expires without an event.
///
/// # Errors
///
/// Returns an error if polling the terminal fails.
pub fn poll_event() -> std::io::Result<Option<Event>> {
    if event::poll(POLL_TIMEOUT)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Converts a terminal event to an editor message.
///
/// Only key presses are handled; releases, repeats reported as separate
/// events, mouse and resize events map to `None`.
#[must_use]
pub fn event_to_message(event: &Event) -> Option<Message> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => key_to_message(*key),
        _ => None,
    }
}

/// Converts a terminal key event to an editor message.
///
/// # Key Bindings
///
/// | Key | Action |
/// |-----|--------|
/// | `Ctrl+C` | Quit |
/// | `Ctrl+E` | Export PNG |
/// | `Ctrl+G` | Generate embed link |
/// | `Ctrl+Y` | Copy link |
/// | `Ctrl+O` | Open link in browser |
/// | `Tab` / `Shift+Tab` | Next / previous field |
/// | `Up` / `Down` | Change the focused value |
/// | `Left` / `Right` | Move the text cursor |
/// | `Enter` | Commit the image field |
/// | `Backspace` | Delete before the cursor |
/// | `F1` | Toggle help |
/// | `Esc` | Dismiss help or notification |
/// | Printable characters | Text input |
#[must_use]
pub fn key_to_message(key: KeyEvent) -> Option<Message> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Message::Quit),
            KeyCode::Char('e') => Some(Message::Export),
            KeyCode::Char('g') => Some(Message::GenerateLink),
            KeyCode::Char('y') => Some(Message::CopyLink),
            KeyCode::Char('o') => Some(Message::OpenLink),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Esc => Some(Message::Escape),
        KeyCode::F(1) => Some(Message::ToggleHelp),

        KeyCode::Tab => Some(Message::FocusNext),
        KeyCode::BackTab => Some(Message::FocusPrev),

        KeyCode::Up => Some(Message::Increment),
        KeyCode::Down => Some(Message::Decrement),
        KeyCode::Left => Some(Message::CursorLeft),
        KeyCode::Right => Some(Message::CursorRight),

        KeyCode::Enter => Some(Message::Commit),
        KeyCode::Backspace => Some(Message::Backspace),

        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::ALT) => {
            Some(Message::Input { ch })
        }

        _ => None,
    }
}
