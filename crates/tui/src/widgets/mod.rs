//! Widget components for the dday editor.
//!
//! Each widget is a pure function that renders state to a buffer, which
//! keeps them easy to test and compose.
//!
//! # Modules
//!
//! - [`form`]: The date, style, theme and image fields
//! - [`preview`]: The live widget card with its image frame
//! - [`link_panel`]: The generated embed link
//! - [`status_bar`]: Keybinding hints and the toast line
//! - [`help`]: The keybinding overlay
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use dday_protocol::WidgetConfig;
//! use dday_tui::state::EditorState;
//! use dday_tui::widgets;
//! use ratatui::{buffer::Buffer, layout::Rect};
//!
//! let state = EditorState::new(WidgetConfig::new(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()));
//!
//! let area = Rect::new(0, 0, 80, 5);
//! let mut buf = Buffer::empty(area);
//!
//! widgets::render_link_panel(&state, area, &mut buf);
//! ```

pub mod form;
pub mod help;
pub mod link_panel;
pub mod preview;
pub mod status_bar;

pub use form::render_form;
pub use help::render_help_overlay;
pub use link_panel::render_link_panel;
pub use preview::{FrameContent, THUMBNAIL_SIZE, render_preview, to_color};
pub use status_bar::{render_status_bar, render_toast};
