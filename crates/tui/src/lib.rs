//! Terminal UI for the dday application.
//!
//! This crate provides the Ratatui-based widget editor and the embed host
//! that renders a widget straight from a shared link.
//!
//! # Overview
//!
//! The crate is organized into the following modules:
//!
//! - [`app`]: Main editor struct, effects and run loop
//! - [`state`]: Editor state and the live widget configuration
//! - [`input`]: Single-line text buffers for the form fields
//! - [`embed`]: Rendering a widget decoded from an embed link
//! - [`export`]: Writing rendered widgets to PNG or SVG files
//! - [`clipboard`]: Copying links through the terminal
//! - [`toast`]: Transient notifications
//! - [`terminal`]: Terminal setup, teardown, and panic handling
//! - [`event`]: Event handling and key mappings
//! - [`widgets`]: Rendering functions for each part of the screen
//!
//! # Example
//!
//! ```no_run
//! use chrono::Local;
//! use dday_config::Config;
//! use dday_tui::{App, terminal};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     terminal::install_panic_hook();
//!     let mut terminal = terminal::setup_terminal()?;
//!
//!     let mut app = App::new(Config::default(), Local::now().date_naive())?;
//!     let result = app.run(&mut terminal).await;
//!
//!     terminal::restore_terminal(&mut terminal)?;
//!     result
//! }
//! ```

pub mod app;
pub mod clipboard;
pub mod embed;
pub mod event;
pub mod export;
pub mod input;
pub mod layout;
pub mod state;
pub mod terminal;
pub mod toast;
pub mod widgets;

#[cfg(test)]
pub(crate) mod test_utils;

// Re-export primary types at crate root for convenience
pub use app::{App, Effect};
pub use embed::EmbedHost;
pub use state::{EditorState, Focus};
