//! Copying text to the system clipboard through the terminal.
//!
//! Uses the OSC 52 escape sequence, which works over SSH but depends on
//! terminal support. Terminals that ignore the sequence give no error.

use std::io::{self, Write};

use crossterm::{clipboard::CopyToClipboard, execute};

/// Asks the terminal behind `out` to place `text` on the clipboard.
///
/// # Errors
///
/// Returns an error if the escape sequence cannot be written.
pub fn copy_to_clipboard(out: &mut impl Write, text: &str) -> io::Result<()> {
    execute!(out, CopyToClipboard::to_clipboard_from(text))
}
