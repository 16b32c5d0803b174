//! Editor message types.
//!
//! This module defines the message enum produced by the editor's input
//! handler and consumed by the editor state.

use serde::{Deserialize, Serialize};

/// Messages that represent user actions in the editor.
///
/// # Examples
///
/// ```
/// use dday_protocol::Message;
///
/// let msg = Message::Input { ch: '2' };
/// assert!(msg.is_text_edit());
/// assert!(!Message::Export.is_text_edit());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Message {
    /// Move focus to the next form field.
    FocusNext,
    /// Move focus to the previous form field.
    FocusPrev,
    /// Step the focused value up (next day, next style, next color).
    Increment,
    /// Step the focused value down.
    Decrement,
    /// Move the text cursor left, or step a choice field back.
    CursorLeft,
    /// Move the text cursor right, or step a choice field forward.
    CursorRight,
    /// Type a character into the focused text field.
    Input {
        /// The character typed.
        ch: char,
    },
    /// Delete the character before the cursor.
    Backspace,
    /// Commit the focused field (used by the image field).
    Commit,
    /// Rasterize the preview to a PNG file.
    Export,
    /// Encode the current configuration as an embed link.
    GenerateLink,
    /// Copy the generated link to the clipboard.
    CopyLink,
    /// Open the generated link in a browser.
    OpenLink,
    /// Toggle the help overlay.
    ToggleHelp,
    /// Dismiss the help overlay or the current notification.
    Escape,
    /// Quit the editor.
    Quit,
}

impl Message {
    /// Returns `true` if this message edits the text of a field.
    #[must_use]
    pub fn is_text_edit(&self) -> bool {
        matches!(
            self,
            Self::Input { .. } | Self::Backspace | Self::CursorLeft | Self::CursorRight
        )
    }

    /// Returns `true` if this message triggers an outward action.
    ///
    /// # Examples
    ///
    /// ```
    /// use dday_protocol::Message;
    ///
    /// assert!(Message::Export.is_action());
    /// assert!(Message::CopyLink.is_action());
    /// assert!(!Message::FocusNext.is_action());
    /// ```
    #[must_use]
    pub fn is_action(&self) -> bool {
        matches!(
            self,
            Self::Export | Self::GenerateLink | Self::CopyLink | Self::OpenLink
        )
    }

    /// Returns `true` if this message should terminate the application.
    #[must_use]
    pub fn is_terminating(&self) -> bool {
        matches!(self, Self::Quit)
    }
}
