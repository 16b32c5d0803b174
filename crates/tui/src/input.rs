//! Single-line text input with a byte-offset cursor.

/// A text buffer being edited in a form field.
///
/// The cursor is a byte offset that always sits on a character boundary.
///
/// # Examples
///
/// ```
/// use dday_tui::input::TextInput;
///
/// let mut input = TextInput::new("2024-01-1");
/// input.insert_char('5');
/// assert_eq!(input.value(), "2024-01-15");
///
/// input.move_left();
/// input.backspace();
/// assert_eq!(input.value(), "2024-01-5");
/// assert_eq!(input.cursor(), 8);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextInput {
    value: String,
    cursor: usize,
}

impl TextInput {
    /// Creates an input holding `value`, with the cursor at the end.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        let cursor = value.len();
        Self { value, cursor }
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Returns the number of characters before the cursor.
    #[must_use]
    pub fn cursor_column(&self) -> usize {
        self.value[..self.cursor].chars().count()
    }

    /// Replaces the contents, moving the cursor to the end.
    pub fn set(&mut self, value: impl Into<String>) {
        *self = Self::new(value);
    }

    /// Inserts a character at the cursor position.
    pub fn insert_char(&mut self, ch: char) {
        self.value.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
    }

    /// Deletes the character before the cursor.
    ///
    /// Returns `false` if the cursor was already at the start.
    pub fn backspace(&mut self) -> bool {
        let Some((prev_boundary, _)) = self.value[..self.cursor].char_indices().next_back() else {
            return false;
        };
        self.value.remove(prev_boundary);
        self.cursor = prev_boundary;
        true
    }

    pub fn move_left(&mut self) {
        if let Some((prev_boundary, _)) = self.value[..self.cursor].char_indices().next_back() {
            self.cursor = prev_boundary;
        }
    }

    pub fn move_right(&mut self) {
        if let Some(ch) = self.value[self.cursor..].chars().next() {
            self.cursor += ch.len_utf8();
        }
    }
}
