//! Editor state management.
//!
//! This module defines the core state structures for the editor, including
//! focus management, the live widget configuration and the text buffers
//! bound to it.

use chrono::{Days, NaiveDate};
use dday_protocol::date::{format_manual_date, parse_manual_date};
use dday_protocol::{
    EmbedLink, ImageSource, LocalImage, Palette, ProtocolError, Rgb, ThemeColor, WidgetConfig,
};
use tracing::debug;

use crate::input::TextInput;
use crate::toast::Toast;

/// The form field receiving keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Date,
    Style,
    Theme,
    Image,
}

impl Focus {
    /// All fields in tab order.
    pub const ALL: [Self; 4] = [Self::Date, Self::Style, Self::Theme, Self::Image];

    /// Returns the next field (wrapping around).
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Date => Self::Style,
            Self::Style => Self::Theme,
            Self::Theme => Self::Image,
            Self::Image => Self::Date,
        }
    }

    /// Returns the previous field (wrapping around).
    #[must_use]
    pub fn prev(self) -> Self {
        match self {
            Self::Date => Self::Image,
            Self::Style => Self::Date,
            Self::Theme => Self::Style,
            Self::Image => Self::Theme,
        }
    }

    /// Returns the field label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Date => "D-Day Date",
            Self::Style => "Font Style",
            Self::Theme => "Color Theme",
            Self::Image => "Widget Image",
        }
    }

    /// Returns `true` for fields edited as free text.
    #[must_use]
    pub fn is_text(self) -> bool {
        !matches!(self, Self::Style)
    }
}

/// Outcome of committing the image field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageCommit {
    /// The field was empty; the widget now has no image.
    Cleared,
    /// A network image was installed and needs loading.
    Network(ImageSource),
    /// A local file was installed and needs loading. It will not be
    /// carried by embed links.
    Local(ImageSource),
    /// The text looked like a URL but was not a usable image URL. The
    /// current image is kept.
    Rejected(ProtocolError),
}

/// A generated link together with the configuration it encodes.
#[derive(Debug, Clone, PartialEq, Eq)]
struct GeneratedLink {
    link: EmbedLink,
    config: WidgetConfig,
}

/// The editor state.
///
/// Owns the single live [`WidgetConfig`]. Every mutation goes through the
/// methods below, which keep the text buffers and the committed values
/// decoupled: a buffer may hold unparseable text while the committed value
/// stays valid.
#[derive(Debug, Clone)]
pub struct EditorState {
    config: WidgetConfig,
    /// Focused form field.
    pub focus: Focus,
    date_input: TextInput,
    theme_input: TextInput,
    image_input: TextInput,
    /// Whether the help overlay is visible.
    pub help_visible: bool,
    toast: Option<Toast>,
    link: Option<GeneratedLink>,
    exporting: bool,
}

impl EditorState {
    /// Creates the editor state for a starting configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use dday_protocol::WidgetConfig;
    /// use dday_tui::state::{EditorState, Focus};
    ///
    /// let today = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
    /// let state = EditorState::new(WidgetConfig::new(today));
    /// assert_eq!(state.focus, Focus::Date);
    /// assert_eq!(state.date_input().value(), "2024-01-15");
    /// ```
    #[must_use]
    pub fn new(config: WidgetConfig) -> Self {
        let image_text = match &config.image {
            Some(ImageSource::Network(image)) => image.to_string(),
            Some(ImageSource::Local(LocalImage::File(path))) => path.display().to_string(),
            Some(ImageSource::Local(LocalImage::Bundled)) | None => String::new(),
        };
        Self {
            date_input: TextInput::new(format_manual_date(config.target_date)),
            theme_input: TextInput::new(config.theme.to_string()),
            image_input: TextInput::new(image_text),
            config,
            focus: Focus::default(),
            help_visible: false,
            toast: None,
            link: None,
            exporting: false,
        }
    }

    /// Returns the live widget configuration.
    #[must_use]
    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    #[must_use]
    pub fn date_input(&self) -> &TextInput {
        &self.date_input
    }

    #[must_use]
    pub fn theme_input(&self) -> &TextInput {
        &self.theme_input
    }

    #[must_use]
    pub fn image_input(&self) -> &TextInput {
        &self.image_input
    }

    /// Returns `true` if the date buffer does not match the committed date.
    #[must_use]
    pub fn date_input_pending(&self) -> bool {
        parse_manual_date(self.date_input.value()) != Some(self.config.target_date)
    }

    /// Returns `true` if the theme buffer does not match the committed color.
    #[must_use]
    pub fn theme_input_pending(&self) -> bool {
        parse_theme_entry(self.theme_input.value()) != Some(self.config.theme)
    }

    /// Returns the text buffer of the focused field, if it has one.
    #[must_use]
    pub fn focused_input(&self) -> Option<&TextInput> {
        match self.focus {
            Focus::Date => Some(&self.date_input),
            Focus::Theme => Some(&self.theme_input),
            Focus::Image => Some(&self.image_input),
            Focus::Style => None,
        }
    }

    fn focused_input_mut(&mut self) -> Option<&mut TextInput> {
        match self.focus {
            Focus::Date => Some(&mut self.date_input),
            Focus::Theme => Some(&mut self.theme_input),
            Focus::Image => Some(&mut self.image_input),
            Focus::Style => None,
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    /// Toggles the help overlay visibility.
    pub fn toggle_help(&mut self) {
        self.help_visible = !self.help_visible;
    }

    /// Dismisses the help overlay if it is visible.
    ///
    /// Returns `true` if help was visible and has been dismissed.
    #[must_use]
    pub fn dismiss_help(&mut self) -> bool {
        std::mem::take(&mut self.help_visible)
    }

    /// Moves the committed date by `days` and resets the date buffer.
    ///
    /// Steps that would leave the supported calendar range are ignored.
    pub fn step_date(&mut self, days: i64) {
        let magnitude = Days::new(days.unsigned_abs());
        let stepped = if days >= 0 {
            self.config.target_date.checked_add_days(magnitude)
        } else {
            self.config.target_date.checked_sub_days(magnitude)
        };
        if let Some(date) = stepped {
            self.commit_date(date);
        }
    }

    /// Sets the committed date and resets the date buffer to its canonical form.
    pub fn commit_date(&mut self, date: NaiveDate) {
        self.config.set_target_date(date);
        self.date_input.set(format_manual_date(date));
        debug!(%date, "Target date set");
    }

    /// Cycles the style forwards or backwards.
    pub fn cycle_style(&mut self, forward: bool) {
        let style = if forward {
            self.config.style.next()
        } else {
            self.config.style.prev()
        };
        self.config.set_style(style);
        debug!(%style, "Style set");
    }

    /// Cycles the theme through the palette and resets the theme buffer.
    pub fn cycle_theme(&mut self, forward: bool) {
        let theme = if forward {
            self.config.theme.next_preset()
        } else {
            self.config.theme.prev_preset()
        };
        self.commit_theme(theme);
    }

    fn commit_theme(&mut self, theme: ThemeColor) {
        self.config.set_theme(theme);
        self.theme_input.set(theme.to_string());
        debug!(%theme, "Theme set");
    }

    /// Handles Up (`forward`) or Down on the focused field.
    pub fn adjust(&mut self, forward: bool) {
        match self.focus {
            Focus::Date => self.step_date(if forward { 1 } else { -1 }),
            Focus::Style => self.cycle_style(forward),
            Focus::Theme => self.cycle_theme(forward),
            Focus::Image => {}
        }
    }

    /// Handles Left or Right (`forward`) on the focused field.
    pub fn move_cursor(&mut self, forward: bool) {
        if self.focus == Focus::Style {
            self.cycle_style(forward);
            return;
        }
        if let Some(input) = self.focused_input_mut() {
            if forward {
                input.move_right();
            } else {
                input.move_left();
            }
        }
    }

    /// Types a character into the focused text field.
    pub fn input_char(&mut self, ch: char) {
        if let Some(input) = self.focused_input_mut() {
            input.insert_char(ch);
            self.reparse_focused();
        }
    }

    /// Deletes the character before the cursor in the focused text field.
    pub fn backspace(&mut self) {
        let erased = self.focused_input_mut().is_some_and(TextInput::backspace);
        if erased {
            self.reparse_focused();
        }
    }

    /// Commits the buffer of the focused field if it parses.
    ///
    /// The buffer itself is left exactly as typed.
    fn reparse_focused(&mut self) {
        match self.focus {
            Focus::Date => {
                let parsed = parse_manual_date(self.date_input.value());
                if let Some(date) = parsed.filter(|d| *d != self.config.target_date) {
                    self.config.set_target_date(date);
                    debug!(%date, "Target date committed from text");
                }
            }
            Focus::Theme => {
                let parsed = parse_theme_entry(self.theme_input.value());
                if let Some(theme) = parsed.filter(|t| *t != self.config.theme) {
                    self.config.set_theme(theme);
                    debug!(%theme, "Theme committed from text");
                }
            }
            Focus::Style | Focus::Image => {}
        }
    }

    /// Resets the focused date or theme buffer to the committed value.
    pub fn revert_focused(&mut self) {
        match self.focus {
            Focus::Date => self.date_input.set(format_manual_date(self.config.target_date)),
            Focus::Theme => self.theme_input.set(self.config.theme.to_string()),
            Focus::Style | Focus::Image => {}
        }
    }

    /// Commits the image buffer.
    ///
    /// Text starting with `http://` or `https://` becomes a network image,
    /// empty text removes the image and anything else is taken as a local
    /// file path.
    pub fn commit_image(&mut self) -> ImageCommit {
        let text = self.image_input.value().trim();
        if text.is_empty() {
            self.config.set_image(None);
            debug!("Image cleared");
            return ImageCommit::Cleared;
        }

        let lower = text.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            return match ImageSource::network(text) {
                Ok(source) => {
                    self.config.set_image(Some(source.clone()));
                    debug!(source = %source.describe(), "Network image set");
                    ImageCommit::Network(source)
                }
                Err(e) => ImageCommit::Rejected(e),
            };
        }

        let source = ImageSource::file(text);
        self.config.set_image(Some(source.clone()));
        debug!(source = %source.describe(), "Local image set");
        ImageCommit::Local(source)
    }

    #[must_use]
    pub fn toast(&self) -> Option<&Toast> {
        self.toast.as_ref()
    }

    /// Shows a toast, replacing any current one.
    pub fn show_toast(&mut self, toast: Toast) {
        self.toast = Some(toast);
    }

    /// Dismisses the current toast.
    ///
    /// Returns `true` if a toast was visible.
    pub fn dismiss_toast(&mut self) -> bool {
        self.toast.take().is_some()
    }

    /// Drops the toast once it has expired.
    pub fn expire_toast(&mut self, now: std::time::Instant) {
        if self.toast.as_ref().is_some_and(|t| t.is_expired(now)) {
            self.toast = None;
        }
    }

    /// Records a generated link for the current configuration.
    pub fn set_link(&mut self, link: EmbedLink) {
        self.link = Some(GeneratedLink {
            link,
            config: self.config.clone(),
        });
    }

    /// Returns the most recently generated link.
    #[must_use]
    pub fn link(&self) -> Option<&EmbedLink> {
        self.link.as_ref().map(|l| &l.link)
    }

    /// Returns `true` if the configuration changed since the link was
    /// generated.
    #[must_use]
    pub fn link_is_outdated(&self) -> bool {
        self.link.as_ref().is_some_and(|l| l.config != self.config)
    }

    #[must_use]
    pub fn is_exporting(&self) -> bool {
        self.exporting
    }

    /// Marks an export as started.
    ///
    /// Returns `false` if one is already in flight.
    #[must_use]
    pub fn begin_export(&mut self) -> bool {
        !std::mem::replace(&mut self.exporting, true)
    }

    pub fn finish_export(&mut self) {
        self.exporting = false;
    }
}

/// Parses text typed into the theme field.
///
/// Accepts a palette name or a complete six-digit hex color, with or
/// without the leading `#`. Partial input is rejected so the color does
/// not flicker while a code is typed.
///
/// # Examples
///
/// ```
/// use dday_protocol::{Palette, ThemeColor};
/// use dday_tui::state::parse_theme_entry;
///
/// assert_eq!(parse_theme_entry("mint"), Some(ThemeColor::Preset(Palette::Mint)));
/// assert_eq!(parse_theme_entry("#ff8800").map(|t| t.to_string()), Some("#FF8800".to_string()));
/// assert_eq!(parse_theme_entry("#ff8"), None);
/// ```
#[must_use]
pub fn parse_theme_entry(input: &str) -> Option<ThemeColor> {
    let input = input.trim();
    if let Some(preset) = Palette::from_name(input) {
        return Some(ThemeColor::Preset(preset));
    }
    let digits = input.strip_prefix('#').unwrap_or(input);
    if digits.len() != 6 {
        return None;
    }
    Rgb::parse_hex(digits).map(ThemeColor::from_rgb)
}

#[cfg(test)]
mod tests {
    use dday_protocol::WidgetStyle;

    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn state() -> EditorState {
        EditorState::new(WidgetConfig::new(day(2024, 1, 15)))
    }

    fn type_text(state: &mut EditorState, text: &str) {
        for ch in text.chars() {
            state.input_char(ch);
        }
    }

    fn clear_focused(state: &mut EditorState) {
        while state.focused_input().is_some_and(|i| !i.value().is_empty()) {
            state.backspace();
        }
    }

    #[test]
    fn new_state_has_correct_defaults() {
        let state = state();
        assert_eq!(state.focus, Focus::Date);
        assert_eq!(state.date_input().value(), "2024-01-15");
        assert_eq!(state.theme_input().value(), "#C4E4FF");
        assert_eq!(state.image_input().value(), "");
        assert!(!state.help_visible);
        assert!(state.toast().is_none());
        assert!(state.link().is_none());
        assert!(!state.is_exporting());
    }

    #[test]
    fn focus_cycles_in_tab_order() {
        let mut state = state();
        for expected in [Focus::Style, Focus::Theme, Focus::Image, Focus::Date] {
            state.focus_next();
            assert_eq!(state.focus, expected);
        }
        state.focus_prev();
        assert_eq!(state.focus, Focus::Image);
    }

    #[test]
    fn incomplete_date_keeps_committed_value() {
        let mut state = state();
        clear_focused(&mut state);
        type_text(&mut state, "2024-13-");

        assert_eq!(state.date_input().value(), "2024-13-");
        assert_eq!(state.config().target_date, day(2024, 1, 15));
        assert!(state.date_input_pending());
    }

    #[test]
    fn complete_date_commits() {
        let mut state = state();
        clear_focused(&mut state);
        type_text(&mut state, "2024-12-25");

        assert_eq!(state.config().target_date, day(2024, 12, 25));
        assert!(!state.date_input_pending());
    }

    #[test]
    fn invalid_text_stays_verbatim_after_valid_commit() {
        let mut state = state();
        clear_focused(&mut state);
        type_text(&mut state, "2024-12-25");
        state.backspace();

        assert_eq!(state.date_input().value(), "2024-12-2");
        assert_eq!(state.config().target_date, day(2024, 12, 25));
    }

    #[test]
    fn revert_restores_committed_text() {
        let mut state = state();
        type_text(&mut state, "x");
        state.revert_focused();
        assert_eq!(state.date_input().value(), "2024-01-15");

        state.focus = Focus::Theme;
        clear_focused(&mut state);
        type_text(&mut state, "#12");
        state.revert_focused();
        assert_eq!(state.theme_input().value(), "#C4E4FF");
    }

    #[test]
    fn picker_resets_date_buffer() {
        let mut state = state();
        clear_focused(&mut state);
        type_text(&mut state, "20");

        state.adjust(true);
        assert_eq!(state.config().target_date, day(2024, 1, 16));
        assert_eq!(state.date_input().value(), "2024-01-16");

        state.adjust(false);
        state.adjust(false);
        assert_eq!(state.date_input().value(), "2024-01-14");
    }

    #[test]
    fn step_date_ignores_out_of_range_steps() {
        let mut state = EditorState::new(WidgetConfig::new(NaiveDate::MAX));
        state.step_date(1);
        assert_eq!(state.config().target_date, NaiveDate::MAX);
    }

    #[test]
    fn style_cycles_with_arrows() {
        let mut state = state();
        state.focus = Focus::Style;

        state.adjust(true);
        assert_eq!(state.config().style, WidgetStyle::Pixel);
        state.move_cursor(true);
        assert_eq!(state.config().style, WidgetStyle::Flat);
        state.move_cursor(false);
        assert_eq!(state.config().style, WidgetStyle::Pixel);
    }

    #[test]
    fn typing_into_style_is_ignored() {
        let mut state = state();
        state.focus = Focus::Style;
        state.input_char('x');
        state.backspace();
        assert_eq!(state.config().style, WidgetStyle::Dimensional);
        assert!(state.focused_input().is_none());
    }

    #[test]
    fn theme_cycle_resets_buffer() {
        let mut state = state();
        state.focus = Focus::Theme;
        state.adjust(true);
        assert_eq!(state.config().theme, ThemeColor::Preset(Palette::Purple));
        assert_eq!(state.theme_input().value(), "#E5DBFF");
    }

    #[test]
    fn custom_hex_commits_only_when_complete() {
        let mut state = state();
        state.focus = Focus::Theme;
        clear_focused(&mut state);
        type_text(&mut state, "#FF88");
        assert_eq!(state.config().theme, ThemeColor::Preset(Palette::Blue));
        assert!(state.theme_input_pending());

        type_text(&mut state, "00");
        assert_eq!(state.config().theme, ThemeColor::Custom(Rgb::new(0xFF, 0x88, 0x00)));
        assert_eq!(state.theme_input().value(), "#FF8800");
        assert!(!state.theme_input_pending());
    }

    #[test]
    fn typed_palette_hex_normalises_to_preset() {
        let mut state = state();
        state.focus = Focus::Theme;
        clear_focused(&mut state);
        type_text(&mut state, "ffdbe9");
        assert_eq!(state.config().theme, ThemeColor::Preset(Palette::Pink));
    }

    #[test]
    fn commit_empty_image_clears() {
        let mut state = state();
        state.focus = Focus::Image;
        assert_eq!(state.commit_image(), ImageCommit::Cleared);
        assert!(state.config().image.is_none());
    }

    #[test]
    fn commit_url_installs_network_image() {
        let mut state = state();
        state.focus = Focus::Image;
        type_text(&mut state, "https://example.com/cat.png");

        let commit = state.commit_image();
        assert!(matches!(commit, ImageCommit::Network(_)));
        assert!(!state.config().has_local_image());
        assert_eq!(
            state.config().image.as_ref().and_then(|i| i.portable_url()).map(|u| u.as_str()),
            Some("https://example.com/cat.png")
        );
    }

    #[test]
    fn commit_path_installs_local_image() {
        let mut state = state();
        state.focus = Focus::Image;
        type_text(&mut state, "pictures/cat.png");

        let commit = state.commit_image();
        assert_eq!(commit, ImageCommit::Local(ImageSource::file("pictures/cat.png")));
        assert!(state.config().has_local_image());
    }

    #[test]
    fn rejected_url_keeps_current_image() {
        let mut state = state();
        state.focus = Focus::Image;
        type_text(&mut state, "https://");

        assert!(matches!(state.commit_image(), ImageCommit::Rejected(_)));
        assert_eq!(state.config().image, Some(ImageSource::Local(LocalImage::Bundled)));
    }

    #[test]
    fn toggle_and_dismiss_help() {
        let mut state = state();
        state.toggle_help();
        assert!(state.help_visible);
        assert!(state.dismiss_help());
        assert!(!state.help_visible);
        assert!(!state.dismiss_help());
    }

    #[test]
    fn toasts_replace_and_dismiss() {
        let mut state = state();
        state.show_toast(Toast::info("one"));
        state.show_toast(Toast::error("two"));
        assert_eq!(state.toast().map(|t| t.message.as_str()), Some("two"));
        assert!(state.dismiss_toast());
        assert!(!state.dismiss_toast());
    }

    #[test]
    fn link_goes_stale_after_edit() {
        let mut state = state();
        state.set_link(EmbedLink {
            url: "https://dday.example/embed?style=3d".to_string(),
            image_omitted: true,
        });
        assert!(!state.link_is_outdated());

        state.adjust(true);
        assert!(state.link_is_outdated());
        assert!(state.link().is_some());
    }

    #[test]
    fn only_one_export_at_a_time() {
        let mut state = state();
        assert!(state.begin_export());
        assert!(!state.begin_export());
        state.finish_export();
        assert!(state.begin_export());
    }
}
