//! The widget configuration model.

use chrono::NaiveDate;

use crate::color::ThemeColor;
use crate::image::{ImageSource, LocalImage};
use crate::style::WidgetStyle;

/// Everything needed to render one countdown widget.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use dday_protocol::{WidgetConfig, WidgetStyle};
///
/// let today = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
/// let mut config = WidgetConfig::new(today);
/// assert_eq!(config.style, WidgetStyle::Dimensional);
/// assert!(config.image.as_ref().is_some_and(|i| i.is_local()));
///
/// config.set_style(WidgetStyle::Pixel);
/// assert_eq!(config.style, WidgetStyle::Pixel);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WidgetConfig {
    /// The day being counted to (or from).
    pub target_date: NaiveDate,
    /// Visual treatment.
    pub style: WidgetStyle,
    /// Background color.
    pub theme: ThemeColor,
    /// Optional picture shown in the round frame.
    pub image: Option<ImageSource>,
}

impl WidgetConfig {
    /// Creates the editor's starting configuration.
    ///
    /// Targets `today` with the default style and color and the bundled
    /// placeholder image.
    #[must_use]
    pub fn new(today: NaiveDate) -> Self {
        Self {
            target_date: today,
            style: WidgetStyle::default(),
            theme: ThemeColor::default(),
            image: Some(ImageSource::Local(LocalImage::Bundled)),
        }
    }

    /// Creates a configuration with no image.
    #[must_use]
    pub fn without_image(target_date: NaiveDate, style: WidgetStyle, theme: ThemeColor) -> Self {
        Self {
            target_date,
            style,
            theme,
            image: None,
        }
    }

    /// Sets the target date.
    pub fn set_target_date(&mut self, date: NaiveDate) {
        self.target_date = date;
    }

    /// Sets the style.
    pub fn set_style(&mut self, style: WidgetStyle) {
        self.style = style;
    }

    /// Sets the theme color.
    pub fn set_theme(&mut self, theme: ThemeColor) {
        self.theme = theme;
    }

    /// Replaces the image.
    pub fn set_image(&mut self, image: Option<ImageSource>) {
        self.image = image;
    }

    /// Returns `true` if the image cannot be carried by an embed link.
    #[must_use]
    pub fn has_local_image(&self) -> bool {
        self.image.as_ref().is_some_and(ImageSource::is_local)
    }
}
