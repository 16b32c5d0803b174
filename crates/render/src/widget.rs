//! The pure render function.

use chrono::NaiveDateTime;
use dday_protocol::{ImageSource, Rgb, WidgetConfig, WidgetStyle};

use crate::countdown;
use crate::treatment::{self, StyleTreatment};

/// Widget width in pixels.
pub const WIDGET_WIDTH: f32 = 320.0;
/// Widget height in pixels.
pub const WIDGET_HEIGHT: f32 = 140.0;
/// Corner radius of the container.
pub const CORNER_RADIUS: f32 = 40.0;
/// Diameter of the round avatar frame.
pub const AVATAR_SIZE: f32 = 100.0;
/// How far the avatar sticks out past the container's left edge.
pub const AVATAR_OVERHANG: f32 = 35.0;
/// Left padding of the label column, leaving room for the avatar.
pub const CONTENT_OFFSET: f32 = 64.0;

/// What the round frame shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Avatar {
    /// No image configured: an "Add Image" hint.
    Placeholder,
    /// The configured image. Whether it actually shows depends on its load
    /// state, which painters receive separately.
    Image(ImageSource),
}

/// The visual output of rendering a widget configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetRender {
    pub day_offset: i64,
    /// `D+n` or `D-n`.
    pub label: String,
    /// The date of `now`, as `MON DEC 1`.
    pub caption: String,
    pub style: WidgetStyle,
    pub theme: Rgb,
    pub treatment: &'static StyleTreatment,
    pub avatar: Avatar,
}

/// Renders a widget configuration at a given local wall-clock time.
///
/// The result depends only on its arguments: rendering the same
/// configuration at the same `now` always yields an equal value.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use dday_protocol::WidgetConfig;
/// use dday_render::render;
///
/// let target = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
/// let now = NaiveDate::from_ymd_opt(2024, 1, 15)
///     .unwrap()
///     .and_hms_opt(9, 30, 0)
///     .unwrap();
///
/// let out = render(&WidgetConfig::new(target), now);
/// assert_eq!(out.label, "D+5");
/// assert_eq!(out.caption, "MON JAN 15");
/// ```
#[must_use]
pub fn render(config: &WidgetConfig, now: NaiveDateTime) -> WidgetRender {
    let day_offset = countdown::day_offset(config.target_date, now.date());
    WidgetRender {
        day_offset,
        label: countdown::label(day_offset),
        caption: countdown::caption(now),
        style: config.style,
        theme: config.theme.rgb(),
        treatment: treatment::for_style(config.style),
        avatar: config
            .image
            .clone()
            .map_or(Avatar::Placeholder, Avatar::Image),
    }
}

impl WidgetRender {
    /// Returns the image source shown in the frame, if any.
    #[must_use]
    pub fn image_source(&self) -> Option<&ImageSource> {
        match &self.avatar {
            Avatar::Placeholder => None,
            Avatar::Image(source) => Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, NaiveDate, TimeZone};
    use dday_protocol::link::{decode_query_in, encode_query_in};
    use dday_protocol::{LocalImage, Palette, ThemeColor};
    use proptest::prelude::*;

    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn config(target: NaiveDate) -> WidgetConfig {
        WidgetConfig::without_image(target, WidgetStyle::Dimensional, ThemeColor::default())
    }

    fn now() -> NaiveDateTime {
        day(2024, 1, 15).and_hms_opt(14, 0, 0).unwrap()
    }

    #[test]
    fn day_count_examples() {
        assert_eq!(render(&config(day(2024, 1, 10)), now()).label, "D+5");
        assert_eq!(render(&config(day(2024, 1, 20)), now()).label, "D-5");
        assert_eq!(render(&config(day(2024, 1, 15)), now()).label, "D+0");
        assert_eq!(render(&config(day(2024, 1, 20)), now()).day_offset, -5);
    }

    #[test]
    fn offset_ignores_time_of_day() {
        let late = day(2024, 1, 15).and_hms_opt(23, 59, 59).unwrap();
        let early = day(2024, 1, 15).and_hms_opt(0, 0, 0).unwrap();
        let cfg = config(day(2024, 1, 14));
        assert_eq!(render(&cfg, late).label, "D+1");
        assert_eq!(render(&cfg, early).label, "D+1");
    }

    #[test]
    fn caption_ignores_target_date() {
        let a = render(&config(day(2020, 6, 1)), now());
        let b = render(&config(day(2030, 12, 31)), now());
        assert_eq!(a.caption, "MON JAN 15");
        assert_eq!(a.caption, b.caption);
    }

    #[test]
    fn render_is_idempotent() {
        let mut cfg = WidgetConfig::new(day(2024, 12, 25));
        cfg.set_theme(ThemeColor::Preset(Palette::Mint));
        assert_eq!(render(&cfg, now()), render(&cfg, now()));
    }

    #[test]
    fn avatar_follows_image() {
        let cfg = config(day(2024, 1, 1));
        assert_eq!(render(&cfg, now()).avatar, Avatar::Placeholder);
        assert_eq!(render(&cfg, now()).image_source(), None);

        let cfg = WidgetConfig::new(day(2024, 1, 1));
        assert_eq!(
            render(&cfg, now()).avatar,
            Avatar::Image(ImageSource::Local(LocalImage::Bundled))
        );
    }

    #[test]
    fn each_style_gets_its_own_treatment() {
        let mut cfg = config(day(2024, 1, 1));
        for style in WidgetStyle::ALL {
            cfg.set_style(style);
            let out = render(&cfg, now());
            assert_eq!(out.style, style);
            assert_eq!(out.treatment.style, style);
        }
    }

    fn arb_style() -> impl Strategy<Value = WidgetStyle> {
        prop_oneof![
            Just(WidgetStyle::Flat),
            Just(WidgetStyle::Dimensional),
            Just(WidgetStyle::Pixel),
        ]
    }

    fn arb_theme() -> impl Strategy<Value = ThemeColor> {
        prop_oneof![
            (0..Palette::ALL.len()).prop_map(|i| ThemeColor::Preset(Palette::ALL[i])),
            any::<(u8, u8, u8)>().prop_map(|(r, g, b)| ThemeColor::from_rgb(Rgb::new(r, g, b))),
        ]
    }

    fn arb_image() -> impl Strategy<Value = Option<ImageSource>> {
        prop_oneof![
            Just(None),
            "[a-z]{1,12}(/[a-z0-9]{1,8}){0,3}\\.(png|jpg|gif)".prop_map(|path| {
                ImageSource::network(&format!("https://img.example.com/{path}")).ok()
            }),
        ]
    }

    proptest! {
        #[test]
        fn decode_of_encode_renders_identically(
            days in -20_000i64..20_000,
            style in arb_style(),
            theme in arb_theme(),
            image in arb_image(),
            offset_hours in -11i32..=12,
        ) {
            let tz = FixedOffset::east_opt(offset_hours * 3600).unwrap();
            let target = day(2024, 1, 15) + chrono::Duration::days(days);
            let cfg = WidgetConfig { target_date: target, style, theme, image };
            let now_local = tz.with_ymd_and_hms(2024, 1, 15, 14, 0, 0).unwrap();

            let decoded = decode_query_in(&encode_query_in(&cfg, &tz), &now_local);
            prop_assert_eq!(
                render(&decoded, now_local.naive_local()),
                render(&cfg, now_local.naive_local())
            );
        }
    }
}
