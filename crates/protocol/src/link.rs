//! Embed link encoding and decoding.
//!
//! An embed link carries a whole [`WidgetConfig`] in its query string:
//!
//! | param | format | fallback |
//! |-------|--------|----------|
//! | `date` | RFC 3339 timestamp | the current date |
//! | `style` | `flat`, `3d` or `pixel` | `3d` |
//! | `theme` | `#RRGGBB` | `#C4E4FF` |
//! | `image` | absolute `http(s)` URL | no image |
//!
//! Encoding writes the target date at local noon, so that the calendar day
//! survives the trip to a viewer in a nearby time zone. Decoding is total:
//! every parameter is treated as untrusted text and parsed with a fallback.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone};
use tracing::debug;
use url::{Url, form_urlencoded};

use crate::color::ThemeColor;
use crate::date::parse_manual_date;
use crate::image::{ImageSource, NetworkImage};
use crate::style::WidgetStyle;
use crate::widget::WidgetConfig;

/// Query parameter holding the target date.
pub const PARAM_DATE: &str = "date";
/// Query parameter holding the style name.
pub const PARAM_STYLE: &str = "style";
/// Query parameter holding the theme color.
pub const PARAM_THEME: &str = "theme";
/// Query parameter holding the image URL.
pub const PARAM_IMAGE: &str = "image";

/// A generated embed link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedLink {
    /// The full URL to paste into the host tool.
    pub url: String,
    /// `true` when the configuration had a local image that was left out.
    pub image_omitted: bool,
}

/// Encodes a configuration as a query string using the local time zone.
///
/// See [`encode_query_in`].
#[must_use]
pub fn encode_query(config: &WidgetConfig) -> String {
    encode_query_in(config, &Local)
}

/// Encodes a configuration as a query string in the given time zone.
///
/// The `image` parameter is only written for network images; local
/// references are silently omitted.
///
/// # Examples
///
/// ```
/// use chrono::{FixedOffset, NaiveDate};
/// use dday_protocol::{WidgetConfig, WidgetStyle, ThemeColor};
/// use dday_protocol::link::encode_query_in;
///
/// let date = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
/// let config = WidgetConfig::without_image(date, WidgetStyle::Flat, ThemeColor::default());
/// let tz = FixedOffset::east_opt(0).unwrap();
///
/// assert_eq!(
///     encode_query_in(&config, &tz),
///     "date=2024-01-10T12%3A00%3A00Z&style=flat&theme=%23C4E4FF"
/// );
/// ```
#[must_use]
pub fn encode_query_in<Tz: TimeZone>(config: &WidgetConfig, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let mut query = form_urlencoded::Serializer::new(String::new());
    query
        .append_pair(PARAM_DATE, &encode_date(config.target_date, tz))
        .append_pair(PARAM_STYLE, config.style.as_str())
        .append_pair(PARAM_THEME, &config.theme.rgb().to_hex());

    if let Some(url) = config.image.as_ref().and_then(ImageSource::portable_url) {
        query.append_pair(PARAM_IMAGE, url.as_str());
    }

    query.finish()
}

/// Builds a full embed link under `base`, using the local time zone.
///
/// See [`embed_link_in`] for how the target date crosses time zones.
#[must_use]
pub fn embed_link(base: &Url, config: &WidgetConfig) -> EmbedLink {
    embed_link_in(base, config, &Local)
}

/// Builds a full embed link under `base` in the given time zone.
///
/// Any query already present on `base` is kept and the widget parameters are
/// appended after it.
///
/// The target date travels as noon in `tz` and is read back as an instant
/// in the viewer's zone. Viewers more than 12 hours away from `tz` see the
/// neighbouring calendar day.
#[must_use]
pub fn embed_link_in<Tz: TimeZone>(base: &Url, config: &WidgetConfig, tz: &Tz) -> EmbedLink
where
    Tz::Offset: std::fmt::Display,
{
    let params = encode_query_in(config, tz);
    let query = match base.query() {
        Some(existing) if !existing.is_empty() => format!("{existing}&{params}"),
        _ => params,
    };

    let mut url = base.clone();
    url.set_query(Some(&query));

    EmbedLink {
        url: url.into(),
        image_omitted: config.has_local_image(),
    }
}

/// Decodes a link or query string using the local clock and time zone.
///
/// See [`decode_query_in`].
#[must_use]
pub fn decode_query(input: &str) -> WidgetConfig {
    decode_query_in(input, &Local::now())
}

/// Decodes a link or query string, never failing.
///
/// `input` may be a full URL or a bare query (with or without the leading
/// `?`). Dates are converted into the time zone of `now`; a missing or invalid
/// date falls back to `now`'s calendar day. Repeated parameters keep their
/// first value.
///
/// # Examples
///
/// ```
/// use chrono::{FixedOffset, TimeZone};
/// use dday_protocol::{WidgetStyle, ThemeColor};
/// use dday_protocol::link::decode_query_in;
///
/// let now = FixedOffset::east_opt(0).unwrap()
///     .with_ymd_and_hms(2024, 1, 15, 9, 0, 0)
///     .unwrap();
///
/// let config = decode_query_in("https://x.test/embed?style=pixel&theme=oops", &now);
/// assert_eq!(config.style, WidgetStyle::Pixel);
/// assert_eq!(config.theme, ThemeColor::default());
/// assert_eq!(config.target_date, now.date_naive());
/// assert!(config.image.is_none());
/// ```
#[must_use]
pub fn decode_query_in<Tz: TimeZone>(input: &str, now: &DateTime<Tz>) -> WidgetConfig {
    let params = EmbedParams::parse(extract_query(input));
    let today = now.date_naive();

    let target_date = params
        .date
        .as_deref()
        .and_then(|raw| {
            let parsed = decode_date(raw, &now.timezone());
            if parsed.is_none() {
                debug!(date = raw, "unparseable date parameter, using today");
            }
            parsed
        })
        .unwrap_or(today);

    let style = params
        .style
        .as_deref()
        .map_or_else(WidgetStyle::default, WidgetStyle::parse_lenient);

    let theme = params
        .theme
        .as_deref()
        .map_or_else(ThemeColor::default, ThemeColor::parse_lenient);

    let image = params.image.as_deref().and_then(|raw| {
        NetworkImage::parse(raw)
            .inspect_err(|e| debug!(error = %e, "ignoring image parameter"))
            .ok()
            .map(ImageSource::Network)
    });

    WidgetConfig {
        target_date,
        style,
        theme,
        image,
    }
}

/// Raw parameter values, first occurrence of each key.
#[derive(Debug, Default)]
struct EmbedParams {
    date: Option<String>,
    style: Option<String>,
    theme: Option<String>,
    image: Option<String>,
}

impl EmbedParams {
    fn parse(query: &str) -> Self {
        let mut params = Self::default();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            let slot = match key.as_ref() {
                PARAM_DATE => &mut params.date,
                PARAM_STYLE => &mut params.style,
                PARAM_THEME => &mut params.theme,
                PARAM_IMAGE => &mut params.image,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }
        params
    }
}

/// Isolates the query part of a link.
///
/// With a `?`, everything after it up to an optional `#fragment` is the query.
/// Without one, a URL has no query, and anything else is taken verbatim as a
/// bare query.
fn extract_query(input: &str) -> &str {
    let input = input.trim();
    match input.split_once('?') {
        Some((_, rest)) => rest.split('#').next().unwrap_or_default(),
        None if input.contains("://") => "",
        None => input,
    }
}

fn encode_date<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let noon = date
        .and_hms_opt(12, 0, 0)
        .unwrap_or_else(|| date.and_time(Default::default()));
    let instant = tz
        .from_local_datetime(&noon)
        .earliest()
        .unwrap_or_else(|| tz.from_utc_datetime(&noon));
    instant.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn decode_date<Tz: TimeZone>(raw: &str, tz: &Tz) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Some(instant.with_timezone(tz).date_naive());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(naive.date());
    }
    parse_manual_date(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{Palette, Rgb};
    use crate::image::LocalImage;
    use chrono::FixedOffset;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn seoul() -> FixedOffset {
        FixedOffset::east_opt(9 * 3600).unwrap()
    }

    fn now_in(tz: FixedOffset) -> DateTime<FixedOffset> {
        tz.with_ymd_and_hms(2024, 1, 15, 8, 30, 0).unwrap()
    }

    fn sample_config() -> WidgetConfig {
        WidgetConfig {
            target_date: day(2024, 1, 10),
            style: WidgetStyle::Dimensional,
            theme: ThemeColor::Preset(Palette::Blue),
            image: ImageSource::network("https://example.com/a.png").ok(),
        }
    }

    #[test]
    fn encode_snapshot() {
        insta::assert_snapshot!(
            encode_query_in(&sample_config(), &seoul()),
            @"date=2024-01-10T12%3A00%3A00%2B09%3A00&style=3d&theme=%23C4E4FF&image=https%3A%2F%2Fexample.com%2Fa.png"
        );
    }

    #[test]
    fn encode_omits_local_images() {
        let mut config = sample_config();
        config.image = Some(ImageSource::Local(LocalImage::Bundled));
        let query = encode_query_in(&config, &seoul());
        assert!(!query.contains("image="));

        config.image = Some(ImageSource::file("/tmp/cat.png"));
        let query = encode_query_in(&config, &seoul());
        assert!(!query.contains("image="));
        assert!(!query.contains("cat.png"));
    }

    #[test]
    fn encode_omits_absent_image() {
        let mut config = sample_config();
        config.image = None;
        let query = encode_query_in(&config, &seoul());
        assert!(!query.contains(PARAM_IMAGE));
        assert!(query.ends_with("theme=%23C4E4FF"));
    }

    #[test]
    fn decode_reverses_encode() {
        let config = sample_config();
        let query = encode_query_in(&config, &seoul());
        assert_eq!(decode_query_in(&query, &now_in(seoul())), config);
    }

    #[test]
    fn decode_keeps_calendar_day_for_nearby_zones() {
        let config = sample_config();
        let query = encode_query_in(&config, &seoul());
        let new_york = FixedOffset::west_opt(5 * 3600).unwrap();
        // 14 hours west of the author, noon falls on the previous evening.
        let decoded = decode_query_in(&query, &now_in(new_york));
        assert_eq!(decoded.target_date, day(2024, 1, 9));

        let berlin = FixedOffset::east_opt(3600).unwrap();
        let decoded = decode_query_in(&query, &now_in(berlin));
        assert_eq!(decoded.target_date, day(2024, 1, 10));
    }

    #[test]
    fn decode_accepts_full_links() {
        let link = format!(
            "https://dday.example/embed?{}#top",
            encode_query_in(&sample_config(), &seoul())
        );
        assert_eq!(decode_query_in(&link, &now_in(seoul())), sample_config());
    }

    #[test]
    fn decode_accepts_leading_question_mark() {
        let query = format!("?{}", encode_query_in(&sample_config(), &seoul()));
        assert_eq!(decode_query_in(&query, &now_in(seoul())), sample_config());
    }

    #[test]
    fn decode_empty_input_uses_fallbacks() {
        let now = now_in(seoul());
        for input in ["", "?", "https://dday.example/embed", "&&&", "=", "#"] {
            let config = decode_query_in(input, &now);
            assert_eq!(config.target_date, day(2024, 1, 15), "input {input:?}");
            assert_eq!(config.style, WidgetStyle::Dimensional);
            assert_eq!(config.theme, ThemeColor::Preset(Palette::Blue));
            assert!(config.image.is_none());
        }
    }

    #[test]
    fn decode_invalid_values_use_fallbacks() {
        let now = now_in(seoul());
        let config = decode_query_in(
            "date=yesterday&style=comic&theme=%23ZZZZZZ&image=blob%3Ahttps%3A%2F%2Fx%2F1",
            &now,
        );
        assert_eq!(config.target_date, day(2024, 1, 15));
        assert_eq!(config.style, WidgetStyle::Dimensional);
        assert_eq!(config.theme, ThemeColor::default());
        assert!(config.image.is_none());
    }

    #[test]
    fn decode_tolerates_malformed_percent_encoding() {
        let now = now_in(seoul());
        let config = decode_query_in("style=%ZZpixel&theme=%E2%28%A1&date=%", &now);
        assert_eq!(config.style, WidgetStyle::Dimensional);
        assert_eq!(config.theme, ThemeColor::default());
        assert_eq!(config.target_date, day(2024, 1, 15));
    }

    #[test]
    fn decode_out_of_range_date_falls_back() {
        let now = now_in(seoul());
        for date in [
            "%2B275760-09-13T00%3A00%3A00.000Z",
            "2024-02-30T12%3A00%3A00Z",
            "99999-01-01",
        ] {
            let config = decode_query_in(&format!("date={date}"), &now);
            assert_eq!(config.target_date, day(2024, 1, 15), "date {date:?}");
        }
    }

    #[test]
    fn decode_accepts_javascript_iso_strings() {
        // Date.prototype.toISOString output for local midnight in Seoul.
        let config = decode_query_in("date=2024-01-09T15%3A00%3A00.000Z", &now_in(seoul()));
        assert_eq!(config.target_date, day(2024, 1, 10));
    }

    #[test]
    fn decode_accepts_bare_dates() {
        let config = decode_query_in("date=2024-12-25", &now_in(seoul()));
        assert_eq!(config.target_date, day(2024, 12, 25));
    }

    #[test]
    fn decode_first_value_wins() {
        let config = decode_query_in("style=flat&style=pixel", &now_in(seoul()));
        assert_eq!(config.style, WidgetStyle::Flat);
    }

    #[test]
    fn decode_unescaped_bare_theme() {
        let config = decode_query_in("theme=#BAE6FD", &now_in(seoul()));
        assert_eq!(config.theme, ThemeColor::Custom(Rgb::new(0xBA, 0xE6, 0xFD)));
    }

    #[test]
    fn embed_link_joins_base() {
        let base = Url::parse("https://dday.example/embed").unwrap();
        let link = embed_link_in(&base, &sample_config(), &seoul());
        assert!(link.url.starts_with("https://dday.example/embed?date="));
        assert!(!link.image_omitted);

        let base = Url::parse("https://dday.example/embed?lang=ko").unwrap();
        let link = embed_link_in(&base, &sample_config(), &seoul());
        assert!(link.url.starts_with("https://dday.example/embed?lang=ko&date="));
        assert_eq!(decode_query_in(&link.url, &now_in(seoul())), sample_config());
    }

    #[test]
    fn embed_link_flags_omitted_local_image() {
        let base = Url::parse("https://dday.example/embed").unwrap();
        let config = WidgetConfig::new(day(2024, 1, 10));
        let link = embed_link_in(&base, &config, &seoul());
        assert!(link.image_omitted);
        assert!(!link.url.contains("image="));
    }
}
