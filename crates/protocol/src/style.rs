//! Widget style variants.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ProtocolError;

/// The visual treatment applied to a widget.
///
/// The wire names (`flat`, `3d`, `pixel`) are used both in embed links and in
/// configuration files.
///
/// # Examples
///
/// ```
/// use dday_protocol::WidgetStyle;
///
/// assert_eq!(WidgetStyle::default(), WidgetStyle::Dimensional);
/// assert_eq!(WidgetStyle::Dimensional.as_str(), "3d");
/// assert_eq!("pixel".parse::<WidgetStyle>().unwrap(), WidgetStyle::Pixel);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WidgetStyle {
    /// Solid fill, no bevel.
    #[serde(rename = "flat")]
    Flat,
    /// Glossy, bevelled look with soft shadows.
    #[default]
    #[serde(rename = "3d", alias = "dimensional")]
    Dimensional,
    /// Retro game screen look with hard shadows and pixelated image.
    #[serde(rename = "pixel")]
    Pixel,
}

impl WidgetStyle {
    /// All variants, in the order the editor cycles through them.
    pub const ALL: [Self; 3] = [Self::Flat, Self::Dimensional, Self::Pixel];

    /// Returns the wire name of this style.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Flat => "flat",
            Self::Dimensional => "3d",
            Self::Pixel => "pixel",
        }
    }

    /// Returns the label shown in the editor.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Flat => "Flat",
            Self::Dimensional => "3D",
            Self::Pixel => "Pixel",
        }
    }

    /// Parses untrusted input, falling back to the default style.
    ///
    /// Matching is case-insensitive and ignores surrounding whitespace.
    ///
    /// # Examples
    ///
    /// ```
    /// use dday_protocol::WidgetStyle;
    ///
    /// assert_eq!(WidgetStyle::parse_lenient(" Pixel "), WidgetStyle::Pixel);
    /// assert_eq!(WidgetStyle::parse_lenient("comic-sans"), WidgetStyle::Dimensional);
    /// ```
    #[must_use]
    pub fn parse_lenient(input: &str) -> Self {
        input.parse().unwrap_or_default()
    }

    /// Returns the next style (wrapping around).
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Flat => Self::Dimensional,
            Self::Dimensional => Self::Pixel,
            Self::Pixel => Self::Flat,
        }
    }

    /// Returns the previous style (wrapping around).
    #[must_use]
    pub fn prev(self) -> Self {
        match self {
            Self::Flat => Self::Pixel,
            Self::Dimensional => Self::Flat,
            Self::Pixel => Self::Dimensional,
        }
    }
}

impl FromStr for WidgetStyle {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "flat" => Ok(Self::Flat),
            "3d" | "dimensional" => Ok(Self::Dimensional),
            "pixel" => Ok(Self::Pixel),
            _ => Err(ProtocolError::InvalidStyle(s.to_string())),
        }
    }
}

impl fmt::Display for WidgetStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_roundtrip() {
        for style in WidgetStyle::ALL {
            assert_eq!(style.as_str().parse::<WidgetStyle>(), Ok(style));
        }
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("FLAT".parse::<WidgetStyle>(), Ok(WidgetStyle::Flat));
        assert_eq!("3D".parse::<WidgetStyle>(), Ok(WidgetStyle::Dimensional));
        assert_eq!(
            "Dimensional".parse::<WidgetStyle>(),
            Ok(WidgetStyle::Dimensional)
        );
    }

    #[test]
    fn unknown_style_is_an_error() {
        assert_eq!(
            "neon".parse::<WidgetStyle>(),
            Err(ProtocolError::InvalidStyle("neon".to_string()))
        );
        assert!("".parse::<WidgetStyle>().is_err());
    }

    #[test]
    fn lenient_parse_falls_back_to_default() {
        assert_eq!(WidgetStyle::parse_lenient(""), WidgetStyle::Dimensional);
        assert_eq!(WidgetStyle::parse_lenient("💥"), WidgetStyle::Dimensional);
    }

    #[test]
    fn cycling_visits_every_style() {
        let mut style = WidgetStyle::Flat;
        let mut seen = Vec::new();
        for _ in 0..3 {
            seen.push(style);
            style = style.next();
        }
        assert_eq!(style, WidgetStyle::Flat);
        assert_eq!(seen, WidgetStyle::ALL.to_vec());

        for style in WidgetStyle::ALL {
            assert_eq!(style.next().prev(), style);
        }
    }

    #[test]
    fn serde_uses_wire_names() {
        let json = serde_json::to_string(&WidgetStyle::Dimensional).unwrap();
        assert_eq!(json, "\"3d\"");
        let parsed: WidgetStyle = serde_json::from_str("\"dimensional\"").unwrap();
        assert_eq!(parsed, WidgetStyle::Dimensional);
    }
}
