//! Theme colors: the fixed palette and custom hex colors.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ProtocolError;

/// An sRGB color with 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Creates a color from its channels.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses a hex color.
    ///
    /// Accepts `#RRGGBB`, `RRGGBB`, `#RGB` and `RGB`, case-insensitively.
    ///
    /// # Examples
    ///
    /// ```
    /// use dday_protocol::Rgb;
    ///
    /// assert_eq!(Rgb::parse_hex("#C4E4FF"), Some(Rgb::new(0xC4, 0xE4, 0xFF)));
    /// assert_eq!(Rgb::parse_hex("fa0"), Some(Rgb::new(0xFF, 0xAA, 0x00)));
    /// assert_eq!(Rgb::parse_hex("#12345"), None);
    /// ```
    #[must_use]
    pub fn parse_hex(input: &str) -> Option<Self> {
        let digits = input.trim();
        let digits = digits.strip_prefix('#').unwrap_or(digits);
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }

        let channel = |s: &str| u8::from_str_radix(s, 16).ok();
        match digits.len() {
            6 => Some(Self::new(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            3 => {
                let expand = |s: &str| channel(s).map(|v| v * 0x11);
                Some(Self::new(
                    expand(&digits[0..1])?,
                    expand(&digits[1..2])?,
                    expand(&digits[2..3])?,
                ))
            }
            _ => None,
        }
    }

    /// Returns the color as an upper-case `#RRGGBB` string.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Mixes this color towards `other` by `amount` (0.0 keeps `self`).
    #[must_use]
    pub fn mix(self, other: Self, amount: f32) -> Self {
        let t = amount.clamp(0.0, 1.0);
        let lerp = |a: u8, b: u8| (f32::from(a) + (f32::from(b) - f32::from(a)) * t).round() as u8;
        Self::new(
            lerp(self.r, other.r),
            lerp(self.g, other.g),
            lerp(self.b, other.b),
        )
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// The named palette offered by the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Palette {
    /// Light gray.
    Mono,
    /// Warm off-white.
    Cream,
    /// Pastel pink.
    Pink,
    /// Pastel blue.
    Blue,
    /// Pastel lavender.
    Purple,
    /// Pastel green.
    Mint,
}

impl Palette {
    /// All palette entries in display order.
    pub const ALL: [Self; 6] = [
        Self::Mono,
        Self::Cream,
        Self::Pink,
        Self::Blue,
        Self::Purple,
        Self::Mint,
    ];

    /// Returns the color of this palette entry.
    #[must_use]
    pub const fn rgb(self) -> Rgb {
        match self {
            Self::Mono => Rgb::new(0xEB, 0xEB, 0xEB),
            Self::Cream => Rgb::new(0xFF, 0xF5, 0xE1),
            Self::Pink => Rgb::new(0xFF, 0xDB, 0xE9),
            Self::Blue => Rgb::new(0xC4, 0xE4, 0xFF),
            Self::Purple => Rgb::new(0xE5, 0xDB, 0xFF),
            Self::Mint => Rgb::new(0xD1, 0xFA, 0xE5),
        }
    }

    /// Returns the lower-case name of this entry.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Mono => "mono",
            Self::Cream => "cream",
            Self::Pink => "pink",
            Self::Blue => "blue",
            Self::Purple => "purple",
            Self::Mint => "mint",
        }
    }

    /// Finds the palette entry with exactly this color.
    #[must_use]
    pub fn from_rgb(rgb: Rgb) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.rgb() == rgb)
    }

    /// Finds a palette entry by name (case-insensitive).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(name))
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|p| *p == self).unwrap_or(0)
    }
}

/// The widget's background color.
///
/// Custom colors that happen to match a palette entry are normalised to the
/// preset, so equality reflects what is rendered.
///
/// # Examples
///
/// ```
/// use dday_protocol::{Palette, Rgb, ThemeColor};
///
/// assert_eq!(ThemeColor::default(), ThemeColor::Preset(Palette::Blue));
/// assert_eq!(
///     ThemeColor::from_rgb(Rgb::new(0xFF, 0xDB, 0xE9)),
///     ThemeColor::Preset(Palette::Pink)
/// );
/// assert_eq!(ThemeColor::Preset(Palette::Mint).to_string(), "#D1FAE5");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ThemeColor {
    /// One of the named palette entries.
    Preset(Palette),
    /// Any other color.
    Custom(Rgb),
}

impl Default for ThemeColor {
    fn default() -> Self {
        Self::Preset(Palette::Blue)
    }
}

impl ThemeColor {
    /// Wraps a color, normalising palette matches to presets.
    #[must_use]
    pub fn from_rgb(rgb: Rgb) -> Self {
        Palette::from_rgb(rgb).map_or(Self::Custom(rgb), Self::Preset)
    }

    /// Returns the rendered color.
    #[must_use]
    pub fn rgb(self) -> Rgb {
        match self {
            Self::Preset(p) => p.rgb(),
            Self::Custom(rgb) => rgb,
        }
    }

    /// Returns the palette entry, if this is a preset.
    #[must_use]
    pub fn preset(self) -> Option<Palette> {
        match self {
            Self::Preset(p) => Some(p),
            Self::Custom(_) => None,
        }
    }

    /// Parses untrusted input, falling back to the default color.
    #[must_use]
    pub fn parse_lenient(input: &str) -> Self {
        input.parse().unwrap_or_default()
    }

    /// Returns the next palette entry.
    ///
    /// A custom color moves to the first palette entry.
    #[must_use]
    pub fn next_preset(self) -> Self {
        match self {
            Self::Preset(p) => Self::Preset(Palette::ALL[(p.index() + 1) % Palette::ALL.len()]),
            Self::Custom(_) => Self::Preset(Palette::ALL[0]),
        }
    }

    /// Returns the previous palette entry.
    ///
    /// A custom color moves to the last palette entry.
    #[must_use]
    pub fn prev_preset(self) -> Self {
        let len = Palette::ALL.len();
        match self {
            Self::Preset(p) => Self::Preset(Palette::ALL[(p.index() + len - 1) % len]),
            Self::Custom(_) => Self::Preset(Palette::ALL[len - 1]),
        }
    }
}

impl FromStr for ThemeColor {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(preset) = Palette::from_name(s) {
            return Ok(Self::Preset(preset));
        }
        Rgb::parse_hex(s)
            .map(Self::from_rgb)
            .ok_or_else(|| ProtocolError::InvalidColor(s.to_string()))
    }
}

impl TryFrom<String> for ThemeColor {
    type Error = ProtocolError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ThemeColor> for String {
    fn from(value: ThemeColor) -> Self {
        value.rgb().to_hex()
    }
}

impl fmt::Display for ThemeColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.rgb())
    }
}
