//! Light and dark palettes.

use std::fmt;
use std::str::FromStr;

/// A 24-bit color token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Build from a `0xRRGGBB` literal
    pub const fn hex(value: u32) -> Self {
        Self {
            r: ((value >> 16) & 0xff) as u8,
            g: ((value >> 8) & 0xff) as u8,
            b: (value & 0xff) as u8,
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Named color tokens for one theme
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    pub background: Rgb,
    pub text: Rgb,
    pub text_secondary: Rgb,
    pub text_muted: Rgb,
    pub card_background: Rgb,
    pub input_background: Rgb,
    pub button_background: Rgb,
    pub button_text: Rgb,
    pub border: Rgb,
    pub error_background: Rgb,
    pub error_text: Rgb,
    pub detail_card_background: Rgb,
    pub detail_card_text: Rgb,
}

const LIGHT: Palette = Palette {
    background: Rgb::hex(0xe3e6f3),
    text: Rgb::hex(0x333333),
    text_secondary: Rgb::hex(0x666666),
    text_muted: Rgb::hex(0x888888),
    card_background: Rgb::hex(0xffffff),
    input_background: Rgb::hex(0xffffff),
    button_background: Rgb::hex(0x667eea),
    button_text: Rgb::hex(0xffffff),
    border: Rgb::hex(0xe1e5e9),
    error_background: Rgb::hex(0xff6b6b),
    error_text: Rgb::hex(0xffffff),
    detail_card_background: Rgb::hex(0xf3f3f3),
    detail_card_text: Rgb::hex(0x333333),
};

const DARK: Palette = Palette {
    background: Rgb::hex(0x232526),
    text: Rgb::hex(0xf3f3f3),
    text_secondary: Rgb::hex(0xb0b0b0),
    text_muted: Rgb::hex(0x888888),
    card_background: Rgb::hex(0x2c2c34),
    input_background: Rgb::hex(0x232526),
    button_background: Rgb::hex(0x764ba2),
    button_text: Rgb::hex(0xffffff),
    border: Rgb::hex(0x404040),
    error_background: Rgb::hex(0xff6b6b),
    error_text: Rgb::hex(0xffffff),
    detail_card_background: Rgb::hex(0xf3f3f3),
    detail_card_text: Rgb::hex(0x333333),
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn palette(self) -> &'static Palette {
        match self {
            Theme::Light => &LIGHT,
            Theme::Dark => &DARK,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Persisted form
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTheme(pub String);

impl fmt::Display for UnknownTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown theme: {:?}", self.0)
    }
}

impl std::error::Error for UnknownTheme {}

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(UnknownTheme(other.to_string())),
        }
    }
}
