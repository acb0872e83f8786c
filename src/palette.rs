//! Colors and the built-in particle palettes.
//!
//! Every particle draws its color independently from the active palette, so
//! switching palettes re-rolls the whole field:
//!
//! ```ignore
//! engine.set_palette(Palette::Neon);
//! ```

use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ConfigError;

/// An opaque sRGB color.
///
/// Serialized as a `#rrggbb` hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::hex(0x000000);
    pub const WHITE: Color = Color::hex(0xffffff);
    /// Warm yellowish white used by the ambient network.
    pub const CORNSILK: Color = Color::hex(0xfff8dc);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build a color from a packed `0xRRGGBB` value.
    pub const fn hex(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xff) as u8,
            g: ((rgb >> 8) & 0xff) as u8,
            b: (rgb & 0xff) as u8,
        }
    }

    /// Parse a `#rrggbb` (or `rrggbb`) string.
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ConfigError::InvalidColor(s.to_string()));
        }
        u32::from_str_radix(digits, 16)
            .map(Color::hex)
            .map_err(|_| ConfigError::InvalidColor(s.to_string()))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for Color {
    type Error = ConfigError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Color::parse(&s)
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_string()
    }
}

/// Pre-defined particle palettes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Palette {
    /// Reds through yellow.
    Fire,
    /// Magenta, violet and cyan.
    Neon,
    /// Greens and mint.
    Nature,
    /// Full hue sweep (default).
    #[default]
    Rainbow,
}

const FIRE: [Color; 5] = [
    Color::hex(0xff4500),
    Color::hex(0xff6b00),
    Color::hex(0xff8c00),
    Color::hex(0xffaa00),
    Color::hex(0xffcc00),
];

const NEON: [Color; 5] = [
    Color::hex(0xff00ff),
    Color::hex(0xff0080),
    Color::hex(0x8000ff),
    Color::hex(0x0080ff),
    Color::hex(0x00ffff),
];

const NATURE: [Color; 5] = [
    Color::hex(0x00ff00),
    Color::hex(0x40ff40),
    Color::hex(0x66ffcc),
    Color::hex(0x80ff80),
    Color::hex(0x99ffaa),
];

const RAINBOW: [Color; 8] = [
    Color::hex(0xff0000),
    Color::hex(0xff8000),
    Color::hex(0xffff00),
    Color::hex(0x80ff00),
    Color::hex(0x00ff80),
    Color::hex(0x00ffff),
    Color::hex(0x0080ff),
    Color::hex(0x8000ff),
];

impl Palette {
    /// All palettes in selection order.
    pub const ALL: [Palette; 4] = [Palette::Fire, Palette::Neon, Palette::Nature, Palette::Rainbow];

    /// The palette's color stops. Never empty.
    pub fn colors(&self) -> &'static [Color] {
        match self {
            Palette::Fire => &FIRE,
            Palette::Neon => &NEON,
            Palette::Nature => &NATURE,
            Palette::Rainbow => &RAINBOW,
        }
    }

    /// Draw one color uniformly at random.
    pub fn pick(&self, rng: &mut dyn RngCore) -> Color {
        let colors = self.colors();
        colors[rng.gen_range(0..colors.len())]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Palette::Fire => "fire",
            Palette::Neon => "neon",
            Palette::Nature => "nature",
            Palette::Rainbow => "rainbow",
        }
    }
}
