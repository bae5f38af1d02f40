//! RGBA colors with hex string parsing and formatting.

use std::fmt;
use std::str::FromStr;

use image::Rgba;
use palette::{Srgb, Srgba};
use serde::{Deserialize, Serialize};

use crate::error::FaviconError;

/// A straight (non-premultiplied) 8-bit RGBA color.
///
/// Serializes as a hex string: `#rrggbb` when opaque, `#rrggbbaa` otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Emerald accent (`#10b981`) used for the icon background.
    pub const EMERALD: Self = Self::new(16, 185, 129, 255);

    /// White at alpha 235, used for the cards.
    pub const CARD: Self = Self::new(255, 255, 255, 235);

    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Parses `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa`; the `#` is optional.
    pub fn from_hex(hex: &str) -> Result<Self, FaviconError> {
        let digits = hex.trim().trim_start_matches('#');
        let invalid = || FaviconError::InvalidColor(hex.to_string());
        match digits.len() {
            3 | 6 => {
                let rgb = Srgb::<u8>::from_str(digits).map_err(|_| invalid())?;
                Ok(Self::opaque(rgb.red, rgb.green, rgb.blue))
            }
            4 | 8 => {
                let rgba = Srgba::<u8>::from_str(digits).map_err(|_| invalid())?;
                Ok(Self::new(rgba.red, rgba.green, rgba.blue, rgba.alpha))
            }
            _ => Err(invalid()),
        }
    }

    pub fn is_opaque(&self) -> bool {
        self.a == 255
    }

    /// `#rrggbb` without the alpha channel.
    pub fn rgb_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Alpha as a 0.0-1.0 opacity, for SVG `fill-opacity`.
    pub fn opacity(&self) -> f32 {
        self.a as f32 / 255.0
    }

    pub fn to_rgba(self) -> Rgba<u8> {
        Rgba([self.r, self.g, self.b, self.a])
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rgb_hex())?;
        if !self.is_opaque() {
            write!(f, "{:02x}", self.a)?;
        }
        Ok(())
    }
}

impl FromStr for Color {
    type Err = FaviconError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for Color {
    type Error = FaviconError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

impl From<Color> for Rgba<u8> {
    fn from(color: Color) -> Self {
        color.to_rgba()
    }
}

impl From<Rgba<u8>> for Color {
    fn from(px: Rgba<u8>) -> Self {
        let [r, g, b, a] = px.0;
        Self::new(r, g, b, a)
    }
}

#[cfg(feature = "jsonschema")]
impl schemars::JsonSchema for Color {
    fn schema_name() -> String {
        "Color".to_string()
    }

    fn json_schema(generator: &mut schemars::r#gen::SchemaGenerator) -> schemars::schema::Schema {
        String::json_schema(generator)
    }
}
