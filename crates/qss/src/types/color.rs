//! RGBA color type used for canonical color values.
//!
//! Colors are stored as four 8-bit channels, matching what the widget
//! toolkit consumes. The accepted textual forms are:
//!
//! - **Hex**: `#RGB`, `#RRGGBB`, `#AARRGGBB`, `#RRRGGGBBB`, `#RRRRGGGGBBBB`
//! - **Named**: the X11/CSS names from [`named`](super::named)
//! - **Special**: `transparent`
//!
//! ```
//! use qss::types::Color;
//!
//! let pink = Color::parse("#FF00AA").unwrap();
//! assert_eq!(pink.to_string(), "rgba(255,0,170,255)");
//! ```

use std::fmt;

use thiserror::Error;

use crate::types::named;

/// Errors that can occur when parsing a color.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ColorParseError {
    /// The input was empty.
    #[error("empty color string")]
    Empty,

    /// Unknown color name.
    #[error("unknown color name: {0}")]
    UnknownName(String),

    /// Invalid hex color format.
    #[error("invalid hex color: {0}")]
    InvalidHex(String),
}

/// An 8-bit RGBA color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// Alpha channel (0 = transparent, 255 = opaque).
    pub a: u8,
}

impl Default for Color {
    fn default() -> Self {
        Self::black()
    }
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn black() -> Self {
        Self::rgb(0, 0, 0)
    }

    /// Returns a fully transparent color.
    pub const fn transparent() -> Self {
        Self::rgba(0, 0, 0, 0)
    }

    /// Builds a color from a packed `0xRRGGBB` integer. Bits above the low
    /// 24 are ignored.
    pub const fn from_packed(value: u32) -> Self {
        Self::rgb((value >> 16) as u8, (value >> 8) as u8, value as u8)
    }

    /// Returns the channels as an `(r, g, b, a)` tuple.
    pub fn to_tuple(self) -> (u8, u8, u8, u8) {
        (self.r, self.g, self.b, self.a)
    }

    /// Returns true if the color is fully transparent.
    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }

    /// Formats the color as `#rrggbb`, or `#aarrggbb` when not opaque.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.a, self.r, self.g, self.b)
        }
    }

    /// Parse a color string.
    ///
    /// Hex digits and names are matched case-insensitively here; the value
    /// parser applies its own case-sensitive name check before ever calling
    /// this.
    pub fn parse(input: &str) -> Result<Self, ColorParseError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ColorParseError::Empty);
        }

        if let Some(hex) = input.strip_prefix('#') {
            return Self::parse_hex(hex);
        }

        let lower = input.to_lowercase();
        if lower == "transparent" {
            return Ok(Self::transparent());
        }

        named::lookup(&lower)
            .map(|(r, g, b)| Self::rgb(r, g, b))
            .ok_or_else(|| ColorParseError::UnknownName(input.to_string()))
    }

    fn parse_hex(hex: &str) -> Result<Self, ColorParseError> {
        let invalid = || ColorParseError::InvalidHex(format!("#{}", hex));

        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        match hex.len() {
            3 => {
                let r = Self::channel(&hex[0..1], 1).ok_or_else(invalid)?;
                let g = Self::channel(&hex[1..2], 1).ok_or_else(invalid)?;
                let b = Self::channel(&hex[2..3], 1).ok_or_else(invalid)?;
                Ok(Self::rgb(r, g, b))
            }
            6 => {
                let r = Self::channel(&hex[0..2], 2).ok_or_else(invalid)?;
                let g = Self::channel(&hex[2..4], 2).ok_or_else(invalid)?;
                let b = Self::channel(&hex[4..6], 2).ok_or_else(invalid)?;
                Ok(Self::rgb(r, g, b))
            }
            // Alpha comes first in the eight-digit form.
            8 => {
                let a = Self::channel(&hex[0..2], 2).ok_or_else(invalid)?;
                let r = Self::channel(&hex[2..4], 2).ok_or_else(invalid)?;
                let g = Self::channel(&hex[4..6], 2).ok_or_else(invalid)?;
                let b = Self::channel(&hex[6..8], 2).ok_or_else(invalid)?;
                Ok(Self::rgba(r, g, b, a))
            }
            9 => {
                let r = Self::channel(&hex[0..3], 3).ok_or_else(invalid)?;
                let g = Self::channel(&hex[3..6], 3).ok_or_else(invalid)?;
                let b = Self::channel(&hex[6..9], 3).ok_or_else(invalid)?;
                Ok(Self::rgb(r, g, b))
            }
            12 => {
                let r = Self::channel(&hex[0..4], 4).ok_or_else(invalid)?;
                let g = Self::channel(&hex[4..8], 4).ok_or_else(invalid)?;
                let b = Self::channel(&hex[8..12], 4).ok_or_else(invalid)?;
                Ok(Self::rgb(r, g, b))
            }
            _ => Err(invalid()),
        }
    }

    /// Scales a hex channel of `digits` width down to 8 bits.
    fn channel(digits_str: &str, digits: u32) -> Option<u8> {
        let value = u32::from_str_radix(digits_str, 16).ok()?;
        let scaled = match digits {
            1 => value * 17,
            2 => value,
            3 => value >> 4,
            _ => value >> 8,
        };
        u8::try_from(scaled).ok()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({},{},{},{})", self.r, self.g, self.b, self.a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== HEX FORMAT TESTS ====================

    #[test]
    fn test_hex_3_digit() {
        assert_eq!(Color::parse("#f00").unwrap(), Color::rgb(255, 0, 0));
        assert_eq!(Color::parse("#abc").unwrap(), Color::rgb(0xaa, 0xbb, 0xcc));
    }

    #[test]
    fn test_hex_6_digit() {
        assert_eq!(Color::parse("#FF00AA").unwrap(), Color::rgb(255, 0, 170));
        assert_eq!(Color::parse("#9932CC").unwrap(), Color::rgb(0x99, 0x32, 0xCC));
    }

    #[test]
    fn test_hex_8_digit_is_alpha_first() {
        assert_eq!(
            Color::parse("#80112233").unwrap(),
            Color::rgba(0x11, 0x22, 0x33, 0x80)
        );
    }

    #[test]
    fn test_hex_wide_channels() {
        assert_eq!(Color::parse("#fff000fff").unwrap(), Color::rgb(255, 0, 255));
        assert_eq!(
            Color::parse("#ffff00000000").unwrap(),
            Color::rgb(255, 0, 0)
        );
    }

    #[test]
    fn test_hex_invalid() {
        assert!(matches!(
            Color::parse("#12"),
            Err(ColorParseError::InvalidHex(_))
        ));
        assert!(matches!(
            Color::parse("#gg0000"),
            Err(ColorParseError::InvalidHex(_))
        ));
    }

    // ==================== NAMED / SPECIAL ====================

    #[test]
    fn test_named() {
        assert_eq!(Color::parse("coral").unwrap(), Color::rgb(255, 127, 80));
        assert_eq!(Color::parse("Coral").unwrap(), Color::rgb(255, 127, 80));
        assert!(matches!(
            Color::parse("notacolor"),
            Err(ColorParseError::UnknownName(_))
        ));
    }

    #[test]
    fn test_transparent() {
        let color = Color::parse("transparent").unwrap();
        assert!(color.is_transparent());
        assert_eq!(color.to_tuple(), (0, 0, 0, 0));
    }

    #[test]
    fn test_display_and_hex() {
        let color = Color::rgba(1, 2, 3, 4);
        assert_eq!(color.to_string(), "rgba(1,2,3,4)");
        assert_eq!(color.to_hex(), "#04010203");
        assert_eq!(Color::rgb(255, 0, 170).to_hex(), "#ff00aa");
    }

    #[test]
    fn test_from_packed() {
        assert_eq!(Color::from_packed(0x112233), Color::rgb(0x11, 0x22, 0x33));
    }
}
