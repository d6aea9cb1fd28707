//! RGBA colors as they appear in presets and on the command line.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::params::ParamError;

/// An 8-bit straight-alpha RGBA color.
///
/// Serialized as a hex string (`#rrggbb`, or `#rrggbbaa` when not opaque).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const RED: Color = Color::rgb(255, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#rgb`, `#rrggbb`, `#rrggbbaa` or a basic CSS color name.
    pub fn parse(input: &str) -> Result<Self, ParamError> {
        let trimmed = input.trim();
        if let Some(named) = named_color(&trimmed.to_ascii_lowercase()) {
            return Ok(named);
        }

        let invalid = || ParamError::InvalidColor {
            value: input.to_string(),
        };

        let hex = trimmed.strip_prefix('#').ok_or_else(invalid)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        let nibble = |i: usize| {
            u8::from_str_radix(&hex[i..i + 1], 16)
                .map(|v| v * 17)
                .map_err(|_| invalid())
        };

        match hex.len() {
            3 => Ok(Self::rgb(nibble(0)?, nibble(1)?, nibble(2)?)),
            6 => Ok(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Ok(Self::rgba(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => Err(invalid()),
        }
    }

    pub fn is_opaque(&self) -> bool {
        self.a == u8::MAX
    }

    /// Same color with its alpha scaled by `opacity` in `[0, 1]`.
    pub fn with_opacity(self, opacity: f32) -> Self {
        let a = (self.a as f32 * opacity.clamp(0.0, 1.0)).round() as u8;
        Self { a, ..self }
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

fn named_color(name: &str) -> Option<Color> {
    let color = match name {
        "white" => Color::WHITE,
        "black" => Color::BLACK,
        "red" => Color::RED,
        "green" => Color::rgb(0, 128, 0),
        "blue" => Color::rgb(0, 0, 255),
        "yellow" => Color::rgb(255, 255, 0),
        "orange" => Color::rgb(255, 165, 0),
        "purple" => Color::rgb(128, 0, 128),
        "gray" | "grey" => Color::rgb(128, 128, 128),
        "transparent" => Color::rgba(0, 0, 0, 0),
        _ => return None,
    };
    Some(color)
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if !self.is_opaque() {
            write!(f, "{:02x}", self.a)?;
        }
        Ok(())
    }
}

impl FromStr for Color {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Color {
    type Error = ParamError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_forms() {
        assert_eq!(Color::parse("#ff8800").unwrap(), Color::rgb(255, 136, 0));
        assert_eq!(Color::parse("#F80").unwrap(), Color::rgb(255, 136, 0));
        assert_eq!(
            Color::parse("#00000080").unwrap(),
            Color::rgba(0, 0, 0, 128)
        );
    }

    #[test]
    fn test_parse_named_is_case_insensitive() {
        assert_eq!(Color::parse("Red").unwrap(), Color::RED);
        assert_eq!(Color::parse(" white ").unwrap(), Color::WHITE);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for bad in ["", "#", "ff0000", "#12345", "#gggggg", "#ffé000", "chartreuse"] {
            assert!(Color::parse(bad).is_err(), "{bad:?} should not parse");
        }
    }

    #[test]
    fn test_parse_rejects_signed_digits() {
        for bad in ["#+f+f+f", "#+fff+f+f", "#-1-1-1", "#+1+1+1+1"] {
            assert!(
                matches!(Color::parse(bad), Err(ParamError::InvalidColor { .. })),
                "{bad:?} should not parse"
            );
        }
    }

    #[test]
    fn test_display_omits_opaque_alpha() {
        assert_eq!(Color::rgb(0, 123, 255).to_string(), "#007bff");
        assert_eq!(Color::rgba(0, 0, 0, 77).to_string(), "#0000004d");
    }

    #[test]
    fn test_serde_uses_hex_strings() {
        let json = serde_json::to_string(&Color::rgb(26, 26, 26)).unwrap();
        assert_eq!(json, "\"#1a1a1a\"");
        let parsed: Color = serde_json::from_str("\"#1a1a1a\"").unwrap();
        assert_eq!(parsed, Color::rgb(26, 26, 26));
        assert!(serde_json::from_str::<Color>("\"nope\"").is_err());
    }

    #[test]
    fn test_with_opacity() {
        assert_eq!(Color::BLACK.with_opacity(0.3).a, 77);
        assert_eq!(Color::BLACK.with_opacity(2.0).a, 255);
    }
}
