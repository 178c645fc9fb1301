//! Hex color strings and preview swatches.

use super::validation::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A color written as `#RRGGBB`.
///
/// Parsing is case-insensitive and keeps the text exactly as entered, so a
/// stored note round-trips byte for byte. Values read back from disk are not
/// re-validated; [`HexColor::rgb`] returns `None` for such entries.
///
/// # Examples
///
/// ```
/// use chromanote::notes::HexColor;
/// let teal: HexColor = "#1a2B3c".parse().unwrap();
/// assert_eq!(teal.rgb(), Some((0x1a, 0x2b, 0x3c)));
/// assert!("#FFF".parse::<HexColor>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HexColor(String);

impl HexColor {
    /// Validates `candidate` against the `#RRGGBB` pattern.
    pub fn parse(candidate: &str) -> Result<Self, ValidationError> {
        if Self::is_valid(candidate) {
            Ok(Self(candidate.to_string()))
        } else {
            Err(ValidationError::InvalidHexFormat(candidate.to_string()))
        }
    }

    /// Returns true if `candidate` is `#` followed by exactly six hex digits.
    pub fn is_valid(candidate: &str) -> bool {
        match candidate.strip_prefix('#') {
            Some(digits) => digits.len() == 6 && digits.bytes().all(|b| b.is_ascii_hexdigit()),
            None => false,
        }
    }

    /// Builds a lowercase `#rrggbb` color from 8-bit components.
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(format!("#{:02x}{:02x}{:02x}", r, g, b))
    }

    /// Parses a `R,G,B` triple of 0-255 integers.
    pub fn from_rgb_triplet(text: &str) -> Result<Self, ValidationError> {
        let invalid = || ValidationError::InvalidHexFormat(text.to_string());
        let parts: Vec<&str> = text.split(',').map(str::trim).collect();
        if parts.len() != 3 {
            return Err(invalid());
        }
        let mut rgb = [0u8; 3];
        for (slot, part) in rgb.iter_mut().zip(&parts) {
            *slot = part.parse::<u8>().map_err(|_| invalid())?;
        }
        Ok(Self::from_rgb(rgb[0], rgb[1], rgb[2]))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decodes the 8-bit components, or `None` if the stored text is malformed.
    pub fn rgb(&self) -> Option<(u8, u8, u8)> {
        if !Self::is_valid(&self.0) {
            return None;
        }
        let component = |range: std::ops::Range<usize>| u8::from_str_radix(&self.0[range], 16).ok();
        Some((component(1..3)?, component(3..5)?, component(5..7)?))
    }
}

impl FromStr for HexColor {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What the preview area shows for the current color input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Swatch {
    /// The input is a valid color.
    Color(HexColor),
    /// The input is empty or malformed; the preview falls back to white.
    Blank,
}

impl Swatch {
    pub fn for_input(input: &str) -> Self {
        match HexColor::parse(input) {
            Ok(color) => Swatch::Color(color),
            Err(_) => Swatch::Blank,
        }
    }

    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            Swatch::Color(color) => color.rgb().unwrap_or((255, 255, 255)),
            Swatch::Blank => (255, 255, 255),
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Swatch::Color(_))
    }
}
