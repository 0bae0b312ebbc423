//! Color handling with hex parsing and CSS serialization.

// Allow small types passed by reference for API consistency
#![allow(clippy::trivially_copy_pass_by_ref)]
// Allow intentional type casts for alpha math
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// RGBA color value with hex string representation.
///
/// Stored on disk and in sync codes as `#RRGGBB` (opaque) or `#RRGGBBAA`.
/// Parsing additionally accepts `#RGB` shorthand and the `transparent` keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
    /// Alpha channel (0 = fully transparent, 255 = opaque)
    pub a: u8,
}

impl Color {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// Creates an opaque color from individual channel values.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Creates a color with an explicit alpha channel.
    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parses a `Color` from a hex string.
    ///
    /// Supports formats: "#RGB", "#RRGGBB", "#RRGGBBAA" (the leading `#` is optional)
    /// and the keyword "transparent".
    ///
    /// # Examples
    ///
    /// ```
    /// use pagewright::models::Color;
    ///
    /// let color = Color::from_hex("#FF0000").unwrap();
    /// assert_eq!(color, Color::rgb(255, 0, 0));
    ///
    /// let color = Color::from_hex("0f0").unwrap();
    /// assert_eq!(color, Color::rgb(0, 255, 0));
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid hex color format.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let hex = hex.trim();
        if hex.eq_ignore_ascii_case("transparent") {
            return Ok(Self::TRANSPARENT);
        }
        let hex = hex.strip_prefix('#').unwrap_or(hex);

        // from_str_radix alone would accept a leading '+'
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            anyhow::bail!("Invalid hex color '{hex}': expected hex digits only");
        }

        let expanded;
        let hex = if hex.len() == 3 {
            expanded = hex.chars().flat_map(|c| [c, c]).collect::<String>();
            expanded.as_str()
        } else {
            hex
        };

        if hex.len() != 6 && hex.len() != 8 {
            anyhow::bail!(
                "Invalid hex color format '{hex}'. Expected #RGB, #RRGGBB or #RRGGBBAA"
            );
        }

        let channel = |range: std::ops::Range<usize>, name: &str| {
            u8::from_str_radix(&hex[range], 16)
                .context(format!("Invalid {name} channel in hex color '{hex}'"))
        };

        let r = channel(0..2, "red")?;
        let g = channel(2..4, "green")?;
        let b = channel(4..6, "blue")?;
        let a = if hex.len() == 8 {
            channel(6..8, "alpha")?
        } else {
            255
        };

        Ok(Self::rgba(r, g, b, a))
    }

    /// Converts the color to a hex string (uppercase).
    ///
    /// Opaque colors render as "#RRGGBB", everything else as "#RRGGBBAA".
    ///
    /// # Examples
    ///
    /// ```
    /// use pagewright::models::Color;
    ///
    /// assert_eq!(Color::rgb(0, 128, 255).to_hex(), "#0080FF");
    /// assert_eq!(Color::rgba(0, 0, 0, 0).to_hex(), "#00000000");
    /// ```
    #[must_use]
    pub fn to_hex(&self) -> String {
        if self.is_opaque() {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }

    /// Renders the color as a CSS value.
    ///
    /// Opaque colors use hex notation; translucent colors use `rgba()` with
    /// the alpha expressed as a fraction rounded to two decimals.
    #[must_use]
    pub fn to_css(&self) -> String {
        if self.is_opaque() {
            self.to_hex()
        } else {
            format!(
                "rgba({}, {}, {}, {})",
                self.r,
                self.g,
                self.b,
                format_alpha(self.a)
            )
        }
    }

    /// Returns the same color with its alpha replaced by `opacity` (0.0-1.0, clamped).
    #[must_use]
    pub fn with_opacity(&self, opacity: f64) -> Self {
        let a = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self { a, ..*self }
    }

    /// Checks whether the alpha channel is fully opaque.
    #[must_use]
    pub const fn is_opaque(&self) -> bool {
        self.a == 255
    }

    /// Checks whether the color is fully transparent.
    #[must_use]
    pub const fn is_transparent(&self) -> bool {
        self.a == 0
    }
}

/// Formats an 8-bit alpha as a CSS fraction ("0", "0.5", "1").
fn format_alpha(a: u8) -> String {
    let fraction = (f64::from(a) / 255.0 * 100.0).round() / 100.0;
    let text = format!("{fraction:.2}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text.is_empty() {
        "0".to_string()
    } else {
        text.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl Default for Color {
    /// Default color is white (#FFFFFF).
    fn default() -> Self {
        Self::WHITE
    }
}

impl FromStr for Color {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for Color {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self> {
        Self::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}
