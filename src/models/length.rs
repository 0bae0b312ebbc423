//! CSS-style lengths used for element sizes.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A box dimension: automatic, absolute pixels, or a percentage of the parent.
///
/// Serialized as its CSS text (`"auto"`, `"240px"`, `"100%"`). A bare number is
/// read as pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Length {
    /// Size determined by content
    #[default]
    Auto,
    /// Absolute size in CSS pixels
    Px(f64),
    /// Size relative to the containing box
    Percent(f64),
}

impl Length {
    /// Full width of the containing box.
    pub const FULL: Self = Self::Percent(100.0);

    /// Whether the size holds a storable number (`auto` always does).
    #[must_use]
    pub fn is_finite(&self) -> bool {
        match self {
            Self::Auto => true,
            Self::Px(value) | Self::Percent(value) => value.is_finite(),
        }
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Px(value) => write!(f, "{value}px"),
            Self::Percent(value) => write!(f, "{value}%"),
        }
    }
}

impl FromStr for Length {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("auto") || s.is_empty() {
            return Ok(Self::Auto);
        }

        let (number, percent) = if let Some(n) = s.strip_suffix('%') {
            (n, true)
        } else if let Some(n) = s.strip_suffix("px") {
            (n, false)
        } else {
            (s, false)
        };

        let value: f64 = number
            .trim()
            .parse()
            .context(format!("Invalid length '{s}'. Expected auto, <n>px or <n>%"))?;
        if !value.is_finite() || value < 0.0 {
            anyhow::bail!("Invalid length '{s}': must be a non-negative finite number");
        }

        Ok(if percent {
            Self::Percent(value)
        } else {
            Self::Px(value)
        })
    }
}

impl TryFrom<String> for Length {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Length> for String {
    fn from(length: Length) -> Self {
        length.to_string()
    }
}
