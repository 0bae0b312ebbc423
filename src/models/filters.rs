//! Image filter settings shared by section backgrounds and image/logo elements.

use crate::models::finite_or;
use serde::{Deserialize, Serialize};

/// Filter adjustments applied to an image.
///
/// Percentages follow CSS filter semantics: brightness, contrast and saturate
/// are neutral at 100, grayscale, sepia and invert at 0. Blur is in pixels and
/// hue rotation in degrees, both neutral at 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterSet {
    /// Brightness percentage (100 = unchanged)
    pub brightness: f64,
    /// Contrast percentage (100 = unchanged)
    pub contrast: f64,
    /// Saturation percentage (100 = unchanged)
    pub saturate: f64,
    /// Grayscale percentage (0 = unchanged)
    pub grayscale: f64,
    /// Sepia percentage (0 = unchanged)
    pub sepia: f64,
    /// Blur radius in pixels
    pub blur: f64,
    /// Hue rotation in degrees
    pub hue_rotate: f64,
    /// Inversion percentage (0 = unchanged)
    pub invert: f64,
}

impl FilterSet {
    /// The neutral filter set: every term at its identity value.
    pub const IDENTITY: Self = Self {
        brightness: 100.0,
        contrast: 100.0,
        saturate: 100.0,
        grayscale: 0.0,
        sepia: 0.0,
        blur: 0.0,
        hue_rotate: 0.0,
        invert: 0.0,
    };

    /// Checks whether every term is at its identity value.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Returns a copy with the fields present in `patch` overridden.
    ///
    /// NaN and infinite values in the patch are ignored.
    #[must_use]
    pub fn merged(&self, patch: &FilterPatch) -> Self {
        Self {
            brightness: finite_or(patch.brightness, self.brightness),
            contrast: finite_or(patch.contrast, self.contrast),
            saturate: finite_or(patch.saturate, self.saturate),
            grayscale: finite_or(patch.grayscale, self.grayscale),
            sepia: finite_or(patch.sepia, self.sepia),
            blur: finite_or(patch.blur, self.blur),
            hue_rotate: finite_or(patch.hue_rotate, self.hue_rotate),
            invert: finite_or(patch.invert, self.invert),
        }
    }
}

impl Default for FilterSet {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Partial update for a [`FilterSet`]; absent fields keep their current value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(missing_docs)]
pub struct FilterPatch {
    pub brightness: Option<f64>,
    pub contrast: Option<f64>,
    pub saturate: Option<f64>,
    pub grayscale: Option<f64>,
    pub sepia: Option<f64>,
    pub blur: Option<f64>,
    pub hue_rotate: Option<f64>,
    pub invert: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_identity() {
        assert!(FilterSet::default().is_identity());
    }

    #[test]
    fn test_merged_only_touches_present_fields() {
        let base = FilterSet {
            sepia: 40.0,
            ..FilterSet::IDENTITY
        };
        let merged = base.merged(&FilterPatch {
            blur: Some(3.0),
            ..FilterPatch::default()
        });

        assert!((merged.blur - 3.0).abs() < f64::EPSILON);
        assert!((merged.sepia - 40.0).abs() < f64::EPSILON);
        assert!((merged.brightness - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_merged_ignores_non_finite_values() {
        let patch = FilterPatch {
            brightness: Some(f64::NAN),
            blur: Some(f64::INFINITY),
            hue_rotate: Some(f64::NEG_INFINITY),
            sepia: Some(25.0),
            ..FilterPatch::default()
        };
        let merged = FilterSet::IDENTITY.merged(&patch);

        assert!((merged.brightness - 100.0).abs() < f64::EPSILON);
        assert!(merged.blur.abs() < f64::EPSILON);
        assert!(merged.hue_rotate.abs() < f64::EPSILON);
        assert!((merged.sepia - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_partial_json_uses_identity_defaults() {
        let filters: FilterSet = serde_json::from_str(r#"{"grayscale": 100}"#).unwrap();
        assert!((filters.grayscale - 100.0).abs() < f64::EPSILON);
        assert!((filters.contrast - 100.0).abs() < f64::EPSILON);
    }
}
