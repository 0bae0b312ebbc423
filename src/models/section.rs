//! Section and section style data structures.

use crate::models::{finite_or, Color, FilterPatch, FilterSet, SectionElement, TextAlign};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How a section paints its background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackgroundVariant {
    /// Flat `bg_color`
    #[default]
    Solid,
    /// The stored gradient expression
    Gradient,
    /// `bg_image` under a white wash controlled by `bg_opacity`
    Image,
    /// Frosted translucent panel
    Glass,
    /// No fill at all
    Transparent,
}

/// Outline of a section box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectionShape {
    /// Square corners
    #[default]
    Sharp,
    /// Large uniform radius
    Rounded,
    /// Very large uniform radius
    Pill,
    /// Elliptical outline
    Oval,
    /// Rounded top edge, square bottom
    ArcTop,
    /// Square top edge, rounded bottom
    ArcBottom,
}

/// Drop shadow preset, shared by sections and elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[allow(missing_docs)]
pub enum Shadow {
    #[default]
    None,
    Sm,
    Md,
    Lg,
    Xl,
}

/// Optional typography overrides for a section's title or description.
///
/// Unset fields fall back to the site theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextOverride {
    /// Text color
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    /// Font size in pixels
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    /// Font weight (100-900)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<u16>,
    /// Horizontal alignment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align: Option<TextAlign>,
}

/// Declarative presentation settings for a section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SectionStyle {
    /// Background variant selecting which of the fields below apply
    pub bg_variant: BackgroundVariant,
    /// Fill for the `solid` variant
    pub bg_color: Color,
    /// CSS gradient expression for the `gradient` variant
    pub bg_gradient: String,
    /// Image reference for the `image` variant
    pub bg_image: String,
    /// Image visibility for the `image` variant (1 = unmodified, 0 = solid white)
    pub bg_opacity: f64,
    /// Fixed background attachment for the `image` variant
    pub parallax: bool,
    /// Filters applied to the background image
    pub filters: FilterSet,
    /// Border width in pixels (0 = no border)
    pub border_width: f64,
    /// Border color
    pub border_color: Color,
    /// Corner shape
    pub shape: SectionShape,
    /// Drop shadow
    pub shadow: Shadow,
}

/// Default gradient used when a section switches to the gradient variant.
pub const DEFAULT_GRADIENT: &str = "linear-gradient(135deg, #667EEA 0%, #764BA2 100%)";

impl Default for SectionStyle {
    fn default() -> Self {
        Self {
            bg_variant: BackgroundVariant::Solid,
            bg_color: Color::WHITE,
            bg_gradient: DEFAULT_GRADIENT.to_string(),
            bg_image: String::new(),
            bg_opacity: 1.0,
            parallax: false,
            filters: FilterSet::IDENTITY,
            border_width: 0.0,
            border_color: Color::rgb(0xE5, 0xE7, 0xEB),
            shape: SectionShape::Sharp,
            shadow: Shadow::None,
        }
    }
}

impl SectionStyle {
    /// Returns a new style with the fields present in `patch` overridden.
    ///
    /// Filters merge field by field, so a patch touching only `blur` keeps
    /// every other filter term. NaN and infinities are ignored.
    #[must_use]
    pub fn merged(&self, patch: &SectionStylePatch) -> Self {
        Self {
            bg_variant: patch.bg_variant.unwrap_or(self.bg_variant),
            bg_color: patch.bg_color.unwrap_or(self.bg_color),
            bg_gradient: patch
                .bg_gradient
                .clone()
                .unwrap_or_else(|| self.bg_gradient.clone()),
            bg_image: patch
                .bg_image
                .clone()
                .unwrap_or_else(|| self.bg_image.clone()),
            bg_opacity: finite_or(patch.bg_opacity, self.bg_opacity),
            parallax: patch.parallax.unwrap_or(self.parallax),
            filters: patch
                .filters
                .as_ref()
                .map_or(self.filters, |f| self.filters.merged(f)),
            border_width: finite_or(patch.border_width, self.border_width),
            border_color: patch.border_color.unwrap_or(self.border_color),
            shape: patch.shape.unwrap_or(self.shape),
            shadow: patch.shadow.unwrap_or(self.shadow),
        }
    }
}

/// Partial update for a [`SectionStyle`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(missing_docs)]
pub struct SectionStylePatch {
    pub bg_variant: Option<BackgroundVariant>,
    pub bg_color: Option<Color>,
    pub bg_gradient: Option<String>,
    pub bg_image: Option<String>,
    pub bg_opacity: Option<f64>,
    pub parallax: Option<bool>,
    pub filters: Option<FilterPatch>,
    pub border_width: Option<f64>,
    pub border_color: Option<Color>,
    pub shape: Option<SectionShape>,
    pub shadow: Option<Shadow>,
}

/// A named, orderable content block of the page.
///
/// # Invariants
///
/// - `id` is unique within the configuration and never changes after creation
/// - `enabled == false` hides the section but keeps its content and style
/// - an empty `nav_label` keeps the section out of the navigation menu
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    /// Stable identifier
    pub id: String,
    /// Navigation menu label (empty = not in navigation)
    #[serde(default)]
    pub nav_label: String,
    /// Heading text
    #[serde(default)]
    pub title: String,
    /// Body text under the heading
    #[serde(default)]
    pub description: String,
    /// Typography overrides for the title
    #[serde(default)]
    pub title_style: TextOverride,
    /// Typography overrides for the description
    #[serde(default)]
    pub description_style: TextOverride,
    /// Soft-delete flag
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Presentation settings
    #[serde(default)]
    pub style: SectionStyle,
    /// Free-form content, in stacking/render order
    #[serde(default)]
    pub elements: Vec<SectionElement>,
}

const fn default_enabled() -> bool {
    true
}

/// Generates a fresh section identifier.
pub fn generate_section_id() -> String {
    format!("section-{}", Uuid::new_v4().simple())
}

impl Section {
    /// Creates an enabled section with the default style and no elements.
    pub fn new(
        id: impl Into<String>,
        nav_label: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            nav_label: nav_label.into(),
            title: title.into(),
            description: description.into(),
            title_style: TextOverride::default(),
            description_style: TextOverride::default(),
            enabled: true,
            style: SectionStyle::default(),
            elements: Vec::new(),
        }
    }

    /// Sets the style for this section.
    #[must_use]
    pub fn with_style(mut self, style: SectionStyle) -> Self {
        self.style = style;
        self
    }

    /// Gets a reference to the element with the given id.
    #[must_use]
    pub fn element(&self, element_id: &str) -> Option<&SectionElement> {
        self.elements.iter().find(|e| e.id == element_id)
    }

    /// Checks whether the section should appear in the navigation menu.
    #[must_use]
    pub fn is_navigable(&self) -> bool {
        self.enabled && !self.nav_label.trim().is_empty()
    }
}

/// Partial update for a section's top-level fields.
///
/// Identifier, style and elements are deliberately absent: they change only
/// through their dedicated operations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(missing_docs)]
pub struct SectionPatch {
    pub nav_label: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub title_style: Option<TextOverride>,
    pub description_style: Option<TextOverride>,
    pub enabled: Option<bool>,
}

impl SectionPatch {
    /// Applies the patch onto `section` in place.
    pub fn apply_to(&self, section: &mut Section) {
        if let Some(nav_label) = &self.nav_label {
            section.nav_label.clone_from(nav_label);
        }
        if let Some(title) = &self.title {
            section.title.clone_from(title);
        }
        if let Some(description) = &self.description {
            section.description.clone_from(description);
        }
        if let Some(title_style) = self.title_style {
            section.title_style = title_style;
        }
        if let Some(description_style) = self.description_style {
            section.description_style = description_style;
        }
        if let Some(enabled) = self.enabled {
            section.enabled = enabled;
        }
    }
}

/// Fields for creating a section with [`crate::services::mutations::add_section`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(missing_docs)]
pub struct NewSection {
    pub nav_label: String,
    pub title: String,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_new_defaults() {
        let section = Section::new("space", "Space", "Our space", "Come visit");
        assert!(section.enabled);
        assert!(section.elements.is_empty());
        assert_eq!(section.style, SectionStyle::default());
        assert!(section.is_navigable());
    }

    #[test]
    fn test_empty_nav_label_is_not_navigable() {
        let section = Section::new("hero", "  ", "Welcome", "");
        assert!(!section.is_navigable());
    }

    #[test]
    fn test_style_merge_keeps_siblings() {
        let style = SectionStyle {
            bg_variant: BackgroundVariant::Image,
            bg_image: "data:image/png;base64,AAAA".to_string(),
            filters: FilterSet {
                sepia: 30.0,
                ..FilterSet::IDENTITY
            },
            ..SectionStyle::default()
        };

        let merged = style.merged(&SectionStylePatch {
            filters: Some(FilterPatch {
                contrast: Some(120.0),
                ..FilterPatch::default()
            }),
            ..SectionStylePatch::default()
        });

        assert_eq!(merged.bg_variant, BackgroundVariant::Image);
        assert_eq!(merged.bg_image, style.bg_image);
        assert!((merged.filters.sepia - 30.0).abs() < f64::EPSILON);
        assert!((merged.filters.contrast - 120.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_style_merge_ignores_nan() {
        let style = SectionStyle::default();
        let merged = style.merged(&SectionStylePatch {
            bg_opacity: Some(f64::NAN),
            border_width: Some(f64::INFINITY),
            ..SectionStylePatch::default()
        });
        assert_eq!(merged, style);
    }

    #[test]
    fn test_minimal_json_fills_defaults() {
        let section: Section = serde_json::from_str(r#"{"id": "events"}"#).unwrap();
        assert!(section.enabled);
        assert_eq!(section.nav_label, "");
        assert_eq!(section.style, SectionStyle::default());
    }

    #[test]
    fn test_variant_names() {
        let json = serde_json::to_string(&SectionShape::ArcBottom).unwrap();
        assert_eq!(json, "\"arc-bottom\"");
        let variant: BackgroundVariant = serde_json::from_str("\"glass\"").unwrap();
        assert_eq!(variant, BackgroundVariant::Glass);
    }

    #[test]
    fn test_generated_ids_are_unique() {
        assert_ne!(generate_section_id(), generate_section_id());
    }
}
