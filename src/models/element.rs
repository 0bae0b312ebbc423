//! Free-form elements placed inside a section.

use crate::models::{finite_or, Color, FilterPatch, FilterSet, Length, Shadow};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What an element renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    /// Literal text
    Text,
    /// An image reference
    Image,
    /// One of the two site logo references
    Logo,
}

impl ElementKind {
    /// Checks whether the element draws an image (image or logo).
    #[must_use]
    pub const fn is_visual(self) -> bool {
        matches!(self, Self::Image | Self::Logo)
    }

    /// Lowercase name as used on the command line and in JSON.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
            Self::Logo => "logo",
        }
    }
}

impl std::str::FromStr for ElementKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "image" => Ok(Self::Image),
            "logo" => Ok(Self::Logo),
            other => anyhow::bail!("Unknown element type '{other}'. Expected text, image or logo"),
        }
    }
}

/// Animation applied while the pointer hovers an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HoverEffect {
    /// No hover change
    #[default]
    None,
    /// Grow slightly
    Zoom,
    /// Move up slightly
    Lift,
    /// Raise brightness
    Brighten,
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[allow(missing_docs)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

/// Letter case transformation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[allow(missing_docs)]
pub enum TextTransform {
    #[default]
    None,
    Uppercase,
    Lowercase,
    Capitalize,
}

/// Box aspect ratio constraint for image and logo elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum AspectRatio {
    #[default]
    #[serde(rename = "auto")]
    Auto,
    #[serde(rename = "1/1")]
    Square,
    #[serde(rename = "4/3")]
    Landscape,
    #[serde(rename = "16/9")]
    Wide,
    #[serde(rename = "3/4")]
    Portrait,
    #[serde(rename = "9/16")]
    Tall,
}

impl AspectRatio {
    /// Width over height, or `None` when unconstrained.
    #[must_use]
    pub fn ratio(self) -> Option<(u32, u32)> {
        match self {
            Self::Auto => None,
            Self::Square => Some((1, 1)),
            Self::Landscape => Some((4, 3)),
            Self::Wide => Some((16, 9)),
            Self::Portrait => Some((3, 4)),
            Self::Tall => Some((9, 16)),
        }
    }
}

/// How an image fills its box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[allow(missing_docs)]
pub enum ObjectFit {
    #[default]
    Cover,
    Contain,
    Fill,
    ScaleDown,
    None,
}

impl ObjectFit {
    /// CSS keyword.
    #[must_use]
    pub const fn as_css(self) -> &'static str {
        match self {
            Self::Cover => "cover",
            Self::Contain => "contain",
            Self::Fill => "fill",
            Self::ScaleDown => "scale-down",
            Self::None => "none",
        }
    }
}

/// Typography settings used by text elements.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextStyle {
    /// Horizontal alignment
    pub align: TextAlign,
    /// Font weight (100-900)
    pub weight: u16,
    /// Font size in pixels
    pub font_size: f64,
    /// Text color
    pub color: Color,
    /// Line height multiplier
    pub line_height: f64,
    /// Extra spacing between letters in pixels
    pub letter_spacing: f64,
    /// Letter case transformation
    pub transform: TextTransform,
    /// Background behind the text box
    pub background: Color,
    /// Corner radius of the text box in pixels
    pub border_radius: f64,
    /// Inner padding in pixels
    pub padding: f64,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            align: TextAlign::Left,
            weight: 400,
            font_size: 16.0,
            color: Color::rgb(0x1F, 0x29, 0x37),
            line_height: 1.5,
            letter_spacing: 0.0,
            transform: TextTransform::None,
            background: Color::TRANSPARENT,
            border_radius: 0.0,
            padding: 0.0,
        }
    }
}

/// Framing settings used by image and logo elements.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageStyle {
    /// Crop zoom factor (values below 1 render as 1)
    pub zoom: f64,
    /// Horizontal anchor within the box, in percent
    pub position_x: f64,
    /// Vertical anchor within the box, in percent
    pub position_y: f64,
    /// Box aspect ratio constraint
    pub aspect_ratio: AspectRatio,
    /// Fill mode inside the box
    pub object_fit: ObjectFit,
    /// Border width in pixels
    pub border_width: f64,
    /// Border color
    pub border_color: Color,
    /// Image filters
    pub filters: FilterSet,
}

impl Default for ImageStyle {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            position_x: 50.0,
            position_y: 50.0,
            aspect_ratio: AspectRatio::Auto,
            object_fit: ObjectFit::Cover,
            border_width: 0.0,
            border_color: Color::WHITE,
            filters: FilterSet::IDENTITY,
        }
    }
}

/// Declarative presentation settings for an element.
///
/// The `text` block applies to text elements and the `image` block to image and
/// logo elements; both are always present so switching kinds never loses data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ElementStyle {
    /// Box width
    pub width: Length,
    /// Box height
    pub height: Length,
    /// Horizontal pixel offset from the element's flow position
    pub x: f64,
    /// Vertical pixel offset from the element's flow position
    pub y: f64,
    /// Uniform scale factor
    pub scale: f64,
    /// Rotation in degrees
    pub rotation: f64,
    /// Stacking order
    pub z_index: i32,
    /// Opacity (0.0-1.0)
    pub opacity: f64,
    /// Drop shadow
    pub shadow: Shadow,
    /// Hover animation
    pub hover_effect: HoverEffect,
    /// Text-only settings
    pub text: TextStyle,
    /// Image/logo-only settings
    pub image: ImageStyle,
}

impl Default for ElementStyle {
    fn default() -> Self {
        Self {
            width: Length::FULL,
            height: Length::Auto,
            x: 0.0,
            y: 0.0,
            scale: 1.0,
            rotation: 0.0,
            z_index: 5,
            opacity: 1.0,
            shadow: Shadow::None,
            hover_effect: HoverEffect::None,
            text: TextStyle::default(),
            image: ImageStyle::default(),
        }
    }
}

impl ElementStyle {
    /// Returns a new style with the fields present in `patch` overridden.
    ///
    /// Non-finite numbers in the patch leave the current value in place.
    #[must_use]
    pub fn merged(&self, patch: &ElementStylePatch) -> Self {
        Self {
            width: patch.width.filter(Length::is_finite).unwrap_or(self.width),
            height: patch.height.filter(Length::is_finite).unwrap_or(self.height),
            x: finite_or(patch.x, self.x),
            y: finite_or(patch.y, self.y),
            scale: finite_or(patch.scale, self.scale),
            rotation: finite_or(patch.rotation, self.rotation),
            z_index: patch.z_index.unwrap_or(self.z_index),
            opacity: finite_or(patch.opacity, self.opacity),
            shadow: patch.shadow.unwrap_or(self.shadow),
            hover_effect: patch.hover_effect.unwrap_or(self.hover_effect),
            text: patch
                .text
                .as_ref()
                .map_or(self.text, |t| t.merged_into(&self.text)),
            image: patch
                .image
                .as_ref()
                .map_or(self.image, |i| i.merged_into(&self.image)),
        }
    }
}

/// Partial update for an [`ElementStyle`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(missing_docs)]
pub struct ElementStylePatch {
    pub width: Option<Length>,
    pub height: Option<Length>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub scale: Option<f64>,
    pub rotation: Option<f64>,
    pub z_index: Option<i32>,
    pub opacity: Option<f64>,
    pub shadow: Option<Shadow>,
    pub hover_effect: Option<HoverEffect>,
    pub text: Option<TextStylePatch>,
    pub image: Option<ImageStylePatch>,
}

impl ElementStylePatch {
    /// A patch that moves the element to an absolute offset.
    #[must_use]
    pub fn position(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }
}

/// Partial update for a [`TextStyle`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(missing_docs)]
pub struct TextStylePatch {
    pub align: Option<TextAlign>,
    pub weight: Option<u16>,
    pub font_size: Option<f64>,
    pub color: Option<Color>,
    pub line_height: Option<f64>,
    pub letter_spacing: Option<f64>,
    pub transform: Option<TextTransform>,
    pub background: Option<Color>,
    pub border_radius: Option<f64>,
    pub padding: Option<f64>,
}

impl TextStylePatch {
    fn merged_into(&self, base: &TextStyle) -> TextStyle {
        TextStyle {
            align: self.align.unwrap_or(base.align),
            weight: self.weight.unwrap_or(base.weight),
            font_size: finite_or(self.font_size, base.font_size),
            color: self.color.unwrap_or(base.color),
            line_height: finite_or(self.line_height, base.line_height),
            letter_spacing: finite_or(self.letter_spacing, base.letter_spacing),
            transform: self.transform.unwrap_or(base.transform),
            background: self.background.unwrap_or(base.background),
            border_radius: finite_or(self.border_radius, base.border_radius),
            padding: finite_or(self.padding, base.padding),
        }
    }
}

/// Partial update for an [`ImageStyle`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(missing_docs)]
pub struct ImageStylePatch {
    pub zoom: Option<f64>,
    pub position_x: Option<f64>,
    pub position_y: Option<f64>,
    pub aspect_ratio: Option<AspectRatio>,
    pub object_fit: Option<ObjectFit>,
    pub border_width: Option<f64>,
    pub border_color: Option<Color>,
    pub filters: Option<FilterPatch>,
}

impl ImageStylePatch {
    fn merged_into(&self, base: &ImageStyle) -> ImageStyle {
        ImageStyle {
            zoom: finite_or(self.zoom, base.zoom),
            position_x: finite_or(self.position_x, base.position_x),
            position_y: finite_or(self.position_y, base.position_y),
            aspect_ratio: self.aspect_ratio.unwrap_or(base.aspect_ratio),
            object_fit: self.object_fit.unwrap_or(base.object_fit),
            border_width: finite_or(self.border_width, base.border_width),
            border_color: self.border_color.unwrap_or(base.border_color),
            filters: self
                .filters
                .as_ref()
                .map_or(base.filters, |f| base.filters.merged(f)),
        }
    }
}

/// A positioned text, image or logo item inside a section.
///
/// # Invariants
///
/// - `id` is unique within the owning section and never changes after creation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionElement {
    /// Stable identifier
    pub id: String,
    /// Element type
    #[serde(rename = "type")]
    pub kind: ElementKind,
    /// Literal text or an image reference, depending on `kind`
    #[serde(default)]
    pub content: String,
    /// Presentation settings
    #[serde(default)]
    pub style: ElementStyle,
}

/// Placeholder shown by freshly added image elements.
pub const PLACEHOLDER_IMAGE: &str = "https://placehold.co/600x400?text=Imagen";

/// Default copy for freshly added text elements.
pub const DEFAULT_TEXT: &str = "Nuevo texto";

/// Generates a fresh element identifier.
pub fn generate_element_id() -> String {
    format!("el-{}", Uuid::new_v4().simple())
}

impl SectionElement {
    /// Creates an element with a fresh id and the default style.
    pub fn new(kind: ElementKind, content: impl Into<String>) -> Self {
        Self {
            id: generate_element_id(),
            kind,
            content: content.into(),
            style: ElementStyle::default(),
        }
    }

    /// Deep copy of this element under a fresh id.
    #[must_use]
    pub fn duplicate(&self) -> Self {
        Self {
            id: generate_element_id(),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_defaults() {
        let element = SectionElement::new(ElementKind::Text, DEFAULT_TEXT);
        assert!((element.style.scale - 1.0).abs() < f64::EPSILON);
        assert_eq!(element.style.z_index, 5);
        assert_eq!(element.style.width, Length::FULL);
        assert!(element.id.starts_with("el-"));
    }

    #[test]
    fn test_duplicate_gets_new_id() {
        let element = SectionElement::new(ElementKind::Image, PLACEHOLDER_IMAGE);
        let copy = element.duplicate();
        assert_ne!(copy.id, element.id);
        assert_eq!(copy.content, element.content);
        assert_eq!(copy.style, element.style);
    }

    #[test]
    fn test_merge_position_keeps_filters() {
        let mut style = ElementStyle::default();
        style.image.filters.grayscale = 80.0;
        style.x = 10.0;

        let merged = style.merged(&ElementStylePatch {
            y: Some(-20.0),
            ..ElementStylePatch::default()
        });

        assert!((merged.x - 10.0).abs() < f64::EPSILON);
        assert!((merged.y + 20.0).abs() < f64::EPSILON);
        assert!((merged.image.filters.grayscale - 80.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_merge_skips_non_finite_numbers() {
        let style = ElementStyle::default();
        let merged = style.merged(&ElementStylePatch {
            x: Some(f64::NAN),
            y: Some(f64::INFINITY),
            width: Some(Length::Px(f64::NAN)),
            text: Some(TextStylePatch {
                font_size: Some(f64::NAN),
                ..TextStylePatch::default()
            }),
            image: Some(ImageStylePatch {
                zoom: Some(f64::NEG_INFINITY),
                ..ImageStylePatch::default()
            }),
            ..ElementStylePatch::default()
        });

        assert_eq!(merged, style);
    }

    #[test]
    fn test_merge_nested_text_patch() {
        let style = ElementStyle::default();
        let merged = style.merged(&ElementStylePatch {
            text: Some(TextStylePatch {
                weight: Some(700),
                ..TextStylePatch::default()
            }),
            ..ElementStylePatch::default()
        });

        assert_eq!(merged.text.weight, 700);
        assert_eq!(merged.text.align, style.text.align);
        assert_eq!(merged.image, style.image);
    }

    #[test]
    fn test_kind_serializes_as_type() {
        let element = SectionElement::new(ElementKind::Logo, "logo.png");
        let json = serde_json::to_value(&element).unwrap();
        assert_eq!(json["type"], "logo");
        assert_eq!(json["style"]["zIndex"], 5);
        assert_eq!(json["style"]["width"], "100%");
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!("Image".parse::<ElementKind>().unwrap(), ElementKind::Image);
        assert!("video".parse::<ElementKind>().is_err());
    }
}
