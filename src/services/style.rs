//! Style resolution: declarative style records to concrete presentation values.
//!
//! Everything here is a pure function of its inputs. The same record always
//! resolves to the same output, which lets renderers cache freely and keeps
//! the tests exact.

use crate::models::{
    BackgroundVariant, Color, ElementKind, ElementStyle, FilterSet, HoverEffect, ImageStyle,
    Length, LogoFit, LogoPlacement, LogoSlot, SectionElement, SectionShape, SectionStyle, Shadow,
    SiteConfiguration, TextStyle,
};
use serde::Serialize;

/// Scale multiplier applied by the `zoom` hover effect.
pub const HOVER_ZOOM_FACTOR: f64 = 1.05;
/// Upward shift in pixels applied by the `lift` hover effect.
pub const HOVER_LIFT_PX: f64 = 8.0;
/// Brightness percentage forced by the `brighten` hover effect.
pub const HOVER_BRIGHTNESS: f64 = 115.0;
/// Alpha of the glass fill.
pub const GLASS_FILL_OPACITY: f64 = 0.1;
/// Backdrop blur radius of the glass variant, in pixels.
pub const GLASS_BLUR_PX: f64 = 12.0;

/// Resolved section background.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Background {
    /// No fill
    None,
    /// Flat color
    Flat {
        /// Fill color
        color: Color,
    },
    /// Gradient expression, verbatim
    Gradient {
        /// CSS gradient
        expression: String,
    },
    /// Image washed with white
    Image {
        /// Image reference
        url: String,
        /// Uniform white overlay; its alpha is `1 - bg_opacity`
        overlay: Color,
        /// Combined filter chain for the image
        filter: String,
        /// Fixed attachment (parallax)
        fixed: bool,
    },
    /// Translucent panel over a blurred backdrop
    Glass {
        /// Translucent fill
        fill: Color,
        /// Backdrop blur radius in pixels
        blur: f64,
    },
}

impl Background {
    /// CSS `background` shorthand value.
    #[must_use]
    pub fn to_css(&self) -> String {
        match self {
            Self::None => "none".to_string(),
            Self::Flat { color } => color.to_css(),
            Self::Gradient { expression } => expression.clone(),
            Self::Image {
                url,
                overlay,
                fixed,
                ..
            } => {
                let wash = overlay.to_css();
                let attachment = if *fixed { " fixed" } else { "" };
                format!(
                    "linear-gradient({wash}, {wash}), url(\"{}\") center / cover no-repeat{attachment}",
                    url.replace('"', "%22")
                )
            }
            Self::Glass { fill, .. } => fill.to_css(),
        }
    }

    /// CSS `backdrop-filter` value, for variants that use one.
    #[must_use]
    pub fn backdrop_filter(&self) -> Option<String> {
        match self {
            Self::Glass { blur, .. } => Some(format!("blur({blur}px)")),
            _ => None,
        }
    }
}

/// Renders a filter set as a single CSS filter chain.
///
/// Terms always appear in the same order (brightness, contrast, grayscale,
/// sepia, blur, hue-rotate, saturate, invert); reordering changes the visual
/// result at extreme values.
#[must_use]
pub fn filter_chain(filters: &FilterSet) -> String {
    format!(
        "brightness({}%) contrast({}%) grayscale({}%) sepia({}%) blur({}px) hue-rotate({}deg) saturate({}%) invert({}%)",
        filters.brightness,
        filters.contrast,
        filters.grayscale,
        filters.sepia,
        filters.blur,
        filters.hue_rotate,
        filters.saturate,
        filters.invert,
    )
}

/// Resolves a section's background.
#[must_use]
pub fn resolve_background(style: &SectionStyle) -> Background {
    match style.bg_variant {
        BackgroundVariant::Solid => Background::Flat {
            color: style.bg_color,
        },
        BackgroundVariant::Gradient => Background::Gradient {
            expression: style.bg_gradient.clone(),
        },
        BackgroundVariant::Image => Background::Image {
            url: style.bg_image.clone(),
            overlay: Color::WHITE.with_opacity(1.0 - style.bg_opacity.clamp(0.0, 1.0)),
            filter: filter_chain(&style.filters),
            fixed: style.parallax,
        },
        BackgroundVariant::Glass => Background::Glass {
            fill: Color::WHITE.with_opacity(GLASS_FILL_OPACITY),
            blur: GLASS_BLUR_PX,
        },
        BackgroundVariant::Transparent => Background::None,
    }
}

/// Per-corner radii, clockwise from top-left.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct CornerRadius {
    pub top_left: Length,
    pub top_right: Length,
    pub bottom_right: Length,
    pub bottom_left: Length,
}

impl CornerRadius {
    /// Same radius on all four corners.
    #[must_use]
    pub const fn uniform(radius: Length) -> Self {
        Self {
            top_left: radius,
            top_right: radius,
            bottom_right: radius,
            bottom_left: radius,
        }
    }

    /// CSS `border-radius` value.
    #[must_use]
    pub fn to_css(&self) -> String {
        if self.top_left == self.top_right
            && self.top_right == self.bottom_right
            && self.bottom_right == self.bottom_left
        {
            self.top_left.to_string()
        } else {
            format!(
                "{} {} {} {}",
                self.top_left, self.top_right, self.bottom_right, self.bottom_left
            )
        }
    }
}

/// Maps a section shape to its corner radius policy.
#[must_use]
pub fn resolve_shape(shape: SectionShape) -> CornerRadius {
    const ZERO: Length = Length::Px(0.0);
    const ARC: Length = Length::Percent(50.0);
    match shape {
        SectionShape::Sharp => CornerRadius::uniform(ZERO),
        SectionShape::Rounded => CornerRadius::uniform(Length::Px(24.0)),
        SectionShape::Pill => CornerRadius::uniform(Length::Px(9999.0)),
        SectionShape::Oval => CornerRadius::uniform(ARC),
        SectionShape::ArcTop => CornerRadius {
            top_left: ARC,
            top_right: ARC,
            bottom_right: ZERO,
            bottom_left: ZERO,
        },
        SectionShape::ArcBottom => CornerRadius {
            top_left: ZERO,
            top_right: ZERO,
            bottom_right: ARC,
            bottom_left: ARC,
        },
    }
}

/// Maps a shadow preset to a CSS `box-shadow` value.
#[must_use]
pub const fn resolve_shadow(shadow: Shadow) -> &'static str {
    match shadow {
        Shadow::None => "none",
        Shadow::Sm => "0 1px 2px rgba(0, 0, 0, 0.05)",
        Shadow::Md => "0 4px 6px rgba(0, 0, 0, 0.1)",
        Shadow::Lg => "0 10px 15px rgba(0, 0, 0, 0.1)",
        Shadow::Xl => "0 20px 25px rgba(0, 0, 0, 0.15)",
    }
}

/// A solid border.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Border {
    /// Width in pixels
    pub width: f64,
    /// Border color
    pub color: Color,
}

impl Border {
    /// Border of `width` pixels, or `None` when the width is not positive.
    #[must_use]
    pub fn solid(width: f64, color: Color) -> Option<Self> {
        (width > 0.0).then_some(Self { width, color })
    }

    /// CSS `border` shorthand value.
    #[must_use]
    pub fn to_css(&self) -> String {
        format!("{}px solid {}", self.width, self.color.to_css())
    }
}

/// Everything needed to paint a section box.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionPresentation {
    /// Background paint
    pub background: Background,
    /// Corner radii
    pub corner_radius: CornerRadius,
    /// Border, if any
    pub border: Option<Border>,
    /// CSS box-shadow
    pub box_shadow: &'static str,
}

impl SectionPresentation {
    /// CSS declarations for the section box, in a stable order.
    #[must_use]
    ///
    /// Image backgrounds are painted by [`Self::image_layer_declarations`]
    /// instead, so the box itself only sets up a stacking context for them.
    pub fn to_css_declarations(&self) -> Vec<(&'static str, String)> {
        let mut decls = if matches!(self.background, Background::Image { .. }) {
            vec![
                ("position", "relative".to_string()),
                ("isolation", "isolate".to_string()),
            ]
        } else {
            vec![("background", self.background.to_css())]
        };
        if let Some(backdrop) = self.background.backdrop_filter() {
            decls.push(("backdrop-filter", backdrop));
        }
        decls.push(("border-radius", self.corner_radius.to_css()));
        if let Some(border) = &self.border {
            decls.push(("border", border.to_css()));
        }
        decls.push(("box-shadow", self.box_shadow.to_string()));
        decls
    }

    /// CSS declarations for the pseudo-element layer behind an image section.
    ///
    /// The filter chain applies to this layer only, never to the section's
    /// content. `None` for every other background.
    #[must_use]
    pub fn image_layer_declarations(&self) -> Option<Vec<(&'static str, String)>> {
        let Background::Image { filter, .. } = &self.background else {
            return None;
        };
        Some(vec![
            ("content", "\"\"".to_string()),
            ("position", "absolute".to_string()),
            ("inset", "0".to_string()),
            ("z-index", "-1".to_string()),
            ("border-radius", "inherit".to_string()),
            ("background", self.background.to_css()),
            ("filter", filter.clone()),
        ])
    }
}

/// Resolves a section style into presentation values.
#[must_use]
pub fn resolve_section(style: &SectionStyle) -> SectionPresentation {
    SectionPresentation {
        background: resolve_background(style),
        corner_radius: resolve_shape(style.shape),
        border: Border::solid(style.border_width, style.border_color),
        box_shadow: resolve_shadow(style.shadow),
    }
}

/// Offset, scale and rotation of an element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[allow(missing_docs)]
pub struct Transform {
    pub x: f64,
    pub y: f64,
    pub scale: f64,
    pub rotation: f64,
}

impl Transform {
    /// CSS `transform` value.
    #[must_use]
    pub fn to_css(&self) -> String {
        format!(
            "translate({}px, {}px) scale({}) rotate({}deg)",
            self.x, self.y, self.scale, self.rotation
        )
    }
}

/// How an image sits inside its element box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageFrame {
    /// Crop zoom, never below 1
    pub zoom: f64,
    /// Horizontal anchor in percent (0-100)
    pub position_x: f64,
    /// Vertical anchor in percent (0-100)
    pub position_y: f64,
    /// Box aspect ratio, width over height
    pub aspect_ratio: Option<(u32, u32)>,
    /// CSS object-fit keyword
    pub object_fit: &'static str,
}

impl ImageFrame {
    /// CSS declarations for the `<img>` inside the element box.
    #[must_use]
    pub fn to_css_declarations(&self) -> Vec<(&'static str, String)> {
        let origin = format!("{}% {}%", self.position_x, self.position_y);
        let mut decls = vec![
            ("object-fit", self.object_fit.to_string()),
            ("object-position", origin.clone()),
            ("transform", format!("scale({})", self.zoom)),
            ("transform-origin", origin),
        ];
        if let Some((w, h)) = self.aspect_ratio {
            decls.insert(0, ("aspect-ratio", format!("{w} / {h}")));
        }
        decls
    }
}

/// Resolves the crop/position settings of an image or logo.
///
/// The aspect ratio shapes the box first, object-fit and object-position
/// place the image inside it, and the zoom scales around that anchor.
#[must_use]
pub fn resolve_image_frame(image: &ImageStyle) -> ImageFrame {
    ImageFrame {
        zoom: image.zoom.max(1.0),
        position_x: image.position_x.clamp(0.0, 100.0),
        position_y: image.position_y.clamp(0.0, 100.0),
        aspect_ratio: image.aspect_ratio.ratio(),
        object_fit: image.object_fit.as_css(),
    }
}

/// Element state while hovered.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HoverState {
    /// Transform while hovered
    pub transform: Transform,
    /// Filter chain while hovered, if the element uses one
    pub filter: Option<String>,
}

/// Base transform of an element.
#[must_use]
pub fn resolve_transform(style: &ElementStyle) -> Transform {
    Transform {
        x: style.x,
        y: style.y,
        scale: style.scale,
        rotation: style.rotation,
    }
}

/// Resolves the hover state of an element.
///
/// `filters` is the element's base filter set; text elements pass `None`.
/// Brighten forces the brightness term and leaves every other term alone,
/// so text elements gain a chain with only brightness raised.
#[must_use]
pub fn resolve_hover(style: &ElementStyle, filters: Option<&FilterSet>) -> HoverState {
    let base = resolve_transform(style);
    match style.hover_effect {
        HoverEffect::None => HoverState {
            transform: base,
            filter: filters.map(filter_chain),
        },
        HoverEffect::Zoom => HoverState {
            transform: Transform {
                scale: base.scale * HOVER_ZOOM_FACTOR,
                ..base
            },
            filter: filters.map(filter_chain),
        },
        HoverEffect::Lift => HoverState {
            transform: Transform {
                y: base.y - HOVER_LIFT_PX,
                ..base
            },
            filter: filters.map(filter_chain),
        },
        HoverEffect::Brighten => {
            let brightened = FilterSet {
                brightness: HOVER_BRIGHTNESS,
                ..filters.copied().unwrap_or(FilterSet::IDENTITY)
            };
            HoverState {
                transform: base,
                filter: Some(filter_chain(&brightened)),
            }
        }
    }
}

/// Everything needed to paint an element.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementPresentation {
    /// Box width
    pub width: String,
    /// Box height
    pub height: String,
    /// Resting transform
    pub transform: Transform,
    /// Hovered state
    pub hover: HoverState,
    /// Stacking order
    pub z_index: i32,
    /// Opacity (0.0-1.0)
    pub opacity: f64,
    /// CSS box-shadow
    pub box_shadow: &'static str,
    /// Resting filter chain (image and logo only)
    pub filter: Option<String>,
    /// Image placement (image and logo only)
    pub frame: Option<ImageFrame>,
    /// Image border (image and logo only)
    pub border: Option<Border>,
    /// Typography (text only)
    pub text: Option<TextStyle>,
}

impl ElementPresentation {
    /// CSS declarations for the element box at rest, in a stable order.
    ///
    /// Image framing is not included; see [`ImageFrame::to_css_declarations`].
    #[must_use]
    pub fn to_css_declarations(&self) -> Vec<(&'static str, String)> {
        let mut decls = vec![
            ("width", self.width.clone()),
            ("height", self.height.clone()),
            ("transform", self.transform.to_css()),
            ("z-index", self.z_index.to_string()),
            ("opacity", self.opacity.to_string()),
            ("box-shadow", self.box_shadow.to_string()),
        ];
        if let Some(filter) = &self.filter {
            decls.push(("filter", filter.clone()));
        }
        if let Some(border) = &self.border {
            decls.push(("border", border.to_css()));
        }
        if let Some(text) = &self.text {
            decls.push(("font-size", format!("{}px", text.font_size)));
            decls.push(("font-weight", text.weight.to_string()));
            decls.push(("color", text.color.to_css()));
            decls.push(("line-height", text.line_height.to_string()));
            decls.push(("letter-spacing", format!("{}px", text.letter_spacing)));
            decls.push(("background", text.background.to_css()));
            decls.push(("border-radius", format!("{}px", text.border_radius)));
            decls.push(("padding", format!("{}px", text.padding)));
        }
        decls
    }
}

/// Resolves an element's style into presentation values.
#[must_use]
pub fn resolve_element(element: &SectionElement) -> ElementPresentation {
    let style = &element.style;
    let visual = element.kind.is_visual();
    let filters = visual.then_some(&style.image.filters);

    ElementPresentation {
        width: style.width.to_string(),
        height: style.height.to_string(),
        transform: resolve_transform(style),
        hover: resolve_hover(style, filters),
        z_index: style.z_index,
        opacity: style.opacity.clamp(0.0, 1.0),
        box_shadow: resolve_shadow(style.shadow),
        filter: filters.map(filter_chain),
        frame: visual.then(|| resolve_image_frame(&style.image)),
        border: if visual {
            Border::solid(style.image.border_width, style.image.border_color)
        } else {
            None
        },
        text: (element.kind == ElementKind::Text).then_some(style.text),
    }
}

/// A logo ready to draw in one slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoPresentation {
    /// Image reference
    pub src: String,
    /// Box width in pixels
    pub width: f64,
    /// Box height in pixels
    pub height: f64,
    /// CSS border-radius
    pub border_radius: String,
    /// Border width in pixels
    pub border_width: f64,
    /// Offset and scale
    pub transform: Transform,
    /// CSS object-fit keyword
    pub object_fit: &'static str,
    /// Render the site name alongside
    pub show_name: bool,
}

/// Resolves one logo slot, or `None` when the slot is disabled.
#[must_use]
pub fn resolve_logo(config: &SiteConfiguration, slot: LogoSlot) -> Option<LogoPresentation> {
    let placement: &LogoPlacement = config.logo(slot);
    placement.enabled.then(|| LogoPresentation {
        src: config.logo_reference(placement.source).to_string(),
        width: placement.width,
        height: placement.height,
        border_radius: Length::Percent(placement.radius_percent.clamp(0.0, 50.0)).to_string(),
        border_width: placement.border_width,
        transform: Transform {
            x: placement.offset_x,
            y: placement.offset_y,
            scale: placement.scale,
            rotation: 0.0,
        },
        object_fit: match placement.fit {
            LogoFit::Contain => "contain",
            LogoFit::Cover => "cover",
            LogoFit::Fill => "fill",
        },
        show_name: placement.show_name,
    })
}
