//! Site-wide configuration: metadata, theme, logo placements and sections.

use crate::constants::BOOKING_SECTION_ID;
use crate::models::{finite_or, BackgroundVariant, Color, Section, SectionShape, SectionStyle};
use serde::{Deserialize, Serialize};

/// Theme colors used wherever a section or element does not override them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(missing_docs)]
pub struct ThemeColors {
    pub primary: Color,
    pub secondary: Color,
    pub accent: Color,
    pub background: Color,
    pub text: Color,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            primary: Color::rgb(0x0F, 0x76, 0x6E),
            secondary: Color::rgb(0x1E, 0x29, 0x3B),
            accent: Color::rgb(0xF5, 0x9E, 0x0B),
            background: Color::WHITE,
            text: Color::rgb(0x1F, 0x29, 0x37),
        }
    }
}

/// Which of the two site logo images a placement shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogoSource {
    /// `SiteConfiguration::logo_url`
    #[default]
    Primary,
    /// `SiteConfiguration::logo_alt_url`
    Alternate,
}

/// The three places a logo can appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[allow(missing_docs)]
pub enum LogoSlot {
    Nav,
    Hero,
    Footer,
}

impl LogoSlot {
    /// Lowercase name as used on the command line and in JSON.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Nav => "nav",
            Self::Hero => "hero",
            Self::Footer => "footer",
        }
    }
}

impl std::str::FromStr for LogoSlot {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "nav" | "navigation" => Ok(Self::Nav),
            "hero" => Ok(Self::Hero),
            "footer" => Ok(Self::Footer),
            other => anyhow::bail!("Unknown logo slot '{other}'. Expected nav, hero or footer"),
        }
    }
}

/// How the image inside a logo placement fits its box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[allow(missing_docs)]
pub enum LogoFit {
    #[default]
    Contain,
    Cover,
    Fill,
}

/// Placement settings for one logo slot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LogoPlacement {
    /// Whether the logo is shown in this slot
    pub enabled: bool,
    /// Which logo image to use
    pub source: LogoSource,
    /// Box width in pixels
    pub width: f64,
    /// Box height in pixels
    pub height: f64,
    /// Corner radius as a percentage of the box (50 = circle)
    pub radius_percent: f64,
    /// Border width in pixels
    pub border_width: f64,
    /// Uniform scale factor
    pub scale: f64,
    /// Horizontal pixel offset
    pub offset_x: f64,
    /// Vertical pixel offset
    pub offset_y: f64,
    /// Image fit mode
    pub fit: LogoFit,
    /// Render the site name next to the logo
    pub show_name: bool,
}

impl Default for LogoPlacement {
    fn default() -> Self {
        Self {
            enabled: true,
            source: LogoSource::Primary,
            width: 48.0,
            height: 48.0,
            radius_percent: 0.0,
            border_width: 0.0,
            scale: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
            fit: LogoFit::Contain,
            show_name: true,
        }
    }
}

impl LogoPlacement {
    /// Returns a new placement with the fields present in `patch` overridden.
    #[must_use]
    pub fn merged(&self, patch: &LogoPatch) -> Self {
        Self {
            enabled: patch.enabled.unwrap_or(self.enabled),
            source: patch.source.unwrap_or(self.source),
            width: finite_or(patch.width, self.width),
            height: finite_or(patch.height, self.height),
            radius_percent: finite_or(patch.radius_percent, self.radius_percent),
            border_width: finite_or(patch.border_width, self.border_width),
            scale: finite_or(patch.scale, self.scale),
            offset_x: finite_or(patch.offset_x, self.offset_x),
            offset_y: finite_or(patch.offset_y, self.offset_y),
            fit: patch.fit.unwrap_or(self.fit),
            show_name: patch.show_name.unwrap_or(self.show_name),
        }
    }
}

/// Partial update for a [`LogoPlacement`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(missing_docs)]
pub struct LogoPatch {
    pub enabled: Option<bool>,
    pub source: Option<LogoSource>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub radius_percent: Option<f64>,
    pub border_width: Option<f64>,
    pub scale: Option<f64>,
    pub offset_x: Option<f64>,
    pub offset_y: Option<f64>,
    pub fit: Option<LogoFit>,
    pub show_name: Option<bool>,
}

/// The complete editable configuration of the site.
///
/// # Invariants
///
/// - section ids are unique
/// - `sections` order is render and navigation order
///
/// Values of this type are treated as immutable snapshots: every edit goes
/// through [`crate::services::mutations`] and yields a new value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SiteConfiguration {
    /// Business name
    pub site_name: String,
    /// Short slogan shown next to the name
    pub tagline: String,
    /// Hero heading
    pub hero_title: String,
    /// Hero subheading
    pub hero_subtitle: String,
    /// Street address
    pub address: String,
    /// Free-form opening hours text
    pub opening_hours: String,
    /// Contact phone
    pub phone: String,
    /// Contact e-mail
    pub email: String,
    /// WhatsApp number
    pub whatsapp: String,
    /// Instagram handle
    pub instagram: String,
    /// Theme colors
    pub theme: ThemeColors,
    /// Primary logo image reference
    pub logo_url: String,
    /// Alternate logo image reference (e.g. for dark backgrounds)
    pub logo_alt_url: String,
    /// Logo in the navigation bar
    pub nav_logo: LogoPlacement,
    /// Logo in the hero banner
    pub hero_logo: LogoPlacement,
    /// Logo in the footer
    pub footer_logo: LogoPlacement,
    /// Page sections in render order
    pub sections: Vec<Section>,
}

impl Default for SiteConfiguration {
    fn default() -> Self {
        Self {
            site_name: "Club Deportivo".to_string(),
            tagline: "Deporte para todos".to_string(),
            hero_title: "Bienvenido a nuestro club".to_string(),
            hero_subtitle: "Pistas, clases y eventos para todas las edades".to_string(),
            address: "Calle Mayor 1, Madrid".to_string(),
            opening_hours: "Lunes a domingo, 8:00 - 23:00".to_string(),
            phone: "+34 600 000 000".to_string(),
            email: "info@clubdeportivo.es".to_string(),
            whatsapp: "+34 600 000 000".to_string(),
            instagram: "@clubdeportivo".to_string(),
            theme: ThemeColors::default(),
            logo_url: String::new(),
            logo_alt_url: String::new(),
            nav_logo: LogoPlacement::default(),
            hero_logo: LogoPlacement {
                width: 160.0,
                height: 160.0,
                show_name: false,
                ..LogoPlacement::default()
            },
            footer_logo: LogoPlacement {
                width: 64.0,
                height: 64.0,
                source: LogoSource::Alternate,
                ..LogoPlacement::default()
            },
            sections: default_sections(),
        }
    }
}

impl SiteConfiguration {
    /// Gets a reference to the section with the given id.
    #[must_use]
    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// Gets the position of the section with the given id.
    #[must_use]
    pub fn section_index(&self, id: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.id == id)
    }

    /// Gets a logo placement by slot.
    #[must_use]
    pub const fn logo(&self, slot: LogoSlot) -> &LogoPlacement {
        match slot {
            LogoSlot::Nav => &self.nav_logo,
            LogoSlot::Hero => &self.hero_logo,
            LogoSlot::Footer => &self.footer_logo,
        }
    }

    /// Gets a mutable logo placement by slot.
    pub fn logo_mut(&mut self, slot: LogoSlot) -> &mut LogoPlacement {
        match slot {
            LogoSlot::Nav => &mut self.nav_logo,
            LogoSlot::Hero => &mut self.hero_logo,
            LogoSlot::Footer => &mut self.footer_logo,
        }
    }

    /// Resolves the image reference a logo placement points at.
    #[must_use]
    pub fn logo_reference(&self, source: LogoSource) -> &str {
        match source {
            LogoSource::Primary => &self.logo_url,
            LogoSource::Alternate => &self.logo_alt_url,
        }
    }
}

/// Partial update for the site's scalar fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(missing_docs)]
pub struct SitePatch {
    pub site_name: Option<String>,
    pub tagline: Option<String>,
    pub hero_title: Option<String>,
    pub hero_subtitle: Option<String>,
    pub address: Option<String>,
    pub opening_hours: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub whatsapp: Option<String>,
    pub instagram: Option<String>,
    pub theme: Option<ThemeColors>,
    pub logo_url: Option<String>,
    pub logo_alt_url: Option<String>,
}

impl SitePatch {
    /// Applies the patch onto `config` in place.
    pub fn apply_to(&self, config: &mut SiteConfiguration) {
        let fields = [
            (&self.site_name, &mut config.site_name),
            (&self.tagline, &mut config.tagline),
            (&self.hero_title, &mut config.hero_title),
            (&self.hero_subtitle, &mut config.hero_subtitle),
            (&self.address, &mut config.address),
            (&self.opening_hours, &mut config.opening_hours),
            (&self.phone, &mut config.phone),
            (&self.email, &mut config.email),
            (&self.whatsapp, &mut config.whatsapp),
            (&self.instagram, &mut config.instagram),
            (&self.logo_url, &mut config.logo_url),
            (&self.logo_alt_url, &mut config.logo_alt_url),
        ];
        for (value, target) in fields {
            if let Some(value) = value {
                target.clone_from(value);
            }
        }
        if let Some(theme) = self.theme {
            config.theme = theme;
        }
    }
}

/// Sections of a freshly installed site.
fn default_sections() -> Vec<Section> {
    let dark = SectionStyle {
        bg_variant: BackgroundVariant::Gradient,
        bg_gradient: "linear-gradient(135deg, #0F766E 0%, #1E293B 100%)".to_string(),
        ..SectionStyle::default()
    };
    let soft = SectionStyle {
        bg_color: Color::rgb(0xF8, 0xFA, 0xFC),
        shape: SectionShape::Rounded,
        ..SectionStyle::default()
    };

    vec![
        Section::new("hero", "", "Bienvenido", "Tu club deportivo de referencia")
            .with_style(dark.clone()),
        Section::new(
            "space",
            "Instalaciones",
            "Nuestro espacio",
            "Pistas cubiertas, vestuarios y cafetería",
        ),
        Section::new(
            "sports",
            "Deportes",
            "Deportes",
            "Pádel, tenis y pickleball",
        )
        .with_style(soft.clone()),
        Section::new(
            "courses",
            "Cursos",
            "Cursos y clases",
            "Escuela para niños y adultos",
        ),
        Section::new(
            "whyUs",
            "Por qué nosotros",
            "¿Por qué elegirnos?",
            "Entrenadores titulados y ambiente familiar",
        )
        .with_style(soft),
        Section::new("events", "Eventos", "Eventos", "Torneos y ligas durante todo el año"),
        Section::new(
            BOOKING_SECTION_ID,
            "Reservas",
            "Reserva tu pista",
            "Consulta la disponibilidad",
        ),
        Section::new("contact", "Contacto", "Contacto", "Escríbenos o visítanos")
            .with_style(dark),
    ]
}
