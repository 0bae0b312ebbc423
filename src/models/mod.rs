//! Data models for the site configuration, its sections and elements.
//!
//! This module contains all the core data structures used throughout the application.
//! Models carry shape and defaults only; editing logic lives in [`crate::services`].

pub mod color;
pub mod element;
pub mod filters;
pub mod length;
pub mod section;
pub mod site;
pub mod venue;

/// Picks a patched number, keeping `current` when the patch leaves it out or
/// holds NaN or an infinity, neither of which survives JSON storage.
pub(crate) fn finite_or(patched: Option<f64>, current: f64) -> f64 {
    patched.filter(|v| v.is_finite()).unwrap_or(current)
}

// Re-export all model types
pub use color::Color;
pub use element::{
    AspectRatio, ElementKind, ElementStyle, ElementStylePatch, HoverEffect, ImageStyle,
    ImageStylePatch, ObjectFit, SectionElement, TextAlign, TextStyle, TextStylePatch,
    TextTransform,
};
pub use filters::{FilterPatch, FilterSet};
pub use length::Length;
pub use section::{
    BackgroundVariant, NewSection, Section, SectionPatch, SectionShape, SectionStyle,
    SectionStylePatch, Shadow, TextOverride,
};
pub use site::{
    LogoFit, LogoPatch, LogoPlacement, LogoSlot, LogoSource, SiteConfiguration, SitePatch,
    ThemeColors,
};
pub use venue::{default_courts, Court, Event};
