//! Navigation menu and section listings derived from a configuration.

use crate::constants::BOOKING_SECTION_ID;
use crate::models::{Section, SiteConfiguration};
use serde::Serialize;

/// One entry of the generated navigation menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavEntry {
    /// Section id (anchor target)
    pub id: String,
    /// Menu label
    pub label: String,
}

/// Whether a listing is for visitors or for the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Visitors only see enabled sections
    #[default]
    Public,
    /// The editor sees every section, including disabled ones
    Edit,
}

/// Builds the navigation menu.
///
/// Includes enabled sections with a non-empty label, in section order. The
/// booking section is always left out, whatever its label says.
#[must_use]
pub fn navigation(config: &SiteConfiguration) -> Vec<NavEntry> {
    config
        .sections
        .iter()
        .filter(|s| s.is_navigable() && s.id != BOOKING_SECTION_ID)
        .map(|s| NavEntry {
            id: s.id.clone(),
            label: s.nav_label.trim().to_string(),
        })
        .collect()
}

/// Lists the sections rendered in the given view, in order.
#[must_use]
pub fn listed_sections(config: &SiteConfiguration, view: ViewMode) -> Vec<&Section> {
    config
        .sections
        .iter()
        .filter(|s| view == ViewMode::Edit || s.enabled)
        .collect()
}
