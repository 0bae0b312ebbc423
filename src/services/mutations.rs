//! Snapshot-producing edit operations on a [`SiteConfiguration`].
//!
//! Every function takes the current configuration by reference and returns a
//! new, fully-formed configuration. Inputs are never modified. Targets that do
//! not exist and moves past either end are no-ops: the returned configuration
//! equals the input and the miss is logged at `debug` level.

use crate::models::{
    ElementKind, ElementStylePatch, LogoPatch, LogoSlot, NewSection, Section, SectionElement,
    SectionPatch, SectionStylePatch, SiteConfiguration, SitePatch,
};
use crate::models::element::{DEFAULT_TEXT, PLACEHOLDER_IMAGE};
use crate::models::section::generate_section_id;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Suffix appended to the title of a duplicated section.
pub const COPY_SUFFIX: &str = " (Copia)";

/// Direction of a reorder step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Towards index 0
    Up,
    /// Towards the end
    Down,
}

impl std::str::FromStr for Direction {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            other => anyhow::bail!("Unknown direction '{other}'. Expected up or down"),
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Up => write!(f, "up"),
            Self::Down => write!(f, "down"),
        }
    }
}

/// Clones `config` and runs `edit` on the section with `id`, if any.
fn edit_section(
    config: &SiteConfiguration,
    id: &str,
    op: &str,
    edit: impl FnOnce(&mut Section),
) -> SiteConfiguration {
    let mut next = config.clone();
    match next.sections.iter_mut().find(|s| s.id == id) {
        Some(section) => edit(section),
        None => debug!(op, section = id, "section not found; ignoring"),
    }
    next
}

/// Clones `config` and runs `edit` on one element, if both ids resolve.
fn edit_element(
    config: &SiteConfiguration,
    section_id: &str,
    element_id: &str,
    op: &str,
    edit: impl FnOnce(&mut SectionElement),
) -> SiteConfiguration {
    edit_section(config, section_id, op, |section| {
        match section.elements.iter_mut().find(|e| e.id == element_id) {
            Some(element) => edit(element),
            None => debug!(op, section = section_id, element = element_id, "element not found; ignoring"),
        }
    })
}

/// Index of the neighbour `index` would swap with, if it exists.
fn neighbour(index: usize, len: usize, direction: Direction) -> Option<usize> {
    match direction {
        Direction::Up => index.checked_sub(1).filter(|_| index < len),
        Direction::Down => index.checked_add(1).filter(|&n| n < len),
    }
}

/// Shallow-merges top-level fields into the section with `id`.
pub fn update_section_fields(
    config: &SiteConfiguration,
    id: &str,
    patch: &SectionPatch,
) -> SiteConfiguration {
    edit_section(config, id, "update_section_fields", |section| {
        patch.apply_to(section);
    })
}

/// Merges `patch` into the existing style of the section with `id`.
pub fn update_section_style(
    config: &SiteConfiguration,
    id: &str,
    patch: &SectionStylePatch,
) -> SiteConfiguration {
    edit_section(config, id, "update_section_style", |section| {
        section.style = section.style.merged(patch);
    })
}

/// Merges `patch` into the existing style of one element.
pub fn update_element_style(
    config: &SiteConfiguration,
    section_id: &str,
    element_id: &str,
    patch: &ElementStylePatch,
) -> SiteConfiguration {
    edit_element(config, section_id, element_id, "update_element_style", |element| {
        element.style = element.style.merged(patch);
    })
}

/// Replaces the content (text or image reference) of one element.
pub fn update_element_content(
    config: &SiteConfiguration,
    section_id: &str,
    element_id: &str,
    content: &str,
) -> SiteConfiguration {
    edit_element(config, section_id, element_id, "update_element_content", |element| {
        element.content = content.to_string();
    })
}

/// Swaps the section at `index` with its neighbour in `direction`.
///
/// Moving the first section up or the last section down is a no-op.
pub fn move_section(
    config: &SiteConfiguration,
    index: usize,
    direction: Direction,
) -> SiteConfiguration {
    let mut next = config.clone();
    match neighbour(index, next.sections.len(), direction) {
        Some(other) => next.sections.swap(index, other),
        None => debug!(index, ?direction, "section move out of bounds; ignoring"),
    }
    next
}

/// Swaps the element at `index` inside a section with its neighbour.
pub fn move_element(
    config: &SiteConfiguration,
    section_id: &str,
    index: usize,
    direction: Direction,
) -> SiteConfiguration {
    edit_section(config, section_id, "move_element", |section| {
        match neighbour(index, section.elements.len(), direction) {
            Some(other) => section.elements.swap(index, other),
            None => debug!(index, ?direction, "element move out of bounds; ignoring"),
        }
    })
}

/// Deep-copies the section with `id` and inserts the copy right after it.
///
/// The copy gets a fresh id, a title marked with [`COPY_SUFFIX`] and fresh ids
/// for each of its elements.
pub fn duplicate_section(config: &SiteConfiguration, id: &str) -> SiteConfiguration {
    let mut next = config.clone();
    let Some(index) = next.section_index(id) else {
        debug!(section = id, "duplicate_section: section not found; ignoring");
        return next;
    };

    let source = &next.sections[index];
    let copy = Section {
        id: generate_section_id(),
        title: format!("{}{COPY_SUFFIX}", source.title),
        elements: source.elements.iter().map(SectionElement::duplicate).collect(),
        ..source.clone()
    };
    next.sections.insert(index + 1, copy);
    next
}

/// Appends a new element of `kind` with default content and style.
///
/// Text elements start with placeholder copy, images with a placeholder
/// picture and logos with the site's primary logo reference.
pub fn add_element(
    config: &SiteConfiguration,
    section_id: &str,
    kind: ElementKind,
) -> SiteConfiguration {
    let content = match kind {
        ElementKind::Text => DEFAULT_TEXT.to_string(),
        ElementKind::Image => PLACEHOLDER_IMAGE.to_string(),
        ElementKind::Logo => config.logo_url.clone(),
    };
    edit_section(config, section_id, "add_element", |section| {
        section.elements.push(SectionElement::new(kind, content));
    })
}

/// Deep-copies one element under a fresh id and appends it to the same section.
pub fn duplicate_element(
    config: &SiteConfiguration,
    section_id: &str,
    element_id: &str,
) -> SiteConfiguration {
    edit_section(config, section_id, "duplicate_element", |section| {
        match section.element(element_id).map(SectionElement::duplicate) {
            Some(copy) => section.elements.push(copy),
            None => debug!(section = section_id, element = element_id, "duplicate_element: element not found; ignoring"),
        }
    })
}

/// Removes one element from its section.
pub fn delete_element(
    config: &SiteConfiguration,
    section_id: &str,
    element_id: &str,
) -> SiteConfiguration {
    edit_section(config, section_id, "delete_element", |section| {
        let before = section.elements.len();
        section.elements.retain(|e| e.id != element_id);
        if section.elements.len() == before {
            debug!(section = section_id, element = element_id, "delete_element: element not found; ignoring");
        }
    })
}

/// Soft-deletes a section. Its label, content and style are kept.
pub fn disable_section(config: &SiteConfiguration, id: &str) -> SiteConfiguration {
    edit_section(config, id, "disable_section", |section| {
        section.enabled = false;
    })
}

/// Re-activates a soft-deleted section.
pub fn enable_section(config: &SiteConfiguration, id: &str) -> SiteConfiguration {
    edit_section(config, id, "enable_section", |section| {
        section.enabled = true;
    })
}

/// Appends a new enabled section built from `fields`.
pub fn add_section(config: &SiteConfiguration, fields: &NewSection) -> SiteConfiguration {
    let mut next = config.clone();
    next.sections.push(Section::new(
        generate_section_id(),
        fields.nav_label.clone(),
        fields.title.clone(),
        fields.description.clone(),
    ));
    next
}

/// Removes a section from navigation without destroying it.
///
/// Clears the navigation label and disables the section.
pub fn delete_nav_entry(config: &SiteConfiguration, id: &str) -> SiteConfiguration {
    edit_section(config, id, "delete_nav_entry", |section| {
        section.nav_label.clear();
        section.enabled = false;
    })
}

/// Shallow-merges site-wide scalar fields.
pub fn update_site(config: &SiteConfiguration, patch: &SitePatch) -> SiteConfiguration {
    let mut next = config.clone();
    patch.apply_to(&mut next);
    next
}

/// Merges `patch` into one logo placement, leaving the other two untouched.
pub fn update_logo(
    config: &SiteConfiguration,
    slot: LogoSlot,
    patch: &LogoPatch,
) -> SiteConfiguration {
    let mut next = config.clone();
    let placement = next.logo_mut(slot);
    *placement = placement.merged(patch);
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FilterPatch, ImageStylePatch, Length, SectionStyle};

    fn config() -> SiteConfiguration {
        SiteConfiguration::default()
    }

    fn with_element(kind: ElementKind) -> (SiteConfiguration, String) {
        let config = add_element(&config(), "space", kind);
        let id = config.section("space").unwrap().elements[0].id.clone();
        (config, id)
    }

    #[test]
    fn test_add_text_element_defaults() {
        let before = config();
        assert!(before.section("whyUs").unwrap().elements.is_empty());

        let after = add_element(&before, "whyUs", ElementKind::Text);
        let elements = &after.section("whyUs").unwrap().elements;

        assert_eq!(elements.len(), 1);
        assert_eq!(elements[0].kind, ElementKind::Text);
        assert!((elements[0].style.scale - 1.0).abs() < f64::EPSILON);
        assert_eq!(elements[0].style.z_index, 5);
        assert_eq!(elements[0].style.width, Length::FULL);
        // input untouched
        assert!(before.section("whyUs").unwrap().elements.is_empty());
    }

    #[test]
    fn test_add_logo_uses_primary_logo() {
        let mut base = config();
        base.logo_url = "data:image/png;base64,iVBORw0KGgo=".to_string();
        let after = add_element(&base, "hero", ElementKind::Logo);
        assert_eq!(after.section("hero").unwrap().elements[0].content, base.logo_url);
    }

    #[test]
    fn test_duplicate_section_inserts_after_source() {
        let before = config();
        let after = duplicate_section(&before, "space");
        let space = after.section_index("space").unwrap();
        let copy = &after.sections[space + 1];

        assert_eq!(after.sections.len(), before.sections.len() + 1);
        assert_eq!(after.sections[space + 2].id, "sports");
        assert_ne!(copy.id, "space");
        assert_eq!(copy.title, "Nuestro espacio (Copia)");
    }

    #[test]
    fn test_duplicate_section_copies_elements_with_new_ids() {
        let (base, element_id) = with_element(ElementKind::Image);
        let after = duplicate_section(&base, "space");
        let index = after.section_index("space").unwrap();
        let copy = &after.sections[index + 1];

        assert_eq!(copy.elements.len(), 1);
        assert_ne!(copy.elements[0].id, element_id);
        assert_eq!(copy.elements[0].content, after.sections[index].elements[0].content);
    }

    #[test]
    fn test_move_section_boundaries_are_noops() {
        let base = config();
        let last = base.sections.len() - 1;
        assert_eq!(move_section(&base, 0, Direction::Up), base);
        assert_eq!(move_section(&base, last, Direction::Down), base);
        assert_eq!(move_section(&base, last + 5, Direction::Up), base);
    }

    #[test]
    fn test_move_section_swaps_neighbours() {
        let base = config();
        let after = move_section(&base, 1, Direction::Down);
        assert_eq!(after.sections[1].id, base.sections[2].id);
        assert_eq!(after.sections[2].id, base.sections[1].id);

        let back = move_section(&after, 2, Direction::Up);
        assert_eq!(back, base);
    }

    #[test]
    fn test_update_section_style_isolated() {
        let base = update_section_style(
            &config(),
            "sports",
            &SectionStylePatch {
                filters: Some(FilterPatch {
                    sepia: Some(25.0),
                    ..FilterPatch::default()
                }),
                ..SectionStylePatch::default()
            },
        );
        let after = update_section_style(
            &base,
            "sports",
            &SectionStylePatch {
                border_width: Some(2.0),
                ..SectionStylePatch::default()
            },
        );

        let before_style = &base.section("sports").unwrap().style;
        let after_style = &after.section("sports").unwrap().style;
        assert_eq!(
            after_style,
            &SectionStyle {
                border_width: 2.0,
                ..before_style.clone()
            }
        );
        for (old, new) in base.sections.iter().zip(&after.sections) {
            if old.id != "sports" {
                assert_eq!(old, new);
            }
        }
    }

    #[test]
    fn test_update_element_style_keeps_filters_and_position() {
        let (base, id) = with_element(ElementKind::Image);
        let base = update_element_style(
            &base,
            "space",
            &id,
            &ElementStylePatch {
                x: Some(40.0),
                image: Some(ImageStylePatch {
                    filters: Some(FilterPatch {
                        blur: Some(2.0),
                        ..FilterPatch::default()
                    }),
                    ..ImageStylePatch::default()
                }),
                ..ElementStylePatch::default()
            },
        );
        let after = update_element_style(
            &base,
            "space",
            &id,
            &ElementStylePatch {
                opacity: Some(0.5),
                ..ElementStylePatch::default()
            },
        );

        let style = after.section("space").unwrap().elements[0].style;
        assert!((style.x - 40.0).abs() < f64::EPSILON);
        assert!((style.image.filters.blur - 2.0).abs() < f64::EPSILON);
        assert!((style.opacity - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_duplicate_element_is_independent() {
        let (base, id) = with_element(ElementKind::Text);
        let after = duplicate_element(&base, "space", &id);
        let copy_id = after.section("space").unwrap().elements[1].id.clone();
        assert_ne!(copy_id, id);

        let edited = update_element_style(
            &after,
            "space",
            &copy_id,
            &ElementStylePatch {
                rotation: Some(45.0),
                ..ElementStylePatch::default()
            },
        );
        let section = edited.section("space").unwrap();
        assert!((section.element(&id).unwrap().style.rotation).abs() < f64::EPSILON);
        assert!((section.element(&copy_id).unwrap().style.rotation - 45.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_delete_element_removes_only_target() {
        let (base, id) = with_element(ElementKind::Text);
        let base = add_element(&base, "space", ElementKind::Image);
        let after = delete_element(&base, "space", &id);
        let elements = &after.section("space").unwrap().elements;
        assert_eq!(elements.len(), 1);
        assert_eq!(elements[0].kind, ElementKind::Image);
    }

    #[test]
    fn test_unknown_targets_are_noops() {
        let base = config();
        assert_eq!(disable_section(&base, "missing"), base);
        assert_eq!(add_element(&base, "missing", ElementKind::Text), base);
        assert_eq!(delete_element(&base, "space", "missing"), base);
        assert_eq!(duplicate_element(&base, "space", "missing"), base);
        assert_eq!(duplicate_section(&base, "missing"), base);
        assert_eq!(
            update_section_fields(&base, "missing", &SectionPatch::default()),
            base
        );
    }

    #[test]
    fn test_disable_keeps_content() {
        let (base, _) = with_element(ElementKind::Text);
        let after = disable_section(&base, "space");
        let section = after.section("space").unwrap();
        assert!(!section.enabled);
        assert_eq!(section.nav_label, "Instalaciones");
        assert_eq!(section.elements.len(), 1);

        let restored = enable_section(&after, "space");
        assert_eq!(restored, base);
    }

    #[test]
    fn test_delete_nav_entry_clears_label_and_disables() {
        let after = delete_nav_entry(&config(), "events");
        let section = after.section("events").unwrap();
        assert!(section.nav_label.is_empty());
        assert!(!section.enabled);
        assert_eq!(section.title, "Eventos");
    }

    #[test]
    fn test_add_section_appends_navigable_section() {
        let base = config();
        let after = add_section(
            &base,
            &NewSection {
                nav_label: "Tienda".to_string(),
                title: "Tienda".to_string(),
                description: "Material deportivo".to_string(),
            },
        );
        let added = after.sections.last().unwrap();
        assert_eq!(after.sections.len(), base.sections.len() + 1);
        assert!(added.is_navigable());
        assert!(base.section(&added.id).is_none());
    }

    #[test]
    fn test_update_section_fields_shallow_merge() {
        let after = update_section_fields(
            &config(),
            "courses",
            &SectionPatch {
                title: Some("Academia".to_string()),
                ..SectionPatch::default()
            },
        );
        let section = after.section("courses").unwrap();
        assert_eq!(section.title, "Academia");
        assert_eq!(section.description, "Escuela para niños y adultos");
    }

    #[test]
    fn test_move_element_within_section() {
        let (base, first) = with_element(ElementKind::Text);
        let base = add_element(&base, "space", ElementKind::Image);
        let after = move_element(&base, "space", 0, Direction::Down);
        assert_eq!(after.section("space").unwrap().elements[1].id, first);
        assert_eq!(move_element(&base, "space", 1, Direction::Down), base);
    }

    #[test]
    fn test_update_logo_touches_one_slot() {
        let base = config();
        let after = update_logo(
            &base,
            LogoSlot::Footer,
            &LogoPatch {
                offset_y: Some(-4.0),
                ..LogoPatch::default()
            },
        );
        assert_eq!(after.nav_logo, base.nav_logo);
        assert_eq!(after.hero_logo, base.hero_logo);
        assert!((after.footer_logo.offset_y + 4.0).abs() < f64::EPSILON);
    }
}
