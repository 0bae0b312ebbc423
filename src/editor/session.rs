//! Transient editing state: what is selected and what is being dragged.
//!
//! Nothing here is persisted or versioned. A drag only previews positions;
//! the owning [`crate::editor::Editor`] commits the result on release.

use crate::models::SiteConfiguration;
use serde::Serialize;

/// Address of one element inside a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementRef {
    /// Owning section id
    pub section_id: String,
    /// Element id
    pub element_id: String,
}

impl ElementRef {
    /// Creates an element address.
    pub fn new(section_id: impl Into<String>, element_id: impl Into<String>) -> Self {
        Self {
            section_id: section_id.into(),
            element_id: element_id.into(),
        }
    }

    /// Checks whether the element still exists in `config`.
    #[must_use]
    pub fn resolves_in(&self, config: &SiteConfiguration) -> bool {
        config
            .section(&self.section_id)
            .and_then(|s| s.element(&self.element_id))
            .is_some()
    }
}

/// The element panel and the section panel are independent: selecting one
/// never clears the other.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    active_element: Option<ElementRef>,
    active_section: Option<String>,
}

impl Selection {
    /// Creates an empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Element open in the element panel.
    #[must_use]
    pub const fn active_element(&self) -> Option<&ElementRef> {
        self.active_element.as_ref()
    }

    /// Section open in the section style panel.
    #[must_use]
    pub fn active_section(&self) -> Option<&str> {
        self.active_section.as_deref()
    }

    /// Opens an element, replacing any previously active element.
    pub fn select_element(&mut self, element: ElementRef) {
        self.active_element = Some(element);
    }

    /// Opens a section, replacing any previously active section.
    pub fn select_section(&mut self, section_id: impl Into<String>) {
        self.active_section = Some(section_id.into());
    }

    /// Closes the element panel.
    pub fn clear_element(&mut self) {
        self.active_element = None;
    }

    /// Closes the section panel.
    pub fn clear_section(&mut self) {
        self.active_section = None;
    }

    /// Drops selections whose targets no longer exist in `config`.
    ///
    /// Used after deletes, undo and import.
    pub fn retain_existing(&mut self, config: &SiteConfiguration) {
        if self
            .active_element
            .as_ref()
            .is_some_and(|e| !e.resolves_in(config))
        {
            self.active_element = None;
        }
        if self
            .active_section
            .as_deref()
            .is_some_and(|id| config.section(id).is_none())
        {
            self.active_section = None;
        }
    }
}

/// An in-progress drag of one element.
///
/// `origin` is the element's offset when the gesture began and `delta` the
/// pointer movement accumulated since.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DragState {
    /// Element being moved
    pub target: ElementRef,
    /// Element offset (x, y) at the start of the gesture
    pub origin: (f64, f64),
    /// Accumulated movement (dx, dy)
    pub delta: (f64, f64),
}

impl DragState {
    /// Starts a drag of `target` if it exists in `config`.
    #[must_use]
    pub fn begin(config: &SiteConfiguration, target: ElementRef) -> Option<Self> {
        let element = config
            .section(&target.section_id)?
            .element(&target.element_id)?;
        let origin = (element.style.x, element.style.y);
        Some(Self {
            target,
            origin,
            delta: (0.0, 0.0),
        })
    }

    /// Records the pointer's total movement since the gesture began.
    pub fn move_to(&mut self, dx: f64, dy: f64) {
        self.delta = (dx, dy);
    }

    /// Offset the element is previewed at.
    #[must_use]
    pub fn preview_position(&self) -> (f64, f64) {
        (self.origin.0 + self.delta.0, self.origin.1 + self.delta.1)
    }

    /// Whether releasing now would change anything.
    #[must_use]
    pub fn has_moved(&self) -> bool {
        self.delta != (0.0, 0.0)
    }
}
