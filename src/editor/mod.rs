//! Editing session: intent dispatch, undo history and persistence.
//!
//! [`Editor`] is the single owner of the current configuration. Every change
//! arrives as an [`Intent`], is applied through [`crate::services::mutations`]
//! and, when it actually changes something, is recorded in the undo history
//! and written to the store.
//!
//! # History policy
//!
//! - a committing intent pushes one snapshot of the prior configuration
//! - an intent that changes nothing pushes nothing and writes nothing
//! - an adjustment gesture (slider drag) pushes one snapshot when its first
//!   change lands and writes once when the gesture ends
//! - a drag commits once, on release
//!
//! Write failures are reported as [`EditorError::Storage`]; the in-memory
//! state keeps the change.

pub mod session;

pub use session::{DragState, ElementRef, Selection};

use crate::error::EditorError;
use crate::models::{
    ElementKind, ElementStylePatch, LogoPatch, LogoSlot, NewSection, SectionPatch,
    SectionStylePatch, SiteConfiguration, SitePatch,
};
use crate::services::history::History;
use crate::services::mutations::{self, Direction};
use crate::services::storage::{BlobStore, Workspace};
use crate::services::sync_codec;
use tracing::{debug, info, warn};

/// One user-level edit.
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub enum Intent {
    UpdateSectionFields {
        section_id: String,
        patch: SectionPatch,
    },
    UpdateSectionStyle {
        section_id: String,
        patch: SectionStylePatch,
    },
    UpdateElementStyle {
        section_id: String,
        element_id: String,
        patch: ElementStylePatch,
    },
    UpdateElementContent {
        section_id: String,
        element_id: String,
        content: String,
    },
    MoveSection {
        index: usize,
        direction: Direction,
    },
    MoveElement {
        section_id: String,
        index: usize,
        direction: Direction,
    },
    DuplicateSection {
        section_id: String,
    },
    AddElement {
        section_id: String,
        kind: ElementKind,
    },
    DuplicateElement {
        section_id: String,
        element_id: String,
    },
    DeleteElement {
        section_id: String,
        element_id: String,
    },
    DisableSection {
        section_id: String,
    },
    EnableSection {
        section_id: String,
    },
    AddSection(NewSection),
    DeleteNavEntry {
        section_id: String,
    },
    UpdateSite(SitePatch),
    UpdateLogo {
        slot: LogoSlot,
        patch: LogoPatch,
    },
}

impl Intent {
    /// Short name used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::UpdateSectionFields { .. } => "update_section_fields",
            Self::UpdateSectionStyle { .. } => "update_section_style",
            Self::UpdateElementStyle { .. } => "update_element_style",
            Self::UpdateElementContent { .. } => "update_element_content",
            Self::MoveSection { .. } => "move_section",
            Self::MoveElement { .. } => "move_element",
            Self::DuplicateSection { .. } => "duplicate_section",
            Self::AddElement { .. } => "add_element",
            Self::DuplicateElement { .. } => "duplicate_element",
            Self::DeleteElement { .. } => "delete_element",
            Self::DisableSection { .. } => "disable_section",
            Self::EnableSection { .. } => "enable_section",
            Self::AddSection(_) => "add_section",
            Self::DeleteNavEntry { .. } => "delete_nav_entry",
            Self::UpdateSite(_) => "update_site",
            Self::UpdateLogo { .. } => "update_logo",
        }
    }

    /// Produces the configuration this intent leads to from `config`.
    #[must_use]
    pub fn apply(&self, config: &SiteConfiguration) -> SiteConfiguration {
        match self {
            Self::UpdateSectionFields { section_id, patch } => {
                mutations::update_section_fields(config, section_id, patch)
            }
            Self::UpdateSectionStyle { section_id, patch } => {
                mutations::update_section_style(config, section_id, patch)
            }
            Self::UpdateElementStyle {
                section_id,
                element_id,
                patch,
            } => mutations::update_element_style(config, section_id, element_id, patch),
            Self::UpdateElementContent {
                section_id,
                element_id,
                content,
            } => mutations::update_element_content(config, section_id, element_id, content),
            Self::MoveSection { index, direction } => {
                mutations::move_section(config, *index, *direction)
            }
            Self::MoveElement {
                section_id,
                index,
                direction,
            } => mutations::move_element(config, section_id, *index, *direction),
            Self::DuplicateSection { section_id } => {
                mutations::duplicate_section(config, section_id)
            }
            Self::AddElement { section_id, kind } => {
                mutations::add_element(config, section_id, *kind)
            }
            Self::DuplicateElement {
                section_id,
                element_id,
            } => mutations::duplicate_element(config, section_id, element_id),
            Self::DeleteElement {
                section_id,
                element_id,
            } => mutations::delete_element(config, section_id, element_id),
            Self::DisableSection { section_id } => mutations::disable_section(config, section_id),
            Self::EnableSection { section_id } => mutations::enable_section(config, section_id),
            Self::AddSection(fields) => mutations::add_section(config, fields),
            Self::DeleteNavEntry { section_id } => mutations::delete_nav_entry(config, section_id),
            Self::UpdateSite(patch) => mutations::update_site(config, patch),
            Self::UpdateLogo { slot, patch } => mutations::update_logo(config, *slot, patch),
        }
    }
}

/// Bookkeeping for an open adjustment gesture.
#[derive(Debug, Clone, Copy, Default)]
struct Adjustment {
    snapshot_taken: bool,
    dirty: bool,
}

/// Owns the current configuration, its history and the store behind them.
#[derive(Debug)]
pub struct Editor<S: BlobStore> {
    store: S,
    workspace: Workspace,
    selection: Selection,
    drag: Option<DragState>,
    adjustment: Option<Adjustment>,
    coalesce_adjustments: bool,
}

impl<S: BlobStore> Editor<S> {
    /// Opens an editor over whatever `store` holds.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::Storage`] if the store cannot be read.
    pub fn open(store: S) -> Result<Self, EditorError> {
        let workspace = Workspace::load(&store)?;
        Ok(Self {
            store,
            workspace,
            selection: Selection::new(),
            drag: None,
            adjustment: None,
            coalesce_adjustments: true,
        })
    }

    /// Sets whether each change inside an adjustment gesture gets its own
    /// history entry (`false`) or the gesture shares one (`true`, default).
    #[must_use]
    pub fn with_coalesced_adjustments(mut self, coalesce: bool) -> Self {
        self.coalesce_adjustments = coalesce;
        self
    }

    /// Current configuration.
    #[must_use]
    pub const fn config(&self) -> &SiteConfiguration {
        &self.workspace.config
    }

    /// Everything held in storage.
    #[must_use]
    pub const fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    /// Undo history, most recent first.
    #[must_use]
    pub const fn history(&self) -> &History {
        &self.workspace.history
    }

    /// Panel selection.
    #[must_use]
    pub const fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Mutable panel selection.
    pub fn selection_mut(&mut self) -> &mut Selection {
        &mut self.selection
    }

    /// The backing store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Applies a committing intent.
    ///
    /// Returns `Ok(false)` when the intent changed nothing (unknown id,
    /// boundary move, identical values); nothing is recorded in that case.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::Storage`] if the change could not be written.
    /// The change is kept in memory either way.
    pub fn apply(&mut self, intent: &Intent) -> Result<bool, EditorError> {
        let next = intent.apply(self.config());
        if next == *self.config() {
            debug!(intent = intent.name(), "intent changed nothing");
            return Ok(false);
        }
        info!(intent = intent.name(), "applying edit");
        self.commit(next)?;
        Ok(true)
    }

    /// Records the current configuration in history, swaps in `next` and persists.
    fn commit(&mut self, next: SiteConfiguration) -> Result<(), EditorError> {
        let previous = std::mem::replace(&mut self.workspace.config, next);
        self.workspace.history.push(previous);
        self.selection.retain_existing(&self.workspace.config);
        self.persist()
    }

    fn persist(&mut self) -> Result<(), EditorError> {
        self.workspace
            .save_editing_state(&mut self.store)
            .map_err(|e| {
                warn!(error = %e, "failed to save workspace; keeping changes in memory");
                EditorError::from(e)
            })
    }

    /// Starts an adjustment gesture (e.g. a slider drag).
    ///
    /// Ends any gesture still open first.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::Storage`] if closing the previous gesture failed to persist.
    pub fn begin_adjustment(&mut self) -> Result<(), EditorError> {
        self.end_adjustment()?;
        self.adjustment = Some(Adjustment::default());
        Ok(())
    }

    /// Whether an adjustment gesture is open.
    #[must_use]
    pub const fn is_adjusting(&self) -> bool {
        self.adjustment.is_some()
    }

    /// Applies one step of an adjustment gesture.
    ///
    /// Outside a gesture this behaves like [`Editor::apply`]. Inside one, the
    /// change is applied in memory and persisted when the gesture ends.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::Storage`] when a step is persisted immediately
    /// and the write fails.
    pub fn adjust(&mut self, intent: &Intent) -> Result<bool, EditorError> {
        let Some(mut adjustment) = self.adjustment else {
            return self.apply(intent);
        };

        let next = intent.apply(self.config());
        if next == *self.config() {
            return Ok(false);
        }

        if !self.coalesce_adjustments {
            debug!(intent = intent.name(), "adjustment step committed");
            self.commit(next)?;
            return Ok(true);
        }

        let previous = std::mem::replace(&mut self.workspace.config, next);
        if !adjustment.snapshot_taken {
            self.workspace.history.push(previous);
            adjustment.snapshot_taken = true;
        }
        adjustment.dirty = true;
        self.adjustment = Some(adjustment);
        Ok(true)
    }

    /// Closes the adjustment gesture, persisting it if anything changed.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::Storage`] if the write fails.
    pub fn end_adjustment(&mut self) -> Result<(), EditorError> {
        match self.adjustment.take() {
            Some(adjustment) if adjustment.dirty => {
                info!("adjustment gesture finished");
                self.selection.retain_existing(&self.workspace.config);
                self.persist()
            }
            _ => Ok(()),
        }
    }

    /// Starts dragging an element. Returns `false` if it does not exist.
    pub fn begin_drag(&mut self, target: ElementRef) -> bool {
        self.drag = DragState::begin(self.config(), target);
        self.drag.is_some()
    }

    /// Updates the drag with the pointer's total movement and returns the
    /// previewed offset. Nothing is recorded or written.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::NoActiveDrag`] outside a drag, or
    /// [`EditorError::NonFiniteOffset`] for NaN or infinite movement, which
    /// leaves the drag where it was.
    pub fn drag_to(&mut self, dx: f64, dy: f64) -> Result<(f64, f64), EditorError> {
        let drag = self.drag.as_mut().ok_or(EditorError::NoActiveDrag)?;
        if !dx.is_finite() || !dy.is_finite() {
            return Err(EditorError::NonFiniteOffset { dx, dy });
        }
        drag.move_to(dx, dy);
        Ok(drag.preview_position())
    }

    /// The drag in progress, if any.
    #[must_use]
    pub const fn drag(&self) -> Option<&DragState> {
        self.drag.as_ref()
    }

    /// Releases the drag, adding the accumulated movement to the element's
    /// prior offset as one committed edit.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::NoActiveDrag`] outside a drag,
    /// [`EditorError::NonFiniteOffset`] if the new offset overflows, or
    /// [`EditorError::Storage`] if the commit could not be written.
    pub fn end_drag(&mut self) -> Result<bool, EditorError> {
        let drag = self.drag.take().ok_or(EditorError::NoActiveDrag)?;
        if !drag.has_moved() {
            return Ok(false);
        }

        let Some(element) = self
            .config()
            .section(&drag.target.section_id)
            .and_then(|s| s.element(&drag.target.element_id))
        else {
            debug!(element = %drag.target.element_id, "dragged element vanished; ignoring");
            return Ok(false);
        };

        let (dx, dy) = drag.delta;
        let (x, y) = (element.style.x + dx, element.style.y + dy);
        if !x.is_finite() || !y.is_finite() {
            return Err(EditorError::NonFiniteOffset { dx, dy });
        }
        let patch = ElementStylePatch::position(x, y);
        self.apply(&Intent::UpdateElementStyle {
            section_id: drag.target.section_id,
            element_id: drag.target.element_id,
            patch,
        })
    }

    /// Abandons the drag without committing.
    pub fn cancel_drag(&mut self) {
        self.drag = None;
    }

    /// Restores the most recent snapshot.
    ///
    /// Any open drag or adjustment gesture is abandoned first.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::NothingToRestore`] when the history is empty
    /// (state unchanged), or [`EditorError::Storage`] if the write fails.
    pub fn undo(&mut self) -> Result<(), EditorError> {
        self.drag = None;
        self.adjustment = None;

        let previous = self
            .workspace
            .history
            .restore()
            .ok_or(EditorError::NothingToRestore)?;
        self.workspace.config = previous;
        self.selection.retain_existing(&self.workspace.config);
        info!(remaining = self.history().len(), "restored previous configuration");
        self.persist()
    }

    /// Replaces the configuration with the one encoded in a sync code.
    ///
    /// Returns `Ok(false)` if the code decodes to the current configuration.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::Decode`] for an invalid code, leaving
    /// everything untouched, or [`EditorError::Storage`] if the write fails.
    pub fn import(&mut self, code: &str) -> Result<bool, EditorError> {
        let imported = sync_codec::decode(code)?;
        if imported == *self.config() {
            debug!("imported configuration matches current one");
            return Ok(false);
        }
        info!(sections = imported.sections.len(), "importing configuration");
        self.drag = None;
        self.adjustment = None;
        self.commit(imported)?;
        Ok(true)
    }

    /// Encodes the current configuration as a sync code.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::Encode`] if serialization fails.
    pub fn export(&self) -> Result<String, EditorError> {
        Ok(sync_codec::encode(self.config())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{CONFIG_KEY, HISTORY_LIMIT};
    use crate::error::StorageError;
    use crate::models::{BackgroundVariant, FilterPatch};
    use crate::services::storage::MemoryStore;

    fn editor() -> Editor<MemoryStore> {
        Editor::open(MemoryStore::new()).unwrap()
    }

    fn add_text(editor: &mut Editor<MemoryStore>) -> ElementRef {
        editor
            .apply(&Intent::AddElement {
                section_id: "space".to_string(),
                kind: ElementKind::Text,
            })
            .unwrap();
        let id = editor.config().section("space").unwrap().elements[0].id.clone();
        ElementRef::new("space", id)
    }

    fn brightness(value: f64) -> Intent {
        Intent::UpdateSectionStyle {
            section_id: "hero".to_string(),
            patch: SectionStylePatch {
                filters: Some(FilterPatch {
                    brightness: Some(value),
                    ..FilterPatch::default()
                }),
                ..SectionStylePatch::default()
            },
        }
    }

    #[test]
    fn test_apply_pushes_and_persists() {
        let mut editor = editor();
        let changed = editor
            .apply(&Intent::DisableSection {
                section_id: "courses".to_string(),
            })
            .unwrap();

        assert!(changed);
        assert_eq!(editor.history().len(), 1);
        assert!(editor.history().peek().unwrap().section("courses").unwrap().enabled);

        let reopened = Editor::open(editor.store().clone()).unwrap();
        assert!(!reopened.config().section("courses").unwrap().enabled);
        assert_eq!(reopened.history().len(), 1);
    }

    #[test]
    fn test_noop_intent_records_nothing() {
        let mut editor = editor();
        let changed = editor
            .apply(&Intent::MoveSection {
                index: 0,
                direction: Direction::Up,
            })
            .unwrap();
        assert!(!changed);
        assert!(editor.history().is_empty());
        assert_eq!(editor.store().get(CONFIG_KEY).unwrap(), None);

        let changed = editor
            .apply(&Intent::DisableSection {
                section_id: "missing".to_string(),
            })
            .unwrap();
        assert!(!changed);
        assert!(editor.history().is_empty());
    }

    #[test]
    fn test_undo_restores_and_empty_history_reports() {
        let mut editor = editor();
        let original = editor.config().clone();
        editor
            .apply(&Intent::DuplicateSection {
                section_id: "space".to_string(),
            })
            .unwrap();
        assert_ne!(*editor.config(), original);

        editor.undo().unwrap();
        assert_eq!(*editor.config(), original);

        let err = editor.undo().unwrap_err();
        assert!(matches!(err, EditorError::NothingToRestore));
        assert_eq!(*editor.config(), original);
    }

    #[test]
    fn test_history_bounded_across_edits() {
        let mut editor = editor();
        for n in 0..(HISTORY_LIMIT + 3) {
            editor
                .apply(&Intent::UpdateSite(SitePatch {
                    site_name: Some(format!("Club {n}")),
                    ..SitePatch::default()
                }))
                .unwrap();
        }
        assert_eq!(editor.history().len(), HISTORY_LIMIT);
    }

    #[test]
    fn test_adjustment_gesture_coalesces() {
        let mut editor = editor();
        let original = editor.config().clone();

        editor.begin_adjustment().unwrap();
        for value in [105.0, 110.0, 120.0, 130.0] {
            assert!(editor.adjust(&brightness(value)).unwrap());
        }
        assert_eq!(editor.history().len(), 1);
        // Not written until the gesture ends.
        assert_eq!(editor.store().get(CONFIG_KEY).unwrap(), None);

        editor.end_adjustment().unwrap();
        assert!(!editor.is_adjusting());
        let reopened = Editor::open(editor.store().clone()).unwrap();
        assert!(
            (reopened.config().section("hero").unwrap().style.filters.brightness - 130.0).abs()
                < f64::EPSILON
        );

        editor.undo().unwrap();
        assert_eq!(*editor.config(), original);
    }

    #[test]
    fn test_adjustment_without_coalescing() {
        let mut editor = editor().with_coalesced_adjustments(false);
        editor.begin_adjustment().unwrap();
        editor.adjust(&brightness(105.0)).unwrap();
        editor.adjust(&brightness(110.0)).unwrap();
        editor.end_adjustment().unwrap();
        assert_eq!(editor.history().len(), 2);
    }

    #[test]
    fn test_adjust_outside_gesture_commits() {
        let mut editor = editor();
        assert!(editor.adjust(&brightness(90.0)).unwrap());
        assert_eq!(editor.history().len(), 1);
        assert!(editor.store().get(CONFIG_KEY).unwrap().is_some());
    }

    #[test]
    fn test_drag_commits_once_and_composes() {
        let mut editor = editor();
        let element = add_text(&mut editor);
        let before = editor.history().len();

        assert!(editor.begin_drag(element.clone()));
        editor.drag_to(4.0, 4.0).unwrap();
        editor.drag_to(10.0, -5.0).unwrap();
        assert_eq!(editor.history().len(), before);
        assert!(editor.end_drag().unwrap());
        assert_eq!(editor.history().len(), before + 1);

        assert!(editor.begin_drag(element.clone()));
        assert_eq!(editor.drag_to(2.0, 2.0).unwrap(), (12.0, -3.0));
        editor.end_drag().unwrap();

        let style = editor
            .config()
            .section("space")
            .unwrap()
            .element(&element.element_id)
            .unwrap()
            .style;
        assert_eq!((style.x, style.y), (12.0, -3.0));
    }

    #[test]
    fn test_drag_errors_and_cancel() {
        let mut editor = editor();
        assert!(matches!(
            editor.drag_to(1.0, 1.0),
            Err(EditorError::NoActiveDrag)
        ));
        assert!(matches!(editor.end_drag(), Err(EditorError::NoActiveDrag)));
        assert!(!editor.begin_drag(ElementRef::new("space", "el-missing")));

        let element = add_text(&mut editor);
        let before = editor.config().clone();
        editor.begin_drag(element);
        editor.drag_to(50.0, 50.0).unwrap();
        editor.cancel_drag();
        assert!(editor.drag().is_none());
        assert_eq!(*editor.config(), before);
    }

    #[test]
    fn test_non_finite_drag_is_rejected() {
        let mut editor = editor();
        let element = add_text(&mut editor);
        let before = editor.config().clone();

        assert!(editor.begin_drag(element));
        editor.drag_to(8.0, 3.0).unwrap();
        for (dx, dy) in [(f64::NAN, 0.0), (0.0, f64::INFINITY), (f64::NEG_INFINITY, 1.0)] {
            assert!(matches!(
                editor.drag_to(dx, dy),
                Err(EditorError::NonFiniteOffset { .. })
            ));
        }
        assert_eq!(editor.drag().unwrap().preview_position(), (8.0, 3.0));
        assert_eq!(*editor.config(), before);
    }

    #[test]
    fn test_overflowing_drag_release_is_rejected() {
        let mut editor = editor();
        let element = add_text(&mut editor);
        assert!(editor.begin_drag(element.clone()));
        editor.drag_to(f64::MAX, 0.0).unwrap();
        editor.end_drag().unwrap();
        let history = editor.history().len();

        assert!(editor.begin_drag(element));
        editor.drag_to(f64::MAX, 0.0).unwrap();
        assert!(matches!(
            editor.end_drag(),
            Err(EditorError::NonFiniteOffset { .. })
        ));
        assert_eq!(editor.history().len(), history);
        assert!(editor.drag().is_none());
    }

    #[test]
    fn test_invalid_import_leaves_state() {
        let mut editor = editor();
        let before = editor.config().clone();
        let err = editor.import("not-a-real-code").unwrap_err();
        assert!(matches!(err, EditorError::Decode(_)));
        assert_eq!(*editor.config(), before);
        assert!(editor.history().is_empty());
    }

    #[test]
    fn test_export_import_between_editors() {
        let mut source = editor();
        source
            .apply(&Intent::UpdateSectionStyle {
                section_id: "space".to_string(),
                patch: SectionStylePatch {
                    bg_variant: Some(BackgroundVariant::Gradient),
                    ..SectionStylePatch::default()
                },
            })
            .unwrap();
        let code = source.export().unwrap();

        let mut target = editor();
        assert!(target.import(&code).unwrap());
        assert_eq!(target.config(), source.config());
        assert_eq!(target.history().len(), 1);
        assert!(!target.import(&code).unwrap());
    }

    #[test]
    fn test_storage_failure_keeps_change_in_memory() {
        let mut editor = Editor::open(MemoryStore::with_quota(64)).unwrap();
        let err = editor
            .apply(&Intent::DisableSection {
                section_id: "courses".to_string(),
            })
            .unwrap_err();

        assert!(matches!(
            err,
            EditorError::Storage(StorageError::QuotaExceeded { .. })
        ));
        assert!(!editor.config().section("courses").unwrap().enabled);
        assert_eq!(editor.history().len(), 1);
    }

    #[test]
    fn test_delete_clears_selection() {
        let mut editor = editor();
        let element = add_text(&mut editor);
        editor.selection_mut().select_element(element.clone());
        editor.selection_mut().select_section("space");

        editor
            .apply(&Intent::DeleteElement {
                section_id: element.section_id.clone(),
                element_id: element.element_id.clone(),
            })
            .unwrap();
        assert!(editor.selection().active_element().is_none());
        assert_eq!(editor.selection().active_section(), Some("space"));
    }
}
