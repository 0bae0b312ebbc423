//! Element editing commands.

use crate::cli::common::{
    parse_patch, report_change, require_element, require_section, CliError, CliResult, DataArgs,
};
use crate::editor::{ElementRef, Intent};
use crate::models::{ElementKind, ElementStylePatch};
use crate::services::images::{DataUriIngestor, ImageIngestor};
use crate::services::mutations::Direction;
use clap::{Args, Subcommand};
use std::path::PathBuf;

/// Element editing commands
#[derive(Args, Debug)]
pub struct ElementArgs {
    #[command(subcommand)]
    command: ElementCommand,
}

#[derive(Subcommand, Debug)]
enum ElementCommand {
    /// Append a new element with default content and style
    Add {
        /// Section id
        section: String,
        /// text, image or logo
        kind: ElementKind,
    },
    /// Replace an element's text or image
    Content {
        /// Section id
        section: String,
        /// Element id
        element: String,
        /// New text or image reference
        #[arg(required_unless_present = "image", conflicts_with = "image")]
        content: Option<String>,
        /// Inline an image file as the new content
        #[arg(long, value_name = "FILE")]
        image: Option<PathBuf>,
    },
    /// Merge style fields into an element
    ///
    /// Several --patch values are applied as one adjustment, undone in one step.
    Style {
        /// Section id
        section: String,
        /// Element id
        element: String,
        /// JSON object, e.g. '{"hoverEffect":"zoom"}'
        #[arg(long, required = true)]
        patch: Vec<String>,
    },
    /// Swap an element with its neighbour in the stacking order
    Move {
        /// Section id
        section: String,
        /// Element id
        element: String,
        /// up or down
        direction: Direction,
    },
    /// Copy an element to the end of the same section
    Duplicate {
        /// Section id
        section: String,
        /// Element id
        element: String,
    },
    /// Remove an element
    Delete {
        /// Section id
        section: String,
        /// Element id
        element: String,
    },
    /// Move an element by a pixel offset, as a single drag gesture
    Drag {
        /// Section id
        section: String,
        /// Element id
        element: String,
        /// Horizontal movement in pixels
        #[arg(long, allow_hyphen_values = true, default_value_t = 0.0, value_parser = parse_offset)]
        dx: f64,
        /// Vertical movement in pixels
        #[arg(long, allow_hyphen_values = true, default_value_t = 0.0, value_parser = parse_offset)]
        dy: f64,
    },
}

impl ElementArgs {
    /// Execute element subcommand
    pub fn execute(&self, data: &DataArgs) -> CliResult<()> {
        let mut editor = data.open_editor()?;

        match &self.command {
            ElementCommand::Add { section, kind } => {
                require_section(&editor, section)?;
                editor.apply(&Intent::AddElement {
                    section_id: section.clone(),
                    kind: *kind,
                })?;
                let id = editor
                    .config()
                    .section(section)
                    .and_then(|s| s.elements.last())
                    .map(|e| e.id.clone())
                    .unwrap_or_default();
                println!("Added {} element '{id}' to section '{section}'", kind.as_str());
            }
            ElementCommand::Content {
                section,
                element,
                content,
                image,
            } => {
                require_element(&editor, section, element)?;
                let content = match (content, image) {
                    (_, Some(path)) => DataUriIngestor.ingest_file(path)?,
                    (Some(text), None) => text.clone(),
                    (None, None) => {
                        return Err(CliError::validation("Provide new content or --image"))
                    }
                };
                let changed = editor.apply(&Intent::UpdateElementContent {
                    section_id: section.clone(),
                    element_id: element.clone(),
                    content,
                })?;
                report_change(changed, &format!("Updated content of element '{element}'"));
            }
            ElementCommand::Style {
                section,
                element,
                patch,
            } => {
                require_element(&editor, section, element)?;
                let patches = patch
                    .iter()
                    .map(|p| parse_patch::<ElementStylePatch>(p))
                    .collect::<CliResult<Vec<_>>>()?;

                editor.begin_adjustment()?;
                let mut changed = false;
                for patch in patches {
                    changed |= editor.adjust(&Intent::UpdateElementStyle {
                        section_id: section.clone(),
                        element_id: element.clone(),
                        patch,
                    })?;
                }
                editor.end_adjustment()?;
                report_change(changed, &format!("Updated style of element '{element}'"));
            }
            ElementCommand::Move {
                section,
                element,
                direction,
            } => {
                require_element(&editor, section, element)?;
                let index = editor
                    .config()
                    .section(section)
                    .and_then(|s| s.elements.iter().position(|e| &e.id == element))
                    .unwrap_or_default();
                let changed = editor.apply(&Intent::MoveElement {
                    section_id: section.clone(),
                    index,
                    direction: *direction,
                })?;
                report_change(changed, &format!("Moved element '{element}' {direction}"));
            }
            ElementCommand::Duplicate { section, element } => {
                require_element(&editor, section, element)?;
                editor.apply(&Intent::DuplicateElement {
                    section_id: section.clone(),
                    element_id: element.clone(),
                })?;
                let copy = editor
                    .config()
                    .section(section)
                    .and_then(|s| s.elements.last())
                    .map(|e| e.id.clone())
                    .unwrap_or_default();
                println!("Duplicated element '{element}' as '{copy}'");
            }
            ElementCommand::Delete { section, element } => {
                require_element(&editor, section, element)?;
                editor.apply(&Intent::DeleteElement {
                    section_id: section.clone(),
                    element_id: element.clone(),
                })?;
                println!("Deleted element '{element}'");
            }
            ElementCommand::Drag {
                section,
                element,
                dx,
                dy,
            } => {
                require_element(&editor, section, element)?;
                editor.begin_drag(ElementRef::new(section.clone(), element.clone()));
                let (x, y) = editor.drag_to(*dx, *dy)?;
                let changed = editor.end_drag()?;
                report_change(changed, &format!("Moved element '{element}' to ({x}, {y})"));
            }
        }

        Ok(())
    }
}

/// Parses a drag offset, refusing NaN and infinities.
fn parse_offset(value: &str) -> Result<f64, String> {
    let offset: f64 = value
        .parse()
        .map_err(|_| format!("'{value}' is not a number"))?;
    if offset.is_finite() {
        Ok(offset)
    } else {
        Err(format!("'{value}' is not a finite number"))
    }
}
