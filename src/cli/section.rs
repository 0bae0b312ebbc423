//! Section editing commands.

use crate::cli::common::{
    parse_patch, report_change, require_section, CliError, CliResult, DataArgs,
};
use crate::editor::Intent;
use crate::models::{NewSection, SectionPatch, SectionStylePatch};
use crate::services::mutations::Direction;
use clap::{Args, Subcommand};

/// Section editing commands
#[derive(Args, Debug)]
pub struct SectionArgs {
    #[command(subcommand)]
    command: SectionCommand,
}

#[derive(Subcommand, Debug)]
enum SectionCommand {
    /// Add a new navigable section at the end of the page
    Add {
        /// Heading text
        #[arg(long)]
        title: String,
        /// Navigation label (defaults to the title)
        #[arg(long)]
        nav_label: Option<String>,
        /// Body text
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Merge top-level fields (navLabel, title, description, ...) into a section
    Update {
        /// Section id
        section: String,
        /// JSON object, e.g. '{"title":"Nuevo"}'
        #[arg(long)]
        patch: String,
    },
    /// Merge style fields into a section
    ///
    /// Several --patch values are applied as one adjustment, undone in one step.
    Style {
        /// Section id
        section: String,
        /// JSON object, e.g. '{"bgVariant":"glass"}'
        #[arg(long, required = true)]
        patch: Vec<String>,
    },
    /// Swap a section with its neighbour
    Move {
        /// Section id
        section: String,
        /// up or down
        direction: Direction,
    },
    /// Copy a section (with its elements) right after the original
    Duplicate {
        /// Section id
        section: String,
    },
    /// Hide a section, keeping its content
    Disable {
        /// Section id
        section: String,
    },
    /// Show a previously disabled section again
    Enable {
        /// Section id
        section: String,
    },
    /// Remove a section from the navigation menu and hide it
    RemoveNav {
        /// Section id
        section: String,
    },
}

impl SectionArgs {
    /// Execute section subcommand
    pub fn execute(&self, data: &DataArgs) -> CliResult<()> {
        let mut editor = data.open_editor()?;

        match &self.command {
            SectionCommand::Add {
                title,
                nav_label,
                description,
            } => {
                if title.trim().is_empty() {
                    return Err(CliError::validation("Section title cannot be empty"));
                }
                let fields = NewSection {
                    nav_label: nav_label.clone().unwrap_or_else(|| title.clone()),
                    title: title.clone(),
                    description: description.clone(),
                };
                editor.apply(&Intent::AddSection(fields))?;
                let id = editor
                    .config()
                    .sections
                    .last()
                    .map(|s| s.id.clone())
                    .unwrap_or_default();
                println!("Added section '{id}'");
            }
            SectionCommand::Update { section, patch } => {
                require_section(&editor, section)?;
                let patch: SectionPatch = parse_patch(patch)?;
                let changed = editor.apply(&Intent::UpdateSectionFields {
                    section_id: section.clone(),
                    patch,
                })?;
                report_change(changed, &format!("Updated section '{section}'"));
            }
            SectionCommand::Style { section, patch } => {
                require_section(&editor, section)?;
                let patches = patch
                    .iter()
                    .map(|p| parse_patch::<SectionStylePatch>(p))
                    .collect::<CliResult<Vec<_>>>()?;

                editor.begin_adjustment()?;
                let mut changed = false;
                for patch in patches {
                    changed |= editor.adjust(&Intent::UpdateSectionStyle {
                        section_id: section.clone(),
                        patch,
                    })?;
                }
                editor.end_adjustment()?;
                report_change(changed, &format!("Updated style of section '{section}'"));
            }
            SectionCommand::Move { section, direction } => {
                require_section(&editor, section)?;
                let index = editor.config().section_index(section).unwrap_or_default();
                let changed = editor.apply(&Intent::MoveSection {
                    index,
                    direction: *direction,
                })?;
                report_change(changed, &format!("Moved section '{section}' {direction}"));
            }
            SectionCommand::Duplicate { section } => {
                require_section(&editor, section)?;
                editor.apply(&Intent::DuplicateSection {
                    section_id: section.clone(),
                })?;
                let copy = editor
                    .config()
                    .section_index(section)
                    .and_then(|i| editor.config().sections.get(i + 1))
                    .map(|s| s.id.clone())
                    .unwrap_or_default();
                println!("Duplicated section '{section}' as '{copy}'");
            }
            SectionCommand::Disable { section } => {
                require_section(&editor, section)?;
                let changed = editor.apply(&Intent::DisableSection {
                    section_id: section.clone(),
                })?;
                report_change(changed, &format!("Disabled section '{section}'"));
            }
            SectionCommand::Enable { section } => {
                require_section(&editor, section)?;
                let changed = editor.apply(&Intent::EnableSection {
                    section_id: section.clone(),
                })?;
                report_change(changed, &format!("Enabled section '{section}'"));
            }
            SectionCommand::RemoveNav { section } => {
                require_section(&editor, section)?;
                let changed = editor.apply(&Intent::DeleteNavEntry {
                    section_id: section.clone(),
                })?;
                report_change(
                    changed,
                    &format!("Removed section '{section}' from navigation"),
                );
            }
        }

        Ok(())
    }
}
