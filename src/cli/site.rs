//! Site-wide field and logo commands.

use crate::cli::common::{parse_patch, report_change, CliError, CliResult, DataArgs};
use crate::editor::Intent;
use crate::models::{LogoPatch, LogoSlot, SitePatch};
use crate::services::images::{DataUriIngestor, ImageIngestor};
use clap::{Args, Subcommand};
use std::path::PathBuf;

/// Site-wide settings commands
#[derive(Args, Debug)]
pub struct SiteArgs {
    #[command(subcommand)]
    command: SiteCommand,
}

#[derive(Subcommand, Debug)]
enum SiteCommand {
    /// Merge site fields (siteName, phone, theme, ...)
    Update {
        /// JSON object, e.g. '{"phone":"+34 911 000 000"}'
        #[arg(long)]
        patch: Option<String>,
        /// Inline an image file as the primary logo
        #[arg(long, value_name = "FILE")]
        logo_file: Option<PathBuf>,
        /// Inline an image file as the alternate logo
        #[arg(long, value_name = "FILE")]
        alt_logo_file: Option<PathBuf>,
    },
    /// Merge placement settings into one logo slot
    Logo {
        /// nav, hero or footer
        slot: LogoSlot,
        /// JSON object, e.g. '{"width":48,"showName":false}'
        #[arg(long)]
        patch: String,
    },
}

impl SiteArgs {
    /// Execute site subcommand
    pub fn execute(&self, data: &DataArgs) -> CliResult<()> {
        match &self.command {
            SiteCommand::Update {
                patch,
                logo_file,
                alt_logo_file,
            } => {
                if patch.is_none() && logo_file.is_none() && alt_logo_file.is_none() {
                    return Err(CliError::validation(
                        "At least one of --patch, --logo-file or --alt-logo-file must be specified",
                    ));
                }

                let mut site_patch: SitePatch = match patch {
                    Some(json) => parse_patch(json)?,
                    None => SitePatch::default(),
                };
                if let Some(path) = logo_file {
                    site_patch.logo_url = Some(DataUriIngestor.ingest_file(path)?);
                }
                if let Some(path) = alt_logo_file {
                    site_patch.logo_alt_url = Some(DataUriIngestor.ingest_file(path)?);
                }

                let mut editor = data.open_editor()?;
                let changed = editor.apply(&Intent::UpdateSite(site_patch))?;
                report_change(changed, "Updated site settings");
            }
            SiteCommand::Logo { slot, patch } => {
                let patch: LogoPatch = parse_patch(patch)?;
                let mut editor = data.open_editor()?;
                let changed = editor.apply(&Intent::UpdateLogo { slot: *slot, patch })?;
                report_change(changed, &format!("Updated {} logo", slot.as_str()));
            }
        }

        Ok(())
    }
}
