//! Undo and history inspection.

use crate::cli::common::{print_json, CliResult, DataArgs};
use clap::Args;
use serde::Serialize;

/// Restore the previous configuration
#[derive(Args, Debug)]
pub struct UndoArgs {}

impl UndoArgs {
    /// Execute undo command
    pub fn execute(&self, data: &DataArgs) -> CliResult<()> {
        let mut editor = data.open_editor()?;
        editor.undo()?;
        println!(
            "Restored previous configuration ({} step(s) left)",
            editor.history().len()
        );
        Ok(())
    }
}

/// List stored undo snapshots, most recent first
#[derive(Args, Debug)]
pub struct HistoryArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct SnapshotSummary {
    index: usize,
    site_name: String,
    sections: usize,
    enabled_sections: usize,
    elements: usize,
}

impl HistoryArgs {
    /// Execute history command
    pub fn execute(&self, data: &DataArgs) -> CliResult<()> {
        let editor = data.open_editor()?;
        let summaries: Vec<_> = editor
            .history()
            .iter()
            .enumerate()
            .map(|(index, config)| SnapshotSummary {
                index,
                site_name: config.site_name.clone(),
                sections: config.sections.len(),
                enabled_sections: config.sections.iter().filter(|s| s.enabled).count(),
                elements: config.sections.iter().map(|s| s.elements.len()).sum(),
            })
            .collect();

        if self.json {
            return print_json(&summaries);
        }

        if summaries.is_empty() {
            println!("History is empty.");
            return Ok(());
        }
        for s in &summaries {
            println!(
                "{:>2}. {} - {} section(s) ({} enabled), {} element(s)",
                s.index, s.site_name, s.sections, s.enabled_sections, s.elements
            );
        }
        Ok(())
    }
}
