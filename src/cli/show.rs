//! Read-only views of the stored configuration.

use crate::cli::common::{print_json, CliResult, DataArgs};
use crate::services::navigation::{listed_sections, navigation, ViewMode};
use clap::Args;

/// Show the current configuration
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Include disabled sections
    #[arg(long)]
    all: bool,

    /// Output the full configuration as JSON
    #[arg(long)]
    json: bool,
}

impl ShowArgs {
    /// Execute show command
    pub fn execute(&self, data: &DataArgs) -> CliResult<()> {
        let editor = data.open_editor()?;
        let config = editor.config();

        if self.json {
            return print_json(config);
        }

        println!("{}", config.site_name);
        if !config.tagline.is_empty() {
            println!("{}", config.tagline);
        }
        println!();

        let view = if self.all {
            ViewMode::Edit
        } else {
            ViewMode::Public
        };
        println!("Sections:");
        for (index, section) in listed_sections(config, view).into_iter().enumerate() {
            let status = if section.enabled { "" } else { " (disabled)" };
            println!(
                "  {index:>2}. {:<20} {:<28} {} element(s){status}",
                section.id,
                section.title,
                section.elements.len()
            );
            for element in &section.elements {
                println!("        - {} [{}]", element.id, element.kind.as_str());
            }
        }

        Ok(())
    }
}

/// Show the navigation menu
#[derive(Args, Debug)]
pub struct NavArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

impl NavArgs {
    /// Execute nav command
    pub fn execute(&self, data: &DataArgs) -> CliResult<()> {
        let editor = data.open_editor()?;
        let entries = navigation(editor.config());

        if self.json {
            return print_json(&entries);
        }

        if entries.is_empty() {
            println!("Navigation is empty.");
        }
        for entry in entries {
            println!("{:<20} {}", entry.id, entry.label);
        }
        Ok(())
    }
}
