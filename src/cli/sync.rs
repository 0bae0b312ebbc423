//! Sync code export and import.

use crate::cli::common::{print_json, report_change, CliError, CliResult, DataArgs};
use clap::Args;
use serde::Serialize;
use std::io::Read;

/// Print the current configuration as a sync code
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Also copy the code to the system clipboard
    #[arg(long)]
    copy: bool,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize, Debug)]
struct ExportOutput<'a> {
    code: &'a str,
    length: usize,
    copied: bool,
}

impl ExportArgs {
    /// Execute export command
    pub fn execute(&self, data: &DataArgs) -> CliResult<()> {
        let editor = data.open_editor()?;
        let code = editor.export()?;

        let copied = self.copy
            && match arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(&code))
            {
                Ok(()) => true,
                Err(e) => {
                    eprintln!("Warning: Failed to copy to clipboard: {e}");
                    false
                }
            };

        if self.json {
            return print_json(&ExportOutput {
                code: &code,
                length: code.len(),
                copied,
            });
        }

        println!("{code}");
        if copied {
            eprintln!("Sync code copied to clipboard");
        }
        Ok(())
    }
}

/// Replace the configuration with one from a sync code
#[derive(Args, Debug)]
pub struct ImportArgs {
    /// Sync code (read from stdin when omitted)
    code: Option<String>,
}

impl ImportArgs {
    /// Execute import command
    pub fn execute(&self, data: &DataArgs) -> CliResult<()> {
        let code = match &self.code {
            Some(code) => code.clone(),
            None => {
                let mut buffer = String::new();
                std::io::stdin()
                    .read_to_string(&mut buffer)
                    .map_err(|e| CliError::io(format!("Failed to read sync code from stdin: {e}")))?;
                buffer
            }
        };

        let mut editor = data.open_editor()?;
        let changed = editor.import(&code)?;
        report_change(changed, "Configuration imported");
        Ok(())
    }
}
