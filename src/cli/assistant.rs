//! Chat assistant context export.

use crate::cli::common::{print_json, CliResult, DataArgs};
use crate::services::assistant::AssistantContext;
use clap::Args;

/// Print the system context handed to the chat assistant
#[derive(Args, Debug)]
pub struct AssistantContextArgs {
    /// Output the structured fields as JSON instead of the prompt text
    #[arg(long)]
    json: bool,
}

impl AssistantContextArgs {
    /// Execute assistant-context command
    pub fn execute(&self, data: &DataArgs) -> CliResult<()> {
        let editor = data.open_editor()?;
        let context = AssistantContext::from_config(editor.config());

        if self.json {
            return print_json(&context);
        }
        print!("{}", context.system_prompt());
        Ok(())
    }
}
